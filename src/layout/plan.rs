use crate::theme::Color;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Axis-aligned box; `y` is the bottom edge (PDF coordinates).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Bounds {
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    pub fn right(&self) -> f32 {
        self.x + self.w
    }

    pub fn top(&self) -> f32 {
        self.y + self.h
    }

    pub fn center(&self) -> Point {
        Point::new(self.x + self.w * 0.5, self.y + self.h * 0.5)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Stroke {
    pub color: Color,
    pub width: f32,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    Rect {
        bounds: Bounds,
        radius: f32,
        fill: Option<Color>,
        stroke: Option<Stroke>,
    },
    Line {
        from: Point,
        to: Point,
        stroke: Stroke,
    },
    Circle {
        center: Point,
        radius: f32,
        stroke: Stroke,
    },
    /// Single line of text centred on `center_x`, sitting on `baseline`.
    Text {
        text: String,
        center_x: f32,
        baseline: f32,
        size: f32,
        width: f32,
        color: Color,
    },
    /// Slot for the document logo; pixels are supplied by the backend.
    Image { bounds: Bounds },
}

impl Shape {
    pub fn kind(&self) -> &'static str {
        match self {
            Shape::Rect { fill: Some(_), .. } => "filled-rect",
            Shape::Rect { .. } => "outlined-rect",
            Shape::Line { .. } => "line",
            Shape::Circle { .. } => "circle",
            Shape::Text { .. } => "text",
            Shape::Image { .. } => "image",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    Background,
    HeaderRule,
    EventTitle,
    EventSubtitle,
    Block,
    BlockBorder,
    ZoneTitle,
    Icon,
    ZoneSubtitle,
    FooterRule,
    Logo,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Background => "background",
            Role::HeaderRule => "header-rule",
            Role::EventTitle => "event-title",
            Role::EventSubtitle => "event-subtitle",
            Role::Block => "block",
            Role::BlockBorder => "block-border",
            Role::ZoneTitle => "zone-title",
            Role::Icon => "icon",
            Role::ZoneSubtitle => "zone-subtitle",
            Role::FooterRule => "footer-rule",
            Role::Logo => "logo",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    pub role: Role,
    pub shape: Shape,
}

/// Backend-agnostic drawing instructions for one page, in paint order.
#[derive(Debug, Clone, PartialEq)]
pub struct DrawPlan {
    pub width: f32,
    pub height: f32,
    pub elements: Vec<Element>,
}

impl DrawPlan {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width,
            height,
            elements: Vec::new(),
        }
    }

    pub fn push(&mut self, role: Role, shape: Shape) {
        self.elements.push(Element { role, shape });
    }

    pub fn with_role(&self, role: Role) -> impl Iterator<Item = &Shape> {
        self.elements
            .iter()
            .filter(move |element| element.role == role)
            .map(|element| &element.shape)
    }

    pub fn has_role(&self, role: Role) -> bool {
        self.with_role(role).next().is_some()
    }

    /// Text of the first text element with `role`.
    pub fn text_of(&self, role: Role) -> Option<&str> {
        self.with_role(role).find_map(|shape| match shape {
            Shape::Text { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }

    /// One `role: kind` line per element.
    pub fn outline(&self) -> String {
        self.elements
            .iter()
            .map(|element| format!("{}: {}", element.role.as_str(), element.shape.kind()))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

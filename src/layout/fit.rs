use crate::font::FontMetrics;

/// Decrement applied between candidate sizes.
pub const FIT_STEP: f32 = 2.0;

/// Largest size from `max_size` down to `min_size`, in steps of [`FIT_STEP`],
/// at which `text` fits on one line within `max_width`.
///
/// Falls back to `min_size` when nothing fits; the text then overflows.
pub fn fit_text(
    text: &str,
    max_width: f32,
    font: &FontMetrics,
    max_size: f32,
    min_size: f32,
) -> f32 {
    let text = text.trim();
    let mut size = max_size;
    while size >= min_size {
        if font.text_width(text, size) <= max_width {
            return size;
        }
        size -= FIT_STEP;
    }
    min_size
}

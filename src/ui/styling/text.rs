//! Text measurement for mono fonts
//!
//! Widgets never shorten the text they own. When a label does not fit, the
//! drawing code renders the longest prefix that does, computed here.

use embedded_graphics::mono_font::MonoFont;

/// Width in pixels of `text` rendered with `font`.
pub fn measure_text_width(font: &MonoFont<'_>, text: &str) -> u32 {
    width_of(font, text.chars().count())
}

/// Height of a line of text, in pixels.
pub fn text_height(font: &MonoFont<'_>) -> u32 {
    font.character_size.height
}

fn width_of(font: &MonoFont<'_>, chars: usize) -> u32 {
    if chars == 0 {
        return 0;
    }
    let chars = chars as u32;
    chars * font.character_size.width + (chars - 1) * font.character_spacing
}

/// Longest prefix of `text` that renders within `max_width` pixels.
pub fn fit_text<'a>(font: &MonoFont<'_>, text: &'a str, max_width: u32) -> &'a str {
    let mut end = 0;
    for (count, (index, c)) in text.char_indices().enumerate() {
        if width_of(font, count + 1) > max_width {
            break;
        }
        end = index + c.len_utf8();
    }
    &text[..end]
}

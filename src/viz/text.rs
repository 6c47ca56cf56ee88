//! Text measurement helpers (Plotters cannot measure text before drawing it).

/// Rough pixel width of `text` at `font_px`: ~0.6em per character.
pub fn estimate_text_width_px(text: &str, font_px: u32) -> u32 {
    ((text.chars().count() as f32) * (font_px as f32) * 0.60).ceil() as u32
}

/// Shorten `text` so it fits `max_px`, ending in `…` when something was cut.
pub fn truncate_to_width(text: &str, font_px: u32, max_px: u32) -> String {
    if estimate_text_width_px(text, font_px) <= max_px {
        return text.to_string();
    }
    let mut kept: Vec<char> = Vec::new();
    for ch in text.chars() {
        kept.push(ch);
        // +1 char for the ellipsis
        if estimate_text_width_px(&"x".repeat(kept.len() + 1), font_px) > max_px {
            kept.pop();
            break;
        }
    }
    if kept.is_empty() {
        return String::new();
    }
    kept.push('…');
    kept.into_iter().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_text_is_untouched() {
        assert_eq!(truncate_to_width("2023", 12, 100), "2023");
    }

    #[test]
    fn long_text_gets_ellipsis_and_fits() {
        let out = truncate_to_width("Closed access publications", 10, 60);
        assert!(out.ends_with('…'));
        assert!(estimate_text_width_px(&out, 10) <= 60);
    }
}

//! Glyphs used across widgets

/// Braille spinner, advanced once per tick
pub const SPINNER_FRAMES: [&str; 8] = ["⣾", "⣽", "⣻", "⢿", "⡿", "⣟", "⣯", "⣷"];

pub const PLANE: &str = "✈";
pub const ARROW: &str = "→";
pub const CURSOR: &str = "▏";

/// Spinner glyph for an animation frame
pub fn spinner(frame: u64) -> &'static str {
    SPINNER_FRAMES[(frame % SPINNER_FRAMES.len() as u64) as usize]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spinner_wraps() {
        assert_eq!(spinner(0), SPINNER_FRAMES[0]);
        assert_eq!(spinner(SPINNER_FRAMES.len() as u64), SPINNER_FRAMES[0]);
        assert_eq!(spinner(9), SPINNER_FRAMES[1]);
    }
}

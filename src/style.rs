//! Terminal styling used by the [`Display`](std::fmt::Display) output of
//! [`RingList`](crate::RingList).
//!
//! Styling is purely cosmetic. With the `color` feature disabled, [`styled`]
//! returns its input untouched.

/// Foreground colors of the standard 8-color ANSI palette.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Color {
    Black,
    Red,
    Green,
    Yellow,
    Blue,
    Magenta,
    Cyan,
    White,
}

impl Color {
    /// The SGR parameter selecting this color as foreground.
    pub fn code(self) -> u8 {
        match self {
            Color::Black => 30,
            Color::Red => 31,
            Color::Green => 32,
            Color::Yellow => 33,
            Color::Blue => 34,
            Color::Magenta => 35,
            Color::Cyan => 36,
            Color::White => 37,
        }
    }
}

/// Wraps `text` so that a terminal renders it with the `fg` foreground color.
///
/// # Examples
///
/// ```
/// use psycle::style::{styled, Color};
///
/// let text = styled(" @", Color::Red);
/// #[cfg(feature = "color")]
/// assert_eq!(text, "\x1b[31m @\x1b[0m");
/// #[cfg(not(feature = "color"))]
/// assert_eq!(text, " @");
/// ```
pub fn styled(text: &str, fg: Color) -> String {
    if cfg!(feature = "color") {
        format!("\x1b[{}m{}\x1b[0m", fg.code(), text)
    } else {
        text.to_owned()
    }
}

#[cfg(test)]
mod tests {
    use crate::style::{styled, Color};

    #[test]
    fn styled_keeps_text() {
        for color in [Color::Red, Color::Blue, Color::White] {
            assert!(styled(" > ", color).contains(" > "));
        }
    }

    #[cfg(feature = "color")]
    #[test]
    fn styled_wraps_with_sgr() {
        assert_eq!(styled("x", Color::Blue), "\x1b[34mx\x1b[0m");
    }
}

//! Chat line records
//!
//! Lines arrive from an external text-acquisition service as an ordered
//! buffer that is re-supplied in full on every update; this core never
//! requests lines out-of-band.

use serde::{Deserialize, Serialize};

/// A single line captured from the game's chat box.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatLine {
    pub text: String,
}

impl ChatLine {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

/// Join a line with up to two of its successors.
///
/// The reader splits long scripted messages across lines at unpredictable
/// points; mechanic matchers run against this widened window so a split
/// message still registers.
pub(crate) fn context_window(lines: &[ChatLine], index: usize) -> String {
    let mut window = String::new();
    for line in lines.iter().skip(index).take(3) {
        if !window.is_empty() {
            window.push(' ');
        }
        window.push_str(&line.text);
    }
    window.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn window_spans_three_lines() {
        let lines = vec![
            ChatLine::new("one"),
            ChatLine::new("two"),
            ChatLine::new("three"),
            ChatLine::new("four"),
        ];
        assert_eq!(context_window(&lines, 0), "one two three");
        assert_eq!(context_window(&lines, 2), "three four");
        assert_eq!(context_window(&lines, 3), "four");
    }

    #[test]
    fn window_trims_padding() {
        let lines = vec![ChatLine::new("  padded  ")];
        assert_eq!(context_window(&lines, 0), "padded");
    }
}

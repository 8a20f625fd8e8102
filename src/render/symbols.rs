//! Glyphs with ASCII fallbacks for terminals without Unicode support

/// Symbol with Unicode and ASCII fallback
#[derive(Debug, Clone, Copy)]
pub struct Symbol {
    /// Unicode character for modern terminals
    pub unicode: char,
    /// ASCII fallback for limited terminals
    pub ascii: char,
}

impl Symbol {
    pub const fn new(unicode: char, ascii: char) -> Self {
        Self { unicode, ascii }
    }

    /// Render the appropriate character based on Unicode support
    pub fn render(&self, use_unicode: bool) -> char {
        if use_unicode {
            self.unicode
        } else {
            self.ascii
        }
    }
}

/// Small heart used in the footer and status bar
pub const HEART: Symbol = Symbol::new('\u{2665}', '<'); // ♥

/// Box corners and edges for buttons
pub struct BorderSymbols {
    pub top_left: Symbol,
    pub top_right: Symbol,
    pub bottom_left: Symbol,
    pub bottom_right: Symbol,
    pub horizontal: Symbol,
    pub vertical: Symbol,
}

/// Rounded borders, like a pill-shaped button
pub const ROUNDED_BORDER: BorderSymbols = BorderSymbols {
    top_left: Symbol::new('\u{256D}', '.'),      // ╭
    top_right: Symbol::new('\u{256E}', '.'),     // ╮
    bottom_left: Symbol::new('\u{2570}', '\''),  // ╰
    bottom_right: Symbol::new('\u{256F}', '\''), // ╯
    horizontal: Symbol::new('\u{2500}', '-'),    // ─
    vertical: Symbol::new('\u{2502}', '|'),      // │
};

/// Large heart drawn above the question
pub const HEART_ART: [&str; 5] = [
    " ██ ██ ",
    "███████",
    " █████ ",
    "  ███  ",
    "   █   ",
];

/// ASCII version of [`HEART_ART`]
pub const HEART_ART_ASCII: [&str; 5] = [
    " @@ @@ ",
    "@@@@@@@",
    " @@@@@ ",
    "  @@@  ",
    "   @   ",
];

/// Rows of the large heart for the current terminal
pub fn heart_art(use_unicode: bool) -> &'static [&'static str; 5] {
    if use_unicode {
        &HEART_ART
    } else {
        &HEART_ART_ASCII
    }
}

/// Detect if the terminal likely supports Unicode
pub fn detect_unicode() -> bool {
    let locale_is_utf8 = ["LC_ALL", "LC_CTYPE", "LANG"].iter().any(|var| {
        std::env::var(var)
            .map(|value| value.to_lowercase().contains("utf"))
            .unwrap_or(false)
    });
    if locale_is_utf8 {
        return true;
    }

    // Known Unicode-capable terminals
    if let Ok(term_program) = std::env::var("TERM_PROGRAM") {
        let unicode_terminals = ["iTerm.app", "Apple_Terminal", "vscode", "Alacritty", "kitty", "WezTerm"];
        if unicode_terminals.iter().any(|t| term_program.contains(t)) {
            return true;
        }
    }

    std::env::var("TERM")
        .map(|term| ["xterm", "screen", "tmux", "rxvt"].iter().any(|t| term.contains(t)))
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_symbol_render() {
        assert_eq!(HEART.render(true), '♥');
        assert_eq!(HEART.render(false), '<');
    }

    #[test]
    fn test_heart_art_rows_share_width() {
        for art in [heart_art(true), heart_art(false)] {
            let width = art[0].chars().count();
            assert!(art.iter().all(|row| row.chars().count() == width));
        }
    }
}

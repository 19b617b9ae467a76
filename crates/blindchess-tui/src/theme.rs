use crossterm::style::Color;

/// Terminal palette; `t` cycles through the built-in ones
#[derive(Debug, Clone)]
pub struct Theme {
    pub name: &'static str,
    pub bg: Color,
    pub fg: Color,
    /// Board frame and file/rank labels
    pub border: Color,
    pub light_square: Color,
    pub dark_square: Color,
    /// Obstacle glyphs drawn on the board
    pub piece: Color,
    pub cursor_bg: Color,
    /// Start square, diagonals and found targets
    pub highlight_bg: Color,
    /// Misses and lost lives
    pub error: Color,
    /// Correct answers
    pub success: Color,
    /// Clocks, wave counters, hints
    pub info: Color,
    /// Key names in the controls line
    pub key: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self::dark()
    }
}

impl Theme {
    pub fn next(&self) -> Self {
        match self.name {
            "dark" => Self::light(),
            "light" => Self::high_contrast(),
            _ => Self::dark(),
        }
    }

    pub fn dark() -> Self {
        Self {
            name: "dark",
            bg: Color::Rgb { r: 18, g: 18, b: 24 },
            fg: Color::Rgb { r: 222, g: 220, b: 210 },
            border: Color::Rgb { r: 104, g: 108, b: 124 },
            light_square: Color::Rgb { r: 170, g: 160, b: 140 },
            dark_square: Color::Rgb { r: 95, g: 80, b: 65 },
            piece: Color::Rgb { r: 20, g: 20, b: 25 },
            cursor_bg: Color::Rgb { r: 70, g: 90, b: 140 },
            highlight_bg: Color::Rgb { r: 190, g: 160, b: 60 },
            error: Color::Rgb { r: 232, g: 84, b: 72 },
            success: Color::Rgb { r: 118, g: 200, b: 96 },
            info: Color::Rgb { r: 150, g: 156, b: 170 },
            key: Color::Rgb { r: 236, g: 190, b: 92 },
        }
    }

    /// Classic wooden board on a pale background
    pub fn light() -> Self {
        Self {
            name: "light",
            bg: Color::Rgb { r: 246, g: 242, b: 232 },
            fg: Color::Rgb { r: 40, g: 34, b: 28 },
            border: Color::Rgb { r: 120, g: 120, b: 140 },
            light_square: Color::Rgb { r: 240, g: 217, b: 181 },
            dark_square: Color::Rgb { r: 181, g: 136, b: 99 },
            piece: Color::Rgb { r: 0, g: 0, b: 0 },
            cursor_bg: Color::Rgb { r: 120, g: 160, b: 240 },
            highlight_bg: Color::Rgb { r: 245, g: 220, b: 90 },
            error: Color::Rgb { r: 190, g: 40, b: 36 },
            success: Color::Rgb { r: 46, g: 140, b: 52 },
            info: Color::Rgb { r: 100, g: 92, b: 84 },
            key: Color::Rgb { r: 170, g: 96, b: 16 },
        }
    }

    /// Plain ANSI colors for limited terminals
    pub fn high_contrast() -> Self {
        Self {
            name: "high-contrast",
            bg: Color::Black,
            fg: Color::White,
            border: Color::Grey,
            light_square: Color::White,
            dark_square: Color::DarkGrey,
            piece: Color::Black,
            cursor_bg: Color::Blue,
            highlight_bg: Color::Yellow,
            error: Color::Red,
            success: Color::Green,
            info: Color::Cyan,
            key: Color::Yellow,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_theme_cycle() {
        let theme = Theme::dark().next().next();
        assert_eq!(theme.name, "high-contrast");
        assert_eq!(theme.next().name, "dark");
    }
}

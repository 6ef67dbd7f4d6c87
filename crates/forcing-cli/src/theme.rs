use crossterm::style::Color;

/// Color theme for grid output
#[derive(Debug, Clone)]
pub struct Theme {
    /// Default text color
    pub fg: Color,
    /// Values derived from seeds
    pub calculated: Color,
    /// User-edited values
    pub edited: Color,
    /// Valid status line
    pub success: Color,
    /// Invalid status line and failing assignments
    pub error: Color,
    /// Secondary info text
    pub info: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self::dark()
    }
}

impl Theme {
    /// Dark terminal theme (default)
    pub fn dark() -> Self {
        Self {
            fg: Color::Rgb { r: 230, g: 230, b: 240 },
            calculated: Color::Rgb { r: 80, g: 180, b: 255 },
            edited: Color::Rgb { r: 255, g: 210, b: 100 },
            success: Color::Rgb { r: 90, g: 255, b: 130 },
            error: Color::Rgb { r: 255, g: 90, b: 90 },
            info: Color::Rgb { r: 160, g: 165, b: 185 },
        }
    }

    /// High contrast theme
    pub fn high_contrast() -> Self {
        Self {
            fg: Color::White,
            calculated: Color::Cyan,
            edited: Color::Yellow,
            success: Color::Green,
            error: Color::Red,
            info: Color::Grey,
        }
    }

    /// Look up a theme by name, defaulting to dark
    pub fn by_name(name: &str) -> Self {
        match name {
            "high_contrast" => Self::high_contrast(),
            _ => Self::dark(),
        }
    }
}

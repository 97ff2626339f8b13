use ratatui::style::Color;

/// Theme color palette defining all colors used in the application.
///
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Theme {
    pub name: &'static str,
    pub primary: ColorSpec,
    pub accent: ColorSpec,

    // Text colors
    pub text: ColorSpec,
    pub text_muted: ColorSpec,

    // Status colors
    pub success: ColorSpec,
    pub warning: ColorSpec,
    pub error: ColorSpec,

    // UI element colors
    pub border_active: ColorSpec,
    pub border_normal: ColorSpec,
    pub highlight_bg: ColorSpec,
    pub highlight_fg: ColorSpec,
}

/// Plain RGB triple.
///
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ColorSpec {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl ColorSpec {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        ColorSpec { r, g, b }
    }

    pub fn to_color(&self) -> Color {
        Color::Rgb(self.r, self.g, self.b)
    }
}

impl Default for Theme {
    fn default() -> Self {
        Theme::rose_pine()
    }
}

impl Theme {
    /// Rose Pine theme.
    ///
    pub fn rose_pine() -> Self {
        Theme {
            name: "rose-pine",
            primary: ColorSpec::rgb(196, 167, 231),    // Iris
            accent: ColorSpec::rgb(235, 111, 146),     // Love
            text: ColorSpec::rgb(224, 222, 244),       // Text
            text_muted: ColorSpec::rgb(110, 106, 134), // Muted
            success: ColorSpec::rgb(49, 116, 143),     // Pine
            warning: ColorSpec::rgb(246, 193, 119),    // Gold
            error: ColorSpec::rgb(235, 111, 146),      // Love
            border_active: ColorSpec::rgb(196, 167, 231),
            border_normal: ColorSpec::rgb(64, 61, 82),
            highlight_bg: ColorSpec::rgb(156, 207, 216), // Foam
            highlight_fg: ColorSpec::rgb(25, 23, 36),    // Base
        }
    }

    /// Rose Pine Dawn theme.
    ///
    pub fn rose_pine_dawn() -> Self {
        Theme {
            name: "rose-pine-dawn",
            primary: ColorSpec::rgb(144, 122, 169),
            accent: ColorSpec::rgb(180, 99, 122),
            text: ColorSpec::rgb(87, 82, 121),
            text_muted: ColorSpec::rgb(152, 147, 165),
            success: ColorSpec::rgb(40, 105, 131),
            warning: ColorSpec::rgb(234, 157, 52),
            error: ColorSpec::rgb(180, 99, 122),
            border_active: ColorSpec::rgb(144, 122, 169),
            border_normal: ColorSpec::rgb(206, 202, 205),
            highlight_bg: ColorSpec::rgb(86, 148, 159),
            highlight_fg: ColorSpec::rgb(250, 244, 237),
        }
    }

    /// Tokyo Night theme.
    ///
    pub fn tokyo_night() -> Self {
        Theme {
            name: "tokyo-night",
            primary: ColorSpec::rgb(122, 162, 247),
            accent: ColorSpec::rgb(187, 154, 247),
            text: ColorSpec::rgb(192, 202, 245),
            text_muted: ColorSpec::rgb(86, 95, 137),
            success: ColorSpec::rgb(158, 206, 106),
            warning: ColorSpec::rgb(224, 175, 104),
            error: ColorSpec::rgb(247, 118, 142),
            border_active: ColorSpec::rgb(122, 162, 247),
            border_normal: ColorSpec::rgb(59, 66, 97),
            highlight_bg: ColorSpec::rgb(125, 207, 255),
            highlight_fg: ColorSpec::rgb(26, 27, 38),
        }
    }

    /// Look a theme up by its configuration name.
    ///
    pub fn from_name(name: &str) -> Option<Self> {
        Theme::available()
            .into_iter()
            .find(|theme| theme.name == name)
    }

    pub fn available() -> Vec<Theme> {
        vec![Theme::rose_pine(), Theme::rose_pine_dawn(), Theme::tokyo_night()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_name() {
        assert_eq!(Theme::from_name("tokyo-night"), Some(Theme::tokyo_night()));
        assert_eq!(Theme::from_name("solarized"), None);
    }

    #[test]
    fn test_theme_names_are_unique() {
        let mut names: Vec<&str> = Theme::available().iter().map(|t| t.name).collect();
        names.sort();
        names.dedup();
        assert_eq!(names.len(), Theme::available().len());
    }
}

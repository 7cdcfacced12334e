use fullpage_core::UiConfig;
use ratatui::style::Color;
use tracing::warn;

/// Runtime theme with configurable colors
#[derive(Debug, Clone)]
pub struct Theme {
    /// Behind every panel; fading panels blend toward it
    pub page_bg: Color,
    pub fg: Color,
    pub dim: Color,
    pub accent: Color,
    pub status_bg: Color,
    pub status_fg: Color,
    /// Panel backgrounds, cycled by section index
    pub panel_bgs: Vec<Color>,
}

impl Default for Theme {
    fn default() -> Self {
        Self::dark()
    }
}

impl Theme {
    /// Gruvbox-flavoured dark palette
    pub fn dark() -> Self {
        Self {
            page_bg: Color::Rgb(0x1d, 0x20, 0x21),
            fg: Color::Rgb(0xd4, 0xbe, 0x98),
            dim: Color::Rgb(0x7c, 0x6f, 0x64),
            accent: Color::Rgb(0x89, 0xb4, 0x82),
            status_bg: Color::Rgb(0x45, 0x40, 0x3d),
            status_fg: Color::Rgb(0xdd, 0xc7, 0xa1),
            panel_bgs: vec![
                Color::Rgb(0x28, 0x28, 0x28),
                Color::Rgb(0x32, 0x30, 0x2f),
                Color::Rgb(0x2a, 0x32, 0x2e),
                Color::Rgb(0x30, 0x2b, 0x34),
            ],
        }
    }

    pub fn light() -> Self {
        Self {
            page_bg: Color::Rgb(0xf2, 0xe5, 0xbc),
            fg: Color::Rgb(0x3c, 0x38, 0x36),
            dim: Color::Rgb(0x92, 0x83, 0x74),
            accent: Color::Rgb(0x07, 0x66, 0x78),
            status_bg: Color::Rgb(0xd5, 0xc4, 0xa1),
            status_fg: Color::Rgb(0x28, 0x28, 0x28),
            panel_bgs: vec![
                Color::Rgb(0xfb, 0xf1, 0xc7),
                Color::Rgb(0xf9, 0xf5, 0xd7),
                Color::Rgb(0xeb, 0xf0, 0xd8),
                Color::Rgb(0xf4, 0xe8, 0xe8),
            ],
        }
    }

    pub fn panel_bg(&self, index: usize) -> Color {
        if self.panel_bgs.is_empty() {
            return self.page_bg;
        }
        self.panel_bgs[index % self.panel_bgs.len()]
    }
}

/// Parse a hex color string into a ratatui Color
/// Accepts formats: "#RRGGBB", "RRGGBB", "#RGB", "RGB"
pub fn parse_hex_color(hex: &str) -> Option<Color> {
    let hex = hex.trim().trim_start_matches('#');

    match hex.len() {
        // Short form: RGB -> RRGGBB
        3 => {
            let r = u8::from_str_radix(&hex[0..1], 16).ok()? * 17;
            let g = u8::from_str_radix(&hex[1..2], 16).ok()? * 17;
            let b = u8::from_str_radix(&hex[2..3], 16).ok()? * 17;
            Some(Color::Rgb(r, g, b))
        }
        6 => {
            let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
            let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
            let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
            Some(Color::Rgb(r, g, b))
        }
        _ => None,
    }
}

/// Load the theme named in the UI config, applying the accent override
pub fn load_theme(config: &UiConfig) -> Theme {
    let mut theme = match config.theme.to_lowercase().as_str() {
        "light" => Theme::light(),
        "dark" => Theme::dark(),
        other => {
            warn!("Unknown theme '{}', falling back to dark", other);
            Theme::dark()
        }
    };

    if let Some(accent) = config.accent.as_deref() {
        match parse_hex_color(accent) {
            Some(color) => theme.accent = color,
            None => warn!("Invalid accent color '{}', keeping theme default", accent),
        }
    }

    theme
}

/// Blend `color` over `base` with the given opacity (0.0 = base, 1.0 = color)
pub fn blend(color: Color, base: Color, opacity: f64) -> Color {
    let opacity = opacity.clamp(0.0, 1.0);
    match (color, base) {
        (Color::Rgb(r, g, b), Color::Rgb(br, bg, bb)) => {
            let mix = |c: u8, b: u8| -> u8 {
                (f64::from(b) + (f64::from(c) - f64::from(b)) * opacity).round() as u8
            };
            Color::Rgb(mix(r, br), mix(g, bg), mix(b, bb))
        }
        _ if opacity >= 0.5 => color,
        _ => base,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_hex_color() {
        assert_eq!(parse_hex_color("#ff0000"), Some(Color::Rgb(255, 0, 0)));
        assert_eq!(parse_hex_color("0f0"), Some(Color::Rgb(0, 255, 0)));
        assert_eq!(parse_hex_color("#12"), None);
        assert_eq!(parse_hex_color("zzzzzz"), None);
    }

    #[test]
    fn test_load_theme_with_accent() {
        let config = UiConfig {
            theme: "Light".to_string(),
            accent: Some("#010203".to_string()),
            ..Default::default()
        };
        let theme = load_theme(&config);
        assert_eq!(theme.accent, Color::Rgb(1, 2, 3));
        assert_eq!(theme.page_bg, Theme::light().page_bg);
    }

    #[test]
    fn test_blend() {
        let fg = Color::Rgb(200, 100, 0);
        let bg = Color::Rgb(0, 0, 0);
        assert_eq!(blend(fg, bg, 1.0), fg);
        assert_eq!(blend(fg, bg, 0.0), bg);
        assert_eq!(blend(fg, bg, 0.5), Color::Rgb(100, 50, 0));
        assert_eq!(blend(Color::Red, bg, 0.2), bg);
    }

    #[test]
    fn test_panel_bg_cycles() {
        let theme = Theme::dark();
        assert_eq!(theme.panel_bg(0), theme.panel_bg(theme.panel_bgs.len()));
    }
}

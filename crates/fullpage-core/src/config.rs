use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub page: PageConfig,
    #[serde(default)]
    pub nav: NavConfig,
    #[serde(default)]
    pub ui: UiConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Data directory path (log files live here while the viewer owns the terminal)
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
    /// Log level used when RUST_LOG is not set
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            log_level: default_log_level(),
        }
    }
}

/// Page options: which container to present and how transitions behave
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageConfig {
    /// Container selector inside the deck (`fp`, `.fp` and `#fp` are equivalent)
    #[serde(default = "default_container")]
    pub container: String,
    /// Duration of one section transition in seconds
    #[serde(default = "default_animation_duration")]
    pub animation_duration_secs: f64,
    /// Show the navigation dots on the right edge
    #[serde(default = "default_true")]
    pub show_navigation: bool,
    /// Section shown first
    #[serde(default)]
    pub start_index: usize,
    /// Easing of the slide-in motion
    #[serde(default)]
    pub easing: EasingType,
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            container: default_container(),
            animation_duration_secs: default_animation_duration(),
            show_navigation: default_true(),
            start_index: 0,
            easing: EasingType::default(),
        }
    }
}

/// Per-run overrides layered on top of the loaded `PageConfig`
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PageOverrides {
    pub container: Option<String>,
    pub animation_duration_secs: Option<f64>,
    pub show_navigation: Option<bool>,
    pub start_index: Option<usize>,
    pub easing: Option<EasingType>,
}

impl PageOverrides {
    /// Merge the overrides into `base`; fields left as `None` keep the base value
    pub fn apply(self, base: &PageConfig) -> PageConfig {
        PageConfig {
            container: self.container.unwrap_or_else(|| base.container.clone()),
            animation_duration_secs: self
                .animation_duration_secs
                .unwrap_or(base.animation_duration_secs),
            show_navigation: self.show_navigation.unwrap_or(base.show_navigation),
            start_index: self.start_index.unwrap_or(base.start_index),
            easing: self.easing.unwrap_or(base.easing),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NavConfig {
    /// Per-dot spacing used to center the dot column: top = height/2 - spacing * count
    #[serde(default = "default_dot_spacing")]
    pub dot_spacing: f64,
    /// Rows between the tops of two consecutive dots
    #[serde(default = "default_dot_pitch")]
    pub dot_pitch: u16,
    /// Width of the indicator column at the right edge, in cells
    #[serde(default = "default_box_width")]
    pub box_width: u16,
}

impl Default for NavConfig {
    fn default() -> Self {
        Self {
            dot_spacing: default_dot_spacing(),
            dot_pitch: default_dot_pitch(),
            box_width: default_box_width(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    /// Tick rate in milliseconds while nothing moves
    #[serde(default = "default_tick_rate")]
    pub tick_rate_ms: u64,
    /// Frame rate while a transition is running
    #[serde(default = "default_animation_fps")]
    pub animation_fps: u32,
    /// Show the `n/N` status line
    #[serde(default = "default_true")]
    pub show_status: bool,
    /// "dark" or "light"
    #[serde(default = "default_theme")]
    pub theme: String,
    /// Optional accent color override ("#RRGGBB" or "#RGB")
    #[serde(default)]
    pub accent: Option<String>,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            tick_rate_ms: default_tick_rate(),
            animation_fps: default_animation_fps(),
            show_status: default_true(),
            theme: default_theme(),
            accent: None,
        }
    }
}

/// Easing curve applied to animated panel properties
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EasingType {
    /// Jump to the end value when the duration elapses
    None,
    Linear,
    #[default]
    Cubic,
    Quintic,
    EaseOut,
}

impl FromStr for EasingType {
    type Err = crate::Error;

    fn from_str(s: &str) -> crate::Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "none" => Ok(Self::None),
            "linear" => Ok(Self::Linear),
            "cubic" => Ok(Self::Cubic),
            "quintic" => Ok(Self::Quintic),
            "ease-out" | "ease_out" | "easeout" => Ok(Self::EaseOut),
            other => Err(crate::Error::Configuration(format!(
                "unknown easing '{}' (expected none, linear, cubic, quintic, ease-out)",
                other
            ))),
        }
    }
}

impl fmt::Display for EasingType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::None => "none",
            Self::Linear => "linear",
            Self::Cubic => "cubic",
            Self::Quintic => "quintic",
            Self::EaseOut => "ease-out",
        };
        f.write_str(name)
    }
}

fn default_data_dir() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("fullpage")
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_container() -> String {
    "fp".to_string()
}

fn default_animation_duration() -> f64 {
    1.0
}

fn default_true() -> bool {
    true
}

fn default_dot_spacing() -> f64 {
    1.0
}

fn default_dot_pitch() -> u16 {
    2
}

fn default_box_width() -> u16 {
    3
}

fn default_tick_rate() -> u64 {
    100
}

fn default_animation_fps() -> u32 {
    60
}

fn default_theme() -> String {
    "dark".to_string()
}

/// Expand tilde (~) in path to user's home directory
fn expand_tilde(path: &std::path::Path) -> PathBuf {
    if let Some(path_str) = path.to_str() {
        if let Some(stripped) = path_str.strip_prefix("~/") {
            if let Some(home) = dirs::home_dir() {
                return home.join(stripped);
            }
        } else if path_str == "~" {
            if let Some(home) = dirs::home_dir() {
                return home;
            }
        }
    }
    path.to_path_buf()
}

impl AppConfig {
    /// Load configuration from file or return defaults
    pub fn load() -> crate::Result<Self> {
        let config_path = Self::config_path();

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            Self::from_toml(&content)
        } else {
            Ok(Self::default())
        }
    }

    pub fn from_toml(content: &str) -> crate::Result<Self> {
        toml::from_str(content).map_err(|e| crate::Error::ConfigFile(e.to_string()))
    }

    /// Save configuration to file
    pub fn save(&self) -> crate::Result<PathBuf> {
        let config_path = Self::config_path();

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content =
            toml::to_string_pretty(self).map_err(|e| crate::Error::ConfigFile(e.to_string()))?;
        std::fs::write(&config_path, content)?;

        Ok(config_path)
    }

    /// Get the configuration file path
    /// Always uses ~/.config/fullpage/config.toml on all platforms
    pub fn config_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".config")
            .join("fullpage")
            .join("config.toml")
    }

    /// Get the data directory (with tilde expansion)
    pub fn data_dir(&self) -> PathBuf {
        expand_tilde(&self.general.data_dir)
    }

    /// Log file used while the viewer owns the terminal
    pub fn log_path(&self) -> PathBuf {
        self.data_dir().join("fullpage.log")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.page.container, "fp");
        assert_eq!(config.page.animation_duration_secs, 1.0);
        assert!(config.page.show_navigation);
        assert_eq!(config.page.start_index, 0);
        assert_eq!(config.page.easing, EasingType::Cubic);
        assert_eq!(config.nav.dot_pitch, 2);
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = AppConfig::from_toml(
            r#"
            [page]
            animation_duration_secs = 0.5
            easing = "ease-out"

            [ui]
            theme = "light"
            "#,
        )
        .unwrap();
        assert_eq!(config.page.animation_duration_secs, 0.5);
        assert_eq!(config.page.easing, EasingType::EaseOut);
        assert_eq!(config.page.container, "fp");
        assert!(config.page.show_navigation);
        assert_eq!(config.ui.theme, "light");
        assert_eq!(config.ui.tick_rate_ms, 100);
    }

    #[test]
    fn test_invalid_toml_is_config_error() {
        let err = AppConfig::from_toml("[page]\nstart_index = \"two\"").unwrap_err();
        assert!(matches!(err, crate::Error::ConfigFile(_)));
    }

    #[test]
    fn test_overrides_merge() {
        let base = PageConfig::default();
        let merged = PageOverrides {
            animation_duration_secs: Some(2.0),
            show_navigation: Some(false),
            ..Default::default()
        }
        .apply(&base);
        assert_eq!(merged.animation_duration_secs, 2.0);
        assert!(!merged.show_navigation);
        assert_eq!(merged.container, base.container);
        assert_eq!(merged.start_index, base.start_index);
    }

    #[test]
    fn test_easing_from_str() {
        assert_eq!("Linear".parse::<EasingType>().unwrap(), EasingType::Linear);
        assert_eq!("ease_out".parse::<EasingType>().unwrap(), EasingType::EaseOut);
        assert!("bounce".parse::<EasingType>().is_err());
    }
}

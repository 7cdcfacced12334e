use std::time::Duration;

use serde::Serialize;

use crate::animation::timing::secs_to_duration;
use crate::config::{EasingType, NavConfig, PageConfig};
use crate::layout::Container;
use crate::metrics::Viewport;
use crate::nav::NavigationIndicator;
use crate::panel::PanelFrame;
use crate::{Error, Result};

/// Direction of a scroll intent
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Toward the next panel (wheel down)
    Forward,
    /// Toward the previous panel (wheel up)
    Backward,
}

impl Direction {
    /// Direction from the sign of a wheel delta; zero carries no direction
    pub fn from_delta(delta: i32) -> Option<Self> {
        match delta.signum() {
            1 => Some(Self::Forward),
            -1 => Some(Self::Backward),
            _ => None,
        }
    }
}

/// What the engine did with an intent
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum IntentOutcome {
    /// A transition started
    Accepted { from: usize, to: usize },
    /// Dropped: a transition is still in flight
    Locked,
    /// Dropped: already at the first/last panel
    AtBoundary,
    /// Dropped: no direction, or a jump to the current/nonexistent panel
    Ignored,
}

impl IntentOutcome {
    pub fn is_accepted(&self) -> bool {
        matches!(self, IntentOutcome::Accepted { .. })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum EngineState {
    Idle {
        index: usize,
    },
    Transitioning {
        from: usize,
        to: usize,
        direction: Direction,
    },
}

/// Notifications for the view owning the engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum EngineEvent {
    IndexChanged { from: usize, to: usize },
    Unlocked { index: usize },
    Resized { width: u16, height: u16 },
}

/// Settings fixed for the lifetime of one engine
#[derive(Debug, Clone, PartialEq)]
pub struct EngineConfig {
    pub duration: Duration,
    pub start_index: usize,
    pub easing: EasingType,
    /// `None` disables the navigation indicator
    pub navigation: Option<NavConfig>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            duration: Duration::from_secs(1),
            start_index: 0,
            easing: EasingType::default(),
            navigation: Some(NavConfig::default()),
        }
    }
}

impl EngineConfig {
    pub fn from_page(page: &PageConfig, nav: &NavConfig) -> Result<Self> {
        let duration = secs_to_duration(page.animation_duration_secs).ok_or_else(|| {
            Error::Configuration(format!(
                "animation duration must be a non-negative number of seconds, got {}",
                page.animation_duration_secs
            ))
        })?;
        Ok(Self {
            duration,
            start_index: page.start_index,
            easing: page.easing,
            navigation: page.show_navigation.then(|| nav.clone()),
        })
    }
}

/// Serializable view of the engine at one instant
#[derive(Debug, Clone, Serialize)]
pub struct EngineSnapshot {
    pub time_ms: u64,
    pub index: usize,
    pub locked: bool,
    pub state: EngineState,
    pub viewport: Viewport,
    pub container: Container,
    pub pending_timers: usize,
    pub panels: Vec<PanelFrame>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub navigation: Option<NavigationIndicator>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_direction_from_delta() {
        assert_eq!(Direction::from_delta(3), Some(Direction::Forward));
        assert_eq!(Direction::from_delta(-120), Some(Direction::Backward));
        assert_eq!(Direction::from_delta(0), None);
    }

    #[test]
    fn test_config_from_page() {
        let page = PageConfig {
            animation_duration_secs: 0.25,
            start_index: 2,
            show_navigation: false,
            ..Default::default()
        };
        let config = EngineConfig::from_page(&page, &NavConfig::default()).unwrap();
        assert_eq!(config.duration, Duration::from_millis(250));
        assert_eq!(config.start_index, 2);
        assert!(config.navigation.is_none());
    }

    #[test]
    fn test_config_rejects_negative_duration() {
        let page = PageConfig {
            animation_duration_secs: -1.0,
            ..Default::default()
        };
        let err = EngineConfig::from_page(&page, &NavConfig::default()).unwrap_err();
        assert!(matches!(err, Error::Configuration(_)));
    }
}

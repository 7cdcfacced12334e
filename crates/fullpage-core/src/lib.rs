//! Core of the fullpage section navigator
//!
//! The [`engine::TransitionEngine`] turns wheel input into one-panel-at-a-time
//! slide/fade transitions. Everything here is independent of the terminal: time
//! is passed in as a `Duration` on the session clock, and viewport sizes come
//! from a [`metrics::ViewportMetrics`] provider.

pub mod animation;
pub mod config;
pub mod deck;
pub mod engine;
pub mod error;
pub mod layout;
pub mod metrics;
pub mod nav;
pub mod panel;

pub use config::{AppConfig, EasingType, NavConfig, PageConfig, PageOverrides, UiConfig};
pub use deck::{Deck, Section, SectionGroup};
pub use engine::{
    Direction, EngineConfig, EngineEvent, EngineSnapshot, EngineState, IntentOutcome,
    TransitionEngine,
};
pub use error::{Error, Result};
pub use metrics::{FixedViewport, Viewport, ViewportMetrics};
pub use nav::{DotSize, NavDot, NavigationIndicator};
pub use panel::{PanelFrame, PanelSet, StackOrder};

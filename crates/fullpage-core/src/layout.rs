//! Full-bleed layout helpers
//!
//! Every panel is absolutely positioned over the same container, and the
//! container clips anything that moves outside the viewport.

use serde::Serialize;

use crate::metrics::Viewport;
use crate::panel::{Panel, PanelSet, TransitionSpec};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Positioning {
    Static,
    Absolute,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Overflow {
    Visible,
    Hidden,
}

/// The element holding every panel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Container {
    pub width: u16,
    pub height: u16,
    pub overflow: Overflow,
}

impl Container {
    /// Container stance for full-viewport presentation
    pub fn full_bleed(viewport: Viewport) -> Self {
        Self {
            width: viewport.width,
            height: viewport.height,
            overflow: Overflow::Hidden,
        }
    }
}

/// Take a panel out of normal flow and park it at the container origin
pub fn apply_full_bleed(panel: &mut Panel) {
    panel.set_positioning(Positioning::Absolute);
    panel.set_transition(TransitionSpec::None);
    panel.set_offset(0, std::time::Duration::ZERO);
}

/// Re-stamp container and panel sizes to the viewport
pub fn stamp_size(panels: &mut PanelSet, container: &mut Container, viewport: Viewport) {
    container.overflow = Overflow::Hidden;
    container.width = viewport.width;
    container.height = viewport.height;
    for panel in panels.iter_mut() {
        panel.set_size(viewport.width, viewport.height);
    }
}

//! Viewport measurement
//!
//! Sizes are in terminal cells.

use serde::Serialize;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

/// Source of the current viewport size
pub trait ViewportMetrics {
    fn viewport(&self) -> Viewport;
}

/// A viewport that never changes, for headless runs
#[derive(Debug, Clone, Copy)]
pub struct FixedViewport(pub Viewport);

impl ViewportMetrics for FixedViewport {
    fn viewport(&self) -> Viewport {
        self.0
    }
}

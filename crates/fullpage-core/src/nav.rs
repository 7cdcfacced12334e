//! Navigation indicator model
//!
//! A column of dots at the right edge, one per panel. The engine keeps the
//! active dot in sync with its current index and re-centers the column on
//! resize; the front end draws it and feeds hover and click positions back.

use serde::Serialize;

use crate::config::NavConfig;
use crate::metrics::Viewport;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DotSize {
    Default,
    Enlarged,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NavDot {
    pub index: usize,
    pub is_active: bool,
    pub hovered: bool,
    pub size: DotSize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NavigationIndicator {
    dots: Vec<NavDot>,
    dot_spacing: f64,
    dot_pitch: u16,
    box_width: u16,
    box_height: u16,
    viewport_width: u16,
    margin_top: u16,
}

impl NavigationIndicator {
    pub fn new(panel_count: usize, active: usize, config: &NavConfig, viewport: Viewport) -> Self {
        let dots = (0..panel_count)
            .map(|index| NavDot {
                index,
                is_active: index == active,
                hovered: false,
                size: if index == active {
                    DotSize::Enlarged
                } else {
                    DotSize::Default
                },
            })
            .collect();
        let mut indicator = Self {
            dots,
            dot_spacing: config.dot_spacing,
            dot_pitch: config.dot_pitch.max(1),
            box_width: config.box_width.max(1),
            box_height: 0,
            viewport_width: 0,
            margin_top: 0,
        };
        indicator.recenter(viewport);
        indicator
    }

    pub fn dots(&self) -> &[NavDot] {
        &self.dots
    }

    pub fn active(&self) -> Option<usize> {
        self.dots.iter().position(|dot| dot.is_active)
    }

    pub fn box_width(&self) -> u16 {
        self.box_width
    }

    pub fn box_height(&self) -> u16 {
        self.box_height
    }

    /// Rows between the top of the box and the first dot
    pub fn margin_top(&self) -> u16 {
        self.margin_top
    }

    /// Row of a dot, relative to the viewport top
    pub fn dot_row(&self, index: usize) -> u16 {
        let step = u16::try_from(index).unwrap_or(u16::MAX).saturating_mul(self.dot_pitch);
        self.margin_top.saturating_add(step)
    }

    /// First column of the indicator box
    pub fn box_left(&self) -> u16 {
        self.viewport_width.saturating_sub(self.box_width)
    }

    /// Mark exactly one dot as active
    pub fn set_active(&mut self, index: usize) {
        for dot in &mut self.dots {
            let was_active = dot.is_active;
            dot.is_active = dot.index == index;
            if dot.is_active {
                dot.size = DotSize::Enlarged;
            } else if was_active && !dot.hovered {
                dot.size = DotSize::Default;
            }
        }
    }

    /// Recompute box height and the vertical centering margin
    pub fn recenter(&mut self, viewport: Viewport) {
        self.box_height = viewport.height;
        self.viewport_width = viewport.width;
        let margin = f64::from(viewport.height) / 2.0 - self.dot_spacing * self.dots.len() as f64;
        self.margin_top = margin.max(0.0).floor().min(f64::from(u16::MAX)) as u16;
    }

    pub fn hover_enter(&mut self, index: usize) {
        if let Some(dot) = self.dots.get_mut(index) {
            dot.hovered = true;
            dot.size = DotSize::Enlarged;
        }
    }

    /// Restore the default size unless the dot is the active one
    pub fn hover_leave(&mut self, index: usize) {
        if let Some(dot) = self.dots.get_mut(index) {
            dot.hovered = false;
            if !dot.is_active {
                dot.size = DotSize::Default;
            }
        }
    }

    /// Move the hover to whatever dot sits under the pointer (if any)
    pub fn hover_at(&mut self, column: u16, row: u16) {
        let target = self.dot_at(column, row);
        let previous: Vec<usize> = self
            .dots
            .iter()
            .filter(|dot| dot.hovered && Some(dot.index) != target)
            .map(|dot| dot.index)
            .collect();
        for index in previous {
            self.hover_leave(index);
        }
        if let Some(index) = target {
            self.hover_enter(index);
        }
    }

    /// Dot under a pointer position, if any
    pub fn dot_at(&self, column: u16, row: u16) -> Option<usize> {
        if column < self.box_left() || column >= self.viewport_width {
            return None;
        }
        let rel = row.checked_sub(self.margin_top)?;
        if rel % self.dot_pitch != 0 {
            return None;
        }
        let index = usize::from(rel / self.dot_pitch);
        (index < self.dots.len()).then_some(index)
    }
}

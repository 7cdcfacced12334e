//! Panels and the ordered panel set the engine positions
//!
//! Panels carry only visual state. Their content lives in the deck and is
//! matched to panels by index.

use std::time::Duration;

use serde::Serialize;

use crate::animation::{AnimatedValue, Motion};
use crate::config::EasingType;
use crate::layout::Positioning;

/// Front/back ordering; at most the current panel is `Front` while idle
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StackOrder {
    Back,
    Front,
}

/// Which properties animate when assigned, and how
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionSpec {
    /// Every assignment applies instantly
    None,
    /// Only opacity animates (linear)
    Opacity { duration: Duration },
    /// Opacity and offset animate
    All { duration: Duration, easing: EasingType },
}

impl TransitionSpec {
    fn opacity_motion(&self) -> Option<Motion> {
        match *self {
            TransitionSpec::None => None,
            TransitionSpec::Opacity { duration } => Some(Motion::new(duration, EasingType::Linear)),
            TransitionSpec::All { duration, easing } => Some(Motion::new(duration, easing)),
        }
    }

    fn offset_motion(&self) -> Option<Motion> {
        match *self {
            TransitionSpec::All { duration, easing } => Some(Motion::new(duration, easing)),
            _ => None,
        }
    }
}

/// On-screen state of a panel at one instant
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PanelFrame {
    pub index: usize,
    pub stack_order: StackOrder,
    /// 0.0 = transparent, 1.0 = opaque
    pub opacity: f64,
    /// Rows below (positive) or above (negative) the resting position
    pub offset: i32,
    pub width: u16,
    pub height: u16,
}

impl PanelFrame {
    pub fn is_visible(&self) -> bool {
        self.opacity > 0.0 && self.offset.unsigned_abs() < u32::from(self.height.max(1))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Panel {
    stack_order: StackOrder,
    opacity: AnimatedValue,
    offset: AnimatedValue,
    transition: TransitionSpec,
    positioning: Positioning,
    width: u16,
    height: u16,
}

impl Default for Panel {
    fn default() -> Self {
        Self::new()
    }
}

impl Panel {
    /// A hidden panel in normal flow, not yet sized
    pub fn new() -> Self {
        Self {
            stack_order: StackOrder::Back,
            opacity: AnimatedValue::resting(0.0),
            offset: AnimatedValue::resting(0.0),
            transition: TransitionSpec::None,
            positioning: Positioning::Static,
            width: 0,
            height: 0,
        }
    }

    pub fn stack_order(&self) -> StackOrder {
        self.stack_order
    }

    pub fn transition(&self) -> TransitionSpec {
        self.transition
    }

    pub fn positioning(&self) -> Positioning {
        self.positioning
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    /// Opacity the panel rests at once motion ends
    pub fn opacity_target(&self) -> f64 {
        self.opacity.target()
    }

    /// Offset the panel rests at once motion ends
    pub fn offset_target(&self) -> i32 {
        self.offset.target().round() as i32
    }

    /// Change the transition spec
    ///
    /// Running motions on properties the new spec no longer animates are
    /// cancelled and land on their targets.
    pub fn set_transition(&mut self, spec: TransitionSpec) {
        self.transition = spec;
        if spec.opacity_motion().is_none() {
            self.opacity.settle();
        }
        if spec.offset_motion().is_none() {
            self.offset.settle();
        }
    }

    pub fn set_stack_order(&mut self, order: StackOrder) {
        self.stack_order = order;
    }

    pub fn set_opacity(&mut self, opacity: f64, now: Duration) {
        let motion = self.transition.opacity_motion();
        self.opacity.set(opacity.clamp(0.0, 1.0), now, motion);
    }

    pub fn set_offset(&mut self, offset: i32, now: Duration) {
        let motion = self.transition.offset_motion();
        self.offset.set(f64::from(offset), now, motion);
    }

    pub(crate) fn set_positioning(&mut self, positioning: Positioning) {
        self.positioning = positioning;
    }

    pub(crate) fn set_size(&mut self, width: u16, height: u16) {
        self.width = width;
        self.height = height;
    }

    pub fn is_animating(&self, now: Duration) -> bool {
        self.opacity.is_moving(now) || self.offset.is_moving(now)
    }

    /// Sample the on-screen state at `now`
    pub fn sample(&self, index: usize, now: Duration) -> PanelFrame {
        PanelFrame {
            index,
            stack_order: self.stack_order,
            opacity: self.opacity.sample(now),
            offset: self.offset.sample(now).round() as i32,
            width: self.width,
            height: self.height,
        }
    }
}

/// Ordered, fixed-size panel sequence
#[derive(Debug, Clone, PartialEq)]
pub struct PanelSet {
    panels: Vec<Panel>,
}

impl PanelSet {
    /// One fresh panel per section
    pub fn with_len(len: usize) -> Self {
        Self {
            panels: (0..len).map(|_| Panel::new()).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.panels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.panels.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Panel> {
        self.panels.get(index)
    }

    pub(crate) fn get_mut(&mut self, index: usize) -> Option<&mut Panel> {
        self.panels.get_mut(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Panel> {
        self.panels.iter()
    }

    pub(crate) fn iter_mut(&mut self) -> impl Iterator<Item = &mut Panel> {
        self.panels.iter_mut()
    }

    /// Panel frames at `now`, ordered back to front for painting
    pub fn paint_order(&self, now: Duration) -> Vec<PanelFrame> {
        let mut frames: Vec<PanelFrame> = self
            .panels
            .iter()
            .enumerate()
            .map(|(index, panel)| panel.sample(index, now))
            .collect();
        // stable sort keeps document order within the same stack level
        frames.sort_by_key(|frame| frame.stack_order);
        frames
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_panel_is_hidden() {
        let panel = Panel::new();
        assert_eq!(panel.stack_order(), StackOrder::Back);
        assert_eq!(panel.opacity_target(), 0.0);
        assert_eq!(panel.offset_target(), 0);
        assert_eq!(panel.transition(), TransitionSpec::None);
    }

    #[test]
    fn test_opacity_transition_leaves_offset_instant() {
        let mut panel = Panel::new();
        panel.set_opacity(1.0, Duration::ZERO);
        panel.set_offset(10, Duration::ZERO);
        panel.set_transition(TransitionSpec::Opacity {
            duration: Duration::from_secs(1),
        });
        panel.set_opacity(0.0, Duration::ZERO);
        panel.set_offset(0, Duration::ZERO);

        let frame = panel.sample(0, Duration::from_millis(500));
        assert!((frame.opacity - 0.5).abs() < 1e-9);
        assert_eq!(frame.offset, 0);
    }

    #[test]
    fn test_clearing_transition_snaps_running_motion() {
        let mut panel = Panel::new();
        panel.set_transition(TransitionSpec::All {
            duration: Duration::from_secs(1),
            easing: EasingType::Linear,
        });
        panel.set_offset(20, Duration::ZERO);
        assert!(panel.is_animating(Duration::from_millis(100)));

        panel.set_transition(TransitionSpec::None);
        assert!(!panel.is_animating(Duration::from_millis(100)));
        assert_eq!(panel.sample(0, Duration::from_millis(100)).offset, 20);
    }

    #[test]
    fn test_paint_order_puts_front_last() {
        let mut set = PanelSet::with_len(3);
        if let Some(panel) = set.get_mut(1) {
            panel.set_stack_order(StackOrder::Front);
        }
        let order: Vec<usize> = set
            .paint_order(Duration::ZERO)
            .iter()
            .map(|f| f.index)
            .collect();
        assert_eq!(order, vec![0, 2, 1]);
    }
}

//! Scroll transition engine
//!
//! The engine owns the current index, the transition lock and every panel's
//! positioning and visibility. An accepted intent:
//!
//! 1. locks the engine and moves `current_index` by one,
//! 2. fades the outgoing panel out underneath,
//! 3. promotes the incoming panel and parks it one viewport away,
//! 4. one tick later slides the incoming panel back to offset 0,
//! 5. unlocks after exactly the configured duration.
//!
//! Steps 4 and 5 are one-shot timers fired from [`TransitionEngine::advance`],
//! which every intent also runs before checking the lock.
//! Intents arriving while locked are dropped, never queued.

mod state;
mod timers;

use std::time::Duration;

use tracing::{debug, trace};

pub use state::{
    Direction, EngineConfig, EngineEvent, EngineSnapshot, EngineState, IntentOutcome,
};
pub use timers::{TimerId, TimerQueue};

use crate::config::EasingType;
use crate::layout::{self, Container};
use crate::metrics::{Viewport, ViewportMetrics};
use crate::nav::NavigationIndicator;
use crate::panel::{PanelFrame, PanelSet, StackOrder, TransitionSpec};
use crate::{Error, Result};

/// Delay between parking the incoming panel and starting its slide
pub const SLIDE_TICK: Duration = Duration::from_millis(1);

/// `now + delay`, saturating at the end of the clock
fn deadline(now: Duration, delay: Duration) -> Duration {
    now.checked_add(delay).unwrap_or(Duration::MAX)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Deferred {
    SlideIn { panel: usize },
    Unlock { panel: usize },
}

#[derive(Debug)]
pub struct TransitionEngine {
    panels: PanelSet,
    container: Container,
    viewport: Viewport,
    current: usize,
    locked: bool,
    duration: Duration,
    easing: EasingType,
    active: Option<(usize, usize, Direction)>,
    timers: TimerQueue<Deferred>,
    nav: Option<NavigationIndicator>,
    events: Vec<EngineEvent>,
}

impl TransitionEngine {
    /// Lay out the panels and show the start panel
    pub fn initialize(
        mut panels: PanelSet,
        config: EngineConfig,
        metrics: &impl ViewportMetrics,
    ) -> Result<Self> {
        if panels.is_empty() {
            return Err(Error::Configuration("no sections to present".to_string()));
        }
        if config.start_index >= panels.len() {
            return Err(Error::Configuration(format!(
                "start index {} is out of range for {} sections",
                config.start_index,
                panels.len()
            )));
        }

        let viewport = metrics.viewport();
        let start = config.start_index;
        let mut container = Container::full_bleed(viewport);

        for (index, panel) in panels.iter_mut().enumerate() {
            layout::apply_full_bleed(panel);
            if index == start {
                panel.set_stack_order(StackOrder::Front);
                panel.set_opacity(1.0, Duration::ZERO);
            } else {
                panel.set_stack_order(StackOrder::Back);
                panel.set_opacity(0.0, Duration::ZERO);
            }
        }
        layout::stamp_size(&mut panels, &mut container, viewport);

        let nav = config
            .navigation
            .as_ref()
            .map(|nav| NavigationIndicator::new(panels.len(), start, nav, viewport));

        debug!(
            sections = panels.len(),
            start,
            duration_ms = config.duration.as_millis() as u64,
            width = viewport.width,
            height = viewport.height,
            "transition engine initialized"
        );

        Ok(Self {
            panels,
            container,
            viewport,
            current: start,
            locked: false,
            duration: config.duration,
            easing: config.easing,
            active: None,
            timers: TimerQueue::new(),
            nav,
            events: Vec::new(),
        })
    }

    /// Target index; during a transition this is already the incoming panel
    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn is_locked(&self) -> bool {
        self.locked
    }

    pub fn state(&self) -> EngineState {
        match self.active {
            Some((from, to, direction)) => EngineState::Transitioning {
                from,
                to,
                direction,
            },
            None => EngineState::Idle {
                index: self.current,
            },
        }
    }

    pub fn len(&self) -> usize {
        self.panels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.panels.is_empty()
    }

    pub fn panels(&self) -> &PanelSet {
        &self.panels
    }

    pub fn container(&self) -> Container {
        self.container
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn duration(&self) -> Duration {
        self.duration
    }

    pub fn navigation(&self) -> Option<&NavigationIndicator> {
        self.nav.as_ref()
    }

    /// Mutable access for hover handling; the active dot is still driven by the engine
    pub fn navigation_mut(&mut self) -> Option<&mut NavigationIndicator> {
        self.nav.as_mut()
    }

    pub fn pending_timers(&self) -> usize {
        self.timers.len()
    }

    pub fn next_deadline(&self) -> Option<Duration> {
        self.timers.next_deadline()
    }

    /// Whether the view should keep drawing at animation frame rate
    pub fn needs_frame(&self, now: Duration) -> bool {
        !self.timers.is_empty() || self.panels.iter().any(|panel| panel.is_animating(now))
    }

    /// Panel frames at `now`, back to front
    pub fn frames(&self, now: Duration) -> Vec<PanelFrame> {
        self.panels.paint_order(now)
    }

    /// Take the notifications produced since the last call
    pub fn drain_events(&mut self) -> Vec<EngineEvent> {
        std::mem::take(&mut self.events)
    }

    /// Handle one wheel tick; only the sign of `delta` matters
    pub fn handle_wheel(&mut self, delta: i32, now: Duration) -> IntentOutcome {
        match Direction::from_delta(delta) {
            Some(direction) => self.handle_scroll_intent(direction, now),
            None => IntentOutcome::Ignored,
        }
    }

    /// Timers already due at `now` fire first, so an intent landing on the
    /// unlock deadline is accepted even if no frame ran in between.
    pub fn handle_scroll_intent(&mut self, direction: Direction, now: Duration) -> IntentOutcome {
        self.advance(now);
        if self.locked {
            trace!(?direction, index = self.current, "intent dropped, transition in flight");
            return IntentOutcome::Locked;
        }

        let next = match direction {
            Direction::Forward if self.current + 1 < self.panels.len() => self.current + 1,
            Direction::Backward if self.current > 0 => self.current - 1,
            _ => {
                trace!(?direction, index = self.current, "intent dropped at boundary");
                return IntentOutcome::AtBoundary;
            }
        };

        self.begin_transition(next, direction, now)
    }

    /// Jump straight to a panel, e.g. from a navigation dot click
    pub fn jump_to(&mut self, index: usize, now: Duration) -> IntentOutcome {
        self.advance(now);
        if self.locked {
            trace!(target_index = index, "jump dropped, transition in flight");
            return IntentOutcome::Locked;
        }
        if index >= self.panels.len() || index == self.current {
            return IntentOutcome::Ignored;
        }
        let direction = if index > self.current {
            Direction::Forward
        } else {
            Direction::Backward
        };
        self.begin_transition(index, direction, now)
    }

    fn begin_transition(&mut self, next: usize, direction: Direction, now: Duration) -> IntentOutcome {
        let from = self.current;
        self.locked = true;

        if let Some(outgoing) = self.panels.get_mut(from) {
            outgoing.set_transition(TransitionSpec::Opacity {
                duration: self.duration,
            });
            outgoing.set_stack_order(StackOrder::Back);
            outgoing.set_opacity(0.0, now);
            outgoing.set_offset(0, now);
        }

        let height = i32::from(self.viewport.height);
        if let Some(incoming) = self.panels.get_mut(next) {
            incoming.set_transition(TransitionSpec::None);
            incoming.set_stack_order(StackOrder::Front);
            incoming.set_opacity(1.0, now);
            incoming.set_offset(
                match direction {
                    Direction::Forward => height,
                    Direction::Backward => -height,
                },
                now,
            );
        }

        self.current = next;
        self.active = Some((from, next, direction));
        self.timers
            .schedule(deadline(now, SLIDE_TICK), Deferred::SlideIn { panel: next });
        self.timers.schedule(
            deadline(now, self.duration.max(SLIDE_TICK)),
            Deferred::Unlock { panel: next },
        );

        if let Some(nav) = self.nav.as_mut() {
            nav.set_active(next);
        }
        self.events.push(EngineEvent::IndexChanged { from, to: next });

        debug!(from, to = next, ?direction, "transition started");
        IntentOutcome::Accepted { from, to: next }
    }

    /// Fire every timer due at or before `now`; returns how many fired
    pub fn advance(&mut self, now: Duration) -> usize {
        let mut fired = 0;
        while let Some((deadline, task)) = self.timers.pop_due(now) {
            fired += 1;
            match task {
                Deferred::SlideIn { panel } => {
                    let spec = TransitionSpec::All {
                        duration: self.duration,
                        easing: self.easing,
                    };
                    if let Some(incoming) = self.panels.get_mut(panel) {
                        incoming.set_transition(spec);
                        incoming.set_offset(0, deadline);
                    }
                }
                Deferred::Unlock { panel } => {
                    if let Some(incoming) = self.panels.get_mut(panel) {
                        incoming.set_transition(TransitionSpec::None);
                    }
                    self.locked = false;
                    self.active = None;
                    self.events.push(EngineEvent::Unlocked {
                        index: self.current,
                    });
                    trace!(index = self.current, "transition finished");
                }
            }
        }
        fired
    }

    /// Re-stamp sizes for a new viewport; never touches the index or the lock
    pub fn handle_resize(&mut self, width: u16, height: u16) {
        let viewport = Viewport::new(width, height);
        layout::stamp_size(&mut self.panels, &mut self.container, viewport);
        if let Some(nav) = self.nav.as_mut() {
            nav.recenter(viewport);
        }
        if viewport != self.viewport {
            debug!(width, height, "viewport resized");
            self.viewport = viewport;
            self.events.push(EngineEvent::Resized { width, height });
        }
    }

    /// Re-measure through a metrics provider
    pub fn refresh_viewport(&mut self, metrics: &impl ViewportMetrics) {
        let viewport = metrics.viewport();
        self.handle_resize(viewport.width, viewport.height);
    }

    /// Cancel every pending timer as a unit when the view goes away
    ///
    /// A transition cut short this way leaves the engine locked.
    pub fn teardown(&mut self) -> usize {
        let dropped = self.timers.cancel_all();
        if dropped > 0 {
            debug!(dropped, "pending transition timers cancelled");
        }
        dropped
    }

    pub fn snapshot(&self, now: Duration) -> EngineSnapshot {
        EngineSnapshot {
            time_ms: now.as_millis() as u64,
            index: self.current,
            locked: self.locked,
            state: self.state(),
            viewport: self.viewport,
            container: self.container,
            pending_timers: self.timers.len(),
            panels: self
                .panels
                .iter()
                .enumerate()
                .map(|(index, panel)| panel.sample(index, now))
                .collect(),
            navigation: self.nav.clone(),
        }
    }
}

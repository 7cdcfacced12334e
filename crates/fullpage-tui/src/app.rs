use std::time::{Duration, Instant};

use fullpage_core::{
    EngineConfig, EngineEvent, IntentOutcome, PanelSet, Section, TransitionEngine, ViewportMetrics,
};
use tracing::{debug, info};

use crate::input::Action;
use crate::metrics::TerminalMetrics;
use crate::theme::Theme;

/// Application state
pub struct App {
    /// Owns the current index and every panel's visual state
    pub engine: TransitionEngine,
    /// Section content, index-aligned with the engine's panels
    pub sections: Vec<Section>,
    pub theme: Theme,
    /// Container name shown in the status bar
    pub title: String,
    pub show_status: bool,
    pub should_quit: bool,
    metrics: TerminalMetrics,
    started: Instant,
}

impl App {
    pub fn new(
        title: impl Into<String>,
        sections: Vec<Section>,
        config: EngineConfig,
        show_status: bool,
        theme: Theme,
        metrics: &impl ViewportMetrics,
    ) -> fullpage_core::Result<Self> {
        let engine = TransitionEngine::initialize(PanelSet::with_len(sections.len()), config, metrics)?;
        Ok(Self {
            engine,
            sections,
            theme,
            title: title.into(),
            show_status,
            should_quit: false,
            metrics: TerminalMetrics::new(u16::from(show_status)),
            started: Instant::now(),
        })
    }

    /// Time on the session clock
    pub fn elapsed(&self) -> Duration {
        self.started.elapsed()
    }

    pub fn current_section(&self) -> Option<&Section> {
        self.sections.get(self.engine.current_index())
    }

    pub fn handle_action(&mut self, action: Action, now: Duration) {
        match action {
            Action::Quit => self.should_quit = true,
            Action::Wheel(delta) => {
                self.engine.handle_wheel(delta, now);
            }
            Action::Click { column, row } => {
                let target = self
                    .engine
                    .navigation()
                    .and_then(|nav| nav.dot_at(column, row));
                if let Some(index) = target {
                    if let IntentOutcome::Accepted { from, to } = self.engine.jump_to(index, now) {
                        debug!(from, to, "jumped from navigation dot");
                    }
                }
            }
            Action::Hover { column, row } => {
                if let Some(nav) = self.engine.navigation_mut() {
                    nav.hover_at(column, row);
                }
            }
            Action::None => {}
        }
    }

    /// Terminal resized to `width` x `height` cells
    pub fn handle_resize(&mut self, width: u16, height: u16) {
        let viewport = self.metrics.panel_viewport(width, height);
        self.engine.handle_resize(viewport.width, viewport.height);
    }

    /// Fire due timers and log what the engine reported
    pub fn tick(&mut self, now: Duration) {
        self.engine.advance(now);
        for event in self.engine.drain_events() {
            match event {
                EngineEvent::IndexChanged { from, to } => {
                    let title = self
                        .sections
                        .get(to)
                        .and_then(|s| s.title.as_deref())
                        .unwrap_or("(untitled)");
                    info!(from, to, title, "section changed");
                }
                EngineEvent::Unlocked { index } => debug!(index, "ready for input"),
                EngineEvent::Resized { width, height } => debug!(width, height, "panels resized"),
            }
        }
    }

    /// Whether the next frame should come at animation rate
    pub fn needs_fast_update(&self, now: Duration) -> bool {
        self.engine.needs_frame(now)
    }

    /// Cancel pending transition timers before the view closes
    pub fn shutdown(&mut self) {
        self.engine.teardown();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fullpage_core::{FixedViewport, NavConfig, Viewport};

    fn sections(count: usize) -> Vec<Section> {
        (0..count)
            .map(|i| Section {
                title: Some(format!("Section {}", i + 1)),
                body: String::new(),
            })
            .collect()
    }

    fn app(count: usize) -> App {
        App::new(
            "fp",
            sections(count),
            EngineConfig {
                navigation: Some(NavConfig::default()),
                ..Default::default()
            },
            true,
            Theme::dark(),
            &FixedViewport(Viewport::new(80, 23)),
        )
        .unwrap()
    }

    #[test]
    fn test_empty_deck_is_rejected() {
        let result = App::new(
            "fp",
            Vec::new(),
            EngineConfig::default(),
            true,
            Theme::dark(),
            &FixedViewport(Viewport::new(80, 23)),
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_wheel_moves_one_section() {
        let mut app = app(3);
        app.handle_action(Action::Wheel(1), Duration::ZERO);
        app.handle_action(Action::Wheel(1), Duration::from_millis(10));
        assert_eq!(app.engine.current_index(), 1);
        assert_eq!(app.current_section().and_then(|s| s.title.as_deref()), Some("Section 2"));

        app.tick(Duration::from_secs(1));
        assert!(!app.engine.is_locked());
        app.handle_action(Action::Wheel(-1), Duration::from_secs(1));
        assert_eq!(app.engine.current_index(), 0);
    }

    #[test]
    fn test_wheel_between_frames_after_deadline_is_accepted() {
        let mut app = app(3);
        app.handle_action(Action::Wheel(1), Duration::ZERO);
        app.tick(Duration::from_millis(990));
        assert!(app.engine.is_locked());

        app.handle_action(Action::Wheel(1), Duration::from_millis(1005));
        assert_eq!(app.engine.current_index(), 2);
        assert!(app.engine.is_locked());
    }

    #[test]
    fn test_click_on_dot_jumps() {
        let mut app = app(4);
        let (column, row) = {
            let nav = app.engine.navigation().unwrap();
            (nav.box_left() + 1, nav.dot_row(3))
        };
        app.handle_action(Action::Click { column, row }, Duration::ZERO);
        assert_eq!(app.engine.current_index(), 3);
    }

    #[test]
    fn test_click_outside_dots_is_ignored() {
        let mut app = app(4);
        app.handle_action(Action::Click { column: 0, row: 0 }, Duration::ZERO);
        assert_eq!(app.engine.current_index(), 0);
        assert!(!app.engine.is_locked());
    }

    #[test]
    fn test_resize_reserves_status_row() {
        let mut app = app(2);
        app.handle_resize(100, 40);
        assert_eq!(app.engine.viewport(), Viewport::new(100, 39));
    }

    #[test]
    fn test_quit() {
        let mut app = app(1);
        app.handle_action(Action::Quit, Duration::ZERO);
        assert!(app.should_quit);
    }
}

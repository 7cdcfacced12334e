use std::io;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen, SetTitle},
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    layout::{Constraint, Direction, Layout},
    style::Style,
    widgets::Block,
    Frame, Terminal,
};
use tracing::info;

use fullpage_core::{AppConfig, Deck, EngineConfig, PageConfig};
use fullpage_tui::{
    app::App,
    event::{AppEvent, EventHandler},
    input::{handle_key_event, handle_mouse_event},
    load_theme,
    metrics::TerminalMetrics,
    widgets::{NavDotsWidget, PanelWidget, StatusBarWidget},
};

pub async fn run(config: Arc<AppConfig>, deck_path: PathBuf, page: PageConfig) -> Result<()> {
    let deck = Deck::load(&deck_path)
        .await
        .with_context(|| format!("Failed to read deck {}", deck_path.display()))?;
    let group = deck.container(&page.container)?;

    // Build the app before touching the terminal so configuration errors print normally
    let engine_config = EngineConfig::from_page(&page, &config.nav)?;
    let metrics = TerminalMetrics::new(u16::from(config.ui.show_status));
    let mut app = App::new(
        group.name.clone(),
        group.sections.clone(),
        engine_config,
        config.ui.show_status,
        load_theme(&config.ui),
        &metrics,
    )?;

    info!(
        deck = %deck_path.display(),
        container = %group.name,
        sections = group.sections.len(),
        "presenting deck"
    );

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture, SetTitle("fullpage"))?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let event_handler =
        EventHandler::with_animation_fps(config.ui.tick_rate_ms, config.ui.animation_fps);

    let result = run_loop(&mut terminal, &mut app, &event_handler);

    app.shutdown();

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    result
}

fn run_loop<B: Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    event_handler: &EventHandler,
) -> Result<()> {
    // Checked at the END of each iteration to pick the NEXT iteration's tick rate
    let mut needs_fast_update = false;

    loop {
        let now = app.elapsed();
        app.tick(now);

        terminal.draw(|frame| draw(frame, app, now))?;

        let event = if needs_fast_update {
            event_handler.next_animation()?
        } else {
            event_handler.next()?
        };
        if let Some(event) = event {
            let now = app.elapsed();
            match event {
                AppEvent::Key(key) => app.handle_action(handle_key_event(key), now),
                AppEvent::Mouse(mouse) => app.handle_action(handle_mouse_event(mouse), now),
                AppEvent::Resize(width, height) => app.handle_resize(width, height),
                AppEvent::Tick => {}
            }
        }

        needs_fast_update = app.needs_fast_update(app.elapsed());

        if app.should_quit {
            break;
        }
    }

    Ok(())
}

/// Paint panels back to front, then the dots and the status line
fn draw(frame: &mut Frame, app: &App, now: Duration) {
    let size = frame.area();

    let (panel_area, status_area) = if app.show_status && size.height > 1 {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(1), Constraint::Length(1)])
            .split(size);
        (chunks[0], Some(chunks[1]))
    } else {
        (size, None)
    };

    frame.render_widget(
        Block::default().style(Style::default().bg(app.theme.page_bg)),
        panel_area,
    );

    for panel in app.engine.frames(now) {
        if let Some(section) = app.sections.get(panel.index) {
            PanelWidget::render(frame, panel_area, section, &panel, &app.theme);
        }
    }

    if let Some(nav) = app.engine.navigation() {
        NavDotsWidget::render(frame, panel_area, nav, &app.theme);
    }

    if let Some(area) = status_area {
        StatusBarWidget::render(frame, area, app);
    }
}

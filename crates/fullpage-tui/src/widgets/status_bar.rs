use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::app::App;

pub struct StatusBarWidget;

impl StatusBarWidget {
    pub fn render(frame: &mut Frame, area: Rect, app: &App) {
        let theme = &app.theme;
        let index = app.engine.current_index();
        let title = app
            .current_section()
            .and_then(|s| s.title.as_deref())
            .unwrap_or("");

        let status_text = format!(" {} | {}/{} {}", app.title, index + 1, app.engine.len(), title);
        let help_hint = " wheel:navigate click:jump q:quit ";
        let padding_len = area
            .width
            .saturating_sub(status_text.chars().count() as u16 + help_hint.len() as u16)
            as usize;

        let line = Line::from(vec![
            Span::styled(
                status_text,
                Style::default().fg(theme.status_fg).bg(theme.status_bg),
            ),
            Span::styled(" ".repeat(padding_len), Style::default().bg(theme.status_bg)),
            Span::styled(
                help_hint,
                Style::default().fg(theme.dim).bg(theme.status_bg),
            ),
        ]);

        frame.render_widget(Paragraph::new(line), area);
    }
}

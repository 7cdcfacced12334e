use fullpage_core::{PanelFrame, Section};
use ratatui::{
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Clear, Paragraph},
    Frame,
};
use unicode_width::UnicodeWidthStr;

use crate::theme::{blend, Theme};

/// Horizontal padding on each side of the panel text
const SIDE_PADDING: u16 = 4;

pub struct PanelWidget;

impl PanelWidget {
    /// Draw one panel at its sampled offset and opacity, clipped to `area`
    pub fn render(
        frame: &mut Frame,
        area: Rect,
        section: &Section,
        panel: &PanelFrame,
        theme: &Theme,
    ) {
        if !panel.is_visible() {
            return;
        }
        let Some((visible, skip)) = visible_slice(area, panel.offset) else {
            return;
        };

        let bg = blend(theme.panel_bg(panel.index), theme.page_bg, panel.opacity);
        let fg = blend(theme.fg, theme.page_bg, panel.opacity);
        let title_fg = blend(theme.accent, theme.page_bg, panel.opacity);

        let lines = layout_lines(
            section,
            area.width,
            area.height,
            Style::default().fg(title_fg).add_modifier(Modifier::BOLD),
        );

        let paragraph = Paragraph::new(lines)
            .alignment(Alignment::Center)
            .style(Style::default().fg(fg).bg(bg))
            .scroll((skip, 0));

        frame.render_widget(Clear, visible);
        frame.render_widget(paragraph, visible);
    }
}

/// Part of `area` a panel displaced by `offset` rows still covers, plus the
/// number of panel rows hidden above that part
pub fn visible_slice(area: Rect, offset: i32) -> Option<(Rect, u16)> {
    let shift = u16::try_from(offset.unsigned_abs()).unwrap_or(u16::MAX);
    if shift >= area.height {
        return None;
    }
    let height = area.height - shift;
    if offset >= 0 {
        Some((
            Rect {
                y: area.y + shift,
                height,
                ..area
            },
            0,
        ))
    } else {
        Some((Rect { height, ..area }, shift))
    }
}

/// Panel text vertically centered in a `height`-row panel
fn layout_lines(section: &Section, width: u16, height: u16, title_style: Style) -> Vec<Line<'static>> {
    let text_width = usize::from(width.saturating_sub(SIDE_PADDING * 2).max(1));
    let mut content: Vec<Line<'static>> = Vec::new();

    if let Some(title) = &section.title {
        for line in wrap_text(title, text_width) {
            content.push(Line::from(Span::styled(line, title_style)));
        }
        if !section.body.is_empty() {
            content.push(Line::default());
        }
    }
    for paragraph in section.body.lines() {
        if paragraph.trim().is_empty() {
            content.push(Line::default());
            continue;
        }
        for line in wrap_text(paragraph, text_width) {
            content.push(Line::from(line));
        }
    }

    let top = usize::from(height).saturating_sub(content.len()) / 2;
    let mut lines = vec![Line::default(); top];
    lines.extend(content);
    lines
}

/// Greedy word wrap by display width; words wider than `width` get their own line
pub fn wrap_text(text: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        if current.is_empty() {
            current.push_str(word);
        } else if current.width() + 1 + word.width() <= width {
            current.push(' ');
            current.push_str(word);
        } else {
            lines.push(std::mem::take(&mut current));
            current.push_str(word);
        }
    }
    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use fullpage_core::StackOrder;
    use ratatui::{backend::TestBackend, Terminal};

    #[test]
    fn test_wrap_text() {
        assert_eq!(wrap_text("one two three", 7), vec!["one two", "three"]);
        assert_eq!(wrap_text("  spaced   out  ", 20), vec!["spaced out"]);
        assert_eq!(wrap_text("unbreakable", 4), vec!["unbreakable"]);
        assert!(wrap_text("", 10).is_empty());
        // CJK glyphs are two cells wide
        assert_eq!(wrap_text("全屏 滚动", 4), vec!["全屏", "滚动"]);
    }

    #[test]
    fn test_visible_slice() {
        let area = Rect::new(0, 0, 80, 20);
        assert_eq!(visible_slice(area, 0), Some((area, 0)));
        assert_eq!(visible_slice(area, 5), Some((Rect::new(0, 5, 80, 15), 0)));
        assert_eq!(visible_slice(area, -5), Some((Rect::new(0, 0, 80, 15), 5)));
        assert_eq!(visible_slice(area, 20), None);
        assert_eq!(visible_slice(area, -25), None);
    }

    #[test]
    fn test_render_centers_title() {
        let backend = TestBackend::new(40, 9);
        let mut terminal = Terminal::new(backend).unwrap();
        let section = Section {
            title: Some("Hello".to_string()),
            body: String::new(),
        };
        let panel = PanelFrame {
            index: 0,
            stack_order: StackOrder::Front,
            opacity: 1.0,
            offset: 0,
            width: 40,
            height: 9,
        };

        terminal
            .draw(|frame| {
                let area = frame.area();
                PanelWidget::render(frame, area, &section, &panel, &Theme::dark());
            })
            .unwrap();

        let buffer = terminal.backend().buffer();
        let row: String = (0..40)
            .filter_map(|x| buffer.cell((x, 4)).map(|cell| cell.symbol().to_string()))
            .collect();
        assert!(row.contains("Hello"), "row was {:?}", row);
    }
}

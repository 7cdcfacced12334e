use fullpage_core::{DotSize, NavigationIndicator};
use ratatui::{layout::Rect, style::Style, Frame};

use crate::theme::Theme;

pub struct NavDotsWidget;

impl NavDotsWidget {
    pub fn render(frame: &mut Frame, area: Rect, nav: &NavigationIndicator, theme: &Theme) {
        let column = area.x + nav.box_left() + nav.box_width() / 2;
        if column >= area.right() {
            return;
        }

        let buffer = frame.buffer_mut();
        for dot in nav.dots() {
            let row = area.y.saturating_add(nav.dot_row(dot.index));
            if row >= area.bottom() {
                break;
            }
            let glyph = match dot.size {
                DotSize::Enlarged => "●",
                DotSize::Default => "•",
            };
            let color = if dot.is_active { theme.accent } else { theme.fg };
            buffer.set_string(column, row, glyph, Style::default().fg(color));
        }
    }
}

use fullpage_core::{Viewport, ViewportMetrics};
use tracing::warn;

/// Terminal size as reported by crossterm, minus rows reserved for chrome
#[derive(Debug, Clone, Copy, Default)]
pub struct TerminalMetrics {
    /// Rows kept for the status line
    pub reserved_rows: u16,
}

impl TerminalMetrics {
    pub fn new(reserved_rows: u16) -> Self {
        Self { reserved_rows }
    }

    /// Panel viewport for a full terminal size
    pub fn panel_viewport(&self, width: u16, height: u16) -> Viewport {
        Viewport::new(width, height.saturating_sub(self.reserved_rows))
    }
}

impl ViewportMetrics for TerminalMetrics {
    fn viewport(&self) -> Viewport {
        match crossterm::terminal::size() {
            Ok((width, height)) => self.panel_viewport(width, height),
            Err(e) => {
                warn!("Failed to read terminal size: {}", e);
                self.panel_viewport(80, 24)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_panel_viewport_reserves_status_row() {
        let metrics = TerminalMetrics::new(1);
        assert_eq!(metrics.panel_viewport(100, 30), Viewport::new(100, 29));
        assert_eq!(metrics.panel_viewport(100, 0), Viewport::new(100, 0));
    }
}

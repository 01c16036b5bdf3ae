/// Pane showing the tail of the application logs
use crate::stores::app_logs_store::AppLogsState;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    text::Line,
    widgets::{Block, Borders, Paragraph, Widget, Wrap},
};

pub struct LogPanel<'a> {
    logs: &'a [String],
    scroll_offset: usize,
}

impl<'a> LogPanel<'a> {
    pub fn from_state(state: &'a AppLogsState) -> Self {
        Self {
            logs: &state.logs,
            scroll_offset: state.scroll_offset,
        }
    }

    /// Visible slice: the last `height` lines before the scroll offset
    fn window(&self, height: usize) -> (usize, usize) {
        let end = self.logs.len().saturating_sub(self.scroll_offset);
        let start = end.saturating_sub(height);
        (start, end)
    }

    pub fn render(&self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .borders(Borders::ALL)
            .title(" Application Logs ")
            .border_style(Style::default().fg(Color::Cyan));

        if self.logs.is_empty() {
            Paragraph::new("No logs yet...")
                .block(block)
                .style(Style::default().fg(Color::DarkGray))
                .render(area, buf);
            return;
        }

        let (start, end) = self.window(area.height.saturating_sub(2) as usize);
        let lines: Vec<Line> = self.logs[start..end]
            .iter()
            .map(|log| {
                let color = if log.contains(" ERROR ") {
                    Color::Red
                } else if log.contains(" WARN ") {
                    Color::Yellow
                } else {
                    Color::Gray
                };
                Line::styled(log.clone(), Style::default().fg(color))
            })
            .collect();

        Paragraph::new(lines)
            .block(block.title_bottom(format!(" [{}/{}] ", end, self.logs.len())))
            .wrap(Wrap { trim: false })
            .render(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_window_follows_scroll() {
        let state = AppLogsState {
            logs: (0..10).map(|i| format!("line {}", i)).collect(),
            scroll_offset: 2,
        };
        let panel = LogPanel::from_state(&state);
        assert_eq!(panel.window(3), (5, 8));
        assert_eq!(panel.window(20), (0, 8));
    }

    #[test]
    fn test_empty_logs() {
        let state = AppLogsState::default();
        let area = Rect::new(0, 0, 30, 4);
        let mut buf = Buffer::empty(area);
        LogPanel::from_state(&state).render(area, &mut buf);
        let row: String = (0..30u16).map(|x| buf[(x, 1)].symbol().to_string()).collect();
        assert!(row.contains("No logs yet"));
    }
}

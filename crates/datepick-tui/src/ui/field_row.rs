/// One labelled text field of the form
use crate::config::FieldKind;
use crate::stores::picker_store::FieldView;
use ratatui::{
    buffer::Buffer,
    layout::{Position, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};
use unicode_width::UnicodeWidthStr;

pub const FIELD_HEIGHT: u16 = 3;

pub struct FieldRow<'a> {
    field: &'a FieldView,
}

impl<'a> FieldRow<'a> {
    pub fn new(field: &'a FieldView) -> Self {
        Self { field }
    }

    /// Terminal cursor position for a focused text input
    pub fn cursor_position(&self, area: Rect) -> Option<Position> {
        if !self.field.focused || self.field.kind != FieldKind::Input {
            return None;
        }
        let cursor = self.field.cursor?;
        let before: String = self.field.value.chars().take(cursor).collect();
        let x = area.x + 1 + before.width() as u16;
        Some(Position::new(x.min(area.right().saturating_sub(2)), area.y + 1))
    }

    pub fn render(&self, area: Rect, buf: &mut Buffer) {
        let border_color = if self.field.focused {
            Color::Cyan
        } else {
            Color::DarkGray
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .title(format!(" {} ", self.field.label))
            .border_style(Style::default().fg(border_color));

        let mut spans = vec![Span::styled(
            self.field.value.clone(),
            Style::default().fg(Color::White),
        )];
        if self.field.kind == FieldKind::Modal {
            spans.push(Span::styled(
                "  [Enter to choose]",
                Style::default()
                    .fg(Color::DarkGray)
                    .add_modifier(Modifier::ITALIC),
            ));
        }

        Paragraph::new(Line::from(spans))
            .block(block)
            .render(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn view(kind: FieldKind, focused: bool) -> FieldView {
        FieldView {
            id: "checkin".to_string(),
            label: "Check-in".to_string(),
            kind,
            value: "02/15/2024".to_string(),
            cursor: Some(3),
            focused,
            open: false,
            grid: None,
            highlighted: None,
            placement: None,
            summary: None,
        }
    }

    #[test]
    fn test_render_and_cursor() {
        let field = view(FieldKind::Input, true);
        let area = Rect::new(0, 0, 30, FIELD_HEIGHT);
        let mut buf = Buffer::empty(area);
        let row = FieldRow::new(&field);
        row.render(area, &mut buf);

        let top: String = (0..30u16).map(|x| buf[(x, 0)].symbol().to_string()).collect();
        let middle: String = (0..30u16).map(|x| buf[(x, 1)].symbol().to_string()).collect();
        assert!(top.contains("Check-in"));
        assert!(middle.contains("02/15/2024"));
        assert_eq!(buf[(0u16, 0u16)].fg, Color::Cyan);
        assert_eq!(row.cursor_position(area), Some(Position::new(4, 1)));
    }

    #[test]
    fn test_no_cursor_unless_focused_input() {
        let area = Rect::new(0, 0, 30, FIELD_HEIGHT);
        let field = view(FieldKind::Input, false);
        assert!(FieldRow::new(&field).cursor_position(area).is_none());
        let field = view(FieldKind::Modal, true);
        assert!(FieldRow::new(&field).cursor_position(area).is_none());
    }
}

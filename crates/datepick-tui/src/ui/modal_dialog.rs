/// Modal dialog around an embedded calendar: a large summary of the chosen
/// date, the calendar, and pick/cancel buttons
use crate::actions::Hit;
use crate::stores::picker_store::FieldView;
use crate::ui::picker_panel::{PANEL_HEIGHT, PANEL_WIDTH, PickerPanel, centered_rect};
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Widget},
};

const DIALOG_WIDTH: u16 = PANEL_WIDTH + 2;
/// Summary (3) + calendar + buttons (1) + borders
const DIALOG_HEIGHT: u16 = 3 + (PANEL_HEIGHT - 2) + 1 + 2;

const PICK_LABEL: &str = "[ Pick ]";
const CANCEL_LABEL: &str = "[ Cancel ]";

pub struct ModalDialog<'a> {
    field: &'a FieldView,
}

impl<'a> ModalDialog<'a> {
    pub fn new(field: &'a FieldView) -> Self {
        Self { field }
    }

    /// Render centred in `area` and return the clickable regions
    pub fn render(&self, area: Rect, buf: &mut Buffer) -> Vec<(Rect, Hit)> {
        let dialog = centered_rect(DIALOG_WIDTH, DIALOG_HEIGHT, area);
        Clear.render(dialog, buf);

        let block = Block::default()
            .title(format!(" {} ", self.field.label))
            .title_style(
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            )
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan));
        let inner = block.inner(dialog);
        block.render(dialog, buf);

        let [summary_area, calendar_area, buttons_area] = Layout::vertical([
            Constraint::Length(3),
            Constraint::Length(PANEL_HEIGHT - 2),
            Constraint::Length(1),
        ])
        .areas(inner);

        if let Some(summary) = &self.field.summary {
            let lines = vec![
                Line::from(Span::styled(
                    summary.year.to_string(),
                    Style::default().fg(Color::DarkGray),
                )),
                Line::from(Span::styled(
                    format!("{} {}", summary.month, summary.day),
                    Style::default()
                        .fg(Color::Yellow)
                        .add_modifier(Modifier::BOLD),
                )),
                Line::from(Span::styled(
                    summary.weekday.clone(),
                    Style::default().fg(Color::White),
                )),
            ];
            Paragraph::new(lines)
                .alignment(Alignment::Center)
                .render(summary_area, buf);
        }

        let mut regions = Vec::new();
        if let Some(grid) = &self.field.grid {
            let panel = PickerPanel::new(grid)
                .bordered(false)
                .highlighted(self.field.highlighted);
            panel.render(calendar_area, buf);
            regions.extend(panel.regions(calendar_area));
        }

        let pick = Rect::new(buttons_area.x + 2, buttons_area.y, PICK_LABEL.len() as u16, 1);
        let cancel = Rect::new(
            buttons_area.right().saturating_sub(CANCEL_LABEL.len() as u16 + 2),
            buttons_area.y,
            CANCEL_LABEL.len() as u16,
            1,
        );
        buf.set_string(
            pick.x,
            pick.y,
            PICK_LABEL,
            Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
        );
        buf.set_string(cancel.x, cancel.y, CANCEL_LABEL, Style::default().fg(Color::Red));
        regions.push((pick, Hit::Pick));
        regions.push((cancel, Hit::Cancel));

        regions
    }
}

/// Layout manager for the TUI application
use crate::config::FieldKind;
use crate::stores::picker_store::{FieldView, HitRegion, PickerViewState};
use crate::stores::{AppLogsStore, PickerStore, UIStore};
use crate::ui::field_row::{FIELD_HEIGHT, FieldRow};
use crate::ui::log_panel::LogPanel;
use crate::ui::modal_dialog::ModalDialog;
use crate::ui::picker_panel::{
    PANEL_HEIGHT, PANEL_WIDTH, PickerPanel, centered_rect, render_picker_below,
};
use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Widget},
};

const FORM_WIDTH: u16 = 40;
const LOG_HEIGHT: u16 = 10;

const HELP: &[(&str, &str)] = &[
    ("Tab / Shift+Tab", "next / previous field"),
    ("Enter", "open picker, select highlighted cell"),
    ("Arrows", "move the highlight"),
    ("PgUp / PgDn", "previous / next month, year or decade"),
    ("Shift+Up", "zoom out to months, then years"),
    ("Esc", "close picker or cancel modal"),
    ("p", "confirm the modal's date"),
    ("F2", "toggle application logs"),
    ("Ctrl+Up / Ctrl+Down", "scroll logs"),
    ("F1", "toggle this help"),
    ("Ctrl+C", "quit"),
];

fn field_height(field: &FieldView) -> u16 {
    match field.kind {
        FieldKind::Inline => PANEL_HEIGHT,
        FieldKind::Input | FieldKind::Modal => FIELD_HEIGHT,
    }
}

/// Render the complete application layout and record the frame's clickable
/// regions in the picker store
pub fn render_layout(
    frame: &mut Frame,
    picker_store: &PickerStore,
    ui_store: &UIStore,
    app_logs_store: &AppLogsStore,
) {
    let area = frame.area();
    let ui_state = ui_store.get_state();
    let picker_state = picker_store.get_state();

    let log_height = if ui_state.show_logs { LOG_HEIGHT } else { 0 };
    let [header_area, body_area, log_area, footer_area] = Layout::vertical([
        Constraint::Length(3),
        Constraint::Min(1),
        Constraint::Length(log_height),
        Constraint::Length(3),
    ])
    .areas(area);

    render_header(frame, header_area, &picker_state, ui_state.error_message.as_deref());

    let mut field_areas = Vec::new();
    let mut hits = Vec::new();

    let form_area = Rect {
        width: body_area.width.min(FORM_WIDTH.max(PANEL_WIDTH)),
        ..body_area
    };
    let rows = Layout::vertical(
        picker_state
            .fields
            .iter()
            .map(|field| Constraint::Length(field_height(field))),
    )
    .split(form_area);

    for (index, (field, row)) in picker_state.fields.iter().zip(rows.iter()).enumerate() {
        if row.height == 0 {
            continue;
        }
        picker_store.set_anchor(&field.id, *row);
        field_areas.push((*row, index));

        match (field.kind, &field.grid) {
            (FieldKind::Inline, Some(grid)) => {
                let panel_area = Rect {
                    width: row.width.min(PANEL_WIDTH),
                    ..*row
                };
                let panel = PickerPanel::new(grid)
                    .title(format!(" {}: {} ", field.label, field.value))
                    .focused(field.focused)
                    .highlighted(field.focused.then_some(field.highlighted).flatten());
                panel.render(panel_area, frame.buffer_mut());
                hits.extend(panel.regions(panel_area).into_iter().map(|(area, hit)| {
                    HitRegion {
                        area,
                        field: field.id.clone(),
                        hit,
                    }
                }));
            }
            _ => {
                let field_row = FieldRow::new(field);
                field_row.render(*row, frame.buffer_mut());
                if picker_state.modal.is_none() {
                    if let Some(position) = field_row.cursor_position(*row) {
                        frame.set_cursor_position(position);
                    }
                }
            }
        }
    }

    // Popups go over the form, lowest z-index first
    let mut popups: Vec<(&FieldView, Rect)> = picker_state
        .fields
        .iter()
        .zip(rows.iter())
        .filter(|(field, _)| field.kind == FieldKind::Input && field.open)
        .map(|(field, row)| (field, *row))
        .collect();
    popups.sort_by_key(|(field, _)| field.placement.map(|p| p.z_index).unwrap_or_default());

    for (field, row) in popups {
        let Some(grid) = &field.grid else {
            continue;
        };
        let panel = PickerPanel::new(grid)
            .title(format!(" {} ", field.label))
            .focused(true)
            .highlighted(field.highlighted);
        let regions =
            render_picker_below(body_area, row, field.placement, frame.buffer_mut(), &panel);
        hits.extend(regions.into_iter().map(|(area, hit)| HitRegion {
            area,
            field: field.id.clone(),
            hit,
        }));
    }

    if ui_state.show_logs {
        let app_logs_state = app_logs_store.get_state();
        LogPanel::from_state(&app_logs_state).render(log_area, frame.buffer_mut());
    }

    render_footer(frame, footer_area, &picker_state);

    // A modal replaces every other clickable region
    if let Some(field) = picker_state
        .modal
        .as_ref()
        .and_then(|id| picker_state.fields.iter().find(|f| &f.id == id))
    {
        let regions = ModalDialog::new(field).render(area, frame.buffer_mut());
        hits = regions
            .into_iter()
            .map(|(area, hit)| HitRegion {
                area,
                field: field.id.clone(),
                hit,
            })
            .collect();
        field_areas.clear();
    }

    if ui_state.show_help {
        render_help(frame, area);
    }

    picker_store.set_hit_regions(field_areas, hits);
}

fn render_header(frame: &mut Frame, area: Rect, state: &PickerViewState, error: Option<&str>) {
    let mut spans = vec![
        Span::styled(
            " DATEPICK ",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw(format!("| {} ", state.title)),
    ];

    if let Some(error) = error {
        spans.push(Span::raw("| "));
        spans.push(Span::styled(error.to_string(), Style::default().fg(Color::Red)));
    } else if let Some(change) = &state.last_change {
        spans.push(Span::raw("| Last change: "));
        spans.push(Span::styled(change.clone(), Style::default().fg(Color::Green)));
    }

    Paragraph::new(Line::from(spans))
        .block(Block::default().borders(Borders::ALL))
        .render(area, frame.buffer_mut());
}

fn render_footer(frame: &mut Frame, area: Rect, state: &PickerViewState) {
    let help_text = if state.modal.is_some() {
        "Enter:Select | PgUp/PgDn:Prev/Next | Shift+Up:Zoom out | p:Pick | Esc:Cancel"
    } else {
        "Tab:Next field | Enter:Open/Select | Esc:Close | F1:Help | F2:Logs | Ctrl+C:Quit"
    };

    Paragraph::new(Line::from(vec![Span::raw(" "), Span::raw(help_text)]))
        .style(Style::default().fg(Color::DarkGray))
        .block(Block::default().borders(Borders::ALL))
        .render(area, frame.buffer_mut());
}

fn render_help(frame: &mut Frame, area: Rect) {
    let popup = centered_rect(60, HELP.len() as u16 + 2, area);
    Clear.render(popup, frame.buffer_mut());

    let lines: Vec<Line> = HELP
        .iter()
        .map(|(keys, what)| {
            Line::from(vec![
                Span::styled(format!(" {:<22}", keys), Style::default().fg(Color::Yellow)),
                Span::raw(*what),
            ])
        })
        .collect();

    Paragraph::new(lines)
        .block(
            Block::default()
                .title(" Help ")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan)),
        )
        .render(popup, frame.buffer_mut());
}

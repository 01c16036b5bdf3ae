/// Widget drawing one picker grid: a title bar with prev/next arrows, the
/// weekday header on the days level, and the cells. The same geometry drives
/// both drawing and mouse hit regions.
use crate::actions::Hit;
use datepick_core::{Grid, Placement, Target, ViewLevel};
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Flex, Layout, Rect},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Clear, Widget},
};
use unicode_width::UnicodeWidthStr;

/// 7 columns of 3 plus padding and borders
pub const PANEL_WIDTH: u16 = 26;
/// Title, weekday header and six rows, plus borders
pub const PANEL_HEIGHT: u16 = 10;

pub struct PickerPanel<'a> {
    grid: &'a Grid,
    title: Option<String>,
    bordered: bool,
    focused: bool,
    highlighted: Option<usize>,
}

/// Title bar controls for a level: previous, title (if it leads up), next
fn title_targets(level: ViewLevel) -> (Target, Option<Target>, Target) {
    match level {
        ViewLevel::Days => (Target::MonthPrev, Some(Target::MonthTitle), Target::MonthNext),
        ViewLevel::Months => (Target::YearPrev, Some(Target::YearTitle), Target::YearNext),
        ViewLevel::Years => (Target::DecadePrev, None, Target::DecadeNext),
    }
}

impl<'a> PickerPanel<'a> {
    pub fn new(grid: &'a Grid) -> Self {
        Self {
            grid,
            title: None,
            bordered: true,
            focused: false,
            highlighted: None,
        }
    }

    /// Set a title for the border
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn bordered(mut self, bordered: bool) -> Self {
        self.bordered = bordered;
        self
    }

    pub fn focused(mut self, focused: bool) -> Self {
        self.focused = focused;
        self
    }

    /// Cell drawn with the keyboard highlight
    pub fn highlighted(mut self, index: Option<usize>) -> Self {
        self.highlighted = index;
        self
    }

    fn inner(&self, area: Rect) -> Rect {
        if self.bordered {
            Block::default().borders(Borders::ALL).inner(area)
        } else {
            area
        }
    }

    fn cell_width(&self, inner: Rect) -> u16 {
        inner.width / self.grid.columns() as u16
    }

    fn cell_area(&self, inner: Rect, index: usize) -> Option<Rect> {
        let columns = self.grid.columns();
        let width = self.cell_width(inner);
        let margin = (inner.width - width * columns as u16) / 2;
        let x = inner.x + margin + (index % columns) as u16 * width;
        let y = inner.y + 2 + (index / columns) as u16;
        (y < inner.bottom()).then_some(Rect::new(x, y, width, 1))
    }

    /// Clickable parts of the panel when drawn into `area`
    pub fn regions(&self, area: Rect) -> Vec<(Rect, Hit)> {
        let inner = self.inner(area);
        if inner.width < 4 || inner.height == 0 {
            return Vec::new();
        }
        let (prev, up, next) = title_targets(self.grid.level);

        let mut regions = vec![
            (Rect::new(inner.x, inner.y, 2, 1), Hit::Target(prev)),
            (
                Rect::new(inner.right() - 2, inner.y, 2, 1),
                Hit::Target(next),
            ),
        ];
        if let Some(up) = up {
            regions.push((
                Rect::new(inner.x + 2, inner.y, inner.width - 4, 1),
                Hit::Target(up),
            ));
        }
        regions.extend(
            (0..self.grid.cells.len())
                .filter_map(|i| self.cell_area(inner, i).map(|rect| (rect, Hit::Cell(i)))),
        );
        regions
    }

    pub fn render(&self, area: Rect, buf: &mut Buffer) {
        let inner = if self.bordered {
            let border_color = if self.focused {
                Color::Cyan
            } else {
                Color::DarkGray
            };
            let block = Block::default()
                .title(self.title.clone().unwrap_or_default())
                .title_style(
                    Style::default()
                        .fg(Color::Cyan)
                        .add_modifier(Modifier::BOLD),
                )
                .borders(Borders::ALL)
                .border_style(Style::default().fg(border_color));
            let inner = block.inner(area);
            block.render(area, buf);
            inner
        } else {
            area
        };
        if inner.width < 4 || inner.height == 0 {
            return;
        }

        // Title bar
        let arrow = Style::default().fg(Color::Yellow);
        buf.set_string(inner.x, inner.y, "‹", arrow);
        buf.set_string(inner.right() - 1, inner.y, "›", arrow);
        let title_width = self.grid.title.width() as u16;
        let title_x = inner.x + inner.width.saturating_sub(title_width) / 2;
        buf.set_stringn(
            title_x,
            inner.y,
            &self.grid.title,
            (inner.width - 4) as usize,
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        );

        let cell_width = self.cell_width(inner) as usize;
        let pad = cell_width.saturating_sub(1);

        // Weekday headers
        if inner.height > 1 {
            for (i, name) in self.grid.week.iter().enumerate() {
                if let Some(rect) = self.cell_area(inner, i) {
                    buf.set_stringn(
                        rect.x,
                        inner.y + 1,
                        format!("{:>pad$}", name),
                        cell_width,
                        Style::default().fg(Color::Yellow),
                    );
                }
            }
        }

        for (i, cell) in self.grid.cells.iter().enumerate() {
            let Some(rect) = self.cell_area(inner, i) else {
                continue;
            };
            let mut style = if cell.selected && !cell.disabled {
                Style::default()
                    .fg(Color::Yellow)
                    .bg(Color::DarkGray)
                    .add_modifier(Modifier::BOLD)
            } else if cell.disabled {
                Style::default().fg(Color::DarkGray)
            } else {
                Style::default().fg(Color::White)
            };
            if self.highlighted == Some(i) {
                style = style.add_modifier(Modifier::REVERSED);
            }
            // right-align the text, leaving the last column as a gutter
            let text_width = cell.text.width();
            let x = rect.x + pad.saturating_sub(text_width) as u16;
            buf.set_stringn(x, rect.y, &cell.text, pad.max(1), style);
        }
    }
}

/// Draw a popup panel below `below` (or at `placement`), kept inside the
/// screen. Returns the panel's hit regions.
pub fn render_picker_below(
    screen_area: Rect,
    below_area: Rect,
    placement: Option<Placement>,
    buf: &mut Buffer,
    panel: &PickerPanel,
) -> Vec<(Rect, Hit)> {
    let (x, y) = match placement {
        Some(p) => (p.left.max(0) as u16, p.top.max(0) as u16),
        None => (below_area.x, below_area.y + below_area.height),
    };

    // Ensure the popup doesn't go off screen
    let x = x.min(screen_area.right().saturating_sub(PANEL_WIDTH));
    let y = y.min(screen_area.bottom().saturating_sub(PANEL_HEIGHT));
    let popup_area = Rect {
        x,
        y,
        width: PANEL_WIDTH.min(screen_area.width),
        height: PANEL_HEIGHT.min(screen_area.height),
    };

    Clear.render(popup_area, buf);
    panel.render(popup_area, buf);
    panel.regions(popup_area)
}

/// A `width` x `height` rectangle centred in `area`
pub fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let [row] = Layout::vertical([Constraint::Length(height)])
        .flex(Flex::Center)
        .areas(area);
    let [rect] = Layout::horizontal([Constraint::Length(width)])
        .flex(Flex::Center)
        .areas(row);
    rect
}

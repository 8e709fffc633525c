use chrono::NaiveDate;
use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use super::hit_map::{ClickTarget, HitMap};
use crate::calendar::event::events_on_date;
use crate::calendar::grid::{build_month_grid, format_month_year, DayCell, WEEKDAY_NAMES};
use crate::calendar::Event;
use crate::theme;

pub struct MonthView;

impl MonthView {
    #[allow(clippy::too_many_arguments)]
    pub fn render(
        frame: &mut Frame,
        area: Rect,
        year: i32,
        month0: u32,
        selected_date: NaiveDate,
        events: &[Event],
        active_event: Option<&str>,
        hits: &mut HitMap,
    ) {
        let theme = theme::current();

        let block = Block::default()
            .title(format!(" {} ", format_month_year(year, month0)))
            .title_style(theme.header)
            .borders(Borders::ALL)
            .border_style(theme.border);

        let inner = block.inner(area);
        frame.render_widget(block, area);

        let cells = build_month_grid(year, month0 as i32);
        let weeks = cells.len() / 7;
        if weeks == 0 || inner.height < 2 {
            return;
        }

        let mut constraints = vec![Constraint::Length(1)];
        constraints.extend((0..weeks).map(|_| Constraint::Ratio(1, weeks as u32)));
        let rows = Layout::vertical(constraints).split(inner);

        // Header row
        let col_w = (inner.width / 7) as usize;
        let header: Vec<Span> = WEEKDAY_NAMES
            .iter()
            .map(|name| {
                let label: &str = if col_w >= 9 { name } else { &name[..3] };
                Span::styled(format!("{:^width$}", label, width = col_w), theme.header)
            })
            .collect();
        frame.render_widget(Paragraph::new(Line::from(header)), rows[0]);

        for (week, row_area) in cells.chunks(7).zip(rows.iter().skip(1)) {
            let cols = Layout::horizontal([Constraint::Ratio(1, 7); 7]).split(*row_area);
            for (cell, cell_area) in week.iter().zip(cols.iter()) {
                render_cell(frame, *cell_area, cell, selected_date, events, active_event, hits);
            }
        }
    }
}

fn render_cell(
    frame: &mut Frame,
    area: Rect,
    cell: &DayCell,
    selected_date: NaiveDate,
    events: &[Event],
    active_event: Option<&str>,
    hits: &mut HitMap,
) {
    let theme = theme::current();
    let date = cell.date();
    hits.push(area, ClickTarget::Cell(date));

    let number_style = if date == selected_date {
        theme.selected
    } else if cell.is_today {
        theme.today
    } else if cell.is_other_month {
        theme.other_month
    } else {
        Style::default()
    };

    let block = Block::default()
        .title(Line::from(Span::styled(format!("{:>2}", cell.day), number_style)))
        .borders(Borders::TOP | Borders::LEFT)
        .border_style(theme.border);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let day_events = events_on_date(events, &cell.date_string());
    if day_events.is_empty() || inner.height == 0 || inner.width == 0 {
        return;
    }

    let capacity = inner.height as usize;
    let overflow = day_events.len() > capacity;
    let shown = if overflow { capacity - 1 } else { day_events.len() };
    let width = inner.width as usize;

    for (i, event) in day_events.iter().take(shown).enumerate() {
        let line_area = Rect::new(inner.x, inner.y + i as u16, inner.width, 1);
        let style = if active_event == Some(event.id.as_str()) {
            theme.chip_active
        } else if cell.is_other_month {
            theme.chip.patch(theme.other_month)
        } else {
            theme.chip
        };
        let label = truncate(&event.chip_label(), width);
        frame.render_widget(
            Paragraph::new(Span::styled(format!("{:<width$}", label, width = width), style)),
            line_area,
        );
        hits.push(line_area, ClickTarget::Chip(event.id.clone()));
    }

    if overflow {
        let more = day_events.len() - shown;
        let line_area = Rect::new(inner.x, inner.y + shown as u16, inner.width, 1);
        frame.render_widget(
            Paragraph::new(Span::styled(truncate(&format!("+{} more", more), width), theme.dim)),
            line_area,
        );
    }
}

/// Cut `s` to at most `width` characters, marking the cut with an ellipsis.
pub fn truncate(s: &str, width: usize) -> String {
    if s.chars().count() <= width {
        return s.to_string();
    }
    if width == 0 {
        return String::new();
    }
    let mut out: String = s.chars().take(width - 1).collect();
    out.push('\u{2026}');
    out
}

use chrono::NaiveDate;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use super::hit_map::{ClickTarget, HitMap};
use crate::calendar::grid::{build_month_grid, month_name};
use crate::theme;

const DAY_HEADERS: [&str; 7] = ["Su", "Mo", "Tu", "We", "Th", "Fr", "Sa"];
const COL_W: u16 = 3;

/// Compact navigator: month title with arrows, then a 3-column-per-day grid.
pub struct MiniCalendar;

impl MiniCalendar {
    /// Width needed to draw the grid including borders.
    pub const WIDTH: u16 = COL_W * 7 + 2;

    pub fn render(
        frame: &mut Frame,
        area: Rect,
        year: i32,
        month0: u32,
        selected_date: NaiveDate,
        hits: &mut HitMap,
    ) {
        let theme = theme::current();
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(theme.border);
        let inner = block.inner(area);
        frame.render_widget(block, area);
        if inner.height < 3 || inner.width < COL_W * 7 {
            return;
        }

        // Title row: "‹ Oct 2026 ›"
        let title = format!("{} {}", &month_name(month0)[..3], year);
        let title_len = title.chars().count();
        let pad = (inner.width as usize).saturating_sub(title_len + 4) / 2;
        let title_line = Line::from(vec![
            Span::styled("\u{2039}", theme.accent),
            Span::raw(" ".repeat(pad + 1)),
            Span::styled(title, theme.header),
            Span::raw(" ".repeat(pad + 1)),
            Span::styled("\u{203a}", theme.accent),
        ]);
        let title_area = Rect::new(inner.x, inner.y, inner.width, 1);
        frame.render_widget(Paragraph::new(title_line), title_area);
        hits.push(Rect::new(inner.x, inner.y, 2, 1), ClickTarget::PrevMonth);
        let next_x = inner.x + (2 * pad + 3 + title_len) as u16;
        hits.push(Rect::new(next_x.saturating_sub(1), inner.y, 2, 1), ClickTarget::NextMonth);

        let header: Vec<Span> = DAY_HEADERS
            .iter()
            .map(|d| Span::styled(format!("{:>2} ", d), theme.dim))
            .collect();
        frame.render_widget(
            Paragraph::new(Line::from(header)),
            Rect::new(inner.x, inner.y + 1, inner.width, 1),
        );

        let cells = build_month_grid(year, month0 as i32);
        for (row, week) in cells.chunks(7).enumerate() {
            let y = inner.y + 2 + row as u16;
            if y >= inner.y + inner.height {
                break;
            }
            let mut spans = Vec::with_capacity(7);
            for (col, cell) in week.iter().enumerate() {
                let date = cell.date();
                let style = if date == selected_date {
                    theme.selected
                } else if cell.is_today {
                    theme.today
                } else if cell.is_other_month {
                    theme.other_month
                } else {
                    Style::default()
                };
                let style = if cell.is_today { style.add_modifier(Modifier::BOLD) } else { style };
                spans.push(Span::styled(format!("{:>2}", cell.day), style));
                spans.push(Span::raw(" "));
                hits.push(
                    Rect::new(inner.x + col as u16 * COL_W, y, COL_W, 1),
                    ClickTarget::MiniDay(date),
                );
            }
            frame.render_widget(
                Paragraph::new(Line::from(spans)),
                Rect::new(inner.x, y, inner.width, 1),
            );
        }
    }
}

use chrono::{Datelike, NaiveDate};
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use super::hit_map::{ClickTarget, HitMap};
use super::month_view::truncate;
use crate::calendar::grid::is_today;
use crate::calendar::Event;
use crate::theme;

/// Agenda for the selected day, in stored order.
pub struct DayView;

impl DayView {
    pub fn render(
        frame: &mut Frame,
        area: Rect,
        date: NaiveDate,
        events: &[&Event],
        cursor: usize,
        hits: &mut HitMap,
    ) {
        let theme = theme::current();
        let w = area.width as usize;

        let today = if is_today(date.year(), date.month0(), date.day()) {
            " (today)"
        } else {
            ""
        };
        let title = if w >= 34 {
            format!(" {}{} ", date.format("%A, %B %-d"), today)
        } else {
            format!(" {}{} ", date.format("%b %-d"), today)
        };

        let count_str = match events.len() {
            0 => String::new(),
            1 => " 1 event ".to_string(),
            n => format!(" {} events ", n),
        };

        let block = Block::default()
            .title(title)
            .title_style(theme.header)
            .title_bottom(Line::from(Span::styled(count_str, theme.dim)))
            .borders(Borders::ALL)
            .border_style(theme.border);

        let inner = block.inner(area);
        frame.render_widget(block, area);

        if events.is_empty() {
            let msg = Paragraph::new("No events. Press n to add one.").style(theme.dim);
            frame.render_widget(msg, inner);
            return;
        }

        let inner_w = inner.width as usize;
        let mut y = inner.y;
        let bottom = inner.y + inner.height;

        // Keep the highlighted event on screen
        let lines_per_event = 2;
        let visible = (inner.height as usize / lines_per_event).max(1);
        let skip = cursor.saturating_sub(visible - 1);

        for (i, event) in events.iter().enumerate().skip(skip) {
            if y >= bottom {
                break;
            }
            let active = i == cursor;
            let marker_style = if active { theme.chip_active } else { theme.chip };
            let title_style = if active {
                Style::default().add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };

            let time = event
                .time_range_display()
                .map(|t| format!(" {} ", t))
                .unwrap_or_else(|| " ".to_string());
            let title_w = inner_w.saturating_sub(2 + time.chars().count());
            let line = Line::from(vec![
                Span::styled("  ", marker_style),
                Span::styled(time, Style::default().add_modifier(Modifier::DIM)),
                Span::styled(truncate(&event.title, title_w), title_style),
            ]);
            let start_y = y;
            frame.render_widget(Paragraph::new(line), Rect::new(inner.x, y, inner.width, 1));
            y += 1;

            if y < bottom {
                if let Some(detail) = detail_line(event) {
                    let detail = truncate(&detail, inner_w.saturating_sub(3));
                    frame.render_widget(
                        Paragraph::new(Line::from(vec![
                            Span::raw("   "),
                            Span::styled(detail, theme.dim),
                        ])),
                        Rect::new(inner.x, y, inner.width, 1),
                    );
                }
                y += 1;
            }

            hits.push(
                Rect::new(inner.x, start_y, inner.width, y - start_y),
                ClickTarget::Chip(event.id.clone()),
            );
        }
    }
}

fn detail_line(event: &Event) -> Option<String> {
    match (event.location.as_deref(), event.description.as_deref()) {
        (Some(loc), Some(desc)) => Some(format!("@ {} \u{00b7} {}", loc, desc)),
        (Some(loc), None) => Some(format!("@ {}", loc)),
        (None, Some(desc)) => Some(desc.to_string()),
        (None, None) => None,
    }
}

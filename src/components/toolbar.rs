use ratatui::{
    layout::Rect,
    style::Modifier,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use super::hit_map::{ClickTarget, HitMap};
use crate::calendar::grid::format_month_year;
use crate::theme;

const BUTTONS: [(&str, ClickTarget); 3] = [
    (" \u{25c0} ", ClickTarget::PrevMonth),
    (" Today ", ClickTarget::Today),
    (" \u{25b6} ", ClickTarget::NextMonth),
];
const CREATE: &str = " + Create ";

/// Top bar: month navigation buttons, the month title, and a create button.
pub struct Toolbar;

impl Toolbar {
    pub fn render(frame: &mut Frame, area: Rect, year: i32, month0: u32, hits: &mut HitMap) {
        let theme = theme::current();
        let button_style = theme.status.add_modifier(Modifier::BOLD);

        let mut spans = vec![Span::raw(" ")];
        let mut x = area.x + 1;
        for (label, target) in BUTTONS {
            let w = label.chars().count() as u16;
            hits.push(Rect::new(x, area.y, w, 1), target);
            spans.push(Span::styled(label, button_style));
            spans.push(Span::raw(" "));
            x += w + 1;
        }
        spans.push(Span::styled(
            format!(" {}", format_month_year(year, month0)),
            theme.header,
        ));

        let used: u16 = spans.iter().map(|s| s.content.chars().count() as u16).sum();
        let create_w = CREATE.chars().count() as u16;
        let create_x = area.x + area.width.saturating_sub(create_w + 1);
        if create_x > area.x + used {
            spans.push(Span::raw(" ".repeat((create_x - area.x - used) as usize)));
            spans.push(Span::styled(CREATE, theme.chip_active));
            hits.push(Rect::new(create_x, area.y, create_w, 1), ClickTarget::Create);
        }

        frame.render_widget(Paragraph::new(Line::from(spans)), area);
    }
}

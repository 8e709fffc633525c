use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use crate::theme;

/// Yes/no prompt shown before deleting an event.
pub struct ConfirmDialog;

impl ConfirmDialog {
    pub fn area(area: Rect) -> Rect {
        let popup_w = area.width.clamp(24, 44).min(area.width);
        let popup_h = 6.min(area.height);
        let x = area.x + (area.width.saturating_sub(popup_w)) / 2;
        let y = area.y + (area.height.saturating_sub(popup_h)) / 2;
        Rect::new(x, y, popup_w, popup_h)
    }

    pub fn render(frame: &mut Frame, area: Rect, event_title: &str) -> Rect {
        let theme = theme::current();
        let popup_area = Self::area(area);
        frame.render_widget(Clear, popup_area);

        let block = Block::default()
            .title(" Delete Event ")
            .title_style(theme.error.add_modifier(Modifier::BOLD))
            .borders(Borders::ALL)
            .border_style(theme.error);
        let inner = block.inner(popup_area);
        frame.render_widget(block, popup_area);

        let key = Style::default().add_modifier(Modifier::BOLD);
        let lines = vec![
            Line::from(format!("Delete \"{}\"?", event_title)),
            Line::from(""),
            Line::from(vec![
                Span::styled("y", key),
                Span::styled(":Delete  ", theme.dim),
                Span::styled("n", key),
                Span::styled("/", theme.dim),
                Span::styled("Esc", key),
                Span::styled(":Keep", theme.dim),
            ]),
        ];
        frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: true }), inner);
        popup_area
    }
}

use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::app::InputMode;
use crate::theme;

pub struct StatusBar;

impl StatusBar {
    /// Mode on the left; status message or key hints on the right.
    pub fn render(
        frame: &mut Frame,
        area: Rect,
        mode: InputMode,
        message: Option<&str>,
        unsaved: bool,
    ) {
        let theme = theme::current();
        let w = area.width as usize;

        let mode_str = match mode {
            InputMode::Normal => "Calendar",
            InputMode::Form => "Event",
            InputMode::Confirm => "Delete?",
        };
        let unsaved_str = if unsaved { " [unsaved]" } else { "" };

        let right_text = match message {
            Some(msg) => format!(" {} ", msg),
            None => match mode {
                InputMode::Normal if w >= 90 => {
                    " hjkl:Move [/]:Month t:Today n:New Tab:Event Enter:Open d:Del ?:Help q:Quit "
                        .to_string()
                }
                InputMode::Normal if w >= 50 => " n:New Enter:Open ?:Help q:Quit ".to_string(),
                InputMode::Form if w >= 50 => " Tab:Field Enter:Save Esc:Cancel ".to_string(),
                InputMode::Confirm => " y:Delete n:Keep ".to_string(),
                _ => " ?:Help ".to_string(),
            },
        };

        let left = format!(" {}{} ", mode_str, unsaved_str);
        let padding = " ".repeat(w.saturating_sub(left.chars().count() + right_text.chars().count()));

        let left_style = if unsaved { theme.status.patch(theme.error) } else { theme.status };
        let line = Line::from(vec![
            Span::styled(left, left_style),
            Span::styled(padding, theme.status),
            Span::styled(right_text, theme.status),
        ]);

        frame.render_widget(Paragraph::new(line).style(theme.status), area);
    }
}

pub mod confirm_dialog;
pub mod day_view;
pub mod event_form;
pub mod hit_map;
pub mod mini_calendar;
pub mod month_view;
pub mod status_bar;
pub mod toolbar;

pub use confirm_dialog::ConfirmDialog;
pub use day_view::DayView;
pub use event_form::EventForm;
pub use hit_map::{ClickTarget, HitMap};
pub use mini_calendar::MiniCalendar;
pub use month_view::MonthView;
pub use status_bar::StatusBar;
pub use toolbar::Toolbar;

#[cfg(test)]
pub(crate) mod test_support {
    use ratatui::{backend::TestBackend, buffer::Buffer, Frame, Terminal};

    /// Draw once into an off-screen terminal and return its rows as text.
    pub fn render_lines(width: u16, height: u16, draw: impl FnOnce(&mut Frame)) -> Vec<String> {
        let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
        terminal.draw(draw).unwrap();
        lines(terminal.backend().buffer())
    }

    pub fn lines(buffer: &Buffer) -> Vec<String> {
        let area = buffer.area;
        (area.top()..area.bottom())
            .map(|y| {
                (area.left()..area.right())
                    .map(|x| buffer[(x, y)].symbol())
                    .collect()
            })
            .collect()
    }

    /// Column and row of the first occurrence of `needle`.
    pub fn find(lines: &[String], needle: &str) -> Option<(u16, u16)> {
        lines.iter().enumerate().find_map(|(row, line)| {
            line.find(needle)
                .map(|byte| (line[..byte].chars().count() as u16, row as u16))
        })
    }
}

use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use crate::calendar::event::{format_display_date, parse_date_string, parse_time};
use crate::calendar::{Event, EventDraft};
use crate::theme;

pub const DEFAULT_START_TIME: &str = "09:00";
pub const DEFAULT_END_TIME: &str = "10:00";

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FormField {
    Title,
    Date,
    StartTime,
    EndTime,
    Location,
    Description,
}

impl FormField {
    pub fn next(&self) -> Self {
        match self {
            FormField::Title => FormField::Date,
            FormField::Date => FormField::StartTime,
            FormField::StartTime => FormField::EndTime,
            FormField::EndTime => FormField::Location,
            FormField::Location => FormField::Description,
            FormField::Description => FormField::Title,
        }
    }

    pub fn prev(&self) -> Self {
        match self {
            FormField::Title => FormField::Description,
            FormField::Date => FormField::Title,
            FormField::StartTime => FormField::Date,
            FormField::EndTime => FormField::StartTime,
            FormField::Location => FormField::EndTime,
            FormField::Description => FormField::Location,
        }
    }
}

/// Inline error text, one slot per validated field.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FormErrors {
    pub title: Option<&'static str>,
    pub date: Option<&'static str>,
    pub start_time: Option<&'static str>,
    pub end_time: Option<&'static str>,
}

impl FormErrors {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

#[derive(Debug, Clone)]
pub struct EventFormState {
    /// `Some` when editing an existing event.
    pub event_id: Option<String>,
    pub title: String,
    pub date: String,
    pub start_time: String,
    pub end_time: String,
    pub location: String,
    pub description: String,
    pub active_field: FormField,
    pub errors: FormErrors,
}

impl EventFormState {
    /// Empty form for a new event on `date`.
    pub fn new(date: &str) -> Self {
        Self {
            event_id: None,
            title: String::new(),
            date: date.to_string(),
            start_time: DEFAULT_START_TIME.to_string(),
            end_time: DEFAULT_END_TIME.to_string(),
            location: String::new(),
            description: String::new(),
            active_field: FormField::Title,
            errors: FormErrors::default(),
        }
    }

    pub fn edit(event: &Event) -> Self {
        let draft = event.draft();
        Self {
            event_id: Some(event.id.clone()),
            title: draft.title,
            date: draft.date,
            start_time: draft
                .start_time
                .unwrap_or_else(|| DEFAULT_START_TIME.to_string()),
            end_time: draft
                .end_time
                .unwrap_or_else(|| DEFAULT_END_TIME.to_string()),
            location: draft.location.unwrap_or_default(),
            description: draft.description.unwrap_or_default(),
            active_field: FormField::Title,
            errors: FormErrors::default(),
        }
    }

    pub fn is_edit(&self) -> bool {
        self.event_id.is_some()
    }

    fn active_value(&mut self) -> &mut String {
        match self.active_field {
            FormField::Title => &mut self.title,
            FormField::Date => &mut self.date,
            FormField::StartTime => &mut self.start_time,
            FormField::EndTime => &mut self.end_time,
            FormField::Location => &mut self.location,
            FormField::Description => &mut self.description,
        }
    }

    pub fn input_char(&mut self, c: char) {
        self.active_value().push(c);
        if self.active_field == FormField::Title && !self.title.trim().is_empty() {
            self.errors.title = None;
        }
    }

    pub fn backspace(&mut self) {
        self.active_value().pop();
    }

    pub fn next_field(&mut self) {
        self.active_field = self.active_field.next();
    }

    pub fn prev_field(&mut self) {
        self.active_field = self.active_field.prev();
    }

    /// Check required fields and formats, recording inline errors.
    ///
    /// Returns the draft to save only when every field is valid.
    pub fn validate(&mut self) -> Option<EventDraft> {
        let mut errors = FormErrors::default();

        let title = self.title.trim();
        if title.is_empty() {
            errors.title = Some("Title is required");
        }

        let date = self.date.trim();
        if date.is_empty() {
            errors.date = Some("Date is required");
        } else if parse_date_string(date).is_none() {
            errors.date = Some("Date must be YYYY-MM-DD");
        }

        let start_time = optional(&self.start_time);
        if start_time.as_deref().is_some_and(|t| parse_time(t).is_none()) {
            errors.start_time = Some("Start must be HH:MM");
        }
        let end_time = optional(&self.end_time);
        if end_time.as_deref().is_some_and(|t| parse_time(t).is_none()) {
            errors.end_time = Some("End must be HH:MM");
        }

        let valid = errors.is_empty();
        self.errors = errors;
        if !valid {
            return None;
        }

        Some(EventDraft {
            title: title.to_string(),
            date: date.to_string(),
            start_time,
            end_time,
            location: optional(&self.location),
            description: optional(&self.description),
        })
    }
}

fn optional(value: &str) -> Option<String> {
    let value = value.trim();
    (!value.is_empty()).then(|| value.to_string())
}

pub struct EventForm;

impl EventForm {
    /// Popup rectangle centered in `area`.
    pub fn area(area: Rect) -> Rect {
        let form_w = area.width.clamp(30, 56);
        let form_h = area.height.clamp(10, 17);
        let x = area.x + (area.width.saturating_sub(form_w)) / 2;
        let y = area.y + (area.height.saturating_sub(form_h)) / 2;
        Rect::new(x, y, form_w.min(area.width), form_h.min(area.height))
    }

    pub fn render(frame: &mut Frame, area: Rect, state: &EventFormState) -> Rect {
        let theme = theme::current();
        let form_area = Self::area(area);

        // Clear background
        frame.render_widget(Clear, form_area);

        let title = if state.is_edit() { " Edit Event " } else { " New Event " };
        let block = Block::default()
            .title(title)
            .title_style(theme.accent)
            .borders(Borders::ALL)
            .border_style(theme.accent);

        let inner = block.inner(form_area);
        frame.render_widget(block, form_area);

        let rows = Layout::vertical([
            Constraint::Length(1), // display date
            Constraint::Length(1), // spacer
            Constraint::Length(1), // title
            Constraint::Length(1), // title error
            Constraint::Length(1), // date
            Constraint::Length(1), // date error
            Constraint::Length(1), // start time
            Constraint::Length(1), // end time
            Constraint::Length(1), // time error
            Constraint::Length(1), // location
            Constraint::Length(1), // description
            Constraint::Length(1), // spacer
            Constraint::Length(1), // help
            Constraint::Min(0),
        ])
        .split(inner);

        let display_date = format_display_date(state.date.trim()).unwrap_or_default();
        frame.render_widget(
            Paragraph::new(Span::styled(display_date, theme.header)),
            rows[0],
        );

        let active = state.active_field;
        render_field(frame, rows[2], "Title:", &state.title, active == FormField::Title);
        render_error(frame, rows[3], state.errors.title);
        render_field(frame, rows[4], "Date:", &state.date, active == FormField::Date);
        render_error(frame, rows[5], state.errors.date);
        render_field(frame, rows[6], "Start:", &state.start_time, active == FormField::StartTime);
        render_field(frame, rows[7], "End:", &state.end_time, active == FormField::EndTime);
        render_error(frame, rows[8], state.errors.start_time.or(state.errors.end_time));
        render_field(frame, rows[9], "Where:", &state.location, active == FormField::Location);
        render_field(frame, rows[10], "Notes:", &state.description, active == FormField::Description);

        let mut help = vec![
            Span::styled("Tab", Style::default().add_modifier(Modifier::BOLD)),
            Span::styled(":Next ", theme.dim),
            Span::styled("Enter", Style::default().add_modifier(Modifier::BOLD)),
            Span::styled(":Save ", theme.dim),
            Span::styled("Esc", Style::default().add_modifier(Modifier::BOLD)),
            Span::styled(":Cancel", theme.dim),
        ];
        if state.is_edit() {
            help.push(Span::styled(" ^D", Style::default().add_modifier(Modifier::BOLD)));
            help.push(Span::styled(":Delete", theme.dim));
        }
        frame.render_widget(Paragraph::new(Line::from(help)), rows[12]);

        form_area
    }
}

fn render_field(frame: &mut Frame, area: Rect, label: &str, value: &str, active: bool) {
    let theme = theme::current();
    let cursor = if active { "_" } else { "" };
    let style = if active { theme.accent } else { Style::default() };

    let line = Line::from(vec![
        Span::styled(format!("{:<7}", label), theme.dim),
        Span::styled(format!("{}{}", value, cursor), style),
    ]);
    frame.render_widget(Paragraph::new(line), area);
}

fn render_error(frame: &mut Frame, area: Rect, error: Option<&str>) {
    if let Some(message) = error {
        let line = Line::from(vec![
            Span::raw(" ".repeat(7)),
            Span::styled(message.to_string(), theme::current().error),
        ]);
        frame.render_widget(Paragraph::new(line), area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn type_str(form: &mut EventFormState, s: &str) {
        for c in s.chars() {
            form.input_char(c);
        }
    }

    #[test]
    fn test_new_form_defaults() {
        let form = EventFormState::new("2024-01-05");
        assert!(!form.is_edit());
        assert_eq!(form.start_time, "09:00");
        assert_eq!(form.end_time, "10:00");
        assert_eq!(form.active_field, FormField::Title);
    }

    #[test]
    fn test_missing_required_fields_report_inline_errors() {
        let mut form = EventFormState::new("");
        form.title = "   ".to_string();
        assert_eq!(form.validate(), None);
        assert_eq!(form.errors.title, Some("Title is required"));
        assert_eq!(form.errors.date, Some("Date is required"));
    }

    #[test]
    fn test_malformed_date_and_time_are_rejected() {
        let mut form = EventFormState::new("2024-02-30");
        form.title = "Party".to_string();
        form.start_time = "9am".to_string();
        assert_eq!(form.validate(), None);
        assert_eq!(form.errors.date, Some("Date must be YYYY-MM-DD"));
        assert_eq!(form.errors.start_time, Some("Start must be HH:MM"));
        assert_eq!(form.errors.title, None);
    }

    #[test]
    fn test_valid_form_produces_trimmed_draft() {
        let mut form = EventFormState::new("2024-01-05");
        type_str(&mut form, "  Review  ");
        form.end_time.clear();
        form.location = " HQ ".to_string();
        let draft = form.validate().unwrap();
        assert_eq!(
            draft,
            EventDraft {
                title: "Review".to_string(),
                date: "2024-01-05".to_string(),
                start_time: Some("09:00".to_string()),
                end_time: None,
                location: Some("HQ".to_string()),
                description: None,
            }
        );
        assert!(form.errors.is_empty());
    }

    #[test]
    fn test_typing_title_clears_title_error() {
        let mut form = EventFormState::new("2024-01-05");
        assert!(form.validate().is_none());
        assert!(form.errors.title.is_some());
        form.input_char(' ');
        assert!(form.errors.title.is_some());
        form.input_char('x');
        assert_eq!(form.errors.title, None);
    }

    #[test]
    fn test_edit_prefills_from_event() {
        let event = Event::new(
            "abc".to_string(),
            EventDraft {
                title: "Call".to_string(),
                date: "2024-05-01".to_string(),
                location: Some("Phone".to_string()),
                ..Default::default()
            },
        );
        let form = EventFormState::edit(&event);
        assert_eq!(form.event_id.as_deref(), Some("abc"));
        assert_eq!(form.title, "Call");
        assert_eq!(form.start_time, DEFAULT_START_TIME);
        assert_eq!(form.location, "Phone");
    }

    #[test]
    fn test_field_cycle_round_trips() {
        let mut field = FormField::Title;
        for _ in 0..6 {
            field = field.next();
        }
        assert_eq!(field, FormField::Title);
        assert_eq!(FormField::Title.prev(), FormField::Description);
    }

    #[test]
    fn test_input_goes_to_active_field() {
        let mut form = EventFormState::new("2024-01-05");
        form.next_field();
        form.backspace();
        form.input_char('6');
        assert_eq!(form.date, "2024-01-06");
        form.prev_field();
        form.input_char('A');
        assert_eq!(form.title, "A");
    }
}

use chrono::{Datelike, Duration, Local, NaiveDate};
use log::debug;

use crate::calendar::event::date_string;
use crate::calendar::grid::{days_in_month, is_viewable, normalize_month, viewable_range};
use crate::calendar::{Calendar, Event};
use crate::components::event_form::EventFormState;
use crate::components::{ClickTarget, HitMap};

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputMode {
    Normal,
    Form,
    Confirm,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PendingDelete {
    pub event_id: String,
    pub title: String,
}

/// All state shared by input handling and rendering.
pub struct App {
    pub running: bool,
    pub input_mode: InputMode,
    /// Month shown in the main grid and the mini calendar.
    pub view_year: i32,
    pub view_month0: u32,
    pub selected_date: NaiveDate,
    /// Index of the highlighted event among the selected day's events.
    pub event_cursor: usize,
    pub calendar: Calendar,
    pub form_state: Option<EventFormState>,
    pub pending_delete: Option<PendingDelete>,
    pub status_message: Option<String>,
    pub show_help: bool,
    /// Click regions from the last drawn frame.
    pub hits: HitMap,
}

impl App {
    pub fn new(calendar: Calendar) -> Self {
        Self::with_date(calendar, Local::now().date_naive())
    }

    pub fn with_date(calendar: Calendar, date: NaiveDate) -> Self {
        let (first, last) = viewable_range();
        let date = date.clamp(first, last);
        Self {
            running: true,
            input_mode: InputMode::Normal,
            view_year: date.year(),
            view_month0: date.month0(),
            selected_date: date,
            event_cursor: 0,
            calendar,
            form_state: None,
            pending_delete: None,
            status_message: None,
            show_help: false,
            hits: HitMap::new(),
        }
    }

    pub fn selected_date_string(&self) -> String {
        date_string(self.selected_date)
    }

    pub fn selected_events(&self) -> Vec<&Event> {
        self.calendar.events_on(&self.selected_date_string())
    }

    pub fn active_event(&self) -> Option<&Event> {
        self.selected_events().get(self.event_cursor).copied()
    }

    // ── Navigation ──

    /// Select `date` and show its month. Dates whose month cannot be shown
    /// are pulled in to the nearest one that can.
    pub fn select_date(&mut self, date: NaiveDate) {
        let (first, last) = viewable_range();
        let date = date.clamp(first, last);
        if date != self.selected_date {
            self.event_cursor = 0;
        }
        self.selected_date = date;
        self.view_year = date.year();
        self.view_month0 = date.month0();
    }

    pub fn move_selection(&mut self, days: i64) {
        if let Some(date) = self.selected_date.checked_add_signed(Duration::days(days)) {
            self.select_date(date);
        }
    }

    /// Show the month `delta` months away, keeping the day of month where possible.
    pub fn navigate_month(&mut self, delta: i32) {
        let (year, month0) = normalize_month(self.view_year, self.view_month0 as i32 + delta);
        let in_range = NaiveDate::from_ymd_opt(year, month0 + 1, 1).is_some_and(is_viewable);
        if !in_range {
            return;
        }
        let day = self
            .selected_date
            .day()
            .min(days_in_month(year, month0 as i32));
        if let Some(date) = NaiveDate::from_ymd_opt(year, month0 + 1, day) {
            self.select_date(date);
        }
    }

    pub fn go_to_today(&mut self) {
        self.select_date(Local::now().date_naive());
    }

    pub fn next_event(&mut self) {
        let count = self.selected_events().len();
        if count > 0 {
            self.event_cursor = (self.event_cursor + 1) % count;
        }
    }

    pub fn prev_event(&mut self) {
        let count = self.selected_events().len();
        if count > 0 {
            self.event_cursor = (self.event_cursor + count - 1) % count;
        }
    }

    fn clamp_cursor(&mut self) {
        let count = self.selected_events().len();
        self.event_cursor = self.event_cursor.min(count.saturating_sub(1));
    }

    // ── Form ──

    pub fn open_create_form(&mut self, date: &str) {
        self.form_state = Some(EventFormState::new(date));
        self.input_mode = InputMode::Form;
    }

    pub fn open_create_for_selected(&mut self) {
        let date = self.selected_date_string();
        self.open_create_form(&date);
    }

    pub fn open_create_for_today(&mut self) {
        let date = date_string(Local::now().date_naive());
        self.open_create_form(&date);
    }

    pub fn open_edit_form(&mut self, id: &str) {
        match self.calendar.get(id) {
            Some(event) => {
                self.form_state = Some(EventFormState::edit(event));
                self.input_mode = InputMode::Form;
            }
            None => debug!("event=open_edit status=not_found id={}", id),
        }
    }

    /// Enter: edit the highlighted event, or start a new one on an empty day.
    pub fn open_selected(&mut self) {
        match self.active_event().map(|e| e.id.clone()) {
            Some(id) => self.open_edit_form(&id),
            None => self.open_create_for_selected(),
        }
    }

    pub fn close_form(&mut self) {
        self.form_state = None;
        self.input_mode = InputMode::Normal;
    }

    /// Validate and save the open form. Invalid input keeps the form open
    /// with inline errors and changes nothing.
    pub fn submit_form(&mut self) {
        let Some(form) = self.form_state.as_mut() else {
            return;
        };
        let Some(draft) = form.validate() else {
            return;
        };

        match form.event_id.clone() {
            Some(id) => {
                if self.calendar.update(&id, draft) {
                    self.status_message = Some("Event updated".to_string());
                }
            }
            None => {
                self.calendar.add(draft);
                self.status_message = Some("Event created".to_string());
            }
        }
        self.close_form();
        self.clamp_cursor();
    }

    pub fn form_input_char(&mut self, c: char) {
        if let Some(ref mut form) = self.form_state {
            form.input_char(c);
        }
    }

    pub fn form_backspace(&mut self) {
        if let Some(ref mut form) = self.form_state {
            form.backspace();
        }
    }

    pub fn form_tab(&mut self) {
        if let Some(ref mut form) = self.form_state {
            form.next_field();
        }
    }

    pub fn form_backtab(&mut self) {
        if let Some(ref mut form) = self.form_state {
            form.prev_field();
        }
    }

    // ── Delete ──

    fn request_delete(&mut self, id: &str) {
        if let Some(event) = self.calendar.get(id) {
            self.pending_delete = Some(PendingDelete {
                event_id: event.id.clone(),
                title: event.title.clone(),
            });
            self.input_mode = InputMode::Confirm;
        }
    }

    /// Ask to delete the highlighted event of the selected day.
    pub fn request_delete_selected(&mut self) {
        if let Some(id) = self.active_event().map(|e| e.id.clone()) {
            self.request_delete(&id);
        }
    }

    /// Ask to delete the event open in the edit form.
    pub fn request_delete_from_form(&mut self) {
        if let Some(id) = self.form_state.as_ref().and_then(|f| f.event_id.clone()) {
            self.request_delete(&id);
        }
    }

    pub fn confirm_delete(&mut self) {
        if let Some(pending) = self.pending_delete.take() {
            self.calendar.delete(&pending.event_id);
            self.status_message = Some(format!("Deleted \"{}\"", pending.title));
        }
        self.close_form();
        self.clamp_cursor();
    }

    /// Back out of the prompt to whatever surface asked for it.
    pub fn cancel_delete(&mut self) {
        self.pending_delete = None;
        self.input_mode = if self.form_state.is_some() {
            InputMode::Form
        } else {
            InputMode::Normal
        };
    }

    // ── Mouse ──

    pub fn handle_click(&mut self, column: u16, row: u16) {
        if let Some(overlay) = self.hits.overlay() {
            let inside = overlay.contains(ratatui::layout::Position::new(column, row));
            if !inside {
                match self.input_mode {
                    InputMode::Form => self.close_form(),
                    InputMode::Confirm => self.cancel_delete(),
                    InputMode::Normal => {}
                }
            }
            return;
        }

        let Some(target) = self.hits.target_at(column, row).cloned() else {
            return;
        };
        match target {
            ClickTarget::Chip(id) => {
                if let Some(date) = self
                    .calendar
                    .get(&id)
                    .and_then(|e| crate::calendar::event::parse_date_string(&e.date))
                {
                    self.select_date(date);
                    self.event_cursor = self
                        .selected_events()
                        .iter()
                        .position(|e| e.id == id)
                        .unwrap_or(0);
                }
                self.open_edit_form(&id);
            }
            ClickTarget::Cell(date) => {
                self.select_date(date);
                self.open_create_for_selected();
            }
            ClickTarget::MiniDay(date) => self.select_date(date),
            ClickTarget::PrevMonth => self.navigate_month(-1),
            ClickTarget::NextMonth => self.navigate_month(1),
            ClickTarget::Today => self.go_to_today(),
            ClickTarget::Create => self.open_create_for_today(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::{EventDraft, Store};
    use pretty_assertions::assert_eq;
    use ratatui::layout::Rect;
    use tempfile::TempDir;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn app_on(day: NaiveDate) -> (TempDir, App) {
        let dir = tempfile::tempdir().unwrap();
        let calendar = Calendar::open(Store::new(dir.path().join("events.json")));
        (dir, App::with_date(calendar, day))
    }

    fn add(app: &mut App, title: &str, date: &str) -> String {
        app.calendar.add(EventDraft {
            title: title.to_string(),
            date: date.to_string(),
            ..Default::default()
        })
    }

    fn type_str(app: &mut App, s: &str) {
        for c in s.chars() {
            app.form_input_char(c);
        }
    }

    #[test]
    fn test_create_through_form() {
        let (_dir, mut app) = app_on(date(2024, 1, 5));
        app.open_create_for_selected();
        assert_eq!(app.input_mode, InputMode::Form);
        type_str(&mut app, "Standup");
        app.submit_form();

        assert_eq!(app.input_mode, InputMode::Normal);
        assert!(app.form_state.is_none());
        let titles: Vec<&str> = app.selected_events().iter().map(|e| e.title.as_str()).collect();
        assert_eq!(titles, vec!["Standup"]);
        assert_eq!(app.selected_events()[0].start_time.as_deref(), Some("09:00"));
    }

    #[test]
    fn test_invalid_submit_keeps_form_and_state() {
        let (_dir, mut app) = app_on(date(2024, 1, 5));
        app.open_create_for_selected();
        app.submit_form();

        assert_eq!(app.input_mode, InputMode::Form);
        let form = app.form_state.as_ref().unwrap();
        assert_eq!(form.errors.title, Some("Title is required"));
        assert!(app.calendar.events().is_empty());
    }

    #[test]
    fn test_edit_through_form_keeps_id() {
        let (_dir, mut app) = app_on(date(2024, 1, 5));
        let id = add(&mut app, "Draft", "2024-01-05");
        app.open_selected();
        assert_eq!(app.form_state.as_ref().unwrap().event_id.as_deref(), Some(id.as_str()));

        type_str(&mut app, " v2");
        app.submit_form();
        assert_eq!(app.calendar.events().len(), 1);
        assert_eq!(app.calendar.get(&id).unwrap().title, "Draft v2");
        assert_eq!(app.status_message.as_deref(), Some("Event updated"));
    }

    #[test]
    fn test_update_of_vanished_event_reports_nothing() {
        let (_dir, mut app) = app_on(date(2024, 1, 5));
        let id = add(&mut app, "Fleeting", "2024-01-05");
        app.open_edit_form(&id);
        app.calendar.delete(&id);

        app.submit_form();
        assert!(app.form_state.is_none());
        assert_eq!(app.status_message, None);
        assert!(app.calendar.events().is_empty());
    }

    #[test]
    fn test_enter_on_empty_day_opens_create() {
        let (_dir, mut app) = app_on(date(2024, 1, 5));
        app.open_selected();
        let form = app.form_state.as_ref().unwrap();
        assert!(!form.is_edit());
        assert_eq!(form.date, "2024-01-05");
    }

    #[test]
    fn test_escape_discards_form() {
        let (_dir, mut app) = app_on(date(2024, 1, 5));
        app.open_create_for_selected();
        type_str(&mut app, "Nope");
        app.close_form();
        assert!(app.calendar.events().is_empty());
        assert_eq!(app.input_mode, InputMode::Normal);
    }

    #[test]
    fn test_delete_requires_confirmation() {
        let (_dir, mut app) = app_on(date(2024, 1, 5));
        let id = add(&mut app, "Gone", "2024-01-05");
        app.open_edit_form(&id);
        app.request_delete_from_form();
        assert_eq!(app.input_mode, InputMode::Confirm);
        assert!(app.calendar.get(&id).is_some());

        app.confirm_delete();
        assert!(app.calendar.get(&id).is_none());
        assert!(app.form_state.is_none());
        assert_eq!(app.input_mode, InputMode::Normal);
    }

    #[test]
    fn test_cancel_delete_returns_to_form() {
        let (_dir, mut app) = app_on(date(2024, 1, 5));
        let id = add(&mut app, "Stay", "2024-01-05");
        app.open_edit_form(&id);
        app.request_delete_from_form();
        app.cancel_delete();
        assert_eq!(app.input_mode, InputMode::Form);
        assert!(app.pending_delete.is_none());
        assert!(app.calendar.get(&id).is_some());
    }

    #[test]
    fn test_delete_from_agenda_uses_cursor() {
        let (_dir, mut app) = app_on(date(2024, 1, 5));
        add(&mut app, "First", "2024-01-05");
        let second = add(&mut app, "Second", "2024-01-05");
        app.next_event();
        app.request_delete_selected();
        assert_eq!(app.pending_delete.as_ref().unwrap().event_id, second);
        app.confirm_delete();
        assert_eq!(app.calendar.events().len(), 1);
        assert_eq!(app.event_cursor, 0);
    }

    #[test]
    fn test_event_cursor_wraps() {
        let (_dir, mut app) = app_on(date(2024, 1, 5));
        add(&mut app, "A", "2024-01-05");
        add(&mut app, "B", "2024-01-05");
        app.prev_event();
        assert_eq!(app.event_cursor, 1);
        app.next_event();
        assert_eq!(app.event_cursor, 0);
    }

    #[test]
    fn test_navigate_month_crosses_years_and_clamps_day() {
        let (_dir, mut app) = app_on(date(2024, 1, 31));
        app.navigate_month(-1);
        assert_eq!(app.selected_date, date(2023, 12, 31));
        assert_eq!((app.view_year, app.view_month0), (2023, 11));

        app.navigate_month(2);
        assert_eq!(app.selected_date, date(2024, 2, 29));
        assert_eq!((app.view_year, app.view_month0), (2024, 1));
    }

    #[test]
    fn test_navigation_stops_at_the_last_showable_month() {
        let (first, last) = viewable_range();

        let (_dir, mut app) = app_on(NaiveDate::MAX);
        assert_eq!(app.selected_date, last);
        app.navigate_month(1);
        assert_eq!(app.selected_date, last);
        app.move_selection(7);
        assert_eq!(app.selected_date, last);

        let (_dir, mut app) = app_on(NaiveDate::MIN);
        assert_eq!(app.selected_date, first);
        app.navigate_month(-1);
        assert_eq!(app.selected_date, first);
        assert_eq!((app.view_year, app.view_month0), (first.year(), first.month0()));
    }

    #[test]
    fn test_move_selection_follows_month() {
        let (_dir, mut app) = app_on(date(2024, 12, 30));
        app.move_selection(7);
        assert_eq!(app.selected_date, date(2025, 1, 6));
        assert_eq!((app.view_year, app.view_month0), (2025, 0));
    }

    #[test]
    fn test_chip_click_edits_instead_of_creating() {
        let (_dir, mut app) = app_on(date(2024, 1, 1));
        let id = add(&mut app, "Chip", "2024-01-05");
        app.hits.push(Rect::new(0, 0, 10, 4), ClickTarget::Cell(date(2024, 1, 5)));
        app.hits.push(Rect::new(0, 1, 10, 1), ClickTarget::Chip(id.clone()));

        app.handle_click(2, 1);
        let form = app.form_state.as_ref().unwrap();
        assert_eq!(form.event_id.as_deref(), Some(id.as_str()));
        assert_eq!(app.selected_date, date(2024, 1, 5));
    }

    #[test]
    fn test_cell_click_opens_create_for_that_date() {
        let (_dir, mut app) = app_on(date(2024, 1, 1));
        app.hits.push(Rect::new(0, 0, 10, 4), ClickTarget::Cell(date(2024, 2, 3)));
        app.handle_click(2, 3);
        let form = app.form_state.as_ref().unwrap();
        assert!(!form.is_edit());
        assert_eq!(form.date, "2024-02-03");
    }

    #[test]
    fn test_click_outside_overlay_cancels_form() {
        let (_dir, mut app) = app_on(date(2024, 1, 1));
        app.open_create_for_selected();
        app.hits.set_overlay(Rect::new(10, 10, 20, 10));

        app.handle_click(15, 15);
        assert_eq!(app.input_mode, InputMode::Form);

        app.handle_click(1, 1);
        assert_eq!(app.input_mode, InputMode::Normal);
        assert!(app.form_state.is_none());
    }

    #[test]
    fn test_mini_day_click_only_selects() {
        let (_dir, mut app) = app_on(date(2024, 1, 1));
        app.hits.push(Rect::new(0, 0, 3, 1), ClickTarget::MiniDay(date(2024, 2, 9)));
        app.handle_click(1, 0);
        assert_eq!(app.selected_date, date(2024, 2, 9));
        assert_eq!(app.input_mode, InputMode::Normal);
    }
}

mod app;
mod calendar;
mod components;
mod config;
mod event;
mod logging;
mod theme;
mod tui;

use std::time::Duration;

use app::{App, InputMode};
use calendar::{Calendar, Store};
use clap::Parser;
use color_eyre::Result;
use components::HitMap;
use config::{Cli, Config, Settings};
use crossterm::event::{KeyCode, KeyModifiers};
use event::Input;
use ratatui::layout::{Constraint, Layout, Rect};

fn main() -> Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();
    let config = Config::load(cli.config.as_deref())?;
    let settings = Settings::resolve(cli, config)?;

    let _logger = logging::init(&settings.log_level, &settings.log_dir)?;
    theme::install(settings.theme.clone());

    let calendar = Calendar::open(Store::new(&settings.data_file));
    let mut app = App::new(calendar);

    tui::install_panic_hook();
    let mut terminal = tui::init()?;
    let result = run(&mut terminal, &mut app);
    tui::restore()?;
    log::info!("event=app_exit status={}", if result.is_ok() { "ok" } else { "error" });
    result
}

fn run(terminal: &mut tui::Tui, app: &mut App) -> Result<()> {
    while app.running {
        terminal.draw(|frame| {
            let mut hits = HitMap::new();
            draw(frame, app, &mut hits);
            app.hits = hits;
        })?;

        let Some(input) = event::next_input(Duration::from_millis(250))? else {
            continue;
        };

        match input {
            Input::Resize => {}
            Input::Click { column, row } => {
                app.status_message = None;
                if app.show_help {
                    app.show_help = false;
                } else {
                    app.handle_click(column, row);
                }
            }
            Input::Key(key) => {
                // Clear status message on any key
                app.status_message = None;

                // Help overlay takes priority
                if app.show_help {
                    if matches!(key.code, KeyCode::Esc | KeyCode::Char('?') | KeyCode::Char('q')) {
                        app.show_help = false;
                    }
                    continue;
                }

                match app.input_mode {
                    InputMode::Form => handle_form_input(app, key.code, key.modifiers),
                    InputMode::Confirm => handle_confirm_input(app, key.code),
                    InputMode::Normal => handle_normal_input(app, key.code, key.modifiers),
                }
            }
        }
    }

    Ok(())
}

fn draw(frame: &mut ratatui::Frame, app: &App, hits: &mut HitMap) {
    let area = frame.area();

    // Toolbar + content + status bar
    let layout = Layout::vertical([
        Constraint::Length(1),
        Constraint::Min(1),
        Constraint::Length(1),
    ])
    .split(area);

    components::Toolbar::render(frame, layout[0], app.view_year, app.view_month0, hits);
    render_content(frame, layout[1], app, hits);

    // Overlays replace the click map: only they react while open
    if let Some(ref form) = app.form_state {
        let form_area = components::EventForm::render(frame, area, form);
        hits.set_overlay(form_area);
    }
    if let Some(ref pending) = app.pending_delete {
        let dialog_area = components::ConfirmDialog::render(frame, area, &pending.title);
        hits.set_overlay(dialog_area);
    }
    if app.show_help {
        render_help(frame, area);
    }

    components::StatusBar::render(
        frame,
        layout[2],
        app.input_mode,
        app.status_message.as_deref(),
        app.calendar.is_unsaved(),
    );
}

fn render_content(frame: &mut ratatui::Frame, area: Rect, app: &App, hits: &mut HitMap) {
    let active_id = app.active_event().map(|e| e.id.clone());

    if area.width < 60 {
        components::MonthView::render(
            frame,
            area,
            app.view_year,
            app.view_month0,
            app.selected_date,
            app.calendar.events(),
            active_id.as_deref(),
            hits,
        );
        return;
    }

    let columns = Layout::horizontal([
        Constraint::Length(components::MiniCalendar::WIDTH + 2),
        Constraint::Min(30),
    ])
    .split(area);
    let sidebar = Layout::vertical([Constraint::Length(10), Constraint::Min(3)]).split(columns[0]);

    components::MiniCalendar::render(
        frame,
        sidebar[0],
        app.view_year,
        app.view_month0,
        app.selected_date,
        hits,
    );
    components::DayView::render(
        frame,
        sidebar[1],
        app.selected_date,
        &app.selected_events(),
        app.event_cursor,
        hits,
    );
    components::MonthView::render(
        frame,
        columns[1],
        app.view_year,
        app.view_month0,
        app.selected_date,
        app.calendar.events(),
        active_id.as_deref(),
        hits,
    );
}

fn handle_normal_input(app: &mut App, code: KeyCode, modifiers: KeyModifiers) {
    match (code, modifiers) {
        (KeyCode::Char('q'), _) | (KeyCode::Char('c'), KeyModifiers::CONTROL) => {
            app.running = false;
        }
        (KeyCode::Left, _) | (KeyCode::Char('h'), _) => app.move_selection(-1),
        (KeyCode::Right, _) | (KeyCode::Char('l'), _) => app.move_selection(1),
        (KeyCode::Up, _) | (KeyCode::Char('k'), _) => app.move_selection(-7),
        (KeyCode::Down, _) | (KeyCode::Char('j'), _) => app.move_selection(7),
        (KeyCode::Char('['), _) => app.navigate_month(-1),
        (KeyCode::Char(']'), _) => app.navigate_month(1),
        (KeyCode::Char('t'), _) => app.go_to_today(),
        (KeyCode::Char('n'), _) => app.open_create_for_selected(),
        (KeyCode::Char('c'), _) => app.open_create_for_today(),
        (KeyCode::Tab, _) => app.next_event(),
        (KeyCode::BackTab, _) => app.prev_event(),
        (KeyCode::Enter, _) => app.open_selected(),
        (KeyCode::Char('d'), _) => app.request_delete_selected(),
        (KeyCode::Char('?'), _) => app.show_help = true,
        _ => {}
    }
}

fn handle_form_input(app: &mut App, code: KeyCode, modifiers: KeyModifiers) {
    match (code, modifiers) {
        (KeyCode::Esc, _) => app.close_form(),
        (KeyCode::Enter, _) => app.submit_form(),
        (KeyCode::Char('d'), KeyModifiers::CONTROL) => app.request_delete_from_form(),
        (KeyCode::Tab, _) => app.form_tab(),
        (KeyCode::BackTab, _) => app.form_backtab(),
        (KeyCode::Backspace, _) => app.form_backspace(),
        (KeyCode::Char(c), m) if !m.contains(KeyModifiers::CONTROL) => app.form_input_char(c),
        _ => {}
    }
}

fn handle_confirm_input(app: &mut App, code: KeyCode) {
    match code {
        KeyCode::Char('y') | KeyCode::Char('Y') => app.confirm_delete(),
        KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => app.cancel_delete(),
        _ => {}
    }
}

fn render_help(frame: &mut ratatui::Frame, area: Rect) {
    use ratatui::style::{Modifier, Style};
    use ratatui::text::{Line, Span};
    use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};

    let theme = theme::current();
    let popup_w = area.width.clamp(30, 52).min(area.width);
    let popup_h = area.height.clamp(12, 24).min(area.height);
    let x = area.x + (area.width.saturating_sub(popup_w)) / 2;
    let y = area.y + (area.height.saturating_sub(popup_h)) / 2;
    let popup_area = Rect::new(x, y, popup_w, popup_h);

    frame.render_widget(Clear, popup_area);

    let block = Block::default()
        .title(" Keybindings ")
        .title_style(theme.accent)
        .title_bottom(Line::from(Span::styled(format!(" theme: {} ", theme.name), theme.dim)))
        .borders(Borders::ALL)
        .border_style(theme.accent);

    let inner = block.inner(popup_area);
    frame.render_widget(block, popup_area);

    let key_style = theme.accent;
    let desc_style = Style::default();
    let section_style = Style::default().add_modifier(Modifier::BOLD | Modifier::UNDERLINED);

    let entry = |keys: &'static str, desc: &'static str| {
        Line::from(vec![
            Span::styled(format!("  {:<10}", keys), key_style),
            Span::styled(desc, desc_style),
        ])
    };

    let lines = vec![
        Line::from(Span::styled("Navigation", section_style)),
        entry("h/l", "Previous/next day"),
        entry("j/k", "Next/previous week"),
        entry("[/]", "Previous/next month"),
        entry("t", "Jump to today"),
        Line::from(""),
        Line::from(Span::styled("Events", section_style)),
        entry("n", "New event on selected day"),
        entry("c", "New event today"),
        entry("Tab", "Highlight next event"),
        entry("Enter", "Edit highlighted / new"),
        entry("d", "Delete highlighted event"),
        entry("^D", "Delete (in edit form)"),
        Line::from(""),
        Line::from(Span::styled("Mouse", section_style)),
        entry("cell", "New event on that day"),
        entry("chip", "Edit that event"),
        Line::from(""),
        Line::from(vec![
            Span::styled("  q", key_style),
            Span::styled(" / ", theme.dim),
            Span::styled("Esc      ", key_style),
            Span::styled("Quit / close popup", desc_style),
        ]),
    ];

    let para = Paragraph::new(lines).wrap(Wrap { trim: false });
    frame.render_widget(para, inner);
}

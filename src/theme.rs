use std::sync::OnceLock;

use ratatui::style::{Color, Modifier, Style};
use serde::Deserialize;

static THEME: OnceLock<Theme> = OnceLock::new();

/// Install the theme for the session. Later calls are ignored.
pub fn install(theme: Theme) {
    let _ = THEME.set(theme);
}

/// Get the active theme (the default preset if none was installed).
pub fn current() -> &'static Theme {
    THEME.get_or_init(Theme::default)
}

#[derive(Debug, Clone, PartialEq)]
pub struct Theme {
    pub name: String,
    pub today: Style,
    pub selected: Style,
    pub other_month: Style,
    pub chip: Style,
    pub chip_active: Style,
    pub header: Style,
    pub dim: Style,
    pub border: Style,
    pub status: Style,
    pub error: Style,
    pub accent: Style,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            name: "default".to_string(),
            today: Style::default().fg(Color::Black).bg(Color::Yellow),
            selected: Style::default().fg(Color::Black).bg(Color::Cyan),
            other_month: Style::default().fg(Color::DarkGray),
            chip: Style::default().fg(Color::White).bg(Color::Blue),
            chip_active: Style::default()
                .fg(Color::Black)
                .bg(Color::LightBlue)
                .add_modifier(Modifier::BOLD),
            header: Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
            dim: Style::default().fg(Color::DarkGray),
            border: Style::default().fg(Color::Gray),
            status: Style::default().fg(Color::White).bg(Color::DarkGray),
            error: Style::default().fg(Color::LightRed),
            accent: Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
        }
    }
}

impl Theme {
    /// Get a built-in preset by name.
    pub fn preset(name: &str) -> Self {
        match name {
            "dracula" => Self::dracula(),
            "gruvbox" => Self::gruvbox(),
            "nord" => Self::nord(),
            _ => Self::default(),
        }
    }

    fn from_palette(name: &str, fg: Color, bg: Color, today: Color, accent: Color, dim: Color) -> Self {
        Self {
            name: name.to_string(),
            today: Style::default().fg(Color::Black).bg(today),
            selected: Style::default().fg(Color::Black).bg(accent),
            other_month: Style::default().fg(dim),
            chip: Style::default().fg(fg).bg(bg),
            chip_active: Style::default()
                .fg(Color::Black)
                .bg(accent)
                .add_modifier(Modifier::BOLD),
            header: Style::default().fg(fg).add_modifier(Modifier::BOLD),
            dim: Style::default().fg(dim),
            border: Style::default().fg(bg),
            status: Style::default().fg(fg).bg(bg),
            error: Style::default().fg(Color::LightRed),
            accent: Style::default().fg(accent).add_modifier(Modifier::BOLD),
        }
    }

    fn dracula() -> Self {
        Self::from_palette(
            "dracula",
            Color::Rgb(248, 248, 242),
            Color::Rgb(68, 71, 90),
            Color::Rgb(189, 147, 249), // purple
            Color::Rgb(139, 233, 253), // cyan
            Color::Rgb(98, 114, 164),
        )
    }

    fn gruvbox() -> Self {
        Self::from_palette(
            "gruvbox",
            Color::Rgb(235, 219, 178),
            Color::Rgb(80, 73, 69),
            Color::Rgb(250, 189, 47),  // yellow
            Color::Rgb(131, 165, 152), // aqua
            Color::Rgb(146, 131, 116),
        )
    }

    fn nord() -> Self {
        Self::from_palette(
            "nord",
            Color::Rgb(229, 233, 240),
            Color::Rgb(67, 76, 94),
            Color::Rgb(235, 203, 139), // yellow
            Color::Rgb(136, 192, 208), // frost
            Color::Rgb(76, 86, 106),
        )
    }
}

// ── TOML config types ──

/// `[theme]` table of the config file.
#[derive(Debug, Deserialize, Default, Clone)]
#[serde(default)]
pub struct ThemeConfig {
    pub preset: Option<String>,
    pub today_fg: Option<String>,
    pub today_bg: Option<String>,
    pub selected_fg: Option<String>,
    pub selected_bg: Option<String>,
    pub chip_fg: Option<String>,
    pub chip_bg: Option<String>,
    pub other_month_fg: Option<String>,
    pub status_fg: Option<String>,
    pub status_bg: Option<String>,
}

impl ThemeConfig {
    pub fn into_theme(self) -> Theme {
        let mut theme = self
            .preset
            .as_deref()
            .map(Theme::preset)
            .unwrap_or_default();

        if let Some(c) = self.today_fg.as_deref().and_then(parse_color) {
            theme.today = theme.today.fg(c);
        }
        if let Some(c) = self.selected_fg.as_deref().and_then(parse_color) {
            theme.selected = theme.selected.fg(c);
        }
        if let Some(c) = self.chip_fg.as_deref().and_then(parse_color) {
            theme.chip = theme.chip.fg(c);
        }
        if let Some(c) = self.other_month_fg.as_deref().and_then(parse_color) {
            theme.other_month = theme.other_month.fg(c);
        }
        if let Some(c) = self.status_fg.as_deref().and_then(parse_color) {
            theme.status = theme.status.fg(c);
        }
        if let Some(c) = self.today_bg.as_deref().and_then(parse_color) {
            theme.today = theme.today.bg(c);
        }
        if let Some(c) = self.selected_bg.as_deref().and_then(parse_color) {
            theme.selected = theme.selected.bg(c);
        }
        if let Some(c) = self.chip_bg.as_deref().and_then(parse_color) {
            theme.chip = theme.chip.bg(c);
        }
        if let Some(c) = self.status_bg.as_deref().and_then(parse_color) {
            theme.status = theme.status.bg(c);
        }

        theme
    }
}

/// Parse a color string: hex "#rrggbb", or named colors.
fn parse_color(s: &str) -> Option<Color> {
    let s = s.trim();
    if s.starts_with('#') && s.len() == 7 {
        let r = u8::from_str_radix(&s[1..3], 16).ok()?;
        let g = u8::from_str_radix(&s[3..5], 16).ok()?;
        let b = u8::from_str_radix(&s[5..7], 16).ok()?;
        return Some(Color::Rgb(r, g, b));
    }
    match s.to_lowercase().as_str() {
        "black" => Some(Color::Black),
        "red" => Some(Color::Red),
        "green" => Some(Color::Green),
        "yellow" => Some(Color::Yellow),
        "blue" => Some(Color::Blue),
        "magenta" => Some(Color::Magenta),
        "cyan" => Some(Color::Cyan),
        "white" => Some(Color::White),
        "gray" | "grey" => Some(Color::Gray),
        "darkgray" | "darkgrey" => Some(Color::DarkGray),
        "lightred" => Some(Color::LightRed),
        "lightgreen" => Some(Color::LightGreen),
        "lightyellow" => Some(Color::LightYellow),
        "lightblue" => Some(Color::LightBlue),
        "lightmagenta" => Some(Color::LightMagenta),
        "lightcyan" => Some(Color::LightCyan),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_color() {
        assert_eq!(parse_color("#ff5500"), Some(Color::Rgb(255, 85, 0)));
        assert_eq!(parse_color(" Cyan "), Some(Color::Cyan));
        assert_eq!(parse_color("#ff55"), None);
        assert_eq!(parse_color("#gg0000"), None);
        assert_eq!(parse_color("chartreuse"), None);
    }

    #[test]
    fn test_unknown_preset_falls_back_to_default() {
        assert_eq!(Theme::preset("solarized"), Theme::default());
        assert_eq!(Theme::preset("nord").name, "nord");
    }

    #[test]
    fn test_overrides_apply_on_top_of_preset() {
        let theme = ThemeConfig {
            preset: Some("gruvbox".to_string()),
            today_bg: Some("#010203".to_string()),
            chip_fg: Some("red".to_string()),
            ..Default::default()
        }
        .into_theme();
        assert_eq!(theme.name, "gruvbox");
        assert_eq!(theme.today.bg, Some(Color::Rgb(1, 2, 3)));
        assert_eq!(theme.chip.fg, Some(Color::Red));
        assert_eq!(theme.selected, Theme::preset("gruvbox").selected);
    }
}

use chrono::NaiveDate;
use ratatui::layout::{Position, Rect};

/// Something on screen that reacts to a mouse click.
#[derive(Debug, Clone, PartialEq)]
pub enum ClickTarget {
    /// An event chip; opens the edit form.
    Chip(String),
    /// A main-grid day cell; opens the create form for that date.
    Cell(NaiveDate),
    /// A mini-calendar day; selects the date.
    MiniDay(NaiveDate),
    PrevMonth,
    NextMonth,
    Today,
    Create,
}

/// Clickable regions collected while drawing a frame.
#[derive(Debug, Default)]
pub struct HitMap {
    regions: Vec<(Rect, ClickTarget)>,
    overlay: Option<Rect>,
}

impl HitMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, area: Rect, target: ClickTarget) {
        self.regions.push((area, target));
    }

    /// Mark a modal surface; while set, clicks resolve against it only.
    pub fn set_overlay(&mut self, area: Rect) {
        self.overlay = Some(area);
    }

    pub fn overlay(&self) -> Option<Rect> {
        self.overlay
    }

    #[cfg(test)]
    pub fn regions(&self) -> &[(Rect, ClickTarget)] {
        &self.regions
    }

    /// The target under `(column, row)`.
    ///
    /// Chips sit inside day cells and win over them, so a chip click never
    /// reaches the cell underneath.
    pub fn target_at(&self, column: u16, row: u16) -> Option<&ClickTarget> {
        let pos = Position::new(column, row);
        let mut fallback = None;
        for (area, target) in &self.regions {
            if !area.contains(pos) {
                continue;
            }
            if matches!(target, ClickTarget::Chip(_)) {
                return Some(target);
            }
            fallback.get_or_insert(target);
        }
        fallback
    }
}

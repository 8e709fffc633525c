use log::{debug, error, info};

use super::event::{events_on_date, generate_id, Event, EventDraft};
use super::store::Store;

/// In-memory event list mirrored to a [`Store`].
///
/// The list is the source of truth. Every mutation rewrites the store; a
/// failed write is logged and leaves the calendar marked unsaved until the
/// next successful one.
pub struct Calendar {
    events: Vec<Event>,
    store: Store,
    unsaved: bool,
}

impl Calendar {
    pub fn open(store: Store) -> Self {
        let events = store.load();
        Self {
            events,
            store,
            unsaved: false,
        }
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    pub fn events_on(&self, date: &str) -> Vec<&Event> {
        events_on_date(&self.events, date)
    }

    pub fn get(&self, id: &str) -> Option<&Event> {
        self.events.iter().find(|e| e.id == id)
    }

    pub fn is_unsaved(&self) -> bool {
        self.unsaved
    }

    /// Append a new event and return its id.
    pub fn add(&mut self, draft: EventDraft) -> String {
        let id = generate_id();
        self.events.push(Event::new(id.clone(), draft));
        info!("event=event_add id={}", id);
        self.persist();
        id
    }

    /// Replace the fields of the first event with `id`. Unknown ids are ignored.
    pub fn update(&mut self, id: &str, draft: EventDraft) -> bool {
        match self.events.iter_mut().find(|e| e.id == id) {
            Some(event) => {
                event.apply(draft);
                info!("event=event_update id={}", id);
                self.persist();
                true
            }
            None => {
                debug!("event=event_update status=not_found id={}", id);
                false
            }
        }
    }

    /// Remove every event with `id`, returning how many were removed.
    pub fn delete(&mut self, id: &str) -> usize {
        let before = self.events.len();
        self.events.retain(|e| e.id != id);
        let removed = before - self.events.len();
        if removed > 0 {
            info!("event=event_delete id={} removed={}", id, removed);
            self.persist();
        } else {
            debug!("event=event_delete status=not_found id={}", id);
        }
        removed
    }

    fn persist(&mut self) {
        match self.store.save(&self.events) {
            Ok(()) => self.unsaved = false,
            Err(err) => {
                error!(
                    "event=store_save status=error path={} error={}",
                    self.store.path().display(),
                    err
                );
                self.unsaved = true;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    fn open_temp() -> (TempDir, Calendar) {
        let dir = tempfile::tempdir().unwrap();
        let calendar = Calendar::open(Store::new(dir.path().join("events.json")));
        (dir, calendar)
    }

    fn draft(title: &str, date: &str) -> EventDraft {
        EventDraft {
            title: title.to_string(),
            date: date.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_add_then_reload_round_trip() {
        let (dir, mut calendar) = open_temp();
        let input = EventDraft {
            title: "Dentist".to_string(),
            date: "2024-03-14".to_string(),
            start_time: Some("08:30".to_string()),
            end_time: Some("09:15".to_string()),
            location: Some("Main St".to_string()),
            description: Some("Bring forms".to_string()),
        };
        let id = calendar.add(input.clone());
        assert!(!calendar.is_unsaved());

        let reloaded = Calendar::open(Store::new(dir.path().join("events.json")));
        assert_eq!(reloaded.events().len(), 1);
        let event = &reloaded.events()[0];
        assert_eq!(event.id, id);
        assert_eq!(event.draft(), input);
    }

    #[test]
    fn test_add_assigns_distinct_ids() {
        let (_dir, mut calendar) = open_temp();
        let a = calendar.add(draft("A", "2024-01-01"));
        let b = calendar.add(draft("B", "2024-01-01"));
        assert_ne!(a, b);
    }

    #[test]
    fn test_events_on_keeps_insertion_order() {
        let (_dir, mut calendar) = open_temp();
        calendar.add(draft("A", "2024-01-05"));
        calendar.add(draft("B", "2024-01-06"));
        calendar.add(draft("C", "2024-01-05"));
        let titles: Vec<&str> = calendar
            .events_on("2024-01-05")
            .iter()
            .map(|e| e.title.as_str())
            .collect();
        assert_eq!(titles, vec!["A", "C"]);
    }

    #[test]
    fn test_update_replaces_fields_and_keeps_id() {
        let (dir, mut calendar) = open_temp();
        let id = calendar.add(EventDraft {
            location: Some("Old place".to_string()),
            ..draft("Before", "2024-01-05")
        });
        assert!(calendar.update(&id, draft("After", "2024-01-07")));

        let event = calendar.get(&id).unwrap();
        assert_eq!(event.title, "After");
        assert_eq!(event.date, "2024-01-07");
        assert_eq!(event.location, None);

        let reloaded = Calendar::open(Store::new(dir.path().join("events.json")));
        assert_eq!(reloaded.get(&id).unwrap().title, "After");
    }

    #[test]
    fn test_update_keeps_unknown_stored_keys() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("events.json");
        std::fs::write(
            &path,
            r#"[{"id": "x1", "title": "Synced", "date": "2024-01-05", "color": "teal"}]"#,
        )
        .unwrap();

        let mut calendar = Calendar::open(Store::new(&path));
        assert!(calendar.update("x1", draft("Renamed", "2024-01-05")));

        let saved: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(saved[0]["title"], "Renamed");
        assert_eq!(saved[0]["color"], "teal");
    }

    #[test]
    fn test_update_unknown_id_is_noop() {
        let (_dir, mut calendar) = open_temp();
        calendar.add(draft("A", "2024-01-05"));
        let before = calendar.events().to_vec();
        assert!(!calendar.update("missing", draft("B", "2024-01-06")));
        assert_eq!(calendar.events(), before.as_slice());
    }

    #[test]
    fn test_delete_removes_and_persists() {
        let (dir, mut calendar) = open_temp();
        let a = calendar.add(draft("A", "2024-01-05"));
        let b = calendar.add(draft("B", "2024-01-05"));
        assert_eq!(calendar.delete(&a), 1);
        assert!(calendar.get(&a).is_none());

        let reloaded = Calendar::open(Store::new(dir.path().join("events.json")));
        let ids: Vec<&str> = reloaded.events().iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec![b.as_str()]);
    }

    #[test]
    fn test_delete_unknown_id_leaves_list_unchanged() {
        let (_dir, mut calendar) = open_temp();
        calendar.add(draft("A", "2024-01-05"));
        let before = calendar.events().to_vec();
        assert_eq!(calendar.delete("missing"), 0);
        assert_eq!(calendar.events(), before.as_slice());
        assert!(!calendar.is_unsaved());
    }

    #[test]
    fn test_failed_save_keeps_memory_state() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("blocker");
        std::fs::write(&blocker, "").unwrap();
        let mut calendar = Calendar::open(Store::new(blocker.join("events.json")));

        let id = calendar.add(draft("Offline", "2024-01-05"));
        assert!(calendar.is_unsaved());
        assert_eq!(calendar.get(&id).unwrap().title, "Offline");
    }
}

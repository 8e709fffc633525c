use std::io;
use std::path::{Path, PathBuf};

use log::{debug, error, info, warn};
use thiserror::Error;

use super::event::Event;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("IO error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// The whole event list as one JSON array in a single file.
#[derive(Debug, Clone)]
pub struct Store {
    path: PathBuf,
}

impl Store {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the stored events.
    ///
    /// A missing file is an empty calendar. Unreadable content, or content
    /// that is not a JSON array, is logged and also yields an empty calendar.
    /// Entries that fail to decode, have an empty title or a non-canonical
    /// date are dropped one by one.
    pub fn load(&self) -> Vec<Event> {
        match self.try_load() {
            Ok(Some(entries)) => {
                let total = entries.len();
                let events: Vec<Event> = entries
                    .into_iter()
                    .enumerate()
                    .filter_map(|(index, entry)| decode_entry(index, entry))
                    .collect();
                info!(
                    "event=store_load status=ok path={} count={} skipped={}",
                    self.path.display(),
                    events.len(),
                    total - events.len()
                );
                events
            }
            Ok(None) => {
                info!(
                    "event=store_load status=missing path={}",
                    self.path.display()
                );
                Vec::new()
            }
            Err(err) => {
                error!("event=store_load status=error error={}", err);
                Vec::new()
            }
        }
    }

    fn try_load(&self) -> Result<Option<Vec<serde_json::Value>>, StoreError> {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(source) => {
                return Err(StoreError::Io {
                    path: self.path.clone(),
                    source,
                })
            }
        };
        if content.trim().is_empty() {
            return Ok(None);
        }
        Ok(Some(serde_json::from_str(&content)?))
    }

    /// Rewrite the file with the full list.
    pub fn save(&self, events: &[Event]) -> Result<(), StoreError> {
        let io_err = |source| StoreError::Io {
            path: self.path.clone(),
            source,
        };
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(io_err)?;
            }
        }
        let json = serde_json::to_string_pretty(events)?;
        std::fs::write(&self.path, json).map_err(io_err)?;
        debug!(
            "event=store_save status=ok path={} count={}",
            self.path.display(),
            events.len()
        );
        Ok(())
    }
}

fn decode_entry(index: usize, entry: serde_json::Value) -> Option<Event> {
    match serde_json::from_value::<Event>(entry) {
        Ok(ev) if ev.is_valid() => Some(ev),
        Ok(ev) => {
            warn!(
                "event=store_load status=skipped index={} id={} date={:?}",
                index, ev.id, ev.date
            );
            None
        }
        Err(err) => {
            warn!(
                "event=store_load status=skipped index={} error={}",
                index, err
            );
            None
        }
    }
}

/// `<data_dir>/minical/events.json`
pub fn default_data_file() -> Option<PathBuf> {
    dirs::data_dir().map(|d| d.join("minical").join("events.json"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::event::EventDraft;
    use pretty_assertions::assert_eq;

    fn sample(id: &str, date: &str) -> Event {
        Event::new(
            id.to_string(),
            EventDraft {
                title: format!("event {}", id),
                date: date.to_string(),
                start_time: Some("09:00".to_string()),
                ..Default::default()
            },
        )
    }

    #[test]
    fn test_missing_file_loads_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = Store::new(dir.path().join("events.json"));
        assert!(store.load().is_empty());
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let store = Store::new(dir.path().join("nested").join("events.json"));
        let events = vec![sample("a", "2024-01-05"), sample("b", "2024-01-06")];
        store.save(&events).unwrap();
        assert_eq!(store.load(), events);
    }

    #[test]
    fn test_malformed_file_loads_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("events.json");
        std::fs::write(&path, "{ not json").unwrap();
        assert!(Store::new(&path).load().is_empty());

        std::fs::write(&path, r#"{"id": "a"}"#).unwrap();
        assert!(Store::new(&path).load().is_empty());
    }

    #[test]
    fn test_invalid_entries_are_dropped() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("events.json");
        std::fs::write(
            &path,
            r#"[
                {"id": "ok", "title": "Keep", "date": "2024-01-05"},
                {"id": "blank", "title": "  ", "date": "2024-01-05"},
                {"id": "bad-date", "title": "Drop", "date": "2024-13-01"}
            ]"#,
        )
        .unwrap();
        let ids: Vec<String> = Store::new(&path).load().into_iter().map(|e| e.id).collect();
        assert_eq!(ids, vec!["ok".to_string()]);
    }

    #[test]
    fn test_undecodable_entries_do_not_discard_the_rest() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("events.json");
        std::fs::write(
            &path,
            r#"[
                {"id": "ok", "title": "Keep", "date": "2024-01-05"},
                {"id": "no-title", "date": "2024-01-05"},
                {"id": "null-date", "title": "Drop", "date": null},
                42,
                {"id": "also-ok", "title": "Keep too", "date": "2024-01-06"}
            ]"#,
        )
        .unwrap();
        let store = Store::new(&path);
        let ids: Vec<String> = store.load().into_iter().map(|e| e.id).collect();
        assert_eq!(ids, vec!["ok".to_string(), "also-ok".to_string()]);
    }

    #[test]
    fn test_save_fails_when_parent_is_a_file() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("blocker");
        std::fs::write(&blocker, "").unwrap();
        let store = Store::new(blocker.join("events.json"));
        let err = store.save(&[sample("a", "2024-01-05")]).unwrap_err();
        assert!(matches!(err, StoreError::Io { .. }));
    }
}

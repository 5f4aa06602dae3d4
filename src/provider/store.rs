use serde::Deserialize;
use std::fs;
use std::path::Path;

use super::{Event, EventFilter, Result};

#[derive(Debug, Deserialize)]
struct EventFile {
    name: Option<String>,
    #[serde(default, rename = "event")]
    events: Vec<Event>,
}

/// One event collection, loaded from a directory of *.toml event files.
pub struct EventStore {
    name: String,
    events: Vec<Event>,
}

impl EventStore {
    /// Loads all valid event files from `path`. A file that cannot be read
    /// or parsed is logged and skipped; it never fails the whole store.
    pub fn from_dir(path: &Path) -> Result<Self> {
        let mut name = None;
        let mut events = Vec::new();

        for entry in fs::read_dir(path)? {
            let file = entry?.path();
            if !file.extension().map_or(false, |ext| ext == "toml") {
                continue;
            }

            match read_event_file(&file) {
                Ok(parsed) => {
                    if name.is_none() {
                        name = parsed.name;
                    }
                    events.extend(parsed.events);
                }
                Err(e) => log::warn!("skipping '{}': {}", file.display(), e),
            }
        }

        let name = name
            .or_else(|| {
                path.file_name()
                    .map(|stem| stem.to_string_lossy().into_owned())
            })
            .unwrap_or_else(|| "events".to_owned());

        Ok(EventStore { name, events })
    }

    pub fn with_name(mut self, name: &str) -> Self {
        self.set_name(name);
        self
    }

    pub fn set_name(&mut self, name: &str) {
        self.name = name.to_owned();
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    pub fn filter_events(&self, filter: EventFilter) -> impl Iterator<Item = &Event> + '_ {
        self.events.iter().filter(move |event| filter.matches(event))
    }
}

fn read_event_file(path: &Path) -> Result<EventFile> {
    let content = fs::read_to_string(path)?;
    Ok(toml::from_str(&content)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_file(dir: &Path, name: &str, content: &str) {
        let mut file = fs::File::create(dir.join(name)).unwrap();
        file.write_all(content.as_bytes()).unwrap();
    }

    #[test]
    fn loads_events_and_skips_broken_files() {
        let dir = tempfile::tempdir().unwrap();

        write_file(
            dir.path(),
            "work.toml",
            r#"
            name = "work"

            [[event]]
            title = "Standup"
            start = "2024-03-15T10:00:00"
            end = "2024-03-15T10:15:00"
            kind = "meeting"

            [[event]]
            title = "Focus block"
            start = "2024-03-15T13:00:00"
            end = "2024-03-15T15:00:00"
            kind = "task"
            "#,
        );
        write_file(dir.path(), "broken.toml", "title = [unclosed");
        write_file(dir.path(), "notes.txt", "not an event file");

        let store = EventStore::from_dir(dir.path()).unwrap();
        assert_eq!(store.name(), "work");
        assert_eq!(store.events().len(), 2);
    }

    #[test]
    fn store_name_defaults_to_directory() {
        let dir = tempfile::tempdir().unwrap();
        let named = dir.path().join("personal");
        fs::create_dir(&named).unwrap();

        let store = EventStore::from_dir(&named).unwrap();
        assert_eq!(store.name(), "personal");
        assert!(store.events().is_empty());
    }

    #[test]
    fn missing_directory_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(EventStore::from_dir(&dir.path().join("absent")).is_err());
    }
}

//! Structured JSONL event log.
//!
//! Every lookup and every distribution load appends one JSON object per line
//! to `~/.salesboard/events.jsonl` (configurable). Writing is best-effort:
//! I/O errors are swallowed so logging never changes what a page shows.
//! `salesboard history` and `salesboard health` read the file back.

use std::fs::{self, OpenOptions, create_dir_all};
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};

use anyhow::Result;
use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::config;
use crate::config::schema::LoggingConfig;

// ---------------------------------------------------------------------------
// Entries
// ---------------------------------------------------------------------------

/// One line of the event log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventEntry {
    pub timestamp: String,
    pub event: Event,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Event {
    /// A lookup that settled and was applied to the page.
    Lookup {
        agent_id: String,
        /// `"success"` or an [`ApiError::kind`](crate::api::ApiError::kind).
        outcome: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        tier: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        prediction: Option<i64>,
        latency_ms: u64,
    },
    /// One of the two distribution calls failed and was zero-filled.
    DistributionFetchFailed { distribution: String, error: String },
    /// The distribution page settled.
    DistributionLoaded {
        #[serde(default)]
        degraded: Vec<String>,
        latency_ms: u64,
    },
}

// ---------------------------------------------------------------------------
// Log handle
// ---------------------------------------------------------------------------

/// Handle to the event log file. A disabled log drops every event.
#[derive(Debug, Clone, Default)]
pub struct EventLog {
    path: Option<PathBuf>,
}

impl EventLog {
    pub fn from_config(config: &LoggingConfig) -> Self {
        if !config.enabled {
            return Self::disabled();
        }
        Self {
            path: config::expand_home(&config.path),
        }
    }

    pub fn disabled() -> Self {
        Self { path: None }
    }

    /// Log to an explicit file.
    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self {
            path: Some(path.into()),
        }
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Append an event with the current timestamp.
    pub fn record(&self, event: Event) {
        let entry = EventEntry {
            timestamp: Utc::now().to_rfc3339(),
            event,
        };
        let _ = self.append(&entry);
    }

    fn append(&self, entry: &EventEntry) -> Result<()> {
        let Some(path) = &self.path else {
            return Ok(());
        };

        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            create_dir_all(parent)?;
        }

        let mut file = OpenOptions::new().create(true).append(true).open(path)?;
        let json = serde_json::to_string(entry)?;
        writeln!(file, "{json}")?;

        Ok(())
    }

    /// Read all entries, skipping malformed lines.
    ///
    /// Returns an empty vec when the log is disabled or missing.
    pub fn read_all(&self) -> Vec<EventEntry> {
        let Some(path) = &self.path else {
            return Vec::new();
        };

        let Ok(file) = fs::File::open(path) else {
            return Vec::new();
        };

        BufReader::new(file)
            .lines()
            .map_while(Result::ok)
            .filter_map(|line| serde_json::from_str::<EventEntry>(&line).ok())
            .collect()
    }

    /// The newest `limit` lookup entries, newest first.
    pub fn recent_lookups(&self, limit: usize) -> Vec<EventEntry> {
        let mut lookups: Vec<EventEntry> = self
            .read_all()
            .into_iter()
            .filter(|e| matches!(e.event, Event::Lookup { .. }))
            .collect();
        lookups.reverse();
        lookups.truncate(limit);
        lookups
    }

    pub fn exists(&self) -> bool {
        self.path.as_deref().is_some_and(Path::exists)
    }
}

/// Print a one-line warning on stderr.
pub fn warn(message: &str) {
    eprintln!("[salesboard] {message}");
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn lookup(agent: &str, outcome: &str) -> Event {
        Event::Lookup {
            agent_id: agent.to_string(),
            outcome: outcome.to_string(),
            tier: None,
            prediction: None,
            latency_ms: 3,
        }
    }

    #[test]
    fn record_and_read_back() {
        let dir = tempfile::tempdir().unwrap();
        let log = EventLog::at(dir.path().join("nested").join("events.jsonl"));

        log.record(lookup("A1", "success"));
        log.record(Event::DistributionFetchFailed {
            distribution: "prediction".to_string(),
            error: "transport failure: refused".to_string(),
        });

        let entries = log.read_all();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].event, lookup("A1", "success"));
        assert!(log.exists());
    }

    #[test]
    fn malformed_lines_are_skipped() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("events.jsonl");
        fs::write(&path, "not json\n{\"timestamp\":\"t\"}\n").unwrap();
        let log = EventLog::at(&path);
        log.record(lookup("B2", "not_found"));
        assert_eq!(log.read_all().len(), 1);
    }

    #[test]
    fn recent_lookups_newest_first() {
        let dir = tempfile::tempdir().unwrap();
        let log = EventLog::at(dir.path().join("events.jsonl"));
        log.record(lookup("first", "success"));
        log.record(Event::DistributionLoaded {
            degraded: vec![],
            latency_ms: 10,
        });
        log.record(lookup("second", "success"));
        log.record(lookup("third", "status"));

        let recent = log.recent_lookups(2);
        assert_eq!(recent.len(), 2);
        assert_eq!(recent[0].event, lookup("third", "status"));
        assert_eq!(recent[1].event, lookup("second", "success"));
    }

    #[test]
    fn disabled_log_is_silent() {
        let log = EventLog::disabled();
        log.record(lookup("A1", "success"));
        assert!(log.read_all().is_empty());
        assert!(!log.exists());
    }

    #[test]
    fn event_json_is_tagged() {
        let json = serde_json::to_string(&lookup("A1", "success")).unwrap();
        assert!(json.contains("\"kind\":\"lookup\""));
        assert!(!json.contains("tier"));
    }
}

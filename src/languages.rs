use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::RwLock;
use tokio::sync::broadcast;

use crate::error::{CodesmithError, Result};

/// Sentinel option that opens the custom-language input in the front end.
/// Custom names are merged into the option list just before it.
pub const CUSTOM_SENTINEL: &str = "custom";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LanguageEntry {
    pub name: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub enum LanguageEvent {
    Created(LanguageEntry),
}

/// Shared list of user-added language names. Entries are unique by name,
/// case-insensitively; subscribers are notified on every insert.
pub trait LanguageStore: Send + Sync {
    /// Adds a name if it is not already present. Returns the stored entry
    /// either way, so a duplicate create selects the existing language.
    fn create(&self, name: &str) -> Result<LanguageEntry>;

    /// Entries in insertion order.
    fn list(&self) -> Vec<LanguageEntry>;

    fn subscribe(&self) -> broadcast::Receiver<LanguageEvent>;
}

pub struct InMemoryLanguageStore {
    entries: RwLock<Vec<LanguageEntry>>,
    events: broadcast::Sender<LanguageEvent>,
}

impl InMemoryLanguageStore {
    pub fn new() -> Self {
        let (events, _) = broadcast::channel(64);
        Self {
            entries: RwLock::new(Vec::new()),
            events,
        }
    }
}

impl Default for InMemoryLanguageStore {
    fn default() -> Self {
        Self::new()
    }
}

impl LanguageStore for InMemoryLanguageStore {
    fn create(&self, name: &str) -> Result<LanguageEntry> {
        let name = name.trim();
        if name.is_empty() {
            return Err(CodesmithError::Validation(
                "custom language name cannot be empty".to_string(),
            ));
        }

        let mut entries = self
            .entries
            .write()
            .map_err(|_| CodesmithError::Internal("language store lock poisoned".to_string()))?;

        if let Some(existing) = entries
            .iter()
            .find(|e| e.name.eq_ignore_ascii_case(name))
        {
            return Ok(existing.clone());
        }

        let entry = LanguageEntry {
            name: name.to_string(),
            created_at: Utc::now(),
        };
        entries.push(entry.clone());
        drop(entries);

        tracing::info!(name = %entry.name, "Custom language added");
        // Nobody listening is fine; the send result only signals that.
        let _ = self.events.send(LanguageEvent::Created(entry.clone()));

        Ok(entry)
    }

    fn list(&self) -> Vec<LanguageEntry> {
        self.entries
            .read()
            .map(|entries| entries.clone())
            .unwrap_or_default()
    }

    fn subscribe(&self) -> broadcast::Receiver<LanguageEvent> {
        self.events.subscribe()
    }
}

/// Builds the full selectable option list: built-in names with custom names
/// spliced in just before the "custom" sentinel, mirroring how the front end
/// inserts new options.
pub fn merged_options(builtin: &[String], custom: &[LanguageEntry]) -> Vec<String> {
    let mut options: Vec<String> = Vec::with_capacity(builtin.len() + custom.len());
    let sentinel_at = builtin
        .iter()
        .position(|name| name.eq_ignore_ascii_case(CUSTOM_SENTINEL))
        .unwrap_or(builtin.len());

    options.extend(builtin[..sentinel_at].iter().cloned());
    for entry in custom {
        let lowered = entry.name.to_lowercase();
        if !options.iter().any(|o| o.eq_ignore_ascii_case(&lowered)) {
            options.push(lowered);
        }
    }
    options.extend(builtin[sentinel_at..].iter().cloned());
    options
}

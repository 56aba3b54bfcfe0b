//! Recent searches: bounded, most-recent-first, case-insensitively unique

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// How many cities the history keeps.
pub const MAX_RECENT_SEARCHES: usize = 5;

/// Recent city searches, newest first.
///
/// Serialized as a plain JSON array of strings.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(transparent)]
pub struct SearchHistory {
    entries: Vec<String>,
}

impl SearchHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild from a persisted list (newest first).
    ///
    /// Blank names are dropped, later duplicates lose to earlier ones and
    /// the result is capped, so a hand-edited file can't break invariants.
    pub fn from_entries(entries: Vec<String>) -> Self {
        let mut history = Self::new();
        for entry in entries {
            let entry = entry.trim();
            if entry.is_empty() || history.position(entry).is_some() {
                continue;
            }
            if history.entries.len() == MAX_RECENT_SEARCHES {
                break;
            }
            history.entries.push(entry.to_string());
        }
        history
    }

    /// Record a successful search.
    ///
    /// Returns the normalized name that was stored, or `None` for a blank city.
    pub fn record(&mut self, city: &str) -> Option<String> {
        let name = normalize_city(city);
        if name.is_empty() {
            return None;
        }
        if let Some(index) = self.position(&name) {
            self.entries.remove(index);
        }
        self.entries.insert(0, name.clone());
        self.entries.truncate(MAX_RECENT_SEARCHES);
        Some(name)
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    pub fn get(&self, index: usize) -> Option<&str> {
        self.entries.get(index).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn position(&self, city: &str) -> Option<usize> {
        let needle = city.trim().to_lowercase();
        self.entries
            .iter()
            .position(|entry| entry.to_lowercase() == needle)
    }
}

/// `"  new YORK "` → `"New york"`: trimmed, first letter upper, rest lower.
pub fn normalize_city(city: &str) -> String {
    let mut chars = city.trim().chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.as_str().to_lowercase().chars())
            .collect(),
        None => String::new(),
    }
}

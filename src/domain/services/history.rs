use crate::domain::model::{BarcodeEntry, ScanRecord};
use serde::Serialize;
use std::collections::VecDeque;

pub const DEFAULT_HISTORY_LIMIT: usize = 20;

/// An entry that can be deduplicated by exact key match.
pub trait HistoryEntry {
    fn key(&self) -> &str;
}

impl HistoryEntry for ScanRecord {
    fn key(&self) -> &str {
        self.url.as_str()
    }
}

impl HistoryEntry for BarcodeEntry {
    fn key(&self) -> &str {
        &self.record.code
    }
}

/// Most-recent-first list bounded to `capacity` entries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct History<T> {
    entries: VecDeque<T>,
    capacity: usize,
}

impl<T: HistoryEntry> History<T> {
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Rebuilds a history from persisted entries. Duplicate keys keep their
    /// first (most recent) occurrence.
    pub fn from_entries(entries: Vec<T>, capacity: usize) -> Self {
        let mut history = Self::new(capacity);
        for entry in entries {
            if history.entries.len() >= capacity {
                break;
            }
            if !history.contains_key(entry.key()) {
                history.entries.push_back(entry);
            }
        }
        history
    }

    /// Puts `entry` at the front, replacing any entry with the same key.
    pub fn record(&mut self, entry: T) {
        self.entries.retain(|existing| existing.key() != entry.key());
        self.entries.push_front(entry);
        self.entries.truncate(self.capacity);
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.iter().any(|entry| entry.key() == key)
    }

    pub fn get(&self, index: usize) -> Option<&T> {
        self.entries.get(index)
    }

    pub fn entries(&self) -> impl Iterator<Item = &T> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

impl<T: Serialize> Serialize for History<T> {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.entries.serialize(serializer)
    }
}

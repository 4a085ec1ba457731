//! Event-count file loading
//!
//! Accepts a JSON object keyed by epoch milliseconds, either
//! `{"1718150400000": {"count": 3}}` or the bare form `{"1718150400000": 3}`.

use serde::Deserialize;
use std::collections::HashMap;
use std::fs::File;
use std::io::{self, BufReader, Read};
use std::path::Path;

use crate::types::{EventCounts, GridcalError, Result};

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum CountValue {
    Entry { count: i64 },
    Bare(i64),
}

impl CountValue {
    fn count(&self) -> i64 {
        match self {
            Self::Entry { count } | Self::Bare(count) => *count,
        }
    }
}

/// Reads `EventCounts` from JSON
pub struct EventLoader;

impl EventLoader {
    /// Load from a file path, or stdin when `path` is `-`
    pub fn load(path: &Path) -> Result<EventCounts> {
        if path.as_os_str() == "-" {
            return Self::from_reader(io::stdin().lock());
        }
        let file = File::open(path)?;
        let events = Self::from_reader(BufReader::new(file))?;
        log::debug!("loaded {} event keys from {}", events.len(), path.display());
        Ok(events)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<EventCounts> {
        let raw: HashMap<String, CountValue> = serde_json::from_reader(reader)?;
        Self::convert(raw)
    }

    pub fn parse_str(input: &str) -> Result<EventCounts> {
        let raw: HashMap<String, CountValue> = serde_json::from_str(input)?;
        Self::convert(raw)
    }

    fn convert(raw: HashMap<String, CountValue>) -> Result<EventCounts> {
        let mut events = EventCounts::with_capacity(raw.len());

        for (key, value) in raw {
            let timestamp: i64 = key
                .trim()
                .parse()
                .map_err(|_| GridcalError::Parse(format!("invalid timestamp key: {:?}", key)))?;

            let count = value.count();
            if count < 0 {
                log::warn!("skipping negative count {} at {}", count, timestamp);
                continue;
            }

            // "0100" and "100" name the same instant
            let slot = events.entry(timestamp).or_insert(0);
            *slot = slot.saturating_add(count as u64);
        }

        Ok(events)
    }
}

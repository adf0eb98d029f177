//! Long-term fact memory.
//!
//! Four closed fields about the user (name, company, city, preference), loaded
//! once at startup and written through to a [`FactSink`] after every mutation.
//! The in-memory value is authoritative: a failed flush is reported to the
//! caller but never rolls the mutation back.

use crate::error::{BotError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

/// The closed set of fact fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FactKey {
    Name,
    Company,
    City,
    Preference,
}

impl FactKey {
    pub const ALL: [Self; 4] = [Self::Name, Self::Company, Self::City, Self::Preference];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Company => "company",
            Self::City => "city",
            Self::Preference => "preference",
        }
    }
}

impl std::fmt::Display for FactKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The persisted fact mapping. Absent values serialize as `null`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Facts {
    pub name: Option<String>,
    pub company: Option<String>,
    pub city: Option<String>,
    pub preference: Option<String>,
}

impl Facts {
    #[must_use]
    pub fn get(&self, key: FactKey) -> Option<&str> {
        self.slot(key).as_deref()
    }

    fn slot(&self, key: FactKey) -> &Option<String> {
        match key {
            FactKey::Name => &self.name,
            FactKey::Company => &self.company,
            FactKey::City => &self.city,
            FactKey::Preference => &self.preference,
        }
    }

    fn slot_mut(&mut self, key: FactKey) -> &mut Option<String> {
        match key {
            FactKey::Name => &mut self.name,
            FactKey::Company => &mut self.company,
            FactKey::City => &mut self.city,
            FactKey::Preference => &mut self.preference,
        }
    }

    /// True when no field is set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        FactKey::ALL.iter().all(|k| self.slot(*k).is_none())
    }
}

/// Durable storage for the fact mapping.
///
/// `save` receives the full mapping after every mutation; implementations
/// must not batch.
pub trait FactSink: Send {
    /// Read the persisted mapping.
    fn load(&self) -> Result<Facts>;

    /// Persist the full mapping, synchronously.
    fn save(&mut self, facts: &Facts) -> Result<()>;
}

/// JSON file sink. Writes go to a temp file that is renamed over the target.
#[derive(Debug, Clone)]
pub struct JsonFactSink {
    path: PathBuf,
}

impl JsonFactSink {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl FactSink for JsonFactSink {
    fn load(&self) -> Result<Facts> {
        let bytes = std::fs::read(&self.path).map_err(|e| {
            BotError::Storage(format!("cannot read {}: {e}", self.path.display()))
        })?;
        serde_json::from_slice(&bytes).map_err(|e| {
            BotError::Storage(format!("invalid fact file {}: {e}", self.path.display()))
        })
    }

    fn save(&mut self, facts: &Facts) -> Result<()> {
        let json = serde_json::to_string_pretty(facts)
            .map_err(|e| BotError::Storage(format!("cannot serialize facts: {e}")))?;
        write_atomic(&self.path, &json).map_err(|e| {
            BotError::Storage(format!("cannot write {}: {e}", self.path.display()))
        })
    }
}

fn write_atomic(path: &Path, content: &str) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let tmp_path = path.with_extension("json.tmp");
    std::fs::write(&tmp_path, content)?;
    std::fs::rename(&tmp_path, path)
}

/// In-process sink. Clones share the same slot, so a test can keep one
/// handle and inspect what the store flushed through another.
#[derive(Debug, Clone, Default)]
pub struct MemoryFactSink {
    saved: Arc<Mutex<Option<Facts>>>,
}

impl MemoryFactSink {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-seed the sink as if `facts` had been persisted earlier.
    #[must_use]
    pub fn with_facts(facts: Facts) -> Self {
        Self {
            saved: Arc::new(Mutex::new(Some(facts))),
        }
    }

    /// The last mapping flushed, if any.
    #[must_use]
    pub fn saved(&self) -> Option<Facts> {
        self.saved.lock().ok().and_then(|g| g.clone())
    }
}

impl FactSink for MemoryFactSink {
    fn load(&self) -> Result<Facts> {
        self.saved()
            .ok_or_else(|| BotError::Storage("nothing persisted yet".to_owned()))
    }

    fn save(&mut self, facts: &Facts) -> Result<()> {
        let mut slot = self
            .saved
            .lock()
            .map_err(|_| BotError::Storage("memory sink lock poisoned".to_owned()))?;
        *slot = Some(facts.clone());
        Ok(())
    }
}

/// Owner of the fact mapping.
pub struct FactStore {
    facts: Facts,
    sink: Box<dyn FactSink>,
}

impl std::fmt::Debug for FactStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FactStore")
            .field("facts", &self.facts)
            .finish_non_exhaustive()
    }
}

impl FactStore {
    /// Load the persisted mapping from `sink`.
    ///
    /// Never fails: a missing or corrupt source is logged and replaced with
    /// the all-absent default.
    #[must_use]
    pub fn load(sink: Box<dyn FactSink>) -> Self {
        let facts = match sink.load() {
            Ok(facts) => {
                tracing::info!("loaded stored facts");
                facts
            }
            Err(e) => {
                tracing::warn!("starting with empty facts: {e}");
                Facts::default()
            }
        };
        Self { facts, sink }
    }

    #[must_use]
    pub fn get(&self, key: FactKey) -> Option<&str> {
        self.facts.get(key)
    }

    #[must_use]
    pub fn snapshot(&self) -> &Facts {
        &self.facts
    }

    /// Store `value` under `key`, replacing any previous value, then flush.
    ///
    /// # Errors
    ///
    /// Returns the sink error if the flush fails. The in-memory value is
    /// updated regardless.
    pub fn set(&mut self, key: FactKey, value: impl Into<String>) -> Result<()> {
        *self.facts.slot_mut(key) = Some(value.into());
        self.flush()
    }

    /// Remove `key`, then flush (even if it was already absent).
    ///
    /// # Errors
    ///
    /// Returns the sink error if the flush fails. The in-memory value is
    /// cleared regardless.
    pub fn clear(&mut self, key: FactKey) -> Result<()> {
        *self.facts.slot_mut(key) = None;
        self.flush()
    }

    /// Write the full mapping through the sink.
    ///
    /// # Errors
    ///
    /// Returns the sink error unchanged.
    pub fn flush(&mut self) -> Result<()> {
        self.sink.save(&self.facts)
    }
}

//! JSON persistence adapter over a `KeyValueStore`.
//!
//! # Responsibility
//! - Encode values as JSON text on write and decode them on read.
//! - Contain every backend or codec failure: callers get a default or a
//!   `false`, never an error or a panic.
//!
//! # Invariants
//! - `load` returns the caller's default for absent keys, unreadable
//!   storage and undecodable payloads.
//! - `export_snapshot` never writes.
//! - Log lines carry keys and outcomes only, never stored values.

use super::KeyValueStore;
use log::{debug, warn};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Map, Value};

pub struct StoreAdapter<S: KeyValueStore> {
    store: S,
}

impl<S: KeyValueStore> StoreAdapter<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Underlying backend.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Writes `value` as JSON under `key`.
    ///
    /// Returns whether the write landed. Failures are logged and swallowed so
    /// in-memory state stays authoritative for the rest of the session.
    pub fn save<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> bool {
        let json = match serde_json::to_string(value) {
            Ok(json) => json,
            Err(err) => {
                warn!(
                    "event=store_save module=store status=error key={key} error_code=encode_failed error={err}"
                );
                return false;
            }
        };

        match self.store.set(key, &json) {
            Ok(()) => {
                debug!(
                    "event=store_save module=store status=ok key={key} bytes={}",
                    json.len()
                );
                true
            }
            Err(err) => {
                warn!(
                    "event=store_save module=store status=error key={key} error_code=write_failed error={err}"
                );
                false
            }
        }
    }

    /// Reads and decodes `key`, falling back to `default`.
    ///
    /// Decoding is only as strict as `T`'s `Deserialize` impl; with
    /// `T = serde_json::Value` any syntactically valid JSON is returned as-is.
    pub fn load<T: DeserializeOwned>(&self, key: &str, default: T) -> T {
        let raw = match self.store.get(key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return default,
            Err(err) => {
                warn!(
                    "event=store_load module=store status=fallback key={key} error_code=read_failed error={err}"
                );
                return default;
            }
        };

        match serde_json::from_str(&raw) {
            Ok(value) => value,
            Err(err) => {
                warn!(
                    "event=store_load module=store status=fallback key={key} error_code=decode_failed error={err}"
                );
                default
            }
        }
    }

    /// Untyped read with no shape check.
    pub fn load_value(&self, key: &str, default: Value) -> Value {
        self.load(key, default)
    }

    /// Deletes every key, best-effort.
    ///
    /// Returns how many deletes the backend accepted.
    pub fn clear(&self, keys: &[&str]) -> usize {
        keys.iter()
            .filter(|key| match self.store.delete(key) {
                Ok(()) => true,
                Err(err) => {
                    warn!(
                        "event=store_clear module=store status=error key={key} error={err}"
                    );
                    false
                }
            })
            .count()
    }

    /// Aggregates tracked keys into one JSON object keyed by storage key.
    ///
    /// Untyped: each value is returned as stored, with the paired default
    /// used only for absent or unreadable keys. Typed, normalized exports go
    /// through `DashboardService::export_state` instead.
    pub fn export_snapshot(&self, keys: &[(&str, Value)]) -> Value {
        let snapshot = keys
            .iter()
            .map(|(key, default)| (key.to_string(), self.load_value(key, default.clone())))
            .collect::<Map<String, Value>>();
        Value::Object(snapshot)
    }
}

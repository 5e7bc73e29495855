// src/storage/slot.rs

use serde_json::Value;

use super::KeyValueStorage;
use crate::{
    config::DEFAULT_STORAGE_KEY,
    error::AppError,
    state::{AppState, COLLECTION_FIELDS},
};

/// Load/save contract the store persists through.
///
/// Neither method fails: implementations log problems and carry on, the
/// in-memory state stays authoritative.
pub trait Persistence {
    /// Reads the stored snapshot, or the empty snapshot when there is none
    /// or it cannot be used.
    fn load(&self) -> AppState;

    /// Overwrites the stored snapshot.
    fn save(&mut self, state: &AppState);
}

/// One named key inside a [`KeyValueStorage`] holding the JSON snapshot.
#[derive(Debug, Clone)]
pub struct StorageSlot<S> {
    storage: S,
    key: String,
}

impl<S: KeyValueStorage> StorageSlot<S> {
    pub fn new(storage: S, key: impl Into<String>) -> Self {
        Self {
            storage,
            key: key.into(),
        }
    }

    /// Slot under the default `appState` key.
    pub fn with_default_key(storage: S) -> Self {
        Self::new(storage, DEFAULT_STORAGE_KEY)
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn storage_mut(&mut self) -> &mut S {
        &mut self.storage
    }
}

impl<S: KeyValueStorage> Persistence for StorageSlot<S> {
    fn load(&self) -> AppState {
        let raw = match self.storage.get(&self.key) {
            Ok(Some(raw)) => raw,
            Ok(None) => {
                tracing::info!("No stored state under '{}', starting empty", self.key);
                return AppState::empty();
            }
            Err(e) => {
                tracing::error!("Error loading state from '{}': {}", self.key, e);
                return AppState::empty();
            }
        };

        match parse_snapshot(&raw) {
            Ok(state) => {
                tracing::info!(
                    "Loaded state from '{}': {} users, {} questionnaires, {} responses",
                    self.key,
                    state.users.len(),
                    state.questionnaires.len(),
                    state.responses.len()
                );
                state
            }
            Err(e) => {
                tracing::warn!("Stored state under '{}' is malformed, starting empty: {}", self.key, e);
                AppState::empty()
            }
        }
    }

    fn save(&mut self, state: &AppState) {
        let serialized = match serde_json::to_string(state) {
            Ok(serialized) => serialized,
            Err(e) => {
                tracing::error!("Error serializing state: {}", e);
                return;
            }
        };

        if let Err(e) = self.storage.set(&self.key, &serialized) {
            tracing::error!("Error saving state to '{}': {}", self.key, e);
        }
    }
}

/// Parses a stored snapshot after checking its collections are all arrays.
pub fn parse_snapshot(raw: &str) -> Result<AppState, AppError> {
    let value: Value = serde_json::from_str(raw)?;

    let object = value
        .as_object()
        .ok_or_else(|| AppError::BadRequest("Stored state is not a JSON object".to_string()))?;

    for field in COLLECTION_FIELDS {
        if !object.get(field).is_some_and(Value::is_array) {
            return Err(AppError::BadRequest(format!(
                "Field '{}' is missing or not an array",
                field
            )));
        }
    }

    Ok(serde_json::from_value(value)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_snapshot_accepts_missing_current_user() {
        let raw = r#"{"users":[],"questionnaires":[],"questions":[],"questionOptions":[],"responses":[],"answers":[]}"#;
        assert_eq!(parse_snapshot(raw).unwrap(), AppState::empty());
    }

    #[test]
    fn test_parse_snapshot_rejects_non_array_collection() {
        let raw = r#"{"users":{},"questionnaires":[],"questions":[],"questionOptions":[],"responses":[],"answers":[]}"#;
        assert!(matches!(parse_snapshot(raw), Err(AppError::BadRequest(_))));
    }

    #[test]
    fn test_parse_snapshot_rejects_non_object() {
        assert!(parse_snapshot("[1,2,3]").is_err());
        assert!(parse_snapshot("not json").is_err());
    }
}

// src/utils/ids.rs

use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Mints a fresh opaque entity id.
pub fn new_id() -> String {
    Uuid::new_v4().to_string()
}

pub fn now() -> DateTime<Utc> {
    Utc::now()
}

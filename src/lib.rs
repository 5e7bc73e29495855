// src/lib.rs

pub mod config;
pub mod error;
pub mod handlers;
pub mod models;
pub mod reducer;
pub mod state;
pub mod storage;
pub mod store;
pub mod utils;

pub use error::AppError;
pub use reducer::{Action, reduce};
pub use state::AppState;
pub use store::{Store, SubscriptionId};

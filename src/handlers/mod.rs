// src/handlers/mod.rs
//
// Action-producing workflows: validate input, then go through the store.

pub mod auth;
pub mod builder;
pub mod catalog;
pub mod run;
pub mod statistics;
pub mod transfer;

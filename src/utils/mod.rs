// src/utils/mod.rs

pub mod hash;
pub mod ids;

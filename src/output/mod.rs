// src/output/mod.rs
pub mod logging;

// src/ui/mod.rs
pub mod render;
pub mod screen;
pub mod terminal;

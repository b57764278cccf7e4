//! CLI utilities

pub mod pid;

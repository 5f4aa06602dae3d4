pub mod agenda;
pub mod config;
pub mod grid;
pub mod provider;
pub mod render;

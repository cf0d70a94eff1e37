pub mod config;
pub mod input;
pub mod show;
pub mod stats;

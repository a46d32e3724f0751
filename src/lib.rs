pub mod borg;
pub mod commands;
pub mod config;
pub mod error;
pub mod global;
pub mod mount;
pub mod testing;
pub mod ui;
pub mod utils;

//! CLI command implementations.

mod config;
mod doctor;
mod menu;

pub use config::run_config;
pub use doctor::run_doctor;
pub use menu::run_menu;

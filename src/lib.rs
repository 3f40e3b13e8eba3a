pub mod config;
pub mod error;
pub mod export;
pub mod generator;
pub mod import;
pub mod models;
pub mod random;
pub mod report;
pub mod risk;
pub mod roster;
pub mod state;

pub use generator::generate;
pub use roster::Roster;
pub use state::{update, Action, AppState, Effect, View};

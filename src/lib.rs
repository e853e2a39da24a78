pub mod analysis;
pub mod config;
pub mod error;
pub mod events;
pub mod models;
pub mod output;
pub mod random;
pub mod simulation;
pub mod state;

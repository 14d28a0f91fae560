//! Domain services

pub mod history_replay;

pub use history_replay::replay_statuses;

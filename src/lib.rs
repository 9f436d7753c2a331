pub mod config;
pub mod error;
pub mod football_data;
pub mod jobs;
pub mod model;
pub mod report;
pub mod scheduler;
pub mod server;
pub mod telegram;
pub mod translations;

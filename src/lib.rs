// Library for tests to access modules

pub mod cli;
pub mod config;
pub mod docker_repo;
pub mod engine;
pub mod history_store;
pub mod metrics;
pub mod models;
pub mod tui;
pub mod version;
pub mod worker;

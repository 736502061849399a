pub mod app;
pub mod calendar;
pub mod config;
pub mod errors;
pub mod handlers;
pub mod models;
pub mod pages;
pub mod repository;
pub mod state;
pub mod stats;
pub mod storage;
pub mod store;
pub mod ui;
pub mod views;

pub use app::router;
pub use config::Config;
pub use errors::{AppError, StoreError};
pub use state::AppState;
pub use store::{DocumentStore, MemoryStore};

// src/lib.rs
pub mod backend;
pub mod banner;
pub mod config;
pub mod dashboard;
pub mod errors;
pub mod form;
pub mod models;
pub mod orchestrator;
pub mod render;
pub mod ui;

pub use backend::{HttpBackend, ScreeningBackend};
pub use config::{ClientConfig, JobSpec};
pub use dashboard::{Dashboard, SubmitPhase};
pub use errors::{Result, ScreenError};
pub use form::JobForm;

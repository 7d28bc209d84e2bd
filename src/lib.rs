#![warn(clippy::all, clippy::pedantic)]
#![allow(
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::module_name_repetitions,
    clippy::must_use_candidate,
    clippy::return_self_not_must_use
)]

pub mod analysis;
pub mod config;
pub mod directory;
pub mod error;
pub mod observability;
pub mod quiz;
pub mod ranking;
pub mod store;
pub mod taste;

pub use config::Config;
pub use error::{Result, TastemapError};
pub use store::SqliteStore;

#![forbid(unsafe_code)]

//! Core domain model and business logic for the weekly plan recommender.
//!
//! This crate provides:
//! - Domain types (exercises, templates, profiles, plans)
//! - Catalog and template loading with built-in fallbacks
//! - The recommendation pipeline (filter, score, balance, template,
//!   schedule, selection)
//! - Profile persistence and CSV plan export

pub mod types;
pub mod error;
pub mod catalog;
pub mod config;
pub mod logging;
pub mod filter;
pub mod scoring;
pub mod balance;
pub mod template;
pub mod schedule;
pub mod progression;
pub mod selection;
pub mod engine;
pub mod profile;
pub mod export;

// Re-export commonly used types
pub use error::{Error, Result};
pub use types::*;
pub use catalog::{build_default_catalog, get_default_catalog, load_catalog};
pub use config::Config;
pub use engine::Engine;
pub use export::write_plan_csv;
pub use progression::ProgressiveParameters;

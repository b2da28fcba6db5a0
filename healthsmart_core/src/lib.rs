#![forbid(unsafe_code)]

//! Core domain model and planning logic for the HealthSmart engine.
//!
//! This crate provides:
//! - Domain types (health report, nutrition targets, meals, exercise, plans)
//! - Rule tables (BMR, calorie ratios, exercise recommendations, safety ranges)
//! - Meal and exercise catalogs
//! - Planning engine and plan summary
//! - JSON service façade and CSV export

pub mod types;
pub mod error;
pub mod rules;
pub mod catalog;
pub mod config;
pub mod logging;
pub mod engine;
pub mod summary;
pub mod service;
pub mod export;

// Re-export commonly used types
pub use error::{Error, Result};
pub use types::*;
pub use catalog::{build_default_catalog, get_default_catalog, Catalog};
pub use config::Config;
pub use engine::PlanningEngine;
pub use summary::{summarize_plan, PlanSummary};
pub use service::{Action, EngineApi, Envelope, Response};
pub use export::write_daily_plans_csv;

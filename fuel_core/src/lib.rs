#![forbid(unsafe_code)]

//! Core domain model and business logic for the Fuelplan system.
//!
//! This crate provides:
//! - Safe literal decoding of embedded-record cells
//! - WHOOP export loading (dataset)
//! - Aggregate statistics (strain, calories, workouts, recovery, duration)
//! - User profile collection
//! - Meal-plan request assembly, response parsing, persistence

pub mod error;
pub mod literal;
pub mod sports;
pub mod dataset;
pub mod stats;
pub mod profile;
pub mod plan;
pub mod config;
pub mod logging;

// Re-export commonly used types
pub use error::{Error, Result};
pub use literal::Literal;
pub use sports::sport_name;
pub use dataset::{WhoopDataset, WhoopRow};
pub use profile::{prompt_profile, UserProfile};
pub use plan::{build_request, parse_response, write_plan, MealPlan, PlanInputs};
pub use config::Config;

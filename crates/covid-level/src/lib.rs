//! COVID-19 community levels by county
//!
//! Fetches the current week's CDC community level for each county in a
//! state and renders one colored line per county, most severe first.
//!
//! This crate provides:
//! - Environment configuration for the data API
//! - A Socrata client for the Community Levels by County dataset
//! - Level parsing, ranking and rendering

pub mod client;
pub mod config;
pub mod error;
pub mod level;
pub mod report;

pub use client::{CommunityLevelClient, CountyRecord, WeekQuery};
pub use config::LevelConfig;
pub use error::{LevelError, LevelResult};
pub use level::CommunityLevel;
pub use report::{rank, RankedCounty};

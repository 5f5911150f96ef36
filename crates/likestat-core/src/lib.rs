//! Domain types and pure computations for post-like demographics.
//!
//! This crate performs no I/O: it defines the engagement and profile types,
//! the birth-date → age estimate, the histogram fold, and configuration
//! loading. The VK client and the pipeline driver live in `likestat-vk`.

pub mod age;
pub mod aggregate;
pub mod app_config;
pub mod config;
pub mod error;
pub mod types;

pub use age::{estimate_age, parse_birth_date};
pub use aggregate::aggregate;
pub use app_config::AppConfig;
pub use config::{load_app_config, load_app_config_from_env};
pub use error::{ConfigError, UnknownObjectType};
pub use types::{
    ActorId, AgeBand, DemographicStats, EngagementEvent, ObjectType, ProfileRecord, SexBucket,
};

//! Dashboard core library — domain types, resource descriptors, response
//! discrimination, and configuration.
//!
//! - [`types`] — guild domain objects and field-level merge
//! - [`state`] — [`ResourceState`], [`NormalizedError`], [`WriteBackMode`]
//! - [`discriminate`] — structural predicates and payload classification
//! - [`resource`] — [`Resource`] descriptors for each backend route
//! - [`config`] — YAML configuration at `~/.dashboard/config.yaml`

pub mod config;
pub mod discriminate;
pub mod error;
pub mod resource;
pub mod state;
pub mod types;

pub use config::DashboardConfig;
pub use discriminate::{classify, Classified};
pub use error::ConfigError;
pub use resource::Resource;
pub use state::{
    ErrorEnvelope, NormalizedError, ResourceState, ResourceStatus, WriteBackMode,
    UNAUTHORIZED_CODE,
};
pub use types::{FieldMerge, GuildId, GuildProfile, GuildProfileField, GuildSummary, OptionCategory};

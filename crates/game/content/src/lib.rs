//! Data-driven battle content and loaders.
//!
//! This crate reads scenario and configuration files for `tactics-core`:
//! - Scenarios (terrain paint scripts and unit placement, RON)
//! - Battle rules configuration (TOML)
//!
//! Loaders deserialize straight into `tactics-core` types via serde.

#[cfg(feature = "loaders")]
pub mod loaders;

#[cfg(feature = "loaders")]
pub use loaders::{
    ConfigLoader, ContentFactory, LoadResult, ScenarioData, ScenarioLoader, UnitSpec,
};

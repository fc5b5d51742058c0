//! # Config Crate
//!
//! Centralized configuration constants for the scanner mesh pipeline.
//! Colors, tolerances and tessellation parameters are defined here so the
//! geometry engine receives them as injected values instead of reaching for
//! ambient globals.
//!
//! ## Usage
//!
//! ```rust
//! use config::constants::{EngineConfig, CRYSTAL_COLOR, SOLID_ALPHA};
//!
//! let config = EngineConfig::default();
//! assert_eq!(config.base_color, CRYSTAL_COLOR);
//! assert_eq!(config.alpha, SOLID_ALPHA);
//! ```
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: All constants defined once, used everywhere
//! - **Immutable**: `EngineConfig` is a `Copy` snapshot handed to the engine
//! - **Validated**: Custom configurations go through `EngineConfig::new`

pub mod constants;

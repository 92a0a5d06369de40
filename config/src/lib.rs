//! # Config Crate
//!
//! Centralized configuration constants for the OpenSCAD front end.
//! Every literal that the parser, converter, validator or printer would
//! otherwise hard-code lives here so the crates stay consistent.
//!
//! ## Usage
//!
//! ```rust
//! use config::constants::{MULTMATRIX_COLUMNS, SPECIAL_VARIABLE_SIGIL};
//!
//! assert!("$fn".starts_with(SPECIAL_VARIABLE_SIGIL));
//! assert_eq!(MULTMATRIX_COLUMNS, 4);
//! ```
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: constants are defined once and imported
//! - **Validated Options**: tunables are built through checked constructors
//! - **OpenSCAD Compatible**: values mirror OpenSCAD's own conventions

pub mod constants;

//! Centralized configuration values shared across the OpenSCAD front end.
//!
//! Each public item in this module documents its purpose and provides a minimal
//! usage example so that downstream crates can remain declarative and avoid
//! scattering literals.

use thiserror::Error;

/// Leading character that marks a special variable such as `$fn`.
///
/// # Examples
/// ```
/// use config::constants::SPECIAL_VARIABLE_SIGIL;
/// assert!("$fa".starts_with(SPECIAL_VARIABLE_SIGIL));
/// ```
pub const SPECIAL_VARIABLE_SIGIL: char = '$';

/// Special variables OpenSCAD itself defines. User code may introduce
/// others; this list only serves documentation and tooling hints.
///
/// # Examples
/// ```
/// use config::constants::KNOWN_SPECIAL_VARIABLES;
/// assert!(KNOWN_SPECIAL_VARIABLES.contains(&"$fn"));
/// ```
pub const KNOWN_SPECIAL_VARIABLES: &[&str] = &[
    "$fn",
    "$fa",
    "$fs",
    "$t",
    "$preview",
    "$children",
    "$vpr",
    "$vpt",
    "$vpd",
    "$vpf",
    "$parent_modules",
];

/// Name of the module whose matrix argument strict mode checks.
pub const MULTMATRIX_MODULE: &str = "multmatrix";

/// Named-argument spelling of the multmatrix matrix (`multmatrix(m = ...)`).
pub const MULTMATRIX_ARGUMENT: &str = "m";

/// Every multmatrix row holds exactly this many columns.
///
/// # Examples
/// ```
/// use config::constants::MULTMATRIX_COLUMNS;
/// assert_eq!(MULTMATRIX_COLUMNS, 4);
/// ```
pub const MULTMATRIX_COLUMNS: usize = 4;

/// Fewest rows accepted for a multmatrix (the affine 3x4 form).
pub const MULTMATRIX_MIN_ROWS: usize = 3;

/// Most rows accepted for a multmatrix (the full 4x4 form).
pub const MULTMATRIX_MAX_ROWS: usize = 4;

/// Identifier-to-value hops followed when resolving a multmatrix argument
/// before its shape is treated as unknown. Bounds cycles such as `m = m;`.
pub const MULTMATRIX_RESOLVE_DEPTH: usize = 16;

/// Bytes of stack space reserved when growing recursion limits using the
/// `stacker` crate.
///
/// # Examples
/// ```
/// use config::constants::STACKER_STACK_SIZE_BYTES;
/// assert!(STACKER_STACK_SIZE_BYTES >= 1024);
/// ```
pub const STACKER_STACK_SIZE_BYTES: usize = 8 * 1024 * 1024;

/// Remaining stack below which `stacker::maybe_grow` allocates a new segment.
///
/// # Examples
/// ```
/// use config::constants::{STACKER_RED_ZONE_BYTES, STACKER_STACK_SIZE_BYTES};
/// assert!(STACKER_RED_ZONE_BYTES < STACKER_STACK_SIZE_BYTES);
/// ```
pub const STACKER_RED_ZONE_BYTES: usize = STACKER_STACK_SIZE_BYTES / 8;

/// Spaces per nesting level emitted by the printer.
pub const DEFAULT_INDENT_WIDTH: usize = 2;

/// Largest indent width the printer accepts.
pub const MAX_INDENT_WIDTH: usize = 8;

/// Formatting options for the AST printer.
///
/// # Examples
/// ```
/// use config::constants::PrinterConfig;
/// let config = PrinterConfig::default();
/// assert_eq!(config.indent_width, 2);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PrinterConfig {
    /// Spaces per nesting level.
    pub indent_width: usize,
    /// Whether the printed source ends with a newline.
    pub trailing_newline: bool,
}

impl PrinterConfig {
    /// Builds a printer configuration, rejecting indent widths outside
    /// `1..=MAX_INDENT_WIDTH`.
    ///
    /// # Examples
    /// ```
    /// use config::constants::PrinterConfig;
    /// let cfg = PrinterConfig::new(4, true).expect("valid config");
    /// assert_eq!(cfg.indent_width, 4);
    /// ```
    pub fn new(indent_width: usize, trailing_newline: bool) -> Result<Self, ConfigError> {
        if indent_width == 0 || indent_width > MAX_INDENT_WIDTH {
            return Err(ConfigError::InvalidIndentWidth(indent_width));
        }
        Ok(Self {
            indent_width,
            trailing_newline,
        })
    }
}

impl Default for PrinterConfig {
    fn default() -> Self {
        Self {
            indent_width: DEFAULT_INDENT_WIDTH,
            trailing_newline: true,
        }
    }
}

/// Error returned when invalid configuration values are provided.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// Raised when the indent width is zero or above [`MAX_INDENT_WIDTH`].
    #[error("indent_width must be between 1 and {max}: {0}", max = MAX_INDENT_WIDTH)]
    InvalidIndentWidth(usize),
}

#[cfg(test)]
mod tests;

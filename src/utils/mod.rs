//! Utility functions and helpers.
//!
//! - [`paths`]: absolute-path resolution, lexical normalisation, glob pattern
//!   cleaning and extension extraction shared by both collectors.
//!
//! # Examples
//!
//! ```
//! use std::path::Path;
//! use tidyfmt::utils::{clean_pattern, normalize_lexically};
//!
//! assert_eq!(clean_pattern("./src//**/"), "src/**");
//! assert_eq!(normalize_lexically(Path::new("/a/b/../c")), Path::new("/a/c"));
//! ```

/// Path manipulation and resolution utilities
pub mod paths;

pub use paths::{clean_pattern, file_extension, make_absolute, normalize_lexically};

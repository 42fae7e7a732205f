//! Pattern matching primitives
//!
//! Pure functions shared by every tool check: glob handling, filesystem
//! path matching and command-string matching.

pub mod command;
pub mod glob;
pub mod path;

pub use self::command::{anchored, check_path_operation, mentions_path, CMD_POSITION_PREFIX};
pub use self::glob::{glob_to_regex, is_glob};
pub use self::path::{expand_home, match_path};

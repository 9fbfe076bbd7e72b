//! Detect file paths and row/column references in terminal output.
//!
//! Tools print "path plus location" in wildly different shapes — `foo:339:12`,
//! `foo(339,12)`, `"foo", line 339, col 12`, git diff headers — and this crate
//! recognizes them one line at a time. All detection is pure: no I/O, no state
//! between calls, results borrow read-only from the input line.
//!
//! ```
//! use termlinks::{OperatingSystem, detect_links};
//!
//! let links = detect_links("src/main.rs:42:7", OperatingSystem::NonWindows);
//! assert_eq!(links[0].path.text, "src/main.rs");
//! assert_eq!(links[0].suffix.unwrap().row, Some(42));
//! ```

pub mod links;
pub mod suffix;
pub mod types;

pub use links::detect_links;
pub use suffix::{detect_link_suffixes, get_link_suffix, remove_link_suffix};
pub use types::{LinkSuffix, OperatingSystem, ParsedLink, TextSpan};

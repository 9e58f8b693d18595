//! # CLI Module
//!
//! The command-line layer of bucketify. It turns parsed arguments into a
//! [`Config`](crate::config::Config), runs the
//! [`Organizer`](crate::organizer::Organizer) and reports the outcome.
//!
//! ## Commands
//!
//! - [`sync`] - Sorts saved tracks into playlists, or shows what it would do
//!   with `--dry-run`
//!
//! ## Error Handling
//!
//! Functions in this module do not return errors. Fatal conditions are
//! printed with the `error!` macro, which exits with status 1; an expired or
//! invalid token gets its own message.
//!
//! ## Usage Patterns
//!
//! ```bash
//! bucketify sync --dry-run              # Show the plan without changing anything
//! bucketify sync --group-by quarter     # Sort into "2023 Q1", "2023 Q2", ...
//! bucketify sync --group-by month       # Sort into "2023 01", "2023 02", ...
//! ```

mod sync;

pub use sync::sync;

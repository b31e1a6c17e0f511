//! Front matter extraction for Quire documents.
//!
//! Documents may start with a YAML block delimited by `---` lines:
//!
//! ```text
//! ---
//! title: Getting Started
//! tags: [intro, setup]
//! ---
//!
//! Body markdown...
//! ```
//!
//! [`split`] separates that block from the body. Parsing is fail-soft: a
//! malformed block produces empty [`FrontMatter`] rather than an error, and
//! the block is still removed from the body.

mod front_matter;
mod split;

pub use front_matter::FrontMatter;
pub use split::split;

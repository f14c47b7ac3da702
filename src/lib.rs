//! subcue - which caption applies right now?
//!
//! Builds a write-once timeline from pre-parsed caption intervals and answers
//! floor queries ("what is shown at offset t") through a fixed-depth digit
//! trie backed by an ordered event array. A polling driver turns an external
//! playback position into caption transitions.
//!
//! # Modules
//!
//! - [`timeline`] - Event model, sequencer, digit index and lookup
//! - [`player`] - Time sources, tick thread, polling and deadline drivers
//! - [`captions`] - Loading caption records from JSON
//! - [`config`] - TOML configuration
//! - [`cli`] - Command-line definitions (shared with the binary)

pub mod captions;
pub mod cli;
pub mod config;
pub mod player;
pub mod timeline;

pub use config::Config;
pub use timeline::{Caption, DisplayEvent, Timeline, TimelineError};

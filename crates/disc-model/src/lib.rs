//! Discjob Disc Model
//!
//! Defines the resolved state a job is generated from:
//! - **Titles:** the scanned title catalog, its selection, visibility and order
//! - **Track states:** three audio and three subtitle slots per disc and title
//! - **Chapters:** chapter names and how a title is split into output files
//! - **Crop:** disc and title crop rectangles with their override policies
//! - **Preferences:** mixdowns, presets, templates and auto-selection rules
//!
//! Title-level state only applies when the title overrides the disc; the
//! resolution rules live on [`Disc`] and are the only place that decision
//! is made.

pub mod catalog;
pub mod chapter_ranges;
pub mod chapters;
pub mod crop;
pub mod error;
mod persist;
pub mod preferences;
pub mod session;
pub mod title;
pub mod tracks;

pub use catalog::*;
pub use chapter_ranges::*;
pub use chapters::*;
pub use crop::*;
pub use error::*;
pub use preferences::*;
pub use session::*;
pub use title::*;
pub use tracks::*;

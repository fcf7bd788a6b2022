//! Discjob Job Engine
//!
//! Turns a validated disc session into transcoder jobs:
//! - **Validation:** ordered rules that block on errors and ask about warnings
//! - **Filenames:** token templates for output files
//! - **Commands:** one argument string per title or per episode
//! - **Queue:** FIFO job consumption with scoped chapter-name files
//!
//! Generation is deterministic; its only side effect is the temporary
//! chapter-name files, which live as long as the returned [`JobBatch`].

pub mod command;
pub mod error;
pub mod filename;
pub mod queue;
pub mod validate;

pub use command::{generate_jobs, CommandBuilder};
pub use error::EngineError;
pub use queue::{Job, JobBatch, JobQueue, TempFiles};
pub use validate::{
    AcceptWarnings, Finding, ValidationError, ValidationFailure, ValidationWarning, Validator,
    WarningPrompt,
};

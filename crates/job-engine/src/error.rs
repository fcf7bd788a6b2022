//! Job generation errors.

use discjob_common::DiscjobError;

/// Errors raised while generating jobs.
///
/// Generation only fails on data the validator rejects, on running past
/// the last representable episode number, or on the chapter-name file
/// write. Everything else is deterministic.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("Preset '{name}' is not defined")]
    UnknownPreset { name: String },

    #[error("Failed to write chapter names file for title #{title_number}: {source}")]
    ChapterFile {
        title_number: u32,
        #[source]
        source: std::io::Error,
    },

    #[error("Title #{title_number} needs an episode number past {last}")]
    EpisodeNumbersExhausted { title_number: u32, last: u32 },
}

impl From<EngineError> for DiscjobError {
    fn from(err: EngineError) -> Self {
        DiscjobError::job_generation(err.to_string())
    }
}

//! Generated jobs, the queue they are consumed from, and the temporary
//! files they depend on.

use std::collections::VecDeque;
use std::io::Write;
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use tracing::{debug, info};

/// One transcoder invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Job {
    pub title_number: u32,
    /// Episode number consumed by this job.
    pub episode_number: u32,
    /// Transcoder arguments as one space-joined string.
    pub command: String,
    pub output_path: PathBuf,
    /// Chapter-name file referenced by the command, if any.
    pub chapter_file: Option<PathBuf>,
}

/// Temporary files created while generating jobs. Every file is deleted
/// when this is dropped.
#[derive(Debug, Default)]
pub struct TempFiles {
    files: Vec<NamedTempFile>,
}

impl TempFiles {
    pub fn new() -> Self {
        Self::default()
    }

    /// Write `contents` to a new chapter-name file and return its path.
    pub fn create_chapter_file(&mut self, contents: &str) -> std::io::Result<PathBuf> {
        let mut file = tempfile::Builder::new()
            .prefix("discjob_")
            .suffix(".chapters.txt")
            .tempfile()?;
        file.write_all(contents.as_bytes())?;
        file.flush()?;

        let path = file.path().to_path_buf();
        debug!(path = %path.display(), "Created chapter names file");
        self.files.push(file);
        Ok(path)
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    pub fn paths(&self) -> impl Iterator<Item = &Path> {
        self.files.iter().map(|file| file.path())
    }
}

/// FIFO of jobs consumed one at a time from the front.
#[derive(Debug, Clone, Default)]
pub struct JobQueue {
    jobs: VecDeque<Job>,
}

impl JobQueue {
    pub fn push(&mut self, job: Job) {
        self.jobs.push_back(job);
    }

    pub fn pop_front(&mut self) -> Option<Job> {
        self.jobs.pop_front()
    }

    /// Drop every remaining job. Returns how many were dropped.
    pub fn cancel(&mut self) -> usize {
        let dropped = self.jobs.len();
        self.jobs.clear();
        dropped
    }

    pub fn len(&self) -> usize {
        self.jobs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.jobs.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Job> {
        self.jobs.iter()
    }
}

/// The jobs generated in one pass and the temporary files they reference.
///
/// The files live exactly as long as the batch, so they are released
/// whether the jobs run to completion, are cancelled, or fail.
#[derive(Debug, Default)]
pub struct JobBatch {
    queue: JobQueue,
    temp_files: TempFiles,
}

impl JobBatch {
    pub fn new(queue: JobQueue, temp_files: TempFiles) -> Self {
        Self { queue, temp_files }
    }

    pub fn queue(&self) -> &JobQueue {
        &self.queue
    }

    /// Next job to run.
    pub fn next_job(&mut self) -> Option<Job> {
        self.queue.pop_front()
    }

    /// Stop consuming: drop every remaining job.
    pub fn cancel(&mut self) -> usize {
        let dropped = self.queue.cancel();
        if dropped > 0 {
            info!(dropped, "Cancelled remaining jobs");
        }
        dropped
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    pub fn temp_files(&self) -> &TempFiles {
        &self.temp_files
    }
}

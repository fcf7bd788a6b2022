//! How a title is split into output files: whole, one chapter span, or
//! one file per episode.

use serde::{Deserialize, Serialize};

use crate::chapters::Chapters;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChapterRangeChoice {
    /// The whole title, one job.
    #[default]
    All,
    /// `[first_chapter, last_chapter]`, one job.
    Range,
    /// One job per episode.
    Episodes,
}

/// A user-defined chapter span exported as its own job.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Episode {
    pub first_chapter: u32,
    pub last_chapter: u32,
    pub title: String,
}

impl Episode {
    pub fn new(first_chapter: u32, last_chapter: u32, title: impl Into<String>) -> Self {
        Self {
            first_chapter,
            last_chapter,
            title: title.into(),
        }
    }

    pub fn is_valid_span(&self) -> bool {
        self.first_chapter <= self.last_chapter
    }

    /// `first-last`, the form the transcoder takes.
    pub fn span_arg(&self) -> String {
        format!("{}-{}", self.first_chapter, self.last_chapter)
    }
}

/// What is wrong with a chapter-range configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RangeProblem {
    /// Range mode with first chapter after last chapter.
    InvalidRange,
    /// Episodes mode without any episode.
    NoEpisodes,
    /// Episode at this 0-based index ends before it starts.
    InvalidEpisode { index: usize },
    /// Episode at this 0-based index has no title.
    UntitledEpisode { index: usize },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChapterRanges {
    #[serde(default)]
    pub process_choice: ChapterRangeChoice,
    #[serde(default = "one")]
    pub first_chapter: u32,
    #[serde(default = "one")]
    pub last_chapter: u32,
    #[serde(default)]
    pub episodes: Vec<Episode>,
}

fn one() -> u32 {
    1
}

impl Default for ChapterRanges {
    fn default() -> Self {
        Self {
            process_choice: ChapterRangeChoice::All,
            first_chapter: 1,
            last_chapter: 1,
            episodes: Vec::new(),
        }
    }
}

impl ChapterRanges {
    /// Full-title range for the given chapters.
    pub fn for_chapters(chapters: &Chapters) -> Self {
        let mut ranges = Self::default();
        ranges.reset_range(chapters);
        ranges
    }

    /// Append an episode and return it.
    pub fn add_episode(&mut self, first_chapter: u32, last_chapter: u32, title: impl Into<String>) -> &Episode {
        let index = self.episodes.len();
        self.episodes.push(Episode::new(first_chapter, last_chapter, title));
        &self.episodes[index]
    }

    /// Remove the episode at `index`, if present.
    pub fn remove(&mut self, index: usize) -> Option<Episode> {
        (index < self.episodes.len()).then(|| self.episodes.remove(index))
    }

    /// Append a duplicate of the episode at `index`.
    pub fn copy_episode(&mut self, index: usize) -> Option<&Episode> {
        let copy = self.episodes.get(index)?.clone();
        self.episodes.push(copy);
        self.episodes.last()
    }

    pub fn clear_episodes(&mut self) {
        self.episodes.clear();
    }

    pub fn has_episodes(&self) -> bool {
        !self.episodes.is_empty()
    }

    /// Stretch the range over every chapter of the title.
    pub fn reset_range(&mut self, chapters: &Chapters) {
        self.first_chapter = chapters.lowest_chapter_number().unwrap_or(1);
        self.last_chapter = chapters.highest_chapter_number().unwrap_or(1);
    }

    /// The `-c` argument for Range mode: `N` or `first-last`.
    pub fn range_arg(&self) -> String {
        if self.first_chapter == self.last_chapter {
            self.first_chapter.to_string()
        } else {
            format!("{}-{}", self.first_chapter, self.last_chapter)
        }
    }

    /// Check the configuration for the active mode.
    pub fn check(&self) -> Result<(), RangeProblem> {
        match self.process_choice {
            ChapterRangeChoice::All => Ok(()),
            ChapterRangeChoice::Range => {
                if self.first_chapter > self.last_chapter {
                    Err(RangeProblem::InvalidRange)
                } else {
                    Ok(())
                }
            }
            ChapterRangeChoice::Episodes => {
                if self.episodes.is_empty() {
                    return Err(RangeProblem::NoEpisodes);
                }
                for (index, episode) in self.episodes.iter().enumerate() {
                    if !episode.is_valid_span() {
                        return Err(RangeProblem::InvalidEpisode { index });
                    }
                    if episode.title.is_empty() {
                        return Err(RangeProblem::UntitledEpisode { index });
                    }
                }
                Ok(())
            }
        }
    }

    /// Episodes are configured but will be ignored.
    pub fn has_leftover_episodes(&self) -> bool {
        self.process_choice != ChapterRangeChoice::Episodes && self.has_episodes()
    }
}

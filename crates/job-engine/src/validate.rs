//! Pre-generation validation.
//!
//! A fixed battery of rules runs in order over the resolved disc state.
//! Each rule reports confirmable warnings and at most one blocking error.
//! [`Validator::run`] asks a [`WarningPrompt`] about every warning as it is
//! reached; a declined warning aborts, and the first error stops the run.

use discjob_common::DiscjobError;
use discjob_disc_model::{
    ChapterProcessChoice, ChapterRangeChoice, Disc, MatchFlags, Preferences, RangeProblem, Title,
    TrackSlot,
};
use tracing::{debug, info};

use crate::filename::{has_chapter_range_episode_key, has_episode_title_key, is_mp4};

/// A problem that blocks job generation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("The disc has no source.")]
    MissingSource,

    #[error("The disc has no destination directory.")]
    MissingDestination,

    #[error("The disc has no filename template.")]
    MissingFilenameTemplate,

    #[error("Preset '{name}' is not defined.")]
    UnknownPreset { name: String },

    #[error("This video does not have any titles (at least no visible titles).")]
    NoVisibleTitles,

    #[error("None of the visible titles for this video are selected.")]
    NoSelectedTitles,

    #[error("Disc audio track row #{} has an audio track selected but no mixdowns.", .row + 1)]
    DiscAudioWithoutMixdown { row: usize },

    #[error("Audio track #{track} does not exist for title #{title_number}.")]
    DiscAudioTrackMissing { track: String, title_number: u32 },

    #[error("Subtitle track #{track} does not exist for title #{title_number}.")]
    DiscSubtitleTrackMissing { track: String, title_number: u32 },

    #[error("Title #{title_number} has chapter range processing selected but the last chapter is before the first chapter.")]
    InvalidChapterRange { title_number: u32 },

    #[error("Title #{title_number} has chapter episode processing selected but no episodes are defined.")]
    NoEpisodes { title_number: u32 },

    #[error("Title #{title_number}, episode #{} has its last chapter before its first chapter.", .index + 1)]
    InvalidEpisode { title_number: u32, index: usize },

    #[error("Title #{title_number}, episode #{} does not have a title.", .index + 1)]
    UntitledEpisode { title_number: u32, index: usize },

    #[error("Title #{title_number}, audio track row #{} has an audio track selected but no mixdowns.", .row + 1)]
    TitleAudioWithoutMixdown { title_number: u32, row: usize },

    #[error("Custom audio track #{track} does not exist for title #{title_number}.")]
    TitleAudioTrackMissing { track: String, title_number: u32 },

    #[error("Custom subtitle track #{track} does not exist for title #{title_number}.")]
    TitleSubtitleTrackMissing { track: String, title_number: u32 },

    #[error("Title #{title_number} does not have a title name but the filename template needs one.")]
    MissingTitleName { title_number: u32 },

    #[error("Title #{title_number} does not have chapter episode processing selected but the filename template needs it.")]
    EpisodesRequired { title_number: u32 },
}

/// A questionable state the user may choose to continue past.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationWarning {
    #[error("One or more selected titles are not visible and will not be processed.")]
    SelectedTitlesHidden,

    #[error("Disc audio track row #{} has a mixdown selected but no audio track.", .row + 1)]
    DiscMixdownWithoutTrack { row: usize },

    #[error("This video does not have any audio tracks selected.")]
    NoDiscAudioTracks,

    #[error("Disc subtitle track row #{} has an option (forced, burn, default) selected but no subtitle track.", .row + 1)]
    DiscSubtitleOptionWithoutTrack { row: usize },

    #[error("Title #{title_number} has a mix of default and custom chapter names.")]
    MixedChapterNames { title_number: u32 },

    #[error("Title #{title_number} has custom chapter names but chapter names processing is not selected.")]
    CustomNamesNotProcessed { title_number: u32 },

    #[error("Title #{title_number} has chapter names processing selected but no custom chapter names.")]
    NamesWithoutCustomNames { title_number: u32 },

    #[error("Title #{title_number} has chapter episodes but chapter episode processing is not selected.")]
    LeftoverEpisodes { title_number: u32 },

    #[error("Title #{title_number}, audio track row #{} has custom audio settings but custom audio processing is not selected.", .row + 1)]
    UnusedTitleAudio { title_number: u32, row: usize },

    #[error("Title #{title_number}, audio track row #{} has a mixdown selected but no audio track.", .row + 1)]
    TitleMixdownWithoutTrack { title_number: u32, row: usize },

    #[error("Title #{title_number} has custom audio processing selected but no audio tracks.")]
    NoTitleAudioTracks { title_number: u32 },

    #[error("Title #{title_number}, subtitle track row #{} has custom subtitle settings but custom subtitle processing is not selected.", .row + 1)]
    UnusedTitleSubtitles { title_number: u32, row: usize },

    #[error("Title #{title_number}, subtitle track row #{} has an option (forced, burn, default) selected but no subtitle track.", .row + 1)]
    TitleSubtitleOptionWithoutTrack { title_number: u32, row: usize },

    #[error("Title #{title_number} uses mixdown '{mixdown}' which an MP4 file cannot carry.")]
    Mp4IncompatibleAudio { title_number: u32, mixdown: String },
}

/// One rule outcome.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Finding {
    Warn(ValidationWarning),
    Fail(ValidationError),
}

/// Why validation did not pass.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationFailure {
    #[error(transparent)]
    Error(#[from] ValidationError),

    #[error("Declined to continue: {0}")]
    Aborted(ValidationWarning),
}

impl From<ValidationFailure> for DiscjobError {
    fn from(failure: ValidationFailure) -> Self {
        match failure {
            ValidationFailure::Error(err) => DiscjobError::validation(err.to_string()),
            ValidationFailure::Aborted(_) => DiscjobError::Aborted,
        }
    }
}

/// Decides whether to continue past a warning.
pub trait WarningPrompt {
    fn confirm(&mut self, warning: &ValidationWarning) -> bool;
}

impl<F: FnMut(&ValidationWarning) -> bool> WarningPrompt for F {
    fn confirm(&mut self, warning: &ValidationWarning) -> bool {
        self(warning)
    }
}

/// Continues past every warning.
#[derive(Debug, Clone, Copy, Default)]
pub struct AcceptWarnings;

impl WarningPrompt for AcceptWarnings {
    fn confirm(&mut self, _warning: &ValidationWarning) -> bool {
        true
    }
}

type Rule<'a> = fn(&Validator<'a>, &mut Vec<ValidationWarning>) -> Result<(), ValidationError>;

/// Runs the rule battery over a disc session.
#[derive(Debug, Clone, Copy)]
pub struct Validator<'a> {
    disc: &'a Disc,
    prefs: &'a Preferences,
}

impl<'a> Validator<'a> {
    pub fn new(disc: &'a Disc, prefs: &'a Preferences) -> Self {
        Self { disc, prefs }
    }

    /// The battery, in the order it runs.
    fn rules() -> [(&'static str, Rule<'a>); 9] {
        [
            ("disc_settings", Self::check_disc_settings),
            ("disc_titles", Self::check_disc_titles),
            ("disc_audio_track_states", Self::check_disc_audio),
            ("disc_subtitle_track_states", Self::check_disc_subtitles),
            ("title_chapters", Self::check_title_chapters),
            ("title_chapter_ranges", Self::check_title_chapter_ranges),
            ("title_audio_track_states", Self::check_title_audio),
            ("title_subtitle_track_states", Self::check_title_subtitles),
            ("filename_template", Self::check_filename_template),
        ]
    }

    /// Run every rule, prompting for each warning.
    ///
    /// Returns the warnings the prompt accepted.
    pub fn run(&self, prompt: &mut impl WarningPrompt) -> Result<Vec<ValidationWarning>, ValidationFailure> {
        let mut accepted = Vec::new();
        for (name, rule) in Self::rules() {
            let mut warnings = Vec::new();
            let outcome = rule(self, &mut warnings);
            debug!(rule = name, warnings = warnings.len(), failed = outcome.is_err(), "Ran validation rule");

            for warning in warnings {
                if !prompt.confirm(&warning) {
                    info!(%warning, "Validation aborted");
                    return Err(ValidationFailure::Aborted(warning));
                }
                accepted.push(warning);
            }
            outcome?;
        }
        Ok(accepted)
    }

    /// Every finding in rule order, ending at the first error.
    pub fn findings(&self) -> Vec<Finding> {
        let mut findings = Vec::new();
        for (_, rule) in Self::rules() {
            let mut warnings = Vec::new();
            let outcome = rule(self, &mut warnings);
            findings.extend(warnings.into_iter().map(Finding::Warn));
            if let Err(err) = outcome {
                findings.push(Finding::Fail(err));
                break;
            }
        }
        findings
    }

    fn matching(&self) -> Vec<&'a Title> {
        self.disc
            .titles
            .matching_titles(MatchFlags::SELECTED_VISIBLE)
            .titles
    }

    fn check_disc_settings(&self, _: &mut Vec<ValidationWarning>) -> Result<(), ValidationError> {
        let disc = self.disc;
        if disc.source.as_os_str().is_empty() {
            return Err(ValidationError::MissingSource);
        }
        if disc.destination.as_os_str().is_empty() {
            return Err(ValidationError::MissingDestination);
        }
        if disc.filename_template.trim().is_empty() {
            return Err(ValidationError::MissingFilenameTemplate);
        }
        if !self.prefs.presets.has_name(&disc.preset) {
            return Err(ValidationError::UnknownPreset {
                name: disc.preset.clone(),
            });
        }
        Ok(())
    }

    fn check_disc_titles(&self, warnings: &mut Vec<ValidationWarning>) -> Result<(), ValidationError> {
        let titles = &self.disc.titles;
        if !titles.iter().any(|t| t.visible) {
            return Err(ValidationError::NoVisibleTitles);
        }
        if !titles.iter().any(|t| t.visible && t.selected) {
            return Err(ValidationError::NoSelectedTitles);
        }
        if titles.iter().any(|t| !t.visible && t.selected) {
            warnings.push(ValidationWarning::SelectedTitlesHidden);
        }
        Ok(())
    }

    fn check_disc_audio(&self, warnings: &mut Vec<ValidationWarning>) -> Result<(), ValidationError> {
        let matching = self.matching();
        let mut selected_found = false;

        for (row, slot) in self.disc.audio_track_states.slots.iter().enumerate() {
            if !slot.is_track_selected() {
                if slot.has_mixdown() {
                    warnings.push(ValidationWarning::DiscMixdownWithoutTrack { row });
                }
                continue;
            }
            selected_found = true;
            if !slot.has_mixdown() {
                return Err(ValidationError::DiscAudioWithoutMixdown { row });
            }
            for title in matching.iter().filter(|t| !t.audio_track_states.is_custom()) {
                if !title.has_audio_track(&slot.track) {
                    return Err(ValidationError::DiscAudioTrackMissing {
                        track: slot.track.clone(),
                        title_number: title.title_number,
                    });
                }
            }
        }

        if !selected_found {
            warnings.push(ValidationWarning::NoDiscAudioTracks);
        }
        Ok(())
    }

    fn check_disc_subtitles(&self, warnings: &mut Vec<ValidationWarning>) -> Result<(), ValidationError> {
        let matching = self.matching();

        for (row, slot) in self.disc.subtitle_track_states.slots.iter().enumerate() {
            if !slot.is_track_selected() {
                if slot.has_option() {
                    warnings.push(ValidationWarning::DiscSubtitleOptionWithoutTrack { row });
                }
                continue;
            }
            for title in matching.iter().filter(|t| !t.subtitle_track_states.is_custom()) {
                if !title.has_subtitle_track(&slot.track) {
                    return Err(ValidationError::DiscSubtitleTrackMissing {
                        track: slot.track.clone(),
                        title_number: title.title_number,
                    });
                }
            }
        }
        Ok(())
    }

    fn check_title_chapters(&self, warnings: &mut Vec<ValidationWarning>) -> Result<(), ValidationError> {
        for title in self.matching() {
            let title_number = title.title_number;
            let check = title.chapters.check_chapter_names();
            let names = title.chapters.process_choice == ChapterProcessChoice::Names;

            if check.has_default_names && check.has_custom_names {
                warnings.push(ValidationWarning::MixedChapterNames { title_number });
            }
            if check.has_custom_names && !names {
                warnings.push(ValidationWarning::CustomNamesNotProcessed { title_number });
            }
            if names && !check.has_custom_names {
                warnings.push(ValidationWarning::NamesWithoutCustomNames { title_number });
            }
        }
        Ok(())
    }

    fn check_title_chapter_ranges(&self, warnings: &mut Vec<ValidationWarning>) -> Result<(), ValidationError> {
        for title in self.matching() {
            let title_number = title.title_number;
            title.chapter_ranges.check().map_err(|problem| match problem {
                RangeProblem::InvalidRange => ValidationError::InvalidChapterRange { title_number },
                RangeProblem::NoEpisodes => ValidationError::NoEpisodes { title_number },
                RangeProblem::InvalidEpisode { index } => {
                    ValidationError::InvalidEpisode { title_number, index }
                }
                RangeProblem::UntitledEpisode { index } => {
                    ValidationError::UntitledEpisode { title_number, index }
                }
            })?;

            if title.chapter_ranges.has_leftover_episodes() {
                warnings.push(ValidationWarning::LeftoverEpisodes { title_number });
            }
        }
        Ok(())
    }

    fn check_title_audio(&self, warnings: &mut Vec<ValidationWarning>) -> Result<(), ValidationError> {
        for title in self.matching() {
            let title_number = title.title_number;
            let states = &title.audio_track_states;

            if !states.is_custom() {
                for (row, slot) in states.slots.iter().enumerate() {
                    if slot.is_dirty() {
                        warnings.push(ValidationWarning::UnusedTitleAudio { title_number, row });
                    }
                }
                continue;
            }

            let mut selected_found = false;
            for (row, slot) in states.slots.iter().enumerate() {
                if !slot.is_track_selected() {
                    if slot.has_mixdown() {
                        warnings.push(ValidationWarning::TitleMixdownWithoutTrack { title_number, row });
                    }
                    continue;
                }
                selected_found = true;
                if !slot.has_mixdown() {
                    return Err(ValidationError::TitleAudioWithoutMixdown { title_number, row });
                }
                if !title.has_audio_track(&slot.track) {
                    return Err(ValidationError::TitleAudioTrackMissing {
                        track: slot.track.clone(),
                        title_number,
                    });
                }
            }
            if !selected_found {
                warnings.push(ValidationWarning::NoTitleAudioTracks { title_number });
            }
        }
        Ok(())
    }

    fn check_title_subtitles(&self, warnings: &mut Vec<ValidationWarning>) -> Result<(), ValidationError> {
        for title in self.matching() {
            let title_number = title.title_number;
            let states = &title.subtitle_track_states;

            if !states.is_custom() {
                for (row, slot) in states.slots.iter().enumerate() {
                    if slot.is_dirty() {
                        warnings.push(ValidationWarning::UnusedTitleSubtitles { title_number, row });
                    }
                }
                continue;
            }

            for (row, slot) in states.slots.iter().enumerate() {
                if !slot.is_track_selected() {
                    if slot.has_option() {
                        warnings.push(ValidationWarning::TitleSubtitleOptionWithoutTrack {
                            title_number,
                            row,
                        });
                    }
                    continue;
                }
                if !title.has_subtitle_track(&slot.track) {
                    return Err(ValidationError::TitleSubtitleTrackMissing {
                        track: slot.track.clone(),
                        title_number,
                    });
                }
            }
        }
        Ok(())
    }

    fn check_filename_template(&self, warnings: &mut Vec<ValidationWarning>) -> Result<(), ValidationError> {
        let template = &self.disc.filename_template;
        let episode_title_needed = has_episode_title_key(template);
        let chapter_title_needed = has_chapter_range_episode_key(template);
        let check_mp4 = self.prefs.options.check_mp4_audio && is_mp4(template);

        for title in self.matching() {
            let title_number = title.title_number;
            if episode_title_needed && title.title.is_empty() {
                return Err(ValidationError::MissingTitleName { title_number });
            }
            if chapter_title_needed
                && title.chapter_ranges.process_choice != ChapterRangeChoice::Episodes
            {
                return Err(ValidationError::EpisodesRequired { title_number });
            }
            if check_mp4 {
                self.check_mp4_audio(title, warnings);
            }
        }
        Ok(())
    }

    fn check_mp4_audio(&self, title: &Title, warnings: &mut Vec<ValidationWarning>) {
        let states = self.disc.effective_audio(title);
        for (_, slot) in states.selected() {
            for name in slot.mixdowns() {
                let incompatible = self
                    .prefs
                    .mixdowns
                    .get_by_name(name)
                    .is_some_and(|m| m.encoder.starts_with("copy:dts"));
                if incompatible {
                    warnings.push(ValidationWarning::Mp4IncompatibleAudio {
                        title_number: title.title_number,
                        mixdown: name.to_string(),
                    });
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use discjob_disc_model::{
        AudioTrack, AudioTrackState, Chapters, SubtitleTrackState, TitleCatalog,
        TrackProcessChoice,
    };

    fn feature() -> Title {
        let mut title = Title::new(1, 5400.0).with_chapters(Chapters::from_durations(&[600.0; 9]));
        title.selected = true;
        title.title = "Feature".to_string();
        title.audio_tracks.push(AudioTrack {
            track_number: 1,
            language: "English".to_string(),
            codec: "AC3".to_string(),
            channels: "5.1 ch".to_string(),
            description: String::new(),
        });
        title
    }

    fn valid_disc() -> Disc {
        let mut disc = Disc::new("/media/MOVIE", TitleCatalog::from_titles(vec![feature()]).unwrap());
        disc.destination = "/videos".into();
        disc.title = "Movie".to_string();
        disc.preset = "Film".to_string();
        disc.filename_template = "<title>.mkv".to_string();
        disc.audio_track_states.slots[0] = AudioTrackState::new("1", "AAC 5.1", "");
        disc
    }

    fn first_error(disc: &Disc) -> Option<ValidationError> {
        Validator::new(disc, &Preferences::default())
            .findings()
            .into_iter()
            .find_map(|f| match f {
                Finding::Fail(err) => Some(err),
                Finding::Warn(_) => None,
            })
    }

    fn warnings(disc: &Disc) -> Vec<ValidationWarning> {
        Validator::new(disc, &Preferences::default())
            .findings()
            .into_iter()
            .filter_map(|f| match f {
                Finding::Warn(w) => Some(w),
                Finding::Fail(_) => None,
            })
            .collect()
    }

    #[test]
    fn test_valid_disc_passes() {
        let disc = valid_disc();
        assert!(Validator::new(&disc, &Preferences::default()).findings().is_empty());
        let mut prompt = |_: &ValidationWarning| false;
        assert_eq!(Validator::new(&disc, &Preferences::default()).run(&mut prompt), Ok(vec![]));
    }

    #[test]
    fn test_no_visible_titles_is_an_error() {
        let mut disc = valid_disc();
        disc.titles.get_mut(1).unwrap().visible = false;
        assert_eq!(first_error(&disc), Some(ValidationError::NoVisibleTitles));

        disc.titles.get_mut(1).unwrap().visible = true;
        disc.titles.get_mut(1).unwrap().selected = false;
        assert_eq!(first_error(&disc), Some(ValidationError::NoSelectedTitles));
    }

    #[test]
    fn test_disc_settings_checked_first() {
        let mut disc = valid_disc();
        disc.preset = "Nope".to_string();
        disc.titles.get_mut(1).unwrap().visible = false;
        assert_eq!(
            first_error(&disc),
            Some(ValidationError::UnknownPreset {
                name: "Nope".to_string()
            })
        );
    }

    #[test]
    fn test_disc_audio_rules() {
        let mut disc = valid_disc();
        disc.audio_track_states.slots[1] = AudioTrackState::new("", "COPYAC3", "");
        disc.audio_track_states.slots[2] = AudioTrackState::new("4", "COPYAC3", "");
        let findings = Validator::new(&disc, &Preferences::default()).findings();
        assert_eq!(
            findings,
            vec![
                Finding::Warn(ValidationWarning::DiscMixdownWithoutTrack { row: 1 }),
                Finding::Fail(ValidationError::DiscAudioTrackMissing {
                    track: "4".to_string(),
                    title_number: 1
                }),
            ]
        );

        // A custom title is not checked against disc-level tracks.
        disc.titles.get_mut(1).unwrap().audio_track_states.process_choice = TrackProcessChoice::Custom;
        disc.titles.get_mut(1).unwrap().audio_track_states.slots[0] =
            AudioTrackState::new("1", "COPYAC3", "");
        assert_eq!(first_error(&disc), None);

        disc.audio_track_states.slots[0].primary_mixdown.clear();
        assert_eq!(
            first_error(&disc),
            Some(ValidationError::DiscAudioWithoutMixdown { row: 0 })
        );
    }

    #[test]
    fn test_no_audio_is_a_warning() {
        let mut disc = valid_disc();
        disc.audio_track_states.clear_slots();
        assert_eq!(warnings(&disc), vec![ValidationWarning::NoDiscAudioTracks]);
    }

    #[test]
    fn test_title_subtitle_rules() {
        let mut disc = valid_disc();
        let title = disc.titles.get_mut(1).unwrap();
        title.subtitle_track_states.slots[1] = SubtitleTrackState::new("3");
        assert_eq!(
            warnings(&disc),
            vec![ValidationWarning::UnusedTitleSubtitles { title_number: 1, row: 1 }]
        );

        let title = disc.titles.get_mut(1).unwrap();
        title.subtitle_track_states.process_choice = TrackProcessChoice::Custom;
        assert_eq!(
            first_error(&disc),
            Some(ValidationError::TitleSubtitleTrackMissing {
                track: "3".to_string(),
                title_number: 1
            })
        );
    }

    #[test]
    fn test_chapter_range_errors() {
        let mut disc = valid_disc();
        let ranges = &mut disc.titles.get_mut(1).unwrap().chapter_ranges;
        ranges.process_choice = ChapterRangeChoice::Range;
        ranges.first_chapter = 6;
        ranges.last_chapter = 2;
        assert_eq!(
            first_error(&disc),
            Some(ValidationError::InvalidChapterRange { title_number: 1 })
        );

        let ranges = &mut disc.titles.get_mut(1).unwrap().chapter_ranges;
        ranges.process_choice = ChapterRangeChoice::Episodes;
        ranges.add_episode(1, 4, "One");
        ranges.add_episode(5, 9, "");
        let err = first_error(&disc).unwrap();
        assert_eq!(err, ValidationError::UntitledEpisode { title_number: 1, index: 1 });
        assert_eq!(err.to_string(), "Title #1, episode #2 does not have a title.");
    }

    #[test]
    fn test_chapter_name_warnings() {
        let mut disc = valid_disc();
        let chapters = &mut disc.titles.get_mut(1).unwrap().chapters;
        chapters.chapters[0].title = "Opening".to_string();
        assert_eq!(
            warnings(&disc),
            vec![
                ValidationWarning::MixedChapterNames { title_number: 1 },
                ValidationWarning::CustomNamesNotProcessed { title_number: 1 },
            ]
        );
    }

    #[test]
    fn test_filename_template_requirements() {
        let mut disc = valid_disc();
        disc.filename_template = "<cetitle>.mkv".to_string();
        assert_eq!(
            first_error(&disc),
            Some(ValidationError::EpisodesRequired { title_number: 1 })
        );

        disc.filename_template = "<eptitle>.mkv".to_string();
        disc.titles.get_mut(1).unwrap().title.clear();
        assert_eq!(
            first_error(&disc),
            Some(ValidationError::MissingTitleName { title_number: 1 })
        );
    }

    #[test]
    fn test_mp4_audio_warning() {
        let mut prefs = Preferences::default();
        prefs.options.check_mp4_audio = true;
        let mut disc = valid_disc();
        disc.filename_template = "<title>.mp4".to_string();
        disc.audio_track_states.slots[0] = AudioTrackState::new("1", "COPYDTS", "");

        let findings = Validator::new(&disc, &prefs).findings();
        assert_eq!(
            findings,
            vec![Finding::Warn(ValidationWarning::Mp4IncompatibleAudio {
                title_number: 1,
                mixdown: "COPYDTS".to_string()
            })]
        );
    }

    #[test]
    fn test_declined_warning_aborts_before_later_rules() {
        let mut disc = valid_disc();
        disc.audio_track_states.clear_slots();
        disc.filename_template = "<cetitle>.mkv".to_string();

        let mut asked = Vec::new();
        let mut prompt = |w: &ValidationWarning| {
            asked.push(w.clone());
            false
        };
        let result = Validator::new(&disc, &Preferences::default()).run(&mut prompt);
        assert_eq!(
            result,
            Err(ValidationFailure::Aborted(ValidationWarning::NoDiscAudioTracks))
        );
        assert_eq!(asked.len(), 1);

        let result = Validator::new(&disc, &Preferences::default()).run(&mut AcceptWarnings);
        assert_eq!(
            result,
            Err(ValidationFailure::Error(ValidationError::EpisodesRequired { title_number: 1 }))
        );
        assert!(DiscjobError::from(ValidationFailure::Aborted(
            ValidationWarning::SelectedTitlesHidden
        ))
        .is_aborted());
    }
}

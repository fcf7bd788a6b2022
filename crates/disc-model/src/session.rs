//! The disc session: disc-wide defaults plus the title catalog.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::catalog::{MatchFlags, TitleCatalog, VisibilityRule};
use crate::crop::{DiscCrop, DiscCropChoice, ResolvedCrop};
use crate::error::SessionError;
use crate::persist;
use crate::preferences::Preferences;
use crate::title::Title;
use crate::tracks::{AudioTrackStates, SubtitleTrackStates, TrackStates};

/// Everything known about the disc being processed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Disc {
    /// Disc image or device path handed to the transcoder.
    pub source: PathBuf,
    /// Directory generated files are written to.
    pub destination: PathBuf,
    /// Disc title, the `<title>` filename token.
    pub title: String,
    pub disc_label: String,
    /// Name of the preset whose settings end every command.
    pub preset: String,
    pub filename_template: String,
    pub first_episode_number: u32,
    /// Zero-padded width of the `<epno>` token.
    pub episode_number_precision: usize,
    /// Pass `--no-dvdnav`.
    pub skip_navigation: bool,
    pub hide_short_titles: bool,
    pub notes: String,
    pub audio_track_states: AudioTrackStates,
    pub subtitle_track_states: SubtitleTrackStates,
    pub custom_crop: DiscCrop,
    pub titles: TitleCatalog,
}

impl Default for Disc {
    fn default() -> Self {
        Self {
            source: PathBuf::new(),
            destination: PathBuf::new(),
            title: String::new(),
            disc_label: String::new(),
            preset: String::new(),
            filename_template: String::new(),
            first_episode_number: 1,
            episode_number_precision: 2,
            skip_navigation: false,
            hide_short_titles: true,
            notes: String::new(),
            audio_track_states: AudioTrackStates::default(),
            subtitle_track_states: SubtitleTrackStates::default(),
            custom_crop: DiscCrop::default(),
            titles: TitleCatalog::default(),
        }
    }
}

impl Disc {
    /// A freshly scanned disc.
    pub fn new(source: impl Into<PathBuf>, titles: TitleCatalog) -> Self {
        Self {
            source: source.into(),
            titles,
            ..Self::default()
        }
    }

    /// Load a session from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SessionError> {
        let path = path.as_ref();
        let disc: Self = persist::read_json(path)?;
        disc.check_order_numbers()?;
        info!(path = %path.display(), titles = disc.titles.len(), "Loaded disc session");
        Ok(disc)
    }

    /// Save the session to a JSON file.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), SessionError> {
        let path = path.as_ref();
        self.check_order_numbers()?;
        persist::write_json(path, self)?;
        info!(path = %path.display(), "Saved disc session");
        Ok(())
    }

    fn check_order_numbers(&self) -> Result<(), SessionError> {
        let mut titles = HashSet::new();
        let mut orders = HashSet::new();
        for title in self.titles.iter() {
            if !titles.insert(title.title_number) {
                return Err(SessionError::ValidationError {
                    message: format!("title #{} appears more than once", title.title_number),
                });
            }
            if !orders.insert(title.order_number) {
                return Err(SessionError::ValidationError {
                    message: format!(
                        "order number {} is used by more than one title",
                        title.order_number
                    ),
                });
            }
        }
        Ok(())
    }

    /// Audio slots that apply to `title`.
    pub fn effective_audio<'a>(&'a self, title: &'a Title) -> &'a AudioTrackStates {
        TrackStates::effective(&title.audio_track_states, &self.audio_track_states)
    }

    /// Subtitle slots that apply to `title`.
    pub fn effective_subtitles<'a>(&'a self, title: &'a Title) -> &'a SubtitleTrackStates {
        TrackStates::effective(&title.subtitle_track_states, &self.subtitle_track_states)
    }

    /// Crop that applies to `title`.
    pub fn effective_crop(&self, title: &Title) -> ResolvedCrop {
        title.custom_crop.resolve(&title.auto_crop, &self.custom_crop)
    }

    /// Re-apply the visibility threshold after preferences or the
    /// hide-short-titles flag changed.
    pub fn refresh_visibility(&mut self, prefs: &Preferences) {
        self.titles.set_visibility_rule(VisibilityRule {
            minimum_title_seconds: prefs.auto_title.minimum_title_seconds,
            hide_short_titles: self.hide_short_titles,
        });
    }

    /// Title number the disc-level find operations read from: the first
    /// selected, visible title, else the first title.
    fn find_source(&self) -> Option<u32> {
        self.titles
            .matching_titles(MatchFlags::SELECTED_VISIBLE)
            .first_or_default()
            .map(|t| t.title_number)
    }

    /// Auto-select disc-level audio and subtitle slots from the first
    /// selected, visible title. Returns the title used.
    pub fn autoset_disc_tracks(&mut self, prefs: &Preferences) -> Option<u32> {
        let number = self.find_source()?;
        self.autoset_disc_tracks_from(number, prefs);
        Some(number)
    }

    fn autoset_disc_tracks_from(&mut self, title_number: u32, prefs: &Preferences) {
        let Some(title) = self.titles.get(title_number) else {
            return;
        };
        self.audio_track_states.autoset(
            &title.audio_tracks,
            &prefs.auto_audio_tracks,
            &prefs.auto_mixdown,
        );
        self.subtitle_track_states
            .autoset(&title.subtitle_tracks, &prefs.auto_subtitle);
        debug!(title_number, "Disc track states auto-set");
    }

    /// Copy the first selected, visible title's detected crop into the
    /// disc custom crop and switch the disc to custom.
    pub fn find_disc_crop(&mut self) -> Option<u32> {
        let number = self.find_source()?;
        let auto_crop = self.titles.get(number)?.auto_crop;
        self.custom_crop.copy(&auto_crop);
        self.custom_crop.process_choice = DiscCropChoice::Custom;
        Some(number)
    }

    /// Fill in the defaults a newly scanned disc gets from preferences.
    pub fn apply_new_source_defaults(&mut self, prefs: &Preferences) {
        let new_source = &prefs.new_source;
        if new_source.use_default_destination && self.destination.as_os_str().is_empty() {
            self.destination = new_source.default_destination.clone();
        }
        if new_source.first_template {
            if let Some(template) = prefs.filename_templates.first() {
                self.filename_template = template.to_string();
            }
        }
        if new_source.first_preset {
            if let Some(preset) = prefs.presets.first() {
                self.preset = preset.name.clone();
            }
        }

        self.refresh_visibility(prefs);

        let longest = if prefs.auto_title.auto_select_longest_title {
            self.titles.select_longest()
        } else {
            self.titles
                .matching_titles(MatchFlags::ALL)
                .longest_title
                .map(|t| t.title_number)
        };

        if let Some(number) = longest {
            self.autoset_disc_tracks_from(number, prefs);
            if prefs.auto_crop.auto_copy_crop {
                if let Some(title) = self.titles.get(number) {
                    let auto_crop = title.auto_crop;
                    self.custom_crop.copy(&auto_crop);
                }
            }
        }
        if prefs.auto_crop.auto_reset_crop {
            self.custom_crop.process_choice = DiscCropChoice::Automatic;
        }

        info!(
            destination = %self.destination.display(),
            template = %self.filename_template,
            preset = %self.preset,
            longest_title = ?longest,
            "Applied new source defaults"
        );
    }
}

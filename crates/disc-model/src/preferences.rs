//! User preferences: mixdowns, presets, filename templates, and the
//! auto-selection rules applied when a new disc is scanned.
//!
//! Preferences are an explicit value passed into every operation that needs
//! them. When the user edits preferences mid-session the caller replaces the
//! value and re-runs whatever depends on it (for example
//! [`crate::Disc::refresh_visibility`]).

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::SessionError;
use crate::persist;
use crate::title::CodecFamily;

/// Complete preferences document (`preferences.json`).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Preferences {
    pub options: Options,
    pub new_source: NewSource,
    pub filename_templates: FilenameTemplates,
    pub filename_replacement: FilenameReplacement,
    pub auto_crop: AutoCrop,
    pub auto_title: AutoTitle,
    pub auto_audio_tracks: AutoAudioTracks,
    pub auto_subtitle: AutoSubtitle,
    pub auto_mixdown: AutoMixdown,
    pub presets: PresetCatalog,
    pub mixdowns: MixdownCatalog,
}

impl Preferences {
    /// Load preferences from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SessionError> {
        persist::read_json(path.as_ref())
    }

    /// Load preferences, falling back to defaults when the file is missing
    /// or unreadable.
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        if !path.exists() {
            return Self::default();
        }
        match Self::load(path) {
            Ok(preferences) => preferences,
            Err(e) => {
                tracing::warn!("Falling back to default preferences: {e}");
                Self::default()
            }
        }
    }

    /// Save preferences to a JSON file.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), SessionError> {
        persist::write_json(path.as_ref(), self)
    }
}

/// General options.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Options {
    /// Prefix exported chapter names with their exported chapter number.
    pub number_chapter_names: bool,

    /// Warn when an MP4 template is combined with audio that MP4 can't carry.
    pub check_mp4_audio: bool,

    /// After importing chapter names, label a short, default-named last
    /// chapter with `text_import_short_chapter`.
    pub check_import_short_chapter: bool,

    /// Label used for a short last chapter.
    pub text_import_short_chapter: String,

    /// Chapters at or below this many seconds count as short.
    pub short_chapter_seconds: f64,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            number_chapter_names: false,
            check_mp4_audio: false,
            check_import_short_chapter: false,
            text_import_short_chapter: "end of title".to_string(),
            short_chapter_seconds: 20.0,
        }
    }
}

/// What to fill in when a new source is scanned.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct NewSource {
    pub use_default_destination: bool,
    pub default_destination: PathBuf,
    /// Reset the disc filename template to the first configured template.
    pub first_template: bool,
    /// Reset the disc preset to the first configured preset.
    pub first_preset: bool,
}

impl Default for NewSource {
    fn default() -> Self {
        Self {
            use_default_destination: true,
            default_destination: PathBuf::new(),
            first_template: true,
            first_preset: true,
        }
    }
}

/// Ordered list of filename templates offered to the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FilenameTemplates(pub Vec<String>);

impl Default for FilenameTemplates {
    fn default() -> Self {
        Self(
            [
                "<title>.mkv",
                "<title>.mp4",
                "<eptitle>.mkv",
                "<cetitle>.mkv",
                "<title><epno> - <eptitle>.mkv",
                "<title> - <eptitle>.mkv",
                "<title> [<preset>][<acodec>].mkv",
            ]
            .iter()
            .map(|t| t.to_string())
            .collect(),
        )
    }
}

impl FilenameTemplates {
    pub fn first(&self) -> Option<&str> {
        self.0.first().map(String::as_str)
    }
}

/// Character replacement applied to generated filenames.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilenameReplacement {
    pub enabled: bool,
    /// Every character in this string is replaced.
    pub characters: String,
    /// Text substituted for each replaced character.
    pub replacement: String,
}

impl Default for FilenameReplacement {
    fn default() -> Self {
        Self {
            enabled: false,
            characters: "\\/:*?'<>|".to_string(),
            replacement: "_".to_string(),
        }
    }
}

/// Automatic crop handling on a new source.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AutoCrop {
    pub auto_reset_crop: bool,
    /// Copy the longest title's detected crop into the disc custom crop.
    pub auto_copy_crop: bool,
}

impl Default for AutoCrop {
    fn default() -> Self {
        Self {
            auto_reset_crop: true,
            auto_copy_crop: true,
        }
    }
}

/// Title selection and visibility rules.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AutoTitle {
    pub auto_select_longest_title: bool,
    /// Titles shorter than this are hidden when the disc hides short titles.
    pub minimum_title_seconds: f64,
}

impl Default for AutoTitle {
    fn default() -> Self {
        Self {
            auto_select_longest_title: true,
            minimum_title_seconds: 30.0,
        }
    }
}

/// Rules for auto-selecting audio tracks.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AutoAudioTracks {
    pub auto_select_preferred_language: bool,
    pub preferred_language: String,
    pub auto_select_51: bool,
    pub auto_select_dts: bool,
    pub auto_select_fallback: bool,
}

impl Default for AutoAudioTracks {
    fn default() -> Self {
        Self {
            auto_select_preferred_language: false,
            preferred_language: String::new(),
            auto_select_51: true,
            auto_select_dts: false,
            auto_select_fallback: true,
        }
    }
}

/// Rules for auto-selecting subtitle tracks.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AutoSubtitle {
    pub auto_select_preferred_language: bool,
    pub preferred_language: String,
    pub auto_select_subtitle: bool,
    pub subtitle_forced: bool,
    pub subtitle_burn: bool,
    pub subtitle_default: bool,
}

impl Default for AutoSubtitle {
    fn default() -> Self {
        Self {
            auto_select_preferred_language: false,
            preferred_language: String::new(),
            auto_select_subtitle: true,
            subtitle_forced: false,
            subtitle_burn: false,
            subtitle_default: false,
        }
    }
}

/// Primary/secondary mixdown names for one codec family.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MixdownChoice {
    pub primary: Option<String>,
    pub secondary: Option<String>,
}

impl MixdownChoice {
    pub fn new(primary: Option<&str>, secondary: Option<&str>) -> Self {
        Self {
            primary: primary.map(str::to_string),
            secondary: secondary.map(str::to_string),
        }
    }
}

/// Mixdown-by-codec table used when audio tracks are auto-selected.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AutoMixdown {
    pub ac3_51: MixdownChoice,
    pub dts: MixdownChoice,
    pub dtshd: MixdownChoice,
    pub ac3: MixdownChoice,
    pub other: MixdownChoice,
}

impl AutoMixdown {
    pub fn for_family(&self, family: CodecFamily) -> &MixdownChoice {
        match family {
            CodecFamily::Ac351 => &self.ac3_51,
            CodecFamily::Dts => &self.dts,
            CodecFamily::DtsHd => &self.dtshd,
            CodecFamily::Ac3 => &self.ac3,
            CodecFamily::Other => &self.other,
        }
    }
}

/// A named bundle of encoder settings appended verbatim to each command.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Preset {
    pub name: String,
    /// Short text used by the `<preset>` filename token.
    pub tag: String,
    pub settings: String,
}

impl Preset {
    pub fn new(name: &str, tag: &str, settings: &str) -> Self {
        Self {
            name: name.to_string(),
            tag: tag.to_string(),
            settings: settings.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PresetCatalog(pub Vec<Preset>);

impl Default for PresetCatalog {
    fn default() -> Self {
        Self(vec![
            Preset::new(
                "Film",
                "Film",
                "--detelecine --decomb --auto-anamorphic --modulus 16 -e x264 -q 20 --vfr --x264-preset=slow --x264-profile=high --x264-tune=\"film\" --h264-level=\"4.1\" -v 1",
            ),
            Preset::new(
                "Animation",
                "Anime",
                "--detelecine --decomb --auto-anamorphic --modulus 16 -e x264 -q 20 --vfr --x264-preset=slow --x264-profile=high --x264-tune=\"animation\" --h264-level=\"4.1\" -v 1",
            ),
            Preset::new(
                "Trailer",
                "Trailer",
                "--detelecine --decomb --auto-anamorphic --modulus 16 -e x264 -q 24 --vfr --x264-preset=medium --x264-profile=main --x264-tune=\"film\" --h264-level=\"4.1\" -v 1",
            ),
            Preset::new(
                "Extra",
                "Extra",
                "--detelecine --decomb --modulus 16 -e x264 -q 22 --vfr --encoder-preset=faster --encoder-profile=main --encoder-tune=\"film\" --encoder-level=\"4.1\" -v 1",
            ),
        ])
    }
}

impl PresetCatalog {
    pub fn get_by_name(&self, name: &str) -> Option<&Preset> {
        self.0.iter().find(|p| p.name == name)
    }

    pub fn has_name(&self, name: &str) -> bool {
        self.get_by_name(name).is_some()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(|p| p.name.as_str())
    }

    pub fn first(&self) -> Option<&Preset> {
        self.0.first()
    }
}

/// A named audio encoding profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Mixdown {
    pub name: String,
    /// Short text used by the `<acodec>` filename token.
    pub tag: String,
    pub encoder: String,
    pub mixdown: String,
    pub sample_rate: String,
    pub bitrate: String,
    pub dynamic_range_compression: String,
    pub gain: String,
}

impl Mixdown {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        name: &str,
        tag: &str,
        encoder: &str,
        mixdown: &str,
        sample_rate: &str,
        bitrate: &str,
        dynamic_range_compression: &str,
        gain: &str,
    ) -> Self {
        Self {
            name: name.to_string(),
            tag: tag.to_string(),
            encoder: encoder.to_string(),
            mixdown: mixdown.to_string(),
            sample_rate: sample_rate.to_string(),
            bitrate: bitrate.to_string(),
            dynamic_range_compression: dynamic_range_compression.to_string(),
            gain: gain.to_string(),
        }
    }
}

/// The shared mixdown catalog, looked up by mixdown name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MixdownCatalog(pub Vec<Mixdown>);

impl Default for MixdownCatalog {
    fn default() -> Self {
        Self(vec![
            Mixdown::new("COPYAC3", "AC3", "copy:ac3", "auto", "Auto", "0", "0.0", "0"),
            Mixdown::new("COPYDTS", "DTS", "copy:dts", "auto", "Auto", "0", "0.0", "0"),
            Mixdown::new("COPYDTSHD", "DTSHD", "copy:dtshd", "auto", "Auto", "0", "0.0", "0"),
            Mixdown::new("AAC 5.1", "AAC", "av_aac", "5point1", "Auto", "192", "0.0", "0"),
            Mixdown::new("AAC DPL2", "AAC", "av_aac", "dpl2", "Auto", "192", "0.0", "0"),
        ])
    }
}

impl MixdownCatalog {
    pub fn get_by_name(&self, name: &str) -> Option<&Mixdown> {
        if name.is_empty() {
            return None;
        }
        self.0.iter().find(|m| m.name == name)
    }

    pub fn has_name(&self, name: &str) -> bool {
        self.get_by_name(name).is_some()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(|m| m.name.as_str())
    }
}

//! Disc titles and their probe-reported tracks.

use serde::{Deserialize, Serialize};

use crate::chapter_ranges::ChapterRanges;
use crate::chapters::Chapters;
use crate::crop::{Rect, TitleCrop, TitleCropChoice};
use crate::preferences::Preferences;
use crate::tracks::{AudioTrackStates, SubtitleTrackStates, TrackProcessChoice};

/// Audio codec grouping used by the auto-mixdown table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CodecFamily {
    Ac351,
    Dts,
    DtsHd,
    Ac3,
    Other,
}

impl CodecFamily {
    pub fn is_dts(self) -> bool {
        matches!(self, Self::Dts | Self::DtsHd)
    }
}

/// A probe-reported audio track. Read-only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AudioTrack {
    pub track_number: u32,
    #[serde(default)]
    pub language: String,
    #[serde(default)]
    pub codec: String,
    /// Channel layout as reported, for example `5.1 ch`.
    #[serde(default)]
    pub channels: String,
    #[serde(default)]
    pub description: String,
}

impl AudioTrack {
    /// Id stored in track slots.
    pub fn track_id(&self) -> String {
        self.track_number.to_string()
    }

    pub fn is_51(&self) -> bool {
        self.channels.contains("5.1")
    }

    pub fn codec_family(&self) -> CodecFamily {
        let codec = self.codec.to_ascii_lowercase();
        if codec.contains("dts-hd") || codec.contains("dtshd") {
            CodecFamily::DtsHd
        } else if codec.contains("dts") {
            CodecFamily::Dts
        } else if codec.contains("ac3") && self.is_51() {
            CodecFamily::Ac351
        } else if codec.contains("ac3") {
            CodecFamily::Ac3
        } else {
            CodecFamily::Other
        }
    }
}

/// A probe-reported subtitle track. Read-only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubtitleTrack {
    pub track_number: u32,
    #[serde(default)]
    pub language: String,
    #[serde(default)]
    pub description: String,
}

impl SubtitleTrack {
    pub fn track_id(&self) -> String {
        self.track_number.to_string()
    }
}

/// One playable program stream on the disc.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Title {
    /// Stable probe identifier.
    pub title_number: u32,
    /// User-adjustable processing order, unique within the catalog.
    pub order_number: u32,
    #[serde(default)]
    pub selected: bool,
    #[serde(default = "visible_default")]
    pub visible: bool,
    /// Length in seconds.
    pub duration_secs: f64,
    #[serde(default)]
    pub audio_tracks: Vec<AudioTrack>,
    #[serde(default)]
    pub subtitle_tracks: Vec<SubtitleTrack>,
    /// Probe-detected crop.
    #[serde(default)]
    pub auto_crop: Rect,
    #[serde(default)]
    pub chapters: Chapters,
    #[serde(default)]
    pub chapter_ranges: ChapterRanges,
    #[serde(default)]
    pub audio_track_states: AudioTrackStates,
    #[serde(default)]
    pub subtitle_track_states: SubtitleTrackStates,
    #[serde(default)]
    pub custom_crop: TitleCrop,
    /// User-editable name used by filename templates.
    #[serde(default)]
    pub title: String,
}

fn visible_default() -> bool {
    true
}

impl Title {
    pub fn new(title_number: u32, duration_secs: f64) -> Self {
        Self {
            title_number,
            order_number: title_number,
            selected: false,
            visible: true,
            duration_secs,
            audio_tracks: Vec::new(),
            subtitle_tracks: Vec::new(),
            auto_crop: Rect::default(),
            chapters: Chapters::default(),
            chapter_ranges: ChapterRanges::default(),
            audio_track_states: AudioTrackStates::default(),
            subtitle_track_states: SubtitleTrackStates::default(),
            custom_crop: TitleCrop::default(),
            title: String::new(),
        }
    }

    /// Attach chapters and stretch the chapter range over them.
    pub fn with_chapters(mut self, chapters: Chapters) -> Self {
        self.chapter_ranges.reset_range(&chapters);
        self.chapters = chapters;
        self
    }

    pub fn has_audio_track(&self, track_id: &str) -> bool {
        self.audio_tracks.iter().any(|t| t.track_id() == track_id)
    }

    pub fn has_subtitle_track(&self, track_id: &str) -> bool {
        self.subtitle_tracks.iter().any(|t| t.track_id() == track_id)
    }

    /// Auto-select this title's own audio and subtitle slots and switch
    /// both collections to custom.
    pub fn autoset_tracks(&mut self, prefs: &Preferences) {
        self.audio_track_states
            .autoset(&self.audio_tracks, &prefs.auto_audio_tracks, &prefs.auto_mixdown);
        self.audio_track_states.process_choice = TrackProcessChoice::Custom;

        self.subtitle_track_states
            .autoset(&self.subtitle_tracks, &prefs.auto_subtitle);
        self.subtitle_track_states.process_choice = TrackProcessChoice::Custom;
    }

    /// Copy the probe-detected crop into the custom crop and use it.
    pub fn find_crop(&mut self) {
        self.custom_crop.copy(&self.auto_crop);
        self.custom_crop.process_choice = TitleCropChoice::Custom;
    }

    pub fn clear_audio_track_states(&mut self) {
        self.audio_track_states.reset();
    }

    pub fn clear_subtitle_track_states(&mut self) {
        self.subtitle_track_states.reset();
    }

    pub fn clear_crop(&mut self) {
        self.custom_crop.reset();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn track(codec: &str, channels: &str) -> AudioTrack {
        AudioTrack {
            track_number: 1,
            language: "English".to_string(),
            codec: codec.to_string(),
            channels: channels.to_string(),
            description: String::new(),
        }
    }

    #[test]
    fn test_codec_family() {
        assert_eq!(track("AC3", "5.1 ch").codec_family(), CodecFamily::Ac351);
        assert_eq!(track("AC3", "2.0 ch").codec_family(), CodecFamily::Ac3);
        assert_eq!(track("DTS", "5.1 ch").codec_family(), CodecFamily::Dts);
        assert_eq!(track("DTS-HD MA", "7.1 ch").codec_family(), CodecFamily::DtsHd);
        assert_eq!(track("TrueHD", "7.1 ch").codec_family(), CodecFamily::Other);
        assert!(CodecFamily::DtsHd.is_dts());
    }

    #[test]
    fn test_find_and_clear_crop() {
        let mut title = Title::new(1, 3600.0);
        title.auto_crop = Rect::new(70, 72, 0, 0);
        title.find_crop();
        assert!(title.custom_crop.is_custom());
        assert_eq!(title.custom_crop.rect, title.auto_crop);

        title.clear_crop();
        assert_eq!(title.custom_crop, TitleCrop::default());
    }

    #[test]
    fn test_autoset_tracks_switches_to_custom() {
        let mut title = Title::new(1, 3600.0);
        title.audio_tracks.push(track("AC3", "5.1 ch"));
        title.subtitle_tracks.push(SubtitleTrack {
            track_number: 1,
            language: "English".to_string(),
            description: String::new(),
        });

        title.autoset_tracks(&Preferences::default());
        assert!(title.audio_track_states.is_custom());
        assert!(title.subtitle_track_states.is_custom());
        assert_eq!(title.audio_track_states.selected_tracks(), vec!["1"]);
        assert!(title.has_audio_track("1"));
        assert!(!title.has_subtitle_track("2"));

        title.clear_audio_track_states();
        assert!(!title.audio_track_states.is_custom());
    }

    #[test]
    fn test_with_chapters_sets_range() {
        let title = Title::new(3, 100.0).with_chapters(Chapters::from_durations(&[10.0; 6]));
        assert_eq!(title.chapter_ranges.first_chapter, 1);
        assert_eq!(title.chapter_ranges.last_chapter, 6);
    }
}

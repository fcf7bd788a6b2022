//! Audio and subtitle track states.
//!
//! Both the disc and every title carry exactly [`TRACK_SLOTS`] override
//! slots. A title's slots only apply when its collection is switched to
//! [`TrackProcessChoice::Custom`]; otherwise the disc-level slots win. That
//! rule lives in [`TrackStates::effective`] and nowhere else.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::preferences::{AutoAudioTracks, AutoMixdown, AutoSubtitle, MixdownCatalog};
use crate::title::{AudioTrack, SubtitleTrack};

/// Number of override slots in every track state collection.
pub const TRACK_SLOTS: usize = 3;

/// Whether a title uses its own track slots or inherits the disc's.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrackProcessChoice {
    #[default]
    Default,
    Custom,
}

/// Behaviour shared by audio and subtitle slots.
pub trait TrackSlot: Default {
    /// Selected source track id, empty when the slot is unused.
    fn track(&self) -> &str;

    /// True when the slot carries a mixdown or an option flag.
    fn has_settings(&self) -> bool;

    fn is_track_selected(&self) -> bool {
        !self.track().is_empty()
    }

    /// True when anything at all is set on the slot.
    fn is_dirty(&self) -> bool {
        self.is_track_selected() || self.has_settings()
    }

    fn clear(&mut self) {
        *self = Self::default();
    }
}

/// A fixed-arity collection of track slots plus its override mode.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackStates<S> {
    #[serde(default)]
    pub process_choice: TrackProcessChoice,
    pub slots: [S; TRACK_SLOTS],
}

impl<S: TrackSlot> TrackStates<S> {
    /// The state that applies to a title: its own when custom, else the disc's.
    pub fn effective<'a>(title: &'a Self, disc: &'a Self) -> &'a Self {
        match title.process_choice {
            TrackProcessChoice::Custom => title,
            TrackProcessChoice::Default => disc,
        }
    }

    pub fn is_custom(&self) -> bool {
        self.process_choice == TrackProcessChoice::Custom
    }

    pub fn slot(&self, row: usize) -> Option<&S> {
        self.slots.get(row)
    }

    pub fn slot_mut(&mut self, row: usize) -> Option<&mut S> {
        self.slots.get_mut(row)
    }

    /// Slots with a selected track, in row order, paired with their row.
    pub fn selected(&self) -> impl Iterator<Item = (usize, &S)> {
        self.slots
            .iter()
            .enumerate()
            .filter(|(_, slot)| slot.is_track_selected())
    }

    /// Selected track ids in row order.
    pub fn selected_tracks(&self) -> Vec<&str> {
        self.selected().map(|(_, slot)| slot.track()).collect()
    }

    pub fn has_selected_track(&self) -> bool {
        self.selected().next().is_some()
    }

    /// True when any slot has anything set.
    pub fn is_dirty(&self) -> bool {
        self.slots.iter().any(TrackSlot::is_dirty)
    }

    /// Empty every slot, keeping the process choice.
    pub fn clear_slots(&mut self) {
        self.slots.iter_mut().for_each(TrackSlot::clear);
    }

    /// Empty every slot and fall back to the disc-level state.
    pub fn reset(&mut self) {
        self.process_choice = TrackProcessChoice::Default;
        self.clear_slots();
    }
}

/// One audio override slot.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AudioTrackState {
    pub track: String,
    pub primary_mixdown: String,
    pub secondary_mixdown: String,
}

impl AudioTrackState {
    pub fn new(track: &str, primary_mixdown: &str, secondary_mixdown: &str) -> Self {
        Self {
            track: track.to_string(),
            primary_mixdown: primary_mixdown.to_string(),
            secondary_mixdown: secondary_mixdown.to_string(),
        }
    }

    pub fn has_mixdown(&self) -> bool {
        !self.primary_mixdown.is_empty() || !self.secondary_mixdown.is_empty()
    }

    /// Non-empty mixdown names, primary first.
    pub fn mixdowns(&self) -> impl Iterator<Item = &str> {
        [self.primary_mixdown.as_str(), self.secondary_mixdown.as_str()]
            .into_iter()
            .filter(|name| !name.is_empty())
    }
}

impl TrackSlot for AudioTrackState {
    fn track(&self) -> &str {
        &self.track
    }

    fn has_settings(&self) -> bool {
        self.has_mixdown()
    }
}

/// One subtitle override slot.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SubtitleTrackState {
    pub track: String,
    pub forced: bool,
    pub burn: bool,
    pub default: bool,
}

impl SubtitleTrackState {
    pub fn new(track: &str) -> Self {
        Self {
            track: track.to_string(),
            ..Self::default()
        }
    }

    pub fn has_option(&self) -> bool {
        self.forced || self.burn || self.default
    }
}

impl TrackSlot for SubtitleTrackState {
    fn track(&self) -> &str {
        &self.track
    }

    fn has_settings(&self) -> bool {
        self.has_option()
    }
}

pub type AudioTrackStates = TrackStates<AudioTrackState>;
pub type SubtitleTrackStates = TrackStates<SubtitleTrackState>;

impl TrackStates<AudioTrackState> {
    /// Mixdown tags for every (selected track, mixdown) pair, row order,
    /// primary before secondary. Names missing from the catalog are skipped.
    pub fn get_mixdown_tags(&self, catalog: &MixdownCatalog) -> Vec<String> {
        self.selected()
            .flat_map(|(_, slot)| slot.mixdowns())
            .filter_map(|name| catalog.get_by_name(name))
            .map(|mixdown| mixdown.tag.clone())
            .collect()
    }

    /// Fill the slots from the available tracks.
    ///
    /// Candidates are the preferred-language tracks when that rule is on and
    /// matches anything, otherwise all tracks. The first 5.1 track and the
    /// first DTS track are taken when enabled; the first candidate is the
    /// fallback. Mixdowns come from the per-codec table.
    pub fn autoset(&mut self, tracks: &[AudioTrack], rules: &AutoAudioTracks, table: &AutoMixdown) {
        self.clear_slots();

        let mut candidates: Vec<&AudioTrack> = tracks.iter().collect();
        if rules.auto_select_preferred_language && !rules.preferred_language.is_empty() {
            let preferred: Vec<&AudioTrack> = candidates
                .iter()
                .copied()
                .filter(|t| t.language.eq_ignore_ascii_case(&rules.preferred_language))
                .collect();
            if !preferred.is_empty() {
                candidates = preferred;
            }
        }

        let mut chosen: Vec<&AudioTrack> = Vec::with_capacity(TRACK_SLOTS);
        if rules.auto_select_51 {
            if let Some(track) = candidates.iter().copied().find(|t| t.is_51()) {
                chosen.push(track);
            }
        }
        if rules.auto_select_dts {
            let dts = candidates
                .iter()
                .copied()
                .find(|t| t.codec_family().is_dts() && !chosen.contains(t));
            if let Some(track) = dts {
                chosen.push(track);
            }
        }
        if chosen.is_empty() && rules.auto_select_fallback {
            if let Some(track) = candidates.first().copied() {
                chosen.push(track);
            }
        }

        for (slot, track) in self.slots.iter_mut().zip(chosen) {
            let choice = table.for_family(track.codec_family());
            slot.track = track.track_id();
            slot.primary_mixdown = choice.primary.clone().unwrap_or_default();
            slot.secondary_mixdown = choice.secondary.clone().unwrap_or_default();
            debug!(
                track = %slot.track,
                primary = %slot.primary_mixdown,
                secondary = %slot.secondary_mixdown,
                "Auto-selected audio track"
            );
        }
    }
}

impl TrackStates<SubtitleTrackState> {
    /// Set or clear `burn` on a slot.
    ///
    /// Setting it clears `default` on the same slot and both flags on every
    /// other slot. Out-of-range rows are ignored.
    pub fn set_burn(&mut self, row: usize, value: bool) {
        if row >= TRACK_SLOTS {
            return;
        }
        if value {
            self.clear_exclusive_flags();
        }
        self.slots[row].burn = value;
    }

    /// Set or clear `default` on a slot, with the same exclusivity as burn.
    pub fn set_default(&mut self, row: usize, value: bool) {
        if row >= TRACK_SLOTS {
            return;
        }
        if value {
            self.clear_exclusive_flags();
        }
        self.slots[row].default = value;
    }

    fn clear_exclusive_flags(&mut self) {
        for slot in &mut self.slots {
            slot.burn = false;
            slot.default = false;
        }
    }

    /// Fill the slots from the available subtitle tracks.
    pub fn autoset(&mut self, tracks: &[SubtitleTrack], rules: &AutoSubtitle) {
        self.clear_slots();
        if !rules.auto_select_subtitle {
            return;
        }

        let filter_language =
            rules.auto_select_preferred_language && !rules.preferred_language.is_empty();
        let candidates = tracks
            .iter()
            .filter(|t| !filter_language || t.language.eq_ignore_ascii_case(&rules.preferred_language))
            .take(TRACK_SLOTS);

        let mut filled = 0;
        for (slot, track) in self.slots.iter_mut().zip(candidates) {
            slot.track = track.track_id();
            slot.forced = rules.subtitle_forced;
            filled += 1;
        }
        if filled == 0 {
            return;
        }

        if rules.subtitle_burn {
            self.set_burn(0, true);
        } else if rules.subtitle_default {
            self.set_default(0, true);
        }
        debug!(tracks = ?self.selected_tracks(), "Auto-selected subtitle tracks");
    }
}

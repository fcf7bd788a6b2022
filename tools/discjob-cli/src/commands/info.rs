//! Show session information.

use std::path::PathBuf;

use discjob_common::format_duration_secs;
use discjob_disc_model::{MatchFlags, Preferences, TrackProcessChoice};

use super::load_session;

pub fn run(path: PathBuf, prefs: &Preferences) -> anyhow::Result<()> {
    let disc = load_session(&path)?;

    println!("Disc: {}", disc.title);
    println!("  Label: {}", disc.disc_label);
    println!("  Source: {}", disc.source.display());
    println!("  Destination: {}", disc.destination.display());
    println!("  Preset: {}", disc.preset);
    println!("  Template: {}", disc.filename_template);
    println!(
        "  Episodes: from {} ({} digits)",
        disc.first_episode_number, disc.episode_number_precision
    );
    if !disc.notes.is_empty() {
        println!("  Notes: {}", disc.notes);
    }
    println!();

    println!("Disc audio:");
    for (row, slot) in disc.audio_track_states.selected() {
        let mixdowns: Vec<_> = slot.mixdowns().collect();
        println!("  {}: track {} [{}]", row + 1, slot.track, mixdowns.join(", "));
    }
    println!("Disc subtitles:");
    for (row, slot) in disc.subtitle_track_states.selected() {
        println!(
            "  {}: track {} (forced: {}, burn: {}, default: {})",
            row + 1,
            slot.track,
            slot.forced,
            slot.burn,
            slot.default
        );
    }
    println!();

    let matching = disc.titles.matching_titles(MatchFlags::ALL);
    let longest = matching.longest_title.map(|t| t.title_number);
    println!("Titles (processing order):");
    for title in &matching.titles {
        let mut flags = Vec::new();
        if title.selected {
            flags.push("selected");
        }
        if !title.visible {
            flags.push("hidden");
        }
        if Some(title.title_number) == longest {
            flags.push("longest");
        }
        if title.audio_track_states.process_choice == TrackProcessChoice::Custom {
            flags.push("custom audio");
        }
        if title.subtitle_track_states.process_choice == TrackProcessChoice::Custom {
            flags.push("custom subtitles");
        }

        println!(
            "  #{:<3} {}  {:>2} chapters  {} audio  {} subtitles  {}",
            title.title_number,
            format_duration_secs(title.duration_secs),
            title.chapters.len(),
            title.audio_tracks.len(),
            title.subtitle_tracks.len(),
            flags.join(", ")
        );
        if !title.title.is_empty() {
            println!("        \"{}\"", title.title);
        }
        for episode in &title.chapter_ranges.episodes {
            println!(
                "        episode {}: \"{}\"",
                episode.span_arg(),
                episode.title
            );
        }
        let crop = disc.effective_crop(title);
        println!("        crop: {:?} {}", crop.policy, crop.rect.to_arg());
    }

    let threshold = prefs.auto_title.minimum_title_seconds;
    if disc.hide_short_titles {
        println!();
        println!("Titles shorter than {threshold}s are hidden.");
    }

    Ok(())
}

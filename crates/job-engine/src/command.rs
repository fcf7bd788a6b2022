//! Transcoder command generation.
//!
//! Arguments are emitted in a fixed order the transcoder's flag precedence
//! depends on: input, output, title, audio, subtitles, navigation, crop,
//! chapters, chapter range, then the preset's settings verbatim.

use discjob_common::DiscjobResult;
use discjob_disc_model::{
    ChapterProcessChoice, ChapterRangeChoice, Disc, Episode, MatchFlags, Preferences, Preset,
    Title,
};
use tracing::{debug, info, warn};

use crate::error::EngineError;
use crate::filename::{apply_replacement, build_filename, format_episode_number, FilenameValues};
use crate::queue::{Job, JobBatch, JobQueue, TempFiles};
use crate::validate::{Validator, WarningPrompt};

/// Builds jobs from a disc session and the preferences it was set up with.
#[derive(Debug, Clone, Copy)]
pub struct CommandBuilder<'a> {
    disc: &'a Disc,
    prefs: &'a Preferences,
}

/// Per-pair audio argument lists, positionally aligned.
#[derive(Debug, Default)]
struct AudioArgs {
    tracks: Vec<String>,
    encoders: Vec<String>,
    mixdowns: Vec<String>,
    sample_rates: Vec<String>,
    bitrates: Vec<String>,
    drcs: Vec<String>,
    gains: Vec<String>,
}

impl<'a> CommandBuilder<'a> {
    pub fn new(disc: &'a Disc, prefs: &'a Preferences) -> Self {
        Self { disc, prefs }
    }

    fn preset(&self) -> Result<&'a Preset, EngineError> {
        self.prefs
            .presets
            .get_by_name(&self.disc.preset)
            .ok_or_else(|| EngineError::UnknownPreset {
                name: self.disc.preset.clone(),
            })
    }

    /// Output filename (without directory) for one job.
    pub fn output_filename(
        &self,
        title: &Title,
        episode_number: u32,
        episode: Option<&Episode>,
    ) -> Result<String, EngineError> {
        let preset = self.preset()?;
        let audio_tags = self
            .disc
            .effective_audio(title)
            .get_mixdown_tags(&self.prefs.mixdowns);
        let episode_number =
            format_episode_number(episode_number, self.disc.episode_number_precision);

        let filename = build_filename(
            &self.disc.filename_template,
            &FilenameValues {
                title: &self.disc.title,
                preset_tag: &preset.tag,
                audio_tags: &audio_tags,
                episode_number: &episode_number,
                episode_title: &title.title,
                chapter_episode_title: episode.map(|e| e.title.as_str()).unwrap_or_default(),
            },
        );
        Ok(apply_replacement(&filename, &self.prefs.filename_replacement))
    }

    fn audio_args(&self, title: &Title) -> AudioArgs {
        let mut args = AudioArgs::default();
        for (_, slot) in self.disc.effective_audio(title).selected() {
            for name in slot.mixdowns() {
                let Some(mixdown) = self.prefs.mixdowns.get_by_name(name) else {
                    warn!(
                        title_number = title.title_number,
                        mixdown = name,
                        "Skipping unknown mixdown"
                    );
                    continue;
                };
                args.tracks.push(slot.track.clone());
                args.encoders.push(mixdown.encoder.clone());
                args.mixdowns.push(mixdown.mixdown.clone());
                args.sample_rates.push(mixdown.sample_rate.clone());
                args.bitrates.push(mixdown.bitrate.clone());
                args.drcs.push(mixdown.dynamic_range_compression.clone());
                args.gains.push(mixdown.gain.clone());
            }
        }
        args
    }

    /// Build one job.
    ///
    /// A chapter-name file, when the title needs one, is registered with
    /// `temp_files` so its lifetime is tied to the caller's batch.
    pub fn make_command_line_for_title(
        &self,
        title: &Title,
        episode_number: u32,
        episode: Option<&Episode>,
        temp_files: &mut TempFiles,
    ) -> Result<Job, EngineError> {
        let preset = self.preset()?;
        let output_path = self
            .disc
            .destination
            .join(self.output_filename(title, episode_number, episode)?);

        let mut commands = vec![
            format!("-i \"{}\"", self.disc.source.display()),
            format!("-o \"{}\"", output_path.display()),
            format!("-t {}", title.title_number),
        ];

        let audio = self.audio_args(title);
        if !audio.tracks.is_empty() {
            commands.push(format!("-a {}", audio.tracks.join(",")));
            commands.push(format!("-E {}", audio.encoders.join(",")));
            commands.push(format!("-6 {}", audio.mixdowns.join(",")));
            commands.push(format!("-R {}", audio.sample_rates.join(",")));
            commands.push(format!("-B {}", audio.bitrates.join(",")));
            commands.push(format!("-D {}", audio.drcs.join(",")));
            commands.push(format!("--gain {}", audio.gains.join(",")));
        }

        // Option indices are 1-based positions within the selected tracks.
        let mut subtitle_tracks = Vec::new();
        let mut forced = Vec::new();
        let mut burned = None;
        let mut default = None;
        for (position, (_, slot)) in (1..).zip(self.disc.effective_subtitles(title).selected()) {
            subtitle_tracks.push(slot.track.as_str());
            if slot.forced {
                forced.push(position.to_string());
            }
            if slot.burn {
                burned = Some(position);
            }
            if slot.default {
                default = Some(position);
            }
        }
        if !subtitle_tracks.is_empty() {
            commands.push(format!("-s {}", subtitle_tracks.join(",")));
            if !forced.is_empty() {
                commands.push(format!("--subtitle-forced={}", forced.join(",")));
            }
            if let Some(position) = burned {
                commands.push(format!("--subtitle-burned={position}"));
            }
            if let Some(position) = default {
                commands.push(format!("--subtitle-default={position}"));
            }
        }

        if self.disc.skip_navigation {
            commands.push("--no-dvdnav".to_string());
        }

        if let Some(rect) = self.disc.effective_crop(title).override_rect() {
            commands.push(format!("--crop {}", rect.to_arg()));
        }

        let mut chapter_file = None;
        match title.chapters.process_choice {
            ChapterProcessChoice::Off => {}
            ChapterProcessChoice::Markers => commands.push("-m".to_string()),
            ChapterProcessChoice::Names => {
                let contents = title
                    .chapters
                    .names_file_contents(self.prefs.options.number_chapter_names);
                let path = temp_files.create_chapter_file(&contents).map_err(|source| {
                    EngineError::ChapterFile {
                        title_number: title.title_number,
                        source,
                    }
                })?;
                commands.push(format!("--markers=\"{}\"", path.display()));
                chapter_file = Some(path);
            }
        }

        match (title.chapter_ranges.process_choice, episode) {
            (ChapterRangeChoice::Range, _) => {
                commands.push(format!("-c {}", title.chapter_ranges.range_arg()));
            }
            (ChapterRangeChoice::Episodes, Some(episode)) => {
                commands.push(format!("-c {}", episode.span_arg()));
            }
            _ => {}
        }

        commands.push(preset.settings.clone());

        let job = Job {
            title_number: title.title_number,
            episode_number,
            command: commands.join(" "),
            output_path,
            chapter_file,
        };
        debug!(
            title_number = job.title_number,
            episode_number,
            output = %job.output_path.display(),
            "Built job"
        );
        Ok(job)
    }

    /// Build the jobs for `titles`, in the order given.
    ///
    /// Titles split into episodes yield one job per episode; every job
    /// consumes the next episode number, starting from the disc's first
    /// episode number. On error every chapter-name file created so far is
    /// removed.
    pub fn make_command_lines(&self, titles: &[&Title]) -> Result<JobBatch, EngineError> {
        let mut temp_files = TempFiles::new();
        let mut queue = JobQueue::default();
        let mut numbers = EpisodeNumbers::starting_at(self.disc.first_episode_number);

        for title in titles {
            if title.chapter_ranges.process_choice == ChapterRangeChoice::Episodes {
                for episode in &title.chapter_ranges.episodes {
                    let episode_number = numbers.take(title.title_number)?;
                    queue.push(self.make_command_line_for_title(
                        title,
                        episode_number,
                        Some(episode),
                        &mut temp_files,
                    )?);
                }
            } else {
                let episode_number = numbers.take(title.title_number)?;
                queue.push(self.make_command_line_for_title(
                    title,
                    episode_number,
                    None,
                    &mut temp_files,
                )?);
            }
        }

        info!(
            jobs = queue.len(),
            chapter_files = temp_files.len(),
            "Generated jobs"
        );
        Ok(JobBatch::new(queue, temp_files))
    }
}

/// Hands out strictly increasing episode numbers, one per job.
#[derive(Debug)]
struct EpisodeNumbers {
    next: Option<u32>,
    last: u32,
}

impl EpisodeNumbers {
    fn starting_at(first: u32) -> Self {
        Self {
            next: Some(first),
            last: first,
        }
    }

    fn take(&mut self, title_number: u32) -> Result<u32, EngineError> {
        let number = self.next.ok_or(EngineError::EpisodeNumbersExhausted {
            title_number,
            last: self.last,
        })?;
        self.last = number;
        self.next = number.checked_add(1);
        Ok(number)
    }
}

/// Validate the disc, then build the jobs for every selected, visible title.
///
/// Nothing is generated unless validation passes.
pub fn generate_jobs(
    disc: &Disc,
    prefs: &Preferences,
    prompt: &mut impl WarningPrompt,
) -> DiscjobResult<JobBatch> {
    Validator::new(disc, prefs).run(prompt)?;
    let titles = disc.titles.matching_titles(MatchFlags::SELECTED_VISIBLE).titles;
    Ok(CommandBuilder::new(disc, prefs).make_command_lines(&titles)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use discjob_disc_model::{
        AudioTrackState, Chapters, CropPolicy, DiscCrop, DiscCropChoice, Rect, SubtitleTrackState,
        TitleCatalog, TitleCropChoice, TrackProcessChoice,
    };

    fn disc_with(title: Title) -> Disc {
        let mut disc = Disc::new("/media/SHOW", TitleCatalog::from_titles(vec![title]).unwrap());
        disc.destination = "/videos".into();
        disc.title = "Show".to_string();
        disc.preset = "Film".to_string();
        disc.filename_template = "<title>.mkv".to_string();
        disc
    }

    fn build(disc: &Disc, prefs: &Preferences) -> (Job, TempFiles) {
        let title = disc.titles.get(1).unwrap();
        let mut files = TempFiles::new();
        let job = CommandBuilder::new(disc, prefs)
            .make_command_line_for_title(title, 1, None, &mut files)
            .unwrap();
        (job, files)
    }

    #[test]
    fn test_minimal_command() {
        let prefs = Preferences::default();
        let disc = disc_with(Title::new(1, 3600.0));
        let (job, files) = build(&disc, &prefs);

        let film = &prefs.presets.get_by_name("Film").unwrap().settings;
        assert_eq!(
            job.command,
            format!("-i \"/media/SHOW\" -o \"/videos/Show.mkv\" -t 1 {film}")
        );
        assert_eq!(job.output_path, std::path::PathBuf::from("/videos/Show.mkv"));
        assert!(job.chapter_file.is_none());
        assert!(files.is_empty());
    }

    #[test]
    fn test_single_mixdown_gives_single_entries() {
        let prefs = Preferences::default();
        let mut disc = disc_with(Title::new(1, 3600.0));
        disc.audio_track_states.slots[0] = AudioTrackState::new("1", "AAC 5.1", "");

        let (job, _files) = build(&disc, &prefs);
        assert!(job.command.contains(
            "-a 1 -E av_aac -6 5point1 -R Auto -B 192 -D 0.0 --gain 0 "
        ));
    }

    #[test]
    fn test_primary_and_secondary_in_order_unknown_skipped() {
        let prefs = Preferences::default();
        let mut disc = disc_with(Title::new(1, 3600.0));
        disc.audio_track_states.slots[0] = AudioTrackState::new("1", "COPYAC3", "AAC DPL2");
        disc.audio_track_states.slots[2] = AudioTrackState::new("2", "Bogus", "");

        let (job, _files) = build(&disc, &prefs);
        assert!(job.command.contains("-a 1,1 -E copy:ac3,av_aac -6 auto,dpl2 "));
    }

    #[test]
    fn test_subtitle_indices_are_positions_in_selected_list() {
        let prefs = Preferences::default();
        let mut disc = disc_with(Title::new(1, 3600.0));
        disc.subtitle_track_states.slots[0] = SubtitleTrackState {
            track: "2".to_string(),
            burn: true,
            ..Default::default()
        };
        disc.subtitle_track_states.slots[2] = SubtitleTrackState {
            track: "4".to_string(),
            forced: true,
            default: true,
            ..Default::default()
        };

        let (job, _files) = build(&disc, &prefs);
        assert!(job.command.contains(
            "-s 2,4 --subtitle-forced=2 --subtitle-burned=1 --subtitle-default=2 "
        ));
    }

    #[test]
    fn test_custom_title_states_win() {
        let prefs = Preferences::default();
        let mut title = Title::new(1, 3600.0);
        title.audio_track_states.process_choice = TrackProcessChoice::Custom;
        title.audio_track_states.slots[1] = AudioTrackState::new("3", "COPYDTS", "");
        let mut disc = disc_with(title);
        disc.audio_track_states.slots[0] = AudioTrackState::new("1", "AAC 5.1", "");

        let (job, _files) = build(&disc, &prefs);
        assert!(job.command.contains("-a 3 -E copy:dts "));
        assert!(!job.command.contains("av_aac"));
    }

    #[test]
    fn test_argument_order_with_crop_chapters_and_range() {
        let prefs = Preferences::default();
        let mut title = Title::new(1, 3600.0).with_chapters(Chapters::from_durations(&[60.0; 8]));
        title.chapters.process_choice = ChapterProcessChoice::Markers;
        title.chapter_ranges.process_choice = ChapterRangeChoice::Range;
        title.chapter_ranges.first_chapter = 2;
        title.chapter_ranges.last_chapter = 5;
        let mut disc = disc_with(title);
        disc.skip_navigation = true;
        disc.subtitle_track_states.slots[0] = SubtitleTrackState::new("1");
        disc.custom_crop = DiscCrop {
            process_choice: DiscCropChoice::Custom,
            rect: Rect::new(10, 12, 0, 4),
        };

        let (job, _files) = build(&disc, &prefs);
        let order = ["-t 1", "-s 1", "--no-dvdnav", "--crop 10:12:0:4", "-m", "-c 2-5", "--detelecine"];
        let positions: Vec<usize> = order
            .iter()
            .map(|arg| job.command.find(arg).unwrap())
            .collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]), "{}", job.command);
    }

    #[test]
    fn test_automatic_crop_is_not_emitted() {
        let prefs = Preferences::default();
        let mut title = Title::new(1, 3600.0);
        title.auto_crop = Rect::new(60, 60, 0, 0);
        title.custom_crop.process_choice = TitleCropChoice::Automatic;
        let mut disc = disc_with(title);
        disc.custom_crop.process_choice = DiscCropChoice::Custom;

        assert_eq!(
            disc.effective_crop(disc.titles.get(1).unwrap()).policy,
            CropPolicy::Automatic
        );
        let (job, _files) = build(&disc, &prefs);
        assert!(!job.command.contains("--crop"));
    }

    #[test]
    fn test_chapter_names_file() {
        let mut prefs = Preferences::default();
        prefs.options.number_chapter_names = true;
        let mut title = Title::new(1, 3600.0).with_chapters(Chapters::from_durations(&[60.0, 60.0]));
        title.chapters.process_choice = ChapterProcessChoice::Names;
        title.chapters.chapters[0].title = "Intro".to_string();
        let disc = disc_with(title);

        let (job, files) = build(&disc, &prefs);
        let path = job.chapter_file.clone().unwrap();
        assert!(job.command.contains(&format!("--markers=\"{}\"", path.display())));
        assert_eq!(
            std::fs::read_to_string(&path).unwrap(),
            "CHAPTER01NAME=1: Intro\r\nCHAPTER02NAME=2: Chapter 02\r\n"
        );
        drop(files);
        assert!(!path.exists());
    }

    #[test]
    fn test_unknown_preset_is_an_error() {
        let prefs = Preferences::default();
        let mut disc = disc_with(Title::new(1, 3600.0));
        disc.preset = "Missing".to_string();
        let title = disc.titles.get(1).unwrap();

        let result = CommandBuilder::new(&disc, &prefs).make_command_lines(&[title]);
        assert!(matches!(result, Err(EngineError::UnknownPreset { .. })));
    }

    #[test]
    fn test_episode_numbers_continue_across_titles() {
        let prefs = Preferences::default();
        let mut first = Title::new(1, 3600.0).with_chapters(Chapters::from_durations(&[60.0; 6]));
        first.chapter_ranges.process_choice = ChapterRangeChoice::Episodes;
        first.chapter_ranges.add_episode(1, 3, "One");
        first.chapter_ranges.add_episode(4, 6, "Two");
        let second = Title::new(2, 1800.0);

        let mut disc = Disc::new(
            "/media/SHOW",
            TitleCatalog::from_titles(vec![first, second]).unwrap(),
        );
        disc.destination = "/videos".into();
        disc.title = "Show".to_string();
        disc.preset = "Film".to_string();
        disc.filename_template = "<title> <epno> <cetitle>.mkv".to_string();
        disc.first_episode_number = 7;

        let titles = disc.titles.titles_in_order();
        let mut batch = CommandBuilder::new(&disc, &prefs)
            .make_command_lines(&titles)
            .unwrap();

        let jobs: Vec<Job> = std::iter::from_fn(|| batch.next_job()).collect();
        let numbers: Vec<u32> = jobs.iter().map(|j| j.episode_number).collect();
        assert_eq!(numbers, vec![7, 8, 9]);
        assert!(jobs[0].command.contains("-c 1-3"));
        assert!(jobs[1].command.contains("-c 4-6"));
        assert!(!jobs[2].command.contains("-c "));
        assert_eq!(jobs[1].output_path, std::path::PathBuf::from("/videos/Show 08 Two.mkv"));
        assert_eq!(jobs[2].output_path, std::path::PathBuf::from("/videos/Show 09 .mkv"));
    }

    #[test]
    fn test_last_episode_number_does_not_overflow() {
        let prefs = Preferences::default();
        let mut disc = disc_with(Title::new(1, 3600.0));
        disc.first_episode_number = u32::MAX;

        let titles = disc.titles.titles_in_order();
        let mut batch = CommandBuilder::new(&disc, &prefs)
            .make_command_lines(&titles)
            .unwrap();
        assert_eq!(batch.next_job().map(|j| j.episode_number), Some(u32::MAX));
    }

    #[test]
    fn test_running_out_of_episode_numbers_is_an_error() {
        let prefs = Preferences::default();
        let mut title = Title::new(1, 3600.0).with_chapters(Chapters::from_durations(&[60.0; 4]));
        title.chapter_ranges.process_choice = ChapterRangeChoice::Episodes;
        title.chapter_ranges.add_episode(1, 2, "One");
        title.chapter_ranges.add_episode(3, 4, "Two");
        let mut disc = disc_with(title);
        disc.first_episode_number = u32::MAX;

        let titles = disc.titles.titles_in_order();
        let err = CommandBuilder::new(&disc, &prefs)
            .make_command_lines(&titles)
            .unwrap_err();
        assert!(matches!(
            err,
            EngineError::EpisodeNumbersExhausted {
                title_number: 1,
                last: u32::MAX
            }
        ));
    }
}

use std::path::{Path, PathBuf};

use discjob_common::DiscjobError;
use discjob_disc_model::{Disc, MatchFlags, Preferences};
use discjob_job_engine::{
    generate_jobs, AcceptWarnings, CommandBuilder, ValidationWarning, Validator,
};

fn fixture_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("..")
        .join("fixtures")
        .join("sample-session")
        .join("session.json")
}

fn load_fixture_disc() -> Disc {
    Disc::load(fixture_path()).expect("fixture session should load")
}

#[test]
fn fixture_session_validates_cleanly() {
    let disc = load_fixture_disc();
    let prefs = Preferences::default();

    let mut asked = Vec::new();
    let mut prompt = |warning: &ValidationWarning| {
        asked.push(warning.clone());
        true
    };
    let accepted = Validator::new(&disc, &prefs)
        .run(&mut prompt)
        .expect("fixture session should validate");
    assert!(accepted.is_empty());
    assert!(asked.is_empty());
}

#[test]
fn fixture_session_generates_one_job_per_episode() {
    let disc = load_fixture_disc();
    let prefs = Preferences::default();

    let mut batch = generate_jobs(&disc, &prefs, &mut AcceptWarnings).unwrap();
    assert_eq!(batch.len(), 3);
    // Title 1 writes a names file per episode; title 2 only uses markers.
    assert_eq!(batch.temp_files().len(), 2);

    let jobs: Vec<_> = std::iter::from_fn(|| batch.next_job()).collect();
    let numbers: Vec<_> = jobs.iter().map(|j| (j.title_number, j.episode_number)).collect();
    assert_eq!(numbers, vec![(1, 1), (1, 2), (2, 3)]);

    let outputs: Vec<_> = jobs.iter().map(|j| j.output_path.clone()).collect();
    assert_eq!(
        outputs,
        vec![
            Path::new("/videos/Show").join("Show S01E01 - Arrival.mkv"),
            Path::new("/videos/Show").join("Show S01E02 - Departure.mkv"),
            Path::new("/videos/Show").join("Show S01E03 - Gag Reel.mkv"),
        ]
    );

    let first = &jobs[0];
    let chapter_file = first.chapter_file.as_ref().expect("names file");
    let expected_prefix = format!(
        "-i \"/media/SHOW_S1_D1\" -o \"{}\" -t 1 -a 1,1 -E copy:ac3,av_aac -6 auto,dpl2 \
         -R Auto,Auto -B 0,192 -D 0.0,0.0 --gain 0,0 -s 1 --subtitle-forced=1 --no-dvdnav \
         --crop 2:2:0:0 --markers=\"{}\" -c 1-3 ",
        first.output_path.display(),
        chapter_file.display()
    );
    assert!(
        first.command.starts_with(&expected_prefix),
        "unexpected command: {}",
        first.command
    );
    let film = prefs.presets.get_by_name("Film").unwrap();
    assert!(first.command.ends_with(&film.settings));

    let contents = std::fs::read_to_string(chapter_file).unwrap();
    assert!(contents.contains("Cold Open\r\n"));
    assert!(contents.contains("Morning\r\n"));

    // Title 2 inherits the automatic disc crop and uses plain markers.
    let extras = &jobs[2];
    assert!(extras.chapter_file.is_none());
    assert!(!extras.command.contains("--crop"));
    assert!(extras.command.contains(" -m -c 1-2 "));
}

#[test]
fn chapter_files_outlive_consumed_jobs_until_batch_is_dropped() {
    let disc = load_fixture_disc();
    let prefs = Preferences::default();

    let mut batch = generate_jobs(&disc, &prefs, &mut AcceptWarnings).unwrap();
    let paths: Vec<_> = batch.temp_files().paths().map(Path::to_path_buf).collect();
    assert_eq!(paths.len(), 2);

    let job = batch.next_job().unwrap();
    assert!(job.chapter_file.as_ref().is_some_and(|p| p.exists()));
    assert_eq!(batch.cancel(), 2);
    assert!(batch.is_empty());
    assert!(paths.iter().all(|p| p.exists()));

    drop(batch);
    assert!(paths.iter().all(|p| !p.exists()));
}

#[test]
fn hidden_titles_block_generation() {
    let mut disc = load_fixture_disc();
    for title in disc.titles.iter_mut() {
        title.visible = false;
    }

    let err = generate_jobs(&disc, &Preferences::default(), &mut AcceptWarnings).unwrap_err();
    assert!(matches!(err, DiscjobError::Validation { .. }));
    assert!(err.to_string().contains("no visible titles"));
}

#[test]
fn declining_a_warning_aborts_generation() {
    let mut disc = load_fixture_disc();
    disc.titles.get_mut(3).unwrap().selected = true;

    let mut decline = |_: &ValidationWarning| false;
    let err = generate_jobs(&disc, &Preferences::default(), &mut decline).unwrap_err();
    assert!(err.is_aborted());
}

#[test]
fn reordered_titles_generate_in_processing_order() {
    let mut disc = load_fixture_disc();
    disc.titles.move_top(2).unwrap();
    let prefs = Preferences::default();

    let titles = disc.titles.matching_titles(MatchFlags::SELECTED_VISIBLE).titles;
    let mut batch = CommandBuilder::new(&disc, &prefs)
        .make_command_lines(&titles)
        .unwrap();

    let first = batch.next_job().unwrap();
    assert_eq!((first.title_number, first.episode_number), (2, 1));
    assert!(first.output_path.ends_with("Show S01E01 - Gag Reel.mkv"));
    let second = batch.next_job().unwrap();
    assert_eq!((second.title_number, second.episode_number), (1, 2));
}

#[test]
fn session_round_trips_through_disk() {
    let disc = load_fixture_disc();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("session.json");

    disc.save(&path).unwrap();
    assert_eq!(Disc::load(&path).unwrap(), disc);
}

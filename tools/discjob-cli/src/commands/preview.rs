//! Validate a session and print the jobs it would run.

use std::path::PathBuf;

use discjob_common::{now_stamp, AppConfig, RunClock};
use discjob_disc_model::Preferences;
use discjob_job_engine::generate_jobs;
use tracing::info;

use super::load_session;
use crate::prompt::TerminalPrompt;

pub fn run(
    path: PathBuf,
    prefs: &Preferences,
    config: &AppConfig,
    assume_yes: bool,
) -> anyhow::Result<()> {
    let mut disc = load_session(&path)?;
    disc.refresh_visibility(prefs);

    let mut prompt = TerminalPrompt::new(assume_yes);
    let mut batch = match generate_jobs(&disc, prefs, &mut prompt) {
        Ok(batch) => batch,
        Err(e) if e.is_aborted() => {
            println!("Cancelled.");
            return Ok(());
        }
        Err(e) => return Err(e.into()),
    };

    let total = batch.len();
    println!("Planned outputs:");
    for job in batch.queue().iter() {
        println!("  {}", job.output_path.display());
    }
    println!();

    let clock = RunClock::start();
    println!("{total} job(s), started {}", clock.started_stamp());

    let mut index = 0;
    while let Some(job) = batch.next_job() {
        index += 1;
        let job_clock = RunClock::start();
        println!();
        println!(
            "[{index}/{total}] Title #{} episode {} -> {}",
            job.title_number,
            job.episode_number,
            job.output_path.display()
        );
        println!("{} {}", config.transcoder.executable, job.command);
        if config.transcoder.log_commands {
            info!(
                started = %job_clock.started_stamp(),
                executable = %config.transcoder.executable,
                command = %job.command,
                "Job command"
            );
        }
        println!(
            "  started {}, finished {} ({})",
            job_clock.started_stamp(),
            now_stamp(),
            job_clock.elapsed_text()
        );
    }

    println!();
    println!("Finished {} (elapsed {})", now_stamp(), clock.elapsed_text());
    // Chapter-name files go away with the batch.
    drop(batch);
    Ok(())
}

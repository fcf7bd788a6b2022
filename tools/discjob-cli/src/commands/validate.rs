//! Report validation findings for a session.

use std::path::PathBuf;

use discjob_disc_model::Preferences;
use discjob_job_engine::{Finding, Validator};

use super::load_session;

pub fn run(path: PathBuf, prefs: &Preferences) -> anyhow::Result<()> {
    println!("Validating session at: {}", path.display());

    let mut disc = load_session(&path)?;
    disc.refresh_visibility(prefs);

    let findings = Validator::new(&disc, prefs).findings();
    let mut warnings = 0;
    for finding in &findings {
        match finding {
            Finding::Warn(warning) => {
                warnings += 1;
                println!("  warning: {warning}");
            }
            Finding::Fail(error) => {
                println!("  error: {error}");
                anyhow::bail!("Session is not valid");
            }
        }
    }

    if warnings == 0 {
        println!("\nSession is valid.");
    } else {
        println!("\nSession is valid with {warnings} warning(s).");
    }
    Ok(())
}

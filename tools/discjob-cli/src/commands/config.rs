//! Show or write the configuration and preferences files.

use std::path::Path;

use discjob_common::{config_file_path, AppConfig, DiscjobError};
use discjob_disc_model::Preferences;

pub fn run(
    config: &AppConfig,
    preferences_file: &Path,
    prefs: &Preferences,
    write: bool,
) -> anyhow::Result<()> {
    let config_path = config_file_path();

    if write {
        if config_path.exists() {
            println!("Keeping existing {}", config_path.display());
        } else {
            config
                .save()
                .map_err(|e| DiscjobError::config(format!("Failed to write config: {e}")))?;
            println!("Wrote {}", config_path.display());
        }

        if preferences_file.exists() {
            println!("Keeping existing {}", preferences_file.display());
        } else {
            prefs
                .save(preferences_file)
                .map_err(|e| DiscjobError::preferences(e.to_string()))?;
            println!("Wrote {}", preferences_file.display());
        }
        println!();
    }

    println!("Config: {}", config_path.display());
    println!("Preferences: {}", preferences_file.display());
    println!("Transcoder: {}", config.transcoder.executable);
    println!("Log level: {}", config.logging.level);

    let presets: Vec<_> = prefs.presets.names().collect();
    let mixdowns: Vec<_> = prefs.mixdowns.names().collect();
    println!("Presets: {}", presets.join(", "));
    println!("Mixdowns: {}", mixdowns.join(", "));
    if config.transcoder.log_commands {
        println!("Commands are logged with timestamps.");
    }
    Ok(())
}

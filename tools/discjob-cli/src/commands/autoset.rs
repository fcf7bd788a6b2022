//! Auto-select tracks for the disc or for one title.

use std::path::PathBuf;

use discjob_disc_model::Preferences;

use super::{load_session, save_session};

pub fn run(path: PathBuf, title: Option<u32>, crop: bool, prefs: &Preferences) -> anyhow::Result<()> {
    let mut disc = load_session(&path)?;

    match title {
        None => {
            let Some(source) = disc.autoset_disc_tracks(prefs) else {
                anyhow::bail!("The session has no titles to take tracks from");
            };
            println!("Disc tracks set from title #{source}");
            if crop {
                if let Some(source) = disc.find_disc_crop() {
                    println!("Disc crop copied from title #{source}");
                }
            }
        }
        Some(number) => {
            let title = disc
                .titles
                .get_mut(number)
                .ok_or_else(|| anyhow::anyhow!("Title #{number} does not exist"))?;
            title.autoset_tracks(prefs);
            println!("Title #{number} now uses custom tracks");
            if crop {
                title.find_crop();
                println!("Title #{number} crop set to {}", title.custom_crop.rect.to_arg());
            }
        }
    }

    save_session(&disc, &path)?;
    Ok(())
}

//! Export, import, or reset a title's chapter names.

use std::path::PathBuf;

use anyhow::Context;
use discjob_disc_model::Preferences;

use super::{load_session, save_session};
use crate::ChapterAction;

pub fn run(
    path: PathBuf,
    title_number: u32,
    action: ChapterAction,
    prefs: &Preferences,
) -> anyhow::Result<()> {
    let mut disc = load_session(&path)?;
    let chapters = &mut disc
        .titles
        .get_mut(title_number)
        .ok_or_else(|| anyhow::anyhow!("Title #{title_number} does not exist"))?
        .chapters;
    let options = &prefs.options;

    match action {
        ChapterAction::Export { output } => {
            let text = chapters.export_names();
            match output {
                Some(output) => {
                    std::fs::write(&output, text)
                        .with_context(|| format!("Failed to write {}", output.display()))?;
                    println!("Exported {} chapter names to {}", chapters.len(), output.display());
                }
                None => print!("{text}"),
            }
            return Ok(());
        }
        ChapterAction::Import { file } => {
            let text = std::fs::read_to_string(&file)
                .with_context(|| format!("Failed to read {}", file.display()))?;
            let short_ending = options.check_import_short_chapter.then(|| {
                (
                    options.text_import_short_chapter.as_str(),
                    options.short_chapter_seconds,
                )
            });
            let applied = chapters.import_names(&text, short_ending);
            println!("Imported {applied} of {} chapter names", chapters.len());
        }
        ChapterAction::Reset => {
            chapters.reset_names();
            println!("Reset {} chapter names", chapters.len());
        }
        ChapterAction::TitleEnd => match chapters.set_title_end(&options.text_import_short_chapter) {
            Some(number) => println!(
                "Chapter {number} is now \"{}\"",
                options.text_import_short_chapter
            ),
            None => anyhow::bail!("Title #{title_number} has no chapters"),
        },
    }

    save_session(&disc, &path)?;
    Ok(())
}

//! Create a disc session from a probed title list.

use std::path::PathBuf;

use anyhow::Context;
use discjob_common::DiscjobError;
use discjob_disc_model::{Disc, Preferences, Title, TitleCatalog};

use super::save_session;

pub fn run(
    titles_path: PathBuf,
    source: PathBuf,
    output: PathBuf,
    name: Option<String>,
    destination: Option<PathBuf>,
    prefs: &Preferences,
) -> anyhow::Result<()> {
    if !titles_path.exists() {
        return Err(DiscjobError::FileNotFound { path: titles_path }.into());
    }
    let content = std::fs::read_to_string(&titles_path)
        .with_context(|| format!("Failed to read titles from {}", titles_path.display()))?;
    let titles: Vec<Title> = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse titles in {}", titles_path.display()))?;
    let catalog = TitleCatalog::from_titles(titles)?;

    let mut disc = Disc::new(&source, catalog);
    disc.title = name.unwrap_or_else(|| {
        source
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_default()
    });
    disc.disc_label = disc.title.clone();
    if let Some(destination) = destination {
        disc.destination = destination;
    }
    disc.apply_new_source_defaults(prefs);

    save_session(&disc, &output)?;

    let visible = disc.titles.iter().filter(|t| t.visible).count();
    let selected: Vec<_> = disc
        .titles
        .iter()
        .filter(|t| t.selected)
        .map(|t| t.title_number.to_string())
        .collect();

    println!("Created session {}", output.display());
    println!("  Source: {}", disc.source.display());
    println!("  Destination: {}", disc.destination.display());
    println!("  Titles: {} ({} visible)", disc.titles.len(), visible);
    if selected.is_empty() {
        println!("  Selected: none");
    } else {
        println!("  Selected: {}", selected.join(", "));
    }
    println!("  Preset: {}", disc.preset);
    println!("  Template: {}", disc.filename_template);

    Ok(())
}

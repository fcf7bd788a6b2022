//! Change title processing order.

use std::path::PathBuf;

use super::{load_session, save_session};
use crate::Movement;

pub fn run(path: PathBuf, title: u32, movement: Movement) -> anyhow::Result<()> {
    let mut disc = load_session(&path)?;
    let titles = &mut disc.titles;

    match movement {
        Movement::Up => titles.move_up(title)?,
        Movement::Down => titles.move_down(title)?,
        Movement::Top => titles.move_top(title)?,
        Movement::Bottom => titles.move_bottom(title)?,
        Movement::Natural => titles.set_natural_title_order(),
    }

    let order: Vec<_> = titles
        .titles_in_order()
        .iter()
        .map(|t| t.title_number.to_string())
        .collect();
    println!("Processing order: {}", order.join(", "));

    save_session(&disc, &path)?;
    Ok(())
}

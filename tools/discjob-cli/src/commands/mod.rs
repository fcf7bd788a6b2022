use std::path::Path;

use discjob_common::{DiscjobError, DiscjobResult};
use discjob_disc_model::Disc;

pub mod autoset;
pub mod chapters;
pub mod config;
pub mod info;
pub mod init;
pub mod order;
pub mod preview;
pub mod validate;

pub(crate) fn load_session(path: &Path) -> DiscjobResult<Disc> {
    Disc::load(path).map_err(|e| DiscjobError::session(format!("Failed to load session: {e}")))
}

pub(crate) fn save_session(disc: &Disc, path: &Path) -> DiscjobResult<()> {
    disc.save(path)
        .map_err(|e| DiscjobError::session(format!("Failed to save session: {e}")))
}

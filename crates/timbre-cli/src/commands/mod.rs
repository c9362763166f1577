pub mod config;
pub mod list;
pub mod recommend;
pub mod status;

pub use list::run_list;
pub use recommend::run_recommend;
pub use status::show_status;

use anyhow::{Context, Result};
use timbre_search::SimilarityIndex;

use crate::config::Config;

/// Load the similarity index described by the configuration.
fn open_index(config: &Config) -> Result<SimilarityIndex> {
    timbre_search::load(config.catalog_path(), config.matrix_path()).with_context(|| {
        format!(
            "Failed to load similarity data from {}\n\nSet the location with --data-dir or 'timbre config set data_dir <dir>'",
            config.data_dir.display()
        )
    })
}

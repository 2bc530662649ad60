use std::path::Path;

use tracing::info;

use crate::records::read_path;
use crate::runs::{rejoin, RunSet};
use crate::error::Result;

/// Read and rejoin each input, merging them in order
///
/// For a destination present in several inputs the earliest input wins.
pub fn load_runs<P: AsRef<Path>>(paths: &[P], config_column: &str) -> Result<RunSet> {
    let mut runs = RunSet::default();
    for path in paths {
        let set = rejoin(read_path(path)?, config_column);
        info!(
            path = %path.as_ref().display(),
            joined = set.joined.len(),
            misses = set.misses.len(),
            "run loaded"
        );
        runs = runs.merge(set);
    }
    Ok(runs)
}

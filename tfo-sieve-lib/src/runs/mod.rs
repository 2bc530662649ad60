mod joiner;
mod types;

pub use joiner::{rejoin, RunSet};
pub use types::{Baseline, Experimental, JoinedRecord, Keyed, MissRecord};

#![forbid(unsafe_code)]

pub mod attribution;
pub mod config;
pub mod error;
pub mod family;
pub mod pipeline;
pub mod records;
pub mod report;
pub mod runs;
pub mod sieve;
pub mod telemetry;

pub use attribution::{
    Attributed, Attribution, AttributionOracle, Attributor, HttpOracle, PrefixCache,
};
pub use config::{load_from_path, Config};
pub use error::{Result, SieveError};
pub use family::AddressFamily;
pub use pipeline::load_runs;
pub use records::{Record, RecordSource};
pub use report::Report;
pub use runs::{rejoin, JoinedRecord, MissRecord, RunSet};
pub use sieve::{tfo_sieve, Outcome, Sieve, SieveCounts};

mod input;
mod loader;
mod oracle;
mod report;
mod root;
mod telemetry;
mod validator;

pub use input::InputConfig;
pub use loader::load_from_path;
pub use oracle::{OnOracleError, OracleConfig, OracleKind};
pub use report::{ReportConfig, ReportFormat, GOOGLE_ASN};
pub use root::Config;
pub use telemetry::LoggingConfig;
pub use validator::validate;

mod record;
mod source;

pub use record::Record;
pub use source::{read_path, RecordSource};

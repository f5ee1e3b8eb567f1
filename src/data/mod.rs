mod load;
mod record;

pub use load::{load_records, parse_records};
pub use record::StudyRecord;

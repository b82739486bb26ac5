//! User records and the column contract they are read against

mod record;
mod schema;

pub use record::Record;
pub use schema::{EMAIL, ID, NAME, RecordSchema};

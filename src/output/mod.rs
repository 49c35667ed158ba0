//! Output handling for collected records

pub mod csv_sink;

pub use csv_sink::{write_records, OutputError};

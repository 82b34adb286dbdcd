pub mod date;

pub use date::{ParsedDate, is_valid_year, parse_date, year_start_timestamp};

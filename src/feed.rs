//! Feed ingestion: raw text in, typed rows out.
//!
//! Parsing is structural only. Field meaning belongs to the timeline builder.

mod date;
mod row;
mod source;
mod table;

pub use date::{format_date, parse_date};
pub use row::{FeedRow, decode_rows};
pub use source::{FeedSource, FetchError, source_for};
pub use table::Table;

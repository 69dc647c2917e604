//! fpds-feed — client for the FPDS-NG public ATOM feed of federal contract awards.

pub mod client;
pub mod config;
pub mod extract;
pub mod fields;
pub mod modified;
pub mod query;
pub mod transport;
pub mod types;
pub mod xml;

pub use client::{build_query, default_logger, in_window, Contracts, PreparedQuery, ProgressLogger};
pub use config::FeedConfig;
pub use extract::extract_entries;
pub use fields::{translate, FIELD_MAP};
pub use modified::resolve_modified_date;
pub use query::{combine_params, date_format};
pub use transport::{FeedTransport, HttpTransport};
pub use types::*;
pub use xml::parse_feed;

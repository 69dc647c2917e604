//! fpds-feed CLI — command-line access to FPDS-NG contract records.

pub mod args;
pub mod config;
pub mod output;

pub use args::{parse_date_range, parse_filter, parse_filter_value};
pub use config::{resolve_feed_config, resolve_feed_url};

//! Core data types for filters, query arguments and returned records.

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// An inclusive pair of calendar dates.
///
/// `start <= end` is expected but not enforced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    /// True when `date` lies within `[start, end]`.
    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end
    }
}

/// A typed filter value supplied by the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum FilterValue {
    Text(String),
    Date(NaiveDate),
    DateRange(DateRange),
    Bool(bool),
}

impl From<&str> for FilterValue {
    fn from(value: &str) -> Self {
        FilterValue::Text(value.to_string())
    }
}

impl From<String> for FilterValue {
    fn from(value: String) -> Self {
        FilterValue::Text(value)
    }
}

impl From<NaiveDate> for FilterValue {
    fn from(value: NaiveDate) -> Self {
        FilterValue::Date(value)
    }
}

impl From<(NaiveDate, NaiveDate)> for FilterValue {
    fn from((start, end): (NaiveDate, NaiveDate)) -> Self {
        FilterValue::DateRange(DateRange::new(start, end))
    }
}

impl From<DateRange> for FilterValue {
    fn from(value: DateRange) -> Self {
        FilterValue::DateRange(value)
    }
}

impl From<bool> for FilterValue {
    fn from(value: bool) -> Self {
        FilterValue::Bool(value)
    }
}

/// Caller-supplied filters keyed by friendly field name, in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterSet {
    entries: Vec<(String, FilterValue)>,
}

impl FilterSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a filter, replacing the value of an existing key in place.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<FilterValue>) {
        let key = key.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(slot) => slot.1 = value,
            None => self.entries.push((key, value)),
        }
    }

    pub fn with(mut self, key: impl Into<String>, value: impl Into<FilterValue>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn get(&self, key: &str) -> Option<&FilterValue> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FilterValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: Into<String>, V: Into<FilterValue>> FromIterator<(K, V)> for FilterSet {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut set = FilterSet::new();
        for (k, v) in iter {
            set.insert(k, v);
        }
        set
    }
}

/// How many raw entries to examine: a fixed count or everything upstream has.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordCount {
    Limit(usize),
    All,
}

impl RecordCount {
    /// True once `examined` raw entries satisfy the requested count.
    pub fn is_reached(&self, examined: usize) -> bool {
        match self {
            RecordCount::Limit(n) => examined >= *n,
            RecordCount::All => false,
        }
    }
}

impl Default for RecordCount {
    fn default() -> Self {
        RecordCount::Limit(100)
    }
}

impl FromStr for RecordCount {
    type Err = FeedError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("all") {
            return Ok(RecordCount::All);
        }
        s.parse::<usize>()
            .map(RecordCount::Limit)
            .map_err(|_| FeedError::InvalidArgument(format!("record count must be a number or \"all\": {s}")))
    }
}

impl fmt::Display for RecordCount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordCount::Limit(n) => write!(f, "{n}"),
            RecordCount::All => write!(f, "all"),
        }
    }
}

/// Upstream sort hint. Never applied locally.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    Desc,
}

impl SortOrder {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortOrder::Asc => "asc",
            SortOrder::Desc => "desc",
        }
    }
}

impl FromStr for SortOrder {
    type Err = FeedError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "asc" => Ok(SortOrder::Asc),
            "desc" => Ok(SortOrder::Desc),
            other => Err(FeedError::InvalidArgument(format!("unknown sort order: {other}"))),
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Arguments of one `Contracts::get` call.
#[derive(Debug, Clone, Default)]
pub struct ContractQuery {
    pub num_records: RecordCount,
    pub order: Option<SortOrder>,
    pub filters: FilterSet,
    /// Pause before every page fetch. Not forwarded upstream.
    pub sleep: Option<Duration>,
}

impl ContractQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_num_records(mut self, num_records: RecordCount) -> Self {
        self.num_records = num_records;
        self
    }

    pub fn with_limit(self, limit: usize) -> Self {
        self.with_num_records(RecordCount::Limit(limit))
    }

    pub fn all(self) -> Self {
        self.with_num_records(RecordCount::All)
    }

    pub fn with_order(mut self, order: SortOrder) -> Self {
        self.order = Some(order);
        self
    }

    pub fn with_filter(mut self, key: impl Into<String>, value: impl Into<FilterValue>) -> Self {
        self.filters.insert(key, value);
        self
    }

    pub fn with_filters(mut self, filters: FilterSet) -> Self {
        self.filters = filters;
        self
    }

    pub fn with_sleep(mut self, sleep: Duration) -> Self {
        self.sleep = Some(sleep);
        self
    }
}

/// One normalized feed entry plus its resolved last-modified timestamp.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    #[serde(flatten)]
    pub entry: Map<String, Value>,
    pub modified: Option<NaiveDateTime>,
}

impl Record {
    /// Wrap a raw entry. Non-object entries are kept under `#text`.
    pub fn from_entry(entry: Value) -> Self {
        let entry = match entry {
            Value::Object(map) => map,
            other => {
                let mut map = Map::new();
                map.insert("#text".to_string(), other);
                map
            }
        };
        Self {
            entry,
            modified: None,
        }
    }

    /// The nested `content` structure carrying the award or IDV.
    pub fn content(&self) -> Option<&Value> {
        self.entry.get("content")
    }

    pub fn id(&self) -> Option<&str> {
        self.entry.get("id").and_then(Value::as_str)
    }

    pub fn title(&self) -> Option<&str> {
        self.entry.get("title").and_then(text_of)
    }
}

// `<title type="text">..</title>` parses to an object with `#text`.
fn text_of(value: &Value) -> Option<&str> {
    match value {
        Value::String(s) => Some(s),
        Value::Object(map) => map.get("#text").and_then(Value::as_str),
        _ => None,
    }
}

/// Errors that can occur while querying the feed.
#[derive(thiserror::Error, Debug)]
pub enum FeedError {
    #[error("Unknown filter field: {0}")]
    UnknownField(String),

    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("HTTP {status} from {url}")]
    Status { status: u16, url: String },

    #[error("XML parse error: {0}")]
    Xml(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

/// Convenience result type.
pub type FeedResult<T> = Result<T, FeedError>;

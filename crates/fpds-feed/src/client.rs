//! Paginated contract search against the feed.
//!
//! The feed sometimes returns records whose last-modified date lies outside
//! a requested `LAST_MOD_DATE` range, often by years. When the caller asks
//! for `last_modified_date` as a date range, every record with a resolvable
//! timestamp is re-checked locally and dropped if it falls outside.

use std::sync::Arc;

use chrono::NaiveDateTime;
use serde_json::Value;
use url::Url;

use crate::config::FeedConfig;
use crate::extract::extract_entries;
use crate::fields::{translate, LAST_MODIFIED_DATE};
use crate::modified::resolve_modified_date;
use crate::query::combine_params;
use crate::transport::{FeedTransport, HttpTransport};
use crate::types::{
    ContractQuery, DateRange, FeedError, FeedResult, FilterSet, FilterValue, Record, SortOrder,
};
use crate::xml::parse_feed;

/// Receives human-readable progress lines ("querying ...", "finished querying ...").
pub type ProgressLogger = Arc<dyn Fn(&str) + Send + Sync>;

/// Progress sink that forwards to `tracing` at info level.
pub fn default_logger() -> ProgressLogger {
    Arc::new(|message: &str| tracing::info!("{message}"))
}

/// The `q` parameter plus the local last-modified window, if any.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreparedQuery {
    pub q: String,
    pub window: Option<DateRange>,
}

/// Translate and encode filters once for every page of a query.
///
/// Only a `last_modified_date` given as a date range opens a local window;
/// a plain text or single date value goes upstream untouched.
pub fn build_query(filters: &FilterSet) -> FeedResult<PreparedQuery> {
    let window = match filters.get(LAST_MODIFIED_DATE) {
        Some(FilterValue::DateRange(range)) => Some(*range),
        _ => None,
    };
    let params = translate(filters)?;

    Ok(PreparedQuery {
        q: combine_params(&params),
        window,
    })
}

/// Keep a record unless both a window and a timestamp exist and the
/// timestamp's date falls outside the window.
pub fn in_window(window: Option<DateRange>, modified: Option<NaiveDateTime>) -> bool {
    match (window, modified) {
        (Some(range), Some(ts)) => range.contains(ts.date()),
        _ => true,
    }
}

/// Client for contract records in the feed.
pub struct Contracts<T = HttpTransport> {
    transport: T,
    config: FeedConfig,
    log: ProgressLogger,
}

impl Contracts<HttpTransport> {
    /// Client for the public feed with default settings.
    pub fn new() -> FeedResult<Self> {
        Self::with_config(FeedConfig::default())
    }

    pub fn with_config(config: FeedConfig) -> FeedResult<Self> {
        let transport = HttpTransport::new(&config)?;
        Ok(Self::with_transport(transport, config))
    }
}

impl<T: FeedTransport> Contracts<T> {
    pub fn with_transport(transport: T, config: FeedConfig) -> Self {
        Self {
            transport,
            config,
            log: default_logger(),
        }
    }

    /// Replace the progress sink.
    pub fn with_logger(mut self, logger: impl Fn(&str) + Send + Sync + 'static) -> Self {
        self.log = Arc::new(logger);
        self
    }

    pub fn config(&self) -> &FeedConfig {
        &self.config
    }

    /// Send records to the progress sink as indented JSON.
    pub fn pretty_print(&self, records: &[Record]) -> FeedResult<()> {
        let text = serde_json::to_string_pretty(records)?;
        (self.log)(&text);
        Ok(())
    }

    /// URL of the page starting at raw entry offset `start`.
    pub fn page_url(&self, q: &str, start: usize, order: Option<SortOrder>) -> FeedResult<Url> {
        let mut url = Url::parse(&self.config.base_url).map_err(|e| {
            FeedError::InvalidArgument(format!("invalid feed URL {}: {e}", self.config.base_url))
        })?;

        {
            let mut pairs = url.query_pairs_mut();
            pairs
                .append_pair("FEEDNAME", &self.config.feed_name)
                .append_pair("q", q)
                .append_pair("start", &start.to_string());
            if let Some(order) = order {
                pairs.append_pair("order", order.as_str());
            }
        }

        Ok(url)
    }

    /// Fetch records page by page until the requested count is examined,
    /// a short page arrives, or the feed reports no results.
    ///
    /// The first page is requested at `start=0`. The count is checked only
    /// between pages, so every entry of a fetched page is examined and the
    /// result may exceed `num_records` by up to one page.
    ///
    /// Unknown filter keys fail before any request is made. Transport and
    /// XML failures abort the whole call; nothing accumulated so far is
    /// returned in that case.
    pub async fn get(&self, query: ContractQuery) -> FeedResult<Vec<Record>> {
        let prepared = build_query(&query.filters)?;
        let page_size = self.config.page_size;

        let mut records = Vec::new();
        let mut examined = 0usize;

        while !query.num_records.is_reached(examined) {
            if let Some(delay) = query.sleep.filter(|d| !d.is_zero()) {
                tokio::time::sleep(delay).await;
            }

            let Some(entries) = self.fetch_page(&prepared.q, examined, query.order).await? else {
                (self.log)("No results for query");
                break;
            };

            let page_len = entries.len();
            tracing::debug!(start = examined, entries = page_len, "Fetched feed page");

            for entry in entries {
                examined += 1;

                let mut record = Record::from_entry(entry);
                record.modified = record.content().and_then(resolve_modified_date);

                if in_window(prepared.window, record.modified) {
                    records.push(record);
                } else {
                    tracing::debug!(
                        id = record.id().unwrap_or("?"),
                        modified = ?record.modified,
                        "Discarded record outside last-modified window"
                    );
                }
            }

            if page_len == 0 || page_len < page_size {
                break;
            }
        }

        tracing::info!(
            examined,
            accepted = records.len(),
            "Contract query complete"
        );

        Ok(records)
    }

    async fn fetch_page(
        &self,
        q: &str,
        start: usize,
        order: Option<SortOrder>,
    ) -> FeedResult<Option<Vec<Value>>> {
        let url = self.page_url(q, start, order)?;
        (self.log)(&format!("querying {url}"));

        let body = self.transport.fetch(&url).await?;
        let page = parse_feed(&body)?;

        (self.log)(&format!("finished querying {url}"));
        Ok(extract_entries(&page))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use chrono::NaiveDate;
    use std::sync::Mutex;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    struct NoTransport;

    #[async_trait]
    impl FeedTransport for NoTransport {
        async fn fetch(&self, url: &Url) -> FeedResult<String> {
            panic!("unexpected fetch of {url}");
        }
    }

    #[test]
    fn test_build_query_with_range_opens_window() {
        let range = DateRange::new(date(2021, 1, 1), date(2021, 1, 31));
        let filters = FilterSet::new()
            .with("vendor_name", "ACME")
            .with("last_modified_date", range);

        let prepared = build_query(&filters).unwrap();
        assert_eq!(
            prepared.q,
            "VENDOR_NAME:ACME LAST_MOD_DATE:[2021/01/01,2021/01/31]"
        );
        assert_eq!(prepared.window, Some(range));
    }

    #[test]
    fn test_build_query_with_text_date_has_no_window() {
        let filters = FilterSet::new().with("last_modified_date", "2021/01/15");
        let prepared = build_query(&filters).unwrap();
        assert_eq!(prepared.q, "LAST_MOD_DATE:2021/01/15");
        assert_eq!(prepared.window, None);
    }

    #[test]
    fn test_range_on_other_field_has_no_window() {
        let filters = FilterSet::new().with("date_signed", (date(2020, 1, 1), date(2020, 6, 30)));
        let prepared = build_query(&filters).unwrap();
        assert_eq!(prepared.q, "SIGNED_DATE:[2020/01/01,2020/06/30]");
        assert_eq!(prepared.window, None);
    }

    #[test]
    fn test_in_window() {
        let range = Some(DateRange::new(date(2021, 1, 1), date(2021, 1, 31)));
        let at = |d: NaiveDate| Some(d.and_hms_opt(23, 59, 59).unwrap());

        assert!(in_window(range, at(date(2021, 1, 31))));
        assert!(in_window(range, at(date(2021, 1, 1))));
        assert!(!in_window(range, at(date(2020, 12, 31))));
        assert!(!in_window(range, at(date(2021, 2, 1))));
        assert!(in_window(range, None));
        assert!(in_window(None, at(date(1999, 1, 1))));
    }

    #[test]
    fn test_page_url_parameters() {
        let config = FeedConfig::default().with_base_url("https://feed.example/ATOM");
        let client = Contracts::with_transport(NoTransport, config);

        let url = client
            .page_url("VENDOR_NAME:ACME CORP", 20, Some(SortOrder::Desc))
            .unwrap();
        let pairs: Vec<(String, String)> = url
            .query_pairs()
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect();

        assert_eq!(
            pairs,
            vec![
                ("FEEDNAME".to_string(), "PUBLIC".to_string()),
                ("q".to_string(), "VENDOR_NAME:ACME CORP".to_string()),
                ("start".to_string(), "20".to_string()),
                ("order".to_string(), "desc".to_string()),
            ]
        );
    }

    #[test]
    fn test_page_url_rejects_bad_base() {
        let config = FeedConfig::default().with_base_url("not a url");
        let client = Contracts::with_transport(NoTransport, config);
        assert!(matches!(
            client.page_url("", 0, None),
            Err(FeedError::InvalidArgument(_))
        ));
    }

    #[tokio::test]
    async fn test_unknown_field_fails_before_fetch() {
        let client = Contracts::with_transport(NoTransport, FeedConfig::default());
        let query = ContractQuery::new().with_filter("colour", "red");
        assert!(matches!(
            client.get(query).await,
            Err(FeedError::UnknownField(_))
        ));
    }

    #[tokio::test]
    async fn test_zero_records_makes_no_request() {
        let client = Contracts::with_transport(NoTransport, FeedConfig::default());
        let records = client.get(ContractQuery::new().with_limit(0)).await.unwrap();
        assert!(records.is_empty());
    }

    #[test]
    fn test_pretty_print_goes_to_logger() {
        let lines = Arc::new(Mutex::new(Vec::<String>::new()));
        let sink = lines.clone();
        let client = Contracts::with_transport(NoTransport, FeedConfig::default())
            .with_logger(move |msg| sink.lock().unwrap().push(msg.to_string()));

        let record = Record::from_entry(serde_json::json!({"id": "urn:1"}));
        client.pretty_print(&[record]).unwrap();

        let lines = lines.lock().unwrap();
        assert_eq!(lines.len(), 1);
        assert!(lines[0].contains("\"id\": \"urn:1\""));
        assert!(lines[0].contains("\"modified\": null"));
    }
}

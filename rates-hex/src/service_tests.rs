//! RateService unit tests.

#[cfg(test)]
pub(crate) mod tests {
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;
    use chrono::NaiveDate;

    use rates_types::{
        AppError, CurrencyCode, FeedError, FeedSource, ParsedRate, RateObservation,
        RateRepository, RepoError,
    };

    use crate::RateService;

    /// Simple in-memory repository for testing the service layer.
    pub struct MockRepo {
        rows: Mutex<Vec<RateObservation>>,
        lookups: AtomicUsize,
        fail_after_writes: Option<usize>,
        writes: AtomicUsize,
    }

    impl MockRepo {
        pub fn new() -> Self {
            Self {
                rows: Mutex::new(Vec::new()),
                lookups: AtomicUsize::new(0),
                fail_after_writes: None,
                writes: AtomicUsize::new(0),
            }
        }

        /// Fails every write after the first `n`.
        pub fn failing_after(n: usize) -> Self {
            Self {
                fail_after_writes: Some(n),
                ..Self::new()
            }
        }

        pub fn with_rates(rates: &[(&str, f64, NaiveDate)]) -> Self {
            let repo = Self::new();
            {
                let mut rows = repo.rows.lock().unwrap();
                for (i, (code, rate, date)) in rates.iter().enumerate() {
                    rows.push(RateObservation::from_parts(
                        i as i64 + 1,
                        code.parse().unwrap(),
                        *rate,
                        *date,
                    ));
                }
            }
            repo
        }

        pub fn lookups(&self) -> usize {
            self.lookups.load(Ordering::SeqCst)
        }

        pub fn row_count(&self) -> usize {
            self.rows.lock().unwrap().len()
        }
    }

    #[async_trait]
    impl RateRepository for MockRepo {
        async fn upsert_if_absent(&self, rate: &ParsedRate) -> Result<bool, RepoError> {
            let attempt = self.writes.fetch_add(1, Ordering::SeqCst);
            if let Some(limit) = self.fail_after_writes {
                if attempt >= limit {
                    return Err(RepoError::Database("disk I/O error".into()));
                }
            }

            let mut rows = self.rows.lock().unwrap();
            if rows
                .iter()
                .any(|r| r.currency_code == rate.currency_code && r.date == rate.date)
            {
                return Ok(false);
            }
            let id = rows.len() as i64 + 1;
            rows.push(RateObservation::from_parts(
                id,
                rate.currency_code.clone(),
                rate.rate,
                rate.date,
            ));
            Ok(true)
        }

        async fn list_all(&self) -> Result<Vec<RateObservation>, RepoError> {
            Ok(self.rows.lock().unwrap().clone())
        }

        async fn latest_rate(&self, code: &CurrencyCode) -> Result<Option<f64>, RepoError> {
            self.lookups.fetch_add(1, Ordering::SeqCst);
            Ok(self
                .rows
                .lock()
                .unwrap()
                .iter()
                .filter(|r| &r.currency_code == code)
                .max_by_key(|r| (r.date, r.id))
                .map(|r| r.rate))
        }
    }

    /// Feed returning a fixed body, or failing.
    pub struct MockFeed {
        body: Option<String>,
        calls: AtomicUsize,
    }

    impl MockFeed {
        pub fn with_body(body: impl Into<String>) -> Self {
            Self {
                body: Some(body.into()),
                calls: AtomicUsize::new(0),
            }
        }

        pub fn unavailable() -> Self {
            Self {
                body: None,
                calls: AtomicUsize::new(0),
            }
        }

        pub fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl FeedSource for MockFeed {
        async fn fetch_feed(&self) -> Result<Vec<u8>, FeedError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.body
                .as_ref()
                .map(|b| b.as_bytes().to_vec())
                .ok_or_else(|| FeedError::Unavailable("Feed responded with 503".into()))
        }
    }

    pub const FEED: &str = r#"<Tarih_Date Tarih="16.10.2026">
        <Currency Kod="USD" CurrencyCode="USD"><Unit>1</Unit><ForexBuying>30.0</ForexBuying></Currency>
        <Currency Kod="EUR" CurrencyCode="EUR"><Unit>1</Unit><ForexBuying>33.0</ForexBuying></Currency>
        <Currency Kod="IRR" CurrencyCode="IRR"><Unit>100</Unit><ForexBuying></ForexBuying></Currency>
    </Tarih_Date>"#;

    fn home() -> CurrencyCode {
        "TRY".parse().unwrap()
    }

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, d).unwrap()
    }

    fn service(repo: MockRepo, feed: MockFeed) -> RateService<MockRepo, MockFeed> {
        RateService::new(repo, feed, home())
    }

    // ─────────────────────────────────────────────────────────────────────────────
    // Ingest
    // ─────────────────────────────────────────────────────────────────────────────

    #[tokio::test]
    async fn test_fetch_and_store_returns_parsed_rates() {
        let service = service(MockRepo::new(), MockFeed::with_body(FEED));

        let rates = service.fetch_and_store_on(day(16)).await.unwrap();

        assert_eq!(rates.len(), 2);
        assert_eq!(rates[0].currency_code.as_str(), "USD");
        assert_eq!(rates[0].rate, 30.0);
        assert_eq!(rates[0].date, day(16));
        assert_eq!(service.repo().row_count(), 2);
    }

    #[tokio::test]
    async fn test_fetch_and_store_twice_same_day_is_idempotent() {
        let service = service(MockRepo::new(), MockFeed::with_body(FEED));

        let first = service.fetch_and_store_on(day(16)).await.unwrap();
        let second = service.fetch_and_store_on(day(16)).await.unwrap();

        // Both calls echo the parsed batch; only the first one wrote rows.
        assert_eq!(first, second);
        assert_eq!(service.repo().row_count(), 2);
    }

    #[tokio::test]
    async fn test_fetch_and_store_next_day_adds_rows() {
        let service = service(MockRepo::new(), MockFeed::with_body(FEED));

        service.fetch_and_store_on(day(16)).await.unwrap();
        service.fetch_and_store_on(day(17)).await.unwrap();

        assert_eq!(service.repo().row_count(), 4);
    }

    #[tokio::test]
    async fn test_fetch_and_store_skips_missing_rates() {
        let service = service(MockRepo::new(), MockFeed::with_body(FEED));

        service.fetch_and_store_on(day(16)).await.unwrap();

        let stored = service.list_rates().await.unwrap();
        assert!(stored.iter().all(|r| r.currency_code.as_str() != "IRR"));
    }

    #[tokio::test]
    async fn test_fetch_and_store_feed_unavailable() {
        let service = service(MockRepo::new(), MockFeed::unavailable());

        let result = service.fetch_and_store_on(day(16)).await;

        assert!(matches!(result, Err(AppError::FeedUnavailable(_))));
        assert_eq!(service.repo().row_count(), 0);
    }

    #[tokio::test]
    async fn test_fetch_and_store_malformed_feed() {
        let service = service(MockRepo::new(), MockFeed::with_body("<Tarih_Date><Currency"));

        let result = service.fetch_and_store_on(day(16)).await;

        assert!(matches!(result, Err(AppError::MalformedFeed(_))));
        assert_eq!(service.repo().row_count(), 0);
    }

    #[tokio::test]
    async fn test_fetch_and_store_keeps_rows_committed_before_failure() {
        let service = service(MockRepo::failing_after(1), MockFeed::with_body(FEED));

        let result = service.fetch_and_store_on(day(16)).await;

        assert!(matches!(result, Err(AppError::Persistence(_))));
        assert_eq!(service.repo().row_count(), 1);
    }

    // ─────────────────────────────────────────────────────────────────────────────
    // Conversion
    // ─────────────────────────────────────────────────────────────────────────────

    #[tokio::test]
    async fn test_convert_home_to_home_skips_store() {
        let service = service(MockRepo::new(), MockFeed::unavailable());

        let converted = service.convert(125.5, "TRY", "TRY").await.unwrap();

        assert_eq!(converted, 125.5);
        assert_eq!(service.repo().lookups(), 0);
    }

    #[tokio::test]
    async fn test_convert_unknown_currency() {
        let service = service(MockRepo::new(), MockFeed::unavailable());

        let result = service.convert(100.0, "XXX", "TRY").await;

        assert!(matches!(result, Err(AppError::CurrencyNotFound(ref code)) if code == "XXX"));
    }

    #[tokio::test]
    async fn test_convert_unknown_target_currency() {
        let repo = MockRepo::with_rates(&[("USD", 30.0, day(16))]);
        let service = service(repo, MockFeed::unavailable());

        let result = service.convert(100.0, "USD", "ZZZ").await;

        assert!(matches!(result, Err(AppError::CurrencyNotFound(ref code)) if code == "ZZZ"));
    }

    #[tokio::test]
    async fn test_convert_to_home_currency() {
        let repo = MockRepo::with_rates(&[("USD", 30.0, day(16))]);
        let service = service(repo, MockFeed::unavailable());

        let converted = service.convert(100.0, "USD", "TRY").await.unwrap();

        assert_eq!(converted, 100.0 * (1.0 / 30.0));
        assert_eq!(service.repo().lookups(), 1);
    }

    #[tokio::test]
    async fn test_convert_from_home_currency() {
        let repo = MockRepo::with_rates(&[("USD", 30.0, day(16))]);
        let service = service(repo, MockFeed::unavailable());

        let converted = service.convert(2.0, "TRY", "USD").await.unwrap();

        assert_eq!(converted, 2.0 * (30.0 / 1.0));
    }

    #[tokio::test]
    async fn test_convert_between_foreign_currencies() {
        let repo = MockRepo::with_rates(&[("USD", 30.0, day(16)), ("EUR", 33.0, day(16))]);
        let service = service(repo, MockFeed::unavailable());

        let converted = service.convert(10.0, "USD", "EUR").await.unwrap();

        assert_eq!(converted, 10.0 * (33.0 / 30.0));
    }

    #[tokio::test]
    async fn test_convert_uses_most_recent_rate() {
        let repo = MockRepo::with_rates(&[
            ("USD", 31.0, day(17)),
            ("USD", 30.0, day(16)),
        ]);
        let service = service(repo, MockFeed::unavailable());

        let converted = service.convert(31.0, "USD", "TRY").await.unwrap();

        assert_eq!(converted, 31.0 * (1.0 / 31.0));
    }

    #[tokio::test]
    async fn test_convert_normalizes_codes() {
        let repo = MockRepo::with_rates(&[("USD", 30.0, day(16))]);
        let service = service(repo, MockFeed::unavailable());

        let converted = service.convert(100.0, " usd", "try").await.unwrap();

        assert_eq!(converted, 100.0 * (1.0 / 30.0));
    }

    #[tokio::test]
    async fn test_convert_invalid_code_is_bad_request() {
        let service = service(MockRepo::new(), MockFeed::unavailable());

        let result = service.convert(100.0, "", "TRY").await;

        assert!(matches!(result, Err(AppError::BadRequest(_))));
    }

    #[tokio::test]
    async fn test_convert_non_finite_amount_is_bad_request() {
        let service = service(MockRepo::new(), MockFeed::unavailable());

        let result = service.convert(f64::NAN, "TRY", "TRY").await;

        assert!(matches!(result, Err(AppError::BadRequest(_))));
    }

    #[tokio::test]
    async fn test_convert_with_other_home_currency() {
        let repo = MockRepo::with_rates(&[("EUR", 0.9, day(16))]);
        let service = RateService::new(repo, MockFeed::unavailable(), "USD".parse().unwrap());

        let converted = service.convert(10.0, "EUR", "USD").await.unwrap();

        assert_eq!(converted, 10.0 * (1.0 / 0.9));
        assert!(matches!(
            service.convert(1.0, "TRY", "USD").await,
            Err(AppError::CurrencyNotFound(_))
        ));
    }

    // ─────────────────────────────────────────────────────────────────────────────
    // Raw feed download
    // ─────────────────────────────────────────────────────────────────────────────

    #[tokio::test]
    async fn test_download_feed_writes_file() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("exchange_rates.xml");
        let service =
            service(MockRepo::new(), MockFeed::with_body(FEED)).with_download_path(&target);

        let written = service.download_feed().await.unwrap();

        assert!(written.is_absolute());
        assert_eq!(written, target.canonicalize().unwrap());
        assert_eq!(std::fs::read_to_string(&written).unwrap(), FEED);
        assert_eq!(service.repo().row_count(), 0);
    }

    #[tokio::test]
    async fn test_download_feed_overwrites_previous_file() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("exchange_rates.xml");
        std::fs::write(&target, "stale content, longer than the new body").unwrap();
        let service = service(MockRepo::new(), MockFeed::with_body("<Tarih_Date/>"))
            .with_download_path(&target);

        service.download_feed().await.unwrap();

        assert_eq!(std::fs::read_to_string(&target).unwrap(), "<Tarih_Date/>");
    }

    #[tokio::test]
    async fn test_download_feed_unavailable_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("exchange_rates.xml");
        let service =
            service(MockRepo::new(), MockFeed::unavailable()).with_download_path(&target);

        let result = service.download_feed().await;

        assert!(matches!(result, Err(AppError::FeedUnavailable(_))));
        assert!(!target.exists());
        assert_eq!(service.feed().calls(), 1);
    }

    #[tokio::test]
    async fn test_download_feed_unwritable_path_is_internal_error() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("missing-dir").join("exchange_rates.xml");
        let service =
            service(MockRepo::new(), MockFeed::with_body(FEED)).with_download_path(&target);

        let result = service.download_feed().await;

        assert!(matches!(result, Err(AppError::Internal(_))));
    }
}

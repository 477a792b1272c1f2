//! Binance klines bar source.
//!
//! Fetches 1-minute klines from the public `/api/v3/klines` endpoint, paging
//! forward by `startTime` in chunks of 1000 rows. A fixed short delay
//! between pages keeps the request rate well under Binance's limit; failed
//! pages are retried after a fixed one-second sleep, with a bounded retry
//! budget and no backoff schedule.

use std::time::Duration;

use crate::domain::Bar;

use super::provider::{BarProvider, DataError};

const BINANCE_URL: &str = "https://api.binance.com/api/v3/klines";
const PAGE_LIMIT: u32 = 1000;

/// Binance spot market data provider.
pub struct BinanceProvider {
    client: reqwest::blocking::Client,
    base_url: String,
    /// Pause between paginated requests.
    page_delay: Duration,
    /// Pause before retrying a failed request.
    retry_delay: Duration,
    /// Retry budget per page.
    max_retries: u32,
}

impl BinanceProvider {
    pub fn new() -> Self {
        Self::with_base_url(BINANCE_URL)
    }

    /// Point the provider at a different endpoint (tests use a local server).
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(10))
            .build()
            .expect("failed to build HTTP client");

        Self {
            client,
            base_url: base_url.into(),
            page_delay: Duration::from_millis(50),
            retry_delay: Duration::from_secs(1),
            max_retries: 3,
        }
    }

    /// Parse one klines page. Each row is a JSON array; index 0 is the open
    /// time in ms and indices 1..=5 are open/high/low/close/volume as
    /// decimal strings.
    fn parse_page(body: &serde_json::Value) -> Result<Vec<Bar>, DataError> {
        let rows = body
            .as_array()
            .ok_or_else(|| DataError::ResponseFormatChanged("klines body is not an array".into()))?;

        let mut bars = Vec::with_capacity(rows.len());
        for row in rows {
            let fields = row.as_array().ok_or_else(|| {
                DataError::ResponseFormatChanged("kline row is not an array".into())
            })?;
            if fields.len() < 6 {
                return Err(DataError::ResponseFormatChanged(format!(
                    "kline row has {} fields, expected at least 6",
                    fields.len()
                )));
            }

            let open_time = fields[0].as_i64().ok_or_else(|| {
                DataError::ResponseFormatChanged("open time is not an integer".into())
            })?;
            let price = |idx: usize| -> Result<f64, DataError> {
                fields[idx]
                    .as_str()
                    .and_then(|s| s.parse::<f64>().ok())
                    .ok_or_else(|| {
                        DataError::ResponseFormatChanged(format!(
                            "kline field {idx} is not a decimal string"
                        ))
                    })
            };

            bars.push(Bar {
                open_time,
                open: price(1)?,
                high: price(2)?,
                low: price(3)?,
                close: price(4)?,
                volume: price(5)?,
            });
        }
        Ok(bars)
    }

    /// Fetch one page, retrying transient failures with a fixed delay.
    fn fetch_page(
        &self,
        symbol: &str,
        interval: &str,
        start_time: i64,
    ) -> Result<Vec<Bar>, DataError> {
        let mut last_error = None;

        for attempt in 0..=self.max_retries {
            if attempt > 0 {
                std::thread::sleep(self.retry_delay);
            }

            let start = start_time.to_string();
            let limit = PAGE_LIMIT.to_string();
            let resp = self
                .client
                .get(&self.base_url)
                .query(&[
                    ("symbol", symbol),
                    ("interval", interval),
                    ("startTime", start.as_str()),
                    ("limit", limit.as_str()),
                ])
                .send();

            match resp {
                Ok(resp) => {
                    let status = resp.status();

                    if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
                        last_error = Some(DataError::RateLimited);
                        continue;
                    }
                    if status == reqwest::StatusCode::BAD_REQUEST
                        || status == reqwest::StatusCode::NOT_FOUND
                    {
                        // Unknown symbol or malformed interval — not retryable.
                        return Err(DataError::SymbolNotFound {
                            symbol: symbol.to_string(),
                        });
                    }
                    if !status.is_success() {
                        last_error = Some(DataError::Other(format!("HTTP {status} for {symbol}")));
                        continue;
                    }

                    let body: serde_json::Value = resp.json().map_err(|e| {
                        DataError::ResponseFormatChanged(format!(
                            "failed to parse klines for {symbol}: {e}"
                        ))
                    })?;
                    return Self::parse_page(&body);
                }
                Err(e) => {
                    if e.is_connect() || e.is_timeout() {
                        last_error = Some(DataError::NetworkUnreachable(e.to_string()));
                        continue;
                    }
                    return Err(DataError::NetworkUnreachable(e.to_string()));
                }
            }
        }

        Err(last_error.unwrap_or_else(|| DataError::Other("max retries exceeded".into())))
    }
}

impl Default for BinanceProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl BarProvider for BinanceProvider {
    fn name(&self) -> &str {
        "binance"
    }

    fn fetch_bars(
        &self,
        symbol: &str,
        interval: &str,
        lookback_days: u32,
    ) -> Result<Vec<Bar>, DataError> {
        let end_time = chrono::Utc::now().timestamp_millis();
        let start_time = end_time - lookback_days as i64 * 24 * 60 * 60 * 1000;

        let mut all_bars: Vec<Bar> = Vec::new();
        let mut current = start_time;

        while current < end_time {
            let page = self.fetch_page(symbol, interval, current)?;
            let Some(last) = page.last() else {
                break; // no more data before end_time
            };
            current = last.open_time + 1;
            all_bars.extend(page);
            std::thread::sleep(self.page_delay);
        }

        Ok(all_bars)
    }
}

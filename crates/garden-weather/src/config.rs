//! Configuration for the weather client.

use std::time::Duration;

use url::Url;

/// Default timeout for forecast requests: 10 seconds.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Default page size requested from the provider.
pub const DEFAULT_NUM_OF_ROWS: u32 = 1000;

/// Configuration for the village forecast API client.
#[derive(Debug, Clone)]
pub struct WeatherConfig {
    /// Base URL of the forecast service.
    pub endpoint: Url,
    /// Provider-issued service key, sent with every request.
    pub service_key: String,
    /// Timeout for individual requests.
    pub timeout: Duration,
    /// Number of forecast rows to request per call.
    pub num_of_rows: u32,
}

impl WeatherConfig {
    /// Creates a new configuration with default timeout and page size.
    pub fn new(endpoint: Url, service_key: impl Into<String>) -> Self {
        Self {
            endpoint,
            service_key: service_key.into(),
            timeout: DEFAULT_TIMEOUT,
            num_of_rows: DEFAULT_NUM_OF_ROWS,
        }
    }

    /// Sets the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Returns the effective timeout, using the default if zero.
    pub fn effective_timeout(&self) -> Duration {
        if self.timeout.is_zero() {
            DEFAULT_TIMEOUT
        } else {
            self.timeout
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn effective_timeout_uses_default_when_zero() {
        let endpoint = Url::parse("https://apis.data.go.kr/1360000/VilageFcstInfoService_2.0")
            .unwrap();
        let config = WeatherConfig::new(endpoint, "key").with_timeout(Duration::ZERO);
        assert_eq!(config.effective_timeout(), DEFAULT_TIMEOUT);
    }
}

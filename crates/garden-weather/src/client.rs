//! Village forecast client implementation using reqwest.

use std::sync::Arc;

use reqwest::Client;

use crate::TRACING_TARGET;
use crate::config::WeatherConfig;
use crate::error::{WeatherError, WeatherResult};
use crate::response::{ForecastEnvelope, ForecastItem, RESULT_CODE_OK};

/// Parameters for a village short-term forecast lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VillageForecastRequest {
    /// Forecast issue date (`YYYYMMDD`).
    pub base_date: String,
    /// Forecast issue time (`HHMM`); the provider publishes every 3 hours.
    pub base_time: String,
    /// Grid x coordinate of the lookup point.
    pub nx: i32,
    /// Grid y coordinate of the lookup point.
    pub ny: i32,
}

/// Inner client that holds the HTTP client and configuration.
struct WeatherClientInner {
    http: Client,
    config: WeatherConfig,
}

/// Client for the government village short-term forecast API.
///
/// Cheap to clone; all clones share the same connection pool.
#[derive(Clone)]
pub struct WeatherClient {
    inner: Arc<WeatherClientInner>,
}

impl WeatherClient {
    /// Creates a new weather client with the given configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid or the HTTP client
    /// cannot be created.
    pub fn new(config: WeatherConfig) -> WeatherResult<Self> {
        if config.service_key.is_empty() {
            return Err(WeatherError::InvalidConfig(
                "service key must not be empty".into(),
            ));
        }

        let http = Client::builder()
            .timeout(config.effective_timeout())
            .user_agent(concat!("garden-weather/", env!("CARGO_PKG_VERSION")))
            .build()?;

        tracing::debug!(
            target: TRACING_TARGET,
            endpoint = %config.endpoint,
            timeout_ms = config.effective_timeout().as_millis(),
            "Weather client created"
        );

        Ok(Self {
            inner: Arc::new(WeatherClientInner { http, config }),
        })
    }

    /// Returns the client configuration.
    pub fn config(&self) -> &WeatherConfig {
        &self.inner.config
    }

    /// Fetches village forecast rows for the given grid point.
    ///
    /// Unwraps the provider's `response.body.items.item` array and checks the
    /// provider result code; a non-`00` code is an error even when the HTTP
    /// call itself succeeded.
    pub async fn fetch_forecast(
        &self,
        request: &VillageForecastRequest,
    ) -> WeatherResult<Vec<ForecastItem>> {
        let config = &self.inner.config;
        let url = config
            .endpoint
            .join("getVilageFcst")
            .map_err(|e| WeatherError::InvalidConfig(e.to_string()))?;

        tracing::debug!(
            target: TRACING_TARGET,
            base_date = %request.base_date,
            base_time = %request.base_time,
            nx = request.nx,
            ny = request.ny,
            "Fetching village forecast"
        );

        let response = self
            .inner
            .http
            .get(url)
            .query(&[
                ("serviceKey", config.service_key.as_str()),
                ("dataType", "JSON"),
                ("pageNo", "1"),
            ])
            .query(&[("numOfRows", config.num_of_rows)])
            .query(&[
                ("base_date", request.base_date.as_str()),
                ("base_time", request.base_time.as_str()),
            ])
            .query(&[("nx", request.nx), ("ny", request.ny)])
            .send()
            .await?
            .error_for_status()?;

        let envelope: ForecastEnvelope = response.json().await?;
        let header = envelope.response.header;

        if header.result_code != RESULT_CODE_OK {
            tracing::warn!(
                target: TRACING_TARGET,
                result_code = %header.result_code,
                result_msg = %header.result_msg,
                "Forecast provider reported an error"
            );

            return Err(WeatherError::Provider {
                code: header.result_code,
                message: header.result_msg,
            });
        }

        let items = envelope
            .response
            .body
            .map(|body| body.items.item)
            .unwrap_or_default();

        tracing::debug!(
            target: TRACING_TARGET,
            count = items.len(),
            "Forecast fetched"
        );

        Ok(items)
    }
}

impl std::fmt::Debug for WeatherClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WeatherClient")
            .field("endpoint", &self.inner.config.endpoint.as_str())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use url::Url;

    use super::*;

    #[test]
    fn rejects_empty_service_key() {
        let endpoint = Url::parse("https://apis.data.go.kr/1360000/VilageFcstInfoService_2.0/")
            .unwrap();
        let result = WeatherClient::new(WeatherConfig::new(endpoint, ""));
        assert!(matches!(result, Err(WeatherError::InvalidConfig(_))));
    }
}

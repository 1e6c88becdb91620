//! Weather provider error to HTTP error conversion.

use garden_weather::WeatherError;

use crate::handler::{Error, ErrorKind};

/// Tracing target for weather error conversion.
const TRACING_TARGET: &str = "garden_server::handler::weather_error";

impl From<WeatherError> for Error<'static> {
    fn from(error: WeatherError) -> Self {
        match error {
            WeatherError::Provider { code, message } => {
                tracing::warn!(
                    target: TRACING_TARGET,
                    code = %code,
                    message = %message,
                    "forecast provider reported a failure"
                );
                ErrorKind::ServiceUnavailable
                    .with_message("The forecast provider rejected the request")
                    .with_resource("weather")
            }
            WeatherError::Http(http_error) => {
                tracing::error!(
                    target: TRACING_TARGET,
                    error = %http_error,
                    transient = http_error.is_timeout() || http_error.is_connect(),
                    "forecast request failed"
                );
                ErrorKind::ServiceUnavailable.with_resource("weather")
            }
            WeatherError::Decode(decode_error) => {
                tracing::error!(
                    target: TRACING_TARGET,
                    error = %decode_error,
                    "forecast response could not be decoded"
                );
                ErrorKind::ServiceUnavailable.with_resource("weather")
            }
            WeatherError::InvalidConfig(message) => {
                tracing::error!(
                    target: TRACING_TARGET,
                    error = %message,
                    "weather client misconfigured"
                );
                ErrorKind::InternalServerError.into_error()
            }
        }
    }
}

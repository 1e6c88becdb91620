#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![doc = include_str!("../README.md")]

mod client;
mod config;
mod error;
mod response;

pub use client::{VillageForecastRequest, WeatherClient};
pub use config::WeatherConfig;
pub use error::{WeatherError, WeatherResult};
pub use response::ForecastItem;

/// Tracing target for weather client operations.
pub const TRACING_TARGET: &str = "garden_weather";

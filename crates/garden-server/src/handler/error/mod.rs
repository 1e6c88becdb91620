//! [`Error`], [`ErrorKind`] and [`Result`].

mod http_error;
mod pg_error;
mod response;
mod storage_error;
mod weather_error;

pub use http_error::{Error, ErrorKind, Result};
pub use response::ErrorResponse;

//! Typed view of the provider's nested response envelope.
//!
//! The provider wraps the forecast rows four levels deep:
//! `response.body.items.item`. Only the fields this backend passes through
//! are modeled; everything else in the envelope is ignored.

use serde::{Deserialize, Serialize};

/// Provider result code that signals a successful call.
pub(crate) const RESULT_CODE_OK: &str = "00";

/// Top-level response wrapper.
#[derive(Debug, Deserialize)]
pub(crate) struct ForecastEnvelope {
    pub response: ForecastResponse,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ForecastResponse {
    pub header: ForecastHeader,
    pub body: Option<ForecastBody>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ForecastHeader {
    pub result_code: String,
    pub result_msg: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ForecastBody {
    pub items: ForecastItems,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ForecastItems {
    #[serde(default)]
    pub item: Vec<ForecastItem>,
}

/// A single forecast row.
///
/// Values are passed through as strings exactly as the provider reports
/// them; the category determines the unit (temperature, precipitation
/// probability, and so on).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "schema", derive(schemars::JsonSchema))]
pub struct ForecastItem {
    /// Forecast issue date (`YYYYMMDD`).
    pub base_date: String,
    /// Forecast issue time (`HHMM`).
    pub base_time: String,
    /// Measurement category code (for example `TMP`, `POP`, `SKY`).
    pub category: String,
    /// Date the value applies to (`YYYYMMDD`).
    pub fcst_date: String,
    /// Time the value applies to (`HHMM`).
    pub fcst_time: String,
    /// Forecast value, unit depends on the category.
    pub fcst_value: String,
    /// Grid x coordinate.
    pub nx: i32,
    /// Grid y coordinate.
    pub ny: i32,
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "response": {
            "header": {"resultCode": "00", "resultMsg": "NORMAL_SERVICE"},
            "body": {
                "dataType": "JSON",
                "items": {
                    "item": [
                        {
                            "baseDate": "20260828",
                            "baseTime": "0500",
                            "category": "TMP",
                            "fcstDate": "20260828",
                            "fcstTime": "0900",
                            "fcstValue": "24",
                            "nx": 60,
                            "ny": 127
                        },
                        {
                            "baseDate": "20260828",
                            "baseTime": "0500",
                            "category": "POP",
                            "fcstDate": "20260828",
                            "fcstTime": "0900",
                            "fcstValue": "30",
                            "nx": 60,
                            "ny": 127
                        }
                    ]
                },
                "numOfRows": 2,
                "pageNo": 1,
                "totalCount": 809
            }
        }
    }"#;

    #[test]
    fn unwraps_nested_item_array() {
        let envelope: ForecastEnvelope = serde_json::from_str(SAMPLE).unwrap();
        assert_eq!(envelope.response.header.result_code, RESULT_CODE_OK);

        let items = envelope.response.body.unwrap().items.item;
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].category, "TMP");
        assert_eq!(items[0].fcst_value, "24");
        assert_eq!(items[1].category, "POP");
        assert_eq!(items[1].nx, 60);
    }

    #[test]
    fn error_envelope_has_no_body() {
        let raw = r#"{
            "response": {
                "header": {"resultCode": "03", "resultMsg": "NODATA_ERROR"}
            }
        }"#;

        let envelope: ForecastEnvelope = serde_json::from_str(raw).unwrap();
        assert_eq!(envelope.response.header.result_code, "03");
        assert!(envelope.response.body.is_none());
    }
}

use chrono::{DateTime, NaiveDate};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Current conditions as returned by the provider. Only the fields this
/// service reads are typed; everything else passes through untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentWeather {
    pub dt: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

/// One 3-hour entry of the forecast list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastSample {
    pub dt: i64,
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl ForecastSample {
    /// UTC calendar day of the sample, `None` if `dt` is outside the range
    /// chrono can represent.
    pub fn calendar_day(&self) -> Option<NaiveDate> {
        DateTime::from_timestamp(self.dt, 0).map(|ts| ts.date_naive())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForecastResponse {
    pub list: Vec<ForecastSample>,
}

/// Envelope the provider uses for error bodies, e.g.
/// `{"cod":"404","message":"city not found"}`.
#[derive(Debug, Deserialize)]
pub struct ProviderErrorBody {
    pub message: Option<String>,
}

/// Current conditions plus the daily digest. Serializes as the current
/// conditions object with an added `forecast` array.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregatedWeather {
    #[serde(flatten)]
    pub current: CurrentWeather,
    pub forecast: Vec<ForecastSample>,
}

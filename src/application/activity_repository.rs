// Repository trait for the activity backend
use crate::domain::metrics::{Reading, parse_numeric};
use crate::domain::movement::parse_coordinate;
use async_trait::async_trait;
use serde::{Deserialize, Deserializer, de};
use std::fmt;

/// The five read-only resources of the activity backend
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    Tracking,
    RecentMovements,
    Diet,
    Water,
    Sleep,
}

impl Endpoint {
    pub fn path(&self) -> &'static str {
        match self {
            Endpoint::Tracking => "get_tracking_info",
            Endpoint::RecentMovements => "recent_movements",
            Endpoint::Diet => "get_diet_info",
            Endpoint::Water => "get_water_info",
            Endpoint::Sleep => "get_sleep_info",
        }
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TrackingInfo {
    #[serde(deserialize_with = "coerce_number")]
    pub total_movement_today: f64,
    #[serde(deserialize_with = "coerce_number")]
    pub avg_movement_past_7days: f64,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct DietInfo {
    #[serde(deserialize_with = "coerce_number")]
    pub total_diet: f64,
    #[serde(deserialize_with = "coerce_number")]
    pub prev_avg_diet: f64,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct WaterInfo {
    #[serde(deserialize_with = "coerce_number")]
    pub total_water: f64,
    #[serde(deserialize_with = "coerce_number")]
    pub prev_avg_water: f64,
}

/// Sleep totals in seconds
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SleepInfo {
    #[serde(deserialize_with = "coerce_number")]
    pub total_sleep: f64,
    #[serde(deserialize_with = "coerce_number")]
    pub prev_avg_sleep: f64,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RecentMovements {
    pub recent_movements: Vec<RawMovement>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RawMovement {
    #[serde(deserialize_with = "coerce_coordinate")]
    pub x: f64,
    #[serde(deserialize_with = "coerce_coordinate")]
    pub y: f64,
    pub timestamp: String,
}

impl From<TrackingInfo> for Reading {
    fn from(info: TrackingInfo) -> Self {
        Reading::new(info.total_movement_today, info.avg_movement_past_7days)
    }
}

impl From<DietInfo> for Reading {
    fn from(info: DietInfo) -> Self {
        Reading::new(info.total_diet, info.prev_avg_diet)
    }
}

impl From<WaterInfo> for Reading {
    fn from(info: WaterInfo) -> Self {
        Reading::new(info.total_water, info.prev_avg_water)
    }
}

impl From<SleepInfo> for Reading {
    fn from(info: SleepInfo) -> Self {
        Reading::new(info.total_sleep, info.prev_avg_sleep)
    }
}

/// Accept a JSON number or numeric text; anything else is a malformed payload
fn coerce_number<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::Number(n) => n
            .as_f64()
            .ok_or_else(|| de::Error::custom(format!("number out of range: {}", n))),
        serde_json::Value::String(s) => Ok(parse_numeric(&s)),
        other => Err(de::Error::custom(format!("expected a number, got {}", other))),
    }
}

/// Coordinates keep their sign; text without a leading number becomes NaN
/// and the sample is left off the overlay
fn coerce_coordinate<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::String(s) => Ok(parse_coordinate(&s).unwrap_or(f64::NAN)),
        other => coerce_number(other).map_err(de::Error::custom),
    }
}

#[async_trait]
pub trait ActivityRepository: Send + Sync {
    /// Distance moved today vs. the 7-day average, in meters
    async fn tracking_info(&self) -> anyhow::Result<TrackingInfo>;

    async fn recent_movements(&self) -> anyhow::Result<RecentMovements>;

    /// Eating time in minutes
    async fn diet_info(&self) -> anyhow::Result<DietInfo>;

    /// Drinking time in minutes
    async fn water_info(&self) -> anyhow::Result<WaterInfo>;

    async fn sleep_info(&self) -> anyhow::Result<SleepInfo>;
}

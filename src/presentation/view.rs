// View model - formatting for the metric cards
use crate::application::dashboard_state::DashboardData;
use crate::domain::metrics::{Measurement, MetricKind, MetricSnapshot};
use crate::domain::progress::{Band, Recommendation, percentage_of};
use serde::Serialize;

/// Fixed-point formatting with `toFixed` semantics.
///
/// `{:.N}` already rounds the exact stored value; only values that sit
/// exactly on a half are rounded away from zero instead of to even.
pub fn format_fixed(value: f64, decimals: usize) -> String {
    match exact_tie(value, decimals) {
        Some(digits) => round_tie_away(value, digits, decimals),
        None => format!("{:.*}", decimals, value),
    }
}

/// Digits of `|value|` at `decimals + 1` places when that string is the
/// exact binary value and ends in 5
fn exact_tie(value: f64, decimals: usize) -> Option<u128> {
    if !value.is_finite() {
        return None;
    }
    let magnitude = value.abs();
    let text = format!("{:.*}", decimals + 1, magnitude);
    if !text.ends_with('5') {
        return None;
    }

    let digits: u128 = text.replace('.', "").parse().ok()?;
    // digits / 10^(d+1) is a dyadic rational only when 5^(d+1) divides it
    let fives = 5u128.checked_pow(decimals as u32 + 1)?;
    if digits % fives != 0 {
        return None;
    }
    let mut odd = digits / fives;
    while odd > 0 && odd % 2 == 0 {
        odd /= 2;
    }
    if odd >= 1 << f64::MANTISSA_DIGITS {
        return None;
    }

    // the decimal is exactly representable, so it is the value itself or another float
    (text.parse::<f64>().ok()? == magnitude).then_some(digits)
}

fn round_tie_away(value: f64, digits: u128, decimals: usize) -> String {
    let rounded = digits / 10 + 1;
    let sign = if value.is_sign_negative() { "-" } else { "" };
    if decimals == 0 {
        return format!("{}{}", sign, rounded);
    }
    let scale = 10u128.pow(decimals as u32);
    format!(
        "{}{}.{:0width$}",
        sign,
        rounded / scale,
        rounded % scale,
        width = decimals
    )
}

pub fn format_measurement(measurement: &Measurement) -> String {
    let unit = measurement.unit;
    format!(
        "{}{}",
        format_fixed(measurement.value, unit.precision()),
        unit.suffix()
    )
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct MetricCardView {
    pub label: &'static str,
    pub emoji: &'static str,
    pub current: String,
    pub standard: String,
    pub percentage: f64,
    pub percentage_text: String,
    pub band: Band,
    pub color: &'static str,
}

impl MetricCardView {
    pub fn build(kind: MetricKind, snapshot: &MetricSnapshot) -> Self {
        let (current, baseline) = snapshot.measurements(kind);
        let percentage = percentage_of(current.value, baseline.value);
        let standard = format_measurement(&baseline);
        let band = Band::for_percentage(percentage);

        Self {
            label: kind.label(),
            emoji: kind.emoji(),
            current: format_measurement(&current),
            percentage_text: format!("{}% of standard ({})", format_fixed(percentage, 1), standard),
            standard,
            percentage,
            band,
            color: band.color(),
        }
    }

    pub fn heading(&self) -> String {
        format!("{} {}: {}", self.emoji, self.label, self.current)
    }

    pub fn standard_text(&self) -> String {
        format!("Standard: {}", self.standard)
    }
}

pub fn build_cards(snapshot: &MetricSnapshot) -> Vec<MetricCardView> {
    MetricKind::ALL
        .iter()
        .map(|kind| MetricCardView::build(*kind, snapshot))
        .collect()
}

pub fn recommendation_text(snapshot: &MetricSnapshot) -> String {
    let recommendation =
        Recommendation::for_distance(snapshot.distance_today, snapshot.distance_baseline);
    format!(
        "Compared with the standard ({}m), today's tracking ({}m) {}",
        format_fixed(snapshot.distance_baseline, 2),
        format_fixed(snapshot.distance_today, 2),
        recommendation.advice()
    )
}

#[derive(Debug, Clone, Serialize)]
pub struct DashboardView {
    pub cards: Vec<MetricCardView>,
    pub recommendation: String,
    pub movement_samples: usize,
    pub cycle: u64,
    pub updated_at: Option<String>,
}

impl DashboardView {
    pub fn from_data(data: &DashboardData) -> Self {
        Self {
            cards: build_cards(&data.snapshot),
            recommendation: recommendation_text(&data.snapshot),
            movement_samples: data.trail.len(),
            cycle: data.cycle,
            updated_at: data.updated_at.map(|t| t.to_rfc3339()),
        }
    }
}

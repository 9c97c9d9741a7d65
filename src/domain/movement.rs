// Recent movement domain models
use anyhow::{Result, anyhow};
use chrono::{DateTime, NaiveDateTime, Utc};
use std::sync::Arc;

/// One point of the recent-movement trail, in video-frame pixel coordinates
#[derive(Debug, Clone, PartialEq)]
pub struct MovementSample {
    pub x: f64,
    pub y: f64,
    pub captured_at: DateTime<Utc>,
}

impl MovementSample {
    pub fn new(x: f64, y: f64, captured_at: DateTime<Utc>) -> Self {
        Self { x, y, captured_at }
    }
}

/// Samples ordered oldest first. Replaced wholesale, never mutated.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Trail {
    samples: Arc<[MovementSample]>,
}

impl Trail {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Sort ascending by capture time. Equal timestamps keep input order.
    pub fn from_samples(mut samples: Vec<MovementSample>) -> Self {
        samples.sort_by_key(|s| s.captured_at);
        Self {
            samples: samples.into(),
        }
    }

    pub fn samples(&self) -> &[MovementSample] {
        &self.samples
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }
}

/// Leading decimal number of a coordinate string, sign and exponent included.
///
/// Trailing text is ignored ("48px" is 48). `None` when no digits lead.
pub fn parse_coordinate(raw: &str) -> Option<f64> {
    let text = raw.trim_start();
    let bytes = text.as_bytes();
    let digits_from = |mut at: usize| {
        while at < bytes.len() && bytes[at].is_ascii_digit() {
            at += 1;
        }
        at
    };

    let mut end = 0;
    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end = 1;
    }
    if text[end..].starts_with("Infinity") {
        return text[..end + "Infinity".len()].parse().ok();
    }

    let int_end = digits_from(end);
    let mut mantissa_end = int_end;
    let mut fraction_digits = false;
    if bytes.get(int_end) == Some(&b'.') {
        mantissa_end = digits_from(int_end + 1);
        fraction_digits = mantissa_end > int_end + 1;
    }
    if int_end == end && !fraction_digits {
        return None;
    }
    end = mantissa_end;

    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exp = end + 1;
        if matches!(bytes.get(exp), Some(b'+' | b'-')) {
            exp += 1;
        }
        let exp_end = digits_from(exp);
        if exp_end > exp {
            end = exp_end;
        }
    }

    text[..end].parse().ok()
}

const NAIVE_FORMATS: [&str; 2] = ["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f"];

/// Parse a backend event time. Offset-less timestamps are read as UTC.
pub fn parse_timestamp(raw: &str) -> Result<DateTime<Utc>> {
    let raw = raw.trim();

    if let Ok(time) = DateTime::parse_from_rfc3339(raw) {
        return Ok(time.with_timezone(&Utc));
    }
    // Flask jsonify renders datetimes as HTTP dates
    if let Ok(time) = DateTime::parse_from_rfc2822(raw) {
        return Ok(time.with_timezone(&Utc));
    }
    for format in NAIVE_FORMATS {
        if let Ok(time) = NaiveDateTime::parse_from_str(raw, format) {
            return Ok(time.and_utc());
        }
    }

    Err(anyhow!("Unrecognized timestamp: {:?}", raw))
}

// Progress against baseline and the daily recommendation
use serde::Serialize;

/// Share of the baseline reached today, clamped to 0..=100.
///
/// A zero baseline counts as fully reached once there is any activity.
pub fn percentage_of(current: f64, baseline: f64) -> f64 {
    if baseline <= 0.0 {
        return if current > 0.0 { 100.0 } else { 0.0 };
    }
    (current / baseline * 100.0).clamp(0.0, 100.0)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Band {
    Low,
    Normal,
    High,
}

impl Band {
    pub fn for_percentage(percentage: f64) -> Self {
        if percentage < 30.0 {
            Band::Low
        } else if percentage < 70.0 {
            Band::Normal
        } else {
            Band::High
        }
    }

    pub fn color(&self) -> &'static str {
        match self {
            Band::Low => "#f44336",
            Band::Normal => "#4caf50",
            Band::High => "#ff9800",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Recommendation {
    Exercise,
    Rest,
}

impl Recommendation {
    pub fn for_distance(today: f64, baseline: f64) -> Self {
        if today < baseline {
            Recommendation::Exercise
        } else {
            Recommendation::Rest
        }
    }

    pub fn advice(&self) -> &'static str {
        match self {
            Recommendation::Exercise => "is lower, so some exercise is recommended.",
            Recommendation::Rest => "is higher, so some rest is recommended.",
        }
    }
}

// Activity metric domain models

/// Unit a metric value is measured in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Unit {
    Meters,
    Minutes,
    Hours,
}

impl Unit {
    pub fn suffix(&self) -> &'static str {
        match self {
            Unit::Meters => "m",
            Unit::Minutes => " min",
            Unit::Hours => " h",
        }
    }

    /// Decimal places used when the value is displayed
    pub fn precision(&self) -> usize {
        match self {
            Unit::Meters => 2,
            Unit::Minutes => 0,
            Unit::Hours => 1,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Measurement {
    pub value: f64,
    pub unit: Unit,
}

impl Measurement {
    pub fn new(value: f64, unit: Unit) -> Self {
        Self { value, unit }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetricKind {
    Tracking,
    Eating,
    Drinking,
    Sleeping,
}

impl MetricKind {
    pub const ALL: [MetricKind; 4] = [
        MetricKind::Tracking,
        MetricKind::Eating,
        MetricKind::Drinking,
        MetricKind::Sleeping,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            MetricKind::Tracking => "Tracking",
            MetricKind::Eating => "Eating",
            MetricKind::Drinking => "Drinking",
            MetricKind::Sleeping => "Sleeping",
        }
    }

    pub fn emoji(&self) -> &'static str {
        match self {
            MetricKind::Tracking => "📍",
            MetricKind::Eating => "🍽️",
            MetricKind::Drinking => "🥤",
            MetricKind::Sleeping => "🛏️",
        }
    }

    pub fn unit(&self) -> Unit {
        match self {
            MetricKind::Tracking => Unit::Meters,
            MetricKind::Eating | MetricKind::Drinking => Unit::Minutes,
            MetricKind::Sleeping => Unit::Hours,
        }
    }
}

/// Today's value next to its baseline, as reported by one endpoint
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Reading {
    pub today: f64,
    pub baseline: f64,
}

impl Reading {
    pub fn new(today: f64, baseline: f64) -> Self {
        Self { today, baseline }
    }
}

const SECONDS_PER_HOUR: f64 = 3600.0;

/// Fully merged metric values from one successful poll cycle.
///
/// Distances are meters, diet and water are minutes, sleep is hours.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct MetricSnapshot {
    pub distance_today: f64,
    pub distance_baseline: f64,
    pub diet_today: f64,
    pub diet_baseline: f64,
    pub water_today: f64,
    pub water_baseline: f64,
    pub sleep_today: f64,
    pub sleep_baseline: f64,
}

impl MetricSnapshot {
    /// Build a snapshot from raw readings. `sleep` is in seconds.
    pub fn from_readings(tracking: Reading, diet: Reading, water: Reading, sleep: Reading) -> Self {
        Self {
            distance_today: tracking.today,
            distance_baseline: tracking.baseline,
            diet_today: diet.today,
            diet_baseline: diet.baseline,
            water_today: water.today,
            water_baseline: water.baseline,
            sleep_today: sleep.today / SECONDS_PER_HOUR,
            sleep_baseline: sleep.baseline / SECONDS_PER_HOUR,
        }
    }

    /// Current value and baseline for one card
    pub fn measurements(&self, kind: MetricKind) -> (Measurement, Measurement) {
        let (today, baseline) = match kind {
            MetricKind::Tracking => (self.distance_today, self.distance_baseline),
            MetricKind::Eating => (self.diet_today, self.diet_baseline),
            MetricKind::Drinking => (self.water_today, self.water_baseline),
            MetricKind::Sleeping => (self.sleep_today, self.sleep_baseline),
        };
        let unit = kind.unit();
        (Measurement::new(today, unit), Measurement::new(baseline, unit))
    }
}

/// Coerce loosely typed numeric text such as `"12.5m"` into a number.
///
/// Everything except digits and `.` is dropped, then the longest leading
/// float is parsed. Input with no usable number yields `0.0`.
pub fn parse_numeric(input: &str) -> f64 {
    let cleaned: String = input
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.')
        .collect();

    // "1.2.3" parses as 1.2
    let mut end = 0;
    let mut seen_dot = false;
    for (idx, c) in cleaned.char_indices() {
        if c == '.' {
            if seen_dot {
                break;
            }
            seen_dot = true;
        }
        end = idx + 1;
    }

    cleaned[..end].parse::<f64>().unwrap_or(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sleep_is_converted_to_hours() {
        let snapshot = MetricSnapshot::from_readings(
            Reading::new(120.456, 80.0),
            Reading::new(35.0, 40.0),
            Reading::new(12.0, 10.0),
            Reading::new(27000.0, 28800.0),
        );

        assert_eq!(snapshot.distance_today, 120.456);
        assert_eq!(snapshot.diet_baseline, 40.0);
        assert_eq!(snapshot.sleep_today, 7.5);
        assert_eq!(snapshot.sleep_baseline, 8.0);
    }

    #[test]
    fn test_default_snapshot_is_zeroed() {
        let snapshot = MetricSnapshot::default();
        for kind in MetricKind::ALL {
            let (current, baseline) = snapshot.measurements(kind);
            assert_eq!(current.value, 0.0);
            assert_eq!(baseline.value, 0.0);
            assert_eq!(current.unit, kind.unit());
        }
    }

    #[test]
    fn test_parse_numeric() {
        assert_eq!(parse_numeric("120.46m"), 120.46);
        assert_eq!(parse_numeric("35 min"), 35.0);
        assert_eq!(parse_numeric("  42 "), 42.0);
        assert_eq!(parse_numeric(".5"), 0.5);
        assert_eq!(parse_numeric("1.2.3"), 1.2);
        // sign is stripped along with every other non-numeric character
        assert_eq!(parse_numeric("-7.25"), 7.25);
    }

    #[test]
    fn test_parse_numeric_falls_back_to_zero() {
        assert_eq!(parse_numeric(""), 0.0);
        assert_eq!(parse_numeric("n/a"), 0.0);
        assert_eq!(parse_numeric("."), 0.0);
    }
}

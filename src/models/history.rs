use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::validate::{lenient_f64, non_negative, Validate};

/// One chart sample: an axis label and a USD value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryPoint {
    #[serde(alias = "date", alias = "time")]
    pub label: String,
    #[serde(alias = "price", deserialize_with = "lenient_f64")]
    pub value: f64,
}

impl HistoryPoint {
    pub fn new(label: impl Into<String>, value: f64) -> Self {
        Self {
            label: label.into(),
            value,
        }
    }
}

impl Validate for HistoryPoint {
    fn validate(&self) -> Result<(), String> {
        non_negative(&format!("value at {}", self.label), self.value)
    }
}

/// Window selectable on the token price chart
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TimeRange {
    OneDay,
    #[default]
    OneWeek,
    OneMonth,
    OneYear,
}

const WEEKDAYS: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];
const MONTHS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

impl TimeRange {
    pub const ALL: [TimeRange; 4] = [
        TimeRange::OneDay,
        TimeRange::OneWeek,
        TimeRange::OneMonth,
        TimeRange::OneYear,
    ];

    pub fn code(&self) -> &'static str {
        match self {
            TimeRange::OneDay => "1D",
            TimeRange::OneWeek => "1W",
            TimeRange::OneMonth => "1M",
            TimeRange::OneYear => "1Y",
        }
    }

    pub fn points(&self) -> usize {
        match self {
            TimeRange::OneDay => 24,
            TimeRange::OneWeek => 7,
            TimeRange::OneMonth => 30,
            TimeRange::OneYear => 12,
        }
    }

    /// Full peak-to-peak jitter around the current price for synthetic series
    pub fn spread(&self) -> f64 {
        match self {
            TimeRange::OneDay => 0.02,
            TimeRange::OneWeek => 0.05,
            TimeRange::OneMonth => 0.1,
            TimeRange::OneYear => 0.2,
        }
    }

    /// Axis label for the `i`-th sample
    pub fn label(&self, i: usize) -> String {
        match self {
            TimeRange::OneDay => format!("{}:00", i),
            TimeRange::OneWeek => WEEKDAYS[i % WEEKDAYS.len()].to_string(),
            TimeRange::OneMonth => format!("Day {}", i + 1),
            TimeRange::OneYear => MONTHS[i % MONTHS.len()].to_string(),
        }
    }
}

impl FromStr for TimeRange {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "1D" => Ok(TimeRange::OneDay),
            "1W" => Ok(TimeRange::OneWeek),
            "1M" => Ok(TimeRange::OneMonth),
            "1Y" => Ok(TimeRange::OneYear),
            other => Err(format!("unknown time range {:?}", other)),
        }
    }
}

impl fmt::Display for TimeRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

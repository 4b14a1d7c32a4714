use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use tabled::Tabled;

/// A scheduled game as advertised by the odds provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Fixture {
    pub id: String,
    pub name: String,
    #[serde(rename = "startTime")]
    pub start_time: String,
}

impl Fixture {
    pub fn new(id: impl Into<String>, name: impl Into<String>, start_time: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            start_time: start_time.into(),
        }
    }

    /// Parsed start time, if the provider sent RFC 3339.
    pub fn starts_at(&self) -> Option<DateTime<Utc>> {
        DateTime::parse_from_rfc3339(&self.start_time)
            .ok()
            .map(|dt| dt.with_timezone(&Utc))
    }

    /// Start time for display; falls back to the raw provider string.
    pub fn start_label(&self) -> String {
        match self.starts_at() {
            Some(dt) => dt.format("%a %d %b %H:%M UTC").to_string(),
            None => self.start_time.clone(),
        }
    }
}

/// A named betting proposition and its outcomes, in provider order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Market {
    pub name: String,
    #[serde(default)]
    pub outcomes: Vec<Outcome>,
}

impl Market {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            outcomes: Vec::new(),
        }
    }

    pub fn with_outcome(mut self, label: impl Into<String>, odds: impl Into<OddsValue>) -> Self {
        self.outcomes.push(Outcome {
            label: label.into(),
            odds: odds.into(),
        });
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Outcome {
    pub label: String,
    pub odds: OddsValue,
}

/// Quoted odds, kept exactly as the provider typed them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OddsValue {
    /// Integer and decimal odds stay distinct: `2` is not rewritten as `2.0`.
    Number(serde_json::Number),
    Text(String),
}

impl fmt::Display for OddsValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OddsValue::Number(n) => write!(f, "{}", n),
            OddsValue::Text(s) => f.write_str(s),
        }
    }
}

impl From<f64> for OddsValue {
    fn from(value: f64) -> Self {
        match serde_json::Number::from_f64(value) {
            Some(n) => OddsValue::Number(n),
            None => OddsValue::Text(value.to_string()),
        }
    }
}

impl From<i64> for OddsValue {
    fn from(value: i64) -> Self {
        OddsValue::Number(value.into())
    }
}

impl From<&str> for OddsValue {
    fn from(value: &str) -> Self {
        OddsValue::Text(value.to_string())
    }
}

impl From<String> for OddsValue {
    fn from(value: String) -> Self {
        OddsValue::Text(value)
    }
}

/// One (market, outcome) pair flattened for display and export.
#[derive(Debug, Clone, PartialEq, Serialize, Tabled)]
pub struct OddsRow {
    #[serde(rename = "Market")]
    #[tabled(rename = "Market")]
    pub market: String,
    #[serde(rename = "Player")]
    #[tabled(rename = "Player")]
    pub player: String,
    #[serde(rename = "Odds")]
    #[tabled(rename = "Odds")]
    pub odds: OddsValue,
}

impl OddsRow {
    pub fn new(market: impl Into<String>, player: impl Into<String>, odds: impl Into<OddsValue>) -> Self {
        Self {
            market: market.into(),
            player: player.into(),
            odds: odds.into(),
        }
    }
}

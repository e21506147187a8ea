use serde::Serialize;

use crate::models::enums::{ContextKey, TimePeriod, TrendDirection, TriggerCategory};

/// Full pattern report for one profile's entries.
///
/// When there are too few entries, `has_enough_data` is false, `message`
/// explains why, and every section is `None`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisReport {
    pub has_enough_data: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub total_entries: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weather_patterns: Option<Section<WeatherPatterns>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_patterns: Option<Section<TimePatterns>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context_patterns: Option<Section<ContextPatterns>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub symptom_frequency: Option<Section<SymptomFrequency>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub severity_trends: Option<Section<SeverityTrend>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub common_triggers: Option<Section<CommonTriggers>>,
}

/// One sub-report. Serialises as `{"hasData": false}` or as
/// `{"hasData": true, ...fields of T}`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Section<T> {
    pub has_data: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(flatten)]
    pub data: Option<T>,
}

impl<T> Section<T> {
    pub fn ready(data: T) -> Self {
        Self {
            has_data: true,
            message: None,
            data: Some(data),
        }
    }

    pub fn empty() -> Self {
        Self {
            has_data: false,
            message: None,
            data: None,
        }
    }

    pub fn empty_because(message: impl Into<String>) -> Self {
        Self {
            has_data: false,
            message: Some(message.into()),
            data: None,
        }
    }

    pub fn data(&self) -> Option<&T> {
        self.data.as_ref()
    }
}

impl<T> From<Option<T>> for Section<T> {
    fn from(data: Option<T>) -> Self {
        match data {
            Some(d) => Section::ready(d),
            None => Section::empty(),
        }
    }
}

// ── Weather ────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WeatherPatterns {
    pub patterns: Vec<WeatherStat>,
    pub insight: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WeatherStat {
    pub condition: String,
    pub count: usize,
    pub avg_intensity: String,
}

// ── Time of day ────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TimePatterns {
    pub patterns: Vec<PeriodStat>,
    pub insight: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PeriodStat {
    pub period: TimePeriod,
    pub count: usize,
    pub avg_intensity: String,
}

// ── Context ────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContextPatterns {
    /// Only context types with at least one qualifying value, in
    /// `ContextKey::ALL` order.
    pub correlations: Vec<ContextCorrelation>,
    pub insight: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContextCorrelation {
    pub context_type: ContextKey,
    pub values: Vec<ValueStat>,
    pub top_correlation: ValueStat,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValueStat {
    pub value: String,
    pub count: usize,
    pub avg_intensity: String,
}

// ── Symptom frequency ──────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SymptomFrequency {
    pub symptoms: Vec<SymptomStat>,
    pub most_frequent: Option<SymptomStat>,
    pub insight: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SymptomStat {
    pub symptom_id: String,
    pub name: String,
    pub emoji: String,
    pub count: usize,
    pub avg_intensity: String,
    pub percentage: i64,
}

// ── Severity trend ─────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SeverityTrend {
    pub first_period_avg: String,
    pub second_period_avg: String,
    /// Second-period mean minus first-period mean, one decimal.
    pub change: String,
    pub trend: TrendDirection,
    /// Signed percent change. `None` when stable or when the first period
    /// averaged zero.
    pub change_percent: Option<i64>,
    pub insight: Option<String>,
}

// ── Triggers ───────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommonTriggers {
    pub triggers: Vec<Trigger>,
    pub insight: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Trigger {
    pub category: TriggerCategory,
    pub value: String,
    pub count: usize,
    pub avg_intensity: String,
    pub impact: String,
}

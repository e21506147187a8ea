use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::enums::ContextKey;

/// One logged symptom occurrence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Entry {
    pub id: String,
    pub profile_id: String,
    pub symptom_id: String,
    pub date: NaiveDate,
    pub timestamp: DateTime<Utc>,
    pub intensity: i32,
    pub duration: Option<u32>,
    pub note: Option<String>,
    pub context: Option<EntryContext>,
    pub environment: Option<Environment>,
    #[serde(default)]
    pub photos: Vec<String>,
    pub voice_note: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Entry {
    /// Context value for `key`, if one was recorded. Empty strings count as absent.
    pub fn context_value(&self, key: ContextKey) -> Option<&str> {
        self.context.as_ref().and_then(|c| c.get(key))
    }

    pub fn weather_condition(&self) -> Option<&str> {
        self.environment
            .as_ref()
            .and_then(|env| env.weather.as_ref())
            .and_then(|w| w.condition.as_deref())
            .filter(|c| !c.is_empty())
    }

    pub fn time_of_day(&self) -> Option<u8> {
        self.environment.as_ref().and_then(|env| env.time_of_day)
    }
}

/// Caregiver-entered qualitative tags.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntryContext {
    pub mood: Option<String>,
    pub energy: Option<String>,
    pub activity: Option<String>,
    pub food: Option<String>,
    pub medication: Option<String>,
}

impl EntryContext {
    pub fn get(&self, key: ContextKey) -> Option<&str> {
        let value = match key {
            ContextKey::Mood => &self.mood,
            ContextKey::Energy => &self.energy,
            ContextKey::Activity => &self.activity,
            ContextKey::Food => &self.food,
            ContextKey::Medication => &self.medication,
        };
        value.as_deref().filter(|v| !v.is_empty())
    }

    pub fn is_empty(&self) -> bool {
        ContextKey::ALL.iter().all(|k| self.get(*k).is_none())
    }
}

/// Situational data captured alongside an entry.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Environment {
    /// Hour of day, 0-23.
    pub time_of_day: Option<u8>,
    /// 0 = Sunday.
    pub day_of_week: Option<u8>,
    pub location: Option<Location>,
    pub weather: Option<Weather>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub lat: f64,
    pub lng: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Weather {
    pub condition: Option<String>,
    pub temp: Option<f64>,
    pub pressure: Option<f64>,
    pub city: Option<String>,
}

use chrono::NaiveDate;
use serde::Deserialize;

/// History filter. All set fields must match.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EntryFilter {
    pub symptom_id: Option<String>,
    pub date_from: Option<NaiveDate>,
    pub date_to: Option<NaiveDate>,
    pub intensity_min: Option<i32>,
    pub intensity_max: Option<i32>,
    /// Case-insensitive substring match on the note. Accented letters fold too.
    pub search: Option<String>,
    pub limit: Option<u32>,
}

#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct SymptomFilter {
    /// Parent mode shows `parent_only` symptoms too.
    #[serde(default)]
    pub parent_mode: bool,
}

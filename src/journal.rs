//! Symptom journal workflow.
//!
//! Input types, validation and the operations the API calls: logging and
//! editing entries, history queries, symptom and profile management,
//! active-profile selection and "analyze this profile".

use chrono::{DateTime, Datelike, Local, Timelike, Utc};
use rusqlite::Connection;
use serde::{Deserialize, Deserializer};
use thiserror::Error;
use uuid::Uuid;

use crate::analysis::{self, AnalysisReport};
use crate::config::LOCAL_OWNER;
use crate::db::repository;
use crate::db::DatabaseError;
use crate::models::enums::ResourceType;
use crate::models::*;

// ═══════════════════════════════════════════
// Limits
// ═══════════════════════════════════════════

pub const MIN_INTENSITY: i32 = 0;
pub const MAX_INTENSITY: i32 = 10;
pub const MAX_NOTE_CHARS: usize = 1000;
pub const MAX_PHOTOS: usize = 10;
pub const MAX_NAME_CHARS: usize = 100;

#[derive(Error, Debug)]
pub enum JournalError {
    #[error("Invalid input: {0}")]
    Validation(String),

    #[error(transparent)]
    Database(#[from] DatabaseError),
}

// ═══════════════════════════════════════════
// Input types
// ═══════════════════════════════════════════

/// A new diary entry as submitted by the frontend.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewEntry {
    pub symptom_id: String,
    /// Defaults to now.
    pub timestamp: Option<DateTime<Utc>>,
    pub intensity: i32,
    /// Minutes.
    pub duration: Option<i64>,
    pub note: Option<String>,
    pub context: Option<EntryContext>,
    pub environment: Option<Environment>,
    #[serde(default)]
    pub photos: Vec<String>,
    pub voice_note: Option<String>,
}

/// Partial edit of an entry. Absent fields are left unchanged; an empty
/// note or voice note clears it, and so does `"duration": null`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntryUpdate {
    pub symptom_id: Option<String>,
    pub intensity: Option<i32>,
    #[serde(default, deserialize_with = "present")]
    pub duration: Option<Option<i64>>,
    pub note: Option<String>,
    pub context: Option<EntryContext>,
    pub environment: Option<Environment>,
    pub photos: Option<Vec<String>>,
    pub voice_note: Option<String>,
}

/// Wraps any present value, `null` included, in `Some`.
fn present<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewSymptom {
    pub name: String,
    #[serde(default)]
    pub emoji: String,
    #[serde(default)]
    pub parent_only: bool,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SymptomUpdate {
    pub name: Option<String>,
    pub emoji: Option<String>,
    pub parent_only: Option<bool>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct NewProfile {
    pub name: String,
    pub avatar: Option<String>,
}

// ═══════════════════════════════════════════
// Validation
// ═══════════════════════════════════════════

fn validate_intensity(intensity: i32) -> Result<(), JournalError> {
    if !(MIN_INTENSITY..=MAX_INTENSITY).contains(&intensity) {
        return Err(JournalError::Validation(format!(
            "Intensity must be between {MIN_INTENSITY} and {MAX_INTENSITY}"
        )));
    }
    Ok(())
}

fn validate_duration(duration: Option<i64>) -> Result<Option<u32>, JournalError> {
    match duration {
        None => Ok(None),
        Some(minutes) => u32::try_from(minutes)
            .map(Some)
            .map_err(|_| JournalError::Validation("Duration must be a non-negative number of minutes".into())),
    }
}

fn validate_environment(environment: Option<&Environment>) -> Result<(), JournalError> {
    let Some(env) = environment else {
        return Ok(());
    };
    if env.time_of_day.is_some_and(|h| h > 23) {
        return Err(JournalError::Validation("timeOfDay must be between 0 and 23".into()));
    }
    if env.day_of_week.is_some_and(|d| d > 6) {
        return Err(JournalError::Validation("dayOfWeek must be between 0 and 6".into()));
    }
    Ok(())
}

fn validate_note(note: Option<String>) -> Result<Option<String>, JournalError> {
    let note = note.filter(|n| !n.trim().is_empty());
    if let Some(ref n) = note {
        if n.chars().count() > MAX_NOTE_CHARS {
            return Err(JournalError::Validation(format!(
                "Note must be {MAX_NOTE_CHARS} characters or fewer"
            )));
        }
    }
    Ok(note)
}

fn validate_photos(photos: &[String]) -> Result<(), JournalError> {
    if photos.len() > MAX_PHOTOS {
        return Err(JournalError::Validation(format!(
            "At most {MAX_PHOTOS} photos per entry"
        )));
    }
    if photos.iter().any(|p| p.trim().is_empty()) {
        return Err(JournalError::Validation("Photo reference must not be empty".into()));
    }
    Ok(())
}

fn validate_name(name: &str, what: &str) -> Result<String, JournalError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(JournalError::Validation(format!("{what} name is required")));
    }
    if trimmed.chars().count() > MAX_NAME_CHARS {
        return Err(JournalError::Validation(format!("{what} name too long")));
    }
    Ok(trimmed.to_string())
}

fn require_profile(conn: &Connection, profile_id: &str) -> Result<Profile, JournalError> {
    repository::get_profile(conn, profile_id)?
        .ok_or_else(|| DatabaseError::not_found("Profile", profile_id).into())
}

/// The symptom must exist and belong to the profile.
fn require_symptom_in_profile(
    conn: &Connection,
    profile_id: &str,
    symptom_id: &str,
) -> Result<Symptom, JournalError> {
    match repository::get_symptom(conn, symptom_id)? {
        Some(s) if s.profile_id == profile_id => Ok(s),
        _ => Err(JournalError::Validation(format!(
            "Unknown symptom for this profile: {symptom_id}"
        ))),
    }
}

/// Fills `timeOfDay`/`dayOfWeek` from the local wall-clock time of the entry
/// when the client did not supply them.
fn derive_environment(timestamp: DateTime<Utc>, environment: Option<Environment>) -> Environment {
    let local = timestamp.with_timezone(&Local);
    let mut env = environment.unwrap_or_default();
    if env.time_of_day.is_none() {
        env.time_of_day = Some(local.hour() as u8);
    }
    if env.day_of_week.is_none() {
        env.day_of_week = Some(local.weekday().num_days_from_sunday() as u8);
    }
    env
}

// ═══════════════════════════════════════════
// Entries
// ═══════════════════════════════════════════

pub fn log_entry(conn: &Connection, profile_id: &str, input: NewEntry) -> Result<Entry, JournalError> {
    require_profile(conn, profile_id)?;
    require_symptom_in_profile(conn, profile_id, &input.symptom_id)?;
    validate_intensity(input.intensity)?;
    let duration = validate_duration(input.duration)?;
    let note = validate_note(input.note)?;
    validate_photos(&input.photos)?;
    validate_environment(input.environment.as_ref())?;

    let now = Utc::now();
    let timestamp = input.timestamp.unwrap_or(now);
    let entry = Entry {
        id: Uuid::new_v4().to_string(),
        profile_id: profile_id.to_string(),
        symptom_id: input.symptom_id,
        date: timestamp.with_timezone(&Local).date_naive(),
        timestamp,
        intensity: input.intensity,
        duration,
        note,
        context: input.context.filter(|c| !c.is_empty()),
        environment: Some(derive_environment(timestamp, input.environment)),
        photos: input.photos,
        voice_note: input.voice_note.filter(|v| !v.trim().is_empty()),
        created_at: now,
        updated_at: now,
    };

    repository::insert_entry(conn, &entry)?;
    tracing::debug!(entry_id = %entry.id, profile_id, "Entry logged");
    Ok(entry)
}

pub fn get_entry(conn: &Connection, id: &str) -> Result<Entry, JournalError> {
    repository::get_entry(conn, id)?
        .ok_or_else(|| DatabaseError::not_found("Entry", id).into())
}

/// Applies a partial edit. Identity fields and the original timestamp are kept.
pub fn edit_entry(conn: &Connection, id: &str, update: EntryUpdate) -> Result<Entry, JournalError> {
    let mut entry = get_entry(conn, id)?;

    if let Some(symptom_id) = update.symptom_id {
        require_symptom_in_profile(conn, &entry.profile_id, &symptom_id)?;
        entry.symptom_id = symptom_id;
    }
    if let Some(intensity) = update.intensity {
        validate_intensity(intensity)?;
        entry.intensity = intensity;
    }
    if let Some(duration) = update.duration {
        entry.duration = validate_duration(duration)?;
    }
    if update.note.is_some() {
        entry.note = validate_note(update.note)?;
    }
    if let Some(context) = update.context {
        entry.context = Some(context).filter(|c| !c.is_empty());
    }
    if let Some(environment) = update.environment {
        validate_environment(Some(&environment))?;
        entry.environment = Some(derive_environment(entry.timestamp, Some(environment)));
    }
    if let Some(photos) = update.photos {
        validate_photos(&photos)?;
        entry.photos = photos;
    }
    if let Some(voice_note) = update.voice_note {
        entry.voice_note = Some(voice_note).filter(|v| !v.trim().is_empty());
    }
    entry.updated_at = Utc::now();

    repository::update_entry(conn, &entry)?;
    tracing::debug!(entry_id = %entry.id, "Entry edited");
    Ok(entry)
}

pub fn delete_entry(conn: &Connection, id: &str) -> Result<(), JournalError> {
    repository::delete_entry(conn, id)?;
    tracing::debug!(entry_id = id, "Entry deleted");
    Ok(())
}

/// Removes several entries of one profile atomically. Returns how many were removed.
pub fn bulk_delete_entries(
    conn: &Connection,
    profile_id: &str,
    ids: &[String],
) -> Result<usize, JournalError> {
    require_profile(conn, profile_id)?;
    let removed = repository::delete_entries(conn, profile_id, ids)?;
    if removed < ids.len() {
        tracing::warn!(
            requested = ids.len(),
            removed,
            profile_id,
            "Bulk delete skipped ids not owned by profile"
        );
    }
    Ok(removed)
}

pub fn entry_history(
    conn: &Connection,
    profile_id: &str,
    filter: &EntryFilter,
) -> Result<Vec<Entry>, JournalError> {
    if let (Some(min), Some(max)) = (filter.intensity_min, filter.intensity_max) {
        if min > max {
            return Err(JournalError::Validation("intensity_min is greater than intensity_max".into()));
        }
    }
    if let (Some(from), Some(to)) = (filter.date_from, filter.date_to) {
        if from > to {
            return Err(JournalError::Validation("date_from is after date_to".into()));
        }
    }
    require_profile(conn, profile_id)?;
    Ok(repository::list_entries(conn, profile_id, filter)?)
}

/// Runs the pattern analysis over the profile's (optionally filtered) entries.
pub fn analyze_profile(
    conn: &Connection,
    profile_id: &str,
    filter: &EntryFilter,
) -> Result<AnalysisReport, JournalError> {
    let entries = entry_history(conn, profile_id, filter)?;
    // Parent-only symptoms still need their names in the report.
    let symptoms = repository::list_symptoms(conn, profile_id, &SymptomFilter { parent_mode: true })?;
    let report = analysis::analyze(&entries, &symptoms);
    tracing::debug!(
        profile_id,
        entries = entries.len(),
        has_enough_data = report.has_enough_data,
        "Profile analysed"
    );
    Ok(report)
}

// ═══════════════════════════════════════════
// Symptoms
// ═══════════════════════════════════════════

pub fn create_symptom(
    conn: &Connection,
    profile_id: &str,
    input: NewSymptom,
) -> Result<Symptom, JournalError> {
    require_profile(conn, profile_id)?;
    let name = validate_name(&input.name, "Symptom")?;
    let now = Utc::now();
    let symptom = Symptom {
        id: Uuid::new_v4().to_string(),
        profile_id: profile_id.to_string(),
        name,
        emoji: input.emoji.trim().to_string(),
        parent_only: input.parent_only,
        created_at: now,
        updated_at: now,
    };
    repository::insert_symptom(conn, &symptom)?;
    Ok(symptom)
}

pub fn update_symptom(
    conn: &Connection,
    id: &str,
    update: SymptomUpdate,
) -> Result<Symptom, JournalError> {
    let mut symptom = repository::get_symptom(conn, id)?
        .ok_or_else(|| DatabaseError::not_found("Symptom", id))?;
    if let Some(name) = update.name {
        symptom.name = validate_name(&name, "Symptom")?;
    }
    if let Some(emoji) = update.emoji {
        symptom.emoji = emoji.trim().to_string();
    }
    if let Some(parent_only) = update.parent_only {
        symptom.parent_only = parent_only;
    }
    symptom.updated_at = Utc::now();
    repository::update_symptom(conn, &symptom)?;
    Ok(symptom)
}

/// Deletes a symptom. Refuses while entries still reference it unless
/// `force` is set; forced deletion leaves those entries in place.
pub fn delete_symptom(conn: &Connection, id: &str, force: bool) -> Result<(), JournalError> {
    let referencing = repository::count_entries_for_symptom(conn, id)?;
    if referencing > 0 && !force {
        return Err(JournalError::Validation(format!(
            "Symptom is used by {referencing} entries"
        )));
    }
    repository::delete_symptom(conn, id)?;
    if referencing > 0 {
        tracing::warn!(symptom_id = id, referencing, "Deleted symptom still referenced by entries");
    }
    Ok(())
}

pub fn visible_symptoms(
    conn: &Connection,
    profile_id: &str,
    parent_mode: bool,
) -> Result<Vec<Symptom>, JournalError> {
    require_profile(conn, profile_id)?;
    Ok(repository::list_symptoms(conn, profile_id, &SymptomFilter { parent_mode })?)
}

// ═══════════════════════════════════════════
// Profiles
// ═══════════════════════════════════════════

pub fn create_profile(conn: &Connection, input: NewProfile) -> Result<Profile, JournalError> {
    let profile = Profile {
        id: Uuid::new_v4().to_string(),
        name: validate_name(&input.name, "Profile")?,
        avatar: input.avatar.filter(|a| !a.trim().is_empty()),
        created_at: Utc::now(),
    };
    repository::insert_profile(conn, &profile)?;
    Ok(profile)
}

pub fn get_profile(conn: &Connection, id: &str) -> Result<Profile, JournalError> {
    require_profile(conn, id)
}

pub fn update_profile(conn: &Connection, id: &str, input: NewProfile) -> Result<Profile, JournalError> {
    let name = validate_name(&input.name, "Profile")?;
    let avatar = input.avatar.filter(|a| !a.trim().is_empty());
    repository::update_profile(conn, id, &name, avatar.as_deref())?;
    require_profile(conn, id)
}

/// Deletes a profile with all its data and drops it as the active selection.
pub fn delete_profile(conn: &Connection, id: &str) -> Result<(), JournalError> {
    repository::delete_profile(conn, id)?;
    if repository::get_resource(conn, LOCAL_OWNER, ResourceType::ActiveProfile)?.as_deref() == Some(id) {
        repository::clear_resource(conn, LOCAL_OWNER, ResourceType::ActiveProfile)?;
    }
    tracing::info!(profile_id = id, "Profile deleted");
    Ok(())
}

/// The selected profile, or the oldest one when nothing valid is selected.
pub fn active_profile(conn: &Connection) -> Result<Option<Profile>, JournalError> {
    if let Some(id) = repository::get_resource(conn, LOCAL_OWNER, ResourceType::ActiveProfile)? {
        if let Some(profile) = repository::get_profile(conn, &id)? {
            return Ok(Some(profile));
        }
        tracing::warn!(profile_id = %id, "Active profile no longer exists");
    }
    Ok(repository::list_profiles(conn)?.into_iter().next())
}

pub fn set_active_profile(conn: &Connection, id: &str) -> Result<Profile, JournalError> {
    let profile = require_profile(conn, id)?;
    repository::set_resource(conn, LOCAL_OWNER, ResourceType::ActiveProfile, id)?;
    Ok(profile)
}

// ═══════════════════════════════════════════
// Tests
// ═══════════════════════════════════════════

use chrono::{DateTime, Duration, TimeZone, Utc};

use crate::models::enums::ContextKey;
use crate::models::{Entry, EntryContext, Environment, Symptom, Weather};

fn base_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap()
}

/// Entry `n` is logged `n` hours after a fixed base time.
pub fn entry(n: i64, intensity: i32) -> Entry {
    let ts = base_time() + Duration::hours(n);
    Entry {
        id: format!("e-{n}"),
        profile_id: "p-1".into(),
        symptom_id: "s-1".into(),
        date: ts.date_naive(),
        timestamp: ts,
        intensity,
        duration: None,
        note: None,
        context: None,
        environment: None,
        photos: vec![],
        voice_note: None,
        created_at: ts,
        updated_at: ts,
    }
}

pub fn for_symptom(mut e: Entry, symptom_id: &str) -> Entry {
    e.symptom_id = symptom_id.into();
    e
}

pub fn with_weather(mut e: Entry, condition: &str) -> Entry {
    let env = e.environment.get_or_insert_with(Environment::default);
    env.weather = Some(Weather {
        condition: Some(condition.into()),
        ..Default::default()
    });
    e
}

pub fn at_hour(mut e: Entry, hour: u8) -> Entry {
    e.environment
        .get_or_insert_with(Environment::default)
        .time_of_day = Some(hour);
    e
}

pub fn with_context(mut e: Entry, key: ContextKey, value: &str) -> Entry {
    let ctx = e.context.get_or_insert_with(EntryContext::default);
    let slot = match key {
        ContextKey::Mood => &mut ctx.mood,
        ContextKey::Energy => &mut ctx.energy,
        ContextKey::Activity => &mut ctx.activity,
        ContextKey::Food => &mut ctx.food,
        ContextKey::Medication => &mut ctx.medication,
    };
    *slot = Some(value.into());
    e
}

pub fn symptom(id: &str, name: &str, emoji: &str) -> Symptom {
    Symptom {
        id: id.into(),
        profile_id: "p-1".into(),
        name: name.into(),
        emoji: emoji.into(),
        parent_only: false,
        created_at: base_time(),
        updated_at: base_time(),
    }
}

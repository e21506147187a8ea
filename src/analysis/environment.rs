use crate::models::enums::TimePeriod;
use crate::models::Entry;

use super::stats::{sort_desc_by, Groups, Tally};
use super::types::*;

/// Minimum number of weather-tagged entries before weather is analysed.
pub const MIN_WEATHER_ENTRIES: usize = 3;

/// Mean intensity per weather condition, highest first.
pub fn weather_patterns(entries: &[Entry]) -> Section<WeatherPatterns> {
    let mut groups = Groups::new();
    let mut tagged = 0usize;
    for entry in entries {
        if let Some(condition) = entry.weather_condition() {
            groups.add(condition.to_string(), entry.intensity);
            tagged += 1;
        }
    }

    if tagged < MIN_WEATHER_ENTRIES {
        return Section::empty();
    }

    let mut ranked: Vec<(String, Tally)> = groups.into_vec();
    sort_desc_by(&mut ranked, |(_, t)| t.rounded_mean());

    let patterns: Vec<WeatherStat> = ranked
        .into_iter()
        .map(|(condition, tally)| WeatherStat {
            condition,
            count: tally.count,
            avg_intensity: tally.formatted_mean(),
        })
        .collect();

    let insight = patterns.first().map(|top| {
        format!(
            "Symptoms are strongest in {} weather (average intensity {}).",
            top.condition, top.avg_intensity
        )
    });

    Section::ready(WeatherPatterns { patterns, insight })
}

/// Mean intensity per part of the day, highest first. Empty periods are omitted.
pub fn time_patterns(entries: &[Entry]) -> Section<TimePatterns> {
    let mut buckets = [Tally::default(); 4];
    for entry in entries {
        if let Some(hour) = entry.time_of_day() {
            buckets[TimePeriod::from_hour(hour) as usize].add(entry.intensity);
        }
    }

    let mut ranked: Vec<(TimePeriod, Tally)> = TimePeriod::ALL
        .into_iter()
        .zip(buckets)
        .filter(|(_, t)| t.count > 0)
        .collect();

    if ranked.is_empty() {
        return Section::empty();
    }

    sort_desc_by(&mut ranked, |(_, t)| t.rounded_mean());

    let patterns: Vec<PeriodStat> = ranked
        .into_iter()
        .map(|(period, tally)| PeriodStat {
            period,
            count: tally.count,
            avg_intensity: tally.formatted_mean(),
        })
        .collect();

    let insight = patterns.first().map(|top| {
        format!(
            "Symptoms are most intense in the {} (average intensity {}).",
            top.period, top.avg_intensity
        )
    });

    Section::ready(TimePatterns { patterns, insight })
}

use crate::models::enums::TrendDirection;
use crate::models::Entry;

use super::stats::{format_tenths, round_half_up, Tally};
use super::types::*;

/// Entries needed before a trend is reported.
pub const MIN_TREND_ENTRIES: usize = 7;

/// Changes smaller than this (in intensity points) count as stable.
const STABLE_THRESHOLD: f64 = 0.5;

/// Compares the mean intensity of the older half of the entries with the
/// newer half. With an odd count the older half is the smaller one.
pub fn severity_trend(entries: &[Entry]) -> Section<SeverityTrend> {
    if entries.len() < MIN_TREND_ENTRIES {
        return Section::empty_because(format!(
            "At least {MIN_TREND_ENTRIES} entries required for trend analysis."
        ));
    }

    let mut ordered: Vec<&Entry> = entries.iter().collect();
    ordered.sort_by_key(|e| e.timestamp);

    let (older, newer) = ordered.split_at(ordered.len() / 2);
    let first = mean_of(older);
    let second = mean_of(newer);
    let delta = second - first;

    let (trend, change_percent) = if delta.abs() < STABLE_THRESHOLD {
        (TrendDirection::Stable, None)
    } else {
        let direction = if delta > 0.0 {
            TrendDirection::Increasing
        } else {
            TrendDirection::Decreasing
        };
        let percent = (first != 0.0).then(|| round_half_up(delta / first * 100.0) as i64);
        (direction, percent)
    };

    let insight = Some(match (trend, change_percent) {
        (TrendDirection::Stable, _) => "Symptom severity has been stable.".to_string(),
        (direction, Some(p)) => format!(
            "Symptom severity {} by {}% in the recent period.",
            verb(direction),
            p.abs()
        ),
        (direction, None) => format!("Symptom severity {} in the recent period.", verb(direction)),
    });

    Section::ready(SeverityTrend {
        first_period_avg: format_tenths(first),
        second_period_avg: format_tenths(second),
        change: format_tenths(delta),
        trend,
        change_percent,
        insight,
    })
}

fn mean_of(entries: &[&Entry]) -> f64 {
    let mut tally = Tally::default();
    for e in entries {
        tally.add(e.intensity);
    }
    tally.mean()
}

fn verb(direction: TrendDirection) -> &'static str {
    match direction {
        TrendDirection::Increasing => "increased",
        TrendDirection::Decreasing => "decreased",
        TrendDirection::Stable => "stayed level",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::test_support::*;

    #[test]
    fn too_few_entries_reports_message() {
        let entries: Vec<_> = (0..6).map(|i| entry(i, 5)).collect();
        let section = severity_trend(&entries);
        assert!(!section.has_data);
        assert!(section.message.as_deref().unwrap().contains("7 entries"));
    }

    #[test]
    fn rising_intensities_are_increasing() {
        let entries: Vec<_> = (1..=7).map(|i| entry(i, i as i32)).collect();
        let section = severity_trend(&entries);
        let data = section.data().unwrap();
        // 3 older entries (1,2,3) vs 4 newer (4,5,6,7).
        assert_eq!(data.first_period_avg, "2.0");
        assert_eq!(data.second_period_avg, "5.5");
        assert_eq!(data.trend, TrendDirection::Increasing);
        assert_eq!(data.change_percent, Some(175));
    }

    #[test]
    fn sorts_by_timestamp_not_input_order() {
        let entries: Vec<_> = (1..=8).rev().map(|i| entry(i, 10 - i as i32)).collect();
        let section = severity_trend(&entries);
        let data = section.data().unwrap();
        assert_eq!(data.trend, TrendDirection::Decreasing);
        assert_eq!(data.first_period_avg, "7.5");
        assert_eq!(data.second_period_avg, "3.5");
        assert_eq!(data.change_percent, Some(-53));
        assert!(data.insight.as_deref().unwrap().contains("decreased by 53%"));
    }

    #[test]
    fn small_changes_are_stable() {
        let intensities = [5, 5, 5, 5, 5, 6, 5];
        let entries: Vec<_> = intensities
            .iter()
            .enumerate()
            .map(|(i, v)| entry(i as i64, *v))
            .collect();
        let section = severity_trend(&entries);
        let data = section.data().unwrap();
        assert_eq!(data.trend, TrendDirection::Stable);
        assert_eq!(data.change_percent, None);
    }

    #[test]
    fn zero_first_period_has_no_percent() {
        let intensities = [0, 0, 0, 3, 4, 5, 6];
        let entries: Vec<_> = intensities
            .iter()
            .enumerate()
            .map(|(i, v)| entry(i as i64, *v))
            .collect();
        let section = severity_trend(&entries);
        let data = section.data().unwrap();
        assert_eq!(data.trend, TrendDirection::Increasing);
        assert_eq!(data.change_percent, None);
        assert_eq!(
            data.insight.as_deref(),
            Some("Symptom severity increased in the recent period.")
        );
    }
}

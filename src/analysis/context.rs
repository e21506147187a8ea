use crate::models::enums::{ContextKey, TriggerCategory};
use crate::models::Entry;

use super::stats::{sort_desc_by, Groups, Tally};
use super::types::*;

/// A context value must occur this often to be reported.
pub const MIN_VALUE_OCCURRENCES: usize = 2;

/// Entries carrying a food/activity tag needed before triggers are considered.
pub const MIN_TRIGGER_ENTRIES: usize = 3;

/// Qualifying values for one key, ranked by mean intensity.
fn ranked_values(entries: &[Entry], key: ContextKey, normalize: bool) -> (usize, Vec<ValueStat>) {
    let mut groups = Groups::new();
    let mut tagged = 0usize;
    for entry in entries {
        if let Some(value) = entry.context_value(key) {
            let value = if normalize {
                value.to_lowercase()
            } else {
                value.to_string()
            };
            groups.add(value, entry.intensity);
            tagged += 1;
        }
    }

    let mut kept: Vec<(String, Tally)> = groups
        .into_vec()
        .into_iter()
        .filter(|(_, t)| t.count >= MIN_VALUE_OCCURRENCES)
        .collect();
    sort_desc_by(&mut kept, |(_, t)| t.rounded_mean());

    let stats = kept
        .into_iter()
        .map(|(value, tally)| ValueStat {
            value,
            count: tally.count,
            avg_intensity: tally.formatted_mean(),
        })
        .collect();
    (tagged, stats)
}

/// Per context type, which values go with the highest intensities.
///
/// The insight reports the top value of the first context type (in
/// `ContextKey::ALL` order) that has any qualifying value.
pub fn context_patterns(entries: &[Entry]) -> Section<ContextPatterns> {
    let correlations: Vec<ContextCorrelation> = ContextKey::ALL
        .into_iter()
        .filter_map(|key| {
            let (_, values) = ranked_values(entries, key, false);
            let top = values.first()?.clone();
            Some(ContextCorrelation {
                context_type: key,
                values,
                top_correlation: top,
            })
        })
        .collect();

    let Some(first) = correlations.first() else {
        return Section::empty();
    };

    let insight = Some(format!(
        "Highest intensity when {} is \"{}\" (average intensity {}).",
        first.context_type, first.top_correlation.value, first.top_correlation.avg_intensity
    ));

    Section::ready(ContextPatterns {
        correlations,
        insight,
    })
}

fn candidate_trigger(
    entries: &[Entry],
    key: ContextKey,
    category: TriggerCategory,
    normalize: bool,
) -> Option<Trigger> {
    let (tagged, values) = ranked_values(entries, key, normalize);
    if tagged < MIN_TRIGGER_ENTRIES {
        return None;
    }
    let top = values.into_iter().next()?;
    Some(Trigger {
        category,
        impact: format!("mean intensity: {}", top.avg_intensity),
        value: top.value,
        count: top.count,
        avg_intensity: top.avg_intensity,
    })
}

/// Candidate triggers: the highest-mean food (case-insensitive) and activity.
pub fn common_triggers(entries: &[Entry]) -> Section<CommonTriggers> {
    let triggers: Vec<Trigger> = [
        candidate_trigger(entries, ContextKey::Food, TriggerCategory::Food, true),
        candidate_trigger(entries, ContextKey::Activity, TriggerCategory::Activity, false),
    ]
    .into_iter()
    .flatten()
    .collect();

    if triggers.is_empty() {
        return Section::empty();
    }

    let insight = triggers.first().map(|t| {
        format!(
            "Possible trigger: {} \"{}\" ({}).",
            t.category, t.value, t.impact
        )
    });

    Section::ready(CommonTriggers { triggers, insight })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::test_support::*;

    #[test]
    fn single_occurrences_do_not_correlate() {
        let entries = vec![
            with_context(entry(1, 5), ContextKey::Mood, "happy"),
            with_context(entry(2, 6), ContextKey::Mood, "sad"),
            with_context(entry(3, 7), ContextKey::Energy, "low"),
        ];
        assert!(!context_patterns(&entries).has_data);
    }

    #[test]
    fn correlations_per_key_in_enumeration_order() {
        let entries = vec![
            with_context(entry(1, 9), ContextKey::Food, "csoki"),
            with_context(entry(2, 9), ContextKey::Food, "csoki"),
            with_context(entry(3, 2), ContextKey::Mood, "tired"),
            with_context(entry(4, 4), ContextKey::Mood, "tired"),
            with_context(entry(5, 8), ContextKey::Mood, "grumpy"),
            with_context(entry(6, 8), ContextKey::Mood, "grumpy"),
        ];
        let section = context_patterns(&entries);
        let data = section.data().unwrap();
        assert_eq!(data.correlations.len(), 2);
        assert_eq!(data.correlations[0].context_type, ContextKey::Mood);
        assert_eq!(data.correlations[0].top_correlation.value, "grumpy");
        assert_eq!(data.correlations[0].values[1].value, "tired");
        assert_eq!(data.correlations[1].context_type, ContextKey::Food);
        // Food has the higher mean, but mood comes first in enumeration order.
        let insight = data.insight.as_deref().unwrap();
        assert!(insight.contains("mood"));
        assert!(insight.contains("grumpy"));
    }

    #[test]
    fn rest_beats_play_as_activity_trigger() {
        let entries = vec![
            with_context(entry(1, 8), ContextKey::Activity, "rest"),
            with_context(entry(2, 2), ContextKey::Activity, "play"),
            with_context(entry(3, 9), ContextKey::Activity, "rest"),
            with_context(entry(4, 3), ContextKey::Activity, "play"),
            with_context(entry(5, 9), ContextKey::Activity, "rest"),
        ];
        let section = common_triggers(&entries);
        let data = section.data().unwrap();
        assert_eq!(data.triggers.len(), 1);
        let trigger = &data.triggers[0];
        assert_eq!(trigger.category, TriggerCategory::Activity);
        assert_eq!(trigger.value, "rest");
        assert_eq!(trigger.avg_intensity, "8.7");
        assert_eq!(trigger.impact, "mean intensity: 8.7");
    }

    #[test]
    fn food_triggers_ignore_case() {
        let entries = vec![
            with_context(entry(1, 6), ContextKey::Food, "Tej"),
            with_context(entry(2, 8), ContextKey::Food, "tej"),
            with_context(entry(3, 1), ContextKey::Food, "alma"),
            with_context(entry(4, 7), ContextKey::Activity, "futás"),
        ];
        let section = common_triggers(&entries);
        let data = section.data().unwrap();
        assert_eq!(data.triggers.len(), 1);
        assert_eq!(data.triggers[0].category, TriggerCategory::Food);
        assert_eq!(data.triggers[0].value, "tej");
        assert_eq!(data.triggers[0].count, 2);
        assert_eq!(data.triggers[0].avg_intensity, "7.0");
    }

    #[test]
    fn triggers_need_three_tagged_entries() {
        let entries = vec![
            with_context(entry(1, 6), ContextKey::Food, "tej"),
            with_context(entry(2, 8), ContextKey::Food, "tej"),
        ];
        assert!(!common_triggers(&entries).has_data);
    }

    #[test]
    fn food_listed_before_activity() {
        let entries = vec![
            with_context(with_context(entry(1, 5), ContextKey::Food, "tej"), ContextKey::Activity, "ovi"),
            with_context(with_context(entry(2, 5), ContextKey::Food, "tej"), ContextKey::Activity, "ovi"),
            with_context(with_context(entry(3, 5), ContextKey::Food, "tej"), ContextKey::Activity, "ovi"),
        ];
        let section = common_triggers(&entries);
        let data = section.data().unwrap();
        let categories: Vec<_> = data.triggers.iter().map(|t| t.category).collect();
        assert_eq!(categories, vec![TriggerCategory::Food, TriggerCategory::Activity]);
    }
}

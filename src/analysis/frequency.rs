use std::collections::HashMap;

use crate::models::{Entry, Symptom};

use super::stats::{percent_of, Groups};
use super::types::*;

pub const UNKNOWN_SYMPTOM_NAME: &str = "Unknown";
pub const UNKNOWN_SYMPTOM_EMOJI: &str = "\u{2753}";

/// How often each symptom was logged, most frequent first.
///
/// Entries pointing at a symptom that no longer exists are kept and labelled
/// as unknown.
pub fn symptom_frequency(entries: &[Entry], symptoms: &[Symptom]) -> Section<SymptomFrequency> {
    if entries.is_empty() {
        return Section::empty();
    }

    let lookup: HashMap<&str, &Symptom> = symptoms.iter().map(|s| (s.id.as_str(), s)).collect();

    let mut groups = Groups::new();
    for entry in entries {
        groups.add(entry.symptom_id.clone(), entry.intensity);
    }

    let total = entries.len();
    let mut stats: Vec<SymptomStat> = groups
        .into_vec()
        .into_iter()
        .map(|(symptom_id, tally)| {
            let (name, emoji) = match lookup.get(symptom_id.as_str()) {
                Some(s) => (s.name.clone(), s.emoji.clone()),
                None => (UNKNOWN_SYMPTOM_NAME.to_string(), UNKNOWN_SYMPTOM_EMOJI.to_string()),
            };
            SymptomStat {
                symptom_id,
                name,
                emoji,
                count: tally.count,
                avg_intensity: tally.formatted_mean(),
                percentage: percent_of(tally.count, total),
            }
        })
        .collect();

    stats.sort_by(|a, b| b.count.cmp(&a.count));

    let most_frequent = stats.first().cloned();
    let insight = most_frequent.as_ref().map(|top| {
        format!(
            "Most frequent symptom: {} {} ({} times, {}% of entries).",
            top.emoji, top.name, top.count, top.percentage
        )
    });

    Section::ready(SymptomFrequency {
        symptoms: stats,
        most_frequent,
        insight,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::test_support::*;

    #[test]
    fn counts_and_percentages() {
        let symptoms = vec![symptom("s-1", "Fejfájás", "🤕"), symptom("s-2", "Hasfájás", "🤢")];
        let entries = vec![
            for_symptom(entry(1, 4), "s-2"),
            for_symptom(entry(2, 6), "s-1"),
            for_symptom(entry(3, 8), "s-1"),
        ];
        let section = symptom_frequency(&entries, &symptoms);
        let data = section.data().unwrap();
        assert_eq!(data.symptoms[0].symptom_id, "s-1");
        assert_eq!(data.symptoms[0].count, 2);
        assert_eq!(data.symptoms[0].avg_intensity, "7.0");
        assert_eq!(data.symptoms[0].percentage, 67);
        assert_eq!(data.symptoms[1].percentage, 33);
        assert_eq!(data.most_frequent.as_ref().unwrap().name, "Fejfájás");
    }

    #[test]
    fn orphaned_symptom_is_unknown() {
        let entries = vec![for_symptom(entry(1, 4), "gone")];
        let section = symptom_frequency(&entries, &[]);
        let data = section.data().unwrap();
        assert_eq!(data.symptoms[0].name, UNKNOWN_SYMPTOM_NAME);
        assert_eq!(data.symptoms[0].emoji, UNKNOWN_SYMPTOM_EMOJI);
        assert_eq!(data.symptoms[0].percentage, 100);
    }

    #[test]
    fn equal_counts_keep_first_seen_order() {
        let entries = vec![
            for_symptom(entry(1, 1), "b"),
            for_symptom(entry(2, 1), "a"),
            for_symptom(entry(3, 1), "a"),
            for_symptom(entry(4, 1), "b"),
        ];
        let section = symptom_frequency(&entries, &[]);
        let ids: Vec<_> = section
            .data()
            .unwrap()
            .symptoms
            .iter()
            .map(|s| s.symptom_id.as_str())
            .collect();
        assert_eq!(ids, vec!["b", "a"]);
    }

    #[test]
    fn percentages_sum_close_to_hundred() {
        let entries: Vec<_> = (0..7)
            .map(|i| for_symptom(entry(i, 3), ["x", "y", "z"][i as usize % 3]))
            .collect();
        let section = symptom_frequency(&entries, &[]);
        let data = section.data().unwrap();
        let sum: i64 = data.symptoms.iter().map(|s| s.percentage).sum();
        let tolerance = (data.symptoms.len() as f64 * 0.5).ceil() as i64;
        assert!((sum - 100).abs() <= tolerance, "sum was {sum}");
    }
}

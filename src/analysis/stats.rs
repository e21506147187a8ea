use std::cmp::Ordering;
use std::collections::HashMap;
use std::hash::Hash;

/// Running sum and count of intensities for one group.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub(crate) struct Tally {
    pub count: usize,
    pub sum: f64,
}

impl Tally {
    pub fn add(&mut self, intensity: i32) {
        self.count += 1;
        self.sum += f64::from(intensity);
    }

    pub fn mean(&self) -> f64 {
        if self.count == 0 {
            0.0
        } else {
            self.sum / self.count as f64
        }
    }

    /// Mean rounded to one decimal place; this is the value reports sort on.
    pub fn rounded_mean(&self) -> f64 {
        round_tenths(self.mean())
    }

    pub fn formatted_mean(&self) -> String {
        format_tenths(self.mean())
    }
}

/// Groups intensities by key, remembering the order keys were first seen.
pub(crate) struct Groups<K> {
    index: HashMap<K, usize>,
    groups: Vec<(K, Tally)>,
}

impl<K: Eq + Hash + Clone> Groups<K> {
    pub fn new() -> Self {
        Self {
            index: HashMap::new(),
            groups: Vec::new(),
        }
    }

    pub fn add(&mut self, key: K, intensity: i32) {
        let slot = match self.index.get(&key) {
            Some(&i) => i,
            None => {
                self.groups.push((key.clone(), Tally::default()));
                self.index.insert(key, self.groups.len() - 1);
                self.groups.len() - 1
            }
        };
        self.groups[slot].1.add(intensity);
    }

    /// Groups in first-seen order.
    pub fn into_vec(self) -> Vec<(K, Tally)> {
        self.groups
    }
}

/// Half-up rounding (`Math.round` semantics, including for negatives).
pub(crate) fn round_half_up(value: f64) -> f64 {
    (value + 0.5).floor()
}

pub(crate) fn round_tenths(value: f64) -> f64 {
    round_half_up(value * 10.0) / 10.0
}

pub(crate) fn format_tenths(value: f64) -> String {
    format!("{:.1}", round_tenths(value))
}

pub(crate) fn percent_of(part: usize, total: usize) -> i64 {
    if total == 0 {
        return 0;
    }
    round_half_up(part as f64 / total as f64 * 100.0) as i64
}

/// Stable descending sort on an f64 key. Equal keys keep input order.
pub(crate) fn sort_desc_by<T>(items: &mut [T], key: impl Fn(&T) -> f64) {
    items.sort_by(|a, b| key(b).partial_cmp(&key(a)).unwrap_or(Ordering::Equal));
}

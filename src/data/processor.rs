//! Data Processor Module
//! Cleaning and aggregation helpers shared by the report pages.

use chrono::{DateTime, Datelike, NaiveDateTime};
use polars::prelude::*;
use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};
use std::hash::Hash;

/// Handles data cleaning and aggregation operations.
pub struct DataProcessor;

impl DataProcessor {
    /// Remove every occurrence of `chars` from `value`.
    pub fn strip_chars(value: &str, chars: &[char]) -> String {
        value.chars().filter(|c| !chars.contains(c)).collect()
    }

    /// Mask keeping the first row of each distinct key. Null keys compare
    /// equal, so only the first null row is kept.
    pub fn first_occurrence_mask<K: AsRef<str>>(keys: &[Option<K>]) -> Vec<bool> {
        let mut seen: HashSet<Option<&str>> = HashSet::new();
        keys.iter()
            .map(|k| seen.insert(k.as_ref().map(|k| k.as_ref())))
            .collect()
    }

    /// Keep only rows where `mask` is true.
    pub fn filter_rows(df: &DataFrame, mask: &[bool]) -> PolarsResult<DataFrame> {
        let mask = BooleanChunked::from_slice("mask".into(), mask);
        df.filter(&mask)
    }

    /// Count occurrences of each key, ordered by key.
    pub fn count_by<K, I>(keys: I) -> BTreeMap<K, usize>
    where
        K: Ord,
        I: IntoIterator<Item = K>,
    {
        let mut counts = BTreeMap::new();
        for k in keys {
            *counts.entry(k).or_insert(0) += 1;
        }
        counts
    }

    /// The `n` largest counts, ties broken by key order.
    pub fn top_counts<K: Ord + Clone>(counts: &BTreeMap<K, usize>, n: usize) -> Vec<(K, usize)> {
        let mut sorted: Vec<(K, usize)> = counts.iter().map(|(k, &c)| (k.clone(), c)).collect();
        // Stable sort keeps key order among equal counts
        sorted.sort_by(|a, b| b.1.cmp(&a.1));
        sorted.truncate(n);
        sorted
    }

    /// Year of an RFC 3339 timestamp or a `YYYY-MM-DD HH:MM:SS` string.
    pub fn year_of(date: &str) -> Option<i32> {
        Self::parse_timestamp(date).map(|dt| dt.year())
    }

    /// Parse a timestamp as UTC.
    pub fn parse_timestamp(date: &str) -> Option<NaiveDateTime> {
        let date = date.trim();
        DateTime::parse_from_rfc3339(date)
            .map(|dt| dt.naive_utc())
            .or_else(|_| NaiveDateTime::parse_from_str(date, "%Y-%m-%d %H:%M:%S"))
            .ok()
    }

    /// Count records per (year, key) and pivot to one series per key.
    ///
    /// Returns the sorted years and, for each key in `keys` order, the
    /// zero-filled count for each year.
    pub fn pivot_counts<K>(records: &[(i32, K)], keys: &[K]) -> (Vec<i32>, Vec<Vec<f64>>)
    where
        K: Eq + Hash,
    {
        let years: Vec<i32> = records
            .iter()
            .map(|(y, _)| *y)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();

        let mut counts: HashMap<(i32, &K), usize> = HashMap::new();
        for (year, key) in records {
            *counts.entry((*year, key)).or_insert(0) += 1;
        }

        let series = keys
            .iter()
            .map(|key| {
                years
                    .iter()
                    .map(|y| counts.get(&(*y, key)).copied().unwrap_or(0) as f64)
                    .collect()
            })
            .collect();

        (years, series)
    }

    /// Collect values per key, keys in order of first appearance.
    pub fn group_values<I>(pairs: I) -> Vec<(String, Vec<f64>)>
    where
        I: IntoIterator<Item = (String, f64)>,
    {
        let mut groups: Vec<(String, Vec<f64>)> = Vec::new();
        let mut index: HashMap<String, usize> = HashMap::new();
        for (key, value) in pairs {
            let idx = *index.entry(key.clone()).or_insert_with(|| {
                groups.push((key, Vec::new()));
                groups.len() - 1
            });
            groups[idx].1.push(value);
        }
        groups
    }

    /// Parse a cleaned numeric string such as `"10000"` or `"4.99"`.
    pub fn parse_number(value: &str) -> Option<f64> {
        value.trim().parse::<f64>().ok().filter(|v| !v.is_nan())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_install_and_price_symbols() {
        let chars = ['+', '$', ','];
        assert_eq!(DataProcessor::strip_chars("10,000+", &chars), "10000");
        assert_eq!(DataProcessor::strip_chars("$4.99", &chars), "4.99");
        assert_eq!(DataProcessor::strip_chars("Everyone 10+", &chars), "Everyone 10");
    }

    #[test]
    fn first_occurrence_keeps_earliest_duplicate_and_one_null() {
        let keys = vec![Some("A"), Some("B"), Some("A"), None, None, Some("B")];
        assert_eq!(
            DataProcessor::first_occurrence_mask(&keys),
            vec![true, true, false, true, false, false]
        );
    }

    #[test]
    fn filter_rows_applies_mask() {
        let df = DataFrame::new(vec![Column::new("App".into(), &["a", "b", "a"])]).unwrap();
        let out = DataProcessor::filter_rows(&df, &[true, true, false]).unwrap();
        assert_eq!(out.height(), 2);
    }

    #[test]
    fn count_and_top() {
        let counts = DataProcessor::count_by(["GAME", "TOOLS", "GAME", "FAMILY", "GAME", "TOOLS"]);
        assert_eq!(counts.get("GAME"), Some(&3));
        assert_eq!(counts.keys().copied().collect::<Vec<_>>(), vec!["FAMILY", "GAME", "TOOLS"]);

        let top = DataProcessor::top_counts(&counts, 2);
        assert_eq!(top, vec![("GAME", 3), ("TOOLS", 2)]);
    }

    #[test]
    fn years_from_both_timestamp_formats() {
        assert_eq!(DataProcessor::year_of("2013-12-31T23:10:55Z"), Some(2013));
        assert_eq!(DataProcessor::year_of("2016-01-02 03:04:05"), Some(2016));
        assert_eq!(DataProcessor::year_of("yesterday"), None);
    }

    #[test]
    fn pivot_fills_missing_years_with_zero() {
        let records = vec![
            (2012, "soc"),
            (2012, "soc"),
            (2013, "xeno-by"),
            (2014, "soc"),
        ];
        let (years, series) = DataProcessor::pivot_counts(&records, &["soc", "xeno-by"]);
        assert_eq!(years, vec![2012, 2013, 2014]);
        assert_eq!(series[0], vec![2.0, 0.0, 1.0]);
        assert_eq!(series[1], vec![0.0, 1.0, 0.0]);
    }

    #[test]
    fn groups_keep_first_appearance_order() {
        let groups = DataProcessor::group_values(vec![
            ("Paid".to_string(), 1.0),
            ("Free".to_string(), 2.0),
            ("Paid".to_string(), 3.0),
        ]);
        assert_eq!(
            groups,
            vec![
                ("Paid".to_string(), vec![1.0, 3.0]),
                ("Free".to_string(), vec![2.0]),
            ]
        );
    }

    #[test]
    fn parses_cleaned_numbers() {
        assert_eq!(DataProcessor::parse_number("4.99"), Some(4.99));
        assert_eq!(DataProcessor::parse_number("Free"), None);
    }
}

//! Pure aggregation arithmetic used when combining reports.

use esg_core::score::RawMetricData;

/// Arithmetic mean; `None` for an empty input.
pub fn mean<I>(values: I) -> Option<f64>
where
    I: IntoIterator<Item = f64>,
{
    let (sum, count) = values
        .into_iter()
        .fold((0.0, 0usize), |(sum, count), v| (sum + v, count + 1));
    (count > 0).then(|| sum / count as f64)
}

/// Joins the non-empty values with `", "`.
pub fn join_non_empty<'a, I>(values: I) -> String
where
    I: IntoIterator<Item = &'a str>,
{
    values
        .into_iter()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Merges dataset maps in order.
///
/// On a key collision the later map wins and the earlier records for that
/// dataset are dropped.
pub fn merge_raw<'a, I>(maps: I) -> RawMetricData
where
    I: IntoIterator<Item = &'a RawMetricData>,
{
    let mut merged = RawMetricData::new();
    for map in maps {
        for (dataset, records) in map {
            merged.insert(dataset.clone(), records.clone());
        }
    }
    merged
}

#[cfg(test)]
mod tests {
    use super::*;
    use esg_core::score::RawMetricRecord;

    fn record(v: f64) -> RawMetricRecord {
        RawMetricRecord {
            standardized_value: Some(v),
            ..Default::default()
        }
    }

    #[test]
    fn test_mean() {
        assert_eq!(mean([0.25, 0.75]), Some(0.5));
        assert!((mean([0.2, 0.4]).unwrap() - 0.3).abs() < 1e-12);
        assert_eq!(mean(std::iter::empty()), None);
    }

    #[test]
    fn test_join_non_empty_skips_blanks() {
        assert_eq!(join_non_empty(["A,B", "", "  ", "C"]), "A,B, C");
        assert_eq!(join_non_empty(Vec::<&str>::new()), "");
    }

    #[test]
    fn test_merge_raw_later_wins_on_collision() {
        let mut first = RawMetricData::new();
        first.insert("SHARED".to_string(), vec![record(1.0)]);
        first.insert("ONLY_FIRST".to_string(), vec![record(2.0)]);
        let mut second = RawMetricData::new();
        second.insert("SHARED".to_string(), vec![record(9.0)]);

        let merged = merge_raw([&first, &second]);

        assert_eq!(merged.len(), 2);
        assert_eq!(merged["SHARED"], vec![record(9.0)]);
        assert_eq!(merged["ONLY_FIRST"], vec![record(2.0)]);
    }
}

use std::collections::HashMap;
use strum::IntoEnumIterator;
use tracing::debug;

use super::{
    circular_mean_clock, columns::MetricKind, parser::RawRow, round_to, ClockTime, Metric,
    MetricBundle,
};

/// Groups rows by pitch type, keeping the order in which labels first appear.
/// Labels are compared exactly; no case folding or trimming beyond parsing.
pub fn group_by_pitch_type(rows: &[RawRow]) -> Vec<(&str, Vec<&RawRow>)> {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut groups: Vec<(&str, Vec<&RawRow>)> = Vec::new();

    for row in rows {
        let pitch_type = row.pitch_type();
        match index.get(pitch_type) {
            Some(&position) => groups[position].1.push(row),
            None => {
                index.insert(pitch_type, groups.len());
                groups.push((pitch_type, vec![row]));
            }
        }
    }

    groups
}

/// Reduces parsed rows to one bundle per pitch type.
pub fn aggregate_rows(rows: &[RawRow], source: &str) -> Vec<MetricBundle> {
    group_by_pitch_type(rows)
        .into_iter()
        .map(|(pitch_type, group)| summarize_group(source, pitch_type, &group))
        .collect()
}

/// Builds the bundle for a single pitch type.
///
/// Every numeric column gets an average (unparseable reads count as zero) and
/// velocity-like columns also get a max. Spin direction is the circular mean
/// of the valid clock readings and is left out entirely when there are none.
pub fn summarize_group(source: &str, pitch_type: &str, rows: &[&RawRow]) -> MetricBundle {
    let mut bundle = MetricBundle::new(source, pitch_type);

    for kind in MetricKind::iter() {
        if kind.is_clock() {
            let samples = clock_samples(rows, kind.column());
            if let Some(mean) = circular_mean_clock(&samples) {
                bundle.push(Metric::clock(kind.column(), mean, kind.unit()));
            }
            continue;
        }

        let average = column_average(rows, kind.column());
        bundle.push(Metric::number(
            kind.column(),
            round_to(average, kind.precision()),
            kind.unit(),
        ));

        if let Some(max_name) = kind.max_metric() {
            let max = column_max(rows, kind.column());
            bundle.push(Metric::number(
                max_name,
                round_to(max, kind.precision()),
                kind.unit(),
            ));
        }
    }

    debug!(
        pitch_type,
        pitches = rows.len(),
        metrics = bundle.metrics.len(),
        "Summarized pitch type"
    );

    bundle
}

/// Mean over all rows. Values are summed in sorted order so the result does
/// not depend on row order.
fn column_average(rows: &[&RawRow], column: &str) -> f64 {
    if rows.is_empty() {
        return 0.0;
    }

    let mut values: Vec<f64> = rows.iter().map(|row| row.number(column)).collect();
    values.sort_by(f64::total_cmp);
    values.iter().sum::<f64>() / values.len() as f64
}

fn column_max(rows: &[&RawRow], column: &str) -> f64 {
    rows.iter()
        .filter_map(|row| row.parsed(column))
        .reduce(f64::max)
        .unwrap_or(0.0)
}

fn clock_samples(rows: &[&RawRow], column: &str) -> Vec<ClockTime> {
    rows.iter()
        .filter_map(|row| row.get(column))
        .filter(|raw| !raw.is_empty())
        .filter_map(|raw| match raw.parse::<ClockTime>() {
            Ok(clock) => Some(clock),
            Err(err) => {
                debug!(%err, "Skipping clock reading");
                None
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metrics::{parse_export, MetricValue, DEFAULT_SOURCE};

    fn rows(text: &str) -> Vec<RawRow> {
        parse_export(text).unwrap().rows
    }

    fn number(bundle: &MetricBundle, name: &str) -> f64 {
        bundle.get(name).unwrap().metric_value.as_number().unwrap()
    }

    #[test]
    fn produces_one_bundle_per_pitch_type_in_first_seen_order() {
        let bundles = aggregate_rows(
            &rows("Pitch Type,Velocity\nSL,82\nFB,91\nSL,84\nfb,90\nFB,93"),
            DEFAULT_SOURCE,
        );

        let labels: Vec<&str> = bundles.iter().map(|b| b.pitch_type.as_str()).collect();
        assert_eq!(labels, vec!["SL", "FB", "fb"]);
        assert_eq!(number(&bundles[0], "Velocity"), 83.0);
        assert_eq!(number(&bundles[1], "Velocity"), 92.0);
        assert_eq!(number(&bundles[1], "Max Velocity"), 93.0);
        assert!(bundles.iter().all(|b| b.source == "rapsodo"));
    }

    #[test]
    fn unparseable_values_pull_the_average_toward_zero() {
        let bundles = aggregate_rows(
            &rows("Pitch Type,Velocity,Total Spin\nFB,90,2400\nFB,--,2200\nFB,90"),
            DEFAULT_SOURCE,
        );
        let fb = &bundles[0];

        assert_eq!(number(fb, "Velocity"), 60.0);
        assert_eq!(number(fb, "Max Velocity"), 90.0);
        assert!((number(fb, "Total Spin") - 1533.3).abs() < 1e-9);
        assert_eq!(number(fb, "Max Total Spin"), 2400.0);
    }

    #[test]
    fn emits_fixed_metric_list_with_units() {
        let bundles = aggregate_rows(
            &rows("Pitch Type,Velocity,Release Height,Spin Direction\nCB,75,5.876,7:00"),
            DEFAULT_SOURCE,
        );
        let cb = &bundles[0];

        let names: Vec<&str> = cb.metrics.iter().map(|m| m.metric_name.as_str()).collect();
        assert_eq!(names, crate::metrics::metric_names());
        assert_eq!(cb.get("Velocity").unwrap().unit, "mph");
        assert_eq!(cb.get("Release Height").unwrap().unit, "ft");
        assert_eq!(number(cb, "Release Height"), 5.88);
        assert_eq!(number(cb, "VB (spin)"), 0.0);
        assert_eq!(
            cb.get("Spin Direction").unwrap().metric_value,
            MetricValue::Clock("7:00".parse().unwrap())
        );
    }

    #[test]
    fn omits_spin_direction_without_valid_samples() {
        let bundles = aggregate_rows(
            &rows("Pitch Type,Velocity,Spin Direction\nCH,84,\nCH,85,bad\nCH,83"),
            DEFAULT_SOURCE,
        );
        assert!(bundles[0].get("Spin Direction").is_none());
        assert_eq!(number(&bundles[0], "Velocity"), 84.0);
    }

    #[test]
    fn invalid_clock_samples_are_excluded_from_the_mean() {
        let bundles = aggregate_rows(
            &rows("Pitch Type,Spin Direction\nFB,1:00\nFB,99:99\nFB,1:30\nFB,"),
            DEFAULT_SOURCE,
        );
        assert_eq!(
            bundles[0].get("Spin Direction").unwrap().metric_value,
            MetricValue::Clock("1:15".parse().unwrap())
        );
    }

    #[test]
    fn results_do_not_depend_on_row_order() {
        let forward = "Pitch Type\tVelocity\tTotal Spin\tRelease Side\n\
                       FB\t90.1\t2250\t-1.91\n\
                       FB\t93.7\t2301\t-2.05\n\
                       FB\t88.4\t2199\t-1.88\n";
        let shuffled = "Pitch Type\tVelocity\tTotal Spin\tRelease Side\n\
                        FB\t88.4\t2199\t-1.88\n\
                        FB\t90.1\t2250\t-1.91\n\
                        FB\t93.7\t2301\t-2.05\n";

        assert_eq!(
            aggregate_rows(&rows(forward), DEFAULT_SOURCE),
            aggregate_rows(&rows(shuffled), DEFAULT_SOURCE)
        );
    }

    #[test]
    fn empty_group_summarizes_to_zeros() {
        let bundle = summarize_group(DEFAULT_SOURCE, "FB", &[]);
        assert_eq!(number(&bundle, "Velocity"), 0.0);
        assert_eq!(number(&bundle, "Max Velocity"), 0.0);
        assert!(bundle.get("Spin Direction").is_none());
    }
}

use crate::domain::model::{
    AggregateStatistics, DepartmentAverage, DepartmentAverages, EmployeeRecord,
};
use crate::utils::error::{ReportError, Result};
use std::collections::HashMap;

/// Rounds to two decimal places, halves away from zero.
pub fn round_to_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Formats a rounded score: whole values keep one decimal (`85.0`), others
/// use the shortest form (`80.33`).
pub fn format_score(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{:.1}", value)
    } else {
        value.to_string()
    }
}

/// Scores are summed as i128 so no i64 input can overflow.
fn rounded_mean(scores: &[i64]) -> f64 {
    let sum: i128 = scores.iter().map(|&s| i128::from(s)).sum();
    round_to_cents(sum as f64 / scores.len() as f64)
}

pub fn compute_aggregate(records: &[EmployeeRecord]) -> Result<AggregateStatistics> {
    if records.is_empty() {
        return Err(ReportError::EmptyDataset);
    }

    let scores: Vec<i64> = records.iter().map(|r| r.score).collect();
    let max = scores.iter().copied().max().ok_or(ReportError::EmptyDataset)?;
    let min = scores.iter().copied().min().ok_or(ReportError::EmptyDataset)?;

    // Float rounding of very large scores can land just outside the range.
    let average = rounded_mean(&scores).clamp(min as f64, max as f64);

    let stats = AggregateStatistics {
        total_count: records.len(),
        average,
        max,
        min,
    };

    tracing::info!("Statistics calculated successfully.");
    tracing::debug!("Aggregate statistics: {:?}", stats);
    Ok(stats)
}

pub fn compute_group_averages(records: &[EmployeeRecord]) -> Result<DepartmentAverages> {
    if records.is_empty() {
        return Err(ReportError::EmptyDataset);
    }

    let mut groups: Vec<(&str, Vec<i64>)> = Vec::new();
    let mut index: HashMap<&str, usize> = HashMap::new();

    for record in records {
        let slot = *index.entry(record.department.as_str()).or_insert_with(|| {
            groups.push((record.department.as_str(), Vec::new()));
            groups.len() - 1
        });
        groups[slot].1.push(record.score);
    }

    let averages = DepartmentAverages::new(
        groups
            .into_iter()
            .map(|(department, scores)| DepartmentAverage {
                department: department.to_string(),
                average: rounded_mean(&scores),
            })
            .collect(),
    );

    tracing::info!(
        "Department-wise averages calculated ({} departments).",
        averages.len()
    );
    Ok(averages)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn records(rows: &[(&str, &str, i64)]) -> Vec<EmployeeRecord> {
        rows.iter()
            .map(|(name, dept, score)| EmployeeRecord::new(*name, *dept, *score))
            .collect()
    }

    #[test]
    fn test_aggregate_over_three_scores() {
        let data = records(&[("A", "X", 80), ("B", "Y", 90), ("C", "X", 70)]);

        let stats = compute_aggregate(&data).unwrap();

        assert_eq!(
            stats,
            AggregateStatistics {
                total_count: 3,
                average: 80.0,
                max: 90,
                min: 70,
            }
        );
    }

    #[test]
    fn test_aggregate_rounds_to_two_decimals() {
        let data = records(&[("A", "X", 80), ("B", "X", 81), ("C", "X", 80)]);

        let stats = compute_aggregate(&data).unwrap();

        assert_eq!(stats.average, 80.33);
    }

    #[test]
    fn test_aggregate_empty_input_fails() {
        assert!(matches!(
            compute_aggregate(&[]),
            Err(ReportError::EmptyDataset)
        ));
    }

    #[test]
    fn test_average_within_min_and_max() {
        let samples: [&[i64]; 5] = [
            &[1],
            &[0, 100],
            &[7, 7, 8],
            &[-5, 3, 99, 42, 17],
            &[33, 34, 34, 33, 33, 34, 35],
        ];

        for scores in samples {
            let data: Vec<EmployeeRecord> = scores
                .iter()
                .map(|s| EmployeeRecord::new("n", "d", *s))
                .collect();
            let stats = compute_aggregate(&data).unwrap();
            assert!(stats.min as f64 <= stats.average, "{:?}", stats);
            assert!(stats.average <= stats.max as f64, "{:?}", stats);
            assert_eq!(stats.total_count, scores.len());
        }
    }

    #[test]
    fn test_extreme_scores_do_not_overflow() {
        let data = records(&[("A", "X", i64::MAX), ("B", "X", i64::MAX)]);

        let stats = compute_aggregate(&data).unwrap();

        assert_eq!(stats.max, i64::MAX);
        assert_eq!(stats.min, i64::MAX);
        assert!(stats.min as f64 <= stats.average);
        assert!(stats.average <= stats.max as f64);

        let averages = compute_group_averages(&data).unwrap();
        assert!(averages.get("X").unwrap() > 0.0);
    }

    #[test]
    fn test_extreme_scores_of_both_signs() {
        let data = records(&[("A", "X", i64::MIN), ("B", "X", i64::MAX), ("C", "X", i64::MIN)]);

        let stats = compute_aggregate(&data).unwrap();

        assert!(stats.min as f64 <= stats.average);
        assert!(stats.average <= stats.max as f64);
        assert!(stats.average < 0.0);
    }

    #[test]
    fn test_group_averages_by_department() {
        let data = records(&[("A", "A", 80), ("B", "A", 90), ("C", "B", 70)]);

        let averages = compute_group_averages(&data).unwrap();

        assert_eq!(averages.len(), 2);
        assert_eq!(averages.get("A"), Some(85.0));
        assert_eq!(averages.get("B"), Some(70.0));
    }

    #[test]
    fn test_group_averages_keep_first_seen_order() {
        let data = records(&[
            ("a", "Sales", 1),
            ("b", "IT", 2),
            ("c", "Sales", 3),
            ("d", "HR", 4),
            ("e", "IT", 5),
        ]);

        let averages = compute_group_averages(&data).unwrap();
        let order: Vec<&str> = averages.iter().map(|e| e.department.as_str()).collect();

        assert_eq!(order, vec!["Sales", "IT", "HR"]);
        assert_eq!(averages.get("Sales"), Some(2.0));
        assert_eq!(averages.get("IT"), Some(3.5));
    }

    #[test]
    fn test_group_averages_empty_input_fails() {
        assert!(matches!(
            compute_group_averages(&[]),
            Err(ReportError::EmptyDataset)
        ));
    }

    #[test]
    fn test_round_half_away_from_zero() {
        assert_eq!(round_to_cents(2.0 / 3.0), 0.67);
        assert_eq!(round_to_cents(12.5), 12.5);
        assert_eq!(round_to_cents(0.125), 0.13);
    }

    #[test]
    fn test_format_score() {
        assert_eq!(format_score(85.0), "85.0");
        assert_eq!(format_score(80.33), "80.33");
        assert_eq!(format_score(72.5), "72.5");
    }
}

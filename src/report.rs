//! Class-wide report
//!
//! Aggregates a read-only view of the roster into counts, an overall
//! average, a letter-grade distribution and a short ranking.

use std::fmt;

use crate::record::{LetterGrade, StudentRecord};
use crate::roster::Roster;

/// Ranking size used by [`generate_report`]
pub const REPORT_TOP_COUNT: usize = 3;

const RULE_WIDTH: usize = 50;

/// Count of records per letter grade, indexed like [`LetterGrade::ALL`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GradeDistribution([usize; 5]);

impl GradeDistribution {
    pub fn count(&self, letter: LetterGrade) -> usize {
        self.0[letter.index()]
    }

    pub fn total(&self) -> usize {
        self.0.iter().sum()
    }

    /// `(letter, count)` pairs, A through F
    pub fn iter(&self) -> impl Iterator<Item = (LetterGrade, usize)> + '_ {
        LetterGrade::ALL.iter().map(|&l| (l, self.count(l)))
    }

    fn record(&mut self, letter: LetterGrade) {
        self.0[letter.index()] += 1;
    }
}

/// Aggregate statistics over a set of records
#[derive(Debug, Clone, PartialEq)]
pub struct ClassReport {
    pub total: usize,
    /// Mean of the averages that are above zero; `None` if no record has grades
    pub overall_average: Option<f64>,
    pub distribution: GradeDistribution,
    /// Requested ranking size
    pub top_count: usize,
    /// Rendered top records, best first
    pub top: Vec<String>,
}

impl ClassReport {
    /// Build a report over `records`, ranking the best `top_count`
    pub fn build<'a>(records: impl IntoIterator<Item = &'a StudentRecord>, top_count: usize) -> Self {
        let records: Vec<&StudentRecord> = records.into_iter().collect();

        let graded: Vec<f64> = records
            .iter()
            .map(|r| r.average())
            .filter(|&avg| avg > 0.0)
            .collect();
        let overall_average = if graded.is_empty() {
            None
        } else {
            Some(graded.iter().sum::<f64>() / graded.len() as f64)
        };

        let mut distribution = GradeDistribution::default();
        for record in &records {
            distribution.record(record.letter_grade());
        }

        let mut ranked = records.clone();
        ranked.sort_by(|a, b| b.average().total_cmp(&a.average()));
        let top = ranked
            .into_iter()
            .take(top_count)
            .map(|r| r.to_string())
            .collect();

        Self {
            total: records.len(),
            overall_average,
            distribution,
            top_count,
            top,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.total == 0
    }
}

/// Report over the whole roster with the top three students
pub fn generate_report(roster: &Roster) -> ClassReport {
    ClassReport::build(roster, REPORT_TOP_COUNT)
}

impl fmt::Display for ClassReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rule = "=".repeat(RULE_WIDTH);
        writeln!(f, "{rule}")?;
        writeln!(f, "STUDENT MANAGEMENT SYSTEM REPORT")?;
        writeln!(f, "{rule}")?;
        writeln!(f, "Total Students: {}", self.total)?;

        if self.is_empty() {
            return writeln!(f, "No students in the system.");
        }

        if let Some(avg) = self.overall_average {
            writeln!(f, "Overall Class Average: {:.2}", avg)?;
        }

        writeln!(f)?;
        writeln!(f, "Grade Distribution:")?;
        for (letter, count) in self.distribution.iter() {
            writeln!(f, "  {}: {} students", letter, count)?;
        }

        writeln!(f)?;
        writeln!(f, "Top {} Students:", self.top_count)?;
        for (i, line) in self.top.iter().enumerate() {
            writeln!(f, "  {}. {}", i + 1, line)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn sample() -> Vec<StudentRecord> {
        let grades = [
            ("S001", "Alice Johnson", [95.0, 88.0, 92.0]),
            ("S002", "Bob Smith", [78.0, 85.0, 80.0]),
            ("S003", "Charlie Brown", [92.0, 96.0, 89.0]),
            ("S004", "Diana Prince", [67.0, 72.0, 75.0]),
            ("S005", "Eve Wilson", [45.0, 50.0, 48.0]),
        ];
        grades
            .into_iter()
            .map(|(id, name, g)| {
                StudentRecord::new(id, name, 20, "x@email.com").with_grades([
                    ("Math", g[0]),
                    ("Science", g[1]),
                    ("English", g[2]),
                ])
            })
            .collect()
    }

    #[test]
    fn test_empty_report() {
        let report = ClassReport::build(std::iter::empty(), REPORT_TOP_COUNT);
        assert!(report.is_empty());
        assert_eq!(report.overall_average, None);
        let text = report.to_string();
        assert!(text.contains("Total Students: 0"));
        assert!(text.ends_with("No students in the system.\n"));
        assert!(!text.contains("Overall Class Average"));
        assert!(!text.contains("Grade Distribution"));
        assert!(!text.contains("Top"));
    }

    #[test]
    fn test_sample_report() {
        let records = sample();
        let report = ClassReport::build(&records, REPORT_TOP_COUNT);
        assert_eq!(report.total, 5);
        assert_eq!(report.distribution.count(LetterGrade::A), 2);
        assert_eq!(report.distribution.count(LetterGrade::B), 1);
        assert_eq!(report.distribution.count(LetterGrade::C), 1);
        assert_eq!(report.distribution.count(LetterGrade::D), 0);
        assert_eq!(report.distribution.count(LetterGrade::F), 1);

        let expected_avg = records.iter().map(|r| r.average()).sum::<f64>() / 5.0;
        assert!((report.overall_average.unwrap() - expected_avg).abs() < 1e-9);

        let text = report.to_string();
        assert!(text.contains("Overall Class Average: 76.80"));
        assert!(text.contains("  D: 0 students"));
        assert!(text.contains("  1. ID: S003, Name: Charlie Brown, Average: 92.33"));
        assert!(text.contains("  2. ID: S001, Name: Alice Johnson, Average: 91.67"));
        assert!(text.contains("  3. ID: S002, Name: Bob Smith, Average: 81.00"));
        assert!(!text.contains("  4."));
    }

    #[test]
    fn test_ungraded_records_excluded_from_average() {
        let records = vec![
            StudentRecord::new("S1", "Graded", 20, "g@email.com").with_grade("Math", 80.0),
            StudentRecord::new("S2", "Ungraded", 20, "u@email.com"),
        ];
        let report = ClassReport::build(&records, REPORT_TOP_COUNT);
        assert_eq!(report.overall_average, Some(80.0));
        assert_eq!(report.distribution.count(LetterGrade::F), 1);
    }

    #[test]
    fn test_average_line_omitted_without_grades() {
        let records = vec![StudentRecord::new("S1", "Ungraded", 20, "u@email.com")];
        let report = ClassReport::build(&records, REPORT_TOP_COUNT);
        assert_eq!(report.overall_average, None);
        let text = report.to_string();
        assert!(!text.contains("Overall Class Average"));
        assert!(text.contains("  F: 1 students"));
    }

    #[test]
    fn test_generate_report_from_roster() {
        let dir = tempfile::tempdir().unwrap();
        let mut roster = Roster::with_path(dir.path().join("students.json"));
        for record in sample() {
            roster.add(record);
        }
        let report = generate_report(&roster);
        assert_eq!(report.total, 5);
        assert_eq!(report.top.len(), 3);
        assert!(report.top[0].starts_with("ID: S003"));
    }

    proptest! {
        #[test]
        fn prop_distribution_sums_to_total(
            grades in proptest::collection::vec(proptest::collection::vec(0.0f64..=100.0, 0..5), 0..20)
        ) {
            let records: Vec<StudentRecord> = grades
                .iter()
                .enumerate()
                .map(|(i, gs)| {
                    StudentRecord::new(format!("S{i}"), "Prop", 20, "p@email.com")
                        .with_grades(gs.iter().enumerate().map(|(j, g)| (format!("Subject{j}"), *g)))
                })
                .collect();
            let report = ClassReport::build(&records, REPORT_TOP_COUNT);
            prop_assert_eq!(report.distribution.total(), report.total);
            prop_assert_eq!(report.total, records.len());
            prop_assert!(report.top.len() <= REPORT_TOP_COUNT);
        }
    }
}

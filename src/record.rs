//! Student record and grade statistics
//!
//! A record owns one student's identity and grade map. Averages and letter
//! grades are derived on demand and never stored.

use std::collections::BTreeMap;
use std::fmt;

use chrono::Local;
use serde::{Deserialize, Serialize};

use crate::store::StoreError;

/// Lowest accepted grade
pub const MIN_GRADE: f64 = 0.0;
/// Highest accepted grade
pub const MAX_GRADE: f64 = 100.0;

/// Date format used for enrollment dates
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Banded classification of an average
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum LetterGrade {
    A,
    B,
    C,
    D,
    F,
}

impl LetterGrade {
    /// All letters, best first
    pub const ALL: [LetterGrade; 5] = [
        LetterGrade::A,
        LetterGrade::B,
        LetterGrade::C,
        LetterGrade::D,
        LetterGrade::F,
    ];

    /// Classify an average. Each band is closed on its lower bound.
    pub fn from_average(average: f64) -> Self {
        if average >= 90.0 {
            LetterGrade::A
        } else if average >= 80.0 {
            LetterGrade::B
        } else if average >= 70.0 {
            LetterGrade::C
        } else if average >= 60.0 {
            LetterGrade::D
        } else {
            LetterGrade::F
        }
    }

    pub fn as_char(&self) -> char {
        match self {
            LetterGrade::A => 'A',
            LetterGrade::B => 'B',
            LetterGrade::C => 'C',
            LetterGrade::D => 'D',
            LetterGrade::F => 'F',
        }
    }

    pub fn from_char(c: char) -> Option<Self> {
        match c.to_ascii_uppercase() {
            'A' => Some(LetterGrade::A),
            'B' => Some(LetterGrade::B),
            'C' => Some(LetterGrade::C),
            'D' => Some(LetterGrade::D),
            'F' => Some(LetterGrade::F),
            _ => None,
        }
    }

    /// Position in [`LetterGrade::ALL`]
    pub fn index(&self) -> usize {
        *self as usize
    }
}

impl fmt::Display for LetterGrade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

/// Whether a score may be stored in a record
#[inline]
pub fn grade_in_range(grade: f64) -> bool {
    (MIN_GRADE..=MAX_GRADE).contains(&grade)
}

/// One student and their grades
#[derive(Debug, Clone, PartialEq)]
pub struct StudentRecord {
    id: String,
    name: String,
    age: u32,
    email: String,
    grades: BTreeMap<String, f64>,
    enrollment_date: String,
}

impl StudentRecord {
    /// Create a fresh record enrolled today
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        age: u32,
        email: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            age,
            email: email.into(),
            grades: BTreeMap::new(),
            enrollment_date: Local::now().format(DATE_FORMAT).to_string(),
        }
    }

    /// Rebuild a record from stored fields, keeping the stored enrollment date.
    ///
    /// Fails if any grade is outside `[0, 100]`.
    pub fn restore(
        id: impl Into<String>,
        name: impl Into<String>,
        age: u32,
        email: impl Into<String>,
        grades: BTreeMap<String, f64>,
        enrollment_date: impl Into<String>,
    ) -> Result<Self, StoreError> {
        let id = id.into();
        if let Some((subject, &grade)) = grades.iter().find(|(_, g)| !grade_in_range(**g)) {
            return Err(StoreError::Grade {
                id,
                subject: subject.clone(),
                grade,
            });
        }
        Ok(Self {
            id,
            name: name.into(),
            age,
            email: email.into(),
            grades,
            enrollment_date: enrollment_date.into(),
        })
    }

    /// Builder form of [`StudentRecord::add_grade`]; rejected grades are dropped
    pub fn with_grade(mut self, subject: impl Into<String>, grade: f64) -> Self {
        self.add_grade(subject, grade);
        self
    }

    pub fn with_grades<S, I>(mut self, grades: I) -> Self
    where
        S: Into<String>,
        I: IntoIterator<Item = (S, f64)>,
    {
        for (subject, grade) in grades {
            self.add_grade(subject, grade);
        }
        self
    }

    /// Store or overwrite a subject's grade.
    /// Returns false and leaves the record untouched if the grade is out of range.
    pub fn add_grade(&mut self, subject: impl Into<String>, grade: f64) -> bool {
        if !grade_in_range(grade) {
            log::warn!(
                "Rejected grade {} for student {}: outside [{}, {}]",
                grade,
                self.id,
                MIN_GRADE,
                MAX_GRADE
            );
            return false;
        }
        self.grades.insert(subject.into(), grade);
        true
    }

    /// Mean of all grades, 0 when none are recorded
    pub fn average(&self) -> f64 {
        if self.grades.is_empty() {
            return 0.0;
        }
        self.grades.values().sum::<f64>() / self.grades.len() as f64
    }

    pub fn letter_grade(&self) -> LetterGrade {
        LetterGrade::from_average(self.average())
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn age(&self) -> u32 {
        self.age
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn grades(&self) -> &BTreeMap<String, f64> {
        &self.grades
    }

    pub fn grade(&self, subject: &str) -> Option<f64> {
        self.grades.get(subject).copied()
    }

    pub fn enrollment_date(&self) -> &str {
        &self.enrollment_date
    }
}

impl fmt::Display for StudentRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "ID: {}, Name: {}, Average: {:.2}",
            self.id,
            self.name,
            self.average()
        )
    }
}

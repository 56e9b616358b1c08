use serde::{Deserialize, Serialize};

use crate::error::{EngineError, Result};

/// Letter grade derived from a score via fixed thresholds.
///
/// Thresholds are inclusive lower bounds evaluated highest-first:
/// 90 A+, 85 A, 80 A-, 75 B+, 70 B, 65 B-, 60 C+, 55 C, 50 C-, 45 D, else F.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Grade {
    APlus,
    A,
    AMinus,
    BPlus,
    B,
    BMinus,
    CPlus,
    C,
    CMinus,
    D,
    F,
}

impl Grade {
    pub fn from_score(score: f64) -> Grade {
        if score >= 90.0 {
            Grade::APlus
        } else if score >= 85.0 {
            Grade::A
        } else if score >= 80.0 {
            Grade::AMinus
        } else if score >= 75.0 {
            Grade::BPlus
        } else if score >= 70.0 {
            Grade::B
        } else if score >= 65.0 {
            Grade::BMinus
        } else if score >= 60.0 {
            Grade::CPlus
        } else if score >= 55.0 {
            Grade::C
        } else if score >= 50.0 {
            Grade::CMinus
        } else if score >= 45.0 {
            Grade::D
        } else {
            Grade::F
        }
    }

    pub fn letter(&self) -> &'static str {
        match self {
            Grade::APlus => "A+",
            Grade::A => "A",
            Grade::AMinus => "A-",
            Grade::BPlus => "B+",
            Grade::B => "B",
            Grade::BMinus => "B-",
            Grade::CPlus => "C+",
            Grade::C => "C",
            Grade::CMinus => "C-",
            Grade::D => "D",
            Grade::F => "F",
        }
    }

    pub fn points(&self) -> f64 {
        match self {
            Grade::APlus | Grade::A => 4.0,
            Grade::AMinus => 3.7,
            Grade::BPlus => 3.3,
            Grade::B => 3.0,
            Grade::BMinus => 2.7,
            Grade::CPlus => 2.3,
            Grade::C => 2.0,
            Grade::CMinus => 1.7,
            Grade::D => 1.0,
            Grade::F => 0.0,
        }
    }
}

/// One graded course outcome, immutable once constructed.
///
/// Carries the course code and the credit weight that applied when the result
/// was recorded, so a student's GPA stays computable even if the course is
/// later removed from the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CourseResult {
    pub course_code: String,
    pub credits: u32,
    pub score: f64,
    pub grade: Grade,
}

impl CourseResult {
    pub fn new(course: &CourseRecord, score: f64) -> Result<CourseResult> {
        if !(0.0..=100.0).contains(&score) {
            return Err(EngineError::InvalidScore { score });
        }
        Ok(CourseResult {
            course_code: course.course_code.clone(),
            credits: course.credits,
            score,
            grade: Grade::from_score(score),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StudentRecord {
    pub student_id: String,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub department: String,
    pub semester: u32,
    pub results: Vec<CourseResult>,
}

impl StudentRecord {
    pub fn new(
        student_id: impl Into<String>,
        name: impl Into<String>,
        email: impl Into<String>,
        phone: impl Into<String>,
        department: impl Into<String>,
        semester: u32,
    ) -> Result<StudentRecord> {
        if semester == 0 {
            return Err(EngineError::InvalidSemester { semester: 0 });
        }
        Ok(StudentRecord {
            student_id: student_id.into(),
            name: name.into(),
            email: email.into(),
            phone: phone.into(),
            department: department.into(),
            semester,
            results: Vec::new(),
        })
    }

    pub fn add_result(&mut self, result: CourseResult) {
        self.results.push(result);
    }

    /// Credit-weighted grade point average, recomputed on every call so it
    /// always reflects the current result list. 0.0 with no results.
    pub fn gpa(&self) -> f64 {
        let total_credits: u32 = self.results.iter().map(|r| r.credits).sum();
        if total_credits == 0 {
            return 0.0;
        }
        let total_points: f64 = self
            .results
            .iter()
            .map(|r| r.grade.points() * r.credits as f64)
            .sum();
        total_points / total_credits as f64
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CourseRecord {
    pub course_code: String,
    pub course_name: String,
    pub credits: u32,
    pub department: String,
    pub prerequisites: Vec<String>,
}

impl CourseRecord {
    pub fn new(
        course_code: impl Into<String>,
        course_name: impl Into<String>,
        credits: u32,
        department: impl Into<String>,
    ) -> Result<CourseRecord> {
        if credits == 0 {
            return Err(EngineError::InvalidCredits { credits: 0 });
        }
        Ok(CourseRecord {
            course_code: course_code.into(),
            course_name: course_name.into(),
            credits,
            department: department.into(),
            prerequisites: Vec::new(),
        })
    }

    /// Prerequisites are stored as plain codes, never as links to other
    /// course records; a code with no matching course is tolerated and
    /// treated as a leaf by the graph algorithms.
    pub fn add_prerequisite(&mut self, course_code: impl Into<String>) {
        self.prerequisites.push(course_code.into());
    }
}

use thiserror::Error;

/// Result alias for engine operations.
pub type Result<T> = std::result::Result<T, EngineError>;

/// Recoverable failures reported by the record engine.
///
/// Nothing here is fatal: callers retry, skip, or surface the message to the
/// end user. `IndexDivergence` is the one variant that signals a bug rather
/// than bad input, and it must never be swallowed.
#[derive(Debug, Error, PartialEq)]
pub enum EngineError {
    #[error("student {student_id} already exists")]
    DuplicateStudent { student_id: String },

    #[error("student {student_id} not found")]
    StudentNotFound { student_id: String },

    #[error("course {course_code} already exists")]
    DuplicateCourse { course_code: String },

    #[error("course {course_code} not found")]
    CourseNotFound { course_code: String },

    #[error("student indexes disagree on {student_id}: {detail}")]
    IndexDivergence { student_id: String, detail: String },

    #[error("score {score} is outside 0-100")]
    InvalidScore { score: f64 },

    #[error("credits must be positive, got {credits}")]
    InvalidCredits { credits: i64 },

    #[error("semester must be positive, got {semester}")]
    InvalidSemester { semester: i64 },
}

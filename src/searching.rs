use std::cmp::Ordering;

use crate::models::StudentRecord;

/// Binary search over a slice sorted ascending by student id.
///
/// Precondition: the input really is sorted that way (see
/// [`sort_by_student_id`](crate::sorting::sort_by_student_id)); the result is
/// undefined otherwise. This is a documented precondition, not a runtime
/// check.
pub fn binary_search_by_id<'a>(
    sorted: &'a [StudentRecord],
    student_id: &str,
) -> Option<&'a StudentRecord> {
    let mut left = 0usize;
    let mut right = sorted.len();
    while left < right {
        let mid = left + (right - left) / 2;
        match student_id.cmp(sorted[mid].student_id.as_str()) {
            Ordering::Equal => return Some(&sorted[mid]),
            Ordering::Less => right = mid,
            Ordering::Greater => left = mid + 1,
        }
    }
    None
}

/// Case-insensitive substring match on name, all matches in input order.
pub fn search_by_name<'a>(records: &'a [StudentRecord], term: &str) -> Vec<&'a StudentRecord> {
    let needle = term.to_lowercase();
    records
        .iter()
        .filter(|record| record.name.to_lowercase().contains(&needle))
        .collect()
}

/// Exact case-insensitive department match, input order preserved.
pub fn search_by_department<'a>(
    records: &'a [StudentRecord],
    department: &str,
) -> Vec<&'a StudentRecord> {
    let wanted = department.to_lowercase();
    records
        .iter()
        .filter(|record| record.department.to_lowercase() == wanted)
        .collect()
}

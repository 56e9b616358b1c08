//! Sorting over snapshots taken from the store. Every function works on a
//! copy; the caller's slice is never mutated.

use std::cmp::Ordering;

use crate::models::StudentRecord;

/// Top-down merge sort by GPA, O(n log n) regardless of input order and
/// stable: records with equal GPA keep their relative input order.
pub fn merge_sort_by_gpa(records: &[StudentRecord], ascending: bool) -> Vec<StudentRecord> {
    let mut sorted = records.to_vec();
    merge_sort(&mut sorted, ascending);
    sorted
}

fn merge_sort(list: &mut [StudentRecord], ascending: bool) {
    if list.len() <= 1 {
        return;
    }
    let mid = list.len() / 2;
    merge_sort(&mut list[..mid], ascending);
    merge_sort(&mut list[mid..], ascending);
    merge(list, mid, ascending);
}

fn merge(list: &mut [StudentRecord], mid: usize, ascending: bool) {
    let left: Vec<StudentRecord> = list[..mid].to_vec();
    let right: Vec<StudentRecord> = list[mid..].to_vec();

    let (mut i, mut j, mut k) = (0, 0, 0);
    while i < left.len() && j < right.len() {
        let left_gpa = left[i].gpa();
        let right_gpa = right[j].gpa();
        // <= / >= keeps the left half first on ties, which is what makes
        // the sort stable
        let take_left = if ascending {
            left_gpa <= right_gpa
        } else {
            left_gpa >= right_gpa
        };
        if take_left {
            list[k] = left[i].clone();
            i += 1;
        } else {
            list[k] = right[j].clone();
            j += 1;
        }
        k += 1;
    }
    while i < left.len() {
        list[k] = left[i].clone();
        i += 1;
        k += 1;
    }
    while j < right.len() {
        list[k] = right[j].clone();
        j += 1;
        k += 1;
    }
}

/// Lomuto-partition quicksort on case-insensitive name, last element as
/// pivot. Average O(n log n); already-sorted input hits the O(n²) time
/// worst case, an accepted trade-off for this catalog-sized data. Recursion
/// always descends into the smaller partition and loops on the larger, so
/// call depth stays O(log n) even then.
pub fn quick_sort_by_name(records: &[StudentRecord]) -> Vec<StudentRecord> {
    let mut sorted = records.to_vec();
    if sorted.len() > 1 {
        let high = sorted.len() - 1;
        quick_sort(&mut sorted, 0, high);
    }
    sorted
}

fn quick_sort(list: &mut [StudentRecord], mut low: usize, mut high: usize) {
    while low < high {
        let pivot_index = partition(list, low, high);
        if pivot_index - low < high - pivot_index {
            if pivot_index > low {
                quick_sort(list, low, pivot_index - 1);
            }
            low = pivot_index + 1;
        } else {
            quick_sort(list, pivot_index + 1, high);
            if pivot_index == 0 {
                break;
            }
            high = pivot_index - 1;
        }
    }
}

fn partition(list: &mut [StudentRecord], low: usize, high: usize) -> usize {
    let pivot = list[high].name.to_lowercase();
    let mut i = low;
    for j in low..high {
        if list[j].name.to_lowercase().cmp(&pivot) == Ordering::Less {
            list.swap(i, j);
            i += 1;
        }
    }
    list.swap(i, high);
    i
}

/// Ascending sort by student id, producing the precondition input for
/// [`binary_search_by_id`](crate::searching::binary_search_by_id).
pub fn sort_by_student_id(records: &[StudentRecord]) -> Vec<StudentRecord> {
    let mut sorted = records.to_vec();
    sorted.sort_by(|a, b| a.student_id.cmp(&b.student_id));
    sorted
}

use crate::bst::OrderedIndex;
use crate::error::{EngineError, Result};
use crate::hash_table::HashIndex;
use crate::models::{CourseResult, StudentRecord};

/// Aggregates computed by a single pass over the store.
#[derive(Debug, Clone, PartialEq)]
pub struct StoreStatistics {
    pub count: usize,
    pub mean_gpa: f64,
    pub min_gpa: f64,
    pub max_gpa: f64,
    pub top_student: TopStudent,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TopStudent {
    pub student_id: String,
    pub name: String,
    pub gpa: f64,
}

/// Dual-index student store: an ordered BST for sorted traversal plus a hash
/// table for O(1) point lookup, kept in sync by routing every mutation
/// through this API.
///
/// Each index holds its own copy of a record; since nothing outside this
/// store writes to either index, the copies cannot diverge. A divergence
/// detected during removal is reported as [`EngineError::IndexDivergence`],
/// never ignored.
pub struct StudentStore {
    tree: OrderedIndex,
    hash: HashIndex,
}

impl StudentStore {
    pub fn new() -> StudentStore {
        StudentStore {
            tree: OrderedIndex::new(),
            hash: HashIndex::new(),
        }
    }

    /// Inserts a new record into both indexes. Rejected without mutation if
    /// either index already knows the id.
    ///
    /// The double write is atomic from the caller's point of view: the
    /// duplicate check runs first and both inserts are infallible in-memory
    /// operations, so no partially-applied state is observable. Should the
    /// tree still refuse the insert, the hash write is rolled back before
    /// the error returns.
    pub fn add(&mut self, record: StudentRecord) -> Result<()> {
        let student_id = record.student_id.clone();
        if self.hash.contains(&student_id) || self.tree.contains(&student_id) {
            return Err(EngineError::DuplicateStudent { student_id });
        }
        self.hash.put(&student_id, record.clone());
        if !self.tree.insert(record) {
            self.hash.remove(&student_id);
            return Err(EngineError::IndexDivergence {
                student_id,
                detail: "tree rejected an insert the hash index accepted".to_string(),
            });
        }
        Ok(())
    }

    /// Point lookup via the hash index.
    pub fn find_by_id(&self, student_id: &str) -> Option<&StudentRecord> {
        self.hash.get(student_id)
    }

    /// Same lookup through the BST, O(height). Useful for parity checks.
    pub fn find_by_id_tree(&self, student_id: &str) -> Option<&StudentRecord> {
        self.tree.get(student_id)
    }

    /// Replaces the record stored under its id: hash overwrite plus BST
    /// delete-then-reinsert. The id itself never changes.
    pub fn update(&mut self, record: StudentRecord) -> Result<()> {
        let student_id = record.student_id.clone();
        if !self.hash.contains(&student_id) {
            return Err(EngineError::StudentNotFound { student_id });
        }
        self.hash.put(&student_id, record.clone());
        self.tree.remove(&student_id);
        self.tree.insert(record);
        Ok(())
    }

    /// Removes from both indexes. Present in only one of them means the
    /// store's core invariant was already broken, which is surfaced as
    /// [`EngineError::IndexDivergence`] (the lone entry is still removed, so
    /// membership agrees again afterwards).
    pub fn remove(&mut self, student_id: &str) -> Result<StudentRecord> {
        let from_tree = self.tree.remove(student_id);
        let from_hash = self.hash.remove(student_id);
        match (from_tree, from_hash) {
            (Some(_), Some(record)) => Ok(record),
            (None, None) => Err(EngineError::StudentNotFound {
                student_id: student_id.to_string(),
            }),
            (Some(_), None) => Err(EngineError::IndexDivergence {
                student_id: student_id.to_string(),
                detail: "present in tree only".to_string(),
            }),
            (None, Some(_)) => Err(EngineError::IndexDivergence {
                student_id: student_id.to_string(),
                detail: "present in hash index only".to_string(),
            }),
        }
    }

    /// Appends a graded result to a student and writes the change through
    /// the normal update path.
    pub fn add_result(&mut self, student_id: &str, result: CourseResult) -> Result<()> {
        let mut record = self
            .hash
            .get(student_id)
            .cloned()
            .ok_or_else(|| EngineError::StudentNotFound {
                student_id: student_id.to_string(),
            })?;
        record.add_result(result);
        self.update(record)
    }

    /// Point-in-time snapshot in ascending id order.
    pub fn all_students(&self) -> Vec<StudentRecord> {
        self.tree.in_order()
    }

    /// Count, mean/min/max GPA, and the top student in one linear pass over
    /// the ordered snapshot. Ties for the top resolve to the first student
    /// encountered in id order. None for an empty store.
    pub fn statistics(&self) -> Option<StoreStatistics> {
        let students = self.all_students();
        if students.is_empty() {
            return None;
        }
        let mut total = 0.0;
        let mut min_gpa = f64::INFINITY;
        let mut max_gpa = f64::NEG_INFINITY;
        let mut top: Option<TopStudent> = None;
        for student in &students {
            let gpa = student.gpa();
            total += gpa;
            min_gpa = min_gpa.min(gpa);
            if top.is_none() || gpa > max_gpa {
                top = Some(TopStudent {
                    student_id: student.student_id.clone(),
                    name: student.name.clone(),
                    gpa,
                });
            }
            max_gpa = max_gpa.max(gpa);
        }
        top.map(|top_student| StoreStatistics {
            count: students.len(),
            mean_gpa: total / students.len() as f64,
            min_gpa,
            max_gpa,
            top_student,
        })
    }

    /// Full snapshot for the persistence collaborator. The engine has no
    /// opinion on how it is written, only that [`import_records`] on what it
    /// returned rebuilds identical state.
    ///
    /// [`import_records`]: StudentStore::import_records
    pub fn export_records(&self) -> Vec<StudentRecord> {
        self.all_students()
    }

    /// Re-inserts every record through the normal `add` path, failing on the
    /// first duplicate id.
    pub fn import_records(&mut self, records: Vec<StudentRecord>) -> Result<usize> {
        let mut added = 0;
        for record in records {
            self.add(record)?;
            added += 1;
        }
        Ok(added)
    }

    pub fn len(&self) -> usize {
        debug_assert_eq!(self.tree.len(), self.hash.len());
        self.hash.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for StudentStore {
    fn default() -> Self {
        StudentStore::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CourseRecord, CourseResult};

    fn student(id: &str, name: &str) -> StudentRecord {
        StudentRecord::new(id, name, format!("{id}@campus.edu"), "555-0000", "CS", 2).unwrap()
    }

    fn graded(code: &str, credits: u32, score: f64) -> CourseResult {
        let course = CourseRecord::new(code, format!("{code} name"), credits, "CS").unwrap();
        CourseResult::new(&course, score).unwrap()
    }

    #[test]
    fn find_by_id_reflects_the_last_successful_write() {
        let mut store = StudentStore::new();
        store.add(student("S1", "Avery Lee")).unwrap();
        store.add(student("S2", "Jules Moreno")).unwrap();

        let mut updated = student("S1", "Avery Lee-Chen");
        updated.semester = 4;
        store.update(updated.clone()).unwrap();

        assert_eq!(store.find_by_id("S1"), Some(&updated));
        assert_eq!(store.find_by_id_tree("S1"), Some(&updated));

        store.remove("S2").unwrap();
        assert!(store.find_by_id("S2").is_none());
        assert!(store.find_by_id_tree("S2").is_none());
    }

    #[test]
    fn both_indexes_report_the_same_membership() {
        let mut store = StudentStore::new();
        for id in ["S3", "S1", "S2", "S5", "S4"] {
            store.add(student(id, "Someone")).unwrap();
        }
        store.remove("S3").unwrap();
        store.remove("S5").unwrap();

        assert_eq!(store.len(), 3);
        for id in ["S1", "S2", "S4"] {
            assert!(store.find_by_id(id).is_some());
            assert!(store.find_by_id_tree(id).is_some());
        }
        for id in ["S3", "S5"] {
            assert!(store.find_by_id(id).is_none());
            assert!(store.find_by_id_tree(id).is_none());
        }
    }

    #[test]
    fn duplicate_add_is_rejected_without_mutation() {
        let mut store = StudentStore::new();
        store.add(student("S1", "Avery Lee")).unwrap();
        let err = store.add(student("S1", "Impostor")).unwrap_err();
        assert_eq!(
            err,
            EngineError::DuplicateStudent {
                student_id: "S1".to_string()
            }
        );
        assert_eq!(store.len(), 1);
        assert_eq!(store.find_by_id("S1").map(|r| r.name.as_str()), Some("Avery Lee"));
    }

    #[test]
    fn removing_an_absent_key_leaves_both_indexes_unchanged() {
        let mut store = StudentStore::new();
        store.add(student("S1", "Avery Lee")).unwrap();
        let err = store.remove("S9").unwrap_err();
        assert_eq!(
            err,
            EngineError::StudentNotFound {
                student_id: "S9".to_string()
            }
        );
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn update_of_an_absent_student_is_not_found() {
        let mut store = StudentStore::new();
        let err = store.update(student("S1", "Avery Lee")).unwrap_err();
        assert_eq!(
            err,
            EngineError::StudentNotFound {
                student_id: "S1".to_string()
            }
        );
        assert!(store.is_empty());
    }

    #[test]
    fn add_result_changes_the_gpa_seen_by_lookups() {
        let mut store = StudentStore::new();
        store.add(student("S1", "Avery Lee")).unwrap();
        store.add_result("S1", graded("CS201", 3, 92.0)).unwrap();
        store.add_result("S1", graded("CS202", 2, 71.0)).unwrap();

        let record = store.find_by_id("S1").unwrap();
        assert_eq!(record.results.len(), 2);
        assert!((record.gpa() - 3.6).abs() < 1e-9);
    }

    #[test]
    fn export_then_import_rebuilds_an_equal_store() {
        let mut store = StudentStore::new();
        store.add(student("S2", "Jules Moreno")).unwrap();
        store.add(student("S1", "Avery Lee")).unwrap();
        store.add_result("S1", graded("CS201", 3, 88.0)).unwrap();

        let exported = store.export_records();
        let mut rebuilt = StudentStore::new();
        assert_eq!(rebuilt.import_records(exported).unwrap(), 2);

        assert_eq!(rebuilt.all_students(), store.all_students());
        assert_eq!(rebuilt.find_by_id("S1"), store.find_by_id("S1"));
    }

    #[test]
    fn statistics_single_pass_with_first_encountered_tie_break() {
        let mut store = StudentStore::new();
        // S1 and S2 tie at 4.0, S3 trails; iteration order is ascending id.
        store.add(student("S1", "Avery Lee")).unwrap();
        store.add(student("S2", "Jules Moreno")).unwrap();
        store.add(student("S3", "Kiara Patel")).unwrap();
        store.add_result("S1", graded("CS201", 3, 95.0)).unwrap();
        store.add_result("S2", graded("CS201", 3, 91.0)).unwrap();
        store.add_result("S3", graded("CS201", 3, 72.0)).unwrap();

        let stats = store.statistics().unwrap();
        assert_eq!(stats.count, 3);
        assert!((stats.max_gpa - 4.0).abs() < 1e-9);
        assert!((stats.min_gpa - 3.0).abs() < 1e-9);
        assert!((stats.mean_gpa - (4.0 + 4.0 + 3.0) / 3.0).abs() < 1e-9);
        assert_eq!(stats.top_student.student_id, "S1");
    }

    #[test]
    fn statistics_of_an_empty_store_is_none() {
        assert!(StudentStore::new().statistics().is_none());
    }
}

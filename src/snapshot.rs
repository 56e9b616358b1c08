use std::path::Path;

use anyhow::Context;
use serde::{Deserialize, Serialize};

use crate::error::EngineError;
use crate::graph::CourseGraph;
use crate::models::{CourseRecord, StudentRecord};
use crate::store::StudentStore;

/// Full export of the in-memory state, written as one JSON document.
///
/// The engine has no opinion on this format beyond round-trip fidelity:
/// loading a snapshot re-inserts every record through the normal add paths
/// and must rebuild identical state.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct Snapshot {
    pub students: Vec<StudentRecord>,
    pub courses: Vec<CourseRecord>,
}

pub fn capture(store: &StudentStore, graph: &CourseGraph) -> Snapshot {
    Snapshot {
        students: store.export_records(),
        courses: graph.export_records(),
    }
}

pub fn restore(snapshot: Snapshot) -> anyhow::Result<(StudentStore, CourseGraph)> {
    let mut store = StudentStore::new();
    let mut graph = CourseGraph::new();
    store
        .import_records(snapshot.students)
        .context("snapshot contains conflicting student records")?;
    graph
        .import_records(snapshot.courses)
        .context("snapshot contains conflicting course records")?;
    Ok((store, graph))
}

pub fn save(path: &Path, store: &StudentStore, graph: &CourseGraph) -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(&capture(store, graph))?;
    std::fs::write(path, json)
        .with_context(|| format!("failed to write snapshot to {}", path.display()))?;
    Ok(())
}

/// Loads a snapshot file; a missing file is treated as empty state, matching
/// a first run.
pub fn load(path: &Path) -> anyhow::Result<(StudentStore, CourseGraph)> {
    if !path.exists() {
        return restore(Snapshot::default());
    }
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read snapshot from {}", path.display()))?;
    let snapshot: Snapshot = serde_json::from_str(&json)
        .with_context(|| format!("{} is not a valid snapshot file", path.display()))?;
    restore(snapshot)
}

/// Imports students from a CSV file with columns
/// `student_id,name,email,phone,department,semester`. Rows whose id is
/// already present are skipped; the count of inserted records is returned.
pub fn import_students_csv(path: &Path, store: &mut StudentStore) -> anyhow::Result<usize> {
    #[derive(Deserialize)]
    struct CsvRow {
        student_id: String,
        name: String,
        email: String,
        phone: String,
        department: String,
        semester: u32,
    }

    let mut reader = csv::Reader::from_path(path)
        .with_context(|| format!("failed to open {}", path.display()))?;
    let mut inserted = 0usize;

    for result in reader.deserialize::<CsvRow>() {
        let row = result?;
        let record = StudentRecord::new(
            row.student_id,
            row.name,
            row.email,
            row.phone,
            row.department,
            row.semester,
        )?;
        match store.add(record) {
            Ok(()) => inserted += 1,
            Err(EngineError::DuplicateStudent { .. }) => {}
            Err(err) => return Err(err.into()),
        }
    }

    Ok(inserted)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CourseRecord, CourseResult};
    use std::path::PathBuf;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("campus-records-{}-{}.tmp", name, std::process::id()))
    }

    fn sample_state() -> (StudentStore, CourseGraph) {
        let mut store = StudentStore::new();
        let mut graph = CourseGraph::new();

        let mut algo = CourseRecord::new("CS201", "Data Structures", 3, "CS").unwrap();
        algo.add_prerequisite("CS101");
        graph
            .add(CourseRecord::new("CS101", "Programming", 3, "CS").unwrap())
            .unwrap();
        graph.add(algo).unwrap();

        let mut student =
            StudentRecord::new("S1", "Avery Lee", "avery@campus.edu", "555-0100", "CS", 3)
                .unwrap();
        let course = graph.get("CS101").unwrap().clone();
        student.add_result(CourseResult::new(&course, 88.0).unwrap());
        store.add(student).unwrap();
        store
            .add(
                StudentRecord::new("S2", "Jules Moreno", "jules@campus.edu", "555-0101", "EE", 1)
                    .unwrap(),
            )
            .unwrap();

        (store, graph)
    }

    #[test]
    fn save_then_load_rebuilds_identical_state() {
        let (store, graph) = sample_state();
        let path = temp_path("roundtrip");

        save(&path, &store, &graph).unwrap();
        let (loaded_store, loaded_graph) = load(&path).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(loaded_store.all_students(), store.all_students());
        assert_eq!(loaded_graph.courses(), graph.courses());
        assert_eq!(loaded_store.find_by_id("S1"), store.find_by_id("S1"));
    }

    #[test]
    fn loading_a_missing_file_yields_empty_state() {
        let path = temp_path("missing-file-nonexistent");
        std::fs::remove_file(&path).ok();
        let (store, graph) = load(&path).unwrap();
        assert!(store.is_empty());
        assert!(graph.is_empty());
    }

    #[test]
    fn csv_import_skips_duplicate_ids() {
        let path = temp_path("csv-import");
        std::fs::write(
            &path,
            "student_id,name,email,phone,department,semester\n\
             S1,Avery Lee,avery@campus.edu,555-0100,CS,3\n\
             S2,Jules Moreno,jules@campus.edu,555-0101,EE,1\n\
             S1,Avery Again,dup@campus.edu,555-0102,CS,3\n",
        )
        .unwrap();

        let mut store = StudentStore::new();
        let inserted = import_students_csv(&path, &mut store).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(inserted, 2);
        assert_eq!(store.len(), 2);
        assert_eq!(store.find_by_id("S1").map(|r| r.name.as_str()), Some("Avery Lee"));
    }
}

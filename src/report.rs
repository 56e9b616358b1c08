use std::fmt::Write;

use crate::graph::CourseGraph;
use crate::sorting;
use crate::store::{StoreStatistics, StudentStore};

pub fn format_statistics(stats: &StoreStatistics) -> String {
    let mut output = String::new();
    let _ = writeln!(output, "Total students: {}", stats.count);
    let _ = writeln!(output, "Average GPA: {:.2}", stats.mean_gpa);
    let _ = writeln!(output, "Highest GPA: {:.2}", stats.max_gpa);
    let _ = writeln!(output, "Lowest GPA: {:.2}", stats.min_gpa);
    let _ = writeln!(
        output,
        "Top student: {} ({})",
        stats.top_student.name, stats.top_student.student_id
    );
    output
}

pub fn build_report(store: &StudentStore, graph: &CourseGraph) -> String {
    let mut output = String::new();

    let _ = writeln!(output, "# Campus Records Report");
    let _ = writeln!(output);
    let _ = writeln!(output, "## Student Statistics");

    match store.statistics() {
        None => {
            let _ = writeln!(output, "No students in the system.");
        }
        Some(stats) => {
            output.push_str(&format_statistics(&stats));
        }
    }

    let _ = writeln!(output);
    let _ = writeln!(output, "## Students by GPA");

    let ranked = sorting::merge_sort_by_gpa(&store.all_students(), false);
    if ranked.is_empty() {
        let _ = writeln!(output, "No students in the system.");
    } else {
        for student in ranked.iter().take(10) {
            let _ = writeln!(
                output,
                "- {} ({}, {}, semester {}) GPA {:.2}",
                student.name,
                student.student_id,
                student.department,
                student.semester,
                student.gpa()
            );
        }
    }

    let _ = writeln!(output);
    let _ = writeln!(output, "## Course Catalog");

    let courses = graph.courses();
    if courses.is_empty() {
        let _ = writeln!(output, "No courses in the catalog.");
    } else {
        for course in &courses {
            if course.prerequisites.is_empty() {
                let _ = writeln!(
                    output,
                    "- {} {} ({} credits)",
                    course.course_code, course.course_name, course.credits
                );
            } else {
                let _ = writeln!(
                    output,
                    "- {} {} ({} credits), requires {}",
                    course.course_code,
                    course.course_name,
                    course.credits,
                    course.prerequisites.join(", ")
                );
            }
        }
        if graph.has_cycle() {
            let _ = writeln!(output);
            let _ = writeln!(
                output,
                "WARNING: the prerequisite graph contains a cycle; some courses can never be taken."
            );
        }
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CourseRecord, CourseResult, StudentRecord};

    fn populated() -> (StudentStore, CourseGraph) {
        let mut store = StudentStore::new();
        let mut graph = CourseGraph::new();

        graph
            .add(CourseRecord::new("CS101", "Programming", 3, "CS").unwrap())
            .unwrap();
        let mut algo = CourseRecord::new("CS201", "Data Structures", 3, "CS").unwrap();
        algo.add_prerequisite("CS101");
        graph.add(algo).unwrap();

        let mut top =
            StudentRecord::new("S1", "Avery Lee", "avery@campus.edu", "555-0100", "CS", 3)
                .unwrap();
        let cs101 = graph.get("CS101").unwrap().clone();
        top.add_result(CourseResult::new(&cs101, 95.0).unwrap());
        store.add(top).unwrap();

        (store, graph)
    }

    #[test]
    fn report_includes_stats_ranking_and_catalog() {
        let (store, graph) = populated();
        let report = build_report(&store, &graph);
        assert!(report.contains("Total students: 1"));
        assert!(report.contains("Avery Lee"));
        assert!(report.contains("CS201 Data Structures (3 credits), requires CS101"));
        assert!(!report.contains("WARNING"));
    }

    #[test]
    fn report_flags_cyclic_prerequisites() {
        let (store, mut graph) = populated();
        graph.remove("CS101").unwrap();
        let mut looped = CourseRecord::new("CS101", "Programming", 3, "CS").unwrap();
        looped.add_prerequisite("CS201");
        graph.add(looped).unwrap();

        let report = build_report(&store, &graph);
        assert!(report.contains("WARNING"));
    }

    #[test]
    fn empty_state_report_still_renders() {
        let report = build_report(&StudentStore::new(), &CourseGraph::new());
        assert!(report.contains("No students in the system."));
        assert!(report.contains("No courses in the catalog."));
    }
}

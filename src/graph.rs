use std::cmp::Reverse;
use std::collections::{BinaryHeap, HashMap, HashSet};

use crate::error::{EngineError, Result};
use crate::models::CourseRecord;

/// Course catalog with prerequisite edges.
///
/// Each record's prerequisite list forms directed edges course → prerequisite
/// (dependency direction). Edges are plain codes resolved at traversal time;
/// a code with no matching record is a tolerated dangling edge and behaves
/// like a leaf. Records are never updated in place: replacing one is a
/// remove followed by an add.
pub struct CourseGraph {
    courses: HashMap<String, CourseRecord>,
}

impl CourseGraph {
    pub fn new() -> CourseGraph {
        CourseGraph {
            courses: HashMap::new(),
        }
    }

    pub fn add(&mut self, course: CourseRecord) -> Result<()> {
        if self.courses.contains_key(&course.course_code) {
            return Err(EngineError::DuplicateCourse {
                course_code: course.course_code,
            });
        }
        self.courses.insert(course.course_code.clone(), course);
        Ok(())
    }

    pub fn remove(&mut self, course_code: &str) -> Result<CourseRecord> {
        self.courses
            .remove(course_code)
            .ok_or_else(|| EngineError::CourseNotFound {
                course_code: course_code.to_string(),
            })
    }

    pub fn get(&self, course_code: &str) -> Option<&CourseRecord> {
        self.courses.get(course_code)
    }

    pub fn contains(&self, course_code: &str) -> bool {
        self.courses.contains_key(course_code)
    }

    /// All courses, sorted by code for deterministic listings.
    pub fn courses(&self) -> Vec<CourseRecord> {
        let mut all: Vec<CourseRecord> = self.courses.values().cloned().collect();
        all.sort_by(|a, b| a.course_code.cmp(&b.course_code));
        all
    }

    pub fn len(&self) -> usize {
        self.courses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.courses.is_empty()
    }

    /// Snapshot for the persistence collaborator.
    pub fn export_records(&self) -> Vec<CourseRecord> {
        self.courses()
    }

    /// Re-adds every record through the normal `add` path.
    pub fn import_records(&mut self, records: Vec<CourseRecord>) -> Result<usize> {
        let mut added = 0;
        for record in records {
            self.add(record)?;
            added += 1;
        }
        Ok(added)
    }

    /// Shortest chain of prerequisite edges from `start` to `target`,
    /// inclusive of both, or empty when no such chain exists.
    ///
    /// Dijkstra over unit edge weights. Behaviorally this matches BFS, but
    /// the priority queue keeps the door open for weighted edges later. The
    /// heap uses lazy deletion: stale entries are skipped when popped
    /// instead of being removed on relaxation.
    pub fn shortest_prerequisite_path(&self, start: &str, target: &str) -> Vec<String> {
        if start == target {
            return vec![start.to_string()];
        }

        let mut dist: HashMap<String, u32> = self
            .courses
            .keys()
            .map(|code| (code.clone(), u32::MAX))
            .collect();
        let mut prev: HashMap<String, String> = HashMap::new();
        let mut heap: BinaryHeap<Reverse<(u32, String)>> = BinaryHeap::new();

        dist.insert(start.to_string(), 0);
        heap.push(Reverse((0, start.to_string())));

        while let Some(Reverse((d, code))) = heap.pop() {
            if d > dist.get(&code).copied().unwrap_or(u32::MAX) {
                continue; // stale heap entry
            }
            if code == target {
                break;
            }
            let Some(course) = self.courses.get(&code) else {
                continue; // dangling node, no outgoing edges
            };
            for prereq in &course.prerequisites {
                let next = d.saturating_add(1);
                let known = dist.get(prereq).copied().unwrap_or(u32::MAX);
                if next < known {
                    dist.insert(prereq.clone(), next);
                    prev.insert(prereq.clone(), code.clone());
                    heap.push(Reverse((next, prereq.clone())));
                }
            }
        }

        // Walk predecessor links backward from the target; anything short of
        // a chain that closes on `start` means the target was never reached
        // and the result must be empty, not a partial path.
        let mut path = vec![target.to_string()];
        let mut current = target;
        while let Some(predecessor) = prev.get(current) {
            path.push(predecessor.clone());
            current = predecessor;
        }
        if current == start {
            path.reverse();
            path
        } else {
            Vec::new()
        }
    }

    /// Every course reachable over prerequisite edges from `start`, in
    /// pre-order: the course itself, then its first prerequisite's full
    /// subtree, and so on. The visited set makes this terminate on cyclic
    /// data; each code appears at most once.
    pub fn all_prerequisites(&self, start: &str) -> Vec<String> {
        let mut visited = HashSet::new();
        let mut order = Vec::new();
        self.collect_prerequisites(start, &mut visited, &mut order);
        order
    }

    fn collect_prerequisites(
        &self,
        code: &str,
        visited: &mut HashSet<String>,
        order: &mut Vec<String>,
    ) {
        if !visited.insert(code.to_string()) {
            return;
        }
        order.push(code.to_string());
        if let Some(course) = self.courses.get(code) {
            for prereq in &course.prerequisites {
                self.collect_prerequisites(prereq, visited, order);
            }
        }
    }

    /// White/gray/black DFS from every unvisited course; true on the first
    /// edge back into a node still on the recursion stack.
    ///
    /// A cycle is a valid data state, not an error: traversals survive it
    /// via their visited sets, this check is what tells callers the
    /// "prerequisite" semantics have stopped making sense.
    pub fn has_cycle(&self) -> bool {
        let mut visited = HashSet::new();
        let mut on_stack = HashSet::new();
        for code in self.courses.keys() {
            if self.cycle_from(code, &mut visited, &mut on_stack) {
                return true;
            }
        }
        false
    }

    fn cycle_from(
        &self,
        code: &str,
        visited: &mut HashSet<String>,
        on_stack: &mut HashSet<String>,
    ) -> bool {
        if on_stack.contains(code) {
            return true;
        }
        if visited.contains(code) {
            return false;
        }
        visited.insert(code.to_string());
        on_stack.insert(code.to_string());
        if let Some(course) = self.courses.get(code) {
            for prereq in &course.prerequisites {
                if self.cycle_from(prereq, visited, on_stack) {
                    return true;
                }
            }
        }
        on_stack.remove(code);
        false
    }
}

impl Default for CourseGraph {
    fn default() -> Self {
        CourseGraph::new()
    }
}

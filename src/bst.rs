use std::cmp::Ordering;

use crate::models::StudentRecord;

type Link = Option<Box<Node>>;

struct Node {
    record: StudentRecord,
    left: Link,
    right: Link,
}

/// Unbalanced binary search tree keyed by student id.
///
/// Gives ordered iteration and O(log n) average lookups. No rebalancing is
/// performed, so adversarial insertion order degrades operations to O(n);
/// that is an accepted limitation of this index, the hash index covers point
/// lookups. Every operation (including removal and drop) is iterative, so a
/// degenerate spine costs time but never call-stack depth.
pub struct OrderedIndex {
    root: Link,
    len: usize,
}

impl OrderedIndex {
    pub fn new() -> OrderedIndex {
        OrderedIndex { root: None, len: 0 }
    }

    /// Inserts a record keyed by its student id. An already-present key is a
    /// no-op; returns whether a node was actually added.
    pub fn insert(&mut self, record: StudentRecord) -> bool {
        let mut link = &mut self.root;
        while let Some(node) = link {
            match record.student_id.cmp(&node.record.student_id) {
                Ordering::Less => link = &mut node.left,
                Ordering::Greater => link = &mut node.right,
                Ordering::Equal => return false,
            }
        }
        *link = Some(Box::new(Node {
            record,
            left: None,
            right: None,
        }));
        self.len += 1;
        true
    }

    pub fn get(&self, student_id: &str) -> Option<&StudentRecord> {
        let mut cur = self.root.as_deref();
        while let Some(node) = cur {
            match student_id.cmp(node.record.student_id.as_str()) {
                Ordering::Equal => return Some(&node.record),
                Ordering::Less => cur = node.left.as_deref(),
                Ordering::Greater => cur = node.right.as_deref(),
            }
        }
        None
    }

    pub fn contains(&self, student_id: &str) -> bool {
        self.get(student_id).is_some()
    }

    /// Removes the node for `student_id`, returning its record. A node with
    /// two children adopts its in-order successor's record (minimum of the
    /// right subtree) and the successor node is removed from that subtree.
    /// The descent walks a link cursor, same as `insert`, so depth costs no
    /// stack.
    pub fn remove(&mut self, student_id: &str) -> Option<StudentRecord> {
        let mut link = &mut self.root;
        loop {
            let ordering = match link {
                None => return None,
                Some(node) => student_id.cmp(node.record.student_id.as_str()),
            };
            link = match ordering {
                Ordering::Less => &mut link.as_mut()?.left,
                Ordering::Greater => &mut link.as_mut()?.right,
                Ordering::Equal => break,
            };
        }
        let removed = Self::take_node(link)?;
        self.len -= 1;
        Some(removed)
    }

    fn take_node(link: &mut Link) -> Option<StudentRecord> {
        let node = *link.take()?;
        let Node {
            record,
            left,
            right,
        } = node;
        match (left, right) {
            (None, None) => {}
            (Some(child), None) | (None, Some(child)) => *link = Some(child),
            (Some(left), Some(right)) => {
                let mut right_link = Some(right);
                let successor = Self::pop_min(&mut right_link)?;
                *link = Some(Box::new(Node {
                    record: successor,
                    left: Some(left),
                    right: right_link,
                }));
            }
        }
        Some(record)
    }

    // Detaches the minimum node of a non-empty subtree and returns its record.
    fn pop_min(mut link: &mut Link) -> Option<StudentRecord> {
        while link.as_ref()?.left.is_some() {
            link = &mut link.as_mut()?.left;
        }
        let node = *link.take()?;
        *link = node.right;
        Some(node.record)
    }

    /// All records in ascending key order, materialized in one pass.
    pub fn in_order(&self) -> Vec<StudentRecord> {
        let mut out = Vec::with_capacity(self.len);
        let mut stack: Vec<&Node> = Vec::new();
        let mut cur = self.root.as_deref();
        while cur.is_some() || !stack.is_empty() {
            while let Some(node) = cur {
                stack.push(node);
                cur = node.left.as_deref();
            }
            if let Some(node) = stack.pop() {
                out.push(node.record.clone());
                cur = node.right.as_deref();
            }
        }
        out
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

impl Default for OrderedIndex {
    fn default() -> Self {
        OrderedIndex::new()
    }
}

impl Drop for OrderedIndex {
    // Default drop glue recurses once per node, which a long spine turns
    // into stack exhaustion; flatten ownership into a worklist instead.
    fn drop(&mut self) {
        let mut pending = Vec::new();
        if let Some(root) = self.root.take() {
            pending.push(root);
        }
        while let Some(mut node) = pending.pop() {
            if let Some(left) = node.left.take() {
                pending.push(left);
            }
            if let Some(right) = node.right.take() {
                pending.push(right);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn student(id: &str) -> StudentRecord {
        StudentRecord::new(id, format!("Student {id}"), "x@campus.edu", "555-0000", "CS", 1)
            .unwrap()
    }

    fn index_of(ids: &[&str]) -> OrderedIndex {
        let mut index = OrderedIndex::new();
        for id in ids {
            assert!(index.insert(student(id)));
        }
        index
    }

    #[test]
    fn insert_and_get() {
        let index = index_of(&["S50", "S30", "S70"]);
        assert_eq!(index.len(), 3);
        assert_eq!(index.get("S30").map(|r| r.student_id.as_str()), Some("S30"));
        assert!(index.get("S99").is_none());
    }

    #[test]
    fn duplicate_insert_is_a_no_op() {
        let mut index = index_of(&["S10"]);
        let mut dup = student("S10");
        dup.name = "Someone Else".to_string();
        assert!(!index.insert(dup));
        assert_eq!(index.len(), 1);
        assert_eq!(index.get("S10").map(|r| r.name.as_str()), Some("Student S10"));
    }

    #[test]
    fn in_order_is_sorted_regardless_of_insertion_order() {
        let index = index_of(&["S50", "S20", "S80", "S10", "S30", "S70", "S90"]);
        let ids: Vec<String> = index
            .in_order()
            .into_iter()
            .map(|r| r.student_id)
            .collect();
        assert_eq!(ids, vec!["S10", "S20", "S30", "S50", "S70", "S80", "S90"]);
    }

    #[test]
    fn remove_leaf_and_one_child_nodes() {
        let mut index = index_of(&["S50", "S30", "S20"]);
        assert!(index.remove("S20").is_some()); // leaf
        assert!(index.remove("S30").is_some()); // had one child before, leaf now
        assert_eq!(index.len(), 1);
        assert!(index.contains("S50"));
    }

    #[test]
    fn remove_two_child_node_uses_in_order_successor() {
        let mut index = index_of(&["S50", "S30", "S70", "S20", "S40", "S60", "S80"]);
        let removed = index.remove("S50");
        assert_eq!(removed.map(|r| r.student_id), Some("S50".to_string()));
        let ids: Vec<String> = index.in_order().into_iter().map(|r| r.student_id).collect();
        assert_eq!(ids, vec!["S20", "S30", "S40", "S60", "S70", "S80"]);
    }

    #[test]
    fn remove_absent_key_reports_not_found() {
        let mut index = index_of(&["S10", "S20"]);
        assert!(index.remove("S15").is_none());
        assert_eq!(index.len(), 2);
    }

    #[test]
    fn remove_and_drop_survive_a_deep_spine_on_a_small_stack() {
        // Sorted insertion order builds a pure right spine. Removal and drop
        // must walk it without one call frame per level, so run the whole
        // thing on a deliberately tiny thread stack.
        let handle = std::thread::Builder::new()
            .stack_size(256 * 1024)
            .spawn(|| {
                let mut index = OrderedIndex::new();
                for i in 0..10_000 {
                    index.insert(student(&format!("S{i:05}")));
                }
                assert!(index.remove("S09999").is_some()); // deepest node
                assert!(index.remove("S00000").is_some()); // spine root
                assert!(index.remove("S05000").is_some());
                assert!(index.remove("S09999").is_none());
                assert_eq!(index.len(), 9_997);
            })
            .expect("spawn small-stack thread");
        handle.join().expect("spine removals overflowed the stack");
    }

    #[test]
    fn survives_sorted_insertion_order() {
        // Worst case for an unbalanced tree: a pure right spine.
        let ids: Vec<String> = (0..200).map(|i| format!("S{i:04}")).collect();
        let mut index = OrderedIndex::new();
        for id in &ids {
            index.insert(student(id));
        }
        assert_eq!(index.len(), 200);
        let ordered: Vec<String> = index.in_order().into_iter().map(|r| r.student_id).collect();
        assert_eq!(ordered, ids);
        assert!(index.contains("S0199"));
    }
}

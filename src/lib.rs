//! In-memory academic record engine: a dual-index student store (binary
//! search tree + hash table kept mutually consistent), sorting and searching
//! over snapshots, and a course-prerequisite graph with shortest-path,
//! reachability, and cycle detection.
//!
//! The engine is single-threaded and does no I/O of its own; the snapshot
//! module and the CLI binary sit at its boundary. Embedders in concurrent
//! hosts must serialize mutating calls per store.

pub mod bst;
pub mod error;
pub mod graph;
pub mod hash_table;
pub mod models;
pub mod report;
pub mod searching;
pub mod snapshot;
pub mod sorting;
pub mod store;

pub use bst::OrderedIndex;
pub use error::{EngineError, Result};
pub use graph::CourseGraph;
pub use hash_table::HashIndex;
pub use models::{CourseRecord, CourseResult, Grade, StudentRecord};
pub use store::{StoreStatistics, StudentStore, TopStudent};

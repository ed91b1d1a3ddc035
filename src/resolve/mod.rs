//! Hierarchical test-case resolution
//!
//! Turns a suite's flat section list into a tree, collects the case ids a
//! section inherits from its descendants, and reconstructs full hierarchical
//! case titles. All of it works on data fetched fresh per call.

pub mod collect;
pub mod title;
pub mod tree;

pub use collect::{collect_inherited_cases, CaseSource};
pub use title::full_title;
pub use tree::{SectionNode, SectionTree};

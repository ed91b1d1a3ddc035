//! Inherited case collection
//!
//! A run scoped to a section covers that section's own cases plus the cases
//! of everything nested under it.

use crate::common::Result;

use super::tree::SectionTree;

/// Source of the case ids stored inside a single section
///
/// Implemented by the API client; tests substitute an in-memory map.
pub trait CaseSource {
    fn case_ids(&self, project_id: u64, suite_id: u64, section_id: u64) -> Result<Vec<u64>>;
}

/// Collect the case ids of a section and all its descendants
///
/// Sections are visited in pre-order starting at the target. Case ids are
/// concatenated as fetched and NOT deduplicated across sections: a case
/// belongs to exactly one section, so a duplicate would be upstream data
/// gone bad and should stay visible rather than be silently dropped.
pub fn collect_inherited_cases(
    source: &impl CaseSource,
    tree: &SectionTree,
    project_id: u64,
    suite_id: u64,
    section_id: u64,
) -> Result<Vec<u64>> {
    let mut case_ids = Vec::new();
    for id in tree.descendant_ids(section_id)? {
        case_ids.extend(source.case_ids(project_id, suite_id, id)?);
    }
    Ok(case_ids)
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;
    use crate::common::Error;
    use crate::rail::types::Section;

    struct FakeSource {
        cases: HashMap<u64, Vec<u64>>,
    }

    impl CaseSource for FakeSource {
        fn case_ids(&self, _project_id: u64, _suite_id: u64, section_id: u64) -> Result<Vec<u64>> {
            Ok(self.cases.get(&section_id).cloned().unwrap_or_default())
        }
    }

    fn section(id: u64, name: &str, parent_id: Option<u64>, depth: u32) -> Section {
        Section {
            id,
            name: name.to_string(),
            parent_id,
            depth,
        }
    }

    fn sample_tree() -> SectionTree {
        SectionTree::build(vec![
            section(1, "Root", None, 0),
            section(2, "Login", Some(1), 1),
            section(3, "Logout", Some(1), 1),
            section(4, "SSO", Some(2), 2),
        ])
        .unwrap()
    }

    fn sample_source() -> FakeSource {
        let mut cases = HashMap::new();
        cases.insert(1, vec![100]);
        cases.insert(2, vec![201, 202]);
        cases.insert(3, vec![301]);
        cases.insert(4, vec![401]);
        FakeSource { cases }
    }

    #[test]
    fn test_collects_target_and_descendants_only() {
        let collected =
            collect_inherited_cases(&sample_source(), &sample_tree(), 1, 1, 2).unwrap();

        // Section 2 plus its descendant 4; neither the parent 1 nor the
        // sibling 3 contribute.
        assert_eq!(collected, vec![201, 202, 401]);
    }

    #[test]
    fn test_root_scope_covers_the_whole_suite() {
        let collected =
            collect_inherited_cases(&sample_source(), &sample_tree(), 1, 1, 1).unwrap();
        assert_eq!(collected, vec![100, 201, 202, 401, 301]);
    }

    #[test]
    fn test_duplicate_case_ids_are_kept() {
        let mut source = sample_source();
        // An upstream inconsistency: the same case listed under two sections.
        source.cases.insert(4, vec![201]);

        let collected = collect_inherited_cases(&source, &sample_tree(), 1, 1, 2).unwrap();
        assert_eq!(collected, vec![201, 202, 201]);
    }

    #[test]
    fn test_unknown_target_section() {
        let result = collect_inherited_cases(&sample_source(), &sample_tree(), 1, 1, 42);
        assert!(matches!(result, Err(Error::MissingSection(42))));
    }
}

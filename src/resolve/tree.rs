//! Section tree construction
//!
//! A suite's sections arrive as a flat, arbitrarily-ordered list with parent
//! pointers. The tree is rebuilt from scratch for every resolution request;
//! nothing here survives a call.

use std::collections::{HashMap, HashSet};

use crate::common::{Error, Result};
use crate::rail::types::Section;

/// A section plus the ids of its direct children, in input-list order
#[derive(Debug, Clone)]
pub struct SectionNode {
    pub section: Section,
    pub children: Vec<u64>,
}

/// Rooted tree over one suite's sections
///
/// Nodes live in an arena keyed by section id; exactly one node has
/// depth 0 and is the root.
#[derive(Debug)]
pub struct SectionTree {
    nodes: HashMap<u64, SectionNode>,
    root: u64,
}

impl SectionTree {
    /// Build the tree from a suite's flat section list
    ///
    /// The list must contain exactly one depth-0 section, and every other
    /// section must be reachable from it through parent pointers. The build
    /// is a single grouping pass plus one attach walk, so it stays linear in
    /// the number of sections.
    pub fn build(sections: Vec<Section>) -> Result<Self> {
        let root_ids: Vec<u64> = sections
            .iter()
            .filter(|section| section.depth == 0)
            .map(|section| section.id)
            .collect();
        let root = match root_ids.len() {
            0 => return Err(Error::NoRootSection),
            1 => root_ids[0],
            _ => return Err(Error::MultipleRootSections(root_ids)),
        };

        // One pass: parent id -> child ids, preserving input order.
        let mut by_parent: HashMap<u64, Vec<u64>> = HashMap::new();
        for section in &sections {
            if section.id == root {
                continue;
            }
            if let Some(parent_id) = section.parent_id {
                by_parent.entry(parent_id).or_default().push(section.id);
            }
            // A non-root section without a parent id can never be reached
            // and is reported as unreachable below.
        }

        let mut nodes: HashMap<u64, SectionNode> = sections
            .into_iter()
            .map(|section| {
                (
                    section.id,
                    SectionNode {
                        section,
                        children: Vec::new(),
                    },
                )
            })
            .collect();

        // Attach children from the grouping, walking down from the root.
        let mut reached: HashSet<u64> = HashSet::new();
        let mut stack = vec![root];
        while let Some(id) = stack.pop() {
            if !reached.insert(id) {
                continue;
            }
            let children = by_parent.remove(&id).unwrap_or_default();
            stack.extend(children.iter().copied());
            if let Some(node) = nodes.get_mut(&id) {
                node.children = children;
            }
        }

        if reached.len() != nodes.len() {
            let mut orphans: Vec<u64> = nodes
                .keys()
                .filter(|id| !reached.contains(id))
                .copied()
                .collect();
            orphans.sort_unstable();
            return Err(Error::OrphanSection(orphans));
        }

        Ok(Self { nodes, root })
    }

    /// The root node (depth 0)
    pub fn root(&self) -> &SectionNode {
        // The arena always contains the root; build() guarantees it.
        &self.nodes[&self.root]
    }

    /// Look up a node by section id
    pub fn get(&self, id: u64) -> Option<&SectionNode> {
        self.nodes.get(&id)
    }

    /// Number of sections in the tree
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the tree holds no sections (never true for a built tree)
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Section ids of the given section and all its descendants, pre-order
    ///
    /// The target section itself comes first. Ids are deduplicated
    /// defensively even though a built tree cannot contain duplicates.
    pub fn descendant_ids(&self, section_id: u64) -> Result<Vec<u64>> {
        if !self.nodes.contains_key(&section_id) {
            return Err(Error::MissingSection(section_id));
        }

        let mut ids = Vec::new();
        let mut seen = HashSet::new();
        let mut stack = vec![section_id];
        while let Some(id) = stack.pop() {
            if !seen.insert(id) {
                continue;
            }
            ids.push(id);
            if let Some(node) = self.nodes.get(&id) {
                // Reverse so the stack pops children in input order.
                stack.extend(node.children.iter().rev().copied());
            }
        }
        Ok(ids)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn section(id: u64, name: &str, parent_id: Option<u64>, depth: u32) -> Section {
        Section {
            id,
            name: name.to_string(),
            parent_id,
            depth,
        }
    }

    fn sample_sections() -> Vec<Section> {
        vec![
            section(1, "Root", None, 0),
            section(2, "Login", Some(1), 1),
            section(3, "Logout", Some(1), 1),
            section(4, "SSO", Some(2), 2),
        ]
    }

    #[test]
    fn test_build_attaches_children_under_parents() {
        let tree = SectionTree::build(sample_sections()).unwrap();

        assert_eq!(tree.len(), 4);
        assert_eq!(tree.root().section.id, 1);
        assert_eq!(tree.root().children, vec![2, 3]);
        assert_eq!(tree.get(2).unwrap().children, vec![4]);
        assert!(tree.get(4).unwrap().children.is_empty());
    }

    #[test]
    fn test_root_has_depth_zero_and_no_parent() {
        let tree = SectionTree::build(sample_sections()).unwrap();
        assert_eq!(tree.root().section.depth, 0);
        assert_eq!(tree.root().section.parent_id, None);
    }

    #[test]
    fn test_build_is_insensitive_to_input_order() {
        // All 4-element permutations would be overkill; a few reversals and
        // rotations cover the grouping logic.
        let base = sample_sections();
        let mut orders = vec![base.clone()];
        let mut reversed = base.clone();
        reversed.reverse();
        orders.push(reversed);
        for rotation in 1..base.len() {
            let mut rotated = base.clone();
            rotated.rotate_left(rotation);
            orders.push(rotated);
        }

        let reference = SectionTree::build(base).unwrap();
        for sections in orders {
            let tree = SectionTree::build(sections).unwrap();
            assert_eq!(tree.root().section.id, reference.root().section.id);
            for id in [1, 2, 3, 4] {
                let mut expected = reference.get(id).unwrap().children.clone();
                let mut actual = tree.get(id).unwrap().children.clone();
                expected.sort_unstable();
                actual.sort_unstable();
                assert_eq!(actual, expected, "children of section {id}");
            }
        }
    }

    #[test]
    fn test_missing_root_is_rejected() {
        let sections = vec![section(2, "Login", Some(1), 1)];
        assert!(matches!(
            SectionTree::build(sections),
            Err(Error::NoRootSection)
        ));
    }

    #[test]
    fn test_multiple_roots_are_rejected() {
        let sections = vec![
            section(1, "Root", None, 0),
            section(9, "Other root", None, 0),
        ];
        assert!(matches!(
            SectionTree::build(sections),
            Err(Error::MultipleRootSections(ids)) if ids == vec![1, 9]
        ));
    }

    #[test]
    fn test_dangling_parent_is_an_orphan() {
        let mut sections = sample_sections();
        sections.push(section(7, "Dangling", Some(999), 1));
        assert!(matches!(
            SectionTree::build(sections),
            Err(Error::OrphanSection(ids)) if ids == vec![7]
        ));
    }

    #[test]
    fn test_parent_cycle_is_an_orphan() {
        let mut sections = sample_sections();
        sections.push(section(7, "A", Some(8), 1));
        sections.push(section(8, "B", Some(7), 2));
        assert!(matches!(
            SectionTree::build(sections),
            Err(Error::OrphanSection(ids)) if ids == vec![7, 8]
        ));
    }

    #[test]
    fn test_descendants_are_preorder_and_exclude_siblings() {
        let tree = SectionTree::build(sample_sections()).unwrap();

        assert_eq!(tree.descendant_ids(1).unwrap(), vec![1, 2, 4, 3]);
        assert_eq!(tree.descendant_ids(2).unwrap(), vec![2, 4]);
        assert_eq!(tree.descendant_ids(3).unwrap(), vec![3]);
        assert_eq!(tree.descendant_ids(4).unwrap(), vec![4]);
    }

    #[test]
    fn test_descendants_of_unknown_section() {
        let tree = SectionTree::build(sample_sections()).unwrap();
        assert!(matches!(
            tree.descendant_ids(42),
            Err(Error::MissingSection(42))
        ));
    }
}

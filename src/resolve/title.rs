//! Full hierarchical case titles
//!
//! A case's full title is its ancestor section names from the root down to
//! its immediate parent, space-joined, followed by the case's own title.
//! The walk runs over the flat section list, not the tree.

use crate::common::{Error, Result};
use crate::rail::types::{Case, Section};

/// Reconstruct the full hierarchical title of a case
///
/// Walks the parent chain upward from the case's section until the depth-0
/// section, inclusive. The walk is bounded by the section count; exceeding
/// the bound means the parent pointers loop.
pub fn full_title(case: &Case, sections: &[Section]) -> Result<String> {
    let mut section = find_section(sections, case.section_id)?;

    let mut names = Vec::new();
    let mut hops = 0usize;
    loop {
        names.push(section.name.as_str());
        if section.depth == 0 {
            break;
        }

        hops += 1;
        if hops > sections.len() {
            return Err(Error::CycleDetected(case.section_id));
        }

        let parent_id = match section.parent_id {
            Some(parent_id) => parent_id,
            // Not the root, yet nothing above it.
            None => return Err(Error::OrphanSection(vec![section.id])),
        };
        section = find_section(sections, parent_id)?;
    }

    names.reverse();
    names.push(case.title.as_str());
    Ok(names.join(" "))
}

fn find_section(sections: &[Section], id: u64) -> Result<&Section> {
    sections
        .iter()
        .find(|section| section.id == id)
        .ok_or(Error::MissingSection(id))
}

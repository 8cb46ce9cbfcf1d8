//! Member correlation between two shapes.

use std::collections::HashSet;

use crate::model::TypeShape;

/// Members present by identical spelling in both shapes, in the source
/// shape's member order (own members first, then inherited, as flattened by
/// the front end).
///
/// Matching is exact and case-sensitive: no type-compatibility check, no
/// renaming, no flattening conventions. Source-only or destination-only
/// members are dropped silently.
pub fn correlate(source: &TypeShape, destination: &TypeShape) -> Vec<String> {
    let destination_members: HashSet<&str> =
        destination.members.iter().map(String::as_str).collect();
    source
        .members
        .iter()
        .filter(|member| destination_members.contains(member.as_str()))
        .cloned()
        .collect()
}

//! Pure edit primitives over a nested field mapping.
//!
//! Each function addresses a mapping by [`FieldPath`], rebuilds the levels
//! between the root and that mapping, and returns a fresh top-level mapping.
//! The input is never mutated. A path or key that does not exist leaves the
//! mapping unchanged.

use elysian_domain::{FieldMap, FieldNode, FieldPatch, FieldPath, FieldType};

/// Shallow-merges `patch` into the node stored under `key`.
///
/// A patch that changes the name re-keys the entry in place.
#[must_use]
pub fn update_field(fields: &FieldMap, path: &FieldPath, key: &str, patch: FieldPatch) -> FieldMap {
    if patch.is_empty() {
        return fields.clone();
    }

    edit_mapping(fields, path.segments(), false, |mapping| {
        let node = mapping.get(key)?.clone().merged(patch);
        Some(replace_entry(mapping, key, node))
    })
    .unwrap_or_else(|| fields.clone())
}

/// Replaces the entry under `key` with `updated`, keyed by its own name.
///
/// The entry keeps its sibling position. A sibling already stored under the
/// new name is overwritten.
#[must_use]
pub fn rename_field(fields: &FieldMap, path: &FieldPath, key: &str, updated: FieldNode) -> FieldMap {
    edit_mapping(fields, path.segments(), false, |mapping| {
        mapping.contains_key(key).then(|| replace_entry(mapping, key, updated))
    })
    .unwrap_or_else(|| fields.clone())
}

/// Removes the entry under `key` together with its subtree.
#[must_use]
pub fn delete_field(fields: &FieldMap, path: &FieldPath, key: &str) -> FieldMap {
    edit_mapping(fields, path.segments(), false, |mapping| {
        let mut next = mapping.clone();
        next.shift_remove(key)?;
        Some(next)
    })
    .unwrap_or_else(|| fields.clone())
}

/// Inserts an optional string leaf named `name` at the front of the
/// mapping addressed by `target`.
///
/// A node without a children mapping gains one. An existing sibling with the
/// same name is kept as is.
#[must_use]
pub fn add_child(fields: &FieldMap, target: &FieldPath, name: &str) -> FieldMap {
    edit_mapping(fields, target.segments(), true, |mapping| {
        if mapping.contains_key(name) {
            return None;
        }

        let mut next = FieldMap::with_capacity(mapping.len() + 1);
        next.insert(name.to_owned(), FieldNode::new(name, FieldType::String, false));
        next.extend(mapping.iter().map(|(key, node)| (key.clone(), node.clone())));
        Some(next)
    })
    .unwrap_or_else(|| fields.clone())
}

/// Applies `edit` to the mapping addressed by `segments` and splices the
/// result back through every ancestor.
fn edit_mapping<F>(
    fields: &FieldMap,
    segments: &[String],
    create_missing: bool,
    edit: F,
) -> Option<FieldMap>
where
    F: FnOnce(&FieldMap) -> Option<FieldMap>,
{
    let Some((head, rest)) = segments.split_first() else {
        return edit(fields);
    };

    let node = fields.get(head)?;
    let empty = FieldMap::new();
    let children = match node.children() {
        Some(children) => children,
        None if create_missing && rest.is_empty() => &empty,
        None => return None,
    };

    let edited = edit_mapping(children, rest, create_missing, edit)?;
    let mut next = fields.clone();
    next.insert(head.clone(), node.clone().with_children(edited));
    Some(next)
}

/// Rebuilds `mapping` with the entry under `key` replaced by `node`, keyed
/// by the node's name, at the same index.
fn replace_entry(mapping: &FieldMap, key: &str, node: FieldNode) -> FieldMap {
    let new_key = node.name().to_owned();
    let mut replacement = Some(node);

    mapping
        .iter()
        .filter_map(|(existing_key, existing)| {
            if existing_key == key {
                return replacement
                    .take()
                    .map(|node| (new_key.clone(), node));
            }
            if existing_key == &new_key {
                return None;
            }
            Some((existing_key.clone(), existing.clone()))
        })
        .collect()
}

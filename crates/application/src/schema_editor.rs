use elysian_core::{AppError, AppResult, NonEmptyString};
use elysian_domain::{
    FieldMap, FieldNode, FieldPatch, FieldPath, SchemaTree, mapping_at, validate_field_map,
};

pub mod operations;
mod synthetic_name;

#[cfg(test)]
mod tests;

use synthetic_name::generate_synthetic_name;

/// Prefix of placeholder names given to freshly added fields.
pub const SYNTHETIC_FIELD_PREFIX: &str = "newField_";

const SYNTHETIC_NAME_ATTEMPTS: usize = 16;

/// Editing session over one entity schema.
///
/// Holds the last loaded schema as baseline and the in-progress field
/// mapping. Edits never touch storage; [`SchemaEditor::commit_payload`]
/// extracts the mapping a consumer sends in a single replace call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaEditor {
    baseline: SchemaTree,
    fields: FieldMap,
}

impl SchemaEditor {
    /// Opens a session seeded with a loaded schema.
    #[must_use]
    pub fn new(baseline: SchemaTree) -> Self {
        let fields = baseline.fields().clone();
        Self { baseline, fields }
    }

    /// Returns the entity being edited.
    #[must_use]
    pub fn entity_id(&self) -> &NonEmptyString {
        self.baseline.entity_id()
    }

    /// Returns the last loaded schema.
    #[must_use]
    pub fn baseline(&self) -> &SchemaTree {
        &self.baseline
    }

    /// Returns the in-progress top-level mapping.
    #[must_use]
    pub fn fields(&self) -> &FieldMap {
        &self.fields
    }

    /// Returns the in-progress schema as a tree.
    #[must_use]
    pub fn tree(&self) -> SchemaTree {
        self.baseline.clone().with_fields(self.fields.clone())
    }

    /// Returns whether the in-progress mapping differs from the baseline.
    #[must_use]
    pub fn has_unsaved_changes(&self) -> bool {
        &self.fields != self.baseline.fields()
    }

    /// Adds a placeholder leaf at the front of the mapping addressed by `target`
    /// and returns its key.
    pub fn add_child(&mut self, target: &FieldPath) -> AppResult<String> {
        let existing = self.children_at(target)?;
        let name = (0..SYNTHETIC_NAME_ATTEMPTS)
            .map(|_| generate_synthetic_name())
            .find(|candidate| !existing.contains(candidate))
            .ok_or_else(|| {
                AppError::Conflict(format!("could not pick a free field name at '{target}'"))
            })?;

        self.fields = operations::add_child(&self.fields, target, name.as_str());
        Ok(name)
    }

    /// Merges a partial update into the field under `key`.
    pub fn update_field(&mut self, path: &FieldPath, key: &str, patch: FieldPatch) -> AppResult<()> {
        self.require_field(path, key)?;
        if let Some(name) = patch.name.as_deref() {
            require_field_name(name)?;
        }

        self.fields = operations::update_field(&self.fields, path, key, patch);
        Ok(())
    }

    /// Renames the field under `key`, keeping its position and contents.
    pub fn rename_field(&mut self, path: &FieldPath, key: &str, new_name: &str) -> AppResult<()> {
        let node = self.require_field(path, key)?.clone();
        require_field_name(new_name)?;

        self.fields = operations::rename_field(&self.fields, path, key, node.renamed(new_name));
        Ok(())
    }

    /// Removes the field under `key` and its subtree.
    pub fn delete_field(&mut self, path: &FieldPath, key: &str) -> AppResult<()> {
        self.require_field(path, key)?;
        self.fields = operations::delete_field(&self.fields, path, key);
        Ok(())
    }

    /// Returns the mapping to send in a replace-schema call.
    pub fn commit_payload(&self) -> AppResult<FieldMap> {
        validate_field_map(&self.fields)?;
        Ok(self.fields.clone())
    }

    /// Replaces the baseline and discards in-progress edits.
    pub fn rebase(&mut self, baseline: SchemaTree) {
        self.fields = baseline.fields().clone();
        self.baseline = baseline;
    }

    fn require_field(&self, path: &FieldPath, key: &str) -> AppResult<&FieldNode> {
        mapping_at(&self.fields, path)
            .and_then(|mapping| mapping.get(key))
            .ok_or_else(|| AppError::NotFound(format!("field '{key}' not found at '{path}'")))
    }

    fn children_at(&self, target: &FieldPath) -> AppResult<Vec<String>> {
        let Some((key, parent)) = target.segments().split_last() else {
            return Ok(self.fields.keys().cloned().collect());
        };
        let parent = FieldPath::from_segments(parent.iter().cloned());

        Ok(self
            .require_field(&parent, key)?
            .children()
            .map(|children| children.keys().cloned().collect())
            .unwrap_or_default())
    }
}

fn require_field_name(name: &str) -> AppResult<()> {
    if name.trim().is_empty() {
        return Err(AppError::Validation(
            "field name must not be empty or whitespace".to_owned(),
        ));
    }

    Ok(())
}

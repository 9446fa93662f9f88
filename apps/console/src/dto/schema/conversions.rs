use std::str::FromStr;

use elysian_application::{EntityTypeSummary, SchemaEditor};
use elysian_core::AppResult;
use elysian_domain::{FieldMap, FieldNode, FieldPatch, FieldPath, FieldType};
use uuid::Uuid;

use super::types::{
    EntityTypeResponse, FieldNodeResponse, SchemaSessionResponse, UpdateFieldRequest,
};

impl From<EntityTypeSummary> for EntityTypeResponse {
    fn from(value: EntityTypeSummary) -> Self {
        Self {
            entity_id: value.entity_id,
            is_manually_managed: value.is_manually_managed,
        }
    }
}

impl FieldNodeResponse {
    fn from_entry(key: &str, node: &FieldNode) -> Self {
        Self {
            key: key.to_owned(),
            name: node.name().to_owned(),
            field_type: node.field_type().as_str().to_owned(),
            required: node.is_required(),
            children: node.children().map(field_list),
        }
    }
}

fn field_list(fields: &FieldMap) -> Vec<FieldNodeResponse> {
    fields
        .iter()
        .map(|(key, node)| FieldNodeResponse::from_entry(key, node))
        .collect()
}

impl SchemaSessionResponse {
    /// Snapshots the working tree of an editor.
    #[must_use]
    pub fn from_editor(session_id: Uuid, editor: &SchemaEditor) -> Self {
        Self {
            session_id: session_id.to_string(),
            entity_id: editor.entity_id().as_str().to_owned(),
            is_manually_managed: editor.baseline().is_manually_managed(),
            has_unsaved_changes: editor.has_unsaved_changes(),
            fields: field_list(editor.fields()),
        }
    }
}

impl UpdateFieldRequest {
    /// Splits the request into its target address and patch.
    pub fn into_parts(self) -> AppResult<(FieldPath, String, FieldPatch)> {
        let field_type = self
            .field_type
            .as_deref()
            .map(FieldType::from_str)
            .transpose()?;

        Ok((
            FieldPath::from_segments(self.path),
            self.key,
            FieldPatch {
                name: self.name,
                field_type,
                required: self.required,
                children: None,
            },
        ))
    }
}

use std::fmt::{Display, Formatter};
use std::str::FromStr;

use elysian_core::{AppError, AppResult, NonEmptyString};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Ordered mapping from sibling key to field definition.
///
/// Keys are unique by construction and always equal the `name` of the node
/// stored under them once the map went through [`normalize_field_map`].
pub type FieldMap = IndexMap<String, FieldNode>;

/// Supported schema field types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    /// UTF-8 string field.
    #[default]
    String,
    /// Numeric field.
    Number,
    /// Boolean field.
    Boolean,
    /// Nested object field.
    Object,
    /// Array field, optionally describing the shape of its items.
    Array,
}

impl FieldType {
    /// Returns the wire value for the field type.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Number => "number",
            Self::Boolean => "boolean",
            Self::Object => "object",
            Self::Array => "array",
        }
    }

    /// Returns all known field types in display order.
    #[must_use]
    pub fn all() -> &'static [Self] {
        const ALL: &[FieldType] = &[
            FieldType::String,
            FieldType::Number,
            FieldType::Boolean,
            FieldType::Object,
            FieldType::Array,
        ];

        ALL
    }

    /// Returns whether values of this type can carry nested fields.
    #[must_use]
    pub fn is_composite(&self) -> bool {
        matches!(self, Self::Object | Self::Array)
    }
}

impl FromStr for FieldType {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "string" => Ok(Self::String),
            "number" => Ok(Self::Number),
            "boolean" => Ok(Self::Boolean),
            "object" => Ok(Self::Object),
            "array" => Ok(Self::Array),
            _ => Err(AppError::Validation(format!(
                "unknown field type '{value}'"
            ))),
        }
    }
}

/// A named schema field, owning its nested fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RawFieldNode")]
pub struct FieldNode {
    name: String,
    #[serde(rename = "type")]
    field_type: FieldType,
    required: bool,
    #[serde(rename = "fields", skip_serializing_if = "Option::is_none")]
    children: Option<FieldMap>,
}

impl FieldNode {
    /// Creates a leaf field.
    #[must_use]
    pub fn new(name: impl Into<String>, field_type: FieldType, required: bool) -> Self {
        Self {
            name: name.into(),
            field_type,
            required,
            children: None,
        }
    }

    /// Returns the field name.
    #[must_use]
    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    /// Returns the field type.
    #[must_use]
    pub fn field_type(&self) -> FieldType {
        self.field_type
    }

    /// Returns whether the field is required.
    #[must_use]
    pub fn is_required(&self) -> bool {
        self.required
    }

    /// Returns the nested fields when the node is composite.
    #[must_use]
    pub fn children(&self) -> Option<&FieldMap> {
        self.children.as_ref()
    }

    /// Returns whether the node carries a children mapping.
    #[must_use]
    pub fn is_composite(&self) -> bool {
        self.children.is_some()
    }

    /// Returns the node with a different name.
    #[must_use]
    pub fn renamed(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Returns the node with its children mapping replaced.
    #[must_use]
    pub fn with_children(mut self, children: FieldMap) -> Self {
        self.children = Some(children);
        self
    }

    /// Shallow-merges a patch into the node.
    ///
    /// Supplied `children` replace the whole mapping and are re-keyed by name.
    #[must_use]
    pub fn merged(mut self, patch: FieldPatch) -> Self {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(field_type) = patch.field_type {
            self.field_type = field_type;
        }
        if let Some(required) = patch.required {
            self.required = required;
        }
        if let Some(children) = patch.children {
            self.children = Some(normalize_field_map(children));
        }

        self
    }

    /// Returns the number of nodes in this subtree, including the node itself.
    #[must_use]
    pub fn subtree_len(&self) -> usize {
        1 + self
            .children
            .as_ref()
            .map(|children| children.values().map(Self::subtree_len).sum())
            .unwrap_or(0)
    }
}

#[derive(Deserialize)]
struct RawFieldNode {
    #[serde(default)]
    name: Option<String>,
    #[serde(rename = "type", default)]
    field_type: Option<String>,
    #[serde(default)]
    required: bool,
    #[serde(rename = "fields", default)]
    children: Option<FieldMap>,
}

impl From<RawFieldNode> for FieldNode {
    fn from(value: RawFieldNode) -> Self {
        // Detected types the console cannot edit fall back to string so every
        // node keeps a concrete type on the next replace.
        let field_type = value
            .field_type
            .as_deref()
            .and_then(|raw| FieldType::from_str(raw).ok())
            .unwrap_or_default();

        Self {
            name: value.name.unwrap_or_default(),
            field_type,
            required: value.required,
            children: value.children.map(normalize_field_map),
        }
    }
}

/// Partial update applied to a single field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldPatch {
    /// New field name.
    #[serde(default)]
    pub name: Option<String>,
    /// New field type.
    #[serde(rename = "type", default)]
    pub field_type: Option<FieldType>,
    /// New required flag.
    #[serde(default)]
    pub required: Option<bool>,
    /// Replacement children mapping.
    #[serde(rename = "fields", default)]
    pub children: Option<FieldMap>,
}

impl FieldPatch {
    /// Returns whether the patch carries no change at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.field_type.is_none()
            && self.required.is_none()
            && self.children.is_none()
    }
}

/// Key path from the schema root down to a mapping in the tree.
///
/// The empty path addresses the top-level field mapping.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldPath(Vec<String>);

impl FieldPath {
    /// Returns the path addressing the top-level mapping.
    #[must_use]
    pub fn root() -> Self {
        Self(Vec::new())
    }

    /// Builds a path from its key segments.
    #[must_use]
    pub fn from_segments<I, S>(segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(segments.into_iter().map(Into::into).collect())
    }

    /// Returns the path extended by one child key.
    #[must_use]
    pub fn child(&self, key: impl Into<String>) -> Self {
        let mut segments = self.0.clone();
        segments.push(key.into());
        Self(segments)
    }

    /// Returns the key segments.
    #[must_use]
    pub fn segments(&self) -> &[String] {
        self.0.as_slice()
    }

    /// Returns whether the path addresses the top-level mapping.
    #[must_use]
    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns the tree depth addressed by this path.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.0.len()
    }
}

impl Display for FieldPath {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        if self.0.is_empty() {
            return formatter.write_str("<root>");
        }

        formatter.write_str(self.0.join(".").as_str())
    }
}

/// Schema of one entity type: the root of the field tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawSchemaTree")]
pub struct SchemaTree {
    #[serde(rename = "id")]
    entity_id: NonEmptyString,
    #[serde(rename = "_manual", skip_serializing_if = "is_false")]
    is_manually_managed: bool,
    fields: FieldMap,
}

impl SchemaTree {
    /// Creates a schema tree, normalizing keys to field names.
    pub fn new(
        entity_id: impl Into<String>,
        is_manually_managed: bool,
        fields: FieldMap,
    ) -> AppResult<Self> {
        Ok(Self {
            entity_id: NonEmptyString::new(entity_id)?,
            is_manually_managed,
            fields: normalize_field_map(fields),
        })
    }

    /// Returns the entity identifier.
    #[must_use]
    pub fn entity_id(&self) -> &NonEmptyString {
        &self.entity_id
    }

    /// Returns whether the schema was authored manually rather than inferred.
    #[must_use]
    pub fn is_manually_managed(&self) -> bool {
        self.is_manually_managed
    }

    /// Returns the top-level field mapping.
    #[must_use]
    pub fn fields(&self) -> &FieldMap {
        &self.fields
    }

    /// Returns the tree with its top-level mapping replaced.
    #[must_use]
    pub fn with_fields(mut self, fields: FieldMap) -> Self {
        self.fields = fields;
        self
    }

    /// Finds the node stored under `key` in the mapping addressed by `path`.
    #[must_use]
    pub fn find(&self, path: &FieldPath, key: &str) -> Option<&FieldNode> {
        mapping_at(&self.fields, path).and_then(|mapping| mapping.get(key))
    }
}

fn is_false(value: &bool) -> bool {
    !*value
}

#[derive(Deserialize)]
struct RawSchemaTree {
    id: String,
    #[serde(rename = "_manual", default)]
    manual: Option<bool>,
    #[serde(default)]
    fields: FieldMap,
}

impl TryFrom<RawSchemaTree> for SchemaTree {
    type Error = AppError;

    fn try_from(value: RawSchemaTree) -> Result<Self, Self::Error> {
        Self::new(value.id, value.manual.unwrap_or(false), value.fields)
    }
}

/// Returns the mapping addressed by `path`, if every segment exists.
#[must_use]
pub fn mapping_at<'a>(fields: &'a FieldMap, path: &FieldPath) -> Option<&'a FieldMap> {
    path.segments()
        .iter()
        .try_fold(fields, |mapping, key| mapping.get(key)?.children())
}

/// Re-keys every level of a mapping by node name.
///
/// Blank names inherit their key. When two siblings resolve to the same name
/// the later one wins, keeping the earlier position.
#[must_use]
pub fn normalize_field_map(fields: FieldMap) -> FieldMap {
    let mut normalized = FieldMap::with_capacity(fields.len());
    for (key, mut node) in fields {
        if node.name.trim().is_empty() {
            node.name = key;
        }
        node.children = node.children.map(normalize_field_map);
        normalized.insert(node.name.clone(), node);
    }

    normalized
}

/// Checks that every key equals its node name and that no name is blank.
pub fn validate_field_map(fields: &FieldMap) -> AppResult<()> {
    validate_level(fields, &FieldPath::root())
}

fn validate_level(fields: &FieldMap, path: &FieldPath) -> AppResult<()> {
    for (key, node) in fields {
        if node.name.trim().is_empty() {
            return Err(AppError::Validation(format!(
                "field under '{key}' at '{path}' has a blank name"
            )));
        }
        if key != &node.name {
            return Err(AppError::Validation(format!(
                "field key '{key}' at '{path}' does not match its name '{}'",
                node.name
            )));
        }
        if let Some(children) = &node.children {
            validate_level(children, &path.child(key.as_str()))?;
        }
    }

    Ok(())
}

//! Entity records and the JSON query used to browse them.

use elysian_core::{AppError, AppResult, NonEmptyString};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One stored record, as returned by the database.
pub type RecordDocument = Map<String, Value>;

/// Page size used when a query does not set one.
pub const DEFAULT_RECORD_LIMIT: u64 = 50;

/// Leaf operators accepted in a filter node.
pub const FILTER_OPERATORS: [&str; 11] = [
    "eq",
    "neq",
    "gt",
    "gte",
    "lt",
    "lte",
    "contains",
    "not_contains",
    "any",
    "all",
    "none",
];

/// Sort order of one query field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    /// Smallest value first.
    Asc,
    /// Largest value first.
    Desc,
}

/// Validated query over the records of one entity.
///
/// Serializes to the body of `POST /api/query`. A filter node maps field
/// names to `{operator: value}` objects and may nest `and` / `or` arrays of
/// further nodes.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecordQuery {
    entity: NonEmptyString,
    offset: u64,
    limit: u64,
    filters: Map<String, Value>,
    sorts: IndexMap<String, SortDirection>,
    #[serde(skip_serializing_if = "Option::is_none")]
    fields: Option<String>,
}

#[derive(Deserialize)]
struct RawRecordQuery {
    #[serde(default)]
    entity: String,
    #[serde(default)]
    offset: u64,
    #[serde(default)]
    limit: Option<u64>,
    #[serde(default)]
    filters: Option<Map<String, Value>>,
    #[serde(default)]
    sorts: Option<IndexMap<String, SortDirection>>,
    #[serde(default)]
    fields: Option<String>,
}

impl RecordQuery {
    /// Creates the default query of an entity: first page, no filter.
    pub fn new(entity: &str) -> AppResult<Self> {
        Ok(Self {
            entity: NonEmptyString::new(entity.trim())
                .map_err(|_| AppError::Validation("query entity is required".to_owned()))?,
            offset: 0,
            limit: DEFAULT_RECORD_LIMIT,
            filters: Map::new(),
            sorts: IndexMap::new(),
            fields: None,
        })
    }

    /// Parses and validates a query written by the operator.
    pub fn from_value(value: Value) -> AppResult<Self> {
        let raw: RawRecordQuery = serde_json::from_value(value)
            .map_err(|error| AppError::Validation(format!("invalid record query: {error}")))?;

        let filters = raw.filters.unwrap_or_default();
        validate_filter_node(&filters, "filters")?;

        let mut query = Self::new(raw.entity.as_str())?;
        query.offset = raw.offset;
        query.limit = raw.limit.unwrap_or(DEFAULT_RECORD_LIMIT);
        query.filters = filters;
        query.sorts = raw.sorts.unwrap_or_default();
        query.fields = raw
            .fields
            .map(|fields| fields.trim().to_owned())
            .filter(|fields| !fields.is_empty());
        Ok(query)
    }

    /// Returns the queried entity.
    #[must_use]
    pub fn entity(&self) -> &NonEmptyString {
        &self.entity
    }

    /// Returns the number of matching records to skip.
    #[must_use]
    pub fn offset(&self) -> u64 {
        self.offset
    }

    /// Returns the page size. Zero means no limit.
    #[must_use]
    pub fn limit(&self) -> u64 {
        self.limit
    }

    /// Returns the root filter node.
    #[must_use]
    pub fn filters(&self) -> &Map<String, Value> {
        &self.filters
    }

    /// Returns the sort keys in priority order.
    #[must_use]
    pub fn sorts(&self) -> &IndexMap<String, SortDirection> {
        &self.sorts
    }

    /// Returns the projected field names, or `None` for whole records.
    #[must_use]
    pub fn projected_fields(&self) -> Option<Vec<&str>> {
        self.fields.as_deref().map(|fields| {
            fields
                .split(',')
                .map(str::trim)
                .filter(|field| !field.is_empty())
                .collect()
        })
    }
}

fn validate_filter_node(node: &Map<String, Value>, path: &str) -> AppResult<()> {
    for (key, value) in node {
        match key.as_str() {
            "and" | "or" => {
                let children = value.as_array().ok_or_else(|| {
                    AppError::Validation(format!("'{path}.{key}' must be an array of filters"))
                })?;
                for (index, child) in children.iter().enumerate() {
                    let child_path = format!("{path}.{key}[{index}]");
                    let child = child.as_object().ok_or_else(|| {
                        AppError::Validation(format!("'{child_path}' must be an object"))
                    })?;
                    validate_filter_node(child, child_path.as_str())?;
                }
            }
            field => {
                let operators = value.as_object().ok_or_else(|| {
                    AppError::Validation(format!(
                        "'{path}.{field}' must map operators to values"
                    ))
                })?;
                for (operator, operand) in operators {
                    if !FILTER_OPERATORS.contains(&operator.as_str()) {
                        return Err(AppError::Validation(format!(
                            "unknown filter operator '{operator}' on '{field}'"
                        )));
                    }
                    if !operand.is_string() {
                        return Err(AppError::Validation(format!(
                            "'{path}.{field}.{operator}' must be a string"
                        )));
                    }
                }
            }
        }
    }

    Ok(())
}

/// Returns the `id` of a record, when it has one.
#[must_use]
pub fn record_id(record: &RecordDocument) -> Option<&str> {
    record.get("id").and_then(Value::as_str)
}

use std::cmp::Ordering;

use async_trait::async_trait;
use serde_json::{Map, Value};

use elysian_application::RecordRepository;
use elysian_core::{AppError, AppResult};
use elysian_domain::{RecordDocument, RecordQuery, SortDirection, record_id};

use super::InMemoryElysianStore;

#[async_trait]
impl RecordRepository for InMemoryElysianStore {
    async fn query_records(&self, query: &RecordQuery) -> AppResult<Vec<RecordDocument>> {
        let entity = query.entity().as_str();
        self.require_entity(entity).await?;

        let records = self.records.read().await;
        let mut matching: Vec<&RecordDocument> = records
            .get(entity)
            .map(|stored| {
                stored
                    .iter()
                    .filter(|record| matches_node(record, query.filters()))
                    .collect()
            })
            .unwrap_or_default();

        matching.sort_by(|left, right| {
            query
                .sorts()
                .iter()
                .map(|(field, direction)| {
                    let ordering = compare_values(left.get(field), right.get(field));
                    match direction {
                        SortDirection::Asc => ordering,
                        SortDirection::Desc => ordering.reverse(),
                    }
                })
                .find(|ordering| ordering.is_ne())
                .unwrap_or(Ordering::Equal)
        });

        let offset = usize::try_from(query.offset()).unwrap_or(usize::MAX);
        let limit = match query.limit() {
            0 => usize::MAX,
            limit => usize::try_from(limit).unwrap_or(usize::MAX),
        };
        let projected = query.projected_fields();

        Ok(matching
            .into_iter()
            .skip(offset)
            .take(limit)
            .map(|record| match &projected {
                Some(fields) => record
                    .iter()
                    .filter(|(key, _)| fields.contains(&key.as_str()))
                    .map(|(key, value)| (key.clone(), value.clone()))
                    .collect(),
                None => record.clone(),
            })
            .collect())
    }

    async fn delete_record(&self, entity: &str, id: &str) -> AppResult<()> {
        self.require_entity(entity).await?;

        let mut records = self.records.write().await;
        let removed = records.get_mut(entity).and_then(|stored| {
            let position = stored
                .iter()
                .position(|record| record_id(record) == Some(id))?;
            Some(stored.remove(position))
        });
        if removed.is_none() {
            return Err(AppError::NotFound(format!(
                "record '{id}' of entity '{entity}' does not exist"
            )));
        }

        Ok(())
    }
}

/// Evaluates one filter node. An empty node matches every record.
fn matches_node(record: &RecordDocument, node: &Map<String, Value>) -> bool {
    node.iter().all(|(key, value)| match key.as_str() {
        "and" => children(value).all(|child| matches_node(record, child)),
        "or" => children(value).any(|child| matches_node(record, child)),
        field => value.as_object().is_some_and(|operators| {
            operators.iter().all(|(operator, operand)| {
                operand
                    .as_str()
                    .is_some_and(|operand| matches_operator(record.get(field), operator, operand))
            })
        }),
    })
}

fn children(value: &Value) -> impl Iterator<Item = &Map<String, Value>> {
    value
        .as_array()
        .into_iter()
        .flatten()
        .filter_map(Value::as_object)
}

fn matches_operator(value: Option<&Value>, operator: &str, operand: &str) -> bool {
    match operator {
        "eq" => value.and_then(text).as_deref() == Some(operand),
        "neq" => value.and_then(text).as_deref() != Some(operand),
        "gt" => compare_operand(value, operand).is_some_and(Ordering::is_gt),
        "gte" => compare_operand(value, operand).is_some_and(Ordering::is_ge),
        "lt" => compare_operand(value, operand).is_some_and(Ordering::is_lt),
        "lte" => compare_operand(value, operand).is_some_and(Ordering::is_le),
        "contains" => contains(value, operand),
        "not_contains" => !contains(value, operand),
        "any" => list_operand(operand).any(|item| contains_element(value, item)),
        "all" => list_operand(operand).all(|item| contains_element(value, item)),
        "none" => !list_operand(operand).any(|item| contains_element(value, item)),
        _ => false,
    }
}

fn text(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(text) => Some(text.clone()),
        other => Some(other.to_string()),
    }
}

fn compare_operand(value: Option<&Value>, operand: &str) -> Option<Ordering> {
    let value = value?;
    match (value.as_f64(), operand.parse::<f64>()) {
        (Some(number), Ok(operand)) => number.partial_cmp(&operand),
        _ => text(value).map(|text| text.as_str().cmp(operand)),
    }
}

fn compare_values(left: Option<&Value>, right: Option<&Value>) -> Ordering {
    match (left, right) {
        (Some(left), Some(right)) => match (left.as_f64(), right.as_f64()) {
            (Some(left), Some(right)) => left.total_cmp(&right),
            _ => text(left).cmp(&text(right)),
        },
        (None, Some(_)) => Ordering::Less,
        (Some(_), None) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

fn contains(value: Option<&Value>, operand: &str) -> bool {
    match value {
        Some(Value::String(text)) => text.contains(operand),
        Some(Value::Array(_)) => contains_element(value, operand),
        _ => false,
    }
}

fn contains_element(value: Option<&Value>, item: &str) -> bool {
    value
        .and_then(Value::as_array)
        .is_some_and(|items| items.iter().any(|element| text(element).as_deref() == Some(item)))
}

fn list_operand(operand: &str) -> impl Iterator<Item = &str> {
    operand
        .split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
}

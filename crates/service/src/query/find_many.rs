use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::ServiceError;

/// Filter, sort and pagination request against one entity collection.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FindMany {
    #[serde(default, rename = "where")]
    pub filter: Option<Where>,
    #[serde(default)]
    pub sort_by: Vec<SortBy>,
    #[serde(default)]
    pub skip: Option<u64>,
    #[serde(default)]
    pub take: Option<u64>,
}

impl FindMany {
    pub fn new() -> Self { Self::default() }

    pub fn filter(mut self, filter: Where) -> Self {
        self.filter = Some(filter);
        self
    }

    pub fn sort(mut self, field: &str, direction: SortDirection) -> Self {
        self.sort_by.push(SortBy { field: field.to_string(), direction });
        self
    }

    pub fn skip(mut self, skip: u64) -> Self {
        self.skip = Some(skip);
        self
    }

    pub fn take(mut self, take: u64) -> Self {
        self.take = Some(take);
        self
    }

    /// Build from the raw query-string parts used by the HTTP layer:
    /// `where` as JSON and `sortBy` as `field[:asc|desc]` terms separated by commas.
    pub fn from_query(
        filter: Option<&str>,
        sort_by: Option<&str>,
        skip: Option<u64>,
        take: Option<u64>,
    ) -> Result<Self, ServiceError> {
        let filter = match filter.map(str::trim) {
            Some(raw) if !raw.is_empty() => Some(Where::from_json(raw)?),
            _ => None,
        };
        let sort_by = match sort_by {
            Some(raw) => SortBy::parse_list(raw)?,
            None => Vec::new(),
        };
        Ok(Self { filter, sort_by, skip, take })
    }
}

/// Predicate tree over an entity's scalar fields and related collections.
///
/// JSON shape (externally tagged):
/// `{"and": [{"compare": {"field": "name", "op": {"contains": "W"}}}, {"some": {"relation": "todoItems"}}]}`
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Where {
    Compare { field: String, op: Comparison },
    And(Vec<Where>),
    Or(Vec<Where>),
    /// At least one related row matches the nested filter (or exists at all when absent).
    #[serde(rename = "some")]
    Exists {
        relation: String,
        #[serde(default, rename = "where", skip_serializing_if = "Option::is_none")]
        filter: Option<Box<Where>>,
    },
    /// No related row matches the nested filter.
    #[serde(rename = "none")]
    NotExists {
        relation: String,
        #[serde(default, rename = "where", skip_serializing_if = "Option::is_none")]
        filter: Option<Box<Where>>,
    },
}

impl Where {
    pub fn compare(field: &str, op: Comparison) -> Self {
        Where::Compare { field: field.to_string(), op }
    }

    pub fn exists(relation: &str, filter: Option<Where>) -> Self {
        Where::Exists { relation: relation.to_string(), filter: filter.map(Box::new) }
    }

    pub fn not_exists(relation: &str, filter: Option<Where>) -> Self {
        Where::NotExists { relation: relation.to_string(), filter: filter.map(Box::new) }
    }

    pub fn from_json(raw: &str) -> Result<Self, ServiceError> {
        serde_json::from_str(raw).map_err(|e| ServiceError::validation(format!("invalid where filter: {e}")))
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Comparison {
    Equals(FilterValue),
    Not(FilterValue),
    In(Vec<FilterValue>),
    NotIn(Vec<FilterValue>),
    Lt(FilterValue),
    Lte(FilterValue),
    Gt(FilterValue),
    Gte(FilterValue),
    Contains(String),
    StartsWith(String),
    EndsWith(String),
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FilterValue {
    Null,
    Bool(bool),
    Int(i64),
    Text(String),
}

impl From<i64> for FilterValue {
    fn from(v: i64) -> Self { FilterValue::Int(v) }
}

impl From<bool> for FilterValue {
    fn from(v: bool) -> Self { FilterValue::Bool(v) }
}

impl From<&str> for FilterValue {
    fn from(v: &str) -> Self { FilterValue::Text(v.to_string()) }
}

impl From<String> for FilterValue {
    fn from(v: String) -> Self { FilterValue::Text(v) }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortBy {
    pub field: String,
    #[serde(default)]
    pub direction: SortDirection,
}

impl SortBy {
    /// Parse `name:desc,id` into an ordered list; empty terms are ignored.
    pub fn parse_list(raw: &str) -> Result<Vec<SortBy>, ServiceError> {
        raw.split(',')
            .map(str::trim)
            .filter(|term| !term.is_empty())
            .map(SortBy::from_str)
            .collect()
    }
}

impl FromStr for SortBy {
    type Err = ServiceError;

    fn from_str(term: &str) -> Result<Self, Self::Err> {
        let (field, direction) = match term.split_once(':') {
            Some((field, dir)) => {
                let direction = match dir.trim().to_ascii_lowercase().as_str() {
                    "asc" => SortDirection::Asc,
                    "desc" => SortDirection::Desc,
                    other => return Err(ServiceError::validation(format!("invalid sort direction '{other}'"))),
                };
                (field.trim(), direction)
            }
            None => (term.trim(), SortDirection::Asc),
        };
        if field.is_empty() {
            return Err(ServiceError::validation(format!("invalid sort term '{term}'")));
        }
        Ok(SortBy { field: field.to_string(), direction })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_sort_terms() {
        let sort = SortBy::parse_list("name:desc, id").unwrap();
        assert_eq!(
            sort,
            vec![
                SortBy { field: "name".into(), direction: SortDirection::Desc },
                SortBy { field: "id".into(), direction: SortDirection::Asc },
            ]
        );
    }

    #[test]
    fn rejects_unknown_sort_direction() {
        assert!(matches!(SortBy::parse_list("name:sideways"), Err(ServiceError::Validation(_))));
        assert!(matches!(SortBy::parse_list(":desc"), Err(ServiceError::Validation(_))));
    }

    #[test]
    fn where_json_round_trips_through_tags() {
        let raw = r#"{"and":[{"compare":{"field":"name","op":{"startsWith":"W"}}},{"some":{"relation":"todoItems","where":{"compare":{"field":"isComplete","op":{"equals":true}}}}}]}"#;
        let parsed = Where::from_json(raw).unwrap();
        assert_eq!(
            parsed,
            Where::And(vec![
                Where::compare("name", Comparison::StartsWith("W".into())),
                Where::exists("todoItems", Some(Where::compare("isComplete", Comparison::Equals(true.into())))),
            ])
        );
    }

    #[test]
    fn filter_values_keep_their_json_kind() {
        let parsed = Where::from_json(r#"{"compare":{"field":"id","op":{"in":[1,"2",null,false]}}}"#).unwrap();
        assert_eq!(
            parsed,
            Where::compare(
                "id",
                Comparison::In(vec![
                    FilterValue::Int(1),
                    FilterValue::Text("2".into()),
                    FilterValue::Null,
                    FilterValue::Bool(false),
                ])
            )
        );
    }

    #[test]
    fn malformed_where_is_a_validation_error() {
        assert!(matches!(Where::from_json("{\"compare\":"), Err(ServiceError::Validation(_))));
        assert!(matches!(Where::from_json(r#"{"between":[1,2]}"#), Err(ServiceError::Validation(_))));
    }

    #[test]
    fn from_query_treats_blank_where_as_absent() {
        let spec = FindMany::from_query(Some("  "), Some("id:desc"), Some(5), None).unwrap();
        assert!(spec.filter.is_none());
        assert_eq!(spec.sort_by.len(), 1);
        assert_eq!(spec.skip, Some(5));
        assert_eq!(spec.take, None);
    }
}

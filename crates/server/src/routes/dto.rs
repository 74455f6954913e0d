use serde::{Deserialize, Serialize};
use service::query::FindMany;
use utoipa::{IntoParams, ToSchema};

use crate::errors::JsonApiError;

/// Query-string form of a FindMany request.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct FindManyQuery {
    /// JSON predicate, e.g. `{"compare":{"field":"name","op":{"contains":"W"}}}`
    #[serde(rename = "where")]
    pub filter: Option<String>,
    /// Comma separated `field[:asc|desc]` terms
    pub sort_by: Option<String>,
    pub skip: Option<u64>,
    pub take: Option<u64>,
}

impl FindManyQuery {
    pub fn into_find_many(self) -> Result<FindMany, JsonApiError> {
        FindMany::from_query(self.filter.as_deref(), self.sort_by.as_deref(), self.skip, self.take).map_err(JsonApiError::from)
    }
}

/// Element of a connect/disconnect body: `[{"id": 1}, {"id": 2}]`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, ToSchema)]
pub struct IdDto {
    pub id: i64,
}

pub fn ids(body: &[IdDto]) -> Vec<i64> {
    body.iter().map(|d| d.id).collect()
}

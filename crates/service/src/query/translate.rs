use sea_orm::sea_query::SelectStatement;
use sea_orm::{
    ColumnTrait, Condition, EntityTrait, Order, QueryFilter, QueryOrder, QuerySelect, Select, Value,
};

use super::find_many::{Comparison, FilterValue, FindMany, SortDirection, Where};
use crate::errors::ServiceError;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FieldKind {
    Integer,
    Text,
    Boolean,
}

/// A filterable/sortable scalar: the column it maps to and the value kind it accepts.
#[derive(Clone, Copy, Debug)]
pub struct Field<C> {
    pub column: C,
    pub kind: FieldKind,
}

impl<C> Field<C> {
    pub fn new(column: C, kind: FieldKind) -> Self { Self { column, kind } }
}

/// Entities that can be queried through a [`FindMany`].
///
/// Field and relation names are the camelCase names used on the wire.
pub trait Filterable: EntityTrait {
    /// Identity column; also the final tie-breaker of every ordering.
    fn key() -> Self::Column;

    fn field(name: &str) -> Option<Field<Self::Column>>;

    /// Subquery selecting the keys of rows having a related row in `relation` that
    /// matches `filter`. `Ok(None)` means the relation name is unknown.
    fn relation_scope(relation: &str, filter: Option<&Where>) -> Result<Option<SelectStatement>, ServiceError> {
        let _ = (relation, filter);
        Ok(None)
    }
}

/// Row limit standing in for "no limit" when only `skip` is given.
const UNBOUNDED: u64 = i64::MAX as u64;

/// Translate a FindMany specification into a select; no I/O happens here.
pub fn translate<E: Filterable>(spec: &FindMany) -> Result<Select<E>, ServiceError> {
    let mut select = E::find();
    if let Some(filter) = &spec.filter {
        select = select.filter(condition::<E>(filter)?);
    }
    for sort in &spec.sort_by {
        let field = lookup::<E>(&sort.field)?;
        let order = match sort.direction {
            SortDirection::Asc => Order::Asc,
            SortDirection::Desc => Order::Desc,
        };
        select = select.order_by(field.column, order);
    }
    // identity breaks ties so consecutive pages neither overlap nor skip rows
    select = select.order_by_asc(E::key());
    if let Some(skip) = spec.skip {
        select = select.offset(skip);
    }
    // SQLite only accepts OFFSET after a LIMIT
    if let Some(take) = spec.take.or(spec.skip.map(|_| UNBOUNDED)) {
        select = select.limit(take);
    }
    Ok(select)
}

/// Translate a predicate tree into a condition over `E`'s columns.
pub fn condition<E: Filterable>(filter: &Where) -> Result<Condition, ServiceError> {
    let cond = match filter {
        Where::Compare { field, op } => Condition::all().add(compare(lookup::<E>(field)?, field, op)?),
        Where::And(items) => items
            .iter()
            .try_fold(Condition::all(), |acc, w| condition::<E>(w).map(|c| acc.add(c)))?,
        Where::Or(items) => items
            .iter()
            .try_fold(Condition::any(), |acc, w| condition::<E>(w).map(|c| acc.add(c)))?,
        Where::Exists { relation, filter } => {
            Condition::all().add(E::key().in_subquery(scope::<E>(relation, filter.as_deref())?))
        }
        Where::NotExists { relation, filter } => {
            Condition::all().add(E::key().not_in_subquery(scope::<E>(relation, filter.as_deref())?))
        }
    };
    Ok(cond)
}

fn lookup<E: Filterable>(name: &str) -> Result<Field<E::Column>, ServiceError> {
    E::field(name).ok_or_else(|| ServiceError::validation(format!("unknown field '{name}'")))
}

fn scope<E: Filterable>(relation: &str, filter: Option<&Where>) -> Result<SelectStatement, ServiceError> {
    E::relation_scope(relation, filter)?
        .ok_or_else(|| ServiceError::validation(format!("unknown relation '{relation}'")))
}

fn compare<C: ColumnTrait>(field: Field<C>, name: &str, op: &Comparison) -> Result<sea_orm::sea_query::SimpleExpr, ServiceError> {
    let col = field.column;
    let kind = field.kind;
    let expr = match op {
        Comparison::Equals(FilterValue::Null) => col.is_null(),
        Comparison::Equals(v) => col.eq(value(kind, name, v)?),
        Comparison::Not(FilterValue::Null) => col.is_not_null(),
        Comparison::Not(v) => col.ne(value(kind, name, v)?),
        Comparison::In(vs) => col.is_in(values(kind, name, vs)?),
        Comparison::NotIn(vs) => col.is_not_in(values(kind, name, vs)?),
        Comparison::Lt(v) => col.lt(ordered(kind, name, v)?),
        Comparison::Lte(v) => col.lte(ordered(kind, name, v)?),
        Comparison::Gt(v) => col.gt(ordered(kind, name, v)?),
        Comparison::Gte(v) => col.gte(ordered(kind, name, v)?),
        Comparison::Contains(s) => {
            require_text(kind, name)?;
            col.contains(s)
        }
        Comparison::StartsWith(s) => {
            require_text(kind, name)?;
            col.starts_with(s)
        }
        Comparison::EndsWith(s) => {
            require_text(kind, name)?;
            col.ends_with(s)
        }
    };
    Ok(expr)
}

fn value(kind: FieldKind, name: &str, v: &FilterValue) -> Result<Value, ServiceError> {
    match (kind, v) {
        (FieldKind::Integer, FilterValue::Int(i)) => Ok((*i).into()),
        (FieldKind::Text, FilterValue::Text(s)) => Ok(s.clone().into()),
        (FieldKind::Boolean, FilterValue::Bool(b)) => Ok((*b).into()),
        _ => Err(ServiceError::validation(format!("value {v:?} does not match {kind:?} field '{name}'"))),
    }
}

fn values(kind: FieldKind, name: &str, vs: &[FilterValue]) -> Result<Vec<Value>, ServiceError> {
    vs.iter().map(|v| value(kind, name, v)).collect()
}

fn ordered(kind: FieldKind, name: &str, v: &FilterValue) -> Result<Value, ServiceError> {
    if kind == FieldKind::Boolean {
        return Err(ServiceError::validation(format!("field '{name}' does not support ordering comparisons")));
    }
    value(kind, name, v)
}

fn require_text(kind: FieldKind, name: &str) -> Result<(), ServiceError> {
    if kind != FieldKind::Text {
        return Err(ServiceError::validation(format!("field '{name}' does not support text matching")));
    }
    Ok(())
}

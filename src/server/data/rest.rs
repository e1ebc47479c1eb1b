//! Generic list, lookup and delete operations shared by every REST resource.
//!
//! An entity opts in by implementing `RestEntity`. Raw `Criteria` from the query string
//! are resolved against the entity's columns into a `ResolvedCriteria`, which the
//! `RestRepository` turns into SeaORM queries.

use chrono::{DateTime, NaiveDate, Utc};
use sea_orm::{
    ColumnTrait, ColumnType, Condition, DatabaseConnection, DbErr, EntityTrait, IdenStatic,
    Iterable, Order, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, TryGetableMany, Value,
};
use serde_json::Value as JsonValue;
use std::marker::PhantomData;
use uuid::Uuid;

use crate::server::{
    error::criteria::CriteriaError,
    model::criteria::{Criteria, Filter, FilterValue, Search, SortDirection},
};

/// An entity exposed through the generic REST operations.
pub trait RestEntity: EntityTrait {
    /// Primary key column, used by `ids`, `find_by_id` and `delete_by_id`.
    fn id_column() -> Self::Column;

    /// Columns matched by `search` terms with `LIKE %term%`.
    fn search_columns() -> Vec<Self::Column>;

    /// Ordering used when the request gives none.
    fn default_order() -> Vec<(Self::Column, Order)> {
        vec![(Self::id_column(), Order::Asc)]
    }

    /// Columns that can never be filtered or sorted on.
    fn hidden_columns() -> Vec<Self::Column> {
        Vec::new()
    }
}

/// Criteria checked against the columns of `E`.
pub struct ResolvedCriteria<E: RestEntity> {
    condition: Condition,
    order: Vec<(E::Column, Order)>,
    limit: Option<u64>,
    offset: Option<u64>,
}

impl<E: RestEntity> ResolvedCriteria<E> {
    /// Resolves column names and converts filter values to the column types.
    ///
    /// # Arguments
    /// - `criteria` - Criteria parsed from the query string
    ///
    /// # Returns
    /// - `Ok(ResolvedCriteria)` - Criteria ready for querying
    /// - `Err(CriteriaError::UnknownColumn)` - Column does not exist or is hidden
    /// - `Err(CriteriaError::InvalidValue)` - Value does not fit the column type
    pub fn resolve(criteria: &Criteria) -> Result<Self, CriteriaError> {
        let mut condition = Condition::all();

        for filter in &criteria.filters {
            condition = condition.add(Self::filter_condition(filter)?);
        }

        if !criteria.search.is_empty() {
            condition = condition.add(Self::search_condition(&criteria.search));
        }

        let order = if criteria.order.is_empty() {
            E::default_order()
        } else {
            criteria
                .order
                .iter()
                .map(|order| {
                    let direction = match order.direction {
                        SortDirection::Asc => Order::Asc,
                        SortDirection::Desc => Order::Desc,
                    };
                    Ok((Self::column(&order.column)?, direction))
                })
                .collect::<Result<Vec<_>, CriteriaError>>()?
        };

        Ok(Self {
            condition,
            order,
            limit: criteria.limit,
            offset: criteria.offset,
        })
    }

    fn column(name: &str) -> Result<E::Column, CriteriaError> {
        let hidden = E::hidden_columns();

        E::Column::iter()
            .find(|column| column.as_str() == name)
            .filter(|column| !hidden.iter().any(|h| h.as_str() == column.as_str()))
            .ok_or_else(|| CriteriaError::UnknownColumn(name.to_string()))
    }

    fn filter_condition(filter: &Filter) -> Result<Condition, CriteriaError> {
        let column = Self::column(&filter.column)?;

        let expr = match &filter.value {
            FilterValue::Null => column.is_null(),
            FilterValue::Eq(value) => column.eq(json_to_value(&column, &filter.column, value)?),
            FilterValue::In(values) => column.is_in(
                values
                    .iter()
                    .map(|value| json_to_value(&column, &filter.column, value))
                    .collect::<Result<Vec<_>, _>>()?,
            ),
        };

        Ok(Condition::all().add(expr))
    }

    fn search_condition(search: &Search) -> Condition {
        let columns = E::search_columns();

        let term_matches = |term: &str| {
            columns
                .iter()
                .fold(Condition::any(), |condition, column| {
                    condition.add(column.contains(term))
                })
        };

        let mut condition = Condition::all();

        for term in &search.and {
            condition = condition.add(term_matches(term));
        }

        if !search.or.is_empty() {
            condition = condition.add(
                search
                    .or
                    .iter()
                    .fold(Condition::any(), |any, term| any.add(term_matches(term))),
            );
        }

        condition
    }
}

/// Converts a JSON filter value into a database value of the column's type.
fn json_to_value<C: ColumnTrait>(
    column: &C,
    name: &str,
    value: &JsonValue,
) -> Result<Value, CriteriaError> {
    let invalid = |reason: &str| CriteriaError::InvalidValue {
        column: name.to_string(),
        reason: reason.to_string(),
    };

    let text = match value {
        JsonValue::String(text) => Some(text.clone()),
        JsonValue::Number(number) => Some(number.to_string()),
        JsonValue::Bool(flag) => Some(flag.to_string()),
        _ => None,
    };

    match column.def().get_column_type() {
        ColumnType::Uuid => text
            .and_then(|text| Uuid::parse_str(&text).ok())
            .map(Value::from)
            .ok_or_else(|| invalid("expected a UUID")),
        ColumnType::TinyInteger
        | ColumnType::SmallInteger
        | ColumnType::Integer
        | ColumnType::BigInteger
        | ColumnType::TinyUnsigned
        | ColumnType::SmallUnsigned
        | ColumnType::Unsigned
        | ColumnType::BigUnsigned => text
            .and_then(|text| text.parse::<i64>().ok())
            .map(Value::from)
            .ok_or_else(|| invalid("expected an integer")),
        ColumnType::Boolean => match value {
            JsonValue::Bool(flag) => Ok(Value::from(*flag)),
            JsonValue::Number(number) if number.as_i64() == Some(0) => Ok(Value::from(false)),
            JsonValue::Number(number) if number.as_i64() == Some(1) => Ok(Value::from(true)),
            _ => Err(invalid("expected a boolean")),
        },
        ColumnType::Date => text
            .and_then(|text| NaiveDate::parse_from_str(&text, "%Y-%m-%d").ok())
            .map(Value::from)
            .ok_or_else(|| invalid("expected a date (YYYY-MM-DD)")),
        ColumnType::DateTime | ColumnType::Timestamp | ColumnType::TimestampWithTimeZone => text
            .and_then(|text| text.parse::<DateTime<Utc>>().ok())
            .map(Value::from)
            .ok_or_else(|| invalid("expected an RFC 3339 timestamp")),
        _ => text
            .map(Value::from)
            .ok_or_else(|| invalid("expected a scalar value")),
    }
}

/// Generic repository for the list, lookup and delete operations of a REST resource.
pub struct RestRepository<'a, E> {
    db: &'a DatabaseConnection,
    _entity: PhantomData<E>,
}

impl<'a, E> RestRepository<'a, E>
where
    E: RestEntity,
    E::Model: Sync,
{
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self {
            db,
            _entity: PhantomData,
        }
    }

    /// Rows matching the criteria, ordered and paged.
    pub async fn find(&self, criteria: &ResolvedCriteria<E>) -> Result<Vec<E::Model>, DbErr> {
        let mut query = E::find().filter(criteria.condition.clone());

        for (column, order) in &criteria.order {
            query = query.order_by(*column, order.clone());
        }

        if let Some(limit) = criteria.limit {
            query = query.limit(limit);
        }

        if let Some(offset) = criteria.offset {
            query = query.offset(offset);
        }

        query.all(self.db).await
    }

    /// Number of rows matching the criteria; ordering and paging are ignored.
    pub async fn count(&self, criteria: &ResolvedCriteria<E>) -> Result<u64, DbErr> {
        E::find()
            .filter(criteria.condition.clone())
            .count(self.db)
            .await
    }

    /// Primary keys of rows matching the criteria; ordering and paging are ignored.
    ///
    /// # Type Parameters
    /// - `V` - Primary key type, e.g. `Uuid` or `String`
    pub async fn ids<V>(&self, criteria: &ResolvedCriteria<E>) -> Result<Vec<V>, DbErr>
    where
        V: TryGetableMany,
    {
        E::find()
            .select_only()
            .column(E::id_column())
            .filter(criteria.condition.clone())
            .order_by(E::id_column(), Order::Asc)
            .into_tuple::<V>()
            .all(self.db)
            .await
    }

    pub async fn find_by_id<K>(&self, id: K) -> Result<Option<E::Model>, DbErr>
    where
        K: Into<Value>,
    {
        E::find()
            .filter(E::id_column().eq(id))
            .one(self.db)
            .await
    }

    /// Deletes a row by primary key.
    ///
    /// # Returns
    /// - `Ok(Some(model))` - The row as it was before deletion
    /// - `Ok(None)` - No row with that key
    /// - `Err(DbErr)` - Database error
    pub async fn delete_by_id<K>(&self, id: K) -> Result<Option<E::Model>, DbErr>
    where
        K: Into<Value> + Clone,
    {
        let Some(model) = self.find_by_id(id.clone()).await? else {
            return Ok(None);
        };

        E::delete_many()
            .filter(E::id_column().eq(id))
            .exec(self.db)
            .await?;

        Ok(Some(model))
    }
}

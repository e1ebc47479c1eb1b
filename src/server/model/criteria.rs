//! List query criteria shared by every REST resource.
//!
//! Parsed from the raw query string of `find`, `count` and `ids` requests:
//!
//! - `where={"field": value}` equality, `{"field": [a, b]}` IN, `{"field": null}` IS NULL
//! - `order=name,-created_at` or `order[name]=DESC`
//! - `limit=10&offset=20`
//! - `search=foo bar` or `search={"and": ["foo"], "or": ["bar", "baz"]}`
//!
//! Column names are only checked against the entity later, in the repository layer.

use serde_json::Value as JsonValue;

use crate::server::error::criteria::CriteriaError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Asc,
    Desc,
}

#[derive(Debug, Clone, PartialEq)]
pub enum FilterValue {
    Null,
    Eq(JsonValue),
    In(Vec<JsonValue>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Filter {
    pub column: String,
    pub value: FilterValue,
}

#[derive(Debug, Clone, PartialEq)]
pub struct OrderBy {
    pub column: String,
    pub direction: SortDirection,
}

/// Free text search terms.
///
/// Every `and` term must match at least one search column; when `or` is non-empty at
/// least one of its terms must match.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Search {
    pub and: Vec<String>,
    pub or: Vec<String>,
}

impl Search {
    pub fn is_empty(&self) -> bool {
        self.and.is_empty() && self.or.is_empty()
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Criteria {
    pub filters: Vec<Filter>,
    pub order: Vec<OrderBy>,
    pub limit: Option<u64>,
    pub offset: Option<u64>,
    pub search: Search,
}

impl Criteria {
    /// Parses criteria from raw query pairs. Unrelated parameters are ignored.
    ///
    /// # Arguments
    /// - `pairs` - Decoded query string pairs in request order
    ///
    /// # Returns
    /// - `Ok(Criteria)` - Parsed criteria
    /// - `Err(CriteriaError)` - Malformed `where`, `order`, `limit`, `offset` or `search`
    pub fn from_query(pairs: &[(String, String)]) -> Result<Self, CriteriaError> {
        let mut criteria = Criteria::default();

        for (key, value) in pairs {
            match key.as_str() {
                "where" => criteria.filters.extend(parse_where(value)?),
                "order" => criteria.order.extend(parse_order(value)?),
                "limit" => criteria.limit = Some(parse_unsigned(value, CriteriaError::InvalidLimit)?),
                "offset" => {
                    criteria.offset = Some(parse_unsigned(value, CriteriaError::InvalidOffset)?)
                }
                "search" => {
                    let search = parse_search(value)?;
                    criteria.search.and.extend(search.and);
                    criteria.search.or.extend(search.or);
                }
                _ => {
                    if let Some(column) = key
                        .strip_prefix("order[")
                        .and_then(|rest| rest.strip_suffix(']'))
                    {
                        criteria.order.push(OrderBy {
                            column: column.to_string(),
                            direction: parse_direction(value)?,
                        });
                    }
                }
            }
        }

        Ok(criteria)
    }
}

fn parse_where(value: &str) -> Result<Vec<Filter>, CriteriaError> {
    if value.trim().is_empty() {
        return Ok(Vec::new());
    }

    let parsed: JsonValue =
        serde_json::from_str(value).map_err(|e| CriteriaError::InvalidWhere(e.to_string()))?;

    let JsonValue::Object(map) = parsed else {
        return Err(CriteriaError::InvalidWhere(
            "expected a JSON object".to_string(),
        ));
    };

    map.into_iter()
        .map(|(column, value)| {
            let value = match value {
                JsonValue::Null => FilterValue::Null,
                JsonValue::Array(items) => FilterValue::In(items),
                JsonValue::Object(_) => {
                    return Err(CriteriaError::InvalidWhere(format!(
                        "nested object given for '{}'",
                        column
                    )))
                }
                other => FilterValue::Eq(other),
            };
            Ok(Filter { column, value })
        })
        .collect()
}

fn parse_order(value: &str) -> Result<Vec<OrderBy>, CriteriaError> {
    value
        .split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(|part| {
            let (column, direction) = match part.strip_prefix('-') {
                Some(column) => (column, SortDirection::Desc),
                None => (part, SortDirection::Asc),
            };

            if column.is_empty() {
                return Err(CriteriaError::InvalidOrder(part.to_string()));
            }

            Ok(OrderBy {
                column: column.to_string(),
                direction,
            })
        })
        .collect()
}

fn parse_direction(value: &str) -> Result<SortDirection, CriteriaError> {
    match value.to_ascii_uppercase().as_str() {
        "ASC" => Ok(SortDirection::Asc),
        "DESC" => Ok(SortDirection::Desc),
        _ => Err(CriteriaError::InvalidOrder(format!(
            "direction must be ASC or DESC, got '{}'",
            value
        ))),
    }
}

fn parse_unsigned(
    value: &str,
    error: fn(String) -> CriteriaError,
) -> Result<u64, CriteriaError> {
    value.trim().parse::<u64>().map_err(|_| error(value.to_string()))
}

fn parse_search(value: &str) -> Result<Search, CriteriaError> {
    let trimmed = value.trim();

    if !trimmed.starts_with('{') {
        return Ok(Search {
            and: Vec::new(),
            or: split_terms(trimmed),
        });
    }

    let parsed: JsonValue =
        serde_json::from_str(trimmed).map_err(|e| CriteriaError::InvalidSearch(e.to_string()))?;

    let JsonValue::Object(map) = parsed else {
        return Err(CriteriaError::InvalidSearch(
            "expected a JSON object".to_string(),
        ));
    };

    let mut search = Search::default();

    for (key, terms) in map {
        let terms = search_terms(&key, terms)?;
        match key.as_str() {
            "and" => search.and = terms,
            "or" => search.or = terms,
            _ => {
                return Err(CriteriaError::InvalidSearch(format!(
                    "unknown operand '{}', expected 'and' or 'or'",
                    key
                )))
            }
        }
    }

    Ok(search)
}

/// Terms of a JSON search operand: a string of words or an array of strings.
fn search_terms(key: &str, value: JsonValue) -> Result<Vec<String>, CriteriaError> {
    match value {
        JsonValue::String(words) => Ok(split_terms(&words)),
        JsonValue::Array(items) => {
            let mut terms = Vec::new();
            for item in items {
                match item {
                    JsonValue::String(words) => terms.extend(split_terms(&words)),
                    JsonValue::Number(number) => terms.push(number.to_string()),
                    _ => {
                        return Err(CriteriaError::InvalidSearch(format!(
                            "'{}' must only contain strings",
                            key
                        )))
                    }
                }
            }
            Ok(terms)
        }
        _ => Err(CriteriaError::InvalidSearch(format!(
            "'{}' must be a string or an array of strings",
            key
        ))),
    }
}

fn split_terms(words: &str) -> Vec<String> {
    words.split_whitespace().map(str::to_string).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn pairs(items: &[(&str, &str)]) -> Vec<(String, String)> {
        items
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn parses_where_operators() {
        let criteria = Criteria::from_query(&pairs(&[(
            "where",
            r#"{"username": "john", "role": ["ROLE_USER", "ROLE_ADMIN"], "locale": null}"#,
        )]))
        .unwrap();

        assert_eq!(criteria.filters.len(), 3);
        assert!(criteria.filters.contains(&Filter {
            column: "username".to_string(),
            value: FilterValue::Eq(json!("john")),
        }));
        assert!(criteria.filters.contains(&Filter {
            column: "role".to_string(),
            value: FilterValue::In(vec![json!("ROLE_USER"), json!("ROLE_ADMIN")]),
        }));
        assert!(criteria.filters.contains(&Filter {
            column: "locale".to_string(),
            value: FilterValue::Null,
        }));
    }

    #[test]
    fn rejects_malformed_where() {
        let result = Criteria::from_query(&pairs(&[("where", "{not json")]));
        assert!(matches!(result, Err(CriteriaError::InvalidWhere(_))));

        let result = Criteria::from_query(&pairs(&[("where", "[1, 2]")]));
        assert!(matches!(result, Err(CriteriaError::InvalidWhere(_))));
    }

    #[test]
    fn parses_both_order_styles() {
        let criteria = Criteria::from_query(&pairs(&[
            ("order", "last_name,-created_at"),
            ("order[username]", "desc"),
        ]))
        .unwrap();

        assert_eq!(
            criteria.order,
            vec![
                OrderBy {
                    column: "last_name".to_string(),
                    direction: SortDirection::Asc
                },
                OrderBy {
                    column: "created_at".to_string(),
                    direction: SortDirection::Desc
                },
                OrderBy {
                    column: "username".to_string(),
                    direction: SortDirection::Desc
                },
            ]
        );
    }

    #[test]
    fn rejects_bad_order_direction() {
        let result = Criteria::from_query(&pairs(&[("order[username]", "sideways")]));
        assert!(matches!(result, Err(CriteriaError::InvalidOrder(_))));
    }

    #[test]
    fn rejects_negative_and_non_numeric_paging() {
        assert_eq!(
            Criteria::from_query(&pairs(&[("limit", "-1")])),
            Err(CriteriaError::InvalidLimit("-1".to_string()))
        );
        assert_eq!(
            Criteria::from_query(&pairs(&[("offset", "abc")])),
            Err(CriteriaError::InvalidOffset("abc".to_string()))
        );

        let criteria = Criteria::from_query(&pairs(&[("limit", "5"), ("offset", "10")])).unwrap();
        assert_eq!(criteria.limit, Some(5));
        assert_eq!(criteria.offset, Some(10));
    }

    #[test]
    fn plain_search_words_are_or_terms() {
        let criteria = Criteria::from_query(&pairs(&[("search", "john  doe")])).unwrap();

        assert!(criteria.search.and.is_empty());
        assert_eq!(criteria.search.or, vec!["john", "doe"]);
    }

    #[test]
    fn json_search_splits_and_or() {
        let criteria = Criteria::from_query(&pairs(&[(
            "search",
            r#"{"and": ["john", "doe"], "or": "admin root"}"#,
        )]))
        .unwrap();

        assert_eq!(criteria.search.and, vec!["john", "doe"]);
        assert_eq!(criteria.search.or, vec!["admin", "root"]);
    }

    #[test]
    fn json_search_rejects_unknown_operand() {
        let result = Criteria::from_query(&pairs(&[("search", r#"{"xor": ["a"]}"#)]));
        assert!(matches!(result, Err(CriteriaError::InvalidSearch(_))));
    }

    #[test]
    fn ignores_unrelated_parameters() {
        let criteria = Criteria::from_query(&pairs(&[("page", "2")])).unwrap();
        assert_eq!(criteria, Criteria::default());
    }
}

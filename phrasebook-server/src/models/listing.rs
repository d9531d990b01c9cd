//! Phrase listing filters - language, category, and result limit

use serde::Deserialize;

use super::ValidationError;

/// Maximum phrases returned by a single listing
const MAX_LIMIT: i64 = 500;

/// Default phrases returned when no limit is given
pub const DEFAULT_LIMIT: i64 = 50;

/// Query parameters for `GET /api/phrases`
///
/// `limit` is kept as text so a non-integer produces a validation error
/// in the same shape as every other 400.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListParams {
    pub language: Option<String>,
    pub category: Option<String>,
    pub limit: Option<String>,
}

/// Validated listing filter
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhraseFilter {
    /// Only phrases with this `language_code`
    pub language: Option<String>,
    /// Only phrases whose category has this name, or this ID when numeric
    pub category: Option<String>,
    /// Row limit (0..=500)
    pub limit: i64,
}

impl PhraseFilter {
    /// Build a filter; blank filters are treated as absent.
    ///
    /// The limit is used as given: `0` yields an empty listing, while a
    /// negative value or one above 500 is rejected.
    pub fn new(
        language: Option<String>,
        category: Option<String>,
        limit: Option<i64>,
    ) -> Result<Self, ValidationError> {
        let limit = match limit {
            None => DEFAULT_LIMIT,
            Some(n) if n < 0 => {
                return Err(ValidationError::InvalidFormat {
                    field: "limit",
                    reason: "must not be negative",
                })
            }
            Some(n) if n > MAX_LIMIT => {
                return Err(ValidationError::InvalidFormat {
                    field: "limit",
                    reason: "must be at most 500",
                })
            }
            Some(n) => n,
        };

        Ok(Self {
            language: non_blank(language),
            category: non_blank(category),
            limit,
        })
    }
}

impl Default for PhraseFilter {
    fn default() -> Self {
        Self {
            language: None,
            category: None,
            limit: DEFAULT_LIMIT,
        }
    }
}

impl TryFrom<ListParams> for PhraseFilter {
    type Error = ValidationError;

    fn try_from(params: ListParams) -> Result<Self, Self::Error> {
        let limit = match params.limit.as_deref().map(str::trim) {
            None | Some("") => None,
            Some(raw) => Some(raw.parse::<i64>().map_err(|_| {
                ValidationError::InvalidFormat {
                    field: "limit",
                    reason: "must be an integer",
                }
            })?),
        };

        Self::new(params.language, params.category, limit)
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_owned())
        .filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(language: Option<&str>, category: Option<&str>, limit: Option<&str>) -> ListParams {
        ListParams {
            language: language.map(str::to_owned),
            category: category.map(str::to_owned),
            limit: limit.map(str::to_owned),
        }
    }

    #[test]
    fn defaults_to_fifty() {
        let f = PhraseFilter::try_from(ListParams::default()).unwrap();
        assert_eq!(f.limit, 50);
        assert_eq!(f.language, None);
        assert_eq!(f.category, None);
    }

    #[test]
    fn limit_is_taken_as_requested() {
        let f = PhraseFilter::try_from(params(None, None, Some("0"))).unwrap();
        assert_eq!(f.limit, 0);

        let f = PhraseFilter::try_from(params(None, None, Some("500"))).unwrap();
        assert_eq!(f.limit, 500);
    }

    #[test]
    fn out_of_range_limit_is_rejected() {
        for raw in ["-7", "-1", "501", "100000"] {
            let err = PhraseFilter::try_from(params(None, None, Some(raw))).unwrap_err();
            assert!(
                matches!(err, ValidationError::InvalidFormat { field: "limit", .. }),
                "limit {}",
                raw
            );
        }
    }

    #[test]
    fn rejects_non_integer_limit() {
        let err = PhraseFilter::try_from(params(None, None, Some("ten"))).unwrap_err();
        assert!(matches!(err, ValidationError::InvalidFormat { field: "limit", .. }));
    }

    #[test]
    fn blank_filters_are_ignored() {
        let f = PhraseFilter::try_from(params(Some(""), Some("  "), Some(""))).unwrap();
        assert_eq!(f, PhraseFilter::default());
    }

    #[test]
    fn keeps_filters() {
        let f = PhraseFilter::try_from(params(Some("es"), Some("Mom"), Some("1"))).unwrap();
        assert_eq!(f.language.as_deref(), Some("es"));
        assert_eq!(f.category.as_deref(), Some("Mom"));
        assert_eq!(f.limit, 1);
    }
}

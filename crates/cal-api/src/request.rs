//! Request payloads and their validation
//!
//! Fields may repeat in a query string or form; the first occurrence wins.

use std::collections::BTreeMap;

use axum::{
    extract::{FromRequest, Multipart, Query, Request},
    http::header,
    Form, Json,
};
use cal_core::event::{parse_date, validate_name, MAX_NAME_LEN};
use cal_core::NewEvent;
use chrono::NaiveDate;
use serde::Deserialize;

use crate::error::ApiError;

pub const DATE_REQUIRED: &str =
    "The event date with the correct format is required! The correct format is YYYY-MM-DD!";
pub const NAME_REQUIRED: &str = "The event name is required!";
pub const NAME_TOO_LONG: &str = "The event name must be at most 80 characters!";

/// Decoded `key=value` pairs in request order
pub type FieldPairs = Vec<(String, String)>;

fn first_value(pairs: &[(String, String)], key: &str) -> Option<String> {
    pairs
        .iter()
        .find(|(name, _)| name == key)
        .map(|(_, value)| value.clone())
}

/// Raw fields of a create request, before validation
#[derive(Debug, Default, Deserialize)]
pub struct CreateEventBody {
    pub date: Option<String>,
    pub event: Option<String>,
}

impl CreateEventBody {
    pub fn from_pairs(pairs: &[(String, String)]) -> Self {
        Self {
            date: first_value(pairs, "date"),
            event: first_value(pairs, "event"),
        }
    }

    /// Take each field from `self`, falling back to `other` where missing
    pub fn or(self, other: Self) -> Self {
        Self {
            date: self.date.or(other.date),
            event: self.event.or(other.event),
        }
    }

    /// Validate every field, reporting all failures at once
    pub fn validate(self) -> Result<NewEvent, ApiError> {
        let mut errors = BTreeMap::new();

        let date = self.date.as_deref().and_then(parse_date);
        if date.is_none() {
            errors.insert("date", DATE_REQUIRED.to_string());
        }

        let name = self.event.unwrap_or_default();
        if validate_name(&name).is_err() {
            let reason = if name.chars().count() > MAX_NAME_LEN {
                NAME_TOO_LONG
            } else {
                NAME_REQUIRED
            };
            errors.insert("event", reason.to_string());
        }

        match date {
            Some(date) if errors.is_empty() => Ok(NewEvent::new(name, date)?),
            _ => Err(ApiError::Validation(errors)),
        }
    }
}

/// Create payload read from the request body, with the query string as fallback
///
/// The body may be JSON, an urlencoded form or a multipart form. Fields the
/// body does not carry are looked up in the query string.
#[derive(Debug)]
pub struct EventForm(pub CreateEventBody);

impl<S> FromRequest<S> for EventForm
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Query(query) = Query::<FieldPairs>::try_from_uri(req.uri())
            .map_err(|rejection| ApiError::BadRequest(rejection.body_text()))?;
        let from_query = CreateEventBody::from_pairs(&query);

        let content_type = req
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .unwrap_or_default()
            .to_ascii_lowercase();

        let from_body = if content_type.starts_with("application/json") {
            let Json(body) = Json::<CreateEventBody>::from_request(req, state)
                .await
                .map_err(|rejection| ApiError::BadRequest(rejection.body_text()))?;
            body
        } else if content_type.starts_with("application/x-www-form-urlencoded") {
            let Form(pairs) = Form::<FieldPairs>::from_request(req, state)
                .await
                .map_err(|rejection| ApiError::BadRequest(rejection.body_text()))?;
            CreateEventBody::from_pairs(&pairs)
        } else if content_type.starts_with("multipart/form-data") {
            let multipart = Multipart::from_request(req, state)
                .await
                .map_err(|rejection| ApiError::BadRequest(rejection.body_text()))?;
            CreateEventBody::from_pairs(&multipart_fields(multipart).await?)
        } else {
            // No recognised body
            CreateEventBody::default()
        };

        Ok(Self(from_body.or(from_query)))
    }
}

async fn multipart_fields(mut multipart: Multipart) -> Result<FieldPairs, ApiError> {
    let mut pairs = FieldPairs::new();
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::BadRequest(e.body_text()))?
    {
        let Some(name) = field.name().map(str::to_string) else {
            continue;
        };
        let value = field
            .text()
            .await
            .map_err(|e| ApiError::BadRequest(e.body_text()))?;
        pairs.push((name, value));
    }
    Ok(pairs)
}

/// Query parameters of the list endpoint
#[derive(Debug, Default)]
pub struct RangeParams {
    pub start_time: Option<String>,
    pub end_time: Option<String>,
}

impl RangeParams {
    pub fn from_pairs(pairs: &[(String, String)]) -> Self {
        Self {
            start_time: first_value(pairs, "start_time"),
            end_time: first_value(pairs, "end_time"),
        }
    }

    /// Parse whichever bounds were supplied; blank values count as absent
    pub fn bounds(&self) -> Result<(Option<NaiveDate>, Option<NaiveDate>), ApiError> {
        Ok((
            parse_bound("start_time", self.start_time.as_deref())?,
            parse_bound("end_time", self.end_time.as_deref())?,
        ))
    }
}

fn parse_bound(field: &'static str, value: Option<&str>) -> Result<Option<NaiveDate>, ApiError> {
    match value.map(str::trim) {
        None | Some("") => Ok(None),
        Some(value) => parse_date(value).map(Some).ok_or_else(|| {
            ApiError::invalid_field(
                field,
                format!("'{}' is not a valid date! The correct format is YYYY-MM-DD!", value),
            )
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn body(date: Option<&str>, event: Option<&str>) -> CreateEventBody {
        CreateEventBody {
            date: date.map(String::from),
            event: event.map(String::from),
        }
    }

    fn field_errors(result: Result<NewEvent, ApiError>) -> BTreeMap<&'static str, String> {
        match result {
            Err(ApiError::Validation(fields)) => fields,
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn test_valid_body() {
        let event = body(Some("2024-03-05"), Some("Meeting")).validate().unwrap();
        assert_eq!(event.name(), "Meeting");
        assert_eq!(event.date(), NaiveDate::from_ymd_opt(2024, 3, 5).unwrap());
    }

    #[test]
    fn test_missing_fields_are_all_reported() {
        let errors = field_errors(body(None, None).validate());
        assert_eq!(errors["date"], DATE_REQUIRED);
        assert_eq!(errors["event"], NAME_REQUIRED);
    }

    #[test]
    fn test_malformed_date() {
        let errors = field_errors(body(Some("03/05/2024"), Some("Meeting")).validate());
        assert_eq!(errors.len(), 1);
        assert_eq!(errors["date"], DATE_REQUIRED);
    }

    #[test]
    fn test_empty_and_long_names() {
        let errors = field_errors(body(Some("2024-03-05"), Some("")).validate());
        assert_eq!(errors["event"], NAME_REQUIRED);

        let long = "x".repeat(MAX_NAME_LEN + 1);
        let errors = field_errors(body(Some("2024-03-05"), Some(&long)).validate());
        assert_eq!(errors["event"], NAME_TOO_LONG);
    }

    #[test]
    fn test_range_bounds() {
        let params = RangeParams {
            start_time: Some("2024-01-01".into()),
            end_time: Some("".into()),
        };
        let (start, end) = params.bounds().unwrap();
        assert_eq!(start, NaiveDate::from_ymd_opt(2024, 1, 1));
        assert_eq!(end, None);

        let params = RangeParams {
            start_time: None,
            end_time: Some("January".into()),
        };
        assert!(matches!(
            params.bounds(),
            Err(ApiError::Validation(fields)) if fields.contains_key("end_time")
        ));
    }

    fn pairs(items: &[(&str, &str)]) -> FieldPairs {
        items
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_first_occurrence_wins() {
        let params = RangeParams::from_pairs(&pairs(&[
            ("start_time", "2024-01-10"),
            ("start_time", "2024-01-01"),
            ("end_time", "2024-01-31"),
        ]));
        assert_eq!(params.start_time.as_deref(), Some("2024-01-10"));
        assert_eq!(params.end_time.as_deref(), Some("2024-01-31"));
    }

    #[test]
    fn test_body_fields_take_precedence_over_query() {
        let from_body = CreateEventBody::from_pairs(&pairs(&[("event", "From body")]));
        let from_query = CreateEventBody::from_pairs(&pairs(&[
            ("event", "From query"),
            ("date", "2024-03-05"),
        ]));

        let merged = from_body.or(from_query);
        assert_eq!(merged.event.as_deref(), Some("From body"));
        assert_eq!(merged.date.as_deref(), Some("2024-03-05"));
    }
}

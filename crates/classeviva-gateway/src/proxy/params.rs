//! Per-category request parameter adapter.

use chrono::NaiveDate;
use classeviva_client::params::parse_compact_date;
use classeviva_client::{AgendaRange, RequestParams, ResourceCategory};
use serde::Deserialize;

use crate::utils::error::ApiError;

/// Optional JSON body accepted by resource endpoints. Only the fields of the
/// requested category are looked at.
#[derive(Debug, Default, Deserialize)]
pub struct ResourceBody {
    pub start: Option<String>,
    pub end: Option<String>,
    pub day: Option<String>,
}

pub fn resolve_params(
    category: ResourceCategory,
    body: &[u8],
    today: NaiveDate,
) -> Result<RequestParams, ApiError> {
    match category {
        ResourceCategory::Agenda => {
            let body = parse_body(body)?;
            let start = parse_date("start", body.start.as_deref())?;
            let end = parse_date("end", body.end.as_deref())?;
            Ok(RequestParams::Agenda(AgendaRange::resolve(start, end, today)))
        }
        ResourceCategory::LessonsDay => {
            let body = parse_body(body)?;
            let day = parse_date("day", body.day.as_deref())?;
            Ok(RequestParams::Day(day.unwrap_or(today)))
        }
        _ => Ok(RequestParams::None),
    }
}

fn parse_body(body: &[u8]) -> Result<ResourceBody, ApiError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(ResourceBody::default());
    }
    serde_json::from_slice::<Option<ResourceBody>>(body)
        .map(Option::unwrap_or_default)
        .map_err(|e| ApiError::BadRequest(format!("Invalid JSON body: {}", e)))
}

/// Empty strings count as omitted.
fn parse_date(field: &str, value: Option<&str>) -> Result<Option<NaiveDate>, ApiError> {
    match value.map(str::trim).filter(|v| !v.is_empty()) {
        None => Ok(None),
        Some(v) => parse_compact_date(v).map(Some).ok_or_else(|| {
            ApiError::BadRequest(format!("{} must be a date in YYYYMMDD form, got {:?}", field, v))
        }),
    }
}

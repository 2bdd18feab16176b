use chrono::NaiveTime;
use serde::Deserialize;

use crate::domain::class::short_time;
use crate::forms::FormError;
use crate::query::QueryParams;

/// Studio search filters. A field left as `None` is switched off.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct StudioSearchForm {
    pub name: Option<String>,
    /// Comma-separated amenity types.
    pub amenities: Option<String>,
    /// Comma-separated class names.
    pub classes: Option<String>,
    /// Comma-separated coach names.
    pub coaches: Option<String>,
}

impl StudioSearchForm {
    /// Builds the filter parameters, rejecting a search with nothing to match.
    pub fn to_query(&self) -> Result<QueryParams, FormError> {
        let mut query = QueryParams::new();
        if let Some(name) = non_blank(&self.name) {
            query.push("name", name);
        }
        for (key, values) in [
            ("amenities", &self.amenities),
            ("classes", &self.classes),
            ("coaches", &self.coaches),
        ] {
            if let Some(values) = values {
                query.push_comma_separated(key, values);
            }
        }

        if query.is_empty() {
            return Err(FormError::NoFilters);
        }
        Ok(query)
    }
}

/// Class search filters within one studio.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct ClassSearchForm {
    pub name: Option<String>,
    pub coach: Option<String>,
    /// Earliest start, `HH:MM`.
    pub after: Option<String>,
    /// Latest start, `HH:MM`.
    pub before: Option<String>,
}

impl ClassSearchForm {
    pub fn to_query(&self) -> Result<QueryParams, FormError> {
        let mut query = QueryParams::new();
        if let Some(name) = non_blank(&self.name) {
            query.push("name", name);
        }
        if let Some(coach) = non_blank(&self.coach) {
            query.push("coach", coach);
        }
        if let Some(after) = non_blank(&self.after) {
            query.push("after", short_time(&parse_time(after)?));
        }
        if let Some(before) = non_blank(&self.before) {
            query.push("before", short_time(&parse_time(before)?));
        }

        if query.is_empty() {
            return Err(FormError::NoFilters);
        }
        Ok(query)
    }
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

fn parse_time(value: &str) -> Result<NaiveTime, FormError> {
    NaiveTime::parse_from_str(value, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(value, "%H:%M:%S"))
        .map_err(|_| FormError::InvalidTime(value.to_string()))
}

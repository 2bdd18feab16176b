//! Strongly-typed value objects used by domain entities.
//!
//! These wrappers enforce basic invariants (positive identifiers, known
//! schedule windows, non-empty tokens) so that once a value reaches the domain
//! layer it can be treated as trusted.
use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;

/// Errors produced when attempting to construct a constrained value object.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypeConstraintError {
    /// Provided identifier is zero or negative.
    #[error("id must be greater than zero")]
    NonPositiveId,
    /// Provided string contained no non-whitespace characters.
    #[error("value cannot be empty")]
    EmptyString,
    /// Provided day count is not one of the supported schedule windows.
    #[error("unsupported schedule range: {0}")]
    InvalidRange(String),
    /// Provided schedule scope is not known to the API.
    #[error("unknown schedule scope: {0}")]
    InvalidScope(String),
    /// Provided value failed custom validation.
    #[error("invalid value: {0}")]
    InvalidValue(String),
}

/// Macro to generate lightweight newtypes for positive identifiers.
macro_rules! id_newtype {
    ($name:ident, $doc:expr) => {
        #[doc = $doc]
        #[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
        #[serde(try_from = "i32", into = "i32")]
        pub struct $name(i32);

        impl $name {
            /// Creates a new identifier ensuring it is greater than zero.
            pub fn new(value: i32) -> Result<Self, TypeConstraintError> {
                if value > 0 {
                    Ok(Self(value))
                } else {
                    Err(TypeConstraintError::NonPositiveId)
                }
            }

            /// Returns the raw `i32` backing this identifier.
            pub const fn get(self) -> i32 {
                self.0
            }
        }

        impl Display for $name {
            fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl TryFrom<i32> for $name {
            type Error = TypeConstraintError;

            fn try_from(value: i32) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl From<$name> for i32 {
            fn from(value: $name) -> Self {
                value.0
            }
        }

        impl FromStr for $name {
            type Err = TypeConstraintError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let value = s
                    .trim()
                    .parse::<i32>()
                    .map_err(|_| TypeConstraintError::InvalidValue(s.to_string()))?;
                Self::new(value)
            }
        }
    };
}

id_newtype!(StudioId, "Unique identifier for a studio.");
id_newtype!(ClassId, "Unique identifier for a recurring class.");
id_newtype!(InstanceId, "Unique identifier for a stored class instance.");

/// Day-count window bounding schedule queries.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u16", into = "u16")]
pub enum ScheduleRange {
    #[default]
    Week,
    TwoWeeks,
    Month,
    Year,
}

impl ScheduleRange {
    pub const ALL: [ScheduleRange; 4] = [
        ScheduleRange::Week,
        ScheduleRange::TwoWeeks,
        ScheduleRange::Month,
        ScheduleRange::Year,
    ];

    /// Number of days covered by the window.
    pub const fn days(self) -> u16 {
        match self {
            ScheduleRange::Week => 7,
            ScheduleRange::TwoWeeks => 14,
            ScheduleRange::Month => 30,
            ScheduleRange::Year => 365,
        }
    }

    /// Label shown next to the range selector.
    pub const fn label(self) -> &'static str {
        match self {
            ScheduleRange::Week => "7 days",
            ScheduleRange::TwoWeeks => "14 days",
            ScheduleRange::Month => "30 days",
            ScheduleRange::Year => "1 year",
        }
    }
}

impl TryFrom<u16> for ScheduleRange {
    type Error = TypeConstraintError;

    fn try_from(days: u16) -> Result<Self, Self::Error> {
        match days {
            7 => Ok(ScheduleRange::Week),
            14 => Ok(ScheduleRange::TwoWeeks),
            30 => Ok(ScheduleRange::Month),
            365 => Ok(ScheduleRange::Year),
            other => Err(TypeConstraintError::InvalidRange(other.to_string())),
        }
    }
}

impl From<ScheduleRange> for u16 {
    fn from(value: ScheduleRange) -> Self {
        value.days()
    }
}

impl FromStr for ScheduleRange {
    type Err = TypeConstraintError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let days = s
            .trim()
            .parse::<u16>()
            .map_err(|_| TypeConstraintError::InvalidRange(s.to_string()))?;
        Self::try_from(days)
    }
}

impl Display for ScheduleRange {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.days())
    }
}

/// Which of the signed-in user's schedules a list shows.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum ScheduleScope {
    /// Future instances the user is enrolled in.
    #[default]
    Upcoming,
    /// Past instances the user attended.
    History,
    /// Instances currently in progress.
    Ongoing,
}

impl ScheduleScope {
    /// Path segment under `/accounts/` serving this scope.
    pub const fn as_str(self) -> &'static str {
        match self {
            ScheduleScope::Upcoming => "schedule",
            ScheduleScope::History => "history",
            ScheduleScope::Ongoing => "ongoing",
        }
    }

    /// Ongoing classes are not bounded by a day window.
    pub const fn uses_range(self) -> bool {
        !matches!(self, ScheduleScope::Ongoing)
    }
}

impl FromStr for ScheduleScope {
    type Err = TypeConstraintError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "schedule" | "upcoming" => Ok(ScheduleScope::Upcoming),
            "history" => Ok(ScheduleScope::History),
            "ongoing" => Ok(ScheduleScope::Ongoing),
            other => Err(TypeConstraintError::InvalidScope(other.to_string())),
        }
    }
}

impl Display for ScheduleScope {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Bearer token issued by the login endpoint.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct AuthToken(String);

impl AuthToken {
    /// Wraps a raw access token, rejecting blank values.
    pub fn new<S: Into<String>>(token: S) -> Result<Self, TypeConstraintError> {
        let token = token.into().trim().to_string();
        if token.is_empty() {
            Err(TypeConstraintError::EmptyString)
        } else {
            Ok(Self(token))
        }
    }

    /// Borrow the token as a `&str`.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

// Tokens never end up in logs.
impl std::fmt::Debug for AuthToken {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str("AuthToken(***)")
    }
}

impl TryFrom<String> for AuthToken {
    type Error = TypeConstraintError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<AuthToken> for String {
    fn from(value: AuthToken) -> Self {
        value.0
    }
}

/// Accepts JSON numbers as well as the decimal strings the API emits for
/// coordinates and money amounts.
pub(crate) fn de_decimal<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum NumberOrString {
        Number(f64),
        Text(String),
    }

    match NumberOrString::deserialize(deserializer)? {
        NumberOrString::Number(value) => Ok(value),
        NumberOrString::Text(text) => text
            .trim()
            .parse::<f64>()
            .map_err(serde::de::Error::custom),
    }
}

/// Optional variant of [`de_decimal`] for fields missing from trimmed payloads.
pub(crate) fn de_decimal_opt<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    struct Wrapper(#[serde(deserialize_with = "de_decimal")] f64);

    Ok(Option::<Wrapper>::deserialize(deserializer)?.map(|Wrapper(value)| value))
}

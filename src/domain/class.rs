use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::domain::types::{ClassId, InstanceId, StudioId};

/// Formats a wall-clock time without seconds.
pub fn short_time(time: &NaiveTime) -> String {
    time.format("%H:%M").to_string()
}

/// Recurring class offered by a studio.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct ClassDetails {
    pub id: ClassId,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub keywords: Vec<String>,
    /// Name of the hosting studio.
    #[serde(default)]
    pub studio: Option<String>,
    pub coach: String,
    pub capacity: u32,
    #[serde(default)]
    pub enrolled: u32,
    #[serde(default)]
    pub user_enrolled: Option<bool>,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    /// Human-readable recurrence rules.
    #[serde(default)]
    pub schedule: Vec<String>,
}

impl ClassDetails {
    pub fn enrollment(&self) -> EnrollmentState {
        EnrollmentState {
            enrolled: self.enrolled,
            capacity: self.capacity,
            user_enrolled: self.user_enrolled.unwrap_or(false),
        }
    }

    /// Copies the server-reported enrollment back onto the class.
    pub fn apply_enrollment(&mut self, update: &EnrollmentUpdate) {
        self.enrolled = update.enrolled;
        self.user_enrolled = Some(update.user_enrolled);
        if let Some(capacity) = update.capacity {
            self.capacity = capacity;
        }
    }

    /// Client-side route of the class page within `studio_id`.
    pub fn link(&self, studio_id: StudioId) -> String {
        format!("/studio/{studio_id}/class/{}", self.id)
    }

    /// `HH:MM to HH:MM`.
    pub fn time_span(&self) -> String {
        format!(
            "{} to {}",
            short_time(&self.start_time),
            short_time(&self.end_time)
        )
    }
}

/// One occurrence of a class as returned by the schedule endpoints.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct ScheduledInstance {
    pub studio_id: StudioId,
    pub class_id: ClassId,
    pub class_name: String,
    #[serde(default)]
    pub coach: String,
    pub date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    #[serde(default)]
    pub special: bool,
    /// API path of the instance detail and enrollment endpoint.
    pub details: String,
}

impl ScheduledInstance {
    /// `HH:MM to HH:MM on YYYY-MM-DD`.
    pub fn time_span(&self) -> String {
        format!(
            "{} to {} on {}",
            short_time(&self.start_time),
            short_time(&self.end_time),
            self.date
        )
    }

    /// Client-side route of the parent class page.
    pub fn class_link(&self) -> String {
        format!("/studio/{}/class/{}", self.studio_id, self.class_id)
    }
}

/// Detailed view of a single class occurrence.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct ClassInstance {
    /// Non-special occurrences have no stored row until someone enrolls.
    #[serde(default)]
    pub id: Option<InstanceId>,
    pub class_name: String,
    pub date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    #[serde(default)]
    pub cancelled: bool,
    #[serde(default)]
    pub special: bool,
    #[serde(default)]
    pub enrolled: u32,
    pub capacity: u32,
    #[serde(default)]
    pub parent: Option<ClassId>,
    #[serde(default)]
    pub user_enrolled: Option<bool>,
}

impl ClassInstance {
    pub fn enrollment(&self) -> EnrollmentState {
        EnrollmentState {
            enrolled: self.enrolled,
            capacity: self.capacity,
            user_enrolled: self.user_enrolled.unwrap_or(false),
        }
    }

    pub fn apply_enrollment(&mut self, update: &EnrollmentUpdate) {
        self.enrolled = update.enrolled;
        self.user_enrolled = Some(update.user_enrolled);
        if let Some(capacity) = update.capacity {
            self.capacity = capacity;
        }
    }
}

/// Enrollment fields echoed by the toggle endpoints.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct EnrollmentUpdate {
    pub enrolled: u32,
    pub user_enrolled: bool,
    #[serde(default)]
    pub capacity: Option<u32>,
}

/// Action offered to the user for the current enrollment state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EnrollAction {
    Enroll { disabled: bool },
    Unenroll,
}

impl EnrollAction {
    pub fn label(&self) -> &'static str {
        match self {
            EnrollAction::Enroll { .. } => "Enroll",
            EnrollAction::Unenroll => "Unenroll",
        }
    }
}

/// Capacity bookkeeping for a class or instance, as last reported by the server.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EnrollmentState {
    pub enrolled: u32,
    pub capacity: u32,
    pub user_enrolled: bool,
}

impl EnrollmentState {
    pub fn spaces(&self) -> u32 {
        self.capacity.saturating_sub(self.enrolled)
    }

    pub fn can_enroll(&self) -> bool {
        !self.user_enrolled && self.spaces() > 0
    }

    pub fn action(&self) -> EnrollAction {
        if self.user_enrolled {
            EnrollAction::Unenroll
        } else {
            EnrollAction::Enroll {
                disabled: self.spaces() == 0,
            }
        }
    }

    /// `There is 1 spot available.` / `There are no spots available.`
    pub fn spaces_text(&self) -> String {
        match self.spaces() {
            0 => "There are no spots available.".to_string(),
            1 => "There is 1 spot available.".to_string(),
            n => format!("There are {n} spots available."),
        }
    }

    pub fn availability_text(&self) -> String {
        let status = if self.user_enrolled {
            "enrolled"
        } else {
            "not enrolled"
        };
        format!("{} You are currently {status}.", self.spaces_text())
    }
}

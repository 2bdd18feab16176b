use std::fmt::Display;

use chrono::{DateTime, Datelike, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::types::{de_decimal, de_decimal_opt};

/// English ordinal suffix for a day of month.
fn ordinal_suffix(day: u32) -> &'static str {
    match (day % 10, day % 100) {
        (_, 11..=13) => "th",
        (1, _) => "st",
        (2, _) => "nd",
        (3, _) => "rd",
        _ => "th",
    }
}

/// `Saturday, June 1st, 2024, at 12:00 AM` in the timestamp's own zone.
pub fn format_long_datetime<Tz>(at: &DateTime<Tz>) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    let day = at.day();
    format!(
        "{}, {} {}{}, {}, at {}",
        at.format("%A"),
        at.format("%B"),
        day,
        ordinal_suffix(day),
        at.format("%Y"),
        at.format("%-I:%M %p"),
    )
}

/// Amount rendered the way the API reports it (no forced decimals).
pub fn format_amount(amount: f64) -> String {
    format!("${amount}")
}

/// Price with cents, e.g. `$16.90`.
pub fn format_price(amount: f64) -> String {
    format!("${amount:.2}")
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "UPPERCASE")]
pub enum BillingCycle {
    Monthly,
    Yearly,
}

impl BillingCycle {
    pub fn label(&self) -> &'static str {
        match self {
            BillingCycle::Monthly => "Monthly",
            BillingCycle::Yearly => "Yearly",
        }
    }
}

/// Subscription billing option.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Plan {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i32>,
    pub billing_cycle: BillingCycle,
    #[serde(deserialize_with = "de_decimal")]
    pub charge: f64,
    #[serde(default, skip_serializing)]
    pub currently_subscribed: bool,
    #[serde(default, skip_serializing)]
    pub cancelled_payment: bool,
}

/// What the user can do with a listed plan.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PlanAction {
    Unsubscribe,
    Resubscribe,
    None,
}

impl Plan {
    /// `Monthly, $14.99`.
    pub fn label(&self) -> String {
        format!("{}, {}", self.billing_cycle.label(), format_price(self.charge))
    }

    pub fn action(&self) -> PlanAction {
        match (self.currently_subscribed, self.cancelled_payment) {
            (true, false) => PlanAction::Unsubscribe,
            (true, true) => PlanAction::Resubscribe,
            _ => PlanAction::None,
        }
    }

    /// Line shown in the plans overview.
    pub fn summary(&self) -> String {
        if self.currently_subscribed {
            format!("{} (current plan)", self.label())
        } else {
            self.label()
        }
    }
}

/// Response of a subscribe or plan-change request.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct SubscribeReceipt {
    #[serde(default)]
    pub detail: Option<String>,
    #[serde(default, deserialize_with = "de_decimal_opt")]
    pub total: Option<f64>,
    #[serde(default)]
    pub next_payment: Option<DateTime<Utc>>,
}

/// Response of a cancellation request.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct UnsubscribeReceipt {
    #[serde(default)]
    pub detail: Option<String>,
    pub days_remaining: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ordinal_suffixes() {
        let suffixes: Vec<_> = [1, 2, 3, 4, 11, 12, 13, 21, 22, 23, 31]
            .iter()
            .map(|d| format!("{d}{}", ordinal_suffix(*d)))
            .collect();
        assert_eq!(
            suffixes,
            vec![
                "1st", "2nd", "3rd", "4th", "11th", "12th", "13th", "21st", "22nd", "23rd", "31st"
            ]
        );
    }

    #[test]
    fn long_datetime_uses_twelve_hour_clock() {
        let at = DateTime::parse_from_rfc3339("2024-06-01T00:00:00Z")
            .expect("valid timestamp")
            .with_timezone(&Utc);
        assert_eq!(
            format_long_datetime(&at),
            "Saturday, June 1st, 2024, at 12:00 AM"
        );

        let at = DateTime::parse_from_rfc3339("2023-11-22T15:05:00-05:00").expect("valid");
        assert_eq!(
            format_long_datetime(&at),
            "Wednesday, November 22nd, 2023, at 3:05 PM"
        );
    }

    #[test]
    fn plan_label_and_action() {
        let plan: Plan = serde_json::from_str(
            r#"{"billing_cycle": "MONTHLY", "charge": 14.99, "currently_subscribed": true, "cancelled_payment": true}"#,
        )
        .expect("valid plan");
        assert_eq!(plan.label(), "Monthly, $14.99");
        assert_eq!(plan.summary(), "Monthly, $14.99 (current plan)");
        assert_eq!(plan.action(), PlanAction::Resubscribe);

        let yearly: Plan =
            serde_json::from_str(r#"{"billing_cycle": "YEARLY", "charge": "150.00"}"#)
                .expect("valid plan");
        assert_eq!(yearly.label(), "Yearly, $150.00");
        assert_eq!(yearly.action(), PlanAction::None);
    }

    #[test]
    fn plan_serializes_only_billing_fields() {
        let plan = Plan {
            id: None,
            billing_cycle: BillingCycle::Monthly,
            charge: 14.99,
            currently_subscribed: true,
            cancelled_payment: false,
        };
        let json = serde_json::to_value(&plan).expect("serializable");
        assert_eq!(
            json,
            serde_json::json!({"billing_cycle": "MONTHLY", "charge": 14.99})
        );
    }
}

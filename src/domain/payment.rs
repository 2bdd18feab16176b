use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

use crate::domain::subscription::{format_long_datetime, format_price};
use crate::domain::types::de_decimal;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PaymentStatus {
    Upcoming,
    Completed,
    Cancelled,
}

impl PaymentStatus {
    pub fn label(&self) -> &'static str {
        match self {
            PaymentStatus::Upcoming => "Upcoming",
            PaymentStatus::Completed => "Completed",
            PaymentStatus::Cancelled => "Cancelled",
        }
    }
}

/// Charge recorded against the user's subscription.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Payment {
    #[serde(deserialize_with = "de_decimal")]
    pub amount: f64,
    pub date: DateTime<FixedOffset>,
    /// Card number the charge was billed to.
    #[serde(default)]
    pub payment_info: Option<String>,
    #[serde(default)]
    pub completed: bool,
    #[serde(default)]
    pub cancelled: bool,
}

impl Payment {
    pub fn status(&self) -> PaymentStatus {
        if self.cancelled {
            PaymentStatus::Cancelled
        } else if self.completed {
            PaymentStatus::Completed
        } else {
            PaymentStatus::Upcoming
        }
    }

    /// `$16.90 on Saturday, June 1st, 2024, at 12:00 AM (Upcoming)`.
    pub fn summary(&self) -> String {
        format!(
            "{} on {} ({})",
            format_price(self.amount),
            format_long_datetime(&self.date),
            self.status().label()
        )
    }
}

/// Card details sent when subscribing or updating the card on file.
#[derive(Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PaymentInfo {
    pub card_num: String,
    pub expiry: String,
    pub cvv: String,
}

impl std::fmt::Debug for PaymentInfo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PaymentInfo")
            .field("card_num", &mask_card(&self.card_num))
            .field("expiry", &self.expiry)
            .finish_non_exhaustive()
    }
}

/// Keeps the first four digits, matching how the API masks stored cards.
pub fn mask_card(card_num: &str) -> String {
    let visible: String = card_num.chars().take(4).collect();
    format!("{}{visible}", "X".repeat(8))
}

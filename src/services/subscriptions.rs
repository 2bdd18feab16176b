//! Subscription plans: listing, subscribing, resubscribing and cancelling.

use crate::api::{AccountReader, AccountWriter};
use crate::domain::subscription::{
    Plan, SubscribeReceipt, UnsubscribeReceipt, format_amount, format_long_datetime,
};
use crate::dto::api::SubscribeRequest;
use crate::dto::subscriptions::{PlanLine, SubscriptionsPageData};
use crate::forms::subscriptions::SubscribeForm;
use crate::models::notice::Notice;
use crate::services::{ServiceError, ServiceResult};

pub const SUBSCRIBE_FAILED: &str = "Could not subscribe";
pub const UNSUBSCRIBE_FAILED: &str = "Could not unsubscribe";

pub async fn load_plans<R>(api: &R) -> ServiceResult<SubscriptionsPageData>
where
    R: AccountReader + ?Sized,
{
    let plans = api.list_plans().await.map_err(|err| {
        log::error!("Failed to load plans: {err}");
        ServiceError::from(err)
    })?;
    let lines = plans
        .iter()
        .enumerate()
        .map(|(index, plan)| PlanLine::new(index, plan))
        .collect();
    Ok(SubscriptionsPageData { plans, lines })
}

/// Subscribes to the plan picked in `form`, optionally with a new card.
pub async fn subscribe<R>(api: &R, plans: &[Plan], form: &SubscribeForm) -> ServiceResult<Notice>
where
    R: AccountWriter + ?Sized,
{
    let request = form.to_request(plans)?;
    let receipt = api.subscribe(request).await?;
    Ok(Notice::success("Successfully subscribed", subscribed_message(&receipt)))
}

/// Reinstates a cancelled plan; the card on file is charged at the end of
/// the billing cycle.
pub async fn resubscribe<R>(api: &R, plan: &Plan) -> ServiceResult<Notice>
where
    R: AccountWriter + ?Sized,
{
    let request = SubscribeRequest {
        subscription: plan.clone(),
        payment_info: None,
    };
    api.subscribe(request).await?;
    Ok(Notice::success(
        "Successfully resubscribed",
        "You will be charged for your current subscription at the end of the billing cycle",
    ))
}

pub async fn unsubscribe<R>(api: &R) -> ServiceResult<Notice>
where
    R: AccountWriter + ?Sized,
{
    let receipt = api.unsubscribe().await?;
    Ok(Notice::success(
        "Successfully unsubscribed",
        unsubscribed_message(&receipt),
    ))
}

/// `Total = $49.99. Next payment is on Saturday, June 1st, 2024, at 12:00 AM.`
pub fn subscribed_message(receipt: &SubscribeReceipt) -> String {
    match (receipt.total, &receipt.next_payment) {
        (Some(total), Some(next)) => format!(
            "Total = {}. Next payment is on {}.",
            format_amount(total),
            format_long_datetime(next)
        ),
        _ => receipt.detail.clone().unwrap_or_default(),
    }
}

pub fn unsubscribed_message(receipt: &UnsubscribeReceipt) -> String {
    format!("Days remaining: {}", receipt.days_remaining)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn subscribe_notice_reads_total_and_next_payment() {
        let receipt: SubscribeReceipt = serde_json::from_value(serde_json::json!({
            "total": 49.99,
            "next_payment": "2024-06-01T00:00:00Z",
        }))
        .expect("valid receipt");
        assert_eq!(
            subscribed_message(&receipt),
            "Total = $49.99. Next payment is on Saturday, June 1st, 2024, at 12:00 AM."
        );
    }

    #[test]
    fn subscribe_notice_falls_back_to_detail() {
        let receipt = SubscribeReceipt {
            detail: Some("Subscription changed.".to_string()),
            total: None,
            next_payment: None,
        };
        assert_eq!(subscribed_message(&receipt), "Subscription changed.");
    }

    #[test]
    fn unsubscribe_notice_counts_days() {
        let receipt = UnsubscribeReceipt {
            detail: None,
            days_remaining: 12,
        };
        assert_eq!(unsubscribed_message(&receipt), "Days remaining: 12");
    }
}

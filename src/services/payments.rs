//! Payment history and the card on file.

use crate::api::{AccountReader, AccountWriter};
use crate::domain::payment::{Payment, PaymentStatus, mask_card};
use crate::dto::payments::PaymentsPageData;
use crate::forms::subscriptions::PaymentInfoForm;
use crate::models::notice::Notice;
use crate::services::list::{FetchOutcome, ListView};
use crate::services::{ServiceError, ServiceResult};

pub const UPDATE_CARD_FAILED: &str = "Could not update payment info";

/// Masked card on file, empty when none is stored.
pub async fn load_card<R>(api: &R) -> ServiceResult<String>
where
    R: AccountReader + ?Sized,
{
    let profile = api.get_profile().await.map_err(|err| {
        log::error!("Failed to load profile: {err}");
        ServiceError::from(err)
    })?;
    Ok(profile.card_num)
}

/// Paged payment history, newest first.
#[derive(Debug, Clone)]
pub struct PaymentHistory {
    view: ListView<Payment>,
}

impl PaymentHistory {
    pub fn new(page_size: usize) -> Self {
        Self {
            view: ListView::new(page_size),
        }
    }

    pub fn view(&self) -> &ListView<Payment> {
        &self.view
    }

    /// Returns `true` when the history must be refetched.
    pub fn set_page(&mut self, page: usize) -> bool {
        self.view.set_page(page)
    }

    pub async fn refresh<R>(&mut self, api: &R) -> FetchOutcome
    where
        R: AccountReader + ?Sized,
    {
        self.view
            .refresh(|request| api.list_payments(request))
            .await
    }

    /// Current page split into upcoming and past payments.
    pub fn page_data(&self, card_num: String) -> PaymentsPageData {
        let result = self.view.result();
        let (upcoming, past): (Vec<&Payment>, Vec<&Payment>) = result
            .items
            .iter()
            .partition(|payment| payment.status() == PaymentStatus::Upcoming);

        PaymentsPageData {
            card_num,
            upcoming: upcoming.iter().map(|p| p.summary()).collect(),
            past: past.iter().map(|p| p.summary()).collect(),
            page: result.page_index,
            total_pages: result.total_pages(),
            pages: if result.shows_pager() {
                result.pages()
            } else {
                Vec::new()
            },
        }
    }
}

pub async fn update_payment_info<R>(api: &R, form: &PaymentInfoForm) -> ServiceResult<Notice>
where
    R: AccountWriter + ?Sized,
{
    let info = form.to_payment_info()?;
    let fallback = mask_card(&info.card_num);
    let profile = api.update_payment_info(info).await?;

    let card = if profile.has_card() {
        profile.card_num
    } else {
        fallback
    };
    Ok(Notice::success(
        "Successfully updated payment info",
        format!("Future payments will use card {card}"),
    )
    .auto_close())
}

#[cfg(all(test, feature = "test-mocks"))]
mod tests {
    use super::*;
    use crate::api::errors::ApiError;
    use crate::api::mock::MockApi;
    use crate::domain::account::Profile;
    use crate::dto::api::PageEnvelope;

    fn profile(card_num: &str) -> Profile {
        Profile {
            id: 1,
            email: "jane@example.com".to_string(),
            first_name: "Jane".to_string(),
            last_name: "Doe".to_string(),
            avatar: None,
            phone_num: None,
            card_num: card_num.to_string(),
        }
    }

    fn payment(day: u32, completed: bool, cancelled: bool) -> serde_json::Value {
        serde_json::json!({
            "amount": "14.99",
            "date": format!("2024-06-{day:02}T00:00:00Z"),
            "payment_info": "1234",
            "completed": completed,
            "cancelled": cancelled,
        })
    }

    #[tokio::test]
    async fn payments_split_by_status() {
        let mut api = MockApi::new();
        api.expect_get_profile()
            .returning(|| Ok(profile("XXXXXXXX1234")));
        api.expect_list_payments().times(1).returning(|_| {
            Ok(serde_json::from_value::<PageEnvelope<_>>(serde_json::json!({
                "count": 3,
                "results": [
                    {"amount": "14.99", "date": "2024-07-01T00:00:00Z", "payment_info": "1234", "completed": false, "cancelled": false},
                    {"amount": "14.99", "date": "2024-06-01T00:00:00Z", "payment_info": "1234", "completed": true, "cancelled": false},
                    {"amount": "14.99", "date": "2024-05-01T00:00:00Z", "payment_info": "1234", "completed": false, "cancelled": true},
                ],
            }))
            .expect("valid payments"))
        });

        let card_num = load_card(&api).await.expect("profile loads");
        let mut history = PaymentHistory::new(10);
        assert_eq!(history.refresh(&api).await, FetchOutcome::Applied);

        let data = history.page_data(card_num);
        assert_eq!(data.card_num, "XXXXXXXX1234");
        assert_eq!(
            data.upcoming,
            vec!["$14.99 on Monday, July 1st, 2024, at 12:00 AM (Upcoming)".to_string()]
        );
        assert_eq!(data.past.len(), 2);
        assert!(data.past[1].ends_with("(Cancelled)"));
        assert!(data.pages.is_empty());
    }

    #[tokio::test]
    async fn long_history_pages_through_every_payment() {
        let mut api = MockApi::new();
        api.expect_list_payments()
            .withf(|request| request.page == 1 && request.limit == 10)
            .times(1)
            .returning(|_| {
                let results: Vec<_> = (1..=10).map(|day| payment(day, true, false)).collect();
                Ok(serde_json::from_value::<PageEnvelope<_>>(
                    serde_json::json!({"count": 25, "results": results}),
                )
                .expect("valid payments"))
            });
        api.expect_list_payments()
            .withf(|request| request.page == 3 && request.limit == 10)
            .times(1)
            .returning(|_| {
                let results: Vec<_> = (21..=25).map(|day| payment(day, true, false)).collect();
                Ok(serde_json::from_value::<PageEnvelope<_>>(
                    serde_json::json!({"count": 25, "results": results}),
                )
                .expect("valid payments"))
            });

        let mut history = PaymentHistory::new(10);
        history.refresh(&api).await;
        let data = history.page_data(String::new());
        assert_eq!(data.past.len(), 10);
        assert_eq!(data.total_pages, 3);
        assert_eq!(data.pages, vec![Some(1), Some(2), Some(3)]);

        assert!(history.set_page(3));
        assert_eq!(history.refresh(&api).await, FetchOutcome::Applied);
        let data = history.page_data(String::new());
        assert_eq!(data.page, 3);
        assert_eq!(data.past.len(), 5);
        assert!(data.past[0].contains("June 21st"));
    }

    #[tokio::test]
    async fn failed_page_keeps_the_previous_one() {
        let mut api = MockApi::new();
        let mut calls = 0;
        api.expect_list_payments().times(2).returning(move |_| {
            calls += 1;
            if calls == 1 {
                let results: Vec<_> = (1..=10).map(|day| payment(day, false, true)).collect();
                Ok(serde_json::from_value::<PageEnvelope<_>>(
                    serde_json::json!({"count": 12, "results": results}),
                )
                .expect("valid payments"))
            } else {
                Err(ApiError::Server { status: 502 })
            }
        });

        let mut history = PaymentHistory::new(10);
        history.refresh(&api).await;
        assert!(history.set_page(2));
        assert_eq!(history.refresh(&api).await, FetchOutcome::Failed);
        assert_eq!(history.page_data(String::new()).past.len(), 10);
    }

    #[tokio::test]
    async fn card_update_reports_masked_card() {
        let mut api = MockApi::new();
        api.expect_update_payment_info()
            .withf(|info| info.card_num == "1234567890123456")
            .times(1)
            .returning(|_| Ok(profile("XXXXXXXX1234")));

        let form = PaymentInfoForm {
            card_num: "1234 5678 9012 3456".to_string(),
            expiry: "12/27".to_string(),
            cvv: "123".to_string(),
        };
        let notice = update_payment_info(&api, &form).await.expect("updated");
        assert_eq!(notice.title, "Successfully updated payment info");
        assert_eq!(notice.message, "Future payments will use card XXXXXXXX1234");
        assert!(!notice.sticky);
    }

    #[tokio::test]
    async fn rejected_card_update_surfaces_detail() {
        let mut api = MockApi::new();
        api.expect_update_payment_info().returning(|_| {
            Err(ApiError::rejected(400, Some("Card has expired.".to_string())))
        });

        let form = PaymentInfoForm {
            card_num: "1234".to_string(),
            expiry: "01/20".to_string(),
            cvv: "123".to_string(),
        };
        let notice = update_payment_info(&api, &form)
            .await
            .expect_err("rejected")
            .into_notice(UPDATE_CARD_FAILED)
            .expect("4xx shown");
        assert_eq!(notice.message, "Card has expired.");
    }
}

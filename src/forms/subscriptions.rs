use serde::Deserialize;

use crate::domain::payment::PaymentInfo;
use crate::domain::subscription::Plan;
use crate::dto::api::SubscribeRequest;
use crate::forms::FormError;

/// Card fields as typed by the user.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct PaymentInfoForm {
    pub card_num: String,
    pub expiry: String,
    pub cvv: String,
}

impl PaymentInfoForm {
    pub fn to_payment_info(&self) -> Result<PaymentInfo, FormError> {
        let card_num: String = self.card_num.chars().filter(|c| !c.is_whitespace()).collect();
        if card_num.is_empty() {
            return Err(FormError::MissingField("card_num"));
        }
        if self.expiry.trim().is_empty() {
            return Err(FormError::MissingField("expiry"));
        }
        if self.cvv.trim().is_empty() {
            return Err(FormError::MissingField("cvv"));
        }
        Ok(PaymentInfo {
            card_num,
            expiry: self.expiry.trim().to_string(),
            cvv: self.cvv.trim().to_string(),
        })
    }
}

#[derive(Debug, Default, Clone, Deserialize)]
pub struct SubscribeForm {
    /// Index into the listed plans.
    pub plan: Option<usize>,
    /// Omitted when the card on file should be charged.
    pub payment_info: Option<PaymentInfoForm>,
}

impl SubscribeForm {
    pub fn to_request(&self, plans: &[Plan]) -> Result<SubscribeRequest, FormError> {
        let plan = self
            .plan
            .and_then(|index| plans.get(index))
            .ok_or(FormError::NoPlanSelected)?;
        let payment_info = self
            .payment_info
            .as_ref()
            .map(PaymentInfoForm::to_payment_info)
            .transpose()?;

        Ok(SubscribeRequest {
            subscription: plan.clone(),
            payment_info,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::subscription::BillingCycle;

    fn plans() -> Vec<Plan> {
        vec![
            Plan {
                id: Some(1),
                billing_cycle: BillingCycle::Monthly,
                charge: 14.99,
                currently_subscribed: false,
                cancelled_payment: false,
            },
            Plan {
                id: Some(2),
                billing_cycle: BillingCycle::Yearly,
                charge: 150.0,
                currently_subscribed: false,
                cancelled_payment: false,
            },
        ]
    }

    #[test]
    fn plan_must_be_selected() {
        let form = SubscribeForm::default();
        let err = form.to_request(&plans()).expect_err("no plan");
        assert_eq!(err, FormError::NoPlanSelected);
        assert_eq!(err.to_string(), "Please select a plan");

        let form = SubscribeForm {
            plan: Some(7),
            payment_info: None,
        };
        assert_eq!(form.to_request(&plans()).expect_err("unknown plan"), FormError::NoPlanSelected);
    }

    #[test]
    fn request_carries_plan_and_card() {
        let form = SubscribeForm {
            plan: Some(1),
            payment_info: Some(PaymentInfoForm {
                card_num: "1234 5678 9012 3456".to_string(),
                expiry: "12/27".to_string(),
                cvv: "123".to_string(),
            }),
        };
        let request = form.to_request(&plans()).expect("valid form");
        assert_eq!(request.subscription.billing_cycle, BillingCycle::Yearly);
        let card = request.payment_info.expect("card given");
        assert_eq!(card.card_num, "1234567890123456");
    }

    #[test]
    fn incomplete_card_is_rejected() {
        let form = PaymentInfoForm {
            card_num: "1234".to_string(),
            expiry: String::new(),
            cvv: "123".to_string(),
        };
        assert_eq!(form.to_payment_info(), Err(FormError::MissingField("expiry")));
    }
}

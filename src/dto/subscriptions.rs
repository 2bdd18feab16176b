//! DTOs used by the subscriptions page.

use crate::domain::subscription::{Plan, PlanAction};

#[derive(Debug, Clone, PartialEq)]
pub struct PlanLine {
    /// Index into the listed plans, used to pick a plan to subscribe to.
    pub index: usize,
    pub summary: String,
    pub action: PlanAction,
    /// Plans the user is already on cannot be picked again.
    pub selectable: bool,
}

impl PlanLine {
    pub fn new(index: usize, plan: &Plan) -> Self {
        Self {
            index,
            summary: plan.summary(),
            action: plan.action(),
            selectable: !plan.currently_subscribed,
        }
    }
}

/// Data required to render the subscriptions page.
#[derive(Debug, Clone)]
pub struct SubscriptionsPageData {
    pub plans: Vec<Plan>,
    pub lines: Vec<PlanLine>,
}

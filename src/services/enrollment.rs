//! Enrollment toggles for whole classes and single occurrences.

use crate::api::{ClassReader, EnrollmentWriter};
use crate::domain::class::{ClassDetails, ClassInstance, EnrollAction, EnrollmentState};
use crate::domain::types::StudioId;
use crate::models::notice::Notice;
use crate::services::errors::api_notice;

/// Title of the notice raised when the server refuses a toggle.
pub const ENROLL_FAILED: &str = "Could not complete operation";

/// Shown in a popover whose instance could not be loaded.
pub const INSTANCE_UNAVAILABLE: &str = "Class details are unavailable.";

/// Toggles the user's enrollment in every future occurrence of `class`.
///
/// The server decides the direction; its answer replaces the local counts.
pub async fn toggle_class_enrollment<R>(
    api: &R,
    studio_id: StudioId,
    class: &mut ClassDetails,
) -> Option<Notice>
where
    R: EnrollmentWriter + ?Sized,
{
    if !toggle_allowed(&class.enrollment()) {
        return None;
    }
    match api.toggle_class_enrollment(studio_id, class.id).await {
        Ok(update) => {
            class.apply_enrollment(&update);
            None
        }
        Err(err) => api_notice(&err, ENROLL_FAILED),
    }
}

fn toggle_allowed(state: &EnrollmentState) -> bool {
    match state.action() {
        EnrollAction::Enroll { disabled: true } => {
            log::debug!("Enroll requested with no spots left");
            false
        }
        _ => true,
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum PopoverState {
    Loading,
    Ready(ClassInstance),
    /// The detail fetch failed; carries the message to show.
    Failed(String),
}

/// Detail popover of one scheduled occurrence.
#[derive(Debug, Clone)]
pub struct EnrollmentPopover {
    details: String,
    state: PopoverState,
}

impl EnrollmentPopover {
    /// Opens the popover for the instance behind the `details` path.
    pub fn new(details: impl Into<String>) -> Self {
        Self {
            details: details.into(),
            state: PopoverState::Loading,
        }
    }

    pub fn state(&self) -> &PopoverState {
        &self.state
    }

    pub fn instance(&self) -> Option<&ClassInstance> {
        match &self.state {
            PopoverState::Ready(instance) => Some(instance),
            _ => None,
        }
    }

    pub async fn load<R: ClassReader + ?Sized>(&mut self, api: &R) {
        self.state = match api.get_instance(self.details.clone()).await {
            Ok(instance) => PopoverState::Ready(instance),
            Err(err) => {
                log::error!("Failed to load class instance {}: {err}", self.details);
                let message = err.client_detail().unwrap_or(INSTANCE_UNAVAILABLE);
                PopoverState::Failed(message.to_string())
            }
        };
    }

    pub fn availability_text(&self) -> Option<String> {
        self.instance()
            .map(|instance| instance.enrollment().availability_text())
    }

    /// Button offered to the user; absent while loading or after a failure.
    pub fn action(&self) -> Option<EnrollAction> {
        self.instance().map(|instance| instance.enrollment().action())
    }

    pub async fn toggle<R: EnrollmentWriter + ?Sized>(&mut self, api: &R) -> Option<Notice> {
        let PopoverState::Ready(instance) = &mut self.state else {
            return None;
        };
        if !toggle_allowed(&instance.enrollment()) {
            return None;
        }
        match api.toggle_instance_enrollment(self.details.clone()).await {
            Ok(update) => {
                instance.apply_enrollment(&update);
                None
            }
            Err(err) => api_notice(&err, ENROLL_FAILED),
        }
    }
}

#[cfg(all(test, feature = "test-mocks"))]
mod tests {
    use chrono::{NaiveDate, NaiveTime};

    use super::*;
    use crate::api::errors::ApiError;
    use crate::api::mock::MockApi;
    use crate::domain::class::EnrollmentUpdate;
    use crate::domain::types::ClassId;

    const DETAILS: &str = "/studios/1/classes/3/2024-06-01/details/";

    fn instance(enrolled: u32, capacity: u32, user_enrolled: bool) -> ClassInstance {
        ClassInstance {
            id: None,
            class_name: "Yoga".to_string(),
            date: NaiveDate::from_ymd_opt(2024, 6, 1).expect("valid date"),
            start_time: NaiveTime::from_hms_opt(9, 0, 0).expect("valid time"),
            end_time: NaiveTime::from_hms_opt(10, 0, 0).expect("valid time"),
            cancelled: false,
            special: false,
            enrolled,
            capacity,
            parent: Some(ClassId::new(3).expect("valid id")),
            user_enrolled: Some(user_enrolled),
        }
    }

    fn class(enrolled: u32, capacity: u32, user_enrolled: bool) -> ClassDetails {
        ClassDetails {
            id: ClassId::new(3).expect("valid id"),
            name: "Yoga".to_string(),
            description: String::new(),
            keywords: vec![],
            studio: Some("Downtown".to_string()),
            coach: "Ann".to_string(),
            capacity,
            enrolled,
            user_enrolled: Some(user_enrolled),
            start_time: NaiveTime::from_hms_opt(9, 0, 0).expect("valid time"),
            end_time: NaiveTime::from_hms_opt(10, 0, 0).expect("valid time"),
            schedule: vec![],
        }
    }

    #[tokio::test]
    async fn taking_the_last_spot_disables_enroll() {
        let mut api = MockApi::new();
        api.expect_get_instance()
            .times(1)
            .returning(|_| Ok(instance(4, 5, false)));
        api.expect_toggle_instance_enrollment()
            .withf(|details| details == DETAILS)
            .times(1)
            .returning(|_| {
                Ok(EnrollmentUpdate {
                    enrolled: 5,
                    user_enrolled: true,
                    capacity: None,
                })
            });

        let mut popover = EnrollmentPopover::new(DETAILS);
        popover.load(&api).await;
        assert_eq!(
            popover.availability_text().as_deref(),
            Some("There is 1 spot available. You are currently not enrolled.")
        );
        assert_eq!(popover.action(), Some(EnrollAction::Enroll { disabled: false }));

        assert!(popover.toggle(&api).await.is_none());

        let state = popover.instance().expect("ready").enrollment();
        assert_eq!(state.spaces_text(), "There are no spots available.");
        assert!(!state.can_enroll());
        assert_eq!(popover.action(), Some(EnrollAction::Unenroll));
    }

    #[tokio::test]
    async fn full_class_blocks_enroll_for_others() {
        let mut api = MockApi::new();
        api.expect_get_instance()
            .returning(|_| Ok(instance(5, 5, false)));
        api.expect_toggle_instance_enrollment().times(0);

        let mut popover = EnrollmentPopover::new(DETAILS);
        popover.load(&api).await;
        assert_eq!(popover.action(), Some(EnrollAction::Enroll { disabled: true }));
        assert!(popover.toggle(&api).await.is_none());
    }

    #[tokio::test]
    async fn missing_instance_moves_to_failed() {
        let mut api = MockApi::new();
        api.expect_get_instance()
            .times(1)
            .returning(|_| Err(ApiError::rejected(404, Some("Not found.".to_string()))));
        api.expect_toggle_instance_enrollment().times(0);

        let mut popover = EnrollmentPopover::new(DETAILS);
        assert_eq!(popover.state(), &PopoverState::Loading);
        popover.load(&api).await;

        assert_eq!(popover.state(), &PopoverState::Failed("Not found.".to_string()));
        assert!(popover.action().is_none());
        assert!(popover.availability_text().is_none());
        assert!(popover.toggle(&api).await.is_none());
    }

    #[tokio::test]
    async fn server_failure_uses_generic_message() {
        let mut api = MockApi::new();
        api.expect_get_instance()
            .returning(|_| Err(ApiError::Server { status: 500 }));

        let mut popover = EnrollmentPopover::new(DETAILS);
        popover.load(&api).await;
        assert_eq!(
            popover.state(),
            &PopoverState::Failed(INSTANCE_UNAVAILABLE.to_string())
        );
    }

    #[tokio::test]
    async fn rejected_class_toggle_raises_notice() {
        let studio_id = StudioId::new(1).expect("valid id");
        let mut api = MockApi::new();
        api.expect_toggle_class_enrollment()
            .times(1)
            .returning(|_, _| {
                Err(ApiError::rejected(
                    400,
                    Some("User does not have an active subscription.".to_string()),
                ))
            });

        let mut details = class(2, 10, false);
        let notice = toggle_class_enrollment(&api, studio_id, &mut details)
            .await
            .expect("4xx is surfaced");
        assert_eq!(notice.title, ENROLL_FAILED);
        assert_eq!(notice.message, "User does not have an active subscription.");
        assert_eq!(details.enrolled, 2);
    }

    #[tokio::test]
    async fn class_toggle_applies_server_counts() {
        let studio_id = StudioId::new(1).expect("valid id");
        let mut api = MockApi::new();
        api.expect_toggle_class_enrollment()
            .times(1)
            .returning(|_, _| {
                Ok(EnrollmentUpdate {
                    enrolled: 1,
                    user_enrolled: false,
                    capacity: Some(12),
                })
            });

        let mut details = class(2, 10, true);
        assert!(toggle_class_enrollment(&api, studio_id, &mut details).await.is_none());
        assert_eq!(details.enrolled, 1);
        assert_eq!(details.capacity, 12);
        assert_eq!(details.user_enrolled, Some(false));
    }
}

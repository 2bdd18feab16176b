use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{NaiveDate, NaiveTime};
use tfc_booking::api::errors::{ApiError, ApiResult};
use tfc_booking::api::{ClassReader, EnrollmentWriter, PageRequest};
use tfc_booking::domain::class::{
    ClassDetails, ClassInstance, EnrollAction, EnrollmentUpdate, ScheduledInstance,
};
use tfc_booking::domain::types::{ClassId, StudioId};
use tfc_booking::dto::api::PageEnvelope;
use tfc_booking::services::enrollment::{EnrollmentPopover, PopoverState};

/// In-memory occurrence with five seats.
struct FakeClass {
    instance: Option<ClassInstance>,
    toggles: Mutex<u32>,
}

impl FakeClass {
    fn with_enrolled(enrolled: u32) -> Self {
        Self {
            instance: Some(ClassInstance {
                id: None,
                class_name: "Yoga".to_string(),
                date: NaiveDate::from_ymd_opt(2024, 6, 1).expect("valid date"),
                start_time: NaiveTime::from_hms_opt(9, 0, 0).expect("valid time"),
                end_time: NaiveTime::from_hms_opt(10, 0, 0).expect("valid time"),
                cancelled: false,
                special: false,
                enrolled,
                capacity: 5,
                parent: None,
                user_enrolled: Some(false),
            }),
            toggles: Mutex::new(0),
        }
    }

    fn missing() -> Self {
        Self {
            instance: None,
            toggles: Mutex::new(0),
        }
    }
}

#[async_trait]
impl ClassReader for FakeClass {
    async fn get_class(&self, _: StudioId, _: ClassId) -> ApiResult<ClassDetails> {
        Err(ApiError::rejected(404, None))
    }

    async fn list_class_schedule(
        &self,
        _: StudioId,
        _: ClassId,
        _: PageRequest,
    ) -> ApiResult<PageEnvelope<ScheduledInstance>> {
        Ok(PageEnvelope::empty())
    }

    async fn search_classes(
        &self,
        _: StudioId,
        _: PageRequest,
    ) -> ApiResult<PageEnvelope<ClassDetails>> {
        Ok(PageEnvelope::empty())
    }

    async fn get_instance(&self, _: String) -> ApiResult<ClassInstance> {
        self.instance
            .clone()
            .ok_or_else(|| ApiError::rejected(404, Some("Not found.".to_string())))
    }
}

#[async_trait]
impl EnrollmentWriter for FakeClass {
    async fn toggle_class_enrollment(&self, _: StudioId, _: ClassId) -> ApiResult<EnrollmentUpdate> {
        Err(ApiError::Server { status: 500 })
    }

    async fn toggle_instance_enrollment(&self, _: String) -> ApiResult<EnrollmentUpdate> {
        let mut toggles = self.toggles.lock().expect("lock");
        *toggles += 1;
        let enrolled = self.instance.as_ref().map_or(0, |i| i.enrolled);
        Ok(EnrollmentUpdate {
            enrolled: enrolled + 1,
            user_enrolled: true,
            capacity: None,
        })
    }
}

#[tokio::test]
async fn enrolling_in_the_last_spot_fills_the_class() {
    let api = FakeClass::with_enrolled(4);
    let mut popover = EnrollmentPopover::new("/studios/1/classes/1/2024-06-01/details/");
    popover.load(&api).await;

    let before = popover.instance().expect("loaded").enrollment();
    assert_eq!(before.spaces_text(), "There is 1 spot available.");

    assert!(popover.toggle(&api).await.is_none());

    let after = popover.instance().expect("loaded").enrollment();
    assert_eq!(after.spaces(), 0);
    assert_eq!(after.spaces_text(), "There are no spots available.");
    assert!(!after.can_enroll());
    assert_eq!(
        popover.availability_text().as_deref(),
        Some("There are no spots available. You are currently enrolled.")
    );
    assert_eq!(*api.toggles.lock().expect("lock"), 1);
}

#[tokio::test]
async fn full_class_offers_a_disabled_enroll_button() {
    let api = FakeClass::with_enrolled(5);
    let mut popover = EnrollmentPopover::new("/details/");
    popover.load(&api).await;

    assert_eq!(popover.action(), Some(EnrollAction::Enroll { disabled: true }));
    assert!(popover.toggle(&api).await.is_none());
    assert_eq!(*api.toggles.lock().expect("lock"), 0);
}

#[tokio::test]
async fn missing_occurrence_ends_in_failed_state() {
    let api = FakeClass::missing();
    let mut popover = EnrollmentPopover::new("/details/");
    popover.load(&api).await;

    assert_eq!(popover.state(), &PopoverState::Failed("Not found.".to_string()));
    assert!(popover.action().is_none());

    // Loading again is deterministic.
    popover.load(&api).await;
    assert_eq!(popover.state(), &PopoverState::Failed("Not found.".to_string()));
}

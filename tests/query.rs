use tfc_booking::api::PageRequest;
use tfc_booking::domain::types::ScheduleRange;
use tfc_booking::forms::search::StudioSearchForm;
use tfc_booking::query::QueryParams;

#[test]
fn comma_separated_filters_become_repeated_pairs() {
    let mut query = QueryParams::new();
    query.push_comma_separated("amenities", "pool, gym");
    assert_eq!(query.to_fragment(), "amenities=pool&amenities=gym&");
}

#[test]
fn filter_values_are_encoded() {
    let form = StudioSearchForm {
        name: Some("Rock & Roll".to_string()),
        classes: Some("Hot Yoga,Spin/Cycle".to_string()),
        ..Default::default()
    };
    let query = form.to_query().expect("filters present");
    assert_eq!(
        query.to_query_string(),
        "name=Rock+%26+Roll&classes=Hot+Yoga&classes=Spin%2FCycle"
    );
}

#[test]
fn requests_append_paging_to_filters() {
    let request = PageRequest::new(10)
        .filters(QueryParams::new().with("coach", "Ann"))
        .paginate(2);
    assert_eq!(
        request.to_query().apply_to("/studios/1/classes/search"),
        "/studios/1/classes/search?coach=Ann&page=2&limit=10"
    );

    let schedule = PageRequest::new(10).range(ScheduleRange::Year);
    assert_eq!(
        schedule.to_query().apply_to("/studios/1/schedule"),
        "/studios/1/schedule?range=365&page=1&limit=10"
    );
}

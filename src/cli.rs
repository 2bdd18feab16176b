//! Command-line front-end over the booking services.

use clap::{Parser, Subcommand};

use tfc_booking::api::NearbyOrigin;
use tfc_booking::api::http::HttpApi;
use tfc_booking::domain::class::ClassDetails;
use tfc_booking::domain::studio::Coordinates;
use tfc_booking::domain::subscription::PlanAction;
use tfc_booking::domain::types::{ClassId, ScheduleRange, ScheduleScope, StudioId};
use tfc_booking::dto::payments::NO_PAYMENTS;
use tfc_booking::dto::schedule::SchedulePageData;
use tfc_booking::dto::search::NO_RESULTS;
use tfc_booking::forms::accounts::{LoginForm, ProfileForm, RegisterForm};
use tfc_booking::forms::search::{ClassSearchForm, StudioSearchForm};
use tfc_booking::forms::subscriptions::{PaymentInfoForm, SubscribeForm};
use tfc_booking::models::config::ClientConfig;
use tfc_booking::models::notice::Notice;
use tfc_booking::services::enrollment::{
    EnrollmentPopover, PopoverState, toggle_class_enrollment,
};
use tfc_booking::services::list::FetchOutcome;
use tfc_booking::services::schedule::{ScheduleList, ScheduleSource};
use tfc_booking::services::search::{ClassSearch, StudioSearch};
use tfc_booking::services::accounts::{PROFILE_EDIT_FAILED, REGISTER_FAILED};
use tfc_booking::services::payments::{PaymentHistory, UPDATE_CARD_FAILED};
use tfc_booking::services::studios::LOCATION_FAILED;
use tfc_booking::services::subscriptions::{SUBSCRIBE_FAILED, UNSUBSCRIBE_FAILED};
use tfc_booking::services::{ServiceResult, accounts, payments, studios, subscriptions};

#[derive(Parser)]
#[command(name = "tfc", version, about = "Browse studios, classes and your bookings")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Create an account
    Register {
        #[arg(long, default_value = "")]
        first_name: String,
        #[arg(long, default_value = "")]
        last_name: String,
        #[arg(long, default_value = "")]
        phone_num: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
        #[arg(long)]
        confirm_password: String,
    },
    /// Exchange credentials for an access token
    Login {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },
    /// Show the signed-in user's profile
    Profile,
    /// Edit the signed-in user's profile; unset fields keep their value
    EditProfile {
        #[arg(long)]
        first_name: Option<String>,
        #[arg(long)]
        last_name: Option<String>,
        #[arg(long)]
        phone_num: Option<String>,
        #[arg(long)]
        email: Option<String>,
        #[arg(long, requires_all = ["old_password", "confirm_new_password"])]
        new_password: Option<String>,
        #[arg(long)]
        old_password: Option<String>,
        #[arg(long)]
        confirm_new_password: Option<String>,
    },
    /// Show your upcoming, past or ongoing classes
    Schedule {
        #[arg(long, default_value = "schedule")]
        scope: ScheduleScope,
        #[arg(long, default_value = "7")]
        range: ScheduleRange,
        #[arg(long, default_value_t = 1)]
        page: usize,
    },
    /// Show a studio and its schedule
    Studio {
        studio_id: StudioId,
        #[arg(long, default_value = "7")]
        range: ScheduleRange,
        #[arg(long, default_value_t = 1)]
        page: usize,
    },
    /// Show a class, its availability and its upcoming occurrences
    Class {
        studio_id: StudioId,
        class_id: ClassId,
        #[arg(long, default_value = "7")]
        range: ScheduleRange,
        #[arg(long, default_value_t = 1)]
        page: usize,
    },
    /// List studios closest to a location or postal code
    Nearby {
        #[arg(long, allow_hyphen_values = true, requires = "long")]
        lat: Option<f64>,
        #[arg(long, allow_hyphen_values = true, requires = "lat")]
        long: Option<f64>,
        #[arg(long, conflicts_with_all = ["lat", "long"])]
        postal_code: Option<String>,
    },
    /// Search studios by name, amenities, classes or coaches
    SearchStudios {
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        amenities: Option<String>,
        #[arg(long)]
        classes: Option<String>,
        #[arg(long)]
        coaches: Option<String>,
        #[arg(long, default_value_t = 1)]
        page: usize,
    },
    /// Search the classes of one studio
    SearchClasses {
        studio_id: StudioId,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        coach: Option<String>,
        #[arg(long)]
        after: Option<String>,
        #[arg(long)]
        before: Option<String>,
        #[arg(long, default_value_t = 1)]
        page: usize,
    },
    /// Toggle enrollment in a class, or in one occurrence via its details path
    Enroll {
        studio_id: StudioId,
        class_id: ClassId,
        #[arg(long)]
        details: Option<String>,
    },
    /// List subscription plans
    Plans,
    /// Subscribe to (or resume) the plan at the given position
    Subscribe {
        #[arg(long)]
        plan: Option<usize>,
        #[arg(long, requires_all = ["expiry", "cvv"])]
        card_num: Option<String>,
        #[arg(long)]
        expiry: Option<String>,
        #[arg(long)]
        cvv: Option<String>,
    },
    /// Cancel the current subscription
    Unsubscribe,
    /// Show upcoming and past payments
    Payments {
        #[arg(long, default_value_t = 1)]
        page: usize,
    },
    /// Replace the card on file
    Card {
        #[arg(long)]
        card_num: String,
        #[arg(long)]
        expiry: String,
        #[arg(long)]
        cvv: String,
    },
}

impl Cli {
    pub async fn run(self, api: &HttpApi, config: &ClientConfig) -> ServiceResult<()> {
        let page_size = config.page_size;

        match self.command {
            Command::Register {
                first_name,
                last_name,
                phone_num,
                email,
                password,
                confirm_password,
            } => {
                let form = RegisterForm {
                    first_name,
                    last_name,
                    phone_num,
                    email,
                    password,
                    confirm_password,
                };
                report_fields(accounts::register(api, &form).await, REGISTER_FAILED);
            }
            Command::Login { email, password } => {
                let token = accounts::login(api, &LoginForm { email, password }).await?;
                println!("Logged in. Export APP_TOKEN={} to stay signed in.", token.as_str());
            }
            Command::Profile => {
                let profile = accounts::load_profile(api).await?;
                println!("{} <{}>", profile.full_name(), profile.email);
                if let Some(phone) = &profile.phone_num {
                    println!("Phone: {phone}");
                }
                if profile.has_card() {
                    println!("Card: {}", profile.card_num);
                }
            }
            Command::EditProfile {
                first_name,
                last_name,
                phone_num,
                email,
                new_password,
                old_password,
                confirm_new_password,
            } => {
                let current = accounts::load_profile(api).await?;
                let form = ProfileForm {
                    first_name: first_name.unwrap_or(current.first_name),
                    last_name: last_name.unwrap_or(current.last_name),
                    phone_num: phone_num.or(current.phone_num).unwrap_or_default(),
                    email: email.unwrap_or(current.email),
                    old_password: old_password.unwrap_or_default(),
                    new_password: new_password.unwrap_or_default(),
                    confirm_new_password: confirm_new_password.unwrap_or_default(),
                };
                report_fields(accounts::update_profile(api, &form).await, PROFILE_EDIT_FAILED);
            }
            Command::Schedule { scope, range, page } => {
                let mut list = ScheduleList::new(ScheduleSource::User(scope), page_size);
                list.set_range(range);
                show_schedule(api, &mut list, page).await;
            }
            Command::Studio {
                studio_id,
                range,
                page,
            } => {
                let (header, studio) = studios::load_studio_details(api, studio_id).await;
                println!("{}", header.name);
                print_notice(header.notice);
                if let Some(studio) = studio {
                    println!("{}, {}", studio.address, studio.postal_code);
                    if let Some(phone) = &studio.phone_num {
                        println!("Phone: {phone}");
                    }
                    if let Some(directions) = &studio.directions {
                        println!("Directions: {directions}");
                    }
                    if !studio.amenities.is_empty() {
                        println!("Amenities: {}", studio.amenities_summary());
                    }
                    if !studio.classes.is_empty() {
                        println!("Classes: {}", studio.classes_summary());
                    }
                }
                let mut list = ScheduleList::new(ScheduleSource::Studio(studio_id), page_size);
                list.set_range(range);
                show_schedule(api, &mut list, page).await;
            }
            Command::Class {
                studio_id,
                class_id,
                range,
                page,
            } => {
                let class = studios::get_class(api, studio_id, class_id).await?;
                print_class(&class);
                let mut list =
                    ScheduleList::new(ScheduleSource::Class(studio_id, class_id), page_size);
                list.set_range(range);
                show_schedule(api, &mut list, page).await;
            }
            Command::Nearby {
                lat,
                long,
                postal_code,
            } => {
                let origin = match (postal_code, lat.zip(long)) {
                    (Some(code), _) => NearbyOrigin::PostalCode(code),
                    (None, Some((lat, long))) => NearbyOrigin::Coordinates(Coordinates::new(lat, long)),
                    (None, None) => {
                        println!(
                            "{}",
                            Notice::info(
                                "Can't get current location",
                                "Showing studios near downtown Toronto.",
                            )
                        );
                        NearbyOrigin::Coordinates(Coordinates::default())
                    }
                };
                let nearby =
                    match studios::find_nearby_studios(api, origin, config.nearby_limit).await {
                        Ok(nearby) => nearby,
                        Err(err) => {
                            print_notice(err.into_notice(LOCATION_FAILED));
                            return Ok(());
                        }
                    };
                for line in studios::nearby_lines(&nearby) {
                    let distance = line.distance.map(|d| format!(" ({d})")).unwrap_or_default();
                    println!(
                        "{}{distance} {}, {} [{}]",
                        line.name, line.address, line.postal_code, line.link
                    );
                }
            }
            Command::SearchStudios {
                name,
                amenities,
                classes,
                coaches,
                page,
            } => {
                let mut search = StudioSearch::new(page_size);
                let form = StudioSearchForm {
                    name,
                    amenities,
                    classes,
                    coaches,
                };
                if let Err(err) = search.submit(&form) {
                    print_notice(err.into_notice("Invalid search"));
                    return Ok(());
                }
                search.refresh(api).await;
                if search.set_page(page) {
                    search.refresh(api).await;
                }
                let lines = search.lines();
                if lines.is_empty() {
                    println!("{NO_RESULTS}");
                }
                for line in lines {
                    println!("{} [{}] {}", line.name, line.link, line.address);
                    if !line.amenities.is_empty() {
                        println!("  Amenities: {}", line.amenities);
                    }
                    if !line.classes.is_empty() {
                        println!("  Classes: {}", line.classes);
                    }
                }
                let result = search.view().result();
                if result.shows_pager() {
                    print_pager(&result.pages(), result.page_index);
                }
            }
            Command::SearchClasses {
                studio_id,
                name,
                coach,
                after,
                before,
                page,
            } => {
                let header = studios::load_studio_header(api, studio_id).await;
                println!("Classes at {}", header.name);
                print_notice(header.notice);

                let mut search = ClassSearch::new(studio_id, page_size);
                let form = ClassSearchForm {
                    name,
                    coach,
                    after,
                    before,
                };
                if let Err(err) = search.submit(&form) {
                    print_notice(err.into_notice("Invalid search"));
                    return Ok(());
                }
                search.refresh(api).await;
                if search.set_page(page) {
                    search.refresh(api).await;
                }
                let lines = search.lines();
                if lines.is_empty() {
                    println!("{NO_RESULTS}");
                }
                for line in lines {
                    println!("{} with {} ({}) [{}]", line.name, line.coach, line.scheduled, line.link);
                }
                let result = search.view().result();
                if result.shows_pager() {
                    print_pager(&result.pages(), result.page_index);
                }
            }
            Command::Enroll {
                studio_id,
                class_id,
                details,
            } => match details {
                Some(details) => {
                    let mut popover = EnrollmentPopover::new(details);
                    popover.load(api).await;
                    if let PopoverState::Failed(message) = popover.state() {
                        println!("{message}");
                        return Ok(());
                    }
                    let notice = popover.toggle(api).await;
                    print_notice(notice);
                    if let Some(text) = popover.availability_text() {
                        println!("{text}");
                    }
                }
                None => {
                    let mut class = studios::get_class(api, studio_id, class_id).await?;
                    let notice = toggle_class_enrollment(api, studio_id, &mut class).await;
                    print_notice(notice);
                    println!("{}", class.enrollment().availability_text());
                }
            },
            Command::Plans => {
                let data = subscriptions::load_plans(api).await?;
                for line in data.lines {
                    let action = match line.action {
                        PlanAction::Unsubscribe => " [unsubscribe]",
                        PlanAction::Resubscribe => " [resubscribe]",
                        PlanAction::None => "",
                    };
                    println!("{}. {}{action}", line.index, line.summary);
                }
            }
            Command::Subscribe {
                plan,
                card_num,
                expiry,
                cvv,
            } => {
                let data = subscriptions::load_plans(api).await?;
                let selected = plan.and_then(|index| data.plans.get(index));
                let result = match selected {
                    Some(plan) if plan.action() == PlanAction::Resubscribe => {
                        subscriptions::resubscribe(api, plan).await
                    }
                    _ => {
                        let payment_info = card_num.map(|card_num| PaymentInfoForm {
                            card_num,
                            expiry: expiry.unwrap_or_default(),
                            cvv: cvv.unwrap_or_default(),
                        });
                        let form = SubscribeForm { plan, payment_info };
                        subscriptions::subscribe(api, &data.plans, &form).await
                    }
                };
                report(result, SUBSCRIBE_FAILED);
            }
            Command::Unsubscribe => {
                report(subscriptions::unsubscribe(api).await, UNSUBSCRIBE_FAILED);
            }
            Command::Payments { page } => {
                let card_num = payments::load_card(api).await?;
                let mut history = PaymentHistory::new(page_size);
                if history.refresh(api).await == FetchOutcome::Failed {
                    println!("Could not load payments.");
                    return Ok(());
                }
                if history.set_page(page) {
                    history.refresh(api).await;
                }
                let data = history.page_data(card_num);
                if data.is_empty() {
                    println!("{NO_PAYMENTS}");
                    return Ok(());
                }
                if !data.card_num.is_empty() {
                    println!("Card on file: {}", data.card_num);
                }
                for line in data.upcoming.iter().chain(data.past.iter()) {
                    println!("{line}");
                }
                if !data.pages.is_empty() {
                    print_pager(&data.pages, data.page);
                }
            }
            Command::Card {
                card_num,
                expiry,
                cvv,
            } => {
                let form = PaymentInfoForm {
                    card_num,
                    expiry,
                    cvv,
                };
                report(
                    payments::update_payment_info(api, &form).await,
                    UPDATE_CARD_FAILED,
                );
            }
        }

        Ok(())
    }
}

async fn show_schedule(api: &HttpApi, list: &mut ScheduleList, page: usize) {
    if list.refresh(api).await == FetchOutcome::Failed {
        println!("Could not load the schedule.");
        return;
    }
    if list.set_page(page) {
        list.refresh(api).await;
    }
    print_schedule(&list.page_data());
}

fn print_schedule(data: &SchedulePageData) {
    if let Some(range) = data.range {
        println!("Next {}", range.label());
    }
    if data.lines.is_empty() {
        println!("There are no classes scheduled in this period.");
    }
    for line in &data.lines {
        match &line.link {
            Some(link) => println!("{} [{link}]", line.text),
            None => println!("{}", line.text),
        }
        println!("  details: {}", line.details);
    }
    if !data.pages.is_empty() {
        print_pager(&data.pages, data.page);
    }
}

fn print_class(class: &ClassDetails) {
    println!("{} with {}", class.name, class.coach);
    if let Some(studio) = &class.studio {
        println!("At {studio}");
    }
    if !class.description.is_empty() {
        println!("{}", class.description);
    }
    println!("{}", class.time_span());
    for rule in &class.schedule {
        println!("  {rule}");
    }
    println!("{}", class.enrollment().availability_text());
}

fn print_pager(pages: &[Option<usize>], current: usize) {
    let labels: Vec<String> = pages
        .iter()
        .map(|page| match page {
            Some(page) if *page == current => format!("[{page}]"),
            Some(page) => page.to_string(),
            None => "…".to_string(),
        })
        .collect();
    println!("Pages: {}", labels.join(" "));
}

fn print_notice(notice: Option<Notice>) {
    if let Some(notice) = notice {
        println!("{notice}");
    }
}

fn report(result: ServiceResult<Notice>, title: &str) {
    match result {
        Ok(notice) => println!("{notice}"),
        Err(err) => print_notice(err.into_notice(title)),
    }
}

/// Like [`report`], listing each rejected field on its own line.
fn report_fields(result: ServiceResult<Notice>, title: &str) {
    match result {
        Err(err) if !err.field_errors().is_empty() => {
            println!("{title}:");
            for field in err.field_errors() {
                println!("  {}: {}", field.field, field.message);
            }
        }
        other => report(other, title),
    }
}

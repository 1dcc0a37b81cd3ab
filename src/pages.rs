//! Server-rendered contact and feedback pages.
//!
//! Browser forms post natively; each post is fed through the matching view
//! and submitted in-process, then the view is rendered back.

use askama::Template;
use axum::{
    extract::{multipart::MultipartRejection, rejection::FormRejection, Multipart, State},
    response::Html,
    routing::get,
    Form, Router,
};
use strum::VariantArray;

use crate::api::feedback::read_feedback_parts;
use crate::client::InProcessClient;
use crate::error::Result;
use crate::models::{ContactForm, ContactType, Service};
use crate::state::AppState;
use crate::validation::FieldErrors;
use crate::views::{ContactFormView, FeedbackFormView, NavShell, Page, SUCCESS_BANNER_DURATION};

struct ChoiceOption {
    value: String,
    label: &'static str,
    selected: bool,
}

struct StarOption {
    value: u8,
    checked: bool,
    lit: bool,
}

struct NoticeView {
    message: &'static str,
    success: bool,
}

#[derive(Template)]
#[template(path = "contact.html")]
struct ContactPage<'a> {
    nav: NavShell,
    form: &'a ContactForm,
    errors: &'a FieldErrors,
    services: Vec<ChoiceOption>,
    contact_types: Vec<ChoiceOption>,
    banner: bool,
    banner_ms: u128,
    alert: Option<&'a str>,
}

#[derive(Template)]
#[template(path = "feedback.html")]
struct FeedbackPage<'a> {
    nav: NavShell,
    stars: Vec<StarOption>,
    feedback: &'a str,
    submitting: bool,
    notice: Option<NoticeView>,
}

/// Page routes
pub fn page_routes() -> Router<AppState> {
    Router::new()
        .route(Page::Contact.href(), get(contact_page).post(submit_contact_page))
        .route(Page::Feedback.href(), get(feedback_page).post(submit_feedback_page))
}

fn render_contact(view: &ContactFormView) -> Result<Html<String>> {
    let form = view.form();

    let page = ContactPage {
        nav: NavShell::new(Page::Contact),
        form,
        errors: view.errors(),
        services: Service::VARIANTS
            .iter()
            .map(|s| ChoiceOption {
                value: s.to_string(),
                label: s.label(),
                selected: form.service == s.to_string(),
            })
            .collect(),
        contact_types: ContactType::VARIANTS
            .iter()
            .map(|c| ChoiceOption {
                value: c.to_string(),
                label: c.label(),
                selected: form.contact_type == c.to_string(),
            })
            .collect(),
        banner: view.banner_visible(),
        banner_ms: SUCCESS_BANNER_DURATION.as_millis(),
        alert: view.alert(),
    };

    Ok(Html(page.render()?))
}

fn render_feedback(view: &FeedbackFormView) -> Result<Html<String>> {
    // Highest star first; the stylesheet lays them out in reverse.
    let stars = (1..=5u8)
        .rev()
        .map(|value| StarOption {
            value,
            checked: view.rating() == value,
            lit: view.is_star_lit(value),
        })
        .collect();

    let page = FeedbackPage {
        nav: NavShell::new(Page::Feedback),
        stars,
        feedback: view.feedback(),
        submitting: view.is_submitting(),
        notice: view.notice().map(|n| NoticeView {
            message: n.message(),
            success: n.is_success(),
        }),
    };

    Ok(Html(page.render()?))
}

/// GET / - Contact form
async fn contact_page() -> Result<Html<String>> {
    render_contact(&ContactFormView::new())
}

/// POST / - Contact form post from the browser
async fn submit_contact_page(
    State(state): State<AppState>,
    form: std::result::Result<Form<ContactForm>, FormRejection>,
) -> Result<Html<String>> {
    let Form(form) = form?;

    let mut view = ContactFormView::new();
    view.fill(form);

    let client = InProcessClient::new(state.relay.clone());
    let outcome = view.submit(&client).await;
    tracing::debug!(?outcome, "Contact page submitted");

    render_contact(&view)
}

/// GET /feedback - Feedback form
async fn feedback_page() -> Result<Html<String>> {
    render_feedback(&FeedbackFormView::new())
}

/// POST /feedback - Feedback form post from the browser
async fn submit_feedback_page(
    State(state): State<AppState>,
    multipart: std::result::Result<Multipart, MultipartRejection>,
) -> Result<Html<String>> {
    let parts = read_feedback_parts(multipart?).await?;

    let mut view = FeedbackFormView::new();
    if let Some(star) = parts.rating.as_deref().and_then(|r| r.trim().parse::<u8>().ok()) {
        view.click_star(star);
    }
    view.set_feedback(parts.feedback.unwrap_or_default());
    view.set_file(parts.file);

    let client = InProcessClient::new(state.relay.clone());
    let notice = view.submit(&client).await;
    tracing::debug!(?notice, "Feedback page submitted");

    render_feedback(&view)
}

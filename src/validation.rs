//! Field rules shared by the form views and the submission handlers.

use std::collections::BTreeMap;
use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::models::{
    Attachment, ContactForm, ContactSubmission, ContactType, FeedbackSubmission, Rating, Service,
};

/// Exact length of a mobile number.
pub const MOBILE_DIGITS: usize = 10;

pub const RATING_REQUIRED: &str = "Please select a rating";
pub const FEEDBACK_REQUIRED: &str = "Feedback is required";

static EMAIL_SHAPE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\S+@\S+\.\S+").expect("email pattern is valid"));

/// Contact form fields, named as on the wire
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContactField {
    FirstName,
    LastName,
    Email,
    Mobile,
    Service,
    ContactType,
    Feedback,
}

impl ContactField {
    pub const ALL: [ContactField; 7] = [
        ContactField::FirstName,
        ContactField::LastName,
        ContactField::Email,
        ContactField::Mobile,
        ContactField::Service,
        ContactField::ContactType,
        ContactField::Feedback,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ContactField::FirstName => "firstName",
            ContactField::LastName => "lastName",
            ContactField::Email => "email",
            ContactField::Mobile => "mobile",
            ContactField::Service => "service",
            ContactField::ContactType => "contactType",
            ContactField::Feedback => "feedback",
        }
    }
}

/// Per-field error messages keyed by wire field name
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<String, String>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, field: &str, message: impl Into<String>) {
        self.0.insert(field.to_string(), message.into());
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    pub fn contains(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    pub fn clear_field(&mut self, field: &str) {
        self.0.remove(field);
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }
}

/// True when `value` contains `<non-space>@<non-space>.<non-space>`.
pub fn is_email_shaped(value: &str) -> bool {
    EMAIL_SHAPE.is_match(value)
}

/// Strip everything but ASCII digits from a mobile number as it is typed.
///
/// Returns `None` when the digits would exceed [`MOBILE_DIGITS`], in which
/// case the input change is rejected as a whole.
pub fn sanitize_mobile(input: &str) -> Option<String> {
    let digits: String = input.chars().filter(|c| c.is_ascii_digit()).collect();
    (digits.len() <= MOBILE_DIGITS).then_some(digits)
}

fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

/// Validate a contact form, producing the submission or every failing field.
pub fn validate_contact(form: &ContactForm) -> Result<ContactSubmission, FieldErrors> {
    let mut errors = FieldErrors::new();

    if is_blank(&form.first_name) {
        errors.insert(ContactField::FirstName.as_str(), "First name is required");
    }
    if is_blank(&form.last_name) {
        errors.insert(ContactField::LastName.as_str(), "Last name is required");
    }

    if is_blank(&form.email) {
        errors.insert(ContactField::Email.as_str(), "Email is required");
    } else if !is_email_shaped(&form.email) {
        errors.insert(ContactField::Email.as_str(), "Email is invalid");
    }

    if is_blank(&form.mobile) {
        errors.insert(ContactField::Mobile.as_str(), "Mobile number is required");
    } else if form.mobile.len() != MOBILE_DIGITS
        || !form.mobile.chars().all(|c| c.is_ascii_digit())
    {
        errors.insert(
            ContactField::Mobile.as_str(),
            "Mobile number must be exactly 10 digits",
        );
    }

    let service = Service::from_str(&form.service).ok();
    if service.is_none() {
        errors.insert(ContactField::Service.as_str(), "Please select a service");
    }

    let contact_type = ContactType::from_str(&form.contact_type).ok();
    if contact_type.is_none() {
        errors.insert(
            ContactField::ContactType.as_str(),
            "Please select a contact method",
        );
    }

    if is_blank(&form.feedback) {
        errors.insert(ContactField::Feedback.as_str(), FEEDBACK_REQUIRED);
    }

    match (service, contact_type) {
        (Some(service), Some(contact_type)) if errors.is_empty() => Ok(ContactSubmission {
            first_name: form.first_name.clone(),
            last_name: form.last_name.clone(),
            email: form.email.clone(),
            mobile: form.mobile.clone(),
            service,
            contact_type,
            feedback: form.feedback.clone(),
        }),
        _ => Err(errors),
    }
}

/// Validate raw feedback fields as received from a form post.
pub fn validate_feedback(
    rating: Option<&str>,
    feedback: Option<&str>,
    file: Option<Attachment>,
) -> Result<FeedbackSubmission, FieldErrors> {
    let mut errors = FieldErrors::new();

    let rating = rating.and_then(|r| r.parse::<Rating>().ok());
    if rating.is_none() {
        errors.insert("rating", RATING_REQUIRED);
    }

    let feedback = feedback.unwrap_or_default();
    if is_blank(feedback) {
        errors.insert("feedback", FEEDBACK_REQUIRED);
    }

    match rating {
        Some(rating) if errors.is_empty() => Ok(FeedbackSubmission {
            rating,
            feedback: feedback.to_string(),
            file,
        }),
        _ => Err(errors),
    }
}

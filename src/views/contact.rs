use crate::client::SubmissionClient;
use crate::models::{ContactForm, ContactSubmission};
use crate::validation::{sanitize_mobile, validate_contact, ContactField, FieldErrors};

use super::banner::{SuccessBanner, SUCCESS_BANNER_DURATION};

pub const CONTACT_FAILURE_ALERT: &str = "Something went wrong!";

/// What a contact submit attempt ended in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContactOutcome {
    /// Local validation failed; nothing was sent.
    Invalid,
    Sent,
    Failed,
}

/// State behind the contact form: values, inline errors, banner and alert
#[derive(Debug, Default)]
pub struct ContactFormView {
    form: ContactForm,
    errors: FieldErrors,
    banner: SuccessBanner,
    alert: Option<String>,
}

impl ContactFormView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn form(&self) -> &ContactForm {
        &self.form
    }

    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    pub fn error(&self, field: ContactField) -> Option<&str> {
        self.errors.get(field.as_str())
    }

    pub fn alert(&self) -> Option<&str> {
        self.alert.as_deref()
    }

    pub fn banner_visible(&self) -> bool {
        self.banner.is_visible()
    }

    pub fn value(&self, field: ContactField) -> &str {
        match field {
            ContactField::FirstName => &self.form.first_name,
            ContactField::LastName => &self.form.last_name,
            ContactField::Email => &self.form.email,
            ContactField::Mobile => &self.form.mobile,
            ContactField::Service => &self.form.service,
            ContactField::ContactType => &self.form.contact_type,
            ContactField::Feedback => &self.form.feedback,
        }
    }

    /// Apply an input change and clear that field's error.
    ///
    /// Mobile input keeps digits only; a change that would leave more than ten
    /// digits is ignored. Returns whether the change was accepted.
    pub fn set_field(&mut self, field: ContactField, value: &str) -> bool {
        let value = match field {
            ContactField::Mobile => match sanitize_mobile(value) {
                Some(digits) => digits,
                None => return false,
            },
            _ => value.to_string(),
        };

        let slot = match field {
            ContactField::FirstName => &mut self.form.first_name,
            ContactField::LastName => &mut self.form.last_name,
            ContactField::Email => &mut self.form.email,
            ContactField::Mobile => &mut self.form.mobile,
            ContactField::Service => &mut self.form.service,
            ContactField::ContactType => &mut self.form.contact_type,
            ContactField::Feedback => &mut self.form.feedback,
        };
        *slot = value;
        self.errors.clear_field(field.as_str());
        true
    }

    /// Feed every value of `form` through [`Self::set_field`].
    ///
    /// A posted mobile number is already complete, so one with too many digits
    /// is kept (digits only) for validation to report rather than ignored.
    pub fn fill(&mut self, form: ContactForm) {
        let ContactForm {
            first_name,
            last_name,
            email,
            mobile,
            service,
            contact_type,
            feedback,
        } = form;

        self.set_field(ContactField::FirstName, &first_name);
        self.set_field(ContactField::LastName, &last_name);
        self.set_field(ContactField::Email, &email);
        if !self.set_field(ContactField::Mobile, &mobile) {
            self.form.mobile = mobile.chars().filter(|c| c.is_ascii_digit()).collect();
            self.errors.clear_field(ContactField::Mobile.as_str());
        }
        self.set_field(ContactField::Service, &service);
        self.set_field(ContactField::ContactType, &contact_type);
        self.set_field(ContactField::Feedback, &feedback);
    }

    /// Run the rule set, replacing the inline errors.
    pub fn validate(&mut self) -> Option<ContactSubmission> {
        match validate_contact(&self.form) {
            Ok(submission) => {
                self.errors.clear();
                Some(submission)
            }
            Err(errors) => {
                self.errors = errors;
                None
            }
        }
    }

    pub fn reset(&mut self) {
        self.form = ContactForm::default();
        self.errors.clear();
    }

    /// Validate, then send at most one request.
    ///
    /// Success shows the banner and clears the form; failure raises the alert
    /// and keeps every value.
    pub async fn submit<C>(&mut self, client: &C) -> ContactOutcome
    where
        C: SubmissionClient + ?Sized,
    {
        self.alert = None;

        let Some(submission) = self.validate() else {
            return ContactOutcome::Invalid;
        };

        match client.submit_contact(&submission).await {
            Ok(()) => {
                self.banner.show(SUCCESS_BANNER_DURATION);
                self.reset();
                ContactOutcome::Sent
            }
            Err(e) => {
                tracing::warn!(error = %e, "Contact submission failed");
                self.alert = Some(CONTACT_FAILURE_ALERT.to_string());
                ContactOutcome::Failed
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::ClientError;
    use crate::models::FeedbackSubmission;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Default)]
    struct CountingClient {
        calls: AtomicUsize,
        fail: bool,
    }

    #[async_trait::async_trait]
    impl SubmissionClient for CountingClient {
        async fn submit_contact(&self, _: &ContactSubmission) -> Result<(), ClientError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                Err(ClientError::Rejected { status: 500 })
            } else {
                Ok(())
            }
        }

        async fn submit_feedback(&self, _: FeedbackSubmission) -> Result<(), ClientError> {
            unreachable!("contact view never sends feedback")
        }
    }

    fn filled_view() -> ContactFormView {
        let mut view = ContactFormView::new();
        view.set_field(ContactField::FirstName, "Ann");
        view.set_field(ContactField::LastName, "Lee");
        view.set_field(ContactField::Email, "ann@example.com");
        view.set_field(ContactField::Mobile, "9876543210");
        view.set_field(ContactField::Service, "web");
        view.set_field(ContactField::ContactType, "email");
        view.set_field(ContactField::Feedback, "Great service");
        view
    }

    #[test]
    fn test_mobile_input_keeps_digits_only() {
        let mut view = ContactFormView::new();

        assert!(view.set_field(ContactField::Mobile, "(987) 654-32"));
        assert_eq!(view.value(ContactField::Mobile), "98765432");

        assert!(view.set_field(ContactField::Mobile, "9876543210"));
        assert!(!view.set_field(ContactField::Mobile, "98765432109"));
        assert_eq!(view.value(ContactField::Mobile), "9876543210");

        assert!(!view.set_field(ContactField::Mobile, "+1 987 654 3210"));
        assert_eq!(view.value(ContactField::Mobile), "9876543210");
    }

    #[test]
    fn test_editing_a_field_clears_its_error() {
        let mut view = ContactFormView::new();
        assert!(view.validate().is_none());
        assert_eq!(view.error(ContactField::FirstName), Some("First name is required"));

        view.set_field(ContactField::FirstName, "A");
        assert_eq!(view.error(ContactField::FirstName), None);
        assert_eq!(view.error(ContactField::LastName), Some("Last name is required"));
    }

    #[tokio::test]
    async fn test_invalid_form_sends_nothing() {
        let client = CountingClient::default();
        let mut view = filled_view();
        view.set_field(ContactField::Email, "not-an-email");
        view.set_field(ContactField::Feedback, " ");

        let outcome = view.submit(&client).await;

        assert_eq!(outcome, ContactOutcome::Invalid);
        assert_eq!(client.calls.load(Ordering::SeqCst), 0);
        let failing: Vec<&str> = view.errors().fields().collect();
        assert_eq!(failing, vec!["email", "feedback"]);
        assert_eq!(view.value(ContactField::FirstName), "Ann");
    }

    #[tokio::test(start_paused = true)]
    async fn test_success_resets_and_shows_banner() {
        let client = CountingClient::default();
        let mut view = filled_view();

        let outcome = view.submit(&client).await;

        assert_eq!(outcome, ContactOutcome::Sent);
        assert_eq!(client.calls.load(Ordering::SeqCst), 1);
        assert_eq!(view.form(), &ContactForm::default());
        assert!(view.errors().is_empty());
        assert!(view.alert().is_none());
        assert!(view.banner_visible());

        tokio::time::sleep(SUCCESS_BANNER_DURATION + std::time::Duration::from_millis(10)).await;
        assert!(!view.banner_visible());
    }

    #[tokio::test]
    async fn test_failure_keeps_fields_and_alerts() {
        let client = CountingClient {
            fail: true,
            ..Default::default()
        };
        let mut view = filled_view();

        let outcome = view.submit(&client).await;

        assert_eq!(outcome, ContactOutcome::Failed);
        assert_eq!(view.alert(), Some(CONTACT_FAILURE_ALERT));
        assert_eq!(view.value(ContactField::Email), "ann@example.com");
        assert!(!view.banner_visible());
    }

    #[test]
    fn test_fill_sanitizes_mobile() {
        let mut view = ContactFormView::new();
        view.fill(ContactForm {
            mobile: "987-654-3210".to_string(),
            ..Default::default()
        });
        assert_eq!(view.value(ContactField::Mobile), "9876543210");
    }

    #[test]
    fn test_fill_keeps_overlong_mobile_for_validation() {
        let mut view = ContactFormView::new();
        view.fill(ContactForm {
            mobile: "987-654-32101".to_string(),
            ..Default::default()
        });
        assert_eq!(view.value(ContactField::Mobile), "98765432101");

        assert!(view.validate().is_none());
        assert_eq!(
            view.error(ContactField::Mobile),
            Some("Mobile number must be exactly 10 digits")
        );
    }
}

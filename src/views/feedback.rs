use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::client::{ClientError, SubmissionClient};
use crate::models::{Attachment, FeedbackSubmission, Rating};
use crate::validation::{FEEDBACK_REQUIRED, RATING_REQUIRED};

/// Result notice shown after a feedback submit attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedbackNotice {
    Sent,
    Failed,
    Error,
    MissingRating,
    MissingFeedback,
}

impl FeedbackNotice {
    pub fn message(&self) -> &'static str {
        match self {
            FeedbackNotice::Sent => "✅ Thank you! Your feedback was sent.",
            FeedbackNotice::Failed => "❌ Failed to send feedback.",
            FeedbackNotice::Error => "⚠️ Something went wrong.",
            FeedbackNotice::MissingRating => RATING_REQUIRED,
            FeedbackNotice::MissingFeedback => FEEDBACK_REQUIRED,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, FeedbackNotice::Sent)
    }
}

/// Lowers the in-flight flag when dropped, whatever happened to the request.
#[derive(Debug)]
struct InFlightGuard(Arc<AtomicBool>);

impl Drop for InFlightGuard {
    fn drop(&mut self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

/// A submission that owns the in-flight slot until it is sent or dropped
#[derive(Debug)]
pub struct SubmitTicket {
    submission: FeedbackSubmission,
    _guard: InFlightGuard,
}

impl SubmitTicket {
    pub async fn send<C>(self, client: &C) -> Result<(), ClientError>
    where
        C: SubmissionClient + ?Sized,
    {
        let SubmitTicket { submission, _guard } = self;
        client.submit_feedback(submission).await
    }
}

/// State behind the star-rating feedback form
#[derive(Debug, Default)]
pub struct FeedbackFormView {
    rating: u8,
    hovered: u8,
    feedback: String,
    file: Option<Attachment>,
    in_flight: Arc<AtomicBool>,
    notice: Option<FeedbackNotice>,
}

impl FeedbackFormView {
    pub fn new() -> Self {
        Self::default()
    }

    /// Selected rating, 0 when unset.
    pub fn rating(&self) -> u8 {
        self.rating
    }

    pub fn feedback(&self) -> &str {
        &self.feedback
    }

    pub fn file(&self) -> Option<&Attachment> {
        self.file.as_ref()
    }

    pub fn notice(&self) -> Option<FeedbackNotice> {
        self.notice
    }

    pub fn is_submitting(&self) -> bool {
        self.in_flight.load(Ordering::SeqCst)
    }

    pub fn click_star(&mut self, star: u8) {
        if Rating::new(star).is_some() {
            self.rating = star;
        }
    }

    pub fn hover_star(&mut self, star: u8) {
        if Rating::new(star).is_some() {
            self.hovered = star;
        }
    }

    pub fn leave_stars(&mut self) {
        self.hovered = 0;
    }

    /// Hover preview wins over the selected rating.
    pub fn is_star_lit(&self, star: u8) -> bool {
        let shown = if self.hovered != 0 { self.hovered } else { self.rating };
        shown >= star
    }

    pub fn set_feedback(&mut self, feedback: impl Into<String>) {
        self.feedback = feedback.into();
    }

    pub fn set_file(&mut self, file: Option<Attachment>) {
        self.file = file;
    }

    /// Claim the in-flight slot and snapshot the payload.
    ///
    /// `None` while another request is in flight, or when the rating or the
    /// comment is missing (the notice says which).
    pub fn begin_submit(&mut self) -> Option<SubmitTicket> {
        if self.is_submitting() {
            return None;
        }

        let Some(rating) = Rating::new(self.rating) else {
            self.notice = Some(FeedbackNotice::MissingRating);
            return None;
        };
        if self.feedback.trim().is_empty() {
            self.notice = Some(FeedbackNotice::MissingFeedback);
            return None;
        }

        self.in_flight
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .ok()?;

        self.notice = None;
        Some(SubmitTicket {
            submission: FeedbackSubmission {
                rating,
                feedback: self.feedback.clone(),
                file: self.file.clone(),
            },
            _guard: InFlightGuard(Arc::clone(&self.in_flight)),
        })
    }

    /// Apply the outcome of a sent ticket.
    pub fn finish(&mut self, result: Result<(), ClientError>) -> FeedbackNotice {
        let notice = match result {
            Ok(()) => {
                self.rating = 0;
                self.feedback.clear();
                self.file = None;
                FeedbackNotice::Sent
            }
            Err(ClientError::Rejected { status }) => {
                tracing::warn!(status, "Feedback submission rejected");
                FeedbackNotice::Failed
            }
            Err(e) => {
                tracing::warn!(error = %e, "Feedback submission error");
                FeedbackNotice::Error
            }
        };

        self.notice = Some(notice);
        notice
    }

    /// Submit once; `None` when a request is already in flight.
    pub async fn submit<C>(&mut self, client: &C) -> Option<FeedbackNotice>
    where
        C: SubmissionClient + ?Sized,
    {
        if self.is_submitting() {
            return None;
        }

        let Some(ticket) = self.begin_submit() else {
            return self.notice;
        };
        let result = ticket.send(client).await;
        Some(self.finish(result))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ContactSubmission;
    use crate::validation::validate_feedback;
    use std::sync::atomic::AtomicUsize;
    use std::sync::Mutex;

    #[derive(Default)]
    struct RecordingClient {
        calls: AtomicUsize,
        received: Mutex<Vec<FeedbackSubmission>>,
        outcome: Option<fn() -> ClientError>,
    }

    #[async_trait::async_trait]
    impl SubmissionClient for RecordingClient {
        async fn submit_contact(&self, _: &ContactSubmission) -> Result<(), ClientError> {
            unreachable!("feedback view never sends contact requests")
        }

        async fn submit_feedback(&self, submission: FeedbackSubmission) -> Result<(), ClientError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.received.lock().unwrap().push(submission);
            match self.outcome {
                Some(err) => Err(err()),
                None => Ok(()),
            }
        }
    }

    fn ready_view() -> FeedbackFormView {
        let mut view = FeedbackFormView::new();
        view.click_star(4);
        view.set_feedback("Good");
        view
    }

    #[test]
    fn test_star_selection_and_hover_preview() {
        let mut view = FeedbackFormView::new();
        assert_eq!(view.rating(), 0);
        assert!(!view.is_star_lit(1));

        view.click_star(3);
        assert!(view.is_star_lit(3));
        assert!(!view.is_star_lit(4));

        view.hover_star(5);
        assert!(view.is_star_lit(5));
        assert_eq!(view.rating(), 3);

        view.hover_star(1);
        assert!(!view.is_star_lit(2));

        view.leave_stars();
        assert!(view.is_star_lit(3));

        view.click_star(9);
        assert_eq!(view.rating(), 3);
    }

    #[tokio::test]
    async fn test_success_resets_the_form() {
        let client = RecordingClient::default();
        let mut view = ready_view();
        view.set_file(Some(Attachment::new("a.png", vec![7, 7, 7])));

        let notice = view.submit(&client).await;

        assert_eq!(notice, Some(FeedbackNotice::Sent));
        assert_eq!(view.rating(), 0);
        assert_eq!(view.feedback(), "");
        assert!(view.file().is_none());
        assert!(!view.is_submitting());

        let received = client.received.lock().unwrap();
        assert_eq!(received[0].rating.get(), 4);
        assert_eq!(received[0].file.as_ref().map(|f| f.content.clone()), Some(vec![7, 7, 7]));
    }

    #[tokio::test]
    async fn test_rejection_and_transport_errors() {
        let client = RecordingClient {
            outcome: Some(|| ClientError::Rejected { status: 500 }),
            ..Default::default()
        };
        let mut view = ready_view();
        assert_eq!(view.submit(&client).await, Some(FeedbackNotice::Failed));
        assert_eq!(view.rating(), 4);
        assert_eq!(view.feedback(), "Good");
        assert!(!view.is_submitting());

        let client = RecordingClient {
            outcome: Some(|| ClientError::Transport("connection refused".to_string())),
            ..Default::default()
        };
        assert_eq!(view.submit(&client).await, Some(FeedbackNotice::Error));
        assert_eq!(view.notice().map(|n| n.message()), Some("⚠️ Something went wrong."));
        assert!(!view.is_submitting());
    }

    #[tokio::test]
    async fn test_missing_rating_sends_nothing() {
        let client = RecordingClient::default();
        let mut view = FeedbackFormView::new();
        view.set_feedback("Good");

        assert_eq!(view.submit(&client).await, Some(FeedbackNotice::MissingRating));
        assert_eq!(client.calls.load(Ordering::SeqCst), 0);

        let server_errors = validate_feedback(None, Some("Good"), None)
            .expect_err("Missing rating is rejected");
        assert_eq!(
            view.notice().map(|n| n.message()),
            server_errors.get("rating")
        );
    }

    #[tokio::test]
    async fn test_double_submit_is_debounced() {
        let client = RecordingClient::default();
        let mut view = ready_view();

        let ticket = view.begin_submit().expect("First submit should start");
        assert!(view.is_submitting());
        assert!(view.begin_submit().is_none());
        assert_eq!(view.submit(&client).await, None);
        assert_eq!(client.calls.load(Ordering::SeqCst), 0);

        let result = ticket.send(&client).await;
        assert!(!view.is_submitting());
        view.finish(result);

        assert_eq!(client.calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_dropped_ticket_releases_the_flag() {
        let mut view = ready_view();
        let ticket = view.begin_submit().expect("Should start");
        assert!(view.is_submitting());

        drop(ticket);
        assert!(!view.is_submitting());
        assert!(view.begin_submit().is_some());
    }
}

//! Headless form views: values, local validation and submit state.

pub mod banner;
pub mod contact;
pub mod feedback;
pub mod nav;

pub use banner::{SuccessBanner, SUCCESS_BANNER_DURATION};
pub use contact::{ContactFormView, ContactOutcome, CONTACT_FAILURE_ALERT};
pub use feedback::{FeedbackFormView, FeedbackNotice, SubmitTicket};
pub use nav::{NavLink, NavShell, Page};

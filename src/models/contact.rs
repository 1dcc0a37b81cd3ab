use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString, VariantArray};

/// Contact form values exactly as typed (or as received on the wire)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ContactForm {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub mobile: String,
    pub service: String,
    pub contact_type: String,
    pub feedback: String,
}

/// A contact request that passed validation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactSubmission {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub mobile: String,
    pub service: Service,
    pub contact_type: ContactType,
    pub feedback: String,
}

/// Services offered on the contact form
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    EnumString,
    Display,
    AsRefStr,
    VariantArray,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Service {
    Web,
    Design,
    Marketing,
}

impl Service {
    pub fn label(&self) -> &'static str {
        match self {
            Service::Web => "Web Development",
            Service::Design => "UI/UX Design",
            Service::Marketing => "Digital Marketing",
        }
    }
}

/// How the visitor prefers to be contacted
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    EnumString,
    Display,
    AsRefStr,
    VariantArray,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ContactType {
    Email,
    Phone,
}

impl ContactType {
    pub fn label(&self) -> &'static str {
        match self {
            ContactType::Email => "Email",
            ContactType::Phone => "Phone",
        }
    }
}

impl From<ContactSubmission> for ContactForm {
    fn from(submission: ContactSubmission) -> Self {
        Self {
            first_name: submission.first_name,
            last_name: submission.last_name,
            email: submission.email,
            mobile: submission.mobile,
            service: submission.service.to_string(),
            contact_type: submission.contact_type.to_string(),
            feedback: submission.feedback,
        }
    }
}

//! Personal and professional profile records.
//!
//! # Responsibility
//! - Define the two per-account profile forms persisted by the store.
//! - Validate required fields when a form is submitted.
//!
//! # Invariants
//! - Both records are replaced wholesale on every save, never merged.
//! - Image fields hold data URIs and are optional.
//! - Stored `industry`/`experience` stay free strings; only submission is
//!   checked against the catalogues below.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("valid email regex"));

/// Industries offered by the professional form and the gallery filter.
pub const INDUSTRIES: &[&str] = &[
    "Technology",
    "Healthcare",
    "Finance",
    "Education",
    "Marketing",
    "Consulting",
    "Other",
];

/// Experience brackets offered by the professional form.
pub const EXPERIENCE_LEVELS: &[&str] = &[
    "0-1 years",
    "1-3 years",
    "3-5 years",
    "5-10 years",
    "10+ years",
];

/// Form-boundary validation failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    MissingField(&'static str),
    InvalidEmail(String),
    UnknownIndustry(String),
    UnknownExperience(String),
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingField(field) => write!(f, "required field `{field}` is empty"),
            Self::InvalidEmail(value) => write!(f, "invalid email address `{value}`"),
            Self::UnknownIndustry(value) => write!(f, "unknown industry `{value}`"),
            Self::UnknownExperience(value) => write!(f, "unknown experience level `{value}`"),
        }
    }
}

impl Error for ValidationError {}

/// Contact details shown on the front of a card.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonalData {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub zip_code: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
}

impl PersonalData {
    /// Checks the fields the personal form marks as required.
    pub fn validate(&self) -> Result<(), ValidationError> {
        require("name", &self.name)?;
        require("email", &self.email)?;
        require("phone", &self.phone)?;
        require("address", &self.address)?;
        require("city", &self.city)?;
        require("state", &self.state)?;
        require("zipCode", &self.zip_code)?;

        if !EMAIL_RE.is_match(self.email.trim()) {
            return Err(ValidationError::InvalidEmail(self.email.clone()));
        }
        Ok(())
    }
}

/// Which ordered list of a professional profile to edit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListField {
    Skills,
    Services,
    Products,
}

impl ListField {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Skills => "skills",
            Self::Services => "services",
            Self::Products => "products",
        }
    }

    /// Accepts plural or singular names in any case.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "skills" | "skill" => Some(Self::Skills),
            "services" | "service" => Some(Self::Services),
            "products" | "product" => Some(Self::Products),
            _ => None,
        }
    }
}

/// Career details shown on the back of a card and in the gallery.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfessionalData {
    pub job_title: String,
    pub company: String,
    pub industry: String,
    pub experience: String,
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default)]
    pub services: Vec<String>,
    #[serde(default)]
    pub products: Vec<String>,
    #[serde(default)]
    pub website: String,
    #[serde(default, rename = "linkedIn")]
    pub linked_in: String,
    #[serde(default)]
    pub portfolio: String,
    #[serde(default)]
    pub bio: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company_logo: Option<String>,
}

impl ProfessionalData {
    /// Checks required fields and the industry/experience catalogues.
    pub fn validate(&self) -> Result<(), ValidationError> {
        require("jobTitle", &self.job_title)?;
        require("company", &self.company)?;
        require("industry", &self.industry)?;
        require("experience", &self.experience)?;

        if !INDUSTRIES.contains(&self.industry.as_str()) {
            return Err(ValidationError::UnknownIndustry(self.industry.clone()));
        }
        if !EXPERIENCE_LEVELS.contains(&self.experience.as_str()) {
            return Err(ValidationError::UnknownExperience(self.experience.clone()));
        }
        Ok(())
    }

    /// Appends a trimmed entry; blank input is ignored.
    ///
    /// Returns whether an entry was added.
    pub fn add_item(&mut self, field: ListField, value: &str) -> bool {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return false;
        }
        self.list_mut(field).push(trimmed.to_string());
        true
    }

    /// Removes the entry at `index`, returning it when present.
    pub fn remove_item(&mut self, field: ListField, index: usize) -> Option<String> {
        let list = self.list_mut(field);
        if index < list.len() {
            Some(list.remove(index))
        } else {
            None
        }
    }

    fn list_mut(&mut self, field: ListField) -> &mut Vec<String> {
        match field {
            ListField::Skills => &mut self.skills,
            ListField::Services => &mut self.services,
            ListField::Products => &mut self.products,
        }
    }
}

fn require(field: &'static str, value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::MissingField(field));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{ListField, PersonalData, ProfessionalData, ValidationError};

    fn personal() -> PersonalData {
        PersonalData {
            name: "Ada Lovelace".to_string(),
            email: "ada@example.com".to_string(),
            phone: "555-0100".to_string(),
            address: "1 Analytical Way".to_string(),
            city: "London".to_string(),
            state: "LDN".to_string(),
            zip_code: "NW1".to_string(),
            avatar: None,
        }
    }

    #[test]
    fn personal_validation_reports_first_missing_field() {
        let mut data = personal();
        data.city = "  ".to_string();
        assert_eq!(data.validate(), Err(ValidationError::MissingField("city")));
    }

    #[test]
    fn personal_validation_rejects_malformed_email() {
        let mut data = personal();
        data.email = "ada-at-example".to_string();
        assert!(matches!(
            data.validate(),
            Err(ValidationError::InvalidEmail(_))
        ));
        assert!(personal().validate().is_ok());
    }

    #[test]
    fn professional_validation_checks_catalogues() {
        let mut data = ProfessionalData {
            job_title: "Engineer".to_string(),
            company: "Engines Ltd".to_string(),
            industry: "Technology".to_string(),
            experience: "3-5 years".to_string(),
            ..ProfessionalData::default()
        };
        assert!(data.validate().is_ok());

        data.industry = "Alchemy".to_string();
        assert_eq!(
            data.validate(),
            Err(ValidationError::UnknownIndustry("Alchemy".to_string()))
        );
    }

    #[test]
    fn list_edits_trim_and_skip_blank_values() {
        let mut data = ProfessionalData::default();
        assert!(data.add_item(ListField::Skills, "  Rust "));
        assert!(!data.add_item(ListField::Skills, "   "));
        assert!(data.add_item(ListField::Services, "Audits"));
        assert_eq!(data.skills, vec!["Rust".to_string()]);

        assert_eq!(data.remove_item(ListField::Skills, 3), None);
        assert_eq!(
            data.remove_item(ListField::Services, 0),
            Some("Audits".to_string())
        );
        assert!(data.services.is_empty());
    }

    #[test]
    fn camel_case_field_names_match_store_layout() {
        let json = serde_json::to_value(personal()).unwrap();
        assert_eq!(json["zipCode"], "NW1");
        assert!(json.get("avatar").is_none());

        let pro: ProfessionalData = serde_json::from_str(
            r#"{"jobTitle":"CTO","company":"X","industry":"Finance","experience":"10+ years","linkedIn":"in/x"}"#,
        )
        .unwrap();
        assert_eq!(pro.linked_in, "in/x");
        assert!(pro.skills.is_empty());
    }
}

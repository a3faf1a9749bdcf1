//! Gallery search and filters over published cards.
//!
//! # Invariants
//! - Active filters combine with logical AND.
//! - Blank search text or industry counts as "no filter".
//! - Input order is preserved.

use crate::model::account::AccountType;
use crate::service::catalog_service::PublishedCard;

/// Gallery filter state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GalleryFilter {
    /// Case-insensitive substring over name, job title, company, skills and
    /// services.
    pub search: Option<String>,
    /// Exact industry match.
    pub industry: Option<String>,
    pub account_type: Option<AccountType>,
}

impl GalleryFilter {
    pub fn is_empty(&self) -> bool {
        active_text(self.search.as_deref()).is_none()
            && active_text(self.industry.as_deref()).is_none()
            && self.account_type.is_none()
    }

    /// Returns whether one card passes every active filter.
    pub fn matches(&self, card: &PublishedCard) -> bool {
        if let Some(term) = active_text(self.search.as_deref()) {
            if !matches_search(card, &term.to_lowercase()) {
                return false;
            }
        }

        if let Some(industry) = active_text(self.industry.as_deref()) {
            if card.professional.industry != industry {
                return false;
            }
        }

        if let Some(account_type) = self.account_type {
            if card.account.account_type != account_type {
                return false;
            }
        }

        true
    }
}

/// Keeps the cards that pass `filter`, in input order.
pub fn filter_cards(cards: &[PublishedCard], filter: &GalleryFilter) -> Vec<PublishedCard> {
    cards
        .iter()
        .filter(|card| filter.matches(card))
        .cloned()
        .collect()
}

fn active_text(value: Option<&str>) -> Option<&str> {
    value.filter(|text| !text.trim().is_empty())
}

fn matches_search(card: &PublishedCard, needle: &str) -> bool {
    let contains = |haystack: &str| haystack.to_lowercase().contains(needle);
    let professional = &card.professional;

    contains(&card.personal.name)
        || contains(&professional.job_title)
        || contains(&professional.company)
        || professional.skills.iter().any(|skill| contains(skill))
        || professional.services.iter().any(|service| contains(service))
}

#[cfg(test)]
mod tests {
    use super::{filter_cards, GalleryFilter};
    use crate::model::account::{Account, AccountType};
    use crate::model::card::{CardRecord, CardTemplate};
    use crate::model::profile::{PersonalData, ProfessionalData};
    use crate::service::catalog_service::PublishedCard;

    fn card(id: &str, name: &str, industry: &str, skills: &[&str], kind: AccountType) -> PublishedCard {
        let account = Account::new(id, format!("555-{id}"), "pw", name, kind);
        PublishedCard {
            card: CardRecord {
                id: format!("c{id}"),
                account_id: id.to_string(),
                template: CardTemplate::Modern,
                is_active: true,
                created_at: Default::default(),
            },
            account: account.session(),
            personal: PersonalData {
                name: name.to_string(),
                ..PersonalData::default()
            },
            professional: ProfessionalData {
                industry: industry.to_string(),
                skills: skills.iter().map(|skill| (*skill).to_string()).collect(),
                ..ProfessionalData::default()
            },
        }
    }

    #[test]
    fn empty_filter_keeps_everything() {
        let cards = vec![
            card("1", "Ada", "Technology", &[], AccountType::Individual),
            card("2", "Bank", "Finance", &[], AccountType::Organization),
        ];
        let filter = GalleryFilter {
            search: Some("   ".to_string()),
            ..GalleryFilter::default()
        };
        assert!(filter.is_empty());
        assert_eq!(filter_cards(&cards, &filter).len(), 2);
    }

    #[test]
    fn search_is_case_insensitive_over_skills() {
        let cards = vec![
            card("1", "Ada", "Technology", &["Compilers"], AccountType::Individual),
            card("2", "Grace", "Technology", &["COBOL"], AccountType::Individual),
        ];
        let filter = GalleryFilter {
            search: Some("cobol".to_string()),
            ..GalleryFilter::default()
        };
        let result = filter_cards(&cards, &filter);
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].personal.name, "Grace");
    }

    #[test]
    fn account_type_filter_composes_with_industry() {
        let cards = vec![
            card("1", "Ada", "Finance", &[], AccountType::Individual),
            card("2", "Bank", "Finance", &[], AccountType::Organization),
            card("3", "Labs", "Technology", &[], AccountType::Organization),
        ];
        let filter = GalleryFilter {
            industry: Some("Finance".to_string()),
            account_type: Some(AccountType::Organization),
            ..GalleryFilter::default()
        };
        let result = filter_cards(&cards, &filter);
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].personal.name, "Bank");
    }
}

//! Cross-account read models: published card catalogue and public profiles.
//!
//! # Responsibility
//! - Join every account's cards with that account's profile forms.
//! - Resolve public profiles by username.
//!
//! # Invariants
//! - Cards of accounts missing personal or professional data are not listed.
//! - Output follows registration order, then card creation order.
//! - Each call re-scans the whole store; nothing is cached.
//! - Public profile lookup performs no access control.

use crate::model::account::Session;
use crate::model::card::CardRecord;
use crate::model::profile::{PersonalData, ProfessionalData};
use crate::repo::kv_repo::{KvRepository, RepoResult};
use crate::service::account_service::AccountService;
use crate::service::gallery_filter::{filter_cards, GalleryFilter};
use crate::service::profile_service::ProfileService;
use log::debug;
use serde::Serialize;

/// One card joined with its owner and profile forms.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PublishedCard {
    pub card: CardRecord,
    pub account: Session,
    pub personal: PersonalData,
    pub professional: ProfessionalData,
}

/// Filtered gallery result plus the unfiltered total.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GalleryPage {
    pub cards: Vec<PublishedCard>,
    pub total: usize,
}

/// Everything the public profile page shows for one account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PublicProfile {
    pub account: Session,
    pub personal: Option<PersonalData>,
    pub professional: Option<ProfessionalData>,
    pub cards: Vec<CardRecord>,
    pub active_card: Option<CardRecord>,
}

/// Result of a username lookup. `NotFound` is an expected outcome.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProfileLookup {
    Found(Box<PublicProfile>),
    NotFound,
}

/// Read-only catalogue service.
pub struct CatalogService<R: KvRepository> {
    repo: R,
}

impl<R: KvRepository> CatalogService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Lists every listable card across all accounts.
    pub fn all_published_cards(&self) -> RepoResult<Vec<PublishedCard>> {
        let accounts = AccountService::new(&self.repo);
        let profiles = ProfileService::new(&self.repo);
        let mut published = Vec::new();
        let mut skipped_accounts = 0usize;

        for account in accounts.list_accounts()? {
            let cards = profiles.list_cards(&account.id)?;
            if cards.is_empty() {
                continue;
            }

            let personal = profiles.get_personal(&account.id)?;
            let professional = profiles.get_professional(&account.id)?;
            let (Some(personal), Some(professional)) = (personal, professional) else {
                skipped_accounts += 1;
                continue;
            };

            let session = account.session();
            published.extend(cards.into_iter().map(|card| PublishedCard {
                card,
                account: session.clone(),
                personal: personal.clone(),
                professional: professional.clone(),
            }));
        }

        debug!(
            "event=catalog_scan module=service status=ok cards={} skipped_accounts={}",
            published.len(),
            skipped_accounts
        );
        Ok(published)
    }

    /// Applies `filter` to the full catalogue.
    pub fn gallery(&self, filter: &GalleryFilter) -> RepoResult<GalleryPage> {
        let all = self.all_published_cards()?;
        let total = all.len();
        let cards = if filter.is_empty() {
            all
        } else {
            filter_cards(&all, filter)
        };
        Ok(GalleryPage { cards, total })
    }

    /// Looks up a public profile by username.
    pub fn public_profile(&self, username: &str) -> RepoResult<ProfileLookup> {
        let accounts = AccountService::new(&self.repo);
        let Some(account) = accounts.find_by_username(username)? else {
            debug!("event=profile_lookup module=service status=not_found");
            return Ok(ProfileLookup::NotFound);
        };

        let profiles = ProfileService::new(&self.repo);
        let cards = profiles.list_cards(&account.id)?;
        let active_card = cards.iter().find(|card| card.is_active).cloned();
        let profile = PublicProfile {
            account: account.session(),
            personal: profiles.get_personal(&account.id)?,
            professional: profiles.get_professional(&account.id)?,
            cards,
            active_card,
        };
        Ok(ProfileLookup::Found(Box::new(profile)))
    }
}

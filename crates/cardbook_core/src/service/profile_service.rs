//! Per-account profile forms and card list.
//!
//! # Responsibility
//! - Read and fully replace personal/professional data.
//! - Create cards and switch the active card.
//!
//! # Invariants
//! - Every operation takes the owning account id explicitly.
//! - The first card of an account is active; later cards start inactive.
//! - After `set_active_card` at most one card of the account is active.
//! - Each write persists the whole value under its key; there is no
//!   cross-key transaction.

use crate::model::account::AccountId;
use crate::model::card::{CardId, CardRecord, CardTemplate};
use crate::model::profile::{PersonalData, ProfessionalData};
use crate::repo::keys::{cards_key, personal_key, professional_key};
use crate::repo::kv_repo::{read_json, write_json, KvRepository, RepoResult};
use crate::service::clock::{now_millis, unique_time_token};
use log::{info, warn};
use mockable::{Clock, DefaultClock};
use std::sync::Arc;

/// Profile/card service over a key/value repository.
pub struct ProfileService<R: KvRepository> {
    repo: R,
    clock: Arc<dyn Clock>,
}

impl<R: KvRepository> ProfileService<R> {
    pub fn new(repo: R) -> Self {
        Self::with_clock(repo, Arc::new(DefaultClock))
    }

    pub fn with_clock(repo: R, clock: Arc<dyn Clock>) -> Self {
        Self { repo, clock }
    }

    pub fn get_personal(&self, account_id: &str) -> RepoResult<Option<PersonalData>> {
        read_json(&self.repo, &personal_key(account_id))
    }

    /// Replaces the personal form of `account_id`.
    pub fn set_personal(&self, account_id: &str, data: &PersonalData) -> RepoResult<()> {
        write_json(&self.repo, &personal_key(account_id), data)?;
        info!(
            "event=personal_save module=service status=ok account_id={} has_avatar={}",
            account_id,
            data.avatar.is_some()
        );
        Ok(())
    }

    pub fn get_professional(&self, account_id: &str) -> RepoResult<Option<ProfessionalData>> {
        read_json(&self.repo, &professional_key(account_id))
    }

    /// Replaces the professional form of `account_id`.
    pub fn set_professional(&self, account_id: &str, data: &ProfessionalData) -> RepoResult<()> {
        write_json(&self.repo, &professional_key(account_id), data)?;
        info!(
            "event=professional_save module=service status=ok account_id={} skills={} services={} products={}",
            account_id,
            data.skills.len(),
            data.services.len(),
            data.products.len()
        );
        Ok(())
    }

    /// Lists cards in creation order. Accounts without cards yield an empty list.
    pub fn list_cards(&self, account_id: &str) -> RepoResult<Vec<CardRecord>> {
        Ok(read_json(&self.repo, &cards_key(account_id))?.unwrap_or_default())
    }

    /// Returns the active card, if one is set.
    pub fn active_card(&self, account_id: &str) -> RepoResult<Option<CardRecord>> {
        Ok(self
            .list_cards(account_id)?
            .into_iter()
            .find(|card| card.is_active))
    }

    /// Appends a new card using `template`.
    ///
    /// The card is active only when it is the first card of the account.
    pub fn create_card(&self, account_id: &str, template: CardTemplate) -> RepoResult<CardRecord> {
        let mut cards = self.list_cards(account_id)?;
        let now = now_millis(self.clock.as_ref());
        let id: CardId = unique_time_token(now.timestamp_millis(), |candidate| {
            cards.iter().any(|card| card.id == candidate)
        });
        let card = CardRecord {
            id,
            account_id: AccountId::from(account_id),
            template,
            is_active: cards.is_empty(),
            created_at: now,
        };
        cards.push(card.clone());
        write_json(&self.repo, &cards_key(account_id), &cards)?;

        info!(
            "event=card_create module=service status=ok account_id={} card_id={} template={} active={}",
            account_id,
            card.id,
            template.as_str(),
            card.is_active
        );
        Ok(card)
    }

    /// Makes `card_id` the only active card of the account.
    ///
    /// Returns `false` when no card matches; the list is then left as it was
    /// but still written back.
    pub fn set_active_card(&self, account_id: &str, card_id: &str) -> RepoResult<bool> {
        let mut cards = self.list_cards(account_id)?;
        let matched = cards.iter().any(|card| card.id == card_id);
        if matched {
            for card in &mut cards {
                card.is_active = card.id == card_id;
            }
        } else {
            warn!(
                "event=card_activate module=service status=not_found account_id={} card_id={}",
                account_id, card_id
            );
        }
        write_json(&self.repo, &cards_key(account_id), &cards)?;

        if matched {
            info!(
                "event=card_activate module=service status=ok account_id={} card_id={}",
                account_id, card_id
            );
        }
        Ok(matched)
    }
}

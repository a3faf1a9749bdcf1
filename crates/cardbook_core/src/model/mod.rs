//! Domain model for accounts, profile forms and business cards.
//!
//! # Responsibility
//! - Define the fixed-field records persisted in the key/value store.
//! - Provide form-boundary validation helpers.
//!
//! # Invariants
//! - Profile and card records are owned by exactly one account id.
//! - Validation runs at the form boundary, never inside the store.

pub mod account;
pub mod card;
pub mod profile;

//! Core data layer for the Cardbook digital business-card builder.
//! This crate is the single source of truth for account, profile and card
//! invariants.

pub mod db;
pub mod export;
pub mod logging;
pub mod model;
pub mod nav;
pub mod repo;
pub mod service;
#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

pub use export::{
    export_both_sides, export_card, export_file_name, CardRasterizer, CardSide, ExportError,
    ExportedImage,
};
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::account::{username_from_phone, Account, AccountId, AccountType, Session};
pub use model::card::{CardId, CardRecord, CardTemplate};
pub use model::profile::{
    ListField, PersonalData, ProfessionalData, ValidationError, EXPERIENCE_LEVELS, INDUSTRIES,
};
pub use nav::{resolve, Route, RouteDecision};
pub use repo::kv_repo::{KvRepository, RepoError, RepoResult, SqliteKvRepository};
pub use service::account_service::{AccountService, AuthError};
pub use service::catalog_service::{
    CatalogService, GalleryPage, ProfileLookup, PublicProfile, PublishedCard,
};
pub use service::gallery_filter::{filter_cards, GalleryFilter};
pub use service::profile_service::ProfileService;

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

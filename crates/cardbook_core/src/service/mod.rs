//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate repository calls into use-case level APIs.
//! - Keep the CLI and any other view layer decoupled from storage details.

pub mod account_service;
pub mod catalog_service;
pub mod clock;
pub mod gallery_filter;
pub mod profile_service;

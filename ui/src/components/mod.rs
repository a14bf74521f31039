//! Collaborator widgets built on top of the localization manager.

pub mod consent_notice;
pub mod menu;

//! Shared front-end crate for the Vantura Campers site. The localization
//! manager and widget logic live here; browser glue is gated behind
//! `target_arch = "wasm32"` so the core compiles and tests natively.

pub mod components;
pub mod i18n;

#[cfg(target_arch = "wasm32")]
pub mod boot;

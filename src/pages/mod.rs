//! Top-level pages.

pub mod document;
pub mod not_found;
pub mod upload;

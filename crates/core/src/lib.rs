//! # Travelog Core
//!
//! Lossless conversion between a travel log's markdown-like text and its structured form.
//!
//! This crate contains pure transforms only:
//! - text to [`Document`] parsing ([`parse`]), which never fails
//! - validation into a [`ValidatedDocument`] ([`validate_document`])
//! - [`ValidatedDocument`] to canonical text rendering ([`stringify`])
//! - chronological ordering of checkins ([`sort_checkins`])
//!
//! **No I/O**: fetching and storing document text, HTTP handling and photo storage belong to the
//! callers. Every function here is synchronous and holds no state between calls.

pub mod builder;
pub mod classify;
pub mod clock;
pub mod config;
pub mod constants;
pub mod datetime;
pub mod document;
pub mod error;
pub mod markdown;
pub mod ordering;
mod render;
pub mod validation;

#[cfg(test)]
mod test_utils;

pub use chrono::FixedOffset;
pub use clock::{Clock, LocalClock};
pub use config::CoreConfig;
pub use document::{Checkin, Document, Photo, Place};
pub use error::{CoreError, CoreResult};
pub use markdown::MarkdownService;
pub use ordering::sort_checkins;
pub use travelog_types::{NonEmptyText, TextError};
pub use validation::{
    validate_document, FieldViolation, ValidatedDocument, ValidationError, ViolationKind,
};

/// Parses travel log text. Never fails; missing fields are left empty.
pub fn parse(text: &str, clock: &impl LocalClock) -> Document {
    builder::parse_document(text, clock)
}

/// Renders a validated document to canonical text, ending in exactly one newline.
pub fn stringify(document: &ValidatedDocument, clock: &impl LocalClock) -> String {
    render::render_document(document.as_document(), clock)
}

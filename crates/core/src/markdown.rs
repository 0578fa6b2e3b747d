//! Travel log markdown service.
//!
//! Ties the builder, validator and renderer to one configured clock. The typical storage cycle
//! is `document_read` on the text fetched from the store, a whole-checkin mutation on the
//! resulting [`Document`], then `document_write` to produce the text to store again.
//!
//! The read and write halves are independent calls with no version check between them. Two
//! writers editing the same document concurrently will each write back their own copy and the
//! last write wins.

use crate::builder::parse_document;
use crate::clock::{Clock, LocalClock};
use crate::config::CoreConfig;
use crate::document::Document;
use crate::render::render_document;
use crate::validation::{validate_document, ValidatedDocument};
use crate::CoreResult;

/// Service for travel log parsing and rendering.
#[derive(Debug, Clone)]
pub struct MarkdownService<C: LocalClock = Clock> {
    clock: C,
}

impl MarkdownService<Clock> {
    /// Creates a service using the configured clock.
    pub fn from_config(cfg: &CoreConfig) -> Self {
        Self::new(cfg.clock())
    }
}

impl<C: LocalClock> MarkdownService<C> {
    pub fn new(clock: C) -> Self {
        Self { clock }
    }

    /// Parses text into a document without validating it. Never fails.
    pub fn document_parse(&self, text: &str) -> Document {
        parse_document(text, &self.clock)
    }

    /// Renders a validated document to canonical text.
    pub fn document_render(&self, document: &ValidatedDocument) -> String {
        render_document(document.as_document(), &self.clock)
    }

    /// Parses and validates text read from storage, returning checkins in chronological order.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::Validation` if the parsed document is incomplete. Violation paths
    /// index checkins in file order.
    pub fn document_read(&self, text: &str) -> CoreResult<ValidatedDocument> {
        let validated = validate_document(self.document_parse(text))?.into_chronological();
        tracing::debug!(
            "read document '{}' with {} checkins",
            validated.as_document().title,
            validated.as_document().checkins.len()
        );
        Ok(validated)
    }

    /// Validates a document and renders it for storage.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::Validation` if the document is incomplete; nothing is rendered.
    pub fn document_write(&self, document: Document) -> CoreResult<String> {
        let validated = validate_document(document)?;
        Ok(self.document_render(&validated))
    }
}

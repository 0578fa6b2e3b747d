//! Document validation.
//!
//! Parsing is best-effort and happily produces documents with empty ids or unparsable
//! timestamps. Before a document may be written back out it has to pass
//! [`validate_document`], which either returns a [`ValidatedDocument`] or a [`ValidationError`]
//! listing every offending field path. [`ValidatedDocument`] has no public constructor, so
//! holding one is proof the checks ran.
//!
//! Besides required fields, every text value must survive being written out. A value that
//! renders as a line the parser would read differently, such as a description line that looks
//! like `## next`, is rejected as [`ViolationKind::NotRepresentable`]. Whitespace is not
//! checked; the text format trims it and collapses blank lines inside descriptions.

use crate::classify::{classify, classify_header, FieldShape, HeaderShape, LineContext, PlaceKey};
use crate::constants::{
    CHECKIN_PREFIX, DATE_KEY, FSQ_ADDRESS_KEY, FSQ_ID_KEY, FSQ_NAME_KEY, TITLE_PREFIX,
};
use crate::document::{Checkin, Document, Place};
use crate::ordering::sort_checkins;
use crate::render::{caption_line, field_line, image_line};
use chrono::DateTime;
use travelog_types::NonEmptyText;
use uuid::Uuid;

/// What is wrong with a field.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ViolationKind {
    #[error("must not be empty")]
    Empty,
    #[error("must be a hyphenated UUID")]
    InvalidUuid,
    #[error("must be an ISO-8601 date-time with a UTC offset")]
    InvalidDatetime,
    #[error("would read back differently once written as text")]
    NotRepresentable,
}

/// A single failed check, addressed by field path (for example `checkins[2].id`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldViolation {
    pub path: String,
    pub kind: ViolationKind,
}

impl std::fmt::Display for FieldViolation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.path, self.kind)
    }
}

/// All violations found in a document.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{}", summarize(.violations))]
pub struct ValidationError {
    pub violations: Vec<FieldViolation>,
}

fn summarize(violations: &[FieldViolation]) -> String {
    violations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

impl ValidationError {
    /// Field paths of every violation, in document order.
    pub fn paths(&self) -> Vec<&str> {
        self.violations.iter().map(|v| v.path.as_str()).collect()
    }
}

/// A document that passed [`validate_document`].
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedDocument(Document);

impl ValidatedDocument {
    pub fn as_document(&self) -> &Document {
        &self.0
    }

    /// Gives up the proof of validity, for example to mutate the document.
    pub fn into_inner(self) -> Document {
        self.0
    }

    /// Reorders checkins chronologically. Ordering does not affect validity.
    pub(crate) fn into_chronological(mut self) -> Self {
        sort_checkins(&mut self.0.checkins);
        self
    }
}

fn is_hyphenated_uuid(id: &str) -> bool {
    id.len() == 36 && Uuid::parse_str(id).is_ok()
}

fn is_offset_datetime(datetime: &str) -> bool {
    DateTime::parse_from_rfc3339(datetime).is_ok()
}

const IN_CHECKIN: LineContext = LineContext {
    has_active_checkin: true,
    last_photo_exists: false,
};

const AFTER_PHOTO: LineContext = LineContext {
    has_active_checkin: true,
    last_photo_exists: true,
};

fn has_line_break(value: &str) -> bool {
    value.contains(['\n', '\r'])
}

fn title_reads_back(title: &str) -> bool {
    !has_line_break(title)
        && classify_header(&field_line(TITLE_PREFIX, title))
            == Some(HeaderShape::Title(title.trim()))
}

fn date_reads_back(date: &str) -> bool {
    !has_line_break(date)
        && classify_header(&field_line(DATE_KEY, date)) == Some(HeaderShape::Date(date.trim()))
}

fn location_reads_back(location: &str) -> bool {
    let expected = FieldShape::Heading2 {
        location: location.trim(),
    };
    !has_line_break(location)
        && classify(&field_line(CHECKIN_PREFIX, location), LineContext::default())
            == Some(expected)
}

fn place_field_reads_back(key: PlaceKey, prefix: &str, value: &str) -> bool {
    let expected = FieldShape::PlaceField {
        key,
        value: value.trim(),
    };
    !has_line_break(value) && classify(&field_line(prefix, value), IN_CHECKIN) == Some(expected)
}

/// Every description line must come back as description text, not as a field of its own.
/// Lines are checked trimmed since that is how the parser stores them.
fn description_reads_back(description: &str) -> bool {
    description.lines().map(str::trim).all(|line| {
        match classify(line, IN_CHECKIN) {
            None => true,
            Some(FieldShape::DescriptionText(text)) => text == line,
            Some(_) => false,
        }
    })
}

fn image_reads_back(alt: &str, src: &str) -> bool {
    !has_line_break(alt)
        && !has_line_break(src)
        && classify(&image_line(alt, src), IN_CHECKIN) == Some(FieldShape::PhotoImage { alt, src })
}

fn caption_reads_back(caption: &str) -> bool {
    caption.is_empty()
        || (!has_line_break(caption)
            && classify(&caption_line(caption), AFTER_PHOTO)
                == Some(FieldShape::PhotoCaption(caption)))
}

fn check_place(place: &Place, path: &str, violate: &mut impl FnMut(String, ViolationKind)) {
    let fields = [
        (PlaceKey::Id, FSQ_ID_KEY, "fsqId", &place.fsq_id),
        (PlaceKey::Name, FSQ_NAME_KEY, "name", &place.name),
        (
            PlaceKey::Address,
            FSQ_ADDRESS_KEY,
            "formattedAddress",
            &place.formatted_address,
        ),
    ];
    for (key, prefix, name, value) in fields {
        if !place_field_reads_back(key, prefix, value) {
            violate(format!("{}.{}", path, name), ViolationKind::NotRepresentable);
        }
    }
}

fn check_checkin(checkin: &Checkin, path: &str, violate: &mut impl FnMut(String, ViolationKind)) {
    if NonEmptyText::new(&checkin.location).is_err() {
        violate(format!("{}.location", path), ViolationKind::Empty);
    } else if !location_reads_back(&checkin.location) {
        violate(format!("{}.location", path), ViolationKind::NotRepresentable);
    }
    if !is_hyphenated_uuid(&checkin.id) {
        violate(format!("{}.id", path), ViolationKind::InvalidUuid);
    }
    if !is_offset_datetime(&checkin.datetime) {
        violate(format!("{}.datetime", path), ViolationKind::InvalidDatetime);
    }
    if let Some(place) = &checkin.place {
        check_place(place, &format!("{}.fsqPlace", path), &mut *violate);
    }
    if !description_reads_back(&checkin.description) {
        violate(format!("{}.description", path), ViolationKind::NotRepresentable);
    }
    for (j, photo) in checkin.photos.iter().enumerate() {
        if !image_reads_back(&photo.alt, &photo.src) {
            violate(format!("{}.photos[{}]", path, j), ViolationKind::NotRepresentable);
        }
        if !photo.caption.as_deref().map_or(true, caption_reads_back) {
            violate(
                format!("{}.photos[{}].caption", path, j),
                ViolationKind::NotRepresentable,
            );
        }
    }
}

/// Checks every field the text format cannot enforce by itself.
///
/// # Errors
///
/// Returns a `ValidationError` listing each violation:
/// - `title` empty
/// - `checkins[i].location` empty
/// - `checkins[i].id` not a hyphenated UUID
/// - `checkins[i].datetime` not an RFC 3339 timestamp with offset
/// - any text field that would be read back differently after rendering
pub fn validate_document(document: Document) -> Result<ValidatedDocument, ValidationError> {
    let mut violations = Vec::new();
    let mut violate = |path: String, kind: ViolationKind| {
        violations.push(FieldViolation { path, kind });
    };

    if NonEmptyText::new(&document.title).is_err() {
        violate("title".to_string(), ViolationKind::Empty);
    } else if !title_reads_back(&document.title) {
        violate("title".to_string(), ViolationKind::NotRepresentable);
    }
    if !date_reads_back(&document.date) {
        violate("date".to_string(), ViolationKind::NotRepresentable);
    }

    for (i, checkin) in document.checkins.iter().enumerate() {
        check_checkin(checkin, &format!("checkins[{}]", i), &mut violate);
    }

    if violations.is_empty() {
        Ok(ValidatedDocument(document))
    } else {
        Err(ValidationError { violations })
    }
}

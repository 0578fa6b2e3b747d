//! [`Document`] to canonical text.
//!
//! Output is a sequence of blocks separated by one blank line:
//!
//! ```markdown
//! # <title>
//!
//! - date: <date>
//!
//! ## <location>
//!
//! - id: <uuid>
//! - date: <datetime>
//!
//! - fsq_id: <id>
//! - fsq_name: <name>
//! - fsq_latitude: <lat>
//! - fsq_longitude: <lng>
//! - fsq_address: <address>
//!
//! <description>
//!
//! ![<alt>](<src>)
//! *<caption>*
//! ```
//!
//! The place block appears only when a place is attached, and its coordinate lines only when
//! both coordinates are present. The description block appears only when non-empty. The text
//! ends with exactly one newline.

use crate::clock::LocalClock;
use crate::constants::{
    CHECKIN_PREFIX, DATE_KEY, FSQ_ADDRESS_KEY, FSQ_ID_KEY, FSQ_LATITUDE_KEY, FSQ_LONGITUDE_KEY,
    FSQ_NAME_KEY, ID_KEY, TITLE_PREFIX,
};
use crate::datetime::normalize_datetime;
use crate::document::{Checkin, Document, Photo, Place};

pub(crate) fn field_line(key: &str, value: &str) -> String {
    format!("{} {}", key, value)
}

pub(crate) fn image_line(alt: &str, src: &str) -> String {
    format!("![{}]({})", alt, src)
}

pub(crate) fn caption_line(caption: &str) -> String {
    format!("*{}*", caption)
}

fn place_block(place: &Place) -> String {
    let mut lines = vec![
        field_line(FSQ_ID_KEY, &place.fsq_id),
        field_line(FSQ_NAME_KEY, &place.name),
    ];
    if let Some((latitude, longitude)) = place.coordinates() {
        lines.push(field_line(FSQ_LATITUDE_KEY, &latitude.to_string()));
        lines.push(field_line(FSQ_LONGITUDE_KEY, &longitude.to_string()));
    }
    lines.push(field_line(FSQ_ADDRESS_KEY, &place.formatted_address));
    lines.join("\n")
}

fn photo_block(photo: &Photo) -> String {
    let image = image_line(&photo.alt, &photo.src);
    match photo.caption.as_deref() {
        Some(caption) if !caption.is_empty() => format!("{}\n{}", image, caption_line(caption)),
        _ => image,
    }
}

fn checkin_blocks(checkin: &Checkin, clock: &impl LocalClock, blocks: &mut Vec<String>) {
    // Only reachable with a bad timestamp through the unchecked path; write it back verbatim.
    let datetime = normalize_datetime(&checkin.datetime, clock)
        .unwrap_or_else(|_| checkin.datetime.clone());

    blocks.push(field_line(CHECKIN_PREFIX, &checkin.location));
    blocks.push(format!(
        "{}{}\n{}",
        ID_KEY,
        checkin.id,
        field_line(DATE_KEY, &datetime)
    ));
    if let Some(place) = &checkin.place {
        blocks.push(place_block(place));
    }
    if !checkin.description.is_empty() {
        blocks.push(checkin.description.clone());
    }
    blocks.extend(checkin.photos.iter().map(photo_block));
}

/// Renders a document without validating it first.
///
/// Invalid field values are written as they are, so the result may not parse back to an
/// equivalent document. Public callers go through [`crate::stringify`], which only accepts a
/// validated document.
pub(crate) fn render_document(doc: &Document, clock: &impl LocalClock) -> String {
    let mut blocks = vec![
        field_line(TITLE_PREFIX, &doc.title),
        field_line(DATE_KEY, &doc.date),
    ];
    for checkin in &doc.checkins {
        checkin_blocks(checkin, clock, &mut blocks);
    }
    format!("{}\n", blocks.join("\n\n"))
}

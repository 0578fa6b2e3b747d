//! Text to [`Document`] builder.
//!
//! The builder is a small state machine fed one line at a time:
//!
//! - `SeekingHeader`: `# title` lines set the title (the last one wins) until the first
//!   `- date:` line, whose value becomes the document date.
//! - `SeekingCheckins`: lines are classified but nothing is recorded until a `##` heading opens
//!   the first checkin.
//! - `InCheckin`: field lines are applied to the active checkin, addressed by index.
//!
//! A document with no `- date:` line therefore never leaves the header phase and has no
//! checkins. Building never fails; missing fields stay empty for validation to report.

use crate::classify::{classify, classify_header, FieldShape, HeaderShape, LineContext, PlaceKey};
use crate::clock::LocalClock;
use crate::datetime::normalize_datetime;
use crate::document::{Checkin, Document, Photo};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BuildState {
    SeekingHeader,
    SeekingCheckins,
    InCheckin { active: usize },
}

/// Accumulates a [`Document`] from lines of text.
pub struct DocumentBuilder<'c, C: LocalClock> {
    clock: &'c C,
    state: BuildState,
    document: Document,
}

impl<'c, C: LocalClock> DocumentBuilder<'c, C> {
    pub fn new(clock: &'c C) -> Self {
        Self {
            clock,
            state: BuildState::SeekingHeader,
            document: Document::default(),
        }
    }

    /// Feeds one line (without its line terminator).
    pub fn push_line(&mut self, line: &str) {
        match self.state {
            BuildState::SeekingHeader => self.push_header_line(line),
            BuildState::SeekingCheckins => self.push_checkin_line(None, line),
            BuildState::InCheckin { active } => self.push_checkin_line(Some(active), line),
        }
    }

    fn push_header_line(&mut self, line: &str) {
        match classify_header(line) {
            Some(HeaderShape::Title(title)) => self.document.title = title.to_string(),
            Some(HeaderShape::Date(date)) => {
                self.document.date = date.to_string();
                self.state = BuildState::SeekingCheckins;
            }
            None => {}
        }
    }

    fn push_checkin_line(&mut self, active: Option<usize>, line: &str) {
        let last_photo_exists =
            active.is_some_and(|i| !self.document.checkins[i].photos.is_empty());
        let ctx = LineContext {
            has_active_checkin: active.is_some(),
            last_photo_exists,
        };
        let Some(shape) = classify(line, ctx) else {
            return;
        };

        if let FieldShape::Heading2 { location } = shape {
            self.document.checkins.push(Checkin::new(location));
            self.state = BuildState::InCheckin {
                active: self.document.checkins.len() - 1,
            };
            return;
        }

        // Every other shape is only produced while a checkin is active.
        let Some(index) = active else {
            return;
        };
        let checkin = &mut self.document.checkins[index];

        match shape {
            FieldShape::Heading2 { .. } => {}
            FieldShape::Id(id) => checkin.id = id.to_string(),
            FieldShape::Date(raw) => {
                checkin.datetime = match normalize_datetime(raw, self.clock) {
                    Ok(normalized) => normalized,
                    Err(e) => {
                        tracing::debug!("keeping unnormalised checkin date: {}", e);
                        raw.to_string()
                    }
                };
            }
            FieldShape::PlaceField { key, value } => {
                let place = checkin.place.get_or_insert_with(Default::default);
                match key {
                    PlaceKey::Id => place.fsq_id = value.to_string(),
                    PlaceKey::Name => place.name = value.to_string(),
                    PlaceKey::Address => place.formatted_address = value.to_string(),
                    PlaceKey::Latitude => place.latitude = value.parse().ok(),
                    PlaceKey::Longitude => place.longitude = value.parse().ok(),
                }
            }
            FieldShape::PhotoImage { alt, src } => checkin.photos.push(Photo {
                src: src.to_string(),
                alt: alt.to_string(),
                caption: None,
            }),
            FieldShape::PhotoCaption(caption) => {
                if let Some(photo) = checkin.photos.last_mut() {
                    photo.caption = Some(caption.to_string());
                }
            }
            FieldShape::DescriptionText(text) => {
                checkin.description.push_str(text);
                checkin.description.push('\n');
            }
        }
    }

    /// Finishes the document, trimming each accumulated description.
    pub fn finish(mut self) -> Document {
        for checkin in &mut self.document.checkins {
            checkin.description = checkin.description.trim().to_string();
        }
        self.document
    }
}

/// Parses travel log text into a [`Document`]. Never fails.
pub fn parse_document(text: &str, clock: &impl LocalClock) -> Document {
    let mut builder = DocumentBuilder::new(clock);
    for line in text.lines() {
        builder.push_line(line);
    }
    builder.finish()
}

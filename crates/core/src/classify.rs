//! Line classification for the travel log text format.
//!
//! Every line after the header is matched against a fixed, ordered rule table. The first rule
//! that recognises the line wins and later rules are never tried, so the order of `RULES` is the
//! precedence contract of the format:
//!
//! 1. `## <location>` opens a new checkin
//! 2. `- id: <uuid>`
//! 3. `- date: <datetime>`
//! 4. `- fsq_*: <value>` place fields
//! 5. `![alt](src)` photo
//! 6. `*caption*`, only when the active checkin already has a photo
//! 7. any other non-blank line is description text
//!
//! Rules 2 to 7 only apply once a checkin is active.

use regex::Regex;
use std::sync::LazyLock;

static TITLE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^#([^#]+)").expect("title pattern is valid"));
static HEADING2_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^##([^#]+)").expect("heading pattern is valid"));
static ID_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^- id: (.+)").expect("id pattern is valid"));
static DATE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^- date:(.*)").expect("date pattern is valid"));
static PLACE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*- fsq_(id|name|latitude|longitude|address):(.*)")
        .expect("place pattern is valid")
});
static PHOTO_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^!\[(.*)\]\((.*)\)").expect("photo pattern is valid"));
static CAPTION_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\*(.+)\*").expect("caption pattern is valid"));

/// Which place field a `- fsq_*:` line sets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaceKey {
    Id,
    Name,
    Latitude,
    Longitude,
    Address,
}

impl PlaceKey {
    fn from_suffix(suffix: &str) -> Option<Self> {
        match suffix {
            "id" => Some(Self::Id),
            "name" => Some(Self::Name),
            "latitude" => Some(Self::Latitude),
            "longitude" => Some(Self::Longitude),
            "address" => Some(Self::Address),
            _ => None,
        }
    }
}

/// A recognised checkin-phase line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldShape<'a> {
    Heading2 { location: &'a str },
    Id(&'a str),
    Date(&'a str),
    PlaceField { key: PlaceKey, value: &'a str },
    PhotoImage { alt: &'a str, src: &'a str },
    PhotoCaption(&'a str),
    DescriptionText(&'a str),
}

/// A recognised header-phase line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HeaderShape<'a> {
    Title(&'a str),
    Date(&'a str),
}

/// Parse state a rule may depend on.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LineContext {
    pub has_active_checkin: bool,
    pub last_photo_exists: bool,
}

type Rule = for<'a> fn(&'a str, LineContext) -> Option<FieldShape<'a>>;

/// Classifier rules in precedence order.
const RULES: [Rule; 7] = [
    heading2,
    id_field,
    date_field,
    place_field,
    photo_image,
    photo_caption,
    description_text,
];

fn capture<'a>(re: &Regex, line: &'a str, group: usize) -> Option<&'a str> {
    re.captures(line)
        .and_then(|caps| caps.get(group))
        .map(|m| m.as_str())
}

fn heading2(line: &str, _ctx: LineContext) -> Option<FieldShape<'_>> {
    let location = capture(&HEADING2_RE, line, 1)?.trim();
    (!location.is_empty()).then_some(FieldShape::Heading2 { location })
}

fn id_field(line: &str, ctx: LineContext) -> Option<FieldShape<'_>> {
    if !ctx.has_active_checkin {
        return None;
    }
    capture(&ID_RE, line, 1).map(|id| FieldShape::Id(id.trim()))
}

fn date_field(line: &str, ctx: LineContext) -> Option<FieldShape<'_>> {
    if !ctx.has_active_checkin {
        return None;
    }
    capture(&DATE_RE, line, 1).map(|date| FieldShape::Date(date.trim()))
}

fn place_field(line: &str, ctx: LineContext) -> Option<FieldShape<'_>> {
    if !ctx.has_active_checkin {
        return None;
    }
    let caps = PLACE_RE.captures(line)?;
    let key = PlaceKey::from_suffix(caps.get(1)?.as_str())?;
    let value = caps.get(2).map_or("", |m| m.as_str()).trim();
    Some(FieldShape::PlaceField { key, value })
}

fn photo_image(line: &str, ctx: LineContext) -> Option<FieldShape<'_>> {
    if !ctx.has_active_checkin {
        return None;
    }
    let caps = PHOTO_RE.captures(line)?;
    Some(FieldShape::PhotoImage {
        alt: caps.get(1).map_or("", |m| m.as_str()),
        src: caps.get(2).map_or("", |m| m.as_str()),
    })
}

fn photo_caption(line: &str, ctx: LineContext) -> Option<FieldShape<'_>> {
    if !ctx.has_active_checkin || !ctx.last_photo_exists {
        return None;
    }
    capture(&CAPTION_RE, line, 1).map(FieldShape::PhotoCaption)
}

fn description_text(line: &str, ctx: LineContext) -> Option<FieldShape<'_>> {
    if !ctx.has_active_checkin {
        return None;
    }
    let text = line.trim();
    (!text.is_empty()).then_some(FieldShape::DescriptionText(text))
}

/// Classifies one checkin-phase line. Returns `None` for lines that carry nothing: blank lines,
/// and anything other than a heading while no checkin is active.
pub fn classify(line: &str, ctx: LineContext) -> Option<FieldShape<'_>> {
    RULES.iter().find_map(|rule| rule(line, ctx))
}

/// Classifies one header-phase line.
pub fn classify_header(line: &str) -> Option<HeaderShape<'_>> {
    if let Some(title) = capture(&TITLE_RE, line, 1) {
        return Some(HeaderShape::Title(title.trim()));
    }
    capture(&DATE_RE, line, 1).map(|date| HeaderShape::Date(date.trim()))
}

#[cfg(test)]
mod tests {
    use super::*;

    const ACTIVE: LineContext = LineContext {
        has_active_checkin: true,
        last_photo_exists: false,
    };
    const WITH_PHOTO: LineContext = LineContext {
        has_active_checkin: true,
        last_photo_exists: true,
    };

    #[test]
    fn test_heading2_requires_exactly_two_hashes() {
        assert_eq!(
            classify("## 鶴見", LineContext::default()),
            Some(FieldShape::Heading2 { location: "鶴見" })
        );
        assert_eq!(
            classify("### 鶴見", ACTIVE),
            Some(FieldShape::DescriptionText("### 鶴見"))
        );
        assert_eq!(classify("###", LineContext::default()), None);
    }

    #[test]
    fn test_heading2_needs_text() {
        assert_eq!(classify("##   ", LineContext::default()), None);
        assert_eq!(classify("##   ", ACTIVE), Some(FieldShape::DescriptionText("##")));
    }

    #[test]
    fn test_field_lines_ignored_without_active_checkin() {
        let ctx = LineContext::default();
        assert_eq!(classify("- id: abc", ctx), None);
        assert_eq!(classify("- date: 2024-01-01", ctx), None);
        assert_eq!(classify("- fsq_id: x", ctx), None);
        assert_eq!(classify("![a](b)", ctx), None);
        assert_eq!(classify("free text", ctx), None);
    }

    #[test]
    fn test_id_and_date() {
        assert_eq!(classify("- id:  abc ", ACTIVE), Some(FieldShape::Id("abc")));
        assert_eq!(
            classify("- date:2024-01-01T06:22:00+09:00", ACTIVE),
            Some(FieldShape::Date("2024-01-01T06:22:00+09:00"))
        );
        // `- id:` with no value is not an id line.
        assert_eq!(
            classify("- id: ", ACTIVE),
            Some(FieldShape::DescriptionText("- id:"))
        );
    }

    #[test]
    fn test_place_fields_allow_leading_whitespace() {
        assert_eq!(
            classify("  - fsq_latitude: 35.479997", ACTIVE),
            Some(FieldShape::PlaceField {
                key: PlaceKey::Latitude,
                value: "35.479997"
            })
        );
        assert_eq!(
            classify("- fsq_address: 鶴見区末広町1-15-2", ACTIVE),
            Some(FieldShape::PlaceField {
                key: PlaceKey::Address,
                value: "鶴見区末広町1-15-2"
            })
        );
        assert_eq!(
            classify("- fsq_rating: 9", ACTIVE),
            Some(FieldShape::DescriptionText("- fsq_rating: 9"))
        );
    }

    #[test]
    fn test_photo_image() {
        assert_eq!(
            classify("![海芝浦駅](https://example.com/image0.webp)", ACTIVE),
            Some(FieldShape::PhotoImage {
                alt: "海芝浦駅",
                src: "https://example.com/image0.webp"
            })
        );
    }

    #[test]
    fn test_caption_requires_prior_photo() {
        assert_eq!(
            classify("*一望できる*", ACTIVE),
            Some(FieldShape::DescriptionText("*一望できる*"))
        );
        assert_eq!(
            classify("*一望できる*", WITH_PHOTO),
            Some(FieldShape::PhotoCaption("一望できる"))
        );
    }

    #[test]
    fn test_blank_lines_carry_nothing() {
        assert_eq!(classify("", ACTIVE), None);
        assert_eq!(classify("   \t", ACTIVE), None);
    }

    #[test]
    fn test_earlier_rules_win() {
        // A heading always opens a checkin, even when a photo is pending a caption.
        assert_eq!(
            classify("## *次*", WITH_PHOTO),
            Some(FieldShape::Heading2 { location: "*次*" })
        );
    }

    #[test]
    fn test_classify_header() {
        assert_eq!(
            classify_header("# 鶴見散歩"),
            Some(HeaderShape::Title("鶴見散歩"))
        );
        assert_eq!(classify_header("## 鶴見"), None);
        assert_eq!(
            classify_header("- date: 2024-01-27–30"),
            Some(HeaderShape::Date("2024-01-27–30"))
        );
        assert_eq!(classify_header("intro"), None);
    }
}

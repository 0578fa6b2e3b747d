//! File-backed implementations of the CLI subcommands.
//!
//! Every mutating command reads the whole file, applies one whole-checkin change and writes the
//! whole file back. There is no locking between the read and the write.

use anyhow::{bail, Context, Result};
use std::fs;
use std::path::Path;
use travelog_core::{
    validate_document, Checkin, Document, FieldViolation, LocalClock, MarkdownService,
    NonEmptyText,
};
use uuid::Uuid;

fn read_text(path: &Path) -> Result<String> {
    fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))
}

fn write_text(path: &Path, text: &str) -> Result<()> {
    fs::write(path, text).with_context(|| format!("failed to write {}", path.display()))?;
    tracing::info!("wrote {}", path.display());
    Ok(())
}

fn read_document<C: LocalClock>(service: &MarkdownService<C>, path: &Path) -> Result<Document> {
    let text = read_text(path)?;
    let document = service
        .document_read(&text)
        .with_context(|| format!("{} is not a valid travel log", path.display()))?;
    Ok(document.into_inner())
}

/// Parsed document as pretty JSON. Checkins stay in file order unless `sorted`.
pub fn parse_file<C: LocalClock>(
    service: &MarkdownService<C>,
    path: &Path,
    sorted: bool,
) -> Result<String> {
    let mut document = service.document_parse(&read_text(path)?);
    if sorted {
        travelog_core::sort_checkins(&mut document.checkins);
    }
    Ok(document.to_json_pretty()?)
}

/// Canonical text of the file. With `write`, the file is replaced by it.
pub fn format_file<C: LocalClock>(
    service: &MarkdownService<C>,
    path: &Path,
    write: bool,
) -> Result<String> {
    let document = service.document_parse(&read_text(path)?);
    let text = service.document_write(document)?;
    if write {
        write_text(path, &text)?;
    }
    Ok(text)
}

/// Field violations in the file; empty when the document is valid.
pub fn validate_file<C: LocalClock>(
    service: &MarkdownService<C>,
    path: &Path,
) -> Result<Vec<FieldViolation>> {
    let document = service.document_parse(&read_text(path)?);
    Ok(match validate_document(document) {
        Ok(_) => Vec::new(),
        Err(e) => e.violations,
    })
}

/// Creates a new document with no checkins. Refuses to overwrite an existing file.
pub fn new_file<C: LocalClock>(
    service: &MarkdownService<C>,
    path: &Path,
    title: &str,
    date: &str,
) -> Result<()> {
    if path.exists() {
        bail!("{} already exists", path.display());
    }
    let title = NonEmptyText::new(title).context("title must not be empty")?;
    let text = service.document_write(Document::new(title, date))?;
    write_text(path, &text)
}

/// Inserts or replaces a checkin given as JSON. A checkin without an id gets a fresh one.
///
/// Returns the checkin id and whether an existing checkin was replaced.
pub fn upsert_file<C: LocalClock>(
    service: &MarkdownService<C>,
    path: &Path,
    checkin_json: &str,
) -> Result<(String, bool)> {
    let mut checkin = Checkin::from_json(checkin_json)?;
    if checkin.id.trim().is_empty() {
        checkin.id = Uuid::new_v4().to_string();
    }
    let id = checkin.id.clone();

    let mut document = read_document(service, path)?;
    let replaced = document.upsert_checkin(checkin);
    let text = service.document_write(document)?;
    write_text(path, &text)?;
    Ok((id, replaced))
}

/// Removes the checkin with `id`. Returns whether one was found.
pub fn remove_file<C: LocalClock>(
    service: &MarkdownService<C>,
    path: &Path,
    id: &str,
) -> Result<bool> {
    let mut document = read_document(service, path)?;
    if !document.remove_checkin(id) {
        return Ok(false);
    }
    let text = service.document_write(document)?;
    write_text(path, &text)?;
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use travelog_core::FixedOffset;

    const TEXT: &str = "# 鶴見散歩

- date: 2024-01-01

## 鶴見

- id: 0b6f8a52-4d1e-4c3a-9f7b-2e5d8c1a6b90
- date: 2024-01-01T06:22:00+09:00
";

    fn service() -> MarkdownService<FixedOffset> {
        MarkdownService::new(FixedOffset::east_opt(9 * 3600).unwrap())
    }

    fn write_fixture(dir: &tempfile::TempDir, text: &str) -> std::path::PathBuf {
        let path = dir.path().join("trip.md");
        fs::write(&path, text).unwrap();
        path
    }

    #[test]
    fn test_new_file_writes_header_and_refuses_overwrite() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nagoya.md");

        new_file(&service(), &path, "名古屋旅行", "2024-01-27–30").unwrap();
        assert_eq!(
            fs::read_to_string(&path).unwrap(),
            "# 名古屋旅行\n\n- date: 2024-01-27–30\n"
        );
        assert!(new_file(&service(), &path, "other", "d").is_err());
    }

    #[test]
    fn test_new_file_rejects_blank_title() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("blank.md");
        assert!(new_file(&service(), &path, "  ", "d").is_err());
        assert!(!path.exists());
    }

    #[test]
    fn test_upsert_inserts_in_chronological_order() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_fixture(&dir, TEXT);

        let json = r#"{"location": "国道", "id": "", "datetime": "2024-01-01T05:00:00+09:00"}"#;
        let (id, replaced) = upsert_file(&service(), &path, json).unwrap();
        assert!(!replaced);
        assert!(Uuid::parse_str(&id).is_ok());

        let text = fs::read_to_string(&path).unwrap();
        let first = text.find("## 国道").unwrap();
        let second = text.find("## 鶴見").unwrap();
        assert!(first < second);
    }

    #[test]
    fn test_upsert_replaces_by_id() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_fixture(&dir, TEXT);

        let json = r#"{
            "location": "鶴見",
            "id": "0b6f8a52-4d1e-4c3a-9f7b-2e5d8c1a6b90",
            "datetime": "2024-01-01T06:22:00+09:00",
            "description": "朝の散歩"
        }"#;
        let (_, replaced) = upsert_file(&service(), &path, json).unwrap();
        assert!(replaced);
        assert!(fs::read_to_string(&path).unwrap().ends_with("\n\n朝の散歩\n"));
    }

    #[test]
    fn test_upsert_rejects_invalid_checkin_without_writing() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_fixture(&dir, TEXT);

        let json = r#"{"location": "x", "id": "", "datetime": "yesterday"}"#;
        assert!(upsert_file(&service(), &path, json).is_err());
        assert_eq!(fs::read_to_string(&path).unwrap(), TEXT);
    }

    #[test]
    fn test_upsert_rejects_description_that_would_split_the_checkin() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("trip.md");
        new_file(&service(), &path, "鶴見散歩", "2024-01-01").unwrap();
        let before = fs::read_to_string(&path).unwrap();

        let json = r#"{
            "location": "鶴見",
            "id": "",
            "datetime": "2024-01-01T06:22:00+09:00",
            "description": "memo\n## next stop"
        }"#;
        let err = upsert_file(&service(), &path, json).unwrap_err();
        assert!(format!("{:#}", err).contains("checkins[0].description"));
        assert_eq!(fs::read_to_string(&path).unwrap(), before);

        // The file is still usable afterwards.
        assert!(!remove_file(&service(), &path, "missing").unwrap());
    }

    #[test]
    fn test_concurrent_read_modify_write_keeps_only_last_writer() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_fixture(&dir, TEXT);
        let service = service();

        // Both cycles read the same text before either writes.
        let mut first = read_document(&service, &path).unwrap();
        let mut second = read_document(&service, &path).unwrap();
        first.upsert_checkin(Checkin {
            id: "1c9d2e3f-4a5b-4c6d-8e7f-9a0b1c2d3e4f".into(),
            datetime: "2024-01-01T07:00:00+09:00".into(),
            ..Checkin::new("国道")
        });
        second.upsert_checkin(Checkin {
            id: "7e8f9a0b-1c2d-4e3f-9a4b-5c6d7e8f9a0b".into(),
            datetime: "2024-01-01T08:00:00+09:00".into(),
            ..Checkin::new("弁天橋")
        });
        write_text(&path, &service.document_write(first).unwrap()).unwrap();
        write_text(&path, &service.document_write(second).unwrap()).unwrap();

        let document = read_document(&service, &path).unwrap();
        assert!(document.find_checkin("7e8f9a0b-1c2d-4e3f-9a4b-5c6d7e8f9a0b").is_some());
        assert!(document.find_checkin("1c9d2e3f-4a5b-4c6d-8e7f-9a0b1c2d3e4f").is_none());
        assert_eq!(document.checkins.len(), 2);
    }

    #[test]
    fn test_remove_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_fixture(&dir, TEXT);

        assert!(!remove_file(&service(), &path, "missing").unwrap());
        assert!(remove_file(&service(), &path, "0b6f8a52-4d1e-4c3a-9f7b-2e5d8c1a6b90").unwrap());
        assert_eq!(
            fs::read_to_string(&path).unwrap(),
            "# 鶴見散歩\n\n- date: 2024-01-01\n"
        );
    }

    #[test]
    fn test_validate_and_format() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_fixture(&dir, "# t\n- date: d\n## a\n- id: nope\n");

        let violations = validate_file(&service(), &path).unwrap();
        let paths: Vec<_> = violations.iter().map(|v| v.path.as_str()).collect();
        assert_eq!(paths, ["checkins[0].id", "checkins[0].datetime"]);
        assert!(format_file(&service(), &path, false).is_err());

        let path = write_fixture(&dir, "# 鶴見散歩\n- date: 2024-01-01\n## 鶴見\n- id: 0b6f8a52-4d1e-4c3a-9f7b-2e5d8c1a6b90\n- date: 2024-01-01T06:22:00+09:00\n");
        assert_eq!(format_file(&service(), &path, true).unwrap(), TEXT);
        assert_eq!(fs::read_to_string(&path).unwrap(), TEXT);
    }

    #[test]
    fn test_parse_file_outputs_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_fixture(&dir, TEXT);
        let json = parse_file(&service(), &path, true).unwrap();
        assert!(json.contains("\"title\": \"鶴見散歩\""));
        assert!(json.contains("\"location\": \"鶴見\""));
    }
}

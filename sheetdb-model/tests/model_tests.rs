use pretty_assertions::assert_eq;
use sheetdb_model::{CellValue, Model, Record};

fn record(pairs: &[(&str, CellValue)]) -> Record {
    pairs
        .iter()
        .map(|(key, value)| (key.to_string(), value.clone()))
        .collect()
}

// ── Record's identity Model impl ────────────────────────────────

#[test]
fn record_id_reads_the_id_field() {
    let r = record(&[
        ("id", CellValue::Text("x1".to_string())),
        ("name", CellValue::Text("John".to_string())),
    ]);
    assert_eq!(r.id(), Some("x1"));
}

#[test]
fn record_id_missing_field() {
    let r = record(&[("name", CellValue::Text("John".to_string()))]);
    assert_eq!(r.id(), None);
}

#[test]
fn record_id_non_text_field() {
    let r = record(&[("id", CellValue::Number(7.0))]);
    assert_eq!(r.id(), None);
}

#[test]
fn record_roundtrips_identically() {
    let r = record(&[
        ("id", CellValue::Text("x1".to_string())),
        ("enabled", CellValue::Bool(false)),
        ("year", CellValue::Absent),
    ]);
    assert_eq!(Record::from_record(r.clone()), r);
    assert_eq!(r.to_record(), r);
}

// ── A hand-written typed model ──────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
struct User {
    id: String,
    name: Option<String>,
    enabled: Option<bool>,
}

impl Model for User {
    fn id(&self) -> Option<&str> {
        Some(&self.id)
    }

    fn from_record(record: Record) -> Self {
        User {
            id: record
                .get("id")
                .and_then(CellValue::as_text)
                .unwrap_or_default()
                .to_string(),
            name: record
                .get("name")
                .and_then(CellValue::as_text)
                .map(str::to_string),
            enabled: record.get("enabled").and_then(CellValue::as_bool),
        }
    }

    fn to_record(&self) -> Record {
        record(&[
            ("id", CellValue::Text(self.id.clone())),
            ("name", CellValue::from(self.name.clone())),
            ("enabled", CellValue::from(self.enabled)),
        ])
    }
}

#[test]
fn typed_model_from_record() {
    let r = record(&[
        ("id", CellValue::Text("x1".to_string())),
        ("name", CellValue::Text("John".to_string())),
        ("enabled", CellValue::Bool(false)),
    ]);
    let user = User::from_record(r);
    assert_eq!(
        user,
        User {
            id: "x1".to_string(),
            name: Some("John".to_string()),
            enabled: Some(false),
        }
    );
}

#[test]
fn typed_model_absent_fields() {
    let r = record(&[
        ("id", CellValue::Text("x1".to_string())),
        ("name", CellValue::Absent),
        ("enabled", CellValue::Absent),
    ]);
    let user = User::from_record(r);
    assert_eq!(user.name, None);
    assert_eq!(user.enabled, None);
}

#[test]
fn typed_model_to_record_and_back() {
    let user = User {
        id: "x9".to_string(),
        name: None,
        enabled: Some(true),
    };
    assert_eq!(User::from_record(user.to_record()), user);
}

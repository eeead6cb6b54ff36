// ⌨️ Input Source - text records → entities
//
// Each line is one CSV record without a header. Columns are positional:
//
//   Employee               id,name
//   Manager                id,name,department
//   Letter                 recipient,date_mailed
//   CertifiedLetter        recipient,date_mailed,tracking_number
//   Sunglasses             [frame_color],[lens_color]
//   PrescriptionSunglasses [frame_color],[lens_color],[diopter]
//   TeeShirt               color,price
//   SloganTeeShirt         color,price,[slogan]
//
// Bracketed columns fall back to their declared defaults. Prices are dollars
// ("10", "10.5", "$10.00"). Bad input comes back as a Result, never a panic.

use csv::{ReaderBuilder, StringRecord, Trim};
use std::fmt;
use std::io;
use std::str::FromStr;

use crate::entities::{
    CertifiedLetter, Employee, Entity, Letter, Manager, PrescriptionSunglasses, SloganTeeShirt,
    Sunglasses, TeeShirt,
};
use crate::error::{RecordError, Result};

// ============================================================================
// FROM RECORD
// ============================================================================

/// Build an entity from one positional CSV record.
pub trait FromRecord: Sized {
    fn from_record(record: &StringRecord) -> Result<Self>;
}

/// Positional accessors that turn a record's columns into field values.
pub struct Columns<'r> {
    kind: &'static str,
    record: &'r StringRecord,
}

impl<'r> Columns<'r> {
    pub fn new(kind: &'static str, record: &'r StringRecord) -> Self {
        Columns { kind, record }
    }

    /// Column value, or None when the column is absent or blank.
    pub fn optional_text(&self, index: usize) -> Option<&'r str> {
        self.record
            .get(index)
            .map(str::trim)
            .filter(|value| !value.is_empty())
    }

    pub fn text(&self, index: usize, field: &'static str) -> Result<&'r str> {
        self.optional_text(index)
            .ok_or_else(|| RecordError::missing(self.kind, field))
    }

    pub fn integer(&self, index: usize, field: &'static str) -> Result<i64> {
        let raw = self.text(index, field)?;
        raw.parse::<i64>().map_err(|e| invalid_field(field, raw, e))
    }

    pub fn optional_number(&self, index: usize, field: &'static str) -> Result<Option<f64>> {
        self.optional_text(index)
            .map(|raw| raw.parse::<f64>().map_err(|e| invalid_field(field, raw, e)))
            .transpose()
    }

    /// Dollar amount → whole cents.
    pub fn money(&self, index: usize, field: &'static str) -> Result<i64> {
        let raw = self.text(index, field)?;
        parse_cents(raw).map_err(|reason| invalid_field(field, raw, reason))
    }
}

fn invalid_field(field: &'static str, value: &str, reason: impl fmt::Display) -> RecordError {
    RecordError::InvalidField {
        field,
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

fn parse_cents(raw: &str) -> std::result::Result<i64, String> {
    let amount = raw.strip_prefix('$').unwrap_or(raw);
    if amount.starts_with('-') {
        return Err("negative amounts are not accepted".to_string());
    }

    let (whole, fraction) = amount.split_once('.').unwrap_or((amount, ""));
    if whole.is_empty() && fraction.is_empty() {
        return Err("no digits".to_string());
    }
    if !whole.chars().all(|c| c.is_ascii_digit()) || !fraction.chars().all(|c| c.is_ascii_digit()) {
        return Err("expected a dollar amount such as 10.00".to_string());
    }
    if fraction.len() > 2 {
        return Err("more than two decimal places".to_string());
    }

    let dollars: i64 = if whole.is_empty() {
        0
    } else {
        whole.parse().map_err(|e: std::num::ParseIntError| e.to_string())?
    };
    let cents: i64 = match fraction.len() {
        0 => 0,
        1 => fraction.parse::<i64>().map_err(|e| e.to_string())? * 10,
        _ => fraction.parse::<i64>().map_err(|e| e.to_string())?,
    };

    dollars
        .checked_mul(100)
        .and_then(|total| total.checked_add(cents))
        .ok_or_else(|| "amount is too large".to_string())
}

// ============================================================================
// RECORD IMPLEMENTATIONS
// ============================================================================

impl FromRecord for Employee {
    fn from_record(record: &StringRecord) -> Result<Self> {
        let columns = Columns::new(Employee::KIND, record);
        Employee::new(columns.integer(0, "id")?, columns.text(1, "name")?)
    }
}

impl FromRecord for Manager {
    fn from_record(record: &StringRecord) -> Result<Self> {
        let columns = Columns::new(Manager::KIND, record);
        Manager::new(
            columns.integer(0, "id")?,
            columns.text(1, "name")?,
            columns.text(2, "department")?,
        )
    }
}

impl FromRecord for Letter {
    fn from_record(record: &StringRecord) -> Result<Self> {
        let columns = Columns::new(Letter::KIND, record);
        Letter::new(columns.text(0, "recipient")?, columns.text(1, "date_mailed")?)
    }
}

impl FromRecord for CertifiedLetter {
    fn from_record(record: &StringRecord) -> Result<Self> {
        let columns = Columns::new(CertifiedLetter::KIND, record);
        CertifiedLetter::new(
            columns.text(0, "recipient")?,
            columns.text(1, "date_mailed")?,
            columns.text(2, "tracking_number")?,
        )
    }
}

impl FromRecord for Sunglasses {
    fn from_record(record: &StringRecord) -> Result<Self> {
        let columns = Columns::new(Sunglasses::KIND, record);
        let mut builder = Sunglasses::builder();
        if let Some(frame) = columns.optional_text(0) {
            builder = builder.frame_color(frame);
        }
        if let Some(lens) = columns.optional_text(1) {
            builder = builder.lens_color(lens);
        }
        builder.build()
    }
}

impl FromRecord for PrescriptionSunglasses {
    fn from_record(record: &StringRecord) -> Result<Self> {
        let columns = Columns::new(PrescriptionSunglasses::KIND, record);
        let mut builder = PrescriptionSunglasses::builder();
        if let Some(frame) = columns.optional_text(0) {
            builder = builder.frame_color(frame);
        }
        if let Some(lens) = columns.optional_text(1) {
            builder = builder.lens_color(lens);
        }
        if let Some(diopter) = columns.optional_number(2, "diopter")? {
            builder = builder.diopter(diopter);
        }
        builder.build()
    }
}

impl FromRecord for TeeShirt {
    fn from_record(record: &StringRecord) -> Result<Self> {
        let columns = Columns::new(TeeShirt::KIND, record);
        TeeShirt::new(columns.text(0, "color")?, columns.money(1, "price")?)
    }
}

impl FromRecord for SloganTeeShirt {
    fn from_record(record: &StringRecord) -> Result<Self> {
        let columns = Columns::new(SloganTeeShirt::KIND, record);
        SloganTeeShirt::new(
            columns.text(0, "color")?,
            columns.money(1, "price")?,
            columns.optional_text(2).map(str::to_string),
        )
    }
}

// ============================================================================
// READERS
// ============================================================================

/// Headerless, trimmed, ragged-row CSV reader.
pub fn reader<R: io::Read>(source: R) -> csv::Reader<R> {
    ReaderBuilder::new()
        .has_headers(false)
        .trim(Trim::All)
        .flexible(true)
        .from_reader(source)
}

/// One Result per input line; callers decide what to do with bad rows.
pub fn read_records<E: FromRecord, R: io::Read>(source: R) -> Vec<Result<E>> {
    reader(source)
        .records()
        .map(|row| {
            let record = row?;
            E::from_record(&record)
        })
        .collect()
}

/// Parse a single line of text.
pub fn parse_line<E: FromRecord>(line: &str) -> Result<E> {
    let mut rows = reader(line.as_bytes()).into_records();
    match rows.next() {
        Some(row) => E::from_record(&row?),
        None => E::from_record(&StringRecord::new()),
    }
}

// ============================================================================
// RECORD KIND
// ============================================================================

/// Every record kind the input source understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordKind {
    Employee,
    Manager,
    Letter,
    CertifiedLetter,
    Sunglasses,
    PrescriptionSunglasses,
    TeeShirt,
    SloganTeeShirt,
}

impl RecordKind {
    pub const ALL: [RecordKind; 8] = [
        RecordKind::Employee,
        RecordKind::Manager,
        RecordKind::Letter,
        RecordKind::CertifiedLetter,
        RecordKind::Sunglasses,
        RecordKind::PrescriptionSunglasses,
        RecordKind::TeeShirt,
        RecordKind::SloganTeeShirt,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            RecordKind::Employee => Employee::KIND,
            RecordKind::Manager => Manager::KIND,
            RecordKind::Letter => Letter::KIND,
            RecordKind::CertifiedLetter => CertifiedLetter::KIND,
            RecordKind::Sunglasses => Sunglasses::KIND,
            RecordKind::PrescriptionSunglasses => PrescriptionSunglasses::KIND,
            RecordKind::TeeShirt => TeeShirt::KIND,
            RecordKind::SloganTeeShirt => SloganTeeShirt::KIND,
        }
    }

    /// Parse one record of this kind into a boxed entity.
    pub fn parse_record(&self, record: &StringRecord) -> Result<Box<dyn Entity>> {
        let entity: Box<dyn Entity> = match self {
            RecordKind::Employee => Box::new(Employee::from_record(record)?),
            RecordKind::Manager => Box::new(Manager::from_record(record)?),
            RecordKind::Letter => Box::new(Letter::from_record(record)?),
            RecordKind::CertifiedLetter => Box::new(CertifiedLetter::from_record(record)?),
            RecordKind::Sunglasses => Box::new(Sunglasses::from_record(record)?),
            RecordKind::PrescriptionSunglasses => {
                Box::new(PrescriptionSunglasses::from_record(record)?)
            }
            RecordKind::TeeShirt => Box::new(TeeShirt::from_record(record)?),
            RecordKind::SloganTeeShirt => Box::new(SloganTeeShirt::from_record(record)?),
        };
        Ok(entity)
    }
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RecordKind {
    type Err = RecordError;

    /// Case-insensitive; dashes and underscores are ignored ("certified-letter").
    fn from_str(s: &str) -> Result<Self> {
        let wanted: String = s
            .chars()
            .filter(|c| *c != '-' && *c != '_')
            .collect::<String>()
            .to_lowercase();

        RecordKind::ALL
            .into_iter()
            .find(|kind| kind.as_str().to_lowercase() == wanted)
            .ok_or_else(|| RecordError::InvalidField {
                field: "kind",
                value: s.to_string(),
                reason: "unknown record kind".to_string(),
            })
    }
}

/// Like `read_records`, for a kind chosen at runtime.
pub fn read_any<R: io::Read>(kind: RecordKind, source: R) -> Vec<Result<Box<dyn Entity>>> {
    reader(source)
        .records()
        .map(|row| {
            let record = row?;
            kind.parse_record(&record)
        })
        .collect()
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_employee_line() {
        let emp: Employee = parse_line("234, Johnson").unwrap();
        assert_eq!(emp, Employee::new(234, "Johnson").unwrap());
    }

    #[test]
    fn test_parse_employee_bad_id() {
        let err = parse_line::<Employee>("abc,Johnson").unwrap_err();

        match err {
            RecordError::InvalidField { field, value, .. } => {
                assert_eq!(field, "id");
                assert_eq!(value, "abc");
            }
            other => panic!("unexpected error: {}", other),
        }
    }

    #[test]
    fn test_parse_manager_missing_department() {
        let err = parse_line::<Manager>("567,Smith").unwrap_err();
        assert!(matches!(
            err,
            RecordError::InvalidConstruction { kind: "Manager", field: "department", .. }
        ));
    }

    #[test]
    fn test_parse_empty_line() {
        let err = parse_line::<Employee>("").unwrap_err();
        assert!(matches!(err, RecordError::InvalidConstruction { field: "id", .. }));
    }

    #[test]
    fn test_parse_certified_letter_with_quoted_name() {
        let letter: CertifiedLetter = parse_line("\"Smith, Jane\",11/17/2025,ABC123").unwrap();

        assert_eq!(letter.letter.recipient, "Smith, Jane");
        assert_eq!(letter.tracking_number, "ABC123");
    }

    #[test]
    fn test_parse_sunglasses_defaults() {
        let plain: Sunglasses = parse_line("").unwrap();
        assert_eq!(plain, Sunglasses::default());

        let rx: PrescriptionSunglasses = parse_line(",,-2.25").unwrap();
        assert_eq!(rx.sunglasses, Sunglasses::default());
        assert_eq!(rx.diopter, -2.25);

        let err = parse_line::<PrescriptionSunglasses>("black,brown,strong").unwrap_err();
        assert!(matches!(err, RecordError::InvalidField { field: "diopter", .. }));
    }

    #[test]
    fn test_parse_tee_shirts() {
        let shirt: TeeShirt = parse_line("blue,$10.00").unwrap();
        assert_eq!(shirt.price_cents, 1000);

        let slogan: SloganTeeShirt = parse_line("orange,10.5,Tigers").unwrap();
        assert_eq!(slogan.tee_shirt.price_cents, 1050);
        assert_eq!(slogan.slogan.as_deref(), Some("Tigers"));

        let no_slogan: SloganTeeShirt = parse_line("orange,10").unwrap();
        assert_eq!(no_slogan.slogan, None);
    }

    #[test]
    fn test_parse_cents() {
        assert_eq!(parse_cents("10"), Ok(1000));
        assert_eq!(parse_cents("$9.99"), Ok(999));
        assert_eq!(parse_cents(".5"), Ok(50));
        assert!(parse_cents("-1.00").is_err());
        assert!(parse_cents("1.999").is_err());
        assert!(parse_cents("ten").is_err());
        assert!(parse_cents("$").is_err());
        assert!(parse_cents("99999999999999999999").is_err());
    }

    #[test]
    fn test_read_records_keeps_going_after_bad_rows() {
        let input = "234,Johnson\nnope,Smith\n567,Smith\n";
        let results: Vec<Result<Employee>> = read_records(input.as_bytes());

        assert_eq!(results.len(), 3);
        assert!(results[0].is_ok());
        assert!(results[1].is_err());
        assert_eq!(results[2].as_ref().unwrap().id, 567);
    }

    #[test]
    fn test_record_kind_from_str() {
        assert_eq!("manager".parse::<RecordKind>().unwrap(), RecordKind::Manager);
        assert_eq!(
            "certified-letter".parse::<RecordKind>().unwrap(),
            RecordKind::CertifiedLetter
        );
        assert_eq!(
            "Slogan_Tee_Shirt".parse::<RecordKind>().unwrap(),
            RecordKind::SloganTeeShirt
        );
        assert!("dog".parse::<RecordKind>().is_err());
    }

    #[test]
    fn test_read_any_boxes_entities() {
        let input = "Jane Smith,11/17/2025,ABC123\n";
        let results = read_any(RecordKind::CertifiedLetter, input.as_bytes());

        let entity = results.into_iter().next().unwrap().unwrap();
        assert_eq!(entity.kind(), "CertifiedLetter");
        assert_eq!(
            entity.to_string(),
            "Letter | Recipient: Jane Smith, Date Mailed: 11/17/2025, Tracking #: ABC123"
        );
    }
}

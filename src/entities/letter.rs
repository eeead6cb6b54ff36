// ✉️ Letter Entity - mailed correspondence
//
// Letter:          "Letter | Recipient: Jane Smith, Date Mailed: 11/17/2025"
// CertifiedLetter: the Letter text + ", Tracking #: ABC123"
//
// The mailing date stays as text, trimmed of surrounding whitespace; it only
// has to parse as MM/DD/YYYY at construction.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::any::Any;
use std::fmt;

use super::{extended_fields, fmt_extended, require_text, required, Entity, Extends, Field, FieldValue};
use crate::error::{RecordError, Result};

/// Accepted layout for `date_mailed`
pub const DATE_FORMAT: &str = "%m/%d/%Y";

// ============================================================================
// LETTER
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "LetterRecord")]
pub struct Letter {
    pub recipient: String,
    pub date_mailed: String,
}

impl Letter {
    pub const KIND: &'static str = "Letter";

    pub fn new(recipient: impl Into<String>, date_mailed: impl Into<String>) -> Result<Self> {
        let letter = Letter {
            recipient: recipient.into(),
            date_mailed: date_mailed.into().trim().to_string(),
        };
        letter.check(Self::KIND)?;
        Ok(letter)
    }

    pub fn builder() -> LetterBuilder {
        LetterBuilder::default()
    }

    /// Parsed mailing date, if the current text is a valid date.
    pub fn mailed_on(&self) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(&self.date_mailed, DATE_FORMAT).ok()
    }

    fn check(&self, kind: &'static str) -> Result<()> {
        require_text(kind, "recipient", &self.recipient)?;
        require_text(kind, "date_mailed", &self.date_mailed)?;

        if self.date_mailed.trim() != self.date_mailed {
            return Err(RecordError::invalid(
                kind,
                "date_mailed",
                "has surrounding whitespace",
            ));
        }

        NaiveDate::parse_from_str(&self.date_mailed, DATE_FORMAT).map_err(|e| {
            tracing::debug!(kind, date = %self.date_mailed, "unparseable mailing date");
            RecordError::invalid(kind, "date_mailed", format!("is not a MM/DD/YYYY date ({})", e))
        })?;

        Ok(())
    }
}

impl Entity for Letter {
    fn kind(&self) -> &'static str {
        Self::KIND
    }

    fn fields(&self) -> Vec<Field<'_>> {
        vec![
            Field::new("recipient", FieldValue::Text(&self.recipient)),
            Field::new("date_mailed", FieldValue::Date(&self.date_mailed)),
        ]
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

impl fmt::Display for Letter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Letter | Recipient: {}, Date Mailed: {}",
            self.recipient, self.date_mailed
        )
    }
}

value_semantics!(Letter);

#[derive(Debug, Clone, Default)]
pub struct LetterBuilder {
    recipient: Option<String>,
    date_mailed: Option<String>,
}

impl LetterBuilder {
    pub fn recipient(mut self, recipient: impl Into<String>) -> Self {
        self.recipient = Some(recipient.into());
        self
    }

    pub fn date_mailed(mut self, date_mailed: impl Into<String>) -> Self {
        self.date_mailed = Some(date_mailed.into());
        self
    }

    pub fn build(self) -> Result<Letter> {
        let recipient = required(Letter::KIND, "recipient", self.recipient)?;
        let date_mailed = required(Letter::KIND, "date_mailed", self.date_mailed)?;
        Letter::new(recipient, date_mailed)
    }
}

// ============================================================================
// CERTIFIED LETTER
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "CertifiedLetterRecord")]
pub struct CertifiedLetter {
    #[serde(flatten)]
    pub letter: Letter,
    pub tracking_number: String,
}

impl CertifiedLetter {
    pub const KIND: &'static str = "CertifiedLetter";

    pub fn new(
        recipient: impl Into<String>,
        date_mailed: impl Into<String>,
        tracking_number: impl Into<String>,
    ) -> Result<Self> {
        let letter = Letter {
            recipient: recipient.into(),
            date_mailed: date_mailed.into().trim().to_string(),
        };
        Self::certify(letter, tracking_number)
    }

    /// Attach a tracking number to an existing letter.
    pub fn certify(letter: Letter, tracking_number: impl Into<String>) -> Result<Self> {
        let tracking_number = tracking_number.into();
        letter.check(Self::KIND)?;
        require_text(Self::KIND, "tracking_number", &tracking_number)?;
        Ok(CertifiedLetter {
            letter,
            tracking_number,
        })
    }

    pub fn builder() -> CertifiedLetterBuilder {
        CertifiedLetterBuilder::default()
    }

    pub fn mailed_on(&self) -> Option<NaiveDate> {
        self.letter.mailed_on()
    }
}

impl Extends for CertifiedLetter {
    type Base = Letter;

    fn base(&self) -> &Letter {
        &self.letter
    }

    fn own_fields(&self) -> Vec<Field<'_>> {
        vec![Field::new("tracking_number", FieldValue::Text(&self.tracking_number))]
    }

    fn fmt_extension(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Tracking #: {}", self.tracking_number)
    }
}

impl Entity for CertifiedLetter {
    fn kind(&self) -> &'static str {
        Self::KIND
    }

    fn fields(&self) -> Vec<Field<'_>> {
        extended_fields(self)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

impl fmt::Display for CertifiedLetter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt_extended(self, f)
    }
}

value_semantics!(CertifiedLetter);

#[derive(Debug, Clone, Default)]
pub struct CertifiedLetterBuilder {
    recipient: Option<String>,
    date_mailed: Option<String>,
    tracking_number: Option<String>,
}

impl CertifiedLetterBuilder {
    pub fn recipient(mut self, recipient: impl Into<String>) -> Self {
        self.recipient = Some(recipient.into());
        self
    }

    pub fn date_mailed(mut self, date_mailed: impl Into<String>) -> Self {
        self.date_mailed = Some(date_mailed.into());
        self
    }

    pub fn tracking_number(mut self, tracking_number: impl Into<String>) -> Self {
        self.tracking_number = Some(tracking_number.into());
        self
    }

    pub fn build(self) -> Result<CertifiedLetter> {
        let recipient = required(CertifiedLetter::KIND, "recipient", self.recipient)?;
        let date_mailed = required(CertifiedLetter::KIND, "date_mailed", self.date_mailed)?;
        let tracking_number =
            required(CertifiedLetter::KIND, "tracking_number", self.tracking_number)?;
        CertifiedLetter::new(recipient, date_mailed, tracking_number)
    }
}

// ============================================================================
// DESERIALIZATION
// ============================================================================

#[derive(Deserialize)]
struct LetterRecord {
    recipient: String,
    date_mailed: String,
}

impl TryFrom<LetterRecord> for Letter {
    type Error = RecordError;

    fn try_from(record: LetterRecord) -> Result<Self> {
        Letter::new(record.recipient, record.date_mailed)
    }
}

#[derive(Deserialize)]
struct CertifiedLetterRecord {
    recipient: String,
    date_mailed: String,
    tracking_number: String,
}

impl TryFrom<CertifiedLetterRecord> for CertifiedLetter {
    type Error = RecordError;

    fn try_from(record: CertifiedLetterRecord) -> Result<Self> {
        CertifiedLetter::new(record.recipient, record.date_mailed, record.tracking_number)
    }
}

// ============================================================================
// TESTS
// ============================================================================

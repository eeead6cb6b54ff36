// 🕶️ Sunglasses Entity - every field has a declared default
//
// Sunglasses default to a black frame and brown lenses.
// PrescriptionSunglasses add a diopter that defaults to 0.0.

use serde::{Deserialize, Serialize};
use std::any::Any;
use std::fmt;

use super::{extended_fields, fmt_extended, require_text, Entity, Extends, Field, FieldValue};
use crate::error::{RecordError, Result};

pub const DEFAULT_FRAME_COLOR: &str = "black";
pub const DEFAULT_LENS_COLOR: &str = "brown";
pub const DEFAULT_DIOPTER: f64 = 0.0;

// ============================================================================
// SUNGLASSES
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "SunglassesRecord")]
pub struct Sunglasses {
    pub frame_color: String,
    pub lens_color: String,
}

impl Sunglasses {
    pub const KIND: &'static str = "Sunglasses";

    pub fn new(frame_color: impl Into<String>, lens_color: impl Into<String>) -> Result<Self> {
        let sunglasses = Sunglasses {
            frame_color: frame_color.into(),
            lens_color: lens_color.into(),
        };
        sunglasses.check(Self::KIND)?;
        Ok(sunglasses)
    }

    pub fn builder() -> SunglassesBuilder {
        SunglassesBuilder::default()
    }

    fn check(&self, kind: &'static str) -> Result<()> {
        require_text(kind, "frame_color", &self.frame_color)?;
        require_text(kind, "lens_color", &self.lens_color)
    }
}

impl Default for Sunglasses {
    fn default() -> Self {
        Sunglasses {
            frame_color: DEFAULT_FRAME_COLOR.to_string(),
            lens_color: DEFAULT_LENS_COLOR.to_string(),
        }
    }
}

impl Entity for Sunglasses {
    fn kind(&self) -> &'static str {
        Self::KIND
    }

    fn fields(&self) -> Vec<Field<'_>> {
        vec![
            Field::new("frame_color", FieldValue::Text(&self.frame_color)),
            Field::new("lens_color", FieldValue::Text(&self.lens_color)),
        ]
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

impl fmt::Display for Sunglasses {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Sunglasses | Frame: {}, Lens: {}",
            self.frame_color, self.lens_color
        )
    }
}

value_semantics!(Sunglasses);

/// Omitted fields fall back to their declared defaults.
#[derive(Debug, Clone, Default)]
pub struct SunglassesBuilder {
    frame_color: Option<String>,
    lens_color: Option<String>,
}

impl SunglassesBuilder {
    pub fn frame_color(mut self, frame_color: impl Into<String>) -> Self {
        self.frame_color = Some(frame_color.into());
        self
    }

    pub fn lens_color(mut self, lens_color: impl Into<String>) -> Self {
        self.lens_color = Some(lens_color.into());
        self
    }

    pub fn build(self) -> Result<Sunglasses> {
        Sunglasses::new(
            self.frame_color
                .unwrap_or_else(|| DEFAULT_FRAME_COLOR.to_string()),
            self.lens_color
                .unwrap_or_else(|| DEFAULT_LENS_COLOR.to_string()),
        )
    }
}

// ============================================================================
// PRESCRIPTION SUNGLASSES
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "PrescriptionSunglassesRecord")]
pub struct PrescriptionSunglasses {
    #[serde(flatten)]
    pub sunglasses: Sunglasses,
    pub diopter: f64,
}

impl PrescriptionSunglasses {
    pub const KIND: &'static str = "PrescriptionSunglasses";

    pub fn new(
        frame_color: impl Into<String>,
        lens_color: impl Into<String>,
        diopter: f64,
    ) -> Result<Self> {
        let sunglasses = Sunglasses {
            frame_color: frame_color.into(),
            lens_color: lens_color.into(),
        };
        Self::with_prescription(sunglasses, diopter)
    }

    pub fn with_prescription(sunglasses: Sunglasses, diopter: f64) -> Result<Self> {
        sunglasses.check(Self::KIND)?;
        if !diopter.is_finite() {
            tracing::debug!(diopter, "non-finite diopter rejected");
            return Err(RecordError::invalid(Self::KIND, "diopter", "must be a finite number"));
        }
        Ok(PrescriptionSunglasses {
            sunglasses,
            diopter,
        })
    }

    pub fn builder() -> PrescriptionSunglassesBuilder {
        PrescriptionSunglassesBuilder::default()
    }
}

impl Default for PrescriptionSunglasses {
    fn default() -> Self {
        PrescriptionSunglasses {
            sunglasses: Sunglasses::default(),
            diopter: DEFAULT_DIOPTER,
        }
    }
}

impl Extends for PrescriptionSunglasses {
    type Base = Sunglasses;

    fn base(&self) -> &Sunglasses {
        &self.sunglasses
    }

    fn own_fields(&self) -> Vec<Field<'_>> {
        vec![Field::new("diopter", FieldValue::Number(self.diopter))]
    }

    fn fmt_extension(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Diopter: {:+.2}", self.diopter)
    }
}

impl Entity for PrescriptionSunglasses {
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

impl fmt::Display for PrescriptionSunglasses {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt_extended(self, f)
    }
}

value_semantics!(PrescriptionSunglasses);

#[derive(Debug, Clone, Default)]
pub struct PrescriptionSunglassesBuilder {
    frame_color: Option<String>,
    lens_color: Option<String>,
    diopter: Option<f64>,
}

impl PrescriptionSunglassesBuilder {
    pub fn frame_color(mut self, frame_color: impl Into<String>) -> Self {
        self.frame_color = Some(frame_color.into());
        self
    }

    pub fn lens_color(mut self, lens_color: impl Into<String>) -> Self {
        self.lens_color = Some(lens_color.into());
        self
    }

    pub fn diopter(mut self, diopter: f64) -> Self {
        self.diopter = Some(diopter);
        self
    }

    pub fn build(self) -> Result<PrescriptionSunglasses> {
        PrescriptionSunglasses::new(
            self.frame_color
                .unwrap_or_else(|| DEFAULT_FRAME_COLOR.to_string()),
            self.lens_color
                .unwrap_or_else(|| DEFAULT_LENS_COLOR.to_string()),
            self.diopter.unwrap_or(DEFAULT_DIOPTER),
        )
    }
}

// ============================================================================
// DESERIALIZATION
// ============================================================================

// Omitted fields take the declared defaults, as in the builders.

fn default_frame_color() -> String {
    DEFAULT_FRAME_COLOR.to_string()
}

fn default_lens_color() -> String {
    DEFAULT_LENS_COLOR.to_string()
}

fn default_diopter() -> f64 {
    DEFAULT_DIOPTER
}

#[derive(Deserialize)]
struct SunglassesRecord {
    #[serde(default = "default_frame_color")]
    frame_color: String,
    #[serde(default = "default_lens_color")]
    lens_color: String,
}

impl TryFrom<SunglassesRecord> for Sunglasses {
    type Error = RecordError;

    fn try_from(record: SunglassesRecord) -> Result<Self> {
        Sunglasses::new(record.frame_color, record.lens_color)
    }
}

#[derive(Deserialize)]
struct PrescriptionSunglassesRecord {
    #[serde(default = "default_frame_color")]
    frame_color: String,
    #[serde(default = "default_lens_color")]
    lens_color: String,
    #[serde(default = "default_diopter")]
    diopter: f64,
}

impl TryFrom<PrescriptionSunglassesRecord> for PrescriptionSunglasses {
    type Error = RecordError;

    fn try_from(record: PrescriptionSunglassesRecord) -> Result<Self> {
        PrescriptionSunglasses::new(record.frame_color, record.lens_color, record.diopter)
    }
}

// ============================================================================
// TESTS
// ============================================================================

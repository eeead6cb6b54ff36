// 👕 TeeShirt Entity - priced records with an overridable discount
//
// TeeShirt takes 10% off; SloganTeeShirt takes 20%.
// A promotion on a SloganTeeShirt is applied to the BASE discounted price.
// Prices are whole cents to keep equality exact.

use serde::{Deserialize, Serialize};
use std::any::Any;
use std::fmt;

use super::{
    extended_fields, fmt_extended, require_non_negative, require_text, required, Entity, Extends,
    Field, FieldValue,
};
use crate::error::{RecordError, Result};

pub const TEE_SHIRT_DISCOUNT_PERCENT: i64 = 10;
pub const SLOGAN_DISCOUNT_PERCENT: i64 = 20;

/// Renders whole cents as dollars: `Money(1000)` → "$10.00"
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Money(pub i64);

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let cents = self.0.unsigned_abs();
        write!(f, "{}${}.{:02}", sign, cents / 100, cents % 100)
    }
}

/// Price reduction shared by every priced kind; variants override the rate.
pub trait Discounted {
    fn price_cents(&self) -> i64;

    fn discount_percent(&self) -> i64;

    /// Truncates toward zero; widened so large prices cannot overflow.
    fn discounted_cents(&self) -> i64 {
        let price = i128::from(self.price_cents());
        let off = price * i128::from(self.discount_percent()) / 100;
        let discounted = price - off;
        i64::try_from(discounted).unwrap_or(if discounted < 0 { i64::MIN } else { i64::MAX })
    }
}

// ============================================================================
// TEE SHIRT
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "TeeShirtRecord")]
pub struct TeeShirt {
    pub color: String,
    pub price_cents: i64,
}

impl TeeShirt {
    pub const KIND: &'static str = "TeeShirt";

    pub fn new(color: impl Into<String>, price_cents: i64) -> Result<Self> {
        let shirt = TeeShirt {
            color: color.into(),
            price_cents,
        };
        shirt.check(Self::KIND)?;
        Ok(shirt)
    }

    pub fn builder() -> TeeShirtBuilder {
        TeeShirtBuilder::default()
    }

    fn check(&self, kind: &'static str) -> Result<()> {
        require_text(kind, "color", &self.color)?;
        require_non_negative(kind, "price_cents", self.price_cents)
    }
}

impl Discounted for TeeShirt {
    fn price_cents(&self) -> i64 {
        self.price_cents
    }

    fn discount_percent(&self) -> i64 {
        TEE_SHIRT_DISCOUNT_PERCENT
    }
}

impl Entity for TeeShirt {
    fn kind(&self) -> &'static str {
        Self::KIND
    }

    fn fields(&self) -> Vec<Field<'_>> {
        vec![
            Field::new("color", FieldValue::Text(&self.color)),
            Field::new("price_cents", FieldValue::Integer(self.price_cents)),
        ]
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

impl fmt::Display for TeeShirt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "TeeShirt | Color: {}, Price: {}",
            self.color,
            Money(self.price_cents)
        )
    }
}

value_semantics!(TeeShirt);

#[derive(Debug, Clone, Default)]
pub struct TeeShirtBuilder {
    color: Option<String>,
    price_cents: Option<i64>,
}

impl TeeShirtBuilder {
    pub fn color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    pub fn price_cents(mut self, price_cents: i64) -> Self {
        self.price_cents = Some(price_cents);
        self
    }

    pub fn build(self) -> Result<TeeShirt> {
        let color = required(TeeShirt::KIND, "color", self.color)?;
        let price_cents = required(TeeShirt::KIND, "price_cents", self.price_cents)?;
        TeeShirt::new(color, price_cents)
    }
}

// ============================================================================
// SLOGAN TEE SHIRT
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "SloganTeeShirtRecord")]
pub struct SloganTeeShirt {
    #[serde(flatten)]
    pub tee_shirt: TeeShirt,
    /// Declared default: no slogan
    pub slogan: Option<String>,
}

impl SloganTeeShirt {
    pub const KIND: &'static str = "SloganTeeShirt";

    pub fn new(color: impl Into<String>, price_cents: i64, slogan: Option<String>) -> Result<Self> {
        let tee_shirt = TeeShirt {
            color: color.into(),
            price_cents,
        };
        tee_shirt.check(Self::KIND)?;
        Ok(SloganTeeShirt { tee_shirt, slogan })
    }

    pub fn builder() -> SloganTeeShirtBuilder {
        SloganTeeShirtBuilder::default()
    }

    /// Base (10%) discounted price minus a flat promotion, floored at zero.
    /// A negative promotion counts as no promotion.
    pub fn discounted_with_promotion(&self, promotion_cents: i64) -> i64 {
        self.tee_shirt
            .discounted_cents()
            .saturating_sub(promotion_cents.max(0))
            .max(0)
    }
}

impl Discounted for SloganTeeShirt {
    fn price_cents(&self) -> i64 {
        self.tee_shirt.price_cents
    }

    fn discount_percent(&self) -> i64 {
        SLOGAN_DISCOUNT_PERCENT
    }
}

impl Extends for SloganTeeShirt {
    type Base = TeeShirt;

    fn base(&self) -> &TeeShirt {
        &self.tee_shirt
    }

    fn own_fields(&self) -> Vec<Field<'_>> {
        vec![Field::new(
            "slogan",
            FieldValue::optional_text(self.slogan.as_deref()),
        )]
    }

    fn fmt_extension(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Slogan: {}", self.slogan.as_deref().unwrap_or(""))
    }
}

impl Entity for SloganTeeShirt {
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

impl fmt::Display for SloganTeeShirt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt_extended(self, f)
    }
}

value_semantics!(SloganTeeShirt);

#[derive(Debug, Clone, Default)]
pub struct SloganTeeShirtBuilder {
    color: Option<String>,
    price_cents: Option<i64>,
    slogan: Option<String>,
}

impl SloganTeeShirtBuilder {
    pub fn color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    pub fn price_cents(mut self, price_cents: i64) -> Self {
        self.price_cents = Some(price_cents);
        self
    }

    pub fn slogan(mut self, slogan: impl Into<String>) -> Self {
        self.slogan = Some(slogan.into());
        self
    }

    pub fn build(self) -> Result<SloganTeeShirt> {
        let color = required(SloganTeeShirt::KIND, "color", self.color)?;
        let price_cents = required(SloganTeeShirt::KIND, "price_cents", self.price_cents)?;
        SloganTeeShirt::new(color, price_cents, self.slogan)
    }
}

// ============================================================================
// DESERIALIZATION
// ============================================================================

// Serialized forms go back through `new`, so stored JSON cannot skip validation.

#[derive(Deserialize)]
struct TeeShirtRecord {
    color: String,
    price_cents: i64,
}

impl TryFrom<TeeShirtRecord> for TeeShirt {
    type Error = RecordError;

    fn try_from(record: TeeShirtRecord) -> Result<Self> {
        TeeShirt::new(record.color, record.price_cents)
    }
}

#[derive(Deserialize)]
struct SloganTeeShirtRecord {
    color: String,
    price_cents: i64,
    #[serde(default)]
    slogan: Option<String>,
}

impl TryFrom<SloganTeeShirtRecord> for SloganTeeShirt {
    type Error = RecordError;

    fn try_from(record: SloganTeeShirtRecord) -> Result<Self> {
        SloganTeeShirt::new(record.color, record.price_cents, record.slogan)
    }
}

// ============================================================================
// TESTS
// ============================================================================

// Entity Models - value records with layered display
// "Equality is a property of VALUES, not of where they live"
//
// Each entity has:
// - A kind tag that is constant for its concrete type
// - An ordered field list (inherited fields first)
// - A Display rendering; variants render their base first, then their own part
//
// Equality and hashing are implemented ONCE here and wired into every
// concrete kind through `value_semantics!`.

use serde::Serialize;
use std::any::{Any, TypeId};
use std::collections::hash_map::DefaultHasher;
use std::fmt;
use std::hash::{Hash, Hasher};

use crate::error::{RecordError, Result};

/// Wires `PartialEq`, `Eq` and `Hash` for a concrete kind through the
/// generic routines below.
macro_rules! value_semantics {
    ($kind:ty) => {
        impl PartialEq for $kind {
            fn eq(&self, other: &Self) -> bool {
                $crate::entities::same_value(self, other)
            }
        }

        impl Eq for $kind {}

        impl std::hash::Hash for $kind {
            fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
                $crate::entities::hash_into(self, state)
            }
        }
    };
}

pub mod employee;
pub mod letter;
pub mod sunglasses;
pub mod teeshirt;

pub use employee::{Employee, EmployeeBuilder, Manager, ManagerBuilder};
pub use letter::{CertifiedLetter, CertifiedLetterBuilder, Letter, LetterBuilder};
pub use sunglasses::{
    PrescriptionSunglasses, PrescriptionSunglassesBuilder, Sunglasses, SunglassesBuilder,
};
pub use teeshirt::{Discounted, Money, SloganTeeShirt, SloganTeeShirtBuilder, TeeShirt, TeeShirtBuilder};

/// Separator placed between a base rendering and a variant's contribution.
pub const SEPARATOR: &str = ", ";

// ============================================================================
// FIELD VALUES
// ============================================================================

/// A borrowed view of one field's current value.
#[derive(Debug, Clone, Copy, Serialize)]
#[serde(untagged)]
pub enum FieldValue<'a> {
    Integer(i64),
    Text(&'a str),
    /// Date kept as the text it was given (e.g. "11/17/2025")
    Date(&'a str),
    Number(f64),
    /// Optional text with no value
    Unset,
}

impl<'a> FieldValue<'a> {
    pub fn optional_text(value: Option<&'a str>) -> Self {
        value.map_or(FieldValue::Unset, FieldValue::Text)
    }
}

// Numbers compare by bit pattern so that equality stays reflexive (NaN) and
// agrees with the hash.
impl PartialEq for FieldValue<'_> {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (FieldValue::Integer(a), FieldValue::Integer(b)) => a == b,
            (FieldValue::Text(a), FieldValue::Text(b)) => a == b,
            (FieldValue::Date(a), FieldValue::Date(b)) => a == b,
            (FieldValue::Number(a), FieldValue::Number(b)) => a.to_bits() == b.to_bits(),
            (FieldValue::Unset, FieldValue::Unset) => true,
            _ => false,
        }
    }
}

impl Eq for FieldValue<'_> {}

impl Hash for FieldValue<'_> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        std::mem::discriminant(self).hash(state);
        match self {
            FieldValue::Integer(value) => value.hash(state),
            FieldValue::Text(value) | FieldValue::Date(value) => value.hash(state),
            FieldValue::Number(value) => value.to_bits().hash(state),
            FieldValue::Unset => {}
        }
    }
}

impl fmt::Display for FieldValue<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Integer(value) => write!(f, "{}", value),
            FieldValue::Text(value) | FieldValue::Date(value) => f.write_str(value),
            FieldValue::Number(value) => write!(f, "{}", value),
            FieldValue::Unset => Ok(()),
        }
    }
}

/// A named field in declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Field<'a> {
    pub name: &'static str,
    pub value: FieldValue<'a>,
}

impl<'a> Field<'a> {
    pub fn new(name: &'static str, value: FieldValue<'a>) -> Self {
        Field { name, value }
    }
}

// ============================================================================
// ENTITY CONTRACT
// ============================================================================

/// The capability set every record kind implements.
///
/// `kind()` must return the same tag for every instance of a concrete type.
/// `fields()` must list inherited fields first, in declaration order.
pub trait Entity: fmt::Debug + fmt::Display {
    fn kind(&self) -> &'static str;

    fn fields(&self) -> Vec<Field<'_>>;

    fn as_any(&self) -> &dyn Any;
}

/// Delegation contract for variants.
///
/// A variant embeds its base value and only describes its OWN contribution;
/// `extended_fields` and `fmt_extended` compose it with the base.
pub trait Extends: Entity {
    type Base: Entity;

    fn base(&self) -> &Self::Base;

    fn own_fields(&self) -> Vec<Field<'_>>;

    fn fmt_extension(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result;
}

/// Base fields followed by the variant's own fields.
pub fn extended_fields<V: Extends>(variant: &V) -> Vec<Field<'_>> {
    let mut fields = variant.base().fields();
    fields.extend(variant.own_fields());
    fields
}

/// Base rendering, then `SEPARATOR`, then the variant's contribution.
pub fn fmt_extended<V: Extends>(variant: &V, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    fmt::Display::fmt(variant.base(), f)?;
    f.write_str(SEPARATOR)?;
    variant.fmt_extension(f)
}

fn concrete_type(entity: &dyn Entity) -> TypeId {
    Any::type_id(entity.as_any())
}

// ============================================================================
// EQUALITY & HASH
// ============================================================================

/// Exact-kind, field-by-field value equality.
pub fn same_value(a: &dyn Entity, b: &dyn Entity) -> bool {
    if concrete_type(a) != concrete_type(b) {
        return false;
    }

    // Type before address: an embedded base lives at its variant's address.
    if std::ptr::addr_eq(a, b) {
        return true;
    }

    a.fields() == b.fields()
}

/// Equality where either side may be absent. Absent never equals anything.
pub fn equals(a: Option<&dyn Entity>, b: Option<&dyn Entity>) -> bool {
    match (a, b) {
        (Some(a), Some(b)) => same_value(a, b),
        _ => false,
    }
}

/// Compare an entity against a value of any type. Unrelated types are unequal.
pub fn equals_any<E: Entity + 'static>(entity: &E, other: &dyn Any) -> bool {
    other
        .downcast_ref::<E>()
        .is_some_and(|other| same_value(entity, other))
}

/// Feed the kind tag and every current field into `state`.
pub fn hash_into<H: Hasher>(entity: &dyn Entity, state: &mut H) {
    entity.kind().hash(state);
    entity.fields().hash(state);
}

/// Hash of the entity's current value. Recomputed on every call.
pub fn hash_of(entity: &dyn Entity) -> u64 {
    let mut hasher = DefaultHasher::new();
    hash_into(entity, &mut hasher);
    hasher.finish()
}

impl PartialEq for dyn Entity {
    fn eq(&self, other: &Self) -> bool {
        same_value(self, other)
    }
}

impl Eq for dyn Entity {}

impl Hash for dyn Entity {
    fn hash<H: Hasher>(&self, state: &mut H) {
        hash_into(self, state)
    }
}

// ============================================================================
// RENDERING
// ============================================================================

/// Eager form of the Display rendering.
pub fn render(entity: &dyn Entity) -> String {
    entity.to_string()
}

/// Serializable view of an entity: kind plus ordered fields.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Snapshot<'a> {
    pub kind: &'static str,
    pub fields: Vec<Field<'a>>,
}

pub fn snapshot(entity: &dyn Entity) -> Snapshot<'_> {
    Snapshot {
        kind: entity.kind(),
        fields: entity.fields(),
    }
}

// ============================================================================
// CONSTRUCTION CHECKS
// ============================================================================

/// Unwrap a builder slot or fail with `InvalidConstruction`.
pub(crate) fn required<T>(kind: &'static str, field: &'static str, value: Option<T>) -> Result<T> {
    value.ok_or_else(|| {
        tracing::debug!(kind, field, "mandatory field omitted");
        RecordError::missing(kind, field)
    })
}

/// Mandatory text must carry something other than whitespace.
pub(crate) fn require_text(kind: &'static str, field: &'static str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        tracing::debug!(kind, field, "mandatory text is blank");
        return Err(RecordError::invalid(kind, field, "must not be blank"));
    }
    Ok(())
}

pub(crate) fn require_non_negative(kind: &'static str, field: &'static str, value: i64) -> Result<()> {
    if value < 0 {
        tracing::debug!(kind, field, value, "negative value rejected");
        return Err(RecordError::invalid(kind, field, format!("must not be negative, got {}", value)));
    }
    Ok(())
}

// ============================================================================
// TESTS
// ============================================================================

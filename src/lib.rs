// Polyrecord - Core Library
// Value records with layered display, exposed for the CLI and tests

pub mod error;
pub mod entities; // Entity base contract + record families
pub mod input; // Text/CSV records → entities
pub mod sink; // Display results → writers
pub mod roster; // Mixed-kind collection, unique by value

// Re-export commonly used types
pub use error::{RecordError, Result};
pub use entities::{
    Entity, Extends, Field, FieldValue, Snapshot, SEPARATOR,
    equals, equals_any, same_value, hash_of, render, snapshot,
    Employee, EmployeeBuilder, Manager, ManagerBuilder,
    Letter, LetterBuilder, CertifiedLetter, CertifiedLetterBuilder,
    Sunglasses, SunglassesBuilder, PrescriptionSunglasses, PrescriptionSunglassesBuilder,
    TeeShirt, TeeShirtBuilder, SloganTeeShirt, SloganTeeShirtBuilder, Discounted, Money,
};
pub use input::{FromRecord, RecordKind, parse_line, read_records, read_any};
pub use sink::{DisplaySink, TextSink, JsonLinesSink};
pub use roster::Roster;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

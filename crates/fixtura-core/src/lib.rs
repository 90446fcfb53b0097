//! Core contracts shared by Fixtura crates.
//!
//! This crate defines field values, declared value kinds, per-field
//! directives and the error type used across the generator.

pub mod directive;
pub mod error;
pub mod types;
pub mod value;

pub use directive::{CulturalDate, FieldDirective};
pub use error::{Error, Result};
pub use types::{EnumDomain, EnumInfo, RelatedInfo, ValueKind};
pub use value::{FieldType, FieldValue};

pub use fixtura_calendar::PersianDate;

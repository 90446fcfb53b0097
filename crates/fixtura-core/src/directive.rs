use crate::types::EnumDomain;
use crate::value::{FieldType, FieldValue};

/// Declarative instruction attached to a model field.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldDirective {
    /// Leave the field at its default value.
    Ignore,
    /// Always write the same value.
    Constant(FieldValue),
    /// Pick uniformly from `allowed`, or from the whole enum domain when absent.
    EnumeratedSet { allowed: Option<Vec<String>> },
    /// Populate with a related model instance.
    ForeignKey {
        referenced: String,
        optional: bool,
        /// Chance, in percent, of writing "no value" when `optional`.
        null_probability: u8,
    },
    /// Persian calendar generator.
    CulturalDate(CulturalDate),
    /// Distinct GUID-like identifier.
    Identifier,
}

/// Calendar-backed generators available to directives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CulturalDate {
    FullDate,
    DayName,
    MonthName,
    Year { min: Option<i32>, max: Option<i32> },
    /// Bounds in `YYYY/MM/DD` form, parsed when a value is generated.
    DateRange { start: String, end: String },
}

impl FieldDirective {
    pub fn constant<V: FieldType>(value: V) -> Self {
        Self::Constant(value.into_value())
    }

    pub fn enumerated() -> Self {
        Self::EnumeratedSet { allowed: None }
    }

    pub fn enumerated_of<E: EnumDomain>(allowed: &[E]) -> Self {
        Self::EnumeratedSet {
            allowed: Some(
                allowed
                    .iter()
                    .map(|value| value.label().to_string())
                    .collect(),
            ),
        }
    }

    pub fn foreign_key(referenced: impl Into<String>) -> Self {
        Self::ForeignKey {
            referenced: referenced.into(),
            optional: false,
            null_probability: 0,
        }
    }

    pub fn optional_foreign_key(referenced: impl Into<String>, null_probability: u8) -> Self {
        Self::ForeignKey {
            referenced: referenced.into(),
            optional: true,
            null_probability,
        }
    }

    pub fn full_date() -> Self {
        Self::CulturalDate(CulturalDate::FullDate)
    }

    pub fn day_name() -> Self {
        Self::CulturalDate(CulturalDate::DayName)
    }

    pub fn month_name() -> Self {
        Self::CulturalDate(CulturalDate::MonthName)
    }

    pub fn year(min: Option<i32>, max: Option<i32>) -> Self {
        Self::CulturalDate(CulturalDate::Year { min, max })
    }

    pub fn date_range(start: impl Into<String>, end: impl Into<String>) -> Self {
        Self::CulturalDate(CulturalDate::DateRange {
            start: start.into(),
            end: end.into(),
        })
    }
}

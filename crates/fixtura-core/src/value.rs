use chrono::{NaiveDateTime, Timelike};
use fixtura_calendar::PersianDate;
use uuid::Uuid;

use crate::error::{Error, Result};
use crate::types::ValueKind;

/// Value produced for a field before it is written to the model.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Null,
    Bool(bool),
    Int(i64),
    Decimal(f64),
    Text(String),
    Uuid(Uuid),
    DateTime(NaiveDateTime),
    PersianDate(PersianDate),
    /// Label of an enumerated value.
    Enum(String),
}

impl FieldValue {
    pub fn is_null(&self) -> bool {
        matches!(self, FieldValue::Null)
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            FieldValue::Null => "null",
            FieldValue::Bool(_) => "bool",
            FieldValue::Int(_) => "int",
            FieldValue::Decimal(_) => "decimal",
            FieldValue::Text(_) => "text",
            FieldValue::Uuid(_) => "uuid",
            FieldValue::DateTime(_) => "date_time",
            FieldValue::PersianDate(_) => "persian_date",
            FieldValue::Enum(_) => "enum",
        }
    }
}

/// Rust type that can be stored in a model field.
pub trait FieldType: Sized {
    fn kind() -> ValueKind;

    /// True when the field can hold "no value".
    fn nullable() -> bool {
        false
    }

    fn from_value(value: FieldValue) -> Result<Self>;

    fn into_value(self) -> FieldValue;
}

fn mismatch(expected: &str, value: &FieldValue) -> Error {
    Error::Configuration(format!(
        "expected {expected} value, got {}",
        value.type_name()
    ))
}

impl FieldType for bool {
    fn kind() -> ValueKind {
        ValueKind::Bool
    }

    fn from_value(value: FieldValue) -> Result<Self> {
        match value {
            FieldValue::Bool(value) => Ok(value),
            other => Err(mismatch("bool", &other)),
        }
    }

    fn into_value(self) -> FieldValue {
        FieldValue::Bool(self)
    }
}

macro_rules! int_field_type {
    ($($ty:ty),*) => {
        $(
            impl FieldType for $ty {
                fn kind() -> ValueKind {
                    ValueKind::Int
                }

                fn from_value(value: FieldValue) -> Result<Self> {
                    match value {
                        FieldValue::Int(raw) => <$ty>::try_from(raw).map_err(|_| {
                            Error::InvalidArgument(format!(
                                "{raw} does not fit {}",
                                stringify!($ty)
                            ))
                        }),
                        other => Err(mismatch("int", &other)),
                    }
                }

                fn into_value(self) -> FieldValue {
                    FieldValue::Int(i64::from(self))
                }
            }
        )*
    };
}

int_field_type!(i16, i32, i64, u8, u16, u32);

impl FieldType for f64 {
    fn kind() -> ValueKind {
        ValueKind::Decimal
    }

    fn from_value(value: FieldValue) -> Result<Self> {
        match value {
            FieldValue::Decimal(value) => Ok(value),
            FieldValue::Int(value) => Ok(value as f64),
            other => Err(mismatch("decimal", &other)),
        }
    }

    fn into_value(self) -> FieldValue {
        FieldValue::Decimal(self)
    }
}

impl FieldType for f32 {
    fn kind() -> ValueKind {
        ValueKind::Decimal
    }

    fn from_value(value: FieldValue) -> Result<Self> {
        f64::from_value(value).map(|value| value as f32)
    }

    fn into_value(self) -> FieldValue {
        FieldValue::Decimal(f64::from(self))
    }
}

impl FieldType for String {
    fn kind() -> ValueKind {
        ValueKind::Text
    }

    fn from_value(value: FieldValue) -> Result<Self> {
        match value {
            FieldValue::Text(value) | FieldValue::Enum(value) => Ok(value),
            FieldValue::PersianDate(date) if date == date.date() => Ok(date.to_string()),
            FieldValue::PersianDate(date) => Ok(date.format_with_time()),
            other => Err(mismatch("text", &other)),
        }
    }

    fn into_value(self) -> FieldValue {
        FieldValue::Text(self)
    }
}

impl FieldType for Uuid {
    fn kind() -> ValueKind {
        ValueKind::Uuid
    }

    fn from_value(value: FieldValue) -> Result<Self> {
        match value {
            FieldValue::Uuid(value) => Ok(value),
            other => Err(mismatch("uuid", &other)),
        }
    }

    fn into_value(self) -> FieldValue {
        FieldValue::Uuid(self)
    }
}

impl FieldType for NaiveDateTime {
    fn kind() -> ValueKind {
        ValueKind::DateTime
    }

    fn from_value(value: FieldValue) -> Result<Self> {
        match value {
            FieldValue::DateTime(value) => Ok(value),
            FieldValue::PersianDate(date) => Ok(date.to_naive_date_time()?),
            other => Err(mismatch("date_time", &other)),
        }
    }

    fn into_value(self) -> FieldValue {
        FieldValue::DateTime(self)
    }
}

impl FieldType for PersianDate {
    fn kind() -> ValueKind {
        ValueKind::PersianDate
    }

    fn from_value(value: FieldValue) -> Result<Self> {
        match value {
            FieldValue::PersianDate(value) => Ok(value),
            FieldValue::DateTime(value) => {
                let date = PersianDate::from_gregorian(value.date())?;
                Ok(date.with_time(
                    value.hour() as u8,
                    value.minute() as u8,
                    value.second() as u8,
                )?)
            }
            other => Err(mismatch("persian_date", &other)),
        }
    }

    fn into_value(self) -> FieldValue {
        FieldValue::PersianDate(self)
    }
}

impl<V: FieldType> FieldType for Option<V> {
    fn kind() -> ValueKind {
        V::kind()
    }

    fn nullable() -> bool {
        true
    }

    fn from_value(value: FieldValue) -> Result<Self> {
        match value {
            FieldValue::Null => Ok(None),
            other => V::from_value(other).map(Some),
        }
    }

    fn into_value(self) -> FieldValue {
        self.map_or(FieldValue::Null, V::into_value)
    }
}

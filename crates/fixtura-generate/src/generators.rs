//! Generators backing directives and the built-in rule helpers.

use std::sync::Arc;

use fixtura_calendar::{
    DateRange, day_of_week_name, random_date_in_range, random_date_time_in_range, random_year,
};
use fixtura_core::{CulturalDate, FieldValue, ValueKind};
use rand::{Rng, RngCore};
use uuid::Uuid;

use crate::errors::{GenerationError, Result};
use crate::model::Assignment;
use crate::rules::{Generator, generator_fn};

const MAX_ID_ATTEMPTS: usize = 32;

/// Uniform pick among `labels`.
pub(crate) fn pick_label<S: AsRef<str>>(
    labels: &[S],
    domain: &str,
    rng: &mut dyn RngCore,
) -> Result<FieldValue> {
    if labels.is_empty() {
        return Err(GenerationError::InvalidArgument(format!(
            "enumerated set for {domain} is empty"
        )));
    }
    let index = rng.random_range(0..labels.len());
    Ok(FieldValue::Enum(labels[index].as_ref().to_string()))
}

/// Generator for a calendar directive on a field of kind `kind`.
pub(crate) fn cultural(field: &str, date: &CulturalDate, kind: &ValueKind) -> Result<Generator> {
    let fits = match date {
        CulturalDate::FullDate | CulturalDate::DateRange { .. } => matches!(
            kind,
            ValueKind::PersianDate | ValueKind::DateTime | ValueKind::Text
        ),
        CulturalDate::DayName | CulturalDate::MonthName => matches!(kind, ValueKind::Text),
        CulturalDate::Year { .. } => matches!(kind, ValueKind::Int | ValueKind::Text),
    };
    if !fits {
        return Err(GenerationError::Configuration(format!(
            "{date:?} cannot populate field '{field}' of kind {}",
            kind.name()
        )));
    }

    let text = matches!(kind, ValueKind::Text);
    let generator: Generator = match date.clone() {
        CulturalDate::FullDate => generator_fn(|ctx| {
            let span = ctx.options().year_span()?;
            let date = random_date_time_in_range(&span, ctx.rng())?;
            Ok(FieldValue::PersianDate(date).into())
        }),
        CulturalDate::DayName => generator_fn(|ctx| {
            let span = ctx.options().year_span()?;
            let date = random_date_in_range(&span, ctx.rng())?;
            Ok(FieldValue::Text(day_of_week_name(&date).to_string()).into())
        }),
        CulturalDate::MonthName => generator_fn(|ctx| {
            let span = ctx.options().year_span()?;
            let date = random_date_in_range(&span, ctx.rng())?;
            Ok(FieldValue::Text(date.month_name().to_string()).into())
        }),
        CulturalDate::Year { min, max } => generator_fn(move |ctx| {
            let min = min.unwrap_or(ctx.options().year_min);
            let max = max.unwrap_or(ctx.options().year_max);
            let year = random_year(min, max, ctx.rng())?;
            let value = if text {
                FieldValue::Text(year.to_string())
            } else {
                FieldValue::Int(i64::from(year))
            };
            Ok(value.into())
        }),
        CulturalDate::DateRange { start, end } => generator_fn(move |ctx| {
            let range = DateRange::parse(&start, &end)?;
            let date = random_date_in_range(&range, ctx.rng())?;
            Ok(FieldValue::PersianDate(date).into())
        }),
    };
    Ok(generator)
}

/// Generator for random v4 identifiers that never repeats within a builder.
pub(crate) fn identifier(field: &str, kind: &ValueKind) -> Result<Generator> {
    let text = match kind {
        ValueKind::Uuid => false,
        ValueKind::Text => true,
        other => {
            return Err(GenerationError::Configuration(format!(
                "identifier cannot populate field '{field}' of kind {}",
                other.name()
            )));
        }
    };

    Ok(generator_fn(move |ctx| {
        for _ in 0..MAX_ID_ATTEMPTS {
            let id = random_uuid(ctx.rng());
            if ctx.claim_id(id) {
                let value = if text {
                    FieldValue::Text(id.to_string())
                } else {
                    FieldValue::Uuid(id)
                };
                return Ok(Assignment::Value(value));
            }
        }
        Err(GenerationError::InvalidArgument(format!(
            "no distinct identifier for {}.{} after {MAX_ID_ATTEMPTS} attempts",
            ctx.model(),
            ctx.field()
        )))
    }))
}

fn random_uuid(rng: &mut dyn RngCore) -> Uuid {
    let mut bytes = [0_u8; 16];
    rng.fill_bytes(&mut bytes);
    uuid::Builder::from_random_bytes(bytes).into_uuid()
}

/// Generator picking uniformly among `items`.
pub(crate) fn list_selection(field: &str, items: Vec<FieldValue>) -> Result<Generator> {
    if items.is_empty() {
        return Err(GenerationError::InvalidArgument(format!(
            "list selection for '{field}' needs at least one item"
        )));
    }
    let items: Arc<[FieldValue]> = items.into();
    Ok(generator_fn(move |ctx| {
        let index = ctx.rng().random_range(0..items.len());
        Ok(Assignment::Value(items[index].clone()))
    }))
}

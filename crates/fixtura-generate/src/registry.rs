use std::collections::HashMap;
use std::sync::Arc;

use fixtura_core::{FieldDirective, FieldValue};
use rand::Rng;

use crate::catalog::TypeDirectives;
use crate::errors::{GenerationError, Result};
use crate::generators::pick_label;
use crate::model::{Assignment, FieldDescriptor, Model};
use crate::rules::{FieldRule, GeneratorContext, RuleEntry, RuleKind, RuleOrigin};

/// Resolves every field of `T` to at most one source of values.
///
/// Discovered rules are shared read-only; rules registered on a builder
/// live in `overrides` and shadow the discovered rule for the same field.
pub struct DirectiveRegistry<T> {
    base: Arc<TypeDirectives<T>>,
    overrides: HashMap<&'static str, RuleEntry>,
}

impl<T: Model> DirectiveRegistry<T> {
    pub fn new(base: Arc<TypeDirectives<T>>) -> Self {
        Self {
            base,
            overrides: HashMap::new(),
        }
    }

    pub fn fields(&self) -> &[FieldDescriptor<T>] {
        self.base.fields()
    }

    pub fn field(&self, name: &str) -> Result<&FieldDescriptor<T>> {
        self.base.field(name).ok_or_else(|| {
            GenerationError::Configuration(format!(
                "{} has no field named '{name}'",
                T::model_name()
            ))
        })
    }

    /// Kind and origin of the rule that will drive `field`, if any.
    pub fn active_rule(&self, field: &str) -> Option<(RuleKind, RuleOrigin)> {
        self.rule(field).map(|entry| (entry.kind(), entry.origin))
    }

    /// Replaces whatever rule `field` had. One rule per field; the last
    /// registration wins regardless of kind.
    pub(crate) fn register(&mut self, field: &'static str, entry: RuleEntry) {
        self.overrides.insert(field, entry);
    }

    fn rule(&self, field: &str) -> Option<&RuleEntry> {
        self.overrides.get(field).or_else(|| self.base.rule(field))
    }

    /// Builds a default `T` and populates its fields in declaration order.
    pub(crate) fn populate(&self, ctx: &mut GeneratorContext<'_>) -> Result<T> {
        let mut model = T::default();
        for field in self.fields() {
            ctx.field = field.name();
            let assignment = self
                .resolve(field, ctx)
                .map_err(|err| err.in_field(T::model_name(), field.name()))?;
            if let Some(assignment) = assignment {
                field
                    .set(&mut model, assignment)
                    .map_err(|err| err.in_field(T::model_name(), field.name()))?;
            }
        }
        Ok(model)
    }

    /// Applies the fixed precedence; `None` leaves the default in place.
    fn resolve(
        &self,
        field: &FieldDescriptor<T>,
        ctx: &mut GeneratorContext<'_>,
    ) -> Result<Option<Assignment>> {
        let rule = self.rule(field.name());

        match field.directive() {
            Some(FieldDirective::Ignore) => return Ok(None),
            Some(FieldDirective::Constant(value)) => {
                return Ok(Some(Assignment::Value(value.clone())));
            }
            Some(FieldDirective::EnumeratedSet { allowed })
                if !shadows_enumerated_set(rule, allowed.is_some()) =>
            {
                let value = match (allowed, field.kind().enum_info()) {
                    (Some(allowed), _) => {
                        pick_label(allowed.as_slice(), field.name(), ctx.rng())?
                    }
                    (None, Some(info)) => pick_label(info.labels, info.name, ctx.rng())?,
                    (None, None) => {
                        return Err(GenerationError::Configuration(
                            "enumerated set on a field without an enum domain".to_string(),
                        ));
                    }
                };
                return Ok(Some(Assignment::Value(value)));
            }
            _ => {}
        }

        let Some(entry) = rule else {
            return match field.kind().enum_info() {
                Some(info) => {
                    let value = pick_label(info.labels, info.name, ctx.rng())?;
                    Ok(Some(Assignment::Value(value)))
                }
                None => Ok(None),
            };
        };

        match &entry.rule {
            FieldRule::ForeignKey {
                optional,
                null_probability,
                generator,
            } => {
                if *optional && ctx.rng().random_range(0..100_u8) < *null_probability {
                    return Ok(Some(Assignment::Value(FieldValue::Null)));
                }
                generator(ctx).map(Some)
            }
            FieldRule::Custom(generator) => generator(ctx).map(Some),
        }
    }
}

/// Field-targeted rules always beat an enumerated set. Bulk rules only
/// beat one that leaves the choice to the whole domain.
fn shadows_enumerated_set(rule: Option<&RuleEntry>, explicit_list: bool) -> bool {
    match rule.map(|entry| entry.origin) {
        None | Some(RuleOrigin::Discovered) => false,
        Some(RuleOrigin::Field) => true,
        Some(RuleOrigin::Bulk) => !explicit_list,
    }
}

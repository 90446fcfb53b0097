use std::collections::HashSet;
use std::sync::Arc;

use rand::RngCore;
use rand_chacha::ChaCha8Rng;
use tracing::debug;
use uuid::Uuid;

use crate::catalog::directives_for;
use crate::errors::{GenerationError, Result};
use crate::model::{Assignment, Model};
use crate::options::SeedOptions;
use crate::registry::DirectiveRegistry;

/// Produces the value written to one field.
pub(crate) type Generator =
    Arc<dyn Fn(&mut GeneratorContext<'_>) -> Result<Assignment> + Send + Sync>;

/// Wraps a closure as a [`Generator`].
pub(crate) fn generator_fn<F>(f: F) -> Generator
where
    F: Fn(&mut GeneratorContext<'_>) -> Result<Assignment> + Send + Sync + 'static,
{
    Arc::new(f)
}

/// State shared by every generator invoked during one build.
pub(crate) struct GeneratorContext<'a> {
    pub(crate) model: &'static str,
    pub(crate) field: &'static str,
    pub(crate) rng: &'a mut ChaCha8Rng,
    pub(crate) options: &'a SeedOptions,
    pub(crate) issued_ids: &'a mut HashSet<Uuid>,
    pub(crate) depth: usize,
}

impl<'a> GeneratorContext<'a> {
    pub(crate) fn new(
        model: &'static str,
        rng: &'a mut ChaCha8Rng,
        options: &'a SeedOptions,
        issued_ids: &'a mut HashSet<Uuid>,
    ) -> Self {
        Self {
            model,
            field: "",
            rng,
            options,
            issued_ids,
            depth: 0,
        }
    }

    pub(crate) fn rng(&mut self) -> &mut dyn RngCore {
        &mut *self.rng
    }

    pub(crate) fn options(&self) -> &SeedOptions {
        self.options
    }

    /// Model currently being populated.
    pub(crate) fn model(&self) -> &'static str {
        self.model
    }

    /// Field currently being populated.
    pub(crate) fn field(&self) -> &'static str {
        self.field
    }

    /// Records `id` as issued; false when it was already handed out.
    pub(crate) fn claim_id(&mut self, id: Uuid) -> bool {
        self.issued_ids.insert(id)
    }

    /// Builds an `R` from its discovered directives, one level deeper.
    pub(crate) fn build_related<R: Model>(&mut self) -> Result<R> {
        let depth = self.depth + 1;
        if depth > self.options.max_relation_depth {
            return Err(GenerationError::Configuration(format!(
                "relation depth {} exceeded while building {}",
                self.options.max_relation_depth,
                R::model_name()
            )));
        }

        let registry = DirectiveRegistry::new(directives_for::<R>()?);
        let mut nested = GeneratorContext {
            model: R::model_name(),
            field: "",
            rng: &mut *self.rng,
            options: self.options,
            issued_ids: &mut *self.issued_ids,
            depth,
        };
        debug!(model = R::model_name(), depth, "building related instance");
        registry.populate(&mut nested)
    }
}

/// Where a rule came from. Resolution treats bulk rules differently
/// from rules aimed at a single field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleOrigin {
    /// Translated from a field directive during discovery.
    Discovered,
    /// Registered for one field through a `rule_for*` call.
    Field,
    /// Registered through a `rule_for_all_*` call.
    Bulk,
}

#[derive(Clone)]
pub(crate) enum FieldRule {
    Custom(Generator),
    ForeignKey {
        optional: bool,
        null_probability: u8,
        generator: Generator,
    },
}

#[derive(Clone)]
pub(crate) struct RuleEntry {
    pub(crate) origin: RuleOrigin,
    pub(crate) rule: FieldRule,
}

impl RuleEntry {
    pub(crate) fn custom(origin: RuleOrigin, generator: Generator) -> Self {
        Self {
            origin,
            rule: FieldRule::Custom(generator),
        }
    }

    pub(crate) fn foreign_key(
        origin: RuleOrigin,
        optional: bool,
        null_probability: u8,
        generator: Generator,
    ) -> Self {
        Self {
            origin,
            rule: FieldRule::ForeignKey {
                optional,
                null_probability,
                generator,
            },
        }
    }

    pub(crate) fn kind(&self) -> RuleKind {
        match self.rule {
            FieldRule::Custom(_) => RuleKind::Custom,
            FieldRule::ForeignKey { .. } => RuleKind::ForeignKey,
        }
    }
}

/// Kind of rule currently active for a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleKind {
    Custom,
    ForeignKey,
}

pub(crate) fn check_null_probability(null_probability: u8) -> Result<()> {
    if null_probability > 100 {
        return Err(GenerationError::InvalidArgument(format!(
            "null probability must be within 0..=100, got {null_probability}"
        )));
    }
    Ok(())
}

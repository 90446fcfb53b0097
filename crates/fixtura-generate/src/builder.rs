use std::any::TypeId;
use std::collections::HashSet;
use std::sync::Arc;

use chrono::NaiveDateTime;
use fixtura_core::{EnumDomain, EnumInfo, FieldType, FieldValue, ValueKind};
use rand::{RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::catalog::directives_for;
use crate::errors::{GenerationError, Result};
use crate::generators;
use crate::model::{Assignment, Model};
use crate::options::SeedOptions;
use crate::registry::DirectiveRegistry;
use crate::rules::{
    Generator, GeneratorContext, RuleEntry, RuleKind, RuleOrigin, check_null_probability,
    generator_fn,
};

/// Fluent, per-type instance builder.
///
/// Starts from the directives discovered on `T` and layers rules
/// registered through the `rule_for*` methods on top. Each builder owns
/// its RNG, so two builders with the same seed and rules produce the
/// same instances.
pub struct Builder<T: Model> {
    registry: DirectiveRegistry<T>,
    options: SeedOptions,
    rng: ChaCha8Rng,
    issued_ids: HashSet<Uuid>,
}

impl<T: Model> Builder<T> {
    pub fn new() -> Result<Self> {
        Self::with_options(SeedOptions::default())
    }

    pub fn with_options(options: SeedOptions) -> Result<Self> {
        options.validate()?;
        let registry = DirectiveRegistry::new(directives_for::<T>()?);
        let rng = match options.seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_rng(&mut rand::rng()),
        };
        Ok(Self {
            registry,
            options,
            rng,
            issued_ids: HashSet::new(),
        })
    }

    /// Reseeds the builder RNG.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.options.seed = Some(seed);
        self.rng = ChaCha8Rng::seed_from_u64(seed);
        self
    }

    pub fn options(&self) -> &SeedOptions {
        &self.options
    }

    /// Kind and origin of the rule currently driving `field`.
    pub fn active_rule(&self, field: &str) -> Option<(RuleKind, RuleOrigin)> {
        self.registry.active_rule(field)
    }

    /// Custom rule for one field. Replaces any earlier rule on it,
    /// foreign-key rules included.
    pub fn rule_for<V, F>(mut self, field: &str, generator: F) -> Result<Self>
    where
        V: FieldType + 'static,
        F: Fn(&mut dyn RngCore) -> V + Send + Sync + 'static,
    {
        let name = self.expect_kind(field, &V::kind())?;
        let entry = RuleEntry::custom(RuleOrigin::Field, value_generator(generator));
        self.registry.register(name, entry);
        Ok(self)
    }

    pub fn rule_for_enum<E, F>(mut self, field: &str, generator: F) -> Result<Self>
    where
        E: EnumDomain,
        F: Fn(&mut dyn RngCore) -> E + Send + Sync + 'static,
    {
        let name = self.expect_kind(field, &ValueKind::Enum(E::info()))?;
        let generator: Generator = generator_fn(move |ctx| {
            let value = generator(ctx.rng());
            Ok(FieldValue::Enum(value.label().to_string()).into())
        });
        self.registry.register(name, RuleEntry::custom(RuleOrigin::Field, generator));
        Ok(self)
    }

    /// Pick uniformly from `items` for one field.
    pub fn rule_for_list_selection<V, I>(mut self, field: &str, items: I) -> Result<Self>
    where
        V: FieldType + 'static,
        I: IntoIterator<Item = V>,
    {
        let name = self.expect_kind(field, &V::kind())?;
        let values = items.into_iter().map(V::into_value).collect();
        let generator = generators::list_selection(name, values)?;
        self.registry.register(name, RuleEntry::custom(RuleOrigin::Field, generator));
        Ok(self)
    }

    /// Foreign-key rule for a related field. Replaces any earlier rule on it.
    pub fn rule_for_foreign_key<R, F>(self, field: &str, generator: F) -> Result<Self>
    where
        R: Model,
        F: Fn(&mut dyn RngCore) -> R + Send + Sync + 'static,
    {
        self.foreign_key_rule(field, false, 0, generator)
    }

    /// Like [`Self::rule_for_foreign_key`], writing "no value" with
    /// `null_probability` percent chance before the generator runs.
    pub fn rule_for_optional_foreign_key<R, F>(
        self,
        field: &str,
        null_probability: u8,
        generator: F,
    ) -> Result<Self>
    where
        R: Model,
        F: Fn(&mut dyn RngCore) -> R + Send + Sync + 'static,
    {
        check_null_probability(null_probability)?;
        self.foreign_key_rule(field, true, null_probability, generator)
    }

    pub fn rule_for_all_strings<F>(self, generator: F) -> Self
    where
        F: Fn(&mut dyn RngCore) -> String + Send + Sync + 'static,
    {
        self.rule_for_all_properties(generator)
    }

    /// Values that do not fit a narrower integer field fail the build.
    pub fn rule_for_all_ints<F>(self, generator: F) -> Self
    where
        F: Fn(&mut dyn RngCore) -> i64 + Send + Sync + 'static,
    {
        self.rule_for_all_properties(generator)
    }

    pub fn rule_for_all_bools<F>(self, generator: F) -> Self
    where
        F: Fn(&mut dyn RngCore) -> bool + Send + Sync + 'static,
    {
        self.rule_for_all_properties(generator)
    }

    pub fn rule_for_all_decimals<F>(self, generator: F) -> Self
    where
        F: Fn(&mut dyn RngCore) -> f64 + Send + Sync + 'static,
    {
        self.rule_for_all_properties(generator)
    }

    pub fn rule_for_all_date_times<F>(self, generator: F) -> Self
    where
        F: Fn(&mut dyn RngCore) -> NaiveDateTime + Send + Sync + 'static,
    {
        self.rule_for_all_properties(generator)
    }

    /// Custom rule for every field whose kind matches `V`.
    pub fn rule_for_all_properties<V, F>(mut self, generator: F) -> Self
    where
        V: FieldType + 'static,
        F: Fn(&mut dyn RngCore) -> V + Send + Sync + 'static,
    {
        let kind = V::kind();
        let generator = value_generator(generator);
        let fields: Vec<&'static str> = self
            .registry
            .fields()
            .iter()
            .filter(|field| *field.kind() == kind)
            .map(|field| field.name())
            .collect();
        for &name in &fields {
            let entry = RuleEntry::custom(RuleOrigin::Bulk, generator.clone());
            self.registry.register(name, entry);
        }
        debug!(
            model = T::model_name(),
            kind = kind.name(),
            fields = fields.len(),
            "bulk rule registered"
        );
        self
    }

    /// Rule for every enumerated field. `generator` receives the field's
    /// domain and returns one of its labels.
    pub fn rule_for_all_enums<F>(mut self, generator: F) -> Self
    where
        F: Fn(&mut dyn RngCore, &EnumInfo) -> &'static str + Send + Sync + 'static,
    {
        let generator = Arc::new(generator);
        let fields: Vec<(&'static str, EnumInfo)> = self
            .registry
            .fields()
            .iter()
            .filter_map(|field| field.kind().enum_info().map(|info| (field.name(), *info)))
            .collect();
        for &(name, info) in &fields {
            let generator = Arc::clone(&generator);
            let rule: Generator = generator_fn(move |ctx| {
                let label = generator(ctx.rng(), &info);
                Ok(FieldValue::Enum(label.to_string()).into())
            });
            self.registry.register(name, RuleEntry::custom(RuleOrigin::Bulk, rule));
        }
        debug!(
            model = T::model_name(),
            fields = fields.len(),
            "bulk enum rule registered"
        );
        self
    }

    /// Custom rule for every field holding an `R`. Replaces foreign-key
    /// rules on those fields.
    pub fn rule_for_all_related<R, F>(mut self, generator: F) -> Self
    where
        R: Model,
        F: Fn(&mut dyn RngCore) -> R + Send + Sync + 'static,
    {
        let generator = related_generator(generator);
        let fields: Vec<&'static str> = self
            .registry
            .fields()
            .iter()
            .filter(|field| holds::<R>(field.kind()))
            .map(|field| field.name())
            .collect();
        for &name in &fields {
            let entry = RuleEntry::custom(RuleOrigin::Bulk, generator.clone());
            self.registry.register(name, entry);
        }
        debug!(
            model = T::model_name(),
            related = R::model_name(),
            fields = fields.len(),
            "bulk related rule registered"
        );
        self
    }

    /// Builds one instance. Nothing is returned when any field fails.
    pub fn build(&mut self) -> Result<T> {
        let mut ctx = GeneratorContext::new(
            T::model_name(),
            &mut self.rng,
            &self.options,
            &mut self.issued_ids,
        );
        match self.registry.populate(&mut ctx) {
            Ok(model) => {
                debug!(model = T::model_name(), "instance built");
                Ok(model)
            }
            Err(err) => {
                warn!(model = T::model_name(), error = %err, "build failed");
                Err(err)
            }
        }
    }

    /// Builds `count` instances, stopping at the first failure.
    pub fn build_list(&mut self, count: usize) -> Result<Vec<T>> {
        let mut items = Vec::with_capacity(count);
        for _ in 0..count {
            items.push(self.build()?);
        }
        info!(model = T::model_name(), count, "instances built");
        Ok(items)
    }

    fn expect_kind(&self, field: &str, expected: &ValueKind) -> Result<&'static str> {
        let descriptor = self.registry.field(field)?;
        if descriptor.kind() != expected {
            return Err(GenerationError::Configuration(format!(
                "field '{field}' of {} holds {}, not {}",
                T::model_name(),
                descriptor.kind().name(),
                expected.name()
            )));
        }
        Ok(descriptor.name())
    }

    fn foreign_key_rule<R, F>(
        mut self,
        field: &str,
        optional: bool,
        null_probability: u8,
        generator: F,
    ) -> Result<Self>
    where
        R: Model,
        F: Fn(&mut dyn RngCore) -> R + Send + Sync + 'static,
    {
        let descriptor = self.registry.field(field)?;
        if !holds::<R>(descriptor.kind()) {
            return Err(GenerationError::Configuration(format!(
                "foreign-key rule for {} on field '{field}' of kind {}",
                R::model_name(),
                descriptor.kind().name()
            )));
        }
        let name = descriptor.name();
        self.registry.register(
            name,
            RuleEntry::foreign_key(
                RuleOrigin::Field,
                optional,
                null_probability,
                related_generator(generator),
            ),
        );
        Ok(self)
    }
}

fn holds<R: 'static>(kind: &ValueKind) -> bool {
    kind.related_info().is_some_and(|info| info.type_id == TypeId::of::<R>())
}

fn value_generator<V, F>(generator: F) -> Generator
where
    V: FieldType + 'static,
    F: Fn(&mut dyn RngCore) -> V + Send + Sync + 'static,
{
    generator_fn(move |ctx| {
        Ok(Assignment::Value(generator(ctx.rng()).into_value()))
    })
}

fn related_generator<R, F>(generator: F) -> Generator
where
    R: Model,
    F: Fn(&mut dyn RngCore) -> R + Send + Sync + 'static,
{
    generator_fn(move |ctx| {
        Ok(Assignment::Related(Box::new(generator(ctx.rng()))))
    })
}

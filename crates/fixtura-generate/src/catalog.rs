//! Directive discovery and the process-wide per-type cache.

use std::any::{Any, TypeId};
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, OnceLock, RwLock};

use fixtura_core::{FieldDirective, ValueKind};
use tracing::{debug, warn};

use crate::errors::{GenerationError, Result};
use crate::generators;
use crate::model::{Assignment, FieldDescriptor, Model};
use crate::rules::{RuleEntry, RuleOrigin, check_null_probability};

type CatalogMap = HashMap<TypeId, Arc<dyn Any + Send + Sync>>;

static CATALOG: OnceLock<RwLock<CatalogMap>> = OnceLock::new();

/// Fields of `T` together with the rules their directives translate to.
pub struct TypeDirectives<T> {
    fields: Vec<FieldDescriptor<T>>,
    rules: HashMap<&'static str, RuleEntry>,
}

impl<T: Model> TypeDirectives<T> {
    pub fn fields(&self) -> &[FieldDescriptor<T>] {
        &self.fields
    }

    pub fn field(&self, name: &str) -> Option<&FieldDescriptor<T>> {
        self.fields.iter().find(|field| field.name() == name)
    }

    pub(crate) fn rule(&self, field: &str) -> Option<&RuleEntry> {
        self.rules.get(field)
    }
}

/// Discovered directives for `T`, computed once per process.
///
/// Failed discovery is not cached, so every builder for a misconfigured
/// model reports the same error.
pub fn directives_for<T: Model>() -> Result<Arc<TypeDirectives<T>>> {
    let catalog = CATALOG.get_or_init(|| RwLock::new(HashMap::new()));
    let type_id = TypeId::of::<T>();

    if let Some(entry) = read_entry(catalog, type_id) {
        if let Ok(directives) = entry.downcast::<TypeDirectives<T>>() {
            return Ok(directives);
        }
    }

    let directives = Arc::new(discover::<T>()?);
    let mut map = catalog
        .write()
        .map_err(|_| GenerationError::Configuration("directive catalog is poisoned".into()))?;
    let entry = map
        .entry(type_id)
        .or_insert_with(|| directives.clone() as Arc<dyn Any + Send + Sync>)
        .clone();
    drop(map);

    Ok(entry.downcast::<TypeDirectives<T>>().unwrap_or(directives))
}

fn read_entry(
    catalog: &RwLock<CatalogMap>,
    type_id: TypeId,
) -> Option<Arc<dyn Any + Send + Sync>> {
    catalog.read().ok()?.get(&type_id).cloned()
}

fn discover<T: Model>() -> Result<TypeDirectives<T>> {
    let model = T::model_name();
    let fields = T::fields();
    let mut seen = HashSet::new();
    let mut rules = HashMap::new();

    for field in &fields {
        if !seen.insert(field.name()) {
            return Err(GenerationError::Configuration(format!(
                "{model} declares field '{}' twice",
                field.name()
            )));
        }
        if let Some(rule) = translate(field).map_err(|err| {
            warn!(model, field = field.name(), error = %err, "directive rejected");
            err.in_field(model, field.name())
        })? {
            rules.insert(field.name(), rule);
        }
    }

    debug!(
        model,
        fields = fields.len(),
        rules = rules.len(),
        "directives discovered"
    );
    Ok(TypeDirectives { fields, rules })
}

/// Checks a field's directive and turns it into a rule where one applies.
fn translate<T: Model>(field: &FieldDescriptor<T>) -> Result<Option<RuleEntry>> {
    let Some(directive) = field.directive() else {
        return Ok(None);
    };

    match directive {
        FieldDirective::Ignore => Ok(None),
        FieldDirective::Constant(value) => {
            if value.is_null() && !field.nullable() {
                return Err(GenerationError::Configuration(
                    "null constant on a non-nullable field".to_string(),
                ));
            }
            let mut scratch = T::default();
            field
                .set(&mut scratch, Assignment::Value(value.clone()))
                .map_err(|err| {
                    GenerationError::Configuration(format!(
                        "{} constant does not fit field of kind {}: {err}",
                        value.type_name(),
                        field.kind().name()
                    ))
                })?;
            Ok(None)
        }
        FieldDirective::EnumeratedSet { allowed } => {
            let ValueKind::Enum(info) = field.kind() else {
                return Err(GenerationError::Configuration(format!(
                    "enumerated set on field of kind {}",
                    field.kind().name()
                )));
            };
            if let Some(allowed) = allowed {
                if allowed.is_empty() {
                    return Err(GenerationError::InvalidArgument(
                        "enumerated set has no allowed values".to_string(),
                    ));
                }
                if let Some(label) = allowed
                    .iter()
                    .find(|label| !info.labels.contains(&label.as_str()))
                {
                    return Err(GenerationError::Configuration(format!(
                        "'{label}' is not a {} label",
                        info.name
                    )));
                }
            }
            Ok(None)
        }
        FieldDirective::ForeignKey {
            referenced,
            optional,
            null_probability,
        } => {
            let Some(info) = field.kind().related_info() else {
                return Err(GenerationError::Configuration(format!(
                    "foreign key on field of kind {}",
                    field.kind().name()
                )));
            };
            if referenced != info.name {
                return Err(GenerationError::Configuration(format!(
                    "foreign key references '{referenced}' but the field holds {}",
                    info.name
                )));
            }
            check_null_probability(*null_probability)?;
            let generator = field.related_generator().cloned().ok_or_else(|| {
                GenerationError::Configuration("related field has no generator".to_string())
            })?;
            Ok(Some(RuleEntry::foreign_key(
                RuleOrigin::Discovered,
                *optional,
                *null_probability,
                generator,
            )))
        }
        FieldDirective::CulturalDate(date) => {
            let generator = generators::cultural(field.name(), date, field.kind())?;
            Ok(Some(RuleEntry::custom(RuleOrigin::Discovered, generator)))
        }
        FieldDirective::Identifier => {
            let generator = generators::identifier(field.name(), field.kind())?;
            Ok(Some(RuleEntry::custom(RuleOrigin::Discovered, generator)))
        }
    }
}

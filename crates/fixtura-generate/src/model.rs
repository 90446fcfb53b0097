use std::any::Any;
use std::fmt;
use std::sync::Arc;

use fixtura_core::{EnumDomain, FieldDirective, FieldType, FieldValue, RelatedInfo, ValueKind};

use crate::errors::{GenerationError, Result};
use crate::rules::{Generator, generator_fn};

/// Type whose instances can be populated by a [`crate::Builder`].
///
/// `fields` lists the writable fields in declaration order. Fields are
/// populated in that order and every build starts from `Default::default()`.
pub trait Model: Default + Send + 'static {
    /// Name foreign-key directives use to reference this model.
    fn model_name() -> &'static str;

    fn fields() -> Vec<FieldDescriptor<Self>>;
}

/// Value handed to a field setter.
pub enum Assignment {
    Value(FieldValue),
    /// Boxed instance of a related model.
    Related(Box<dyn Any + Send>),
}

impl Assignment {
    pub fn null() -> Self {
        Self::Value(FieldValue::Null)
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Self::Value(FieldValue::Null))
    }
}

impl From<FieldValue> for Assignment {
    fn from(value: FieldValue) -> Self {
        Self::Value(value)
    }
}

impl fmt::Debug for Assignment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Value(value) => f.debug_tuple("Value").field(value).finish(),
            Self::Related(_) => f.write_str("Related(..)"),
        }
    }
}

type Setter<T> = Arc<dyn Fn(&mut T, Assignment) -> Result<()> + Send + Sync>;

/// Metadata and setter for one writable field of `T`.
pub struct FieldDescriptor<T> {
    name: &'static str,
    kind: ValueKind,
    nullable: bool,
    directive: Option<FieldDirective>,
    setter: Setter<T>,
    related: Option<Generator>,
}

impl<T: 'static> FieldDescriptor<T> {
    /// Field holding a plain value such as `String`, `i32` or `Option<PersianDate>`.
    ///
    /// The value type is taken from the setter, so annotating the model
    /// argument is enough: `FieldDescriptor::new("id", |p: &mut Person, v| p.id = v)`.
    pub fn new<V, S>(name: &'static str, set: S) -> Self
    where
        V: FieldType + 'static,
        S: Fn(&mut T, V) + Send + Sync + 'static,
    {
        Self {
            name,
            kind: V::kind(),
            nullable: V::nullable(),
            directive: None,
            setter: Arc::new(move |model: &mut T, assignment: Assignment| {
                let value = expect_value(name, assignment)?;
                set(model, V::from_value(value)?);
                Ok(())
            }),
            related: None,
        }
    }

    /// Field holding a value of an enumerated type.
    pub fn enumeration<E, S>(name: &'static str, set: S) -> Self
    where
        E: EnumDomain,
        S: Fn(&mut T, E) + Send + Sync + 'static,
    {
        Self {
            name,
            kind: ValueKind::Enum(E::info()),
            nullable: false,
            directive: None,
            setter: Arc::new(move |model: &mut T, assignment: Assignment| {
                let label = match expect_value(name, assignment)? {
                    FieldValue::Enum(label) | FieldValue::Text(label) => label,
                    other => {
                        return Err(GenerationError::Configuration(format!(
                            "expected {} label, got {}",
                            E::NAME,
                            other.type_name()
                        )));
                    }
                };
                let value = E::from_label(&label).ok_or_else(|| {
                    GenerationError::Configuration(format!(
                        "'{label}' is not a {} label",
                        E::NAME
                    ))
                })?;
                set(model, value);
                Ok(())
            }),
            related: None,
        }
    }

    /// Field holding an optional instance of another model, populated only
    /// through foreign-key directives and rules.
    pub fn related<R, S>(name: &'static str, set: S) -> Self
    where
        R: Model,
        S: Fn(&mut T, Option<R>) + Send + Sync + 'static,
    {
        Self {
            name,
            kind: ValueKind::Related(RelatedInfo::of::<R>(R::model_name())),
            nullable: true,
            directive: None,
            setter: Arc::new(move |model: &mut T, assignment: Assignment| {
                match assignment {
                    Assignment::Value(FieldValue::Null) => {
                        set(model, None);
                        Ok(())
                    }
                    Assignment::Value(other) => Err(GenerationError::Configuration(format!(
                        "expected {} instance, got {}",
                        R::model_name(),
                        other.type_name()
                    ))),
                    Assignment::Related(boxed) => {
                        let related = boxed.downcast::<R>().map_err(|_| {
                            GenerationError::Configuration(format!(
                                "related value is not a {}",
                                R::model_name()
                            ))
                        })?;
                        set(model, Some(*related));
                        Ok(())
                    }
                }
            }),
            related: Some(nested_generator::<R>()),
        }
    }

    pub fn with_directive(mut self, directive: FieldDirective) -> Self {
        self.directive = Some(directive);
        self
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn kind(&self) -> &ValueKind {
        &self.kind
    }

    pub fn nullable(&self) -> bool {
        self.nullable
    }

    pub fn directive(&self) -> Option<&FieldDirective> {
        self.directive.as_ref()
    }

    pub fn set(&self, model: &mut T, assignment: Assignment) -> Result<()> {
        (self.setter)(model, assignment)
    }

    /// Generator building the related model from its own directives.
    pub(crate) fn related_generator(&self) -> Option<&Generator> {
        self.related.as_ref()
    }
}

impl<T> fmt::Debug for FieldDescriptor<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldDescriptor")
            .field("name", &self.name)
            .field("kind", &self.kind)
            .field("nullable", &self.nullable)
            .field("directive", &self.directive)
            .finish()
    }
}

fn expect_value(field: &str, assignment: Assignment) -> Result<FieldValue> {
    match assignment {
        Assignment::Value(value) => Ok(value),
        Assignment::Related(_) => Err(GenerationError::Configuration(format!(
            "field '{field}' does not hold a related model"
        ))),
    }
}

fn nested_generator<R: Model>() -> Generator {
    generator_fn(|ctx| {
        let related = ctx.build_related::<R>()?;
        Ok(Assignment::Related(Box::new(related)))
    })
}

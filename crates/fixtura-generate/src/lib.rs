//! Declarative fixture generation for Fixtura.
//!
//! Models describe their fields through [`Model::fields`], optionally
//! attaching a [`FieldDirective`]. Directives are discovered once per
//! type and cached; a [`Builder`] layers fluent rules on top and
//! populates instances from a seeded RNG. [`seed`] and [`seed_list`]
//! cover the common case of generating from directives alone.

pub mod builder;
mod catalog;
pub mod errors;
mod generators;
pub mod logging;
pub mod model;
pub mod options;
mod registry;
mod rules;
pub mod seeder;

pub use builder::Builder;
pub use errors::{GenerationError, Result};
pub use logging::init_logging;
pub use model::{Assignment, FieldDescriptor, Model};
pub use options::{LoggingOptions, SeedOptions};
pub use rules::{RuleKind, RuleOrigin};
pub use seeder::{Seeder, seed, seed_list};

pub use fixtura_core::{
    CulturalDate, EnumDomain, EnumInfo, FieldDirective, FieldType, FieldValue, PersianDate,
    ValueKind,
};

use std::path::Path;

use tracing::info;

use crate::builder::Builder;
use crate::errors::Result;
use crate::model::Model;
use crate::options::SeedOptions;

/// Entry point for generating fixtures from declared directives alone.
#[derive(Debug, Clone, Default)]
pub struct Seeder {
    options: SeedOptions,
}

impl Seeder {
    pub fn new(options: SeedOptions) -> Result<Self> {
        options.validate()?;
        Ok(Self { options })
    }

    /// Loads options from a TOML file.
    pub fn from_config(path: &Path) -> Result<Self> {
        let options = SeedOptions::load(path)?;
        info!(path = %path.display(), seed = ?options.seed, "seed options loaded");
        Ok(Self { options })
    }

    pub fn options(&self) -> &SeedOptions {
        &self.options
    }

    /// Fresh builder for `T` configured with these options.
    pub fn builder<T: Model>(&self) -> Result<Builder<T>> {
        Builder::with_options(self.options.clone())
    }

    pub fn seed<T: Model>(&self) -> Result<T> {
        self.builder::<T>()?.build()
    }

    /// Builds `count` instances with one builder, so identifier
    /// directives stay distinct across the whole list.
    pub fn seed_list<T: Model>(&self, count: usize) -> Result<Vec<T>> {
        self.builder::<T>()?.build_list(count)
    }
}

/// One `T` populated from its directives with default options.
pub fn seed<T: Model>() -> Result<T> {
    Seeder::default().seed()
}

/// `count` instances of `T` populated from their directives.
pub fn seed_list<T: Model>(count: usize) -> Result<Vec<T>> {
    Seeder::default().seed_list(count)
}

// src/task/resolver.rs

use crate::errors::Result;
use crate::fs::FileSystem;
use crate::resource::Dependency;

/// What a running task needs from the outside world.
///
/// The builder's session is the production implementation; it finds the
/// task whose targets satisfy a dependency and drives it recursively.
pub trait Resolver {
    fn file_system(&self) -> &dyn FileSystem;

    /// Run the maker of `dep`.
    ///
    /// `Ok(None)` when no task makes `dep`, otherwise whether the maker
    /// executed its actions.
    fn run_maker(&mut self, dep: &Dependency) -> Result<Option<bool>>;

    /// Global up-to-date check of the maker of `dep`, `Ok(None)` when there
    /// is no maker.
    fn maker_uptodate(&mut self, dep: &Dependency) -> Result<Option<bool>>;
}

/// A resolver for tasks driven on their own: nothing has a maker.
#[derive(Debug, Clone, Copy)]
pub struct LeafResolver<'a> {
    fs: &'a dyn FileSystem,
}

impl<'a> LeafResolver<'a> {
    pub fn new(fs: &'a dyn FileSystem) -> Self {
        Self { fs }
    }
}

impl Resolver for LeafResolver<'_> {
    fn file_system(&self) -> &dyn FileSystem {
        self.fs
    }

    fn run_maker(&mut self, _dep: &Dependency) -> Result<Option<bool>> {
        Ok(None)
    }

    fn maker_uptodate(&mut self, _dep: &Dependency) -> Result<Option<bool>> {
        Ok(None)
    }
}

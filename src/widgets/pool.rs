//! Recycling pool for row cells.
//!
//! Cells are registered under a template identifier. Rows leaving the viewport
//! hand their cell back with [`CellPool::enqueue`], which resets it through
//! [`Reusable::prepare_for_reuse`]; rows entering the viewport take one back
//! out with [`CellPool::dequeue`], creating a fresh instance when none is idle.

use std::collections::HashMap;

use crate::error::{CardfoldError, Result};

/// A cell that can be reset and handed to another row.
pub trait Reusable {
    /// Clears every piece of row-specific state.
    fn prepare_for_reuse(&mut self);
}

type Factory<T> = Box<dyn Fn() -> T>;

struct Template<T> {
    factory: Factory<T>,
    idle: Vec<T>,
}

/// Object pool keyed by template identifier.
pub struct CellPool<T: Reusable> {
    templates: HashMap<&'static str, Template<T>>,
}

impl<T: Reusable> Default for CellPool<T> {
    fn default() -> Self {
        Self {
            templates: HashMap::new(),
        }
    }
}

impl<T: Reusable> std::fmt::Debug for CellPool<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut map = f.debug_map();
        for (identifier, template) in &self.templates {
            map.entry(identifier, &template.idle.len());
        }
        map.finish()
    }
}

impl<T: Reusable> CellPool<T> {
    /// Creates an empty pool.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers the factory for `identifier`, replacing any previous one.
    pub fn register(&mut self, identifier: &'static str, factory: impl Fn() -> T + 'static) {
        self.templates.insert(
            identifier,
            Template {
                factory: Box::new(factory),
                idle: Vec::new(),
            },
        );
    }

    /// Takes an idle cell for `identifier`, or builds a new one.
    ///
    /// # Errors
    ///
    /// Returns [`CardfoldError::UnknownTemplate`] when nothing is registered
    /// under `identifier`.
    pub fn dequeue(&mut self, identifier: &str) -> Result<T> {
        let template = self
            .templates
            .get_mut(identifier)
            .ok_or_else(|| CardfoldError::UnknownTemplate(identifier.to_string()))?;
        Ok(template.idle.pop().unwrap_or_else(|| (template.factory)()))
    }

    /// Resets `cell` and keeps it for later reuse.
    ///
    /// Cells for unregistered identifiers are dropped.
    pub fn enqueue(&mut self, identifier: &str, mut cell: T) {
        cell.prepare_for_reuse();
        if let Some(template) = self.templates.get_mut(identifier) {
            template.idle.push(cell);
        }
    }

    /// Number of idle cells held for `identifier`.
    #[must_use]
    pub fn idle_count(&self, identifier: &str) -> usize {
        self.templates
            .get(identifier)
            .map_or(0, |template| template.idle.len())
    }
}

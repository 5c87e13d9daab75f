//! Lexically scoped symbol tables.
//!
//! A [`SymbolMap`] owns its local bindings and holds a shared, immutable
//! handle to its parent. A parent has to be fully built before a child can
//! point at it, so chains are acyclic and ancestors cannot be changed
//! through a child.

use std::sync::Arc;

use rustc_hash::FxHashMap;

use crate::value::{Symbol, Value};

#[derive(Debug, Clone, Default)]
pub struct SymbolMap {
    bindings: FxHashMap<Symbol, Value>,
    parent: Option<Arc<SymbolMap>>,
}

impl SymbolMap {
    /// Create an empty root scope
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty scope that delegates to `parent`
    pub fn with_parent(parent: Arc<SymbolMap>) -> Self {
        SymbolMap {
            bindings: FxHashMap::default(),
            parent: Some(parent),
        }
    }

    pub fn parent(&self) -> Option<&Arc<SymbolMap>> {
        self.parent.as_ref()
    }

    /// Bind `symbol` in this scope, returning the local binding it replaced.
    /// Ancestors are never touched.
    pub fn add(&mut self, symbol: Symbol, value: Value) -> Option<Value> {
        self.bindings.insert(symbol, value)
    }

    /// Look `symbol` up here, then in each ancestor in turn.
    pub fn lookup(&self, symbol: &Symbol) -> Option<&Value> {
        let mut scope = Some(self);
        while let Some(map) = scope {
            if let Some(value) = map.bindings.get(symbol) {
                return Some(value);
            }
            scope = map.parent.as_deref();
        }
        None
    }

    /// Look `symbol` up in this scope only
    pub fn lookup_local(&self, symbol: &Symbol) -> Option<&Value> {
        self.bindings.get(symbol)
    }

    pub fn contains(&self, symbol: &Symbol) -> bool {
        self.lookup(symbol).is_some()
    }

    /// Number of local bindings
    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    /// Locally bound symbols, in no particular order
    pub fn symbols(&self) -> impl Iterator<Item = &Symbol> {
        self.bindings.keys()
    }

    /// Number of ancestors above this scope
    pub fn depth(&self) -> usize {
        let mut depth = 0;
        let mut scope = self.parent.as_deref();
        while let Some(map) = scope {
            depth += 1;
            scope = map.parent.as_deref();
        }
        depth
    }
}

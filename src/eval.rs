//! Evaluation of values against a host [`Environment`].
//!
//! The evaluator only dispatches on the kind of a value; what a symbol,
//! string or list means is up to the environment. [`evaluate_call`]
//! implements the usual "head is a form" protocol for environments that
//! want it.

use std::sync::Arc;

use tracing::{debug, trace};

use crate::error::{Error, Result};
use crate::form::{Builtin, Form};
use crate::symbols::SymbolMap;
use crate::value::{List, Symbol, Value};

/// Evaluation policy supplied by the host.
pub trait Environment {
    /// Resolve a symbol in head position to a form
    fn lookup_form(&self, symbol: &Symbol) -> Result<Arc<dyn Form>>;

    /// Strings usually evaluate to themselves
    fn evaluate_string(&mut self, string: &Arc<str>) -> Result<Value>;

    /// Symbols usually resolve to a value in some lookup table
    fn evaluate_symbol(&mut self, symbol: &Symbol) -> Result<Value>;

    /// Lists usually call the form named by their first element, see
    /// [`evaluate_call`]
    fn evaluate_list(&mut self, list: &List) -> Result<Value>;
}

/// Evaluate `value` in `env`. Forms evaluate to themselves.
pub fn evaluate(env: &mut dyn Environment, value: &Value) -> Result<Value> {
    trace!(kind = %value.kind(), "evaluate");
    match value {
        Value::Symbol(symbol) => env.evaluate_symbol(symbol),
        Value::String(string) => env.evaluate_string(string),
        Value::List(list) => env.evaluate_list(list),
        Value::Form(_) => Ok(value.clone()),
    }
}

/// Treat `values` as a call: the head names a form, the rest are arguments.
///
/// Returns `Ok(None)` when `values` is not a call (empty, or the head is not
/// a symbol) so the caller can fall back to its own handling. Arguments of
/// non-special forms are evaluated left to right and the first error wins.
pub fn evaluate_call(env: &mut dyn Environment, values: &[Value]) -> Result<Option<Value>> {
    let Some((Value::Symbol(symbol), args)) = values.split_first() else {
        return Ok(None);
    };

    let form = env.lookup_form(symbol).inspect_err(|err| {
        debug!(%symbol, %err, "form lookup failed");
    })?;

    let result = if form.is_special() {
        form.call(env, args)?
    } else {
        let params = evaluate_slice(env, args)?;
        form.call(env, &params)?
    };
    Ok(Some(result))
}

/// Evaluate every element of `values` in order.
pub fn evaluate_slice(env: &mut dyn Environment, values: &[Value]) -> Result<Vec<Value>> {
    let mut results = Vec::with_capacity(values.len());
    for value in values {
        results.push(evaluate(env, value)?);
    }
    Ok(results)
}

// ============================================================================
// MapEnvironment
// ============================================================================

/// An environment backed by a [`SymbolMap`].
///
/// - symbols evaluate to their binding, or to themselves when unbound
/// - strings evaluate to themselves
/// - lists are calls when their head names a form; otherwise every element
///   is evaluated and the results are collected into a new list
#[derive(Debug, Clone, Default)]
pub struct MapEnvironment {
    symbols: SymbolMap,
}

impl MapEnvironment {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_symbols(symbols: SymbolMap) -> Self {
        MapEnvironment { symbols }
    }

    pub fn symbols(&self) -> &SymbolMap {
        &self.symbols
    }

    pub fn symbols_mut(&mut self) -> &mut SymbolMap {
        &mut self.symbols
    }

    /// Bind `builtin` under its own name
    pub fn register(&mut self, builtin: Builtin) {
        let symbol = Symbol::new(builtin.name());
        self.symbols.add(symbol, builtin.into_value());
    }
}

impl Environment for MapEnvironment {
    fn lookup_form(&self, symbol: &Symbol) -> Result<Arc<dyn Form>> {
        match self.symbols.lookup(symbol) {
            Some(Value::Form(form)) => Ok(Arc::clone(form)),
            Some(value) => Err(Error::NotAForm {
                symbol: *symbol,
                value: value.clone(),
            }),
            None => Err(Error::UnboundForm { symbol: *symbol }),
        }
    }

    fn evaluate_string(&mut self, string: &Arc<str>) -> Result<Value> {
        Ok(Value::String(Arc::clone(string)))
    }

    fn evaluate_symbol(&mut self, symbol: &Symbol) -> Result<Value> {
        Ok(self
            .symbols
            .lookup(symbol)
            .cloned()
            .unwrap_or(Value::Symbol(*symbol)))
    }

    fn evaluate_list(&mut self, list: &List) -> Result<Value> {
        if let Some(result) = evaluate_call(self, list.as_slice())? {
            return Ok(result);
        }
        Ok(Value::List(evaluate_slice(self, list.as_slice())?.into()))
    }
}

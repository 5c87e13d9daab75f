//! The s-expression data model.
//!
//! A [`Value`] is one of three structural kinds (symbol, string, list) or a
//! host-defined callable [`Form`]. Values are immutable once built; lists
//! share their elements through an `Arc` so cloning is cheap.

use std::fmt;
use std::io;
use std::sync::Arc;

use crate::form::Form;
use crate::interner::InternedSymbol;

// ============================================================================
// Symbol
// ============================================================================

/// An atom with an upper-cased, interned name.
///
/// Names live in a process-wide interner and are never released, so every
/// distinct name ever created stays in memory until the process exits.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Symbol(InternedSymbol);

impl Symbol {
    /// Create a symbol, normalizing the name to upper case
    pub fn new(name: &str) -> Self {
        Symbol(InternedSymbol::new(&name.to_uppercase()))
    }

    /// The normalized name
    pub fn name(&self) -> String {
        self.0.resolve()
    }

    /// Borrow the normalized name for the duration of `f`
    pub fn with_name<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&str) -> R,
    {
        self.0.with_str(f)
    }
}

impl fmt::Debug for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.with_name(|name| write!(f, "Symbol({name})"))
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ============================================================================
// List
// ============================================================================

/// An ordered, immutable sequence of values.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct List {
    elements: Arc<[Value]>,
}

impl List {
    pub fn new(elements: Vec<Value>) -> Self {
        List {
            elements: elements.into(),
        }
    }

    pub fn empty() -> Self {
        Self::new(Vec::new())
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Value> {
        self.elements.get(index)
    }

    pub fn first(&self) -> Option<&Value> {
        self.elements.first()
    }

    /// Everything after the head; empty for lists of length 0 or 1
    pub fn rest(&self) -> &[Value] {
        self.elements.get(1..).unwrap_or_default()
    }

    pub fn as_slice(&self) -> &[Value] {
        &self.elements
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Value> {
        self.elements.iter()
    }
}

impl Default for List {
    fn default() -> Self {
        Self::empty()
    }
}

impl From<Vec<Value>> for List {
    fn from(elements: Vec<Value>) -> Self {
        Self::new(elements)
    }
}

impl FromIterator<Value> for List {
    fn from_iter<I: IntoIterator<Item = Value>>(iter: I) -> Self {
        List {
            elements: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a List {
    type Item = &'a Value;
    type IntoIter = std::slice::Iter<'a, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

// ============================================================================
// Value
// ============================================================================

/// The kind of a value, used in type errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
    Symbol,
    String,
    List,
    Form,
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ValueKind::Symbol => "symbol",
            ValueKind::String => "string",
            ValueKind::List => "list",
            ValueKind::Form => "form",
        };
        f.write_str(name)
    }
}

#[derive(Clone, Debug)]
pub enum Value {
    Symbol(Symbol),
    String(Arc<str>),
    List(List),
    /// Host-defined callable
    Form(Arc<dyn Form>),
}

impl Value {
    pub fn symbol(name: &str) -> Self {
        Value::Symbol(Symbol::new(name))
    }

    pub fn string(text: impl Into<Arc<str>>) -> Self {
        Value::String(text.into())
    }

    pub fn list(elements: Vec<Value>) -> Self {
        Value::List(List::new(elements))
    }

    pub fn form(form: impl Form + 'static) -> Self {
        Value::Form(Arc::new(form))
    }

    pub fn kind(&self) -> ValueKind {
        match self {
            Value::Symbol(_) => ValueKind::Symbol,
            Value::String(_) => ValueKind::String,
            Value::List(_) => ValueKind::List,
            Value::Form(_) => ValueKind::Form,
        }
    }

    pub fn as_symbol(&self) -> Option<&Symbol> {
        match self {
            Value::Symbol(sym) => Some(sym),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&List> {
        match self {
            Value::List(list) => Some(list),
            _ => None,
        }
    }

    pub fn as_form(&self) -> Option<&Arc<dyn Form>> {
        match self {
            Value::Form(form) => Some(form),
            _ => None,
        }
    }

    /// Write the canonical rendering to `w`, returning the number of bytes written.
    pub fn encode<W: io::Write + ?Sized>(&self, w: &mut W) -> io::Result<usize> {
        let text = self.to_string();
        w.write_all(text.as_bytes())?;
        Ok(text.len())
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Symbol(a), Value::Symbol(b)) => a == b,
            (Value::String(a), Value::String(b)) => a == b,
            (Value::List(a), Value::List(b)) => a == b,
            (Value::Form(a), Value::Form(b)) => {
                Arc::ptr_eq(a, b)
                    || matches!((a.as_builtin(), b.as_builtin()), (Some(x), Some(y)) if x == y)
            }
            _ => false,
        }
    }
}

impl Eq for Value {}

impl From<Symbol> for Value {
    fn from(sym: Symbol) -> Self {
        Value::Symbol(sym)
    }
}

impl From<List> for Value {
    fn from(list: List) -> Self {
        Value::List(list)
    }
}

// ============================================================================
// Display Implementation
// ============================================================================

fn escape_string(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '\n' => result.push_str("\\n"),
            '\t' => result.push_str("\\t"),
            '\r' => result.push_str("\\r"),
            '\\' => result.push_str("\\\\"),
            '"' => result.push_str("\\\""),
            c => result.push(c),
        }
    }
    result
}

impl fmt::Display for List {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(")?;
        for (i, elem) in self.elements.iter().enumerate() {
            if i > 0 {
                write!(f, " ")?;
            }
            write!(f, "{elem}")?;
        }
        write!(f, ")")
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Symbol(sym) => write!(f, "{sym}"),
            Value::String(s) => write!(f, "\"{}\"", escape_string(s)),
            Value::List(list) => write!(f, "{list}"),
            Value::Form(form) => write!(f, "#{}", form.name()),
        }
    }
}

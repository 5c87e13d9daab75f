//! Typed access to form arguments.
//!
//! These helpers are meant for builtin bodies: they pick the argument at an
//! index and check its kind, returning `WrongType` or `IndexOutOfBounds`
//! instead of panicking.

use crate::error::{Error, Result};
use crate::value::{List, Symbol, Value, ValueKind};

fn get(args: &[Value], index: usize) -> Result<&Value> {
    args.get(index).ok_or(Error::IndexOutOfBounds {
        index,
        len: args.len(),
    })
}

fn wrong_type(expected: ValueKind, index: usize, value: &Value) -> Error {
    Error::WrongType {
        expected,
        index,
        value: value.clone(),
    }
}

/// Extract the symbol at `index`
pub fn get_symbol(args: &[Value], index: usize) -> Result<Symbol> {
    match get(args, index)? {
        Value::Symbol(symbol) => Ok(*symbol),
        other => Err(wrong_type(ValueKind::Symbol, index, other)),
    }
}

/// Extract the text at `index`. A symbol is accepted as well and yields its
/// (upper-cased) name.
pub fn get_string(args: &[Value], index: usize) -> Result<String> {
    match get(args, index)? {
        Value::String(s) => Ok(s.to_string()),
        Value::Symbol(symbol) => Ok(symbol.name()),
        other => Err(wrong_type(ValueKind::String, index, other)),
    }
}

/// Extract the list at `index`
pub fn get_list(args: &[Value], index: usize) -> Result<List> {
    match get(args, index)? {
        Value::List(list) => Ok(list.clone()),
        other => Err(wrong_type(ValueKind::List, index, other)),
    }
}

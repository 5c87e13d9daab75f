//! Minimal s-expression toolkit.
//!
//! `sxpr` reads Lisp-style text into a small value model (symbols, strings,
//! lists and host-defined forms) and evaluates it against an
//! [`Environment`] supplied by the embedding application. It is meant for
//! hosts that need structured, quotable data with a little bit of
//! evaluation, not a full language runtime.
//!
//! ```
//! use sxpr::{Builtin, Environment, MapEnvironment, Result, Value, evaluate, read_str};
//!
//! fn quote(_env: &mut dyn Environment, args: &[Value]) -> Result<Value> {
//!     Ok(Value::list(args.to_vec()))
//! }
//!
//! let mut env = MapEnvironment::new();
//! env.register(Builtin::variadic("QUOTE", true, 0, quote));
//!
//! let expr = read_str("(quote (a b) c)").unwrap();
//! let value = evaluate(&mut env, &expr).unwrap();
//! assert_eq!(value.to_string(), "((A B) C)");
//! ```

pub mod args;
pub mod error;
pub mod eval;
pub mod form;
pub mod interner;
pub mod reader;
pub mod symbols;
pub mod value;

// Re-export commonly used items for convenience
pub use args::{get_list, get_string, get_symbol};
pub use error::{ArityViolation, Error, ReadError, ReadErrorKind, Result};
pub use eval::{Environment, MapEnvironment, evaluate, evaluate_call, evaluate_slice};
pub use form::{Arity, Builtin, BuiltinFn, Form};
pub use reader::{Reader, read_all, read_bytes, read_str};
pub use symbols::SymbolMap;
pub use value::{List, Symbol, Value, ValueKind};

//! Callable values.
//!
//! A [`Form`] sits in the head position of a list. Special forms receive
//! their arguments unevaluated; all other forms see them evaluated left to
//! right. [`Builtin`] is the form hosts use to expose Rust functions.

use std::fmt;

use tracing::{debug, trace};

use crate::error::{ArityViolation, Error, Result};
use crate::eval::Environment;
use crate::value::Value;

/// A callable value.
pub trait Form: fmt::Debug + Send + Sync {
    /// Name used for rendering (`#NAME`) and errors
    fn name(&self) -> &str;

    /// True if arguments are passed unevaluated
    fn is_special(&self) -> bool;

    fn call(&self, env: &mut dyn Environment, args: &[Value]) -> Result<Value>;

    /// `Some` for builtins. Two builtins are equal when their names match;
    /// any other form is only equal to itself.
    fn as_builtin(&self) -> Option<&Builtin> {
        None
    }
}

/// Signature of the host function behind a [`Builtin`].
pub type BuiltinFn = fn(&mut dyn Environment, &[Value]) -> Result<Value>;

// ============================================================================
// Arity
// ============================================================================

/// Accepted argument counts. `max: None` means unlimited.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Arity {
    pub min: usize,
    pub max: Option<usize>,
}

impl Arity {
    /// Build from a minimum and maximum; a maximum below the minimum means
    /// "no upper bound".
    pub fn from_bounds(min: usize, max: usize) -> Self {
        Arity {
            min,
            max: (max >= min).then_some(max),
        }
    }

    pub fn exactly(n: usize) -> Self {
        Arity {
            min: n,
            max: Some(n),
        }
    }

    pub fn at_least(min: usize) -> Self {
        Arity { min, max: None }
    }

    /// Validate `got` arguments for the form called `form`.
    pub fn check(&self, form: &str, got: usize) -> Result<()> {
        let (violation, limit) = if got < self.min {
            (ArityViolation::TooFew, self.min)
        } else {
            match self.max {
                Some(max) if got > max => (ArityViolation::TooMany, max),
                _ => return Ok(()),
            }
        };
        debug!(form, got, limit, %violation, "arity check failed");
        Err(Error::Arity {
            form: form.to_string(),
            violation,
            got,
            limit,
        })
    }
}

// ============================================================================
// Builtin
// ============================================================================

/// A form backed by a host function.
#[derive(Clone)]
pub struct Builtin {
    name: String,
    function: BuiltinFn,
    arity: Arity,
    special: bool,
}

impl Builtin {
    /// Create a builtin. `max_arity < min_arity` means unlimited arguments.
    pub fn new(
        name: impl Into<String>,
        special: bool,
        min_arity: usize,
        max_arity: usize,
        function: BuiltinFn,
    ) -> Self {
        Self::with_arity(name, special, Arity::from_bounds(min_arity, max_arity), function)
    }

    /// Create a builtin accepting `min_arity` or more arguments.
    pub fn variadic(
        name: impl Into<String>,
        special: bool,
        min_arity: usize,
        function: BuiltinFn,
    ) -> Self {
        Self::with_arity(name, special, Arity::at_least(min_arity), function)
    }

    pub fn with_arity(
        name: impl Into<String>,
        special: bool,
        arity: Arity,
        function: BuiltinFn,
    ) -> Self {
        Builtin {
            name: name.into(),
            function,
            arity,
            special,
        }
    }

    pub fn arity(&self) -> Arity {
        self.arity
    }

    pub fn function(&self) -> BuiltinFn {
        self.function
    }

    /// Wrap this builtin as a value
    pub fn into_value(self) -> Value {
        Value::form(self)
    }
}

impl Form for Builtin {
    fn name(&self) -> &str {
        &self.name
    }

    fn is_special(&self) -> bool {
        self.special
    }

    fn call(&self, env: &mut dyn Environment, args: &[Value]) -> Result<Value> {
        self.arity.check(&self.name, args.len())?;
        trace!(form = %self.name, args = args.len(), "calling builtin");
        (self.function)(env, args)
    }

    fn as_builtin(&self) -> Option<&Builtin> {
        Some(self)
    }
}

impl PartialEq for Builtin {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Eq for Builtin {}

impl fmt::Debug for Builtin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Builtin")
            .field("name", &self.name)
            .field("arity", &self.arity)
            .field("special", &self.special)
            .finish_non_exhaustive()
    }
}

impl fmt::Display for Builtin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::eval::MapEnvironment;

    fn first(_env: &mut dyn Environment, args: &[Value]) -> Result<Value> {
        Ok(args[0].clone())
    }

    fn explode(_env: &mut dyn Environment, _args: &[Value]) -> Result<Value> {
        Err(Error::host("exploded"))
    }

    #[test]
    fn test_arity_from_bounds() {
        assert_eq!(Arity::from_bounds(1, 3), Arity { min: 1, max: Some(3) });
        assert_eq!(Arity::from_bounds(2, 0), Arity::at_least(2));
        assert_eq!(Arity::from_bounds(1, 1), Arity::exactly(1));
    }

    #[test]
    fn test_arity_check_both_directions() {
        let arity = Arity::exactly(1);
        assert!(arity.check("F", 1).is_ok());
        assert!(matches!(
            arity.check("F", 0),
            Err(Error::Arity { violation: ArityViolation::TooFew, got: 0, limit: 1, .. })
        ));
        assert!(matches!(
            arity.check("F", 2),
            Err(Error::Arity { violation: ArityViolation::TooMany, got: 2, limit: 1, .. })
        ));
    }

    #[test]
    fn test_unlimited_arity() {
        let arity = Arity::at_least(0);
        assert!(arity.check("LIST", 0).is_ok());
        assert!(arity.check("LIST", 1000).is_ok());
    }

    #[test]
    fn test_arity_is_checked_before_the_function_runs() {
        // `first` would panic on an empty slice if it were reached.
        let builtin = Builtin::new("FIRST", false, 1, 1, first);
        let mut env = MapEnvironment::new();
        let err = builtin.call(&mut env, &[]).unwrap_err();
        assert!(err.is_arity());
    }

    #[test]
    fn test_host_errors_pass_through() {
        let builtin = Builtin::variadic("EXPLODE", false, 0, explode);
        let mut env = MapEnvironment::new();
        assert_eq!(builtin.call(&mut env, &[]), Err(Error::host("exploded")));
    }

    #[test]
    fn test_builtins_compare_by_name() {
        let a = Builtin::new("F", false, 1, 1, first);
        let b = Builtin::variadic("F", true, 0, explode);
        let c = Builtin::new("G", false, 1, 1, first);
        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_eq!(a.clone().into_value(), b.into_value());
        assert_ne!(a.into_value(), c.into_value());
    }

    #[test]
    fn test_builtin_rendering() {
        let builtin = Builtin::new("CAT", false, 0, 0, first);
        assert_eq!(builtin.to_string(), "#CAT");
        assert_eq!(builtin.into_value().to_string(), "#CAT");
    }
}

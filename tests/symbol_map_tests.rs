use std::sync::Arc;

use sxpr::{
    Builtin, Environment, Error, MapEnvironment, Result, Symbol, SymbolMap, Value, evaluate,
    read_str,
};

fn sym(name: &str) -> Symbol {
    Symbol::new(name)
}

#[test]
fn test_child_shadows_parent() {
    let mut root = SymbolMap::new();
    root.add(sym("x"), Value::string("root"));
    root.add(sym("y"), Value::string("root-y"));
    let root = Arc::new(root);

    let mut child = SymbolMap::with_parent(Arc::clone(&root));
    child.add(sym("x"), Value::string("child"));

    assert_eq!(child.lookup(&sym("x")), Some(&Value::string("child")));
    assert_eq!(child.lookup(&sym("y")), Some(&Value::string("root-y")));
    assert_eq!(root.lookup(&sym("x")), Some(&Value::string("root")));
}

#[test]
fn test_lookup_walks_the_whole_chain() {
    let mut root = SymbolMap::new();
    root.add(sym("deep"), Value::string("found"));
    let mut scope = Arc::new(root);
    for _ in 0..10 {
        scope = Arc::new(SymbolMap::with_parent(scope));
    }

    assert_eq!(scope.depth(), 10);
    assert_eq!(scope.lookup(&sym("deep")), Some(&Value::string("found")));
    assert_eq!(scope.lookup_local(&sym("deep")), None);
    assert!(scope.lookup(&sym("shallow")).is_none());
}

#[test]
fn test_add_never_touches_ancestors() {
    let mut root = SymbolMap::new();
    root.add(sym("x"), Value::string("1"));
    let root = Arc::new(root);

    let mut child = SymbolMap::with_parent(Arc::clone(&root));
    assert_eq!(child.add(sym("x"), Value::string("2")), None);
    child.add(sym("z"), Value::string("3"));

    assert_eq!(root.len(), 1);
    assert!(!root.contains(&sym("z")));
    assert_eq!(root.lookup(&sym("x")), Some(&Value::string("1")));
    assert_eq!(child.len(), 2);
}

#[test]
fn test_symbols_lists_local_keys() {
    let mut root = SymbolMap::new();
    root.add(sym("a"), Value::string("1"));
    let mut child = SymbolMap::with_parent(Arc::new(root));
    child.add(sym("b"), Value::string("2"));

    let local: Vec<Symbol> = child.symbols().copied().collect();
    assert_eq!(local, vec![sym("B")]);
    assert_eq!(child.parent().map(|parent| parent.len()), Some(1));
    assert!(child.contains(&sym("a")));
}

// ============================================================================
// MapEnvironment over scoped maps
// ============================================================================

fn shout(_env: &mut dyn Environment, args: &[Value]) -> Result<Value> {
    Ok(Value::string(format!("{}!", args[0])))
}

#[test]
fn test_environment_resolves_forms_through_parents() {
    let mut globals = SymbolMap::new();
    globals.add(sym("shout"), Builtin::new("SHOUT", false, 1, 1, shout).into_value());
    globals.add(sym("who"), Value::string("world"));

    let mut locals = SymbolMap::with_parent(Arc::new(globals));
    locals.add(sym("who"), Value::string("you"));

    let mut env = MapEnvironment::with_symbols(locals);
    let expr = read_str("(shout who)").unwrap();
    assert_eq!(
        evaluate(&mut env, &expr).unwrap(),
        Value::string(r#""you"!"#)
    );
}

#[test]
fn test_environment_reports_unbound_and_non_form_heads() {
    let mut symbols = SymbolMap::new();
    symbols.add(sym("data"), Value::string("not callable"));
    let env = MapEnvironment::with_symbols(symbols);

    assert!(matches!(
        env.lookup_form(&sym("data")),
        Err(Error::NotAForm { .. })
    ));
    assert!(matches!(
        env.lookup_form(&sym("missing")),
        Err(Error::UnboundForm { .. })
    ));
}

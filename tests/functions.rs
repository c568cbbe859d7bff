use calculus_viz::coords::Interval;
use calculus_viz::functions::{jump_sine, FunctionEntry, FunctionRegistry};
use calculus_viz::VizError;

fn cube(x: f64) -> f64 {
    x * x * x
}

#[test]
fn builtins_are_all_registered() {
    let registry = FunctionRegistry::builtin();
    let names: Vec<_> = registry.names().collect();
    assert_eq!(
        names,
        ["exponential", "jump_sine", "linear", "quadratic", "sine", "sine_bump"]
    );
    assert_eq!(registry.get("quadratic").eval(0.5), Some(0.25));
}

#[test]
fn registering_a_new_function() {
    let mut registry = FunctionRegistry::builtin();
    let signed = Interval::new(-1.0, 1.0).unwrap();
    registry
        .register(FunctionEntry::total("cubic", cube, signed, signed))
        .unwrap();
    assert_eq!(registry.try_get("cubic").unwrap().eval(-0.5), Some(-0.125));
    assert_eq!(registry.try_get("cubic").unwrap().eval(1.5), None);
}

#[test]
fn duplicate_names_are_rejected() {
    let mut registry = FunctionRegistry::builtin();
    let err = registry
        .register(FunctionEntry::total("linear", cube, Interval::UNIT, Interval::UNIT))
        .unwrap_err();
    assert_eq!(err, VizError::DuplicateFunction("linear".into()));
    // the original entry is untouched
    assert_eq!(registry.get("linear").eval(0.5), Some(0.5));
}

#[test]
fn unknown_names_are_an_error() {
    let registry = FunctionRegistry::new();
    assert_eq!(
        registry.try_get("sine").unwrap_err(),
        VizError::UnknownFunction("sine".into())
    );
}

#[test]
#[should_panic(expected = "not registered")]
fn get_panics_on_unknown_names() {
    FunctionRegistry::builtin().get("tangent");
}

#[test]
fn partial_functions_have_holes() {
    let entry = *FunctionRegistry::builtin().get("jump_sine");
    assert_eq!(entry.eval(0.5), None);
    assert_eq!(entry.eval(0.5005), None);
    assert!(entry.eval(0.25).is_some());
    assert_eq!(jump_sine(0.25), entry.eval(0.25));
    assert!(entry.eval(0.75).unwrap() < 0.0);
}

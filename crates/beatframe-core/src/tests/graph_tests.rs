use super::*;
use std::cell::Cell;
use std::rc::Rc;

#[test]
fn edges_follow_the_last_evaluation() {
    let runtime = Runtime::new();
    let use_left = runtime.observable(true);
    let left = runtime.observable(1);
    let right = runtime.observable(2);
    let picked = {
        let (use_left, left, right) = (use_left.clone(), left.clone(), right.clone());
        runtime.derived(move |scope| {
            if scope.read(&use_left)? {
                scope.read(&left)
            } else {
                scope.read(&right)
            }
        })
    };

    assert_eq!(picked.get().unwrap(), 1);
    let mut expected = vec![use_left.id(), left.id()];
    expected.sort_unstable();
    assert_eq!(runtime.dependencies_of(picked.id()), expected);

    use_left.set(false);
    assert_eq!(picked.get().unwrap(), 2);
    let mut expected = vec![use_left.id(), right.id()];
    expected.sort_unstable();
    assert_eq!(runtime.dependencies_of(picked.id()), expected);
    assert!(runtime.dependents_of(left.id()).is_empty());
}

#[test]
fn pruned_dependency_no_longer_invalidates() {
    let runtime = Runtime::new();
    let use_x = runtime.observable(true);
    let x = runtime.observable(10);
    let bound = {
        let (use_x, x) = (use_x.clone(), x.clone());
        runtime.derived(move |scope| {
            if scope.read(&use_x)? {
                scope.read(&x)
            } else {
                Ok(0)
            }
        })
    };
    assert_eq!(bound.get().unwrap(), 10);

    use_x.set(false);
    assert_eq!(bound.get().unwrap(), 0);

    x.set(11);
    assert!(!bound.is_dirty(), "write to a pruned dependency must not invalidate");
}

#[test]
fn diamond_recomputes_each_cell_once() {
    let runtime = Runtime::new();
    let top = runtime.observable(1);
    let left = {
        let top = top.clone();
        runtime.derived(move |scope| Ok(scope.read(&top)? + 1))
    };
    let right = {
        let top = top.clone();
        runtime.derived(move |scope| Ok(scope.read(&top)? * 2))
    };
    let evaluations = Rc::new(Cell::new(0));
    let bottom = {
        let (left, right, evaluations) = (left.clone(), right.clone(), evaluations.clone());
        runtime.derived(move |scope| {
            evaluations.set(evaluations.get() + 1);
            Ok(scope.read(&left)? + scope.read(&right)?)
        })
    };

    assert_eq!(bottom.get().unwrap(), 4);
    top.set(3);
    assert_eq!(bottom.get().unwrap(), 10);
    assert_eq!(evaluations.get(), 2);
}

#[test]
fn invalidate_marks_dependents_without_write() {
    let runtime = Runtime::new();
    let external = Rc::new(Cell::new(1));
    let source = runtime.observable(());
    let mirrored = {
        let (source, external) = (source.clone(), external.clone());
        runtime.derived(move |scope| {
            scope.read(&source)?;
            Ok(external.get())
        })
    };
    assert_eq!(mirrored.get().unwrap(), 1);
    external.set(2);
    assert_eq!(mirrored.get().unwrap(), 1);
    source.invalidate();
    assert!(mirrored.is_dirty());
    assert_eq!(mirrored.get().unwrap(), 2);
}

#[test]
fn rebinding_discards_old_edges() {
    let runtime = Runtime::new();
    let a = runtime.observable(1);
    let b = runtime.observable(2);
    let target = {
        let a = a.clone();
        runtime.derived(move |scope| scope.read(&a))
    };
    assert_eq!(target.get().unwrap(), 1);

    {
        let b = b.clone();
        target.bind(move |scope| scope.read(&b));
    }
    assert!(runtime.dependents_of(a.id()).is_empty());
    assert_eq!(target.get().unwrap(), 2);
    a.set(5);
    assert!(!target.is_dirty());
}

#[test]
fn duplicate_reads_register_one_edge() {
    let runtime = Runtime::new();
    let a = runtime.observable(2);
    let squared = {
        let a = a.clone();
        runtime.derived(move |scope| Ok(scope.read(&a)? * scope.read(&a)?))
    };
    assert_eq!(squared.get().unwrap(), 4);
    assert_eq!(runtime.dependencies_of(squared.id()), vec![a.id()]);
    assert_eq!(runtime.dependents_of(a.id()), vec![squared.id()]);
}

#[test]
fn nested_evaluation_captures_into_inner_frame() {
    let runtime = Runtime::new();
    let base = runtime.observable(1);
    let inner = {
        let base = base.clone();
        runtime.derived(move |scope| Ok(scope.read(&base)? + 1))
    };
    let outer = {
        let inner = inner.clone();
        runtime.derived(move |scope| Ok(scope.read(&inner)? + 1))
    };
    assert_eq!(outer.get().unwrap(), 3);
    assert_eq!(runtime.dependencies_of(outer.id()), vec![inner.id()]);
    assert_eq!(runtime.dependencies_of(inner.id()), vec![base.id()]);
}

#[test]
fn failed_evaluation_keeps_previous_edges() {
    let runtime = Runtime::new();
    let a = runtime.observable(1);
    let fail = runtime.observable(false);
    let cell = {
        let (a, fail) = (a.clone(), fail.clone());
        runtime.derived(move |scope| {
            let value = scope.read(&a)?;
            if scope.read(&fail)? {
                return Err(ReactiveError::binding("failed"));
            }
            Ok(value)
        })
    };
    assert_eq!(cell.get().unwrap(), 1);
    fail.set(true);
    assert!(cell.get().is_err());
    let mut expected = vec![a.id(), fail.id()];
    expected.sort_unstable();
    assert_eq!(runtime.dependencies_of(cell.id()), expected);
}

#[test]
fn reader_recovering_from_a_failed_cell_sees_later_writes() {
    let runtime = Runtime::new();
    let a = runtime.observable(1);
    let x = {
        let a = a.clone();
        runtime.derived(move |scope| {
            let value = scope.read(&a)?;
            if value < 0 {
                return Err(ReactiveError::binding("negative"));
            }
            Ok(value * 10)
        })
    };
    let y = {
        let x = x.clone();
        runtime.derived(move |scope| Ok(scope.read(&x).unwrap_or(-1)))
    };
    let notified = Rc::new(Cell::new(0));
    {
        let notified = notified.clone();
        y.add_listener(move |_| notified.set(notified.get() + 1));
    }

    assert_eq!(y.get().unwrap(), 10);
    a.set(-5);
    assert_eq!(y.get().unwrap(), -1);
    assert!(x.is_dirty());
    assert!(!y.is_dirty());

    a.set(7);
    assert!(y.is_dirty(), "write must reach readers behind a dirty cell");
    assert_eq!(x.get().unwrap(), 70);
    assert_eq!(y.get().unwrap(), 70);
    assert_eq!(notified.get(), 2);
}

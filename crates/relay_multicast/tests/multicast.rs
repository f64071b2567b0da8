use std::cell::{Cell, RefCell};

use relay_multicast::{Delegate, Multicast, MulticastConfig, Null};

fn double(x: i32) -> i32 {
    x * 2
}

fn square(x: i32) -> i32 {
    x * x
}

struct Tally {
    total: Cell<i32>,
}

impl Tally {
    fn new() -> Self {
        Self {
            total: Cell::new(0),
        }
    }

    fn add(&self, x: i32) -> i32 {
        self.total.set(self.total.get() + x);
        self.total.get()
    }
}

#[test]
fn invokes_in_insertion_order() {
    let log = RefCell::new(Vec::new());
    let first = |x: i32| log.borrow_mut().push(("first", x));
    let second = |x: i32| log.borrow_mut().push(("second", x));
    let third = |x: i32| log.borrow_mut().push(("third", x));

    let mut m: Multicast<(i32,)> = Multicast::new();
    assert!(m.add(Delegate::closure(&second)));
    assert!(m.add(Delegate::closure(&first)));
    m += Delegate::closure(&third);

    assert_eq!(m.invoke((7,)), 3);
    assert_eq!(
        *log.borrow(),
        vec![("second", 7), ("first", 7), ("third", 7)]
    );
}

#[test]
fn collects_results() {
    let tally = Tally::new();
    let mut m: Multicast<(i32,), i32> = Multicast::new();
    m += Delegate::function(double);
    m += Delegate::function(square);
    m += Delegate::method(&tally, Tally::add);

    let mut out = Vec::new();
    m.invoke_collect((5,), &mut out);
    assert_eq!(out, vec![10, 25, 5]);

    m.invoke_collect((1,), &mut out);
    assert_eq!(out, vec![10, 25, 5, 2, 1, 6]);
}

#[test]
fn empty_multicast_invokes_nothing() {
    let m: Multicast<(i32,), i32> = Multicast::default();
    assert!(m.is_empty());
    assert_eq!(m.invoke((1,)), 0);
    let mut out: Vec<i32> = Vec::new();
    m.invoke_collect((1,), &mut out);
    assert!(out.is_empty());
}

#[test]
fn unbound_handles_are_ignored() {
    let mut m: Multicast<(i32,), i32> = Multicast::new();
    assert!(!m.add(Delegate::null()));
    assert!(!m.add(Null.into()));
    assert!(m.is_empty());
    assert!(!m.remove(&Delegate::null()));
}

#[test]
fn remove_drops_the_most_recent_equal_binding() {
    let log = RefCell::new(Vec::new());
    let a = |_: ()| log.borrow_mut().push('a');
    let b = |_: ()| log.borrow_mut().push('b');
    let da: Delegate<((),)> = Delegate::closure(&a);
    let db: Delegate<((),)> = Delegate::closure(&b);

    let mut m: Multicast<((),)> = [da, db, da].into_iter().collect();
    assert_eq!(m.len(), 3);

    assert!(m.remove(&da));
    assert_eq!(m.as_slice(), &[da, db]);
    m.invoke(((),));
    assert_eq!(*log.borrow(), vec!['a', 'b']);

    m -= db;
    assert_eq!(m.as_slice(), &[da]);
    assert!(!m.remove(&db));
    assert_eq!(m.len(), 1);
}

#[test]
fn duplicates_follow_config() {
    let d: Delegate<(i32,), i32> = Delegate::function(double);

    let mut permissive: Multicast<(i32,), i32> = Multicast::new();
    assert!(permissive.config().allow_duplicates);
    assert!(permissive.add(d));
    assert!(permissive.add(d));
    assert_eq!(permissive.len(), 2);

    let mut unique: Multicast<(i32,), i32> = Multicast::with_config(MulticastConfig::unique());
    assert!(unique.add(d));
    assert!(!unique.add(d));
    assert!(unique.add(Delegate::function(square)));
    assert_eq!(unique.len(), 2);
}

#[test]
fn contains_and_clear() {
    let t1 = Tally::new();
    let t2 = Tally::new();
    let on1: Delegate<(i32,), i32> = Delegate::method(&t1, Tally::add);
    let on2: Delegate<(i32,), i32> = Delegate::method(&t2, Tally::add);

    let mut m: Multicast<(i32,), i32> = Multicast::new();
    m.extend([on1]);
    assert!(m.contains(&on1));
    assert!(!m.contains(&on2));

    m.clear();
    assert!(m.is_empty());
    assert!(!m.contains(&on1));
}

#[test]
fn single_binding_equals_its_delegate() {
    let d: Delegate<(i32,), i32> = Delegate::function(double);
    let other: Delegate<(i32,), i32> = Delegate::function(square);

    let mut m: Multicast<(i32,), i32> = Multicast::new();
    assert!(m != d);
    assert!(d != m);

    m += d;
    assert!(m == d);
    assert!(d == m);
    assert!(m != other);
    assert!(other != m);
    assert_eq!(m.single(), Some(&d));

    m += other;
    assert!(m != d);
    assert!(d != m);
    assert_eq!(m.single(), None);
}

#[test]
fn multicasts_compare_by_bindings_in_order() {
    let d1: Delegate<(i32,), i32> = Delegate::function(double);
    let d2: Delegate<(i32,), i32> = Delegate::function(square);

    let a: Multicast<(i32,), i32> = [d1, d2].into_iter().collect();
    let b: Multicast<(i32,), i32> = [d1, d2].into_iter().collect();
    let reversed: Multicast<(i32,), i32> = [d2, d1].into_iter().collect();

    assert_eq!(a, b);
    assert_ne!(a, reversed);
    assert_eq!(a.clone(), a);
}

#[test]
fn stays_inline_up_to_capacity() {
    let hits = Cell::new(0u32);
    let c0 = |_: ()| hits.set(hits.get() + 1);
    let c1 = |_: ()| hits.set(hits.get() + 10);
    let c2 = |_: ()| hits.set(hits.get() + 100);

    let mut m: Multicast<((),), (), 2> = Multicast::new();
    m += Delegate::closure(&c0);
    m += Delegate::closure(&c1);
    assert!(!m.spilled());

    m += Delegate::closure(&c2);
    assert!(m.spilled());
    assert_eq!(m.invoke(((),)), 3);
    assert_eq!(hits.get(), 111);
}

#[test]
fn iterates_bindings() {
    let d1: Delegate<(i32,), i32> = Delegate::function(double);
    let d2: Delegate<(i32,), i32> = Delegate::function(square);
    let m: Multicast<(i32,), i32> = [d1, d2].into_iter().collect();

    let results: Vec<i32> = m.iter().map(|d| d.call(3)).collect();
    assert_eq!(results, vec![6, 9]);

    let mut n = 0;
    for d in &m {
        assert!(d.is_bound());
        n += 1;
    }
    assert_eq!(n, 2);
}

#[test]
fn debug_lists_bindings() {
    let mut m: Multicast<(i32,), i32> = Multicast::new();
    m += Delegate::function(double);
    let text = format!("{m:?}");
    assert!(text.starts_with("Multicast"));
    assert!(text.contains("Delegate(Invocation"));
    assert!(text.contains("allow_duplicates: true"));
}

#![allow(dead_code)]

use std::cell::Cell;
use std::sync::atomic::{AtomicU32, Ordering};

pub const VALUE1: i32 = 1;
pub const VALUE2: i32 = 2;

thread_local! {
    static CALLED: Cell<bool> = const { Cell::new(false) };
    static PARAMS_OK: Cell<bool> = const { Cell::new(false) };
    static CALLS: Cell<u32> = const { Cell::new(0) };
    static LAST_ARGS: Cell<Option<(i32, i32)>> = const { Cell::new(None) };
}

pub fn reset() {
    CALLED.set(false);
    PARAMS_OK.set(false);
    CALLS.set(0);
    LAST_ARGS.set(None);
}

pub fn called() -> bool {
    CALLED.get()
}

pub fn params_ok() -> bool {
    PARAMS_OK.get()
}

pub fn calls() -> u32 {
    CALLS.get()
}

/// Arguments seen by the last two-argument free function call.
pub fn last_args() -> Option<(i32, i32)> {
    LAST_ARGS.get()
}

fn record(ok: bool) {
    CALLED.set(true);
    PARAMS_OK.set(ok);
    CALLS.set(CALLS.get() + 1);
}

#[derive(Debug)]
pub struct Data {
    pub d: i32,
}

pub fn free_void() {
    record(true);
}

pub fn free_int(i: i32, j: i32) {
    record(i == VALUE1 && j == VALUE2);
}

pub fn free_reference(data: &Data, j: i32) {
    record(data.d == VALUE1 && j == VALUE2);
}

pub fn free_add(i: i32, j: i32) -> i32 {
    LAST_ARGS.set(Some((i, j)));
    record(true);
    i.wrapping_add(j)
}

pub fn double(x: i32) -> i32 {
    x.wrapping_mul(2)
}

pub fn triple(x: i32) -> i32 {
    x.wrapping_mul(3)
}

/// Receiver with interior mutability, bindable through `&self` methods.
#[derive(Debug, Default)]
pub struct Probe {
    pub value: Cell<i32>,
    pub hits: Cell<u32>,
}

impl Probe {
    pub fn new(value: i32) -> Self {
        Self {
            value: Cell::new(value),
            hits: Cell::new(0),
        }
    }

    fn hit(&self) {
        self.hits.set(self.hits.get() + 1);
    }

    pub fn member_void(&self) {
        self.hit();
        record(true);
    }

    pub fn member_int(&self, i: i32, j: i32) {
        self.hit();
        record(i == VALUE1 && j == VALUE2);
    }

    pub fn member_reference(&self, data: &Data, j: i32) {
        self.hit();
        record(data.d == VALUE1 && j == VALUE2);
    }

    pub fn set(&self, v: i32) {
        self.hit();
        self.value.set(v);
    }

    pub fn get(&self) -> i32 {
        self.value.get()
    }
}

/// Receiver mutated through `&mut self`.
#[derive(Debug, Default)]
pub struct Counter {
    pub count: i32,
}

impl Counter {
    pub fn bump(&mut self, by: i32) -> i32 {
        self.count += by;
        self.count
    }

    pub fn get(&self) -> i32 {
        self.count
    }
}

/// `Sync` receiver usable from a `static`.
#[derive(Debug)]
pub struct Beacon {
    pings: AtomicU32,
}

impl Beacon {
    pub const fn new() -> Self {
        Self {
            pings: AtomicU32::new(0),
        }
    }

    pub fn ping(&self, by: u32) -> u32 {
        self.pings.fetch_add(by, Ordering::Relaxed) + by
    }

    pub fn pings(&self) -> u32 {
        self.pings.load(Ordering::Relaxed)
    }
}

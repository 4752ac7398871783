//! Property-based invariant tests for `ReactiveVec`.
//!
//! Random operation sequences are applied to a `ReactiveVec` wired to a
//! `RecordingBus` and to a plain `Vec` model side by side:
//!
//! 1. Contents always match the model.
//! 2. Each operation emits at most one event.
//! 3. An operation emits nothing exactly when it left the model unchanged
//!    (or, for `reserve`, when capacity did not move).
//! 4. The emitted event carries the model's before/after values.
//! 5. `capacity() >= len()` after every operation.
//! 6. Capacity never shrinks.

use proptest::prelude::*;
use rvec::{ReactiveVec, RecordingBus, VecEvent};

// ── Strategies ────────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
enum Op {
    Push(i16),
    PushWith(i16),
    Pop,
    Remove(usize),
    Clear,
    Reserve(usize),
    Resize(usize, i16),
    Update(usize, i16),
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        4 => any::<i16>().prop_map(Op::Push),
        1 => any::<i16>().prop_map(Op::PushWith),
        2 => Just(Op::Pop),
        2 => (0usize..32).prop_map(Op::Remove),
        1 => Just(Op::Clear),
        1 => (0usize..128).prop_map(Op::Reserve),
        1 => (0usize..48, any::<i16>()).prop_map(|(n, v)| Op::Resize(n, v)),
        2 => (0usize..40, any::<i16>()).prop_map(|(i, v)| Op::Update(i, v)),
    ]
}

fn ops_strategy(max_len: usize) -> impl Strategy<Value = Vec<Op>> {
    proptest::collection::vec(op_strategy(), 1..=max_len)
}

/// Apply `op` to both sides and return the event the model expects, if any.
fn apply(
    op: &Op,
    v: &mut ReactiveVec<i16, RecordingBus<VecEvent<i16>>>,
    model: &mut Vec<i16>,
) -> Option<VecEvent<i16>> {
    match *op {
        Op::Push(x) => {
            model.push(x);
            v.push(x);
            Some(VecEvent::Inserted {
                index: model.len() - 1,
                value: x,
            })
        }
        Op::PushWith(x) => {
            model.push(x);
            let slot = v.push_with(|| x);
            assert_eq!(*slot, x);
            Some(VecEvent::Inserted {
                index: model.len() - 1,
                value: x,
            })
        }
        Op::Pop => {
            let expected = model.pop();
            assert_eq!(v.pop(), expected);
            expected.map(|old_value| VecEvent::Erased {
                index: model.len(),
                old_value,
            })
        }
        Op::Remove(i) => {
            if i >= model.len() {
                return None;
            }
            let old_value = model.remove(i);
            assert_eq!(v.remove(i), old_value);
            Some(VecEvent::Erased { index: i, old_value })
        }
        Op::Clear => {
            let was_empty = model.is_empty();
            model.clear();
            v.clear();
            (!was_empty).then_some(VecEvent::Cleared)
        }
        Op::Reserve(n) => {
            let before = v.capacity();
            v.reserve(n);
            let after = v.capacity();
            assert!(after >= n);
            (after != before).then_some(VecEvent::Reserved {
                new_capacity: after,
            })
        }
        Op::Resize(n, fill) => {
            let old_size = model.len();
            model.resize(n, fill);
            v.resize(n, fill);
            (n != old_size).then_some(VecEvent::Resized {
                old_size,
                new_size: n,
            })
        }
        Op::Update(i, x) => {
            let expected = i < model.len();
            assert_eq!(v.update_if_exists(i, x), expected);
            if !expected {
                return None;
            }
            let old_value = std::mem::replace(&mut model[i], x);
            Some(VecEvent::Updated {
                index: i,
                old_value,
                new_value: x,
            })
        }
    }
}

// 1–5. Model agreement, one event per change, no event per no-op.

proptest! {
    #[test]
    fn events_match_model(ops in ops_strategy(80)) {
        let bus = RecordingBus::new();
        let mut v = ReactiveVec::with_bus(bus.clone());
        let mut model = Vec::new();

        for op in &ops {
            let expected = apply(op, &mut v, &mut model);
            let emitted = bus.take();

            prop_assert_eq!(v.as_slice(), model.as_slice(), "after {:?}", op);
            prop_assert!(v.capacity() >= v.len());
            prop_assert!(emitted.len() <= 1, "{:?} emitted {:?}", op, emitted);
            prop_assert_eq!(emitted.into_iter().next(), expected, "op {:?}", op);
        }
    }
}

// 6. Capacity never shrinks.

proptest! {
    #[test]
    fn capacity_is_monotonic(ops in ops_strategy(60)) {
        let bus = RecordingBus::new();
        let mut v = ReactiveVec::with_bus(bus.clone());
        let mut model = Vec::new();
        let mut last_capacity = v.capacity();

        for op in &ops {
            apply(op, &mut v, &mut model);
            prop_assert!(v.capacity() >= last_capacity, "{:?} shrank capacity", op);
            last_capacity = v.capacity();
        }
    }
}

// Reserved events always report the capacity observable right after.

proptest! {
    #[test]
    fn reserved_reports_current_capacity(requests in proptest::collection::vec(0usize..4096, 1..20)) {
        let bus = RecordingBus::<VecEvent<u8>>::new();
        let mut v = ReactiveVec::with_bus(bus.clone());

        for n in requests {
            let before = v.capacity();
            v.reserve(n);
            match bus.take().as_slice() {
                [] => prop_assert!(n <= before),
                [VecEvent::Reserved { new_capacity }] => {
                    prop_assert_eq!(*new_capacity, v.capacity());
                    prop_assert!(*new_capacity >= n);
                    prop_assert!(*new_capacity > before);
                }
                other => prop_assert!(false, "unexpected events {:?}", other),
            }
        }
    }
}

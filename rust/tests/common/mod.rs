// Not every test binary uses every helper.
#![allow(dead_code)]

use proptest::prelude::*;
use unrolled_list::{AllocPolicy, Cursor, UnrolledList};

pub(super) fn assert_eq_iters<I: Iterator, J: Iterator<Item = I::Item>>(mut i: I, mut j: J)
where
    I::Item: std::fmt::Debug + Eq,
{
    loop {
        match (i.next(), j.next()) {
            (None, None) => return,
            (a, b) => assert_eq!(a, b),
        }
    }
}

/// Cursor addressing the element at `index`, or the end cursor when
/// `index` equals the length.
pub(super) fn cursor_at<T, P: AllocPolicy>(list: &UnrolledList<T, P>, index: usize) -> Cursor {
    let mut cursor = list.cursor_front();
    for _ in 0..index {
        cursor = list.cursor_next(cursor);
    }
    cursor
}

/// One step of a list editing script. Positions are raw values reduced
/// modulo the live length when the step is applied.
#[derive(Clone, Debug)]
pub(super) enum Op {
    PushBack(u16),
    PushFront(u16),
    PopBack,
    PopFront,
    Insert(usize, u16),
    Remove(usize),
    InsertMany(usize, usize, u16),
    RemoveRange(usize, usize),
    Clear,
}

pub(super) fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        4 => (0u16..1000).prop_map(Op::PushBack),
        4 => (0u16..1000).prop_map(Op::PushFront),
        3 => Just(Op::PopBack),
        3 => Just(Op::PopFront),
        4 => (any::<usize>(), 0u16..1000).prop_map(|(at, v)| Op::Insert(at, v)),
        3 => any::<usize>().prop_map(Op::Remove),
        2 => (any::<usize>(), 0usize..10, 0u16..1000)
            .prop_map(|(at, n, v)| Op::InsertMany(at, n, v)),
        2 => (any::<usize>(), 0usize..10).prop_map(|(at, n)| Op::RemoveRange(at, n)),
        1 => Just(Op::Clear),
    ]
}

pub(super) fn op_scripts() -> impl Strategy<Value = Vec<Op>> {
    prop::collection::vec(op(), 0..80)
}

pub(super) fn capacities() -> impl Strategy<Value = usize> {
    2usize..=12
}

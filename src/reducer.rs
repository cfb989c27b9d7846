//! Binary-counter reduction: fold n elements with a binary operation using only
//! O(log n) live intermediate values.
//!
//! The slot vector mirrors the bit pattern of the number of elements added so far:
//! slot i, when occupied, holds the reduction of a block of 2^i consecutive input
//! elements. Adding ripples a carry upward exactly like binary increment. For an
//! associative (not necessarily commutative) operation the left operand always
//! aggregates elements that came earlier in the input than the right operand's,
//! which is what lets merge-based uses stay stable.

pub struct BinaryReducer<T> {
    slots: Vec<Option<T>>,
}

impl<T> BinaryReducer<T> {
    pub fn new() -> Self {
        Self { slots: Vec::new() }
    }

    pub fn with_capacity(slots: usize) -> Self {
        Self {
            slots: Vec::with_capacity(slots),
        }
    }

    /// Adds one element. The operation combines as `op(earlier, later)`; it is
    /// applied once per occupied slot the carry passes.
    pub fn add<F>(&mut self, x: T, mut op: F)
    where
        F: FnMut(T, T) -> T,
    {
        let mut carry = x;
        for slot in &mut self.slots {
            match slot.take() {
                None => {
                    *slot = Some(carry);
                    return;
                }
                // The slot's block precedes everything the carry aggregates.
                Some(value) => carry = op(value, carry),
            }
        }
        self.slots.push(Some(carry));
    }

    /// Folds the occupied slots into the reduction of everything added, `None` if
    /// nothing was. Applies `op` at most (number of slots - 1) times; across n adds
    /// and the final reduce, `op` runs exactly n - 1 times in total.
    pub fn reduce<F>(self, mut op: F) -> Option<T>
    where
        F: FnMut(T, T) -> T,
    {
        let mut acc: Option<T> = None;
        for slot in self.slots {
            if let Some(value) = slot {
                // Higher slots hold earlier blocks, so the slot goes on the left.
                acc = Some(match acc {
                    None => value,
                    Some(acc) => op(value, acc),
                });
            }
        }
        acc
    }
}

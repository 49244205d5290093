//! # TraversalRing: cyclic projection traversals
//!
//! A ring hands out its sub-traversals in order, wrapping around at the end.
//! Steps that accept several `by()` modulators use it to pick the projection
//! for each element they process. An empty ring stands for the identity
//! projection.

use crate::error::{TraversalError, TraversalResult};
use crate::traversal::Traversal;
use crate::value::Value;

#[derive(Debug, Clone, Default)]
pub struct TraversalRing {
    traversals: Vec<Traversal>,
    current: usize,
}

impl TraversalRing {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, traversal: Traversal) {
        self.traversals.push(traversal);
    }

    /// Replace the traversal at `index`; out-of-range indexes fail.
    pub fn set(&mut self, index: usize, traversal: Traversal) -> TraversalResult<()> {
        let len = self.traversals.len();
        let slot = self
            .traversals
            .get_mut(index)
            .ok_or(TraversalError::StepIndex { index, len })?;
        *slot = traversal;
        Ok(())
    }

    /// The traversal at the cursor, advancing it. `None` means identity.
    pub fn next(&mut self) -> Option<&mut Traversal> {
        if self.traversals.is_empty() {
            return None;
        }
        let index = self.current;
        self.current = (self.current + 1) % self.traversals.len();
        self.traversals.get_mut(index)
    }

    /// Rewind the cursor. Sub-traversals are left as they are.
    pub fn reset(&mut self) {
        self.current = 0;
    }

    pub fn cursor(&self) -> usize {
        self.current
    }

    pub fn is_empty(&self) -> bool {
        self.traversals.is_empty()
    }

    pub fn len(&self) -> usize {
        self.traversals.len()
    }

    pub fn traversals(&self) -> &[Traversal] {
        &self.traversals
    }

    pub fn traversals_mut(&mut self) -> &mut [Traversal] {
        &mut self.traversals
    }
}

/// Run `value` through `traversal` and return its first result.
///
/// `Null` values and a missing traversal pass through unchanged. A traversal
/// that yields nothing for the value is an error.
pub fn apply_nullable(value: &Value, traversal: Option<&mut Traversal>) -> TraversalResult<Value> {
    let Some(traversal) = traversal else {
        return Ok(value.clone());
    };
    if value.is_null() {
        return Ok(Value::Null);
    }
    traversal.reset();
    traversal.inject([value.clone()])?;
    match traversal.next() {
        Err(TraversalError::NoSuchElement) => Err(TraversalError::EmptyProjection(value.clone())),
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_steps::{AddOne, KeepIf, Start};

    fn add(n: usize) -> Traversal {
        let mut t = Traversal::new();
        t.add_step(Start::default()).unwrap();
        for _ in 0..n {
            t.add_step(AddOne::default()).unwrap();
        }
        t
    }

    #[test]
    fn test_cursor_cycles() {
        let mut ring = TraversalRing::new();
        ring.add(add(0));
        ring.add(add(1));
        let ids: Vec<_> = ring.traversals().iter().map(|t| t.id()).collect();

        let picked: Vec<_> = (0..3).filter_map(|_| ring.next().map(|t| t.id())).collect();
        assert_eq!(picked, vec![ids[0], ids[1], ids[0]]);

        ring.reset();
        assert_eq!(ring.cursor(), 0);
        assert_eq!(ring.next().map(|t| t.id()), Some(ids[0]));
    }

    #[test]
    fn test_empty_ring_is_identity() {
        let mut ring = TraversalRing::new();
        assert!(ring.next().is_none());
        assert_eq!(apply_nullable(&Value::from(4), ring.next()).unwrap(), Value::from(4));
    }

    #[test]
    fn test_clone_keeps_cursor() {
        let mut ring = TraversalRing::new();
        ring.add(add(0));
        ring.add(add(1));
        ring.next();
        let copy = ring.clone();
        assert_eq!(copy.cursor(), 1);
        assert_eq!(copy.len(), 2);
    }

    #[test]
    fn test_clone_owns_its_children() {
        let mut ring = TraversalRing::new();
        ring.add(add(1));
        let mut copy = ring.clone();
        copy.traversals_mut()[0].add_step(AddOne::default()).unwrap();

        assert_eq!(ring.traversals()[0].len(), 2);
        assert_eq!(apply_nullable(&Value::from(1), ring.next()).unwrap(), Value::from(2));
        assert_eq!(apply_nullable(&Value::from(1), copy.next()).unwrap(), Value::from(3));
    }

    #[test]
    fn test_set_out_of_range() {
        let mut ring = TraversalRing::new();
        assert!(matches!(
            ring.set(0, add(0)),
            Err(TraversalError::StepIndex { index: 0, len: 0 })
        ));
        ring.add(add(0));
        ring.set(0, add(2)).unwrap();
        assert_eq!(ring.traversals()[0].len(), 3);
    }

    #[test]
    fn test_apply_nullable() {
        let mut plus_two = add(2);
        assert_eq!(
            apply_nullable(&Value::from(1), Some(&mut plus_two)).unwrap(),
            Value::from(3)
        );
        // the previous run leaves nothing behind
        assert_eq!(
            apply_nullable(&Value::from(10), Some(&mut plus_two)).unwrap(),
            Value::from(12)
        );
        assert_eq!(apply_nullable(&Value::Null, Some(&mut plus_two)).unwrap(), Value::Null);
    }

    #[test]
    fn test_apply_nullable_empty_projection() {
        let mut nothing = Traversal::new();
        nothing.add_step(KeepIf::new(|_| false)).unwrap();
        let err = apply_nullable(&Value::from(1), Some(&mut nothing)).unwrap_err();
        assert!(matches!(err, TraversalError::EmptyProjection(v) if v == Value::from(1)));
    }
}

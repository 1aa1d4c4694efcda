//! Random-access views over accessor buffers.
//!
//! Every view implements [`Accessor`] (length, `get` and the shared
//! sequence algorithms) and, when its storage is writable, [`AccessorMut`].
//! Lengths are fixed by the file format: structural mutation always fails
//! with [`Error::UnsupportedOperation`].
//!
//! Views hold no locks. Reading one view from several threads is fine;
//! writing needs `&mut`, which rules out a `set` racing an iteration.

mod accessor;
mod dense;
mod index;
mod sparse;

pub use accessor::*;
pub use dense::*;
pub use index::*;
pub use sparse::*;

use std::fmt;
use std::iter::FusedIterator;

use crate::util::{Error, Result};

#[inline]
pub(crate) fn check_index(index: usize, len: usize) -> Result<()> {
    if index < len {
        Ok(())
    } else {
        Err(Error::out_of_range(index, len))
    }
}

// ============================================================================
// Read Contract
// ============================================================================

/// Read interface shared by dense, sparse and index views.
pub trait Accessor {
    /// Decoded value of one position.
    type Item: Copy + PartialEq + fmt::Debug;

    /// Logical number of elements. Never changes.
    fn len(&self) -> usize;

    /// Decode the element at `index`.
    fn get(&self, index: usize) -> Result<Self::Item>;

    #[inline]
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Lazy front-to-back iteration. Each call starts again at position 0.
    fn iter(&self) -> Iter<'_, Self>
    where
        Self: Sized,
    {
        Iter::new(self)
    }

    /// Position of the first element equal to `value`.
    fn find(&self, value: &Self::Item) -> Option<usize> {
        Iter::new(self).position(|v| v == *value)
    }

    fn contains(&self, value: &Self::Item) -> bool {
        self.find(value).is_some()
    }

    /// Decode every element into `dest[offset..offset + len]`.
    fn copy_to(&self, dest: &mut [Self::Item], offset: usize) -> Result<()> {
        let available = dest.len();
        let needed = offset.saturating_add(self.len());
        if needed > available {
            return Err(Error::DestinationTooSmall { needed, available });
        }
        for (i, slot) in dest[offset..needed].iter_mut().enumerate() {
            *slot = self.get(i)?;
        }
        Ok(())
    }

    /// Decode every element into a new vector.
    fn to_vec(&self) -> Vec<Self::Item> {
        Iter::new(self).collect()
    }
}

// ============================================================================
// Write Contract
// ============================================================================

/// Value-level writes on views with mutable storage.
///
/// Only `set` is supported. The structural operations exist so callers get
/// an explicit error instead of a silently resized accessor.
pub trait AccessorMut: Accessor {
    /// Encode `value` into position `index`.
    fn set(&mut self, index: usize, value: Self::Item) -> Result<()>;

    fn insert(&mut self, _index: usize, _value: Self::Item) -> Result<()> {
        Err(Error::UnsupportedOperation("insert"))
    }

    fn remove(&mut self, _index: usize) -> Result<Self::Item> {
        Err(Error::UnsupportedOperation("remove"))
    }

    fn push(&mut self, _value: Self::Item) -> Result<()> {
        Err(Error::UnsupportedOperation("push"))
    }

    fn clear(&mut self) -> Result<()> {
        Err(Error::UnsupportedOperation("clear"))
    }
}

// ============================================================================
// Iteration
// ============================================================================

/// Iterator over an [`Accessor`], decoding on demand.
///
/// Relies on `get` succeeding for every index below `len`, which all views
/// in this crate guarantee from their constructors. An accessor that breaks
/// that contract ends the iteration at the first failing index, and the
/// remaining length drops to zero with it.
pub struct Iter<'a, A: Accessor + ?Sized> {
    view: &'a A,
    front: usize,
    back: usize,
}

impl<'a, A: Accessor + ?Sized> Iter<'a, A> {
    pub fn new(view: &'a A) -> Self {
        Self {
            view,
            front: 0,
            back: view.len(),
        }
    }
}

impl<A: Accessor + ?Sized> Clone for Iter<'_, A> {
    fn clone(&self) -> Self {
        Self {
            view: self.view,
            front: self.front,
            back: self.back,
        }
    }
}

impl<A: Accessor + ?Sized> Iterator for Iter<'_, A> {
    type Item = A::Item;

    fn next(&mut self) -> Option<A::Item> {
        if self.front >= self.back {
            return None;
        }
        match self.view.get(self.front) {
            Ok(value) => {
                self.front += 1;
                Some(value)
            }
            Err(_) => {
                self.back = self.front;
                None
            }
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.back - self.front;
        (n, Some(n))
    }
}

impl<A: Accessor + ?Sized> DoubleEndedIterator for Iter<'_, A> {
    fn next_back(&mut self) -> Option<A::Item> {
        if self.front >= self.back {
            return None;
        }
        match self.view.get(self.back - 1) {
            Ok(value) => {
                self.back -= 1;
                Some(value)
            }
            Err(_) => {
                self.front = self.back;
                None
            }
        }
    }
}

impl<A: Accessor + ?Sized> ExactSizeIterator for Iter<'_, A> {}

impl<A: Accessor + ?Sized> FusedIterator for Iter<'_, A> {}

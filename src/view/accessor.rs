//! AccessorView - one type for dense and sparse accessors.

use super::{Accessor, AccessorMut, DenseView, Iter, SparseView};
use crate::util::{Element, Result};

/// A resolved accessor, dense or sparse.
///
/// The variant is picked once when the accessor is resolved. Callers use the
/// [`Accessor`] / [`AccessorMut`] contract without caring which one they hold.
///
/// `B` backs dense data and sparse overrides; `Bb` backs the sparse base,
/// which is never written and so never needs to be mutable.
#[derive(Clone, Debug)]
pub enum AccessorView<B, T, Bb = B> {
    Dense(DenseView<B, T>),
    Sparse(SparseView<Bb, B, T>),
}

impl<B, T, Bb> AccessorView<B, T, Bb> {
    #[inline]
    pub fn is_sparse(&self) -> bool {
        matches!(self, Self::Sparse(_))
    }

    pub fn as_dense(&self) -> Option<&DenseView<B, T>> {
        match self {
            Self::Dense(view) => Some(view),
            Self::Sparse(_) => None,
        }
    }

    pub fn as_sparse(&self) -> Option<&SparseView<Bb, B, T>> {
        match self {
            Self::Dense(_) => None,
            Self::Sparse(view) => Some(view),
        }
    }
}

impl<B: AsRef<[u8]>, T: Element, Bb: AsRef<[u8]>> Accessor for AccessorView<B, T, Bb> {
    type Item = T;

    #[inline]
    fn len(&self) -> usize {
        match self {
            Self::Dense(view) => view.len(),
            Self::Sparse(view) => view.len(),
        }
    }

    #[inline]
    fn get(&self, index: usize) -> Result<T> {
        match self {
            Self::Dense(view) => view.get(index),
            Self::Sparse(view) => view.get(index),
        }
    }
}

impl<B, T, Bb> AccessorMut for AccessorView<B, T, Bb>
where
    B: AsRef<[u8]> + AsMut<[u8]>,
    T: Element,
    Bb: AsRef<[u8]>,
{
    #[inline]
    fn set(&mut self, index: usize, value: T) -> Result<()> {
        match self {
            Self::Dense(view) => view.set(index, value),
            Self::Sparse(view) => view.set(index, value),
        }
    }
}

impl<B, T, Bb> From<DenseView<B, T>> for AccessorView<B, T, Bb> {
    fn from(view: DenseView<B, T>) -> Self {
        Self::Dense(view)
    }
}

impl<B, T, Bb> From<SparseView<Bb, B, T>> for AccessorView<B, T, Bb> {
    fn from(view: SparseView<Bb, B, T>) -> Self {
        Self::Sparse(view)
    }
}

impl<'a, B: AsRef<[u8]>, T: Element, Bb: AsRef<[u8]>> IntoIterator for &'a AccessorView<B, T, Bb> {
    type Item = T;
    type IntoIter = Iter<'a, AccessorView<B, T, Bb>>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

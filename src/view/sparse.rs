//! Sparse overlay views - a dense base with a short list of overrides.
//!
//! A sparse accessor stores `N` logical elements as a base array (or
//! implicit zeros) plus `M <= N` replacement values and the base positions
//! they replace. Reads prefer the override; writes only reach overrides.

use super::{check_index, Accessor, AccessorMut, DenseView, Iter};
use crate::util::{Element, Error, Result};

/// Base array underneath the overrides.
#[derive(Clone, Debug)]
enum Base<B, T> {
    Dense(DenseView<B, T>),
    /// No base buffer: every non-overridden position decodes as zero.
    Zeros { len: usize, zero: T },
}

/// Logical array of `N` elements built from a base and `M` overrides.
///
/// The position-to-slot table is built once at construction, sorted by
/// position and never modified afterwards.
#[derive(Clone, Debug)]
pub struct SparseView<Bb, Bt, T> {
    base: Base<Bb, T>,
    top: DenseView<Bt, T>,
    /// `(base position, top slot)`, sorted by position, positions unique
    slots: Box<[(usize, usize)]>,
}

impl<Bb: AsRef<[u8]>, Bt: AsRef<[u8]>, T: Element> SparseView<Bb, Bt, T> {
    /// Overlay `top` onto `bottom`.
    ///
    /// `indices[k]` is the bottom position replaced by `top[k]`. Fails with
    /// [`Error::Format`] if `top` is longer than `bottom`, if `indices` and
    /// `top` differ in length, or if a position is out of range or repeated.
    pub fn new<I>(bottom: DenseView<Bb, T>, top: DenseView<Bt, T>, indices: &I) -> Result<Self>
    where
        I: Accessor<Item = u32> + ?Sized,
    {
        let slots = build_slots(bottom.len(), top.len(), indices)?;
        Ok(Self {
            base: Base::Dense(bottom),
            top,
            slots,
        })
    }

    /// Overlay `top` onto `len` implicit zero elements.
    pub fn over_zeros<I>(len: usize, top: DenseView<Bt, T>, indices: &I) -> Result<Self>
    where
        I: Accessor<Item = u32> + ?Sized,
    {
        let slots = build_slots(len, top.len(), indices)?;
        let zero = T::from_scalars(&vec![T::Scalar::default(); T::COMPONENTS]);
        Ok(Self {
            base: Base::Zeros { len, zero },
            top,
            slots,
        })
    }

    /// The base view, or `None` when the base is implicit zeros.
    pub fn bottom(&self) -> Option<&DenseView<Bb, T>> {
        match &self.base {
            Base::Dense(view) => Some(view),
            Base::Zeros { .. } => None,
        }
    }

    /// The override values, in slot order.
    pub fn top(&self) -> &DenseView<Bt, T> {
        &self.top
    }

    pub fn override_count(&self) -> usize {
        self.slots.len()
    }

    #[inline]
    pub fn is_overridden(&self, index: usize) -> bool {
        self.slot_of(index).is_some()
    }

    /// `(position, slot)` pairs in ascending position order.
    pub fn overrides(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.slots.iter().copied()
    }

    #[inline]
    fn slot_of(&self, index: usize) -> Option<usize> {
        self.slots
            .binary_search_by_key(&index, |&(position, _)| position)
            .ok()
            .map(|k| self.slots[k].1)
    }
}

fn build_slots<I>(len: usize, top_len: usize, indices: &I) -> Result<Box<[(usize, usize)]>>
where
    I: Accessor<Item = u32> + ?Sized,
{
    if top_len > len {
        return Err(Error::format(format!(
            "{} sparse values exceed accessor length {}",
            top_len, len
        )));
    }
    if indices.len() != top_len {
        return Err(Error::format(format!(
            "{} sparse indices for {} sparse values",
            indices.len(),
            top_len
        )));
    }

    let mut slots = Vec::with_capacity(top_len);
    for slot in 0..top_len {
        let position = indices.get(slot)? as usize;
        if position >= len {
            return Err(Error::format(format!(
                "sparse index {} at slot {} is outside accessor length {}",
                position, slot, len
            )));
        }
        slots.push((position, slot));
    }

    slots.sort_unstable_by_key(|&(position, _)| position);
    if let Some(pair) = slots.windows(2).find(|pair| pair[0].0 == pair[1].0) {
        return Err(Error::format(format!(
            "sparse index {} is overridden by slots {} and {}",
            pair[0].0, pair[0].1, pair[1].1
        )));
    }

    tracing::debug!(len, overrides = top_len, "sparse override table");
    Ok(slots.into_boxed_slice())
}

impl<Bb: AsRef<[u8]>, Bt: AsRef<[u8]>, T: Element> Accessor for SparseView<Bb, Bt, T> {
    type Item = T;

    #[inline]
    fn len(&self) -> usize {
        match &self.base {
            Base::Dense(view) => view.len(),
            Base::Zeros { len, .. } => *len,
        }
    }

    fn get(&self, index: usize) -> Result<T> {
        check_index(index, self.len())?;
        if let Some(slot) = self.slot_of(index) {
            return self.top.get(slot);
        }
        match &self.base {
            Base::Dense(view) => view.get(index),
            Base::Zeros { zero, .. } => Ok(*zero),
        }
    }
}

impl<Bb, Bt, T> AccessorMut for SparseView<Bb, Bt, T>
where
    Bb: AsRef<[u8]>,
    Bt: AsRef<[u8]> + AsMut<[u8]>,
    T: Element,
{
    /// Write through to the override value of `index`.
    ///
    /// Positions without an override read from the base, which is not
    /// writable through this view: setting them succeeds and changes nothing.
    fn set(&mut self, index: usize, value: T) -> Result<()> {
        check_index(index, self.len())?;
        match self.slot_of(index) {
            Some(slot) => self.top.set(slot, value),
            None => Ok(()),
        }
    }
}

impl<'a, Bb: AsRef<[u8]>, Bt: AsRef<[u8]>, T: Element> IntoIterator for &'a SparseView<Bb, Bt, T> {
    type Item = T;
    type IntoIter = Iter<'a, SparseView<Bb, Bt, T>>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

//! Typed dense views - strided, optionally normalized element arrays.

use std::marker::PhantomData;

use bytemuck::Pod;
use smallvec::{smallvec, SmallVec};

use super::{check_index, Accessor, AccessorMut, Iter};
use crate::util::{Element, ElementLayout, Error, Result, Scalar};

/// Scratch space for one element's components (up to a 4x4 matrix).
type Components<S> = SmallVec<[S; 16]>;

/// Elements of type `T` decoded in place from a byte buffer.
///
/// Element `i` starts at `layout.byte_offset + i * stride`. The view never
/// copies the buffer; `B` is usually `&[u8]` (read-only) or `&mut [u8]`.
#[derive(Clone, Copy, Debug)]
pub struct DenseView<B, T> {
    buffer: B,
    layout: ElementLayout,
    len: usize,
    _marker: PhantomData<fn() -> T>,
}

impl<B: AsRef<[u8]>, T: Element> DenseView<B, T> {
    /// Create a view of `len` elements.
    ///
    /// Fails with [`Error::Format`] when the layout is inconsistent, does not
    /// match `T`, or addresses bytes beyond the end of `buffer`.
    pub fn new(buffer: B, layout: ElementLayout, len: usize) -> Result<Self> {
        layout.validate()?;

        if T::COMPONENTS != layout.component_count() {
            return Err(Error::format(format!(
                "element has {} components, layout declares {} ({})",
                T::COMPONENTS,
                layout.component_count(),
                layout.accessor_type
            )));
        }
        if let Some(shape) = T::SHAPE {
            if shape != layout.accessor_type {
                return Err(Error::format(format!(
                    "{} element cannot view {} data",
                    shape, layout.accessor_type
                )));
            }
        }
        if layout.normalized && !T::Scalar::IS_FLOAT {
            return Err(Error::format("normalized data requires a floating-point element"));
        }
        if !T::Scalar::can_hold(layout.component_type) {
            return Err(Error::format(format!(
                "{} components do not fit the element scalar",
                layout.component_type
            )));
        }

        let required = layout
            .required_bytes(len)
            .ok_or_else(|| Error::format(format!("{} elements overflow the address space", len)))?;
        let available = buffer.as_ref().len();
        if available < required {
            return Err(Error::format(format!(
                "buffer holds {} bytes, {} elements of {} {} need {}",
                available, len, layout.accessor_type, layout.component_type, required
            )));
        }

        tracing::trace!(
            len,
            stride = layout.effective_stride(),
            offset = layout.byte_offset,
            normalized = layout.normalized,
            "dense view"
        );

        Ok(Self {
            buffer,
            layout,
            len,
            _marker: PhantomData,
        })
    }

    #[inline]
    pub fn layout(&self) -> &ElementLayout {
        &self.layout
    }

    /// Byte distance between consecutive elements.
    #[inline]
    pub fn stride(&self) -> usize {
        self.layout.effective_stride()
    }

    /// Buffer offset of element `index`. Does not bounds-check.
    #[inline]
    pub fn element_offset(&self, index: usize) -> usize {
        self.layout.byte_offset + index * self.layout.effective_stride()
    }

    #[inline]
    fn decode(&self, index: usize) -> T {
        let ty = self.layout.component_type;
        let start = self.element_offset(index);
        let bytes = &self.buffer.as_ref()[start..start + self.layout.element_size()];

        let mut scalars: Components<T::Scalar> = SmallVec::with_capacity(T::COMPONENTS);
        for c in 0..T::COMPONENTS {
            let raw = ty.read(&bytes[self.layout.component_offset(c)..]);
            scalars.push(if self.layout.normalized {
                T::Scalar::normalize(raw, ty)
            } else {
                T::Scalar::from_f64(raw)
            });
        }
        T::from_scalars(&scalars)
    }
}

impl<B: AsRef<[u8]>, T: Element + Pod> DenseView<B, T> {
    /// Borrow the elements as `&[T]` without decoding.
    ///
    /// Only possible when the bytes are exactly `T`'s in-memory layout:
    /// tightly packed, unnormalized, unpadded, matching scalar encoding,
    /// little-endian host and suitably aligned data. Returns `None` otherwise.
    pub fn as_slice(&self) -> Option<&[T]> {
        let l = &self.layout;
        let size = std::mem::size_of::<T>();
        if self.len == 0 {
            return Some(&[]);
        }
        if !cfg!(target_endian = "little")
            || T::Scalar::NATIVE != Some(l.component_type)
            || l.normalized
            || l.is_padded()
            || l.element_size() != size
            || l.effective_stride() != size
        {
            return None;
        }
        let start = l.byte_offset;
        let bytes = &self.buffer.as_ref()[start..start + self.len * size];
        bytemuck::try_cast_slice(bytes).ok()
    }
}

impl<B: AsRef<[u8]>, T: Element> Accessor for DenseView<B, T> {
    type Item = T;

    #[inline]
    fn len(&self) -> usize {
        self.len
    }

    #[inline]
    fn get(&self, index: usize) -> Result<T> {
        check_index(index, self.len)?;
        Ok(self.decode(index))
    }
}

impl<B: AsRef<[u8]> + AsMut<[u8]>, T: Element> AccessorMut for DenseView<B, T> {
    /// Encode `value` over element `index`.
    ///
    /// All components are encoded before any byte is written, so a
    /// [`Error::Range`] leaves the element unchanged. Bytes outside the
    /// element's components (padding, interleaved attributes) are untouched.
    fn set(&mut self, index: usize, value: T) -> Result<()> {
        check_index(index, self.len)?;
        let ty = self.layout.component_type;

        let mut scalars: Components<T::Scalar> = smallvec![T::Scalar::default(); T::COMPONENTS];
        value.write_scalars(&mut scalars);

        let mut encoded: Components<f64> = SmallVec::with_capacity(T::COMPONENTS);
        for s in &scalars {
            let raw = if self.layout.normalized {
                s.denormalize(ty)
            } else {
                s.to_f64()
            };
            encoded.push(ty.check_integer(raw)?);
        }

        let start = self.element_offset(index);
        let end = start + self.layout.element_size();
        let layout = self.layout;
        let bytes = &mut self.buffer.as_mut()[start..end];
        for (c, raw) in encoded.into_iter().enumerate() {
            ty.write(&mut bytes[layout.component_offset(c)..], raw);
        }
        Ok(())
    }
}

impl<'a, B: AsRef<[u8]>, T: Element> IntoIterator for &'a DenseView<B, T> {
    type Item = T;
    type IntoIter = Iter<'a, DenseView<B, T>>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

//! ElementLayout - where and how one element is stored in a buffer.

use super::{AccessorType, ComponentType, Error, Result};

/// Byte layout of the elements of a dense accessor.
///
/// Describes component encoding, element shape, the offset of element 0
/// and the distance between consecutive elements. A `byte_stride` of 0
/// means tightly packed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ElementLayout {
    /// Storage encoding of every component
    pub component_type: ComponentType,
    /// Element shape (scalar, vector or matrix)
    pub accessor_type: AccessorType,
    /// Offset of element 0 within the buffer slice
    pub byte_offset: usize,
    /// Distance between consecutive elements; 0 for tightly packed
    pub byte_stride: usize,
    /// Integer components map to `[0, 1]` / `[-1, 1]`
    pub normalized: bool,
}

impl ElementLayout {
    /// Tightly packed layout starting at byte 0.
    #[inline]
    pub const fn new(component_type: ComponentType, accessor_type: AccessorType) -> Self {
        Self {
            component_type,
            accessor_type,
            byte_offset: 0,
            byte_stride: 0,
            normalized: false,
        }
    }

    #[inline]
    pub const fn with_offset(mut self, byte_offset: usize) -> Self {
        self.byte_offset = byte_offset;
        self
    }

    #[inline]
    pub const fn with_stride(mut self, byte_stride: usize) -> Self {
        self.byte_stride = byte_stride;
        self
    }

    #[inline]
    pub const fn with_normalized(mut self, normalized: bool) -> Self {
        self.normalized = normalized;
        self
    }

    /// Number of components per element.
    #[inline]
    pub const fn component_count(&self) -> usize {
        self.accessor_type.component_count()
    }

    /// Bytes between the starts of two matrix columns.
    ///
    /// Matrix columns start on 4-byte boundaries, which pads MAT2 of 1-byte
    /// components and MAT3 of 1- or 2-byte components. Vectors and scalars
    /// are a single unpadded column.
    #[inline]
    pub const fn column_stride(&self) -> usize {
        let column = self.accessor_type.rows() * self.component_type.num_bytes();
        if self.accessor_type.is_matrix() {
            (column + 3) & !3
        } else {
            column
        }
    }

    /// Tightly packed size of one element, column padding included.
    #[inline]
    pub const fn element_size(&self) -> usize {
        self.accessor_type.columns() * self.column_stride()
    }

    /// Returns true if matrix columns carry padding bytes.
    #[inline]
    pub const fn is_padded(&self) -> bool {
        self.element_size() != self.component_count() * self.component_type.num_bytes()
    }

    /// Byte distance between consecutive elements.
    #[inline]
    pub const fn effective_stride(&self) -> usize {
        if self.byte_stride == 0 {
            self.element_size()
        } else {
            self.byte_stride
        }
    }

    /// Offset of component `c` relative to the start of its element.
    #[inline]
    pub const fn component_offset(&self, c: usize) -> usize {
        let rows = self.accessor_type.rows();
        (c / rows) * self.column_stride() + (c % rows) * self.component_type.num_bytes()
    }

    /// Number of bytes a slice must hold for `count` elements, or `None` on overflow.
    pub fn required_bytes(&self, count: usize) -> Option<usize> {
        if count == 0 {
            return Some(0);
        }
        (count - 1)
            .checked_mul(self.effective_stride())?
            .checked_add(self.element_size())?
            .checked_add(self.byte_offset)
    }

    /// Check the layout for internal consistency.
    pub fn validate(&self) -> Result<()> {
        if self.byte_stride != 0 && self.byte_stride < self.element_size() {
            return Err(Error::format(format!(
                "byte stride {} is smaller than element size {} ({} {})",
                self.byte_stride,
                self.element_size(),
                self.accessor_type,
                self.component_type
            )));
        }
        if self.normalized && !self.component_type.can_normalize() {
            return Err(Error::format(format!(
                "{} components cannot be normalized",
                self.component_type
            )));
        }
        Ok(())
    }
}

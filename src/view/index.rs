//! Integer index views - vertex indices and sparse override positions.

use byteorder::{ByteOrder, LittleEndian};

use super::{check_index, Accessor, AccessorMut, Iter};
use crate::util::{ComponentType, Error, Result};

/// Storage width of an index buffer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum IndexWidth {
    U8,
    U16,
    U32,
}

impl IndexWidth {
    /// Size in bytes of one stored index.
    #[inline]
    pub const fn byte_size(self) -> usize {
        match self {
            Self::U8 => 1,
            Self::U16 => 2,
            Self::U32 => 4,
        }
    }

    /// Largest storable index.
    #[inline]
    pub const fn max_value(self) -> u32 {
        match self {
            Self::U8 => u8::MAX as u32,
            Self::U16 => u16::MAX as u32,
            Self::U32 => u32::MAX,
        }
    }

    #[inline]
    pub const fn component_type(self) -> ComponentType {
        match self {
            Self::U8 => ComponentType::Uint8,
            Self::U16 => ComponentType::Uint16,
            Self::U32 => ComponentType::Uint32,
        }
    }

    /// Width from a byte size of 1, 2 or 4.
    pub fn from_byte_size(size: usize) -> Result<Self> {
        match size {
            1 => Ok(Self::U8),
            2 => Ok(Self::U16),
            4 => Ok(Self::U32),
            _ => Err(Error::format(format!("unsupported index width of {} bytes", size))),
        }
    }
}

impl TryFrom<ComponentType> for IndexWidth {
    type Error = Error;

    fn try_from(ty: ComponentType) -> Result<Self> {
        match ty {
            ComponentType::Uint8 => Ok(Self::U8),
            ComponentType::Uint16 => Ok(Self::U16),
            ComponentType::Uint32 => Ok(Self::U32),
            other => Err(Error::format(format!("{} cannot store indices", other))),
        }
    }
}

/// Tightly packed little-endian unsigned integers read as `u32`.
#[derive(Clone, Copy, Debug)]
pub struct IndexView<B> {
    buffer: B,
    width: IndexWidth,
    len: usize,
}

impl<B: AsRef<[u8]>> IndexView<B> {
    /// Wrap `buffer`, which must hold at least `len` indices of `width`.
    pub fn new(buffer: B, width: IndexWidth, len: usize) -> Result<Self> {
        let required = len
            .checked_mul(width.byte_size())
            .ok_or_else(|| Error::format(format!("index count {} overflows", len)))?;
        let available = buffer.as_ref().len();
        if available < required {
            return Err(Error::format(format!(
                "index buffer holds {} bytes, {} x {:?} needs {}",
                available, len, width, required
            )));
        }
        Ok(Self { buffer, width, len })
    }

    #[inline]
    pub fn width(&self) -> IndexWidth {
        self.width
    }

    #[inline]
    fn read(&self, index: usize) -> u32 {
        let bytes = &self.buffer.as_ref()[index * self.width.byte_size()..];
        match self.width {
            IndexWidth::U8 => bytes[0] as u32,
            IndexWidth::U16 => LittleEndian::read_u16(bytes) as u32,
            IndexWidth::U32 => LittleEndian::read_u32(bytes),
        }
    }
}

impl<B: AsRef<[u8]>> Accessor for IndexView<B> {
    type Item = u32;

    #[inline]
    fn len(&self) -> usize {
        self.len
    }

    #[inline]
    fn get(&self, index: usize) -> Result<u32> {
        check_index(index, self.len)?;
        Ok(self.read(index))
    }
}

impl<B: AsRef<[u8]> + AsMut<[u8]>> AccessorMut for IndexView<B> {
    /// Store `value`; fails without writing if the width cannot hold it.
    fn set(&mut self, index: usize, value: u32) -> Result<()> {
        check_index(index, self.len)?;
        let max = self.width.max_value();
        if value > max {
            return Err(Error::Range {
                value: value as f64,
                max: max as f64,
            });
        }
        let start = index * self.width.byte_size();
        let bytes = &mut self.buffer.as_mut()[start..];
        match self.width {
            IndexWidth::U8 => bytes[0] = value as u8,
            IndexWidth::U16 => LittleEndian::write_u16(bytes, value as u16),
            IndexWidth::U32 => LittleEndian::write_u32(bytes, value),
        }
        Ok(())
    }
}

impl<'a, B: AsRef<[u8]>> IntoIterator for &'a IndexView<B> {
    type Item = u32;
    type IntoIter = Iter<'a, IndexView<B>>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

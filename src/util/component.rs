//! Component encodings - the fixed-width storage types of accessor data.

use byteorder::{ByteOrder, LittleEndian};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::{Error, Result};

/// Storage encoding of a single accessor component.
///
/// Discriminants are the numeric codes used by the interchange format
/// (`componentType` in accessor JSON). All encodings are little-endian.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
#[repr(u32)]
pub enum ComponentType {
    /// Signed 8-bit integer
    Int8 = 5120,
    /// Unsigned 8-bit integer
    Uint8 = 5121,
    /// Signed 16-bit integer
    Int16 = 5122,
    /// Unsigned 16-bit integer
    Uint16 = 5123,
    /// Unsigned 32-bit integer
    Uint32 = 5125,
    /// 32-bit floating point (IEEE 754 single precision)
    Float32 = 5126,
}

impl ComponentType {
    /// Parse a component type from its numeric code.
    pub fn from_code(code: u32) -> Result<Self> {
        match code {
            5120 => Ok(Self::Int8),
            5121 => Ok(Self::Uint8),
            5122 => Ok(Self::Int16),
            5123 => Ok(Self::Uint16),
            5125 => Ok(Self::Uint32),
            5126 => Ok(Self::Float32),
            _ => Err(Error::format(format!("unsupported component type {}", code))),
        }
    }

    /// Numeric code of this component type.
    #[inline]
    pub const fn code(self) -> u32 {
        self as u32
    }

    /// Returns the size in bytes of a single component.
    #[inline]
    pub const fn num_bytes(self) -> usize {
        match self {
            Self::Int8 | Self::Uint8 => 1,
            Self::Int16 | Self::Uint16 => 2,
            Self::Uint32 | Self::Float32 => 4,
        }
    }

    /// Returns the name of this type as a string.
    #[inline]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Int8 => "BYTE",
            Self::Uint8 => "UNSIGNED_BYTE",
            Self::Int16 => "SHORT",
            Self::Uint16 => "UNSIGNED_SHORT",
            Self::Uint32 => "UNSIGNED_INT",
            Self::Float32 => "FLOAT",
        }
    }

    #[inline]
    pub const fn is_float(self) -> bool {
        matches!(self, Self::Float32)
    }

    #[inline]
    pub const fn is_signed(self) -> bool {
        matches!(self, Self::Int8 | Self::Int16 | Self::Float32)
    }

    /// Whether the `normalized` flag may be set for this encoding.
    ///
    /// Only 8- and 16-bit integers can carry normalized values.
    #[inline]
    pub const fn can_normalize(self) -> bool {
        matches!(self, Self::Int8 | Self::Uint8 | Self::Int16 | Self::Uint16)
    }

    /// Smallest representable value.
    pub const fn min_value(self) -> f64 {
        match self {
            Self::Int8 => i8::MIN as f64,
            Self::Int16 => i16::MIN as f64,
            Self::Uint8 | Self::Uint16 | Self::Uint32 => 0.0,
            Self::Float32 => f32::MIN as f64,
        }
    }

    /// Largest representable value. Also the divisor of the normalization rule.
    pub const fn max_value(self) -> f64 {
        match self {
            Self::Int8 => i8::MAX as f64,
            Self::Uint8 => u8::MAX as f64,
            Self::Int16 => i16::MAX as f64,
            Self::Uint16 => u16::MAX as f64,
            Self::Uint32 => u32::MAX as f64,
            Self::Float32 => f32::MAX as f64,
        }
    }

    /// Decode one component from the front of `bytes`.
    ///
    /// Every encoding is exactly representable as `f64`.
    #[inline]
    pub fn read(self, bytes: &[u8]) -> f64 {
        match self {
            Self::Int8 => bytes[0] as i8 as f64,
            Self::Uint8 => bytes[0] as f64,
            Self::Int16 => LittleEndian::read_i16(bytes) as f64,
            Self::Uint16 => LittleEndian::read_u16(bytes) as f64,
            Self::Uint32 => LittleEndian::read_u32(bytes) as f64,
            Self::Float32 => LittleEndian::read_f32(bytes) as f64,
        }
    }

    /// Encode one component into the front of `bytes`.
    ///
    /// Integer encodings require `value` to be integral and within
    /// `[min_value, max_value]`; see [`ComponentType::check_integer`].
    #[inline]
    pub fn write(self, bytes: &mut [u8], value: f64) {
        match self {
            Self::Int8 => bytes[0] = value as i8 as u8,
            Self::Uint8 => bytes[0] = value as u8,
            Self::Int16 => LittleEndian::write_i16(bytes, value as i16),
            Self::Uint16 => LittleEndian::write_u16(bytes, value as u16),
            Self::Uint32 => LittleEndian::write_u32(bytes, value as u32),
            Self::Float32 => LittleEndian::write_f32(bytes, value as f32),
        }
    }

    /// Round `value` to the nearest integer and verify it fits this encoding.
    ///
    /// Float encodings pass through unchanged.
    pub fn check_integer(self, value: f64) -> Result<f64> {
        if self.is_float() {
            return Ok(value);
        }
        let rounded = value.round();
        if rounded.is_nan() || rounded < self.min_value() || rounded > self.max_value() {
            return Err(Error::Range { value, max: self.max_value() });
        }
        Ok(rounded)
    }
}

impl TryFrom<u32> for ComponentType {
    type Error = Error;

    fn try_from(code: u32) -> Result<Self> {
        Self::from_code(code)
    }
}

impl From<ComponentType> for u32 {
    fn from(ty: ComponentType) -> Self {
        ty.code()
    }
}

impl fmt::Display for ComponentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

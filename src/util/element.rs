//! Element value types - what a single accessor position decodes into.
//!
//! An [`Element`] is a fixed number of [`Scalar`] components in declared
//! order (matrices column-major). The storage side is described separately
//! by [`ComponentType`] and [`AccessorType`].

use glam::{Mat2, Mat3, Mat4, Quat, U16Vec4, UVec2, UVec3, UVec4, Vec2, Vec3, Vec4};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ComponentType;

/// Shape of one accessor element: scalar, vector or matrix.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum AccessorType {
    Scalar,
    Vec2,
    Vec3,
    Vec4,
    Mat2,
    Mat3,
    Mat4,
}

impl AccessorType {
    /// Number of components per element (1, 2, 3, 4, 9 or 16).
    #[inline]
    pub const fn component_count(self) -> usize {
        match self {
            Self::Scalar => 1,
            Self::Vec2 => 2,
            Self::Vec3 => 3,
            Self::Vec4 | Self::Mat2 => 4,
            Self::Mat3 => 9,
            Self::Mat4 => 16,
        }
    }

    #[inline]
    pub const fn is_matrix(self) -> bool {
        matches!(self, Self::Mat2 | Self::Mat3 | Self::Mat4)
    }

    /// Number of columns; 1 for scalars and vectors.
    #[inline]
    pub const fn columns(self) -> usize {
        match self {
            Self::Mat2 => 2,
            Self::Mat3 => 3,
            Self::Mat4 => 4,
            _ => 1,
        }
    }

    /// Number of components stored contiguously in one column.
    #[inline]
    pub const fn rows(self) -> usize {
        self.component_count() / self.columns()
    }

    /// Returns the name of this type as a string.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Scalar => "SCALAR",
            Self::Vec2 => "VEC2",
            Self::Vec3 => "VEC3",
            Self::Vec4 => "VEC4",
            Self::Mat2 => "MAT2",
            Self::Mat3 => "MAT3",
            Self::Mat4 => "MAT4",
        }
    }
}

impl fmt::Display for AccessorType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

// === Scalars ===

/// A single decoded component.
///
/// Raw components travel through `f64`, which represents every
/// [`ComponentType`] exactly. Normalization is evaluated at the scalar's own
/// precision so `f32` results match other single-precision decoders.
pub trait Scalar: Copy + PartialEq + Default + fmt::Debug + 'static {
    /// True for `f32`/`f64`.
    const IS_FLOAT: bool;
    /// Smallest value this scalar holds without loss.
    const MIN: f64;
    /// Largest value this scalar holds without loss.
    const MAX: f64;
    /// Every integer of magnitude up to this value is represented exactly.
    const EXACT_INT_MAX: f64;
    /// The encoding whose bytes are this scalar's own little-endian bytes.
    const NATIVE: Option<ComponentType>;

    fn from_f64(v: f64) -> Self;

    fn to_f64(self) -> f64;

    /// Map a raw integer component to `[0, 1]` or `[-1, 1]`.
    #[inline]
    fn normalize(raw: f64, ty: ComponentType) -> Self {
        Self::from_f64((raw / ty.max_value()).max(-1.0))
    }

    /// Map a real value back to the integer range of `ty`, rounding to nearest.
    #[inline]
    fn denormalize(self, ty: ComponentType) -> f64 {
        let lo = if ty.is_signed() { -1.0 } else { 0.0 };
        (self.to_f64().clamp(lo, 1.0) * ty.max_value()).round()
    }

    /// Whether every value of `ty` converts into this scalar and back unchanged.
    fn can_hold(ty: ComponentType) -> bool {
        if ty.is_float() {
            return Self::IS_FLOAT;
        }
        Self::MIN <= ty.min_value() && ty.max_value() <= Self::EXACT_INT_MAX
    }
}

impl Scalar for f32 {
    const IS_FLOAT: bool = true;
    const MIN: f64 = f32::MIN as f64;
    const MAX: f64 = f32::MAX as f64;
    const EXACT_INT_MAX: f64 = (1u32 << f32::MANTISSA_DIGITS) as f64;
    const NATIVE: Option<ComponentType> = Some(ComponentType::Float32);

    #[inline]
    fn from_f64(v: f64) -> Self {
        v as f32
    }

    #[inline]
    fn to_f64(self) -> f64 {
        self as f64
    }

    #[inline]
    fn normalize(raw: f64, ty: ComponentType) -> Self {
        (raw as f32 / ty.max_value() as f32).max(-1.0)
    }

    #[inline]
    fn denormalize(self, ty: ComponentType) -> f64 {
        let lo = if ty.is_signed() { -1.0 } else { 0.0 };
        (self.clamp(lo, 1.0) * ty.max_value() as f32).round() as f64
    }
}

impl Scalar for f64 {
    const IS_FLOAT: bool = true;
    const MIN: f64 = f64::MIN;
    const MAX: f64 = f64::MAX;
    const EXACT_INT_MAX: f64 = (1u64 << f64::MANTISSA_DIGITS) as f64;
    const NATIVE: Option<ComponentType> = None;

    #[inline]
    fn from_f64(v: f64) -> Self {
        v
    }

    #[inline]
    fn to_f64(self) -> f64 {
        self
    }
}

macro_rules! impl_int_scalar {
    ($($ty:ty => $native:expr),* $(,)?) => {
        $(
            impl Scalar for $ty {
                const IS_FLOAT: bool = false;
                const MIN: f64 = <$ty>::MIN as f64;
                const MAX: f64 = <$ty>::MAX as f64;
                const EXACT_INT_MAX: f64 = <$ty>::MAX as f64;
                const NATIVE: Option<ComponentType> = $native;

                #[inline]
                fn from_f64(v: f64) -> Self {
                    v as $ty
                }

                #[inline]
                fn to_f64(self) -> f64 {
                    self as f64
                }
            }
        )*
    };
}

impl_int_scalar! {
    u8 => Some(ComponentType::Uint8),
    i8 => Some(ComponentType::Int8),
    u16 => Some(ComponentType::Uint16),
    i16 => Some(ComponentType::Int16),
    u32 => Some(ComponentType::Uint32),
    i32 => None,
}

// === Elements ===

/// A fixed-size value assembled from `COMPONENTS` scalars.
pub trait Element: Copy + PartialEq + fmt::Debug {
    type Scalar: Scalar;

    /// Component count; must match the layout's [`AccessorType`].
    const COMPONENTS: usize;

    /// Required element shape, for types that are a vector or a matrix
    /// rather than a bag of components. `None` matches on count alone.
    const SHAPE: Option<AccessorType> = None;

    /// Build from exactly `COMPONENTS` scalars in declared order.
    fn from_scalars(scalars: &[Self::Scalar]) -> Self;

    /// Write exactly `COMPONENTS` scalars in declared order.
    fn write_scalars(&self, out: &mut [Self::Scalar]);
}

macro_rules! impl_scalar_element {
    ($($ty:ty),*) => {
        $(
            impl Element for $ty {
                type Scalar = $ty;
                const COMPONENTS: usize = 1;

                #[inline]
                fn from_scalars(scalars: &[$ty]) -> Self {
                    scalars[0]
                }

                #[inline]
                fn write_scalars(&self, out: &mut [$ty]) {
                    out[0] = *self;
                }
            }
        )*
    };
}

impl_scalar_element!(f32, f64, u8, i8, u16, i16, u32, i32);

impl<S: Scalar, const N: usize> Element for [S; N] {
    type Scalar = S;
    const COMPONENTS: usize = N;

    #[inline]
    fn from_scalars(scalars: &[S]) -> Self {
        std::array::from_fn(|i| scalars[i])
    }

    #[inline]
    fn write_scalars(&self, out: &mut [S]) {
        out[..N].copy_from_slice(self);
    }
}

macro_rules! impl_glam_vector {
    ($($ty:ty => $scalar:ty, $n:expr, $shape:ident);* $(;)?) => {
        $(
            impl Element for $ty {
                type Scalar = $scalar;
                const COMPONENTS: usize = $n;
                const SHAPE: Option<AccessorType> = Some(AccessorType::$shape);

                #[inline]
                fn from_scalars(scalars: &[$scalar]) -> Self {
                    <$ty>::from_slice(scalars)
                }

                #[inline]
                fn write_scalars(&self, out: &mut [$scalar]) {
                    self.write_to_slice(out);
                }
            }
        )*
    };
}

impl_glam_vector! {
    Vec2 => f32, 2, Vec2;
    Vec3 => f32, 3, Vec3;
    Vec4 => f32, 4, Vec4;
    Quat => f32, 4, Vec4;
    UVec2 => u32, 2, Vec2;
    UVec3 => u32, 3, Vec3;
    UVec4 => u32, 4, Vec4;
    U16Vec4 => u16, 4, Vec4;
}

macro_rules! impl_glam_matrix {
    ($($ty:ty => $n:expr, $shape:ident);* $(;)?) => {
        $(
            impl Element for $ty {
                type Scalar = f32;
                const COMPONENTS: usize = $n;
                const SHAPE: Option<AccessorType> = Some(AccessorType::$shape);

                #[inline]
                fn from_scalars(scalars: &[f32]) -> Self {
                    <$ty>::from_cols_slice(scalars)
                }

                #[inline]
                fn write_scalars(&self, out: &mut [f32]) {
                    self.write_cols_to_slice(out);
                }
            }
        )*
    };
}

impl_glam_matrix! {
    Mat2 => 4, Mat2;
    Mat3 => 9, Mat3;
    Mat4 => 16, Mat4;
}

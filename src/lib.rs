//! # gltf-accessor
//!
//! Typed, zero-copy accessor views over the binary buffers of a glTF 2.0
//! document. Buffers are borrowed, never copied: a view is a small
//! descriptor (buffer handle, layout, length) that decodes elements on
//! demand and encodes them back in place.
//!
//! ## Modules
//!
//! - [`util`] - Component encodings, element types, layouts, errors
//! - [`view`] - Index, dense and sparse views plus the shared [`Accessor`] contract
//! - [`document`] - Resolve JSON accessor descriptors into views
//! - [`source`] - Load external `.bin` buffers (memory-mapped or owned)
//!
//! ## Example
//!
//! ```
//! use gltf_accessor::prelude::*;
//!
//! let bytes: Vec<u8> = [1.0f32, 2.0, 3.0].iter().flat_map(|v| v.to_le_bytes()).collect();
//! let layout = ElementLayout::new(ComponentType::Float32, AccessorType::Scalar);
//! let view = DenseView::<_, f32>::new(&bytes[..], layout, 3)?;
//!
//! assert_eq!(view.get(1)?, 2.0);
//! assert_eq!(view.find(&3.0), Some(2));
//! # Ok::<(), gltf_accessor::Error>(())
//! ```

pub mod util;
pub mod view;
pub mod document;
pub mod source;

// Re-export commonly used types
pub use util::{AccessorType, ComponentType, Element, ElementLayout, Error, Result, Scalar};
pub use view::{Accessor, AccessorMut, AccessorView, DenseView, IndexView, IndexWidth, SparseView};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::util::{AccessorType, ComponentType, Element, ElementLayout, Error, Result};
    pub use crate::view::{
        Accessor, AccessorMut, AccessorView, DenseView, IndexView, IndexWidth, SparseView,
    };
    pub use crate::document::{AccessorDesc, BufferViewDesc, SparseDesc};
    pub use crate::source::BinarySource;
}

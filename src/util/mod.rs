//! Layout vocabulary shared by every accessor view.
//!
//! - [`ComponentType`] - storage encoding of a component
//! - [`AccessorType`] / [`Element`] / [`Scalar`] - element shape and value types
//! - [`ElementLayout`] - offset, stride and normalization of dense data
//! - [`Error`] / [`Result`] - error handling

mod component;
mod element;
mod error;
mod layout;

pub use component::*;
pub use element::*;
pub use error::*;
pub use layout::*;

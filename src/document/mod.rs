//! Accessor resolution - from JSON descriptors to typed views.
//!
//! The descriptors mirror the `bufferViews` and `accessors` entries of an
//! interchange document and deserialize straight from its JSON. Resolving
//! an accessor windows the referenced buffers and builds a dense view,
//! wrapped in a sparse overlay when the accessor carries sparse data.

use serde::{Deserialize, Serialize};

use crate::util::{AccessorType, ComponentType, Element, ElementLayout, Error, Result};
use crate::view::{AccessorView, DenseView, IndexView, IndexWidth, SparseView};

/// A contiguous window of one buffer.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BufferViewDesc {
    pub buffer: usize,
    #[serde(default)]
    pub byte_offset: usize,
    pub byte_length: usize,
    /// Element stride for vertex attributes; `None` means tightly packed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub byte_stride: Option<usize>,
}

impl BufferViewDesc {
    /// Borrow this window out of `buffers`.
    pub fn slice<'a>(&self, buffers: &[&'a [u8]]) -> Result<&'a [u8]> {
        let buffer = buffers.get(self.buffer).copied().ok_or_else(|| {
            Error::format(format!(
                "buffer view references buffer {} of {}",
                self.buffer,
                buffers.len()
            ))
        })?;
        self.byte_offset
            .checked_add(self.byte_length)
            .and_then(|end| buffer.get(self.byte_offset..end))
            .ok_or_else(|| {
                Error::format(format!(
                    "buffer view [{}, +{}) exceeds buffer {} of {} bytes",
                    self.byte_offset,
                    self.byte_length,
                    self.buffer,
                    buffer.len()
                ))
            })
    }
}

/// Location and encoding of sparse override positions.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SparseIndicesDesc {
    pub buffer_view: usize,
    #[serde(default)]
    pub byte_offset: usize,
    pub component_type: ComponentType,
}

/// Location of sparse override values (tightly packed).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SparseValuesDesc {
    pub buffer_view: usize,
    #[serde(default)]
    pub byte_offset: usize,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SparseDesc {
    /// Number of overridden positions.
    pub count: usize,
    pub indices: SparseIndicesDesc,
    pub values: SparseValuesDesc,
}

/// A typed accessor over buffer view data.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccessorDesc {
    /// Dense data; `None` means all zeros (usually with `sparse` set).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub buffer_view: Option<usize>,
    #[serde(default)]
    pub byte_offset: usize,
    pub component_type: ComponentType,
    #[serde(default)]
    pub normalized: bool,
    pub count: usize,
    #[serde(rename = "type")]
    pub accessor_type: AccessorType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sparse: Option<SparseDesc>,
}

impl AccessorDesc {
    /// Parse a single accessor object.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Layout of the dense elements given the buffer view's stride.
    pub fn layout(&self, byte_stride: Option<usize>) -> ElementLayout {
        ElementLayout::new(self.component_type, self.accessor_type)
            .with_offset(self.byte_offset)
            .with_stride(byte_stride.unwrap_or(0))
            .with_normalized(self.normalized)
    }

    /// Build the typed view of this accessor.
    ///
    /// `views` and `buffers` are the document's buffer views and loaded
    /// buffers. Every dangling reference or window that does not fit is an
    /// [`Error::Format`].
    pub fn resolve<'a, T: Element>(
        &self,
        views: &[BufferViewDesc],
        buffers: &[&'a [u8]],
    ) -> Result<AccessorView<&'a [u8], T>> {
        let dense = match self.buffer_view {
            Some(index) => {
                let view = buffer_view(views, index)?;
                let bytes = view.slice(buffers)?;
                Some(DenseView::new(bytes, self.layout(view.byte_stride), self.count)?)
            }
            None => None,
        };

        let Some(sparse) = &self.sparse else {
            tracing::debug!(count = self.count, ty = %self.accessor_type, "resolved dense accessor");
            return match dense {
                Some(view) => Ok(AccessorView::Dense(view)),
                None => {
                    let top = DenseView::new(&[0u8; 0][..], self.layout(None).with_offset(0), 0)?;
                    let indices = IndexView::new(&[0u8; 0][..], IndexWidth::U8, 0)?;
                    Ok(AccessorView::Sparse(SparseView::over_zeros(self.count, top, &indices)?))
                }
            };
        };

        let indices_view = buffer_view(views, sparse.indices.buffer_view)?;
        let indices_bytes = window(indices_view.slice(buffers)?, sparse.indices.byte_offset)?;
        let width = IndexWidth::try_from(sparse.indices.component_type)?;
        let indices = IndexView::new(indices_bytes, width, sparse.count)?;

        let values_view = buffer_view(views, sparse.values.buffer_view)?;
        let values_bytes = window(values_view.slice(buffers)?, sparse.values.byte_offset)?;
        let top = DenseView::new(values_bytes, self.layout(None).with_offset(0), sparse.count)?;

        let view = match dense {
            Some(bottom) => SparseView::new(bottom, top, &indices)?,
            None => SparseView::over_zeros(self.count, top, &indices)?,
        };
        tracing::debug!(
            count = self.count,
            overrides = sparse.count,
            ty = %self.accessor_type,
            "resolved sparse accessor"
        );
        Ok(AccessorView::Sparse(view))
    }
}

fn buffer_view(views: &[BufferViewDesc], index: usize) -> Result<&BufferViewDesc> {
    views.get(index).ok_or_else(|| {
        Error::format(format!(
            "accessor references buffer view {} of {}",
            index,
            views.len()
        ))
    })
}

fn window(bytes: &[u8], offset: usize) -> Result<&[u8]> {
    bytes.get(offset..).ok_or_else(|| {
        Error::format(format!(
            "offset {} is past the end of a {} byte buffer view",
            offset,
            bytes.len()
        ))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::view::Accessor;
    use glam::Vec3;

    #[test]
    fn test_parse_accessor_json() {
        let desc = AccessorDesc::from_json(
            r#"{
                "bufferView": 1,
                "byteOffset": 8,
                "componentType": 5121,
                "normalized": true,
                "count": 3,
                "type": "VEC4"
            }"#,
        )
        .unwrap();
        assert_eq!(desc.buffer_view, Some(1));
        assert_eq!(desc.byte_offset, 8);
        assert_eq!(desc.component_type, ComponentType::Uint8);
        assert!(desc.normalized);
        assert_eq!(desc.accessor_type, AccessorType::Vec4);
        assert!(desc.sparse.is_none());

        let layout = desc.layout(Some(12));
        assert_eq!(layout.effective_stride(), 12);
        assert_eq!(layout.byte_offset, 8);
    }

    #[test]
    fn test_parse_rejects_unknown_component() {
        let err = AccessorDesc::from_json(r#"{"componentType": 5124, "count": 1, "type": "SCALAR"}"#)
            .unwrap_err();
        assert!(matches!(err, Error::Json(_)));
    }

    #[test]
    fn test_buffer_view_slice() {
        let data = [0u8; 16];
        let buffers = [&data[..]];
        let view = BufferViewDesc { buffer: 0, byte_offset: 4, byte_length: 8, byte_stride: None };
        assert_eq!(view.slice(&buffers).unwrap().len(), 8);

        let too_long = BufferViewDesc { byte_length: 13, ..view.clone() };
        assert!(matches!(too_long.slice(&buffers), Err(Error::Format(_))));

        let missing = BufferViewDesc { buffer: 1, ..view };
        assert!(matches!(missing.slice(&buffers), Err(Error::Format(_))));
    }

    #[test]
    fn test_no_buffer_view_is_zeros() {
        let desc = AccessorDesc {
            buffer_view: None,
            byte_offset: 0,
            component_type: ComponentType::Float32,
            normalized: false,
            count: 3,
            accessor_type: AccessorType::Vec3,
            sparse: None,
        };
        let view = desc.resolve::<Vec3>(&[], &[]).unwrap();
        assert_eq!(view.len(), 3);
        assert!(view.iter().all(|v| v == Vec3::ZERO));
    }

    #[test]
    fn test_dangling_buffer_view() {
        let desc = AccessorDesc {
            buffer_view: Some(2),
            byte_offset: 0,
            component_type: ComponentType::Float32,
            normalized: false,
            count: 1,
            accessor_type: AccessorType::Scalar,
            sparse: None,
        };
        assert!(matches!(desc.resolve::<f32>(&[], &[]), Err(Error::Format(_))));
    }
}

//! Integration tests for resolving accessor descriptors against buffers.

use glam::{Vec2, Vec3};
use gltf_accessor::prelude::*;
use serde::Deserialize;

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct Document {
    buffer_views: Vec<BufferViewDesc>,
    accessors: Vec<AccessorDesc>,
}

const DOCUMENT: &str = r#"{
    "bufferViews": [
        { "buffer": 0, "byteOffset": 0, "byteLength": 60, "byteStride": 20 },
        { "buffer": 0, "byteOffset": 60, "byteLength": 8 },
        { "buffer": 0, "byteOffset": 68, "byteLength": 24 }
    ],
    "accessors": [
        { "bufferView": 0, "componentType": 5126, "count": 3, "type": "VEC3" },
        { "bufferView": 0, "byteOffset": 12, "componentType": 5126, "count": 3, "type": "VEC2" },
        {
            "bufferView": 0, "componentType": 5126, "count": 3, "type": "VEC3",
            "sparse": {
                "count": 2,
                "indices": { "bufferView": 1, "componentType": 5123 },
                "values": { "bufferView": 2 }
            }
        },
        {
            "componentType": 5126, "count": 4, "type": "VEC3",
            "sparse": {
                "count": 2,
                "indices": { "bufferView": 1, "componentType": 5123 },
                "values": { "bufferView": 2 }
            }
        },
        {
            "bufferView": 1, "byteOffset": 2, "componentType": 5123, "count": 3, "type": "SCALAR"
        }
    ]
}"#;

/// Interleaved positions + uvs, then u16 indices [2, 0] (+ padding), then two vec3 values.
fn buffer() -> Vec<u8> {
    let mut bytes = Vec::new();
    for i in 0..3 {
        let f = i as f32;
        for v in [f, f, f, 0.5 * f, 1.0 - 0.5 * f] {
            bytes.extend_from_slice(&v.to_le_bytes());
        }
    }
    for i in [2u16, 0, 1, 1] {
        bytes.extend_from_slice(&i.to_le_bytes());
    }
    for v in [9.0f32, 9.0, 9.0, -1.0, -1.0, -1.0] {
        bytes.extend_from_slice(&v.to_le_bytes());
    }
    bytes
}

fn document() -> Document {
    serde_json::from_str(DOCUMENT).expect("document")
}

#[test]
fn test_interleaved_attributes() {
    let doc = document();
    let data = buffer();
    let buffers = [&data[..]];

    let positions = doc.accessors[0].resolve::<Vec3>(&doc.buffer_views, &buffers).unwrap();
    assert!(!positions.is_sparse());
    assert_eq!(positions.to_vec(), vec![Vec3::ZERO, Vec3::ONE, Vec3::splat(2.0)]);

    let uvs = doc.accessors[1].resolve::<Vec2>(&doc.buffer_views, &buffers).unwrap();
    assert_eq!(uvs.get(2).unwrap(), Vec2::new(1.0, 0.0));
    assert_eq!(uvs.as_dense().map(|d| d.stride()), Some(20));
}

#[test]
fn test_sparse_over_dense() {
    let doc = document();
    let data = buffer();
    let buffers = [&data[..]];

    let view = doc.accessors[2].resolve::<Vec3>(&doc.buffer_views, &buffers).unwrap();
    assert!(view.is_sparse());
    assert_eq!(view.len(), 3);
    assert_eq!(
        view.to_vec(),
        vec![Vec3::splat(-1.0), Vec3::ONE, Vec3::splat(9.0)]
    );
    assert!(view.contains(&Vec3::ONE));
    assert_eq!(view.find(&Vec3::splat(9.0)), Some(2));
}

#[test]
fn test_sparse_over_zeros() {
    let doc = document();
    let data = buffer();
    let buffers = [&data[..]];

    let view = doc.accessors[3].resolve::<Vec3>(&doc.buffer_views, &buffers).unwrap();
    let sparse = view.as_sparse().expect("sparse");
    assert!(sparse.bottom().is_none());
    assert_eq!(sparse.override_count(), 2);
    assert_eq!(
        view.to_vec(),
        vec![Vec3::splat(-1.0), Vec3::ZERO, Vec3::splat(9.0), Vec3::ZERO]
    );
}

#[test]
fn test_index_accessor_with_offset() {
    let doc = document();
    let data = buffer();
    let buffers = [&data[..]];

    let view = doc.accessors[4].resolve::<u32>(&doc.buffer_views, &buffers).unwrap();
    assert_eq!(view.to_vec(), vec![0, 1, 1]);
}

#[test]
fn test_type_mismatch_is_format_error() {
    let doc = document();
    let data = buffer();
    let buffers = [&data[..]];

    let err = doc.accessors[0].resolve::<Vec2>(&doc.buffer_views, &buffers).unwrap_err();
    assert!(matches!(err, Error::Format(_)));
}

#[test]
fn test_truncated_buffer_is_format_error() {
    let doc = document();
    let data = buffer();
    let buffers = [&data[..50]];

    let err = doc.accessors[0].resolve::<Vec3>(&doc.buffer_views, &buffers).unwrap_err();
    assert!(matches!(err, Error::Format(_)));
}

#[test]
fn test_sparse_indices_past_count() {
    let mut doc = document();
    let data = buffer();
    let buffers = [&data[..]];

    // Index 2 is valid for count 3 but not for a count of 2.
    doc.accessors[2].count = 2;
    doc.accessors[2].buffer_view = None;
    let err = doc.accessors[2].resolve::<Vec3>(&doc.buffer_views, &buffers).unwrap_err();
    assert!(matches!(err, Error::Format(_)));
}

#[test]
fn test_sparse_indices_must_be_unsigned() {
    let mut doc = document();
    let data = buffer();
    let buffers = [&data[..]];

    if let Some(sparse) = doc.accessors[2].sparse.as_mut() {
        sparse.indices.component_type = ComponentType::Int16;
    }
    let err = doc.accessors[2].resolve::<Vec3>(&doc.buffer_views, &buffers).unwrap_err();
    assert!(matches!(err, Error::Format(_)));
}

#[test]
fn test_descriptor_serde_roundtrip() {
    let doc = document();
    let json = serde_json::to_string(&doc.accessors[2]).unwrap();
    assert!(json.contains("\"bufferView\":0"));
    assert!(json.contains("\"type\":\"VEC3\""));
    let back: AccessorDesc = serde_json::from_str(&json).unwrap();
    assert_eq!(back, doc.accessors[2]);
}

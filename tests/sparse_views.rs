//! Integration tests for the accessor contract across all view kinds.

use gltf_accessor::prelude::*;

const SCALAR_F32: ElementLayout = ElementLayout::new(ComponentType::Float32, AccessorType::Scalar);

fn f32_bytes(values: &[f32]) -> Vec<u8> {
    values.iter().flat_map(|v| v.to_le_bytes()).collect()
}

/// Five zeros with a single override of 7.0 at position 3.
struct Scenario {
    base: Vec<u8>,
    top: Vec<u8>,
    indices: Vec<u8>,
}

impl Scenario {
    fn new() -> Self {
        Self {
            base: f32_bytes(&[0.0; 5]),
            top: f32_bytes(&[7.0]),
            indices: vec![3],
        }
    }

    fn view(&mut self) -> SparseView<&[u8], &mut [u8], f32> {
        let bottom = DenseView::new(&self.base[..], SCALAR_F32, 5).expect("bottom");
        let top = DenseView::new(&mut self.top[..], SCALAR_F32, 1).expect("top");
        let indices = IndexView::new(&self.indices[..], IndexWidth::U8, 1).expect("indices");
        SparseView::new(bottom, top, &indices).expect("sparse")
    }
}

#[test]
fn test_sparse_reads() {
    let mut scenario = Scenario::new();
    let view = scenario.view();

    assert_eq!(view.len(), 5);
    assert_eq!(view.get(3).unwrap(), 7.0);
    for i in [0, 1, 2, 4] {
        assert_eq!(view.get(i).unwrap(), 0.0, "position {}", i);
    }
    assert!(matches!(view.get(5), Err(Error::IndexOutOfRange { index: 5, len: 5 })));
}

#[test]
fn test_sparse_set_overridden_and_plain_positions() {
    let mut scenario = Scenario::new();
    let mut view = scenario.view();

    view.set(3, 9.0).unwrap();
    assert_eq!(view.get(3).unwrap(), 9.0);

    // Non-overridden positions are readable but not writable: a silent no-op.
    view.set(0, 1.0).unwrap();
    assert_eq!(view.get(0).unwrap(), 0.0);
    assert_eq!(view.to_vec(), vec![0.0, 0.0, 0.0, 9.0, 0.0]);

    drop(view);
    assert_eq!(scenario.base, f32_bytes(&[0.0; 5]));
    assert_eq!(scenario.top, f32_bytes(&[9.0]));
}

#[test]
fn test_sparse_find_contains() {
    let mut scenario = Scenario::new();
    let view = scenario.view();

    assert!(view.contains(&7.0));
    assert!(view.contains(&0.0));
    assert!(!view.contains(&3.0));
    assert_eq!(view.find(&7.0), Some(3));
    assert_eq!(view.find(&0.0), Some(0));
}

#[test]
fn test_sparse_copy_to() {
    let mut scenario = Scenario::new();
    let view = scenario.view();

    let mut dest = [-1.0f32; 7];
    view.copy_to(&mut dest, 1).unwrap();
    assert_eq!(dest, [-1.0, 0.0, 0.0, 0.0, 7.0, 0.0, -1.0]);

    let mut small = [0.0f32; 4];
    assert!(matches!(
        view.copy_to(&mut small, 0),
        Err(Error::DestinationTooSmall { needed: 5, available: 4 })
    ));
}

#[test]
fn test_iteration_is_restartable() {
    let mut scenario = Scenario::new();
    let view = scenario.view();

    let first: Vec<f32> = view.iter().collect();
    let second: Vec<f32> = view.iter().collect();
    assert_eq!(first.len(), 5);
    assert_eq!(first, second);
    assert_eq!(view.iter().next(), Some(0.0));
    assert_eq!(view.iter().nth(3), Some(7.0));
}

#[test]
fn test_iteration_sees_latest_writes() {
    let mut scenario = Scenario::new();
    let mut view = scenario.view();

    assert_eq!(view.iter().nth(3), Some(7.0));
    view.set(3, 11.0).unwrap();
    assert_eq!(view.iter().nth(3), Some(11.0));
}

#[test]
fn test_structural_mutation_unsupported_everywhere() {
    let mut scenario = Scenario::new();
    let mut sparse = scenario.view();
    assert!(matches!(sparse.insert(0, 1.0), Err(Error::UnsupportedOperation(_))));
    assert!(matches!(sparse.remove(3), Err(Error::UnsupportedOperation(_))));
    assert!(matches!(sparse.push(1.0), Err(Error::UnsupportedOperation(_))));
    assert!(matches!(sparse.clear(), Err(Error::UnsupportedOperation(_))));
    assert_eq!(sparse.len(), 5);
    assert_eq!(sparse.to_vec(), vec![0.0, 0.0, 0.0, 7.0, 0.0]);

    let mut bytes = f32_bytes(&[1.0, 2.0]);
    let mut dense = DenseView::<_, f32>::new(&mut bytes[..], SCALAR_F32, 2).unwrap();
    assert!(matches!(dense.insert(1, 5.0), Err(Error::UnsupportedOperation(_))));
    assert!(matches!(dense.remove(0), Err(Error::UnsupportedOperation(_))));
    assert!(matches!(dense.push(5.0), Err(Error::UnsupportedOperation(_))));
    assert!(matches!(dense.clear(), Err(Error::UnsupportedOperation(_))));
    assert_eq!(dense.to_vec(), vec![1.0, 2.0]);

    let mut idx = [0u8, 255, 128, 1];
    let mut index = IndexView::new(&mut idx[..], IndexWidth::U8, 4).unwrap();
    assert!(matches!(index.insert(0, 5), Err(Error::UnsupportedOperation(_))));
    assert!(matches!(index.remove(0), Err(Error::UnsupportedOperation(_))));
    assert!(matches!(index.push(5), Err(Error::UnsupportedOperation(_))));
    assert!(matches!(index.clear(), Err(Error::UnsupportedOperation(_))));
    assert_eq!(index.to_vec(), vec![0, 255, 128, 1]);
}

#[test]
fn test_index_view_width_one() {
    let mut idx = [0u8, 255, 128, 1];
    let mut view = IndexView::new(&mut idx[..], IndexWidth::U8, 4).unwrap();
    assert_eq!(view.to_vec(), vec![0, 255, 128, 1]);

    assert!(matches!(view.set(1, 256), Err(Error::Range { .. })));
    assert_eq!(view.get(1).unwrap(), 255);
}

#[test]
fn test_write_back_leaves_neighbours_unchanged() {
    // Interleaved normalized colors (u8 x4) and positions (f32 x3), stride 16.
    let mut bytes = Vec::new();
    for v in 0..4u8 {
        bytes.extend_from_slice(&[v * 60, 255 - v, 3 * v, 200]);
        bytes.extend(f32_bytes(&[v as f32, -(v as f32), 0.5]));
    }
    let before = bytes.clone();

    let colors = ElementLayout::new(ComponentType::Uint8, AccessorType::Vec4)
        .with_stride(16)
        .with_normalized(true);
    let positions = ElementLayout::new(ComponentType::Float32, AccessorType::Vec3)
        .with_stride(16)
        .with_offset(4);

    {
        let mut view = DenseView::<_, [f32; 4]>::new(&mut bytes[..], colors, 4).unwrap();
        for i in 0..view.len() {
            let value = view.get(i).unwrap();
            view.set(i, value).unwrap();
        }
    }
    {
        let mut view = DenseView::<_, glam::Vec3>::new(&mut bytes[..], positions, 4).unwrap();
        for i in 0..view.len() {
            let value = view.get(i).unwrap();
            view.set(i, value).unwrap();
        }
    }
    assert_eq!(bytes, before);
}

#[test]
fn test_views_are_polymorphic() {
    fn total(view: &dyn Accessor<Item = f32>) -> f32 {
        view.to_vec().iter().sum()
    }

    let mut scenario = Scenario::new();
    let sparse = scenario.view();
    let dense_bytes = f32_bytes(&[1.0, 2.0, 3.0]);
    let dense = DenseView::<_, f32>::new(&dense_bytes[..], SCALAR_F32, 3).unwrap();

    let views: [&dyn Accessor<Item = f32>; 2] = [&sparse, &dense];
    assert_eq!(total(views[0]), 7.0);
    assert_eq!(total(views[1]), 6.0);
}

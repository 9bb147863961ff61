use super::*;
use crate::foundation::error::ErrorKind;

fn two_layer_snapshot() -> WeightSnapshot {
    WeightSnapshot::new(vec![
        LayerValues::Connections(vec![vec![1.0, 0.0], vec![0.0, 1.0]]),
        LayerValues::Nodes(vec![0.2, 0.8]),
    ])
}

#[test]
fn parses_alternating_layers_from_json() {
    let s: WeightSnapshot =
        serde_json::from_str("[[[0.5, 1.5, 2.5]], [0.1, 0.2, 0.3], [[1], [2], [3]], [9]]")
            .unwrap();
    assert_eq!(s.layers.len(), 4);
    assert!(matches!(s.layers[0], LayerValues::Connections(_)));
    assert!(matches!(s.layers[1], LayerValues::Nodes(_)));

    let shape = NetworkShape::from_snapshot(&s, 1).unwrap();
    assert_eq!(shape.layer_sizes, vec![1, 3, 1]);
    assert_eq!(shape.layer_count(), 3);
    assert_eq!(shape.node_count(), 5);
    assert_eq!(s.node_layers().count(), 2);
    assert_eq!(s.connection_layers().count(), 2);
}

#[test]
fn input_node_count_ignores_non_integer_dims() {
    let dims: Vec<InputDim> = serde_json::from_str("[null, 28, 28, \"channels\"]").unwrap();
    assert_eq!(input_node_count(&dims).unwrap(), 784);
    assert_eq!(input_node_count(&[]).unwrap(), 1);
    assert_eq!(input_node_count(&[InputDim::from(2)]).unwrap(), 2);
}

#[test]
fn shape_includes_synthetic_input_layer() {
    let shape = NetworkShape::from_snapshot(&two_layer_snapshot(), 2).unwrap();
    assert_eq!(shape.layer_sizes, vec![2, 2]);
}

#[test]
fn empty_frame_has_too_few_layers() {
    let err = NetworkShape::from_snapshot(&WeightSnapshot::default(), 2).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidInput);
}

#[test]
fn rejects_misordered_layers() {
    let s = WeightSnapshot::new(vec![
        LayerValues::Nodes(vec![0.2, 0.8]),
        LayerValues::Connections(vec![vec![1.0, 0.0], vec![0.0, 1.0]]),
    ]);
    assert!(NetworkShape::from_snapshot(&s, 2).is_err());

    let s = WeightSnapshot::new(vec![LayerValues::Connections(vec![vec![1.0]])]);
    assert!(NetworkShape::from_snapshot(&s, 1).is_err());
}

#[test]
fn rejects_matrix_dimension_mismatch() {
    // Three input nodes but only two rows.
    assert!(NetworkShape::from_snapshot(&two_layer_snapshot(), 3).is_err());

    let s = WeightSnapshot::new(vec![
        LayerValues::Connections(vec![vec![1.0], vec![0.0, 1.0]]),
        LayerValues::Nodes(vec![0.2, 0.8]),
    ]);
    assert!(NetworkShape::from_snapshot(&s, 2).is_err());
}

#[test]
fn rejects_non_finite_and_empty_layers() {
    let s = WeightSnapshot::new(vec![
        LayerValues::Connections(vec![vec![f64::INFINITY, 0.0]]),
        LayerValues::Nodes(vec![0.2, 0.8]),
    ]);
    assert!(NetworkShape::from_snapshot(&s, 1).is_err());

    let s = WeightSnapshot::new(vec![
        LayerValues::Connections(vec![vec![]]),
        LayerValues::Nodes(vec![]),
    ]);
    assert!(NetworkShape::from_snapshot(&s, 1).is_err());
    assert!(NetworkShape::from_snapshot(&two_layer_snapshot(), 0).is_err());
}

use super::*;
use crate::config::LayoutConfig;
use crate::foundation::error::ErrorKind;

fn default_layout(layers: usize) -> Layout {
    Layout::new(&LayoutConfig::default(), layers).unwrap()
}

#[test]
fn three_layer_reference_geometry() {
    // Sizes [4, 6, 2] on the default 1920x1080 canvas.
    let layout = default_layout(3);
    let column_width = (1920.0 - 2.0 * 200.0) / 2.0 - 90.0 / 2.0;
    assert_eq!(layout.column_width(), column_width);
    assert_eq!(layout.layer_x(0), 200.0);
    assert_eq!(layout.layer_x(1), 200.0 + column_width);
    assert_eq!(layout.layer_x(1), 915.0);

    assert_eq!(layout.layer_top(6), (1080.0 - 6.0 * 130.0) / 2.0);
    assert_eq!(layout.layer_top(4), (1080.0 - 4.0 * 130.0) / 2.0);
    assert_eq!(layout.layer_top(2), (1080.0 - 2.0 * 130.0) / 2.0);

    let boxes = layout.layer_boxes(1, 6);
    assert_eq!(boxes.len(), 6);
    assert_eq!(boxes[0].origin, Point::new(915.0, 150.0));
    assert_eq!(boxes[5].origin, Point::new(915.0, 150.0 + 5.0 * 130.0));
    assert_eq!(boxes[0].center(), Point::new(960.0, 195.0));
    assert_eq!(boxes[0].rect(), Rect::new(915.0, 150.0, 1005.0, 240.0));
}

#[test]
fn single_layer_is_rejected() {
    let err = Layout::new(&LayoutConfig::default(), 1).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidInput);
    assert!(Layout::new(&LayoutConfig::default(), 0).is_err());
}

#[test]
fn tall_layers_may_start_above_the_canvas() {
    let layout = default_layout(2);
    assert!(layout.layer_top(10) < 0.0);
}

#[test]
fn window_keeps_only_two_layers() {
    let layout = default_layout(3);
    let w = LayerWindow::first(layout.layer_boxes(0, 4));
    assert!(w.previous.is_none());

    let w = w.advance(layout.layer_boxes(1, 6));
    assert_eq!(w.previous.as_ref().map(Vec::len), Some(4));
    assert_eq!(w.current.len(), 6);

    let w = w.advance(layout.layer_boxes(2, 2));
    assert_eq!(w.previous.as_ref().map(Vec::len), Some(6));
    assert_eq!(w.current.len(), 2);
}

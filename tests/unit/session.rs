use super::*;
use crate::encode::sink::InMemorySink;
use crate::foundation::core::Canvas;
use crate::foundation::error::ErrorKind;
use crate::model::snapshot::LayerValues;

fn small_config() -> RenderConfig {
    let mut cfg = RenderConfig::default();
    cfg.layout.size = Canvas {
        width: 160,
        height: 90,
    };
    cfg.layout.margin = 10;
    cfg.layout.node_size = 16;
    cfg.layout.node_gap = 6;
    cfg.style.conn_max_width = 6;
    cfg
}

fn frames() -> Vec<WeightSnapshot> {
    (0..3)
        .map(|k| {
            let k = f64::from(k);
            WeightSnapshot::new(vec![
                LayerValues::Connections(vec![vec![1.0 + k, 0.0], vec![0.0, 1.0]]),
                LayerValues::Nodes(vec![0.1 * k, 0.5]),
                LayerValues::Connections(vec![vec![0.3], vec![0.9 - 0.1 * k]]),
                LayerValues::Nodes(vec![k]),
            ])
        })
        .collect()
}

fn input() -> Vec<InputDim> {
    vec![InputDim::Other(serde_json::Value::Null), InputDim::Size(2)]
}

#[test]
fn session_reports_shared_shape() {
    let frames = frames();
    let session = RenderSession::new(&frames, &input(), &small_config()).unwrap();
    assert_eq!(session.frame_count(), 3);
    assert_eq!(session.shape().layer_sizes, vec![2, 2, 1]);
}

#[test]
fn empty_sequence_is_invalid_input() {
    let err = RenderSession::new(&[], &input(), &small_config())
        .err()
        .unwrap();
    assert_eq!(err.kind(), ErrorKind::InvalidInput);
}

#[test]
fn shape_change_between_frames_names_the_frame() {
    let mut frames = frames();
    frames[2] = WeightSnapshot::new(vec![
        LayerValues::Connections(vec![vec![1.0, 0.0, 2.0], vec![0.0, 1.0, 3.0]]),
        LayerValues::Nodes(vec![0.1, 0.2, 0.3]),
    ]);
    let err = RenderSession::new(&frames, &input(), &small_config())
        .err()
        .unwrap();
    assert_eq!(err.kind(), ErrorKind::InvalidInput);
    assert_eq!(err.frame_index(), Some(2));
}

#[test]
fn missing_overlay_font_fails_before_rendering() {
    let frames = frames();
    let mut cfg = small_config();
    cfg.frame_numbers.enabled = true;
    cfg.frame_numbers.font = PathBuf::from("no/such/font.ttf");
    let err = RenderSession::new(&frames, &input(), &cfg).err().unwrap();
    assert_eq!(err.kind(), ErrorKind::ResourceUnavailable);
}

#[test]
fn invalid_config_is_rejected_at_construction() {
    let frames = frames();
    let mut cfg = small_config();
    cfg.animation.fps = 0;
    let err = RenderSession::new(&frames, &input(), &cfg).err().unwrap();
    assert_eq!(err.kind(), ErrorKind::Validation);
}

#[test]
fn render_all_pushes_frames_in_order_with_stats() {
    let frames = frames();
    let mut session = RenderSession::new(&frames, &input(), &small_config()).unwrap();
    let mut sink = InMemorySink::new();
    let stats = session.render_all(&mut sink).unwrap();

    let cfg = sink.config().unwrap();
    assert_eq!((cfg.width, cfg.height, cfg.frame_count), (160, 90, 3));
    let order: Vec<u64> = sink.frames().iter().map(|(i, _)| i.0).collect();
    assert_eq!(order, vec![0, 1, 2]);

    // Per frame: 4 + 2 possible connections. Each two-entry row loses its minimum; the
    // single-entry rows of the second band land on the full width.
    assert_eq!(stats.frames_rendered, 3);
    assert_eq!(stats.lines_drawn, 3 * 4);
    assert_eq!(stats.lines_skipped, 3 * 2);
}

#[test]
fn parallel_and_sequential_rendering_match() {
    let frames = frames();
    let mut seq = RenderSession::new(&frames, &input(), &small_config()).unwrap();
    let mut sink_seq = InMemorySink::new();
    seq.render_all(&mut sink_seq).unwrap();

    let mut cfg = small_config();
    cfg.parallel = true;
    cfg.threads = Some(2);
    let mut par = RenderSession::new(&frames, &input(), &cfg).unwrap();
    let mut sink_par = InMemorySink::new();
    par.render_all(&mut sink_par).unwrap();

    assert_eq!(sink_seq.frames().len(), sink_par.frames().len());
    for ((idx_a, a), (idx_b, b)) in sink_seq.frames().iter().zip(sink_par.frames()) {
        assert_eq!(idx_a, idx_b);
        assert_eq!(a, b);
    }
}

#[test]
fn render_frame_out_of_range_names_the_frame() {
    let frames = frames();
    let mut session = RenderSession::new(&frames, &input(), &small_config()).unwrap();
    let err = session.render_frame(FrameIndex(9)).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidInput);
    assert_eq!(err.frame_index(), Some(9));
    assert!(session.render_frame(FrameIndex(1)).is_ok());
}

#[test]
fn thread_pool_honors_requested_size() {
    let pool = build_thread_pool(Some(3)).unwrap();
    assert_eq!(pool.current_num_threads(), 3);
    assert_eq!(
        build_thread_pool(Some(0)).err().unwrap().kind(),
        ErrorKind::Validation
    );
}

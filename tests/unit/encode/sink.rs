use super::*;

fn tiny_frame(value: u8) -> FrameRGBA {
    FrameRGBA {
        width: 1,
        height: 1,
        data: vec![value, value, value, 255],
        premultiplied: true,
    }
}

fn temp_dir(tag: &str) -> PathBuf {
    std::env::temp_dir().join(format!(
        "netreel_sink_{tag}_{}_{}",
        std::process::id(),
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .as_nanos()
    ))
}

#[test]
fn in_memory_sink_keeps_order_and_config() {
    let mut sink = InMemorySink::new();
    let cfg = SinkConfig {
        width: 1,
        height: 1,
        frame_count: 2,
    };
    sink.begin(cfg.clone()).unwrap();
    sink.push_frame(FrameIndex(0), &tiny_frame(1)).unwrap();
    sink.push_frame(FrameIndex(1), &tiny_frame(2)).unwrap();
    sink.end().unwrap();

    assert_eq!(sink.config(), Some(&cfg));
    assert_eq!(sink.frames().len(), 2);
    assert_eq!(sink.frames()[1].0, FrameIndex(1));
    assert_eq!(sink.frames()[1].1.data[0], 2);
}

#[test]
fn png_dir_sink_names_files_by_frame_index() {
    let dir = temp_dir("png");
    let mut sink = PngDirSink::new(&dir, Rgb8::new(0, 0, 0));
    sink.begin(SinkConfig {
        width: 1,
        height: 1,
        frame_count: 2,
    })
    .unwrap();
    sink.push_frame(FrameIndex(0), &tiny_frame(10)).unwrap();
    sink.push_frame(FrameIndex(1), &tiny_frame(20)).unwrap();
    sink.end().unwrap();

    let written = sink.into_written();
    assert_eq!(written, vec![dir.join("0.png"), dir.join("1.png")]);
    assert!(written.iter().all(|p| p.exists()));

    std::fs::remove_dir_all(&dir).ok();
}

use super::*;
use crate::foundation::error::ErrorKind;

fn frame_2x1() -> FrameRGBA {
    FrameRGBA {
        width: 2,
        height: 1,
        data: vec![0, 0, 0, 0, 128, 0, 0, 128],
        premultiplied: true,
    }
}

#[test]
fn straight_conversion_restores_color_and_background() {
    let out = to_straight_rgba8(&frame_2x1(), Rgb8::new(32, 32, 32)).unwrap();
    assert_eq!(&out[..4], &[32, 32, 32, 0]);
    assert_eq!(out[7], 128);
    assert!(out[4] >= 254);
}

#[test]
fn size_mismatch_is_rejected() {
    let mut frame = frame_2x1();
    frame.data.pop();
    let err = to_straight_rgba8(&frame, Rgb8::new(0, 0, 0)).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Render);
}

#[test]
fn write_png_round_trips_through_image() {
    let dir = std::env::temp_dir().join(format!(
        "netreel_png_test_{}_{}",
        std::process::id(),
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .as_nanos()
    ));
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join("0.png");

    write_png(&frame_2x1(), &path, Rgb8::new(32, 32, 32)).unwrap();
    let img = image::open(&path).unwrap().to_rgba8();
    assert_eq!(img.dimensions(), (2, 1));
    assert_eq!(img.get_pixel(0, 0).0, [32, 32, 32, 0]);
    assert_eq!(img.get_pixel(1, 0).0[3], 128);

    std::fs::remove_dir_all(&dir).ok();
}

#[test]
fn unwritable_path_is_io_failure() {
    let path = std::env::temp_dir()
        .join("netreel_missing_dir_for_png_test")
        .join("nested")
        .join("0.png");
    let err = write_png(&frame_2x1(), &path, Rgb8::new(0, 0, 0)).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::IoFailure);
}

#[cfg(unix)]
#[test]
fn full_device_is_io_failure() {
    let err = write_png(
        &frame_2x1(),
        std::path::Path::new("/dev/full"),
        Rgb8::new(0, 0, 0),
    )
    .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::IoFailure);
}

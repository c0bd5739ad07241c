use super::*;
use crate::config::encoder::{EncoderSettings, FrameDuration};

fn cfg(frame_count: usize, settings: EncoderSettings) -> SinkConfig {
    SinkConfig {
        width: 4,
        height: 3,
        frame_count,
        settings,
    }
}

fn decode_delays(path: &Path) -> Vec<u16> {
    let file = File::open(path).unwrap();
    let mut opts = ::gif::DecodeOptions::new();
    opts.set_color_output(::gif::ColorOutput::RGBA);
    let mut decoder = opts.read_info(file).unwrap();
    assert_eq!((decoder.width(), decoder.height()), (4, 3));
    let mut delays = Vec::new();
    while let Some(frame) = decoder.read_next_frame().unwrap() {
        delays.push(frame.delay);
    }
    delays
}

#[test]
fn writes_one_gif_frame_per_push_with_delays() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("anim.gif");
    let settings = EncoderSettings {
        duration: FrameDuration::PerFrame(vec![0.3, 0.5, 1.0]),
        ..EncoderSettings::default()
    };

    let mut sink = GifSink::new(&path);
    sink.begin(cfg(3, settings)).unwrap();
    for (i, shade) in [0u8, 128, 255].into_iter().enumerate() {
        sink.push_frame(i, &FrameRGBA::solid(4, 3, [shade, shade, shade, 255]))
            .unwrap();
    }
    sink.end().unwrap();

    let bytes = std::fs::read(&path).unwrap();
    assert_eq!(&bytes[0..6], b"GIF89a");
    assert_eq!(decode_delays(&path), vec![30, 50, 100]);
}

#[test]
fn size_mismatch_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let mut sink = GifSink::new(dir.path().join("anim.gif"));
    sink.begin(cfg(1, EncoderSettings::default())).unwrap();
    let err = sink
        .push_frame(0, &FrameRGBA::solid(5, 3, [0, 0, 0, 255]))
        .unwrap_err();
    assert!(err.to_string().contains("expected 4x3"), "{err}");
}

#[test]
fn missing_parent_directory_is_an_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let mut sink = GifSink::new(dir.path().join("nope").join("anim.gif"));
    let err = sink.begin(cfg(1, EncoderSettings::default())).unwrap_err();
    assert!(matches!(err, DatagifError::Io(_)));
}

#[test]
fn end_before_begin_fails() {
    let dir = tempfile::tempdir().unwrap();
    let mut sink = GifSink::new(dir.path().join("anim.gif"));
    assert!(sink.end().is_err());
    assert!(!sink.path().exists());
}

use super::*;

fn cfg() -> SinkConfig {
    SinkConfig {
        width: 2,
        height: 1,
        frame_count: 2,
        settings: EncoderSettings::default(),
    }
}

#[test]
fn in_memory_sink_captures_frames_in_order() {
    let mut sink = InMemorySink::new();
    sink.begin(cfg()).unwrap();
    sink.push_frame(0, &FrameRGBA::solid(2, 1, [1, 2, 3, 255])).unwrap();
    sink.push_frame(1, &FrameRGBA::solid(2, 1, [4, 5, 6, 255])).unwrap();
    sink.end().unwrap();

    assert!(sink.is_finished());
    assert_eq!(sink.config().map(|c| c.frame_count), Some(2));
    let idx: Vec<usize> = sink.frames().iter().map(|(i, _)| *i).collect();
    assert_eq!(idx, vec![0, 1]);
    assert_eq!(sink.frames()[1].1.data, vec![4, 5, 6, 255, 4, 5, 6, 255]);
}

#[test]
fn in_memory_sink_rejects_out_of_order_frames() {
    let mut sink = InMemorySink::new();
    sink.begin(cfg()).unwrap();
    let f = FrameRGBA::solid(2, 1, [0, 0, 0, 255]);
    sink.push_frame(1, &f).unwrap();
    assert!(sink.push_frame(1, &f).is_err());
    assert!(sink.push_frame(0, &f).is_err());
}

#[test]
fn push_before_begin_fails() {
    let mut sink = InMemorySink::new();
    assert!(sink.push_frame(0, &FrameRGBA::solid(1, 1, [0; 4])).is_err());
}

use super::*;

use crate::foundation::core::Fps;

fn scratch_dir(tag: &str) -> PathBuf {
    std::env::temp_dir().join(format!(
        "courtintro_png_{tag}_{}_{}",
        std::process::id(),
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .as_nanos()
    ))
}

fn frame(rgba: [u8; 4]) -> FrameRGBA {
    FrameRGBA {
        width: 2,
        height: 1,
        data: [rgba, rgba].concat(),
        premultiplied: true,
    }
}

#[test]
fn unpremultiply_restores_straight_colour() {
    let mut px = vec![64u8, 32, 0, 128, 7, 7, 7, 0, 9, 8, 7, 255];
    unpremultiply_in_place(&mut px);
    assert_eq!(px, vec![128, 64, 0, 128, 7, 7, 7, 0, 9, 8, 7, 255]);
}

#[test]
fn written_png_reads_back_as_straight_rgba() {
    let dir = scratch_dir("single");
    let path = dir.join("nested").join("still.png");
    write_png(&path, &frame([64, 32, 0, 128])).unwrap();

    let img = image::open(&path).unwrap().to_rgba8();
    assert_eq!(img.dimensions(), (2, 1));
    assert_eq!(img.get_pixel(1, 0).0, [128, 64, 0, 128]);
    std::fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn sequence_sink_numbers_frames() {
    let dir = scratch_dir("seq");
    let mut sink = PngSequenceSink::new(&dir).with_prefix("intro");
    sink.begin(SinkConfig {
        width: 2,
        height: 1,
        fps: Fps::new(30, 1).unwrap(),
    })
    .unwrap();
    sink.push_frame(0, &frame([0, 0, 0, 255])).unwrap();
    sink.push_frame(1, &frame([255, 255, 255, 255])).unwrap();
    sink.end().unwrap();

    assert_eq!(sink.written(), 2);
    assert!(dir.join("intro_00000.png").is_file());
    assert!(dir.join("intro_00001.png").is_file());
    assert_eq!(sink.frame_path(12), dir.join("intro_00012.png"));
    std::fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn sequence_sink_rejects_wrong_size_and_unstarted_use() {
    let dir = scratch_dir("bad");
    let mut sink = PngSequenceSink::new(&dir);
    assert!(sink.push_frame(0, &frame([0, 0, 0, 255])).is_err());

    sink.begin(SinkConfig {
        width: 4,
        height: 4,
        fps: Fps::new(30, 1).unwrap(),
    })
    .unwrap();
    let err = sink.push_frame(0, &frame([0, 0, 0, 255])).unwrap_err();
    assert!(matches!(err, IntroError::Validation(_)));
    std::fs::remove_dir_all(&dir).unwrap();
}

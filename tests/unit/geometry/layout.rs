use super::*;

fn assert_close(a: f64, b: f64) {
    assert!((a - b).abs() < 1e-9, "{a} != {b}");
}

#[test]
fn frame_is_centred_in_viewport() {
    let frame = FrameRect::from_viewport(Viewport::new(1000, 500));
    assert_close(frame.width, 900.0);
    assert_close(frame.height, 400.0);
    assert_close(frame.start_x, 50.0);
    assert_close(frame.start_y, 50.0);
    assert_close(frame.thickness, 20.0);
}

#[test]
fn court_is_centred_and_contained() {
    for (w, h) in [(1000, 500), (1920, 1080), (640, 480), (333, 777)] {
        let layout = CourtLayout::from_viewport(Viewport::new(w, h));
        let frame = layout.frame.outer();
        let court = layout.court.outer();

        assert_close(court.center().x, frame.center().x);
        assert_close(court.center().y, frame.center().y);
        assert!(frame.contains(court.origin()));
        assert!(court.x1 <= frame.x1 && court.y1 <= frame.y1);

        let singles = layout.court.singles();
        assert_close(singles.center().y, layout.court.center_y);
        assert!(singles.y0 >= court.y0 && singles.y1 <= court.y1);
    }
}

#[test]
fn court_sits_inside_frame_interior_for_usual_sizes() {
    let layout = CourtLayout::from_viewport(Viewport::new(1280, 720));
    let interior = layout.frame.interior();
    let court = layout.court.outer();
    assert!(court.x0 >= interior.x0 && court.x1 <= interior.x1);
    assert!(court.y0 >= interior.y0 && court.y1 <= interior.y1);
}

#[test]
fn service_boxes_are_symmetric() {
    let layout = CourtLayout::from_viewport(Viewport::new(1200, 800));
    let left = layout.service_area(Side::Left);
    let right = layout.service_area(Side::Right);
    let cx = layout.court.center_x;

    assert_close(left.width(), right.width());
    assert_close(left.height(), right.height());
    assert_close(cx - left.x0, right.x1 - cx);
    assert_close(left.x1, cx);
    assert_close(left.height(), layout.service_box.height * 2.0);
    assert_close(
        layout.court.right_service_x() - cx,
        cx - layout.court.left_service_x(),
    );
}

#[test]
fn tiny_viewport_never_divides_by_zero() {
    let layout = CourtLayout::from_viewport(Viewport::new(0, 0));
    assert!(layout.frame.width > 0.0);
    let interior = layout.frame.interior();
    assert!(interior.width() >= 0.0 && interior.height() >= 0.0);
    assert!(layout.service_box.width.is_finite());
}

#[test]
fn door_slide_scenario() {
    let mut layout = CourtLayout::from_viewport(Viewport::new(1000, 1000));
    layout.court.start_x = 200.0;
    layout.court.service_line_distance = 100.0;
    layout.court.center_x = 450.0;
    layout.service_box = ServiceBoxRect {
        width: 150.0,
        height: 80.0,
    };

    let slide = layout.door_slide(1.0);
    assert_close(slide, 127.5);

    let left = layout.door(Side::Left, slide);
    assert_close(left.rect.x0, 200.0 - 27.5);
    assert!(left.visible);

    let right = layout.door(Side::Right, slide);
    assert_close(right.rect.x0, 450.0 + 127.5);
    assert!(right.visible);
    assert_close(right.rect.height(), 160.0);
}

#[test]
fn closed_doors_cover_the_service_areas() {
    let layout = CourtLayout::from_viewport(Viewport::new(800, 600));
    for side in Side::BOTH {
        let door = layout.door(side, 0.0);
        assert!(door.visible);
        assert_eq!(door.rect, layout.service_area(side));
    }
}

#[test]
fn doors_hide_once_slid_a_full_width() {
    let layout = CourtLayout::from_viewport(Viewport::new(800, 600));
    let full = layout.service_box.width;
    assert!(!layout.door(Side::Left, full).visible);
    assert!(!layout.door(Side::Right, full).visible);
}

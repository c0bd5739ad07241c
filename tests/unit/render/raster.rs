use super::*;
use crate::chart::color::Rgb;
use crate::chart::figure::{Mark, MarkerShape, Shape};
use crate::chart::theme::Theme;
use kurbo::Point;

fn small_figure() -> Figure {
    let mut fig = Figure::new(Theme::default());
    fig.size_in = (3.0, 2.0);
    fig.dpi = 72.0;
    fig
}

fn pixel(frame: &FrameRGBA, x: u32, y: u32) -> [u8; 4] {
    let i = ((y * frame.width + x) * 4) as usize;
    [frame.data[i], frame.data[i + 1], frame.data[i + 2], frame.data[i + 3]]
}

fn red_marker(at: Point) -> Mark {
    Mark::new(Shape::Markers {
        points: vec![at],
        colors: vec![Rgb::from_u8(255, 0, 0)],
        marker: MarkerShape::Circle,
        size: 400.0,
        edge: None,
        edge_width: 0.0,
    })
}

fn is_red([r, g, b, _]: [u8; 4]) -> bool {
    r > 200 && g < 60 && b < 60
}

#[test]
fn frame_matches_figure_pixel_size() {
    let backend = RasterBackend::new();
    let frame = backend.render_rgba(&small_figure()).unwrap();
    assert_eq!((frame.width, frame.height), (216, 144));
    assert_eq!(frame.data.len(), 216 * 144 * 4);
    assert_eq!(pixel(&frame, 0, 0), [255, 255, 255, 255]);
}

#[test]
fn markers_land_at_the_center_of_the_plot_area() {
    let mut fig = small_figure();
    fig.set_xlim(0.0, 10.0);
    fig.set_ylim(0.0, 10.0);
    fig.push(red_marker(Point::new(5.0, 5.0)));

    let (frame, area) = RasterBackend::new().render_with_plot_area(&fig).unwrap();
    let center = area.center();
    let px = pixel(&frame, center.x as u32, center.y as u32);
    assert!(is_red(px), "got {px:?}");
    assert_eq!(px[3], 255);
}

#[test]
fn clipped_markers_outside_the_view_are_not_drawn() {
    let mut fig = small_figure();
    fig.set_xlim(0.0, 10.0);
    fig.set_ylim(0.0, 10.0);
    fig.push(red_marker(Point::new(10.4, 5.0)));

    let frame = RasterBackend::new().render_rgba(&fig).unwrap();
    assert!(!frame.data.chunks_exact(4).any(|p| is_red([p[0], p[1], p[2], p[3]])));
}

#[test]
fn save_writes_a_png_of_the_right_size() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("frame.png");
    let mut backend = RasterBackend::new();
    backend.save(&small_figure(), &path).unwrap();

    let img = image::open(&path).unwrap();
    assert_eq!((img.width(), img.height()), (216, 144));
}

#[test]
fn save_into_missing_directory_is_an_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("missing").join("frame.png");
    let err = RasterBackend::new().save(&small_figure(), &path).unwrap_err();
    assert!(matches!(err, DatagifError::Io(_)), "{err}");
}

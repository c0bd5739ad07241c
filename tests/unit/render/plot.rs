use super::*;
use crate::chart::theme::{AxesStyle, Theme};

const FACE: [u8; 3] = [0xea, 0xea, 0xf2];

fn render(fig: &Figure) -> (Vec<u8>, Rect) {
    let (w, h) = fig.pixel_size();
    let mut buf = vec![0u8; (w * h * 3) as usize];
    let area = {
        let root = BitMapBackend::with_buffer(&mut buf, (w, h)).into_drawing_area();
        draw_figure(&root, fig).unwrap()
    };
    (buf, area)
}

fn count(buf: &[u8], color: [u8; 3]) -> usize {
    buf.chunks_exact(3).filter(|p| *p == color).count()
}

fn figure(theme: Theme) -> Figure {
    let mut fig = Figure::new(theme);
    fig.set_xlim(0.0, 10.0);
    fig.set_ylim(0.0, 10.0);
    fig
}

#[test]
fn tick_labels_drop_trailing_zeros() {
    assert_eq!(format_tick(0.0), "0");
    assert_eq!(format_tick(10.0), "10");
    assert_eq!(format_tick(2.5), "2.5");
    assert_eq!(format_tick(-0.25), "-0.25");
    assert_eq!(format_tick(2.0e7), "2.0e7");
}

#[test]
fn plot_area_sits_inside_the_figure() {
    let fig = figure(Theme::default());
    let (_, area) = render(&fig);
    let (w, h) = fig.pixel_size();
    assert!(area.x0 > 0.0 && area.y0 > 0.0);
    assert!(area.x1 < f64::from(w) && area.y1 < f64::from(h));
    assert!(area.width() > f64::from(w) / 2.0);
}

#[test]
fn darkgrid_fills_the_axes_background() {
    let fig = figure(Theme::default());
    let (buf, area) = render(&fig);
    let faces = count(&buf, FACE) as f64;
    assert!(faces > area.area() * 0.5, "{faces} of {}", area.area());
}

#[test]
fn white_style_and_hidden_axes_leave_no_gray_background() {
    let white = Theme {
        style: AxesStyle::White,
        ..Theme::default()
    };
    let (buf, _) = render(&figure(white));
    assert_eq!(count(&buf, FACE), 0);

    let mut hidden = figure(Theme::default());
    hidden.axis_visible = false;
    let (buf, _) = render(&hidden);
    assert_eq!(count(&buf, FACE), 0);
}

#[test]
fn tight_layout_grows_the_plot_area() {
    let mut fig = figure(Theme::default());
    let (_, loose) = render(&fig);
    fig.tight_layout = true;
    let (_, tight) = render(&fig);
    assert!(tight.width() > loose.width());
    assert!(tight.height() >= loose.height());
}

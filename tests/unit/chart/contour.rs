use super::*;

fn axis(lo: f64, hi: f64, n: usize) -> Vec<f64> {
    (0..n)
        .map(|i| lo + (hi - lo) * i as f64 / (n - 1) as f64)
        .collect()
}

fn bowl(xs: &[f64], ys: &[f64]) -> Vec<f64> {
    let mut z = Vec::with_capacity(xs.len() * ys.len());
    for y in ys {
        for x in xs {
            z.push(-(x * x + y * y));
        }
    }
    z
}

#[test]
fn circle_level_is_one_closed_ring() {
    let xs = axis(-2.0, 2.0, 41);
    let ys = axis(-2.0, 2.0, 41);
    let z = bowl(&xs, &ys);
    let field = Field::new(&xs, &ys, &z).unwrap();

    let lines = field.iso_lines(-1.0);
    assert_eq!(lines.len(), 1);
    let (pts, closed) = &lines[0];
    assert!(*closed);
    assert!(pts.len() > 20);
    for p in pts {
        let r = (p.x * p.x + p.y * p.y).sqrt();
        assert!((r - 1.0).abs() < 0.02, "radius {r}");
    }
}

#[test]
fn level_outside_range_has_no_lines() {
    let xs = axis(-1.0, 1.0, 11);
    let ys = axis(-1.0, 1.0, 11);
    let z = bowl(&xs, &ys);
    let field = Field::new(&xs, &ys, &z).unwrap();
    assert!(field.iso_lines(1.0).is_empty());
    assert!(field.iso_lines(-10.0).is_empty());
}

#[test]
fn line_leaving_the_grid_is_open() {
    let xs = axis(0.0, 1.0, 5);
    let ys = axis(0.0, 1.0, 5);
    let z: Vec<f64> = ys.iter().flat_map(|_| xs.iter().copied()).collect();
    let field = Field::new(&xs, &ys, &z).unwrap();

    let lines = field.iso_lines(0.6);
    assert_eq!(lines.len(), 1);
    let (pts, closed) = &lines[0];
    assert!(!*closed);
    assert_eq!(pts.len(), 5);
    assert!(pts.iter().all(|p| (p.x - 0.6).abs() < 1e-9));
}

#[test]
fn mismatched_field_is_rejected() {
    let xs = [0.0, 1.0];
    assert!(Field::new(&xs, &xs, &[0.0; 3]).is_none());
    assert!(Field::new(&[0.0], &xs, &[0.0; 2]).is_none());
}

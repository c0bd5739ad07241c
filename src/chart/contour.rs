//! Marching-squares iso-lines over a rectilinear grid.

use std::collections::HashMap;

use kurbo::Point;

/// Grid edge crossed by an iso-line: horizontal `(i, j)-(i+1, j)` or vertical `(i, j)-(i, j+1)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
enum Edge {
    H(usize, usize),
    V(usize, usize),
}

/// Scalar field sampled at `xs × ys`, row-major (`z[j * xs.len() + i]`).
pub struct Field<'a> {
    xs: &'a [f64],
    ys: &'a [f64],
    z: &'a [f64],
}

impl<'a> Field<'a> {
    /// Wrap a field; `None` when the sample count does not match the axes.
    pub fn new(xs: &'a [f64], ys: &'a [f64], z: &'a [f64]) -> Option<Self> {
        (xs.len() >= 2 && ys.len() >= 2 && z.len() == xs.len() * ys.len())
            .then_some(Self { xs, ys, z })
    }

    fn at(&self, i: usize, j: usize) -> f64 {
        self.z[j * self.xs.len() + i]
    }

    fn crossing(&self, edge: Edge, level: f64) -> Point {
        let (p0, z0, p1, z1) = match edge {
            Edge::H(i, j) => (
                Point::new(self.xs[i], self.ys[j]),
                self.at(i, j),
                Point::new(self.xs[i + 1], self.ys[j]),
                self.at(i + 1, j),
            ),
            Edge::V(i, j) => (
                Point::new(self.xs[i], self.ys[j]),
                self.at(i, j),
                Point::new(self.xs[i], self.ys[j + 1]),
                self.at(i, j + 1),
            ),
        };
        let t = if (z1 - z0).abs() > f64::EPSILON {
            ((level - z0) / (z1 - z0)).clamp(0.0, 1.0)
        } else {
            0.5
        };
        p0.lerp(p1, t)
    }

    /// Polylines where the field equals `level`, with a flag telling whether each is closed.
    pub fn iso_lines(&self, level: f64) -> Vec<(Vec<Point>, bool)> {
        let segments = self.segments(level);
        stitch(&segments)
            .into_iter()
            .map(|edges| {
                let closed = edges.len() > 2 && edges.first() == edges.last();
                let pts = edges.iter().map(|e| self.crossing(*e, level)).collect();
                (pts, closed)
            })
            .collect()
    }

    fn segments(&self, level: f64) -> Vec<(Edge, Edge)> {
        let (nx, ny) = (self.xs.len(), self.ys.len());
        let mut out = Vec::new();
        for j in 0..ny - 1 {
            for i in 0..nx - 1 {
                let (a, b, c, d) = (
                    self.at(i, j),
                    self.at(i + 1, j),
                    self.at(i + 1, j + 1),
                    self.at(i, j + 1),
                );
                let case = usize::from(a >= level)
                    | usize::from(b >= level) << 1
                    | usize::from(c >= level) << 2
                    | usize::from(d >= level) << 3;
                let bottom = Edge::H(i, j);
                let right = Edge::V(i + 1, j);
                let top = Edge::H(i, j + 1);
                let left = Edge::V(i, j);
                let center_above = (a + b + c + d) / 4.0 >= level;
                match case {
                    0 | 15 => {}
                    1 | 14 => out.push((left, bottom)),
                    2 | 13 => out.push((bottom, right)),
                    3 | 12 => out.push((left, right)),
                    4 | 11 => out.push((right, top)),
                    6 | 9 => out.push((bottom, top)),
                    7 | 8 => out.push((left, top)),
                    5 => {
                        if center_above {
                            out.push((bottom, right));
                            out.push((top, left));
                        } else {
                            out.push((left, bottom));
                            out.push((right, top));
                        }
                    }
                    10 => {
                        if center_above {
                            out.push((left, bottom));
                            out.push((right, top));
                        } else {
                            out.push((bottom, right));
                            out.push((top, left));
                        }
                    }
                    _ => {}
                }
            }
        }
        out
    }
}

fn stitch(segments: &[(Edge, Edge)]) -> Vec<Vec<Edge>> {
    let mut touching: HashMap<Edge, Vec<usize>> = HashMap::new();
    for (idx, (a, b)) in segments.iter().enumerate() {
        touching.entry(*a).or_default().push(idx);
        touching.entry(*b).or_default().push(idx);
    }

    let mut used = vec![false; segments.len()];
    let next_from = |at: Edge, used: &mut Vec<bool>| -> Option<Edge> {
        let idx = *touching.get(&at)?.iter().find(|&&s| !used[s])?;
        used[idx] = true;
        let (a, b) = segments[idx];
        Some(if a == at { b } else { a })
    };

    let mut lines = Vec::new();
    for start in 0..segments.len() {
        if used[start] {
            continue;
        }
        used[start] = true;
        let (a, b) = segments[start];
        let mut forward = vec![a, b];
        while let Some(e) = next_from(*forward.last().unwrap_or(&b), &mut used) {
            forward.push(e);
        }
        let mut backward = Vec::new();
        while let Some(e) = next_from(*backward.last().unwrap_or(&a), &mut used) {
            backward.push(e);
        }
        backward.reverse();
        backward.extend(forward);
        lines.push(backward);
    }
    lines
}

#[cfg(test)]
#[path = "../../tests/unit/chart/contour.rs"]
mod tests;

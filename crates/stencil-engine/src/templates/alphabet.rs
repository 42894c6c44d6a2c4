//! Compiled-in uppercase letter templates.
//!
//! Glyphs are authored with a lyon path builder: straight strokes as
//! polylines, bowls and arcs as cubic Béziers. Paths are flattened once at
//! load time so the rest of the engine only ever sees polylines.

use std::f32::consts::FRAC_PI_2;

use glam::Vec2;
use lyon::math::{point, Point};
use lyon::path::iterator::PathIterator;
use lyon::path::path::Builder;
use lyon::path::{Path, PathEvent};

use crate::templates::store::{LetterTemplate, Stroke};

/// Max distance between a flattened polyline and the true curve (unit square).
const FLATTEN_TOLERANCE: f32 = 0.004;

/// Collects the sub-paths of one glyph.
struct Sketch {
    builder: Builder,
    cursor: Option<Point>,
}

impl Sketch {
    fn new() -> Self {
        Self {
            builder: Path::builder(),
            cursor: None,
        }
    }

    /// A complete straight-line stroke.
    fn polyline(&mut self, points: &[(f32, f32)]) -> &mut Self {
        for &(x, y) in points {
            self.line_to(x, y);
        }
        self.end()
    }

    fn line_to(&mut self, x: f32, y: f32) -> &mut Self {
        let to = point(x, y);
        match self.cursor {
            Some(_) => {
                self.builder.line_to(to);
            }
            None => {
                self.builder.begin(to);
            }
        }
        self.cursor = Some(to);
        self
    }

    /// Elliptical arc around `center` from `start_deg`, sweeping `sweep_deg`
    /// (positive = clockwise on screen, since y points down). Continues the
    /// current stroke, or starts one at the arc's first point.
    fn arc(&mut self, center: (f32, f32), radii: (f32, f32), start_deg: f32, sweep_deg: f32) -> &mut Self {
        let (cx, cy) = center;
        let (rx, ry) = radii;
        let at = |theta: f32| point(cx + rx * theta.cos(), cy + ry * theta.sin());
        // derivative of `at`, unscaled
        let tangent = |theta: f32| lyon::math::vector(-rx * theta.sin(), ry * theta.cos());

        let start = start_deg.to_radians();
        let sweep = sweep_deg.to_radians();
        let pieces = (sweep.abs() / FRAC_PI_2).ceil().max(1.0) as usize;
        let step = sweep / pieces as f32;
        let k = 4.0 / 3.0 * (step / 4.0).tan();

        let first = at(start);
        match self.cursor {
            Some(cursor) if (cursor - first).length() < 1e-6 => {}
            _ => {
                self.line_to(first.x, first.y);
            }
        }

        for i in 0..pieces {
            let t0 = start + step * i as f32;
            let t1 = t0 + step;
            let (p0, p3) = (at(t0), at(t1));
            let c1 = p0 + tangent(t0) * k;
            let c2 = p3 - tangent(t1) * k;
            self.builder.cubic_bezier_to(c1, c2, p3);
            self.cursor = Some(p3);
        }
        self
    }

    fn end(&mut self) -> &mut Self {
        if self.cursor.take().is_some() {
            self.builder.end(false);
        }
        self
    }

    /// Flatten every sub-path into a polyline stroke.
    fn finish(mut self) -> Vec<Stroke> {
        self.end();
        let path = self.builder.build();

        let mut strokes = Vec::new();
        let mut current: Stroke = Vec::new();
        for event in path.iter().flattened(FLATTEN_TOLERANCE) {
            match event {
                PathEvent::Begin { at } => {
                    current = vec![to_unit(at)];
                }
                PathEvent::Line { to, .. } => current.push(to_unit(to)),
                PathEvent::End { .. } => {
                    if current.len() >= 2 {
                        strokes.push(std::mem::take(&mut current));
                    }
                }
                // flattening only yields lines
                PathEvent::Quadratic { .. } | PathEvent::Cubic { .. } => {}
            }
        }
        strokes
    }
}

fn to_unit(p: Point) -> Vec2 {
    Vec2::new(p.x.clamp(0.0, 1.0), p.y.clamp(0.0, 1.0))
}

fn straight(letter: char, draw: impl FnOnce(&mut Sketch)) -> LetterTemplate {
    let mut sketch = Sketch::new();
    draw(&mut sketch);
    LetterTemplate::new(letter, sketch.finish(), false)
}

fn curved(letter: char, draw: impl FnOnce(&mut Sketch)) -> LetterTemplate {
    let mut sketch = Sketch::new();
    draw(&mut sketch);
    LetterTemplate::new(letter, sketch.finish(), true)
}

/// A–Z in block capitals, spanning the sky-to-grass letter box.
pub fn uppercase() -> Vec<LetterTemplate> {
    vec![
        straight('A', |s| {
            s.polyline(&[(0.1, 0.9), (0.5, 0.1)])
                .polyline(&[(0.5, 0.1), (0.9, 0.9)])
                .polyline(&[(0.275, 0.55), (0.725, 0.55)]);
        }),
        curved('B', |s| {
            s.polyline(&[(0.15, 0.1), (0.15, 0.9)]);
            s.line_to(0.15, 0.1)
                .line_to(0.55, 0.1)
                .arc((0.55, 0.3), (0.25, 0.2), -90.0, 180.0)
                .line_to(0.15, 0.5)
                .end();
            s.line_to(0.15, 0.5)
                .line_to(0.6, 0.5)
                .arc((0.6, 0.7), (0.28, 0.2), -90.0, 180.0)
                .line_to(0.15, 0.9)
                .end();
        }),
        curved('C', |s| {
            s.arc((0.55, 0.5), (0.4, 0.4), -45.0, -270.0).end();
        }),
        curved('D', |s| {
            s.polyline(&[(0.15, 0.1), (0.15, 0.9)]);
            s.line_to(0.15, 0.1)
                .line_to(0.45, 0.1)
                .arc((0.45, 0.5), (0.4, 0.4), -90.0, 180.0)
                .line_to(0.15, 0.9)
                .end();
        }),
        straight('E', |s| {
            s.polyline(&[(0.8, 0.1), (0.2, 0.1), (0.2, 0.9), (0.8, 0.9)])
                .polyline(&[(0.2, 0.5), (0.7, 0.5)]);
        }),
        straight('F', |s| {
            s.polyline(&[(0.8, 0.1), (0.2, 0.1), (0.2, 0.9)])
                .polyline(&[(0.2, 0.5), (0.7, 0.5)]);
        }),
        curved('G', |s| {
            s.arc((0.55, 0.5), (0.4, 0.4), -45.0, -270.0)
                .line_to(0.85, 0.55)
                .line_to(0.6, 0.55)
                .end();
        }),
        straight('H', |s| {
            s.polyline(&[(0.2, 0.1), (0.2, 0.9)])
                .polyline(&[(0.8, 0.1), (0.8, 0.9)])
                .polyline(&[(0.2, 0.5), (0.8, 0.5)]);
        }),
        straight('I', |s| {
            s.polyline(&[(0.5, 0.1), (0.5, 0.9)])
                .polyline(&[(0.3, 0.1), (0.7, 0.1)])
                .polyline(&[(0.3, 0.9), (0.7, 0.9)]);
        }),
        curved('J', |s| {
            s.line_to(0.7, 0.1)
                .line_to(0.7, 0.65)
                .arc((0.45, 0.65), (0.25, 0.25), 0.0, 180.0)
                .end();
        }),
        straight('K', |s| {
            s.polyline(&[(0.2, 0.1), (0.2, 0.9)])
                .polyline(&[(0.8, 0.1), (0.2, 0.55), (0.8, 0.9)]);
        }),
        straight('L', |s| {
            s.polyline(&[(0.2, 0.1), (0.2, 0.9), (0.8, 0.9)]);
        }),
        straight('M', |s| {
            s.polyline(&[(0.1, 0.9), (0.15, 0.1), (0.5, 0.6), (0.85, 0.1), (0.9, 0.9)]);
        }),
        straight('N', |s| {
            s.polyline(&[(0.2, 0.9), (0.2, 0.1), (0.8, 0.9), (0.8, 0.1)]);
        }),
        curved('O', |s| {
            s.arc((0.5, 0.5), (0.4, 0.4), -90.0, -360.0).end();
        }),
        curved('P', |s| {
            s.polyline(&[(0.2, 0.1), (0.2, 0.9)]);
            s.line_to(0.2, 0.1)
                .line_to(0.55, 0.1)
                .arc((0.55, 0.3), (0.3, 0.2), -90.0, 180.0)
                .line_to(0.2, 0.5)
                .end();
        }),
        curved('Q', |s| {
            s.arc((0.5, 0.5), (0.4, 0.4), -90.0, -360.0).end();
            s.polyline(&[(0.6, 0.7), (0.9, 0.9)]);
        }),
        curved('R', |s| {
            s.polyline(&[(0.2, 0.1), (0.2, 0.9)]);
            s.line_to(0.2, 0.1)
                .line_to(0.55, 0.1)
                .arc((0.55, 0.3), (0.3, 0.2), -90.0, 180.0)
                .line_to(0.2, 0.5)
                .end();
            s.polyline(&[(0.5, 0.5), (0.85, 0.9)]);
        }),
        curved('S', |s| {
            s.arc((0.5, 0.3), (0.3, 0.2), -30.0, -240.0)
                .arc((0.5, 0.7), (0.3, 0.2), -90.0, 240.0)
                .end();
        }),
        straight('T', |s| {
            s.polyline(&[(0.1, 0.1), (0.9, 0.1)])
                .polyline(&[(0.5, 0.1), (0.5, 0.9)]);
        }),
        curved('U', |s| {
            s.line_to(0.2, 0.1)
                .line_to(0.2, 0.6)
                .arc((0.5, 0.6), (0.3, 0.3), 180.0, -180.0)
                .line_to(0.8, 0.1)
                .end();
        }),
        straight('V', |s| {
            s.polyline(&[(0.1, 0.1), (0.5, 0.9), (0.9, 0.1)]);
        }),
        straight('W', |s| {
            s.polyline(&[(0.05, 0.1), (0.275, 0.9), (0.5, 0.35), (0.725, 0.9), (0.95, 0.1)]);
        }),
        straight('X', |s| {
            s.polyline(&[(0.15, 0.1), (0.85, 0.9)])
                .polyline(&[(0.85, 0.1), (0.15, 0.9)]);
        }),
        straight('Y', |s| {
            s.polyline(&[(0.15, 0.1), (0.5, 0.5)])
                .polyline(&[(0.85, 0.1), (0.5, 0.5), (0.5, 0.9)]);
        }),
        straight('Z', |s| {
            s.polyline(&[(0.15, 0.1), (0.85, 0.1), (0.15, 0.9), (0.85, 0.9)]);
        }),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn find(letter: char) -> LetterTemplate {
        uppercase().into_iter().find(|t| t.letter == letter).unwrap()
    }

    #[test]
    fn arcs_stay_on_their_ellipse() {
        let o = find('O');
        assert_eq!(o.strokes.len(), 1);
        for p in &o.strokes[0] {
            let d = p.distance(Vec2::new(0.5, 0.5));
            assert!((d - 0.4).abs() < 0.01, "point {p} is {d} from center");
        }
    }

    #[test]
    fn closed_arc_returns_to_start() {
        let o = find('O');
        let stroke = &o.strokes[0];
        let first = stroke[0];
        let last = *stroke.last().unwrap();
        assert!(first.distance(last) < 1e-3);
        assert!(first.distance(Vec2::new(0.5, 0.1)) < 1e-3);
    }

    #[test]
    fn arc_continues_previous_line() {
        let j = find('J');
        assert_eq!(j.strokes.len(), 1);
        let stroke = &j.strokes[0];
        assert!(stroke[0].distance(Vec2::new(0.7, 0.1)) < 1e-4);
        assert!(stroke[1].distance(Vec2::new(0.7, 0.65)) < 1e-4);
        // bottom of the hook touches y = 0.9
        let lowest = stroke.iter().map(|p| p.y).fold(0.0, f32::max);
        assert!((lowest - 0.9).abs() < 0.01);
    }

    #[test]
    fn straight_letters_keep_their_polylines() {
        let m = find('M');
        assert_eq!(m.strokes, vec![vec![
            Vec2::new(0.1, 0.9),
            Vec2::new(0.15, 0.1),
            Vec2::new(0.5, 0.6),
            Vec2::new(0.85, 0.1),
            Vec2::new(0.9, 0.9),
        ]]);
    }

    #[test]
    fn every_letter_has_unique_entry() {
        let letters: String = uppercase().iter().map(|t| t.letter).collect();
        assert_eq!(letters, "ABCDEFGHIJKLMNOPQRSTUVWXYZ");
    }
}

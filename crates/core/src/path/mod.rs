use std::fmt::Write as _;

use serde::{Deserialize, Serialize};

use crate::Point;

/// Control point distance, as a fraction of the neighbour-to-neighbour tangent.
const SMOOTHING: f32 = 0.2;

/// Drawing command handed to the renderer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum PathNode {
    MoveTo(Point),
    LineTo(Point),
    CurveTo {
        control1: Point,
        control2: Point,
        end: Point,
    },
}

impl PathNode {
    /// The point the pen ends on after this command.
    pub fn end(&self) -> Point {
        match *self {
            PathNode::MoveTo(point) | PathNode::LineTo(point) => point,
            PathNode::CurveTo { end, .. } => end,
        }
    }
}

/// Quad outlines: every fourth point starts a new sub-path.
pub fn stack_to_nodes(points: &[Point]) -> Vec<PathNode> {
    points
        .iter()
        .enumerate()
        .map(|(index, &point)| {
            if index % 4 == 0 {
                PathNode::MoveTo(point)
            } else {
                PathNode::LineTo(point)
            }
        })
        .collect()
}

/// A single open polyline.
pub fn polyline_to_nodes(points: &[Point]) -> Vec<PathNode> {
    points
        .iter()
        .enumerate()
        .map(|(index, &point)| {
            if index == 0 {
                PathNode::MoveTo(point)
            } else {
                PathNode::LineTo(point)
            }
        })
        .collect()
}

/// Smooth outline of a projected continuous ribbon.
///
/// The sequence is split in two halves (outer edge, then inner edge walked
/// backwards); each half is drawn as a closed loop of cubic segments. With an
/// odd count the outer edge holds the extra point, matching the even/odd
/// split of the ribbon builder. Fewer than two points fall back to a plain
/// polyline.
pub fn smooth_ribbon_nodes(points: &[Point]) -> Vec<PathNode> {
    if points.len() < 2 {
        return polyline_to_nodes(points);
    }

    let (outer, inner) = points.split_at((points.len() + 1) / 2);
    let mut nodes = Vec::with_capacity(points.len() + 2);
    nodes.push(PathNode::MoveTo(outer[outer.len() - 1]));
    push_closed_curve(&mut nodes, outer);
    nodes.push(PathNode::LineTo(inner[inner.len() - 1]));
    push_closed_curve(&mut nodes, inner);
    nodes
}

fn push_closed_curve(nodes: &mut Vec<PathNode>, ring: &[Point]) {
    let len = ring.len();
    let at = |offset: isize| ring[offset.rem_euclid(len as isize) as usize];

    for i in 0..len as isize {
        let before_previous = at(i - 2);
        let previous = at(i - 1);
        let current = at(i);
        let next = at(i + 1);

        nodes.push(PathNode::CurveTo {
            control1: previous + (current - before_previous) * SMOOTHING,
            control2: current + (previous - next) * SMOOTHING,
            end: current,
        });
    }
}

/// Serialises nodes as SVG path data (`M`, `L`, `C` commands).
pub fn to_svg_path_data(nodes: &[PathNode]) -> String {
    let mut data = String::new();
    for node in nodes {
        if !data.is_empty() {
            data.push(' ');
        }
        // Writing into a String cannot fail.
        let _ = match *node {
            PathNode::MoveTo(p) => write!(data, "M{} {}", p.x, p.y),
            PathNode::LineTo(p) => write!(data, "L{} {}", p.x, p.y),
            PathNode::CurveTo {
                control1: c1,
                control2: c2,
                end,
            } => write!(
                data,
                "C{} {} {} {} {} {}",
                c1.x, c1.y, c2.x, c2.y, end.x, end.y
            ),
        };
    }
    data
}

#[cfg(test)]
mod tests {
    use super::*;

    fn points(n: usize) -> Vec<Point> {
        (0..n).map(|i| Point::new(i as f32, (i * i) as f32)).collect()
    }

    #[test]
    fn stacks_start_a_new_subpath_every_four_points() {
        let nodes = stack_to_nodes(&points(8));

        let moves: Vec<usize> = nodes
            .iter()
            .enumerate()
            .filter(|(_, node)| matches!(node, PathNode::MoveTo(_)))
            .map(|(index, _)| index)
            .collect();
        assert_eq!(moves, vec![0, 4]);
    }

    #[test]
    fn polyline_moves_once() {
        let nodes = polyline_to_nodes(&points(3));
        assert!(matches!(nodes[0], PathNode::MoveTo(_)));
        assert!(nodes[1..].iter().all(|n| matches!(n, PathNode::LineTo(_))));
    }

    #[test]
    fn ribbon_loops_close_on_their_start() {
        let pts = points(8);
        let nodes = smooth_ribbon_nodes(&pts);

        // move + 4 curves + line + 4 curves
        assert_eq!(nodes.len(), 10);
        assert_eq!(nodes[0], PathNode::MoveTo(pts[3]));
        assert_eq!(nodes[4].end(), pts[3]);
        assert_eq!(nodes[5], PathNode::LineTo(pts[7]));
        assert_eq!(nodes[9].end(), pts[7]);
    }

    #[test]
    fn odd_ribbons_keep_every_point() {
        let pts = points(5);
        let ends: Vec<Point> = smooth_ribbon_nodes(&pts).iter().map(PathNode::end).collect();

        // Outer edge takes the extra point: move + 3 curves, line + 2 curves.
        assert_eq!(ends, vec![pts[2], pts[0], pts[1], pts[2], pts[4], pts[3], pts[4]]);
    }

    #[test]
    fn ribbon_control_points_follow_neighbour_tangents() {
        let square = [
            Point::new(0.0, 0.0),
            Point::new(10.0, 0.0),
            Point::new(10.0, 10.0),
            Point::new(0.0, 10.0),
        ];
        let mut nodes = Vec::new();
        push_closed_curve(&mut nodes, &square);

        // Segment ending at index 1: previous = 0, before previous = 3, next = 2.
        assert_eq!(
            nodes[1],
            PathNode::CurveTo {
                control1: Point::new(2.0, -2.0),
                control2: Point::new(8.0, -2.0),
                end: Point::new(10.0, 0.0),
            }
        );
    }

    #[test]
    fn tiny_ribbons_fall_back_to_polylines() {
        assert!(smooth_ribbon_nodes(&[]).is_empty());
        assert_eq!(smooth_ribbon_nodes(&points(1)).len(), 1);
    }

    #[test]
    fn svg_path_data() {
        let nodes = vec![
            PathNode::MoveTo(Point::new(0.0, 1.5)),
            PathNode::LineTo(Point::new(2.0, 3.0)),
            PathNode::CurveTo {
                control1: Point::new(1.0, 1.0),
                control2: Point::new(2.0, 2.0),
                end: Point::new(3.0, 3.0),
            },
        ];
        assert_eq!(to_svg_path_data(&nodes), "M0 1.5 L2 3 C1 1 2 2 3 3");
    }
}

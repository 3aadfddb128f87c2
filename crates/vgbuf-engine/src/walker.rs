use vgbuf_core::{Edge, IdGen, Point, Technology};

use crate::error::EngineError;
use crate::frontier::Frontier;

fn unit_step(from: Point, to: Point) -> (i32, i32) {
    let dx = (to.x - from.x).signum();
    let dy = (to.y - from.y).signum();
    (dx, dy)
}

/// Whether `cur` lies strictly between `start` and `end` along whichever axis
/// they differ on. The walker keeps stepping while this holds and stops just
/// short of `end`, leaving the final point to be handled separately (without
/// a buffer-insertion attempt there).
fn strictly_between(start: Point, end: Point, cur: Point) -> bool {
    let (lo_x, hi_x) = (start.x.min(end.x), start.x.max(end.x));
    let (lo_y, hi_y) = (start.y.min(end.y), start.y.max(end.y));
    (start.x != end.x && cur.x > lo_x && cur.x < hi_x)
        || (start.y != end.y && cur.y > lo_y && cur.y < hi_y)
}

/// Walks every unit-length point along `edge`, from its child end to its
/// parent end, extending every candidate in `frontier` and branching a
/// buffered sibling at each point. Does not mutate `edge`; the frontier
/// returned holds only unbuffered survivors plus every non-dominated
/// buffered variant created along the way, still open-ended at the parent's
/// location.
pub fn walk_edge(
    mut frontier: Frontier,
    edge: &Edge,
    tech: &Technology,
    idgen: &mut IdGen,
) -> Result<Frontier, EngineError> {
    let oriented = edge.points_toward_parent();

    for pair in oriented.windows(2) {
        let (start, end) = (pair[0], pair[1]);
        let (dx, dy) = unit_step(start, end);
        let mut cur = start;

        loop {
            let len_before = frontier.len();
            for i in 0..len_before {
                frontier.extend_at(i, cur, tech, idgen)?;
            }

            let mut buffered = Vec::with_capacity(len_before);
            for i in 0..len_before {
                buffered.push(frontier.candidate(i).try_insert_buffer(cur, tech, idgen)?);
            }
            for candidate in buffered {
                frontier.insert(candidate);
            }

            cur = Point::new(cur.x + dx, cur.y + dy);
            if !strictly_between(start, end, cur) {
                break;
            }
        }
    }

    if let Some(&last) = oriented.last() {
        let len_before = frontier.len();
        for i in 0..len_before {
            frontier.extend_at(i, last, tech, idgen)?;
        }
    }

    Ok(frontier)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::rc::Rc;
    use vgbuf_core::{EdgeId, Node, NodeId, NodeKind};

    fn tech() -> Technology {
        Technology {
            d_intr: 1.0,
            c_buf: 0.5,
            r_buf: 1.0,
            unit_r: 1.0,
            unit_c: 1.0,
        }
    }

    fn single_sink_frontier() -> Frontier {
        let sink = Rc::new(Node {
            id: NodeId(1),
            x: 0,
            y: 0,
            kind: NodeKind::Terminal {
                c_sink: 0.2,
                q_sink: 1000.0,
            },
            name: "s".into(),
            children: Default::default(),
        });
        let mut f = Frontier::new();
        f.insert(crate::candidate::Candidate::leaf(sink, 0.2, 1000.0));
        f
    }

    #[test]
    fn walking_a_unit_edge_produces_at_least_the_unbuffered_survivor() {
        let edge = Edge {
            id: EdgeId(1),
            parent: NodeId(0),
            child: NodeId(1),
            segments: vec![Point::new(0, 0), Point::new(0, 1)],
        };
        let mut idgen = IdGen::new(10, 10);
        let result = walk_edge(single_sink_frontier(), &edge, &tech(), &mut idgen).unwrap();
        assert!(result.len() >= 1);
        assert!(result.iter().all(|c| c.has_open_edge()));
    }

    #[test]
    fn walking_a_long_wire_can_produce_a_buffered_variant() {
        let edge = Edge {
            id: EdgeId(1),
            parent: NodeId(0),
            child: NodeId(1),
            segments: vec![Point::new(0, 0), Point::new(0, 50)],
        };
        let mut idgen = IdGen::new(10, 10);
        let result = walk_edge(single_sink_frontier(), &edge, &tech(), &mut idgen).unwrap();
        assert!(
            result.len() > 1,
            "a long enough wire should spawn at least one buffered sibling"
        );
    }

    #[test]
    fn walking_a_corner_edge_does_not_mutate_the_input_edge() {
        let edge = Edge {
            id: EdgeId(1),
            parent: NodeId(0),
            child: NodeId(1),
            segments: vec![Point::new(0, 0), Point::new(3, 0), Point::new(3, 3)],
        };
        let before = edge.segments.clone();
        let mut idgen = IdGen::new(10, 10);
        walk_edge(single_sink_frontier(), &edge, &tech(), &mut idgen).unwrap();
        assert_eq!(edge.segments, before);
    }
}

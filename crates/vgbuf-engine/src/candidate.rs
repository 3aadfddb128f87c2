use std::rc::Rc;

use smallvec::smallvec;
use vgbuf_core::{Chain, Edge, EdgeId, IdGen, Node, NodeId, NodeKind, Point, Technology};

use crate::error::EngineError;

/// An edge under construction: the wire leaving the most recently committed
/// node, not yet capped by a node on its far end.
#[derive(Debug, Clone)]
struct OpenEdge {
    id: EdgeId,
    points: Vec<Point>,
}

impl OpenEdge {
    fn length(&self) -> Result<f64, EngineError> {
        vgbuf_core::polyline_length(&self.points)
            .map(|len| len as f64)
            .map_err(EngineError::from)
    }
}

/// One point on the Pareto frontier: a partially (or fully) buffered
/// realization of the subtree rooted at the last node it committed to.
///
/// `nodes` and `edges` hold every node/edge this candidate has committed to
/// so far, oldest first, as a [`Chain`] of [`Rc`]s so that branching a
/// candidate into several speculative buffer insertions is a pointer clone,
/// not a copy of its whole history.
#[derive(Debug, Clone)]
pub struct Candidate {
    nodes: Chain<Rc<Node>>,
    edges: Chain<Rc<Edge>>,
    /// Downstream capacitance at the open end (or, with no open edge, at the
    /// last committed node).
    pub c: f64,
    /// Required arrival time at the open end.
    pub q: f64,
    top_edge: Option<OpenEdge>,
}

impl Candidate {
    /// The starting candidate for a sink: no wire walked yet, downstream
    /// capacitance and RAT taken straight from the sink.
    pub fn leaf(sink: Rc<Node>, c_sink: f64, q_sink: f64) -> Self {
        Self {
            nodes: Chain::new().pushed(sink),
            edges: Chain::new(),
            c: c_sink,
            q: q_sink,
            top_edge: None,
        }
    }

    /// The node this candidate is currently capped at (its most recently
    /// committed node, regardless of whether a wire walk has opened a new
    /// edge above it).
    pub fn top_node(&self) -> &Rc<Node> {
        self.nodes
            .top()
            .expect("a candidate always has at least one committed node")
    }

    pub fn nodes(&self) -> &Chain<Rc<Node>> {
        &self.nodes
    }

    pub fn edges(&self) -> &Chain<Rc<Edge>> {
        &self.edges
    }

    /// Reconstructs a capped candidate (no open edge) directly from its
    /// parts. Used by subtree merging, which rebuilds the node/edge chains
    /// from scratch rather than extending an existing candidate.
    pub fn from_parts(nodes: Chain<Rc<Node>>, edges: Chain<Rc<Edge>>, c: f64, q: f64) -> Self {
        Self {
            nodes,
            edges,
            c,
            q,
            top_edge: None,
        }
    }

    pub fn has_open_edge(&self) -> bool {
        self.top_edge.is_some()
    }

    /// Extends the open wire to `to`, or opens a fresh one from the last
    /// committed node if none is open yet. Idempotent: calling this with the
    /// open end's current location is a no-op.
    pub fn extend_top_edge(
        &mut self,
        to: Point,
        tech: &Technology,
        idgen: &mut IdGen,
    ) -> Result<(), EngineError> {
        match &mut self.top_edge {
            None => {
                let top_point = self.top_node().point();
                if !top_point.shares_axis_with(to) {
                    return Err(EngineError::NonAdjacentExtension {
                        from: top_point,
                        to,
                    });
                }
                let open = OpenEdge {
                    id: idgen.next_edge_id(),
                    points: vec![top_point, to],
                };
                let len = open.length()?;
                let c_load = self.c;
                self.c += tech.edge_capacitance(len);
                self.q -= tech.edge_delay(len, c_load);
                self.top_edge = Some(open);
            }
            Some(open) => {
                let old_len = open.length()?;
                let n = open.points.len();
                let (p1, p2) = (open.points[n - 2], open.points[n - 1]);

                let collinear = (p1.x == p2.x && p2.x == to.x) || (p1.y == p2.y && p2.y == to.y);
                let turns_corner =
                    (p1.x == p2.x && p2.y == to.y) || (p1.y == p2.y && p2.x == to.x);

                if collinear {
                    open.points[n - 1] = to;
                } else if turns_corner {
                    open.points.push(to);
                } else {
                    return Err(EngineError::NonRectilinearExtension { a: p1, b: p2, to });
                }

                let new_len = open.length()?;
                let c_load = self.c - tech.edge_capacitance(old_len);
                self.c += tech.edge_capacitance(new_len) - tech.edge_capacitance(old_len);
                self.q += tech.edge_delay(old_len, c_load) - tech.edge_delay(new_len, c_load);
            }
        }
        Ok(())
    }

    fn commit_open_edge(&self, new_parent: NodeId) -> Result<Rc<Edge>, EngineError> {
        let open = self
            .top_edge
            .as_ref()
            .ok_or(EngineError::InstallWithoutTopEdge)?;
        let mut segments = open.points.clone();
        segments.reverse();
        Ok(Rc::new(Edge {
            id: open.id,
            parent: new_parent,
            child: self.top_node().id,
            segments,
        }))
    }

    /// Speculatively inserts a buffer at the open wire's current point,
    /// returning a new candidate without modifying `self`. The clone this
    /// implies is cheap: only the scalar fields and the open-edge buffer are
    /// copied, the committed history is shared.
    pub fn try_insert_buffer(
        &self,
        at: Point,
        tech: &Technology,
        idgen: &mut IdGen,
    ) -> Result<Candidate, EngineError> {
        if self.top_edge.is_none() {
            return Err(EngineError::BufferWithoutTopEdge);
        }

        let buf_id = idgen.next_node_id();
        let buf_node = Rc::new(Node {
            id: buf_id,
            x: at.x,
            y: at.y,
            kind: NodeKind::Buffer,
            name: format!("buf{}", buf_id.0),
            children: smallvec![self.top_node().id],
        });
        let committed_edge = self.commit_open_edge(buf_node.id)?;

        let mut next = Candidate {
            nodes: self.nodes.pushed(buf_node),
            edges: self.edges.pushed(committed_edge),
            c: tech.c_buf,
            q: self.q - tech.buffer_delay(self.c),
            top_edge: None,
        };
        next.extend_top_edge(at, tech, idgen)?;
        Ok(next)
    }

    /// Caps the open wire at `template`, an internal node from the input
    /// tree (a Steiner junction or the driving buffer). Returns a new
    /// candidate; `self` is untouched.
    pub fn install_top_node(
        &self,
        template: &Node,
        tech: &Technology,
    ) -> Result<Candidate, EngineError> {
        let (c, q) = match template.kind {
            NodeKind::Buffer => (tech.c_buf, self.q - tech.buffer_delay(self.c)),
            NodeKind::Steiner => (self.c, self.q),
            NodeKind::Terminal { .. } => return Err(EngineError::InstallTerminalAsTopNode),
        };

        let new_node = Rc::new(Node {
            id: template.id,
            x: template.x,
            y: template.y,
            kind: template.kind,
            name: template.name.clone(),
            children: smallvec![self.top_node().id],
        });
        let committed_edge = self.commit_open_edge(new_node.id)?;

        Ok(Candidate {
            nodes: self.nodes.pushed(new_node),
            edges: self.edges.pushed(committed_edge),
            c,
            q,
            top_edge: None,
        })
    }
}

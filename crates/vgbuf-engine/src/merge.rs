use std::rc::Rc;

use vgbuf_core::{Chain, Edge, Node};

use crate::candidate::Candidate;
use crate::error::EngineError;
use crate::frontier::Frontier;

fn flatten<T: Clone>(chain: &Chain<T>) -> Vec<T> {
    chain.to_vec_oldest_first()
}

fn rebuild<T>(items: Vec<T>) -> Chain<T> {
    items.into_iter().fold(Chain::new(), |chain, item| chain.pushed(item))
}

/// Merges two candidates that are both capped at the same internal node
/// (reached via different children), combining their downstream
/// capacitances, taking the worse (minimum) RAT, and reconstructing the
/// shared top node with both children attached.
fn merge_pair(a: &Candidate, b: &Candidate) -> Result<Candidate, EngineError> {
    let top_a = a.top_node();
    let top_b = b.top_node();
    if top_a.id != top_b.id {
        return Err(EngineError::MergeTopNodeMismatch);
    }

    let mut children = top_a.children.clone();
    children.extend(top_b.children.iter().copied());

    let merged_top = Rc::new(Node {
        id: top_a.id,
        x: top_a.x,
        y: top_a.y,
        kind: top_a.kind,
        name: top_a.name.clone(),
        children,
    });

    let mut nodes = flatten(&a.nodes().without_top());
    nodes.extend(flatten(&b.nodes().without_top()));
    let mut node_chain = rebuild(nodes);
    node_chain = node_chain.pushed(merged_top);

    let mut edges: Vec<Rc<Edge>> = flatten(a.edges());
    edges.extend(flatten(b.edges()));
    let edge_chain = rebuild(edges);

    Ok(Candidate::from_parts(
        node_chain,
        edge_chain,
        a.c + b.c,
        a.q.min(b.q),
    ))
}

/// Folds two subtree frontiers into one, pairing every candidate in `a` with
/// every candidate in `b` and Pareto-pruning the result. An empty input
/// frontier (the identity case for the very first child) passes the other
/// side through untouched.
pub fn merge_frontiers(a: Frontier, b: Frontier) -> Result<Frontier, EngineError> {
    if a.is_empty() {
        return Ok(b);
    }
    if b.is_empty() {
        return Ok(a);
    }

    let mut merged = Frontier::new();
    for ca in a.iter() {
        for cb in b.iter() {
            merged.insert(merge_pair(ca, cb)?);
        }
    }
    Ok(merged)
}

//! Connection rules of the editor.
//!
//! Data travels strictly in one direction:
//!
//! ```text
//! Service ──► Modelize ══► Egress ──► Service
//!                  ╚═════► Warehouse
//! ```
//!
//! A service may also feed another service directly. The rules below decide
//! whether a proposed edge is legal and which glyph it carries; they never
//! touch the graph themselves.

use ahash::{AHashMap, AHashSet};
use tracing::trace;

use crate::error::{Handle, Rejection};
use crate::model::{Edge, EdgeShape, Node, NodeKind, NodeType, Stage};
use crate::prefab::timestamp_millis;

/// Checks a proposed `source -> target` edge against the existing `edges`.
///
/// Returns the shape the edge should carry when it is accepted.
pub fn evaluate(source: &Node, target: &Node, edges: &[Edge]) -> Result<EdgeShape, Rejection> {
    if source.id == target.id {
        return Err(Rejection::SelfLoop(source.id.clone()));
    }

    if edges.iter().any(|e| e.connects(&source.id, &target.id)) {
        return Err(Rejection::Duplicate {
            source_id: source.id.clone(),
            target_id: target.id.clone(),
        });
    }

    let shape = check_kinds(source, target)?;
    check_capacity(source, target, edges)?;

    if reaches(&target.id, &source.id, edges) {
        return Err(Rejection::Cycle {
            source_id: source.id.clone(),
            target_id: target.id.clone(),
        });
    }

    Ok(shape)
}

/// Id given to a newly drawn edge.
pub fn edge_id(source: &str, target: &str) -> String {
    format!("{}-{}-{}", source, target, timestamp_millis())
}

/// Validates the proposal and builds the edge to commit.
pub fn try_connect(source: &Node, target: &Node, edges: &[Edge]) -> Result<Edge, Rejection> {
    match evaluate(source, target, edges) {
        Ok(shape) => Ok(Edge::new(
            edge_id(&source.id, &target.id),
            source.id.clone(),
            target.id.clone(),
            shape,
        )),
        Err(rejection) => {
            trace!(source = %source.id, target = %target.id, %rejection, "connection rejected");
            Err(rejection)
        }
    }
}

fn check_kinds(source: &Node, target: &Node) -> Result<EdgeShape, Rejection> {
    let illegal = || Rejection::IllegalTarget {
        source_type: source.node_type(),
        target_type: target.node_type(),
    };

    match &source.kind {
        NodeKind::Service(_) => match target.node_type() {
            NodeType::Service | NodeType::Stage(Stage::Modelize) => Ok(EdgeShape::Circle),
            _ => Err(illegal()),
        },
        NodeKind::Stage(stage) => match (stage.stage, &target.kind) {
            (Stage::Modelize, NodeKind::Stage(_)) => {
                if target.id == stage.partner_id {
                    Ok(EdgeShape::Square)
                } else {
                    Err(Rejection::NotPartner {
                        expected: stage.partner_id.clone(),
                        found: target.id.clone(),
                    })
                }
            }
            (Stage::Modelize, NodeKind::Warehouse(_)) => Ok(EdgeShape::Square),
            (Stage::Egress, NodeKind::Service(_)) => Ok(EdgeShape::Circle),
            _ => Err(illegal()),
        },
        NodeKind::Container(_) | NodeKind::Warehouse(_) | NodeKind::Annotation(_) => {
            Err(illegal())
        }
    }
}

/// Maximum number of edges leaving a node.
fn outgoing_capacity(node: &Node) -> usize {
    match node.node_type() {
        NodeType::Service | NodeType::Stage(Stage::Egress) => 1,
        // partner + warehouse
        NodeType::Stage(Stage::Modelize) => 2,
        _ => 0,
    }
}

/// Maximum number of edges entering a node; `None` means unbounded.
fn incoming_capacity(node: &Node) -> Option<usize> {
    match node.node_type() {
        NodeType::Service | NodeType::Stage(_) => Some(1),
        NodeType::Warehouse => None,
        _ => Some(0),
    }
}

fn check_capacity(source: &Node, target: &Node, edges: &[Edge]) -> Result<(), Rejection> {
    if edges.iter().filter(|e| e.source == source.id).count() >= outgoing_capacity(source) {
        return Err(Rejection::HandleOccupied {
            node_id: source.id.clone(),
            handle: Handle::Pull,
        });
    }
    if let Some(limit) = incoming_capacity(target) {
        if edges.iter().filter(|e| e.target == target.id).count() >= limit {
            return Err(Rejection::HandleOccupied {
                node_id: target.id.clone(),
                handle: Handle::Push,
            });
        }
    }
    Ok(())
}

/// Whether `to` is reachable from `from` along existing edges.
fn reaches(from: &str, to: &str, edges: &[Edge]) -> bool {
    let mut outgoing: AHashMap<&str, Vec<&str>> = AHashMap::new();
    for edge in edges {
        outgoing
            .entry(edge.source.as_str())
            .or_default()
            .push(edge.target.as_str());
    }

    let mut seen = AHashSet::new();
    let mut stack = vec![from];
    while let Some(current) = stack.pop() {
        if current == to {
            return true;
        }
        if !seen.insert(current) {
            continue;
        }
        if let Some(next) = outgoing.get(current) {
            stack.extend(next.iter().copied());
        }
    }
    false
}

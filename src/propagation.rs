//! Status propagation.
//!
//! Source services carry the only authored status. Every stage, and every
//! service fed by another node, mirrors the status of the node on its push
//! handle; with nothing plugged in there it falls back to `Unknown`. Edges
//! receive a snapshot of their source's resolved status so the canvas can
//! pick an [`EdgeIndicator`](crate::model::EdgeIndicator) without a lookup.

use ahash::{AHashMap, AHashSet};

use crate::model::{Edge, Node, NodeKind, Status};

struct Resolver<'a> {
    nodes: AHashMap<&'a str, &'a Node>,
    // target -> source of its first incoming edge
    upstream: AHashMap<&'a str, &'a str>,
    resolved: AHashMap<&'a str, Status>,
    visiting: AHashSet<&'a str>,
}

impl<'a> Resolver<'a> {
    fn new(nodes: &'a [Node], edges: &'a [Edge]) -> Self {
        let mut upstream = AHashMap::new();
        for edge in edges {
            upstream
                .entry(edge.target.as_str())
                .or_insert(edge.source.as_str());
        }
        Self {
            nodes: nodes.iter().map(|n| (n.id.as_str(), n)).collect(),
            upstream,
            resolved: AHashMap::new(),
            visiting: AHashSet::new(),
        }
    }

    fn resolve(&mut self, id: &'a str) -> Status {
        if let Some(status) = self.resolved.get(id) {
            return *status;
        }
        let Some(node) = self.nodes.get(id).copied() else {
            return Status::Unknown;
        };
        // A cycle can only come from hand-edited input; treat it as unfed.
        if !self.visiting.insert(id) {
            return Status::Unknown;
        }

        let upstream = self.upstream.get(id).copied();
        let status = match &node.kind {
            NodeKind::Service(data) => match upstream {
                Some(source) => self.resolve(source),
                None => data.current_status(),
            },
            NodeKind::Stage(_) => upstream.map_or(Status::Unknown, |source| self.resolve(source)),
            NodeKind::Container(_) | NodeKind::Warehouse(_) | NodeKind::Annotation(_) => {
                Status::Unknown
            }
        };

        self.visiting.remove(id);
        self.resolved.insert(id, status);
        status
    }
}

/// Computes the displayed status of every node without mutating anything.
pub fn resolve_statuses(nodes: &[Node], edges: &[Edge]) -> AHashMap<String, Status> {
    let mut resolver = Resolver::new(nodes, edges);
    nodes
        .iter()
        .map(|node| (node.id.clone(), resolver.resolve(&node.id)))
        .collect()
}

/// Rewrites every derived status in place and returns how many nodes changed.
pub fn propagate(nodes: &mut [Node], edges: &mut [Edge]) -> usize {
    let resolved = resolve_statuses(nodes, edges);
    let fed: AHashSet<String> = edges.iter().map(|e| e.target.clone()).collect();

    let mut changed = 0;
    for node in nodes.iter_mut() {
        let status = resolved.get(&node.id).copied().unwrap_or_default();
        let is_fed = fed.contains(&node.id);
        match &mut node.kind {
            NodeKind::Stage(data) if data.status != status => {
                data.status = status;
                changed += 1;
            }
            NodeKind::Service(data) if is_fed && data.status != Some(status) => {
                data.status = Some(status);
                changed += 1;
            }
            _ => {}
        }
    }

    for edge in edges.iter_mut() {
        edge.data.status = Some(resolved.get(&edge.source).copied().unwrap_or_default());
    }

    changed
}

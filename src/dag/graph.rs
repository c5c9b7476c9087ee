// src/dag/graph.rs

use std::collections::HashMap;

use petgraph::dot::{Config, Dot};
use petgraph::graphmap::DiGraphMap;
use tracing::{debug, warn};

use crate::dag::Diagnostic;
use crate::types::UnitId;
use crate::unit::UnitRegistry;

/// Adjacency information for one unit.
#[derive(Debug, Clone)]
pub struct GraphNode {
    pub id: UnitId,
    /// Every dependency the unit declared, in declaration order.
    pub dependencies: Vec<UnitId>,
    /// Units that declared this one as a dependency, in registry order.
    ///
    /// Derived from `dependencies` on every build; never edited by hand.
    pub dependents: Vec<UnitId>,
    /// Declared dependencies with no matching unit.
    pub unresolved: Vec<UnitId>,
    /// Indices of the dependencies that did resolve.
    resolved: Vec<usize>,
}

/// Dependency graph for one resolution pass.
///
/// Node indices follow registry order, so index `0` is the first unit that
/// was registered.
#[derive(Debug, Clone)]
pub struct DependencyGraph {
    nodes: Vec<GraphNode>,
    index: HashMap<UnitId, usize>,
    diagnostics: Vec<Diagnostic>,
}

impl DependencyGraph {
    pub fn build(registry: &UnitRegistry) -> Self {
        let mut index: HashMap<UnitId, usize> = HashMap::with_capacity(registry.len());
        let mut nodes: Vec<GraphNode> = Vec::with_capacity(registry.len());

        // First pass: one node per unit with a copy of its declared deps.
        for (idx, unit) in registry.iter().enumerate() {
            index.insert(unit.id().to_string(), idx);
            nodes.push(GraphNode {
                id: unit.id().to_string(),
                dependencies: unit.dependencies().to_vec(),
                dependents: Vec::new(),
                unresolved: Vec::new(),
                resolved: Vec::new(),
            });
        }

        // Second pass: resolve deps and derive the reverse edges.
        let mut diagnostics = Vec::new();
        for idx in 0..nodes.len() {
            let source = nodes[idx].id.clone();
            let deps = nodes[idx].dependencies.clone();

            for dep in deps {
                match index.get(&dep) {
                    Some(&target) => {
                        nodes[idx].resolved.push(target);
                        nodes[target].dependents.push(source.clone());
                    }
                    None => {
                        warn!(
                            unit = %source,
                            missing = %dep,
                            "unresolved dependency; edge omitted"
                        );
                        nodes[idx].unresolved.push(dep.clone());
                        diagnostics.push(Diagnostic::UnresolvedDependency {
                            unit: source.clone(),
                            missing: dep,
                        });
                    }
                }
            }
        }

        debug!(
            units = nodes.len(),
            unresolved = diagnostics.len(),
            "dependency graph built"
        );

        Self {
            nodes,
            index,
            diagnostics,
        }
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Nodes in registry order.
    pub fn nodes(&self) -> &[GraphNode] {
        &self.nodes
    }

    pub fn node(&self, id: &str) -> Option<&GraphNode> {
        self.index.get(id).map(|&idx| &self.nodes[idx])
    }

    pub fn index_of(&self, id: &str) -> Option<usize> {
        self.index.get(id).copied()
    }

    pub fn units(&self) -> impl Iterator<Item = &str> {
        self.nodes.iter().map(|n| n.id.as_str())
    }

    /// Declared dependencies of a unit, resolved or not.
    pub fn dependencies_of(&self, id: &str) -> &[UnitId] {
        self.node(id)
            .map(|n| n.dependencies.as_slice())
            .unwrap_or(&[])
    }

    /// Units that list `id` as a dependency.
    pub fn dependents_of(&self, id: &str) -> &[UnitId] {
        self.node(id)
            .map(|n| n.dependents.as_slice())
            .unwrap_or(&[])
    }

    pub fn unresolved_of(&self, id: &str) -> &[UnitId] {
        self.node(id)
            .map(|n| n.unresolved.as_slice())
            .unwrap_or(&[])
    }

    /// Unresolved-dependency warnings collected while building.
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub(crate) fn resolved_deps(&self, idx: usize) -> &[usize] {
        &self.nodes[idx].resolved
    }

    pub(crate) fn id_at(&self, idx: usize) -> &str {
        &self.nodes[idx].id
    }

    /// The resolved edges as a petgraph map.
    ///
    /// Edge direction: dependency -> dependent. For `B` depending on `A`
    /// we add `A -> B`.
    pub fn to_graphmap(&self) -> DiGraphMap<&str, ()> {
        let mut graph: DiGraphMap<&str, ()> = DiGraphMap::new();

        for node in &self.nodes {
            graph.add_node(node.id.as_str());
        }

        for node in &self.nodes {
            for &dep in &node.resolved {
                graph.add_edge(self.nodes[dep].id.as_str(), node.id.as_str(), ());
            }
        }

        graph
    }

    /// Graphviz rendering of the resolved edges, for inspection tools.
    pub fn to_dot(&self) -> String {
        let graph = self.to_graphmap();
        format!("{:?}", Dot::with_config(&graph, &[Config::EdgeNoLabel]))
    }
}

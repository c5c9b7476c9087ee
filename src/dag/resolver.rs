// src/dag/resolver.rs

//! Topological sort with cycle detection.
//!
//! The walk goes from each unit down to its dependencies and appends a unit
//! once everything below it is done, so dependencies come out first. Each
//! node carries one of three marks:
//!
//! - `Unvisited`: not reached yet.
//! - `InProgress`: on the current walk path. Reaching it again means the
//!   path loops back on itself.
//! - `Done`: already appended.
//!
//! A back-edge into an `InProgress` node is recorded as a
//! [`Diagnostic::CycleDetected`] and the edge is skipped; the walk carries on
//! so the rest of the graph still resolves. Every node that lies on some
//! loop (any strongly connected component of two or more units, or a unit
//! that depends on itself) is flagged cycle-affected. Each node is appended
//! exactly once, so the output always has one entry per unit.
//!
//! Ties between unconstrained units are broken by the order the walk first
//! reaches them: entry points and each unit's dependency list are visited in
//! [`StartOrder`] order, which makes repeated runs produce identical output.
//!
//! The walk keeps its own frame stack rather than recursing, so long
//! dependency chains cannot exhaust the thread stack.

use petgraph::algo::kosaraju_scc;
use tracing::{debug, warn};

use crate::dag::{DependencyGraph, Diagnostic};
use crate::types::StartOrder;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mark {
    Unvisited,
    InProgress,
    Done,
}

/// One unit on the walk path, and how far through its dependencies we are.
#[derive(Debug)]
struct Frame {
    node: usize,
    cursor: usize,
}

/// Output of [`Resolver::linearize`], indexed by graph node index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Linearization {
    /// Node indices in run order (first entry runs first).
    pub order: Vec<usize>,
    /// `cycle_affected[i]` is set when node `i` sits on a detected cycle.
    pub cycle_affected: Vec<bool>,
    /// One `CycleDetected` per back-edge found.
    pub diagnostics: Vec<Diagnostic>,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Resolver {
    start_order: StartOrder,
}

impl Resolver {
    pub fn new(start_order: StartOrder) -> Self {
        Self { start_order }
    }

    pub fn start_order(&self) -> StartOrder {
        self.start_order
    }

    /// Produce a linear order over every node of `graph`.
    pub fn linearize(&self, graph: &DependencyGraph) -> Linearization {
        let len = graph.len();
        let adjacency = self.ordered_adjacency(graph);

        let mut marks = vec![Mark::Unvisited; len];
        let mut cycle_affected = vec![false; len];
        let mut order = Vec::with_capacity(len);
        let mut diagnostics = Vec::new();
        let mut path: Vec<Frame> = Vec::new();

        for entry in self.entry_points(graph) {
            if marks[entry] != Mark::Unvisited {
                continue;
            }

            marks[entry] = Mark::InProgress;
            path.push(Frame {
                node: entry,
                cursor: 0,
            });

            while let Some(frame) = path.last_mut() {
                let current = frame.node;
                let Some(&dep) = adjacency[current].get(frame.cursor) else {
                    // All dependencies handled: the unit is placed now.
                    path.pop();
                    marks[current] = Mark::Done;
                    order.push(current);
                    debug!(
                        unit = %graph.id_at(current),
                        position = order.len(),
                        "unit linearized"
                    );
                    continue;
                };
                frame.cursor += 1;

                match marks[dep] {
                    Mark::Done => {}
                    Mark::Unvisited => {
                        marks[dep] = Mark::InProgress;
                        path.push(Frame {
                            node: dep,
                            cursor: 0,
                        });
                    }
                    Mark::InProgress => {
                        let diagnostic =
                            Self::record_cycle(graph, &path, dep, &mut cycle_affected);
                        diagnostics.push(diagnostic);
                    }
                }
            }
        }

        if !diagnostics.is_empty() {
            Self::flag_components(graph, &mut cycle_affected);
        }

        debug!(
            units = order.len(),
            cycles = diagnostics.len(),
            start_order = %self.start_order,
            "linearization finished"
        );

        Linearization {
            order,
            cycle_affected,
            diagnostics,
        }
    }

    /// Flag every member of a strongly connected component with more than
    /// one node, and every self-dependent node.
    ///
    /// A back-edge only exposes the loop on the current path; a unit that
    /// closes a second loop through an already finished node is found here.
    fn flag_components(graph: &DependencyGraph, cycle_affected: &mut [bool]) {
        let map = graph.to_graphmap();
        for component in kosaraju_scc(&map) {
            let looped = component.len() > 1
                || component
                    .first()
                    .is_some_and(|&id| map.contains_edge(id, id));
            if !looped {
                continue;
            }
            for id in component {
                if let Some(idx) = graph.index_of(id) {
                    cycle_affected[idx] = true;
                }
            }
        }
    }

    /// Flag every node on the loop `dep -> ... -> top of path -> dep`.
    fn record_cycle(
        graph: &DependencyGraph,
        path: &[Frame],
        dep: usize,
        cycle_affected: &mut [bool],
    ) -> Diagnostic {
        // InProgress nodes are exactly the nodes on the path.
        let start = path.iter().rposition(|f| f.node == dep).unwrap_or(0);

        let mut loop_ids: Vec<String> = path[start..]
            .iter()
            .map(|f| {
                cycle_affected[f.node] = true;
                graph.id_at(f.node).to_string()
            })
            .collect();
        loop_ids.push(graph.id_at(dep).to_string());

        warn!(
            unit = %graph.id_at(dep),
            cycle = ?loop_ids,
            "dependency cycle detected; edge skipped"
        );

        Diagnostic::CycleDetected {
            unit: graph.id_at(dep).to_string(),
            path: loop_ids,
        }
    }

    fn entry_points(&self, graph: &DependencyGraph) -> Vec<usize> {
        let mut entries: Vec<usize> = (0..graph.len()).collect();
        if self.start_order == StartOrder::Lexicographic {
            entries.sort_by(|&a, &b| graph.id_at(a).cmp(graph.id_at(b)));
        }
        entries
    }

    fn ordered_adjacency(&self, graph: &DependencyGraph) -> Vec<Vec<usize>> {
        (0..graph.len())
            .map(|idx| {
                let mut deps = graph.resolved_deps(idx).to_vec();
                if self.start_order == StartOrder::Lexicographic {
                    deps.sort_by(|&a, &b| graph.id_at(a).cmp(graph.id_at(b)));
                }
                deps
            })
            .collect()
    }
}

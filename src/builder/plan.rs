// src/builder/plan.rs

use std::collections::{BTreeMap, HashSet, VecDeque};

use petgraph::algo::toposort;
use petgraph::graphmap::DiGraphMap;

use crate::errors::{BuildError, Result};
use crate::task::Task;

use super::makers::MakerIndex;

/// Build the maker graph reachable from `root`.
///
/// Edge direction: task -> maker. For a task `A` with a dependency made by
/// `B` we add the edge `A -> B`.
fn reachable_graph<'a>(
    tasks: &'a BTreeMap<String, Task>,
    makers: &'a MakerIndex,
    root: &'a str,
) -> DiGraphMap<&'a str, ()> {
    let mut graph: DiGraphMap<&str, ()> = DiGraphMap::new();
    let mut queue = VecDeque::from([root]);
    graph.add_node(root);

    while let Some(name) = queue.pop_front() {
        let Some(task) = tasks.get(name) else {
            continue;
        };
        for dep in task.dependencies() {
            if let Some(maker) = makers.maker_of(dep) {
                if !graph.contains_node(maker) {
                    queue.push_back(maker);
                }
                graph.add_edge(name, maker, ());
            }
        }
    }

    graph
}

/// Tasks that a run of `root` may visit, makers first, `root` last.
pub(crate) fn execution_plan(
    tasks: &BTreeMap<String, Task>,
    makers: &MakerIndex,
    root: &str,
) -> Result<Vec<String>> {
    if !tasks.contains_key(root) {
        return Err(BuildError::TaskNotFound(root.to_string()));
    }

    let graph = reachable_graph(tasks, makers, root);

    // A topological sort will fail if there is a cycle.
    if let Err(cycle) = toposort(&graph, None) {
        return Err(BuildError::Cycle(format!(
            "cycle in maker graph involving task '{}'",
            cycle.node_id()
        )));
    }

    let mut order = Vec::with_capacity(graph.node_count());
    let mut visited = HashSet::new();
    visit(tasks, makers, root, &mut visited, &mut order);

    Ok(order)
}

/// Post-order walk over makers in declared dependency order, the same order
/// a run reaches them in. Only called on acyclic graphs.
fn visit<'a>(
    tasks: &'a BTreeMap<String, Task>,
    makers: &'a MakerIndex,
    name: &'a str,
    visited: &mut HashSet<&'a str>,
    order: &mut Vec<String>,
) {
    if !visited.insert(name) {
        return;
    }

    if let Some(task) = tasks.get(name) {
        for dep in task.dependencies() {
            if let Some(maker) = makers.maker_of(dep) {
                visit(tasks, makers, maker, visited, order);
            }
        }
    }

    order.push(name.to_string());
}

//! Dependency closure and TOC construction.
//!
//! Starting from one entry module, every module reachable through
//! unconditional imports is collected in breadth-first discovery order, the
//! list is settled so that importers precede the modules they import, and
//! the result is reversed once to give load order.

use crate::graph::GraphProvider;
use freeze_schema::{ModuleName, ModuleRecord, Toc};
use std::cmp::Reverse;
use std::collections::{BinaryHeap, HashMap, VecDeque};
use thiserror::Error;

/// Errors raised while computing a closure.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ClosureError {
    /// The entry module, or a module it imports unconditionally, is unknown to the provider.
    #[error("module '{name}' could not be resolved{}", importer_suffix(.imported_by))]
    Resolution {
        name: String,
        imported_by: Option<ModuleName>,
    },
}

impl ClosureError {
    /// Name of the module that failed to resolve.
    pub fn name(&self) -> &str {
        match self {
            Self::Resolution { name, .. } => name,
        }
    }
}

fn importer_suffix(importer: &Option<ModuleName>) -> String {
    importer
        .as_ref()
        .map(|m| format!(" (imported by '{m}')"))
        .unwrap_or_default()
}

/// Compute the load-ordered closure of `entry`.
///
/// Conditional imports are skipped. Deferred imports pull their targets into
/// the closure but do not constrain order. Builtin modules are never listed.
/// Modules on an import cycle keep their discovery order relative to each
/// other; each still appears exactly once.
///
/// # Errors
///
/// Returns [`ClosureError::Resolution`] for the first name, in traversal
/// order, that the provider cannot resolve. No partial TOC is produced.
pub fn compute_closure<G>(entry: &str, graph: &G) -> Result<Toc, ClosureError>
where
    G: GraphProvider + ?Sized,
{
    let roots = graph.resolve(entry);
    if roots.is_empty() {
        return Err(ClosureError::Resolution {
            name: entry.to_string(),
            imported_by: None,
        });
    }

    let mut discovered: Vec<&ModuleRecord> = Vec::new();
    let mut visited: HashMap<&str, usize> = HashMap::new();
    let mut queue: VecDeque<&ModuleRecord> = VecDeque::new();
    // (importer, imported) pairs, as indices into `discovered`.
    let mut constraints: Vec<(usize, usize)> = Vec::new();

    // Builtin roots are neither listed nor expanded.
    for root in roots {
        if !root.is_builtin() && !visited.contains_key(root.name.as_str()) {
            visited.insert(root.name.as_str(), discovered.len());
            discovered.push(root);
            queue.push_back(root);
        }
    }

    while let Some(module) = queue.pop_front() {
        let from = visited.get(module.name.as_str()).copied();

        for edge in graph.edges_of(module) {
            if edge.conditional {
                continue;
            }

            let targets = graph.resolve(&edge.target);
            if targets.is_empty() {
                return Err(ClosureError::Resolution {
                    name: edge.target.clone(),
                    imported_by: Some(module.name.clone()),
                });
            }

            for target in targets {
                if target.is_builtin() {
                    continue;
                }

                let to = if let Some(&idx) = visited.get(target.name.as_str()) {
                    idx
                } else {
                    let idx = discovered.len();
                    tracing::debug!(module = %target.name, importer = %module.name, "discovered");
                    visited.insert(target.name.as_str(), idx);
                    discovered.push(target);
                    queue.push_back(target);
                    idx
                };

                if edge.orders_load()
                    && let Some(from) = from.filter(|&f| f != to)
                {
                    constraints.push((from, to));
                }
            }
        }
    }

    let mut order = settle(&discovered, &constraints);
    order.reverse();

    tracing::debug!(entry, modules = order.len(), "closure computed");
    Ok(order.into_iter().map(|i| discovered[i].clone()).collect())
}

/// Order discovered modules so every importer precedes what it imports.
///
/// Kahn's algorithm over the ordering constraints, always taking the
/// lowest discovery index that is ready. When discovery order already
/// satisfies every constraint it is returned unchanged. When nothing is
/// ready, every remaining module waits on an import cycle: the lowest index
/// whose importers outside its own cycle are all placed is released, so only
/// edges inside a cycle are ever relaxed.
fn settle(discovered: &[&ModuleRecord], constraints: &[(usize, usize)]) -> Vec<usize> {
    let n = discovered.len();
    let mut imports: Vec<Vec<usize>> = vec![Vec::new(); n];
    for &(from, to) in constraints {
        imports[from].push(to);
    }

    let component = cycle_components(&imports);
    let mut importers_left = vec![0usize; n];
    // Importers that sit outside the module's own cycle.
    let mut outside_left = vec![0usize; n];
    for &(from, to) in constraints {
        importers_left[to] += 1;
        if component[from] != component[to] {
            outside_left[to] += 1;
        }
    }

    let mut ready: BinaryHeap<Reverse<usize>> = (0..n)
        .filter(|&i| importers_left[i] == 0)
        .map(Reverse)
        .collect();
    let mut placed = vec![false; n];
    let mut order = Vec::with_capacity(n);

    while order.len() < n {
        let next = if let Some(Reverse(i)) = ready.pop() {
            i
        } else {
            let Some(i) = (0..n).find(|&i| !placed[i] && outside_left[i] == 0) else {
                break;
            };
            tracing::debug!(
                module = %discovered[i].name,
                "import cycle; load order within the cycle follows discovery order"
            );
            i
        };

        if placed[next] {
            continue;
        }
        placed[next] = true;
        order.push(next);

        for &to in &imports[next] {
            importers_left[to] -= 1;
            if component[next] != component[to] {
                outside_left[to] -= 1;
            }
            if importers_left[to] == 0 && !placed[to] {
                ready.push(Reverse(to));
            }
        }
    }

    order
}

/// Strongly connected components of the import graph (Kosaraju).
///
/// Returns a component id per module; modules share an id exactly when they
/// lie on a common import cycle.
fn cycle_components(imports: &[Vec<usize>]) -> Vec<usize> {
    const UNASSIGNED: usize = usize::MAX;

    let n = imports.len();
    let mut importers: Vec<Vec<usize>> = vec![Vec::new(); n];
    for (from, targets) in imports.iter().enumerate() {
        for &to in targets {
            importers[to].push(from);
        }
    }

    // First pass: finish order over import edges.
    let mut seen = vec![false; n];
    let mut finished = Vec::with_capacity(n);
    for start in 0..n {
        if seen[start] {
            continue;
        }
        seen[start] = true;
        let mut stack: Vec<(usize, usize)> = vec![(start, 0)];
        while let Some(top) = stack.last_mut() {
            let (node, pos) = *top;
            if let Some(&to) = imports[node].get(pos) {
                top.1 += 1;
                if !seen[to] {
                    seen[to] = true;
                    stack.push((to, 0));
                }
            } else {
                finished.push(node);
                stack.pop();
            }
        }
    }

    // Second pass: collect components over reversed edges.
    let mut component = vec![UNASSIGNED; n];
    let mut next_id = 0;
    for &start in finished.iter().rev() {
        if component[start] != UNASSIGNED {
            continue;
        }
        component[start] = next_id;
        let mut stack = vec![start];
        while let Some(node) = stack.pop() {
            for &from in &importers[node] {
                if component[from] == UNASSIGNED {
                    component[from] = next_id;
                    stack.push(from);
                }
            }
        }
        next_id += 1;
    }

    component
}

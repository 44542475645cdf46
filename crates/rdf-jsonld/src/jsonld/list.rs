//! RDF collection (`rdf:first` / `rdf:rest`) reconstruction.
//!
//! Chains are discovered from their tail (`rdf:rest rdf:nil`) and walked
//! backwards one cell at a time. A chain is only accepted when every cell is
//! a well-formed list node:
//!
//! - blank subject
//! - exactly one `rdf:first` and one `rdf:rest` (an `rdf:type` is tolerated)
//! - referenced by at most one `rdf:rest`
//!
//! Any violation abandons the whole chain, and its cells are serialized as
//! ordinary node objects instead. The same happens to a chain whose head is
//! never used as a property value in the graph, and to a chain that contains
//! itself: in both cases `{"@list": ...}` would have nowhere to go.

use std::collections::{HashMap, HashSet};

use super::node::{ResolvedLists, is_type_slot, object_to_json};
use crate::model::{BlankNode, Object, Quad, Subject, rdf};
use crate::options::FromRdfOptions;

/// Lists found in one graph, scoped to a single serialization call.
#[derive(Debug, Default)]
pub struct ListIndex<'a> {
    lists: ResolvedLists<'a>,
    consumed: HashSet<&'a BlankNode>,
}

impl<'a> ListIndex<'a> {
    /// Find and render every well-formed list among `quads` (one graph).
    pub fn build(quads: &[&'a Quad], options: &FromRdfOptions) -> Self {
        let topology = Topology::scan(quads, options);

        let mut chains: HashMap<&'a BlankNode, Chain<'a>> = HashMap::new();
        for &tail in &topology.tails {
            let Some(chain) = topology.walk_back(tail) else {
                continue;
            };
            if !topology.referenced.contains(chain.head) {
                tracing::debug!(
                    head = %chain.head,
                    "abandoning RDF list: head is never used as a value"
                );
                continue;
            }
            chains.insert(chain.head, chain);
        }

        for head in self_containing(&chains) {
            tracing::debug!(head = %head, "abandoning RDF list: list contains itself");
            chains.remove(head);
        }

        let mut consumed = HashSet::new();
        for chain in chains.values() {
            tracing::trace!(head = %chain.head, len = chain.items.len(), "reconstructed RDF list");
            consumed.extend(chain.cells.iter().copied());
        }

        let lists = render_lists(&chains, options.use_native_types);
        Self { lists, consumed }
    }

    /// True when `node` is a list cell and must not be emitted as a node object.
    pub fn is_consumed(&self, node: &BlankNode) -> bool {
        self.consumed.contains(node)
    }

    pub(crate) fn resolved(&self) -> &ResolvedLists<'a> {
        &self.lists
    }

    #[cfg(test)]
    fn list(&self, head: &BlankNode) -> Option<&[serde_json::Value]> {
        self.lists.get(head).map(Vec::as_slice)
    }

    #[cfg(test)]
    fn is_empty(&self) -> bool {
        self.lists.is_empty()
    }
}

/// Per-cell counts gathered in a single pass over the graph.
#[derive(Default)]
struct Cell<'a> {
    /// Quads with this subject, `rdf:type` excluded.
    properties: usize,
    firsts: Vec<&'a Object>,
}

struct Topology<'a> {
    cells: HashMap<&'a BlankNode, Cell<'a>>,
    /// Subjects whose `rdf:rest` points at the key.
    predecessors: HashMap<&'a BlankNode, Vec<&'a Subject>>,
    /// Blank nodes rendered through `object_to_json` somewhere in the graph.
    referenced: HashSet<&'a BlankNode>,
    tails: Vec<&'a BlankNode>,
}

struct Chain<'a> {
    head: &'a BlankNode,
    cells: Vec<&'a BlankNode>,
    items: Vec<&'a Object>,
}

impl<'a> Topology<'a> {
    fn scan(quads: &[&'a Quad], options: &FromRdfOptions) -> Self {
        let mut cells: HashMap<&'a BlankNode, Cell<'a>> = HashMap::new();
        let mut predecessors: HashMap<&'a BlankNode, Vec<&'a Subject>> = HashMap::new();
        let mut referenced = HashSet::new();
        let mut tails = Vec::new();

        for &quad in quads {
            let predicate = quad.predicate.iri.as_str();
            if let Some(target) = quad.object.as_blank() {
                if predicate == rdf::REST {
                    predecessors.entry(target).or_default().push(&quad.subject);
                }
                if !is_type_slot(predicate, options) {
                    referenced.insert(target);
                }
            }

            let Subject::Blank(subject) = &quad.subject else {
                continue;
            };
            if predicate == rdf::TYPE {
                continue;
            }
            let cell = cells.entry(subject).or_default();
            cell.properties += 1;
            if predicate == rdf::FIRST {
                cell.firsts.push(&quad.object);
            } else if predicate == rdf::REST && quad.object.is_nil() {
                tails.push(subject);
            }
        }

        tails.sort_by(|a, b| a.id.cmp(&b.id));
        tails.dedup();

        Self {
            cells,
            predecessors,
            referenced,
            tails,
        }
    }

    /// Walk from `tail` towards the head. Returns `None` if any cell on the
    /// way is malformed or shared; nothing is consumed in that case.
    fn walk_back(&self, tail: &'a BlankNode) -> Option<Chain<'a>> {
        let mut current = tail;
        let mut cells = Vec::new();
        let mut items = Vec::new();
        let mut seen = HashSet::new();

        loop {
            let cell = self.cells.get(current)?;
            if cell.properties != 2 || cell.firsts.len() != 1 {
                tracing::debug!(cell = %current, "abandoning RDF list: malformed list node");
                return None;
            }
            seen.insert(current);
            cells.push(current);
            items.push(cell.firsts[0]);

            let preds = self
                .predecessors
                .get(current)
                .map(Vec::as_slice)
                .unwrap_or_default();
            match preds {
                [] => break,
                [only] => match *only {
                    Subject::Named(_) => break,
                    Subject::Blank(prev) if !seen.contains(prev) => current = prev,
                    Subject::Blank(_) => {
                        tracing::debug!(cell = %current, "abandoning RDF list: cycle in rdf:rest");
                        return None;
                    }
                },
                _ => {
                    tracing::debug!(
                        cell = %current,
                        predecessors = preds.len(),
                        "abandoning RDF list: shared rdf:rest target"
                    );
                    return None;
                }
            }
        }

        items.reverse();
        Some(Chain {
            head: current,
            cells,
            items,
        })
    }
}

/// Heads of lists that contain themselves, directly or through other lists.
///
/// Tarjan's strongly connected components over the "list item is a list head"
/// relation, driven by an explicit work stack.
fn self_containing<'a>(chains: &HashMap<&'a BlankNode, Chain<'a>>) -> HashSet<&'a BlankNode> {
    let edges: HashMap<&'a BlankNode, Vec<&'a BlankNode>> = chains
        .iter()
        .map(|(&head, chain)| {
            let inner = chain
                .items
                .iter()
                .copied()
                .filter_map(Object::as_blank)
                .filter(|b| chains.contains_key(*b))
                .collect();
            (head, inner)
        })
        .collect();

    let mut heads: Vec<&'a BlankNode> = chains.keys().copied().collect();
    heads.sort_by(|a, b| a.id.cmp(&b.id));

    // (discovery index, lowlink)
    let mut order: HashMap<&'a BlankNode, (usize, usize)> = HashMap::new();
    let mut component: Vec<&'a BlankNode> = Vec::new();
    let mut on_component: HashSet<&'a BlankNode> = HashSet::new();
    let mut work: Vec<(&'a BlankNode, usize)> = Vec::new();
    let mut cyclic = HashSet::new();

    for root in heads {
        if order.contains_key(root) {
            continue;
        }
        order.insert(root, (order.len(), order.len()));
        component.push(root);
        on_component.insert(root);
        work.push((root, 0));

        while let Some(&(head, pos)) = work.last() {
            if let Some(&inner) = edges[head].get(pos) {
                if let Some(frame) = work.last_mut() {
                    frame.1 += 1;
                }
                match order.get(inner).copied() {
                    None => {
                        order.insert(inner, (order.len(), order.len()));
                        component.push(inner);
                        on_component.insert(inner);
                        work.push((inner, 0));
                    }
                    Some((index, _)) if on_component.contains(inner) => {
                        lower(&mut order, head, index);
                    }
                    Some(_) => {}
                }
                continue;
            }

            work.pop();
            let (index, low) = order[head];
            if let Some(&(parent, _)) = work.last() {
                lower(&mut order, parent, low);
            }
            if low != index {
                continue;
            }

            let mut members = Vec::new();
            while let Some(member) = component.pop() {
                on_component.remove(member);
                members.push(member);
                if member == head {
                    break;
                }
            }
            if members.len() > 1 || edges[head].contains(&head) {
                cyclic.extend(members);
            }
        }
    }

    cyclic
}

fn lower<'a>(order: &mut HashMap<&'a BlankNode, (usize, usize)>, node: &'a BlankNode, to: usize) {
    if let Some(entry) = order.get_mut(node) {
        entry.1 = entry.1.min(to);
    }
}

/// Render every chain into JSON, innermost lists first.
///
/// Uses an explicit stack so neither list length nor nesting depth grows the
/// call stack. Self-containing chains have already been dropped, so the
/// nesting is acyclic.
fn render_lists<'a>(
    chains: &HashMap<&'a BlankNode, Chain<'a>>,
    use_native_types: bool,
) -> ResolvedLists<'a> {
    let mut heads: Vec<&'a BlankNode> = chains.keys().copied().collect();
    heads.sort_by(|a, b| a.id.cmp(&b.id));

    let mut rendered: ResolvedLists<'a> = HashMap::with_capacity(chains.len());

    for root in heads {
        let mut stack = vec![root];
        while let Some(&head) = stack.last() {
            let Some(chain) = chains.get(head).filter(|_| !rendered.contains_key(head)) else {
                stack.pop();
                continue;
            };

            let pending = chain
                .items
                .iter()
                .filter_map(|o| o.as_blank())
                .find(|b| chains.contains_key(*b) && !rendered.contains_key(*b));
            if let Some(inner) = pending {
                stack.push(inner);
                continue;
            }

            let values = chain
                .items
                .iter()
                .map(|o| object_to_json(o, &rendered, use_native_types))
                .collect();
            rendered.insert(head, values);
            stack.pop();
        }
    }

    rendered
}

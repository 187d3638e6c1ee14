//! Dijkstra's and A* search driven by an [`IndexedHeap`] frontier
//!
//! The open set holds one entry per discovered node. When a shorter route to
//! a node is found, its entry is updated in place with
//! [`IndexedHeap::update`] (decrease-key) instead of pushing a second,
//! stale entry. The frontier is drained with [`IndexedHeap::pop`].
//!
//! # Design
//!
//! Only lightweight node indices go into the heap. A frontier entry is
//! identified by its node index (`Eq`/`Hash`/`Borrow<usize>`) and ordered by
//! its f-score through an injected comparator, so it can be looked up by
//! index while it sits in the heap ordered by cost. Node states and their
//! metadata live in a table indexed by node index, and a fast hash map
//! (FxHash) maps states back to indices.
//!
//! Dijkstra is A* with h(n) = 0.
//!
//! # Example
//!
//! ```rust
//! use rust_indexed_heap::pathfinding::{astar, AStarNode, SearchNode};
//!
//! /// Square on an 8x8 board moving like a king toward a fixed corner
//! #[derive(Clone, PartialEq, Eq, Hash)]
//! struct Square(i8, i8);
//!
//! impl SearchNode for Square {
//!     type Cost = u32;
//!
//!     fn successors(&self) -> Vec<(Self, u32)> {
//!         let mut out = Vec::new();
//!         for dx in -1..=1 {
//!             for dy in -1..=1 {
//!                 let (x, y) = (self.0 + dx, self.1 + dy);
//!                 if (dx, dy) != (0, 0) && (0..8).contains(&x) && (0..8).contains(&y) {
//!                     out.push((Square(x, y), 1));
//!                 }
//!             }
//!         }
//!         out
//!     }
//!
//!     fn is_goal(&self) -> bool {
//!         *self == Square(7, 7)
//!     }
//! }
//!
//! impl AStarNode for Square {
//!     fn heuristic(&self) -> u32 {
//!         (7 - self.0).max(7 - self.1) as u32
//!     }
//! }
//!
//! let (path, moves) = astar(&Square(0, 3)).unwrap();
//! assert_eq!(moves, 7);
//! assert_eq!(path.len(), 8);
//! ```

use crate::indexed::IndexedHeap;
use rustc_hash::FxHashMap;
use std::borrow::Borrow;
use std::cmp::Ordering;
use std::hash::{Hash, Hasher};
use std::ops::Add;

/// Trait for types that can be used as costs in pathfinding algorithms.
///
/// This requires the type to be orderable, copyable, and support addition.
/// `Default` supplies the zero cost.
pub trait Cost: Ord + Copy + Add<Output = Self> + Default {}

impl<T> Cost for T where T: Ord + Copy + Add<Output = Self> + Default {}

/// Trait for nodes in a search graph.
///
/// The node carries all context needed to generate its successors and to
/// tell whether it is a goal.
pub trait SearchNode: Clone + Eq + Hash {
    /// The cost type for edge weights
    type Cost: Cost;

    /// Returns all successor nodes along with the cost to reach them.
    fn successors(&self) -> Vec<(Self, Self::Cost)>;

    /// Returns true if this node is a goal state.
    fn is_goal(&self) -> bool;
}

/// Trait for nodes that can provide a heuristic estimate for A* search.
///
/// The heuristic must be admissible (never overestimate the true cost)
/// for A* to find optimal paths.
pub trait AStarNode: SearchNode {
    /// Returns a heuristic estimate of the cost from this node to any goal.
    fn heuristic(&self) -> Self::Cost;
}

/// Ordering key of a frontier entry.
///
/// Ordered by f-score only; the g-score rides along.
#[derive(Debug, Clone, Copy)]
pub struct PriorityCost<C> {
    /// The f-score: g + h (where h=0 for Dijkstra)
    pub f_score: C,
    /// The actual cost from start (g-score)
    pub g_score: C,
}

impl<C: Ord> PartialEq for PriorityCost<C> {
    fn eq(&self, other: &Self) -> bool {
        self.f_score == other.f_score
    }
}

impl<C: Ord> Eq for PriorityCost<C> {}

impl<C: Ord> PartialOrd for PriorityCost<C> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<C: Ord> Ord for PriorityCost<C> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.f_score.cmp(&other.f_score)
    }
}

/// Index of a node in the search table
pub type NodeIndex = usize;

/// An open-set entry: identified by node, ordered by priority
#[derive(Debug, Clone, Copy)]
struct OpenEntry<C> {
    node: NodeIndex,
    priority: PriorityCost<C>,
}

impl<C> PartialEq for OpenEntry<C> {
    fn eq(&self, other: &Self) -> bool {
        self.node == other.node
    }
}

impl<C> Eq for OpenEntry<C> {}

impl<C> Hash for OpenEntry<C> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.node.hash(state);
    }
}

impl<C> Borrow<NodeIndex> for OpenEntry<C> {
    fn borrow(&self) -> &NodeIndex {
        &self.node
    }
}

fn by_priority<C: Ord>(a: &OpenEntry<C>, b: &OpenEntry<C>) -> Ordering {
    a.priority.cmp(&b.priority)
}

type OpenSet<C> = IndexedHeap<OpenEntry<C>, fn(&OpenEntry<C>, &OpenEntry<C>) -> Ordering>;

fn open_set<C: Cost>() -> OpenSet<C> {
    IndexedHeap::with_comparator(by_priority::<C> as fn(&OpenEntry<C>, &OpenEntry<C>) -> Ordering)
}

/// Metadata stored for each discovered node during search.
struct NodeEntry<N: SearchNode> {
    node: N,
    g_score: N::Cost,
    came_from: Option<NodeIndex>,
    /// Popped from the open set; its g-score is final
    closed: bool,
}

/// Node table for one search: states, their costs and back-pointers.
struct PathFinder<N: SearchNode> {
    nodes: Vec<NodeEntry<N>>,
    state_to_index: FxHashMap<N, NodeIndex>,
}

impl<N: SearchNode> PathFinder<N> {
    fn new() -> Self {
        PathFinder {
            nodes: Vec::new(),
            state_to_index: FxHashMap::default(),
        }
    }

    /// Gets or creates an index for a node state.
    fn get_or_create_index(&mut self, node: N, g_score: N::Cost) -> (NodeIndex, bool) {
        if let Some(&index) = self.state_to_index.get(&node) {
            return (index, false);
        }
        let index = self.nodes.len();
        self.state_to_index.insert(node.clone(), index);
        self.nodes.push(NodeEntry {
            node,
            g_score,
            came_from: None,
            closed: false,
        });
        (index, true)
    }

    /// Reconstructs the path from start to the given node index.
    fn reconstruct_path(&self, mut current: NodeIndex) -> Vec<N> {
        let mut path = vec![self.nodes[current].node.clone()];
        while let Some(prev) = self.nodes[current].came_from {
            path.push(self.nodes[prev].node.clone());
            current = prev;
        }
        path.reverse();
        path
    }
}

/// Search bounds; `None` means unbounded
struct Limits<C> {
    max_cost: Option<C>,
    max_nodes: Option<usize>,
}

impl<C> Limits<C> {
    fn none() -> Self {
        Limits {
            max_cost: None,
            max_nodes: None,
        }
    }
}

/// Runs Dijkstra's algorithm from `start` until a node's `is_goal()` holds.
///
/// Returns the path from start to goal inclusive with its total cost, or
/// `None` if no goal is reachable. `None` is also returned when the open set
/// cannot grow ([`HeapError::CapacityExhausted`](crate::HeapError::CapacityExhausted)),
/// so an exhausted search looks the same as an unreachable goal.
///
/// # Example
/// Fewest coins making change, searching over the amount still owed:
/// ```rust
/// use rust_indexed_heap::pathfinding::{dijkstra, SearchNode};
///
/// #[derive(Clone, PartialEq, Eq, Hash, Debug)]
/// struct Owed(u32);
///
/// impl SearchNode for Owed {
///     type Cost = u32;
///
///     fn successors(&self) -> Vec<(Self, u32)> {
///         [1, 5, 6]
///             .into_iter()
///             .filter(|&coin| coin <= self.0)
///             .map(|coin| (Owed(self.0 - coin), 1))
///             .collect()
///     }
///
///     fn is_goal(&self) -> bool {
///         self.0 == 0
///     }
/// }
///
/// let (path, coins) = dijkstra(&Owed(11)).unwrap();
/// assert_eq!(coins, 2);
/// assert_eq!(path.last(), Some(&Owed(0)));
/// ```
pub fn dijkstra<N: SearchNode>(start: &N) -> Option<(Vec<N>, N::Cost)> {
    search_impl(start, |_| N::Cost::default(), Limits::none())
}

/// Runs A* search from the start node until `is_goal()` returns true.
///
/// Uses the node's `heuristic()` method to guide the search. Returns `None`
/// under the same conditions as [`dijkstra`], including an open set that
/// cannot grow.
pub fn astar<N: AStarNode>(start: &N) -> Option<(Vec<N>, N::Cost)> {
    search_impl(start, |n| n.heuristic(), Limits::none())
}

fn search_impl<N: SearchNode>(
    start: &N,
    heuristic: impl Fn(&N) -> N::Cost,
    limits: Limits<N::Cost>,
) -> Option<(Vec<N>, N::Cost)> {
    let zero = N::Cost::default();
    let mut finder = PathFinder::new();
    let mut open = open_set::<N::Cost>();
    let mut nodes_explored = 0usize;

    let (start_index, _) = finder.get_or_create_index(start.clone(), zero);
    open.push(OpenEntry {
        node: start_index,
        priority: PriorityCost {
            f_score: heuristic(start),
            g_score: zero,
        },
    })
    .ok()?;

    while let Some(OpenEntry {
        node: current_index,
        priority,
    }) = open.pop()
    {
        if let Some(max) = limits.max_nodes {
            if nodes_explored >= max {
                return None;
            }
        }
        nodes_explored += 1;

        let current_g = priority.g_score;
        let current_node = {
            let entry = &mut finder.nodes[current_index];
            entry.closed = true;
            entry.node.clone()
        };

        if current_node.is_goal() {
            return Some((finder.reconstruct_path(current_index), current_g));
        }

        for (neighbor, edge_cost) in current_node.successors() {
            let tentative_g = current_g + edge_cost;
            if let Some(max) = limits.max_cost {
                if tentative_g > max {
                    continue;
                }
            }

            let priority = PriorityCost {
                f_score: tentative_g + heuristic(&neighbor),
                g_score: tentative_g,
            };
            let (neighbor_index, is_new) = finder.get_or_create_index(neighbor, tentative_g);
            let entry = &mut finder.nodes[neighbor_index];

            if is_new {
                entry.came_from = Some(current_index);
                open.push(OpenEntry {
                    node: neighbor_index,
                    priority,
                })
                .ok()?;
            } else if !entry.closed && tentative_g < entry.g_score {
                entry.g_score = tentative_g;
                entry.came_from = Some(current_index);
                // Every discovered node that is not closed is still open
                let updated =
                    open.update(&neighbor_index, |open_entry| open_entry.priority = priority);
                debug_assert!(updated.is_ok());
            }
        }
    }

    None
}

/// Search with bounds on cost and effort.
///
/// Edges whose total cost would exceed `max_cost` are never followed, and the
/// search gives up after expanding `max_nodes` nodes. Either way an
/// unreachable goal yields `None`.
///
/// ```rust
/// # use rust_indexed_heap::pathfinding::{PathFinderBuilder, SearchNode};
/// # #[derive(Clone, PartialEq, Eq, Hash)]
/// # struct Step(u32);
/// # impl SearchNode for Step {
/// #     type Cost = u32;
/// #     fn successors(&self) -> Vec<(Self, u32)> { vec![(Step(self.0 + 1), 2)] }
/// #     fn is_goal(&self) -> bool { self.0 == 5 }
/// # }
/// assert!(PathFinderBuilder::new(Step(0)).max_cost(9).dijkstra().is_none());
/// assert_eq!(PathFinderBuilder::new(Step(0)).max_cost(10).dijkstra().map(|r| r.1), Some(10));
/// ```
pub struct PathFinderBuilder<N: SearchNode> {
    start: N,
    limits: Limits<N::Cost>,
}

impl<N: SearchNode> PathFinderBuilder<N> {
    /// Starts a bounded search from `start`
    pub fn new(start: N) -> Self {
        PathFinderBuilder {
            start,
            limits: Limits::none(),
        }
    }

    /// Never follow a route costing more than `cost`
    pub fn max_cost(mut self, cost: N::Cost) -> Self {
        self.limits.max_cost = Some(cost);
        self
    }

    /// Stop after expanding `count` nodes
    pub fn max_nodes(mut self, count: usize) -> Self {
        self.limits.max_nodes = Some(count);
        self
    }

    /// Bounded Dijkstra
    pub fn dijkstra(self) -> Option<(Vec<N>, N::Cost)> {
        search_impl(&self.start, |_| N::Cost::default(), self.limits)
    }

    /// Bounded A*
    pub fn astar(self) -> Option<(Vec<N>, N::Cost)>
    where
        N: AStarNode,
    {
        search_impl(&self.start, |n| n.heuristic(), self.limits)
    }
}

/// Returns all nodes reachable from the start within a given cost budget,
/// each with its shortest distance, in order of increasing distance.
pub fn reachable_within<N: SearchNode>(start: &N, max_cost: N::Cost) -> Vec<(N, N::Cost)> {
    let zero = N::Cost::default();
    let mut finder = PathFinder::new();
    let mut open = open_set::<N::Cost>();
    let mut result = Vec::new();

    let (start_index, _) = finder.get_or_create_index(start.clone(), zero);
    let start_priority = PriorityCost {
        f_score: zero,
        g_score: zero,
    };
    if zero > max_cost
        || open
            .push(OpenEntry {
                node: start_index,
                priority: start_priority,
            })
            .is_err()
    {
        return result;
    }

    while let Some(OpenEntry {
        node: current_index,
        priority,
    }) = open.pop()
    {
        let current_g = priority.g_score;
        let current_node = {
            let entry = &mut finder.nodes[current_index];
            entry.closed = true;
            entry.node.clone()
        };
        result.push((current_node.clone(), current_g));

        for (neighbor, edge_cost) in current_node.successors() {
            let tentative_g = current_g + edge_cost;
            if tentative_g > max_cost {
                continue;
            }
            let priority = PriorityCost {
                f_score: tentative_g,
                g_score: tentative_g,
            };
            let (neighbor_index, is_new) = finder.get_or_create_index(neighbor, tentative_g);
            let entry = &mut finder.nodes[neighbor_index];

            if is_new {
                entry.came_from = Some(current_index);
                if open
                    .push(OpenEntry {
                        node: neighbor_index,
                        priority,
                    })
                    .is_err()
                {
                    return result;
                }
            } else if !entry.closed && tentative_g < entry.g_score {
                entry.g_score = tentative_g;
                entry.came_from = Some(current_index);
                let updated =
                    open.update(&neighbor_index, |open_entry| open_entry.priority = priority);
                debug_assert!(updated.is_ok());
            }
        }
    }

    result
}

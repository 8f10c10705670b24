//! A* solver for the sliding-tile puzzle, with a twin-board unsolvability
//! guard.
//!
//! The game tree is an arena: `GameTree` owns a flat, insertion-order
//! `Vec<GameNode>`, and parent links are indices into that vec rather than
//! pointers or `Rc`. This keeps deallocation O(n) regardless of solution
//! depth and sidesteps the cyclic-ownership problem a naive parent-owns-child
//! (or child-owns-parent) tree would have.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use crate::board::Board;

/// Selects which cached distance feeds the A* priority.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Priority {
    Hamming,
    Manhattan,
}

/// Index of a node within its owning `GameTree`.
type NodeId = usize;

/// A node in the A* search tree: a board, its depth from the root, and a
/// back-link to its parent (`None` at the root).
pub struct GameNode {
    pub board: Board,
    pub depth: u32,
    pub parent: Option<NodeId>,
    hamming_priority: u32,
    manhattan_priority: u32,
}

impl GameNode {
    fn priority(&self, which: Priority) -> u32 {
        match which {
            Priority::Hamming => self.hamming_priority,
            Priority::Manhattan => self.manhattan_priority,
        }
    }
}

/// Arena owning every `GameNode` created while solving a single puzzle.
#[derive(Default)]
pub struct GameTree {
    nodes: Vec<GameNode>,
}

impl GameTree {
    fn new() -> Self {
        GameTree { nodes: Vec::new() }
    }

    fn add_root(&mut self, board: Board) -> NodeId {
        let hamming_priority = board.hamming();
        let manhattan_priority = board.manhattan();
        self.nodes.push(GameNode {
            board,
            depth: 0,
            parent: None,
            hamming_priority,
            manhattan_priority,
        });
        self.nodes.len() - 1
    }

    fn add_child(&mut self, board: Board, parent: NodeId) -> NodeId {
        let depth = self.nodes[parent].depth + 1;
        let hamming_priority = board.hamming() + depth;
        let manhattan_priority = board.manhattan() + depth;
        self.nodes.push(GameNode {
            board,
            depth,
            parent: Some(parent),
            hamming_priority,
            manhattan_priority,
        });
        self.nodes.len() - 1
    }

    fn node(&self, id: NodeId) -> &GameNode {
        &self.nodes[id]
    }

    pub fn num_nodes(&self) -> usize {
        self.nodes.len()
    }
}

/// Min-priority-queue entry. Insertion order breaks ties (implementation
/// defined, not part of the observable contract) by preferring the earlier
/// insertion when priorities match, which keeps search behavior
/// deterministic for a fixed input.
struct QueueEntry {
    priority: u32,
    seq: usize,
    node: NodeId,
}

impl PartialEq for QueueEntry {
    fn eq(&self, other: &Self) -> bool {
        self.priority == other.priority && self.seq == other.seq
    }
}
impl Eq for QueueEntry {}

impl Ord for QueueEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // BinaryHeap is a max-heap; reverse priority for min-priority
        // behavior, then reverse sequence so earlier insertions win ties.
        other
            .priority
            .cmp(&self.priority)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}
impl PartialOrd for QueueEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// A* solver running the main board and its twin in lockstep so an
/// unsolvable input terminates: a board and its twin lie in opposite
/// solvability classes (exactly one is solvable), and admissible A* is
/// bounded-discovery-complete, so the lockstep loop always halts.
pub struct PuzzleSolver {
    tree: GameTree,
    priority: Priority,
    goal: Option<NodeId>,
    solvable: bool,
}

impl PuzzleSolver {
    pub fn solve(initial: Board, priority: Priority) -> Self {
        let mut solver = PuzzleSolver {
            tree: GameTree::new(),
            priority,
            goal: None,
            solvable: false,
        };
        solver.run(initial);
        solver
    }

    fn run(&mut self, initial: Board) {
        let twin = initial.twin();

        let mut tree = GameTree::new();
        let mut twin_tree = GameTree::new();

        let mut seq = 0usize;
        let mut queue = BinaryHeap::new();
        let mut twin_queue = BinaryHeap::new();

        let root = tree.add_root(initial);
        queue.push(QueueEntry {
            priority: tree.node(root).priority(self.priority),
            seq,
            node: root,
        });
        seq += 1;

        let twin_root = twin_tree.add_root(twin);
        twin_queue.push(QueueEntry {
            priority: twin_tree.node(twin_root).priority(self.priority),
            seq,
            node: twin_root,
        });
        seq += 1;

        loop {
            let cur = queue.pop().expect("main queue exhausted before solving").node;
            let twin_cur = twin_queue
                .pop()
                .expect("twin queue exhausted before solving")
                .node;

            if tree.node(cur).board.is_solved() {
                self.goal = Some(cur);
                self.solvable = true;
                break;
            }
            if twin_tree.node(twin_cur).board.is_solved() {
                self.solvable = false;
                break;
            }

            Self::expand(&mut tree, cur, &mut queue, &mut seq, self.priority);
            Self::expand(&mut twin_tree, twin_cur, &mut twin_queue, &mut seq, self.priority);
        }

        self.tree = tree;
    }

    /// Pushes every neighbor of `cur` onto `queue`, except the board equal to
    /// `cur`'s parent — the critical optimization that stops A* from
    /// immediately re-expanding the move it just undid.
    fn expand(
        tree: &mut GameTree,
        cur: NodeId,
        queue: &mut BinaryHeap<QueueEntry>,
        seq: &mut usize,
        priority: Priority,
    ) {
        let parent_board = tree.node(cur).parent.map(|p| tree.node(p).board.clone());
        let neighbors = tree.node(cur).board.neighbors();
        for neighbor in neighbors {
            if parent_board.as_ref() == Some(&neighbor) {
                continue;
            }
            let child = tree.add_child(neighbor, cur);
            queue.push(QueueEntry {
                priority: tree.node(child).priority(priority),
                seq: *seq,
                node: child,
            });
            *seq += 1;
        }
    }

    pub fn is_solvable(&self) -> bool {
        self.solvable
    }

    /// Moves to solve the board, or `-1` if unsolvable.
    pub fn moves(&self) -> i64 {
        match self.goal {
            Some(goal) => self.tree.node(goal).depth as i64,
            None => -1,
        }
    }

    /// Boards from root to goal inclusive, or `None` if unsolvable.
    pub fn solution(&self) -> Option<Vec<Board>> {
        let goal = self.goal?;
        let mut path = Vec::new();
        let mut cur = Some(goal);
        while let Some(id) = cur {
            let node = self.tree.node(id);
            path.push(node.board.clone());
            cur = node.parent;
        }
        path.reverse();
        Some(path)
    }
}

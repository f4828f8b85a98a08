//! Persistent AVL tree.
//!
//! Every operation returns a new root and leaves the receiver untouched. New
//! nodes are allocated only along the path that changed; all other subtrees are
//! shared with earlier versions through `Arc`.
//!
//! Nodes are laid out by exact key order, with equal keys descending to the
//! right. Range queries and removals take a [`Tolerance`] that decides which
//! values match, and pruning is done with that same tolerance so no match is
//! skipped.
//!
//! ```rust
//! use parkspot::tree::Node;
//! use parkspot::Tolerance;
//!
//! let v1 = Node::empty().insert(3.0).insert(1.0).insert(2.0);
//! let v2 = v1.remove(&2.0, Tolerance::new(0.5));
//!
//! assert_eq!(v1.iter().copied().collect::<Vec<_>>(), vec![1.0, 2.0, 3.0]);
//! assert_eq!(v2.iter().copied().collect::<Vec<_>>(), vec![1.0, 3.0]);
//! ```

use crate::tolerance::{Keyed, Tolerance};
use rustc_hash::FxHashSet;
use std::cmp::Ordering;
use std::hash::Hash;
use std::sync::Arc;

/// A tree version: either empty or a shared branch.
#[derive(Debug)]
pub enum Node<T> {
    Empty,
    Branch(Arc<Branch<T>>),
}

/// An interior node. Never mutated once it is part of a returned root.
#[derive(Debug)]
pub struct Branch<T> {
    left: Node<T>,
    value: T,
    right: Node<T>,
    height: usize,
}

impl<T> Branch<T> {
    pub fn left(&self) -> &Node<T> {
        &self.left
    }

    pub fn value(&self) -> &T {
        &self.value
    }

    pub fn right(&self) -> &Node<T> {
        &self.right
    }

    pub fn height(&self) -> usize {
        self.height
    }
}

impl<T> Clone for Node<T> {
    fn clone(&self) -> Self {
        match self {
            Node::Empty => Node::Empty,
            Node::Branch(branch) => Node::Branch(Arc::clone(branch)),
        }
    }
}

impl<T> Default for Node<T> {
    fn default() -> Self {
        Node::Empty
    }
}

impl<T> Node<T> {
    pub fn empty() -> Self {
        Node::Empty
    }

    /// Cached height; `Empty` is 0 and a leaf is 1.
    #[inline]
    pub fn height(&self) -> usize {
        match self {
            Node::Empty => 0,
            Node::Branch(branch) => branch.height,
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Node::Empty)
    }

    /// Number of stored values. Walks the whole tree.
    pub fn len(&self) -> usize {
        match self {
            Node::Empty => 0,
            Node::Branch(branch) => 1 + branch.left.len() + branch.right.len(),
        }
    }

    pub fn branch(&self) -> Option<&Branch<T>> {
        match self {
            Node::Empty => None,
            Node::Branch(branch) => Some(branch.as_ref()),
        }
    }

    /// Both roots are the same allocation (or both empty).
    pub fn ptr_eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Node::Empty, Node::Empty) => true,
            (Node::Branch(a), Node::Branch(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }

    /// In-order traversal.
    pub fn iter(&self) -> Iter<'_, T> {
        let mut iter = Iter { stack: Vec::new() };
        iter.push_left(self);
        iter
    }

    /// Every node has correct cached height and children differing by at most one.
    pub fn is_balanced(&self) -> bool {
        fn check<T>(node: &Node<T>) -> Option<usize> {
            match node {
                Node::Empty => Some(0),
                Node::Branch(branch) => {
                    let lh = check(&branch.left)?;
                    let rh = check(&branch.right)?;
                    let height = 1 + lh.max(rh);
                    (lh.abs_diff(rh) <= 1 && height == branch.height).then_some(height)
                }
            }
        }
        check(self).is_some()
    }
}

impl<T: Keyed> Node<T> {
    /// In-order keys never decrease.
    pub fn is_ordered(&self) -> bool {
        let mut previous = f64::NEG_INFINITY;
        self.iter().all(|value| {
            let key = value.key();
            let ok = previous.total_cmp(&key) != Ordering::Greater;
            previous = key;
            ok
        })
    }
}

impl<T: Keyed + Clone> Node<T> {
    fn leaf(value: T) -> Self {
        Self::make(Node::Empty, value, Node::Empty)
    }

    fn make(left: Node<T>, value: T, right: Node<T>) -> Self {
        let height = 1 + left.height().max(right.height());
        Node::Branch(Arc::new(Branch {
            left,
            value,
            right,
            height,
        }))
    }

    /// Insert a value, returning the new root.
    pub fn insert(&self, value: T) -> Self {
        match self {
            Node::Empty => Self::leaf(value),
            Node::Branch(branch) => {
                if value.key().total_cmp(&branch.value.key()) == Ordering::Less {
                    Self::balance(
                        branch.left.insert(value),
                        branch.value.clone(),
                        branch.right.clone(),
                    )
                } else {
                    Self::balance(
                        branch.left.clone(),
                        branch.value.clone(),
                        branch.right.insert(value),
                    )
                }
            }
        }
    }

    /// Remove every value matching `value` under `tolerance`.
    ///
    /// A removed node is replaced by its in-order successor, or by its left
    /// subtree when it has no right subtree. If nothing matches, the returned
    /// root is the receiver itself.
    pub fn remove(&self, value: &T, tolerance: Tolerance) -> Self {
        self.remove_matching(value, tolerance)
            .unwrap_or_else(|| self.clone())
    }

    fn remove_matching(&self, target: &T, tolerance: Tolerance) -> Option<Self> {
        let Node::Branch(branch) = self else {
            return None;
        };

        // Matches lie strictly inside (target - ε, target + ε).
        let key = branch.value.key();
        let left = if key > target.key() - tolerance.epsilon() {
            branch.left.remove_matching(target, tolerance)
        } else {
            None
        };
        let right = if key < target.key() + tolerance.epsilon() {
            branch.right.remove_matching(target, tolerance)
        } else {
            None
        };

        if tolerance.matches(&branch.value, target) {
            let left = left.unwrap_or_else(|| branch.left.clone());
            let right = right.unwrap_or_else(|| branch.right.clone());
            return Some(Self::merge(left, right));
        }

        if left.is_none() && right.is_none() {
            return None;
        }

        Some(Self::join(
            left.unwrap_or_else(|| branch.left.clone()),
            branch.value.clone(),
            right.unwrap_or_else(|| branch.right.clone()),
        ))
    }

    /// Some value matches `value` under `tolerance`.
    pub fn contains(&self, value: &T, tolerance: Tolerance) -> bool {
        match self {
            Node::Empty => false,
            Node::Branch(branch) => {
                if tolerance.matches(&branch.value, value) {
                    return true;
                }
                let key = branch.value.key();
                (key > value.key() - tolerance.epsilon() && branch.left.contains(value, tolerance))
                    || (key < value.key() + tolerance.epsilon()
                        && branch.right.contains(value, tolerance))
            }
        }
    }

    /// Restore the height invariant at this node with a single or double
    /// rotation. Children must already be balanced and differ by at most two.
    pub fn rebalance(&self) -> Self {
        match self {
            Node::Empty => Node::Empty,
            Node::Branch(branch) => {
                if branch.left.height().abs_diff(branch.right.height()) <= 1 {
                    return self.clone();
                }
                Self::balance(
                    branch.left.clone(),
                    branch.value.clone(),
                    branch.right.clone(),
                )
            }
        }
    }

    fn balance(left: Node<T>, value: T, right: Node<T>) -> Self {
        let (lh, rh) = (left.height(), right.height());

        if lh > rh + 1
            && let Node::Branch(l) = &left
        {
            if l.left.height() >= l.right.height() {
                return Self::make(
                    l.left.clone(),
                    l.value.clone(),
                    Self::make(l.right.clone(), value, right),
                );
            }
            if let Node::Branch(lr) = &l.right {
                return Self::make(
                    Self::make(l.left.clone(), l.value.clone(), lr.left.clone()),
                    lr.value.clone(),
                    Self::make(lr.right.clone(), value, right),
                );
            }
        }

        if rh > lh + 1
            && let Node::Branch(r) = &right
        {
            if r.right.height() >= r.left.height() {
                return Self::make(
                    Self::make(left, value, r.left.clone()),
                    r.value.clone(),
                    r.right.clone(),
                );
            }
            if let Node::Branch(rl) = &r.left {
                return Self::make(
                    Self::make(left, value, rl.left.clone()),
                    rl.value.clone(),
                    Self::make(rl.right.clone(), r.value.clone(), r.right.clone()),
                );
            }
        }

        Self::make(left, value, right)
    }

    /// Concatenate `left ++ [value] ++ right` for subtrees of any heights.
    fn join(left: Node<T>, value: T, right: Node<T>) -> Self {
        let (lh, rh) = (left.height(), right.height());

        if lh > rh + 1
            && let Node::Branch(l) = &left
        {
            return Self::balance(
                l.left.clone(),
                l.value.clone(),
                Self::join(l.right.clone(), value, right),
            );
        }

        if rh > lh + 1
            && let Node::Branch(r) = &right
        {
            return Self::balance(
                Self::join(left, value, r.left.clone()),
                r.value.clone(),
                r.right.clone(),
            );
        }

        Self::make(left, value, right)
    }

    fn merge(left: Node<T>, right: Node<T>) -> Self {
        match right.pop_min() {
            None => left,
            Some((successor, rest)) => Self::join(left, successor, rest),
        }
    }

    fn pop_min(&self) -> Option<(T, Self)> {
        let branch = self.branch()?;
        match branch.left.pop_min() {
            None => Some((branch.value.clone(), branch.right.clone())),
            Some((min, left)) => Some((
                min,
                Self::balance(left, branch.value.clone(), branch.right.clone()),
            )),
        }
    }

    /// Visit, in order, every value within `[low, high]` under `tolerance`.
    /// Subtrees that cannot hold such a value are skipped.
    pub fn visit_range<F: FnMut(&T)>(&self, low: f64, high: f64, tolerance: Tolerance, visit: &mut F) {
        let Node::Branch(branch) = self else {
            return;
        };
        if !tolerance.less(&branch.value, &low) {
            branch.left.visit_range(low, high, tolerance, visit);
        }
        if tolerance.within(&branch.value, low, high) {
            visit(&branch.value);
        }
        if !tolerance.less(&high, &branch.value) {
            branch.right.visit_range(low, high, tolerance, visit);
        }
    }

    /// Values within `[low, high]` under `tolerance`, in key order.
    pub fn range_values(&self, low: f64, high: f64, tolerance: Tolerance) -> Vec<T> {
        let mut values = Vec::new();
        self.visit_range(low, high, tolerance, &mut |value: &T| values.push(value.clone()));
        values
    }

    /// Set of values within `[low, high]` under `tolerance` that also satisfy
    /// `predicate`.
    pub fn range_query<P>(&self, low: f64, high: f64, tolerance: Tolerance, predicate: P) -> FxHashSet<T>
    where
        T: Hash + Eq,
        P: Fn(&T) -> bool,
    {
        let mut found = FxHashSet::default();
        self.visit_range(low, high, tolerance, &mut |value: &T| {
            if predicate(value) {
                found.insert(value.clone());
            }
        });
        found
    }
}

impl<T: PartialEq> PartialEq for Node<T> {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Node::Empty, Node::Empty) => true,
            (Node::Branch(a), Node::Branch(b)) => {
                Arc::ptr_eq(a, b)
                    || (a.height == b.height
                        && a.value == b.value
                        && a.left == b.left
                        && a.right == b.right)
            }
            _ => false,
        }
    }
}

impl<T: Keyed + Clone> FromIterator<T> for Node<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        iter.into_iter()
            .fold(Node::Empty, |root, value| root.insert(value))
    }
}

/// In-order iterator over a tree version.
pub struct Iter<'a, T> {
    stack: Vec<&'a Branch<T>>,
}

impl<'a, T> Iter<'a, T> {
    fn push_left(&mut self, mut node: &'a Node<T>) {
        while let Node::Branch(branch) = node {
            self.stack.push(branch);
            node = &branch.left;
        }
    }
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        let branch = self.stack.pop()?;
        self.push_left(&branch.right);
        Some(&branch.value)
    }
}

impl<'a, T> IntoIterator for &'a Node<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

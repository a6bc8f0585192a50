use std::{
    borrow::Borrow,
    cmp::{self, Ord, Ordering},
    mem,
    ops::{Bound, Deref, DerefMut, RangeBounds},
};

use log::{debug, error, trace};
use rand::Rng;

use crate::depth::Depth;
use crate::error::LlrbError;

/// Default number of entries collected per iterator batch.
pub const ITER_LIMIT: usize = 100;

/// Llrb is an ordered in-memory map, kept balanced as a
/// [left-leaning-red-black][llrb] tree.
///
/// Keys are ordered by their [`Ord`] implementation, applications
/// wanting a custom order can wrap their keys in a newtype. The ordering
/// must be a consistent total order, behaviour is unspecified otherwise.
///
/// Llrb is not internally synchronized. Wrap it in a `Mutex` or `RwLock`
/// when sharing across threads.
///
/// [llrb]: https://en.wikipedia.org/wiki/Left-leaning_red-black_tree
#[derive(Clone)]
pub struct Llrb<K, V>
where
    K: Clone + Ord,
    V: Clone,
{
    name: String,
    root: Option<Box<Node<K, V>>>,
    n_count: usize, // number of entries in the tree.
    iter_limit: usize,
}

/// Different ways to construct a new Llrb instance.
impl<K, V> Llrb<K, V>
where
    K: Clone + Ord,
    V: Clone,
{
    /// Create an empty instance of Llrb, identified by `name`.
    pub fn new<S>(name: S) -> Llrb<K, V>
    where
        S: AsRef<str>,
    {
        Llrb {
            name: name.as_ref().to_string(),
            root: Default::default(),
            n_count: Default::default(),
            iter_limit: ITER_LIMIT,
        }
    }

    /// Create a new instance of Llrb and load it with (key, value)
    /// entries from `iter`. When a key repeats, the later value wins.
    pub fn load_from<S, I>(name: S, iter: I) -> Llrb<K, V>
    where
        S: AsRef<str>,
        I: IntoIterator<Item = (K, V)>,
    {
        let mut llrb = Llrb::new(name);
        llrb.extend(iter);
        debug!("{}: loaded {} entries", llrb.name, llrb.n_count);
        llrb
    }
}

/// Maintenance API.
impl<K, V> Llrb<K, V>
where
    K: Clone + Ord,
    V: Clone,
{
    /// Identify this instance.
    #[inline]
    pub fn id(&self) -> String {
        self.name.clone()
    }

    /// Return number of entries in this instance.
    #[inline]
    pub fn len(&self) -> usize {
        self.n_count
    }

    /// Check whether this instance is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.n_count == 0
    }

    /// Number of entries gathered in one batch by [`Llrb::iter`] and
    /// [`Llrb::range`]. Zero is treated as one.
    pub fn set_iter_limit(&mut self, limit: usize) {
        self.iter_limit = cmp::max(limit, 1);
    }

    /// Return quick statistics, only entries() and node_size() are
    /// valid. Use [`Llrb::validate`] for full statistics.
    pub fn stats(&self) -> Stats {
        Stats::new(self.n_count, mem::size_of::<Node<K, V>>())
    }
}

type Insert<K, V> = (Box<Node<K, V>>, Option<V>);

type Delete<K, V> = (Option<Box<Node<K, V>>>, Option<V>);

type Detach<K, V> = (Option<Box<Node<K, V>>>, Option<Box<Node<K, V>>>);

/// Write operations on Llrb instance.
impl<K, V> Llrb<K, V>
where
    K: Clone + Ord,
    V: Clone,
{
    /// Set value for key. If key is already present, overwrite its
    /// value in place and return the old value.
    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        let (mut root, old_value) = Llrb::do_insert(self.root.take(), key, value);
        root.set_black();
        self.root = Some(root);
        match old_value {
            None => self.n_count += 1,
            Some(_) => trace!("{}: overwrite existing key", self.name),
        }
        old_value
    }

    /// Delete key from this instance and return its value. If key is
    /// not present, the tree is left untouched and None is returned.
    pub fn delete<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        if !self.contains_key(key) {
            trace!("{}: delete on missing key", self.name);
            return None;
        }

        let root = self.borrow_red_root()?;
        let (root, old_value) = Llrb::do_delete(Some(root), key);
        self.set_root(root);
        if old_value.is_some() {
            self.n_count -= 1;
        }
        old_value
    }

    /// Remove the entry with smallest key and return it.
    pub fn delete_min(&mut self) -> Result<(K, V), LlrbError<K>> {
        let root = self.borrow_red_root().ok_or(LlrbError::EmptyTree)?;
        let (root, node) = Llrb::do_delete_min(Some(root));
        self.set_root(root);
        self.detached(node)
    }

    /// Remove the entry with largest key and return it.
    pub fn delete_max(&mut self) -> Result<(K, V), LlrbError<K>> {
        let root = self.borrow_red_root().ok_or(LlrbError::EmptyTree)?;
        let (root, node) = Llrb::do_delete_max(Some(root));
        self.set_root(root);
        self.detached(node)
    }

    /// Validate LLRB tree with following rules:
    ///
    /// * Root is black.
    /// * Red links lean left.
    /// * From root to any leaf, no consecutive reds allowed in its path.
    /// * Number of blacks should be same under left child and right child.
    /// * Make sure keys are in sorted order.
    ///
    /// Additionally return full statistics on the tree. Refer to [`Stats`]
    /// for more information.
    pub fn validate(&self) -> Result<Stats, LlrbError<K>> {
        let root = self.root.as_ref().map(Deref::deref);
        if is_red(root) {
            error!("{}: validate, red root", self.name);
            return Err(LlrbError::RedRoot);
        }

        let mut stats = self.stats();
        stats.set_depths(Depth::new());
        match Llrb::validate_tree(root, false, 0, (None, None), 0, &mut stats) {
            Ok(blacks) => {
                stats.set_blacks(blacks);
                Ok(stats)
            }
            Err(err) => {
                error!("{}: validate, broken invariant", self.name);
                Err(err)
            }
        }
    }

    // before descending for a delete, lend red to the root so that the
    // removed node is always red.
    fn borrow_red_root(&mut self) -> Option<Box<Node<K, V>>> {
        let mut root = self.root.take()?;
        if !is_red(root.left_deref()) && !is_red(root.right_deref()) {
            root.set_red();
        }
        Some(root)
    }

    fn set_root(&mut self, root: Option<Box<Node<K, V>>>) {
        self.root = root.map(|mut root| {
            root.set_black();
            root
        });
    }

    fn detached(&mut self, node: Option<Box<Node<K, V>>>) -> Result<(K, V), LlrbError<K>> {
        match node {
            Some(node) => {
                self.n_count -= 1;
                let node = *node;
                Ok((node.key, node.value))
            }
            None => Err(LlrbError::EmptyTree),
        }
    }
}

impl<K, V> Extend<(K, V)> for Llrb<K, V>
where
    K: Clone + Ord,
    V: Clone,
{
    fn extend<I>(&mut self, iter: I)
    where
        I: IntoIterator<Item = (K, V)>,
    {
        for (key, value) in iter {
            self.insert(key, value);
        }
    }
}

/// Read operations on Llrb instance.
impl<K, V> Llrb<K, V>
where
    K: Clone + Ord,
    V: Clone,
{
    /// Get the value for key.
    pub fn get<Q>(&self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.lookup(key).map(|node| node.value.clone())
    }

    /// Check whether key is present in this instance.
    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.lookup(key).is_some()
    }

    /// Return the entry with smallest key.
    pub fn min(&self) -> Result<(K, V), LlrbError<K>> {
        let mut node = self.root.as_deref().ok_or(LlrbError::EmptyTree)?;
        while let Some(left) = node.left_deref() {
            node = left;
        }
        Ok((node.key.clone(), node.value.clone()))
    }

    /// Return the entry with largest key.
    pub fn max(&self) -> Result<(K, V), LlrbError<K>> {
        let mut node = self.root.as_deref().ok_or(LlrbError::EmptyTree)?;
        while let Some(right) = node.right_deref() {
            node = right;
        }
        Ok((node.key.clone(), node.value.clone()))
    }

    /// Return a random entry from this instance.
    pub fn random<R: Rng>(&self, rng: &mut R) -> Option<(K, V)> {
        let mut node = self.root.as_deref()?;

        let mut at_depth = rng.gen::<u8>() % 40;
        loop {
            let next = if rng.gen::<bool>() {
                node.left_deref()
            } else {
                node.right_deref()
            };
            match next {
                Some(next) if at_depth > 0 => {
                    at_depth -= 1;
                    node = next;
                }
                _ => break Some((node.key.clone(), node.value.clone())),
            }
        }
    }

    /// Return an iterator over all entries in ascending key order.
    /// Calling iter() again starts a fresh pass.
    pub fn iter(&self) -> Iter<K, V> {
        Iter {
            range: self.range(..),
        }
    }

    /// Range over entries whose key falls within `range`, in ascending
    /// order. Call [`Range::rev`] for descending order.
    pub fn range<R>(&self, range: R) -> Range<K, V>
    where
        R: RangeBounds<K>,
    {
        let (start, end) = (range.start_bound().cloned(), range.end_bound().cloned());
        Range::new(self.root.as_deref(), start, end, self.iter_limit)
    }

    fn lookup<Q>(&self, key: &Q) -> Option<&Node<K, V>>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let mut node = self.root.as_deref();
        while let Some(nref) = node {
            node = match key.cmp(nref.key.borrow()) {
                Ordering::Less => nref.left_deref(),
                Ordering::Greater => nref.right_deref(),
                Ordering::Equal => return Some(nref),
            };
        }
        None
    }
}

impl<K, V> Llrb<K, V>
where
    K: Clone + Ord,
    V: Clone,
{
    fn do_insert(node: Option<Box<Node<K, V>>>, key: K, value: V) -> Insert<K, V> {
        let mut node = match node {
            None => return (Node::new(key, value, false /*black*/), None),
            Some(node) => node,
        };

        match node.key.cmp(&key) {
            Ordering::Greater => {
                let (left, old_value) = Llrb::do_insert(node.left.take(), key, value);
                node.left = Some(left);
                (Llrb::walkup_fixup(node), old_value)
            }
            Ordering::Less => {
                let (right, old_value) = Llrb::do_insert(node.right.take(), key, value);
                node.right = Some(right);
                (Llrb::walkup_fixup(node), old_value)
            }
            Ordering::Equal => {
                // overwrite in place, shape and colors are unchanged.
                let old_value = node.set_value(value);
                (node, Some(old_value))
            }
        }
    }

    // caller must make sure that key is present in the sub-tree.
    fn do_delete<Q>(node: Option<Box<Node<K, V>>>, key: &Q) -> Delete<K, V>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let mut node = match node {
            None => return (None, None),
            Some(node) => node,
        };

        if key.cmp(node.key.borrow()) == Ordering::Less {
            let left = node.left_deref();
            if !is_red(left) && !is_red(left.and_then(Node::left_deref)) {
                node = Llrb::move_red_left(node);
            }
            let (left, old_value) = Llrb::do_delete(node.left.take(), key);
            node.left = left;
            return (Some(Llrb::balance(node)), old_value);
        }

        if is_red(node.left_deref()) {
            node = Llrb::rotate_right(node);
        }

        if key.cmp(node.key.borrow()) == Ordering::Equal && node.right.is_none() {
            return (None, Some(node.value));
        }

        let right = node.right_deref();
        if !is_red(right) && !is_red(right.and_then(Node::left_deref)) {
            node = Llrb::move_red_right(node);
        }

        if key.cmp(node.key.borrow()) == Ordering::Equal {
            // splice in the in-order successor.
            let (right, successor) = Llrb::do_delete_min(node.right.take());
            node.right = right;
            let successor = match successor {
                Some(successor) => *successor,
                None => panic!("do_delete(): missing successor, call the programmer"),
            };
            node.key = successor.key;
            let old_value = node.set_value(successor.value);
            (Some(Llrb::balance(node)), Some(old_value))
        } else {
            let (right, old_value) = Llrb::do_delete(node.right.take(), key);
            node.right = right;
            (Some(Llrb::balance(node)), old_value)
        }
    }

    fn do_delete_min(node: Option<Box<Node<K, V>>>) -> Detach<K, V> {
        let mut node = match node {
            None => return (None, None),
            Some(node) => node,
        };
        if node.left.is_none() {
            return (None, Some(node));
        }
        let left = node.left_deref();
        if !is_red(left) && !is_red(left.and_then(Node::left_deref)) {
            node = Llrb::move_red_left(node);
        }
        let (left, min_node) = Llrb::do_delete_min(node.left.take());
        node.left = left;
        (Some(Llrb::balance(node)), min_node)
    }

    fn do_delete_max(node: Option<Box<Node<K, V>>>) -> Detach<K, V> {
        let mut node = match node {
            None => return (None, None),
            Some(node) => node,
        };
        if is_red(node.left_deref()) {
            node = Llrb::rotate_right(node);
        }
        if node.right.is_none() {
            return (None, Some(node));
        }
        let right = node.right_deref();
        if !is_red(right) && !is_red(right.and_then(Node::left_deref)) {
            node = Llrb::move_red_right(node);
        }
        let (right, max_node) = Llrb::do_delete_max(node.right.take());
        node.right = right;
        (Some(Llrb::balance(node)), max_node)
    }

    // low and high are the keys of the nearest ancestors the sub-tree
    // hangs right and left of, every key must fall strictly between them.
    fn validate_tree<'a>(
        node: Option<&'a Node<K, V>>,
        fromred: bool,
        mut nb: usize,
        (low, high): (Option<&'a K>, Option<&'a K>),
        depth: usize,
        stats: &mut Stats,
    ) -> Result<usize, LlrbError<K>> {
        let node = match node {
            None => {
                if let Some(depths) = stats.depths.as_mut() {
                    depths.sample(depth);
                }
                return Ok(nb);
            }
            Some(node) => node,
        };

        match (low, high) {
            (Some(low), _) if node.key.le(low) => {
                return Err(LlrbError::SortError(node.key.clone(), low.clone()));
            }
            (_, Some(high)) if node.key.ge(high) => {
                return Err(LlrbError::SortError(node.key.clone(), high.clone()));
            }
            _ => (),
        }

        let red = !node.is_black();
        if fromred && red {
            return Err(LlrbError::ConsecutiveReds);
        }
        if is_red(node.right_deref()) {
            return Err(LlrbError::RightLeaningRed(node.key.clone()));
        }
        if !red {
            nb += 1;
        }

        let key = Some(&node.key);
        let (left, right) = (node.left_deref(), node.right_deref());
        let lblacks = Llrb::validate_tree(left, red, nb, (low, key), depth + 1, stats)?;
        let rblacks = Llrb::validate_tree(right, red, nb, (key, high), depth + 1, stats)?;
        if lblacks != rblacks {
            let err = format!("left: {} right: {}", lblacks, rblacks);
            return Err(LlrbError::UnbalancedBlacks(err));
        }
        Ok(lblacks)
    }

    //--------- rebalancing primitives ----------------

    // insert path, applied at each ancestor on the way up.
    fn walkup_fixup(mut node: Box<Node<K, V>>) -> Box<Node<K, V>> {
        if is_red(node.right_deref()) && !is_red(node.left_deref()) {
            node = Llrb::rotate_left(node);
        }
        let left = node.left_deref();
        if is_red(left) && is_red(left.and_then(Node::left_deref)) {
            node = Llrb::rotate_right(node);
        }
        if is_red(node.left_deref()) && is_red(node.right_deref()) {
            Llrb::flip(node.deref_mut())
        }
        node
    }

    // delete path, applied at each ancestor on the way up.
    fn balance(mut node: Box<Node<K, V>>) -> Box<Node<K, V>> {
        if is_red(node.right_deref()) {
            node = Llrb::rotate_left(node);
        }
        let left = node.left_deref();
        if is_red(left) && is_red(left.and_then(Node::left_deref)) {
            node = Llrb::rotate_right(node);
        }
        if is_red(node.left_deref()) && is_red(node.right_deref()) {
            Llrb::flip(node.deref_mut());
        }
        node
    }

    //              (i)                       (i)
    //               |                         |
    //              node                       x
    //              /  \                      / \
    //             /    (r)                 (r)  \
    //            /       \                 /     \
    //          left       x             node      xr
    //                    / \            /  \
    //                  xl   xr       left   xl
    //
    fn rotate_left(mut node: Box<Node<K, V>>) -> Box<Node<K, V>> {
        let mut x = match node.right.take() {
            Some(x) if !x.is_black() => x,
            _ => panic!("rotate_left(): rotating a black link ? Call the programmer"),
        };
        node.right = x.left.take();
        x.black = node.black;
        node.set_red();
        x.left = Some(node);
        x
    }

    //              (i)                       (i)
    //               |                         |
    //              node                       x
    //              /  \                      / \
    //            (r)   \                   (r)  \
    //           /       \                 /      \
    //          x       right             xl      node
    //         / \                                / \
    //       xl   xr                             xr  right
    //
    fn rotate_right(mut node: Box<Node<K, V>>) -> Box<Node<K, V>> {
        let mut x = match node.left.take() {
            Some(x) if !x.is_black() => x,
            _ => panic!("rotate_right(): rotating a black link ? Call the programmer"),
        };
        node.left = x.right.take();
        x.black = node.black;
        node.set_red();
        x.right = Some(node);
        x
    }

    //        (x)                   (!x)
    //         |                     |
    //        node                  node
    //        / \                   / \
    //      (y) (z)              (!y) (!z)
    //     /      \              /      \
    //   left    right         left    right
    //
    fn flip(node: &mut Node<K, V>) {
        match (node.left.as_mut(), node.right.as_mut()) {
            (Some(left), Some(right)) => {
                left.toggle_link();
                right.toggle_link();
            }
            _ => panic!("flip(): missing child, call the programmer"),
        }
        node.toggle_link();
    }

    // node is red (or the borrowed root) with black left and left-left,
    // make left or one of its children red.
    fn move_red_left(mut node: Box<Node<K, V>>) -> Box<Node<K, V>> {
        Llrb::flip(node.deref_mut());
        let right_left = node.right_deref().and_then(Node::left_deref);
        if is_red(right_left) {
            node.right = node.right.take().map(Llrb::rotate_right);
            node = Llrb::rotate_left(node);
            Llrb::flip(node.deref_mut());
        }
        node
    }

    // node is red (or the borrowed root) with black right and right-left,
    // make right or one of its children red.
    fn move_red_right(mut node: Box<Node<K, V>>) -> Box<Node<K, V>> {
        Llrb::flip(node.deref_mut());
        let left_left = node.left_deref().and_then(Node::left_deref);
        if is_red(left_left) {
            node = Llrb::rotate_right(node);
            Llrb::flip(node.deref_mut());
        }
        node
    }
}

fn is_red<K, V>(node: Option<&Node<K, V>>) -> bool
where
    K: Clone + Ord,
    V: Clone,
{
    node.map_or(false, |node| !node.is_black())
}

/// Ascending iterator over all entries, refer to [`Llrb::iter`].
pub struct Iter<'a, K, V>
where
    K: Clone + Ord,
    V: Clone,
{
    range: Range<'a, K, V>,
}

impl<'a, K, V> Iterator for Iter<'a, K, V>
where
    K: Clone + Ord,
    V: Clone,
{
    type Item = (K, V);

    fn next(&mut self) -> Option<Self::Item> {
        self.range.next()
    }
}

/// Ascending iterator over a key range, refer to [`Llrb::range`].
pub struct Range<'a, K, V>
where
    K: Clone + Ord,
    V: Clone,
{
    walk: Walk<'a, K, V>,
    start: Bound<K>,
    end: Bound<K>,
}

impl<'a, K, V> Range<'a, K, V>
where
    K: Clone + Ord,
    V: Clone,
{
    fn new(root: Option<&'a Node<K, V>>, start: Bound<K>, end: Bound<K>, limit: usize) -> Self {
        let walk = Walk::new(root, (start.clone(), end.clone()), limit, Direction::Ascending);
        Range { walk, start, end }
    }

    /// Iterate over the whole range in descending order, entries already
    /// consumed in ascending order are not skipped.
    pub fn rev(self) -> Reverse<'a, K, V> {
        let bounds = (self.start, self.end);
        let walk = Walk::new(self.walk.root, bounds, self.walk.limit, Direction::Descending);
        Reverse { walk }
    }
}

impl<'a, K, V> Iterator for Range<'a, K, V>
where
    K: Clone + Ord,
    V: Clone,
{
    type Item = (K, V);

    fn next(&mut self) -> Option<Self::Item> {
        self.walk.next()
    }
}

/// Descending iterator over a key range, refer to [`Range::rev`].
pub struct Reverse<'a, K, V>
where
    K: Clone + Ord,
    V: Clone,
{
    walk: Walk<'a, K, V>,
}

impl<'a, K, V> Iterator for Reverse<'a, K, V>
where
    K: Clone + Ord,
    V: Clone,
{
    type Item = (K, V);

    fn next(&mut self) -> Option<Self::Item> {
        self.walk.next()
    }
}

#[derive(Clone, Copy, Debug)]
enum Direction {
    Ascending,
    Descending,
}

// Batched walk over [low, high]. Every batch is collected afresh from the
// root, after a batch the leading bound moves past the last key yielded.
struct Walk<'a, K, V>
where
    K: Clone + Ord,
    V: Clone,
{
    root: Option<&'a Node<K, V>>,
    batch: std::vec::IntoIter<(K, V)>,
    low: Bound<K>,
    high: Bound<K>,
    direction: Direction,
    limit: usize,
    done: bool,
}

impl<'a, K, V> Walk<'a, K, V>
where
    K: Clone + Ord,
    V: Clone,
{
    fn new(
        root: Option<&'a Node<K, V>>,
        (low, high): (Bound<K>, Bound<K>),
        limit: usize,
        direction: Direction,
    ) -> Walk<'a, K, V> {
        Walk {
            root,
            batch: vec![].into_iter(),
            low,
            high,
            direction,
            limit,
            done: false,
        }
    }

    fn above_low(&self, key: &K) -> bool {
        match &self.low {
            Bound::Included(low) => key.ge(low),
            Bound::Excluded(low) => key.gt(low),
            Bound::Unbounded => true,
        }
    }

    fn below_high(&self, key: &K) -> bool {
        match &self.high {
            Bound::Included(high) => key.le(high),
            Bound::Excluded(high) => key.lt(high),
            Bound::Unbounded => true,
        }
    }

    // walk in direction order, returns false once the batch is full.
    fn collect(&self, node: Option<&Node<K, V>>, acc: &mut Vec<(K, V)>) -> bool {
        let node = match node {
            None => return true,
            Some(node) => node,
        };

        let (left, right) = (node.left_deref(), node.right_deref());
        if !self.above_low(&node.key) {
            return self.collect(right, acc);
        }
        if !self.below_high(&node.key) {
            return self.collect(left, acc);
        }

        let (first, second) = match self.direction {
            Direction::Ascending => (left, right),
            Direction::Descending => (right, left),
        };
        if !self.collect(first, acc) {
            return false;
        }
        acc.push((node.key.clone(), node.value.clone()));
        if acc.len() >= self.limit {
            return false;
        }
        self.collect(second, acc)
    }

    fn refill(&mut self) {
        let mut acc: Vec<(K, V)> = Vec::with_capacity(self.limit);
        self.collect(self.root, &mut acc);
        debug!("{:?} walk, refill with {} entries", self.direction, acc.len());

        // a short batch means the walk reached the end of the range.
        self.done = acc.len() < self.limit;
        if let Some((key, _)) = acc.last() {
            let resume = Bound::Excluded(key.clone());
            match self.direction {
                Direction::Ascending => self.low = resume,
                Direction::Descending => self.high = resume,
            }
        }
        self.batch = acc.into_iter();
    }

    fn next(&mut self) -> Option<(K, V)> {
        match self.batch.next() {
            None if !self.done => {
                self.refill();
                self.batch.next()
            }
            item => item,
        }
    }
}

/// Node corresponds to a single entry in Llrb instance.
#[derive(Clone)]
pub(crate) struct Node<K, V>
where
    K: Clone + Ord,
    V: Clone,
{
    key: K,
    value: V,
    black: bool,                    // store: black or red
    left: Option<Box<Node<K, V>>>,  // store: left child
    right: Option<Box<Node<K, V>>>, // store: right child
}

impl<K, V> Node<K, V>
where
    K: Clone + Ord,
    V: Clone,
{
    fn new(key: K, value: V, black: bool) -> Box<Node<K, V>> {
        Box::new(Node {
            key,
            value,
            black,
            left: None,
            right: None,
        })
    }

    #[inline]
    fn left_deref(&self) -> Option<&Node<K, V>> {
        self.left.as_deref()
    }

    #[inline]
    fn right_deref(&self) -> Option<&Node<K, V>> {
        self.right.as_deref()
    }

    // replace value, return the old one.
    #[inline]
    fn set_value(&mut self, value: V) -> V {
        mem::replace(&mut self.value, value)
    }

    #[inline]
    fn set_red(&mut self) {
        self.black = false
    }

    #[inline]
    fn set_black(&mut self) {
        self.black = true
    }

    #[inline]
    fn toggle_link(&mut self) {
        self.black = !self.black
    }

    #[inline]
    fn is_black(&self) -> bool {
        self.black
    }
}

/// Statistics on [`Llrb`] tree. Serves two purpose:
///
/// * To get partial but quick statistics via [`Llrb::stats`] method.
/// * To get full statisics via [`Llrb::validate`] method.
#[derive(Default, Debug)]
pub struct Stats {
    entries: usize, // number of entries in the tree.
    node_size: usize,
    blacks: Option<usize>,
    depths: Option<Depth>,
}

impl Stats {
    fn new(entries: usize, node_size: usize) -> Stats {
        Stats {
            entries,
            node_size,
            blacks: Default::default(),
            depths: Default::default(),
        }
    }

    #[inline]
    fn set_blacks(&mut self, blacks: usize) {
        self.blacks = Some(blacks)
    }

    #[inline]
    fn set_depths(&mut self, depths: Depth) {
        self.depths = Some(depths)
    }

    /// Return number entries in [`Llrb`] instance.
    #[inline]
    pub fn entries(&self) -> usize {
        self.entries
    }

    /// Return node-size, including over-head for `Llrb<k,V>`. Although
    /// the node overhead is constant, the node size varies based on
    /// key and value types. EG:
    ///
    /// ```
    /// use llrb_map::Llrb;
    /// let llrb: Llrb<u64,i128> = Llrb::new("myinstance");
    ///
    /// // size of key: 8 bytes
    /// // size of value: 16 bytes
    /// // overhead is 24 bytes
    /// assert_eq!(llrb.stats().node_size(), 48);
    /// ```
    #[inline]
    pub fn node_size(&self) -> usize {
        self.node_size
    }

    /// Return number of black nodes from root to leaf, on both left
    /// and right child.
    #[inline]
    pub fn blacks(&self) -> Option<usize> {
        self.blacks
    }

    /// Return [`Depth`] statistics, None for quick statistics or
    /// an empty tree.
    pub fn depths(&self) -> Option<Depth> {
        match &self.depths {
            Some(depths) if depths.samples() > 0 && depths.max() > 0 => Some(depths.clone()),
            _ => None,
        }
    }
}

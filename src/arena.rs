//! An arena of singly-linked list nodes addressed by integer handles.
//!
//! Compared to Box-per-node lists, this uses a different layout: all nodes live in one
//! Vec and links are 1-based u32 indices into it, with 0 reserved as the end-of-list
//! sentinel. Freed nodes are threaded onto a free list through their own `next` field,
//! so a single node or a whole front..=back span can be returned in O(1). Handles stay
//! valid across arena growth, which references would not.

/// Handle to a node, or the end-of-list sentinel [`Link::NIL`].
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Link(u32);

impl Link {
    /// The end-of-list sentinel. Never denotes a node.
    pub const NIL: Link = Link(0);

    #[inline(always)]
    pub fn is_nil(self) -> bool {
        self.0 == 0
    }

    #[inline(always)]
    fn index(self) -> usize {
        debug_assert!(self.0 != 0, "nil link dereferenced");
        (self.0 - 1) as usize
    }
}

struct Node<T> {
    value: T,
    next: Link,
}

pub struct ListArena<T> {
    nodes: Vec<Node<T>>,
    free_head: Link,
    // Liveness tags, maintained only in debug builds to catch stale handles.
    #[cfg(debug_assertions)]
    live: Vec<bool>,
}

impl<T> ListArena<T> {
    pub fn new() -> Self {
        Self {
            nodes: Vec::new(),
            free_head: Link::NIL,
            #[cfg(debug_assertions)]
            live: Vec::new(),
        }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            nodes: Vec::with_capacity(capacity),
            free_head: Link::NIL,
            #[cfg(debug_assertions)]
            live: Vec::with_capacity(capacity),
        }
    }

    /// Total nodes ever created, live or on the free list.
    #[inline(always)]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    #[inline(always)]
    fn node(&self, link: Link) -> &Node<T> {
        let i = link.index();
        #[cfg(debug_assertions)]
        assert!(self.live[i], "stale link: node {i} is on the free list");
        &self.nodes[i]
    }

    /// New node holding `value` whose successor is `tail`. Reuses the most recently
    /// freed node if there is one, otherwise grows the arena.
    pub fn allocate(&mut self, value: T, tail: Link) -> Link {
        if self.free_head.is_nil() {
            self.nodes.push(Node { value, next: tail });
            #[cfg(debug_assertions)]
            self.live.push(true);
            Link(self.nodes.len() as u32)
        } else {
            let link = self.free_head;
            let i = link.index();
            self.free_head = self.nodes[i].next;
            self.nodes[i] = Node { value, next: tail };
            #[cfg(debug_assertions)]
            {
                self.live[i] = true;
            }
            link
        }
    }

    /// Returns the node to the free list; yields its former successor so that
    /// `front = arena.free(front)` steps through a list while releasing it.
    pub fn free(&mut self, link: Link) -> Link {
        let i = link.index();
        #[cfg(debug_assertions)]
        {
            assert!(self.live[i], "stale link: node {i} freed twice");
            self.live[i] = false;
        }
        let tail = self.nodes[i].next;
        self.nodes[i].next = self.free_head;
        self.free_head = link;
        tail
    }

    /// Returns the whole `front..=back` span to the free list with a single splice,
    /// regardless of its length. Yields `back`'s former successor. No-op on a nil
    /// `front`.
    pub fn free_span(&mut self, front: Link, back: Link) -> Link {
        if front.is_nil() {
            return Link::NIL;
        }
        #[cfg(debug_assertions)]
        {
            // Tag the span dead while its links are still intact.
            let mut cursor = front;
            loop {
                let i = cursor.index();
                assert!(self.live[i], "stale link: node {i} freed twice");
                self.live[i] = false;
                if cursor == back {
                    break;
                }
                cursor = self.nodes[i].next;
            }
        }
        let i = back.index();
        let tail = self.nodes[i].next;
        self.nodes[i].next = self.free_head;
        self.free_head = front;
        tail
    }

    #[inline(always)]
    pub fn value(&self, link: Link) -> &T {
        &self.node(link).value
    }

    #[inline(always)]
    pub fn next(&self, link: Link) -> Link {
        self.node(link).next
    }

    #[inline(always)]
    pub fn set_next(&mut self, link: Link, next: Link) {
        let i = link.index();
        #[cfg(debug_assertions)]
        assert!(self.live[i], "stale link: node {i} is on the free list");
        self.nodes[i].next = next;
    }

    /// Builds a list holding `values` in iteration order and returns its head,
    /// [`Link::NIL`] for an empty iterator.
    pub fn list_from_iter<I>(&mut self, values: I) -> Link
    where
        I: IntoIterator<Item = T>,
    {
        let mut iter = values.into_iter();
        let Some(first) = iter.next() else {
            return Link::NIL;
        };
        let head = self.allocate(first, Link::NIL);
        let mut tail = head;
        for value in iter {
            let node = self.allocate(value, Link::NIL);
            self.set_next(tail, node);
            tail = node;
        }
        head
    }

    /// Iterates the values of the list starting at `head`.
    pub fn iter_from(&self, head: Link) -> Iter<'_, T> {
        Iter {
            arena: self,
            cursor: head,
        }
    }
}

pub struct Iter<'a, T> {
    arena: &'a ListArena<T>,
    cursor: Link,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<&'a T> {
        if self.cursor.is_nil() {
            return None;
        }
        let value = self.arena.value(self.cursor);
        self.cursor = self.arena.next(self.cursor);
        Some(value)
    }
}

/// A list viewed from both ends: `front` for the whole list, `back` for O(1)
/// appending and O(1) wholesale release via [`ListArena::free_queue`].
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Queue {
    pub front: Link,
    pub back: Link,
}

impl Queue {
    pub const EMPTY: Queue = Queue {
        front: Link::NIL,
        back: Link::NIL,
    };

    #[inline(always)]
    pub fn is_empty(self) -> bool {
        self.front.is_nil()
    }
}

impl<T> ListArena<T> {
    pub fn push_front(&mut self, q: Queue, value: T) -> Queue {
        let node = self.allocate(value, q.front);
        if q.is_empty() {
            Queue {
                front: node,
                back: node,
            }
        } else {
            Queue {
                front: node,
                back: q.back,
            }
        }
    }

    pub fn push_back(&mut self, q: Queue, value: T) -> Queue {
        let node = self.allocate(value, Link::NIL);
        if q.is_empty() {
            Queue {
                front: node,
                back: node,
            }
        } else {
            self.set_next(q.back, node);
            Queue {
                front: q.front,
                back: node,
            }
        }
    }

    /// Detaches the front node without freeing it; the caller still holds `q.front`.
    pub fn pop_front(&self, q: Queue) -> Queue {
        let front = self.next(q.front);
        if front.is_nil() {
            Queue::EMPTY
        } else {
            Queue {
                front,
                back: q.back,
            }
        }
    }

    pub fn free_queue(&mut self, q: Queue) {
        self.free_span(q.front, q.back);
    }
}

#[cfg(test)]
impl<T> ListArena<T> {
    /// The free list, front to back.
    pub(crate) fn free_links(&self) -> Vec<Link> {
        let mut out = Vec::new();
        let mut cursor = self.free_head;
        while !cursor.is_nil() {
            out.push(cursor);
            cursor = self.nodes[cursor.index()].next;
        }
        out
    }

    /// The handles of the list starting at `head`, in list order.
    pub(crate) fn chain_links(&self, head: Link) -> Vec<Link> {
        let mut out = Vec::new();
        let mut cursor = head;
        while !cursor.is_nil() {
            out.push(cursor);
            cursor = self.next(cursor);
        }
        out
    }
}

/// Asserts that the live chains rooted at `roots` plus the free list account for
/// every handle exactly once: no leak, no double ownership.
#[cfg(test)]
pub(crate) fn assert_handles_partition<T>(arena: &ListArena<T>, roots: &[Link]) {
    let mut owners = vec![0usize; arena.len()];
    for &root in roots {
        for link in arena.chain_links(root) {
            owners[link.index()] += 1;
        }
    }
    for link in arena.free_links() {
        owners[link.index()] += 1;
    }
    for (i, &count) in owners.iter().enumerate() {
        assert_eq!(count, 1, "node {i} owned {count} times");
    }
}

//! Index-based intrusive doubly-linked lists.
//!
//! Every registry slot carries two link pairs: one for the global
//! all-entities list and one for the list of the tile it stands on. Links
//! are slot indices, so they survive any movement of the slot storage and
//! unlinking is O(1).

/// Which of a node's link pairs a list operation uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ListKind {
    Global = 0,
    Tile = 1,
}

/// Previous/next slot indices for one list membership.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct Link {
    pub prev: Option<u16>,
    pub next: Option<u16>,
}

/// Head, tail and length of one list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct ListHead {
    pub head: Option<u16>,
    pub tail: Option<u16>,
    pub len: usize,
}

/// Storage element that owns link pairs.
pub(crate) trait Linked {
    fn link(&self, kind: ListKind) -> Link;
    fn link_mut(&mut self, kind: ListKind) -> &mut Link;
}

/// Append `index` at the tail of `list`.
pub(crate) fn push_back<T: Linked>(nodes: &mut [T], list: &mut ListHead, index: u16, kind: ListKind) {
    let old_tail = list.tail;
    *nodes[index as usize].link_mut(kind) = Link {
        prev: old_tail,
        next: None,
    };

    match old_tail {
        Some(tail) => nodes[tail as usize].link_mut(kind).next = Some(index),
        None => list.head = Some(index),
    }
    list.tail = Some(index);
    list.len += 1;
}

/// Unlink `index` from `list`. The node must currently be a member.
pub(crate) fn unlink<T: Linked>(nodes: &mut [T], list: &mut ListHead, index: u16, kind: ListKind) {
    let Link { prev, next } = nodes[index as usize].link(kind);

    match prev {
        Some(p) => nodes[p as usize].link_mut(kind).next = next,
        None => list.head = next,
    }
    match next {
        Some(n) => nodes[n as usize].link_mut(kind).prev = prev,
        None => list.tail = prev,
    }

    *nodes[index as usize].link_mut(kind) = Link::default();
    list.len = list.len.saturating_sub(1);
}

/// Forward iterator over the slot indices of one list.
pub(crate) struct ListIter<'a, T> {
    nodes: &'a [T],
    cursor: Option<u16>,
    kind: ListKind,
}

impl<'a, T: Linked> ListIter<'a, T> {
    pub(crate) fn new(nodes: &'a [T], list: &ListHead, kind: ListKind) -> Self {
        Self {
            nodes,
            cursor: list.head,
            kind,
        }
    }
}

impl<T: Linked> Iterator for ListIter<'_, T> {
    type Item = u16;

    fn next(&mut self) -> Option<u16> {
        let current = self.cursor?;
        self.cursor = self.nodes[current as usize].link(self.kind).next;
        Some(current)
    }
}

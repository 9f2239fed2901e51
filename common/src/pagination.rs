//! Abstractions for forward pagination.
//!
//! A page is requested by a cursor to start scanning from (inclusive) and a
//! maximum number of nodes to return. A page shorter than requested is a
//! valid result, not an error.

/// Generic pagination connection.
#[derive(Clone, Debug)]
pub struct Connection<C, I> {
    /// [`Edge`]s in this [`Connection`].
    pub edges: Vec<Edge<C, I>>,

    /// Indicator whether this [`Connection`] has more nodes after the last
    /// [`Edge`].
    pub has_more: bool,
}

/// A page in a [`Connection`].
pub type Page<C, I> = Connection<C, I>;

impl<C, I> Connection<C, I> {
    /// Creates a new [`Connection`] from the provided [`Edge`]s.
    #[must_use]
    pub fn new(
        edges: impl IntoIterator<Item = impl Into<Edge<C, I>>>,
        has_more: bool,
    ) -> Self {
        Self {
            edges: edges.into_iter().map(Into::into).collect::<Vec<_>>(),
            has_more,
        }
    }

    /// Creates a new empty [`Connection`].
    #[must_use]
    pub fn empty() -> Self {
        Self {
            edges: Vec::new(),
            has_more: false,
        }
    }

    /// Returns [`PageInfo`] of this [`Connection`].
    #[must_use]
    pub fn page_info(&self) -> PageInfo<C>
    where
        C: Clone,
    {
        PageInfo {
            start_cursor: self.edges.first().map(|e| e.cursor.clone()),
            end_cursor: self.edges.last().map(|e| e.cursor.clone()),
            has_next_page: self.has_more,
        }
    }

    /// Consumes this [`Connection`] returning its nodes in order.
    #[must_use]
    pub fn into_nodes(self) -> Vec<I> {
        self.edges.into_iter().map(|e| e.node).collect()
    }
}

/// Information about a page in a [`Connection`].
#[derive(Clone, Copy, Debug)]
pub struct PageInfo<C> {
    /// First cursor on this page.
    pub start_cursor: Option<C>,

    /// Last cursor on this page.
    pub end_cursor: Option<C>,

    /// Indicator whether [`Connection`] has a next page.
    pub has_next_page: bool,
}

/// An edge in a [`Connection`].
#[derive(Clone, Copy, Debug)]
pub struct Edge<C, I> {
    /// Cursor of this [`Edge`].
    pub cursor: C,

    /// Node of this [`Edge`].
    pub node: I,
}

impl<C, I> From<(C, I)> for Edge<C, I> {
    fn from((cursor, node): (C, I)) -> Self {
        Self { cursor, node }
    }
}

/// Pagination arguments.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Arguments<C> {
    /// Cursor to start scanning from, inclusively.
    pub start: C,

    /// Maximum number of nodes to return.
    pub count: usize,
}

impl<C> Arguments<C> {
    /// Creates new [`Arguments`].
    ///
    /// [`None`] is returned if the `count` cannot be represented as a
    /// [`usize`] (a negative number, for example).
    pub fn new<Num>(start: C, count: Num) -> Option<Self>
    where
        Num: TryInto<usize>,
    {
        Some(Self {
            start,
            count: count.try_into().ok()?,
        })
    }

    /// Returns limit requested by this [`Arguments`].
    #[must_use]
    pub fn limit(&self) -> usize {
        self.count
    }
}

/// Pagination selector.
#[derive(Clone, Copy, Debug)]
pub struct Selector<C, F> {
    /// Pagination [`Arguments`].
    pub arguments: Arguments<C>,

    /// Additional filter being applied to the result.
    pub filter: F,
}

/// Defines pagination types.
#[expect(clippy::module_name_repetitions, reason = "more readable")]
#[macro_export]
macro_rules! define_pagination {
    ($cursor:ty, $node:ty, $filter:ty) => {
        #[doc = "Edge of a [`Connection`]."]
        pub type Edge = $crate::pagination::Edge<$cursor, $node>;

        #[doc = "A [`Connection`] of nodes."]
        pub type Connection = $crate::pagination::Connection<$cursor, $node>;

        #[doc = "A [`Page`] of nodes."]
        pub type Page = $crate::pagination::Page<$cursor, $node>;

        #[doc = "An information about a [`Page`]."]
        pub type PageInfo = $crate::pagination::PageInfo<$cursor>;

        #[doc = "Arguments for selecting a [`Page`]."]
        pub type Arguments = $crate::pagination::Arguments<$cursor>;

        #[doc = "[`Page`] selector."]
        pub type Selector = $crate::pagination::Selector<$cursor, $filter>;
    };
}

#[cfg(test)]
mod spec {
    use super::{Arguments, Connection};

    #[test]
    fn rejects_negative_count() {
        assert_eq!(Arguments::new(1_u64, -1_i32), None);
        assert_eq!(
            Arguments::new(3_u64, 0_i32),
            Some(Arguments { start: 3, count: 0 }),
        );
    }

    #[test]
    fn page_info_points_at_edges() {
        let page = Connection::<u64, &str>::new([(2_u64, "b"), (5, "e")], true);
        let info = page.page_info();

        assert_eq!(info.start_cursor, Some(2));
        assert_eq!(info.end_cursor, Some(5));
        assert!(info.has_next_page);
        assert_eq!(page.into_nodes(), ["b", "e"]);
    }

    #[test]
    fn empty_page_has_no_cursors() {
        let info = Connection::<u64, ()>::empty().page_info();

        assert_eq!(info.start_cursor, None);
        assert_eq!(info.end_cursor, None);
        assert!(!info.has_next_page);
    }
}

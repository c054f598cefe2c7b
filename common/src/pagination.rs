//! Abstractions for pagination.

/// Generic pagination connection.
#[derive(Clone, Debug)]
pub struct Connection<C, I> {
    /// [`Edge`]s in this [`Connection`].
    pub edges: Vec<Edge<C, I>>,

    /// Indicator whether there are nodes after this [`Connection`].
    pub has_next: bool,

    /// Indicator whether there are nodes before this [`Connection`].
    pub has_previous: bool,
}

impl<C, I> Connection<C, I> {
    /// Cuts a page out of the provided ordered `items` according to the
    /// provided [`Arguments`], using `cursor` to identify each item.
    ///
    /// An `after`/`before` cursor missing from the `items` is treated as
    /// absent, so the page starts over from the corresponding end.
    #[must_use]
    pub fn slice(
        args: &Arguments<C>,
        items: impl IntoIterator<Item = I>,
        cursor: impl Fn(&I) -> C,
    ) -> Self
    where
        C: PartialEq,
    {
        let mut edges = items
            .into_iter()
            .map(|node| Edge {
                cursor: cursor(&node),
                node,
            })
            .collect::<Vec<_>>();
        let total = edges.len();

        let position = |c: &C, edges: &[Edge<C, I>]| {
            edges.iter().position(|e| &e.cursor == c)
        };

        let (start, end) = match args {
            Arguments::Forward { first, after } => {
                let start = after
                    .as_ref()
                    .and_then(|c| position(c, &edges))
                    .map_or(0, |at| at + 1);
                (start, start.saturating_add(*first).min(total))
            }
            Arguments::Backward { last, before } => {
                let end = before
                    .as_ref()
                    .and_then(|c| position(c, &edges))
                    .unwrap_or(total);
                (end.saturating_sub(*last), end)
            }
        };
        edges.truncate(end);

        Self {
            edges: edges.split_off(start),
            has_next: end < total,
            has_previous: start > 0,
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
            has_next_page: self.has_next,
            has_previous_page: self.has_previous,
        }
    }

    /// Iterates over the nodes of this [`Connection`].
    pub fn nodes(&self) -> impl Iterator<Item = &I> {
        self.edges.iter().map(|e| &e.node)
    }

    /// Returns whether this [`Connection`] has no nodes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }
}

/// Information about a page in a [`Connection`].
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct PageInfo<C> {
    /// First cursor on this page.
    pub start_cursor: Option<C>,

    /// Last cursor on this page.
    pub end_cursor: Option<C>,

    /// Indicator whether [`Connection`] has a next page.
    pub has_next_page: bool,

    /// Indicator whether [`Connection`] has a previous page.
    pub has_previous_page: bool,
}

/// An edge in a [`Connection`].
#[derive(Clone, Copy, Debug)]
pub struct Edge<C, I> {
    /// Cursor of this [`Edge`].
    pub cursor: C,

    /// Node of this [`Edge`].
    pub node: I,
}

/// Pagination arguments.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Arguments<C> {
    /// Forward pagination.
    Forward {
        /// Number of items to return.
        first: usize,

        /// Cursor after which to return items.
        after: Option<C>,
    },

    /// Backward pagination.
    Backward {
        /// Number of items to return.
        last: usize,

        /// Cursor before which to return items.
        before: Option<C>,
    },
}

impl<C> Arguments<C> {
    /// Creates new [`Arguments`] out of the raw `first`/`after` and
    /// `last`/`before` pairs.
    ///
    /// [`None`] is returned if both directions are requested at once.
    pub fn new<Num>(
        first: Option<Num>,
        after: Option<C>,
        last: Option<Num>,
        before: Option<C>,
        default: Num,
    ) -> Option<Self>
    where
        Num: TryInto<usize>,
    {
        Some(match (first, after, last, before) {
            (first, after, None, None) => Self::Forward {
                first: first.unwrap_or(default).try_into().ok()?,
                after,
            },
            (None, None, last, before) => Self::Backward {
                last: last.unwrap_or(default).try_into().ok()?,
                before,
            },
            _ => return None,
        })
    }
}

#[cfg(test)]
mod spec {
    use super::{Arguments, Connection, PageInfo};

    fn page(args: Arguments<u32>) -> (Vec<u32>, PageInfo<u32>) {
        let conn = Connection::slice(&args, 1..=5, |n| *n);
        (conn.nodes().copied().collect(), conn.page_info())
    }

    #[test]
    fn forward() {
        let (nodes, info) = page(Arguments::Forward {
            first: 2,
            after: None,
        });
        assert_eq!(nodes, [1, 2]);
        assert_eq!(info.end_cursor, Some(2));
        assert!(info.has_next_page);
        assert!(!info.has_previous_page);

        let (nodes, info) = page(Arguments::Forward {
            first: 2,
            after: Some(4),
        });
        assert_eq!(nodes, [5]);
        assert!(!info.has_next_page);
        assert!(info.has_previous_page);

        let (nodes, info) = page(Arguments::Forward {
            first: 2,
            after: Some(5),
        });
        assert!(nodes.is_empty());
        assert!(!info.has_next_page);
        assert!(info.has_previous_page);

        let (nodes, _) = page(Arguments::Forward {
            first: 2,
            after: Some(42),
        });
        assert_eq!(nodes, [1, 2]);
    }

    #[test]
    fn backward() {
        let (nodes, info) = page(Arguments::Backward {
            last: 2,
            before: Some(3),
        });
        assert_eq!(nodes, [1, 2]);
        assert!(!info.has_previous_page);
        assert!(info.has_next_page);

        let (nodes, info) = page(Arguments::Backward {
            last: 2,
            before: None,
        });
        assert_eq!(nodes, [4, 5]);
        assert_eq!(info.start_cursor, Some(4));
        assert!(info.has_previous_page);
        assert!(!info.has_next_page);
    }

    #[test]
    fn arguments_reject_both_directions() {
        assert_eq!(
            Arguments::new(Some(2), Some(1_u32), None, None, 10),
            Some(Arguments::Forward {
                first: 2,
                after: Some(1),
            }),
        );
        assert_eq!(
            Arguments::<u32>::new(None, None, None, None, 10),
            Some(Arguments::Forward {
                first: 10,
                after: None,
            }),
        );
        assert_eq!(
            Arguments::new(None, None, Some(3), Some(9_u32), 10),
            Some(Arguments::Backward {
                last: 3,
                before: Some(9),
            }),
        );
        assert_eq!(Arguments::new(Some(2), None, Some(3), None::<u32>, 10), None);
        assert_eq!(Arguments::<u32>::new(Some(-1), None, None, None, 10), None);
    }
}

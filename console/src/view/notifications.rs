//! [`Notifications`] view.

use common::{
    pagination::{Arguments, Connection, PageInfo},
    DateTime,
};
use service::domain::{
    notification::{self, Filter, Timestamp},
    Notification,
};
use smart_default::SmartDefault;
use time::UtcOffset;

use super::Event;

/// Message rendered when no [`Notification`] passes the [`Filter`].
pub const EMPTY_MESSAGE: &str = "No notifications";

/// Viewer filtering and paginating a [`Notification`]s list supplied by its
/// owner.
#[derive(Clone, Debug, SmartDefault)]
pub struct Notifications {
    /// Active [`Filter`].
    filter: Filter,

    /// Pagination [`Arguments`] of the current page.
    #[default(Arguments::Forward { first: 10, after: None })]
    page: Arguments<notification::Id>,

    /// Number of [`Notification`]s on a page.
    #[default(10)]
    page_size: usize,

    /// Indicator whether the list is being loaded.
    loading: bool,

    /// Local [`UtcOffset`] timestamps are rendered in.
    #[default(UtcOffset::UTC)]
    offset: UtcOffset,
}

/// Rendered state of a [`Notifications`] view.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum State {
    /// List is being loaded, every interaction is disabled.
    Loading,

    /// No [`Notification`] passes the [`Filter`].
    Empty,

    /// Page of [`Row`]s.
    Page {
        /// [`Row`]s on this page.
        rows: Vec<Row>,

        /// [`PageInfo`] of this page.
        info: PageInfo<notification::Id>,
    },
}

/// Rendered [`Notification`].
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Row {
    /// ID of the [`Notification`].
    pub id: notification::Id,

    /// Title of the [`Notification`].
    pub title: String,

    /// Content of the [`Notification`].
    pub content: String,

    /// Kind of the [`Notification`].
    pub kind: notification::Kind,

    /// Relative delivery [`Timestamp`].
    pub timestamp: Timestamp,

    /// Indicator whether the [`Notification`] is urgent.
    pub is_urgent: bool,

    /// Indicator whether the "Mark as read" action is offered.
    pub can_mark_as_read: bool,
}

impl Notifications {
    /// Creates a new [`Notifications`] view rendering `page_size` items per
    /// page and timestamps in the provided local [`UtcOffset`].
    #[must_use]
    pub fn new(page_size: usize, offset: UtcOffset) -> Self {
        let page_size = page_size.max(1);
        Self {
            page: Arguments::Forward {
                first: page_size,
                after: None,
            },
            page_size,
            offset,
            ..Self::default()
        }
    }

    /// Returns the active [`Filter`].
    #[must_use]
    pub fn filter(&self) -> Filter {
        self.filter
    }

    /// Switches the active [`Filter`], starting over from the first page.
    ///
    /// Ignored while loading.
    pub fn set_filter(&mut self, filter: Filter) {
        if !self.loading {
            self.filter = filter;
            self.first_page();
        }
    }

    /// Marks the list as being loaded or not.
    pub fn set_loading(&mut self, loading: bool) {
        self.loading = loading;
    }

    /// Switches to the first page.
    pub fn first_page(&mut self) {
        self.page = Arguments::Forward {
            first: self.page_size,
            after: None,
        };
    }

    /// Switches to the page following the provided `cursor`.
    pub fn next_page(&mut self, cursor: notification::Id) {
        if !self.loading {
            self.page = Arguments::Forward {
                first: self.page_size,
                after: Some(cursor),
            };
        }
    }

    /// Switches to the page preceding the provided `cursor`.
    pub fn previous_page(&mut self, cursor: notification::Id) {
        if !self.loading {
            self.page = Arguments::Backward {
                last: self.page_size,
                before: Some(cursor),
            };
        }
    }

    /// Switches to the page described by the provided [`Arguments`].
    pub fn go_to(&mut self, page: Arguments<notification::Id>) {
        if !self.loading {
            self.page = page;
        }
    }

    /// Renders the current page of the provided `list` at `now`.
    ///
    /// Loading takes precedence over the empty state.
    #[must_use]
    pub fn render(&self, list: &[Notification], now: DateTime) -> State {
        if self.loading {
            return State::Loading;
        }

        let page = Connection::slice(
            &self.page,
            list.iter().filter(|n| self.filter.matches(n)),
            |n| n.id.clone(),
        );
        if page.is_empty() {
            return State::Empty;
        }

        State::Page {
            info: page.page_info(),
            rows: page
                .nodes()
                .map(|n| Row {
                    id: n.id.clone(),
                    title: n.title.clone(),
                    content: n.content.clone(),
                    kind: n.kind.clone(),
                    timestamp: Timestamp::of(n.date, now, self.offset),
                    is_urgent: n.is_urgent,
                    can_mark_as_read: !n.is_read,
                })
                .collect(),
        }
    }

    /// Requests the provided [`Notification`] to be marked as read.
    ///
    /// Local state is left intact, since the owner re-supplies the updated
    /// list. [`None`] is returned while loading or if the [`Notification`]
    /// has been read already.
    #[must_use]
    pub fn mark_as_read(&self, notification: &Notification) -> Option<Event> {
        (!self.loading && !notification.is_read)
            .then(|| Event::MarkAsRead(notification.id.clone()))
    }
}

#[cfg(test)]
mod spec {
    use common::{pagination::Arguments, DateTime};
    use service::domain::{
        notification::{Filter, Timestamp},
        Notification,
    };
    use time::UtcOffset;

    use super::{Event, Notifications, State};

    fn list(count: usize, urgent: &[usize]) -> Vec<Notification> {
        (0..count)
            .map(|n| Notification {
                id: n.to_string().into(),
                title: format!("Notice #{n}"),
                content: String::new(),
                kind: "lease".to_owned().into(),
                date: DateTime::from_rfc3339("2026-03-10T08:00:00Z")
                    .unwrap()
                    .coerce(),
                is_read: n == 0,
                is_urgent: urgent.contains(&n),
            })
            .collect()
    }

    fn now() -> DateTime {
        DateTime::from_rfc3339("2026-03-10T12:00:00Z").unwrap()
    }

    fn ids(state: &State) -> Vec<String> {
        match state {
            State::Page { rows, .. } => {
                rows.iter().map(|r| r.id.to_string()).collect()
            }
            State::Loading | State::Empty => vec![],
        }
    }

    #[test]
    fn urgent_filter_shows_only_urgent() {
        let list = list(5, &[1, 3]);
        let mut view = Notifications::new(10, UtcOffset::UTC);
        assert_eq!(view.filter(), Filter::All);
        assert_eq!(ids(&view.render(&list, now())).len(), 5);

        view.set_filter(Filter::Urgent);
        assert_eq!(ids(&view.render(&list, now())), ["1", "3"]);

        view.set_filter(Filter::Unread);
        assert_eq!(ids(&view.render(&list, now())), ["1", "2", "3", "4"]);
    }

    #[test]
    fn loading_takes_precedence_over_empty() {
        let mut view = Notifications::default();
        assert_eq!(view.render(&[], now()), State::Empty);

        view.set_loading(true);
        assert_eq!(view.render(&[], now()), State::Loading);
        assert_eq!(view.render(&list(3, &[]), now()), State::Loading);

        view.set_filter(Filter::Urgent);
        assert_eq!(view.filter(), Filter::All);
    }

    #[test]
    fn paginates_filtered_list() {
        let list = list(5, &[]);
        let mut view = Notifications::new(2, UtcOffset::UTC);

        let state = view.render(&list, now());
        let State::Page { info, .. } = &state else {
            panic!("expected page, got: {state:?}");
        };
        assert_eq!(ids(&state), ["0", "1"]);
        assert!(info.has_next_page);

        view.next_page(info.end_cursor.clone().unwrap());
        let state = view.render(&list, now());
        assert_eq!(ids(&state), ["2", "3"]);
        let State::Page { info, .. } = state else {
            unreachable!();
        };
        assert!(info.has_previous_page);
        assert!(info.has_next_page);

        view.previous_page("2".to_owned().into());
        assert_eq!(ids(&view.render(&list, now())), ["0", "1"]);

        view.go_to(Arguments::Forward {
            first: 3,
            after: Some("3".to_owned().into()),
        });
        let state = view.render(&list, now());
        assert_eq!(ids(&state), ["4"]);
        let State::Page { info, .. } = state else {
            unreachable!();
        };
        assert!(!info.has_next_page);
    }

    #[test]
    fn renders_rows() {
        let list = list(2, &[1]);
        let view =
            Notifications::new(10, UtcOffset::from_hms(-5, 0, 0).unwrap());

        let State::Page { rows, .. } = view.render(&list, now()) else {
            panic!("expected page");
        };
        assert_eq!(rows[0].timestamp, Timestamp::Time { hour: 3, minute: 0 });
        assert!(!rows[0].can_mark_as_read);
        assert!(rows[1].can_mark_as_read);
        assert!(rows[1].is_urgent);
    }

    #[test]
    fn mark_as_read_is_delegated() {
        let list = list(2, &[]);
        let mut view = Notifications::default();

        assert_eq!(view.mark_as_read(&list[0]), None);
        assert_eq!(
            view.mark_as_read(&list[1]),
            Some(Event::MarkAsRead("1".to_owned().into())),
        );
        assert!(!list[1].is_read);

        view.set_loading(true);
        assert_eq!(view.mark_as_read(&list[1]), None);
    }
}

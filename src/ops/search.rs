use chrono::{Days, NaiveDate};

use crate::model::task::Task;
use crate::ops::task_ops::parse_date;

/// A parsed search query.
///
/// Prefixes are checked in order `title:`, `desc:`, `tag:`, `due:`; anything
/// else is a general search over title, description and tags.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Query {
    /// Empty query
    All,
    Title(String),
    Desc(String),
    Tag(String),
    Due(DueFilter),
    Text(String),
}

/// The expression after `due:`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DueFilter {
    /// `due:` with nothing after it
    Any,
    /// `due:none`
    Unset,
    Overdue,
    On(DateRef),
    Before(DateRef),
    After(DateRef),
    OnOrBefore(DateRef),
    OnOrAfter(DateRef),
    /// Malformed date; never matches
    Invalid,
}

/// A calendar date, absolute or relative to today
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateRef {
    Today,
    Yesterday,
    Tomorrow,
    Date(NaiveDate),
}

impl DateRef {
    fn parse(s: &str) -> Option<DateRef> {
        match s {
            "today" => Some(DateRef::Today),
            "yesterday" => Some(DateRef::Yesterday),
            "tomorrow" => Some(DateRef::Tomorrow),
            _ => parse_date(s).map(DateRef::Date),
        }
    }

    fn resolve(self, today: NaiveDate) -> Option<NaiveDate> {
        match self {
            DateRef::Today => Some(today),
            DateRef::Yesterday => today.checked_sub_days(Days::new(1)),
            DateRef::Tomorrow => today.checked_add_days(Days::new(1)),
            DateRef::Date(d) => Some(d),
        }
    }
}

impl DueFilter {
    fn parse(expr: &str) -> DueFilter {
        if expr.is_empty() {
            return DueFilter::Any;
        }
        match expr {
            "none" => return DueFilter::Unset,
            "overdue" => return DueFilter::Overdue,
            _ => {}
        }

        let comparisons: [(&str, fn(DateRef) -> DueFilter); 4] = [
            ("<=", DueFilter::OnOrBefore),
            (">=", DueFilter::OnOrAfter),
            ("<", DueFilter::Before),
            (">", DueFilter::After),
        ];
        for (op, make) in comparisons {
            if let Some(rest) = expr.strip_prefix(op) {
                return DateRef::parse(rest.trim()).map_or(DueFilter::Invalid, make);
            }
        }

        DateRef::parse(expr).map_or(DueFilter::Invalid, DueFilter::On)
    }

    fn matches(self, due: Option<NaiveDate>, today: NaiveDate) -> bool {
        let due = match (self, due) {
            (DueFilter::Any, _) => return true,
            (DueFilter::Unset, due) => return due.is_none(),
            (DueFilter::Invalid, _) | (_, None) => return false,
            (_, Some(d)) => d,
        };

        let against = |r: DateRef| r.resolve(today);
        match self {
            DueFilter::Overdue => due < today,
            DueFilter::On(r) => against(r).is_some_and(|d| due == d),
            DueFilter::Before(r) => against(r).is_some_and(|d| due < d),
            DueFilter::After(r) => against(r).is_some_and(|d| due > d),
            DueFilter::OnOrBefore(r) => against(r).is_some_and(|d| due <= d),
            DueFilter::OnOrAfter(r) => against(r).is_some_and(|d| due >= d),
            DueFilter::Any | DueFilter::Unset | DueFilter::Invalid => false,
        }
    }
}

impl Query {
    /// Parse a raw query. The query is trimmed and lower-cased first.
    pub fn parse(raw: &str) -> Query {
        let q = raw.trim().to_lowercase();
        if q.is_empty() {
            return Query::All;
        }
        if let Some(rest) = q.strip_prefix("title:") {
            return Query::Title(rest.to_string());
        }
        if let Some(rest) = q.strip_prefix("desc:") {
            return Query::Desc(rest.to_string());
        }
        if let Some(rest) = q.strip_prefix("tag:") {
            return Query::Tag(rest.trim().to_string());
        }
        if let Some(rest) = q.strip_prefix("due:") {
            return Query::Due(DueFilter::parse(rest.trim()));
        }
        Query::Text(q)
    }

    /// Evaluate against one task. `today` is the local calendar date.
    pub fn matches(&self, task: &Task, today: NaiveDate) -> bool {
        match self {
            Query::All => true,
            Query::Title(text) => contains_folded(&task.title, text),
            Query::Desc(text) => contains_folded(&task.description, text),
            Query::Tag(name) => name.is_empty() || task.has_tag(name),
            Query::Due(filter) => filter.matches(task.due, today),
            Query::Text(text) => {
                contains_folded(&task.title, text)
                    || contains_folded(&task.description, text)
                    || task.has_tag(text)
            }
        }
    }

    /// Substring to highlight in rendered titles, if the query targets titles
    pub fn title_needle(&self) -> Option<&str> {
        match self {
            Query::Title(text) | Query::Text(text) if !text.is_empty() => Some(text),
            _ => None,
        }
    }
}

/// `needle` is already lower-cased
fn contains_folded(haystack: &str, needle: &str) -> bool {
    needle.is_empty() || haystack.to_lowercase().contains(needle)
}

/// Convenience: parse `query` and evaluate it against `task`
pub fn matches(task: &Task, query: &str, today: NaiveDate) -> bool {
    Query::parse(query).matches(task, today)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

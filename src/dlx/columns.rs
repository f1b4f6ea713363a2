//! Column declaration types accepted by [`Matrix::new`](super::Matrix::new).

/// A single declared column: a name, and whether it is primary (must be
/// covered exactly once) or secondary (covered at most once).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ColumnEntry {
    Primary(String),
    Secondary(String),
}

impl ColumnEntry {
    pub(super) fn into_parts(self) -> (String, bool) {
        match self {
            ColumnEntry::Primary(name) => (name, true),
            ColumnEntry::Secondary(name) => (name, false),
        }
    }
}

impl From<&str> for ColumnEntry {
    fn from(name: &str) -> Self {
        ColumnEntry::Primary(name.to_owned())
    }
}

impl From<String> for ColumnEntry {
    fn from(name: String) -> Self {
        ColumnEntry::Primary(name)
    }
}

impl From<(&str, bool)> for ColumnEntry {
    fn from((name, primary): (&str, bool)) -> Self {
        if primary {
            ColumnEntry::Primary(name.to_owned())
        } else {
            ColumnEntry::Secondary(name.to_owned())
        }
    }
}

impl From<(String, bool)> for ColumnEntry {
    fn from((name, primary): (String, bool)) -> Self {
        if primary {
            ColumnEntry::Primary(name)
        } else {
            ColumnEntry::Secondary(name)
        }
    }
}

/// The column declaration accepted by [`Matrix::new`](super::Matrix::new):
/// either a bare column count (all primary, named `C0..C{n-1}`) or an
/// ordered list of [`ColumnEntry`]s.
#[derive(Debug, Clone)]
pub enum ColumnSpec {
    Count(usize),
    List(Vec<ColumnEntry>),
}

impl From<usize> for ColumnSpec {
    fn from(n: usize) -> Self {
        ColumnSpec::Count(n)
    }
}

impl<T: Into<ColumnEntry>> From<Vec<T>> for ColumnSpec {
    fn from(entries: Vec<T>) -> Self {
        ColumnSpec::List(entries.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<ColumnEntry> + Clone> From<&[T]> for ColumnSpec {
    fn from(entries: &[T]) -> Self {
        ColumnSpec::List(entries.iter().cloned().map(Into::into).collect())
    }
}

/// Expands a [`ColumnSpec`] into `(name, is_primary)` pairs in declaration order.
pub(super) fn normalize(spec: ColumnSpec) -> Vec<(String, bool)> {
    match spec {
        ColumnSpec::Count(n) => (0..n).map(|i| (format!("C{i}"), true)).collect(),
        ColumnSpec::List(entries) => entries.into_iter().map(ColumnEntry::into_parts).collect(),
    }
}

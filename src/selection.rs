use indexmap::IndexSet;
use serde::{Deserialize, Serialize};
use tracing::trace;

/// Paths the user wants in the aggregate, in the order they were first
/// selected.
///
/// Members are not pruned when a file disappears upstream; such paths simply
/// fail to resolve when aggregating.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SelectionSet {
    paths: IndexSet<String>,
}

impl SelectionSet {
    pub fn new() -> Self {
        SelectionSet::default()
    }

    pub fn contains(&self, path: &str) -> bool {
        self.paths.contains(path)
    }

    /// Returns false if the path was already selected.
    pub fn insert(&mut self, path: &str) -> bool {
        self.paths.insert(path.to_owned())
    }

    pub fn remove(&mut self, path: &str) -> bool {
        self.paths.shift_remove(path)
    }

    pub fn clear(&mut self) {
        self.paths.clear();
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.paths.iter().map(String::as_str)
    }

    /// Applies one render pass of checkbox values.
    ///
    /// Only the visible paths are touched: a checked path is added (keeping
    /// its position if already present) and an unchecked one removed. Paths
    /// that are not visible, e.g. inside a collapsed folder, keep their
    /// membership.
    pub fn reconcile<'a, I>(&mut self, visible: I)
    where
        I: IntoIterator<Item = (&'a str, bool)>,
    {
        for (path, checked) in visible {
            if checked {
                if self.insert(path) {
                    trace!("Selected {}", path);
                }
            } else if self.remove(path) {
                trace!("Deselected {}", path);
            }
        }
    }
}

impl<'a> FromIterator<&'a str> for SelectionSet {
    fn from_iter<T: IntoIterator<Item = &'a str>>(iter: T) -> Self {
        SelectionSet {
            paths: iter.into_iter().map(str::to_owned).collect(),
        }
    }
}

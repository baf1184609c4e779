use std::collections::BTreeSet;
use std::collections::btree_set;
use std::path::{Path, PathBuf};

/// A set of unique paths with a deterministic iteration order.
///
/// Membership ignores insertion order. Materialising the set always yields
/// paths sorted by their components, so the order in which files are
/// formatted and reported is reproducible between runs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PathSet {
    paths: BTreeSet<PathBuf>,
}

impl PathSet {
    /// Creates an empty set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a path. Returns `true` if it was not already present.
    pub fn add(&mut self, path: impl Into<PathBuf>) -> bool {
        self.paths.insert(path.into())
    }

    /// Removes a path. Returns `true` if it was present.
    pub fn remove(&mut self, path: &Path) -> bool {
        self.paths.remove(path)
    }

    /// Removes every path for which `predicate` returns `true`.
    ///
    /// Returns the number of removed paths.
    pub fn remove_where<F>(&mut self, mut predicate: F) -> usize
    where
        F: FnMut(&Path) -> bool,
    {
        let before = self.paths.len();
        self.paths.retain(|p| !predicate(p.as_path()));
        before - self.paths.len()
    }

    #[must_use]
    pub fn contains(&self, path: &Path) -> bool {
        self.paths.contains(path)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.paths.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    /// Iterates the paths in sorted order.
    pub fn iter(&self) -> btree_set::Iter<'_, PathBuf> {
        self.paths.iter()
    }

    /// Copies the paths into a sorted list.
    #[must_use]
    pub fn to_ordered_list(&self) -> Vec<PathBuf> {
        self.paths.iter().cloned().collect()
    }

    /// Consumes the set, returning its paths in sorted order.
    #[must_use]
    pub fn into_sorted_vec(self) -> Vec<PathBuf> {
        self.paths.into_iter().collect()
    }
}

impl<P: Into<PathBuf>> FromIterator<P> for PathSet {
    fn from_iter<I: IntoIterator<Item = P>>(iter: I) -> Self {
        Self {
            paths: iter.into_iter().map(Into::into).collect(),
        }
    }
}

impl<P: Into<PathBuf>> Extend<P> for PathSet {
    fn extend<I: IntoIterator<Item = P>>(&mut self, iter: I) {
        self.paths.extend(iter.into_iter().map(Into::into));
    }
}

impl IntoIterator for PathSet {
    type Item = PathBuf;
    type IntoIter = btree_set::IntoIter<PathBuf>;

    fn into_iter(self) -> Self::IntoIter {
        self.paths.into_iter()
    }
}

impl<'a> IntoIterator for &'a PathSet {
    type Item = &'a PathBuf;
    type IntoIter = btree_set::Iter<'a, PathBuf>;

    fn into_iter(self) -> Self::IntoIter {
        self.paths.iter()
    }
}

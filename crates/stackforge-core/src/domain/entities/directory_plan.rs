use crate::domain::entities::common::RelativePath;

/// Ordered set of directories to create for one sub-project.
///
/// Insertion order is preserved and re-inserting a path is a no-op, so
/// materialising the plan twice produces the same directory set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DirectoryPlan {
    dirs: Vec<RelativePath>,
}

impl DirectoryPlan {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `false` if the path was already planned.
    pub fn insert(&mut self, dir: RelativePath) -> bool {
        if self.dirs.contains(&dir) {
            return false;
        }
        self.dirs.push(dir);
        true
    }

    pub fn contains(&self, dir: &str) -> bool {
        self.dirs.iter().any(|d| d.to_slash_string() == dir)
    }

    pub fn iter(&self) -> impl Iterator<Item = &RelativePath> {
        self.dirs.iter()
    }

    pub fn len(&self) -> usize {
        self.dirs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dirs.is_empty()
    }
}

impl<'a> IntoIterator for &'a DirectoryPlan {
    type Item = &'a RelativePath;
    type IntoIter = std::slice::Iter<'a, RelativePath>;

    fn into_iter(self) -> Self::IntoIter {
        self.dirs.iter()
    }
}

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use crate::domain::{
    entities::{common::RelativePath, directory_plan::DirectoryPlan},
    error::DomainError,
};

/// Planned content of one sub-project, ready for materialization.
///
/// Generators build this purely; the application layer writes it through the
/// `Filesystem` port. It contains no business logic, only data.
#[derive(Debug, Clone)]
pub struct ProjectStructure {
    pub(crate) root: PathBuf,
    pub(crate) entries: Vec<FsEntry>,
}

impl ProjectStructure {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            entries: Vec::new(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn add_file(&mut self, path: &str, content: impl Into<String>) -> Result<(), DomainError> {
        self.entries.push(FsEntry::File(FileToWrite {
            path: RelativePath::try_new(path)?,
            content: content.into(),
        }));
        Ok(())
    }

    pub fn add_directory(&mut self, path: RelativePath) {
        self.entries
            .push(FsEntry::Directory(DirectoryToCreate { path }));
    }

    pub fn add_plan(&mut self, plan: &DirectoryPlan) {
        for dir in plan {
            self.add_directory(dir.clone());
        }
    }

    pub fn with_file(mut self, path: &str, content: impl Into<String>) -> Result<Self, DomainError> {
        self.add_file(path, content)?;
        Ok(self)
    }

    pub fn validate(&self) -> Result<(), DomainError> {
        if self.entries.is_empty() {
            return Err(DomainError::InvalidStructure(
                "project structure is empty".into(),
            ));
        }

        let mut seen = HashSet::new();
        for entry in &self.entries {
            let path = entry.path().to_slash_string();
            if !seen.insert(path.clone()) {
                return Err(DomainError::DuplicatePath { path });
            }
        }

        Ok(())
    }

    pub fn files(&self) -> impl Iterator<Item = &FileToWrite> {
        self.entries.iter().filter_map(|e| match e {
            FsEntry::File(f) => Some(f),
            _ => None,
        })
    }

    pub fn directories(&self) -> impl Iterator<Item = &DirectoryToCreate> {
        self.entries.iter().filter_map(|e| match e {
            FsEntry::Directory(d) => Some(d),
            _ => None,
        })
    }

    /// Content of a planned file, by forward-slash relative path.
    pub fn file(&self, path: &str) -> Option<&str> {
        self.files()
            .find(|f| f.path.to_slash_string() == path)
            .map(|f| f.content.as_str())
    }

    pub fn has_file(&self, path: &str) -> bool {
        self.file(path).is_some()
    }

    pub fn entry_count(&self) -> usize {
        self.entries.len()
    }
}

#[derive(Debug, Clone)]
pub enum FsEntry {
    File(FileToWrite),
    Directory(DirectoryToCreate),
}

impl FsEntry {
    pub fn path(&self) -> &RelativePath {
        match self {
            Self::File(f) => &f.path,
            Self::Directory(d) => &d.path,
        }
    }
}

#[derive(Debug, Clone)]
pub struct FileToWrite {
    pub path: RelativePath,
    pub content: String,
}

impl FileToWrite {
    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }
}

#[derive(Debug, Clone)]
pub struct DirectoryToCreate {
    pub path: RelativePath,
}

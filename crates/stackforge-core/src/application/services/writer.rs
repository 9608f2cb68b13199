//! Materialization of a planned [`ProjectStructure`] through the
//! `Filesystem` port.

use tracing::debug;

use crate::{
    application::ports::Filesystem,
    domain::{FsEntry, ProjectStructure},
    error::StackforgeResult,
};

/// Counts of what a write produced.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WriteStats {
    pub files: usize,
    pub directories: usize,
}

impl WriteStats {
    pub fn add(&mut self, other: WriteStats) {
        self.files += other.files;
        self.directories += other.directories;
    }
}

/// Write every entry of `structure` below its root, in plan order.
///
/// Stops at the first failure and leaves what was written in place.
pub fn write_structure(
    filesystem: &dyn Filesystem,
    structure: &ProjectStructure,
) -> StackforgeResult<WriteStats> {
    structure.validate()?;
    filesystem.create_dir_all(structure.root())?;

    let mut stats = WriteStats::default();
    for entry in &structure.entries {
        let path = structure.root().join(entry.path());
        match entry {
            FsEntry::Directory(_) => {
                filesystem.create_dir_all(&path)?;
                stats.directories += 1;
            }
            FsEntry::File(file) => {
                if let Some(parent) = path.parent() {
                    filesystem.create_dir_all(parent)?;
                }
                filesystem.write_file(&path, &file.content)?;
                stats.files += 1;
            }
        }
    }

    debug!(
        root = %structure.root().display(),
        files = stats.files,
        directories = stats.directories,
        "Structure written"
    );
    Ok(stats)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::output::MockFilesystem;
    use crate::domain::RelativePath;
    use std::path::Path;

    #[test]
    fn writes_directories_then_files_under_root() {
        let mut structure = ProjectStructure::new("/out/app");
        structure.add_directory(RelativePath::try_new("src").unwrap());
        structure.add_file("src/index.ts", "console.log(1);").unwrap();

        let mut fs = MockFilesystem::new();
        fs.expect_create_dir_all().returning(|_| Ok(()));
        fs.expect_write_file()
            .withf(|path, content| {
                path == Path::new("/out/app/src/index.ts") && content == "console.log(1);"
            })
            .times(1)
            .returning(|_, _| Ok(()));

        let stats = write_structure(&fs, &structure).unwrap();
        assert_eq!(stats, WriteStats { files: 1, directories: 1 });
    }

    #[test]
    fn rejects_duplicate_paths_before_writing() {
        let mut structure = ProjectStructure::new("/out/app");
        structure.add_file("a.txt", "1").unwrap();
        structure.add_file("a.txt", "2").unwrap();

        let fs = MockFilesystem::new();
        assert!(write_structure(&fs, &structure).is_err());
    }
}

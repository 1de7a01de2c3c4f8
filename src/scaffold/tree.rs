//! Read-only browsing of a generated project.

use std::path::{Component, Path, PathBuf};

use serde::Serialize;

use crate::{FigcoError, Result};

/// A node of the project tree. Paths are relative to the project root and
/// always use `/`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum FileEntry {
    File {
        name: String,
        path: String,
        size: u64,
    },
    Folder {
        name: String,
        path: String,
        children: Vec<FileEntry>,
    },
}

impl FileEntry {
    pub fn name(&self) -> &str {
        match self {
            FileEntry::File { name, .. } | FileEntry::Folder { name, .. } => name,
        }
    }

    pub fn path(&self) -> &str {
        match self {
            FileEntry::File { path, .. } | FileEntry::Folder { path, .. } => path,
        }
    }

    pub fn is_folder(&self) -> bool {
        matches!(self, FileEntry::Folder { .. })
    }

    /// Number of files below this entry.
    pub fn file_count(&self) -> usize {
        match self {
            FileEntry::File { .. } => 1,
            FileEntry::Folder { children, .. } => children.iter().map(FileEntry::file_count).sum(),
        }
    }
}

/// Directories never listed: dependency caches and VCS metadata.
const SKIPPED_DIRS: &[&str] = &["node_modules", ".git"];

pub fn read_project_tree(root: &Path) -> Result<FileEntry> {
    if !root.is_dir() {
        return Err(FigcoError::Config(format!(
            "Project directory {} not found",
            root.display()
        )));
    }
    let name = root
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| root.display().to_string());
    Ok(FileEntry::Folder {
        name,
        path: String::new(),
        children: read_dir_entries(root, "")?,
    })
}

fn read_dir_entries(dir: &Path, prefix: &str) -> Result<Vec<FileEntry>> {
    let mut entries = Vec::new();
    for entry in std::fs::read_dir(dir)? {
        let entry = entry?;
        let name = entry.file_name().to_string_lossy().into_owned();
        let path = if prefix.is_empty() {
            name.clone()
        } else {
            format!("{prefix}/{name}")
        };
        let file_type = entry.file_type()?;
        if file_type.is_dir() {
            if SKIPPED_DIRS.contains(&name.as_str()) {
                continue;
            }
            let children = read_dir_entries(&entry.path(), &path)?;
            entries.push(FileEntry::Folder {
                name,
                path,
                children,
            });
        } else if file_type.is_file() {
            let size = entry.metadata()?.len();
            entries.push(FileEntry::File { name, path, size });
        }
    }
    entries.sort_by(|a, b| {
        b.is_folder()
            .cmp(&a.is_folder())
            .then_with(|| a.name().cmp(b.name()))
    });
    Ok(entries)
}

/// Read a file inside `root`. `relative` must stay within the project.
pub fn read_project_file(root: &Path, relative: &str) -> Result<String> {
    let target = resolve_inside(root, relative)?;
    if !target.is_file() {
        return Err(FigcoError::Config(format!(
            "File not found in project: {relative}"
        )));
    }
    Ok(std::fs::read_to_string(target)?)
}

fn resolve_inside(root: &Path, relative: &str) -> Result<PathBuf> {
    let rel = Path::new(relative);
    let outside = || {
        FigcoError::Config(format!(
            "Path {relative} is outside the project directory"
        ))
    };

    let mut clean = PathBuf::new();
    for component in rel.components() {
        match component {
            Component::Normal(part) => clean.push(part),
            Component::CurDir => {}
            Component::ParentDir => {
                if !clean.pop() {
                    return Err(outside());
                }
            }
            Component::RootDir | Component::Prefix(_) => return Err(outside()),
        }
    }

    let target = root.join(&clean);
    // Symlinks may still point elsewhere.
    if let (Ok(real_root), Ok(real_target)) = (root.canonicalize(), target.canonicalize()) {
        if !real_target.starts_with(&real_root) {
            return Err(outside());
        }
    }
    Ok(target)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn project() -> tempfile::TempDir {
        let dir = tempfile::tempdir().expect("tempdir");
        let root = dir.path();
        std::fs::create_dir_all(root.join("src/components")).expect("mkdir");
        std::fs::create_dir_all(root.join("node_modules/react")).expect("mkdir");
        std::fs::write(root.join("package.json"), "{}").expect("write");
        std::fs::write(root.join("README.md"), "# hi").expect("write");
        std::fs::write(root.join("src/index.js"), "// entry").expect("write");
        std::fs::write(root.join("src/components/App.js"), "export default 1;").expect("write");
        dir
    }

    #[test]
    fn tree_lists_folders_first_and_skips_node_modules() {
        let dir = project();
        let tree = read_project_tree(dir.path()).expect("tree");

        let FileEntry::Folder { children, .. } = &tree else {
            panic!("root should be a folder");
        };
        let names: Vec<&str> = children.iter().map(FileEntry::name).collect();
        assert_eq!(names, vec!["src", "README.md", "package.json"]);
        assert_eq!(tree.file_count(), 4);

        let FileEntry::Folder { children: src, .. } = &children[0] else {
            panic!("src should be a folder");
        };
        assert_eq!(src[0].path(), "src/components");
        assert_eq!(src[1].path(), "src/index.js");
    }

    #[test]
    fn tree_serializes_with_type_tag() {
        let dir = project();
        let tree = read_project_tree(dir.path()).expect("tree");
        let value = serde_json::to_value(&tree).expect("json");
        assert_eq!(value["type"], "folder");
        assert_eq!(value["children"][2]["type"], "file");
        assert_eq!(value["children"][2]["size"], 2);
    }

    #[test]
    fn read_file_inside_project() {
        let dir = project();
        let text = read_project_file(dir.path(), "src/./components/App.js").expect("read");
        assert_eq!(text, "export default 1;");
        let text = read_project_file(dir.path(), "src/../package.json").expect("read");
        assert_eq!(text, "{}");
    }

    #[test]
    fn read_file_rejects_escape_and_absolute_paths() {
        let dir = project();
        for bad in ["../secret.txt", "src/../../etc/passwd", "/etc/passwd"] {
            let err = read_project_file(dir.path(), bad).unwrap_err();
            assert!(
                err.to_string().contains("outside the project"),
                "{bad}: {err}"
            );
        }
    }

    #[test]
    fn missing_file_and_missing_root_are_errors() {
        let dir = project();
        assert!(read_project_file(dir.path(), "nope.txt").is_err());
        assert!(read_project_tree(&dir.path().join("absent")).is_err());
    }
}

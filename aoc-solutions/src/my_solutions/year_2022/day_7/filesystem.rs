//! Directory tree rebuilt from a transcript
//!
//! Directories live in an arena indexed by [`DirId`]; the root is always the
//! first slot. Every directory caches the total size of the files below it,
//! updated as each file is registered.

use std::collections::{BTreeMap, HashMap};
use std::fmt;

use thiserror::Error;
use tracing::{debug, warn};

use super::command::{CdTarget, Command, ListEntry};

/// Handle of a directory inside a [`FileSystem`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DirId(usize);

impl DirId {
    pub const ROOT: DirId = DirId(0);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    File,
    Directory,
}

impl fmt::Display for EntryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntryKind::File => f.write_str("file"),
            EntryKind::Directory => f.write_str("directory"),
        }
    }
}

/// A name listed twice in the same directory
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind} {name:?} listed twice in {directory}")]
pub struct DuplicateEntry {
    pub directory: String,
    pub name: String,
    pub kind: EntryKind,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("no directory {name:?} in {cwd}")]
pub struct PathNotFound {
    pub name: String,
    pub cwd: String,
}

/// A file whose size would push the total past `u64::MAX`
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("file {name:?} of {size} bytes in {directory} overflows the total size")]
pub struct SizeOverflow {
    pub directory: String,
    pub name: String,
    pub size: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BuildError {
    #[error(transparent)]
    PathNotFound(#[from] PathNotFound),
    #[error(transparent)]
    SizeOverflow(#[from] SizeOverflow),
}

#[derive(Debug, Clone)]
pub struct Directory {
    name: String,
    parent: Option<DirId>,
    subdirectories: Vec<DirId>,
    by_name: HashMap<String, DirId>,
    files: BTreeMap<String, u64>,
    cumulative_size: u64,
}

impl Directory {
    fn new(name: String, parent: Option<DirId>) -> Self {
        Self {
            name,
            parent,
            subdirectories: Vec::new(),
            by_name: HashMap::new(),
            files: BTreeMap::new(),
            cumulative_size: 0,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn parent(&self) -> Option<DirId> {
        self.parent
    }

    /// Child directories in the order they were first listed
    pub fn subdirectories(&self) -> &[DirId] {
        &self.subdirectories
    }

    pub fn subdirectory(&self, name: &str) -> Option<DirId> {
        self.by_name.get(name).copied()
    }

    pub fn files(&self) -> &BTreeMap<String, u64> {
        &self.files
    }

    /// Total size of every file in this directory and below
    pub fn cumulative_size(&self) -> u64 {
        self.cumulative_size
    }
}

#[derive(Debug, Clone)]
pub struct FileSystem {
    directories: Vec<Directory>,
    anomalies: Vec<DuplicateEntry>,
}

impl Default for FileSystem {
    fn default() -> Self {
        Self {
            directories: vec![Directory::new("/".to_string(), None)],
            anomalies: Vec::new(),
        }
    }
}

impl FileSystem {
    /// Replay `commands` starting from an empty root
    pub fn build(commands: &[Command]) -> Result<Self, BuildError> {
        let mut fs = Self::default();
        let mut cwd = DirId::ROOT;

        for command in commands {
            match command {
                Command::ChangeDirectory(CdTarget::Root) => cwd = DirId::ROOT,
                Command::ChangeDirectory(CdTarget::Parent) => {
                    cwd = fs.directory(cwd).parent.unwrap_or(DirId::ROOT);
                }
                Command::ChangeDirectory(CdTarget::Child(name)) => {
                    cwd = fs
                        .directory(cwd)
                        .subdirectory(name)
                        .ok_or_else(|| PathNotFound {
                            name: name.clone(),
                            cwd: fs.path(cwd),
                        })?;
                }
                Command::List(entries) => {
                    for entry in entries {
                        match entry {
                            ListEntry::Directory { name } => fs.add_directory(cwd, name),
                            ListEntry::File { name, size } => fs.add_file(cwd, name, *size)?,
                        }
                    }
                }
            }
        }

        debug!(
            directories = fs.directories.len(),
            total_size = fs.root().cumulative_size,
            anomalies = fs.anomalies.len(),
            "rebuilt filesystem"
        );
        Ok(fs)
    }

    pub fn root(&self) -> &Directory {
        self.directory(DirId::ROOT)
    }

    // Handles are only minted by this arena, so indexing stays in bounds
    pub fn directory(&self, id: DirId) -> &Directory {
        &self.directories[id.0]
    }

    pub fn len(&self) -> usize {
        self.directories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.directories.is_empty()
    }

    /// Duplicate listings seen while building
    pub fn anomalies(&self) -> &[DuplicateEntry] {
        &self.anomalies
    }

    /// Follow directory names down from the root
    pub fn resolve<'a, I>(&self, components: I) -> Option<DirId>
    where
        I: IntoIterator<Item = &'a str>,
    {
        components
            .into_iter()
            .try_fold(DirId::ROOT, |id, name| self.directory(id).subdirectory(name))
    }

    /// Absolute path of `id`, `/` for the root
    pub fn path(&self, id: DirId) -> String {
        let mut names = Vec::new();
        let mut cursor = id;
        while let Some(parent) = self.directory(cursor).parent {
            names.push(self.directory(cursor).name.as_str());
            cursor = parent;
        }
        names.reverse();
        format!("/{}", names.join("/"))
    }

    fn record_duplicate(&mut self, dir: DirId, name: &str, kind: EntryKind) {
        let anomaly = DuplicateEntry {
            directory: self.path(dir),
            name: name.to_string(),
            kind,
        };
        warn!("{}", anomaly);
        self.anomalies.push(anomaly);
    }

    fn add_directory(&mut self, parent: DirId, name: &str) {
        if self.directory(parent).by_name.contains_key(name) {
            self.record_duplicate(parent, name, EntryKind::Directory);
            return;
        }

        let id = DirId(self.directories.len());
        self.directories
            .push(Directory::new(name.to_string(), Some(parent)));
        let parent = &mut self.directories[parent.0];
        parent.subdirectories.push(id);
        parent.by_name.insert(name.to_string(), id);
    }

    /// Every ancestor total is bounded by the root total, so checking the root
    /// before touching anything covers the whole chain
    fn add_file(&mut self, dir: DirId, name: &str, size: u64) -> Result<(), SizeOverflow> {
        let replaced = self.directory(dir).files.get(name).copied();
        let previous = replaced.unwrap_or(0);
        if (self.root().cumulative_size - previous).checked_add(size).is_none() {
            return Err(SizeOverflow {
                directory: self.path(dir),
                name: name.to_string(),
                size,
            });
        }

        self.directories[dir.0].files.insert(name.to_string(), size);
        if replaced.is_some() {
            self.record_duplicate(dir, name, EntryKind::File);
        }

        let mut cursor = Some(dir);
        while let Some(id) = cursor {
            let directory = &mut self.directories[id.0];
            directory.cumulative_size = directory.cumulative_size - previous + size;
            cursor = directory.parent;
        }
        Ok(())
    }
}

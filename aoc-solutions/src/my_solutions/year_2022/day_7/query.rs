use super::filesystem::{DirId, Directory, FileSystem};

impl FileSystem {
    /// Directories whose cumulative size satisfies `predicate`, in pre-order
    pub fn collect<P>(&self, predicate: P) -> Vec<&Directory>
    where
        P: Fn(u64) -> bool,
    {
        let mut found = Vec::new();
        let mut pending = vec![DirId::ROOT];
        while let Some(id) = pending.pop() {
            let dir = self.directory(id);
            if predicate(dir.cumulative_size()) {
                found.push(dir);
            }
            pending.extend(dir.subdirectories().iter().rev());
        }
        found
    }
}

/// Summed cumulative size of every directory smaller than `limit`
pub fn sum_of_small_directories(fs: &FileSystem, limit: u64) -> u64 {
    fs.collect(|size| size < limit)
        .iter()
        .map(|dir| dir.cumulative_size())
        .sum()
}

/// Smallest directory whose removal frees more than the missing space
pub fn smallest_directory_to_delete(fs: &FileSystem, disk_size: u64, required: u64) -> Option<u64> {
    let free = disk_size.saturating_sub(fs.root().cumulative_size());
    let missing = required.saturating_sub(free);
    fs.collect(|size| size > missing)
        .iter()
        .map(|dir| dir.cumulative_size())
        .min()
}

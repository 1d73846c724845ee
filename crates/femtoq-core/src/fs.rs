use std::fs::{self, File};
use std::io::{self, Write};
use std::path::Path;

pub fn ensure_dir<P: AsRef<Path>>(path: P) -> io::Result<()> {
    fs::create_dir_all(path)
}

/// Write `data` to `dir/<name>` atomically: write to a same-directory temp
/// name, fsync, then rename into place. A reader can only ever observe the
/// file fully written, never a partial `push`.
pub fn write_new_file_atomic<P: AsRef<Path>>(dir: P, name: &str, data: &[u8]) -> io::Result<()> {
    let dir = dir.as_ref();
    let temp_name = format!(".tmp.{name}");
    let temp_path = dir.join(&temp_name);
    let final_path = dir.join(name);

    {
        let mut file = File::create(&temp_path)?;
        file.write_all(data)?;
        file.sync_all()?;
    }

    fs::rename(&temp_path, &final_path)
}

/// List the immediate entry names of a directory, sorted lexicographically.
/// Hidden names (leading `.`, e.g. stray temp files from an interrupted
/// `write_new_file_atomic`) are skipped. A missing directory yields an empty
/// list rather than an error.
pub fn list_names_sorted<P: AsRef<Path>>(dir: P) -> io::Result<Vec<String>> {
    let dir = dir.as_ref();
    if !dir.exists() {
        return Ok(Vec::new());
    }

    let mut names = Vec::new();
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let name = entry.file_name().to_string_lossy().into_owned();
        if !name.starts_with('.') {
            names.push(name);
        }
    }
    names.sort();
    Ok(names)
}

/// Rename `src_dir/<name>` to `dst_dir/<name>`, reporting whether the source
/// still existed at rename time. `Ok(false)` (not an error) means a peer won
/// the race and claimed/reclaimed/completed the file first.
pub fn try_rename_into(src_dir: &Path, dst_dir: &Path, name: &str) -> io::Result<bool> {
    let src = src_dir.join(name);
    let dst = dst_dir.join(name);
    match fs::rename(&src, &dst) {
        Ok(()) => Ok(true),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
        Err(e) => Err(e),
    }
}

pub fn read_file<P: AsRef<Path>>(path: P) -> io::Result<Vec<u8>> {
    fs::read(path)
}

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use log::debug;

use crate::combine::CombineError;

/// Regular files directly inside `dir`.
///
/// Sorted by file name when `sort` is set, otherwise in whatever order the
/// platform lists the directory.
pub fn working_set(dir: &Path, sort: bool) -> Result<Vec<PathBuf>, CombineError> {
    let list_error = |e: io::Error| CombineError::List(dir.to_path_buf(), e);

    let mut files = Vec::new();
    for entry in fs::read_dir(dir).map_err(list_error)? {
        let path = entry.map_err(list_error)?.path();
        if path.is_file() {
            files.push(path);
        }
    }
    if sort {
        files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    }
    Ok(files)
}

/// Copies every source verbatim into `writer`, in order, and returns the total
/// byte count. The first unreadable source aborts the copy.
pub fn concatenate<W: Write>(sources: &[PathBuf], writer: &mut W) -> Result<u64, CombineError> {
    let mut total = 0;
    for source in sources {
        let data = fs::read(source).map_err(|e| CombineError::Read(source.clone(), e))?;
        writer.write_all(&data).map_err(CombineError::Write)?;
        debug!("collected {} ({} bytes)", source.display(), data.len());
        total += data.len() as u64;
    }
    Ok(total)
}

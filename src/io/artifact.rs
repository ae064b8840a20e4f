use std::fs::File;
use std::io::{BufWriter, Result, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;

use crate::combine::CombineError;
use crate::utils::DEFAULT_BUF_SIZE;

/// Output file that only becomes visible under its final name on `commit`.
///
/// Content is written to a temporary file next to the target. Dropping an
/// uncommitted artifact removes the temporary file and leaves any previous
/// target untouched.
pub struct Artifact {
    path: PathBuf,
    writer: BufWriter<NamedTempFile>,
}

impl Artifact {
    pub fn create(path: &Path) -> std::result::Result<Artifact, CombineError> {
        let dir = match path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p,
            _ => Path::new("."),
        };
        let file = tempfile::Builder::new()
            .prefix(".ccombine")
            .suffix(".tmp")
            .tempfile_in(dir)
            .map_err(|e| CombineError::Artifact(path.to_path_buf(), e))?;
        Ok(Artifact {
            path: path.to_path_buf(),
            writer: BufWriter::with_capacity(DEFAULT_BUF_SIZE, file),
        })
    }

    /// Flush written content and open an independent reader over it, without
    /// committing.
    pub fn reopen(&mut self) -> Result<File> {
        self.writer.flush()?;
        self.writer.get_ref().reopen()
    }

    /// Flush and atomically replace the target with the written content.
    pub fn commit(self) -> std::result::Result<(), CombineError> {
        let path = self.path;
        let file = self
            .writer
            .into_inner()
            .map_err(|e| CombineError::Artifact(path.clone(), e.into_error()))?;
        file.persist(&path)
            .map_err(|e| CombineError::Artifact(path.clone(), e.error))?;
        Ok(())
    }
}

impl Write for Artifact {
    fn write(&mut self, buf: &[u8]) -> Result<usize> {
        self.writer.write(buf)
    }

    fn flush(&mut self) -> Result<()> {
        self.writer.flush()
    }
}

#[cfg(test)]
mod test {
    use std::fs;
    use std::io::{Read, Write};

    use super::Artifact;

    #[test]
    fn test_artifact_commit_replaces_target() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("out.txt");
        fs::write(&target, "stale").unwrap();

        let mut artifact = Artifact::create(&target).unwrap();
        artifact.write_all(b"fresh").unwrap();
        assert_eq!(fs::read_to_string(&target).unwrap(), "stale");

        artifact.commit().unwrap();
        assert_eq!(fs::read_to_string(&target).unwrap(), "fresh");
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 1);
    }

    #[test]
    fn test_artifact_reopen_before_commit() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("out.txt");

        let mut artifact = Artifact::create(&target).unwrap();
        artifact.write_all(b"int a;\n").unwrap();
        let mut content = String::new();
        artifact.reopen().unwrap().read_to_string(&mut content).unwrap();
        assert_eq!(content, "int a;\n");
        assert!(!target.exists());

        artifact.commit().unwrap();
        assert_eq!(fs::read_to_string(&target).unwrap(), "int a;\n");
    }

    #[test]
    fn test_artifact_drop_discards_content() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("final.txt");

        {
            let mut artifact = Artifact::create(&target).unwrap();
            artifact.write_all(b"partial").unwrap();
        }
        assert!(!target.exists());
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);
    }
}

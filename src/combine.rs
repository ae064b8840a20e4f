use std::io::{self, BufReader, Read, Write};
use std::path::{Path, PathBuf};

use log::{debug, info};
use thiserror::Error;

use crate::collect;
use crate::config::Config;
use crate::filter::comments::CommentsRemover;
use crate::io::artifact::Artifact;
use crate::io::statistic::Statistic;
use crate::utils::DEFAULT_BUF_SIZE;

#[derive(Error, Debug)]
pub enum CombineError {
    #[error("can't list directory {}: {1}", .0.display())]
    List(PathBuf, #[source] io::Error),
    #[error("can't read {}: {1}", .0.display())]
    Read(PathBuf, #[source] io::Error),
    #[error("can't write artifact content: {0}")]
    Write(#[source] io::Error),
    #[error("can't store artifact {}: {1}", .0.display())]
    Artifact(PathBuf, #[source] io::Error),
}

/// Locations of the two files a run produces.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Artifacts {
    pub intermediate: PathBuf,
    pub output: PathBuf,
}

impl Artifacts {
    pub fn resolve(config: &Config, dir: &Path) -> Self {
        Artifacts {
            intermediate: dir.join(&config.intermediate),
            output: dir.join(&config.output),
        }
    }

    pub fn contains(&self, path: &Path) -> bool {
        path == self.intermediate || path == self.output
    }
}

/// Combine every regular file in `dir` and strip comments from the result.
///
/// Artifacts left by a previous run are part of the working set unless
/// `skip_artifacts` is configured, so repeated runs are not idempotent.
pub fn run(config: &Config, dir: &Path) -> Result<Statistic, CombineError> {
    let artifacts = Artifacts::resolve(config, dir);
    let mut sources = collect::working_set(dir, config.sort_inputs)?;
    if config.skip_artifacts {
        sources.retain(|path| !artifacts.contains(path));
    }
    info!("Collecting {} files from {}", sources.len(), dir.display());
    combine(&sources, &artifacts)
}

pub fn combine(sources: &[PathBuf], artifacts: &Artifacts) -> Result<Statistic, CombineError> {
    let mut statistic = Statistic::new();
    statistic.files = sources.len();

    let mut intermediate = Artifact::create(&artifacts.intermediate)?;
    statistic.collected_bytes = collect::concatenate(sources, &mut intermediate)?;
    debug!(
        "Collected {} bytes for {}",
        statistic.collected_bytes,
        artifacts.intermediate.display()
    );

    // Both artifacts stay uncommitted until stripping succeeds.
    let file = intermediate
        .reopen()
        .map_err(|e| CombineError::Artifact(artifacts.intermediate.clone(), e))?;
    let mut remover = CommentsRemover::new(BufReader::with_capacity(DEFAULT_BUF_SIZE, file));
    let mut output = Artifact::create(&artifacts.output)?;
    statistic.stripped_bytes = pump(&artifacts.intermediate, &mut remover, &mut output)?;
    statistic.lines = remover.lines();
    statistic.swallowed_lines = remover.swallowed();
    debug!("Comment stripper finished in state {:?}", remover.state());

    intermediate.commit()?;
    info!(
        "Wrote {} ({} bytes)",
        artifacts.intermediate.display(),
        statistic.collected_bytes
    );
    output.commit()?;
    info!(
        "Wrote {} ({} bytes)",
        artifacts.output.display(),
        statistic.stripped_bytes
    );

    Ok(statistic)
}

fn pump<R: Read, W: Write>(source: &Path, reader: &mut R, writer: &mut W) -> Result<u64, CombineError> {
    let mut buffer = vec![0; DEFAULT_BUF_SIZE];
    let mut total = 0;
    loop {
        let size = match reader.read(&mut buffer) {
            Ok(0) => return Ok(total),
            Ok(size) => size,
            Err(ref e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(CombineError::Read(source.to_path_buf(), e)),
        };
        writer.write_all(&buffer[..size]).map_err(CombineError::Write)?;
        total += size as u64;
    }
}

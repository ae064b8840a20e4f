use std::ffi::OsString;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use std::process;

use clap::Parser;
use log::{error, info};

use ccombine::filter::comments::strip_comments;
use ccombine::io::artifact::Artifact;
use ccombine::utils::DEFAULT_BUF_SIZE;
use ccombine::version;

/// Strip C comments from each file, writing the result next to it
#[derive(Parser)]
#[command(name = "strip_comments", version = version::VERSION)]
struct Args {
    /// Suffix appended to each input name for the stripped copy
    #[arg(short, long, default_value = "~")]
    suffix: String,

    /// Source files to strip
    #[arg(required = true)]
    inputs: Vec<PathBuf>,
}

fn main() {
    env_logger::init();

    let args = Args::parse();
    for input in args.inputs.iter() {
        if let Err(e) = strip_file(input, &args.suffix) {
            error!("FATAL ERROR: {}: {}", input.display(), e);
            process::exit(1);
        }
    }
}

fn strip_file(input: &Path, suffix: &str) -> Result<(), Box<dyn std::error::Error>> {
    let mut name = OsString::from(input.as_os_str());
    name.push(suffix);
    let target = PathBuf::from(name);

    let reader = BufReader::with_capacity(DEFAULT_BUF_SIZE, File::open(input)?);
    let mut output = Artifact::create(&target)?;
    let size = strip_comments(reader, &mut output)?;
    output.commit()?;
    info!("{} -> {} ({} bytes)", input.display(), target.display(), size);
    Ok(())
}

#[cfg(test)]
mod test {
    use std::fs;

    use super::strip_file;

    const SOURCE: &str = "int a; // counter\n/* block */int b;\n";

    #[test]
    fn test_strip_file_default_suffix() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("frag.c");
        fs::write(&input, SOURCE).unwrap();

        strip_file(&input, "~").unwrap();

        assert_eq!(
            fs::read_to_string(dir.path().join("frag.c~")).unwrap(),
            "int a; int b;\n"
        );
        assert_eq!(fs::read_to_string(&input).unwrap(), SOURCE);
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 2);
    }

    #[test]
    fn test_strip_file_custom_suffix() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("frag.c");
        fs::write(&input, SOURCE).unwrap();
        fs::write(dir.path().join("frag.c.clean"), "stale").unwrap();

        strip_file(&input, ".clean").unwrap();

        assert_eq!(
            fs::read_to_string(dir.path().join("frag.c.clean")).unwrap(),
            "int a; int b;\n"
        );
        assert!(!dir.path().join("frag.c~").exists());
        assert_eq!(fs::read_to_string(&input).unwrap(), SOURCE);
    }

    #[test]
    fn test_strip_file_missing_input() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("absent.c");

        assert!(strip_file(&input, "~").is_err());
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);
    }
}

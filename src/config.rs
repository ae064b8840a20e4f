use figment::providers::{Env, Format, Serialized, Yaml};
use figment::Figment;
use std::path::PathBuf;

#[derive(serde::Serialize, serde::Deserialize, Debug, Clone)]
pub struct Config {
    /// Concatenation of every input file, relative to the working directory.
    pub intermediate: PathBuf,
    /// Intermediate artifact with comments removed.
    pub output: PathBuf,
    pub sort_inputs: bool,
    /// Leave previous artifacts out of the working set.
    pub skip_artifacts: bool,
    pub log_level: String,
    pub log_file: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            intermediate: PathBuf::from("out.txt"),
            output: PathBuf::from("final.txt"),
            sort_inputs: true,
            skip_artifacts: false,
            log_level: "info".to_string(),
            log_file: None,
        }
    }
}

impl Config {
    pub fn load() -> figment::error::Result<Config> {
        Config::load_from(
            vec![global_config_path(), local_config_path()]
                .into_iter()
                .flatten()
                .collect(),
        )
    }

    pub fn load_from(paths: Vec<PathBuf>) -> figment::error::Result<Config> {
        let mut figment = Figment::from(Serialized::defaults(Config::default()));

        for path in paths {
            figment = figment.merge(Yaml::file(path));
        }

        figment.merge(Env::prefixed("CCOMBINE_")).extract()
    }

    pub fn help() {
        print!("{}", Config::describe(Config::load()));
    }

    /// Layer sources in merge order followed by the effective values.
    fn describe(loaded: figment::error::Result<Config>) -> String {
        let mut text = String::from("Configuration layers, later ones override earlier:\n");
        text.push_str("  defaults  built in\n");
        for (layer, path) in [("system", global_config_path()), ("user", local_config_path())] {
            let location = path.map_or_else(|| "unavailable".to_string(), |p| p.display().to_string());
            text.push_str(&format!("  {layer:<9} {location}\n"));
        }
        text.push_str("  env       CCOMBINE_* variables\n\nEffective values:\n");

        let yaml = loaded
            .map_err(|e| e.to_string())
            .and_then(|config| serde_yaml::to_string(&config).map_err(|e| e.to_string()));
        match yaml {
            Ok(yaml) => text.push_str(&yaml),
            Err(e) => text.push_str(&format!("  can't load configuration: {e}\n")),
        }
        text
    }
}

fn local_config_path() -> Option<PathBuf> {
    let dirs = directories::BaseDirs::new()?;
    Some(dirs.config_dir().join("ccombine").join("ccombine.conf"))
}

#[cfg(windows)]
fn global_config_path() -> Option<PathBuf> {
    use std::env;

    Some(
        PathBuf::from(env::var("ProgramData").ok()?)
            .join("ccombine")
            .join("ccombine.conf"),
    )
}

#[cfg(unix)]
fn global_config_path() -> Option<PathBuf> {
    Some(PathBuf::from("/etc").join("ccombine").join("ccombine.conf"))
}

#[cfg(test)]
mod test {
    use super::Config;
    use figment::Jail;
    use std::path::PathBuf;

    #[test]
    fn test_config_defaults() {
        Jail::expect_with(|_| {
            let config = Config::load_from(vec![])?;
            assert_eq!(config.intermediate, PathBuf::from("out.txt"));
            assert_eq!(config.output, PathBuf::from("final.txt"));
            assert!(config.sort_inputs);
            assert!(!config.skip_artifacts);
            assert_eq!(config.log_file, None);
            Ok(())
        });
    }

    #[test]
    fn test_config_layers() {
        Jail::expect_with(|jail| {
            jail.create_file(
                "ccombine.conf",
                "output: merged.c\nsort_inputs: false\nlog_level: debug\n",
            )?;
            jail.set_env("CCOMBINE_OUTPUT", "unit.c");
            jail.set_env("CCOMBINE_SKIP_ARTIFACTS", "true");

            let config = Config::load_from(vec![PathBuf::from("ccombine.conf")])?;
            assert_eq!(config.intermediate, PathBuf::from("out.txt"));
            assert_eq!(config.output, PathBuf::from("unit.c"));
            assert!(!config.sort_inputs);
            assert!(config.skip_artifacts);
            assert_eq!(config.log_level, "debug");
            Ok(())
        });
    }

    #[test]
    fn test_config_describe() {
        let text = Config::describe(Ok(Config::default()));
        assert!(text.contains("  system    "));
        assert!(text.contains("  env       CCOMBINE_* variables\n"));
        assert!(text.contains("output: final.txt\n"));
        assert!(text.contains("skip_artifacts: false\n"));

        let failed = Config::describe(Err(figment::Error::from("bad layer".to_string())));
        assert!(failed.contains("  can't load configuration: bad layer"));
    }

    #[test]
    fn test_config_missing_file_is_ignored() {
        Jail::expect_with(|_| {
            let config = Config::load_from(vec![PathBuf::from("absent.conf")])?;
            assert_eq!(config.output, PathBuf::from("final.txt"));
            Ok(())
        });
    }
}

//! Example models bundled into the binary from the `demos` folder, and the `example` subcommands
//! for using them.
use super::{RunOpts, handle_run_command};
use crate::output::OUTPUT_DIRECTORY_ROOT;
use crate::settings::Settings;
use anyhow::{Context, Result, bail, ensure};
use clap::Subcommand;
use include_dir::{Dir, DirEntry, include_dir};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// One subfolder per example model
static EXAMPLES_DIR: Dir<'static> = include_dir!("$CARGO_MANIFEST_DIR/demos");

/// The file in each example folder describing the example
const README_FILE_NAME: &str = "README.txt";

/// Subcommands for the bundled example models
#[derive(Subcommand)]
pub enum ExampleSubcommands {
    /// Print the names of the example models.
    List,
    /// Describe an example model.
    Info {
        /// Name of the example.
        name: String,
    },
    /// Copy the files for an example model into a new folder.
    Extract {
        /// Name of the example.
        name: String,
        /// Folder to create (defaults to the name of the example).
        new_path: Option<PathBuf>,
    },
    /// Calculate transmission costs for an example model.
    Run {
        /// Name of the example.
        name: String,
        /// Where to write results
        #[command(flatten)]
        opts: RunOpts,
    },
}

impl ExampleSubcommands {
    /// Execute the `example` subcommand
    pub fn execute(self) -> Result<()> {
        match self {
            Self::List => {
                for name in example_names() {
                    println!("{name}");
                }
            }
            Self::Info { name } => println!("{}", example_readme(&name)?),
            Self::Extract { name, new_path } => {
                let new_path = new_path.unwrap_or_else(|| PathBuf::from(&name));
                extract_example(&name, &new_path)?;
            }
            Self::Run { name, opts } => handle_example_run_command(&name, &opts, None)?,
        }

        Ok(())
    }
}

/// Names of the bundled example models
fn example_names() -> impl Iterator<Item = &'static str> {
    EXAMPLES_DIR
        .dirs()
        .filter_map(|dir| dir.path().file_name()?.to_str())
}

/// The bundled folder for the named example
fn example_dir(name: &str) -> Result<&'static Dir<'static>> {
    EXAMPLES_DIR
        .get_dir(name)
        .with_context(|| format!("No example called '{name}'. Run `example list` to see options."))
}

/// The contents of the README for the named example
fn example_readme(name: &str) -> Result<&'static str> {
    let readme_path = example_dir(name)?.path().join(README_FILE_NAME);
    EXAMPLES_DIR
        .get_file(&readme_path)
        .and_then(|file| file.contents_utf8())
        .with_context(|| format!("Example '{name}' has no readable {README_FILE_NAME}"))
}

/// Write the files of the named example into the new folder `new_path`
fn extract_example(name: &str, new_path: &Path) -> Result<()> {
    let dir = example_dir(name)?;
    ensure!(
        !new_path.exists(),
        "Destination directory {} already exists",
        new_path.display()
    );

    fs::create_dir_all(new_path)
        .with_context(|| format!("Could not create {}", new_path.display()))?;
    for entry in dir.entries() {
        let DirEntry::File(file) = entry else {
            bail!("Unexpected subdirectory in example: {}", entry.path().display());
        };
        let file_name = file.path().file_name().context("Example file has no name")?;
        fs::write(new_path.join(file_name), file.contents())?;
    }

    Ok(())
}

/// Handle the `example run` command.
///
/// The example is extracted to a temporary folder. Unless another output folder is given, results
/// are written to `transmission_results/<example name>`.
pub fn handle_example_run_command(
    name: &str,
    opts: &RunOpts,
    settings: Option<Settings>,
) -> Result<()> {
    let temp_dir = TempDir::new().context("Failed to create temporary directory.")?;
    let model_path = temp_dir.path().join(name);
    extract_example(name, &model_path)?;

    let output_dir = match &opts.output_dir {
        Some(output_dir) => output_dir.clone(),
        None => [OUTPUT_DIRECTORY_ROOT, name].iter().collect(),
    };
    let opts = RunOpts {
        output_dir: Some(output_dir),
        overwrite: opts.overwrite,
    };

    handle_run_command(&model_path, &opts, settings)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_example_names() {
        let names: Vec<_> = example_names().collect();
        assert!(names.contains(&"simple"));
        assert!(names.contains(&"explicit_distances"));
    }

    #[test]
    fn test_example_readme() {
        for name in example_names() {
            assert!(!example_readme(name).unwrap().is_empty());
        }
        assert!(example_readme("no_such_example").is_err());
    }

    #[test]
    fn test_extract_example() {
        let dir = tempdir().unwrap();
        let dest = dir.path().join("simple");
        extract_example("simple", &dest).unwrap();
        assert!(dest.join("model.toml").is_file());
        assert!(dest.join("zones.csv").is_file());
        assert!(dest.join("capacities.csv").is_file());

        // Can't extract to the same place twice
        assert!(extract_example("simple", &dest).is_err());
    }

    #[test]
    fn test_extract_example_not_found() {
        let dir = tempdir().unwrap();
        assert!(extract_example("no_such_example", &dir.path().join("x")).is_err());
    }
}

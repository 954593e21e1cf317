//! Run requests and their pre-spawn validation

use crate::error::{Error, Result};
use crate::run::config::{Harness, Settings};
use crate::suite::Suite;
use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

/// Flag that introduces the candidate executable in the harness argv
pub const INTERPRETER_FLAG: &str = "--interpreter";

/// Everything needed to run one suite, checked before anything is spawned
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunRequest {
    pub suite: Suite,
    pub target: PathBuf,
    pub harness: Harness,
    pub base_dir: PathBuf,
}

impl RunRequest {
    /// Build and validate a request for `suite` using shared settings
    pub fn new(suite: Suite, settings: &Settings) -> Result<Self> {
        let mut request = RunRequest {
            suite,
            target: settings.target.clone(),
            harness: settings.harness.clone(),
            base_dir: settings.base_dir.clone(),
        };
        request.validate()?;
        request.base_dir = absolute_path(&request.base_dir)?;
        request.target = absolute_path(&request.target)?;
        Ok(request)
    }

    /// Check that every path the harness will need is present
    pub fn validate(&self) -> Result<()> {
        if !self.base_dir.is_dir() {
            return Err(Error::configuration(format!(
                "Harness base directory '{}' does not exist or is not a directory",
                self.base_dir.display()
            )));
        }

        check_executable(&self.target)?;

        if let Some(entry) = self.entry_path() {
            if !entry.is_file() {
                return Err(Error::configuration(format!(
                    "Harness entry '{}' does not exist or is not a file",
                    entry.display()
                )));
            }
        }

        // Bare names are resolved on PATH by the spawn itself.
        if self.harness.program.components().count() > 1 {
            let program = self.resolve_in_base(&self.harness.program);
            if !program.is_file() {
                return Err(Error::configuration(format!(
                    "Harness program '{}' does not exist or is not a file",
                    program.display()
                )));
            }
        }

        Ok(())
    }

    /// Program to spawn
    pub fn program(&self) -> PathBuf {
        if self.harness.program.components().count() > 1 {
            self.resolve_in_base(&self.harness.program)
        } else {
            self.harness.program.clone()
        }
    }

    /// Entry file, resolved against the base directory
    pub fn entry_path(&self) -> Option<PathBuf> {
        self.harness
            .entry
            .as_deref()
            .map(|entry| self.resolve_in_base(entry))
    }

    /// The exact argument list handed to the harness program
    pub fn command_line(&self) -> Vec<OsString> {
        let mut args = Vec::new();
        if let Some(entry) = &self.harness.entry {
            args.push(entry.clone().into_os_string());
        }
        args.extend(self.suite.selector().into_iter().map(OsString::from));
        args.push(OsString::from(INTERPRETER_FLAG));
        args.push(self.target.clone().into_os_string());
        args
    }

    /// Human-readable rendering of the invocation
    pub fn display_command(&self) -> String {
        let mut parts = vec![self.program().to_string_lossy().to_string()];
        parts.extend(
            self.command_line()
                .iter()
                .map(|arg| arg.to_string_lossy().to_string()),
        );
        parts.join(" ")
    }

    fn resolve_in_base(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.base_dir.join(path)
        }
    }
}

/// The harness runs from the base directory, so relative paths must be
/// anchored to the caller's directory before the spawn.
fn absolute_path(path: &Path) -> Result<PathBuf> {
    if path.is_absolute() {
        Ok(path.to_path_buf())
    } else {
        Ok(std::env::current_dir()?.join(path))
    }
}

fn check_executable(target: &Path) -> Result<()> {
    let metadata = fs::metadata(target).map_err(|e| {
        Error::configuration(format!(
            "Target executable '{}' is not accessible: {}",
            target.display(),
            e
        ))
    })?;

    if !metadata.is_file() {
        return Err(Error::configuration(format!(
            "Target executable '{}' is not a file",
            target.display()
        )));
    }

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        if metadata.permissions().mode() & 0o111 == 0 {
            return Err(Error::configuration(format!(
                "Target executable '{}' is not executable",
                target.display()
            )));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(entry: Option<&str>) -> RunRequest {
        RunRequest {
            suite: Suite::parse("chap10_functions").unwrap(),
            target: PathBuf::from("/opt/lox/bin/lox"),
            harness: Harness {
                program: PathBuf::from("dart"),
                entry: entry.map(PathBuf::from),
            },
            base_dir: PathBuf::from("/opt/craftinginterpreters"),
        }
    }

    #[test]
    fn command_line_with_entry() {
        let args = request(Some("tool/bin/test.dart")).command_line();
        assert_eq!(
            args,
            vec![
                OsString::from("tool/bin/test.dart"),
                OsString::from("chap10_functions"),
                OsString::from("--interpreter"),
                OsString::from("/opt/lox/bin/lox"),
            ]
        );
    }

    #[test]
    fn command_line_without_entry() {
        let args = request(None).command_line();
        assert_eq!(
            args,
            vec![
                OsString::from("chap10_functions"),
                OsString::from("--interpreter"),
                OsString::from("/opt/lox/bin/lox"),
            ]
        );
    }

    #[test]
    fn entry_resolves_against_base_dir() {
        let req = request(Some("tool/bin/test.dart"));
        assert_eq!(
            req.entry_path(),
            Some(PathBuf::from("/opt/craftinginterpreters/tool/bin/test.dart"))
        );
    }

    #[test]
    fn bare_program_is_left_for_path_lookup() {
        assert_eq!(request(None).program(), PathBuf::from("dart"));
    }

    #[test]
    fn display_command_joins_program_and_args() {
        assert_eq!(
            request(Some("tool/bin/test.dart")).display_command(),
            "dart tool/bin/test.dart chap10_functions --interpreter /opt/lox/bin/lox"
        );
    }

    #[test]
    fn missing_base_dir_fails_validation() {
        let err = request(None).validate().unwrap_err();
        assert!(err.is_configuration());
        assert!(err.to_string().contains("base directory"));
    }
}

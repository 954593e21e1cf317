//! Resolution of runner settings from the environment and CLI overrides

use crate::error::{Error, Result};
use std::ffi::OsString;
use std::path::PathBuf;

/// Base directory of the external harness project
pub const HARNESS_HOME_VAR: &str = "HARNESS_HOME";
/// Candidate interpreter executable
pub const TARGET_BIN_VAR: &str = "TARGET_BIN";
/// Program spawned to run the harness
pub const HARNESS_PROGRAM_VAR: &str = "HARNESS_PROGRAM";
/// Entry-point file handed to the harness program
pub const HARNESS_ENTRY_VAR: &str = "HARNESS_ENTRY";

pub const DEFAULT_HARNESS_PROGRAM: &str = "dart";
pub const DEFAULT_HARNESS_ENTRY: &str = "tool/bin/test.dart";

/// How the harness is launched
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Harness {
    /// Program to spawn, either a bare name looked up on `PATH` or a path
    pub program: PathBuf,
    /// Optional entry file passed as the first argument
    pub entry: Option<PathBuf>,
}

impl Default for Harness {
    fn default() -> Self {
        Harness {
            program: PathBuf::from(DEFAULT_HARNESS_PROGRAM),
            entry: Some(PathBuf::from(DEFAULT_HARNESS_ENTRY)),
        }
    }
}

/// Values given on the command line, each taking precedence over its variable
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub harness_home: Option<PathBuf>,
    pub target: Option<PathBuf>,
    pub harness_program: Option<PathBuf>,
    pub harness_entry: Option<PathBuf>,
    /// Launch the harness program without any entry argument
    pub no_entry: bool,
}

/// Settings shared by every suite run of one invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub base_dir: PathBuf,
    pub target: PathBuf,
    pub harness: Harness,
}

impl Settings {
    /// Resolve settings from the process environment
    pub fn from_env(overrides: &Overrides) -> Result<Self> {
        Self::resolve(overrides, |key| std::env::var_os(key))
    }

    /// Resolve settings using `lookup` in place of the process environment
    ///
    /// Empty values count as unset.
    pub fn resolve<F>(overrides: &Overrides, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<OsString>,
    {
        let var = |key: &str| {
            lookup(key)
                .filter(|value| !value.is_empty())
                .map(PathBuf::from)
        };

        let base_dir = overrides
            .harness_home
            .clone()
            .or_else(|| var(HARNESS_HOME_VAR))
            .ok_or_else(|| {
                Error::configuration(format!(
                    "{} is not set (or pass --harness-home)",
                    HARNESS_HOME_VAR
                ))
            })?;

        let target = overrides
            .target
            .clone()
            .or_else(|| var(TARGET_BIN_VAR))
            .ok_or_else(|| {
                Error::configuration(format!(
                    "{} is not set (or pass --target)",
                    TARGET_BIN_VAR
                ))
            })?;

        let program = overrides
            .harness_program
            .clone()
            .or_else(|| var(HARNESS_PROGRAM_VAR))
            .unwrap_or_else(|| PathBuf::from(DEFAULT_HARNESS_PROGRAM));

        let entry = if overrides.no_entry {
            None
        } else {
            Some(
                overrides
                    .harness_entry
                    .clone()
                    .or_else(|| var(HARNESS_ENTRY_VAR))
                    .unwrap_or_else(|| PathBuf::from(DEFAULT_HARNESS_ENTRY)),
            )
        };

        Ok(Settings {
            base_dir,
            target,
            harness: Harness { program, entry },
        })
    }
}

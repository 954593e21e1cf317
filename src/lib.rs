//! # suite-runner
//!
//! Runs named conformance suites of an external test harness against a
//! candidate interpreter executable.
//!
//! The harness is treated as an opaque program: it is spawned from its own
//! base directory as
//!
//! ```text
//! <program> [entry] <suite> --interpreter <target>
//! ```
//!
//! and its exit status and output are handed back untouched. The caller's
//! working directory is never changed.
//!
//! # Examples
//!
//! ```no_run
//! use suite_runner::{Overrides, Runner, Settings, Suite};
//!
//! let settings = Settings::from_env(&Overrides::default()).unwrap();
//! let suite = Suite::parse("chap09_control").unwrap();
//! let outcome = Runner::new(settings).run(&suite).unwrap();
//! print!("{}", String::from_utf8_lossy(&outcome.stdout));
//! std::process::exit(outcome.status);
//! ```

pub mod error;
pub mod run;
pub mod suite;

pub use error::{Error, Result};
pub use run::{
    overall_status, run_suite, Harness, OutputMode, Overrides, RunOutcome, RunRequest, Runner,
    Settings,
};
pub use suite::{Suite, SuiteInfo, SuiteOrigin, KNOWN_SUITES};

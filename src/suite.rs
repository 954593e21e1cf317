//! Suite table and suite-identifier parsing

use crate::error::{Error, Result};
use regex::Regex;
use std::fmt;
use std::sync::OnceLock;

/// Shape of chapter suites the harness may know about beyond the table
const CHAPTER_PATTERN: &str = r"^chap[0-9]{2}_[a-z][a-z0-9_]*$";

/// A known suite: its identifier and the feature area it covers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SuiteInfo {
    pub name: &'static str,
    pub topic: &'static str,
}

/// Suites the harness is known to accept
pub const KNOWN_SUITES: &[SuiteInfo] = &[
    SuiteInfo {
        name: "chap04_scanning",
        topic: "scanning",
    },
    SuiteInfo {
        name: "chap06_parsing",
        topic: "parsing expressions",
    },
    SuiteInfo {
        name: "chap07_evaluating",
        topic: "evaluating expressions",
    },
    SuiteInfo {
        name: "chap08_statements",
        topic: "statements and state",
    },
    SuiteInfo {
        name: "chap09_control",
        topic: "control flow",
    },
    SuiteInfo {
        name: "chap10_functions",
        topic: "functions",
    },
    SuiteInfo {
        name: "chap11_resolving",
        topic: "resolving and binding",
    },
    SuiteInfo {
        name: "chap12_classes",
        topic: "classes",
    },
    SuiteInfo {
        name: "chap13_inheritance",
        topic: "inheritance",
    },
    SuiteInfo {
        name: "jlox",
        topic: "complete interpreter",
    },
];

/// Where a suite identifier was resolved from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SuiteOrigin {
    /// Listed in [`KNOWN_SUITES`]
    Known,
    /// Not listed, but shaped like `chapNN_<topic>`
    Extended,
}

/// A validated suite identifier
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Suite {
    name: String,
    origin: SuiteOrigin,
}

impl Suite {
    /// Parse a suite identifier, accepting known suites and chapter-shaped names
    pub fn parse(input: &str) -> Result<Self> {
        let name = input.trim();
        if name.is_empty() {
            return Err(Error::configuration("Suite identifier is empty"));
        }

        if KNOWN_SUITES.iter().any(|info| info.name == name) {
            return Ok(Suite {
                name: name.to_string(),
                origin: SuiteOrigin::Known,
            });
        }

        if chapter_regex()?.is_match(name) {
            tracing::warn!(suite = name, "suite is not in the known table, passing it through");
            return Ok(Suite {
                name: name.to_string(),
                origin: SuiteOrigin::Extended,
            });
        }

        Err(Error::configuration(format!(
            "Unknown suite '{}'. Known suites: {}",
            name,
            known_names().join(", ")
        )))
    }

    /// The identifier as given to the harness
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn origin(&self) -> SuiteOrigin {
        self.origin
    }

    /// Topic from the known table, if any
    pub fn topic(&self) -> Option<&'static str> {
        KNOWN_SUITES
            .iter()
            .find(|info| info.name == self.name)
            .map(|info| info.topic)
    }

    /// Arguments that select this suite in the harness invocation
    pub fn selector(&self) -> Vec<String> {
        vec![self.name.clone()]
    }
}

impl fmt::Display for Suite {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

impl std::str::FromStr for Suite {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Suite::parse(s)
    }
}

fn chapter_regex() -> Result<&'static Regex> {
    static CHAPTER: OnceLock<Regex> = OnceLock::new();
    if let Some(regex) = CHAPTER.get() {
        return Ok(regex);
    }
    let regex = Regex::new(CHAPTER_PATTERN)?;
    Ok(CHAPTER.get_or_init(|| regex))
}

/// Names of all known suites, in table order
pub fn known_names() -> Vec<&'static str> {
    KNOWN_SUITES.iter().map(|info| info.name).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_every_known_suite() {
        for info in KNOWN_SUITES {
            let suite = Suite::parse(info.name).unwrap();
            assert_eq!(suite.name(), info.name);
            assert_eq!(suite.origin(), SuiteOrigin::Known);
            assert_eq!(suite.topic(), Some(info.topic));
            assert_eq!(suite.selector(), vec![info.name.to_string()]);
        }
    }

    #[test]
    fn trims_surrounding_whitespace() {
        let suite = Suite::parse("  chap09_control\n").unwrap();
        assert_eq!(suite.name(), "chap09_control");
    }

    #[test]
    fn accepts_future_chapter_suites() {
        let suite = Suite::parse("chap14_chunks").unwrap();
        assert_eq!(suite.origin(), SuiteOrigin::Extended);
        assert_eq!(suite.topic(), None);
    }

    #[test]
    fn chapter_pattern_is_compiled_once() {
        let first = chapter_regex().unwrap() as *const Regex;
        Suite::parse("chap20_optimization").unwrap();
        let second = chapter_regex().unwrap() as *const Regex;
        assert_eq!(first, second);
    }

    #[test]
    fn rejects_empty_identifier() {
        let err = Suite::parse("   ").unwrap_err();
        assert!(err.is_configuration());
    }

    #[test]
    fn rejects_unknown_identifier() {
        for bad in [
            "control",
            "chap9_control",
            "chap09_",
            "CHAP09_CONTROL",
            "chap09-control",
        ] {
            let err = Suite::parse(bad).unwrap_err();
            assert!(err.is_configuration(), "expected rejection of {:?}", bad);
        }

        let message = Suite::parse("nope").unwrap_err().to_string();
        assert!(message.contains("nope"));
        assert!(message.contains("chap13_inheritance"));
    }

    #[test]
    fn known_table_has_unique_names() {
        let mut names = known_names();
        names.sort();
        names.dedup();
        assert_eq!(names.len(), KNOWN_SUITES.len());
    }
}

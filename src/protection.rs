//! Protected branch matching.
//!
//! A protected pattern is either a literal branch name or a wildcard pattern
//! containing `*`. Wildcards match any run of characters (including none and
//! including `/`) and are anchored at both ends, so `release*` protects
//! `release-1` but not `my-release-1`. All other characters are literal.
//!
//! Protection is the exception: a name that matches nothing is deletable.

use regex::Regex;

/// A single compiled protection rule.
#[derive(Debug, Clone)]
enum Matcher {
    /// Exact, case-sensitive branch name.
    Exact(String),
    /// Anchored wildcard pattern, kept alongside its source text.
    Wildcard { pattern: String, regex: Regex },
}

/// Why a branch name is protected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Protection<'a> {
    /// The name equals a configured literal.
    Exact(&'a str),
    /// The name matches a configured wildcard pattern.
    Pattern(&'a str),
}

impl Protection<'_> {
    /// The configured entry that matched.
    pub fn pattern(&self) -> &str {
        match self {
            Protection::Exact(p) | Protection::Pattern(p) => p,
        }
    }
}

/// Compiled set of protected names and patterns, built once per run.
#[derive(Debug, Clone, Default)]
pub struct ProtectedPatterns {
    matchers: Vec<Matcher>,
}

impl ProtectedPatterns {
    /// Compile a list of protected entries.
    ///
    /// Entries are expected to be trimmed and non-empty already; see
    /// [`parse_protected_list`].
    pub fn new<S: AsRef<str>>(patterns: &[S]) -> Self {
        let matchers = patterns
            .iter()
            .filter_map(|p| compile(p.as_ref()))
            .collect();
        Self { matchers }
    }

    /// Check a branch name against the set.
    ///
    /// Literals are checked before wildcards so an exact hit is always
    /// reported as such, mirroring the order of the skip checks.
    pub fn check(&self, name: &str) -> Option<Protection<'_>> {
        let exact = self.matchers.iter().find_map(|m| match m {
            Matcher::Exact(literal) if literal == name => Some(Protection::Exact(literal)),
            _ => None,
        });
        if exact.is_some() {
            return exact;
        }

        self.matchers.iter().find_map(|m| match m {
            Matcher::Wildcard { pattern, regex } if regex.is_match(name) => {
                Some(Protection::Pattern(pattern))
            }
            _ => None,
        })
    }

    /// Returns true if the branch name is protected.
    pub fn is_protected(&self, name: &str) -> bool {
        self.check(name).is_some()
    }

    /// Number of compiled entries.
    pub fn len(&self) -> usize {
        self.matchers.len()
    }

    /// Returns true if nothing is protected.
    pub fn is_empty(&self) -> bool {
        self.matchers.is_empty()
    }
}

/// Convenience form of [`ProtectedPatterns::is_protected`] for one-off checks.
#[cfg(test)]
pub fn is_protected<S: AsRef<str>>(name: &str, patterns: &[S]) -> bool {
    ProtectedPatterns::new(patterns).is_protected(name)
}

/// Split a comma-separated protected list into trimmed, non-empty entries.
pub fn parse_protected_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

fn compile(pattern: &str) -> Option<Matcher> {
    if !pattern.contains('*') {
        return Some(Matcher::Exact(pattern.to_string()));
    }

    let body = pattern
        .split('*')
        .map(regex::escape)
        .collect::<Vec<_>>()
        .join(".*");

    // Escaped input always compiles; a failure here just means the entry
    // protects nothing.
    let regex = Regex::new(&format!("^{}$", body)).ok()?;
    Some(Matcher::Wildcard {
        pattern: pattern.to_string(),
        regex,
    })
}

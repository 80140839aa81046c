//! Documentation examples and the allow-list of files they are generated for.

use crate::split::{split, RE_HTTP_METHOD};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::borrow::Cow;

/// Reference documentation files whose examples are generated by default.
pub const DEFAULT_ENABLED_FILES: &[&str] = &[
    "docs/delete.asciidoc",
    "docs/get.asciidoc",
    "docs/index_.asciidoc",
    "getting-started.asciidoc",
    "query-dsl/query-string-query.asciidoc",
    "search/request-body.asciidoc",
    "setup/install/check-running.asciidoc",
];

/// Where an example lives in the reference documentation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceLocation {
    pub file: String,
    pub line: usize,
}

/// One console code block from the documentation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Example {
    pub source_location: SourceLocation,
    /// Correlation key used in the `tag:`/`end:` markers. Derived from the
    /// source when the input does not carry one.
    #[serde(default)]
    pub digest: String,
    pub source: String,
}

impl Example {
    pub fn new(file: &str, line: usize, source: &str) -> Self {
        Self {
            source_location: SourceLocation {
                file: file.to_string(),
                line,
            },
            digest: String::new(),
            source: source.to_string(),
        }
    }

    pub fn with_digest(mut self, digest: &str) -> Self {
        self.digest = digest.to_string();
        self
    }

    /// The stored digest, or 32 hex characters of the SHA-256 of the source.
    pub fn digest(&self) -> Cow<'_, str> {
        if !self.digest.is_empty() {
            return Cow::Borrowed(&self.digest);
        }
        let hash = Sha256::digest(self.source.as_bytes());
        Cow::Owned(hash[..16].iter().map(|b| format!("{b:02x}")).collect())
    }

    /// `file:line` identifier for progress and error messages.
    pub fn id(&self) -> String {
        format!("{}:{}", self.source_location.file, self.source_location.line)
    }

    /// Chapter name used in generated test names: `docs/get.asciidoc` → `docs_get`.
    pub fn chapter(&self) -> String {
        self.source_location
            .file
            .replace(".asciidoc", "")
            .replace(['/', '-'], "_")
    }

    /// Link to the example in the Elasticsearch reference sources.
    pub fn github_url(&self) -> String {
        format!(
            "https://github.com/elastic/elasticsearch/blob/master/docs/reference/{}#L{}",
            self.source_location.file, self.source_location.line
        )
    }

    /// Returns true when any line of the example is a request.
    pub fn is_executable(&self) -> bool {
        self.source.lines().any(|line| RE_HTTP_METHOD.is_match(line))
    }

    /// Request texts contained in the example.
    pub fn commands(&self) -> Vec<String> {
        split(&self.source)
    }

    pub fn is_enabled(&self, enabled: &EnabledFiles) -> bool {
        enabled.is_enabled(&self.source_location.file)
    }
}

/// Allow-list of documentation files to generate examples for.
///
/// Entries containing glob metacharacters are matched as patterns,
/// everything else by exact path.
#[derive(Debug, Clone)]
pub struct EnabledFiles {
    exact: Vec<String>,
    patterns: Vec<glob::Pattern>,
    allow_all: bool,
}

impl EnabledFiles {
    pub fn new<I, S>(entries: I) -> Result<Self, glob::PatternError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut exact = Vec::new();
        let mut patterns = Vec::new();
        for entry in entries {
            let entry = entry.as_ref();
            if entry.contains(['*', '?', '[']) {
                patterns.push(glob::Pattern::new(entry)?);
            } else {
                exact.push(entry.to_string());
            }
        }
        exact.sort();
        exact.dedup();
        Ok(Self {
            exact,
            patterns,
            allow_all: false,
        })
    }

    /// An allow-list that accepts every file.
    pub fn all() -> Self {
        Self {
            exact: Vec::new(),
            patterns: Vec::new(),
            allow_all: true,
        }
    }

    pub fn is_enabled(&self, file: &str) -> bool {
        self.allow_all
            || self.exact.binary_search_by(|e| e.as_str().cmp(file)).is_ok()
            || self.patterns.iter().any(|p| p.matches(file))
    }
}

impl Default for EnabledFiles {
    fn default() -> Self {
        Self {
            exact: {
                let mut files: Vec<String> = DEFAULT_ENABLED_FILES.iter().map(|f| f.to_string()).collect();
                files.sort();
                files
            },
            patterns: Vec::new(),
            allow_all: false,
        }
    }
}

//! Request paths that bypass authentication.
//!
//! The set is built once at startup and read-only afterwards. Matching is on
//! the exact request path; no prefixes, no trailing-slash folding.

/// Paths that are public unless `STUDENTHUB_EXEMPT_PATHS` overrides them.
pub const DEFAULT_EXEMPT_PATHS: &[&str] = &[
    "/docs",
    "/redoc",
    "/openapi.json",
    "/api/v1/users/sign-up",
    "/api/v1/users/login",
    "/health",
];

/// Ordered, de-duplicated set of exempt paths.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExemptPaths {
    paths: Vec<String>,
}

impl ExemptPaths {
    pub fn new<I, S>(paths: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut unique: Vec<String> = Vec::new();
        for path in paths {
            let path = path.into();
            if !unique.contains(&path) {
                unique.push(path);
            }
        }
        Self { paths: unique }
    }

    /// Parse a comma-separated list. Blank entries are dropped.
    ///
    /// Returns `None` when nothing usable remains, so callers fall back to
    /// the defaults instead of protecting nothing by accident.
    pub fn parse_list(raw: &str) -> Option<Self> {
        let paths: Vec<&str> = raw
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .collect();

        if paths.is_empty() {
            return None;
        }

        Some(Self::new(paths))
    }

    pub fn is_exempt(&self, path: &str) -> bool {
        self.paths.iter().any(|p| p == path)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.paths.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }
}

impl Default for ExemptPaths {
    fn default() -> Self {
        Self::new(DEFAULT_EXEMPT_PATHS.iter().copied())
    }
}

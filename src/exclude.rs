use regex::Regex;

use crate::config::ConfigError;

/// Decides whether a request path is exempt from authentication.
///
/// The configured patterns are OR-joined into a single alternation and
/// compiled once at construction time; matching is an unanchored search, so
/// a pattern matches anywhere in the path. Shareable across tasks, read-only
/// after construction.
#[derive(Debug)]
pub struct PathExclusion {
    matcher: Option<Regex>,
}

impl PathExclusion {
    /// Compile the exclusion patterns. An empty pattern list excludes
    /// nothing.
    ///
    /// # Errors
    /// * `InvalidExcludePattern` - a pattern is not a valid regex
    pub fn new(patterns: &[String]) -> Result<Self, ConfigError> {
        if patterns.is_empty() {
            return Ok(Self { matcher: None });
        }

        let matcher = Regex::new(&patterns.join("|"))?;
        Ok(Self {
            matcher: Some(matcher),
        })
    }

    /// True iff any configured pattern matches somewhere in `path`.
    pub fn is_excluded(&self, path: &str) -> bool {
        self.matcher.as_ref().map_or(false, |m| m.is_match(path))
    }
}

//! Name filters for selecting which tests run

use crate::definition::TestDefinition;
use crate::error::FilterError;
use regex::Regex;

/// A compiled `--filter` value
#[derive(Debug, Clone, Default)]
pub enum TestFilter {
    /// Empty filter: every test is selected
    #[default]
    All,
    /// Case-sensitive literal substring of the name
    Substring(String),
    /// `/pattern/`: unanchored regular expression search on the name
    Pattern(Regex),
}

impl TestFilter {
    /// Compile filter text.
    ///
    /// Text that starts and ends with `/` is a regular expression body;
    /// any other non-empty text is matched literally. A lone `/` is both
    /// delimiters at once, leaving an empty body that matches every name.
    pub fn compile(text: &str) -> Result<Self, FilterError> {
        if text.is_empty() {
            return Ok(TestFilter::All);
        }

        let body = match text.strip_prefix('/') {
            Some("") => Some(""),
            Some(rest) => rest.strip_suffix('/'),
            None => None,
        };
        match body {
            Some(pattern) => Regex::new(pattern)
                .map(TestFilter::Pattern)
                .map_err(|source| FilterError::InvalidPattern {
                    pattern: pattern.to_string(),
                    source,
                }),
            None => Ok(TestFilter::Substring(text.to_string())),
        }
    }

    pub fn matches_name(&self, name: &str) -> bool {
        match self {
            TestFilter::All => true,
            TestFilter::Substring(needle) => name.contains(needle.as_str()),
            TestFilter::Pattern(regex) => regex.is_match(name),
        }
    }

    pub fn matches(&self, definition: &TestDefinition) -> bool {
        self.matches_name(&definition.name)
    }
}

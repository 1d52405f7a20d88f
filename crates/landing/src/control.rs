//! Control file detection
//!
//! Control files (`.ctl`, `.done`, ...) travel alongside data files to mark
//! a batch as complete. They are never routed, so they are filtered out
//! before any pattern is consulted.

use crate::error::Result;
use regex::Regex;

/// Default control file regex, matched against the bare file name
pub const DEFAULT_CONTROL_PATTERN: &str = r"(?i)\.(ctl|done|ready)$";

#[derive(Debug, Clone)]
pub struct ControlFileFilter {
    regex: Regex,
}

impl ControlFileFilter {
    pub fn new(pattern: &str) -> Result<Self> {
        Ok(Self {
            regex: Regex::new(pattern)?,
        })
    }

    pub fn is_control(&self, file_name: &str) -> bool {
        self.regex.is_match(file_name)
    }

    pub fn as_str(&self) -> &str {
        self.regex.as_str()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::LandingError;

    #[test]
    fn default_pattern_flags_markers() {
        let filter = ControlFileFilter::new(DEFAULT_CONTROL_PATTERN).unwrap();
        assert!(filter.is_control("sales_20140102.ctl"));
        assert!(filter.is_control("sales_20140102.DONE"));
        assert!(filter.is_control("batch.ready"));
        assert!(!filter.is_control("sales_20140102.csv"));
        assert!(!filter.is_control("ctl_20140102.csv"));
    }

    #[test]
    fn custom_pattern() {
        let filter = ControlFileFilter::new(r"^_SUCCESS$").unwrap();
        assert!(filter.is_control("_SUCCESS"));
        assert!(!filter.is_control("data.ctl"));
        assert_eq!(filter.as_str(), r"^_SUCCESS$");
    }

    #[test]
    fn invalid_pattern() {
        assert!(matches!(
            ControlFileFilter::new("(unclosed"),
            Err(LandingError::Regex(_))
        ));
    }
}

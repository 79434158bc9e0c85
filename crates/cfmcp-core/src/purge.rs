//! Cache purge target selection

use crate::error::{Error, Result};
use serde_json::{Value, json};

/// What a purge call removes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PurgeTarget {
    Everything,
    Files(Vec<String>),
    Tags(Vec<String>),
}

impl PurgeTarget {
    /// Pick the purge target from the raw tool parameters
    ///
    /// Precedence: `purge_everything`, then `files`, then `tags`. Lists are
    /// comma-separated; blank entries are dropped, and a list with no
    /// entries left counts as not supplied.
    pub fn select(purge_everything: bool, files: &str, tags: &str) -> Result<Self> {
        if purge_everything {
            return Ok(PurgeTarget::Everything);
        }
        let files = split_list(files);
        if !files.is_empty() {
            return Ok(PurgeTarget::Files(files));
        }
        let tags = split_list(tags);
        if !tags.is_empty() {
            return Ok(PurgeTarget::Tags(tags));
        }
        Err(Error::validation(
            "must specify one of purge_everything=true, files or tags",
        ))
    }

    /// Request body for `POST /zones/{id}/purge_cache`
    pub fn to_body(&self) -> Value {
        match self {
            PurgeTarget::Everything => json!({"purge_everything": true}),
            PurgeTarget::Files(files) => json!({"files": files}),
            PurgeTarget::Tags(tags) => json!({"tags": tags}),
        }
    }
}

fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_everything_wins() {
        let target = PurgeTarget::select(true, "https://a/x", "t1").unwrap();
        assert_eq!(target, PurgeTarget::Everything);
        assert_eq!(target.to_body(), json!({"purge_everything": true}));
    }

    #[test]
    fn test_files_before_tags() {
        let target = PurgeTarget::select(false, " https://a/x , https://a/y ,", "t1").unwrap();
        assert_eq!(
            target,
            PurgeTarget::Files(vec!["https://a/x".into(), "https://a/y".into()])
        );
    }

    #[test]
    fn test_tags_when_no_files() {
        let target = PurgeTarget::select(false, " , ", "t1,t2").unwrap();
        assert_eq!(target.to_body(), json!({"tags": ["t1", "t2"]}));
    }

    #[test]
    fn test_nothing_supplied_is_validation_error() {
        let err = PurgeTarget::select(false, "", "").unwrap_err();
        assert!(matches!(err, Error::Validation(_)));
        assert!(err.to_string().contains("must specify one of"));
    }
}

//! Target group resolution.

use crate::error::{NoticeError, NoticeResult};

/// Resolves the groups an invocation sends to.
///
/// Explicit ids are returned unchanged: order preserved, duplicates kept,
/// no format checks. Without explicit ids the current group is the only
/// target; outside a group that is [`NoticeError::NoTargetGroup`].
pub fn resolve_targets(
    explicit: Vec<String>,
    current_group: Option<&str>,
) -> NoticeResult<Vec<String>> {
    if !explicit.is_empty() {
        return Ok(explicit);
    }
    current_group
        .map(|group| vec![group.to_string()])
        .ok_or(NoticeError::NoTargetGroup)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_defaults_to_current_group() {
        assert_eq!(resolve_targets(vec![], Some("42")).unwrap(), ids(&["42"]));
    }

    #[test]
    fn test_explicit_unchanged() {
        let explicit = ids(&["3", "1", "3", "not-a-number"]);
        assert_eq!(
            resolve_targets(explicit.clone(), Some("42")).unwrap(),
            explicit
        );
        assert_eq!(resolve_targets(ids(&["7"]), None).unwrap(), ids(&["7"]));
    }

    #[test]
    fn test_no_target_outside_group() {
        assert!(matches!(
            resolve_targets(vec![], None),
            Err(NoticeError::NoTargetGroup)
        ));
    }
}

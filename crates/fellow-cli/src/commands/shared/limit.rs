/// Compute effective limit with precedence: local arg -> global flag -> fallback.
#[must_use]
pub fn effective_limit(local: Option<u32>, global: Option<u32>, fallback: u32) -> u32 {
    local.or(global).unwrap_or(fallback)
}

/// Keep at most `limit` leading items.
#[must_use]
pub fn take_limited<T>(mut items: Vec<T>, limit: u32) -> Vec<T> {
    items.truncate(usize::try_from(limit).unwrap_or(usize::MAX));
    items
}

#[cfg(test)]
mod tests {
    use super::{effective_limit, take_limited};

    #[test]
    fn local_takes_precedence() {
        assert_eq!(effective_limit(Some(5), Some(10), 20), 5);
    }

    #[test]
    fn global_used_when_local_missing() {
        assert_eq!(effective_limit(None, Some(10), 20), 10);
    }

    #[test]
    fn fallback_used_when_none_set() {
        assert_eq!(effective_limit(None, None, 20), 20);
    }

    #[test]
    fn take_limited_keeps_leading_items() {
        assert_eq!(take_limited(vec![1, 2, 3], 2), vec![1, 2]);
        assert_eq!(take_limited(vec![1, 2, 3], 10), vec![1, 2, 3]);
        assert!(take_limited(vec![1, 2, 3], 0).is_empty());
    }
}

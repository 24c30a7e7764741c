use thiserror::Error;

/// Configuration errors raised by catalog lookups and navigation commands.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NavigationError {
    #[error("invalid body index {index} (catalog has {count} bodies)")]
    InvalidBodyIndex { index: usize, count: usize },
    #[error("no transition tuning for body index {0}")]
    MissingTuning(usize),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_index() {
        let err = NavigationError::InvalidBodyIndex { index: 12, count: 9 };
        assert_eq!(err.to_string(), "invalid body index 12 (catalog has 9 bodies)");
        assert_eq!(
            NavigationError::MissingTuning(3).to_string(),
            "no transition tuning for body index 3"
        );
    }
}

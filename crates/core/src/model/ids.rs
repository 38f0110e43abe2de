use serde::{Deserialize, Serialize};
use std::fmt;

/// Ordinal level of a lesson within the tutorial.
///
/// Levels start at 0 for the introductory lesson and grow by one per topic.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct LessonLevel(u32);

impl LessonLevel {
    /// Creates a new `LessonLevel`
    #[must_use]
    pub fn new(level: u32) -> Self {
        Self(level)
    }

    /// Returns the underlying u32 value
    #[must_use]
    pub fn value(&self) -> u32 {
        self.0
    }
}

impl fmt::Debug for LessonLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "LessonLevel({})", self.0)
    }
}

impl fmt::Display for LessonLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_display() {
        assert_eq!(LessonLevel::new(3).to_string(), "3");
    }

    #[test]
    fn levels_order_by_value() {
        assert!(LessonLevel::new(0) < LessonLevel::new(1));
    }
}

use std::time::Duration;

use crate::model::lesson::{LessonInfo, LessonStatus};

/// Point-in-time view of a single lesson, useful for reports.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LessonProgress {
    pub info: LessonInfo,
    pub status: LessonStatus,
    /// Time since the lesson started while in progress; time to completion once completed.
    pub elapsed: Duration,
}

impl LessonProgress {
    #[must_use]
    pub fn is_completed(&self) -> bool {
        self.status.is_completed()
    }

    /// Elapsed time truncated to whole seconds.
    #[must_use]
    pub fn elapsed_secs(&self) -> u64 {
        self.elapsed.as_secs()
    }
}

/// Aggregated view of tutorial progress across all registered lessons.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TutorialProgress {
    pub lessons: Vec<LessonProgress>,
    pub current: usize,
}

impl TutorialProgress {
    #[must_use]
    pub fn total(&self) -> usize {
        self.lessons.len()
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.current >= self.total()
    }

    /// Percentage of lessons passed, `current / total * 100`.
    ///
    /// An empty tutorial counts as fully complete.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn percent(&self) -> f64 {
        if self.lessons.is_empty() {
            return 100.0;
        }
        self.current.min(self.total()) as f64 / self.total() as f64 * 100.0
    }

    /// The lesson the sequencer will run next, if any.
    #[must_use]
    pub fn current_lesson(&self) -> Option<&LessonProgress> {
        self.lessons.get(self.current)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::LessonLevel;

    fn entry(name: &str, status: LessonStatus) -> LessonProgress {
        LessonProgress {
            info: LessonInfo::new(name, "desc", LessonLevel::new(0)).unwrap(),
            status,
            elapsed: Duration::from_millis(2_500),
        }
    }

    #[test]
    fn percent_tracks_current_index() {
        let mut progress = TutorialProgress {
            lessons: vec![
                entry("A", LessonStatus::InProgress),
                entry("B", LessonStatus::InProgress),
            ],
            current: 0,
        };
        assert_eq!(format!("{:.1}", progress.percent()), "0.0");
        assert_eq!(progress.current_lesson().unwrap().info.name(), "A");

        progress.current = 1;
        assert_eq!(format!("{:.1}", progress.percent()), "50.0");
        assert!(!progress.is_complete());

        progress.current = 2;
        assert!(progress.is_complete());
        assert!(progress.current_lesson().is_none());
    }

    #[test]
    fn empty_tutorial_is_complete() {
        let progress = TutorialProgress {
            lessons: Vec::new(),
            current: 0,
        };
        assert!(progress.is_complete());
        assert_eq!(format!("{:.1}", progress.percent()), "100.0");
    }

    #[test]
    fn elapsed_secs_truncates() {
        assert_eq!(entry("A", LessonStatus::Completed).elapsed_secs(), 2);
    }
}

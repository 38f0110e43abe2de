use std::fmt::Write as _;

use quest_core::model::{LessonProgress, TutorialProgress};

/// Render one lesson's status block.
#[must_use]
pub fn render_lesson(progress: &LessonProgress) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "📚 Lesson: {} (Level {})",
        progress.info.name(),
        progress.info.level()
    );
    let _ = writeln!(out, "   {}", progress.info.description());
    let _ = writeln!(out, "   Status: {}", progress.status);
    if !progress.is_completed() {
        let _ = writeln!(out, "   Time spent: {} seconds", progress.elapsed_secs());
    }
    out
}

/// Render every lesson, marking the current one, followed by the overall percentage.
#[must_use]
pub fn render_tutorial(progress: &TutorialProgress) -> String {
    let mut out = String::from("🎮 Tutorial Progress:\n==================\n\n");
    for (index, lesson) in progress.lessons.iter().enumerate() {
        out.push_str(if index == progress.current { "➤ " } else { "  " });
        out.push_str(&render_lesson(lesson));
        out.push('\n');
    }
    let _ = writeln!(
        out,
        "Overall Progress: {:.1}% ({}/{})",
        progress.percent(),
        progress.current.min(progress.total()),
        progress.total()
    );
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use quest_core::model::{LessonInfo, LessonLevel, LessonStatus};
    use std::time::Duration;

    fn entry(name: &str, status: LessonStatus) -> LessonProgress {
        LessonProgress {
            info: LessonInfo::new(name, "About things", LessonLevel::new(2)).unwrap(),
            status,
            elapsed: Duration::from_secs(7),
        }
    }

    #[test]
    fn in_progress_lesson_shows_time_spent() {
        let out = render_lesson(&entry("Traits", LessonStatus::InProgress));
        assert!(out.contains("📚 Lesson: Traits (Level 2)"));
        assert!(out.contains("   About things"));
        assert!(out.contains("Status: 🔄 In Progress"));
        assert!(out.contains("Time spent: 7 seconds"));
    }

    #[test]
    fn completed_lesson_hides_time_spent() {
        let out = render_lesson(&entry("Traits", LessonStatus::Completed));
        assert!(out.contains("Status: ✅ Completed"));
        assert!(!out.contains("Time spent"));
    }

    #[test]
    fn tutorial_marks_current_lesson() {
        let progress = TutorialProgress {
            lessons: vec![
                entry("One", LessonStatus::Completed),
                entry("Two", LessonStatus::InProgress),
            ],
            current: 1,
        };
        let out = render_tutorial(&progress);
        assert!(out.contains("  📚 Lesson: One"));
        assert!(out.contains("➤ 📚 Lesson: Two"));
        assert!(out.contains("Overall Progress: 50.0% (1/2)"));
    }
}

//! Derived view model: filtering, sorting, and multi-selection.
//!
//! `visible_students` is a pure function of the roster, the course list, the
//! sort configuration, and the search query, so the UI can recompute it every
//! frame without side effects.

use std::collections::{HashMap, HashSet};

use crate::models::{Course, SortConfig, SortDirection, SortKey, Student};

/// Display name for a course id missing from the loaded catalog.
pub const UNKNOWN_COURSE: &str = "Unknown Course";

/// Build the course id -> name lookup.
pub fn course_names(courses: &[Course]) -> HashMap<i32, String> {
    courses.iter().map(|c| (c.id, c.name.clone())).collect()
}

/// Resolve a course name for display, substituting [`UNKNOWN_COURSE`].
pub fn resolved_course_name<'a>(names: &'a HashMap<i32, String>, course_id: i32) -> &'a str {
    names.get(&course_id).map(String::as_str).unwrap_or(UNKNOWN_COURSE)
}

/// The filtered, sorted list the UI renders.
///
/// A student matches the trimmed, case-insensitive query when it is a
/// substring of the name, the email, or the resolved course name (an unknown
/// course contributes an empty string). The sort is stable, compares
/// lowercased keys, and an unknown course sorts with an empty-string key.
pub fn visible_students(
    students: &[Student],
    courses: &[Course],
    sort: SortConfig,
    query: &str,
) -> Vec<Student> {
    let names = course_names(courses);
    let query = query.trim().to_lowercase();

    let course_key = |student: &Student| -> String {
        names
            .get(&student.course_id)
            .map(|name| name.to_lowercase())
            .unwrap_or_default()
    };

    let mut visible: Vec<Student> = students
        .iter()
        .filter(|s| {
            let course = names
                .get(&s.course_id)
                .map(|name| name.to_lowercase())
                .unwrap_or_default();
            s.name.to_lowercase().contains(&query)
                || s.email.to_lowercase().contains(&query)
                || course.contains(&query)
        })
        .cloned()
        .collect();

    visible.sort_by(|a, b| {
        let (key_a, key_b) = match sort.key {
            SortKey::Name => (a.name.to_lowercase(), b.name.to_lowercase()),
            SortKey::Course => (course_key(a), course_key(b)),
        };
        match sort.direction {
            SortDirection::Ascending => key_a.cmp(&key_b),
            SortDirection::Descending => key_b.cmp(&key_a),
        }
    });

    visible
}

/// Multi-selection over student ids, independent of the filtered view.
#[derive(Debug, Clone, Default)]
pub struct Selection {
    ids: HashSet<String>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn contains(&self, student_id: &str) -> bool {
        self.ids.contains(student_id)
    }

    /// Snapshot of the selected ids.
    pub fn ids(&self) -> &HashSet<String> {
        &self.ids
    }

    pub fn clear(&mut self) {
        self.ids.clear();
    }

    /// Add the id if absent, remove it if present.
    pub fn toggle(&mut self, student_id: &str) {
        if !self.ids.remove(student_id) {
            self.ids.insert(student_id.to_string());
        }
    }

    /// Select-all toggle over the currently visible students: clears when the
    /// selection size equals the visible count, otherwise selects every
    /// visible id. The size comparison (not set equality) is intentional.
    pub fn toggle_all(&mut self, visible: &[Student]) {
        if self.ids.len() == visible.len() {
            self.ids.clear();
        } else {
            self.ids = visible.iter().map(|s| s.student_id.clone()).collect();
        }
    }

    /// Whether every visible student is selected (used for the header
    /// checkbox; false for an empty view).
    pub fn all_visible_selected(&self, visible: &[Student]) -> bool {
        !self.ids.is_empty() && self.ids.len() == visible.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn student(id: &str, name: &str, email: &str, course_id: i32) -> Student {
        Student {
            student_id: id.to_string(),
            name: name.to_string(),
            email: email.to_string(),
            course_id,
            image_url: String::new(),
        }
    }

    fn courses() -> Vec<Course> {
        vec![
            Course {
                id: 1,
                name: "Rust Basics".to_string(),
            },
            Course {
                id: 2,
                name: "Advanced Baking".to_string(),
            },
        ]
    }

    fn roster() -> Vec<Student> {
        vec![
            student("a", "Bob", "bob@example.com", 1),
            student("b", "alice", "alice@example.com", 2),
            student("c", "Carl", "carl@other.org", 99),
        ]
    }

    #[test]
    fn test_resolved_course_name_substitutes_unknown() {
        let names = course_names(&courses());
        assert_eq!(resolved_course_name(&names, 1), "Rust Basics");
        assert_eq!(resolved_course_name(&names, 99), UNKNOWN_COURSE);
    }

    #[test]
    fn test_filter_matches_name_case_insensitive() {
        let visible = visible_students(&roster(), &courses(), SortConfig::default(), "ALI");
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].name, "alice");
    }

    #[test]
    fn test_filter_matches_email() {
        let visible = visible_students(&roster(), &courses(), SortConfig::default(), "other.org");
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].name, "Carl");
    }

    #[test]
    fn test_filter_matches_resolved_course_name() {
        let visible = visible_students(&roster(), &courses(), SortConfig::default(), "baking");
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].name, "alice");
    }

    #[test]
    fn test_filter_trims_query() {
        let visible = visible_students(&roster(), &courses(), SortConfig::default(), "  bob  ");
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].name, "Bob");
    }

    #[test]
    fn test_filter_no_match_yields_empty() {
        let visible = visible_students(&roster(), &courses(), SortConfig::default(), "zzz");
        assert!(visible.is_empty());
    }

    #[test]
    fn test_unknown_course_never_matches_text() {
        // The unresolved course contributes an empty string, not the display
        // placeholder, to the match target.
        let visible = visible_students(&roster(), &courses(), SortConfig::default(), "unknown");
        assert!(visible.is_empty());
    }

    #[test]
    fn test_sort_by_name_ignores_case() {
        let visible = visible_students(&roster(), &courses(), SortConfig::default(), "");
        let names: Vec<&str> = visible.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, ["alice", "Bob", "Carl"]);
    }

    #[test]
    fn test_sort_descending_flips_order() {
        let sort = SortConfig {
            key: SortKey::Name,
            direction: SortDirection::Descending,
        };
        let visible = visible_students(&roster(), &courses(), sort, "");
        let names: Vec<&str> = visible.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, ["Carl", "Bob", "alice"]);
    }

    #[test]
    fn test_sort_by_course_puts_unknown_first_ascending() {
        let sort = SortConfig {
            key: SortKey::Course,
            direction: SortDirection::Ascending,
        };
        let visible = visible_students(&roster(), &courses(), sort, "");
        let names: Vec<&str> = visible.iter().map(|s| s.name.as_str()).collect();
        // Carl's course id resolves to nothing, so he sorts on the empty key.
        assert_eq!(names, ["Carl", "alice", "Bob"]);
    }

    #[test]
    fn test_selection_toggle_adds_then_removes() {
        let mut selection = Selection::new();
        selection.toggle("a");
        assert!(selection.contains("a"));
        selection.toggle("a");
        assert!(selection.is_empty());
    }

    #[test]
    fn test_select_all_round_trip_clears() {
        let visible = visible_students(&roster(), &courses(), SortConfig::default(), "");
        let mut selection = Selection::new();

        selection.toggle_all(&visible);
        assert_eq!(selection.len(), visible.len());
        assert!(selection.all_visible_selected(&visible));

        selection.toggle_all(&visible);
        assert!(selection.is_empty());
    }

    #[test]
    fn test_select_all_extends_partial_selection() {
        let visible = visible_students(&roster(), &courses(), SortConfig::default(), "");
        let mut selection = Selection::new();

        selection.toggle("a");
        selection.toggle_all(&visible);
        assert_eq!(selection.len(), 3);
    }

    #[test]
    fn test_select_all_compares_sizes_not_sets() {
        // Documented behavior: a stale selection whose size matches the
        // visible count is treated as "fully selected" and cleared.
        let visible = vec![roster().remove(0)];
        let mut selection = Selection::new();
        selection.toggle("stale-id");

        selection.toggle_all(&visible);
        assert!(selection.is_empty());
    }

    #[test]
    fn test_selection_persists_across_filter_changes() {
        let mut selection = Selection::new();
        selection.toggle("b");

        // Narrow the view so "b" is no longer visible; the selection keeps it.
        let visible = visible_students(&roster(), &courses(), SortConfig::default(), "bob");
        assert!(!visible.iter().any(|s| s.student_id == "b"));
        assert!(selection.contains("b"));
    }
}

//! Course data source.
//!
//! Courses come either from the built-in catalog (served after a simulated
//! network delay, the default) or from a configured HTTP endpoint returning
//! a JSON array of `{id, name}` objects.

use std::time::Duration;

use crate::config::AppConfig;
use crate::error::{AppError, Result};
use crate::models::Course;

/// Simulated network delay for the built-in catalog.
const MOCK_FETCH_DELAY: Duration = Duration::from_secs(1);

/// Course load state machine: `Loading -> Ready` or `Loading -> Error`,
/// terminal until the application restarts (no retry).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum CourseLoad {
    #[default]
    Loading,
    Ready,
    Error(String),
}

impl CourseLoad {
    pub fn is_loading(&self) -> bool {
        matches!(self, CourseLoad::Loading)
    }

    /// Leave `Loading` with the fetch outcome: `Ready` plus the catalog on
    /// success, `Error` with the user-facing message and an empty catalog on
    /// failure.
    pub fn complete(result: std::result::Result<Vec<Course>, String>) -> (Self, Vec<Course>) {
        match result {
            Ok(courses) => (CourseLoad::Ready, courses),
            Err(message) => (CourseLoad::Error(message), Vec::new()),
        }
    }
}

/// HTTP client for a configured course endpoint.
pub struct CourseClient {
    client: reqwest::Client,
    url: String,
}

impl CourseClient {
    pub fn new(url: &str) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(10))
            .build()?;

        Ok(Self {
            client,
            url: url.to_string(),
        })
    }

    /// GET the endpoint and decode the course array.
    pub async fn fetch_courses(&self) -> Result<Vec<Course>> {
        let response = self.client.get(&self.url).send().await?;

        if !response.status().is_success() {
            return Err(AppError::course_fetch(format!(
                "Endpoint returned {}",
                response.status()
            )));
        }

        Ok(response.json().await?)
    }
}

/// Built-in course catalog.
pub fn builtin_catalog() -> Vec<Course> {
    [
        (1, "HTML Basics"),
        (2, "CSS Mastery"),
        (3, "JavaScript Pro"),
        (4, "React In Depth"),
        (5, "Advanced TypeScript"),
        (6, "UI/UX Design Fundamentals"),
    ]
    .into_iter()
    .map(|(id, name)| Course {
        id,
        name: name.to_string(),
    })
    .collect()
}

/// Fetch the course list per config: built-in catalog when no endpoint is
/// configured, the HTTP endpoint otherwise.
pub async fn load_courses(config: &AppConfig) -> Result<Vec<Course>> {
    if config.api.courses_url.is_empty() {
        tracing::info!("Fetching courses from the built-in catalog");
        tokio::time::sleep(MOCK_FETCH_DELAY).await;
        return Ok(builtin_catalog());
    }

    tracing::info!("Fetching courses from {}", config.api.courses_url);
    let client = CourseClient::new(&config.api.courses_url)?;
    client.fetch_courses().await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_catalog_ids_are_unique() {
        let catalog = builtin_catalog();
        assert_eq!(catalog.len(), 6);

        let mut ids: Vec<i32> = catalog.iter().map(|c| c.id).collect();
        ids.dedup();
        assert_eq!(ids.len(), 6);
    }

    #[test]
    fn test_course_array_decodes() {
        let json = r#"[{"id":1,"name":"HTML Basics"},{"id":2,"name":"CSS Mastery"}]"#;
        let courses: Vec<Course> = serde_json::from_str(json).unwrap();

        assert_eq!(courses.len(), 2);
        assert_eq!(courses[0].id, 1);
        assert_eq!(courses[1].name, "CSS Mastery");
    }

    #[tokio::test]
    async fn test_fetch_unreachable_endpoint_fails() {
        // Nothing listens on this port, the connection is refused.
        let client = CourseClient::new("http://127.0.0.1:9/courses").unwrap();
        assert!(client.fetch_courses().await.is_err());
    }

    #[test]
    fn test_course_load_defaults_to_loading() {
        assert!(CourseLoad::default().is_loading());
    }

    #[test]
    fn test_successful_fetch_completes_to_ready() {
        let (state, courses) = CourseLoad::complete(Ok(builtin_catalog()));
        assert_eq!(state, CourseLoad::Ready);
        assert!(!state.is_loading());
        assert_eq!(courses.len(), 6);
    }

    #[test]
    fn test_failed_fetch_completes_to_error_with_no_catalog() {
        let message = "Failed to fetch courses. Please try again later.";
        let (state, courses) = CourseLoad::complete(Err(message.to_string()));

        assert_eq!(state, CourseLoad::Error(message.to_string()));
        assert!(!state.is_loading());
        assert!(courses.is_empty());
    }
}

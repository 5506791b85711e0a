//! Student record and create DTO.

use serde::{Deserialize, Serialize};

/// Placeholder portrait used when no image URL is provided.
pub const DEFAULT_IMAGE_URL: &str =
    "https://cdn.pixabay.com/photo/2015/10/05/22/37/blank-profile-picture-973460_960_720.png";

/// A student record.
///
/// Field names are renamed on the wire so the persisted JSON layout stays
/// `{"studentId", "name", "email", "courseId", "imageUrl"}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Student {
    /// UUID string, assigned at creation and never reassigned.
    pub student_id: String,
    pub name: String,
    pub email: String,
    /// May reference a course missing from the loaded catalog; tolerated.
    pub course_id: i32,
    pub image_url: String,
}

/// DTO for creating a student (the store assigns the id).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewStudent {
    pub name: String,
    pub email: String,
    pub course_id: i32,
    pub image_url: String,
}

/// Sample roster used when no persisted collection exists.
pub fn seed_students() -> Vec<Student> {
    vec![
        Student {
            student_id: "1".to_string(),
            name: "kiran Patil".to_string(),
            email: "kiranpatil452004@gmail.com".to_string(),
            course_id: 4,
            image_url: "https://picsum.photos/seed/alice/200".to_string(),
        },
        Student {
            student_id: "2".to_string(),
            name: "Bhumika Salunkhe".to_string(),
            email: "bhumika@gmail.com.com".to_string(),
            course_id: 2,
            image_url: "https://picsum.photos/seed/bob/200".to_string(),
        },
        Student {
            student_id: "3".to_string(),
            name: "madhavi Deore".to_string(),
            email: "madhavi@gmail.com".to_string(),
            course_id: 3,
            image_url: "https://picsum.photos/seed/charlie/200".to_string(),
        },
    ]
}

/// Check that an email has a local part, a domain, and a TLD of at least
/// two letters. Mirrors the form-level check, not full RFC parsing.
pub fn is_valid_email(email: &str) -> bool {
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    if !local
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || "._%+-".contains(c))
    {
        return false;
    }

    let Some((host, tld)) = domain.rsplit_once('.') else {
        return false;
    };
    !host.is_empty()
        && host.chars().all(|c| c.is_ascii_alphanumeric() || "._-".contains(c))
        && tld.len() >= 2
        && tld.chars().all(|c| c.is_ascii_alphabetic())
}

//! User-submitted forms and their validation.
//!
//! Forms collect every problem before reporting, so a rejected submission
//! lists all of its errors at once and nothing is written.

use chrono::{DateTime, NaiveDateTime, Utc};
use uuid::Uuid;

pub const TITLE_MAX_LENGTH: usize = 256;
pub const USERNAME_MAX_LENGTH: usize = 150;
pub const NAME_MAX_LENGTH: usize = 150;

/// Datetime layouts accepted besides RFC 3339 (datetime-local widgets).
const LOCAL_DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
];

/// Raw post submission. The author always comes from the session.
#[derive(Debug, Clone, Default)]
pub struct PostForm {
    pub title: String,
    pub text: String,
    pub pub_date: String,
    pub category_id: Option<Uuid>,
    pub location_id: Option<Uuid>,
    pub image: Option<String>,
    pub is_published: Option<bool>,
}

/// A post submission that passed field validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostDraft {
    pub title: String,
    pub text: String,
    pub pub_date: DateTime<Utc>,
    pub category_id: Option<Uuid>,
    pub location_id: Option<Uuid>,
    pub image: Option<String>,
    pub is_published: bool,
}

impl PostForm {
    pub fn clean(self) -> Result<PostDraft, Vec<String>> {
        let mut errors = Vec::new();

        let title = self.title.trim().to_string();
        if title.is_empty() {
            errors.push("title: this field is required".to_string());
        } else if title.chars().count() > TITLE_MAX_LENGTH {
            errors.push(format!(
                "title: ensure this value has at most {TITLE_MAX_LENGTH} characters"
            ));
        }

        if self.text.trim().is_empty() {
            errors.push("text: this field is required".to_string());
        }

        let pub_date = if self.pub_date.trim().is_empty() {
            errors.push("pub_date: this field is required".to_string());
            None
        } else {
            let parsed = parse_datetime(&self.pub_date);
            if parsed.is_none() {
                errors.push("pub_date: enter a valid date/time".to_string());
            }
            parsed
        };

        let image = self.image.filter(|path| !path.trim().is_empty());

        match pub_date {
            Some(pub_date) if errors.is_empty() => Ok(PostDraft {
                title,
                text: self.text,
                pub_date,
                category_id: self.category_id,
                location_id: self.location_id,
                image,
                is_published: self.is_published.unwrap_or(true),
            }),
            _ => Err(errors),
        }
    }
}

/// Parse RFC 3339, or a zone-less local datetime taken as UTC.
pub fn parse_datetime(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    LOCAL_DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .map(|naive| naive.and_utc())
}

/// Comment submission.
#[derive(Debug, Clone, Default)]
pub struct CommentForm {
    pub text: String,
}

impl CommentForm {
    pub fn clean(self) -> Result<String, Vec<String>> {
        if self.text.trim().is_empty() {
            Err(vec!["text: this field is required".to_string()])
        } else {
            Ok(self.text)
        }
    }
}

/// Profile edit submission.
#[derive(Debug, Clone, Default)]
pub struct UserForm {
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
}

impl UserForm {
    pub fn clean(self) -> Result<Self, Vec<String>> {
        let mut errors = Vec::new();
        let username = self.username.trim().to_string();
        if let Err(message) = validate_username(&username) {
            errors.push(message);
        }

        let email = self.email.trim().to_string();
        if !email.is_empty() && !is_plausible_email(&email) {
            errors.push("email: enter a valid email address".to_string());
        }

        for (field, value) in [("first_name", &self.first_name), ("last_name", &self.last_name)] {
            if value.chars().count() > NAME_MAX_LENGTH {
                errors.push(format!(
                    "{field}: ensure this value has at most {NAME_MAX_LENGTH} characters"
                ));
            }
        }

        if errors.is_empty() {
            Ok(Self {
                username,
                first_name: self.first_name.trim().to_string(),
                last_name: self.last_name.trim().to_string(),
                email,
            })
        } else {
            Err(errors)
        }
    }
}

/// Usernames: 1-150 of letters, digits and `@ . + - _`.
pub fn validate_username(username: &str) -> Result<(), String> {
    if username.is_empty() {
        return Err("username: this field is required".to_string());
    }
    if username.chars().count() > USERNAME_MAX_LENGTH {
        return Err(format!(
            "username: ensure this value has at most {USERNAME_MAX_LENGTH} characters"
        ));
    }
    if !username
        .chars()
        .all(|c| c.is_alphanumeric() || "@.+-_".contains(c))
    {
        return Err(
            "username: may contain only letters, numbers, and @/./+/-/_ characters".to_string(),
        );
    }
    Ok(())
}

pub fn is_plausible_email(email: &str) -> bool {
    match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty() && !domain.is_empty() && !domain.contains('@') && domain.contains('.')
        }
        None => false,
    }
}

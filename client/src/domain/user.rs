//! User data model and credential validation patterns.

use std::sync::OnceLock;

use chrono::{DateTime, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Privilege level of a club member.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Site administrator.
    Admin,
    /// Ordinary member.
    User,
}

/// Kind of member, used to pick the username validation rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserType {
    /// Pupil; usernames follow the `<year>届<class>班<name>` convention.
    Student,
    /// Staff; usernames are plain Chinese-character names.
    Teacher,
}

/// Club member as exposed to callers.
///
/// ## Invariants
/// - Never carries a password; credential material lives only in
///   [`StoredUser`] roster records.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Stable identifier assigned at registration.
    pub id: String,
    /// Display name.
    pub username: String,
    /// 11-digit CN mobile number, unique per member.
    pub phone: String,
    /// Privilege level.
    pub role: Role,
    /// Member kind; absent for records that predate the distinction.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_type: Option<UserType>,
    /// Registration timestamp.
    pub created_at: DateTime<Utc>,
}

/// Roster record as persisted in the local mirror.
///
/// Identical to [`User`] plus the plaintext password used for the offline
/// credential check. Converting to a [`User`] strips the password.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredUser {
    /// Public portion of the record.
    #[serde(flatten)]
    pub user: User,
    /// Plaintext credential; compared with plain equality.
    pub password: String,
}

impl StoredUser {
    /// Whether the record matches the supplied credentials exactly.
    pub fn matches(&self, phone: &str, password: &str) -> bool {
        self.user.phone == phone && self.password == password
    }

    /// Strip the password, yielding the public user.
    pub fn into_user(self) -> User {
        self.user
    }
}

static PHONE_RE: OnceLock<Regex> = OnceLock::new();
static STUDENT_NAME_RE: OnceLock<Regex> = OnceLock::new();
static TEACHER_NAME_RE: OnceLock<Regex> = OnceLock::new();

fn phone_regex() -> &'static Regex {
    PHONE_RE.get_or_init(|| {
        Regex::new(r"^1[3-9]\d{9}$")
            .unwrap_or_else(|error| panic!("phone regex failed to compile: {error}"))
    })
}

fn student_name_regex() -> &'static Regex {
    STUDENT_NAME_RE.get_or_init(|| {
        // Graduation year, class number, then a Chinese-character name,
        // e.g. 2025届1班张三. Only 202x years are accepted.
        Regex::new(r"^202\d届\d+班[\u{4e00}-\u{9fa5}]+$")
            .unwrap_or_else(|error| panic!("student name regex failed to compile: {error}"))
    })
}

fn teacher_name_regex() -> &'static Regex {
    TEACHER_NAME_RE.get_or_init(|| {
        Regex::new(r"^[\u{4e00}-\u{9fa5}]+$")
            .unwrap_or_else(|error| panic!("teacher name regex failed to compile: {error}"))
    })
}

/// Whether the input is an 11-digit CN mobile number.
pub fn is_valid_phone(phone: &str) -> bool {
    phone_regex().is_match(phone)
}

/// Whether the input follows the student username convention.
pub fn is_valid_student_name(username: &str) -> bool {
    student_name_regex().is_match(username)
}

/// Whether the input is a pure Chinese-character teacher name.
pub fn is_valid_teacher_name(username: &str) -> bool {
    teacher_name_regex().is_match(username)
}

#[cfg(test)]
mod tests {
    //! Regression coverage for serde contracts and validation patterns.

    use super::*;
    use rstest::rstest;
    use serde_json::json;

    fn sample_user() -> User {
        User {
            id: "u-1".to_owned(),
            username: "2025届1班张三".to_owned(),
            phone: "13800138001".to_owned(),
            role: Role::User,
            user_type: Some(UserType::Student),
            created_at: "2026-03-01T09:00:00Z".parse().expect("fixed timestamp"),
        }
    }

    #[test]
    fn user_serialises_with_camel_case_wire_names() {
        let encoded = serde_json::to_value(sample_user()).expect("user encodes");
        assert_eq!(encoded["userType"], json!("student"));
        assert_eq!(encoded["role"], json!("user"));
        assert!(
            encoded.get("password").is_none(),
            "public user must never carry a password"
        );
    }

    #[test]
    fn stored_user_flattens_public_fields_beside_the_password() {
        let record = StoredUser {
            user: sample_user(),
            password: "pw".to_owned(),
        };
        let encoded = serde_json::to_value(&record).expect("record encodes");
        assert_eq!(encoded["phone"], json!("13800138001"));
        assert_eq!(encoded["password"], json!("pw"));

        let decoded: StoredUser = serde_json::from_value(encoded).expect("record decodes");
        assert_eq!(decoded, record);
    }

    #[test]
    fn into_user_strips_the_password() {
        let record = StoredUser {
            user: sample_user(),
            password: "pw".to_owned(),
        };
        assert_eq!(record.clone().into_user(), record.user);
    }

    #[rstest]
    #[case::valid_mobile("13800138000", true)]
    #[case::valid_prefix_19("19912345678", true)]
    #[case::too_short("1380013800", false)]
    #[case::too_long("138001380001", false)]
    #[case::bad_second_digit("12800138000", false)]
    #[case::letters("1380013800a", false)]
    fn phone_pattern_accepts_only_cn_mobiles(#[case] phone: &str, #[case] expected: bool) {
        assert_eq!(is_valid_phone(phone), expected, "phone: {phone}");
    }

    #[rstest]
    #[case::canonical("2025届1班张三", true)]
    #[case::double_digit_class("2026届12班李小明", true)]
    #[case::missing_markers("张三", false)]
    #[case::wrong_decade("2019届1班张三", false)]
    #[case::latin_name("2025届1班tom", false)]
    fn student_pattern_requires_year_class_and_chinese_name(
        #[case] username: &str,
        #[case] expected: bool,
    ) {
        assert_eq!(is_valid_student_name(username), expected, "name: {username}");
    }

    #[rstest]
    #[case::chinese_name("王老师", true)]
    #[case::latin("Smith", false)]
    #[case::mixed("王smith", false)]
    #[case::empty("", false)]
    fn teacher_pattern_requires_chinese_characters(#[case] username: &str, #[case] expected: bool) {
        assert_eq!(is_valid_teacher_name(username), expected, "name: {username}");
    }
}

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Storage-assigned identifier. Positive, per entity type.
pub type Id = i64;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    #[default]
    Member,
    Admin,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Member => "member",
            Role::Admin => "admin",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "member" => Ok(Role::Member),
            "admin" => Ok(Role::Admin),
            other => Err(format!(
                "invalid role '{}', expected 'member' | 'admin'",
                other
            )),
        }
    }
}

/// Kind of spiritual content. Serialized as the lowercase tag
/// (`biblestudy` for [`ContentType::BibleStudy`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentType {
    Sermon,
    BibleStudy,
    Devotional,
    Story,
    Worship,
    Podcast,
}

impl ContentType {
    pub const ALL: [ContentType; 6] = [
        ContentType::Sermon,
        ContentType::BibleStudy,
        ContentType::Devotional,
        ContentType::Story,
        ContentType::Worship,
        ContentType::Podcast,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ContentType::Sermon => "sermon",
            ContentType::BibleStudy => "biblestudy",
            ContentType::Devotional => "devotional",
            ContentType::Story => "story",
            ContentType::Worship => "worship",
            ContentType::Podcast => "podcast",
        }
    }
}

impl fmt::Display for ContentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ContentType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ContentType::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| {
                let expected = ContentType::ALL
                    .iter()
                    .map(|k| format!("'{}'", k))
                    .collect::<Vec<_>>()
                    .join(" | ");
                format!("invalid content type '{}', expected {}", s, expected)
            })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: Id,
    pub username: String,
    /// Opaque credential (a bcrypt hash when created through the API).
    #[serde(skip_serializing, default)]
    pub password: String,
    pub display_name: String,
    pub church: Option<String>,
    pub level: i64,
    /// Percent towards the next level, 0 to 100.
    pub level_progress: i64,
    pub role: Role,
    pub created_at: DateTime<Utc>,
}

impl User {
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }

    pub fn with_level_progress(&self, level_progress: i64) -> User {
        User {
            id: self.id,
            username: self.username.clone(),
            password: self.password.clone(),
            display_name: self.display_name.clone(),
            church: self.church.clone(),
            level: self.level,
            level_progress,
            role: self.role,
            created_at: self.created_at,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Content {
    pub id: Id,
    pub title: String,
    pub description: String,
    #[serde(rename = "type")]
    pub kind: ContentType,
    /// Minutes.
    pub duration: Option<i64>,
    pub parts: i64,
    pub thumbnail_url: Option<String>,
    pub content: String,
    pub author_id: Id,
    pub tags: Option<Vec<String>>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PrayerRequest {
    pub id: Id,
    pub user_id: Id,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub prayer_count: i64,
    pub comment_count: i64,
}

impl PrayerRequest {
    pub fn with_prayer_count(&self, prayer_count: i64) -> PrayerRequest {
        PrayerRequest {
            id: self.id,
            user_id: self.user_id,
            content: self.content.clone(),
            created_at: self.created_at,
            prayer_count,
            comment_count: self.comment_count,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Discussion {
    pub id: Id,
    pub title: String,
    /// Free text; the UI colours the well-known categories.
    pub category: String,
    pub user_id: Id,
    pub created_at: DateTime<Utc>,
    pub reply_count: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub id: Id,
    pub title: String,
    pub description: String,
    pub date: DateTime<Utc>,
    pub start_time: String,
    pub end_time: String,
    pub location: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Achievement {
    pub id: Id,
    pub name: String,
    pub description: String,
    /// Icon identifier, e.g. `book` or `volunteer_activism`.
    pub icon: String,
    pub criteria: String,
}

/// Join row: its existence means the user unlocked the achievement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserAchievement {
    pub id: Id,
    pub user_id: Id,
    pub achievement_id: Id,
    pub date_earned: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Church {
    pub id: Id,
    pub name: String,
    pub description: String,
    pub location: String,
    pub logo_url: Option<String>,
    pub website_url: Option<String>,
    pub denomination: Option<String>,
    pub number_of_campuses: Option<i64>,
    pub lead_pastor_name: String,
    pub lead_pastor_bio: Option<String>,
    pub lead_pastor_image_url: Option<String>,
    pub streaming_url: Option<String>,
    pub streaming_days: Option<Vec<String>>,
    pub streaming_times: Option<Vec<String>>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Campus {
    pub id: Id,
    pub church_id: Id,
    pub name: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub zip_code: String,
    pub service_schedule: Option<Vec<String>>,
}

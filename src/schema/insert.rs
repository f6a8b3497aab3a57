//! Insertable shapes: the fields a caller may supply when creating a record.
//!
//! Each `from_payload` is the allowlist for its entity. Server-owned fields
//! (ids, timestamps, counters, levels) are not read here, so a payload that
//! carries them is rejected as unrecognized. Each `into_record` is the one
//! place where those server-owned defaults are filled in.

use chrono::{DateTime, NaiveDate, Utc};
use serde_json::Value;

use super::models::*;
use super::validation::{Payload, ValidationError};

/// Creation payload validation.
pub trait Insertable: Sized {
    fn from_payload(value: &Value) -> Result<Self, ValidationError>;
}

/// Accepts an RFC 3339 timestamp or a bare `YYYY-MM-DD` date (midnight UTC).
pub fn parse_date(raw: &str) -> Result<DateTime<Utc>, String> {
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Ok(ts.with_timezone(&Utc));
    }

    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc())
        .ok_or_else(|| format!("invalid date '{}', expected YYYY-MM-DD or RFC 3339", raw))
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub username: String,
    pub password: String,
    pub display_name: String,
    pub church: Option<String>,
    pub role: Option<Role>,
}

impl Insertable for NewUser {
    fn from_payload(value: &Value) -> Result<Self, ValidationError> {
        let mut p = Payload::new(value);
        let username = p.required_str("username");
        let password = p.required_str("password");
        let display_name = p.required_str("displayName");
        let church = p.optional_str("church");
        let role = p.optional_parsed("role", |s| s.parse::<Role>());
        p.finish()?;

        Ok(Self {
            username,
            password,
            display_name,
            church,
            role,
        })
    }
}

impl NewUser {
    pub fn into_record(self, id: Id, now: DateTime<Utc>) -> User {
        User {
            id,
            username: self.username,
            password: self.password,
            display_name: self.display_name,
            church: self.church,
            level: 1,
            level_progress: 0,
            role: self.role.unwrap_or_default(),
            created_at: now,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewContent {
    pub title: String,
    pub description: String,
    pub kind: ContentType,
    pub duration: Option<i64>,
    pub parts: Option<i64>,
    pub thumbnail_url: Option<String>,
    pub content: String,
    pub author_id: Id,
    pub tags: Option<Vec<String>>,
}

impl Insertable for NewContent {
    fn from_payload(value: &Value) -> Result<Self, ValidationError> {
        let mut p = Payload::new(value);
        let title = p.required_str("title");
        let description = p.required_str("description");
        let kind = p.required_parsed("type", |s| s.parse::<ContentType>());
        let duration = p.optional_int("duration");
        let parts = p.optional_int("parts");
        let thumbnail_url = p.optional_str("thumbnailUrl");
        let content = p.required_str("content");
        let author_id = p.required_int("authorId");
        let tags = p.optional_list("tags");
        p.finish()?;

        Ok(Self {
            title,
            description,
            kind: kind.ok_or_else(|| ValidationError::single("type", "required"))?,
            duration,
            parts,
            thumbnail_url,
            content,
            author_id,
            tags,
        })
    }
}

impl NewContent {
    pub fn into_record(self, id: Id, now: DateTime<Utc>) -> Content {
        Content {
            id,
            title: self.title,
            description: self.description,
            kind: self.kind,
            duration: self.duration,
            parts: self.parts.unwrap_or(1),
            thumbnail_url: self.thumbnail_url,
            content: self.content,
            author_id: self.author_id,
            tags: self.tags,
            created_at: now,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPrayerRequest {
    pub user_id: Id,
    pub content: String,
}

impl Insertable for NewPrayerRequest {
    fn from_payload(value: &Value) -> Result<Self, ValidationError> {
        let mut p = Payload::new(value);
        let user_id = p.required_int("userId");
        let content = p.required_str("content");
        p.finish()?;

        Ok(Self { user_id, content })
    }
}

impl NewPrayerRequest {
    pub fn into_record(self, id: Id, now: DateTime<Utc>) -> PrayerRequest {
        PrayerRequest {
            id,
            user_id: self.user_id,
            content: self.content,
            created_at: now,
            prayer_count: 0,
            comment_count: 0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewDiscussion {
    pub title: String,
    pub category: String,
    pub user_id: Id,
}

impl Insertable for NewDiscussion {
    fn from_payload(value: &Value) -> Result<Self, ValidationError> {
        let mut p = Payload::new(value);
        let title = p.required_str("title");
        let category = p.required_str("category");
        let user_id = p.required_int("userId");
        p.finish()?;

        Ok(Self {
            title,
            category,
            user_id,
        })
    }
}

impl NewDiscussion {
    pub fn into_record(self, id: Id, now: DateTime<Utc>) -> Discussion {
        Discussion {
            id,
            title: self.title,
            category: self.category,
            user_id: self.user_id,
            created_at: now,
            reply_count: 0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewEvent {
    pub title: String,
    pub description: String,
    pub date: DateTime<Utc>,
    pub start_time: String,
    pub end_time: String,
    pub location: String,
}

impl Insertable for NewEvent {
    fn from_payload(value: &Value) -> Result<Self, ValidationError> {
        let mut p = Payload::new(value);
        let title = p.required_str("title");
        let description = p.required_str("description");
        let date = p.required_parsed("date", parse_date);
        let start_time = p.required_str("startTime");
        let end_time = p.required_str("endTime");
        let location = p.required_str("location");
        p.finish()?;

        Ok(Self {
            title,
            description,
            date: date.ok_or_else(|| ValidationError::single("date", "required"))?,
            start_time,
            end_time,
            location,
        })
    }
}

impl NewEvent {
    // Events carry no server-owned fields besides the id.
    pub fn into_record(self, id: Id) -> Event {
        Event {
            id,
            title: self.title,
            description: self.description,
            date: self.date,
            start_time: self.start_time,
            end_time: self.end_time,
            location: self.location,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAchievement {
    pub name: String,
    pub description: String,
    pub icon: String,
    pub criteria: String,
}

impl Insertable for NewAchievement {
    fn from_payload(value: &Value) -> Result<Self, ValidationError> {
        let mut p = Payload::new(value);
        let name = p.required_str("name");
        let description = p.required_str("description");
        let icon = p.required_str("icon");
        let criteria = p.required_str("criteria");
        p.finish()?;

        Ok(Self {
            name,
            description,
            icon,
            criteria,
        })
    }
}

impl NewAchievement {
    pub fn into_record(self, id: Id) -> Achievement {
        Achievement {
            id,
            name: self.name,
            description: self.description,
            icon: self.icon,
            criteria: self.criteria,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NewUserAchievement {
    pub user_id: Id,
    pub achievement_id: Id,
}

impl Insertable for NewUserAchievement {
    fn from_payload(value: &Value) -> Result<Self, ValidationError> {
        let mut p = Payload::new(value);
        let user_id = p.required_int("userId");
        let achievement_id = p.required_int("achievementId");
        p.finish()?;

        Ok(Self {
            user_id,
            achievement_id,
        })
    }
}

impl NewUserAchievement {
    pub fn into_record(self, id: Id, now: DateTime<Utc>) -> UserAchievement {
        UserAchievement {
            id,
            user_id: self.user_id,
            achievement_id: self.achievement_id,
            date_earned: now,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewChurch {
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
}

impl Insertable for NewChurch {
    fn from_payload(value: &Value) -> Result<Self, ValidationError> {
        let mut p = Payload::new(value);
        let name = p.required_str("name");
        let description = p.required_str("description");
        let location = p.required_str("location");
        let logo_url = p.optional_str("logoUrl");
        let website_url = p.optional_str("websiteUrl");
        let denomination = p.optional_str("denomination");
        let number_of_campuses = p.optional_int("numberOfCampuses");
        let lead_pastor_name = p.required_str("leadPastorName");
        let lead_pastor_bio = p.optional_str("leadPastorBio");
        let lead_pastor_image_url = p.optional_str("leadPastorImageUrl");
        let streaming_url = p.optional_str("streamingUrl");
        let streaming_days = p.optional_list("streamingDays");
        let streaming_times = p.optional_list("streamingTimes");
        p.finish()?;

        Ok(Self {
            name,
            description,
            location,
            logo_url,
            website_url,
            denomination,
            number_of_campuses,
            lead_pastor_name,
            lead_pastor_bio,
            lead_pastor_image_url,
            streaming_url,
            streaming_days,
            streaming_times,
        })
    }
}

impl NewChurch {
    pub fn into_record(self, id: Id, now: DateTime<Utc>) -> Church {
        Church {
            id,
            name: self.name,
            description: self.description,
            location: self.location,
            logo_url: self.logo_url,
            website_url: self.website_url,
            denomination: self.denomination,
            number_of_campuses: self.number_of_campuses,
            lead_pastor_name: self.lead_pastor_name,
            lead_pastor_bio: self.lead_pastor_bio,
            lead_pastor_image_url: self.lead_pastor_image_url,
            streaming_url: self.streaming_url,
            streaming_days: self.streaming_days,
            streaming_times: self.streaming_times,
            created_at: now,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCampus {
    pub church_id: Id,
    pub name: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub zip_code: String,
    pub service_schedule: Option<Vec<String>>,
}

impl Insertable for NewCampus {
    fn from_payload(value: &Value) -> Result<Self, ValidationError> {
        let mut p = Payload::new(value);
        let church_id = p.required_int("churchId");
        let name = p.required_str("name");
        let address = p.required_str("address");
        let city = p.required_str("city");
        let state = p.required_str("state");
        let zip_code = p.required_str("zipCode");
        let service_schedule = p.optional_list("serviceSchedule");
        p.finish()?;

        Ok(Self {
            church_id,
            name,
            address,
            city,
            state,
            zip_code,
            service_schedule,
        })
    }
}

impl NewCampus {
    pub fn into_record(self, id: Id) -> Campus {
        Campus {
            id,
            church_id: self.church_id,
            name: self.name,
            address: self.address,
            city: self.city,
            state: self.state,
            zip_code: self.zip_code,
            service_schedule: self.service_schedule,
        }
    }
}

// Storage façade: the single source of truth for entity state while the
// process runs. Nothing here is durable.
pub mod memory;
pub mod seed;
mod table;

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tokio::sync::Mutex;

use crate::schema::*;

pub use memory::MemStorage;
pub use table::Table;

/// Source of "now" for server-owned timestamps.
pub trait Clock: Send {
    fn now(&self) -> DateTime<Utc>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Typed CRUD operations per entity.
///
/// Creation never fails: payloads are validated by the schema layer before
/// they get here, and no uniqueness or referential checks are made. Reads and
/// targeted updates return `None` for unknown ids.
pub trait Storage: Send {
    // Users
    fn get_user(&self, id: Id) -> Option<User>;
    fn get_user_by_username(&self, username: &str) -> Option<User>;
    fn create_user(&mut self, user: NewUser) -> User;
    fn update_user_progress(&mut self, id: Id, level_progress: i64) -> Option<User>;

    // Content
    fn create_content(&mut self, content: NewContent) -> Content;
    fn get_content(&self, id: Id) -> Option<Content>;
    fn get_content_by_type(&self, kind: ContentType) -> Vec<Content>;
    fn get_all_content(&self) -> Vec<Content>;

    // Prayer requests, newest first
    fn create_prayer_request(&mut self, request: NewPrayerRequest) -> PrayerRequest;
    fn get_prayer_request(&self, id: Id) -> Option<PrayerRequest>;
    fn get_prayer_requests(&self) -> Vec<PrayerRequest>;
    fn update_prayer_count(&mut self, id: Id, count: i64) -> Option<PrayerRequest>;

    // Discussions, newest first
    fn create_discussion(&mut self, discussion: NewDiscussion) -> Discussion;
    fn get_discussion(&self, id: Id) -> Option<Discussion>;
    fn get_discussions(&self) -> Vec<Discussion>;

    // Events, soonest first
    fn create_event(&mut self, event: NewEvent) -> Event;
    fn get_event(&self, id: Id) -> Option<Event>;
    fn get_events(&self) -> Vec<Event>;

    // Achievements
    fn create_achievement(&mut self, achievement: NewAchievement) -> Achievement;
    fn get_achievement(&self, id: Id) -> Option<Achievement>;
    fn get_achievements(&self) -> Vec<Achievement>;
    /// Records an award. Awarding the same achievement twice adds a second row.
    fn award_achievement(&mut self, award: NewUserAchievement) -> UserAchievement;
    fn get_user_achievement(&self, id: Id) -> Option<UserAchievement>;
    /// Catalog entries the user has unlocked, each once, in catalog order.
    fn get_user_achievements(&self, user_id: Id) -> Vec<Achievement>;

    // Church directory
    fn create_church(&mut self, church: NewChurch) -> Church;
    fn get_church(&self, id: Id) -> Option<Church>;
    fn get_all_churches(&self) -> Vec<Church>;
    fn create_campus(&mut self, campus: NewCampus) -> Campus;
    fn get_campus(&self, id: Id) -> Option<Campus>;
    fn get_campuses(&self, church_id: Id) -> Vec<Campus>;
}

/// Storage shared between request handlers; one operation runs at a time.
pub type SharedStorage = Arc<Mutex<dyn Storage>>;

pub fn shared(storage: impl Storage + 'static) -> SharedStorage {
    Arc::new(Mutex::new(storage))
}

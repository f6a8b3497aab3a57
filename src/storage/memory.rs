use std::collections::BTreeSet;

use crate::schema::*;
use crate::storage::{Clock, Storage, SystemClock, Table};

/// In-memory [`Storage`]. Every instance is independent; dropping it
/// discards all data.
pub struct MemStorage {
    clock: Box<dyn Clock>,
    users: Table<User>,
    content: Table<Content>,
    prayer_requests: Table<PrayerRequest>,
    discussions: Table<Discussion>,
    events: Table<Event>,
    achievements: Table<Achievement>,
    user_achievements: Table<UserAchievement>,
    churches: Table<Church>,
    campuses: Table<Campus>,
}

impl Default for MemStorage {
    fn default() -> Self {
        Self::new()
    }
}

impl MemStorage {
    pub fn new() -> Self {
        Self::with_clock(Box::new(SystemClock))
    }

    pub fn with_clock(clock: Box<dyn Clock>) -> Self {
        Self {
            clock,
            users: Table::new(),
            content: Table::new(),
            prayer_requests: Table::new(),
            discussions: Table::new(),
            events: Table::new(),
            achievements: Table::new(),
            user_achievements: Table::new(),
            churches: Table::new(),
            campuses: Table::new(),
        }
    }

    /// Every award row for a user, duplicates included.
    pub fn awards_for(&self, user_id: Id) -> Vec<UserAchievement> {
        self.user_achievements.filtered(|ua| ua.user_id == user_id)
    }
}

impl Storage for MemStorage {
    fn get_user(&self, id: Id) -> Option<User> {
        self.users.get(id)
    }

    fn get_user_by_username(&self, username: &str) -> Option<User> {
        self.users.iter().find(|u| u.username == username).cloned()
    }

    fn create_user(&mut self, user: NewUser) -> User {
        let now = self.clock.now();
        let user = self.users.insert_with(|id| user.into_record(id, now));
        tracing::debug!(id = user.id, username = %user.username, "Created user");
        user
    }

    fn update_user_progress(&mut self, id: Id, level_progress: i64) -> Option<User> {
        self.users
            .replace(id, |user| user.with_level_progress(level_progress))
    }

    fn create_content(&mut self, content: NewContent) -> Content {
        let now = self.clock.now();
        let content = self.content.insert_with(|id| content.into_record(id, now));
        tracing::debug!(id = content.id, kind = %content.kind, "Created content");
        content
    }

    fn get_content(&self, id: Id) -> Option<Content> {
        self.content.get(id)
    }

    fn get_content_by_type(&self, kind: ContentType) -> Vec<Content> {
        self.content.filtered(|c| c.kind == kind)
    }

    fn get_all_content(&self) -> Vec<Content> {
        self.content.all()
    }

    fn create_prayer_request(&mut self, request: NewPrayerRequest) -> PrayerRequest {
        let now = self.clock.now();
        let request = self
            .prayer_requests
            .insert_with(|id| request.into_record(id, now));
        tracing::debug!(id = request.id, user_id = request.user_id, "Created prayer request");
        request
    }

    fn get_prayer_request(&self, id: Id) -> Option<PrayerRequest> {
        self.prayer_requests.get(id)
    }

    fn get_prayer_requests(&self) -> Vec<PrayerRequest> {
        let mut requests = self.prayer_requests.all();
        requests.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        requests
    }

    fn update_prayer_count(&mut self, id: Id, count: i64) -> Option<PrayerRequest> {
        self.prayer_requests
            .replace(id, |request| request.with_prayer_count(count))
    }

    fn create_discussion(&mut self, discussion: NewDiscussion) -> Discussion {
        let now = self.clock.now();
        let discussion = self
            .discussions
            .insert_with(|id| discussion.into_record(id, now));
        tracing::debug!(id = discussion.id, category = %discussion.category, "Created discussion");
        discussion
    }

    fn get_discussion(&self, id: Id) -> Option<Discussion> {
        self.discussions.get(id)
    }

    fn get_discussions(&self) -> Vec<Discussion> {
        let mut discussions = self.discussions.all();
        discussions.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        discussions
    }

    fn create_event(&mut self, event: NewEvent) -> Event {
        let event = self.events.insert_with(|id| event.into_record(id));
        tracing::debug!(id = event.id, date = %event.date, "Created event");
        event
    }

    fn get_event(&self, id: Id) -> Option<Event> {
        self.events.get(id)
    }

    fn get_events(&self) -> Vec<Event> {
        let mut events = self.events.all();
        events.sort_by_key(|e| e.date);
        events
    }

    fn create_achievement(&mut self, achievement: NewAchievement) -> Achievement {
        self.achievements
            .insert_with(|id| achievement.into_record(id))
    }

    fn get_achievement(&self, id: Id) -> Option<Achievement> {
        self.achievements.get(id)
    }

    fn get_achievements(&self) -> Vec<Achievement> {
        self.achievements.all()
    }

    fn award_achievement(&mut self, award: NewUserAchievement) -> UserAchievement {
        let now = self.clock.now();
        let award = self
            .user_achievements
            .insert_with(|id| award.into_record(id, now));
        tracing::debug!(
            user_id = award.user_id,
            achievement_id = award.achievement_id,
            "Awarded achievement"
        );
        award
    }

    fn get_user_achievement(&self, id: Id) -> Option<UserAchievement> {
        self.user_achievements.get(id)
    }

    fn get_user_achievements(&self, user_id: Id) -> Vec<Achievement> {
        let unlocked: BTreeSet<Id> = self
            .user_achievements
            .iter()
            .filter(|ua| ua.user_id == user_id)
            .map(|ua| ua.achievement_id)
            .collect();

        self.achievements.filtered(|a| unlocked.contains(&a.id))
    }

    fn create_church(&mut self, church: NewChurch) -> Church {
        let now = self.clock.now();
        let church = self.churches.insert_with(|id| church.into_record(id, now));
        tracing::debug!(id = church.id, name = %church.name, "Created church");
        church
    }

    fn get_church(&self, id: Id) -> Option<Church> {
        self.churches.get(id)
    }

    fn get_all_churches(&self) -> Vec<Church> {
        self.churches.all()
    }

    fn create_campus(&mut self, campus: NewCampus) -> Campus {
        let campus = self.campuses.insert_with(|id| campus.into_record(id));
        tracing::debug!(id = campus.id, church_id = campus.church_id, "Created campus");
        campus
    }

    fn get_campus(&self, id: Id) -> Option<Campus> {
        self.campuses.get(id)
    }

    fn get_campuses(&self, church_id: Id) -> Vec<Campus> {
        self.campuses.filtered(|c| c.church_id == church_id)
    }
}

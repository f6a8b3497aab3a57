use serde_json::{json, Value};

use crate::schema::{Insertable, NewAchievement, NewEvent, ValidationError};
use crate::storage::Storage;

fn achievements() -> Vec<Value> {
    vec![
        json!({
            "name": "Scripture Reader",
            "description": "Read at least 10 Bible passages",
            "icon": "book",
            "criteria": "Read 10 passages"
        }),
        json!({
            "name": "Community Builder",
            "description": "Participate in at least 5 discussions",
            "icon": "groups",
            "criteria": "5 discussions"
        }),
        json!({
            "name": "Prayer Warrior",
            "description": "Pray for at least 20 prayer requests",
            "icon": "volunteer_activism",
            "criteria": "Pray 20 times"
        }),
    ]
}

fn events() -> Vec<Value> {
    vec![
        json!({
            "title": "Sunday Worship Service",
            "description": "Join us for worship, prayer, and a message from Pastor Johnson on \"The Power of Community\".",
            "date": "2023-06-15",
            "startTime": "9:00 AM",
            "endTime": "11:00 AM",
            "location": "Main Sanctuary"
        }),
        json!({
            "title": "Midweek Bible Study",
            "description": "Dive deeper into the Word with our interactive Bible study on the Book of Acts.",
            "date": "2023-06-18",
            "startTime": "7:00 PM",
            "endTime": "8:30 PM",
            "location": "Fellowship Hall"
        }),
        json!({
            "title": "Community Outreach",
            "description": "Join us as we serve our local community through the downtown food bank initiative.",
            "date": "2023-06-24",
            "startTime": "10:00 AM",
            "endTime": "1:00 PM",
            "location": "Downtown Community Center"
        }),
    ]
}

/// Loads the startup catalog: the achievement list and the sample events.
/// Seed rows go through the same validation as client payloads.
pub fn load(storage: &mut dyn Storage) -> Result<(), ValidationError> {
    for payload in achievements() {
        storage.create_achievement(NewAchievement::from_payload(&payload)?);
    }
    for payload in events() {
        storage.create_event(NewEvent::from_payload(&payload)?);
    }

    tracing::info!("Seeded achievements and events");
    Ok(())
}

pub mod insert;
pub mod models;
pub mod validation;

pub use insert::{
    Insertable, NewAchievement, NewCampus, NewChurch, NewContent, NewDiscussion, NewEvent,
    NewPrayerRequest, NewUser, NewUserAchievement,
};
pub use models::{
    Achievement, Campus, Church, Content, ContentType, Discussion, Event, Id, PrayerRequest, Role,
    User, UserAchievement,
};
pub use validation::{FieldError, ValidationError};

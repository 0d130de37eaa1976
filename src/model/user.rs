use alpe_schema::{TagDto, ViewerDto};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuthenticatedUser {
    pub user_id: i64,
    pub username: String,
    pub unread_notifications: i64,
}

impl From<ViewerDto> for AuthenticatedUser {
    fn from(dto: ViewerDto) -> Self {
        Self {
            user_id: dto.id,
            username: dto.name,
            unread_notifications: dto.unread_notification_count.unwrap_or(0),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Tag {
    pub tag_id: i64,
    pub name: String,
    pub description: String,
    pub category: String,
    pub adult: bool,
}

impl From<TagDto> for Tag {
    fn from(dto: TagDto) -> Self {
        Self {
            tag_id: dto.id,
            name: dto.name,
            description: dto.description.unwrap_or_default(),
            category: dto.category.unwrap_or_default(),
            adult: dto.is_adult.unwrap_or(false),
        }
    }
}

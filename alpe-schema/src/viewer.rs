use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ViewerPage {
    #[serde(rename = "Viewer")]
    pub viewer: ViewerDto,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewerDto {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub unread_notification_count: Option<i64>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TagCollectionPage {
    #[serde(rename = "MediaTagCollection")]
    pub tags: Vec<TagDto>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TagDto {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub is_adult: Option<bool>,
}

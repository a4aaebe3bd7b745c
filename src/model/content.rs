//! News posts, documents, layout blocks and menu entries.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum PostStatus {
    Draft,
    #[default]
    Published,
    Scheduled,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AttachmentKind {
    File,
    Link,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Attachment {
    pub id: String,
    pub name: String,
    pub url: String,
    #[serde(rename = "type")]
    pub kind: AttachmentKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_type: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    #[serde(default)]
    pub id: String,
    pub title: String,
    pub slug: String,
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub thumbnail: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_caption: Option<String>,
    #[serde(default)]
    pub author: String,
    pub date: String,
    pub category: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub additional_categories: Option<Vec<String>>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub views: u64,
    #[serde(default)]
    pub status: PostStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub published_at: Option<String>,
    #[serde(default)]
    pub is_featured: bool,
    #[serde(default)]
    pub show_on_home: bool,
    #[serde(default)]
    pub block_ids: Vec<String>,
    #[serde(default)]
    pub attachments: Vec<Attachment>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentCategory {
    #[serde(default)]
    pub id: String,
    pub name: String,
    pub slug: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub order: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SchoolDocument {
    #[serde(default)]
    pub id: String,
    pub number: String,
    pub title: String,
    pub date: String,
    pub category_id: String,
    #[serde(default)]
    pub download_url: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BlockPosition {
    Main,
    Sidebar,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BlockType {
    Hero,
    Grid,
    List,
    Highlight,
    Docs,
    Html,
    Stats,
    Video,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TargetPage {
    All,
    Home,
    Detail,
}

/// A layout block on the public site.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DisplayBlock {
    #[serde(default)]
    pub id: String,
    pub name: String,
    pub position: BlockPosition,
    #[serde(rename = "type")]
    pub block_type: BlockType,
    pub order: i64,
    pub item_count: u32,
    pub is_visible: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub html_content: Option<String>,
    pub target_page: TargetPage,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_text_color: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuItem {
    #[serde(default)]
    pub id: String,
    pub label: String,
    pub path: String,
    pub order: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_post_serializes_camel_case() {
        let post = Post {
            id: "9".to_string(),
            title: "T".to_string(),
            slug: "t".to_string(),
            summary: String::new(),
            content: String::new(),
            thumbnail: String::new(),
            image_caption: None,
            author: String::new(),
            date: "2024-01-01".to_string(),
            category: "news".to_string(),
            additional_categories: None,
            tags: vec![],
            views: 0,
            status: PostStatus::Draft,
            published_at: None,
            is_featured: true,
            show_on_home: false,
            block_ids: vec!["block_hero".to_string()],
            attachments: vec![],
        };
        let value = serde_json::to_value(&post).unwrap();
        assert_eq!(value["isFeatured"], true);
        assert_eq!(value["blockIds"][0], "block_hero");
        assert_eq!(value["status"], "draft");
        assert!(value.get("imageCaption").is_none());
    }

    #[test]
    fn test_block_type_field_is_named_type() {
        let json = r#"{"id":"b","name":"n","position":"sidebar","type":"html","order":1,
            "itemCount":1,"isVisible":true,"targetPage":"all"}"#;
        let block: DisplayBlock = serde_json::from_str(json).unwrap();
        assert_eq!(block.block_type, BlockType::Html);
        assert_eq!(block.position, BlockPosition::Sidebar);
    }
}

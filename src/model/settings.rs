use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FooterLink {
    pub id: String,
    pub label: String,
    pub url: String,
}

/// Site-wide settings. Stored as a single object, not a collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SchoolConfig {
    // General
    pub name: String,
    #[serde(default)]
    pub slogan: String,
    #[serde(default)]
    pub logo_url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub favicon_url: Option<String>,
    #[serde(default)]
    pub banner_url: String,
    #[serde(default)]
    pub principal_name: String,

    // Contact
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub hotline: String,
    #[serde(default)]
    pub map_url: String,

    // Social
    #[serde(default)]
    pub facebook: String,
    #[serde(default)]
    pub youtube: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub zalo: Option<String>,
    #[serde(default)]
    pub website: String,

    // Display
    #[serde(default)]
    pub show_welcome_banner: bool,
    #[serde(default)]
    pub home_news_count: u32,
    #[serde(default)]
    pub home_show_program: bool,
    #[serde(default)]
    pub primary_color: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title_color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title_shadow_color: Option<String>,

    // SEO
    #[serde(default)]
    pub meta_title: String,
    #[serde(default)]
    pub meta_description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub footer_links: Option<Vec<FooterLink>>,
}

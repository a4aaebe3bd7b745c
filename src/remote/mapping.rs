//! Bidirectional field maps between stored entity shape and remote table rows.
//!
//! Local entities use camelCase keys; remote tables use snake_case columns
//! and a few renames (`order` is `order_index`). Each domain declares its map
//! explicitly instead of relying on a naming convention.

use crate::error::StoreError;
use crate::types::Domain;
use serde_json::{Map, Value};

pub type Row = Map<String, Value>;

/// Table name plus `(local field, remote column)` pairs for one domain.
#[derive(Debug)]
pub struct FieldMap {
    pub table: &'static str,
    pub fields: &'static [(&'static str, &'static str)],
}

impl FieldMap {
    pub fn remote_column(&self, local: &str) -> Option<&'static str> {
        self.fields
            .iter()
            .find(|(l, _)| *l == local)
            .map(|(_, r)| *r)
    }

    pub fn local_field(&self, remote: &str) -> Option<&'static str> {
        self.fields
            .iter()
            .find(|(_, r)| *r == remote)
            .map(|(l, _)| *l)
    }

    /// Translate a stored entity into a remote row.
    ///
    /// Fails on any field the map does not declare so that nothing is
    /// silently dropped on the way out.
    pub fn to_remote(&self, entity: &Row) -> Result<Row, StoreError> {
        let mut row = Row::new();
        for (field, value) in entity {
            let column = self.remote_column(field).ok_or_else(|| {
                StoreError::Mapping(format!("{} has no column for field '{}'", self.table, field))
            })?;
            row.insert(column.to_string(), value.clone());
        }
        Ok(row)
    }

    /// Translate a remote row into stored entity shape.
    ///
    /// Unmapped columns (`created_at` and friends) and null values are skipped.
    pub fn from_remote(&self, row: &Row) -> Row {
        row.iter()
            .filter(|(_, value)| !value.is_null())
            .filter_map(|(column, value)| {
                self.local_field(column)
                    .map(|field| (field.to_string(), value.clone()))
            })
            .collect()
    }
}

static SETTINGS: FieldMap = FieldMap {
    table: "school_config",
    fields: &[
        ("name", "name"),
        ("slogan", "slogan"),
        ("logoUrl", "logo_url"),
        ("faviconUrl", "favicon_url"),
        ("bannerUrl", "banner_url"),
        ("principalName", "principal_name"),
        ("address", "address"),
        ("phone", "phone"),
        ("email", "email"),
        ("hotline", "hotline"),
        ("mapUrl", "map_url"),
        ("facebook", "facebook"),
        ("youtube", "youtube"),
        ("zalo", "zalo"),
        ("website", "website"),
        ("showWelcomeBanner", "show_welcome_banner"),
        ("homeNewsCount", "home_news_count"),
        ("homeShowProgram", "home_show_program"),
        ("primaryColor", "primary_color"),
        ("titleColor", "title_color"),
        ("titleShadowColor", "title_shadow_color"),
        ("metaTitle", "meta_title"),
        ("metaDescription", "meta_description"),
        ("footerLinks", "footer_links"),
    ],
};

static POSTS: FieldMap = FieldMap {
    table: "posts",
    fields: &[
        ("id", "id"),
        ("title", "title"),
        ("slug", "slug"),
        ("summary", "summary"),
        ("content", "content"),
        ("thumbnail", "thumbnail"),
        ("imageCaption", "image_caption"),
        ("author", "author"),
        ("date", "date"),
        ("category", "category"),
        ("additionalCategories", "additional_categories"),
        ("tags", "tags"),
        ("views", "views"),
        ("status", "status"),
        ("publishedAt", "published_at"),
        ("isFeatured", "is_featured"),
        ("showOnHome", "show_on_home"),
        ("blockIds", "block_ids"),
        ("attachments", "attachments"),
    ],
};

static DOCUMENTS: FieldMap = FieldMap {
    table: "documents",
    fields: &[
        ("id", "id"),
        ("number", "number"),
        ("title", "title"),
        ("date", "date"),
        ("categoryId", "category_id"),
        ("downloadUrl", "download_url"),
    ],
};

static DOCUMENT_CATEGORIES: FieldMap = FieldMap {
    table: "document_categories",
    fields: &[
        ("id", "id"),
        ("name", "name"),
        ("slug", "slug"),
        ("description", "description"),
        ("order", "order_index"),
    ],
};

static USERS: FieldMap = FieldMap {
    table: "users",
    fields: &[
        ("id", "id"),
        ("username", "username"),
        ("password", "password"),
        ("fullName", "full_name"),
        ("role", "role"),
        ("email", "email"),
    ],
};

static GALLERY: FieldMap = FieldMap {
    table: "gallery_images",
    fields: &[
        ("id", "id"),
        ("url", "url"),
        ("caption", "caption"),
        ("albumId", "album_id"),
    ],
};

static ALBUMS: FieldMap = FieldMap {
    table: "gallery_albums",
    fields: &[
        ("id", "id"),
        ("title", "title"),
        ("description", "description"),
        ("thumbnail", "thumbnail"),
        ("createdDate", "created_date"),
    ],
};

static MENU: FieldMap = FieldMap {
    table: "menu_items",
    fields: &[
        ("id", "id"),
        ("label", "label"),
        ("path", "path"),
        ("order", "order_index"),
    ],
};

static BLOCKS: FieldMap = FieldMap {
    table: "display_blocks",
    fields: &[
        ("id", "id"),
        ("name", "name"),
        ("position", "position"),
        ("type", "type"),
        ("order", "order_index"),
        ("itemCount", "item_count"),
        ("isVisible", "is_visible"),
        ("htmlContent", "html_content"),
        ("targetPage", "target_page"),
        ("customColor", "custom_color"),
        ("customTextColor", "custom_text_color"),
    ],
};

static STAFF: FieldMap = FieldMap {
    table: "staff",
    fields: &[
        ("id", "id"),
        ("fullName", "full_name"),
        ("position", "position"),
        ("partyDate", "party_date"),
        ("email", "email"),
        ("avatarUrl", "avatar_url"),
        ("order", "order_index"),
    ],
};

pub fn field_map(domain: Domain) -> &'static FieldMap {
    match domain {
        Domain::Settings => &SETTINGS,
        Domain::Posts => &POSTS,
        Domain::Documents => &DOCUMENTS,
        Domain::DocumentCategories => &DOCUMENT_CATEGORIES,
        Domain::Users => &USERS,
        Domain::Gallery => &GALLERY,
        Domain::Albums => &ALBUMS,
        Domain::Menu => &MENU,
        Domain::Blocks => &BLOCKS,
        Domain::Staff => &STAFF,
    }
}

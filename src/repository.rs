//! Typed per-domain access for UI collaborators.
//!
//! Thin layer over any [`DomainStore`]: entities are converted to and from
//! their stored JSON shape here, so the store itself stays schema-agnostic.

use crate::error::StoreError;
use crate::model::{
    DisplayBlock, DocumentCategory, Entity, GalleryAlbum, GalleryImage, MenuItem, Post,
    SchoolConfig, SchoolDocument, StaffMember, User,
};
use crate::store::{seed, DomainStore};
use crate::types::{Domain, Removal, Upserted};
use serde_json::Value;
use std::sync::Arc;
use tracing::warn;

/// Password given to accounts created without one.
pub const DEFAULT_USER_PASSWORD: &str = "123456";

pub struct SchoolRepository {
    store: Arc<dyn DomainStore>,
}

impl SchoolRepository {
    pub fn new(store: Arc<dyn DomainStore>) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &Arc<dyn DomainStore> {
        &self.store
    }

    // Settings

    /// Stored settings. Fields missing from the stored object, or an object
    /// that cannot be decoded at all, fall back to the defaults.
    pub fn get_config(&self) -> Result<SchoolConfig, StoreError> {
        let value = self.store.read(Domain::Settings)?;
        match serde_json::from_value(value.clone()) {
            Ok(config) => Ok(config),
            Err(e) => {
                warn!("Stored settings incomplete ({}); filling from defaults", e);
                Ok(merge_over_defaults(value))
            }
        }
    }

    pub fn save_config(&self, config: &SchoolConfig) -> Result<bool, StoreError> {
        self.store
            .write(Domain::Settings, &serde_json::to_value(config)?)
    }

    // Posts

    pub fn get_posts(&self) -> Result<Vec<Post>, StoreError> {
        self.list()
    }

    pub fn get_post(&self, id: &str) -> Result<Option<Post>, StoreError> {
        self.find(id)
    }

    pub fn get_post_by_slug(&self, slug: &str) -> Result<Option<Post>, StoreError> {
        Ok(self.get_posts()?.into_iter().find(|p| p.slug == slug))
    }

    pub fn save_post(&self, post: &Post) -> Result<Upserted, StoreError> {
        self.upsert(post)
    }

    pub fn delete_post(&self, id: &str) -> Result<Removal, StoreError> {
        self.delete::<Post>(id)
    }

    // Documents

    /// All documents, or only those in `category_id` when given.
    pub fn get_documents(
        &self,
        category_id: Option<&str>,
    ) -> Result<Vec<SchoolDocument>, StoreError> {
        let docs: Vec<SchoolDocument> = self.list()?;
        Ok(match category_id {
            Some(category) => docs
                .into_iter()
                .filter(|d| d.category_id == category)
                .collect(),
            None => docs,
        })
    }

    pub fn save_document(&self, doc: &SchoolDocument) -> Result<Upserted, StoreError> {
        self.upsert(doc)
    }

    pub fn delete_document(&self, id: &str) -> Result<Removal, StoreError> {
        self.delete::<SchoolDocument>(id)
    }

    pub fn get_document_categories(&self) -> Result<Vec<DocumentCategory>, StoreError> {
        self.list()
    }

    pub fn save_document_category(
        &self,
        category: &DocumentCategory,
    ) -> Result<Upserted, StoreError> {
        self.upsert(category)
    }

    pub fn delete_document_category(&self, id: &str) -> Result<Removal, StoreError> {
        self.delete::<DocumentCategory>(id)
    }

    // Users

    pub fn get_users(&self) -> Result<Vec<User>, StoreError> {
        self.list()
    }

    /// Upsert an account.
    ///
    /// An update without a password keeps the stored one; a new account
    /// without a password gets [`DEFAULT_USER_PASSWORD`].
    pub fn save_user(&self, user: &User) -> Result<Upserted, StoreError> {
        let mut user = user.clone();
        let has_password = user.password.as_deref().is_some_and(|p| !p.is_empty());
        if !has_password {
            let stored = if user.id.is_empty() {
                None
            } else {
                self.find::<User>(&user.id)?
            };
            user.password = Some(match stored.and_then(|s| s.password) {
                Some(existing) => existing,
                None => DEFAULT_USER_PASSWORD.to_string(),
            });
        }
        self.upsert(&user)
    }

    pub fn delete_user(&self, id: &str) -> Result<Removal, StoreError> {
        self.delete::<User>(id)
    }

    // Gallery

    pub fn get_albums(&self) -> Result<Vec<GalleryAlbum>, StoreError> {
        self.list()
    }

    pub fn save_album(&self, album: &GalleryAlbum) -> Result<Upserted, StoreError> {
        self.upsert(album)
    }

    /// Delete an album together with every image filed under it.
    pub fn delete_album(&self, id: &str) -> Result<Removal, StoreError> {
        let images: Vec<GalleryImage> = self.list()?;
        let (orphaned, kept): (Vec<_>, Vec<_>) =
            images.into_iter().partition(|img| img.album_id == id);
        if !orphaned.is_empty() {
            self.replace_all(&kept)?;
        }
        self.delete::<GalleryAlbum>(id)
    }

    /// All images, or only those in `album_id` when given.
    pub fn get_gallery(&self, album_id: Option<&str>) -> Result<Vec<GalleryImage>, StoreError> {
        let images: Vec<GalleryImage> = self.list()?;
        Ok(match album_id {
            Some(album) => images.into_iter().filter(|i| i.album_id == album).collect(),
            None => images,
        })
    }

    pub fn save_image(&self, image: &GalleryImage) -> Result<Upserted, StoreError> {
        self.upsert(image)
    }

    pub fn delete_image(&self, id: &str) -> Result<Removal, StoreError> {
        self.delete::<GalleryImage>(id)
    }

    // Layout

    pub fn get_menu(&self) -> Result<Vec<MenuItem>, StoreError> {
        self.list()
    }

    /// Replace the whole menu.
    pub fn save_menu(&self, items: &[MenuItem]) -> Result<bool, StoreError> {
        self.replace_all(items)
    }

    pub fn get_blocks(&self) -> Result<Vec<DisplayBlock>, StoreError> {
        self.list()
    }

    pub fn save_block(&self, block: &DisplayBlock) -> Result<Upserted, StoreError> {
        self.upsert(block)
    }

    pub fn delete_block(&self, id: &str) -> Result<Removal, StoreError> {
        self.delete::<DisplayBlock>(id)
    }

    /// Replace the whole block list, typically after a reorder.
    pub fn save_blocks_order(&self, blocks: &[DisplayBlock]) -> Result<bool, StoreError> {
        self.replace_all(blocks)
    }

    // Staff

    pub fn get_staff(&self) -> Result<Vec<StaffMember>, StoreError> {
        self.list()
    }

    pub fn save_staff(&self, member: &StaffMember) -> Result<Upserted, StoreError> {
        self.upsert(member)
    }

    pub fn delete_staff(&self, id: &str) -> Result<Removal, StoreError> {
        self.delete::<StaffMember>(id)
    }

    /// Decode a collection, skipping entries that no longer fit the type.
    fn list<E: Entity>(&self) -> Result<Vec<E>, StoreError> {
        let items = match self.store.read(E::DOMAIN)? {
            Value::Array(items) => items,
            _ => return Ok(Vec::new()),
        };
        Ok(items
            .into_iter()
            .filter_map(|item| match serde_json::from_value::<E>(item) {
                Ok(entity) => Some(entity),
                Err(e) => {
                    warn!("Skipping unreadable {} entry: {}", E::DOMAIN, e);
                    None
                }
            })
            .collect())
    }

    fn find<E: Entity>(&self, id: &str) -> Result<Option<E>, StoreError> {
        Ok(self.list::<E>()?.into_iter().find(|e| e.id() == id))
    }

    fn upsert<E: Entity>(&self, entity: &E) -> Result<Upserted, StoreError> {
        let value = serde_json::to_value(entity)?;
        self.store.upsert_entity(E::DOMAIN, value, E::ID_FIELD)
    }

    fn delete<E: Entity>(&self, id: &str) -> Result<Removal, StoreError> {
        self.store.remove_entity(E::DOMAIN, id, E::ID_FIELD)
    }

    fn replace_all<E: Entity>(&self, items: &[E]) -> Result<bool, StoreError> {
        let value = serde_json::to_value(items)?;
        self.store.write(E::DOMAIN, &value)
    }
}

fn merge_over_defaults(stored: Value) -> SchoolConfig {
    let mut merged = match serde_json::to_value(seed::default_config()) {
        Ok(Value::Object(fields)) => fields,
        _ => return seed::default_config(),
    };
    if let Value::Object(fields) = stored {
        merged.extend(fields);
    }
    serde_json::from_value(Value::Object(merged)).unwrap_or_else(|e| {
        warn!("Stored settings unreadable ({}); using defaults", e);
        seed::default_config()
    })
}

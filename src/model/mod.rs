//! Typed domain entities.
//!
//! Field names serialize in camelCase; that is the shape buckets are stored in.

pub mod content;
pub mod media;
pub mod people;
pub mod settings;

pub use content::{
    Attachment, AttachmentKind, BlockPosition, BlockType, DisplayBlock, DocumentCategory,
    MenuItem, Post, PostStatus, SchoolDocument, TargetPage,
};
pub use media::{GalleryAlbum, GalleryImage};
pub use people::{StaffMember, User, UserRole};
pub use settings::{FooterLink, SchoolConfig};

use crate::types::Domain;
use serde::de::DeserializeOwned;
use serde::Serialize;

/// An entity that lives in a domain collection.
pub trait Entity: Serialize + DeserializeOwned + Clone {
    const DOMAIN: Domain;
    /// Name of the identifier field in the serialized shape.
    const ID_FIELD: &'static str = "id";

    fn id(&self) -> &str;
}

macro_rules! impl_entity {
    ($($ty:ty => $domain:expr),* $(,)?) => {
        $(
            impl Entity for $ty {
                const DOMAIN: Domain = $domain;

                fn id(&self) -> &str {
                    &self.id
                }
            }
        )*
    };
}

impl_entity! {
    Post => Domain::Posts,
    SchoolDocument => Domain::Documents,
    DocumentCategory => Domain::DocumentCategories,
    User => Domain::Users,
    GalleryImage => Domain::Gallery,
    GalleryAlbum => Domain::Albums,
    MenuItem => Domain::Menu,
    DisplayBlock => Domain::Blocks,
    StaffMember => Domain::Staff,
}

//! Data models
//!
//! This module contains all data structures used throughout the Memoria
//! backend. Models represent:
//! - Database entities (Tribute, GalleryImage, TimelineEvent, ContactMessage)
//! - Listing filters and pagination parameters

mod contact;
mod gallery;
mod params;
mod timeline;
mod tribute;

pub use contact::{ContactMessage, CreateContactMessageInput};
pub use gallery::{CreateGalleryImageInput, GalleryFilter, GalleryImage};
pub use params::{ListParams, PagedResult};
pub use timeline::{CreateTimelineEventInput, TimelineEvent};
pub use tribute::{AdminTributeFilter, ApprovalStatus, CreateTributeInput, Tribute};

//! Gallery album entity and its photos

use std::cmp::Ordering;
use std::collections::HashSet;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::DomainError;
use crate::traits::{newest_first, Record, StoredFile};
use crate::value_objects::{ContentStatus, EntityKind, RecordId};

/// One uploaded photo inside an album
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Photo {
    pub id: String,
    /// Path relative to the upload root
    pub path: String,
    /// Original client file name
    pub filename: String,
    pub size: u64,
    pub uploaded_at: DateTime<Utc>,
}

impl Photo {
    pub fn new(stored: &StoredFile, original_name: &str, now: DateTime<Utc>) -> Self {
        Self {
            id: format!("PHO-{}", Uuid::new_v4().simple()),
            path: stored.path.clone(),
            filename: original_name.to_string(),
            size: stored.size,
            uploaded_at: now,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GalleryAlbum {
    pub id: RecordId,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub date: NaiveDate,
    #[serde(default)]
    pub photos: Vec<Photo>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cover_photo: Option<String>,
    pub status: ContentStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default)]
    pub created_by: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub archived_at: Option<DateTime<Utc>>,
}

/// Caller supplied fields for a new album
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewGalleryAlbum {
    pub title: String,
    pub description: Option<String>,
    pub date: Option<NaiveDate>,
}

impl GalleryAlbum {
    /// Fields managed by the photo endpoints, never by a plain update
    pub const PHOTO_FIELDS: [&'static str; 2] = ["photos", "coverPhoto"];

    pub fn create(
        fields: NewGalleryAlbum,
        created_by: &str,
        now: DateTime<Utc>,
    ) -> Result<Self, DomainError> {
        let title = fields.title.trim();
        if title.is_empty() {
            return Err(DomainError::validation("Title is required"));
        }

        Ok(Self {
            id: RecordId::generate(EntityKind::GalleryAlbum.id_prefix(), now),
            title: title.to_string(),
            description: fields.description.unwrap_or_default(),
            date: fields.date.unwrap_or_else(|| now.date_naive()),
            photos: Vec::new(),
            cover_photo: None,
            status: ContentStatus::Active,
            created_at: now,
            updated_at: now,
            created_by: created_by.to_string(),
            archived_at: None,
        })
    }

    pub fn photo(&self, photo_id: &str) -> Option<&Photo> {
        self.photos.iter().find(|p| p.id == photo_id)
    }

    /// Append a photo; the first photo of an album becomes its cover
    pub fn add_photo(&mut self, photo: Photo) {
        if self.cover_photo.is_none() {
            self.cover_photo = Some(photo.path.clone());
        }
        self.photos.push(photo);
    }

    /// Remove a photo and return it so its file can be deleted.
    ///
    /// When the removed photo was the cover, the next remaining photo takes over.
    pub fn remove_photo(&mut self, photo_id: &str) -> Result<Photo, DomainError> {
        let index = self
            .photos
            .iter()
            .position(|p| p.id == photo_id)
            .ok_or_else(|| DomainError::PhotoNotFound(photo_id.to_string()))?;
        let removed = self.photos.remove(index);

        if self.cover_photo.as_deref() == Some(removed.path.as_str()) {
            self.cover_photo = self.photos.first().map(|p| p.path.clone());
        }
        Ok(removed)
    }

    /// Reorder photos; `photo_ids` must be a permutation of the current ids
    pub fn reorder_photos(&mut self, photo_ids: &[String]) -> Result<(), DomainError> {
        let requested: HashSet<&str> = photo_ids.iter().map(String::as_str).collect();
        let is_permutation = photo_ids.len() == self.photos.len()
            && requested.len() == photo_ids.len()
            && self.photos.iter().all(|p| requested.contains(p.id.as_str()));
        if !is_permutation {
            return Err(DomainError::validation(
                "Photo order must list every photo of the album exactly once",
            ));
        }

        let mut remaining = std::mem::take(&mut self.photos);
        for id in photo_ids {
            if let Some(pos) = remaining.iter().position(|p| &p.id == id) {
                self.photos.push(remaining.swap_remove(pos));
            }
        }
        Ok(())
    }

    pub fn set_cover(&mut self, photo_id: &str) -> Result<(), DomainError> {
        let path = self
            .photo(photo_id)
            .map(|p| p.path.clone())
            .ok_or_else(|| DomainError::PhotoNotFound(photo_id.to_string()))?;
        self.cover_photo = Some(path);
        Ok(())
    }
}

impl Record for GalleryAlbum {
    type Status = ContentStatus;
    const KIND: EntityKind = EntityKind::GalleryAlbum;

    fn id(&self) -> &RecordId {
        &self.id
    }

    fn set_id(&mut self, id: RecordId) {
        self.id = id;
    }

    fn status(&self) -> ContentStatus {
        self.status
    }

    fn set_status(&mut self, status: ContentStatus) {
        self.status = status;
    }

    fn set_updated_at(&mut self, at: DateTime<Utc>) {
        self.updated_at = at;
    }

    fn set_archived_at(&mut self, at: Option<DateTime<Utc>>) {
        self.archived_at = at;
    }

    fn search_fields(&self) -> Vec<&str> {
        vec![&self.title, &self.description]
    }

    fn default_order(a: &Self, b: &Self) -> Ordering {
        newest_first(a.date, a.created_at, b.date, b.created_at)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn album() -> GalleryAlbum {
        GalleryAlbum::create(
            NewGalleryAlbum {
                title: "Holi 2024".into(),
                ..NewGalleryAlbum::default()
            },
            "a@b.c",
            Utc::now(),
        )
        .unwrap()
    }

    fn photo(name: &str) -> Photo {
        let stored = StoredFile {
            path: format!("gallery/GAL-20240101000000/{name}"),
            stored_name: name.to_string(),
            size: 10,
        };
        Photo::new(&stored, name, Utc::now())
    }

    fn ids(album: &GalleryAlbum) -> Vec<String> {
        album.photos.iter().map(|p| p.id.clone()).collect()
    }

    #[test]
    fn test_first_photo_becomes_cover() {
        let mut album = album();
        let first = photo("a.jpg");
        album.add_photo(first.clone());
        album.add_photo(photo("b.jpg"));
        assert_eq!(album.cover_photo.as_deref(), Some(first.path.as_str()));
    }

    #[test]
    fn test_removing_cover_promotes_next_photo() {
        let mut album = album();
        let (a, b) = (photo("a.jpg"), photo("b.jpg"));
        album.add_photo(a.clone());
        album.add_photo(b.clone());

        let removed = album.remove_photo(&a.id).unwrap();
        assert_eq!(removed.path, a.path);
        assert_eq!(album.cover_photo.as_deref(), Some(b.path.as_str()));

        album.remove_photo(&b.id).unwrap();
        assert!(album.cover_photo.is_none());
        assert!(album.remove_photo(&b.id).unwrap_err().is_not_found());
    }

    #[test]
    fn test_reorder_requires_permutation() {
        let mut album = album();
        for name in ["a.jpg", "b.jpg", "c.jpg"] {
            album.add_photo(photo(name));
        }
        let mut order = ids(&album);
        order.reverse();
        album.reorder_photos(&order).unwrap();
        assert_eq!(ids(&album), order);

        let partial = order[..2].to_vec();
        assert!(album.reorder_photos(&partial).unwrap_err().is_validation());

        let duplicated = vec![order[0].clone(), order[0].clone(), order[1].clone()];
        assert!(album.reorder_photos(&duplicated).is_err());
        assert_eq!(ids(&album), order);
    }

    #[test]
    fn test_set_cover_unknown_photo() {
        let mut album = album();
        assert!(album.set_cover("PHO-missing").unwrap_err().is_not_found());
    }
}

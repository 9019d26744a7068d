//! Read-only guest directory backed by the static guest dataset.

use std::{
    fs,
    io::{self, ErrorKind},
    path::{Path, PathBuf},
};

use indexmap::IndexMap;
use thiserror::Error;
use tracing::{info, warn};

use crate::dao::models::{EventDetailsEntity, GuestDataEntity, GuestEntity};

/// Failures raised while loading the guest dataset at start-up.
#[derive(Debug, Error)]
pub enum DirectoryError {
    /// The dataset file exists but could not be read.
    #[error("failed to read guest dataset `{}`", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    /// The dataset is not valid JSON or misses required fields.
    #[error("failed to parse guest dataset `{}`", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    /// A guest was allocated zero seats.
    #[error("guest `{id}` must be allocated at least one seat")]
    NoSeats { id: String },
}

/// Invitees in dataset order, indexed by id.
#[derive(Debug, Clone, Default)]
pub struct GuestDirectory {
    guests: IndexMap<String, GuestEntity>,
    event_details: EventDetailsEntity,
}

impl GuestDirectory {
    /// Build a directory from an already parsed dataset.
    ///
    /// Duplicate ids keep their first occurrence.
    pub fn new(data: GuestDataEntity) -> Result<Self, DirectoryError> {
        let mut guests = IndexMap::with_capacity(data.guests.len());
        for guest in data.guests {
            if guest.seats_allocated == 0 {
                return Err(DirectoryError::NoSeats { id: guest.id });
            }
            if guests.contains_key(&guest.id) {
                warn!(id = %guest.id, "duplicate guest id in dataset; keeping the first entry");
                continue;
            }
            guests.insert(guest.id.clone(), guest);
        }

        Ok(Self {
            guests,
            event_details: data.event_details,
        })
    }

    /// Load the dataset from disk. A missing file yields an empty directory.
    pub fn load(path: &Path) -> Result<Self, DirectoryError> {
        let contents = match fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                warn!(
                    path = %path.display(),
                    "guest dataset not found; starting with an empty guest list"
                );
                return Ok(Self::default());
            }
            Err(source) => {
                return Err(DirectoryError::Read {
                    path: path.to_path_buf(),
                    source,
                });
            }
        };

        let data: GuestDataEntity =
            serde_json::from_str(&contents).map_err(|source| DirectoryError::Parse {
                path: path.to_path_buf(),
                source,
            })?;
        let directory = Self::new(data)?;
        info!(path = %path.display(), count = directory.len(), "loaded guest dataset");
        Ok(directory)
    }

    /// Every invitee in dataset order.
    pub fn list(&self) -> impl ExactSizeIterator<Item = &GuestEntity> {
        self.guests.values()
    }

    /// Case-insensitive substring search on guest names.
    ///
    /// A blank query matches nobody rather than everybody.
    pub fn search(&self, query: &str) -> Vec<&GuestEntity> {
        let needle = query.trim().to_lowercase();
        if needle.is_empty() {
            return Vec::new();
        }

        self.guests
            .values()
            .filter(|guest| guest.name.to_lowercase().contains(&needle))
            .collect()
    }

    /// Guest with exactly this id.
    pub fn get_by_id(&self, id: &str) -> Option<&GuestEntity> {
        self.guests.get(id)
    }

    pub fn event_details(&self) -> &EventDetailsEntity {
        &self.event_details
    }

    pub fn len(&self) -> usize {
        self.guests.len()
    }

    pub fn is_empty(&self) -> bool {
        self.guests.is_empty()
    }
}

#[cfg(test)]
pub(crate) fn guest(id: &str, name: &str, seats_allocated: u32) -> GuestEntity {
    GuestEntity {
        id: id.into(),
        name: name.into(),
        seats_allocated,
    }
}

#[cfg(test)]
pub(crate) fn directory_of(guests: Vec<GuestEntity>) -> GuestDirectory {
    GuestDirectory::new(GuestDataEntity {
        guests,
        event_details: EventDetailsEntity::default(),
    })
    .unwrap()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> GuestDirectory {
        directory_of(vec![
            guest("g1", "Alice Martin", 3),
            guest("g2", "Bob Alison", 1),
            guest("g3", "Chloé Durand", 2),
        ])
    }

    #[test]
    fn search_is_case_insensitive_substring() {
        let directory = sample();
        let ids: Vec<_> = directory
            .search("ALI")
            .into_iter()
            .map(|g| g.id.as_str())
            .collect();
        assert_eq!(ids, vec!["g1", "g2"]);
    }

    #[test]
    fn every_guest_is_found_by_a_substring_of_its_name() {
        let directory = sample();
        for guest in directory.list() {
            let fragment: String = guest.name.chars().skip(1).take(3).collect();
            assert!(
                directory.search(&fragment).iter().any(|g| g.id == guest.id),
                "{fragment} should match {}",
                guest.name
            );
        }
    }

    #[test]
    fn blank_query_matches_nobody() {
        let directory = sample();
        assert!(directory.search("").is_empty());
        assert!(directory.search("   \t").is_empty());
    }

    #[test]
    fn query_is_trimmed() {
        assert_eq!(sample().search("  durand ").len(), 1);
    }

    #[test]
    fn get_by_id_and_order() {
        let directory = sample();
        assert_eq!(directory.get_by_id("g2").unwrap().name, "Bob Alison");
        assert!(directory.get_by_id("nope").is_none());
        let order: Vec<_> = directory.list().map(|g| g.id.as_str()).collect();
        assert_eq!(order, vec!["g1", "g2", "g3"]);
    }

    #[test]
    fn zero_seat_guest_is_rejected() {
        let err = GuestDirectory::new(GuestDataEntity {
            guests: vec![guest("g9", "Nobody", 0)],
            event_details: EventDetailsEntity::default(),
        })
        .unwrap_err();
        assert!(matches!(err, DirectoryError::NoSeats { id } if id == "g9"));
    }

    #[test]
    fn load_reads_camel_case_dataset() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("guests.json");
        fs::write(
            &path,
            r#"{
                "guests": [{"id": "g1", "name": "Alice", "seatsAllocated": 3}],
                "eventDetails": {
                    "coupleName": "A & B", "date": "2026-06-20", "time": "15:00",
                    "venue": "Chapel", "address": "1 Main St", "rsvpDeadline": "2026-05-01"
                }
            }"#,
        )
        .unwrap();

        let directory = GuestDirectory::load(&path).unwrap();
        assert_eq!(directory.len(), 1);
        assert_eq!(directory.get_by_id("g1").unwrap().seats_allocated, 3);
        assert_eq!(directory.event_details().venue, "Chapel");
        assert!(directory.event_details().reception_venue.is_none());
    }

    #[test]
    fn missing_dataset_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let directory = GuestDirectory::load(&dir.path().join("missing.json")).unwrap();
        assert!(directory.is_empty());
    }
}

//! Common types used across the client

use serde::{Deserialize, Serialize};

use crate::validation::{mime_type_for, validate_coordinates};

/// GPS coordinates
///
/// Latitude and longitude always travel together, so a request can never
/// carry one without the other.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Check the pair is a real position on the globe
    pub fn validate(&self) -> Result<(), &'static str> {
        validate_coordinates(self.latitude, self.longitude)
    }
}

/// An image picked by the user, held in memory until the upload resolves
#[derive(Clone, PartialEq, Eq)]
pub struct ImageFile {
    pub file_name: String,
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

impl ImageFile {
    /// Wrap raw bytes, deriving the MIME type from the file name
    pub fn new(file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        let file_name = file_name.into();
        let mime_type = mime_type_for(&file_name).to_string();
        Self {
            file_name,
            mime_type,
            bytes,
        }
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

// Image payloads can be megabytes; keep them out of debug logs.
impl std::fmt::Debug for ImageFile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ImageFile")
            .field("file_name", &self.file_name)
            .field("mime_type", &self.mime_type)
            .field("len", &self.bytes.len())
            .finish()
    }
}

/// One upload to the analysis service, built fresh on every submit
#[derive(Debug, Clone)]
pub struct UploadRequest {
    pub image: ImageFile,
    pub location: Option<Coordinates>,
}

impl UploadRequest {
    pub fn new(image: ImageFile, location: Option<Coordinates>) -> Self {
        Self { image, location }
    }

    /// Text form fields sent next to the `file` part
    ///
    /// Empty when no location is known; otherwise exactly `latitude` and
    /// `longitude` as decimal strings.
    pub fn form_fields(&self) -> Vec<(&'static str, String)> {
        match self.location {
            Some(coords) => vec![
                ("latitude", coords.latitude.to_string()),
                ("longitude", coords.longitude.to_string()),
            ],
            None => Vec::new(),
        }
    }
}

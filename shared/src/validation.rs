//! Validation utilities for the Fashion Advisor client
//!
//! The file picker only offers images; nothing here refuses an upload, it
//! just describes what the picker would accept.

// ============================================================================
// Image Selection
// ============================================================================

const IMAGE_TYPES: &[(&str, &str)] = &[
    ("jpg", "image/jpeg"),
    ("jpeg", "image/jpeg"),
    ("png", "image/png"),
    ("gif", "image/gif"),
    ("webp", "image/webp"),
    ("bmp", "image/bmp"),
    ("heic", "image/heic"),
    ("heif", "image/heif"),
    ("tif", "image/tiff"),
    ("tiff", "image/tiff"),
    ("avif", "image/avif"),
];

/// Fallback MIME type for anything the picker would not recognise
pub const OCTET_STREAM: &str = "application/octet-stream";

/// Map a file name to its MIME type by extension (case-insensitive)
pub fn mime_type_for(file_name: &str) -> &'static str {
    let extension = match file_name.rsplit_once('.') {
        Some((_, ext)) => ext.to_ascii_lowercase(),
        None => return OCTET_STREAM,
    };

    IMAGE_TYPES
        .iter()
        .find(|(ext, _)| *ext == extension)
        .map(|(_, mime)| *mime)
        .unwrap_or(OCTET_STREAM)
}

/// Whether the picker's `image/*` filter would offer this file
pub fn is_image_file(file_name: &str) -> bool {
    mime_type_for(file_name).starts_with("image/")
}

// ============================================================================
// Location
// ============================================================================

/// Validate a latitude/longitude pair
pub fn validate_coordinates(latitude: f64, longitude: f64) -> Result<(), &'static str> {
    if !latitude.is_finite() || !longitude.is_finite() {
        return Err("Coordinates must be finite numbers");
    }
    if !(-90.0..=90.0).contains(&latitude) {
        return Err("Latitude must be between -90 and 90");
    }
    if !(-180.0..=180.0).contains(&longitude) {
        return Err("Longitude must be between -180 and 180");
    }
    Ok(())
}

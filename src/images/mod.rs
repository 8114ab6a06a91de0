//! Image variant resolution
//!
//! Stored images are referenced by the URL of their original style, e.g.
//! `https://static.example.com/anime/poster_images/000/000/001/original/poster.jpg?1400000000`.
//! Other styles live at the same path with the style segment swapped.

use tracing::debug;
use url::Url;

/// Resolves an image reference to the URL of a named variant
pub trait ImageResolver: Send + Sync {
    fn resolve_variant(&self, image: &str, variant: &str) -> String;
}

/// Resolver that swaps the style path segment of an attachment URL
#[derive(Debug, Clone)]
pub struct StyleSegmentResolver {
    original_style: String,
}

impl StyleSegmentResolver {
    pub fn new(original_style: impl Into<String>) -> Self {
        Self {
            original_style: original_style.into(),
        }
    }

    fn swap_segments<'a, I>(&self, segments: I, variant: &str) -> Option<Vec<String>>
    where
        I: Iterator<Item = &'a str>,
    {
        let mut segments: Vec<String> = segments.map(str::to_string).collect();
        // The style sits next to the file name, so search from the end
        let position = segments.iter().rposition(|s| *s == self.original_style)?;
        segments[position] = variant.to_string();
        Some(segments)
    }

    fn resolve_absolute(&self, mut url: Url, variant: &str) -> Option<String> {
        // Work on the encoded path so escapes like %20 survive untouched
        if url.cannot_be_a_base() {
            return None;
        }
        let path = self.swap_segments(url.path().split('/'), variant)?.join("/");
        url.set_path(&path);
        Some(url.to_string())
    }

    fn resolve_relative(&self, image: &str, variant: &str) -> Option<String> {
        let (path, suffix) = match image.find(|c: char| c == '?' || c == '#') {
            Some(index) => image.split_at(index),
            None => (image, ""),
        };
        let segments = self.swap_segments(path.split('/'), variant)?;
        Some(format!("{}{}", segments.join("/"), suffix))
    }
}

impl Default for StyleSegmentResolver {
    fn default() -> Self {
        Self::new("original")
    }
}

impl ImageResolver for StyleSegmentResolver {
    fn resolve_variant(&self, image: &str, variant: &str) -> String {
        let resolved = match Url::parse(image) {
            Ok(url) => self.resolve_absolute(url, variant),
            Err(_) => self.resolve_relative(image, variant),
        };

        resolved.unwrap_or_else(|| {
            debug!("No {} style segment in image {}", self.original_style, image);
            image.to_string()
        })
    }
}

//! File filtering logic for directory discovery.

use std::path::Path;

/// Filters directory entries to the supported image extensions
pub struct ImageFilter {
    /// File extensions to include (lowercase)
    extensions: std::collections::HashSet<String>,
}

impl ImageFilter {
    /// Create a new filter with the default supported extensions
    pub fn new() -> Self {
        Self {
            extensions: vec![
                "jpg".to_string(),
                "jpeg".to_string(),
                "png".to_string(),
                "bmp".to_string(),
            ]
            .into_iter()
            .collect(),
        }
    }

    /// Override the list of extensions to accept
    pub fn with_extensions(mut self, extensions: Vec<String>) -> Self {
        self.extensions = extensions.into_iter().map(|e| e.to_lowercase()).collect();
        self
    }

    /// Check if a file should be included
    ///
    /// The extension check is case-insensitive; the original filename
    /// (including its case) is preserved by the caller.
    pub fn should_include(&self, path: &Path) -> bool {
        if let Some(ext) = path.extension().and_then(|e| e.to_str()) {
            let ext_lower = ext.to_lowercase();
            self.extensions.contains(&ext_lower)
        } else {
            false
        }
    }
}

impl Default for ImageFilter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filter_includes_jpeg() {
        let filter = ImageFilter::new();
        assert!(filter.should_include(Path::new("/photos/image.jpg")));
        assert!(filter.should_include(Path::new("/photos/image.jpeg")));
    }

    #[test]
    fn filter_is_case_insensitive() {
        let filter = ImageFilter::new();
        assert!(filter.should_include(Path::new("/photos/IMAGE.JPG")));
        assert!(filter.should_include(Path::new("/photos/b.PNG")));
        assert!(filter.should_include(Path::new("/photos/scan.Bmp")));
    }

    #[test]
    fn filter_excludes_non_images() {
        let filter = ImageFilter::new();
        assert!(!filter.should_include(Path::new("/photos/notes.txt")));
        assert!(!filter.should_include(Path::new("/photos/video.mp4")));
        assert!(!filter.should_include(Path::new("/photos/raw.tiff")));
    }

    #[test]
    fn filter_handles_no_extension() {
        let filter = ImageFilter::new();
        assert!(!filter.should_include(Path::new("/photos/no_extension")));
    }

    #[test]
    fn filter_extensions_can_be_overridden() {
        let filter = ImageFilter::new().with_extensions(vec!["WEBP".to_string()]);
        assert!(filter.should_include(Path::new("/photos/a.webp")));
        assert!(!filter.should_include(Path::new("/photos/a.jpg")));
    }
}

use serde::{Deserialize, Serialize};

/// Aggregate descriptors for a corpus of trending YouTube thumbnails,
/// produced by an offline analysis job. The service only ever reads these;
/// a missing record means the pipeline runs without trend data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendStats {
    /// Mean pixel brightness across the corpus, on a 0-255 scale.
    pub brightness_avg: f64,
    /// Mean pixel-level contrast across the corpus.
    pub contrast_avg: f64,
    /// Most common color across the corpus, as RGB components.
    pub dominant_color: [u8; 3],
    /// Whether trending thumbnails tend to carry a text overlay.
    pub text_usage: TextUsage,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TextUsage {
    Yes,
    No,
}

impl TrendStats {
    /// Color for the title overlay: the component-wise inverse of the
    /// dominant color, so the text stands out against a background that
    /// follows the trend.
    #[must_use]
    pub fn text_color(&self) -> [u8; 3] {
        let [r, g, b] = self.dominant_color;
        [255 - r, 255 - g, 255 - b]
    }
}

// Aspect ratio → output dimensions lookup

use phf::phf_map;

/// Bucket used when the client sends nothing or something unknown
pub const DEFAULT_ASPECT_RATIO: &str = "1:1";

/// Static aspect ratio table, resolved at compile time
static ASPECT_RATIOS: phf::Map<&'static str, (u32, u32)> = phf_map! {
    "1:1" => (1024, 1024),
    "16:9" => (1024, 576),
    "9:16" => (576, 1024),
    "4:3" => (1024, 768),
};

/// A resolved aspect ratio bucket and its pixel size
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AspectRatio {
    pub label: &'static str,
    pub width: u32,
    pub height: u32,
}

impl AspectRatio {
    /// Resolve a client-supplied ratio. Total: unknown or missing values map to 1:1.
    pub fn resolve(input: Option<&str>) -> Self {
        let trimmed = input.map(str::trim).unwrap_or(DEFAULT_ASPECT_RATIO);

        match ASPECT_RATIOS.get_entry(trimmed) {
            Some((&label, &(width, height))) => Self { label, width, height },
            None => Self::square(),
        }
    }

    fn square() -> Self {
        Self {
            label: DEFAULT_ASPECT_RATIO,
            width: 1024,
            height: 1024,
        }
    }

    /// All known bucket labels
    pub fn known_labels() -> impl Iterator<Item = &'static str> {
        ASPECT_RATIOS.keys().copied()
    }
}

impl Default for AspectRatio {
    fn default() -> Self {
        Self::square()
    }
}

use crate::core::sketch::Sketch;

/// A named sample: exactly one sketch plus display metadata
#[derive(Debug, Clone)]
pub struct SampleRecord {
    /// Path the record was loaded from
    pub location: String,

    /// Filename recorded inside the signature (falls back to `location`)
    pub filename: String,

    /// Human-readable name (may be empty)
    pub name: String,

    /// Content checksum of `sketch`
    pub md5: String,

    pub sketch: Sketch,
}

impl SampleRecord {
    pub fn new(location: impl Into<String>, name: impl Into<String>, sketch: Sketch) -> Self {
        let location = location.into();
        let md5 = sketch.md5sum();

        Self {
            filename: location.clone(),
            location,
            name: name.into(),
            md5,
            sketch,
        }
    }

    #[must_use]
    pub fn with_filename(mut self, filename: impl Into<String>) -> Self {
        self.filename = filename.into();
        self
    }

    /// Copy of this record restricted to a coarser scale factor.
    ///
    /// The checksum follows the new sketch; `self` is left untouched.
    ///
    /// # Errors
    ///
    /// Returns the sourmash error if the sketch cannot be downsampled.
    pub fn downsampled(&self, scaled: u64) -> Result<Self, sourmash::Error> {
        if scaled <= self.sketch.scaled() {
            return Ok(self.clone());
        }

        let sketch = self.sketch.downsample(scaled)?;
        Ok(Self {
            location: self.location.clone(),
            filename: self.filename.clone(),
            name: self.name.clone(),
            md5: sketch.md5sum(),
            sketch,
        })
    }

    /// Name for display, cut to `max_len` characters with a trailing `...`
    pub fn display_name(&self, max_len: usize) -> String {
        display_name(&self.name, &self.filename, &self.md5, max_len)
    }
}

/// Pick the name to show for a sample and truncate it to `max_len` characters.
///
/// Falls back to the filename, then to the first 8 characters of the md5.
pub fn display_name(name: &str, filename: &str, md5: &str, max_len: usize) -> String {
    let full = if !name.is_empty() {
        name
    } else if !filename.is_empty() {
        filename
    } else {
        md5.get(..8).unwrap_or(md5)
    };

    if full.chars().count() <= max_len {
        return full.to_string();
    }

    let kept: String = full.chars().take(max_len.saturating_sub(3)).collect();
    format!("{kept}...")
}

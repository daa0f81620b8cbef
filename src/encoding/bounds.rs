use serde::{Serialize, Deserialize};

/// The two scalar endpoints used for both pixel scaling and one-hot targets.
///
/// `activated` marks the lit pixel / the true class, `deactivated` everything
/// else. The pair may be inverted (`activated < deactivated`); pixel scaling
/// still lands inside `[min, max]` of the two.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub activated: f64,
    pub deactivated: f64,
}

impl Bounds {
    /// A = 1.0, D = 0.0.
    pub const DEFAULT: Bounds = Bounds { activated: 1.0, deactivated: 0.0 };

    pub const fn new(activated: f64, deactivated: f64) -> Bounds {
        Bounds { activated, deactivated }
    }

    /// Swaps the activated and deactivated endpoints.
    pub fn inverted(self) -> Bounds {
        Bounds { activated: self.deactivated, deactivated: self.activated }
    }

    /// Width of the output interval, `|A - D|`.
    pub fn span(&self) -> f64 {
        (self.activated - self.deactivated).abs()
    }

    /// Lower end of the output interval, `min(A, D)`.
    pub fn low(&self) -> f64 {
        self.activated.min(self.deactivated)
    }

    /// Maps a pixel intensity onto `[low, low + span]`:
    /// `(v / 255) * |A - D| + min(A, D)`.
    pub fn scale(&self, intensity: u8) -> f64 {
        (intensity as f64 / 255.0) * self.span() + self.low()
    }

    /// Serializes the bounds to a pretty-printed JSON file.
    pub fn save_json(&self, path: &str) -> crate::Result<()> {
        let file = std::fs::File::create(path)?;
        let writer = std::io::BufWriter::new(file);
        serde_json::to_writer_pretty(writer, self)?;
        Ok(())
    }

    /// Deserializes bounds from a JSON file previously written by `save_json`.
    pub fn load_json(path: &str) -> crate::Result<Bounds> {
        let file = std::fs::File::open(path)?;
        let reader = std::io::BufReader::new(file);
        Ok(serde_json::from_reader(reader)?)
    }
}

impl Default for Bounds {
    fn default() -> Self {
        Bounds::DEFAULT
    }
}

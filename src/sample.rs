use serde::Serialize;

/// One raw RGBC reading, taken at most once per reporting cycle and never
/// persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorSample {
    pub red: u16,
    pub green: u16,
    pub blue: u16,
    pub clear: u16,
}

impl ColorSample {
    /// Status-display rendering of the sample.
    pub fn display_lines(&self) -> Vec<String> {
        vec![format!("R:{} G:{} B:{}", self.red, self.green, self.blue)]
    }
}

/// Wire payload for the measurement endpoint.
///
/// The clear channel is read from the sensor but deliberately never
/// transmitted; the backend accepts exactly red/green/blue.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct ColorReport {
    pub red: u16,
    pub green: u16,
    pub blue: u16,
}

impl From<&ColorSample> for ColorReport {
    fn from(sample: &ColorSample) -> Self {
        Self {
            red: sample.red,
            green: sample.green,
            blue: sample.blue,
        }
    }
}

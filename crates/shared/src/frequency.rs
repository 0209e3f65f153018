//! Human-readable frequencies.

/// `121500000` → `"121.500"` (MHz with three kHz digits).
pub fn format_frequency(frequency_hz: u32) -> String {
    let khz = frequency_hz / 1_000;
    format!("{}.{:03}", khz / 1_000, khz % 1_000)
}

/// Short codes for common long-form pitch labels. Display only: grouping
/// always uses the label exactly as recorded.
const ABBREVIATIONS: &[(&str, &str)] = &[
    ("Fastball", "FB"),
    ("Four-Seam", "FB"),
    ("TwoSeamFastball", "2S"),
    ("Two-Seam", "2S"),
    ("2-Seam", "2S"),
    ("Cutter", "CT"),
    ("Curveball", "CB"),
    ("Slider", "SL"),
    ("Changeup", "CH"),
    ("Splitter", "SP"),
];

pub fn abbreviate(pitch_type: &str) -> &str {
    ABBREVIATIONS
        .iter()
        .find(|(label, _)| *label == pitch_type)
        .map(|(_, code)| *code)
        .unwrap_or(pitch_type)
}

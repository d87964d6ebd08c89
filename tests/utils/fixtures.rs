// ============================================================================
// Device export fixtures
// ============================================================================

pub const EXPORT_HEADER: &str = "Pitch Type\tVelocity\tTotal Spin\tVB (spin)\tHB (trajectory)\tSpin Efficiency (release)\tGyro Degree (deg)\tSpin Direction\tRelease Angle\tHorizontal Angle\tRelease Height\tRelease Side";

/// Early-season bullpen: fastballs and sliders
pub fn january_export() -> String {
    [
        EXPORT_HEADER,
        "Fastball\t88.0\t2150\t15.2\t8.1\t91.0\t12.0\t1:00\t-1.5\t1.2\t6.10\t-1.90",
        "Fastball\t89.0\t2190\t15.8\t7.9\t90.0\t14.0\t1:00\t-1.4\t1.3\t6.12\t-1.92",
        "Slider\t80.0\t2400\t2.1\t-4.2\t35.0\t60.0\t9:00\t-0.8\t2.0\t5.95\t-2.05",
    ]
    .join("\n")
}

/// Mid-season bullpen, fastballs only
pub fn late_january_export() -> String {
    [
        EXPORT_HEADER,
        "Fastball\t90.0\t2210\t16.0\t7.5\t92.0\t11.0\t12:45\t-1.5\t1.2\t6.05\t-1.88",
    ]
    .join("\n")
}

/// Latest bullpen: harder fastballs and a changeup with no spin direction
pub fn february_export() -> String {
    [
        EXPORT_HEADER,
        "Fastball\t91.0\t2250\t16.5\t7.0\t94.0\t10.0\t12:30\t-1.6\t1.1\t5.98\t-1.85",
        "Fastball\t93.0\t2270\t16.9\t7.2\t95.0\t9.0\t12:30\t-1.5\t1.0\t6.00\t-1.83",
        "Changeup\t83.0\t1750\t9.0\t12.5\t88.0\t20.0\t\t-1.9\t1.5\t6.02\t-1.95",
    ]
    .join("\n")
}

/// Comma-separated export with quoted fields, stray blank lines and a short row
pub fn messy_csv_export() -> String {
    "\n\"Pitch Type\",\"Velocity\",\"Spin Direction\"\n\n\"Curveball\",\"76.5\",\"7:00\"\n  \n\"Curveball\",\"77.5\"\n"
        .to_string()
}

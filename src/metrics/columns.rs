use strum::IntoEnumIterator;
use strum_macros::EnumIter;

/// Header of the column that groups rows into pitch types.
pub const PITCH_TYPE_COLUMN: &str = "Pitch Type";

/// Unit tag used for clock-valued metrics.
pub const CLOCK_UNIT: &str = "clock";

/// Columns recognized in a device export, in output order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter)]
pub enum MetricKind {
    Velocity,
    TotalSpin,
    VerticalBreak,
    HorizontalBreak,
    SpinEfficiency,
    GyroDegree,
    SpinDirection,
    ReleaseAngle,
    ReleaseHeight,
    HorizontalAngle,
    ReleaseSide,
}

impl MetricKind {
    /// Export header for the column; also used as the stored metric name.
    pub fn column(&self) -> &'static str {
        match self {
            MetricKind::Velocity => "Velocity",
            MetricKind::TotalSpin => "Total Spin",
            MetricKind::VerticalBreak => "VB (spin)",
            MetricKind::HorizontalBreak => "HB (trajectory)",
            MetricKind::SpinEfficiency => "Spin Efficiency (release)",
            MetricKind::GyroDegree => "Gyro Degree (deg)",
            MetricKind::SpinDirection => "Spin Direction",
            MetricKind::ReleaseAngle => "Release Angle",
            MetricKind::ReleaseHeight => "Release Height",
            MetricKind::HorizontalAngle => "Horizontal Angle",
            MetricKind::ReleaseSide => "Release Side",
        }
    }

    pub fn unit(&self) -> &'static str {
        match self {
            MetricKind::Velocity => "mph",
            MetricKind::TotalSpin => "rpm",
            MetricKind::VerticalBreak | MetricKind::HorizontalBreak => "in",
            MetricKind::SpinEfficiency => "%",
            MetricKind::SpinDirection => CLOCK_UNIT,
            MetricKind::GyroDegree | MetricKind::ReleaseAngle | MetricKind::HorizontalAngle => {
                "deg"
            }
            MetricKind::ReleaseHeight | MetricKind::ReleaseSide => "ft",
        }
    }

    /// Decimal places kept when a value is stored.
    pub fn precision(&self) -> u32 {
        match self {
            MetricKind::ReleaseHeight | MetricKind::ReleaseSide => 2,
            _ => 1,
        }
    }

    /// Name of the companion max metric, for velocity-like columns.
    pub fn max_metric(&self) -> Option<&'static str> {
        match self {
            MetricKind::Velocity => Some("Max Velocity"),
            MetricKind::TotalSpin => Some("Max Total Spin"),
            _ => None,
        }
    }

    pub fn is_clock(&self) -> bool {
        matches!(self, MetricKind::SpinDirection)
    }

    /// Looks up the column that produces `metric_name`, including max companions.
    pub fn for_metric(metric_name: &str) -> Option<MetricKind> {
        MetricKind::iter()
            .find(|kind| kind.column() == metric_name || kind.max_metric() == Some(metric_name))
    }
}

/// Every metric name the aggregator can emit, in output order.
pub fn metric_names() -> Vec<&'static str> {
    MetricKind::iter()
        .flat_map(|kind| std::iter::once(kind.column()).chain(kind.max_metric()))
        .collect()
}

/// True for the companion max metrics such as "Max Velocity".
pub fn is_max_metric(metric_name: &str) -> bool {
    MetricKind::iter().any(|kind| kind.max_metric() == Some(metric_name))
}

/// Whether an increase in the metric is an improvement. Metrics not listed
/// here (spin direction, unknown names) carry no polarity.
pub const POLARITY: &[(&str, bool)] = &[
    ("Velocity", true),
    ("Max Velocity", true),
    ("Total Spin", true),
    ("Max Total Spin", true),
    ("VB (spin)", true),
    ("HB (trajectory)", true),
    ("Spin Efficiency (release)", true),
    ("Gyro Degree (deg)", false),
    ("Release Angle", false),
    ("Horizontal Angle", false),
    ("Release Height", false),
    ("Release Side", false),
];

pub fn higher_is_better(metric_name: &str) -> Option<bool> {
    POLARITY
        .iter()
        .find(|(name, _)| *name == metric_name)
        .map(|(_, polarity)| *polarity)
}

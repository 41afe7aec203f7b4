use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::ChartError;

/// Data series that own a line layer and a legend layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SeriesKey {
    Budgeted,
    Actual,
    Inflation,
    Total,
    Violent,
    Property,
}

impl SeriesKey {
    pub const ALL: [Self; 6] = [
        Self::Budgeted,
        Self::Actual,
        Self::Inflation,
        Self::Total,
        Self::Violent,
        Self::Property,
    ];

    #[must_use]
    pub const fn slug(self) -> &'static str {
        match self {
            Self::Budgeted => "budgeted",
            Self::Actual => "actual",
            Self::Inflation => "inflation",
            Self::Total => "total",
            Self::Violent => "violent",
            Self::Property => "property",
        }
    }

    fn from_slug(slug: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|key| key.slug() == slug)
    }
}

impl Serialize for SeriesKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.slug())
    }
}

impl<'de> Deserialize<'de> for SeriesKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let slug = String::deserialize(deserializer)?;
        Self::from_slug(&slug)
            .ok_or_else(|| serde::de::Error::custom(format!("unknown series `{slug}`")))
    }
}

/// Name of an independently opacity-controlled part of a chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum LayerId {
    Grid,
    XAxis,
    YAxis,
    ShadedArea,
    Annotation,
    Line(SeriesKey),
    Legend(SeriesKey),
}

impl fmt::Display for LayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Grid => f.write_str("grid"),
            Self::XAxis => f.write_str("x-axis"),
            Self::YAxis => f.write_str("y-axis"),
            Self::ShadedArea => f.write_str("shaded-area"),
            Self::Annotation => f.write_str("annotation"),
            Self::Line(series) => write!(f, "line-{}", series.slug()),
            Self::Legend(series) => write!(f, "legend-{}", series.slug()),
        }
    }
}

impl FromStr for LayerId {
    type Err = ChartError;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        let layer = match name {
            "grid" => Some(Self::Grid),
            "x-axis" => Some(Self::XAxis),
            "y-axis" => Some(Self::YAxis),
            "shaded-area" => Some(Self::ShadedArea),
            "annotation" => Some(Self::Annotation),
            _ => {
                if let Some(slug) = name.strip_prefix("line-") {
                    SeriesKey::from_slug(slug).map(Self::Line)
                } else if let Some(slug) = name.strip_prefix("legend-") {
                    SeriesKey::from_slug(slug).map(Self::Legend)
                } else {
                    None
                }
            }
        };
        layer.ok_or_else(|| ChartError::InvalidData(format!("unknown layer `{name}`")))
    }
}

impl Serialize for LayerId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for LayerId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let name = String::deserialize(deserializer)?;
        name.parse().map_err(serde::de::Error::custom)
    }
}

/// Back-to-front draw order for a chart's layers.
///
/// Only layers present in `series` appear; the order is grid, axes, band,
/// annotation, series lines, legend entries.
#[must_use]
pub fn canonical_layer_stack(series: &[SeriesKey], with_band: bool) -> Vec<LayerId> {
    let mut stack = vec![LayerId::Grid, LayerId::XAxis, LayerId::YAxis];
    if with_band {
        stack.push(LayerId::ShadedArea);
        stack.push(LayerId::Annotation);
    }
    stack.extend(series.iter().copied().map(LayerId::Line));
    stack.extend(series.iter().copied().map(LayerId::Legend));
    stack
}

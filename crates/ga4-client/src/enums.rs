//! Enumeration values accepted by the Admin and Data APIs.
//!
//! Parsing is by exact API name (`"EVENT"`, `"CURRENCY"`, ...). Unknown names
//! fail with [`ClientError::InvalidEnum`] before any request is built.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::error::ClientError;

/// Declares an API enum with its wire names, `FromStr`, `Display` and `Serialize`.
macro_rules! api_enum {
    (
        $(#[$meta:meta])*
        $name:ident, $kind:literal {
            $($variant:ident => $wire:literal),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum $name {
            $($variant),+
        }

        impl $name {
            pub const NAMES: &'static [&'static str] = &[$($wire),+];

            pub fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $wire),+
                }
            }
        }

        impl FromStr for $name {
            type Err = ClientError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($wire => Ok(Self::$variant),)+
                    _ => Err(ClientError::invalid_enum($kind, s, Self::NAMES)),
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl Serialize for $name {
            fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.serialize_str(self.as_str())
            }
        }
    };
}

api_enum! {
    /// Scope of a custom dimension.
    DimensionScope, "dimension scope" {
        Event => "EVENT",
        User => "USER",
        Item => "ITEM",
    }
}

api_enum! {
    /// Scope of a custom metric.
    MetricScope, "metric scope" {
        Event => "EVENT",
    }
}

api_enum! {
    /// Unit a custom metric is measured in.
    MeasurementUnit, "measurement unit" {
        Standard => "STANDARD",
        Currency => "CURRENCY",
        Feet => "FEET",
        Meters => "METERS",
        Kilometers => "KILOMETERS",
        Miles => "MILES",
        Milliseconds => "MILLISECONDS",
        Seconds => "SECONDS",
        Minutes => "MINUTES",
        Hours => "HOURS",
    }
}

api_enum! {
    DataStreamType, "data stream type" {
        Web => "WEB_DATA_STREAM",
        AndroidApp => "ANDROID_APP_DATA_STREAM",
        IosApp => "IOS_APP_DATA_STREAM",
    }
}

api_enum! {
    /// String filter match mode for report dimension filters.
    MatchType, "match type" {
        Exact => "EXACT",
        BeginsWith => "BEGINS_WITH",
        EndsWith => "ENDS_WITH",
        Contains => "CONTAINS",
        FullRegexp => "FULL_REGEXP",
        PartialRegexp => "PARTIAL_REGEXP",
    }
}

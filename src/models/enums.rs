use crate::db::DatabaseError;
use serde::{Deserialize, Serialize};

/// Macro to generate enum with as_str + std::str::FromStr pattern
macro_rules! str_enum {
    ($name:ident { $($variant:ident => $s:literal),+ $(,)? }) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(rename_all = "snake_case")]
        pub enum $name {
            $($variant),+
        }

        impl $name {
            pub fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $s),+
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl std::str::FromStr for $name {
            type Err = DatabaseError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($s => Ok(Self::$variant)),+,
                    _ => Err(DatabaseError::InvalidEnum {
                        field: stringify!($name).into(),
                        value: s.into(),
                    }),
                }
            }
        }
    };
}

str_enum!(ContextKey {
    Mood => "mood",
    Energy => "energy",
    Activity => "activity",
    Food => "food",
    Medication => "medication",
});

impl ContextKey {
    /// Enumeration order used by the pattern analysis.
    pub const ALL: [ContextKey; 5] = [
        ContextKey::Mood,
        ContextKey::Energy,
        ContextKey::Activity,
        ContextKey::Food,
        ContextKey::Medication,
    ];
}

str_enum!(TimePeriod {
    Morning => "morning",
    Afternoon => "afternoon",
    Evening => "evening",
    Night => "night",
});

impl TimePeriod {
    pub const ALL: [TimePeriod; 4] = [
        TimePeriod::Morning,
        TimePeriod::Afternoon,
        TimePeriod::Evening,
        TimePeriod::Night,
    ];

    /// Buckets an hour of day. Anything outside 6..22 (including
    /// out-of-range hours) counts as night.
    pub fn from_hour(hour: u8) -> Self {
        match hour {
            6..=11 => TimePeriod::Morning,
            12..=17 => TimePeriod::Afternoon,
            18..=21 => TimePeriod::Evening,
            _ => TimePeriod::Night,
        }
    }
}

str_enum!(TrendDirection {
    Stable => "stable",
    Increasing => "increasing",
    Decreasing => "decreasing",
});

str_enum!(TriggerCategory {
    Food => "food",
    Activity => "activity",
});

str_enum!(ResourceType {
    ActiveProfile => "active_profile",
    MediaFolder => "media_folder",
    PhotoFolder => "photo_folder",
    VoiceFolder => "voice_folder",
});

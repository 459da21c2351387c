//! Shared macros for string-backed enums.

/// Implement serde for an enum through its `FromStr`/`Display` pair, so config
/// files, parameter files and CLI flags accept exactly the same spellings.
macro_rules! string_enum_serde {
    ($ty:ty) => {
        impl serde::Serialize for $ty {
            fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
            where
                S: serde::Serializer,
            {
                serializer.collect_str(self)
            }
        }

        impl<'de> serde::Deserialize<'de> for $ty {
            fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
            where
                D: serde::Deserializer<'de>,
            {
                let s = <String as serde::Deserialize>::deserialize(deserializer)?;
                $crate::params::parse_choice::<Self>(stringify!($ty), &s)
                    .map_err(serde::de::Error::custom)
            }
        }
    };
}

pub(crate) use string_enum_serde;

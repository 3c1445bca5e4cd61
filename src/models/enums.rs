use serde::{Deserialize, Serialize};

use super::ValidationError;

/// Macro to generate enum with as_str + std::str::FromStr pattern.
/// The string form doubles as the serde representation.
macro_rules! str_enum {
    ($name:ident { $($variant:ident => $s:literal),+ $(,)? }) => {
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
        )]
        pub enum $name {
            $(#[serde(rename = $s)] $variant),+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$(Self::$variant),+];

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
            type Err = ValidationError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($s => Ok(Self::$variant)),+,
                    _ => Err(ValidationError::InvalidEnum {
                        field: stringify!($name).into(),
                        value: s.into(),
                    }),
                }
            }
        }
    };
}

pub(crate) use str_enum;

str_enum!(Posture {
    Lying => "lying",
    Sitting => "sitting",
    Standing => "standing",
    Unspecified => "unspecified",
});

// Declaration order is severity order: `Low < Normal < ... < Crisis`.
str_enum!(SeverityLevel {
    Low => "low",
    Normal => "normal",
    Elevated => "elevated",
    Stage1 => "stage1",
    Stage2 => "stage2",
    Crisis => "crisis",
});

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn posture_round_trip() {
        for (variant, s) in [
            (Posture::Lying, "lying"),
            (Posture::Sitting, "sitting"),
            (Posture::Standing, "standing"),
            (Posture::Unspecified, "unspecified"),
        ] {
            assert_eq!(variant.as_str(), s);
            assert_eq!(Posture::from_str(s).unwrap(), variant);
        }
    }

    #[test]
    fn severity_labels_are_fixed() {
        let labels: Vec<&str> = SeverityLevel::ALL.iter().map(|l| l.as_str()).collect();
        assert_eq!(
            labels,
            vec!["low", "normal", "elevated", "stage1", "stage2", "crisis"]
        );
    }

    #[test]
    fn severity_levels_are_ordered() {
        assert!(SeverityLevel::Low < SeverityLevel::Normal);
        assert!(SeverityLevel::Normal < SeverityLevel::Elevated);
        assert!(SeverityLevel::Elevated < SeverityLevel::Stage1);
        assert!(SeverityLevel::Stage1 < SeverityLevel::Stage2);
        assert!(SeverityLevel::Stage2 < SeverityLevel::Crisis);
    }

    #[test]
    fn severity_serializes_as_label() {
        let json = serde_json::to_string(&SeverityLevel::Stage1).unwrap();
        assert_eq!(json, "\"stage1\"");
        let back: SeverityLevel = serde_json::from_str("\"crisis\"").unwrap();
        assert_eq!(back, SeverityLevel::Crisis);
    }

    #[test]
    fn invalid_enum_returns_error() {
        assert!(Posture::from_str("kneeling").is_err());
        assert!(Posture::from_str("").is_err());
        assert!(SeverityLevel::from_str("stage3").is_err());
    }
}

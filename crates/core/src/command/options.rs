//! Values accepted by meson's enumerated command-line options

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Declares an option enum whose serde, `Display` and `FromStr` spellings
/// are exactly the strings meson accepts on its command line.
macro_rules! meson_value {
    ($(#[$meta:meta])* $name:ident { $($variant:ident => $text:literal),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum $name {
            $(
                #[serde(rename = $text)]
                $variant,
            )+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $text,)+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = String;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($text => Ok($name::$variant),)+
                    _ => Err(format!(
                        "invalid value `{}`, expected one of: {}",
                        s,
                        [$($text),+].join(", ")
                    )),
                }
            }
        }
    };
}

meson_value! {
    /// Override value of all 'auto' features
    AutoFeatures {
        Enabled => "enabled",
        Disabled => "disabled",
        Auto => "auto",
    }
}

meson_value! {
    Backend {
        Ninja => "ninja",
        Vs => "vs",
        Vs2010 => "vs2010",
        Vs2012 => "vs2012",
        Vs2013 => "vs2013",
        Vs2015 => "vs2015",
        Vs2017 => "vs2017",
        Vs2019 => "vs2019",
        Vs2022 => "vs2022",
        Xcode => "xcode",
    }
}

meson_value! {
    BuildType {
        Plain => "plain",
        Debug => "debug",
        DebugOptimized => "debugoptimized",
        Release => "release",
        MinSize => "minsize",
        Custom => "custom",
    }
}

meson_value! {
    /// Default library type
    DefaultLibrary {
        Shared => "shared",
        Static => "static",
        Both => "both",
    }
}

meson_value! {
    /// Build directory layout
    Layout {
        Mirror => "mirror",
        Flat => "flat",
    }
}

meson_value! {
    Optimization {
        O0 => "0",
        Og => "g",
        O1 => "1",
        O2 => "2",
        O3 => "3",
        Os => "s",
    }
}

meson_value! {
    Unity {
        On => "on",
        Off => "off",
        Subprojects => "subprojects",
    }
}

meson_value! {
    /// Compiler warning level
    WarnLevel {
        Level0 => "0",
        Level1 => "1",
        Level2 => "2",
        Level3 => "3",
    }
}

meson_value! {
    /// How subproject wraps are resolved
    WrapMode {
        Default => "default",
        NoFallback => "nofallback",
        NoDownload => "nodownload",
        ForceFallback => "forcefallback",
        NoPromote => "nopromote",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_matches_meson_spelling() {
        assert_eq!(BuildType::DebugOptimized.to_string(), "debugoptimized");
        assert_eq!(BuildType::MinSize.to_string(), "minsize");
        assert_eq!(Optimization::Og.to_string(), "g");
        assert_eq!(Optimization::O3.to_string(), "3");
        assert_eq!(WarnLevel::Level2.to_string(), "2");
        assert_eq!(WrapMode::NoFallback.to_string(), "nofallback");
    }

    #[test]
    fn test_from_str_accepts_every_spelling() {
        for value in Backend::ALL {
            assert_eq!(value.as_str().parse::<Backend>().unwrap(), *value);
        }
        for value in Optimization::ALL {
            assert_eq!(value.as_str().parse::<Optimization>().unwrap(), *value);
        }
    }

    #[test]
    fn test_from_str_rejects_unknown() {
        let err = "fast".parse::<BuildType>().unwrap_err();
        assert!(err.contains("fast"));
        assert!(err.contains("debugoptimized"));
    }

    #[test]
    fn test_serde_uses_meson_spelling() {
        let json = serde_json::to_string(&Unity::Subprojects).unwrap();
        assert_eq!(json, "\"subprojects\"");

        let parsed: WarnLevel = serde_json::from_str("\"3\"").unwrap();
        assert_eq!(parsed, WarnLevel::Level3);
    }
}

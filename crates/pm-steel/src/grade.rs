//! Lamination grade definitions.

use crate::error::{SteelError, SteelResult};
use core::fmt;
use core::str::FromStr;

/// Cold-rolled electrical steel grades with tabulated curves.
///
/// The legacy numeric selector used by older parameter sets maps
/// 1..=5 onto the variants in declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SteelGrade {
    #[cfg_attr(feature = "serde", serde(rename = "DR510-50"))]
    Dr510_50,
    #[cfg_attr(feature = "serde", serde(rename = "DR420-50"))]
    Dr420_50,
    #[cfg_attr(feature = "serde", serde(rename = "DR490-50"))]
    Dr490_50,
    #[cfg_attr(feature = "serde", serde(rename = "DR550-50"))]
    Dr550_50,
    #[cfg_attr(feature = "serde", serde(rename = "DW315-50"))]
    Dw315_50,
}

impl SteelGrade {
    pub const ALL: [SteelGrade; 5] = [
        SteelGrade::Dr510_50,
        SteelGrade::Dr420_50,
        SteelGrade::Dr490_50,
        SteelGrade::Dr550_50,
        SteelGrade::Dw315_50,
    ];

    /// Catalog designation, e.g. `"DW315-50"`.
    pub fn name(self) -> &'static str {
        match self {
            SteelGrade::Dr510_50 => "DR510-50",
            SteelGrade::Dr420_50 => "DR420-50",
            SteelGrade::Dr490_50 => "DR490-50",
            SteelGrade::Dr550_50 => "DR550-50",
            SteelGrade::Dw315_50 => "DW315-50",
        }
    }

    /// Legacy 1-based selector.
    pub fn code(self) -> u8 {
        match self {
            SteelGrade::Dr510_50 => 1,
            SteelGrade::Dr420_50 => 2,
            SteelGrade::Dr490_50 => 3,
            SteelGrade::Dr550_50 => 4,
            SteelGrade::Dw315_50 => 5,
        }
    }

    pub(crate) fn table_index(self) -> usize {
        usize::from(self.code() - 1)
    }
}

impl TryFrom<u8> for SteelGrade {
    type Error = SteelError;

    fn try_from(code: u8) -> SteelResult<Self> {
        SteelGrade::ALL
            .into_iter()
            .find(|g| g.code() == code)
            .ok_or_else(|| SteelError::UnknownGrade {
                what: format!("code {code}"),
            })
    }
}

impl FromStr for SteelGrade {
    type Err = SteelError;

    fn from_str(s: &str) -> SteelResult<Self> {
        let query = s.trim();
        SteelGrade::ALL
            .into_iter()
            .find(|g| g.name().eq_ignore_ascii_case(query))
            .ok_or_else(|| SteelError::UnknownGrade {
                what: format!("'{query}'"),
            })
    }
}

impl fmt::Display for SteelGrade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_round_trip() {
        for grade in SteelGrade::ALL {
            assert_eq!(SteelGrade::try_from(grade.code()).unwrap(), grade);
        }
    }

    #[test]
    fn unknown_codes_rejected() {
        assert!(SteelGrade::try_from(0).is_err());
        assert!(SteelGrade::try_from(6).is_err());
    }

    #[test]
    fn parse_is_case_insensitive() {
        assert_eq!("dw315-50".parse::<SteelGrade>().unwrap(), SteelGrade::Dw315_50);
        assert_eq!(" DR420-50 ".parse::<SteelGrade>().unwrap(), SteelGrade::Dr420_50);
        assert!("M270-35A".parse::<SteelGrade>().is_err());
    }

    #[test]
    fn display_uses_catalog_name() {
        assert_eq!(SteelGrade::Dr550_50.to_string(), "DR550-50");
    }
}

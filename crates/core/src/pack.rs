//! Service packs and the pricing table.
//!
//! A pack is the purchasable service tier chosen in the first wizard step.
//! It determines the quoted price and which configurator steps apply. The
//! pack-to-price mapping is fixed for the lifetime of the process; the
//! quoted price is never taken from client input.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// The five purchasable service packs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Pack {
    #[serde(rename = "CEREMONY")]
    Ceremony,
    #[serde(rename = "COCKTAIL_1H")]
    Cocktail1h,
    #[serde(rename = "COCKTAIL_1_5H")]
    Cocktail1_5h,
    #[serde(rename = "CEREMONY_COCKTAIL_1H")]
    CeremonyCocktail1h,
    #[serde(rename = "CEREMONY_COCKTAIL_1_5H")]
    CeremonyCocktail1_5h,
}

/// All packs, in catalogue order.
pub const ALL_PACKS: &[Pack] = &[
    Pack::Ceremony,
    Pack::Cocktail1h,
    Pack::Cocktail1_5h,
    Pack::CeremonyCocktail1h,
    Pack::CeremonyCocktail1_5h,
];

impl Pack {
    /// Parse a pack string from the database or an API payload.
    pub fn from_str_db(s: &str) -> Result<Self, CoreError> {
        match s {
            "CEREMONY" => Ok(Self::Ceremony),
            "COCKTAIL_1H" => Ok(Self::Cocktail1h),
            "COCKTAIL_1_5H" => Ok(Self::Cocktail1_5h),
            "CEREMONY_COCKTAIL_1H" => Ok(Self::CeremonyCocktail1h),
            "CEREMONY_COCKTAIL_1_5H" => Ok(Self::CeremonyCocktail1_5h),
            _ => Err(CoreError::Validation(format!(
                "Invalid pack '{s}'. Must be one of: CEREMONY, COCKTAIL_1H, \
                 COCKTAIL_1_5H, CEREMONY_COCKTAIL_1H, CEREMONY_COCKTAIL_1_5H"
            ))),
        }
    }

    /// Convert to a database-compatible string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Ceremony => "CEREMONY",
            Self::Cocktail1h => "COCKTAIL_1H",
            Self::Cocktail1_5h => "COCKTAIL_1_5H",
            Self::CeremonyCocktail1h => "CEREMONY_COCKTAIL_1H",
            Self::CeremonyCocktail1_5h => "CEREMONY_COCKTAIL_1_5H",
        }
    }

    /// Human-readable label for the pack.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Ceremony => "Ceremony",
            Self::Cocktail1h => "Cocktail (1h)",
            Self::Cocktail1_5h => "Cocktail (1.5h)",
            Self::CeremonyCocktail1h => "Ceremony + Cocktail (1h)",
            Self::CeremonyCocktail1_5h => "Ceremony + Cocktail (1.5h)",
        }
    }

    /// Quoted price in euro cents. The pricing table is immutable.
    pub fn price_cents(&self) -> i64 {
        match self {
            Self::Ceremony => 30_000,
            Self::Cocktail1h => 30_000,
            Self::Cocktail1_5h => 37_000,
            Self::CeremonyCocktail1h => 45_000,
            Self::CeremonyCocktail1_5h => 50_000,
        }
    }

    /// Whether the pack covers the wedding ceremony (moment and song steps).
    pub fn includes_ceremony(&self) -> bool {
        matches!(
            self,
            Self::Ceremony | Self::CeremonyCocktail1h | Self::CeremonyCocktail1_5h
        )
    }

    /// Whether the pack covers the cocktail reception (style step).
    pub fn includes_cocktail(&self) -> bool {
        matches!(
            self,
            Self::Cocktail1h
                | Self::Cocktail1_5h
                | Self::CeremonyCocktail1h
                | Self::CeremonyCocktail1_5h
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_str_roundtrip() {
        for pack in ALL_PACKS {
            assert_eq!(Pack::from_str_db(pack.as_str()).unwrap(), *pack);
        }
    }

    #[test]
    fn from_str_invalid() {
        assert!(Pack::from_str_db("WEDDING").is_err());
        assert!(Pack::from_str_db("").is_err());
        assert!(Pack::from_str_db("ceremony").is_err());
    }

    #[test]
    fn prices_match_pricing_table() {
        assert_eq!(Pack::Ceremony.price_cents(), 30_000);
        assert_eq!(Pack::Cocktail1h.price_cents(), 30_000);
        assert_eq!(Pack::Cocktail1_5h.price_cents(), 37_000);
        assert_eq!(Pack::CeremonyCocktail1h.price_cents(), 45_000);
        assert_eq!(Pack::CeremonyCocktail1_5h.price_cents(), 50_000);
    }

    #[test]
    fn component_flags() {
        assert!(Pack::Ceremony.includes_ceremony());
        assert!(!Pack::Ceremony.includes_cocktail());
        assert!(!Pack::Cocktail1h.includes_ceremony());
        assert!(Pack::Cocktail1h.includes_cocktail());
        assert!(Pack::CeremonyCocktail1_5h.includes_ceremony());
        assert!(Pack::CeremonyCocktail1_5h.includes_cocktail());
    }

    #[test]
    fn serde_uses_wire_names() {
        let json = serde_json::to_string(&Pack::Cocktail1_5h).unwrap();
        assert_eq!(json, "\"COCKTAIL_1_5H\"");
        let parsed: Pack = serde_json::from_str("\"CEREMONY_COCKTAIL_1H\"").unwrap();
        assert_eq!(parsed, Pack::CeremonyCocktail1h);
    }
}

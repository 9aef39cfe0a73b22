use serde::{Deserialize, Serialize};

use crate::models::PlacementStatus;
use crate::profile::{CompanyTiers, StatusThresholds};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CompanyTier {
    Top,
    Mid,
    Entry,
    None,
}

impl CompanyTier {
    pub fn label(self) -> &'static str {
        match self {
            CompanyTier::Top => "top",
            CompanyTier::Mid => "mid",
            CompanyTier::Entry => "entry",
            CompanyTier::None => "none",
        }
    }
}

pub fn classify_status(readiness: u8, thresholds: &StatusThresholds) -> PlacementStatus {
    match thresholds.highly_placed {
        Some(highly) if readiness >= highly => PlacementStatus::HighlyPlaced,
        _ if readiness >= thresholds.placed => PlacementStatus::Placed,
        _ => PlacementStatus::NotPlaced,
    }
}

/// Company tier for a readiness value. This axis is deliberately separate
/// from the status bands.
pub fn company_tier(readiness: u8, tiers: &CompanyTiers) -> CompanyTier {
    if tiers.width.is_none() {
        return if readiness >= tiers.entry {
            CompanyTier::Top
        } else {
            CompanyTier::None
        };
    }

    if readiness >= tiers.top {
        CompanyTier::Top
    } else if readiness >= tiers.mid {
        CompanyTier::Mid
    } else if readiness >= tiers.entry {
        CompanyTier::Entry
    } else {
        CompanyTier::None
    }
}

/// Slice of the branch's company list for a tier. Short lists yield short or
/// empty slices.
pub fn tier_companies<'a>(
    companies: &'a [String],
    tier: CompanyTier,
    tiers: &CompanyTiers,
) -> &'a [String] {
    let len = companies.len();
    let Some(width) = tiers.width else {
        return match tier {
            CompanyTier::None => &[],
            _ => companies,
        };
    };

    let (start, end) = match tier {
        CompanyTier::Top => (0, width),
        CompanyTier::Mid => (width, width.saturating_mul(2)),
        CompanyTier::Entry => (width.saturating_mul(2), len),
        CompanyTier::None => return &[],
    };

    let start = start.min(len);
    let end = end.clamp(start, len);
    companies.get(start..end).unwrap_or(&[])
}

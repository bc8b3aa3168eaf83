//! Embedded tier mapping.
//!
//! Each tier groups a fixed list of check columns. Check names are expected to
//! belong to a single tier but nothing enforces it: a name listed twice is
//! simply evaluated by both tiers.

use crate::qc::report::model::STYLE_ID_COLUMN;

/// A named group of quality-check columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tier {
    pub name: &'static str,
    pub checks: &'static [&'static str],
}

/// Failure descriptor columns always loaded from the Analysis sheet.
pub const FAILURE_COLUMNS: [&str; 4] = [
    "Failure Rate",
    "Failure Summary",
    "Failure Report",
    STYLE_ID_COLUMN,
];

/// Tiers in evaluation and output order.
pub const TIERS: [Tier; 4] = [
    Tier {
        name: "tier1_errors",
        checks: &[
            "Article Type In Title",
            "Description Bullets",
            "Description Length",
            "Description Unicode",
            "Lv Title Length",
            "Ideal LVN",
            "LVN Presence Check",
            "LVN Sequence Check",
            "Ideal PDN",
            "PDN Presence Check",
            "PDN Sequence Check",
            "Specification Count",
            "Title Casing",
            "Title Length",
            "Title Unicode",
        ],
    },
    Tier {
        name: "tier2_data_image_coherence",
        checks: &[
            "Attribute Image Match",
            "Black And White Flag",
            "Blacklisted Country Of Origin",
            "Brand Consistency Flag",
            "Celebrity Licensed Content Flag",
            "Color Inconsistency Flag",
            "Duplicate Images Flag",
            "Fake Photoshopped Flag",
            "Fit Consistency Flag",
            "Flat Shot Flag",
            "Gender Age Group Match Flag",
            "Geometric Distortion Flag",
            "Headless Flag",
            "Image Availability",
            "Image Completeness Flag",
            "Image Quality Issues Flag",
            "Inappropriate Content Flag",
            "Key Brand Logo Flag",
            "Poor Editing Artifacts Flag",
            "Product Consistency Flag",
            "Religious Political Content Flag",
            "Restricted Product Promotion Flag",
            "Text Infographic Logo Flag",
            "Watermark Flag",
        ],
    },
    Tier {
        name: "tier2_size_fit_description_completeness",
        checks: &["Material Care Info", "Standard Sizes In Chart"],
    },
    Tier {
        name: "tier2_article_type_consistency",
        checks: &[
            "Article Type Match Flag",
            "Country Of Origin Available",
            "Description Content Match (%)",
            "Importer Address Valid",
            "Importer Details Available",
            "Manufacturer Address Valid",
            "Manufacturer Details Available",
            "Net Quantity Available",
            "Net Quantity Unit Available",
            "Package Contains Info Available",
            "Packer Address Valid",
            "Packer Details Available",
            "Title Content Match (%)",
        ],
    },
];

/// Columns loaded from the Analysis sheet: the join key, the failure
/// descriptors, then every tier check in tier order. Duplicates keep their
/// first position.
pub fn required_analysis_columns() -> Vec<&'static str> {
    let candidates = std::iter::once(STYLE_ID_COLUMN)
        .chain(FAILURE_COLUMNS)
        .chain(TIERS.iter().flat_map(|tier| tier.checks.iter().copied()));

    let mut required: Vec<&'static str> = Vec::new();
    for name in candidates {
        if !required.contains(&name) {
            required.push(name);
        }
    }
    required
}

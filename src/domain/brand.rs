//! Brand badge lookup used when rendering tool cards and the brand filter.
//!
//! Brands without a usable logo fall back to a coloured text badge; unknown
//! brands get a neutral grey badge.

use serde::Serialize;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct BrandBadge {
    /// Canonical brand spelling from the table, `None` for the generic badge.
    pub brand: Option<&'static str>,
    pub logo_url: Option<&'static str>,
    pub background: &'static str,
    pub text: &'static str,
    pub border: &'static str,
}

const fn entry(
    brand: &'static str,
    logo_url: Option<&'static str>,
    background: &'static str,
    border: &'static str,
) -> BrandBadge {
    BrandBadge {
        brand: Some(brand),
        logo_url,
        background,
        text: "text-white",
        border,
    }
}

const DEFAULT_BADGE: BrandBadge = BrandBadge {
    brand: None,
    logo_url: None,
    background: "bg-gray-500",
    text: "text-white",
    border: "border-gray-600",
};

#[rustfmt::skip]
const BRAND_BADGES: &[BrandBadge] = &[
    entry("DeWalt", Some("https://upload.wikimedia.org/wikipedia/commons/8/89/DeWalt_Logo.svg"), "bg-yellow-500", "border-yellow-600"),
    entry("Milwaukee", Some("https://upload.wikimedia.org/wikipedia/commons/d/de/Milwaukee_Logo.svg"), "bg-red-600", "border-red-700"),
    entry("Makita", Some("https://upload.wikimedia.org/wikipedia/commons/7/71/Makita_Logo.svg"), "bg-blue-500", "border-blue-600"),
    entry("Bosch", Some("https://upload.wikimedia.org/wikipedia/commons/e/ee/Bosch-Logo.svg"), "bg-blue-600", "border-blue-700"),
    entry("Festool", Some("https://upload.wikimedia.org/wikipedia/commons/4/4d/Festool.svg"), "bg-green-600", "border-green-700"),
    entry("Hilti", Some("https://upload.wikimedia.org/wikipedia/commons/7/76/Hilti_logo.svg"), "bg-red-500", "border-red-600"),
    entry("Snap-on", Some("https://upload.wikimedia.org/wikipedia/commons/3/36/Snap-on_logo.svg"), "bg-red-600", "border-red-700"),
    entry("Craftsman", Some("https://upload.wikimedia.org/wikipedia/commons/d/dc/Craftsman_logo.svg"), "bg-blue-600", "border-blue-700"),
    entry("Stanley", Some("https://upload.wikimedia.org/wikipedia/commons/a/a7/Stanley_Hand_Tools_logo.svg"), "bg-blue-600", "border-blue-700"),
    entry("Black+Decker", Some("https://upload.wikimedia.org/wikipedia/commons/b/b9/Black%2BDecker_Logo.svg"), "bg-orange-500", "border-orange-600"),
    entry("Porter-Cable", Some("https://upload.wikimedia.org/wikipedia/commons/7/76/Porter-Cable_logo.svg"), "bg-blue-500", "border-blue-600"),
    entry("Hitachi", Some("https://upload.wikimedia.org/wikipedia/commons/4/4d/Hitachi_logo.svg"), "bg-red-500", "border-red-600"),
    entry("Metabo", Some("https://upload.wikimedia.org/wikipedia/commons/e/e1/Metabo_Logo_2024.svg"), "bg-blue-600", "border-blue-700"),
    entry("Ryobi", Some("https://upload.wikimedia.org/wikipedia/commons/1/12/Ryobi_Logo.svg"), "bg-green-500", "border-green-600"),
    entry("Kobalt", None, "bg-blue-600", "border-blue-700"),
    entry("Husky", Some("https://en.wikipedia.org/wiki/Husky_(tool_brand)#/media/File:Husky_(tools)_logo.svg"), "bg-orange-500", "border-orange-600"),
    entry("Werner", None, "bg-yellow-500", "border-yellow-600"),
    entry("Jet", Some("https://upload.wikimedia.org/wikipedia/commons/8/8d/Jet_logo_2020.svg"), "bg-blue-600", "border-blue-700"),
    entry("Powermatic", None, "bg-yellow-500", "border-yellow-600"),
    entry("Delta", Some("https://en.wikipedia.org/wiki/Delta_Machinery#/media/File:Delta_Machinery_logo.jpg"), "bg-blue-600", "border-blue-700"),
    entry("Grizzly", None, "bg-red-600", "border-red-700"),
    entry("Shop Fox", None, "bg-orange-500", "border-orange-600"),
    entry("WEN", None, "bg-blue-600", "border-blue-700"),
    entry("Skil", Some("https://upload.wikimedia.org/wikipedia/commons/f/fc/Skil_logo.svg"), "bg-orange-500", "border-orange-600"),
    entry("Dremel", Some("https://upload.wikimedia.org/wikipedia/commons/7/79/Dremel_logo.svg"), "bg-blue-600", "border-blue-700"),
    entry("Bostitch", Some("https://upload.wikimedia.org/wikipedia/commons/c/cb/Stanley_Bostitch_Logo.svg"), "bg-red-500", "border-red-600"),
    entry("Paslode", Some("https://upload.wikimedia.org/wikipedia/en/5/57/Paslode_logo.svg"), "bg-blue-600", "border-blue-700"),
    entry("Senco", None, "bg-blue-600", "border-blue-700"),
    entry("SawStop", Some("https://upload.wikimedia.org/wikipedia/commons/a/a4/SawStopLogo.png"), "bg-red-600", "border-red-700"),
    entry("Mastercraft", Some("https://en.wikipedia.org/wiki/File:Mastercraft_logo.svg#/media/File:Mastercraft_logo.svg"), "bg-red-500", "border-red-600"),
    entry("Rigid", Some("https://upload.wikimedia.org/wikipedia/commons/f/f0/Ridgid_logo.svg"), "bg-orange-500", "border-orange-600"),
    entry("Little Giant", None, "bg-blue-600", "border-blue-700"),
];

/// Resolves the badge for a brand name.
///
/// Exact spelling wins over a case-insensitive match. Blank or missing names
/// have no badge at all.
pub fn brand_badge(brand: Option<&str>) -> Option<BrandBadge> {
    let brand = brand.map(str::trim).filter(|b| !b.is_empty())?;

    let badge = BRAND_BADGES
        .iter()
        .find(|badge| badge.brand == Some(brand))
        .or_else(|| {
            BRAND_BADGES.iter().find(|badge| {
                badge
                    .brand
                    .is_some_and(|known| known.eq_ignore_ascii_case(brand))
            })
        })
        .copied()
        .unwrap_or(DEFAULT_BADGE);

    Some(badge)
}

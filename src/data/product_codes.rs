//! Static lookup of register product codes.

/// Every product code in the register is this many characters long.
pub const PRODUCT_CODE_LEN: usize = 6;

/// Codes making up the "point-to-point" category.
pub const POINT_TO_POINT_CODES: &[&str] = &["301010"];

/// Known product codes and their descriptions, as published with the
/// register snapshot this crate tracks.
pub const PRODUCT_CODES: &[(&str, &str)] = &[
    ("102010", "Business Radio Technically Assigned"),
    ("102020", "Business Radio Area Defined"),
    ("102030", "Business Radio Suppliers Light"),
    ("301010", "Point to Point Fixed Links"),
    ("305010", "Scanning Telemetry"),
    ("306010", "Self Co-ordinated Links"),
    ("401010", "Permanent Earth Station"),
    ("402010", "Transportable Earth Station"),
    ("405010", "Satellite (Earth Station Network)"),
    ("501010", "Maritime Coast Station"),
    ("601010", "Aeronautical Ground Station"),
];

/// Description for a product code, if the code is known.
pub fn describe(code: &str) -> Option<&'static str> {
    PRODUCT_CODES
        .iter()
        .find(|(known, _)| *known == code)
        .map(|(_, description)| *description)
}

pub fn is_known(code: &str) -> bool {
    describe(code).is_some()
}

pub fn known_codes() -> impl Iterator<Item = &'static str> {
    PRODUCT_CODES.iter().map(|(code, _)| *code)
}

pub fn is_point_to_point(code: &str) -> bool {
    POINT_TO_POINT_CODES.contains(&code)
}

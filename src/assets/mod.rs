/// Image loading helpers.
pub mod decode;
/// Swatch and template/mask lookup.
pub mod resolve;

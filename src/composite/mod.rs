/// Straight/premultiplied alpha blending.
pub mod blend;
/// Mask thresholding, stretch-fit and alpha synthesis.
pub mod mask;

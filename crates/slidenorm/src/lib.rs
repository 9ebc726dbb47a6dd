#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]

#[doc(inline)]
pub use slidenorm_image as image;

#[doc(inline)]
pub use slidenorm_imgproc as imgproc;

#[doc(inline)]
pub use slidenorm_io as io;

/// Output file name derivation for normalized tiles.
pub mod filename;

/// Lightness normalization of RGB tiles.
pub mod normalize;

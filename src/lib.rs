//! # qrsmith
//!
//! A Rust library for encoding text and bytes into QR Code symbols (ISO/IEC 18004, model 2)
//! with Reed-Solomon error correction.
//!
//! ## Features
//!
//! - **Automatic configuration**: densest single mode, smallest version, and lowest penalty mask
//!   are chosen for you
//! - **Full control when needed**: versions 1 to 40, error correction levels L, M, Q and H,
//!   forced masks, and ECI designators for byte mode
//! - **Every data mode**: numeric, alphanumeric, byte and kanji (Shift-JIS)
//! - **Bit exact output**: the module matrix any standard reader decodes
//!
//! ## Quick Start
//!
//! ### Simple QR Code Generation
//!
//! ```rust
//! use qrsmith::QrCode;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! // Level M, falling back to L, at the smallest version that fits
//! let qr = QrCode::create("Hello, World!")?;
//!
//! assert_eq!(qr.width(), 21);
//! let top_left_is_dark = qr[(0, 0)];
//! assert!(top_left_is_dark);
//! # Ok(())
//! # }
//! ```
//!
//! ### Full Configuration
//!
//! ```rust
//! use qrsmith::{EciCode, ECLevel, MaskPattern, QrBuilder, Version};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let qr = QrBuilder::new("Grüße")
//!     .version(Version::new(2)?)     // if not provided, finds smallest version to fit data
//!     .ec_level(ECLevel::Q)          // if not provided, tries M and then L
//!     .eci(EciCode::UTF8)            // if not provided, no ECI header is written
//!     .mask(MaskPattern::new(3)?)    // if not provided, finds best mask based on penalty score
//!     .build()?;
//!
//! assert_eq!(qr.metadata(), "{ Version: 2, Ec level: Q, Mask: 3 }");
//! println!("{qr}");
//! # Ok(())
//! # }
//! ```
//!
//! ## QR Code Components
//!
//! ### Versions
//! - Versions 1-40, with sizes from 21x21 to 177x177 modules
//!
//! ### Error Correction Levels
//! - **L (Low)**: ~7% error correction
//! - **M (Medium)**: ~15% error correction
//! - **Q (Quartile)**: ~25% error correction
//! - **H (High)**: ~30% error correction
//!
//! ## Logging
//!
//! Pipeline stages are reported through the [`log`] facade at `debug` level, per mask penalties
//! and cache population at `trace` level. No logger is installed by the library.

#![allow(clippy::items_after_test_module)]

pub mod builder;
pub mod common;

pub use builder::{QrBuilder, QrCode};
pub use common::bit_buffer::BitBuffer;
pub use common::codec::{EciCode, Mode, ModeIndicator};
pub use common::error::{QrError, QrResult};
pub use common::mask::MaskPattern;
pub use common::matrix::BitMatrix;
pub use common::metadata::{ECLevel, Version};

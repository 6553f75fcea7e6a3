use std::fmt::{Display, Formatter};
use std::ops::Index;

use super::QrBuilder;
use crate::common::{
    codec::{EciCode, Mode},
    error::QrResult,
    mask::MaskPattern,
    matrix::BitMatrix,
    metadata::{ECLevel, Version},
};

/// A finished symbol. Modules are addressed as `(x, y)` with the origin in the
/// top left corner, `true` being dark. The quiet zone is not included.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QrCode {
    version: Version,
    ec_level: ECLevel,
    mask: MaskPattern,
    modules: BitMatrix,
}

impl QrCode {
    pub(crate) fn new(version: Version, ec_level: ECLevel, mask: MaskPattern, modules: BitMatrix) -> Self {
        debug_assert!(
            modules.width() == version.width() && modules.height() == version.width(),
            "Matrix of {}x{} modules does not match version {version}",
            modules.width(),
            modules.height()
        );
        Self { version, ec_level, mask, modules }
    }

    pub fn version(&self) -> Version {
        self.version
    }

    pub fn ec_level(&self) -> ECLevel {
        self.ec_level
    }

    pub fn mask_pattern(&self) -> MaskPattern {
        self.mask
    }

    pub fn width(&self) -> usize {
        self.modules.width()
    }

    pub fn height(&self) -> usize {
        self.modules.height()
    }

    /// Panics if `(x, y)` lies outside the symbol.
    pub fn get(&self, x: usize, y: usize) -> bool {
        self.modules.get(x, y)
    }

    pub fn modules(&self) -> &BitMatrix {
        &self.modules
    }

    pub fn count_dark_modules(&self) -> usize {
        self.modules.count_ones()
    }

    pub fn metadata(&self) -> String {
        format!("{{ Version: {}, Ec level: {}, Mask: {} }}", self.version, self.ec_level, self.mask)
    }
}

impl Index<(usize, usize)> for QrCode {
    type Output = bool;

    fn index(&self, (x, y): (usize, usize)) -> &bool {
        if self.get(x, y) {
            &true
        } else {
            &false
        }
    }
}

impl Display for QrCode {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        Display::fmt(&self.modules, f)
    }
}

// Entry points
//------------------------------------------------------------------------------

impl QrCode {
    /// Encodes `text` at level M, or at level L if it does not fit at M, using
    /// the smallest version that holds it.
    pub fn create(text: &str) -> QrResult<Self> {
        QrBuilder::new(text).build()
    }

    pub fn create_with_ec_level(text: &str, ec_level: ECLevel) -> QrResult<Self> {
        QrBuilder::new(text).ec_level(ec_level).build()
    }

    /// Fails with [`DataTooLarge`](crate::QrError::DataTooLarge) rather than
    /// growing past `version`.
    pub fn create_with_version(
        text: &str,
        version: Version,
        ec_level: ECLevel,
        eci: Option<EciCode>,
    ) -> QrResult<Self> {
        let mut builder = QrBuilder::new(text);
        builder.version(version).ec_level(ec_level);
        if let Some(eci) = eci {
            builder.eci(eci);
        }
        builder.build()
    }

    pub fn create_from_bytes(data: &[u8], mode: Mode, ec_level: ECLevel) -> QrResult<Self> {
        QrBuilder::from_bytes(data, mode).ec_level(ec_level).build()
    }

    pub fn try_create(text: &str) -> Option<Self> {
        Self::create(text).ok()
    }

    pub fn try_create_with_ec_level(text: &str, ec_level: ECLevel) -> Option<Self> {
        Self::create_with_ec_level(text, ec_level).ok()
    }

    pub fn try_create_with_version(
        text: &str,
        version: Version,
        ec_level: ECLevel,
        eci: Option<EciCode>,
    ) -> Option<Self> {
        Self::create_with_version(text, version, ec_level, eci).ok()
    }

    pub fn try_create_from_bytes(data: &[u8], mode: Mode, ec_level: ECLevel) -> Option<Self> {
        Self::create_from_bytes(data, mode, ec_level).ok()
    }
}

pub mod ec;
pub mod qr;
pub mod symbol;

pub use qr::QrCode;

use std::borrow::Cow;
use std::fmt::Display;

use log::debug;

use crate::common::{
    codec::{analyze, encode_data_bits, encode_text, EciCode, Mode},
    error::{QrError, QrResult},
    mask::MaskPattern,
    metadata::{ECLevel, Version},
};
use ec::encode_and_interleave;
use symbol::build_symbol;

#[derive(Debug, Clone, Copy)]
enum Source<'a> {
    Text(&'a str),
    Bytes(&'a [u8], Mode),
}

/// Configures and builds a [`QrCode`]. Anything left unset is chosen
/// automatically: level M falling back to L, the smallest version that fits,
/// and the mask with the lowest penalty.
#[derive(Debug, Clone)]
pub struct QrBuilder<'a> {
    source: Source<'a>,
    version: Option<Version>,
    ec_level: Option<ECLevel>,
    eci: Option<EciCode>,
    mask: Option<MaskPattern>,
}

impl<'a> QrBuilder<'a> {
    /// Text is encoded in the densest mode that holds all of it. Setting an
    /// ECI designator forces byte mode over the UTF-8 bytes.
    pub fn new(text: &'a str) -> Self {
        Self::with_source(Source::Text(text))
    }

    /// Raw bytes encoded in `mode` as they are.
    pub fn from_bytes(data: &'a [u8], mode: Mode) -> Self {
        Self::with_source(Source::Bytes(data, mode))
    }

    fn with_source(source: Source<'a>) -> Self {
        Self { source, version: None, ec_level: None, eci: None, mask: None }
    }

    pub fn data(&mut self, text: &'a str) -> &mut Self {
        self.source = Source::Text(text);
        self
    }

    pub fn version(&mut self, version: Version) -> &mut Self {
        self.version = Some(version);
        self
    }

    pub fn unset_version(&mut self) -> &mut Self {
        self.version = None;
        self
    }

    pub fn ec_level(&mut self, ec_level: ECLevel) -> &mut Self {
        self.ec_level = Some(ec_level);
        self
    }

    pub fn eci(&mut self, eci: EciCode) -> &mut Self {
        self.eci = Some(eci);
        self
    }

    pub fn mask(&mut self, mask: MaskPattern) -> &mut Self {
        self.mask = Some(mask);
        self
    }

    pub fn metadata(&self) -> String {
        format!(
            "{{ Version: {}, Ec level: {}, Eci: {}, Mask: {} }}",
            or_none(self.version),
            or_none(self.ec_level),
            or_none(self.eci),
            or_none(self.mask)
        )
    }

    fn payload(&self) -> (Cow<'a, [u8]>, Mode) {
        match self.source {
            Source::Text(text) if self.eci.is_some() => (Cow::Borrowed(text.as_bytes()), Mode::Byte),
            Source::Text(text) => encode_text(text),
            Source::Bytes(data, mode) => (Cow::Borrowed(data), mode),
        }
    }
}

fn or_none<T: Display>(value: Option<T>) -> String {
    value.map_or_else(|| "None".to_string(), |v| v.to_string())
}


impl QrBuilder<'_> {
    pub fn build(&self) -> QrResult<QrCode> {
        debug!("Generating QR {}...", self.metadata());
        let (data, mode) = self.payload();

        match self.ec_level {
            Some(ecl) => self.build_at_level(&data, mode, ecl),
            None => match self.build_at_level(&data, mode, ECLevel::M) {
                Err(QrError::DataTooLarge) => {
                    debug!("Data does not fit at level M, retrying at level L...");
                    self.build_at_level(&data, mode, ECLevel::L)
                }
                res => res,
            },
        }
    }

    fn build_at_level(&self, data: &[u8], mode: Mode, ecl: ECLevel) -> QrResult<QrCode> {
        let info = analyze(data, mode, ecl, self.version, self.eci)?;
        let version = info.version;
        debug!("Encoding {} bytes as {mode} at version {version}, level {ecl}...", data.len());
        let data_bits = encode_data_bits(&info, data)?;

        debug!("Computing error correction for {} data codewords...", data_bits.byte_count());
        let codewords = encode_and_interleave(version, ecl, &data_bits)?;

        debug!("Drawing symbol...");
        let (modules, mask) = build_symbol(version, ecl, &codewords, self.mask);

        let qr = QrCode::new(version, ecl, mask, modules);
        debug!("Generated QR {} with {} dark modules", qr.metadata(), qr.count_dark_modules());
        Ok(qr)
    }
}

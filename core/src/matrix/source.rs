//! QR symbol encoding, delegated to the `qrcode` crate

use qrcode::types::QrError;
use qrcode::{EcLevel, QrCode};

use super::{CorrectionLevel, QrMatrix};
use crate::constants::DEFAULT_QUIET_ZONE;
use crate::{Error, Result};

/// Anything that can turn message bytes into a module matrix.
///
/// The renderer only depends on this trait so tests can substitute fixed
/// matrices or count calls.
pub trait MatrixSource {
    fn encode(&self, message: &[u8], level: CorrectionLevel) -> Result<QrMatrix>;
}

impl<T: MatrixSource + ?Sized> MatrixSource for &T {
    fn encode(&self, message: &[u8], level: CorrectionLevel) -> Result<QrMatrix> {
        (**self).encode(message, level)
    }
}

/// Matrix source backed by the `qrcode` crate
#[derive(Debug, Clone, Copy)]
pub struct QrcodeSource {
    quiet_zone: u32,
}

impl QrcodeSource {
    pub fn new(quiet_zone: u32) -> Self {
        Self { quiet_zone }
    }

    pub fn quiet_zone(&self) -> u32 {
        self.quiet_zone
    }
}

impl Default for QrcodeSource {
    fn default() -> Self {
        Self::new(DEFAULT_QUIET_ZONE)
    }
}

impl From<CorrectionLevel> for EcLevel {
    fn from(level: CorrectionLevel) -> Self {
        match level {
            CorrectionLevel::L => EcLevel::L,
            CorrectionLevel::M => EcLevel::M,
            CorrectionLevel::Q => EcLevel::Q,
            CorrectionLevel::H => EcLevel::H,
        }
    }
}

impl MatrixSource for QrcodeSource {
    fn encode(&self, message: &[u8], level: CorrectionLevel) -> Result<QrMatrix> {
        if message.is_empty() {
            return Err(Error::Input("message is empty".to_string()));
        }

        let code = QrCode::with_error_correction_level(message, level.into()).map_err(|e| match e {
            QrError::DataTooLong => Error::Input(format!(
                "message of {} bytes exceeds QR capacity at correction level {}",
                message.len(),
                level
            )),
            other => Error::Encoding(format!("QR generation failed: {}", other)),
        })?;

        let width = code.width();
        let modules = code
            .to_colors()
            .into_iter()
            .map(|c| c == qrcode::Color::Dark)
            .collect();

        tracing::debug!("encoded {} bytes into {}x{} symbol at level {}", message.len(), width, width, level);

        Ok(QrMatrix::new(width, modules)?.with_quiet_zone(self.quiet_zone as usize))
    }
}

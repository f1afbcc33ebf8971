//! QR link adapter.

use crate::domain::errors::QrError;
use crate::ports::outbound::QrCodeGenerator;
use async_trait::async_trait;
use shared_types::RollId;
use tracing::debug;

/// Deterministic QR links under a configured site URL.
///
/// Image rendering is handled by the external media service; this adapter
/// only announces the request. The URLs stay valid either way, which is what
/// lets roll creation succeed even when rendering is down.
pub struct SiteUrlQrGenerator {
    base_url: String,
}

impl SiteUrlQrGenerator {
    pub fn new(base_url: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Self { base_url }
    }
}

#[async_trait]
impl QrCodeGenerator for SiteUrlQrGenerator {
    fn link(&self, roll_id: RollId) -> String {
        format!("{}/r/{roll_id}", self.base_url)
    }

    fn image_url(&self, roll_id: RollId) -> String {
        format!("{}/media/qrcodes/{roll_id}.png", self.base_url)
    }

    async fn generate(&self, roll_id: RollId) -> Result<(), QrError> {
        debug!(roll_id = %roll_id, "[wt-06] QR image generation requested");
        Ok(())
    }
}

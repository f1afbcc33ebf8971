//! Outbound Ports (Driven Ports / SPI)

use crate::domain::errors::{PrintError, QrError};
use async_trait::async_trait;
use shared_types::RollId;

/// Identifier returned by the printer gateway for a submitted job.
pub type PrintJobId = u64;

/// Label print job: only the fields the label template binds to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelRequest {
    pub qr_link: String,
    pub description: String,
}

/// QR code boundary.
///
/// Links are deterministic — `{base}/r/{roll_id}` and
/// `{base}/media/qrcodes/{roll_id}.png` — so they can be computed without
/// touching the generator. `generate` asks the external service to render
/// the image; a failure must not block roll creation.
#[async_trait]
pub trait QrCodeGenerator: Send + Sync {
    fn link(&self, roll_id: RollId) -> String;
    fn image_url(&self, roll_id: RollId) -> String;
    async fn generate(&self, roll_id: RollId) -> Result<(), QrError>;
}

/// Label-printer gateway. Errors are reported to the caller; the core never
/// retries automatically.
#[async_trait]
pub trait PrinterGateway: Send + Sync {
    async fn print_label(&self, request: &LabelRequest) -> Result<PrintJobId, PrintError>;
}

/// Mock implementations for testing
#[cfg(test)]
pub mod mocks {
    use super::*;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Mutex;

    /// Records generation requests; optionally fails them all.
    #[derive(Default)]
    pub struct MockQrGenerator {
        pub generated: Mutex<Vec<RollId>>,
        pub fail: AtomicBool,
    }

    impl MockQrGenerator {
        pub fn failing() -> Self {
            let mock = Self::default();
            mock.fail.store(true, Ordering::SeqCst);
            mock
        }
    }

    #[async_trait]
    impl QrCodeGenerator for MockQrGenerator {
        fn link(&self, roll_id: RollId) -> String {
            format!("http://test.local/r/{roll_id}")
        }

        fn image_url(&self, roll_id: RollId) -> String {
            format!("http://test.local/media/qrcodes/{roll_id}.png")
        }

        async fn generate(&self, roll_id: RollId) -> Result<(), QrError> {
            if self.fail.load(Ordering::SeqCst) {
                return Err(QrError::Generation("mock failure".into()));
            }
            self.generated.lock().unwrap().push(roll_id);
            Ok(())
        }
    }

    /// Accepts every job with an incrementing id.
    #[derive(Default)]
    pub struct MockPrinterGateway {
        pub jobs: Mutex<Vec<LabelRequest>>,
    }

    #[async_trait]
    impl PrinterGateway for MockPrinterGateway {
        async fn print_label(&self, request: &LabelRequest) -> Result<PrintJobId, PrintError> {
            let mut jobs = self.jobs.lock().unwrap();
            jobs.push(request.clone());
            Ok(jobs.len() as PrintJobId)
        }
    }
}

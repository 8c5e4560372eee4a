//! Receipt validation for payment submission.
//!
//! All validation runs before any network or storage call: an oversized
//! or non-image receipt is rejected inline with a validation error.

use bytes::Bytes;

use itqan_core::error::AppError;
use itqan_core::result::AppResult;

/// Parameters for submitting a payment claim.
#[derive(Debug, Clone)]
pub struct SubmitPaymentParams {
    /// The course the payment is for.
    pub course_id: uuid::Uuid,
    /// Claimed amount.
    pub amount: f64,
    /// MIME type declared for the receipt upload.
    pub content_type: String,
    /// Receipt image bytes.
    pub receipt: Bytes,
}

/// Validates a receipt upload and returns the file extension to store
/// it under.
pub(crate) fn validate_receipt(params: &SubmitPaymentParams, max_bytes: u64) -> AppResult<&'static str> {
    if params.amount <= 0.0 {
        return Err(AppError::validation("Amount must be greater than zero"));
    }

    crate::media::validate_image(&params.content_type, &params.receipt, max_bytes, "Receipt")
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    /// Minimal valid 1x1 PNG.
    const TINY_PNG: &[u8] = &[
        0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A, 0x00, 0x00, 0x00, 0x0D, 0x49, 0x48,
        0x44, 0x52, 0x00, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00, 0x01, 0x08, 0x06, 0x00, 0x00,
        0x00, 0x1F, 0x15, 0xC4, 0x89, 0x00, 0x00, 0x00, 0x0A, 0x49, 0x44, 0x41, 0x54, 0x78,
        0x9C, 0x63, 0x00, 0x01, 0x00, 0x00, 0x05, 0x00, 0x01, 0x0D, 0x0A, 0x2D, 0xB4, 0x00,
        0x00, 0x00, 0x00, 0x49, 0x45, 0x4E, 0x44, 0xAE, 0x42, 0x60, 0x82,
    ];

    fn make_params(content_type: &str, receipt: Bytes) -> SubmitPaymentParams {
        SubmitPaymentParams {
            course_id: Uuid::new_v4(),
            amount: 49.0,
            content_type: content_type.to_string(),
            receipt,
        }
    }

    #[test]
    fn test_accepts_valid_png() {
        let params = make_params("image/png", Bytes::from_static(TINY_PNG));
        assert_eq!(validate_receipt(&params, 5_242_880).unwrap(), "png");
    }

    #[test]
    fn test_rejects_oversized_receipt() {
        let params = make_params("image/png", Bytes::from_static(TINY_PNG));
        let err = validate_receipt(&params, 16).unwrap_err();
        assert_eq!(err.kind, itqan_core::error::ErrorKind::Validation);
    }

    #[test]
    fn test_rejects_non_image_content_type() {
        let params = make_params("application/pdf", Bytes::from_static(TINY_PNG));
        assert!(validate_receipt(&params, 5_242_880).is_err());
    }

    #[test]
    fn test_rejects_payload_that_is_not_an_image() {
        let params = make_params("image/png", Bytes::from_static(b"definitely not a png"));
        assert!(validate_receipt(&params, 5_242_880).is_err());
    }

    #[test]
    fn test_rejects_non_positive_amount() {
        let mut params = make_params("image/png", Bytes::from_static(TINY_PNG));
        params.amount = 0.0;
        assert!(validate_receipt(&params, 5_242_880).is_err());
    }

    #[test]
    fn test_rejects_empty_receipt() {
        let params = make_params("image/png", Bytes::new());
        assert!(validate_receipt(&params, 5_242_880).is_err());
    }
}

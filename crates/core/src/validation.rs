//! Batch-boundary validation shared by the evaluator entry points.

use crate::error::CoreError;

/// Reject an empty evaluation batch.
///
/// `message` is surfaced verbatim to the caller, e.g.
/// `"No telemetry available for anomaly detection"`.
pub fn validate_batch_not_empty<T>(batch: &[T], message: &str) -> Result<(), CoreError> {
    if batch.is_empty() {
        return Err(CoreError::Validation(message.to_string()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    #[test]
    fn empty_batch_is_rejected_with_message() {
        let batch: Vec<u8> = Vec::new();
        let err = validate_batch_not_empty(&batch, "No components provided").unwrap_err();
        assert_matches!(err, CoreError::Validation(msg) if msg == "No components provided");
    }

    #[test]
    fn non_empty_batch_passes() {
        assert!(validate_batch_not_empty(&[1], "unused").is_ok());
    }
}

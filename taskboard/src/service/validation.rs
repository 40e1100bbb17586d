use crate::service::ServiceError;
use crate::util::StrExt;

/// Trimmed value of a mandatory field. Absent and blank are both
/// rejected with `missing`.
pub(super) fn required(
    value: Option<&str>,
    missing: &str,
) -> Result<String, ServiceError> {
    value
        .and_then(|v| v.nonblank_to_some())
        .ok_or_else(|| ServiceError::Validation(missing.into()))
}

/// Trimmed value of a field that may be left out but not blanked.
pub(super) fn nonblank_if_present(
    value: Option<&str>,
    blank: &str,
) -> Result<Option<String>, ServiceError> {
    value
        .map(|v| v.nonblank_to_some()
            .ok_or_else(|| ServiceError::Validation(blank.into()))
        )
        .transpose()
}

/// Trimmed free text where blank means "none".
pub(super) fn optional(value: Option<&str>) -> Option<String> {
    value.and_then(|v| v.nonblank_to_some())
}

pub(super) fn max_len(
    value: &str,
    limit: usize,
    what: &str,
) -> Result<(), ServiceError> {
    if value.chars().count() > limit {
        Err(ServiceError::Validation(format!("{what} must be at most {limit} characters")))
    } else {
        Ok(())
    }
}

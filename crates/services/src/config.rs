use mathgen_core::model::{AiSettings, AiSettingsDraft, AiSettingsError};

/// Read generation settings through `lookup`, normally `std::env::var`.
///
/// `MATHGEN_AI_API_KEY` (or `GOOGLE_API_KEY`), `MATHGEN_AI_BASE_URL`,
/// `MATHGEN_AI_PROBLEM_MODEL`, `MATHGEN_AI_FEEDBACK_MODEL`, `MATHGEN_AI_TIMEOUT_SECS`.
///
/// # Errors
///
/// Returns `AiSettingsError` if the resulting settings fail validation.
pub fn ai_settings_from_lookup(
    lookup: impl Fn(&str) -> Option<String>,
) -> Result<AiSettings, AiSettingsError> {
    let api_key = lookup("MATHGEN_AI_API_KEY")
        .filter(|key| !key.trim().is_empty())
        .or_else(|| lookup("GOOGLE_API_KEY"));
    let timeout_secs = lookup("MATHGEN_AI_TIMEOUT_SECS").and_then(|raw| {
        let parsed = raw.trim().parse::<u64>().ok();
        if parsed.is_none() {
            tracing::warn!(value = %raw, "ignoring invalid MATHGEN_AI_TIMEOUT_SECS");
        }
        parsed
    });

    AiSettingsDraft {
        api_key,
        base_url: lookup("MATHGEN_AI_BASE_URL"),
        problem_model: lookup("MATHGEN_AI_PROBLEM_MODEL"),
        feedback_model: lookup("MATHGEN_AI_FEEDBACK_MODEL"),
        timeout_secs,
    }
    .validate()
}

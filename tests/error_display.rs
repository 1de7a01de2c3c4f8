use figco_lib::{ErrorCategory, FigcoError};

#[test]
fn config_error_display_includes_message() {
    let err = FigcoError::Config("missing stack".to_string());

    assert_eq!(format!("{}", err), "Configuration error: missing stack");
}

#[test]
fn io_error_display_wraps_source() {
    let io_err = std::io::Error::other("disk full");
    let err: FigcoError = io_err.into();
    let rendered = format!("{}", err);

    assert!(rendered.starts_with("IO error: "));
    assert!(rendered.contains("disk full"));
}

#[test]
fn figma_api_helper_includes_status_and_message() {
    let err = FigcoError::figma_api(Some(reqwest::StatusCode::NOT_FOUND), "not found");

    assert_eq!(
        format!("{}", err),
        "Figma API error (status: Some(404)): not found"
    );
}

#[test]
fn figma_api_helper_handles_missing_status() {
    let err = FigcoError::figma_api(None, "missing token");

    assert_eq!(
        format!("{}", err),
        "Figma API error (status: None): missing token"
    );
}

#[test]
fn translate_helper_uses_message() {
    let err = FigcoError::translate("hidden root");

    assert_eq!(format!("{}", err), "Translation error: hidden root");
}

#[test]
fn missing_token_payload_points_at_env_vars() {
    let payload =
        FigcoError::Config("Missing Figma token; set FIGMA_TOKEN".to_string()).to_payload();

    assert_eq!(payload.category, ErrorCategory::Config);
    assert!(payload
        .remediation
        .as_deref()
        .is_some_and(|hint| hint.contains("--token")));
}

#[test]
fn spawn_failure_payload_mentions_npm() {
    let payload = FigcoError::Process("Failed to spawn npm install: not found".into()).to_payload();

    assert_eq!(payload.category, ErrorCategory::Process);
    assert!(payload
        .remediation
        .as_deref()
        .is_some_and(|hint| hint.contains("npm")));
}

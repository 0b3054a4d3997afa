use super::*;

#[test]
fn validation_helper_formats_message() {
    let err = DesignError::validation("bad data URI");
    assert_eq!(err.to_string(), "validation error: bad data URI");
}

#[test]
fn summarization_helper_formats_message() {
    let err = DesignError::summarization("request failed");
    assert_eq!(err.to_string(), "summarization error: request failed");
}

#[test]
fn export_errors_pass_through_transparently() {
    let err = DesignError::from(ExportError::NoRenderedContent);
    assert_eq!(err.to_string(), "no rendered content to export");
    assert!(matches!(
        err,
        DesignError::Export(ExportError::NoRenderedContent)
    ));
}

#[test]
fn anyhow_errors_wrap_into_other() {
    let err: DesignError = anyhow::anyhow!("io went sideways").into();
    assert!(matches!(err, DesignError::Other(_)));
    assert_eq!(err.to_string(), "io went sideways");
}

#[test]
fn unknown_template_names_the_offending_id() {
    let err = DesignError::UnknownTemplate("tiktok".to_owned());
    assert_eq!(err.to_string(), "unknown template id 'tiktok'");
}

//! Verification email composition

use crate::services::email::EmailMessage;

/// Builds the verification email for a freshly issued token
///
/// The link lands on the frontend, which calls the verify endpoint and
/// renders the outcome.
pub(crate) fn verification_email(frontend_base_url: &str, to: &str, token: &str) -> EmailMessage {
    let link = format!(
        "{}/verify-email/{}",
        frontend_base_url.trim_end_matches('/'),
        token
    );

    let text = format!(
        "Welcome to GrowTeens!\n\n\
         Please confirm your email address by opening the link below. \
         The link is valid for 10 minutes.\n\n\
         {}\n\n\
         If you did not create a GrowTeens account, you can ignore this email.",
        link
    );

    let html = format!(
        "<p>Welcome to GrowTeens!</p>\
         <p>Please confirm your email address by clicking the link below. \
         The link is valid for 10 minutes.</p>\
         <p><a href=\"{}\">Verify my email</a></p>\
         <p>If you did not create a GrowTeens account, you can ignore this email.</p>",
        link
    );

    EmailMessage::new(
        to.to_string(),
        "Verify your GrowTeens account".to_string(),
        text,
    )
    .with_html(html)
}

//! Message bodies.

use super::MailMessage;

/// Verification code email in HTML and plain text.
pub fn verification_email(
    to_email: &str,
    to_name: &str,
    code: &str,
    ttl_minutes: u64,
) -> MailMessage {
    let text = format!(
        "Hello {to_name},\n\n\
         Your verification code is: {code}\n\n\
         The code expires in {ttl_minutes} minutes. \
         If you did not request it, you can ignore this message.\n"
    );
    let html = format!(
        "<html><body style=\"font-family: sans-serif\">\
         <p>Hello {name},</p>\
         <p>Your verification code is:</p>\
         <p style=\"font-size: 28px; letter-spacing: 6px\"><strong>{code}</strong></p>\
         <p>The code expires in {ttl_minutes} minutes. \
         If you did not request it, you can ignore this message.</p>\
         </body></html>",
        name = escape_html(to_name),
    );

    MailMessage {
        to_email: to_email.to_string(),
        to_name: to_name.to_string(),
        subject: "Your verification code".to_string(),
        html,
        text,
    }
}

fn escape_html(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '&' => out.push_str("&amp;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

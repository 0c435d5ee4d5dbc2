//! Branded HTML wrapper shared by every outbound email.

const BRAND: &str = "Vortextsoft";

/// Wraps `body_html` in the branded layout addressed to `recipient_name`.
///
/// `body_html` is inserted verbatim; callers escape any visitor-supplied text
/// with [`escape`] before building it.
pub fn render(recipient_name: &str, body_html: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{BRAND}</title>
</head>
<body style="margin: 0; padding: 0; font-family: 'Segoe UI', Tahoma, Geneva, Verdana, sans-serif; background-color: #f4f6f8;">
    <table width="100%" cellpadding="0" cellspacing="0" style="background-color: #f4f6f8; padding: 20px 0;">
        <tr>
            <td align="center">
                <table width="600" cellpadding="0" cellspacing="0" style="background-color: #ffffff; border-radius: 8px; overflow: hidden;">
                    <tr>
                        <td style="background: linear-gradient(135deg, #00C8CC 0%, #0099CC 100%); padding: 30px; text-align: center;">
                            <h1 style="color: #ffffff; margin: 0;">{BRAND}</h1>
                        </td>
                    </tr>
                    <tr>
                        <td style="padding: 30px; color: #333333; font-size: 16px; line-height: 1.6;">
                            <p>Dear {name},</p>
                            {body_html}
                            <p>Best regards,<br>The {BRAND} Team</p>
                        </td>
                    </tr>
                    <tr>
                        <td style="padding: 20px; text-align: center; color: #999999; font-size: 12px;">
                            &copy; {BRAND}. All rights reserved.
                        </td>
                    </tr>
                </table>
            </td>
        </tr>
    </table>
</body>
</html>"#,
        name = escape(recipient_name),
    )
}

pub fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

use vx_mailer::MailPayload;

use crate::context::ApiRestCtx;

pub mod auth;
pub mod meeting;
pub mod message;
pub mod resource;
pub mod root;
pub mod upload;

/// Hands `payload` to the mailer task and returns immediately. A missing or
/// stopped mailer is logged and otherwise ignored.
fn send_mail(ctx: &ApiRestCtx, payload: MailPayload) {
    match ctx.mailer() {
        Some(mailer) => {
            if let Err(err) = mailer.sender().send(payload) {
                vx_log::error(None, format!("[ApiRestServer] {err}"));
            }
        }
        None => vx_log::warn(
            None,
            format!(
                "[ApiRestServer] Mailer is not configured, skipping '{}' to {}",
                payload.subject(),
                payload.to()
            ),
        ),
    }
}

use actix_web_httpauth::extractors::bearer::BearerAuth;
use vx_error::{Error, Result};
use vx_token_jwt::claim::Claim;

use crate::context::ApiRestCtx;

/// Decodes the bearer token and requires the `admin` role.
pub fn admin_claim(ctx: &ApiRestCtx, auth: &Option<BearerAuth>) -> Result<Claim> {
    let auth = auth
        .as_ref()
        .ok_or_else(|| Error::Unauthenticated("No token provided".to_owned()))?;

    let claim = ctx.token().jwt().decode(auth.token())?;
    if !claim.is_admin() {
        return Err(Error::Forbidden("Access denied. Admin only.".to_owned()));
    }

    Ok(claim)
}

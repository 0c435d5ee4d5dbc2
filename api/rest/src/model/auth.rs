use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;
use vx_dao::admin::AdminDao;

#[derive(Deserialize, Validate)]
pub struct RequestOtpReqJson {
    #[validate(email(message = "Invalid email address"))]
    email: String,
}

impl RequestOtpReqJson {
    pub fn email(&self) -> &str {
        &self.email
    }
}

#[derive(Serialize)]
pub struct RequestOtpResJson {
    success: bool,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    otp: Option<String>,
}

impl RequestOtpResJson {
    pub fn new(message: &str, otp: &Option<String>) -> Self {
        Self {
            success: true,
            message: message.to_owned(),
            otp: otp.clone(),
        }
    }
}

#[derive(Deserialize)]
pub struct VerifyOtpReqJson {
    #[serde(default)]
    email: String,
    #[serde(default, alias = "code")]
    otp: String,
}

impl VerifyOtpReqJson {
    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn otp(&self) -> &str {
        &self.otp
    }
}

#[derive(Serialize)]
pub struct VerifyOtpResJson {
    success: bool,
    user: AdminResJson,
    token: String,
}

impl VerifyOtpResJson {
    pub fn new(user: AdminResJson, token: &str) -> Self {
        Self {
            success: true,
            user,
            token: token.to_owned(),
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminResJson {
    id: Uuid,
    email: String,
    role: String,
    created_at: DateTime<Utc>,
}

impl From<&AdminDao> for AdminResJson {
    fn from(admin: &AdminDao) -> Self {
        Self {
            id: *admin.id(),
            email: admin.email().to_owned(),
            role: admin.role().to_owned(),
            created_at: *admin.created_at(),
        }
    }
}

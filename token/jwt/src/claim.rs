use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub const ADMIN_ROLE: &str = "admin";

#[derive(Deserialize, Serialize, Clone, Debug, PartialEq, Eq)]
pub struct Claim {
    sub: Uuid,
    email: String,
    role: String,
    iat: u64,
    exp: u64,
}

impl Claim {
    pub fn new(sub: &Uuid, email: &str, role: &str, iat: &u64, exp: &u64) -> Self {
        Self {
            sub: *sub,
            email: email.to_owned(),
            role: role.to_owned(),
            iat: *iat,
            exp: *exp,
        }
    }

    pub fn sub(&self) -> &Uuid {
        &self.sub
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn role(&self) -> &str {
        &self.role
    }

    pub fn iat(&self) -> &u64 {
        &self.iat
    }

    pub fn exp(&self) -> &u64 {
        &self.exp
    }

    pub fn is_admin(&self) -> bool {
        self.role == ADMIN_ROLE
    }
}

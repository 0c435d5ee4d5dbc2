/// Failure kinds shared by the persistence layer, the workflows and the REST surface.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Missing or malformed input.
    #[error("{0}")]
    Validation(String),
    #[error("{0}")]
    NotFound(String),
    /// No session token, or one that is malformed, tampered with or expired.
    #[error("{0}")]
    Unauthenticated(String),
    /// A valid session whose role may not use the route.
    #[error("{0}")]
    Forbidden(String),
    /// A one-time code that does not match any unused code for the email.
    #[error("{0}")]
    InvalidCredentials(String),
    /// A one-time code that matched but is past its expiry.
    #[error("{0}")]
    Expired(String),
    #[error("{0}")]
    Storage(String),
    /// Mail or SMS send failure. Logged by the sender, never fatal to a workflow.
    #[error("{0}")]
    Delivery(String),
    #[error("{0}")]
    Internal(String),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    pub fn status_code(&self) -> u16 {
        match self {
            Self::Validation(_) => 400,
            Self::Unauthenticated(_) | Self::InvalidCredentials(_) | Self::Expired(_) => 401,
            Self::Forbidden(_) => 403,
            Self::NotFound(_) => 404,
            Self::Storage(_) | Self::Delivery(_) | Self::Internal(_) => 500,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Self::Validation(_) => "VALIDATION",
            Self::NotFound(_) => "NOT_FOUND",
            Self::Unauthenticated(_) => "UNAUTHENTICATED",
            Self::Forbidden(_) => "FORBIDDEN",
            Self::InvalidCredentials(_) => "INVALID_CREDENTIALS",
            Self::Expired(_) => "EXPIRED",
            Self::Storage(_) => "STORAGE",
            Self::Delivery(_) => "DELIVERY",
            Self::Internal(_) => "INTERNAL",
        }
    }

    /// Server-side failures whose message must not reach the client verbatim.
    pub fn is_opaque(&self) -> bool {
        matches!(
            self,
            Self::Storage(_) | Self::Delivery(_) | Self::Internal(_)
        )
    }

    pub fn item_not_found() -> Self {
        Self::NotFound("Item not found".to_owned())
    }
}

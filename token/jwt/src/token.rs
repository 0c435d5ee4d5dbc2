use std::time::{Duration, SystemTime, UNIX_EPOCH};

use jsonwebtoken::{
    decode, encode, errors::ErrorKind, Algorithm, DecodingKey, EncodingKey, Header, Validation,
};
use uuid::Uuid;
use vx_error::{Error, Result};

use crate::claim::Claim;

pub struct JwtToken {
    header: Header,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    expiry_duration: Duration,
}

impl JwtToken {
    pub fn new(secret: &str, expiry_duration: &Duration) -> Self {
        vx_log::info(Some("⚡"), "[JwtToken] Initializing component");

        let secret = secret.as_bytes();
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;

        Self {
            header: Header::new(Algorithm::HS256),
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            validation,
            expiry_duration: *expiry_duration,
        }
    }

    pub fn expiry_duration(&self) -> &Duration {
        &self.expiry_duration
    }

    pub fn encode(&self, id: &Uuid, email: &str, role: &str) -> Result<String> {
        let now = unix_now()?;
        self.encode_claim(&Claim::new(
            id,
            email,
            role,
            &now,
            &(now + self.expiry_duration.as_secs()),
        ))
    }

    pub fn encode_claim(&self, claim: &Claim) -> Result<String> {
        encode(&self.header, claim, &self.encoding_key)
            .map_err(|err| Error::Internal(format!("Failed to sign session token: {err}")))
    }

    pub fn decode(&self, token: &str) -> Result<Claim> {
        match decode::<Claim>(token, &self.decoding_key, &self.validation) {
            Ok(data) => Ok(data.claims),
            Err(err) => match err.kind() {
                ErrorKind::ExpiredSignature => Err(Error::Unauthenticated("Token expired".to_owned())),
                _ => Err(Error::Unauthenticated("Invalid token".to_owned())),
            },
        }
    }
}

fn unix_now() -> Result<u64> {
    Ok(SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_err(|err| Error::Internal(err.to_string()))?
        .as_secs())
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use uuid::Uuid;
    use vx_error::Error;

    use super::{unix_now, JwtToken};
    use crate::claim::Claim;

    fn jwt() -> JwtToken {
        JwtToken::new("test-secret", &Duration::from_secs(3600))
    }

    #[test]
    fn encoded_token_round_trips_identity() {
        let jwt = jwt();
        let id = Uuid::now_v7();

        let token = jwt.encode(&id, "admin@vortextsoft.com", "admin").unwrap();
        let claim = jwt.decode(&token).unwrap();

        assert_eq!(claim.sub(), &id);
        assert_eq!(claim.email(), "admin@vortextsoft.com");
        assert!(claim.is_admin());
        assert_eq!(claim.exp() - claim.iat(), 3600);
    }

    #[test]
    fn expired_token_is_reported_as_expired() {
        let jwt = jwt();
        let now = unix_now().unwrap();
        let token = jwt
            .encode_claim(&Claim::new(
                &Uuid::now_v7(),
                "admin@vortextsoft.com",
                "admin",
                &(now - 7200),
                &(now - 3600),
            ))
            .unwrap();

        match jwt.decode(&token) {
            Err(Error::Unauthenticated(msg)) => assert_eq!(msg, "Token expired"),
            other => panic!("expected expired token, got {other:?}"),
        }
    }

    #[test]
    fn token_signed_with_other_secret_is_invalid() {
        let other = JwtToken::new("another-secret", &Duration::from_secs(3600));
        let token = other
            .encode(&Uuid::now_v7(), "admin@vortextsoft.com", "admin")
            .unwrap();

        match jwt().decode(&token) {
            Err(Error::Unauthenticated(msg)) => assert_eq!(msg, "Invalid token"),
            other => panic!("expected invalid token, got {other:?}"),
        }
        assert!(jwt().decode("not-a-jwt").is_err());
    }

    #[test]
    fn non_admin_role_is_not_admin() {
        let jwt = jwt();
        let token = jwt.encode(&Uuid::now_v7(), "editor@vortextsoft.com", "editor").unwrap();
        assert!(!jwt.decode(&token).unwrap().is_admin());
    }
}

//! HMAC-SHA256 session tokens in compact JWS form.
//!
//! A token is `base64url(header).base64url(claims).base64url(mac)` with header
//! `{"alg":"HS256","typ":"JWT"}` and claims `{userId, username, iat}`. Tokens
//! do not expire.

use std::sync::Arc;

use base64::Engine as _;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use hmac::{Hmac, Mac};
use mockable::{Clock, DefaultClock};
use serde::{Deserialize, Serialize};
use sha2::Sha256;
use zeroize::Zeroizing;

use crate::domain::ports::{TokenError, TokenService};
use crate::domain::{SessionIdentity, UserId, Username};

type HmacSha256 = Hmac<Sha256>;

const ALGORITHM: &str = "HS256";

#[derive(Debug, Serialize, Deserialize)]
struct Header {
    alg: String,
    typ: String,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Claims {
    user_id: i64,
    username: String,
    iat: i64,
}

/// Token signer holding the server secret.
#[derive(Clone)]
pub struct HmacTokenService {
    secret: Arc<Zeroizing<Vec<u8>>>,
    clock: Arc<dyn Clock + Send + Sync>,
}

impl std::fmt::Debug for HmacTokenService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HmacTokenService")
            .field("secret", &"<redacted>")
            .finish_non_exhaustive()
    }
}

impl HmacTokenService {
    /// Create a signer using the system clock for `iat`.
    pub fn new(secret: Zeroizing<Vec<u8>>) -> Self {
        Self::with_clock(secret, Arc::new(DefaultClock))
    }

    /// Create a signer with an explicit clock.
    pub fn with_clock(secret: Zeroizing<Vec<u8>>, clock: Arc<dyn Clock + Send + Sync>) -> Self {
        Self {
            secret: Arc::new(secret),
            clock,
        }
    }

    fn mac(&self) -> Result<HmacSha256, TokenError> {
        HmacSha256::new_from_slice(&self.secret)
            .map_err(|err| TokenError::issue(format!("invalid signing key: {err}")))
    }

    fn encode_segment<T: Serialize>(value: &T) -> Result<String, TokenError> {
        let json = serde_json::to_vec(value).map_err(|err| TokenError::issue(err.to_string()))?;
        Ok(URL_SAFE_NO_PAD.encode(json))
    }

    fn decode_segment<T: for<'de> Deserialize<'de>>(segment: &str) -> Result<T, TokenError> {
        let bytes = URL_SAFE_NO_PAD
            .decode(segment)
            .map_err(|err| TokenError::malformed(err.to_string()))?;
        serde_json::from_slice(&bytes).map_err(|err| TokenError::malformed(err.to_string()))
    }
}

impl TokenService for HmacTokenService {
    fn issue(&self, identity: &SessionIdentity) -> Result<String, TokenError> {
        let header = Self::encode_segment(&Header {
            alg: ALGORITHM.to_owned(),
            typ: "JWT".to_owned(),
        })?;
        let claims = Self::encode_segment(&Claims {
            user_id: identity.user_id().get(),
            username: identity.username().to_string(),
            iat: self.clock.utc().timestamp(),
        })?;
        let signing_input = format!("{header}.{claims}");

        let mut mac = self.mac()?;
        mac.update(signing_input.as_bytes());
        let signature = URL_SAFE_NO_PAD.encode(mac.finalize().into_bytes());

        Ok(format!("{signing_input}.{signature}"))
    }

    fn verify(&self, token: &str) -> Result<SessionIdentity, TokenError> {
        let mut segments = token.split('.');
        let (Some(header), Some(claims), Some(signature), None) = (
            segments.next(),
            segments.next(),
            segments.next(),
            segments.next(),
        ) else {
            return Err(TokenError::malformed("expected three segments"));
        };

        let signature = URL_SAFE_NO_PAD
            .decode(signature)
            .map_err(|err| TokenError::malformed(err.to_string()))?;
        let mut mac = self.mac()?;
        mac.update(header.as_bytes());
        mac.update(b".");
        mac.update(claims.as_bytes());
        mac.verify_slice(&signature)
            .map_err(|_| TokenError::bad_signature())?;

        let header: Header = Self::decode_segment(header)?;
        if header.alg != ALGORITHM {
            return Err(TokenError::malformed(format!(
                "unsupported algorithm {}",
                header.alg
            )));
        }
        let claims: Claims = Self::decode_segment(claims)?;
        let username =
            Username::new(&claims.username).map_err(|err| TokenError::malformed(err.to_string()))?;

        Ok(SessionIdentity::new(UserId::new(claims.user_id), username))
    }
}

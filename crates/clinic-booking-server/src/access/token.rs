// SPDX-License-Identifier: Apache-2.0

use std::fmt;
use std::time::Duration;

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine as _;
use clinic_booking_core::AccountId;
use clinic_booking_model::{Account, Role};
use hmac::{Hmac, Mac};
use serde::{Deserialize, Serialize};
use sha2::Sha256;

const TOKEN_VERSION: &str = "v1";

type HmacSha256 = Hmac<Sha256>;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenClaims {
    pub sub: i64,
    pub username: String,
    pub role: Role,
    pub iat: i64,
    pub exp: i64,
}

impl TokenClaims {
    pub fn account_id(&self) -> Result<AccountId, TokenError> {
        AccountId::new(self.sub).map_err(|_| TokenError::Malformed)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenError {
    Malformed,
    BadSignature,
    Expired,
}

impl fmt::Display for TokenError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Malformed => f.write_str("malformed bearer token"),
            Self::BadSignature => f.write_str("bearer token signature mismatch"),
            Self::Expired => f.write_str("bearer token expired"),
        }
    }
}

impl std::error::Error for TokenError {}

/// Issues and checks `v1.<claims>.<signature>` bearer tokens, both parts
/// base64url without padding, the signature being HMAC-SHA256 over
/// `v1.<claims>`.
#[derive(Clone)]
pub struct TokenSigner {
    key: Vec<u8>,
    ttl: Duration,
}

impl fmt::Debug for TokenSigner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenSigner")
            .field("ttl", &self.ttl)
            .finish_non_exhaustive()
    }
}

impl TokenSigner {
    #[must_use]
    pub fn new(secret: &[u8], ttl: Duration) -> Self {
        Self {
            key: secret.to_vec(),
            ttl,
        }
    }

    fn mac(&self) -> Result<HmacSha256, TokenError> {
        HmacSha256::new_from_slice(&self.key).map_err(|_| TokenError::BadSignature)
    }

    pub fn issue(&self, account: &Account, now_unix: i64) -> Result<String, TokenError> {
        let ttl = i64::try_from(self.ttl.as_secs()).unwrap_or(i64::MAX);
        let claims = TokenClaims {
            sub: account.id.get(),
            username: account.username.clone(),
            role: account.role,
            iat: now_unix,
            exp: now_unix.saturating_add(ttl),
        };
        let payload = serde_json::to_vec(&claims).map_err(|_| TokenError::Malformed)?;
        let signed = format!("{TOKEN_VERSION}.{}", URL_SAFE_NO_PAD.encode(payload));
        let mut mac = self.mac()?;
        mac.update(signed.as_bytes());
        let signature = URL_SAFE_NO_PAD.encode(mac.finalize().into_bytes());
        Ok(format!("{signed}.{signature}"))
    }

    pub fn verify(&self, token: &str, now_unix: i64) -> Result<TokenClaims, TokenError> {
        let (signed, signature) = token.rsplit_once('.').ok_or(TokenError::Malformed)?;
        let (version, payload) = signed.split_once('.').ok_or(TokenError::Malformed)?;
        if version != TOKEN_VERSION {
            return Err(TokenError::Malformed);
        }
        let signature = URL_SAFE_NO_PAD
            .decode(signature)
            .map_err(|_| TokenError::Malformed)?;
        let mut mac = self.mac()?;
        mac.update(signed.as_bytes());
        mac.verify_slice(&signature)
            .map_err(|_| TokenError::BadSignature)?;

        let payload = URL_SAFE_NO_PAD
            .decode(payload)
            .map_err(|_| TokenError::Malformed)?;
        let claims: TokenClaims =
            serde_json::from_slice(&payload).map_err(|_| TokenError::Malformed)?;
        if claims.exp <= now_unix {
            return Err(TokenError::Expired);
        }
        Ok(claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, Utc};

    fn account() -> Account {
        Account {
            id: AccountId::new(42).expect("id"),
            username: "patient1".to_string(),
            email: "p@example.com".to_string(),
            full_name: "Patient One".to_string(),
            birth_date: NaiveDate::from_ymd_opt(1990, 1, 1).expect("date"),
            phone: "555".to_string(),
            role: Role::Patient,
            created_at: Utc::now(),
        }
    }

    fn signer() -> TokenSigner {
        TokenSigner::new(b"0123456789abcdef", Duration::from_secs(60))
    }

    #[test]
    fn issued_tokens_verify_until_expiry() {
        let token = signer().issue(&account(), 1_000).expect("issue");
        assert!(token.starts_with("v1."));
        let claims = signer().verify(&token, 1_059).expect("fresh");
        assert_eq!(claims.sub, 42);
        assert_eq!(claims.role, Role::Patient);
        assert_eq!(signer().verify(&token, 1_060), Err(TokenError::Expired));
    }

    #[test]
    fn tampered_claims_fail_the_signature() {
        let token = signer().issue(&account(), 1_000).expect("issue");
        let mut parts: Vec<&str> = token.split('.').collect();
        let forged = URL_SAFE_NO_PAD.encode(
            br#"{"sub":42,"username":"patient1","role":"admin","iat":1000,"exp":9999999999}"#,
        );
        parts[1] = &forged;
        let forged_token = parts.join(".");
        assert_eq!(
            signer().verify(&forged_token, 1_001),
            Err(TokenError::BadSignature)
        );
    }

    #[test]
    fn other_keys_and_garbage_are_rejected() {
        let token = signer().issue(&account(), 1_000).expect("issue");
        let other = TokenSigner::new(b"fedcba9876543210", Duration::from_secs(60));
        assert_eq!(other.verify(&token, 1_001), Err(TokenError::BadSignature));
        assert_eq!(signer().verify("nonsense", 1_001), Err(TokenError::Malformed));
        assert_eq!(
            signer().verify("v2.e30.AAAA", 1_001),
            Err(TokenError::Malformed)
        );
    }
}

//! Short-lived signed video access tokens.
//!
//! A token is a stateless capability binding (lecture, user, expiry). It is
//! signed, not encrypted: the payload is not confidential, only unforgeable.
//! Validity is purely a function of the signature and the embedded expiry,
//! so streaming needs no server-side session store, and a short TTL bounds
//! the exposure window if a token leaks.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use hmac::{Hmac, Mac};
use serde::{Deserialize, Serialize};
use sha2::Sha256;
use subtle::ConstantTimeEq;

use crate::domain::foundation::{LectureId, Timestamp, UserId};

type HmacSha256 = Hmac<Sha256>;

/// Claims embedded in a video access token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VideoTokenClaims {
    pub lecture_id: LectureId,
    pub user_id: UserId,
    /// Expiry as Unix seconds.
    pub exp: i64,
}

/// Issues and verifies video access tokens.
///
/// Uses a dedicated signing secret, distinct from the general auth secret,
/// so rotating one does not invalidate the other.
pub struct VideoTokenService {
    signing_secret: String,
}

impl VideoTokenService {
    pub fn new(signing_secret: impl Into<String>) -> Self {
        Self {
            signing_secret: signing_secret.into(),
        }
    }

    /// Issues a token for `lecture_id` + `user_id`, valid for `ttl_secs`.
    ///
    /// Format: `base64url(claims-json) . base64url(hmac-sha256(payload))`.
    pub fn issue(&self, lecture_id: LectureId, user_id: UserId, ttl_secs: i64) -> String {
        let claims = VideoTokenClaims {
            lecture_id,
            user_id,
            exp: Timestamp::now().plus_secs(ttl_secs).as_unix_secs(),
        };
        let payload = serde_json::to_vec(&claims).expect("claims serialize to JSON");
        let payload_b64 = URL_SAFE_NO_PAD.encode(&payload);
        let signature = self.sign(payload_b64.as_bytes());
        format!("{}.{}", payload_b64, URL_SAFE_NO_PAD.encode(signature))
    }

    /// Verifies a token, returning its claims when the signature is valid
    /// and the token has not expired.
    ///
    /// Invalid tokens are an expected, frequent input (expired players,
    /// copied URLs), so failure is a value, never an error.
    pub fn verify(&self, token: &str) -> Option<VideoTokenClaims> {
        let (payload_b64, signature_b64) = token.split_once('.')?;
        let candidate = URL_SAFE_NO_PAD.decode(signature_b64).ok()?;
        let expected = self.sign(payload_b64.as_bytes());

        if candidate.len() != expected.len() {
            return None;
        }
        if !bool::from(expected.as_slice().ct_eq(&candidate)) {
            return None;
        }

        let payload = URL_SAFE_NO_PAD.decode(payload_b64).ok()?;
        let claims: VideoTokenClaims = serde_json::from_slice(&payload).ok()?;

        if claims.exp < Timestamp::now().as_unix_secs() {
            return None;
        }
        Some(claims)
    }

    fn sign(&self, message: &[u8]) -> Vec<u8> {
        let mut mac = HmacSha256::new_from_slice(self.signing_secret.as_bytes())
            .expect("HMAC accepts any key length");
        mac.update(message);
        mac.finalize().into_bytes().to_vec()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "video-signing-secret-test";

    fn service() -> VideoTokenService {
        VideoTokenService::new(SECRET)
    }

    #[test]
    fn issued_token_verifies_immediately() {
        let lecture_id = LectureId::new();
        let user_id = UserId::new();

        let token = service().issue(lecture_id, user_id, 900);
        let claims = service().verify(&token).expect("token should verify");

        assert_eq!(claims.lecture_id, lecture_id);
        assert_eq!(claims.user_id, user_id);
    }

    #[test]
    fn expired_token_fails_verification() {
        // Negative TTL puts the expiry in the past
        let token = service().issue(LectureId::new(), UserId::new(), -1);
        assert!(service().verify(&token).is_none());
    }

    #[test]
    fn token_signed_with_wrong_secret_never_verifies() {
        let other = VideoTokenService::new("some-other-secret");
        let token = other.issue(LectureId::new(), UserId::new(), 900);
        assert!(service().verify(&token).is_none());
    }

    #[test]
    fn tampered_payload_fails_verification() {
        let token = service().issue(LectureId::new(), UserId::new(), 900);
        let (_, signature) = token.split_once('.').unwrap();

        let forged_claims = VideoTokenClaims {
            lecture_id: LectureId::new(),
            user_id: UserId::new(),
            exp: Timestamp::now().plus_secs(9000).as_unix_secs(),
        };
        let forged_payload =
            URL_SAFE_NO_PAD.encode(serde_json::to_vec(&forged_claims).unwrap());
        let forged = format!("{}.{}", forged_payload, signature);

        assert!(service().verify(&forged).is_none());
    }

    #[test]
    fn malformed_token_fails_without_panicking() {
        assert!(service().verify("").is_none());
        assert!(service().verify("no-dot-here").is_none());
        assert!(service().verify("a.b").is_none());
        assert!(service().verify("!!!.???").is_none());
    }

    #[test]
    fn expiry_is_ttl_from_now() {
        let before = Timestamp::now().as_unix_secs();
        let token = service().issue(LectureId::new(), UserId::new(), 900);
        let after = Timestamp::now().as_unix_secs();

        let claims = service().verify(&token).unwrap();
        assert!(claims.exp >= before + 900);
        assert!(claims.exp <= after + 900);
    }
}

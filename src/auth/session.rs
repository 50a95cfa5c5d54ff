#![allow(dead_code)]
//! Session tokens. §6 calls for an opaque HMAC-signed value; this crate
//! already depends on `jsonwebtoken` for exactly that purpose (an HS256
//! token *is* a signed opaque value bearing a body and a MAC over it), so
//! that's what backs it here rather than hand-rolling HMAC — see
//! DESIGN.md's Open Question log for why.

use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::shared::config::SERVICE_CONFIG;

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct SessionClaims {
    pub sub: String, // user id
    pub exp: usize,
}

pub fn issue_token(user_id: &str) -> Result<(String, i64), jsonwebtoken::errors::Error> {
    let lifetime_secs = SERVICE_CONFIG.session_lifetime_days * 24 * 60 * 60;
    let exp_secs = now_secs() + lifetime_secs as i64;
    let claims = SessionClaims { sub: user_id.to_string(), exp: exp_secs as usize };
    let token = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(SERVICE_CONFIG.session_secret.as_bytes()),
    )?;
    Ok((token, exp_secs))
}

pub fn verify_token(token: &str) -> Option<String> {
    let data = decode::<SessionClaims>(
        token,
        &DecodingKey::from_secret(SERVICE_CONFIG.session_secret.as_bytes()),
        &Validation::default(),
    )
    .ok()?;
    Some(data.claims.sub)
}

fn now_secs() -> i64 {
    use std::time::{SystemTime, UNIX_EPOCH};
    SystemTime::now().duration_since(UNIX_EPOCH).unwrap_or_default().as_secs() as i64
}

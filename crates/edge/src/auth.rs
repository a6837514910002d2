use crate::state::AppState;
use axum::{
    body::Body,
    extract::State,
    http::{HeaderMap, Request, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};
use base64::{engine::general_purpose, Engine};
use chrono::{DateTime, Utc};
use domain::capability::{Role, Viewer};
use serde::Deserialize;
use sha2::{Digest, Sha256};
use std::path::{Path, PathBuf};

/// base64 DER of the client certificate, set by the TLS-terminating proxy.
pub const HDR_CLIENT_CERT_DER: &str = "x-client-cert-der";

/// One user per certificate, stored as `<auth_dir>/<sha256-of-der>.toml`.
#[derive(Debug, Deserialize)]
pub struct UserRecord {
    pub role: Option<String>,
    pub name: Option<String>,
    /// RFC3339 bounds; either may be omitted.
    pub not_before: Option<String>,
    pub not_after: Option<String>,
}

/// Admin gate: 401 without a certificate, 403 when it maps to no usable
/// user. On success the `Viewer` is added to request extensions.
#[tracing::instrument(skip_all)]
pub async fn gate(State(app): State<AppState>, mut req: Request<Body>, next: Next) -> Response {
    // 1) Extract client cert from header passed by the proxy
    let der = match extract_cert_der(req.headers()) {
        Ok(b) => b,
        Err(msg) => return (StatusCode::UNAUTHORIZED, msg).into_response(),
    };

    // 2) Fingerprint + load <auth_dir>/<fp>.toml
    let fp = sha256_hex(&der);
    let rec = match read_user(&app.auth_dir, &fp).await {
        Ok(Some(r)) => r,
        Ok(None) => return (StatusCode::FORBIDDEN, "unknown fingerprint").into_response(),
        Err(e) => {
            tracing::warn!(%fp, error = %e, "auth record unreadable");
            return (StatusCode::FORBIDDEN, "auth file error").into_response();
        }
    };

    // 3) Policy
    let Some(role) = rec.role.as_deref().and_then(|r| r.parse::<Role>().ok()) else {
        return (StatusCode::FORBIDDEN, "unauthorized role").into_response();
    };
    if !within_window(&rec, Utc::now()) {
        return (StatusCode::FORBIDDEN, "certificate window invalid").into_response();
    }

    let name = rec.name.unwrap_or_else(|| fp[..12].to_string());
    tracing::debug!(%name, %role, "viewer authenticated");
    req.extensions_mut().insert(Viewer::new(name, role));

    next.run(req).await
}

// ---------- helpers ----------

#[tracing::instrument(skip_all)]
fn decode_b64(s: &str) -> Result<Vec<u8>, String> {
    general_purpose::STANDARD
        .decode(s)
        // try a few common variants in case padding/URL-safe differs
        .or_else(|_| general_purpose::STANDARD_NO_PAD.decode(s))
        .or_else(|_| general_purpose::URL_SAFE.decode(s))
        .or_else(|_| general_purpose::URL_SAFE_NO_PAD.decode(s))
        .map_err(|e| format!("bad base64: {e}"))
}

#[tracing::instrument(skip_all)]
fn extract_cert_der(headers: &HeaderMap) -> Result<Vec<u8>, String> {
    let v = headers
        .get(HDR_CLIENT_CERT_DER)
        .ok_or_else(|| "missing client cert".to_string())?;
    let b64 = v.to_str().map_err(|_| "bad cert header utf8".to_string())?;
    decode_b64(b64.trim()).map_err(|_| "bad base64".to_string())
}

pub fn sha256_hex(bytes: &[u8]) -> String {
    let mut h = Sha256::new();
    h.update(bytes);
    hex::encode(h.finalize())
}

/// Each bound is enforced on its own; an unparseable bound fails closed.
fn within_window(rec: &UserRecord, now: DateTime<Utc>) -> bool {
    let parse = |s: &str| DateTime::parse_from_rfc3339(s).map(|d| d.with_timezone(&Utc));

    if let Some(nb) = &rec.not_before {
        match parse(nb) {
            Ok(nb) if now >= nb => {}
            _ => return false,
        }
    }
    if let Some(na) = &rec.not_after {
        match parse(na) {
            Ok(na) if now <= na => {}
            _ => return false,
        }
    }
    true
}

#[tracing::instrument(skip_all)]
async fn read_user(dir: &Path, fp_hex: &str) -> Result<Option<UserRecord>, String> {
    let path: PathBuf = dir.join(format!("{fp_hex}.toml"));
    let text = match tokio::fs::read_to_string(&path).await {
        Ok(t) => t,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(e.to_string()),
    };
    toml::from_str(&text).map(Some).map_err(|e| e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn rec(nb: Option<&str>, na: Option<&str>) -> UserRecord {
        UserRecord {
            role: Some("editor".into()),
            name: None,
            not_before: nb.map(String::from),
            not_after: na.map(String::from),
        }
    }

    #[test]
    fn sha256_works() {
        let fp = sha256_hex(b"abc");
        // known SHA-256 of "abc"
        assert_eq!(
            fp,
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }

    #[test]
    fn decodes_padding_variants() {
        assert_eq!(decode_b64("YWJj").unwrap(), b"abc");
        assert_eq!(decode_b64("YWI=").unwrap(), b"ab");
        assert_eq!(decode_b64("YWI").unwrap(), b"ab");
        assert!(decode_b64("***").is_err());
    }

    #[test]
    fn window_checks() {
        let now = Utc::now();
        let past = (now - Duration::days(1)).to_rfc3339();
        let future = (now + Duration::days(1)).to_rfc3339();

        assert!(within_window(&rec(None, None), now));
        assert!(within_window(&rec(Some(&past), Some(&future)), now));
        assert!(within_window(&rec(Some(&past), None), now));
        assert!(!within_window(&rec(Some(&future), None), now));
        assert!(!within_window(&rec(None, Some(&past)), now));
        assert!(!within_window(&rec(Some("yesterday"), None), now));
    }

    #[tokio::test]
    async fn reads_records_and_ignores_extra_keys() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("abc.toml"),
            "role = \"editor\"\nname = \"ed\"\nemail = \"ed@acme.test\"\n",
        )
        .unwrap();

        let rec = read_user(dir.path(), "abc").await.unwrap().unwrap();
        assert_eq!(rec.role.as_deref(), Some("editor"));
        assert_eq!(rec.name.as_deref(), Some("ed"));
        assert!(read_user(dir.path(), "missing").await.unwrap().is_none());
    }

    #[test]
    fn missing_header_is_an_error() {
        assert!(extract_cert_der(&HeaderMap::new()).is_err());
    }
}

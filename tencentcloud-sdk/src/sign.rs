//! TC3-HMAC-SHA256 request signing

use chrono::{DateTime, Utc};

use crate::common::{hmac_sha256, sha256_hex};
use crate::credential::Credential;

pub(crate) const ALGORITHM: &str = "TC3-HMAC-SHA256";
pub(crate) const CONTENT_TYPE: &str = "application/json; charset=utf-8";
const SIGNED_HEADERS: &str = "content-type;host;x-tc-action";

/// Everything that goes into a signature besides the credential.
pub(crate) struct SignInput<'a> {
    /// Short service name, e.g. `clb`.
    pub service: &'a str,
    /// Full endpoint host, e.g. `clb.tencentcloudapi.com`.
    pub host: &'a str,
    pub action: &'a str,
    pub payload: &'a str,
    pub timestamp: i64,
}

/// Build the `Authorization` header value for a JSON POST request.
pub(crate) fn authorization(credential: &Credential, input: &SignInput<'_>) -> String {
    let date = DateTime::from_timestamp(input.timestamp, 0)
        .unwrap_or_else(Utc::now)
        .format("%Y-%m-%d")
        .to_string();

    // 1. Canonical request
    let canonical_headers = format!(
        "content-type:{CONTENT_TYPE}\nhost:{}\nx-tc-action:{}\n",
        input.host,
        input.action.to_lowercase()
    );
    let hashed_payload = sha256_hex(input.payload.as_bytes());
    let canonical_request =
        format!("POST\n/\n\n{canonical_headers}\n{SIGNED_HEADERS}\n{hashed_payload}");

    // 2. String to sign
    let credential_scope = format!("{date}/{}/tc3_request", input.service);
    let string_to_sign = format!(
        "{ALGORITHM}\n{}\n{credential_scope}\n{}",
        input.timestamp,
        sha256_hex(canonical_request.as_bytes())
    );

    // 3. Signature
    let secret_date = hmac_sha256(
        format!("TC3{}", credential.secret_key).as_bytes(),
        date.as_bytes(),
    );
    let secret_service = hmac_sha256(&secret_date, input.service.as_bytes());
    let secret_signing = hmac_sha256(&secret_service, b"tc3_request");
    let signature = hex::encode(hmac_sha256(&secret_signing, string_to_sign.as_bytes()));

    format!(
        "{ALGORITHM} Credential={}/{credential_scope}, SignedHeaders={SIGNED_HEADERS}, Signature={signature}",
        credential.secret_id
    )
}

//! Share links.
//!
//! A shared design travels as the specification's JSON, base64-encoded with
//! the standard alphabet, in a `config` query parameter. Decoding rejects a
//! payload whose cell grid doesn't match its ratios so a bad link never
//! reaches the engines.

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use tracing::debug;

use crate::error::CaseworkError;
use crate::model::Specification;

/// Query parameter that carries the payload.
pub const QUERY_PARAM: &str = "config";

/// Encode a specification as a share payload.
pub fn encode(spec: &Specification) -> Result<String, CaseworkError> {
    let json = spec.to_json()?;
    Ok(STANDARD.encode(json.as_bytes()))
}

/// Decode a share payload into a specification with a consistent grid.
///
/// Spaces are read back as `+`, since form-style query parsing turns an
/// unescaped `+` into a space.
pub fn decode(payload: &str) -> Result<Specification, CaseworkError> {
    let bytes = STANDARD.decode(payload.trim().replace(' ', "+"))?;
    let json = String::from_utf8(bytes)?;
    let spec = Specification::from_json(&json)?;
    spec.check_grid()?;
    debug!(
        columns = spec.columns(),
        rows = spec.rows(),
        "share link decoded"
    );
    Ok(spec)
}

/// Build a full share URL from a page URL without query string.
pub fn share_url(base: &str, spec: &Specification) -> Result<String, CaseworkError> {
    Ok(format!("{}?{}={}", base, QUERY_PARAM, encode(spec)?))
}

/// Pull the payload out of a URL or query string, if present.
///
/// `%XX` escapes are decoded, so a link whose `=` padding or `+` was escaped
/// still yields the raw base64 text.
pub fn payload_from_url(url: &str) -> Option<String> {
    let query = match url.split_once('?') {
        Some((_, q)) => q,
        None => url,
    };
    let query = query.split('#').next().unwrap_or(query);
    query.split('&').find_map(|pair| {
        let (key, value) = pair.split_once('=')?;
        (key == QUERY_PARAM).then(|| percent_decode(value))
    })
}

/// Decode `%XX` escapes. Malformed escapes are kept as written.
fn percent_decode(value: &str) -> String {
    let bytes = value.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'%' && i + 2 < bytes.len() {
            let decoded = std::str::from_utf8(&bytes[i + 1..i + 3])
                .ok()
                .and_then(|hex| u8::from_str_radix(hex, 16).ok());
            if let Some(byte) = decoded {
                out.push(byte);
                i += 3;
                continue;
            }
        }
        out.push(bytes[i]);
        i += 1;
    }
    String::from_utf8_lossy(&out).into_owned()
}

use hmac::{Hmac, Mac};
use secrecy::{ExposeSecret, Secret};
use sha2::Sha256;

type HmacSha256Mac = Hmac<Sha256>;

/// Keyed cryptographic digest applied to passwords before they leave the
/// client. Pluggable so the algorithm can be upgraded without touching the
/// workflow.
pub trait KeyedDigest: Send + Sync {
    fn digest(&self, key: &str, message: &Secret<String>) -> String;
}

/// Hex-encoded HMAC-SHA256, keyed on the account display name. This is the
/// scheme the identity service expects.
pub struct HmacSha256;

impl KeyedDigest for HmacSha256 {
    fn digest(&self, key: &str, message: &Secret<String>) -> String {
        let mut mac = HmacSha256Mac::new_from_slice(key.as_bytes())
            .expect("HMAC can take key of any size");
        mac.update(message.expose_secret().as_bytes());
        hex::encode(mac.finalize().into_bytes())
    }
}

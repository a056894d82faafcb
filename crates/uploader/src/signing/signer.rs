use anyhow::{Context, Result, bail};
use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use hmac::{Hmac, Mac};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

/// Keyed signer for proxy request paths.
///
/// Holds the HMAC key and salt shared with the verifying proxy. Both are
/// fixed at construction, the only fallible step, and `sign` is a pure
/// function of the path bytes from then on.
pub struct UrlSigner {
    key: Vec<u8>,
    salt: Vec<u8>,
}

impl UrlSigner {
    /// Create a signer from raw key and salt bytes. Both must be non-empty.
    pub fn new(key: Vec<u8>, salt: Vec<u8>) -> Result<Self> {
        if key.is_empty() {
            bail!("signing key must not be empty");
        }
        if salt.is_empty() {
            bail!("signing salt must not be empty");
        }
        Ok(Self { key, salt })
    }

    /// Create a signer from the hex-encoded key and salt supplied through
    /// the environment.
    pub fn from_hex(key_hex: &str, salt_hex: &str) -> Result<Self> {
        let key = hex::decode(key_hex).context("signing key expected to be a hex-encoded string")?;
        let salt =
            hex::decode(salt_hex).context("signing salt expected to be a hex-encoded string")?;
        Self::new(key, salt)
    }

    /// Sign a request path: HMAC-SHA256 keyed by the signing key over
    /// `salt || path`, digest encoded as unpadded URL-safe base64.
    ///
    /// The message is salt first, then path. The verifying proxy recomputes
    /// exactly this concatenation.
    pub fn sign(&self, path: &str) -> String {
        let mut mac = HmacSha256::new_from_slice(&self.key).expect("HMAC accepts any key size");
        mac.update(&self.salt);
        mac.update(path.as_bytes());
        URL_SAFE_NO_PAD.encode(mac.finalize().into_bytes())
    }
}

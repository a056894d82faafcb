use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;

use super::params::TransformParams;
use crate::signing::UrlSigner;

/// Builds request URLs the verifying proxy will accept.
///
/// The canonical path is the exact byte sequence that is signed and that
/// appears, unmodified, in the final URL; deriving both here keeps them in
/// lockstep.
pub struct ProxyUrlBuilder {
    base_url: String,
    signer: UrlSigner,
}

impl ProxyUrlBuilder {
    pub fn new(base_url: impl Into<String>, signer: UrlSigner) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { base_url, signer }
    }

    /// Canonical request path for a stored object and its rendering:
    /// `/<directive>/…/<base64url(locator)>.<extension>`.
    ///
    /// The locator is base64url-encoded (unpadded) so schemes, slashes and
    /// colons stay inside a single path segment. An empty locator is
    /// legal and encodes to the empty string; validating locators is the
    /// caller's business.
    pub fn canonical_path(locator: &str, params: &TransformParams) -> String {
        let encoded = URL_SAFE_NO_PAD.encode(locator);
        let mut path = String::new();
        for directive in params.directives() {
            path.push('/');
            path.push_str(&directive);
        }
        path.push('/');
        path.push_str(&encoded);
        path.push('.');
        path.push_str(params.format.as_str());
        path
    }

    /// Signed URL for a stored object: `<base>/<token><canonical-path>`.
    ///
    /// Pure function of the inputs and the process-wide secrets; calling
    /// it twice yields byte-identical output.
    pub fn build(&self, locator: &str, params: &TransformParams) -> String {
        let path = Self::canonical_path(locator, params);
        let token = self.signer.sign(&path);
        format!("{}/{}{}", self.base_url, token, path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::urls::{Gravity, OutputFormat, Resize, ResizeMode};

    fn test_builder() -> ProxyUrlBuilder {
        let signer = UrlSigner::from_hex("00112233", "aabbcc").unwrap();
        ProxyUrlBuilder::new("https://img.example.com", signer)
    }

    #[test]
    fn canonical_path_for_default_params() {
        let path = ProxyUrlBuilder::canonical_path(
            "s3://bucket/abc.png",
            &TransformParams::default(),
        );
        assert_eq!(path, "/dpr:0.3333/czM6Ly9idWNrZXQvYWJjLnBuZw.png");
    }

    #[test]
    fn canonical_path_with_resize_and_gravity() {
        let params = TransformParams {
            resize: Some(Resize {
                mode: ResizeMode::Fill,
                width: 300,
                height: 300,
                enlarge: true,
            }),
            gravity: Some(Gravity::North),
            dpr: None,
            format: OutputFormat::Png,
        };
        let path = ProxyUrlBuilder::canonical_path("s3://bucket/abc.png", &params);
        assert_eq!(path, "/rs:fill:300:300:1/g:no/czM6Ly9idWNrZXQvYWJjLnBuZw.png");
    }

    #[test]
    fn encoded_locator_round_trips() {
        let locator = "s3://bucket/some dir/abc+x.png";
        let path = ProxyUrlBuilder::canonical_path(locator, &TransformParams::default());

        let segment = path
            .rsplit('/')
            .next()
            .unwrap()
            .strip_suffix(".png")
            .unwrap();
        let decoded = URL_SAFE_NO_PAD.decode(segment).unwrap();
        assert_eq!(decoded, locator.as_bytes());
    }

    #[test]
    fn encoded_locator_is_a_single_url_safe_segment() {
        let path = ProxyUrlBuilder::canonical_path(
            "s3://bucket/abc.png",
            &TransformParams::default(),
        );
        let segment = path.rsplit('/').next().unwrap();
        assert!(!segment.contains('='));
        assert!(!segment.contains('+'));
    }

    #[test]
    fn empty_locator_still_builds_a_well_formed_path() {
        let path = ProxyUrlBuilder::canonical_path("", &TransformParams::default());
        assert_eq!(path, "/dpr:0.3333/.png");
        assert_eq!(URL_SAFE_NO_PAD.decode("").unwrap(), Vec::<u8>::new());
    }

    #[test]
    fn build_is_base_then_token_then_path() {
        let builder = test_builder();
        let params = TransformParams::default();
        let url = builder.build("s3://bucket/abc.png", &params);

        let path = ProxyUrlBuilder::canonical_path("s3://bucket/abc.png", &params);
        let signer = UrlSigner::from_hex("00112233", "aabbcc").unwrap();
        assert_eq!(
            url,
            format!("https://img.example.com/{}{}", signer.sign(&path), path),
        );
    }

    #[test]
    fn build_is_deterministic() {
        let builder = test_builder();
        let params = TransformParams::default();
        assert_eq!(
            builder.build("s3://bucket/abc.png", &params),
            builder.build("s3://bucket/abc.png", &params),
        );
    }

    #[test]
    fn trailing_slash_on_base_url_is_trimmed() {
        let signer = UrlSigner::from_hex("00112233", "aabbcc").unwrap();
        let builder = ProxyUrlBuilder::new("https://img.example.com/", signer);
        let url = builder.build("s3://bucket/abc.png", &TransformParams::default());
        assert!(url.starts_with("https://img.example.com/"));
        assert!(!url.contains(".com//"));
    }
}

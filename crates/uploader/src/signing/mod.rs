mod signer;

pub use signer::UrlSigner;

use base64::{Engine, engine::general_purpose::URL_SAFE};
use hmac::{Hmac, Mac};
use sha1::Sha1;

use crate::error::{GoogleMapsError, Result};

type HmacSha1 = Hmac<Sha1>;

/// Signs request URLs for client id authentication.
///
/// The secret is the URL-safe base64 key issued with the client id. The
/// signature is computed over the path and query of the request and has to be
/// the last query parameter.
#[derive(Clone)]
pub struct UrlSigner {
    mac: HmacSha1,
}

impl UrlSigner {
    pub fn new(secret: &str) -> Result<Self> {
        if secret.is_empty() {
            return Err(GoogleMapsError::invalid_argument(
                "signing secret must not be empty",
            ));
        }

        let key = URL_SAFE.decode(secret).map_err(|err| {
            GoogleMapsError::invalid_argument(format!("signing secret is not valid base64: {err}"))
        })?;

        let mac = HmacSha1::new_from_slice(&key).map_err(|err| {
            GoogleMapsError::invalid_argument(format!("signing secret rejected: {err}"))
        })?;

        Ok(Self { mac })
    }

    /// `path_and_query` is e.g. `/maps/api/distancematrix/json?origins=..`.
    pub fn sign(&self, path_and_query: &str) -> String {
        let mut mac = self.mac.clone();
        mac.update(path_and_query.as_bytes());
        URL_SAFE.encode(mac.finalize().into_bytes())
    }
}

impl std::fmt::Debug for UrlSigner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UrlSigner").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sign_known_vector() {
        // "a2V5" is base64 for "key"
        let signer = UrlSigner::new("a2V5").unwrap();
        assert_eq!(
            signer.sign("The quick brown fox jumps over the lazy dog"),
            "3nybhbi3iqa8ino29wqQcBydtNk="
        );
    }

    #[test]
    fn test_sign_request_path() {
        let signer = UrlSigner::new("vNIXE0xscrmjlyV-12Nj_BvUPaw=").unwrap();
        assert_eq!(
            signer.sign("/maps/api/geocode/json?address=New+York&client=clientID"),
            "chaRF2hTJKOScPr-RQCEhZbSzIE="
        );
    }

    #[test]
    fn test_signer_is_reusable() {
        let signer = UrlSigner::new("a2V5").unwrap();
        let first = signer.sign("/a?b=c");
        let second = signer.sign("/a?b=c");
        assert_eq!(first, second);
    }

    #[test]
    fn test_rejects_invalid_secret() {
        assert!(matches!(
            UrlSigner::new(""),
            Err(GoogleMapsError::InvalidArgument(_))
        ));
        assert!(matches!(
            UrlSigner::new("not base64!"),
            Err(GoogleMapsError::InvalidArgument(_))
        ));
    }
}

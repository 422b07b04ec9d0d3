//! Two-legged OAuth 1.0a request signing (HMAC-SHA1).
//!
//! The API treats the account token as the consumer key and the account
//! secret as the consumer secret. There is no access token, so the signing
//! key is `<secret>&`.

use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::{Result, anyhow};
use base64::{Engine, engine::general_purpose::STANDARD};
use hmac::{Hmac, Mac};
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use rand::{Rng, distr::Alphanumeric};
use reqwest::Method;
use sha1::Sha1;
use url::Url;

const UNRESERVED: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

const NONCE_LEN: usize = 32;

#[derive(Debug, Clone)]
pub struct OAuthSigner {
    consumer_key: String,
    consumer_secret: String,
}

impl OAuthSigner {
    pub fn new(consumer_key: impl Into<String>, consumer_secret: impl Into<String>) -> Self {
        Self {
            consumer_key: consumer_key.into(),
            consumer_secret: consumer_secret.into(),
        }
    }

    /// Builds an `Authorization` header value with a fresh nonce and timestamp.
    pub fn authorization(&self, method: &Method, url: &Url) -> Result<String> {
        let timestamp = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .map_err(|_| anyhow!("system clock is before UNIX epoch"))?;

        self.authorization_with(method, url, &generate_nonce(), timestamp)
    }

    pub(crate) fn authorization_with(
        &self,
        method: &Method,
        url: &Url,
        nonce: &str,
        timestamp: u64,
    ) -> Result<String> {
        let mut oauth_params = vec![
            ("oauth_consumer_key".to_string(), self.consumer_key.clone()),
            ("oauth_nonce".to_string(), nonce.to_string()),
            ("oauth_signature_method".to_string(), "HMAC-SHA1".to_string()),
            ("oauth_timestamp".to_string(), timestamp.to_string()),
            ("oauth_version".to_string(), "1.0".to_string()),
        ];

        let signature = self.signature(method, url, &oauth_params)?;
        oauth_params.push(("oauth_signature".to_string(), signature));

        let fields = oauth_params
            .iter()
            .map(|(k, v)| format!("{}=\"{}\"", encode(k), encode(v)))
            .collect::<Vec<_>>()
            .join(", ");

        Ok(format!("OAuth {fields}"))
    }

    fn signature(
        &self,
        method: &Method,
        url: &Url,
        oauth_params: &[(String, String)],
    ) -> Result<String> {
        let base = signature_base_string(method, url, oauth_params);
        let key = format!("{}&", encode(&self.consumer_secret));

        let mut mac = Hmac::<Sha1>::new_from_slice(key.as_bytes())
            .map_err(|_| anyhow!("invalid HMAC key (consumer secret)"))?;
        mac.update(base.as_bytes());

        Ok(STANDARD.encode(mac.finalize().into_bytes()))
    }
}

/// `METHOD&<encoded base url>&<encoded sorted parameters>`; query parameters
/// of `url` are signed along with the OAuth ones.
pub(crate) fn signature_base_string(
    method: &Method,
    url: &Url,
    oauth_params: &[(String, String)],
) -> String {
    let mut params: Vec<(String, String)> = url
        .query_pairs()
        .map(|(k, v)| (encode(&k), encode(&v)))
        .chain(oauth_params.iter().map(|(k, v)| (encode(k), encode(v))))
        .collect();
    params.sort();

    let normalized = params
        .iter()
        .map(|(k, v)| format!("{k}={v}"))
        .collect::<Vec<_>>()
        .join("&");

    let base_url = format!("{}{}", url.origin().ascii_serialization(), url.path());

    format!(
        "{}&{}&{}",
        method.as_str().to_ascii_uppercase(),
        encode(&base_url),
        encode(&normalized)
    )
}

pub(crate) fn encode(value: &str) -> String {
    utf8_percent_encode(value, UNRESERVED).to_string()
}

fn generate_nonce() -> String {
    rand::rng()
        .sample_iter(Alphanumeric)
        .take(NONCE_LEN)
        .map(char::from)
        .collect()
}

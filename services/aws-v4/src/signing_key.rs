// Licensed to the Apache Software Foundation (ASF) under one
// or more contributor license agreements.  See the NOTICE file
// distributed with this work for additional information
// regarding copyright ownership.  The ASF licenses this file
// to you under the Apache License, Version 2.0 (the
// "License"); you may not use this file except in compliance
// with the License.  You may obtain a copy of the License at
//
//   http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing,
// software distributed under the License is distributed on an
// "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied.  See the License for the
// specific language governing permissions and limitations
// under the License.

//! Credential scope and signing key derivation.

use crate::constants::{AWS4_REQUEST, AWS4_SECRET_PREFIX};
use sigv4_core::hash::{hex_hmac_sha256, hmac_sha256, SHA256_OUTPUT_LEN};
use sigv4_core::time::{format_date, DateTime};
use sigv4_core::{Error, Result};
use std::fmt::{Debug, Display, Formatter};

/// Credential scope: `YYYYMMDD/<region>/<service>/aws4_request`.
///
/// A scope binds a signing key to a single day, region and service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CredentialScope {
    date: String,
    region: String,
    service: String,
}

impl CredentialScope {
    /// Create the scope of the day `time` falls on (in UTC).
    pub fn new(time: DateTime, region: &str, service: &str) -> Self {
        Self {
            date: format_date(time),
            region: region.to_string(),
            service: service.to_string(),
        }
    }

    /// Date of the scope: "20220313"
    pub fn date(&self) -> &str {
        &self.date
    }

    /// Region of the scope.
    pub fn region(&self) -> &str {
        &self.region
    }

    /// Service of the scope.
    pub fn service(&self) -> &str {
        &self.service
    }
}

impl Display for CredentialScope {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}/{}/{}/{AWS4_REQUEST}",
            self.date, self.region, self.service
        )
    }
}

/// The `kSigning` key derived for one credential scope.
///
/// ```shell
/// kDate    = HMAC("AWS4" + secret, date)
/// kRegion  = HMAC(kDate, region)
/// kService = HMAC(kRegion, service)
/// kSigning = HMAC(kService, "aws4_request")
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct SigningKey {
    key: [u8; SHA256_OUTPUT_LEN],
}

impl SigningKey {
    /// Derive the signing key of `scope` from the secret access key.
    pub fn derive(secret: &str, scope: &CredentialScope) -> Result<Self> {
        let mut buf = vec![0; AWS4_SECRET_PREFIX.len() + secret.len()];
        Self::derive_with_buffer(&mut buf, secret, scope)
    }

    /// Derive the signing key using `buf` as scratch space for the `"AWS4"`
    /// prefixed secret.
    ///
    /// Returns an `InsufficientBufferSpace` error if `buf` is shorter than
    /// `4 + secret.len()`. The used part of `buf` is zeroed before returning.
    pub fn derive_with_buffer(
        buf: &mut [u8],
        secret: &str,
        scope: &CredentialScope,
    ) -> Result<Self> {
        let prefix = AWS4_SECRET_PREFIX.as_bytes();
        let len = prefix.len() + secret.len();
        if buf.len() < len {
            return Err(Error::insufficient_buffer_space(format!(
                "secret key needs {len} bytes of scratch space, but only {} available",
                buf.len()
            )));
        }

        let prefixed = &mut buf[..len];
        prefixed[..prefix.len()].copy_from_slice(prefix);
        prefixed[prefix.len()..].copy_from_slice(secret.as_bytes());

        let k_date = hmac_sha256(prefixed, scope.date.as_bytes());
        prefixed.fill(0);

        let k_region = hmac_sha256(&k_date, scope.region.as_bytes());
        let k_service = hmac_sha256(&k_region, scope.service.as_bytes());
        let k_signing = hmac_sha256(&k_service, AWS4_REQUEST.as_bytes());

        Ok(Self { key: k_signing })
    }

    /// Sign content with this key.
    pub fn sign(&self, content: &[u8]) -> [u8; SHA256_OUTPUT_LEN] {
        hmac_sha256(&self.key, content)
    }

    /// Sign content with this key, lower-case hex encoded.
    pub fn hex_sign(&self, content: &[u8]) -> String {
        hex_hmac_sha256(&self.key, content)
    }

    /// The raw key bytes.
    pub fn as_bytes(&self) -> &[u8; SHA256_OUTPUT_LEN] {
        &self.key
    }
}

impl Debug for SigningKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str("SigningKey")
    }
}

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

use crate::Error;
use crate::Result;
use crate::SignRequest;
use crate::SigningCredential;
use crate::SigningMethod;
use http::request::Parts;
use std::sync::Arc;
use std::time::Duration;

/// Signer is the main struct used to sign the request.
///
/// It is cheap to clone and can be shared across threads: signing only reads
/// the credential.
#[derive(Clone, Debug)]
pub struct Signer<K: SigningCredential> {
    credential: K,
    builder: Arc<dyn SignRequest<Credential = K>>,
}

impl<K: SigningCredential> Signer<K> {
    /// Create a new signer.
    pub fn new(credential: K, builder: impl SignRequest<Credential = K>) -> Self {
        Self {
            credential,
            builder: Arc::new(builder),
        }
    }

    /// Sign request by adding the signature headers.
    pub fn sign(&self, req: &mut Parts, body: &[u8]) -> Result<()> {
        self.sign_with(req, body, SigningMethod::Header)
    }

    /// Presign request so that it stays valid for `expires_in`.
    ///
    /// The payload of a presigned request is never signed.
    pub fn presign(&self, req: &mut Parts, expires_in: Duration) -> Result<()> {
        self.sign_with(req, &[], SigningMethod::Query(expires_in))
    }

    fn sign_with(&self, req: &mut Parts, body: &[u8], method: SigningMethod) -> Result<()> {
        if !self.credential.is_valid() {
            return Err(Error::credential_invalid(
                "credential is not valid for signing",
            ));
        }

        self.builder
            .sign_request(req, body, &self.credential, method)
    }
}

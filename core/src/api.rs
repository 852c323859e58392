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

use crate::Result;
use crate::SigningMethod;
use http::request::Parts;
use std::fmt::Debug;

/// SigningCredential is the trait used by signer as the signing credential.
pub trait SigningCredential: Clone + Debug + Send + Sync + 'static {
    /// Check if the credential is valid.
    fn is_valid(&self) -> bool;
}

/// SignRequest is the trait used by signer to sign the request.
///
/// Signing is a synchronous, deterministic computation: implementations must
/// not block, and must leave `req` untouched when they return an error.
pub trait SignRequest: Debug + Send + Sync + 'static {
    /// Credential used by this builder.
    type Credential: SigningCredential;

    /// Sign the request in place.
    ///
    /// ## Body
    ///
    /// The `body` is the full request payload. Implementations may hash it or
    /// ignore it depending on the payload mode they were configured with.
    ///
    /// ## Method
    ///
    /// [`SigningMethod::Header`] adds the signature as request headers, while
    /// [`SigningMethod::Query`] rewrites the uri into a presigned one that is
    /// valid for the given duration.
    fn sign_request(
        &self,
        req: &mut Parts,
        body: &[u8],
        credential: &Self::Credential,
        method: SigningMethod,
    ) -> Result<()>;
}

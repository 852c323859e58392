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

//! Core components for signing API requests.
//!
//! This crate provides the service-agnostic building blocks used by the
//! SigV4 implementation in `sigv4-aws-v4`.
//!
//! ## Overview
//!
//! - [`SigningRequest`]: a scratch view of an `http::request::Parts` that the
//!   signing algorithm canonicalizes and mutates before the result is applied
//!   back to the request.
//! - [`SignRequest`] and [`SigningCredential`]: the traits a signing scheme
//!   implements.
//! - [`Signer`]: pairs a credential with a [`SignRequest`] implementation.
//!
//! ## Example
//!
//! ```
//! use http::request::Parts;
//! use sigv4_core::{Result, SignRequest, Signer, SigningCredential, SigningMethod};
//!
//! #[derive(Clone, Debug)]
//! struct Token(String);
//!
//! impl SigningCredential for Token {
//!     fn is_valid(&self) -> bool {
//!         !self.0.is_empty()
//!     }
//! }
//!
//! #[derive(Debug)]
//! struct TokenSigner;
//!
//! impl SignRequest for TokenSigner {
//!     type Credential = Token;
//!
//!     fn sign_request(
//!         &self,
//!         req: &mut Parts,
//!         _body: &[u8],
//!         cred: &Token,
//!         _method: SigningMethod,
//!     ) -> Result<()> {
//!         req.headers.insert("x-token", cred.0.parse()?);
//!         Ok(())
//!     }
//! }
//!
//! # fn main() -> Result<()> {
//! let signer = Signer::new(Token("secret".to_string()), TokenSigner);
//!
//! let (mut parts, body) = http::Request::get("https://example.com")
//!     .body(Vec::new())
//!     .expect("request must be valid")
//!     .into_parts();
//! signer.sign(&mut parts, &body)?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Utilities
//!
//! - [`hash`]: Cryptographic hashing utilities
//! - [`time`]: Time formatting and parsing utilities
//! - [`utils`]: General utilities including data redaction

// Make sure all our public APIs have docs.
#![warn(missing_docs)]

pub mod hash;
pub mod time;
pub mod utils;

mod error;
pub use error::{Error, ErrorKind, Result};

mod api;
pub use api::{SignRequest, SigningCredential};
mod request;
pub use request::{decode_query, SigningMethod, SigningRequest};
mod signer;
pub use signer::Signer;

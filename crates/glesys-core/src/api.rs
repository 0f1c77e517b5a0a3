//! The capability handed to resource services.
//!
//! Services only ever see [`ApiClient`]: a `get` and a `post`, both returning
//! the raw body of a successful call. [`ApiClientExt`] layers the typed
//! envelope decoding on top and is implemented for every `ApiClient`.

use crate::envelope::decode_response;
use crate::{Error, Result};
use async_trait::async_trait;
use bytes::Bytes;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

/// Untyped `get`/`post` capability.
#[async_trait]
pub trait ApiClient: Send + Sync {
    /// Issue a `GET` without a body.
    ///
    /// # Errors
    ///
    /// Returns the classified error of a failed call.
    async fn get(&self, path: &str) -> Result<Bytes>;

    /// Issue a `POST`, sending `params` as the JSON body when present.
    ///
    /// # Errors
    ///
    /// Returns the classified error of a failed call.
    async fn post(&self, path: &str, params: Option<Value>) -> Result<Bytes>;
}

/// Typed helpers over [`ApiClient`].
#[async_trait]
pub trait ApiClientExt: ApiClient {
    /// `GET` and decode `{"response": T}`.
    ///
    /// # Errors
    ///
    /// Returns the call's error, or [`Error::Decode`] if the body does not match `T`.
    async fn get_json<T>(&self, path: &str) -> Result<T>
    where
        T: DeserializeOwned,
    {
        let body = self.get(path).await?;
        decode_response(&body)
    }

    /// `POST` `params` and decode `{"response": T}`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Serialization`] before any I/O if `params` cannot be
    /// encoded, otherwise as [`ApiClientExt::get_json`].
    async fn post_json<P, T>(&self, path: &str, params: &P) -> Result<T>
    where
        P: Serialize + Sync + ?Sized,
        T: DeserializeOwned,
    {
        let params = encode_params(params)?;
        let body = self.post(path, Some(params)).await?;
        decode_response(&body)
    }

    /// `POST` without a body and decode `{"response": T}`.
    ///
    /// # Errors
    ///
    /// As [`ApiClientExt::get_json`].
    async fn post_empty<T>(&self, path: &str) -> Result<T>
    where
        T: DeserializeOwned,
    {
        let body = self.post(path, None).await?;
        decode_response(&body)
    }

    /// `GET` and discard whatever a successful call returned.
    ///
    /// # Errors
    ///
    /// Returns the classified error of a failed call.
    async fn get_discard(&self, path: &str) -> Result<()> {
        self.get(path).await.map(drop)
    }

    /// `POST` `params` and discard whatever a successful call returned.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Serialization`] if `params` cannot be encoded,
    /// otherwise the classified error of a failed call.
    async fn post_discard<P>(&self, path: &str, params: &P) -> Result<()>
    where
        P: Serialize + Sync + ?Sized,
    {
        let params = encode_params(params)?;
        self.post(path, Some(params)).await.map(drop)
    }
}

impl<C: ApiClient + ?Sized> ApiClientExt for C {}

fn encode_params<P>(params: &P) -> Result<Value>
where
    P: Serialize + ?Sized,
{
    serde_json::to_value(params).map_err(|err| Error::Serialization(err.to_string()))
}

//! Remote resource gateway: one-shot REST calls per resource.
//!
//! Never retries, caches or queues. Each call yields exactly one outcome,
//! and records are normalized once here before any view sees them.

use std::marker::PhantomData;

use async_trait::async_trait;
use contracts::domain::common::AggregateRoot;
use contracts::shared::error::GatewayError;
use contracts::shared::payload::{Part, Payload};
use gloo_net::http::{Request, RequestBuilder, Response};
use wasm_bindgen::JsValue;

use crate::shared::api_utils::{api_url, encode_key};

#[async_trait(?Send)]
pub trait ResourceGateway<R: AggregateRoot> {
    async fn list(&self) -> Result<Vec<R>, GatewayError>;
    async fn get(&self, key: &str) -> Result<R, GatewayError>;
    async fn create(&self, payload: &Payload) -> Result<(), GatewayError>;
    async fn update(&self, key: &str, payload: &Payload) -> Result<(), GatewayError>;
    async fn delete(&self, key: &str) -> Result<(), GatewayError>;
}

/// Gateway over `gloo-net` using the routes of `R::descriptor()`
pub struct HttpGateway<R> {
    base: String,
    _marker: PhantomData<fn() -> R>,
}

impl<R> Clone for HttpGateway<R> {
    fn clone(&self) -> Self {
        Self {
            base: self.base.clone(),
            _marker: PhantomData,
        }
    }
}

impl<R: AggregateRoot> HttpGateway<R> {
    pub fn new(api_base: impl Into<String>) -> Self {
        Self {
            base: api_base.into(),
            _marker: PhantomData,
        }
    }

    fn url(&self, path: &str) -> String {
        api_url(&self.base, path)
    }

    async fn send_payload(
        &self,
        builder: RequestBuilder,
        payload: &Payload,
    ) -> Result<Response, GatewayError> {
        let request = match payload {
            Payload::Json(body) => builder.json(body).map_err(network)?,
            Payload::Multipart(parts) => builder.body(form_data(parts)?).map_err(network)?,
        };
        request.send().await.map_err(network)
    }
}

#[async_trait(?Send)]
impl<R: AggregateRoot> ResourceGateway<R> for HttpGateway<R> {
    async fn list(&self) -> Result<Vec<R>, GatewayError> {
        let url = self.url(&R::descriptor().routes.list_path());
        log::debug!("GET {}", url);
        let response = Request::get(&url)
            .header("Accept", "application/json")
            .send()
            .await
            .map_err(network)?;
        ensure_success(&response)?;
        let records: Vec<R> = response.json().await.map_err(decode)?;
        log::debug!("{}: {} records", R::collection_name(), records.len());
        Ok(records.into_iter().map(R::normalize).collect())
    }

    async fn get(&self, key: &str) -> Result<R, GatewayError> {
        let url = self.url(&R::descriptor().routes.get_path(&encode_key(key)));
        log::debug!("GET {}", url);
        let response = Request::get(&url)
            .header("Accept", "application/json")
            .send()
            .await
            .map_err(network)?;
        if response.status() == 404 {
            return Err(GatewayError::NotFound {
                key: key.to_string(),
            });
        }
        ensure_success(&response)?;
        let record: R = response.json().await.map_err(decode)?;
        Ok(record.normalize())
    }

    async fn create(&self, payload: &Payload) -> Result<(), GatewayError> {
        let url = self.url(&R::descriptor().routes.create_path());
        log::debug!("POST {} ({})", url, payload.encoding().as_str());
        let response = self.send_payload(Request::post(&url), payload).await?;
        ensure_success(&response)
    }

    async fn update(&self, key: &str, payload: &Payload) -> Result<(), GatewayError> {
        let url = self.url(&R::descriptor().routes.update_path(&encode_key(key)));
        log::debug!("PUT {} ({})", url, payload.encoding().as_str());
        let response = self.send_payload(Request::put(&url), payload).await?;
        ensure_success(&response)
    }

    async fn delete(&self, key: &str) -> Result<(), GatewayError> {
        let url = self.url(&R::descriptor().routes.delete_path(&encode_key(key)));
        log::debug!("DELETE {}", url);
        let response = Request::delete(&url).send().await.map_err(network)?;
        ensure_success(&response)
    }
}

/// Any 2xx is a success; everything else is a `Server` error
fn ensure_success(response: &Response) -> Result<(), GatewayError> {
    classify_status(response.status())
}

pub fn classify_status(status: u16) -> Result<(), GatewayError> {
    if (200..300).contains(&status) {
        Ok(())
    } else {
        log::warn!("server responded with status {}", status);
        Err(GatewayError::Server { status })
    }
}

fn network(err: impl std::fmt::Display) -> GatewayError {
    log::error!("request failed: {}", err);
    GatewayError::Network(err.to_string())
}

fn decode(err: gloo_net::Error) -> GatewayError {
    log::error!("response body does not match the schema: {}", err);
    GatewayError::Decode(err.to_string())
}

fn js_error(err: JsValue) -> GatewayError {
    GatewayError::Network(format!("{:?}", err))
}

/// Text parts as strings, image parts as named blobs
fn form_data(parts: &[Part]) -> Result<web_sys::FormData, GatewayError> {
    let form = web_sys::FormData::new().map_err(js_error)?;
    for part in parts {
        match part {
            Part::Text { name, value } => {
                form.append_with_str(name, value).map_err(js_error)?;
            }
            Part::File { name, upload } => {
                let bytes = js_sys::Uint8Array::from(upload.bytes.as_slice());
                let options = web_sys::BlobPropertyBag::new();
                options.set_type(&upload.mime);
                let blob = web_sys::Blob::new_with_u8_array_sequence_and_options(
                    &js_sys::Array::of1(&bytes),
                    &options,
                )
                .map_err(js_error)?;
                form.append_with_blob_and_filename(name, &blob, &upload.file_name)
                    .map_err(js_error)?;
            }
        }
    }
    Ok(form)
}

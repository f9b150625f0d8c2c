use serde_with::skip_serializing_none;

use crate::error::Error;
use crate::Result;

/// Named parameters of a JSON-RPC call.
pub type Params = serde_json::Map<String, serde_json::Value>;

pub trait IntoParams {
    fn into_params(self) -> Result<Params>;
}

impl IntoParams for Params {
    fn into_params(self) -> Result<Params> {
        Ok(self)
    }
}

impl IntoParams for () {
    fn into_params(self) -> Result<Params> {
        Ok(Params::new())
    }
}

impl IntoParams for serde_json::Value {
    fn into_params(self) -> Result<Params> {
        match self {
            serde_json::Value::Object(map) => Ok(map),
            serde_json::Value::Null => Ok(Params::new()),
            other => Err(Error::InvalidParams(format!(
                "expected an object, got {other}"
            ))),
        }
    }
}

impl<T: IntoParams> IntoParams for Option<T> {
    fn into_params(self) -> Result<Params> {
        self.map_or_else(|| Ok(Params::new()), IntoParams::into_params)
    }
}

/// Serialize any struct into named parameters.
pub fn to_params<T: serde::Serialize>(value: &T) -> Result<Params> {
    serde_json::to_value(value)
        .map_err(Error::Encode)?
        .into_params()
}

macro_rules! struct_params {
    ($($ty: ty),* $(,)?) => {
        $(
            impl $crate::params::IntoParams for $ty {
                fn into_params(self) -> $crate::Result<$crate::params::Params> {
                    $crate::params::to_params(&self)
                }
            }
        )*
    };
}
pub(crate) use struct_params;

#[skip_serializing_none]
#[derive(Debug, Default, Clone, serde::Serialize)]
pub struct ClaimSearchParams {
    pub name: Option<String>,
    pub claim_id: Option<String>,
    pub channel: Option<String>,
    pub channel_ids: Option<Vec<String>>,
    pub not_channel_ids: Option<Vec<String>>,
    pub has_channel_signature: Option<bool>,
    pub valid_channel_signature: Option<bool>,
    pub invalid_channel_signature: Option<bool>,
    pub limit: Option<u32>,
    pub page: Option<u32>,
    pub page_size: Option<u32>,
    pub order_by: Option<Vec<String>>,
    pub release_time: Option<String>,
    pub claim_type: Option<Vec<String>>,
    pub stream_types: Option<Vec<String>>,
    pub media_types: Option<Vec<String>>,
    pub fee_currency: Option<String>,
    pub fee_amount: Option<String>,
    pub duration: Option<String>,
    pub any_tags: Option<Vec<String>>,
    pub all_tags: Option<Vec<String>>,
    pub not_tags: Option<Vec<String>>,
    pub any_languages: Option<Vec<String>>,
    pub all_languages: Option<Vec<String>>,
    pub not_languages: Option<Vec<String>>,
    pub any_locations: Option<Vec<String>>,
    pub all_locations: Option<Vec<String>>,
    pub not_locations: Option<Vec<String>>,
}

#[skip_serializing_none]
#[derive(Debug, Default, Clone, serde::Serialize)]
pub struct WalletBalanceParams {
    pub wallet_id: Option<String>,
    pub confirmations: Option<u32>,
}

#[skip_serializing_none]
#[derive(Debug, Default, Clone, serde::Serialize)]
pub struct FileListParams {
    pub sd_hash: Option<String>,
    pub file_name: Option<String>,
    pub stream_hash: Option<String>,
    pub rowid: Option<i64>,
    pub added_on: Option<String>,
    pub claim_id: Option<String>,
    pub outpoint: Option<String>,
    pub txid: Option<String>,
    pub nout: Option<u32>,
    pub channel_claim_id: Option<String>,
    pub channel_name: Option<String>,
    pub claim_name: Option<String>,
    pub blobs_completed: Option<u32>,
    pub blobs_in_stream: Option<u32>,
}

struct_params!(ClaimSearchParams, WalletBalanceParams, FileListParams);

//! One wrapper per LBRY SDK method (https://lbry.tech/api/sdk).
//!
//! Every wrapper goes through [`ClientInner::call_method`], so an override
//! registered under the same name always takes precedence.

use crate::client::ClientInner;
use crate::params::{IntoParams, Params};
use crate::Result;

macro_rules! facade {
    (@method $(#[$meta:meta])* $name:ident (params) $method:literal) => {
        $(#[$meta])*
        pub async fn $name(&self, params: impl IntoParams) -> Result<serde_json::Value> {
            self.call_method($method, params).await
        }
    };
    (@method $(#[$meta:meta])* $name:ident () $method:literal) => {
        $(#[$meta])*
        pub async fn $name(&self) -> Result<serde_json::Value> {
            self.call_method($method, Params::new()).await
        }
    };
    ($($(#[$meta:meta])* fn $name:ident($($params:ident)?) => $method:literal;)*) => {
        impl ClientInner {
            $(facade!(@method $(#[$meta])* $name ($($params)?) $method);)*
        }
    };
}

facade! {
    fn status(params) => "status";
    fn stop() => "stop";
    fn version() => "version";

    // Claim fetching and manipulation
    fn resolve(params) => "resolve";
    fn get(params) => "get";
    /// Accepts [`crate::params::ClaimSearchParams`] or a raw map.
    fn claim_search(params) => "claim_search";
    fn claim_list(params) => "claim_list";
    fn channel_create(params) => "channel_create";
    fn channel_update(params) => "channel_update";
    fn channel_import(params) => "channel_import";
    fn channel_list(params) => "channel_list";
    fn stream_abandon(params) => "stream_abandon";
    fn stream_list(params) => "stream_list";
    fn channel_abandon(params) => "channel_abandon";
    fn channel_sign(params) => "channel_sign";
    fn support_create(params) => "support_create";
    fn support_list(params) => "support_list";
    fn stream_repost(params) => "stream_repost";
    fn collection_resolve(params) => "collection_resolve";
    fn collection_list(params) => "collection_list";
    fn collection_create(params) => "collection_create";
    fn collection_update(params) => "collection_update";

    // File fetching and manipulation
    /// Accepts [`crate::params::FileListParams`] or a raw map.
    fn file_list(params) => "file_list";
    fn file_delete(params) => "file_delete";
    fn file_set_status(params) => "file_set_status";
    fn blob_delete(params) => "blob_delete";
    fn blob_list(params) => "blob_list";
    fn file_reflect(params) => "file_reflect";

    // Wallet utilities
    /// Accepts [`crate::params::WalletBalanceParams`] or a raw map.
    fn wallet_balance(params) => "wallet_balance";
    fn wallet_decrypt() => "wallet_decrypt";
    fn wallet_encrypt(params) => "wallet_encrypt";
    fn wallet_unlock(params) => "wallet_unlock";
    fn wallet_list(params) => "wallet_list";
    fn wallet_send(params) => "wallet_send";
    fn wallet_status(params) => "wallet_status";
    fn address_is_mine(params) => "address_is_mine";
    fn address_unused(params) => "address_unused";
    fn address_list(params) => "address_list";
    fn transaction_list(params) => "transaction_list";
    fn utxo_release(params) => "utxo_release";
    fn support_abandon(params) => "support_abandon";
    fn purchase_list(params) => "purchase_list";
    fn txo_list(params) => "txo_list";
    fn account_list(params) => "account_list";
    fn account_set(params) => "account_set";

    fn sync_hash(params) => "sync_hash";
    fn sync_apply(params) => "sync_apply";

    // Preferences
    fn preference_get(params) => "preference_get";
    fn preference_set(params) => "preference_set";

    // Comments
    fn comment_list(params) => "comment_list";
    fn comment_create(params) => "comment_create";
    fn comment_hide(params) => "comment_hide";
    fn comment_abandon(params) => "comment_abandon";
    fn comment_update(params) => "comment_update";

    fn publish(params) => "publish";
}

//! Client for the comment and moderation server.
//!
//! Same JSON-RPC envelope as the daemon, separate configuration: it is
//! only usable once a server URL is set, and can be switched off.

use std::ops::Deref;
use std::sync::{Arc, RwLock};

use serde_with::skip_serializing_none;

use crate::error::Error;
use crate::headers::HeaderStore;
use crate::params::{struct_params, IntoParams};
use crate::transport::Transport;
use crate::Result;

const COMMENTS_CONTENT_TYPE: &str = "application/json";
const COMMENTS_REQUEST_ID: i64 = 1;

#[derive(Debug, Clone, PartialEq, Eq)]
struct Server {
    url: String,
    enabled: bool,
    is_custom_server: bool,
}

#[derive(Clone, Debug)]
pub struct CommentsClient {
    inner: Arc<CommentsInner>,
}

impl Deref for CommentsClient {
    type Target = CommentsInner;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

impl CommentsClient {
    /// `default_url` is the deployment's configured server, if any.
    pub fn new(default_url: Option<&str>) -> Result<Self> {
        let default_url = default_url.unwrap_or_default().to_string();
        Ok(Self {
            inner: Arc::new(CommentsInner {
                transport: Transport::new(None)?,
                headers: HeaderStore::with_content_type(COMMENTS_CONTENT_TYPE),
                server: RwLock::new(Server {
                    enabled: !default_url.is_empty(),
                    url: default_url.clone(),
                    is_custom_server: false,
                }),
                default_url,
            }),
        })
    }
}

#[derive(Debug)]
pub struct CommentsInner {
    transport: Transport,
    headers: HeaderStore,
    server: RwLock<Server>,
    default_url: String,
}

impl CommentsInner {
    fn server(&self) -> Server {
        self.server.read().unwrap_or_else(|e| e.into_inner()).clone()
    }

    /// `None` restores the default server.
    pub fn set_server_url(&self, custom_url: Option<&str>) {
        let url = custom_url.unwrap_or(&self.default_url).to_string();
        let mut server = self.server.write().unwrap_or_else(|e| e.into_inner());
        server.enabled = !url.is_empty();
        server.is_custom_server = url != self.default_url;
        server.url = url;
    }

    pub fn set_enabled(&self, enabled: bool) {
        self.server.write().unwrap_or_else(|e| e.into_inner()).enabled = enabled;
    }

    pub fn url(&self) -> String {
        self.server().url
    }

    pub fn is_enabled(&self) -> bool {
        self.server().enabled
    }

    pub fn is_custom_server(&self) -> bool {
        self.server().is_custom_server
    }

    pub async fn call_method(
        &self,
        method: &str,
        params: impl IntoParams,
    ) -> Result<serde_json::Value> {
        let server = self.server();
        if server.url.is_empty() {
            return Err(Error::Configuration("Commenting server is not set.".to_string()));
        }
        if !server.enabled {
            return Err(Error::Configuration(
                "Comments are not currently enabled.".to_string(),
            ));
        }
        let url = format!("{}?m={}", server.url, method);
        self.transport
            .call(
                &url,
                self.headers.snapshot(),
                COMMENTS_REQUEST_ID,
                method,
                params.into_params()?,
            )
            .await
    }
}

macro_rules! comments_api {
    ($(fn $name:ident($params:ty) => $method:literal;)*) => {
        impl CommentsInner {
            $(
                pub async fn $name(&self, params: $params) -> Result<serde_json::Value> {
                    self.call_method($method, params).await
                }
            )*
        }
    };
}

comments_api! {
    fn moderation_block(ModerationBlockParams) => "moderation.Block";
    fn moderation_unblock(ModerationBlockParams) => "moderation.UnBlock";
    fn moderation_block_list(BlockedListArgs) => "moderation.BlockedList";
    fn moderation_add_delegate(ModerationDelegateParams) => "moderation.AddDelegate";
    fn moderation_remove_delegate(ModerationDelegateParams) => "moderation.RemoveDelegate";
    fn moderation_list_delegates(ModerationListDelegatesParams) => "moderation.ListDelegates";
    fn moderation_am_i(ModerationAmIParams) => "moderation.AmI";
    fn comment_list(CommentListParams) => "comment.List";
    fn comment_abandon(CommentAbandonParams) => "comment.Abandon";
    fn comment_create(CommentCreateParams) => "comment.Create";
    fn comment_by_id(CommentByIdParams) => "comment.ByID";
    fn comment_pin(CommentPinParams) => "comment.Pin";
    fn comment_edit(CommentEditParams) => "comment.Edit";
    fn reaction_list(ReactionListParams) => "reaction.List";
    fn reaction_react(ReactionReactParams) => "reaction.React";
    fn setting_list(SettingsParams) => "setting.List";
    fn setting_block_word(BlockWordParams) => "setting.BlockWord";
    fn setting_unblock_word(BlockWordParams) => "setting.UnBlockWord";
    fn setting_list_blocked_words(SettingsParams) => "setting.ListBlockedWords";
    fn setting_update(UpdateSettingsParams) => "setting.Update";
    fn setting_get(SettingsParams) => "setting.Get";
    fn super_list(SuperListParams) => "comment.SuperChatList";
}

#[skip_serializing_none]
#[derive(Debug, Default, Clone, serde::Serialize)]
pub struct ModerationBlockParams {
    pub mod_channel_id: String,
    pub mod_channel_name: String,
    pub blocked_channel_id: String,
    pub blocked_channel_name: String,
    pub creator_channel_id: Option<String>,
    pub creator_channel_name: Option<String>,
    pub block_all: Option<bool>,
    /// Seconds; absent means a permanent block.
    pub time_out: Option<u64>,
    pub delete_all: Option<bool>,
    pub signature: String,
    pub signing_ts: String,
}

#[skip_serializing_none]
#[derive(Debug, Default, Clone, serde::Serialize)]
pub struct BlockedListArgs {
    pub mod_channel_id: String,
    pub mod_channel_name: String,
    pub creator_channel_id: Option<String>,
    pub creator_channel_name: Option<String>,
    pub signature: String,
    pub signing_ts: String,
}

#[derive(Debug, Default, Clone, serde::Serialize)]
pub struct ModerationDelegateParams {
    pub mod_channel_id: String,
    pub mod_channel_name: String,
    pub creator_channel_id: String,
    pub creator_channel_name: String,
    pub signature: String,
    pub signing_ts: String,
}

#[derive(Debug, Default, Clone, serde::Serialize)]
pub struct ModerationListDelegatesParams {
    pub creator_channel_id: String,
    pub creator_channel_name: String,
    pub signature: String,
    pub signing_ts: String,
}

#[derive(Debug, Default, Clone, serde::Serialize)]
pub struct ModerationAmIParams {
    pub channel_name: String,
    pub channel_id: String,
    pub signature: String,
    pub signing_ts: String,
}

#[skip_serializing_none]
#[derive(Debug, Default, Clone, serde::Serialize)]
pub struct CommentListParams {
    pub page: u32,
    pub page_size: u32,
    pub claim_id: Option<String>,
    pub channel_name: Option<String>,
    pub channel_id: Option<String>,
    pub author_claim_id: Option<String>,
    pub parent_id: Option<String>,
    pub top_level: Option<bool>,
    pub hidden: Option<bool>,
    pub sort_by: Option<u32>,
}

#[skip_serializing_none]
#[derive(Debug, Default, Clone, serde::Serialize)]
pub struct CommentAbandonParams {
    pub comment_id: String,
    pub creator_channel_id: Option<String>,
    pub creator_channel_name: Option<String>,
    pub channel_id: Option<String>,
    pub hexdata: Option<String>,
}

#[skip_serializing_none]
#[derive(Debug, Default, Clone, serde::Serialize)]
pub struct CommentCreateParams {
    pub comment: String,
    pub claim_id: String,
    pub parent_id: Option<String>,
    pub signature: String,
    pub signing_ts: String,
    pub support_tx_id: Option<String>,
}

#[derive(Debug, Default, Clone, serde::Serialize)]
pub struct CommentByIdParams {
    pub comment_id: String,
    pub with_ancestors: bool,
}

#[skip_serializing_none]
#[derive(Debug, Default, Clone, serde::Serialize)]
pub struct CommentPinParams {
    pub comment_id: String,
    pub channel_id: String,
    pub channel_name: String,
    pub remove: Option<bool>,
    pub signature: String,
    pub signing_ts: String,
}

#[derive(Debug, Default, Clone, serde::Serialize)]
pub struct CommentEditParams {
    pub comment: String,
    pub comment_id: String,
    pub signature: String,
    pub signing_ts: String,
}

#[skip_serializing_none]
#[derive(Debug, Default, Clone, serde::Serialize)]
pub struct ReactionListParams {
    /// Comma separated.
    pub comment_ids: String,
    pub channel_id: Option<String>,
    pub channel_name: Option<String>,
    pub signature: Option<String>,
    pub signing_ts: Option<String>,
    pub types: Option<String>,
}

#[skip_serializing_none]
#[derive(Debug, Default, Clone, serde::Serialize)]
pub struct ReactionReactParams {
    pub comment_ids: String,
    pub signature: Option<String>,
    pub signing_ts: Option<String>,
    pub remove: Option<bool>,
    pub clear_types: Option<String>,
    #[serde(rename = "type")]
    pub kind: String,
    pub channel_id: String,
    pub channel_name: String,
}

#[skip_serializing_none]
#[derive(Debug, Default, Clone, serde::Serialize)]
pub struct SettingsParams {
    pub channel_name: Option<String>,
    pub channel_id: String,
    pub signature: Option<String>,
    pub signing_ts: Option<String>,
}

#[derive(Debug, Default, Clone, serde::Serialize)]
pub struct BlockWordParams {
    pub channel_name: String,
    pub channel_id: String,
    pub signature: String,
    pub signing_ts: String,
    /// Comma separated.
    pub words: String,
}

#[skip_serializing_none]
#[derive(Debug, Default, Clone, serde::Serialize)]
pub struct UpdateSettingsParams {
    pub channel_name: String,
    pub channel_id: String,
    pub signature: String,
    pub signing_ts: String,
    pub comments_enabled: Option<bool>,
    pub min_tip_amount_comment: Option<f64>,
    pub min_tip_amount_super_chat: Option<f64>,
    pub slow_mode_min_gap: Option<u64>,
}

#[derive(Debug, Default, Clone, serde::Serialize)]
pub struct SuperListParams {}

struct_params!(
    ModerationBlockParams,
    BlockedListArgs,
    ModerationDelegateParams,
    ModerationListDelegatesParams,
    ModerationAmIParams,
    CommentListParams,
    CommentAbandonParams,
    CommentCreateParams,
    CommentByIdParams,
    CommentPinParams,
    CommentEditParams,
    ReactionListParams,
    ReactionReactParams,
    SettingsParams,
    BlockWordParams,
    UpdateSettingsParams,
    SuperListParams,
);

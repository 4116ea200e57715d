//! 请求层核心
//!
//! 职责：
//! - 持有 reqwest 客户端、会话与注入的 UI 能力
//! - 统一携带认证头、序列化请求体
//! - 解包 `{code, msg, data}` 响应并映射到错误类型
//! - 未登录访问受保护接口时直接拦截并触发跳转，不发网络请求

use std::sync::Arc;

use reqwest::{header, Method};
use serde::de::DeserializeOwned;
use serde_json::Value as JsonValue;
use tracing::{debug, warn};

use crate::codes;
use crate::config::Config;
use crate::error::{ApiError, AppError, AppResult};
use crate::models::envelope::ResponseEnvelope;
use crate::session::SessionStore;
use crate::ui::{LoadingFlag, Navigator, Notifier};

/// 后端 API 客户端
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    store: SessionStore,
    notifier: Arc<dyn Notifier>,
    navigator: Arc<dyn Navigator>,
    loading: LoadingFlag,
}

impl ApiClient {
    /// 创建新的 API 客户端
    pub fn new(
        config: &Config,
        store: SessionStore,
        notifier: Arc<dyn Notifier>,
        navigator: Arc<dyn Navigator>,
    ) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: config.api_base_url.trim_end_matches('/').to_string(),
            store,
            notifier,
            navigator,
            loading: LoadingFlag::new(),
        }
    }

    /// 会话存储
    pub fn store(&self) -> &SessionStore {
        &self.store
    }

    /// 进程级加载标志的句柄
    pub fn loading(&self) -> LoadingFlag {
        self.loading.clone()
    }

    pub(crate) fn notifier(&self) -> &dyn Notifier {
        self.notifier.as_ref()
    }

    /// 登录/注册接口无需携带 token
    pub(crate) fn is_public_endpoint(endpoint: &str) -> bool {
        endpoint.contains("/user/login") || endpoint.contains("/user/register")
    }

    /// 发送请求并解包响应
    ///
    /// 成功时只返回 `data` 部分，反序列化为调用方指定的类型
    pub async fn request<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        method: Method,
        body: Option<JsonValue>,
    ) -> AppResult<T> {
        // 守卫保证任何退出路径都会复位加载标志
        let _guard = self.loading.begin();

        let mut token = None;
        if !Self::is_public_endpoint(endpoint) {
            match self.store.token() {
                Some(t) => token = Some(t),
                None => {
                    self.notifier.error("请先登录");
                    self.navigator.redirect_to_login();
                    return Err(AppError::unauthenticated(endpoint));
                }
            }
        }

        let url = format!("{}{}", self.base_url, endpoint);
        debug!("发送请求: {} {}", method, url);

        let mut builder = self
            .http
            .request(method.clone(), url.as_str())
            .header(header::CONTENT_TYPE, "application/json")
            .header(header::ACCEPT, "application/json");

        if let Some(t) = &token {
            builder = builder.bearer_auth(t);
        }

        // GET 请求不携带请求体
        if method != Method::GET {
            if let Some(payload) = &body {
                debug!("请求体: {}", payload);
                builder = builder.json(payload);
            }
        }

        let response = builder.send().await.map_err(|e| {
            warn!("网络请求失败 ({}): {}", endpoint, e);
            self.notifier.error("网络请求失败，请稍后重试");
            AppError::network(endpoint, e)
        })?;

        let status = response.status();
        debug!("响应状态: {}", status);

        let raw = response.text().await.map_err(|e| {
            warn!("读取响应失败 ({}): {}", endpoint, e);
            self.notifier.error("网络请求失败，请稍后重试");
            AppError::network(endpoint, e)
        })?;

        let envelope = match serde_json::from_str::<ResponseEnvelope>(&raw) {
            Ok(envelope) => envelope,
            Err(e) => {
                // HTTP 已经失败时响应体未必是响应包，优先报状态错误
                if !status.is_success() {
                    let msg = format!("HTTP error! status: {}", status.as_u16());
                    self.notifier.error(&msg);
                    return Err(AppError::http(status.as_u16(), msg));
                }
                warn!("响应不是合法的响应包 ({}): {}", endpoint, e);
                self.notifier.error("网络请求失败，请稍后重试");
                return Err(AppError::Api(ApiError::JsonParse {
                    endpoint: endpoint.to_string(),
                    source: e,
                }));
            }
        };

        if !status.is_success() {
            let msg = envelope
                .message()
                .map(str::to_string)
                .unwrap_or_else(|| format!("HTTP error! status: {}", status.as_u16()));
            self.notifier.error(&msg);
            return Err(AppError::http(status.as_u16(), msg));
        }

        if !envelope.is_success() {
            let msg = envelope
                .message()
                .map(str::to_string)
                .or_else(|| codes::message_for(envelope.code).map(str::to_string))
                .unwrap_or_else(|| "请求失败".to_string());
            self.notifier.error(&msg);
            return Err(AppError::application(envelope.code, msg));
        }

        let data = envelope.data.unwrap_or(JsonValue::Null);
        serde_json::from_value(data).map_err(|e| {
            warn!("响应 data 解析失败 ({}): {}", endpoint, e);
            AppError::Api(ApiError::JsonParse {
                endpoint: endpoint.to_string(),
                source: e,
            })
        })
    }
}

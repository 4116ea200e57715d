//! 用户认证接口
//!
//! 登录/注册是仅有的两个公开接口；登录成功后把会话写入持久化存储

use regex::Regex;
use reqwest::Method;
use serde::Deserialize;
use serde_json::json;
use tracing::info;

use crate::api::request::ApiClient;
use crate::error::{AppResult, ValidationError};
use crate::session::Session;

/// 登录接口返回的数据
#[derive(Debug, Clone, Deserialize)]
pub struct LoginData {
    pub token: String,
    #[serde(default)]
    pub user_id: u64,
}

impl ApiClient {
    /// 登录
    ///
    /// 成功后 token / user_id / user_email 写入会话存储；
    /// 失败时会话保持原样，错误原样上抛
    pub async fn login(&self, email: &str, password: &str) -> AppResult<Session> {
        validate_credentials(email, password)?;

        let data: LoginData = self
            .request(
                "/user/login",
                Method::POST,
                Some(json!({ "email": email, "password": password })),
            )
            .await?;

        self.store()
            .set_login(data.token, data.user_id.to_string(), email.to_string())?;
        self.notifier().success("登录成功");

        Ok(self.store().snapshot())
    }

    /// 注册
    ///
    /// 不写入会话，注册后仍需登录
    pub async fn register(&self, email: &str, password: &str) -> AppResult<()> {
        validate_credentials(email, password)?;

        self.request::<()>(
            "/user/register",
            Method::POST,
            Some(json!({ "email": email, "password": password })),
        )
        .await?;

        self.notifier().success("注册成功，请登录");
        Ok(())
    }

    /// 退出登录
    ///
    /// 只清空本地会话，不发网络请求
    pub fn logout(&self) -> AppResult<()> {
        self.store().clear()?;
        info!("已退出登录");
        Ok(())
    }
}

/// 本地凭证预校验，明显不合法的输入不出客户端
fn validate_credentials(email: &str, password: &str) -> AppResult<()> {
    if !is_valid_email(email) {
        return Err(ValidationError::InvalidEmail {
            email: email.to_string(),
        }
        .into());
    }
    if password.is_empty() {
        return Err(ValidationError::EmptyPassword.into());
    }
    Ok(())
}

fn is_valid_email(email: &str) -> bool {
    Regex::new(r"^[\w.%+-]+@[\w.-]+\.[A-Za-z]{2,}$")
        .map(|re| re.is_match(email))
        .unwrap_or(false)
}

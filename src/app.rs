//! 终端应用编排层
//!
//! 负责把用户在终端里的操作翻译成请求层 / 流程层调用：
//! 登录菜单 → 面试台账 → 面试聊天

use std::io::{self, Write as _};
use std::sync::Arc;

use anyhow::Result;
use tracing::{info, warn};

use crate::api::ApiClient;
use crate::codes;
use crate::config::Config;
use crate::error::AppError;
use crate::models::meeting::MeetingUpdate;
use crate::session::{Session, SessionStore};
use crate::ui::{TerminalNavigator, TerminalNotifier};
use crate::workflow::{InterviewFlow, InterviewState};

/// 应用主结构
pub struct App {
    client: ApiClient,
}

/// 登录菜单的出口
enum AuthOutcome {
    LoggedIn,
    Quit,
}

/// 台账菜单的出口
enum DashboardOutcome {
    LoggedOut,
    Quit,
}

impl App {
    /// 初始化应用
    pub fn initialize(config: Config) -> Result<Self> {
        log_startup(&config);

        let store = SessionStore::load(&config.session_file)?;
        let client = ApiClient::new(
            &config,
            store,
            Arc::new(TerminalNotifier),
            Arc::new(TerminalNavigator),
        );

        Ok(Self { client })
    }

    /// 运行应用主循环
    pub async fn run(&self) -> Result<()> {
        loop {
            let session = self.client.store().snapshot();
            if !session.is_authenticated() {
                match self.auth_menu().await? {
                    AuthOutcome::LoggedIn => continue,
                    AuthOutcome::Quit => break,
                }
            }

            match self.dashboard(&session).await? {
                DashboardOutcome::LoggedOut => continue,
                DashboardOutcome::Quit => break,
            }
        }

        info!("👋 再见");
        Ok(())
    }

    // ========== 登录/注册 ==========

    async fn auth_menu(&self) -> Result<AuthOutcome> {
        loop {
            println!();
            println!("  [1] 登录    [2] 注册    [q] 退出");
            match prompt("> ")?.as_str() {
                "1" => {
                    let email = prompt("邮箱: ")?;
                    let password = prompt("密码: ")?;
                    if self.client.login(&email, &password).await.is_ok() {
                        return Ok(AuthOutcome::LoggedIn);
                    }
                    // 失败已由 Notifier 提示，留在菜单里重试
                }
                "2" => {
                    let email = prompt("邮箱: ")?;
                    let password = prompt("密码: ")?;
                    let _ = self.client.register(&email, &password).await;
                }
                "q" | "Q" => return Ok(AuthOutcome::Quit),
                _ => {}
            }
        }
    }

    // ========== 面试台账 ==========

    async fn dashboard(&self, session: &Session) -> Result<DashboardOutcome> {
        info!(
            "当前用户: {}",
            session.user_email.as_deref().unwrap_or("(未知)")
        );
        self.render_meetings().await;

        loop {
            println!();
            println!("  [r] 刷新  [c] 创建  [u <id>] 编辑  [d <id>] 删除  [i <id>] 开始面试  [o] 退出登录  [q] 退出");
            let line = prompt("> ")?;
            let (cmd, arg) = split_command(&line);

            match cmd {
                "r" => self.render_meetings().await,
                "c" => self.create_meeting_form().await?,
                "u" => {
                    if let Some(id) = arg {
                        self.update_meeting_form(id).await?;
                    }
                }
                "d" => {
                    if let Some(id) = arg {
                        if prompt("确定要删除这个面试吗？[y/N] ")?.eq_ignore_ascii_case("y") {
                            let _ = self.client.delete_meeting(id).await;
                            self.render_meetings().await;
                        }
                    }
                }
                "i" => {
                    if let Some(id) = arg {
                        self.interview_chat(id).await?;
                    }
                }
                "o" => {
                    self.client.logout()?;
                    return Ok(DashboardOutcome::LoggedOut);
                }
                "q" => return Ok(DashboardOutcome::Quit),
                _ => {}
            }

            // token 失效时请求层已提示并触发跳转，这里回到登录菜单
            if self.client.store().token().is_none() {
                return Ok(DashboardOutcome::LoggedOut);
            }
        }
    }

    async fn render_meetings(&self) {
        match self.client.list_meetings().await {
            Ok(meetings) if meetings.is_empty() => {
                println!("（暂无面试，输入 c 创建）");
            }
            Ok(meetings) => {
                println!("{}", "─".repeat(60));
                for meeting in &meetings {
                    println!("  {}", meeting);
                }
                println!("{}", "─".repeat(60));
            }
            Err(e) => warn!("加载面试列表失败: {}", e),
        }
    }

    async fn create_meeting_form(&self) -> Result<()> {
        let candidate = prompt("候选人: ")?;
        let position = prompt("职位: ")?;
        let job_description = prompt("职位描述: ")?;

        let _ = self
            .client
            .create_meeting(&candidate, &position, &job_description)
            .await;
        self.render_meetings().await;
        Ok(())
    }

    async fn update_meeting_form(&self, meeting_id: u64) -> Result<()> {
        // 先取现有记录做底稿，空输入表示保留原值
        let meeting = match self.client.get_meeting(meeting_id).await {
            Ok(m) => m,
            Err(e) => {
                warn!("获取面试信息失败: {}", e);
                return Ok(());
            }
        };

        let mut update = MeetingUpdate::from_meeting(&meeting);
        update.candidate = prompt_or(&format!("候选人 [{}]: ", update.candidate), &update.candidate)?;
        update.position = prompt_or(&format!("职位 [{}]: ", update.position), &update.position)?;
        update.status = prompt_or(&format!("状态 [{}]: ", update.status), &update.status)?;
        update.remark = prompt_or(&format!("备注 [{}]: ", update.remark), &update.remark)?;

        let _ = self.client.update_meeting(&update).await;
        self.render_meetings().await;
        Ok(())
    }

    // ========== 面试聊天 ==========

    async fn interview_chat(&self, meeting_id: u64) -> Result<()> {
        let mut flow = InterviewFlow::new(&self.client);

        let state = match flow.open_interview(meeting_id).await {
            Ok(state) => state,
            Err(e) => {
                warn!("获取面试信息失败: {}", e);
                return Ok(());
            }
        };

        if state == InterviewState::AwaitingResume {
            println!("请先上传简历，以便开始面试。");
            if !self.resume_upload_form(&mut flow).await? {
                flow.close_interview();
                return Ok(());
            }
        }

        for message in flow.messages() {
            println!("{}: {}", message.speaker.label(), message.text);
        }

        loop {
            let line = prompt("你的回答（/exit 结束面试）> ")?;
            if line == "/exit" || line == "q" {
                break;
            }

            match flow.submit_answer(&line).await {
                Ok(reply) => println!("AI面试官: {}", reply),
                Err(e) => {
                    if matches!(
                        e.application_code(),
                        Some(codes::CODE_INTERVIEW_ENDED) | Some(codes::CODE_INTERVIEW_ROUND_LIMIT)
                    ) {
                        break;
                    }
                    // 其余错误已由 Notifier 提示，转写保留已发出的回答
                }
            }
        }

        flow.close_interview();
        Ok(())
    }

    /// 返回 false 表示用户放弃上传
    async fn resume_upload_form(&self, flow: &mut InterviewFlow<&ApiClient>) -> Result<bool> {
        loop {
            println!("请粘贴简历内容，单独一行输入 END 结束（直接 END 放弃）:");
            let mut lines = Vec::new();
            loop {
                let line = prompt_raw()?;
                if line.trim() == "END" {
                    break;
                }
                lines.push(line);
            }

            let resume = lines.join("\n");
            if resume.trim().is_empty() {
                return Ok(false);
            }

            match flow.submit_resume(&resume).await {
                Ok(()) => return Ok(true),
                Err(AppError::Validation(_)) => continue,
                Err(_) => return Ok(false), // 网络/业务错误已提示
            }
        }
    }
}

// ========== 终端输入辅助函数 ==========

fn prompt(label: &str) -> io::Result<String> {
    print!("{}", label);
    io::stdout().flush()?;
    Ok(prompt_raw()?.trim().to_string())
}

/// 保留原始行内容（多行简历粘贴用）
fn prompt_raw() -> io::Result<String> {
    let mut line = String::new();
    let n = io::stdin().read_line(&mut line)?;
    if n == 0 {
        // EOF 按退出处理
        return Ok("q".to_string());
    }
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}

/// 空输入时保留默认值
fn prompt_or(label: &str, default: &str) -> io::Result<String> {
    let input = prompt(label)?;
    if input.is_empty() {
        Ok(default.to_string())
    } else {
        Ok(input)
    }
}

/// 解析 "d 42" 形式的命令
fn split_command(line: &str) -> (&str, Option<u64>) {
    match line.split_once(' ') {
        Some((cmd, rest)) => (cmd, rest.trim().parse().ok()),
        None => (line, None),
    }
}

// ========== 日志辅助函数 ==========

fn log_startup(config: &Config) {
    info!("{}", "=".repeat(60));
    info!("🚀 AI 面试客户端启动");
    info!("🌐 后端地址: {}", config.api_base_url);
    info!("{}", "=".repeat(60));
}

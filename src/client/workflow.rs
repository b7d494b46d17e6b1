//! 完整充值流程
//!
//! 获取 Session -> 验证卡密 -> 按卡密状态复用记录或首次充值。
//! 每一步都追加到 `WorkflowOutcome::steps`，任何失败都直接结束流程。

use crate::types::{ActivationCode, StepName, WorkflowOutcome, WorkflowStage, WorkflowStep};

use super::RechargeClient;

/// 卡密状态无法继续时记录的错误
pub const DECISION_ERROR: &str = "卡密状态异常或缺少用户数据";

/// 验证通过后的下一步
#[derive(Debug, PartialEq, Eq)]
enum Decision<'a> {
    Reuse,
    Recharge(&'a str),
    Reject,
}

/// `used` 一律复用；`active` 需要非空的用户数据才能充值（空白字符串原样提交）
fn decide<'a>(code_status: Option<&str>, user_data: Option<&'a str>) -> Decision<'a> {
    let user_data = user_data.filter(|d| !d.is_empty());
    match (code_status, user_data) {
        (Some("used"), _) => Decision::Reuse,
        (Some("active"), Some(data)) => Decision::Recharge(data),
        _ => Decision::Reject,
    }
}

impl RechargeClient {
    /// 执行完整充值流程
    ///
    /// # Arguments
    /// * `code` - 卡密
    /// * `user_data` - 用户 JSON Token，首次充值（`active`）时必需
    pub async fn run_full_workflow(
        &self,
        code: &ActivationCode,
        user_data: Option<&str>,
    ) -> WorkflowOutcome {
        let mut outcome = WorkflowOutcome::default();
        log::info!("[workflow] 开始充值流程: {code}");

        // 1. 获取 Session
        let session = match self.acquire_session().await {
            Ok(session) => session,
            Err(e) => {
                log::warn!("[workflow] {e}");
                outcome.push(WorkflowStep::failed(StepName::GetSession, e.to_string()));
                return outcome;
            }
        };
        outcome.push(WorkflowStep::session(&session));
        outcome.stage = WorkflowStage::SessionAcquired;

        // 2. 验证卡密
        let verify = self.verify_activation_code(&session, code).await;
        outcome.push(WorkflowStep::result(StepName::VerifyCode, &verify));
        if !verify.success {
            return outcome;
        }
        outcome.stage = WorkflowStage::CodeVerified;

        // 3. 根据卡密状态决定操作
        match decide(verify.code_status(), user_data) {
            Decision::Reuse => {
                let result = self.reuse_record(&session).await;
                outcome.push(WorkflowStep::result(StepName::ReuseRecord, &result));
                outcome.finish(WorkflowStage::Reused, result);
            }
            Decision::Recharge(data) => {
                let result = self.submit_recharge(&session, data).await;
                outcome.push(WorkflowStep::result(StepName::SubmitRecharge, &result));
                outcome.finish(WorkflowStage::Recharged, result);
            }
            Decision::Reject => {
                log::warn!(
                    "[workflow] 无法继续: code_status={:?}, user_data={}",
                    verify.code_status(),
                    user_data.is_some()
                );
                outcome.push(WorkflowStep::failed(StepName::Decision, DECISION_ERROR));
                outcome.stage = WorkflowStage::Rejected;
            }
        }

        log::info!("[workflow] 流程结束: success={}", outcome.success);
        outcome
    }
}

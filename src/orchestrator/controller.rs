//! 会话控制器 - 编排层
//!
//! 把一次用户操作应用到会话上：校验输入、调用流程层、更新会话。
//! 校验失败只会生成提示信息，不会中断请求；存储错误向上返回。

use std::sync::Arc;

use chrono::Local;
use tracing::{info, warn};

use crate::clients::ChatModel;
use crate::config::Config;
use crate::error::{AppError, AppResult, SessionError, ValidationError};
use crate::infrastructure::{Storage, Upload, UploadKind};
use crate::models::assignment::{MAX_QUESTIONS, MIN_QUESTIONS};
use crate::models::{Assignment, Locale, Submission};
use crate::orchestrator::session::{AssignmentDraft, ChatMessage, Notice, Session, StudentStage};
use crate::workflow::{AgentReply, AssessmentFlow, ConversationState};

/// 作业表单提交的意图
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DraftIntent {
    /// 只保存草稿
    Save,
    AddObjective,
    RemoveObjective(usize),
    Create,
}

/// 教师作业表单
#[derive(Debug, Clone)]
pub struct AssignmentForm {
    pub name: String,
    pub instructions: String,
    pub objectives: Vec<String>,
    pub num_questions: u8,
    pub language: Locale,
    pub upload: Option<Upload>,
    pub intent: DraftIntent,
}

/// 学生提交表单
#[derive(Debug, Clone)]
pub struct SubmissionForm {
    pub assignment_id: String,
    pub text: String,
    pub upload: Option<Upload>,
}

/// 用户操作
#[derive(Debug, Clone)]
pub enum Action {
    EditAssignment(AssignmentForm),
    DeleteAssignment(String),
    Submit(SubmissionForm),
    Answer(String),
    StartNewSubmission,
}

/// 会话控制器
pub struct SessionController {
    flow: AssessmentFlow,
    storage: Arc<Storage>,
    has_api_key: bool,
}

impl SessionController {
    pub fn new(model: Arc<dyn ChatModel>, storage: Arc<Storage>, config: &Config) -> Self {
        Self {
            flow: AssessmentFlow::new(model, storage.clone(), config),
            storage,
            has_api_key: config.has_api_key(),
        }
    }

    pub fn storage(&self) -> &Storage {
        &self.storage
    }

    pub fn has_api_key(&self) -> bool {
        self.has_api_key
    }

    /// 执行一次操作
    ///
    /// 校验错误与会话状态错误转换为提示信息
    pub async fn dispatch(&self, session: &mut Session, action: Action) -> AppResult<()> {
        let result = match action {
            Action::EditAssignment(form) => self.edit_assignment(session, form).await,
            Action::DeleteAssignment(id) => self.delete_assignment(session, &id).await,
            Action::Submit(form) => self.submit(session, form).await,
            Action::Answer(text) => self.answer(session, &text).await,
            Action::StartNewSubmission => {
                session.reset_student();
                Ok(())
            }
        };

        match result {
            Err(AppError::Validation(e)) => {
                warn!("⚠️ 输入校验失败: {}", e);
                session.notice = Some(match e {
                    ValidationError::MissingApiKey => Notice::warning(e.ui_key()),
                    _ => Notice::error(e.ui_key()),
                });
                Ok(())
            }
            Err(AppError::Session(e)) => {
                warn!("⚠️ 会话状态不允许该操作: {}", e);
                session.notice = Some(Notice::error(e.ui_key()));
                Ok(())
            }
            other => other,
        }
    }

    async fn edit_assignment(&self, session: &mut Session, form: AssignmentForm) -> AppResult<()> {
        session.draft = AssignmentDraft {
            name: form.name,
            instructions: form.instructions,
            objectives: if form.objectives.is_empty() {
                vec![String::new()]
            } else {
                form.objectives
            },
            num_questions: form.num_questions,
            language: form.language,
        };

        match form.intent {
            DraftIntent::Save => Ok(()),
            DraftIntent::AddObjective => {
                session.draft.objectives.push(String::new());
                Ok(())
            }
            DraftIntent::RemoveObjective(index) => {
                if index == 0 || index >= session.draft.objectives.len() {
                    return Err(SessionError::ObjectiveNotRemovable(index).into());
                }
                session.draft.objectives.remove(index);
                Ok(())
            }
            DraftIntent::Create => self.create_assignment(session, form.upload).await,
        }
    }

    async fn create_assignment(&self, session: &mut Session, upload: Option<Upload>) -> AppResult<()> {
        let draft = &session.draft;
        let first_objective = draft.objectives.first().map(|o| o.trim()).unwrap_or_default();
        if draft.name.trim().is_empty() || draft.instructions.trim().is_empty() || first_objective.is_empty() {
            return Err(ValidationError::MissingAssignmentFields.into());
        }
        if !(MIN_QUESTIONS..=MAX_QUESTIONS).contains(&draft.num_questions) {
            return Err(ValidationError::QuestionCountOutOfRange(draft.num_questions).into());
        }

        let mut assignment = Assignment::new(
            draft.name.trim(),
            draft.instructions.trim(),
            draft.objectives.clone(),
            draft.num_questions,
            draft.language,
            Local::now(),
        );
        if let Some(upload) = upload {
            upload.validate()?;
            assignment.file_path = Some(self.storage.uploads.save(UploadKind::Assignment, &upload).await?);
        }

        self.storage.assignments.insert(&assignment.id, assignment.clone()).await?;
        info!("📚 已创建作业: {} ({})", assignment.name, assignment.id);

        session.draft = AssignmentDraft::default();
        session.notice = Some(Notice::success("assignment_created"));
        Ok(())
    }

    async fn delete_assignment(&self, session: &mut Session, id: &str) -> AppResult<()> {
        if self.storage.assignments.remove(id).await? {
            session.notice = Some(Notice::success("assignment_deleted"));
            Ok(())
        } else {
            Err(ValidationError::UnknownAssignment(id.to_string()).into())
        }
    }

    async fn submit(&self, session: &mut Session, form: SubmissionForm) -> AppResult<()> {
        if !self.has_api_key {
            return Err(ValidationError::MissingApiKey.into());
        }
        if !matches!(session.stage, StudentStage::Submitting) {
            return Err(SessionError::ConversationInProgress.into());
        }
        if form.text.trim().is_empty() && form.upload.is_none() {
            return Err(ValidationError::EmptySubmission.into());
        }
        let assignment = self
            .storage
            .assignments
            .get(&form.assignment_id)
            .await?
            .ok_or_else(|| ValidationError::UnknownAssignment(form.assignment_id.clone()))?;

        let file_path = match &form.upload {
            Some(upload) => {
                upload.validate()?;
                Some(self.storage.uploads.save(UploadKind::Submission, upload).await?)
            }
            None => None,
        };
        let submission = Submission::new(&assignment.id, form.text, file_path, Local::now());
        self.storage.submissions.insert(&submission.id, submission.clone()).await?;
        info!("📨 收到提交 {} → 作业 {}", submission.id, assignment.name);

        session.messages.clear();
        let reply = self.flow.begin(&assignment).await;
        self.apply_reply(session, assignment, submission, reply).await
    }

    async fn answer(&self, session: &mut Session, text: &str) -> AppResult<()> {
        if text.trim().is_empty() {
            return Err(ValidationError::EmptyAnswer.into());
        }
        if !matches!(session.stage, StudentStage::Conversing { .. }) {
            return Err(SessionError::NoActiveConversation.into());
        }
        let StudentStage::Conversing {
            assignment,
            submission,
            conversation,
        } = std::mem::take(&mut session.stage)
        else {
            return Err(SessionError::NoActiveConversation.into());
        };

        session.messages.push(ChatMessage::student(text));
        let reply = conversation.answer(text, Local::now());
        self.apply_reply(session, *assignment, *submission, reply).await
    }

    /// 根据新的对话快照推进学生阶段
    async fn apply_reply(
        &self,
        session: &mut Session,
        assignment: Assignment,
        submission: Submission,
        reply: AgentReply,
    ) -> AppResult<()> {
        session
            .messages
            .extend(reply.messages.into_iter().map(ChatMessage::assistant));

        match reply.state {
            ConversationState::AwaitingAnswer(conversation) => {
                session.stage = StudentStage::Conversing {
                    assignment: Box::new(assignment),
                    submission: Box::new(submission),
                    conversation,
                };
            }
            ConversationState::Complete(done) => {
                let (evaluation_id, report) = self.flow.finish(&assignment, &submission, done).await;
                session.notice = Some(match evaluation_id {
                    Some(_) => Notice::success("evaluation_complete"),
                    None => Notice::warning("report_not_saved"),
                });
                session.stage = StudentStage::Evaluated {
                    evaluation_id,
                    report: Box::new(report),
                };
            }
        }
        Ok(())
    }
}

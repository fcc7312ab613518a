//! HTTP 处理函数
//!
//! 每个 POST 把表单转换成一个 [`Action`]，在会话锁内交给控制器处理，然后重定向回页面。

use axum::extract::{Form, Multipart, Path, Query, State};
use axum::response::{AppendHeaders, Html, IntoResponse, Redirect};
use serde::Deserialize;
use tracing::debug;

use crate::api::render::{render_page, PageView};
use crate::api::session_cookie::SessionId;
use crate::api::AppState;
use crate::error::AppResult;
use crate::infrastructure::Upload;
use crate::models::Locale;
use crate::orchestrator::controller::{Action, AssignmentForm, DraftIntent, SubmissionForm};
use crate::orchestrator::{Role, Session};

/// 页面查询参数
#[derive(Debug, Default, Deserialize)]
pub struct PageQuery {
    pub role: Option<String>,
    pub tab: Option<String>,
    pub assignment: Option<String>,
    pub evaluation: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct AnswerForm {
    pub response: String,
}

/// GET /
pub async fn index(
    State(state): State<AppState>,
    session_id: SessionId,
    Query(query): Query<PageQuery>,
) -> AppResult<impl IntoResponse> {
    let role = query.role.as_deref().and_then(Role::parse);
    let stored = match state.sessions.get(&session_id.id) {
        Some(session) => Some(session),
        // 只为带回 cookie 的浏览器保存角色切换，其余 GET 不建立会话
        None if !session_id.is_new && role.is_some_and(|r| r != Role::default()) => {
            Some(state.sessions.get_or_create(&session_id.id))
        }
        None => None,
    };
    let mut transient = Session::default();
    let mut guard;
    let session: &mut Session = match &stored {
        Some(stored) => {
            guard = stored.lock().await;
            &mut guard
        }
        None => &mut transient,
    };
    if let Some(role) = role {
        session.role = role;
    }
    let notice = session.take_notice();

    let storage = state.controller.storage();
    let assignments = storage.assignments.load_all().await?;
    let reports = storage.evaluations.load_all().await?;

    let page = render_page(PageView {
        locale: state.interface_language,
        session,
        notice,
        tab: query.tab.as_deref(),
        selected_assignment: query.assignment.as_deref(),
        selected_evaluation: query.evaluation.as_deref(),
        assignments: &assignments,
        reports,
        has_api_key: state.controller.has_api_key(),
    });

    Ok((AppendHeaders(session_id.set_cookie()), Html(page)))
}

/// POST /teacher/assignments
pub async fn edit_assignment(
    State(state): State<AppState>,
    session_id: SessionId,
    multipart: Multipart,
) -> AppResult<impl IntoResponse> {
    let form = read_assignment_form(multipart).await?;
    debug!("作业表单: intent={:?}, 目标数={}", form.intent, form.objectives.len());
    dispatch(&state, &session_id, Action::EditAssignment(form)).await?;
    Ok(redirect(&session_id, "/?role=teacher&tab=create"))
}

/// POST /teacher/assignments/{id}/delete
pub async fn delete_assignment(
    State(state): State<AppState>,
    session_id: SessionId,
    Path(id): Path<String>,
) -> AppResult<impl IntoResponse> {
    dispatch(&state, &session_id, Action::DeleteAssignment(id)).await?;
    Ok(redirect(&session_id, "/?role=teacher&tab=view"))
}

/// POST /student/submissions
pub async fn submit(
    State(state): State<AppState>,
    session_id: SessionId,
    multipart: Multipart,
) -> AppResult<impl IntoResponse> {
    let form = read_submission_form(multipart).await?;
    dispatch(&state, &session_id, Action::Submit(form)).await?;
    Ok(redirect(&session_id, "/?role=student"))
}

/// POST /student/answer
pub async fn answer(
    State(state): State<AppState>,
    session_id: SessionId,
    Form(form): Form<AnswerForm>,
) -> AppResult<impl IntoResponse> {
    dispatch(&state, &session_id, Action::Answer(form.response)).await?;
    Ok(redirect(&session_id, "/?role=student"))
}

/// POST /student/reset
pub async fn reset(State(state): State<AppState>, session_id: SessionId) -> AppResult<impl IntoResponse> {
    dispatch(&state, &session_id, Action::StartNewSubmission).await?;
    Ok(redirect(&session_id, "/?role=student"))
}

async fn dispatch(state: &AppState, session_id: &SessionId, action: Action) -> AppResult<()> {
    let session = state.sessions.get_or_create(&session_id.id);
    let mut session = session.lock().await;
    state.controller.dispatch(&mut session, action).await
}

fn redirect(session_id: &SessionId, to: &str) -> impl IntoResponse {
    (AppendHeaders(session_id.set_cookie()), Redirect::to(to))
}

/// 解析 `intent` 字段：`save` / `add` / `remove:<i>` / `create`
fn parse_intent(value: &str) -> DraftIntent {
    match value {
        "save" => DraftIntent::Save,
        "add" => DraftIntent::AddObjective,
        other => other
            .strip_prefix("remove:")
            .and_then(|i| i.parse().ok())
            .map(DraftIntent::RemoveObjective)
            .unwrap_or(DraftIntent::Create),
    }
}

async fn read_assignment_form(mut multipart: Multipart) -> AppResult<AssignmentForm> {
    let mut form = AssignmentForm {
        name: String::new(),
        instructions: String::new(),
        objectives: Vec::new(),
        num_questions: 0,
        language: Locale::default(),
        upload: None,
        intent: DraftIntent::Create,
    };

    while let Some(field) = multipart.next_field().await? {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "file" => form.upload = read_upload(field).await?,
            "name" => form.name = field.text().await?,
            "instructions" => form.instructions = field.text().await?,
            "objective" => form.objectives.push(field.text().await?),
            "num_questions" => form.num_questions = field.text().await?.trim().parse().unwrap_or(0),
            "language" => form.language = Locale::from_tag(&field.text().await?),
            "intent" => form.intent = parse_intent(field.text().await?.trim()),
            _ => {}
        }
    }
    Ok(form)
}

async fn read_submission_form(mut multipart: Multipart) -> AppResult<SubmissionForm> {
    let mut form = SubmissionForm {
        assignment_id: String::new(),
        text: String::new(),
        upload: None,
    };

    while let Some(field) = multipart.next_field().await? {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "file" => form.upload = read_upload(field).await?,
            "assignment_id" => form.assignment_id = field.text().await?,
            "text_submission" => form.text = field.text().await?,
            _ => {}
        }
    }
    Ok(form)
}

/// 浏览器在未选择文件时也会发送一个空的文件字段
async fn read_upload(field: axum::extract::multipart::Field<'_>) -> AppResult<Option<Upload>> {
    let file_name = field.file_name().unwrap_or_default().to_string();
    let bytes = field.bytes().await?;
    if file_name.is_empty() && bytes.is_empty() {
        return Ok(None);
    }
    Ok(Some(Upload::new(file_name, bytes.to_vec())))
}

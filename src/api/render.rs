//! 页面渲染
//!
//! 单页界面：教师端（创建 / 查看作业 / 报告）与学生端（提交 / 对话 / 报告）。
//! 所有用户内容经 `ammonia::clean_text` 转义后再输出。

use std::collections::BTreeMap;

use ammonia::clean_text;

use crate::api::ui_text;
use crate::models::assignment::{MAX_QUESTIONS, MIN_QUESTIONS};
use crate::models::{Assignment, Locale, Report};
use crate::orchestrator::session::{Notice, NoticeLevel, Role, Session, Speaker, StudentStage};
use crate::services::catalog::{group_by_assignment, list_reports, ReportEntry};

const TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// 向页面缓冲追加格式化内容
macro_rules! push_fmt {
    ($body:expr, $($arg:tt)*) => {
        $body.push_str(&format!($($arg)*))
    };
}

/// 渲染一页所需的全部数据
pub struct PageView<'a> {
    pub locale: Locale,
    pub session: &'a Session,
    pub notice: Option<Notice>,
    pub tab: Option<&'a str>,
    pub selected_assignment: Option<&'a str>,
    pub selected_evaluation: Option<&'a str>,
    pub assignments: &'a BTreeMap<String, Assignment>,
    pub reports: BTreeMap<String, Report>,
    pub has_api_key: bool,
}

impl PageView<'_> {
    fn t<'k>(&self, key: &'k str) -> &'k str {
        ui_text::text(self.locale, key)
    }
}

/// 渲染完整页面
pub fn render_page(mut view: PageView<'_>) -> String {
    let mut body = String::new();
    let role = view.session.role;

    push_fmt!(
        body,
        r#"<header><h1>{title}</h1><nav><a href="/?role=teacher"{teacher_cls}>{teacher}</a> | <a href="/?role=student"{student_cls}>{student}</a></nav></header>"#,
        title = clean_text(view.t("app_title")),
        teacher = clean_text(view.t("teacher_role")),
        student = clean_text(view.t("student_role")),
        teacher_cls = active_class(role == Role::Teacher),
        student_cls = active_class(role == Role::Student),
    );

    if !view.has_api_key {
        push_fmt!(body, r#"<p class="notice warning">{}</p>"#, clean_text(view.t("api_key_warning")));
    }
    if let Some(notice) = &view.notice {
        push_fmt!(
            body,
            r#"<p class="notice {}">{}</p>"#,
            notice_class(notice.level),
            clean_text(view.t(notice.key))
        );
    }

    let unknown_label = view.t("unknown_assignment").to_string();
    let reports = std::mem::take(&mut view.reports);
    match role {
        Role::Teacher => render_teacher(&mut body, &view, reports, &unknown_label),
        Role::Student => render_student(&mut body, &view, reports, &unknown_label),
    }

    format!(
        "<!DOCTYPE html><html lang=\"{lang}\"><head><meta charset=\"utf-8\"><title>{title}</title>{style}</head><body>{body}</body></html>",
        lang = match view.locale {
            Locale::English => "en",
            Locale::Spanish => "es",
        },
        title = clean_text(view.t("app_title")),
        style = STYLE,
        body = body,
    )
}

fn render_teacher(body: &mut String, view: &PageView<'_>, reports: BTreeMap<String, Report>, unknown_label: &str) {
    let tab = view.tab.unwrap_or("create");
    push_fmt!(body, "<h2>{}</h2>", clean_text(view.t("teacher_dashboard")));
    render_tabs(
        body,
        view,
        "teacher",
        tab,
        &[("create", "create_tab"), ("view", "view_tab"), ("reports", "reports_tab")],
    );

    match tab {
        "view" => render_assignment_list(body, view),
        "reports" => {
            let groups = group_by_assignment(reports, view.assignments, unknown_label);
            if groups.is_empty() {
                push_fmt!(body, "<p>{}</p>", clean_text(view.t("no_evals")));
            }
            for group in groups {
                push_fmt!(
                    body,
                    "<section><h3>{}{}</h3>",
                    clean_text(view.t("reports_for")),
                    clean_text(&group.assignment_name)
                );
                for entry in &group.reports {
                    render_report_entry(body, view, entry, true);
                }
                body.push_str("</section>");
            }
        }
        _ => render_create_form(body, view),
    }
}

fn render_create_form(body: &mut String, view: &PageView<'_>) {
    let draft = &view.session.draft;
    push_fmt!(
        body,
        r#"<h3>{create_new}</h3><form method="post" action="/teacher/assignments" enctype="multipart/form-data">
<button class="default-submit" name="intent" value="create" tabindex="-1" aria-hidden="true"></button>
<label>{name_label}<input name="name" value="{name}"></label>
<label>{instr_label}<textarea name="instructions" rows="6">{instructions}</textarea></label>
<label title="{q_help}">{q_label}<select name="num_questions">"#,
        create_new = clean_text(view.t("create_new")),
        name_label = clean_text(view.t("assignment_name")),
        name = clean_text(&draft.name),
        instr_label = clean_text(view.t("assignment_instructions")),
        instructions = clean_text(&draft.instructions),
        q_help = clean_text(view.t("questions_help")),
        q_label = clean_text(view.t("questions_slider")),
    );
    for n in MIN_QUESTIONS..=MAX_QUESTIONS {
        push_fmt!(body, "<option value=\"{n}\"{}>{n}</option>", selected(n == draft.num_questions));
    }
    push_fmt!(body, r#"</select></label><label>{}<select name="language">"#, clean_text(view.t("language_label")));
    for locale in Locale::ALL {
        push_fmt!(
            body,
            r#"<option value="{tag}"{sel}>{tag}</option>"#,
            tag = clean_text(locale.tag()),
            sel = selected(locale == draft.language)
        );
    }
    push_fmt!(
        body,
        "</select></label><fieldset><legend>{}</legend><p>{}</p>",
        clean_text(view.t("learning_obj_title")),
        clean_text(view.t("learning_obj_desc"))
    );
    for (i, objective) in draft.objectives.iter().enumerate() {
        push_fmt!(
            body,
            r#"<div><label>{label} {n}<input name="objective" value="{value}"></label>"#,
            label = clean_text(view.t("objective_label")),
            n = i + 1,
            value = clean_text(objective),
        );
        if i > 0 {
            push_fmt!(
                body,
                r#"<button name="intent" value="remove:{i}">{}</button>"#,
                clean_text(view.t("remove_btn"))
            );
        }
        body.push_str("</div>");
    }
    push_fmt!(
        body,
        r#"<button name="intent" value="add">{add}</button></fieldset>
<label>{upload}<input type="file" name="file" accept=".pdf,.docx,.txt"></label>
<button name="intent" value="create">{create}</button></form>"#,
        add = clean_text(view.t("add_obj_btn")),
        upload = clean_text(view.t("upload_label")),
        create = clean_text(view.t("create_btn")),
    );
}

fn render_assignment_list(body: &mut String, view: &PageView<'_>) {
    if view.assignments.is_empty() {
        push_fmt!(body, "<p>{}</p>", clean_text(view.t("no_assignments")));
        return;
    }
    for assignment in sorted_assignments(view.assignments) {
        let open = view.selected_assignment == Some(assignment.id.as_str());
        push_fmt!(
            body,
            r#"<details{open}><summary>{name}</summary>"#,
            open = if open { " open" } else { "" },
            name = clean_text(&assignment.name),
        );
        render_assignment_details(body, view, assignment);
        push_fmt!(
            body,
            r#"<p><strong>{id_label}:</strong> {id}</p><p><strong>{created_label}:</strong> {created}</p>
<form method="post" action="/teacher/assignments/{id}/delete"><button>{delete}</button></form></details>"#,
            id_label = clean_text(view.t("id_label")),
            id = clean_text(&assignment.id),
            created_label = clean_text(view.t("created_label")),
            created = assignment.created_at.format(TIME_FORMAT),
            delete = clean_text(view.t("delete_btn")),
        );
    }
}

fn render_assignment_details(body: &mut String, view: &PageView<'_>, assignment: &Assignment) {
    push_fmt!(
        body,
        "<h4>{}</h4><pre>{}</pre><h4>{}</h4><ul>",
        clean_text(view.t("instructions_label")),
        clean_text(&assignment.instructions),
        clean_text(view.t("obj_label")),
    );
    for objective in &assignment.learning_objectives {
        push_fmt!(body, "<li>{}</li>", clean_text(objective));
    }
    body.push_str("</ul>");
    if let Some(file_name) = assignment.file_name() {
        push_fmt!(
            body,
            "<p><strong>{}:</strong> {}</p>",
            clean_text(view.t("file_label")),
            clean_text(&file_name)
        );
    }
}

fn render_student(body: &mut String, view: &PageView<'_>, reports: BTreeMap<String, Report>, unknown_label: &str) {
    let tab = view.tab.unwrap_or("submit");
    push_fmt!(body, "<h2>{}</h2>", clean_text(view.t("student_dashboard")));
    render_tabs(body, view, "student", tab, &[("submit", "submit_tab"), ("evals", "evals_tab")]);

    if tab == "evals" {
        push_fmt!(body, "<h3>{}</h3>", clean_text(view.t("view_your_evals")));
        let entries = list_reports(reports, view.assignments, unknown_label);
        if entries.is_empty() {
            push_fmt!(body, "<p>{}</p>", clean_text(view.t("no_evals_yet")));
        }
        for entry in &entries {
            render_report_entry(body, view, entry, false);
        }
        return;
    }

    match &view.session.stage {
        StudentStage::Submitting => render_submit_form(body, view),
        StudentStage::Conversing { conversation, .. } => {
            render_chat(body, view);
            push_fmt!(
                body,
                r#"<p class="progress">{current}/{total}</p><form method="post" action="/student/answer">
<textarea name="response" rows="4" placeholder="{placeholder}"></textarea><button>{send}</button></form>"#,
                current = conversation.index() + 1,
                total = conversation.question_count(),
                placeholder = clean_text(view.t("answer_placeholder")),
                send = clean_text(view.t("send_btn")),
            );
        }
        StudentStage::Evaluated { report, .. } => {
            render_chat(body, view);
            push_fmt!(
                body,
                r#"<h3>{label}</h3><pre class="report">{text}</pre>
<form method="post" action="/student/reset"><button>{reset}</button></form>"#,
                label = clean_text(view.t("eval_report_label")),
                text = clean_text(&report.text_report),
                reset = clean_text(view.t("new_submission_btn")),
            );
        }
    }
}

fn render_submit_form(body: &mut String, view: &PageView<'_>) {
    push_fmt!(body, "<h3>{}</h3>", clean_text(view.t("submit_tab")));
    if view.assignments.is_empty() {
        push_fmt!(body, "<p>{}</p>", clean_text(view.t("no_assignments_submit")));
        return;
    }

    let assignments = sorted_assignments(view.assignments);
    let current = view
        .selected_assignment
        .and_then(|id| view.assignments.get(id))
        .or_else(|| assignments.first().copied());

    push_fmt!(
        body,
        r#"<form method="get" action="/"><input type="hidden" name="role" value="student"><label>{}<select name="assignment">"#,
        clean_text(view.t("select_assignment"))
    );
    for assignment in &assignments {
        let is_current = current.map(|c| c.id == assignment.id).unwrap_or(false);
        push_fmt!(
            body,
            r#"<option value="{id}"{sel}>{name}</option>"#,
            id = clean_text(&assignment.id),
            sel = selected(is_current),
            name = clean_text(&assignment.name),
        );
    }
    body.push_str("</select></label><button>↻</button></form>");

    let Some(assignment) = current else { return };
    push_fmt!(body, "<h4>{}</h4>", clean_text(view.t("assignment_details")));
    render_assignment_details(body, view, assignment);

    push_fmt!(
        body,
        r#"<form method="post" action="/student/submissions" enctype="multipart/form-data">
<input type="hidden" name="assignment_id" value="{id}">
<label>{label}<textarea name="text_submission" rows="10" placeholder="{placeholder}"></textarea></label>
<label>{upload}<input type="file" name="file" accept=".pdf,.docx,.txt"><small>{upload_hint}</small></label>
<button>{submit}</button></form>"#,
        id = clean_text(&assignment.id),
        label = clean_text(view.t("your_submission")),
        placeholder = clean_text(view.t("response_placeholder")),
        upload = clean_text(view.t("upload_submission")),
        upload_hint = clean_text(view.t("upload_text_only")),
        submit = clean_text(view.t("submit_btn")),
    );
}

fn render_chat(body: &mut String, view: &PageView<'_>) {
    push_fmt!(body, r#"<h3>{}</h3><div class="chat">"#, clean_text(view.t("eval_conversation")));
    for message in &view.session.messages {
        let class = match message.speaker {
            Speaker::Assistant => "assistant",
            Speaker::Student => "student",
        };
        push_fmt!(body, r#"<div class="msg {class}">{}</div>"#, clean_text(&message.content));
    }
    body.push_str("</div>");
}

fn render_report_entry(body: &mut String, view: &PageView<'_>, entry: &ReportEntry, with_details: bool) {
    let open = view.selected_evaluation == Some(entry.evaluation_id.as_str());
    push_fmt!(
        body,
        r#"<details{open}><summary>{from}{time} · {name}</summary><h4>{label}</h4><pre class="report">{text}</pre>"#,
        open = if open { " open" } else { "" },
        from = clean_text(view.t("report_from")),
        time = entry.timestamp.format(TIME_FORMAT),
        name = clean_text(&entry.assignment_name),
        label = clean_text(view.t("report_label")),
        text = clean_text(&entry.report.text_report),
    );
    if with_details {
        push_fmt!(
            body,
            "<h4>{}</h4><pre>{}</pre>",
            clean_text(view.t("detailed_eval_label")),
            clean_text(&entry.report.evaluation_data.structured_evaluation.to_pretty_json()),
        );
    }
    body.push_str("</details>");
}

fn render_tabs(body: &mut String, view: &PageView<'_>, role: &str, current: &str, tabs: &[(&str, &str)]) {
    body.push_str("<nav class=\"tabs\">");
    for (tab, key) in tabs {
        push_fmt!(
            body,
            r#"<a href="/?role={role}&amp;tab={tab}"{cls}>{label}</a> "#,
            cls = active_class(*tab == current),
            label = clean_text(view.t(key)),
        );
    }
    body.push_str("</nav>");
}

fn sorted_assignments(assignments: &BTreeMap<String, Assignment>) -> Vec<&Assignment> {
    let mut list: Vec<&Assignment> = assignments.values().collect();
    list.sort_by(|a, b| a.created_at.cmp(&b.created_at));
    list
}

fn active_class(active: bool) -> &'static str {
    if active {
        r#" class="active""#
    } else {
        ""
    }
}

fn selected(is_selected: bool) -> &'static str {
    if is_selected {
        " selected"
    } else {
        ""
    }
}

fn notice_class(level: NoticeLevel) -> &'static str {
    match level {
        NoticeLevel::Success => "success",
        NoticeLevel::Warning => "warning",
        NoticeLevel::Error => "error",
    }
}

const STYLE: &str = "<style>\
body{font-family:sans-serif;max-width:60rem;margin:auto;padding:1rem}\
label{display:block;margin:.5rem 0}input,textarea,select{display:block;width:100%}\
.notice{padding:.5rem}.success{background:#e6f4ea}.warning{background:#fff4e5}.error{background:#fdecea}\
.active{font-weight:bold}.msg{padding:.5rem;margin:.25rem 0}.assistant{background:#f1f3f4}.student{background:#e8f0fe}\
pre{white-space:pre-wrap}\
.default-submit{position:absolute;left:-9999px;width:1px;height:1px}\
</style>";

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Local;

    fn page(session: &Session, assignments: &BTreeMap<String, Assignment>) -> String {
        render_page(PageView {
            locale: Locale::English,
            session,
            notice: None,
            tab: None,
            selected_assignment: None,
            selected_evaluation: None,
            assignments,
            reports: BTreeMap::new(),
            has_api_key: true,
        })
    }

    #[test]
    fn enter_in_create_form_submits_create() {
        let mut session = Session::default();
        session.draft.objectives = vec!["a".into(), "b".into()];
        let html = page(&session, &BTreeMap::new());

        let first_intent = html.find(r#"name="intent""#).unwrap();
        let create = html.find(r#"value="create""#).unwrap();
        let remove = html.find(r#"value="remove:1""#).unwrap();
        let add = html.find(r#"value="add""#).unwrap();
        assert!(create < remove && create < add);
        assert!(html[first_intent..].starts_with(r#"name="intent" value="create""#));
    }

    #[test]
    fn submission_form_mentions_text_only_uploads() {
        let session = Session {
            role: Role::Student,
            ..Default::default()
        };
        let assignment = Assignment::new("Essay", "Write", vec!["Obj".into()], 3, Locale::English, Local::now());
        let assignments = BTreeMap::from([(assignment.id.clone(), assignment)]);

        let html = page(&session, &assignments);
        assert!(html.contains(&clean_text(ui_text::text(Locale::English, "upload_text_only"))));
        assert!(html.contains(r#"action="/student/submissions""#));
    }
}

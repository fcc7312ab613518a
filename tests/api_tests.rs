mod common;

use std::sync::Arc;

use assignment_assessor::api::{self, AppState};
use assignment_assessor::infrastructure::Storage;
use assignment_assessor::models::Locale;
use assignment_assessor::orchestrator::SessionStore;
use assignment_assessor::SessionController;
use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use reqwest::multipart::Form;
use tower::ServiceExt;

use common::{full_assessment_script, temp_data_dir, test_config, ScriptedModel};

fn app_state(model: Arc<ScriptedModel>, with_api_key: bool) -> (AppState, Arc<Storage>) {
    let dir = temp_data_dir();
    let mut config = test_config(&dir);
    if !with_api_key {
        config.llm_api_key.clear();
    }
    let storage = Arc::new(Storage::new(&dir));
    let state = AppState {
        controller: Arc::new(SessionController::new(model, storage.clone(), &config)),
        sessions: Arc::new(SessionStore::new()),
        interface_language: Locale::English,
    };
    (state, storage)
}

/// 在随机端口上启动服务，返回基础地址
async fn spawn_app(state: AppState) -> String {
    let app = api::create_router(state);
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind random port");
    let address = format!("http://{}", listener.local_addr().unwrap());

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    address
}

fn client() -> reqwest::Client {
    reqwest::Client::builder().cookie_store(true).build().unwrap()
}

fn assignment_form(intent: &str) -> Form {
    Form::new()
        .text("name", "Essay")
        .text("instructions", "Explain X")
        .text("objective", "Objective1")
        .text("num_questions", "2")
        .text("language", "English")
        .text("intent", intent.to_string())
}

#[tokio::test]
async fn index_sets_session_cookie() {
    let (state, _) = app_state(ScriptedModel::new(Vec::<String>::new()), true);
    let app = api::create_router(state);

    let response = app
        .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let cookie = response.headers().get(header::SET_COOKIE).unwrap().to_str().unwrap();
    assert!(cookie.starts_with("assessor_session="));
}

#[tokio::test]
async fn cookieless_page_views_do_not_create_sessions() {
    let (state, _) = app_state(ScriptedModel::new(Vec::<String>::new()), true);
    let sessions = state.sessions.clone();
    let app = api::create_router(state);

    for uri in ["/", "/?role=student", "/?role=teacher&tab=view"].into_iter().cycle().take(60) {
        let response = app
            .clone()
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    assert!(sessions.is_empty());
}

#[tokio::test]
async fn role_switch_is_kept_for_returning_browser() {
    let (state, _) = app_state(ScriptedModel::new(Vec::<String>::new()), true);
    let sessions = state.sessions.clone();
    let app = api::create_router(state);
    let cookie = "assessor_session=returning-browser";

    for uri in ["/?role=student", "/"] {
        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .uri(uri)
                    .header(header::COOKIE, cookie)
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    assert_eq!(sessions.len(), 1);
    let session = sessions.get("returning-browser").unwrap();
    assert_eq!(session.lock().await.role, assignment_assessor::orchestrator::Role::Student);
}

#[tokio::test]
async fn unknown_route_is_404() {
    let (state, _) = app_state(ScriptedModel::new(Vec::<String>::new()), true);
    let address = spawn_app(state).await;

    let response = client()
        .get(format!("{}/random_path_that_does_not_exist", address))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status().as_u16(), 404);
}

#[tokio::test]
async fn teacher_creates_and_deletes_assignment() {
    let (state, storage) = app_state(ScriptedModel::new(Vec::<String>::new()), true);
    let address = spawn_app(state).await;
    let client = client();

    client.get(format!("{}/?role=teacher", address)).send().await.unwrap();

    let page = client
        .post(format!("{}/teacher/assignments", address))
        .multipart(assignment_form("add"))
        .send()
        .await
        .unwrap()
        .text()
        .await
        .unwrap();
    // 新增的第二个目标带有删除按钮
    assert!(page.contains(r#"value="remove:1""#));

    let page = client
        .post(format!("{}/teacher/assignments", address))
        .multipart(assignment_form("create"))
        .send()
        .await
        .unwrap()
        .text()
        .await
        .unwrap();
    assert!(page.contains(r#"class="notice success""#));

    let assignments = storage.assignments.load_all().await.unwrap();
    assert_eq!(assignments.len(), 1);
    let id = assignments.keys().next().unwrap().clone();

    let page = client
        .get(format!("{}/?role=teacher&tab=view", address))
        .send()
        .await
        .unwrap()
        .text()
        .await
        .unwrap();
    assert!(page.contains("Objective1"));
    assert!(page.contains(&id));

    let response = client
        .post(format!("{}/teacher/assignments/{}/delete", address, id))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), reqwest::StatusCode::OK);
    assert!(storage.assignments.load_all().await.unwrap().is_empty());
}

#[tokio::test]
async fn missing_fields_show_error_notice() {
    let (state, storage) = app_state(ScriptedModel::new(Vec::<String>::new()), true);
    let address = spawn_app(state).await;
    let client = client();

    let form = Form::new().text("name", "").text("intent", "create");
    let page = client
        .post(format!("{}/teacher/assignments", address))
        .multipart(form)
        .send()
        .await
        .unwrap()
        .text()
        .await
        .unwrap();

    assert!(page.contains(r#"class="notice error""#));
    assert!(storage.assignments.load_all().await.unwrap().is_empty());
}

#[tokio::test]
async fn student_completes_assessment_over_http() {
    let model = ScriptedModel::new(full_assessment_script());
    let (state, storage) = app_state(model.clone(), true);
    let address = spawn_app(state).await;
    let client = client();

    client
        .post(format!("{}/teacher/assignments", address))
        .multipart(assignment_form("create"))
        .send()
        .await
        .unwrap();
    let id = storage
        .assignments
        .load_all()
        .await
        .unwrap()
        .keys()
        .next()
        .unwrap()
        .clone();

    let submission = Form::new()
        .text("assignment_id", id.clone())
        .text("text_submission", "My essay")
        .part("file", reqwest::multipart::Part::bytes(Vec::new()).file_name(""));
    let page = client
        .post(format!("{}/student/submissions", address))
        .multipart(submission)
        .send()
        .await
        .unwrap()
        .text()
        .await
        .unwrap();
    assert!(page.contains(r#"action="/student/answer""#));

    for answer in ["first", "second"] {
        client
            .post(format!("{}/student/answer", address))
            .form(&[("response", answer)])
            .send()
            .await
            .unwrap();
    }

    let page = client
        .get(format!("{}/?role=student", address))
        .send()
        .await
        .unwrap()
        .text()
        .await
        .unwrap();
    assert!(page.contains(r#"action="/student/reset""#));
    assert_eq!(storage.evaluations.load_all().await.unwrap().len(), 1);
    assert_eq!(model.calls().len(), 7);

    let page = client
        .get(format!("{}/?role=teacher&tab=reports", address))
        .send()
        .await
        .unwrap()
        .text()
        .await
        .unwrap();
    assert!(page.contains("Executive"));
    assert!(page.contains("<details"));
}

#[tokio::test]
async fn submission_without_api_key_warns() {
    let model = ScriptedModel::new(Vec::<String>::new());
    let (state, _) = app_state(model.clone(), false);
    let address = spawn_app(state).await;
    let client = client();

    let form = Form::new()
        .text("assignment_id", "whatever")
        .text("text_submission", "essay");
    let page = client
        .post(format!("{}/student/submissions", address))
        .multipart(form)
        .send()
        .await
        .unwrap()
        .text()
        .await
        .unwrap();

    assert!(page.contains(r#"class="notice warning""#));
    assert!(model.calls().is_empty());
}

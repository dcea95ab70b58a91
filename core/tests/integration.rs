//! Full session lifecycle against the live mock server.
//!
//! # Design
//! Starts the mock server on a random port, then drives `TodoSession` over
//! real HTTP using ureq. Each `Effect::Send` is executed immediately and fed
//! back as a completion; banner timers are collected but never fired.

use todolist_core::{
    Action, BannerKind, Confirmation, Effect, EditState, HttpMethod, HttpRequest, HttpResponse, ListStatus,
    SessionConfig, TodoSession, TransportError,
};

/// Execute an `HttpRequest` using ureq and return an `HttpResponse`.
///
/// Disables ureq's automatic status-code-as-error behavior so 4xx/5xx
/// responses are returned as data; only a missing response is an error.
fn execute(req: HttpRequest) -> Result<HttpResponse, TransportError> {
    let agent = ureq::Agent::config_builder()
        .http_status_as_error(false)
        .build()
        .new_agent();

    let result = match (req.method, req.body) {
        (HttpMethod::Get, _) => agent.get(&req.url).call(),
        (HttpMethod::Delete, _) => agent.delete(&req.url).call(),
        (HttpMethod::Post, Some(body)) => agent.post(&req.url).content_type("application/json").send(body.as_bytes()),
        (HttpMethod::Post, None) => agent.post(&req.url).send_empty(),
        (HttpMethod::Put, Some(body)) => agent.put(&req.url).content_type("application/json").send(body.as_bytes()),
        (HttpMethod::Put, None) => agent.put(&req.url).send_empty(),
    };
    let mut response = result.map_err(|e| TransportError::new(e.to_string()))?;

    let status = response.status().as_u16();
    let body = response.body_mut().read_to_string().unwrap_or_default();
    Ok(HttpResponse::new(status, body))
}

/// Run `action` and every request it causes until the session is idle.
/// Returns the methods of the requests that were sent, in order.
fn drive(session: &mut TodoSession, action: Action) -> Vec<HttpMethod> {
    let mut sent = Vec::new();
    let mut queue = session.dispatch(action);
    while let Some(effect) = queue.pop() {
        if let Effect::Send { request, http } = effect {
            sent.push(http.method);
            let outcome = execute(http);
            queue.extend(session.dispatch(Action::RequestCompleted { request, outcome }));
        }
    }
    sent
}

fn start_server() -> String {
    let std_listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = std_listener.local_addr().unwrap();
    std_listener.set_nonblocking(true).unwrap();

    std::thread::spawn(move || {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();
        rt.block_on(async {
            let listener = tokio::net::TcpListener::from_std(std_listener).unwrap();
            mock_server::run(listener).await
        })
        .unwrap();
    });

    format!("http://{addr}")
}

#[test]
fn session_lifecycle() {
    let mut session = TodoSession::new(SessionConfig::new(start_server()));

    // Step 1: mount: empty store.
    assert_eq!(drive(&mut session, Action::Mount), vec![HttpMethod::Get]);
    assert_eq!(session.state().list_status(), ListStatus::Loaded);
    assert!(session.state().items().is_empty());

    // Step 2: create, then resync.
    session.dispatch(Action::SetDraft("  buy milk  ".to_string()));
    assert_eq!(drive(&mut session, Action::Create), vec![HttpMethod::Post, HttpMethod::Get]);
    assert_eq!(session.state().items().len(), 1);
    assert_eq!(session.state().items()[0].text, "buy milk");
    assert_eq!(session.state().draft(), "");
    assert_eq!(session.state().banner().unwrap().kind, BannerKind::Success);
    let id = session.state().items()[0].id.clone();

    // Step 3: whitespace-only create never reaches the store.
    session.dispatch(Action::SetDraft(" ".to_string()));
    assert!(drive(&mut session, Action::Create).is_empty());
    assert_eq!(session.state().banner().unwrap().message, "Please enter a todo");

    // Step 4: edit in place.
    session.dispatch(Action::BeginEdit {
        id: id.clone(),
        text: "buy milk".to_string(),
    });
    session.dispatch(Action::SetEditText("buy oat milk".to_string()));
    assert_eq!(drive(&mut session, Action::Update), vec![HttpMethod::Put, HttpMethod::Get]);
    assert_eq!(session.state().items()[0].text, "buy oat milk");
    assert_eq!(session.state().editing(), &EditState::Viewing);

    // Step 5: declined delete does nothing.
    let declined = Action::Delete {
        id: id.clone(),
        confirmation: Confirmation::Declined,
    };
    assert!(drive(&mut session, declined).is_empty());
    assert_eq!(session.state().items().len(), 1);

    // Step 6: confirmed delete, then resync to an empty list.
    let confirmed = Action::Delete {
        id: id.clone(),
        confirmation: Confirmation::Confirmed,
    };
    assert_eq!(drive(&mut session, confirmed), vec![HttpMethod::Delete, HttpMethod::Get]);
    assert!(session.state().items().is_empty());
    assert_eq!(session.state().banner().unwrap().message, "Todo has been deleted");

    // Step 7: updating the deleted id surfaces the store's message.
    session.dispatch(Action::BeginEdit {
        id,
        text: "ghost".to_string(),
    });
    assert_eq!(drive(&mut session, Action::Update), vec![HttpMethod::Put]);
    assert_eq!(session.state().banner().unwrap().message, "Todo not found");
    assert!(matches!(session.state().editing(), EditState::Editing { .. }));
    assert_eq!(session.in_flight(), 0);
}

#[test]
fn unreachable_store_is_reported() {
    // Bind and immediately release a port so nothing is listening on it.
    let addr = std::net::TcpListener::bind("127.0.0.1:0")
        .unwrap()
        .local_addr()
        .unwrap();
    let base = format!("http://{addr}");
    let mut session = TodoSession::new(SessionConfig::new(base.clone()));

    drive(&mut session, Action::Mount);

    assert_eq!(session.state().list_status(), ListStatus::Failed);
    assert!(session.state().items().is_empty());
    assert_eq!(
        session.state().banner().unwrap().message,
        format!("Server is not running. Start your backend server at {base}.")
    );
}

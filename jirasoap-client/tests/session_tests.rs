use jirasoap_client::mock::{MockTransport, authentication_fault, collection_envelope, scalar_envelope};
use jirasoap_client::{ClientConfig, ClientError, Session, SessionState, TransportError};
use jirasoap_wire::{Node, Param};
use pretty_assertions::assert_eq;
use std::time::Duration;

fn session(transport: &MockTransport) -> Session<&MockTransport> {
    Session::new(ClientConfig::new("http://jira.example.com"), transport)
}

fn logged_in(transport: &MockTransport) -> Session<&MockTransport> {
    transport.respond(scalar_envelope("login", "tok-123"));
    let mut session = session(transport);
    assert!(session.login("alice", "secret").unwrap());
    session
}

fn status(id: &str) -> Node {
    Node::new("s").child(Node::with_text("id", id))
}

// ── Login ────────────────────────────────────────────────────────

#[test]
fn new_session_is_unauthenticated() {
    let transport = MockTransport::new();
    let session = session(&transport);
    assert_eq!(session.state(), SessionState::Unauthenticated);
    assert!(!session.is_authenticated());
    assert_eq!(session.current_user(), None);
}

#[test]
fn login_sends_credentials_without_a_token() {
    let transport = MockTransport::new();
    let session = logged_in(&transport);

    let request = transport.last_request().unwrap();
    assert_eq!(request.operation(), "login");
    assert_eq!(
        request.params(),
        [Param::Text("alice".into()), Param::Text("secret".into())]
    );
    assert_eq!(session.state(), SessionState::Authenticated);
    assert_eq!(session.current_user(), Some("alice"));
}

#[test]
fn rejected_login_is_an_authentication_error() {
    let transport = MockTransport::new();
    transport.fail(authentication_fault());
    let mut session = session(&transport);

    let err = session.login("alice", "wrong").unwrap_err();
    assert!(matches!(err, ClientError::Authentication(_)));
    assert!(err.is_authentication());
    assert_eq!(session.state(), SessionState::Unauthenticated);
}

#[test]
fn failed_relogin_keeps_the_existing_session() {
    let transport = MockTransport::new();
    let mut session = logged_in(&transport);
    transport.fail(authentication_fault());

    assert!(session.login("bob", "nope").is_err());
    assert_eq!(session.current_user(), Some("alice"));
}

#[test]
fn empty_token_is_rejected() {
    let transport = MockTransport::new();
    transport.respond(scalar_envelope("login", ""));
    let mut session = session(&transport);
    assert!(matches!(
        session.login("alice", "secret"),
        Err(ClientError::Authentication(_))
    ));
    assert!(!session.is_authenticated());
}

#[test]
fn login_network_failure_is_a_transport_error() {
    let transport = MockTransport::new();
    transport.fail(TransportError::Network("connection refused".into()));
    let mut session = session(&transport);
    let err = session.login("alice", "secret").unwrap_err();
    assert!(matches!(err, ClientError::Transport { operation: "login", .. }));
}

// ── Token handling ───────────────────────────────────────────────

#[test]
fn calls_before_login_never_reach_the_transport() {
    let transport = MockTransport::new();
    let mut session = session(&transport);

    let err = session.api().get_priorities().unwrap_err();
    assert!(matches!(err, ClientError::Authentication(_)));
    assert_eq!(transport.request_count(), 0);
}

#[test]
fn token_is_the_first_parameter() {
    let transport = MockTransport::new();
    let mut session = logged_in(&transport);
    transport.respond(collection_envelope("getStatuses", [status("1")]));

    session.api().get_statuses().unwrap();

    let request = transport.last_request().unwrap();
    assert_eq!(request.operation(), "getStatuses");
    assert_eq!(request.params(), [Param::Text("tok-123".into())]);
    assert_eq!(request.to_node().first_child("in0").map(Node::text), Some("tok-123"));
}

#[test]
fn arguments_follow_the_token_in_order() {
    let transport = MockTransport::new();
    let mut session = logged_in(&transport);
    transport.respond(collection_envelope("getProjectAvatars", Vec::<Node>::new()));

    session.api().get_project_avatars_for_key("EX", true).unwrap();

    let names: Vec<_> = transport
        .last_request()
        .unwrap()
        .param_nodes()
        .iter()
        .map(|n| format!("{}={}", n.name(), n.text()))
        .collect();
    assert_eq!(names, ["in0=tok-123", "in1=EX", "in2=true"]);
}

// ── Logout ───────────────────────────────────────────────────────

#[test]
fn logout_clears_the_session() {
    let transport = MockTransport::new();
    let mut session = logged_in(&transport);
    transport.respond(scalar_envelope("logout", "true"));

    assert!(session.logout().unwrap());
    assert_eq!(session.state(), SessionState::Unauthenticated);
    assert_eq!(
        transport.last_request().unwrap().params(),
        [Param::Text("tok-123".into())]
    );

    let err = session.api().get_statuses().unwrap_err();
    assert!(matches!(err, ClientError::Authentication(_)));
    assert_eq!(transport.request_count(), 2);
}

#[test]
fn declined_logout_keeps_the_token() {
    let transport = MockTransport::new();
    let mut session = logged_in(&transport);
    transport.respond(scalar_envelope("logout", "false"));

    assert!(!session.logout().unwrap());
    assert!(session.is_authenticated());
}

#[test]
fn declined_logout_then_expired_token() {
    let transport = MockTransport::new();
    let mut session = logged_in(&transport);
    transport
        .respond(scalar_envelope("logout", "false"))
        .fail(authentication_fault());

    assert!(!session.logout().unwrap());
    assert_eq!(session.current_user(), Some("alice"));

    let err = session.api().get_statuses().unwrap_err();
    assert!(matches!(
        err,
        ClientError::AuthenticationExpired {
            operation: "getStatuses"
        }
    ));
    assert_eq!(
        transport.last_request().unwrap().params()[0],
        Param::Text("tok-123".into())
    );
    assert_eq!(session.state(), SessionState::Unauthenticated);
    assert_eq!(session.current_user(), None);
}

#[test]
fn logout_without_login_fails_locally() {
    let transport = MockTransport::new();
    let mut session = session(&transport);
    assert!(matches!(session.logout(), Err(ClientError::Authentication(_))));
    assert_eq!(transport.request_count(), 0);
}

// ── Expiry ───────────────────────────────────────────────────────

#[test]
fn rejected_token_expires_the_session() {
    let transport = MockTransport::new();
    let mut session = logged_in(&transport);
    transport.fail(authentication_fault());

    let err = session.api().get_statuses().unwrap_err();
    assert!(matches!(
        err,
        ClientError::AuthenticationExpired {
            operation: "getStatuses"
        }
    ));
    assert_eq!(session.state(), SessionState::Unauthenticated);

    let next = session.api().get_priorities().unwrap_err();
    assert!(matches!(next, ClientError::Authentication(_)));
    assert_eq!(transport.request_count(), 2);
}

#[test]
fn session_can_log_in_again_after_expiry() {
    let transport = MockTransport::new();
    let mut session = logged_in(&transport);
    transport.fail(authentication_fault());
    let _ = session.api().get_statuses();

    transport.respond(scalar_envelope("login", "tok-456"));
    transport.respond(collection_envelope("getStatuses", [status("1")]));
    session.login("alice", "secret").unwrap();
    assert_eq!(session.api().get_statuses().unwrap().len(), 1);
    assert_eq!(
        transport.last_request().unwrap().params(),
        [Param::Text("tok-456".into())]
    );
}

#[test]
fn other_faults_keep_the_session() {
    let transport = MockTransport::new();
    let mut session = logged_in(&transport);
    transport.fail(TransportError::Fault {
        code: "soapenv:Server.userException".into(),
        message: "com.atlassian.jira.rpc.exception.RemotePermissionException".into(),
    });

    let err = session.api().get_statuses().unwrap_err();
    assert!(matches!(err, ClientError::Transport { .. }));
    assert!(session.is_authenticated());
}

// ── Timeouts ─────────────────────────────────────────────────────

#[test]
fn configured_timeout_reaches_the_transport() {
    let transport = MockTransport::new();
    let config = ClientConfig {
        timeout_ms: 1_500,
        ..ClientConfig::new("http://jira.example.com")
    };
    let mut session = Session::new(config, &transport);
    transport
        .respond(scalar_envelope("login", "tok"))
        .respond(collection_envelope("getStatuses", [status("1")]));

    session.login("alice", "secret").unwrap();
    session.api().get_statuses().unwrap();
    assert_eq!(transport.timeouts(), [Duration::from_millis(1_500); 2]);
}

#[test]
fn slow_server_is_a_timeout_and_keeps_the_session() {
    let transport = MockTransport::new();
    let config = ClientConfig {
        timeout_ms: 200,
        ..ClientConfig::new("http://jira.example.com")
    };
    let mut session = Session::new(config, &transport);
    transport
        .respond(scalar_envelope("login", "tok"))
        .respond_after(
            collection_envelope("getStatuses", [status("1")]),
            Duration::from_secs(1),
        );
    session.login("alice", "secret").unwrap();

    let err = session.api().get_statuses().unwrap_err();
    assert!(matches!(
        err,
        ClientError::Transport {
            operation: "getStatuses",
            source: TransportError::Timeout(200),
        }
    ));
    assert!(session.is_authenticated());
}

#[test]
fn debug_output_hides_the_token() {
    let transport = MockTransport::new();
    let session = logged_in(&transport);
    let rendered = format!("{session:?}");
    assert!(!rendered.contains("tok-123"));
    assert!(rendered.contains("alice"));
}

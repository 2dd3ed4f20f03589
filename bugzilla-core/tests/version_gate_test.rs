use bugzilla_core::api::CallError;
use bugzilla_core::args::Args;
use bugzilla_core::client::BugzillaClient;
use bugzilla_core::groups::server_info::VersionCheck;
use bugzilla_core::version::Version;
use bugzilla_fixture::FakeBugzilla;
use serde_json::json;
use std::sync::Arc;

fn setup(server: FakeBugzilla) -> (Arc<FakeBugzilla>, BugzillaClient<Arc<FakeBugzilla>>) {
    let server = Arc::new(server);
    (server.clone(), BugzillaClient::new(server))
}

// (qualified operation, arguments, minimum version)
fn gated_operations() -> Vec<(&'static str, Args, Version)> {
    let mapping = || Args::Mapping(json!({ "ids": [1] }).as_object().unwrap().clone());

    vec![
        ("Bugzilla.extensions", Args::Absent, Version::new(3, 2)),
        ("Bugzilla.time", Args::Absent, Version::new(3, 4)),
        ("Bug.fields", Args::Absent, Version::new(3, 6)),
        ("Bug.attachments", mapping(), Version::new(3, 6)),
        ("Bug.comments", mapping(), Version::new(3, 4)),
        ("Bug.history", Args::from(1_u64), Version::new(3, 4)),
        ("Bug.search", mapping(), Version::new(3, 4)),
        ("Bug.add_attachment", mapping(), Version::new(4, 0)),
        ("Bug.add_comment", mapping(), Version::new(3, 2)),
        ("Bug.update", mapping(), Version::new(4, 0)),
        ("Bug.update_see_also", mapping(), Version::new(3, 4)),
        ("User.get", mapping(), Version::new(3, 4)),
    ]
}

#[tokio::test]
async fn test_old_servers_reject_gated_operations_locally() {
    let (server, client) = setup(FakeBugzilla::new("3.0.11"));

    for (operation, args, required) in gated_operations() {
        match client.call(operation, args).await {
            Err(CallError::UnsupportedByServerVersion {
                command,
                current,
                required: r,
            }) => {
                assert_eq!(command, operation);
                assert_eq!(current, "3.0.11");
                assert_eq!(r, required);
            }
            other => panic!("{operation}: expected UnsupportedByServerVersion, got {other:?}"),
        }
    }

    assert!(server.commands().is_empty());
}

#[tokio::test]
async fn test_gate_passes_at_the_minimum_version() {
    for (operation, args, required) in gated_operations() {
        let (server, client) = setup(FakeBugzilla::new(&required.to_string()));

        client.call(operation, args).await.unwrap();

        assert_eq!(server.commands(), vec![operation]);
    }
}

#[tokio::test]
async fn test_gate_passes_above_the_minimum_version() {
    let (server, client) = setup(FakeBugzilla::new("5.0.4.rh83"));

    for (operation, args, _) in gated_operations() {
        client.call(operation, args).await.unwrap();
    }

    assert_eq!(server.commands().len(), gated_operations().len());
}

#[tokio::test]
async fn test_gate_queries_the_version_before_every_gated_call() {
    let (server, client) = setup(FakeBugzilla::new("4.4"));

    client.bug().history(1_u64).await.unwrap();
    client.bug().history(2_u64).await.unwrap();

    let commands: Vec<_> = server.calls().into_iter().map(|c| c.command).collect();
    assert_eq!(
        commands,
        vec!["Bugzilla.version", "Bug.history", "Bugzilla.version", "Bug.history"]
    );
}

#[tokio::test]
async fn test_versions_compare_numerically() {
    let (_, client) = setup(FakeBugzilla::new("10.0"));

    let check = client.bugzilla().check_version(Version::new(4, 0)).await.unwrap();

    assert_eq!(
        check,
        VersionCheck {
            satisfied: true,
            current: "10.0".to_string()
        }
    );
}

#[tokio::test]
async fn test_missing_version_never_satisfies() {
    let (server, client) = setup(FakeBugzilla::without_version());

    let check = client.bugzilla().check_version(Version::new(2, 0)).await.unwrap();
    assert!(!check.satisfied);
    assert_eq!(check.current, "");

    let err = client.bug().history(1_u64).await.unwrap_err();
    assert!(matches!(err, CallError::UnsupportedByServerVersion { .. }));
    assert!(server.commands().is_empty());
}

#[tokio::test]
async fn test_ungated_operations_skip_the_version_query() {
    let (server, client) = setup(FakeBugzilla::new("2.22"));

    client.bugzilla().timezone().await.unwrap();
    client.bug().legal_values(json!({ "field": "product" }).as_object().unwrap().clone()).await.unwrap();
    client.product().get_selectable_products().await.unwrap();

    let commands: Vec<_> = server.calls().into_iter().map(|c| c.command).collect();
    assert_eq!(
        commands,
        vec!["Bugzilla.timezone", "Bug.legal_values", "Product.get_selectable_products"]
    );
}

#[tokio::test]
async fn test_bug_get_is_permissive_on_recent_servers() {
    let (server, client) = setup(FakeBugzilla::new("3.4"));

    client.bug().get(618271_u64).await.unwrap();

    assert_eq!(
        server.calls_to("Bug.get"),
        vec![json!({ "ids": [618271], "permissive": true }).as_object().unwrap().clone()]
    );
}

#[tokio::test]
async fn test_bug_get_omits_permissive_on_old_servers() {
    let (server, client) = setup(FakeBugzilla::new("3.2.10"));

    client.bug().get("CVE-2010-1234").await.unwrap();

    assert_eq!(
        server.calls_to("Bug.get"),
        vec![json!({ "ids": ["CVE-2010-1234"] }).as_object().unwrap().clone()]
    );
}

#[tokio::test]
async fn test_version_query_failures_propagate() {
    let (server, client) = setup(FakeBugzilla::new("4.4").fault("Bugzilla.version", 32000, "boom"));

    let err = client.bug().get(1_u64).await.unwrap_err();

    assert!(matches!(err, CallError::Transport(_)));
    assert!(server.commands().is_empty());
}

//! Tests for the bootstrap work queue and ready-time registration.

mod test_platform;

use octa_core::{
    BotBuilder, Command, CommandOption, EventKind, EventListener, Subcommand, WorkKind,
};
use octa_error::{HandlerError, OctaErrorKind};
use std::time::Duration;
use test_platform::{
    Registration, TestClient, TestEvent, TestGateway, TestInteraction, TestPlatform,
};

type Builder = BotBuilder<TestPlatform>;
type Cmd = Command<TestPlatform>;
type Listener = EventListener<TestPlatform>;

#[tokio::test]
async fn test_jobs_run_in_registration_order() {
    let plan = Builder::new()
        .run_raw_job(|client: TestClient| async move {
            client.record("a:start");
            // A slow first job must still finish before the second begins.
            tokio::time::sleep(Duration::from_millis(20)).await;
            client.record("a:end");
            Ok(())
        })
        .run_raw_job(|client: TestClient| async move {
            client.record("b");
            Ok(())
        })
        .run_raw_job(|client: TestClient| async move {
            client.record("c");
            Ok(())
        })
        .build();

    assert_eq!(
        plan.work_kinds(),
        vec![WorkKind::RawJob, WorkKind::RawJob, WorkKind::RawJob]
    );

    let client = TestClient::default();
    plan.prepare(client.clone()).await.unwrap();

    assert_eq!(client.entries(), vec!["a:start", "a:end", "b", "c"]);
}

#[tokio::test]
async fn test_failing_job_stops_startup() {
    let plan = Builder::new()
        .run_raw_job(|_client: TestClient| async move {
            Err::<(), HandlerError>("cannot warm cache".into())
        })
        .run_raw_job(|client: TestClient| async move {
            client.record("never");
            Ok(())
        })
        .build();

    let client = TestClient::default();
    let gateway = TestGateway {
        client: client.clone(),
        script: vec![TestEvent::Ready],
    };
    let err = plan.run(gateway).await.unwrap_err();

    match err.kind() {
        OctaErrorKind::Job(job) => {
            assert_eq!(job.index, 0);
            assert_eq!(job.message, "cannot warm cache");
        }
        other => panic!("unexpected error: {}", other),
    }
    assert!(client.entries().is_empty());
}

#[tokio::test]
async fn test_listeners_attached_before_login() {
    let plan = Builder::new()
        .events(|events| {
            events
                .register(Listener::on(
                    EventKind::MessageCreate,
                    |client: TestClient, _event| async move {
                        client.record("message");
                        Ok(())
                    },
                ))
                .register(Listener::on(
                    EventKind::GuildCreate,
                    |_client: TestClient, _event| async move { Ok(()) },
                ))
        })
        .event(Listener::on(EventKind::Ready, |client: TestClient, _event| async move {
            client.record("ready");
            Ok(())
        }))
        .build();

    assert_eq!(plan.work_kinds(), vec![WorkKind::Events, WorkKind::Event]);

    let client = TestClient::default();
    let gateway = TestGateway {
        client: client.clone(),
        script: vec![TestEvent::Ready, TestEvent::Message("hi".into())],
    };
    plan.run(gateway).await.unwrap();

    // Three caller listeners plus the registration listener.
    assert_eq!(client.entries(), vec!["login:4", "ready", "message"]);
}

#[tokio::test]
async fn test_commands_registered_once_on_ready() {
    let plan = Builder::new()
        .command(
            Cmd::new("ping", "pong")
                .option("loud", CommandOption::boolean("volume"))
                .handler(|client: TestClient, _interaction| async move {
                    client.record("pong");
                    Ok(())
                }),
        )
        .unwrap()
        .command(Cmd::new("tune", "guild only").guild(7))
        .unwrap()
        .command(Cmd::new("sync", "guild only too").guild(3))
        .unwrap()
        .command(Cmd::new("help", "global help"))
        .unwrap()
        .build();

    let global: Vec<_> = plan.global_commands().iter().map(|c| c.name().clone()).collect();
    assert_eq!(global, vec!["ping", "help"]);
    assert_eq!(plan.guild_commands().len(), 2);
    assert_eq!(
        plan.work_kinds(),
        vec![WorkKind::Event, WorkKind::Event, WorkKind::Event, WorkKind::Event]
    );

    let client = TestClient::default();
    let gateway = TestGateway {
        client: client.clone(),
        script: vec![
            TestEvent::Ready,
            TestEvent::Ready,
            TestEvent::Interaction(TestInteraction::flat("ping")),
        ],
    };
    plan.run(gateway).await.unwrap();

    assert_eq!(
        client.registrations(),
        vec![
            Registration {
                guild: None,
                names: vec!["ping".into(), "help".into()],
            },
            Registration {
                guild: Some(3),
                names: vec!["sync".into()],
            },
            Registration {
                guild: Some(7),
                names: vec!["tune".into()],
            },
        ]
    );
    assert_eq!(client.entries(), vec!["login:5", "pong"]);
}

#[tokio::test]
async fn test_empty_command_set_still_clears_global_commands() {
    let plan = Builder::new().build();
    let client = TestClient::default();
    let gateway = TestGateway {
        client: client.clone(),
        script: vec![TestEvent::Ready],
    };
    plan.run(gateway).await.unwrap();

    assert_eq!(
        client.registrations(),
        vec![Registration {
            guild: None,
            names: vec![],
        }]
    );
}

#[tokio::test]
async fn test_registration_failure_surfaces_without_retry() {
    let plan = Builder::new()
        .catch_errors(true)
        .command(Cmd::new("ping", "pong"))
        .unwrap()
        .build();

    let client = TestClient {
        fail_registration: true,
        ..TestClient::default()
    };
    let dispatcher = plan.prepare(client.clone()).await.unwrap();

    // Swallowed under catch_errors, and the once flag means no second attempt.
    dispatcher.dispatch(client.clone(), TestEvent::Ready).await.unwrap();
    dispatcher.dispatch(client.clone(), TestEvent::Ready).await.unwrap();
    assert!(client.registrations().is_empty());

    let strict = Builder::new().build();
    let dispatcher = strict.prepare(client.clone()).await.unwrap();
    let err = dispatcher
        .dispatch(client.clone(), TestEvent::Ready)
        .await
        .unwrap_err();
    assert!(err.to_string().contains("registration endpoint unavailable"));
}

#[tokio::test]
async fn test_on_start_runs_before_registration() {
    let plan = Builder::new()
        .on_start(
            |client: TestClient, _event| async move {
                client.record(format!("start:{}", client.registrations().len()));
                Ok(())
            },
            true,
        )
        .build();

    let client = TestClient::default();
    let dispatcher = plan.prepare(client.clone()).await.unwrap();
    dispatcher.dispatch(client.clone(), TestEvent::Ready).await.unwrap();
    dispatcher.dispatch(client.clone(), TestEvent::Ready).await.unwrap();

    assert_eq!(client.entries(), vec!["start:0"]);
    assert_eq!(client.registrations().len(), 1);
}

#[tokio::test]
async fn test_failing_on_start_does_not_block_registration() {
    let plan = Builder::new()
        .command(Cmd::new("ping", "pong"))
        .unwrap()
        .on_start(
            |client: TestClient, _event| async move {
                client.record("start");
                Err::<(), HandlerError>("user bug".into())
            },
            true,
        )
        .build();

    let client = TestClient::default();
    let dispatcher = plan.prepare(client.clone()).await.unwrap();

    let err = dispatcher
        .dispatch(client.clone(), TestEvent::Ready)
        .await
        .unwrap_err();
    assert!(err.to_string().contains("user bug"));
    assert_eq!(client.registrations().len(), 1);

    // Both once-listeners are spent.
    dispatcher.dispatch(client.clone(), TestEvent::Ready).await.unwrap();
    assert_eq!(client.entries(), vec!["start"]);
    assert_eq!(client.registrations().len(), 1);
}

#[tokio::test]
async fn test_long_running_on_start_does_not_stall_registration() {
    let plan = Builder::new()
        .catch_errors(true)
        .command(Cmd::new("ping", "pong"))
        .unwrap()
        .on_start(
            |client: TestClient, _event| async move {
                client.record("presence");
                tokio::time::sleep(Duration::from_secs(3600)).await;
                Ok(())
            },
            true,
        )
        .build();

    let client = TestClient::default();
    let dispatcher = plan.prepare(client.clone()).await.unwrap();

    let outcome = tokio::time::timeout(
        Duration::from_millis(200),
        dispatcher.dispatch(client.clone(), TestEvent::Ready),
    )
    .await;

    assert!(outcome.is_err());
    assert_eq!(
        client.registrations(),
        vec![Registration {
            guild: None,
            names: vec!["ping".into()],
        }]
    );
}

#[tokio::test]
async fn test_repeating_on_start_fires_on_every_ready() {
    let plan = Builder::new()
        .on_start(
            |client: TestClient, _event| async move {
                client.record("start");
                Ok(())
            },
            false,
        )
        .build();

    let client = TestClient::default();
    let gateway = TestGateway {
        client: client.clone(),
        script: vec![TestEvent::Ready, TestEvent::Ready, TestEvent::Ready],
    };
    plan.run(gateway).await.unwrap();

    assert_eq!(client.entries(), vec!["login:2", "start", "start", "start"]);
    assert_eq!(client.registrations().len(), 1);
}

#[test]
fn test_schema_errors_fail_at_construction() {
    let result = Builder::new().command(
        Cmd::new("mixed", "both shapes")
            .option("flag", CommandOption::boolean("a flag"))
            .subcommand("go", Subcommand::<TestPlatform>::new("go")),
    );
    assert!(result.is_err());
}

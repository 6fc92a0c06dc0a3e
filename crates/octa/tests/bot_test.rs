//! Tests for the facade entry point.

use octa::{
    Command, CommandOption, Discord, EventKind, EventListener, Octa, OctaConfig, OctaErrorKind,
    Subcommand, WorkKind,
};

fn quiet() -> OctaConfig {
    OctaConfig::default().with_banner(false)
}

#[test]
fn test_steps_queue_in_call_order() {
    let plan = Octa::new(quiet())
        .run_raw_job(|_http| async move { Ok(()) })
        .events(|events| {
            events.register(EventListener::<Discord>::on(
                EventKind::MessageCreate,
                |_ctx, _event| async move { Ok(()) },
            ))
        })
        .command(
            Command::<Discord>::new("ping", "pong")
                .option("loud", CommandOption::boolean("volume"))
                .handler(|_ctx, _interaction| async move { Ok(()) }),
        )
        .unwrap()
        .on_start(|_ctx, _ready| async move { Ok(()) }, true)
        .into_plan();

    assert_eq!(
        plan.work_kinds(),
        vec![
            WorkKind::RawJob,
            WorkKind::Events,
            WorkKind::Event,
            WorkKind::Event
        ]
    );
    assert_eq!(plan.global_commands().len(), 1);
    assert_eq!(plan.global_commands()[0].name(), "ping");
}

#[test]
fn test_guild_commands_are_grouped() {
    let plan = Octa::new(quiet())
        .command(Command::<Discord>::new("tune", "guild one").guild(10))
        .unwrap()
        .command(Command::<Discord>::new("sync", "guild one again").guild(10))
        .unwrap()
        .command(Command::<Discord>::new("help", "global"))
        .unwrap()
        .into_plan();

    assert_eq!(plan.global_commands().len(), 1);
    let guild = plan.guild_commands().get(&10).unwrap();
    let names: Vec<_> = guild.iter().map(|c| c.name().as_str()).collect();
    assert_eq!(names, vec!["tune", "sync"]);
}

#[test]
fn test_malformed_command_is_schema_error() {
    let err = Octa::new(quiet())
        .command(
            Command::<Discord>::new("mixed", "both shapes")
                .option("flag", CommandOption::boolean("a flag"))
                .subcommand("go", Subcommand::<Discord>::new("go")),
        )
        .unwrap_err();

    assert!(matches!(err.kind(), OctaErrorKind::Schema(_)));
}

#[test]
fn test_catch_errors_follows_config() {
    let bot = Octa::new(quiet().with_catch_errors(true));
    assert!(*bot.config().catch_errors());
}

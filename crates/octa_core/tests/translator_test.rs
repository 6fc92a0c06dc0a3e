//! Tests for command schema translation.

mod test_platform;

use octa_core::{
    ChannelConstraints, ChannelKind, Command, CommandOption, CommandPath, NumericConstraints,
    OptionType, StringConstraints, Subcommand, SubcommandGroup, translate,
};
use octa_error::SchemaErrorKind;
use serde_json::json;
use test_platform::TestPlatform;

type Cmd = Command<TestPlatform>;
type Sub = Subcommand<TestPlatform>;
type Group = SubcommandGroup<TestPlatform>;

#[test]
fn test_ping_with_boolean_option() {
    let command = Cmd::new("ping", "pong").option("loud", CommandOption::boolean("volume"));

    let translated = translate(command).unwrap();
    let json = serde_json::to_value(&translated.payload).unwrap();

    assert_eq!(
        json,
        json!({
            "name": "ping",
            "description": "pong",
            "type": 1,
            "nsfw": false,
            "options": [
                { "type": 5, "name": "loud", "description": "volume", "required": false }
            ]
        })
    );
    assert!(translated.guild.is_none());
}

#[test]
fn test_flat_command_handler_is_root_route() {
    let command = Cmd::new("ping", "pong").handler(|_client, _interaction| async { Ok(()) });
    let translated = translate(command).unwrap();

    assert_eq!(translated.routes.len(), 1);
    assert!(translated.routes.contains(&CommandPath::Root));
}

#[test]
fn test_bare_command_has_no_options_or_routes() {
    let translated = translate(Cmd::new("about", "show info")).unwrap();

    assert!(translated.payload.options().is_empty());
    assert!(translated.routes.is_empty());
    let json = serde_json::to_value(&translated.payload).unwrap();
    assert!(json.get("options").is_none());
}

#[test]
fn test_option_constraints_round_trip() {
    let command = Cmd::new("config", "tune the bot")
        .option(
            "count",
            CommandOption::integer(
                "how many",
                NumericConstraints::default().min(1).max(10).choice("one", 1),
            )
            .require(),
        )
        .option(
            "ratio",
            CommandOption::number(
                "a ratio",
                NumericConstraints::default().min(0.5).autocomplete(true),
            ),
        )
        .option(
            "nickname",
            CommandOption::string(
                "new name",
                StringConstraints::default().min_length(2).max_length(32),
            ),
        )
        .option(
            "where",
            CommandOption::channel(
                "target channel",
                ChannelConstraints::only([ChannelKind::Text, ChannelKind::Forum]),
            ),
        )
        .option("who", CommandOption::user("a user"))
        .option("role", CommandOption::role("a role"))
        .option("file", CommandOption::attachment("a file"))
        .option("anyone", CommandOption::mentionable("user or role"));

    let translated = translate(command).unwrap();
    let payload = &translated.payload;
    assert_eq!(payload.options().len(), 8);

    let kinds: Vec<_> = payload
        .options()
        .iter()
        .map(|o| o.option_type().unwrap())
        .collect();
    assert_eq!(
        kinds,
        vec![
            OptionType::Integer,
            OptionType::Number,
            OptionType::String,
            OptionType::Channel,
            OptionType::User,
            OptionType::Role,
            OptionType::Attachment,
            OptionType::Mentionable,
        ]
    );

    let json = serde_json::to_value(payload).unwrap();
    assert_eq!(
        json["options"][0],
        json!({
            "type": 4,
            "name": "count",
            "description": "how many",
            "required": true,
            "min_value": 1,
            "max_value": 10,
            "choices": [{ "name": "one", "value": 1 }]
        })
    );
    assert_eq!(json["options"][1]["min_value"], json!(0.5));
    assert_eq!(json["options"][1]["autocomplete"], json!(true));
    assert_eq!(json["options"][2]["min_length"], json!(2));
    assert_eq!(json["options"][2]["max_length"], json!(32));
    assert_eq!(json["options"][3]["channel_types"], json!([0, 15]));

    // Constraint fields never leak onto kinds that do not accept them.
    for index in 4..8 {
        let option = json["options"][index].as_object().unwrap();
        for key in [
            "min_value",
            "max_value",
            "choices",
            "min_length",
            "max_length",
            "channel_types",
            "autocomplete",
        ] {
            assert!(!option.contains_key(key), "option {} carries {}", index, key);
        }
    }
}

#[test]
fn test_subcommands_and_groups_build_tree_and_routes() {
    let command = Cmd::new("mod", "moderation")
        .subcommand(
            "warn",
            Sub::new("warn a user").handler(|_client, _interaction| async { Ok(()) }),
        )
        .subcommand("help", Sub::new("no handler here"))
        .group(
            "admin",
            Group::new("admin actions").subcommand(
                "ban",
                Sub::new("ban a user")
                    .option("target", CommandOption::user("who").require())
                    .handler(|_client, _interaction| async { Ok(()) }),
            ),
        );

    let translated = translate(command).unwrap();
    let json = serde_json::to_value(&translated.payload).unwrap();

    assert_eq!(json["options"][0]["type"], json!(1));
    assert_eq!(json["options"][0]["name"], json!("warn"));
    assert!(json["options"][0].get("required").is_none());
    assert_eq!(json["options"][2]["type"], json!(2));
    assert_eq!(json["options"][2]["options"][0]["name"], json!("ban"));
    assert_eq!(
        json["options"][2]["options"][0]["options"][0],
        json!({ "type": 6, "name": "target", "description": "who", "required": true })
    );

    // One entry per declared subcommand, whether or not it has a handler.
    assert_eq!(translated.routes.len(), 3);
    assert!(translated.routes.has_handler(&CommandPath::Subcommand("warn".into())));
    assert!(translated.routes.has_handler(&CommandPath::Grouped {
        group: "admin".into(),
        subcommand: "ban".into(),
    }));
    assert!(translated.routes.contains(&CommandPath::Subcommand("help".into())));
    assert!(!translated.routes.has_handler(&CommandPath::Subcommand("help".into())));
    assert!(!translated.routes.contains(&CommandPath::Subcommand("kick".into())));
    assert!(!translated.routes.contains(&CommandPath::Root));
}

#[test]
fn test_options_with_subcommands_is_rejected() {
    let command = Cmd::new("mixed", "both shapes")
        .option("flag", CommandOption::boolean("a flag"))
        .subcommand("run", Sub::new("run it"));

    let err = translate(command).unwrap_err();
    assert_eq!(err.kind(), &SchemaErrorKind::ConflictingShape("mixed".into()));
}

#[test]
fn test_root_handler_with_groups_is_rejected() {
    let command = Cmd::new("mixed", "both shapes")
        .handler(|_client, _interaction| async { Ok(()) })
        .group("g", Group::new("group").subcommand("s", Sub::new("sub")));

    let err = translate(command).unwrap_err();
    assert!(matches!(err.kind(), SchemaErrorKind::ConflictingShape(_)));
}

#[test]
fn test_empty_group_is_rejected() {
    let command = Cmd::new("cfg", "settings").group("empty", Group::new("nothing inside"));
    let err = translate(command).unwrap_err();
    assert_eq!(err.kind(), &SchemaErrorKind::EmptyGroup("empty".into()));
}

#[test]
fn test_duplicate_option_names_are_rejected() {
    let command = Cmd::new("dup", "duplicates")
        .option("x", CommandOption::boolean("first"))
        .option("x", CommandOption::boolean("second"));

    let err = translate(command).unwrap_err();
    assert!(matches!(err.kind(), SchemaErrorKind::DuplicateName { name, .. } if name == "x"));
}

#[test]
fn test_too_many_options_are_rejected() {
    let mut command = Cmd::new("wide", "lots of options");
    for i in 0..26 {
        command = command.option(format!("o{}", i), CommandOption::boolean("flag"));
    }

    let err = translate(command).unwrap_err();
    assert!(matches!(err.kind(), SchemaErrorKind::TooMany { count: 26, limit: 25, .. }));
}

#[test]
fn test_inverted_bounds_are_rejected() {
    let command = Cmd::new("bad", "bad bounds").option(
        "n",
        CommandOption::integer("number", NumericConstraints::default().min(5).max(1)),
    );
    assert!(matches!(
        translate(command).unwrap_err().kind(),
        SchemaErrorKind::InvalidConstraint { .. }
    ));

    let command = Cmd::new("bad", "bad lengths").option(
        "s",
        CommandOption::string("text", StringConstraints::default().min_length(10).max_length(2)),
    );
    assert!(translate(command).is_err());
}

#[test]
fn test_autocomplete_with_choices_is_rejected() {
    let command = Cmd::new("pick", "pick one").option(
        "fruit",
        CommandOption::string(
            "a fruit",
            StringConstraints::default().choice("Apple", "apple").autocomplete(true),
        ),
    );
    assert!(translate(command).is_err());
}

#[test]
fn test_invalid_description_is_rejected() {
    let err = translate(Cmd::new("ping", "")).unwrap_err();
    assert!(matches!(err.kind(), SchemaErrorKind::InvalidDescription { .. }));

    let err = translate(Cmd::new("ping", "x".repeat(101))).unwrap_err();
    assert!(matches!(err.kind(), SchemaErrorKind::InvalidDescription { .. }));
}

#[test]
fn test_permissions_nsfw_and_guild() {
    let command = Cmd::new("purge", "delete messages")
        .default_member_permissions(8192)
        .dm_permission(false)
        .nsfw(true)
        .guild(42);

    let translated = translate(command).unwrap();
    let json = serde_json::to_value(&translated.payload).unwrap();

    assert_eq!(json["default_member_permissions"], json!("8192"));
    assert_eq!(json["dm_permission"], json!(false));
    assert_eq!(json["nsfw"], json!(true));
    assert_eq!(translated.guild, Some(42));
}

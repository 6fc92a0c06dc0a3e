//! In-memory platform shared by the integration tests.

#![allow(dead_code)]

use async_trait::async_trait;
use octa_core::{
    CommandPayload, CommandRegistrar, Dispatcher, EventKind, Gateway, Invocation, Platform,
};
use octa_error::{HandlerError, OctaResult};
use std::sync::{Arc, Mutex};

/// Interaction as the fake gateway delivers it.
#[derive(Debug, Clone)]
pub struct TestInteraction {
    pub command: String,
    pub group: Option<String>,
    pub subcommand: Option<String>,
    pub chat_input: bool,
}

impl TestInteraction {
    pub fn flat(command: &str) -> Self {
        Self {
            command: command.to_string(),
            group: None,
            subcommand: None,
            chat_input: true,
        }
    }

    pub fn sub(command: &str, subcommand: &str) -> Self {
        Self {
            subcommand: Some(subcommand.to_string()),
            ..Self::flat(command)
        }
    }

    pub fn grouped(command: &str, group: &str, subcommand: Option<&str>) -> Self {
        Self {
            group: Some(group.to_string()),
            subcommand: subcommand.map(str::to_string),
            ..Self::flat(command)
        }
    }
}

#[derive(Debug, Clone)]
pub enum TestEvent {
    Ready,
    Message(String),
    Interaction(TestInteraction),
}

/// One registration call seen by the fake REST layer.
#[derive(Debug, Clone, PartialEq)]
pub struct Registration {
    pub guild: Option<u64>,
    pub names: Vec<String>,
}

/// Client handle recording everything handlers do.
#[derive(Debug, Clone, Default)]
pub struct TestClient {
    pub log: Arc<Mutex<Vec<String>>>,
    pub registrations: Arc<Mutex<Vec<Registration>>>,
    pub fail_registration: bool,
}

impl TestClient {
    pub fn record(&self, entry: impl Into<String>) {
        self.log.lock().unwrap().push(entry.into());
    }

    pub fn entries(&self) -> Vec<String> {
        self.log.lock().unwrap().clone()
    }

    pub fn registrations(&self) -> Vec<Registration> {
        self.registrations.lock().unwrap().clone()
    }

    fn push(&self, guild: Option<u64>, commands: &[CommandPayload]) -> Result<(), HandlerError> {
        if self.fail_registration {
            return Err("registration endpoint unavailable".into());
        }
        self.registrations.lock().unwrap().push(Registration {
            guild,
            names: commands.iter().map(|c| c.name().clone()).collect(),
        });
        Ok(())
    }
}

#[async_trait]
impl CommandRegistrar for TestClient {
    async fn register_global(&self, commands: &[CommandPayload]) -> Result<(), HandlerError> {
        self.push(None, commands)
    }

    async fn register_guild(
        &self,
        guild_id: u64,
        commands: &[CommandPayload],
    ) -> Result<(), HandlerError> {
        self.push(Some(guild_id), commands)
    }
}

#[derive(Debug)]
pub struct TestPlatform;

impl Platform for TestPlatform {
    type Client = TestClient;
    type Event = TestEvent;
    type Interaction = TestInteraction;
    type Handle = TestClient;

    fn event_kind(event: &TestEvent) -> EventKind {
        match event {
            TestEvent::Ready => EventKind::Ready,
            TestEvent::Message(_) => EventKind::MessageCreate,
            TestEvent::Interaction(_) => EventKind::InteractionCreate,
        }
    }

    fn chat_input(event: &TestEvent) -> Option<&TestInteraction> {
        match event {
            TestEvent::Interaction(interaction) if interaction.chat_input => Some(interaction),
            _ => None,
        }
    }

    fn invocation(interaction: &TestInteraction) -> Invocation<'_> {
        Invocation {
            command: &interaction.command,
            group: interaction.group.as_deref(),
            subcommand: interaction.subcommand.as_deref(),
        }
    }
}

/// Gateway replaying a fixed event script after login.
pub struct TestGateway {
    pub client: TestClient,
    pub script: Vec<TestEvent>,
}

#[async_trait]
impl Gateway<TestPlatform> for TestGateway {
    fn handle(&self) -> TestClient {
        self.client.clone()
    }

    async fn login(self, dispatcher: Arc<Dispatcher<TestPlatform>>) -> OctaResult<()> {
        self.client.record(format!("login:{}", dispatcher.len()));
        for event in self.script {
            if let Err(e) = dispatcher.dispatch(self.client.clone(), event).await {
                self.client.record(format!("error:{}", e.kind()));
            }
        }
        Ok(())
    }
}

//! Gateway intent presets.

use serenity::all::GatewayIntents;

/// Every intent, privileged ones included.
///
/// Privileged intents must also be enabled for the application in the
/// Discord developer portal, or login is rejected.
pub fn all_intents() -> GatewayIntents {
    GatewayIntents::all()
}

/// Intents that need no portal approval.
pub fn default_intents() -> GatewayIntents {
    GatewayIntents::non_privileged()
}

/// Pick a preset.
pub fn intents_for(privileged: bool) -> GatewayIntents {
    if privileged {
        all_intents()
    } else {
        default_intents()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_intents_include_privileged() {
        let all = all_intents();
        assert!(all.contains(GatewayIntents::GUILD_MEMBERS));
        assert!(all.contains(GatewayIntents::GUILD_PRESENCES));
        assert!(all.contains(GatewayIntents::MESSAGE_CONTENT));
        assert!(all.contains(default_intents()));
    }

    #[test]
    fn test_default_intents_exclude_privileged() {
        let default = default_intents();
        assert!(!default.contains(GatewayIntents::GUILD_MEMBERS));
        assert!(!default.contains(GatewayIntents::MESSAGE_CONTENT));
        assert!(default.contains(GatewayIntents::GUILDS));
        assert_eq!(intents_for(false), default);
        assert_eq!(intents_for(true), all_intents());
    }
}

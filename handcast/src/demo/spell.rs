//! Spell-casting demo: a wand cursor and a training bot.
//!
//! Stupefy stuns the bot for 500ms and puts out any fire; Incendio sets
//! it burning for 3000ms.  Protego only raises a shield at the wand.
//! The bot's effect timers reuse the recognizer's lock type.

use tracing::{debug, info};

use super::DemoApp;
use crate::dispatch::{CommandDispatcher, CommandKind, GestureCommand, Position};
use crate::gesture::cooldown::CooldownController;
use crate::gesture::mapper::PointerState;
use crate::gesture::recognizer::GestureProfile;

const STUN_MS: f64 = 500.0;
const BURN_MS: f64 = 3000.0;

/// Timed effects on the training bot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum BotEffect {
    Stunned,
    Burning,
}

/// Bot status as shown to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BotStatus {
    Idle,
    Burning,
    Stunned,
}

impl BotStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Burning => "burning",
            Self::Stunned => "stunned",
        }
    }
}

/// Spell-casting demo state.
#[derive(Debug)]
pub struct SpellCaster {
    wand: Option<Position>,
    last_spell: Option<CommandKind>,
    casts: u32,
    incendio: u32,
    stupefy: u32,
    protego: u32,
    bot: CooldownController<BotEffect>,
}

impl SpellCaster {
    pub fn new() -> Self {
        let mut bot = CooldownController::new();
        bot.register(BotEffect::Stunned, STUN_MS);
        bot.register(BotEffect::Burning, BURN_MS);
        Self {
            wand: None,
            last_spell: None,
            casts: 0,
            incendio: 0,
            stupefy: 0,
            protego: 0,
            bot,
        }
    }

    /// Wand tip, or `None` while no hand is visible.
    pub fn wand(&self) -> Option<Position> {
        self.wand
    }

    pub fn last_spell(&self) -> Option<CommandKind> {
        self.last_spell
    }

    pub fn casts(&self) -> u32 {
        self.casts
    }

    pub fn bot_status(&self, now_ms: f64) -> BotStatus {
        if self.bot.is_locked(BotEffect::Stunned, now_ms) {
            BotStatus::Stunned
        } else if self.bot.is_locked(BotEffect::Burning, now_ms) {
            BotStatus::Burning
        } else {
            BotStatus::Idle
        }
    }

    /// Restart an effect timer from `now_ms`.
    fn apply(&mut self, effect: BotEffect, now_ms: f64) {
        self.bot.unlock(effect);
        self.bot.try_fire(effect, now_ms);
    }
}

impl Default for SpellCaster {
    fn default() -> Self {
        Self::new()
    }
}

impl CommandDispatcher for SpellCaster {
    fn on_gesture(&mut self, command: &GestureCommand) {
        let now = command.timestamp_ms;
        match command.kind {
            CommandKind::SpellIncendio => {
                self.incendio += 1;
                self.apply(BotEffect::Burning, now);
            }
            CommandKind::SpellStupefy => {
                self.stupefy += 1;
                self.bot.unlock(BotEffect::Burning);
                self.apply(BotEffect::Stunned, now);
            }
            CommandKind::SpellProtego => {
                self.protego += 1;
            }
            other => {
                debug!("Spell demo ignoring {}", other.as_str());
                return;
            }
        }
        self.casts += 1;
        self.last_spell = Some(command.kind);
        if let Some(p) = command.position {
            self.wand = Some(p);
        }
        info!("Cast {} (bot {})", command.kind.as_str(), self.bot_status(now).as_str());
    }

    fn on_pointer(&mut self, pointer: &PointerState) {
        self.wand = match *pointer {
            PointerState::Active { x, y, .. } => Some(Position { x, y }),
            PointerState::Inactive => None,
        };
    }
}

impl DemoApp for SpellCaster {
    fn profile(&self) -> GestureProfile {
        GestureProfile::spell()
    }

    fn status_sexp(&self, now_ms: f64) -> String {
        let wand = match self.wand {
            Some(p) => format!("(:x {:.1} :y {:.1})", p.x, p.y),
            None => "nil".to_string(),
        };
        let last = self
            .last_spell
            .map(|k| format!(":{}", k.as_str()))
            .unwrap_or_else(|| "nil".to_string());
        format!(
            "(:demo :spell :wand {} :last-spell {} :casts {} :incendio {} :stupefy {} :protego {} :bot :{})",
            wand,
            last,
            self.casts,
            self.incendio,
            self.stupefy,
            self.protego,
            self.bot_status(now_ms).as_str(),
        )
    }
}

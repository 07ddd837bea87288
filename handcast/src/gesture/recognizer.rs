//! Session-scoped gesture recognizer.
//!
//! One [`GestureRecognizer`] owns every piece of cross-frame state (pinch
//! latch, pointer history, swipe reference, wave momentum, cooldown locks)
//! and is driven once per tracker frame.  What it recognizes and which
//! command each gesture produces is decided by a [`GestureProfile`], so the
//! spell, slide and flow demos share one implementation.
//!
//! Evaluation order within a frame is fixed: pinch, then shape gestures
//! (open palm, V sign), then trajectory gestures (circle, thrust, swipe,
//! wave).  In an exclusive profile the first shape or trajectory gesture
//! that is detected ends evaluation for that frame, whether or not its
//! cooldown admitted it.

use tracing::{debug, info};

use super::config::GestureConfig;
use super::cooldown::{Channel, CooldownController};
use super::detectors::{
    detect_circle, detect_thrust, is_index_pointing, is_open_palm, is_v_sign, PinchLatch,
    PinchTransition, SwipeDirection, SwipeTracker, WaveMomentum,
};
use super::history::GestureHistory;
use super::landmarks::{HandLandmark, HandLandmarks, Landmark};
use super::mapper::{map_landmark, PointerSample, PointerState, Viewport};
use crate::dispatch::{CommandDispatcher, CommandKind, GestureCommand, Position};
use crate::sexp::{bool_sexp, escape_string};

// ── Gestures and profiles ──────────────────────────────────

/// Gestures the recognizer can detect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Gesture {
    PinchStart,
    PinchMove,
    PinchEnd,
    OpenPalm,
    VSign,
    Circle,
    Thrust,
    SwipeNext,
    SwipePrev,
    Wave,
}

impl Gesture {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::PinchStart => "pinch-start",
            Self::PinchMove => "pinch-move",
            Self::PinchEnd => "pinch-end",
            Self::OpenPalm => "open-palm",
            Self::VSign => "v-sign",
            Self::Circle => "circle",
            Self::Thrust => "thrust",
            Self::SwipeNext => "swipe-next",
            Self::SwipePrev => "swipe-prev",
            Self::Wave => "wave",
        }
    }

    /// Whether detection reads the pointer history.
    pub fn needs_history(&self) -> bool {
        matches!(self, Self::Circle | Self::Thrust)
    }
}

/// One row of the gesture-to-command table.
#[derive(Debug, Clone, PartialEq)]
pub struct Binding {
    pub gesture: Gesture,
    pub command: CommandKind,
    /// Cooldown channel guarding the command, if any.
    pub channel: Option<Channel>,
}

impl Binding {
    pub fn new(gesture: Gesture, command: CommandKind, channel: Option<Channel>) -> Self {
        Self {
            gesture,
            command,
            channel,
        }
    }
}

/// Gesture-to-command mapping for one application.
#[derive(Debug, Clone, PartialEq)]
pub struct GestureProfile {
    pub name: String,
    pub bindings: Vec<Binding>,
    /// Detected shape/trajectory gestures suppress lower-priority ones.
    pub exclusive: bool,
}

impl GestureProfile {
    /// Spell casting: palm → protego, circle → incendio, thrust → stupefy.
    pub fn spell() -> Self {
        let ch = Some(Channel::SpellCast);
        Self {
            name: "spell".to_string(),
            bindings: vec![
                Binding::new(Gesture::OpenPalm, CommandKind::SpellProtego, ch),
                Binding::new(Gesture::Circle, CommandKind::SpellIncendio, ch),
                Binding::new(Gesture::Thrust, CommandKind::SpellStupefy, ch),
            ],
            exclusive: true,
        }
    }

    /// Slide presenter: horizontal swipes.
    pub fn slides() -> Self {
        let ch = Some(Channel::Swipe);
        Self {
            name: "slides".to_string(),
            bindings: vec![
                Binding::new(Gesture::SwipeNext, CommandKind::SlideNext, ch),
                Binding::new(Gesture::SwipePrev, CommandKind::SlidePrev, ch),
            ],
            exclusive: false,
        }
    }

    /// Flow editor: pinch-drag nodes, V sign, wave to reset.
    pub fn flow() -> Self {
        Self {
            name: "flow".to_string(),
            bindings: vec![
                Binding::new(Gesture::PinchStart, CommandKind::NodePinchStart, None),
                Binding::new(Gesture::PinchMove, CommandKind::NodePinchMove, None),
                Binding::new(Gesture::PinchEnd, CommandKind::NodePinchEnd, None),
                Binding::new(Gesture::VSign, CommandKind::VAction, Some(Channel::VAction)),
                Binding::new(Gesture::Wave, CommandKind::WaveReset, Some(Channel::Wave)),
            ],
            exclusive: false,
        }
    }

    pub fn binding(&self, gesture: Gesture) -> Option<&Binding> {
        self.bindings.iter().find(|b| b.gesture == gesture)
    }

    pub fn binds(&self, gesture: Gesture) -> bool {
        self.binding(gesture).is_some()
    }

    fn binds_pinch(&self) -> bool {
        self.binds(Gesture::PinchStart) || self.binds(Gesture::PinchMove) || self.binds(Gesture::PinchEnd)
    }

    fn binds_swipe(&self) -> bool {
        self.binds(Gesture::SwipeNext) || self.binds(Gesture::SwipePrev)
    }

    fn needs_history(&self) -> bool {
        self.bindings.iter().any(|b| b.gesture.needs_history())
    }
}

// ── Recognizer ─────────────────────────────────────────────

/// Per-session recognition counters.
#[derive(Debug, Clone, Default)]
pub struct RecognizerStats {
    pub frames: u64,
    pub hand_frames: u64,
    pub malformed_frames: u64,
    pub dispatched: u64,
}

/// Central gesture recognition state for one session.
pub struct GestureRecognizer {
    config: GestureConfig,
    profile: GestureProfile,
    history: GestureHistory,
    pinch: PinchLatch,
    swipe: SwipeTracker,
    wave: WaveMomentum,
    cooldowns: CooldownController<Channel>,
    pointer: PointerState,
    stats: RecognizerStats,
}

impl GestureRecognizer {
    /// Create a recognizer with default thresholds.
    pub fn new(profile: GestureProfile) -> Self {
        Self::with_config(profile, GestureConfig::default())
    }

    pub fn with_config(profile: GestureProfile, config: GestureConfig) -> Self {
        let mut recognizer = Self {
            config,
            profile,
            history: GestureHistory::new(),
            pinch: PinchLatch::new(),
            swipe: SwipeTracker::new(),
            wave: WaveMomentum::new(),
            cooldowns: CooldownController::new(),
            pointer: PointerState::Inactive,
            stats: RecognizerStats::default(),
        };
        recognizer.register_channels();
        info!(
            "Gesture recognizer ready: profile={} bindings={}",
            recognizer.profile.name,
            recognizer.profile.bindings.len()
        );
        recognizer
    }

    fn register_channels(&mut self) {
        for binding in &self.profile.bindings {
            if let Some(channel) = binding.channel {
                self.cooldowns
                    .register(channel, self.config.cooldown_ms(channel));
            }
        }
    }

    pub fn config(&self) -> &GestureConfig {
        &self.config
    }

    /// Replace the config.  Cooldown durations are re-registered, which drops pending locks.
    pub fn set_config(&mut self, config: GestureConfig) {
        self.config = config;
        self.register_channels();
    }

    pub fn profile(&self) -> &GestureProfile {
        &self.profile
    }

    pub fn pointer(&self) -> PointerState {
        self.pointer
    }

    pub fn history(&self) -> &GestureHistory {
        &self.history
    }

    pub fn is_pinching(&self) -> bool {
        self.pinch.is_pinching()
    }

    pub fn cooldowns(&self) -> &CooldownController<Channel> {
        &self.cooldowns
    }

    pub fn stats(&self) -> &RecognizerStats {
        &self.stats
    }

    /// Process one tracker frame and return the commands it produced.
    ///
    /// `landmarks` is the first detected hand, or `None` when no hand was
    /// found.  A set that is not exactly 21 finite points is treated as no
    /// hand.  `viewport` is the current screen size.
    pub fn update(
        &mut self,
        landmarks: Option<&[Landmark]>,
        viewport: Viewport,
        now_ms: f64,
    ) -> Vec<GestureCommand> {
        let mut commands = Vec::new();
        self.stats.frames += 1;

        for channel in self.cooldowns.poll_expired(now_ms) {
            if channel == Channel::Swipe {
                // motion seen during the lock must not count as a fresh swipe
                self.swipe.reset();
            }
        }

        let hand = match landmarks {
            Some(points) => {
                let hand = HandLandmarks::from_points(points);
                if hand.is_none() {
                    self.stats.malformed_frames += 1;
                }
                hand
            }
            None => None,
        };

        let Some(hand) = hand else {
            self.hand_lost(now_ms, &mut commands);
            return commands;
        };
        self.stats.hand_frames += 1;

        let sample = map_landmark(hand.get(HandLandmark::IndexTip), viewport, now_ms);
        self.pointer = PointerState::Active {
            x: sample.x,
            y: sample.y,
            pointing: is_index_pointing(&hand),
        };

        if !self.config.enabled {
            self.release_pinch(now_ms, &mut commands);
            return commands;
        }

        if self.profile.needs_history() {
            self.history.push(sample);
        }

        self.evaluate(&hand, &sample, now_ms, &mut commands);
        commands
    }

    /// Process one frame and forward pointer feedback and commands to a dispatcher.
    pub fn process_frame(
        &mut self,
        landmarks: Option<&[Landmark]>,
        viewport: Viewport,
        now_ms: f64,
        dispatcher: &mut dyn CommandDispatcher,
    ) {
        let commands = self.update(landmarks, viewport, now_ms);
        dispatcher.on_pointer(&self.pointer);
        for command in &commands {
            dispatcher.on_gesture(command);
        }
    }

    fn evaluate(
        &mut self,
        hand: &HandLandmarks,
        sample: &PointerSample,
        now_ms: f64,
        commands: &mut Vec<GestureCommand>,
    ) {
        // ── Pinch ──
        if self.profile.binds_pinch() {
            let gesture = match self.pinch.update_hand(hand, &self.config) {
                PinchTransition::Engaged => Some(Gesture::PinchStart),
                PinchTransition::Held => Some(Gesture::PinchMove),
                PinchTransition::Released => Some(Gesture::PinchEnd),
                PinchTransition::Idle => None,
            };
            if let Some(gesture) = gesture {
                self.fire(gesture, sample, now_ms, commands);
            }
        }

        // ── Shapes ──
        if self.profile.binds(Gesture::OpenPalm) && is_open_palm(hand) {
            self.fire(Gesture::OpenPalm, sample, now_ms, commands);
            if self.profile.exclusive {
                return;
            }
        }
        if self.profile.binds(Gesture::VSign) && is_v_sign(hand, &self.config) {
            self.fire(Gesture::VSign, sample, now_ms, commands);
            if self.profile.exclusive {
                return;
            }
        }

        // ── Trajectories ──
        if self.profile.binds(Gesture::Circle) && detect_circle(&self.history, &self.config) {
            self.fire(Gesture::Circle, sample, now_ms, commands);
            self.history.clear();
            if self.profile.exclusive {
                return;
            }
        }
        if self.profile.binds(Gesture::Thrust) && detect_thrust(&self.history, &self.config) {
            self.fire(Gesture::Thrust, sample, now_ms, commands);
            self.history.clear();
            if self.profile.exclusive {
                return;
            }
        }
        if self.profile.binds_swipe() {
            let center_x = hand.get(HandLandmark::MiddleMcp).x;
            let gesture = match self.swipe.update(center_x, self.config.swipe_threshold) {
                SwipeDirection::Next => Some(Gesture::SwipeNext),
                SwipeDirection::Prev => Some(Gesture::SwipePrev),
                SwipeDirection::None => None,
            };
            if let Some(gesture) = gesture {
                if self.profile.binds(gesture) {
                    self.fire(gesture, sample, now_ms, commands);
                    if self.profile.exclusive {
                        return;
                    }
                }
            }
        }
        if self.profile.binds(Gesture::Wave) && self.wave.update(sample.x, &self.config) {
            self.fire(Gesture::Wave, sample, now_ms, commands);
        }
    }

    /// Dispatch a detected gesture through its binding and cooldown.
    fn fire(
        &mut self,
        gesture: Gesture,
        sample: &PointerSample,
        now_ms: f64,
        commands: &mut Vec<GestureCommand>,
    ) {
        let Some(binding) = self.profile.binding(gesture) else {
            return;
        };
        if let Some(channel) = binding.channel {
            if !self.cooldowns.try_fire(channel, now_ms) {
                return;
            }
        }
        let kind = binding.command;
        let position = kind.carries_position().then_some(Position {
            x: sample.x,
            y: sample.y,
        });
        if gesture != Gesture::PinchMove {
            debug!("Gesture fired: {} -> {}", gesture.as_str(), kind.as_str());
        }
        commands.push(GestureCommand {
            kind,
            position,
            timestamp_ms: now_ms,
        });
        self.stats.dispatched += 1;
    }

    /// No usable hand this frame: hide the pointer and release frame-local state.
    fn hand_lost(&mut self, now_ms: f64, commands: &mut Vec<GestureCommand>) {
        if self.pointer.is_active() {
            debug!("Hand lost");
        }
        self.pointer = PointerState::Inactive;
        self.swipe.reset();
        self.wave.reset();
        self.release_pinch(now_ms, commands);
    }

    /// Drop an engaged pinch, ending any drag.
    fn release_pinch(&mut self, now_ms: f64, commands: &mut Vec<GestureCommand>) {
        if !self.pinch.release() {
            return;
        }
        if let Some(binding) = self.profile.binding(Gesture::PinchEnd) {
            commands.push(GestureCommand {
                kind: binding.command,
                position: None,
                timestamp_ms: now_ms,
            });
            self.stats.dispatched += 1;
        }
    }

    /// Reset all per-frame and cross-frame state, keeping config and profile.
    pub fn reset(&mut self) {
        self.history.clear();
        self.pinch = PinchLatch::new();
        self.swipe.reset();
        self.wave.reset();
        self.cooldowns.clear();
        self.pointer = PointerState::Inactive;
    }

    /// End of session: drop pending cooldowns so nothing outlives the session.
    pub fn shutdown(&mut self) {
        self.reset();
        info!(
            "Gesture recognizer stopped: frames={} dispatched={}",
            self.stats.frames, self.stats.dispatched
        );
    }

    /// Generate s-expression for recognizer status at `now_ms`.
    pub fn status_sexp(&self, now_ms: f64) -> String {
        let cooldowns: Vec<String> = Channel::all()
            .iter()
            .filter(|c| self.profile.bindings.iter().any(|b| b.channel == Some(**c)))
            .map(|c| format!(":{} {:.0}", c.as_str(), self.cooldowns.remaining_ms(*c, now_ms)))
            .collect();
        format!(
            "(:profile \"{}\" :enabled {} :pointer {} :pinching {} :history {} :wave-momentum {:.1} :frames {} :hand-frames {} :malformed {} :dispatched {} :cooldown-blocks {} :cooldowns ({}))",
            escape_string(&self.profile.name),
            bool_sexp(self.config.enabled),
            self.pointer.to_sexp(),
            bool_sexp(self.pinch.is_pinching()),
            self.history.len(),
            self.wave.momentum(),
            self.stats.frames,
            self.stats.hand_frames,
            self.stats.malformed_frames,
            self.stats.dispatched,
            self.cooldowns.blocked_count(),
            cooldowns.join(" "),
        )
    }
}

// ── Tests ──────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dispatch::RecordingDispatcher;
    use crate::gesture::landmarks::{make_hand, set_landmark};

    const VP: Viewport = Viewport {
        width: 1000.0,
        height: 1000.0,
    };

    fn points(hand: &HandLandmarks) -> Vec<Landmark> {
        hand.points().to_vec()
    }

    fn translated(hand: &HandLandmarks, dx: f32, dy: f32) -> Vec<Landmark> {
        hand.points()
            .iter()
            .map(|p| Landmark::new(p.x + dx, p.y + dy, p.z))
            .collect()
    }

    /// All four fingers curled; index tip at (x, y).
    fn fist(x: f32, y: f32) -> Vec<Landmark> {
        let mut hand = make_hand();
        for (tip, pip) in HandLandmark::finger_tip_pip_pairs() {
            let p = *hand.get(pip);
            set_landmark(&mut hand, tip, p.x, p.y + 0.05);
        }
        let tip = *hand.get(HandLandmark::IndexTip);
        translated(&hand, x - tip.x, y - tip.y)
    }

    /// Index and middle up and spread, ring and pinky curled.
    fn v_hand() -> Vec<Landmark> {
        let mut hand = make_hand();
        set_landmark(&mut hand, HandLandmark::RingTip, 0.54, 0.6);
        set_landmark(&mut hand, HandLandmark::PinkyTip, 0.61, 0.6);
        points(&hand)
    }

    /// Open hand with thumb tip at `gap` from the index tip.
    fn pinch_hand(gap: f32) -> Vec<Landmark> {
        let mut hand = make_hand();
        let tip = *hand.get(HandLandmark::IndexTip);
        set_landmark(&mut hand, HandLandmark::ThumbTip, tip.x - gap, tip.y);
        points(&hand)
    }

    // ── framing ──

    #[test]
    fn test_no_hand_pointer_inactive() {
        let mut r = GestureRecognizer::new(GestureProfile::flow());
        let cmds = r.update(None, VP, 0.0);
        assert!(cmds.is_empty());
        assert_eq!(r.pointer(), PointerState::Inactive);
    }

    #[test]
    fn test_pointer_mirrored_index_tip() {
        let mut r = GestureRecognizer::new(GestureProfile::slides());
        let hand = make_hand();
        r.update(Some(&points(&hand)), VP, 0.0);
        match r.pointer() {
            PointerState::Active { x, y, pointing } => {
                assert!((x - 600.0).abs() < 1e-3); // index tip x = 0.4
                assert!((y - 350.0).abs() < 1e-3);
                assert!(pointing);
            }
            other => panic!("expected active pointer, got {:?}", other),
        }
        r.update(None, VP, 16.0);
        assert!(!r.pointer().is_active());
    }

    #[test]
    fn test_pointer_not_pointing_when_index_curled() {
        let mut r = GestureRecognizer::new(GestureProfile::slides());
        r.update(Some(&fist(0.5, 0.5)), VP, 0.0);
        assert!(matches!(
            r.pointer(),
            PointerState::Active { pointing: false, .. }
        ));
    }

    #[test]
    fn test_malformed_is_no_hand() {
        let mut r = GestureRecognizer::new(GestureProfile::flow());
        r.update(Some(&pinch_hand(0.0)), VP, 0.0);
        assert!(r.is_pinching());
        let short = vec![Landmark::default(); 5];
        let cmds = r.update(Some(&short), VP, 16.0);
        assert_eq!(r.stats().malformed_frames, 1);
        assert!(!r.pointer().is_active());
        assert!(!r.is_pinching());
        assert_eq!(
            cmds.iter().map(|c| c.kind).collect::<Vec<_>>(),
            vec![CommandKind::NodePinchEnd]
        );
    }

    #[test]
    fn test_disabled_updates_pointer_only() {
        let mut config = GestureConfig::default();
        config.enabled = false;
        let mut r = GestureRecognizer::with_config(GestureProfile::spell(), config);
        for i in 0..10 {
            let cmds = r.update(Some(&points(&make_hand())), VP, i as f64 * 16.0);
            assert!(cmds.is_empty());
        }
        assert!(r.pointer().is_active());
        assert!(r.history().is_empty());
    }

    // ── spell profile ──

    #[test]
    fn test_spell_palm_debounced() {
        let mut r = GestureRecognizer::new(GestureProfile::spell());
        let palm = points(&make_hand());
        let mut casts = Vec::new();
        for i in 0..80 {
            // 80 frames x 16ms = 1264ms
            let now = i as f64 * 16.0;
            for c in r.update(Some(&palm), VP, now) {
                casts.push(c);
            }
        }
        assert_eq!(casts.len(), 2);
        assert_eq!(casts[0].kind, CommandKind::SpellProtego);
        assert_eq!(casts[0].timestamp_ms, 0.0);
        assert_eq!(casts[1].timestamp_ms, 1008.0);
        assert!(casts[0].position.is_some());
    }

    #[test]
    fn test_spell_circle_casts_incendio() {
        let mut r = GestureRecognizer::new(GestureProfile::spell());
        // 16-step square, 0.08 normalized = 80px per side
        let corners = [(0.46, 0.46), (0.54, 0.46), (0.54, 0.54), (0.46, 0.54)];
        let mut cmds = Vec::new();
        for i in 0..16 {
            let t = i as f32 / 4.0;
            let seg = (t.floor() as usize) % 4;
            let f = t - t.floor();
            let (ax, ay) = corners[seg];
            let (bx, by) = corners[(seg + 1) % 4];
            let frame = fist(ax + (bx - ax) * f, ay + (by - ay) * f);
            cmds.extend(r.update(Some(&frame), VP, i as f64 * 33.0));
        }
        assert_eq!(
            cmds.iter().map(|c| c.kind).collect::<Vec<_>>(),
            vec![CommandKind::SpellIncendio]
        );
        // history cleared on the firing frame, one sample recorded since
        assert_eq!(r.history().len(), 1);
    }

    #[test]
    fn test_spell_thrust_casts_stupefy() {
        let mut r = GestureRecognizer::new(GestureProfile::spell());
        let mut cmds = Vec::new();
        for i in 0..5 {
            cmds.extend(r.update(Some(&fist(0.5, 0.5)), VP, i as f64 * 33.0));
        }
        assert!(cmds.is_empty());
        cmds.extend(r.update(Some(&fist(0.35, 0.5)), VP, 165.0));
        assert_eq!(cmds.len(), 1);
        assert_eq!(cmds[0].kind, CommandKind::SpellStupefy);
        assert!(r.history().is_empty());
    }

    #[test]
    fn test_spell_slow_drift_is_nothing() {
        let mut r = GestureRecognizer::new(GestureProfile::spell());
        let mut cmds = Vec::new();
        for i in 0..40 {
            let x = 0.3 + i as f32 * 0.002;
            cmds.extend(r.update(Some(&fist(x, 0.5)), VP, i as f64 * 33.0));
        }
        assert!(cmds.is_empty());
        assert_eq!(r.history().len(), 20);
    }

    #[test]
    fn test_spell_palm_short_circuits_trajectories() {
        let mut r = GestureRecognizer::new(GestureProfile::spell());
        let hand = make_hand();
        let mut cmds = Vec::new();
        // open palm jumping around far enough to be a thrust
        for i in 0..12 {
            let dx = if i % 2 == 0 { 0.0 } else { 0.2 };
            cmds.extend(r.update(Some(&translated(&hand, dx, 0.0)), VP, i as f64 * 33.0));
        }
        assert_eq!(
            cmds.iter().map(|c| c.kind).collect::<Vec<_>>(),
            vec![CommandKind::SpellProtego]
        );
    }

    #[test]
    fn test_spell_spells_share_cooldown() {
        let mut r = GestureRecognizer::new(GestureProfile::spell());
        let mut cmds = r.update(Some(&points(&make_hand())), VP, 0.0);
        for i in 1..6 {
            cmds.extend(r.update(Some(&fist(0.5, 0.5)), VP, i as f64 * 33.0));
        }
        // thrust detected while the spell channel is locked
        cmds.extend(r.update(Some(&fist(0.3, 0.5)), VP, 200.0));
        assert_eq!(cmds.len(), 1);
        assert!(r.history().is_empty());
        assert!(r.cooldowns().blocked_count() >= 1);
    }

    // ── slides profile ──

    fn slide_frame(center_x: f32) -> Vec<Landmark> {
        let hand = make_hand();
        let mcp = hand.get(HandLandmark::MiddleMcp).x;
        translated(&hand, center_x - mcp, 0.0)
    }

    #[test]
    fn test_slides_swipe_directions() {
        let mut r = GestureRecognizer::new(GestureProfile::slides());
        assert!(r.update(Some(&slide_frame(0.7)), VP, 0.0).is_empty());
        let cmds = r.update(Some(&slide_frame(0.55)), VP, 33.0);
        assert_eq!(cmds.len(), 1);
        assert_eq!(cmds[0].kind, CommandKind::SlideNext);
        assert!(cmds[0].position.is_none());

        let mut r = GestureRecognizer::new(GestureProfile::slides());
        r.update(Some(&slide_frame(0.3)), VP, 0.0);
        let cmds = r.update(Some(&slide_frame(0.45)), VP, 33.0);
        assert_eq!(cmds[0].kind, CommandKind::SlidePrev);

        let mut r = GestureRecognizer::new(GestureProfile::slides());
        r.update(Some(&slide_frame(0.5)), VP, 0.0);
        assert!(r.update(Some(&slide_frame(0.52)), VP, 33.0).is_empty());
    }

    #[test]
    fn test_slides_cooldown_and_reference_reset() {
        let mut r = GestureRecognizer::new(GestureProfile::slides());
        let mut fired = Vec::new();
        let mut x = 0.9;
        // keep swiping every frame for ~1.3s
        for i in 0..40 {
            let now = i as f64 * 33.0;
            fired.extend(r.update(Some(&slide_frame(x)), VP, now).into_iter().map(|c| c.timestamp_ms));
            x = if x < 0.2 { 0.9 } else { x - 0.1 };
        }
        // first at 33ms; lock expires at 1033ms; the 1056ms frame only re-seeds the
        // reference, so the next swipe lands at 1089ms
        assert_eq!(fired, vec![33.0, 1089.0]);
    }

    #[test]
    fn test_slides_ignores_other_gestures() {
        let mut r = GestureRecognizer::new(GestureProfile::slides());
        for i in 0..30 {
            assert!(r.update(Some(&v_hand()), VP, i as f64 * 16.0).is_empty());
            assert!(r.update(Some(&pinch_hand(0.0)), VP, i as f64 * 16.0 + 8.0).is_empty());
        }
        assert!(r.history().is_empty());
        assert!(!r.is_pinching());
    }

    // ── flow profile ──

    #[test]
    fn test_flow_pinch_drag_sequence() {
        let mut r = GestureRecognizer::new(GestureProfile::flow());
        let mut d = RecordingDispatcher::new();
        r.process_frame(Some(&pinch_hand(0.2)), VP, 0.0, &mut d);
        r.process_frame(Some(&pinch_hand(0.01)), VP, 16.0, &mut d);
        r.process_frame(Some(&pinch_hand(0.02)), VP, 32.0, &mut d);
        r.process_frame(Some(&pinch_hand(0.06)), VP, 48.0, &mut d);
        r.process_frame(Some(&pinch_hand(0.1)), VP, 64.0, &mut d);
        r.process_frame(Some(&pinch_hand(0.06)), VP, 80.0, &mut d);
        assert_eq!(
            d.kinds(),
            vec![
                CommandKind::NodePinchStart,
                CommandKind::NodePinchMove,
                CommandKind::NodePinchMove,
                CommandKind::NodePinchEnd,
            ]
        );
        let start = d.commands[0].position.unwrap();
        assert!((start.x - 600.0).abs() < 1e-3);
        assert!(d.commands[3].position.is_none());
        assert!(d.last_pointer.unwrap().is_active());
    }

    #[test]
    fn test_flow_disable_releases_pinch() {
        let mut r = GestureRecognizer::new(GestureProfile::flow());
        r.update(Some(&pinch_hand(0.0)), VP, 0.0);
        assert!(r.is_pinching());
        let mut config = GestureConfig::default();
        config.enabled = false;
        r.set_config(config);
        let cmds = r.update(Some(&pinch_hand(0.2)), VP, 16.0);
        assert_eq!(
            cmds.iter().map(|c| c.kind).collect::<Vec<_>>(),
            vec![CommandKind::NodePinchEnd]
        );
        assert!(!r.is_pinching());
        assert!(r.update(Some(&pinch_hand(0.0)), VP, 32.0).is_empty());
    }

    #[test]
    fn test_flow_hand_loss_releases_pinch() {
        let mut r = GestureRecognizer::new(GestureProfile::flow());
        r.update(Some(&pinch_hand(0.0)), VP, 0.0);
        let cmds = r.update(None, VP, 16.0);
        assert_eq!(cmds.len(), 1);
        assert_eq!(cmds[0].kind, CommandKind::NodePinchEnd);
        assert!(r.update(None, VP, 32.0).is_empty());
    }

    #[test]
    fn test_flow_v_sign_debounced() {
        let mut r = GestureRecognizer::new(GestureProfile::flow());
        let v = v_hand();
        let mut count = 0;
        for i in 0..100 {
            count += r
                .update(Some(&v), VP, i as f64 * 33.0)
                .iter()
                .filter(|c| c.kind == CommandKind::VAction)
                .count();
        }
        // fires at 0ms and 2013ms within 3267ms
        assert_eq!(count, 2);
    }

    #[test]
    fn test_flow_wave_reset_once() {
        let mut r = GestureRecognizer::new(GestureProfile::flow());
        let hand = make_hand();
        let mut waves = 0;
        for i in 0..10 {
            let frame = translated(&hand, -0.3 + 0.08 * i as f32, 0.0);
            waves += r
                .update(Some(&frame), VP, i as f64 * 16.0)
                .iter()
                .filter(|c| c.kind == CommandKind::WaveReset)
                .count();
        }
        assert_eq!(waves, 1);
    }

    #[test]
    fn test_flow_wave_needs_continuous_hand() {
        let mut r = GestureRecognizer::new(GestureProfile::flow());
        let hand = make_hand();
        r.update(Some(&translated(&hand, -0.3, 0.0)), VP, 0.0);
        r.update(None, VP, 16.0);
        // a reappearing hand far away is not a wave
        let cmds = r.update(Some(&translated(&hand, 0.4, 0.0)), VP, 32.0);
        assert!(cmds.is_empty());
    }

    // ── lifecycle ──

    #[test]
    fn test_sessions_independent() {
        let mut a = GestureRecognizer::new(GestureProfile::spell());
        let mut b = GestureRecognizer::new(GestureProfile::spell());
        let palm = points(&make_hand());
        assert_eq!(a.update(Some(&palm), VP, 0.0).len(), 1);
        assert_eq!(b.update(Some(&palm), VP, 10.0).len(), 1);
    }

    #[test]
    fn test_shutdown_clears_cooldowns() {
        let mut r = GestureRecognizer::new(GestureProfile::spell());
        let palm = points(&make_hand());
        assert_eq!(r.update(Some(&palm), VP, 0.0).len(), 1);
        r.shutdown();
        assert!(!r.cooldowns().is_locked(Channel::SpellCast, 1.0));
        assert_eq!(r.update(Some(&palm), VP, 2.0).len(), 1);
    }

    #[test]
    fn test_set_config_applies_new_cooldown() {
        let mut r = GestureRecognizer::new(GestureProfile::spell());
        let mut config = GestureConfig::default();
        config.spell_cooldown_ms = 100.0;
        r.set_config(config);
        let palm = points(&make_hand());
        assert_eq!(r.update(Some(&palm), VP, 0.0).len(), 1);
        assert_eq!(r.update(Some(&palm), VP, 50.0).len(), 0);
        assert_eq!(r.update(Some(&palm), VP, 100.0).len(), 1);
    }

    #[test]
    fn test_status_sexp() {
        let mut r = GestureRecognizer::new(GestureProfile::flow());
        r.update(Some(&v_hand()), VP, 0.0);
        let sexp = r.status_sexp(500.0);
        assert!(sexp.contains(":profile \"flow\""));
        assert!(sexp.contains(":v-action 1500"));
        assert!(sexp.contains(":wave 0"));
        assert!(!sexp.contains(":spell-cast"));
        assert!(lexpr::from_str(&sexp).is_ok());
    }

    #[test]
    fn test_profile_tables() {
        let spell = GestureProfile::spell();
        assert!(spell.exclusive);
        assert!(spell.needs_history());
        assert_eq!(
            spell.binding(Gesture::Circle).map(|b| b.command),
            Some(CommandKind::SpellIncendio)
        );
        let slides = GestureProfile::slides();
        assert!(!slides.needs_history());
        assert!(slides.binds_swipe());
        assert!(!slides.binds_pinch());
        let flow = GestureProfile::flow();
        assert!(flow.binds_pinch());
        assert_eq!(
            flow.binding(Gesture::Wave).and_then(|b| b.channel),
            Some(Channel::Wave)
        );
    }
}

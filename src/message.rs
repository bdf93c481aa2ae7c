//! Per-frame broadcast record passed down the widget tree.
//!
//! The shell builds one [`Message`] per frame and hands it to the root
//! widget's `update`. Values live in fixed arrays indexed by closed key
//! enums, so reading a key is an index and a missing key is simply `None`.
//! Text values are owned, bounded copies; nothing in the tree borrows from
//! the shell.
//!
//! [`Message::delegate`] derives a narrowed copy carrying one key plus the
//! scalar fields. Workout views use it to hand stage progress to their bars
//! without exposing the rest of the frame.

use heapless::String;

/// Maximum bytes kept for a single text value.
pub const TEXT_CAPACITY: usize = 32;

/// Bounded owned text used for message values and widget labels.
pub type Text = String<TEXT_CAPACITY>;

/// Copy `value` into a bounded string, dropping characters that do not fit.
pub fn bounded_text<const N: usize>(value: &str) -> String<N> {
    let mut text = String::new();
    for c in value.chars() {
        if text.push(c).is_err() {
            break;
        }
    }
    text
}

// =============================================================================
// Keys
// =============================================================================

/// Keys for text values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextKey {
    SpeedPace,
    Rank,
    EnergyKj,
    Calories,
    TimeSeconds,
    DistanceMiles,
    Brightness,
    Volume,
    AvatarDistance,
    HeartRate,
    Clock,
}

impl TextKey {
    pub const COUNT: usize = 11;
}

/// Keys for float values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FloatKey {
    StageProgress,
    BrightnessProgress,
    VolumeProgress,
}

impl FloatKey {
    pub const COUNT: usize = 3;
}

/// Keys for boolean flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FlagKey {
    Hidden,
    ButtonActive,
    ResumeButtonActive,
    VolumeButtonActive,
    BrightButtonActive,
    EndButtonActive,
    MileMarker,
    Badge1,
    Badge2,
    Badge3,
    MultiProgress,
    BrightnessSelected,
    SpeedSelected,
    VolumeSelected,
    Flash,
}

impl FlagKey {
    pub const COUNT: usize = 15;
}

/// Any single message key, used to select what a delegate carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Text(TextKey),
    Float(FloatKey),
    Flag(FlagKey),
}

impl From<TextKey> for Key {
    fn from(key: TextKey) -> Self {
        Self::Text(key)
    }
}

impl From<FloatKey> for Key {
    fn from(key: FloatKey) -> Self {
        Self::Float(key)
    }
}

impl From<FlagKey> for Key {
    fn from(key: FlagKey) -> Self {
        Self::Flag(key)
    }
}

// =============================================================================
// Scalar Fields
// =============================================================================

/// Top-level UI mode. Declaration order matters: views that exist only
/// during a workout hide themselves for every state after [`Self::Pause`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum DisplayState {
    #[default]
    Main,
    Info,
    HeartRate,
    Pause,
    Summary,
    MenuBrightness,
    MenuVolume,
    MenuSpeed,
    MenuMain,
    Off,
}

impl DisplayState {
    /// States during which the workout header is on screen.
    pub const fn is_in_workout(self) -> bool {
        matches!(self, Self::Main | Self::Info | Self::HeartRate | Self::Pause)
    }
}

/// Phase of the current workout.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum WorkoutStage {
    #[default]
    Warmup,
    Workout,
    Cooldown,
}

impl WorkoutStage {
    pub const ALL: [Self; 3] = [Self::Warmup, Self::Workout, Self::Cooldown];

    /// Position in [`Self::ALL`].
    pub const fn index(self) -> usize {
        self as usize
    }
}

/// One-shot action requested by the shell.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Action {
    #[default]
    None,
    ToggleActiveButton,
}

// =============================================================================
// Message
// =============================================================================

/// Per-frame value bag.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Message {
    texts: [Option<Text>; TextKey::COUNT],
    floats: [Option<f32>; FloatKey::COUNT],
    flags: [Option<bool>; FlagKey::COUNT],
    display_state: DisplayState,
    action: Action,
    workout_stage: WorkoutStage,
    total_racers: u32,
}

impl Message {
    /// Empty message: no keys set, default scalars.
    pub fn new() -> Self {
        Self::default()
    }

    // -------------------------------------------------------------------------
    // Writers
    // -------------------------------------------------------------------------

    /// Store a text value, truncated to [`TEXT_CAPACITY`] bytes.
    pub fn write_text(&mut self, key: TextKey, value: &str) {
        self.texts[key as usize] = Some(bounded_text(value));
    }

    pub fn write_float(&mut self, key: FloatKey, value: f32) {
        self.floats[key as usize] = Some(value);
    }

    pub fn write_flag(&mut self, key: FlagKey, value: bool) {
        self.flags[key as usize] = Some(value);
    }

    pub fn set_display_state(&mut self, state: DisplayState) {
        self.display_state = state;
    }

    pub fn set_action(&mut self, action: Action) {
        self.action = action;
    }

    pub fn set_workout_stage(&mut self, stage: WorkoutStage) {
        self.workout_stage = stage;
    }

    pub fn set_total_racers(&mut self, total: u32) {
        self.total_racers = total;
    }

    /// Drop every text value.
    pub fn clear_text(&mut self) {
        self.texts = Default::default();
    }

    #[must_use]
    pub fn with_text(mut self, key: TextKey, value: &str) -> Self {
        self.write_text(key, value);
        self
    }

    #[must_use]
    pub fn with_float(mut self, key: FloatKey, value: f32) -> Self {
        self.write_float(key, value);
        self
    }

    #[must_use]
    pub fn with_flag(mut self, key: FlagKey, value: bool) -> Self {
        self.write_flag(key, value);
        self
    }

    #[must_use]
    pub fn with_display_state(mut self, state: DisplayState) -> Self {
        self.display_state = state;
        self
    }

    #[must_use]
    pub fn with_workout_stage(mut self, stage: WorkoutStage) -> Self {
        self.workout_stage = stage;
        self
    }

    #[must_use]
    pub fn with_action(mut self, action: Action) -> Self {
        self.action = action;
        self
    }

    // -------------------------------------------------------------------------
    // Readers
    // -------------------------------------------------------------------------

    pub fn text(&self, key: TextKey) -> Option<&str> {
        self.texts[key as usize].as_ref().map(|text| text.as_str())
    }

    pub fn float(&self, key: FloatKey) -> Option<f32> {
        self.floats[key as usize]
    }

    /// Flag value; an unset flag reads as `false`.
    pub fn flag(&self, key: FlagKey) -> bool {
        self.flags[key as usize].unwrap_or(false)
    }

    pub fn has_flag(&self, key: FlagKey) -> bool {
        self.flags[key as usize].is_some()
    }

    pub const fn display_state(&self) -> DisplayState {
        self.display_state
    }

    pub const fn action(&self) -> Action {
        self.action
    }

    pub const fn workout_stage(&self) -> WorkoutStage {
        self.workout_stage
    }

    pub const fn total_racers(&self) -> u32 {
        self.total_racers
    }

    /// Narrowed copy carrying only `key` plus the scalar fields.
    pub fn delegate(&self, key: impl Into<Key>) -> Self {
        let mut narrowed = Self {
            display_state: self.display_state,
            action: self.action,
            workout_stage: self.workout_stage,
            total_racers: self.total_racers,
            ..Self::default()
        };
        match key.into() {
            Key::Text(key) => narrowed.texts[key as usize].clone_from(&self.texts[key as usize]),
            Key::Float(key) => narrowed.floats[key as usize] = self.floats[key as usize],
            Key::Flag(key) => narrowed.flags[key as usize] = self.flags[key as usize],
        }
        narrowed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_keys_read_as_absent() {
        let msg = Message::new();
        assert_eq!(msg.text(TextKey::Rank), None);
        assert_eq!(msg.float(FloatKey::StageProgress), None);
        assert!(!msg.flag(FlagKey::Flash));
        assert!(!msg.has_flag(FlagKey::Flash));
        assert_eq!(msg.display_state(), DisplayState::Main);
        assert_eq!(msg.workout_stage(), WorkoutStage::Warmup);
        assert_eq!(msg.action(), Action::None);
    }

    #[test]
    fn test_write_and_read_back() {
        let mut msg = Message::new();
        msg.write_text(TextKey::Rank, "12/40");
        msg.write_float(FloatKey::StageProgress, 0.25);
        msg.write_flag(FlagKey::Badge2, true);
        msg.set_total_racers(40);

        assert_eq!(msg.text(TextKey::Rank), Some("12/40"));
        assert_eq!(msg.float(FloatKey::StageProgress), Some(0.25));
        assert!(msg.flag(FlagKey::Badge2));
        assert_eq!(msg.total_racers(), 40);
    }

    #[test]
    fn test_text_is_truncated_to_capacity() {
        let long = "x".repeat(TEXT_CAPACITY + 10);
        let msg = Message::new().with_text(TextKey::Clock, &long);
        assert_eq!(msg.text(TextKey::Clock).map(str::len), Some(TEXT_CAPACITY));
    }

    #[test]
    fn test_clear_text_keeps_other_values() {
        let mut msg = Message::new()
            .with_text(TextKey::Rank, "3")
            .with_float(FloatKey::VolumeProgress, 0.5);
        msg.clear_text();
        assert_eq!(msg.text(TextKey::Rank), None);
        assert_eq!(msg.float(FloatKey::VolumeProgress), Some(0.5));
    }

    #[test]
    fn test_delegate_carries_one_key_and_scalars() {
        let msg = Message::new()
            .with_text(TextKey::Rank, "7")
            .with_float(FloatKey::StageProgress, 0.6)
            .with_float(FloatKey::BrightnessProgress, 0.9)
            .with_flag(FlagKey::Flash, true)
            .with_display_state(DisplayState::Info)
            .with_workout_stage(WorkoutStage::Cooldown);

        let narrowed = msg.delegate(FloatKey::StageProgress);
        assert_eq!(narrowed.float(FloatKey::StageProgress), Some(0.6));
        assert_eq!(narrowed.float(FloatKey::BrightnessProgress), None);
        assert_eq!(narrowed.text(TextKey::Rank), None);
        assert!(!narrowed.flag(FlagKey::Flash));
        assert_eq!(narrowed.display_state(), DisplayState::Info);
        assert_eq!(narrowed.workout_stage(), WorkoutStage::Cooldown);

        let text_only = msg.delegate(TextKey::Rank);
        assert_eq!(text_only.text(TextKey::Rank), Some("7"));
        assert_eq!(text_only.float(FloatKey::StageProgress), None);
    }

    #[test]
    fn test_display_state_ordering() {
        assert!(DisplayState::Pause < DisplayState::Summary);
        assert!(DisplayState::Pause.is_in_workout());
        assert!(DisplayState::HeartRate.is_in_workout());
        assert!(!DisplayState::MenuSpeed.is_in_workout());
    }

    #[test]
    fn test_bounded_text_stops_at_capacity() {
        let text: String<4> = bounded_text("abcdef");
        assert_eq!(text.as_str(), "abcd");
    }
}

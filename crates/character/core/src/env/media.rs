//! Output-side collaborators: sound, script variables and animation assets.

use crate::config::AnimationSpec;
use crate::env::CharacterId;
use crate::geometry::Pixel;

/// Positional sound output. Loops are owned by one character at a time.
pub trait AudioSink {
    fn play_once(&self, key: &str, at: Pixel);

    fn play_loop(&self, owner: CharacterId, key: &str, at: Pixel);

    fn stop_loop(&self, owner: CharacterId);
}

/// Global script variable store.
pub trait ScriptVariables {
    /// Value of a variable; unset variables read as 0.
    fn get(&self, name: &str) -> i32;
}

/// Loaded animation assets keyed by asset name.
pub trait AnimationCache {
    fn get(&self, key: &str) -> Option<AnimationSpec>;

    /// Starts loading an asset. Completion is reported back through
    /// `Character::apply_loaded_animation`.
    fn request_load(&self, key: &str);
}

#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::{HashMap, HashSet};
use std::rc::Rc;

use character_core::{
    AnimationCache, AnimationSpec, AudioSink, CharacterHooks, CharacterId, HookEvent, Pixel,
    Roster, Tile,
};

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Hooks that record every event into a shared log.
#[derive(Clone, Default)]
pub struct Recorder(pub Rc<RefCell<Vec<HookEvent>>>);

impl Recorder {
    pub fn events(&self) -> Vec<HookEvent> {
        self.0.borrow().clone()
    }

    pub fn count(&self, matches: impl Fn(&HookEvent) -> bool) -> usize {
        self.0.borrow().iter().filter(|event| matches(event)).count()
    }
}

impl CharacterHooks for Recorder {
    fn on_event(&mut self, event: HookEvent) {
        self.0.borrow_mut().push(event);
    }
}

/// Roster of living characters by id.
#[derive(Default)]
pub struct Living {
    pub alive: HashSet<CharacterId>,
    pub tiles: HashMap<CharacterId, Tile>,
}

impl Living {
    pub fn with(ids: &[CharacterId]) -> Self {
        Self {
            alive: ids.iter().copied().collect(),
            tiles: HashMap::new(),
        }
    }
}

impl Roster for Living {
    fn is_alive(&self, id: CharacterId) -> bool {
        self.alive.contains(&id)
    }

    fn tile_of(&self, id: CharacterId) -> Option<Tile> {
        self.tiles.get(&id).copied()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Sound {
    Once(String),
    Loop(CharacterId, String),
    Stop(CharacterId),
}

/// Audio sink that records calls.
#[derive(Default)]
pub struct Speaker(pub RefCell<Vec<Sound>>);

impl AudioSink for Speaker {
    fn play_once(&self, key: &str, _at: Pixel) {
        self.0.borrow_mut().push(Sound::Once(key.to_owned()));
    }

    fn play_loop(&self, owner: CharacterId, key: &str, _at: Pixel) {
        self.0.borrow_mut().push(Sound::Loop(owner, key.to_owned()));
    }

    fn stop_loop(&self, owner: CharacterId) {
        self.0.borrow_mut().push(Sound::Stop(owner));
    }
}

/// Asset cache that starts empty and records load requests.
#[derive(Default)]
pub struct Assets {
    pub loaded: RefCell<HashMap<String, AnimationSpec>>,
    pub requested: RefCell<Vec<String>>,
}

impl AnimationCache for Assets {
    fn get(&self, key: &str) -> Option<AnimationSpec> {
        self.loaded.borrow().get(key).cloned()
    }

    fn request_load(&self, key: &str) {
        self.requested.borrow_mut().push(key.to_owned());
    }
}

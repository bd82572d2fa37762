use std::marker::PhantomData;

use dealing::{Card, DealConfig, GameState, PlayerState};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::error::StoreError;
use crate::storage::Storage;

/// A typed JSON record stored under a fixed key.
pub struct Item<T> {
    key: &'static str,
    _marker: PhantomData<fn() -> T>,
}

impl<T> Item<T> {
    pub const fn new(key: &'static str) -> Self {
        Self {
            key,
            _marker: PhantomData,
        }
    }

    pub fn key(&self) -> &'static str {
        self.key
    }

    /// Raw stored text. An empty string counts as absent.
    pub fn may_load_raw<S: Storage + ?Sized>(
        &self,
        storage: &S,
    ) -> Result<Option<String>, StoreError> {
        Ok(storage.get(self.key)?.filter(|raw| !raw.is_empty()))
    }

    pub fn remove<S: Storage + ?Sized>(&self, storage: &mut S) -> Result<(), StoreError> {
        storage.remove(self.key)
    }
}

impl<T: Serialize + DeserializeOwned> Item<T> {
    pub fn may_load<S: Storage + ?Sized>(&self, storage: &S) -> Result<Option<T>, StoreError> {
        match self.may_load_raw(storage)? {
            Some(raw) => Ok(Some(serde_json::from_str(&raw)?)),
            None => Ok(None),
        }
    }

    pub fn save<S: Storage + ?Sized>(&self, storage: &mut S, value: &T) -> Result<(), StoreError> {
        let raw = serde_json::to_string(value)?;
        storage.set(self.key, &raw)
    }
}

/// Snapshot of a game in progress, as written after every mutation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedSession {
    pub deck: Vec<Card>,
    /// Informational; the deck length is authoritative
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remain: Option<usize>,
    pub players: Vec<PlayerState>,
    #[serde(default)]
    pub current_index: usize,
    pub cfg: DealConfig,
}

impl From<&GameState> for SavedSession {
    fn from(state: &GameState) -> Self {
        Self {
            deck: state.deck.clone(),
            remain: Some(state.remain()),
            players: state.players.clone(),
            current_index: state.current_index,
            cfg: state.cfg,
        }
    }
}

impl From<SavedSession> for GameState {
    fn from(saved: SavedSession) -> Self {
        GameState {
            deck: saved.deck,
            players: saved.players,
            current_index: saved.current_index,
            cfg: saved.cfg,
        }
    }
}

pub const CONFIG: Item<DealConfig> = Item::new("deal-config:v1");
pub const SESSION: Item<SavedSession> = Item::new("deal-game-state:v1");

/// Plain flag record, `"1"` when set and `""` when not
pub const SKIP_RULE_CHANGE_TIP_KEY: &str = "deal-config:tip:skip";

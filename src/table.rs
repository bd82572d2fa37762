use dealing::{DealConfig, DealConfigPatch, DealOutcome, GameState, TableStyle, MAX_PER_TIME, MAX_PLAYERS};
use log::{debug, info, warn};
use rand::Rng;

use crate::config::{get_config, set_config, skip_rule_change_tip};
use crate::error::TableError;
use crate::msg::{
    GameMsg, OpenOutcome, PileResponse, PlayerSummary, Response, SetupMsg, TableResponse,
};
use crate::session::{describe_changes, plan_resume, restore_state, save_state, ResumePlan};
use crate::storage::Storage;

/// Lowest player count the setup stepper goes down to.
const MIN_STEPPER_PLAYERS: u8 = 2;

/// Both screens over one store. Storage is the only state shared between
/// them; the live game is held here once the game screen is opened.
pub struct Table<S: Storage, R: Rng> {
    storage: S,
    rng: R,
    game: Option<GameState>,
}

impl<S: Storage, R: Rng> Table<S, R> {
    pub fn new(storage: S, rng: R) -> Self {
        Self {
            storage,
            rng,
            game: None,
        }
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn storage_mut(&mut self) -> &mut S {
        &mut self.storage
    }

    pub fn into_storage(self) -> S {
        self.storage
    }

    pub fn game(&self) -> Option<&GameState> {
        self.game.as_ref()
    }

    /// The live ruleset.
    pub fn config(&self) -> DealConfig {
        get_config(&self.storage)
    }

    /// Apply a setup screen action and return the ruleset as persisted.
    pub fn setup(&mut self, msg: SetupMsg) -> DealConfig {
        let cfg = self.config();
        let patch = match msg {
            SetupMsg::SetDeckCount { deck_count } => {
                if cfg.deck_count == deck_count {
                    return cfg;
                }
                DealConfigPatch {
                    deck_count: Some(deck_count.into()),
                    ..DealConfigPatch::default()
                }
            }
            SetupMsg::ToggleJokers {} => DealConfigPatch {
                include_jokers: Some(!cfg.include_jokers),
                ..DealConfigPatch::default()
            },
            SetupMsg::IncPlayers {} => DealConfigPatch {
                player_count: Some((cfg.player_count + 1).min(MAX_PLAYERS).into()),
                ..DealConfigPatch::default()
            },
            SetupMsg::DecPlayers {} => DealConfigPatch {
                player_count: Some(
                    cfg.player_count
                        .saturating_sub(1)
                        .max(MIN_STEPPER_PLAYERS)
                        .into(),
                ),
                ..DealConfigPatch::default()
            },
            SetupMsg::SetDealMode { mode } => DealConfigPatch {
                deal_mode: Some(mode),
                ..DealConfigPatch::default()
            },
            SetupMsg::IncPerTime {} => DealConfigPatch {
                per_time: Some((cfg.per_time + 1).min(MAX_PER_TIME).into()),
                ..DealConfigPatch::default()
            },
            SetupMsg::DecPerTime {} => DealConfigPatch {
                per_time: Some(cfg.per_time.saturating_sub(1).max(1).into()),
                ..DealConfigPatch::default()
            },
            SetupMsg::SetReshuffle { reshuffle } => DealConfigPatch {
                reshuffle: Some(reshuffle),
                ..DealConfigPatch::default()
            },
        };
        let cfg = set_config(&mut self.storage, &patch);
        debug!("Ruleset updated by {msg:?}: {cfg:?}");
        cfg
    }

    /// Open the game screen: resume the saved session if its rules still
    /// apply, otherwise start a new one, unless the user has to confirm
    /// discarding a session saved under other rules.
    pub fn open(&mut self) -> OpenOutcome {
        let live = self.config();
        let skip = skip_rule_change_tip(&self.storage);

        match plan_resume(restore_state(&self.storage), &live, skip) {
            ResumePlan::Resume(game) => {
                info!(
                    "Resuming game: {} cards left, {} players",
                    game.remain(),
                    game.players.len()
                );
                self.game = Some(game);
                OpenOutcome::Resumed
            }
            ResumePlan::StartFresh => {
                self.start(live);
                OpenOutcome::Started
            }
            ResumePlan::ConfirmRuleChange { changes } => {
                info!(
                    "Saved game uses different rules ({}), waiting for confirmation",
                    describe_changes(&changes)
                );
                OpenOutcome::ConfirmRequired { changes }
            }
        }
    }

    /// Discard any saved session and start a new one under the live rules.
    pub fn open_confirmed(&mut self) {
        let live = self.config();
        self.start(live);
    }

    pub fn execute(&mut self, msg: GameMsg) -> Result<Response, TableError> {
        match msg {
            GameMsg::Deal {} => self.execute_deal(),
            GameMsg::Reset {} => self.execute_reset(),
        }
    }

    fn execute_deal(&mut self) -> Result<Response, TableError> {
        let game = self.game.as_mut().ok_or(TableError::NoSession)?;
        let outcome = game.deal(&mut self.rng);
        let response = Response::new().add_attribute("action", "deal");

        match outcome {
            DealOutcome::EmptyDeck => Ok(response
                .add_attribute("dealt", 0)
                .with_notice("No cards remaining")),
            DealOutcome::NoSeats => {
                warn!("No seats for {} players, nothing dealt", game.cfg.player_count);
                Ok(response
                    .add_attribute("dealt", 0)
                    .with_notice(format!("No seats for {} players", game.cfg.player_count)))
            }
            DealOutcome::Dealt { cards, reshuffled } => {
                debug!(
                    "Dealt {cards} cards, {} remaining, turn at {}",
                    game.remain(),
                    game.current_index
                );
                let response = response
                    .add_attribute("dealt", cards)
                    .add_attribute("remain", game.remain())
                    .add_attribute("current_index", game.current_index);
                self.persist();
                if reshuffled {
                    Ok(response.with_notice("Deck reshuffled and piles cleared"))
                } else {
                    Ok(response)
                }
            }
        }
    }

    fn execute_reset(&mut self) -> Result<Response, TableError> {
        let live = self.config();
        self.start(live);
        let remain = self.game.as_ref().map_or(0, GameState::remain);
        Ok(Response::new()
            .add_attribute("action", "reset")
            .add_attribute("remain", remain))
    }

    pub fn query_table(&self) -> Result<TableResponse, TableError> {
        let game = self.game.as_ref().ok_or(TableError::NoSession)?;
        Ok(TableResponse {
            cfg: game.cfg,
            remain: game.remain(),
            current_index: game.current_index,
            players: game
                .players
                .iter()
                .map(|p| PlayerSummary {
                    name: p.name.clone(),
                    x: p.position.x,
                    y: p.position.y,
                    anchor: p.anchor,
                    pile_size: p.pile.len(),
                    top_cards: p.preview().copied().collect(),
                })
                .collect(),
            style: TableStyle::for_players(game.cfg.player_count),
        })
    }

    pub fn query_pile(&self, idx: usize) -> Result<PileResponse, TableError> {
        let game = self.game.as_ref().ok_or(TableError::NoSession)?;
        let player = game
            .players
            .get(idx)
            .ok_or(TableError::NoSuchPlayer { idx })?;
        Ok(PileResponse {
            name: player.name.clone(),
            pile: player.pile.iter().copied().collect(),
        })
    }

    fn start(&mut self, cfg: DealConfig) {
        match self.game.as_mut() {
            Some(game) => game.reset(cfg, &mut self.rng),
            None => self.game = Some(GameState::new(cfg, &mut self.rng)),
        }
        if let Some(game) = &self.game {
            info!(
                "New game: {} cards, {} players, {} dealing",
                game.remain(),
                game.players.len(),
                cfg.deal_mode.label()
            );
            if game.players.is_empty() {
                warn!("No seating layout for {} players", cfg.player_count);
            }
        }
        self.persist();
    }

    fn persist(&mut self) {
        if let Some(game) = &self.game {
            if let Err(err) = save_state(&mut self.storage, game) {
                warn!("Failed to save game session: {err}");
            }
        }
    }
}

use std::fmt;

use log::{debug, info, warn};

use crate::api::commands::{Action, CroupierAction, CroupierActionKind};
use crate::api::dto::{CroupierViewDto, MatchViewDto};
use crate::api::queries::{Query, QueryResponse};
use crate::config::{ConfigError, CroupierConfig};
use crate::domain::chips::Chips;
use crate::domain::player::{Participant, Player, PlayerSnapshot};
use crate::domain::{CroupierId, PlayerId, SeatIndex};
use crate::engine::events::{CroupierEvent, CroupierStage, Emitter, EventKind, LobbyEvent};
use crate::infra::rng::{RandomSource, SystemRng};
use crate::lobby::match_runner::Match;

/// Крупье: лобби участников и текущий матч.
///
/// Стадии: PREPARING → PLAYING → PAUSING → ENDED. Владеет общим `Emitter`,
/// который получают все матчи, раздачи и игроки, созданные этим крупье.
pub struct Croupier {
    id: CroupierId,
    owner: Participant,
    /// Стартовый стек для новых игроков.
    chips: Chips,
    lobby: Vec<Participant>,
    stage: CroupierStage,
    game: Option<Match>,
    events: Emitter,
    rng: Box<dyn RandomSource + Send>,
}

impl Croupier {
    pub fn new(config: CroupierConfig) -> Result<Self, ConfigError> {
        Self::with_rng(config, SystemRng)
    }

    pub fn with_rng(
        config: CroupierConfig,
        rng: impl RandomSource + Send + 'static,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        info!("крупье {}: владелец {}", config.id, config.owner.name);

        Ok(Self {
            id: config.id,
            owner: config.owner,
            chips: config.chips,
            lobby: Vec::new(),
            stage: CroupierStage::Preparing,
            game: None,
            events: Emitter::new(),
            rng: Box::new(rng),
        })
    }

    pub fn id(&self) -> CroupierId {
        self.id
    }

    pub fn owner(&self) -> &Participant {
        &self.owner
    }

    pub fn chips(&self) -> Chips {
        self.chips
    }

    pub fn stage(&self) -> CroupierStage {
        self.stage
    }

    pub fn lobby(&self) -> &[Participant] {
        &self.lobby
    }

    pub fn current_match(&self) -> Option<&Match> {
        self.game.as_ref()
    }

    /// Общий источник событий (для подписки UI).
    pub fn events(&self) -> &Emitter {
        &self.events
    }

    /// Обработать действие из общего канала.
    pub fn handle(&mut self, action: &Action) {
        match action {
            Action::Croupier(action) => self.handle_croupier(action),
            Action::Player(_) | Action::Showdown(_) => {
                if let Some(game) = self.game.as_mut() {
                    game.handle(action);
                }
            }
        }
        self.sync_stage();
    }

    pub fn query(&self, query: &Query) -> QueryResponse {
        match query {
            Query::Croupier => QueryResponse::Croupier(self.view()),
            Query::Players => QueryResponse::Players(self.player_snapshots()),
            Query::Outcomes => QueryResponse::Outcomes(
                self.game
                    .as_ref()
                    .map(|g| g.table().pool.outcomes().to_vec())
                    .unwrap_or_default(),
            ),
        }
    }

    fn handle_croupier(&mut self, action: &CroupierAction) {
        match &action.kind {
            CroupierActionKind::SetCroupierId(id) => {
                self.id = *id;
                self.emit(CroupierEvent::IdSet { id: *id });
                return;
            }
            CroupierActionKind::SetOwner(owner) => {
                self.owner = owner.clone();
                self.emit(CroupierEvent::OwnerSet {
                    owner: owner.clone(),
                });
                return;
            }
            _ => {}
        }

        if action.id != Some(self.owner.id) {
            debug!("крупье: команда {:?} не от владельца, отброшена", action.kind);
            return;
        }

        match &action.kind {
            CroupierActionKind::SetCroupierId(_) | CroupierActionKind::SetOwner(_) => {}
            CroupierActionKind::SetChips(chips) => self.set_chips(*chips),
            CroupierActionKind::Arrange(participant) => self.arrange(participant),
            CroupierActionKind::Reorder { id, index } => self.reorder(*id, *index),
            CroupierActionKind::Start { wager, position } => self.start(*wager, *position),
            CroupierActionKind::Restart { wager } => self.restart(*wager),
            CroupierActionKind::Pause => self.pause(),
            CroupierActionKind::End => self.end(),
        }
    }

    fn set_chips(&mut self, chips: Chips) {
        if chips.is_zero() {
            debug!("крупье: нулевой стартовый стек отброшен");
            return;
        }
        self.chips = chips;
        self.emit(CroupierEvent::ChipsSet { chips });
    }

    fn arrange(&mut self, participant: &Participant) {
        if participant.name.trim().is_empty() {
            debug!("лобби: участник {} без имени", participant.id);
            return;
        }
        if self.lobby.iter().any(|p| p.id == participant.id) {
            debug!("лобби: участник {} уже в лобби", participant.id);
            return;
        }

        self.lobby.push(participant.clone());
        self.events.emit(EventKind::Lobby(LobbyEvent::Arranged {
            participant: participant.clone(),
        }));
    }

    fn reorder(&mut self, id: PlayerId, index: usize) {
        if index >= self.lobby.len() {
            debug!("лобби: позиции {} нет", index);
            return;
        }
        let Some(from) = self.lobby.iter().position(|p| p.id == id) else {
            debug!("лобби: участника {} нет", id);
            return;
        };

        let participant = self.lobby.remove(from);
        self.lobby.insert(index, participant);
        self.events.emit(EventKind::Lobby(LobbyEvent::Reordered {
            participants: self.lobby.clone(),
        }));
    }

    fn can_start(&self, wager: Chips) -> bool {
        if self.game.as_ref().map_or(false, |g| g.in_hand()) {
            debug!("крупье: раздача ещё идёт, новый матч не начат");
            return false;
        }
        if wager.is_zero() {
            debug!("крупье: нулевой блайнд");
            return false;
        }
        if self.lobby.len() <= 2 {
            debug!("крупье: в лобби {} участников, нужно больше двух", self.lobby.len());
            return false;
        }
        true
    }

    fn start(&mut self, wager: Chips, position: Option<SeatIndex>) {
        if !self.can_start(wager) {
            return;
        }

        let players: Vec<Player> = self
            .lobby
            .iter()
            .map(|p| Player::from_participant(p, self.chips, self.events.clone()))
            .collect();

        if let Some(position) = position.filter(|p| *p >= players.len()) {
            debug!("крупье: позиции {} нет за столом", position);
            return;
        }
        let position = match position {
            Some(position) => position,
            None => self.rng.index(players.len()),
        };

        let ids: Vec<PlayerId> = players.iter().map(|p| p.id()).collect();
        if self.launch(players, wager, position) {
            self.emit(CroupierEvent::Started { wager, players: ids });
            self.begin();
        }
    }

    /// Новый матч с теми же объектами игроков: стеки сохраняются,
    /// новички получают стартовый стек.
    fn restart(&mut self, wager: Chips) {
        if !self.can_start(wager) {
            return;
        }

        let mut previous = match self.game.take() {
            Some(mut game) => {
                game.end();
                game.into_players()
            }
            None => Vec::new(),
        };

        let players: Vec<Player> = self
            .lobby
            .iter()
            .map(|participant| match previous.iter().position(|p| p.id() == participant.id) {
                Some(index) => previous.swap_remove(index),
                None => Player::from_participant(participant, self.chips, self.events.clone()),
            })
            .collect();

        let position = self.rng.index(players.len());
        let ids: Vec<PlayerId> = players.iter().map(|p| p.id()).collect();
        if self.launch(players, wager, position) {
            self.emit(CroupierEvent::Restarted { wager, players: ids });
            self.begin();
        }
    }

    fn launch(&mut self, players: Vec<Player>, wager: Chips, position: SeatIndex) -> bool {
        match Match::new(players, wager, position, self.events.clone()) {
            Ok(game) => {
                if let Some(mut old) = self.game.replace(game) {
                    old.end();
                }
                true
            }
            Err(err) => {
                warn!("крупье: матч не создан: {}", err);
                false
            }
        }
    }

    fn begin(&mut self) {
        self.set_stage(CroupierStage::Playing);
        if let Some(game) = self.game.as_mut() {
            game.start();
        }
    }

    fn pause(&mut self) {
        if self.stage != CroupierStage::Playing {
            debug!("крупье: пауза в стадии {:?} отброшена", self.stage);
            return;
        }
        if let Some(game) = self.game.as_mut() {
            game.pause();
        }
        self.emit(CroupierEvent::Paused);
        self.set_stage(CroupierStage::Pausing);
    }

    fn end(&mut self) {
        if let Some(game) = self.game.as_mut() {
            game.end();
        }
        self.emit(CroupierEvent::Ended);
        self.set_stage(CroupierStage::Ended);
    }

    /// Матч мог закончиться сам (фишки остались у одного игрока).
    fn sync_stage(&mut self) {
        let ended = self.game.as_ref().map_or(false, |g| g.is_ended());
        if ended && self.stage == CroupierStage::Playing {
            self.set_stage(CroupierStage::Ended);
        }
    }

    fn set_stage(&mut self, stage: CroupierStage) {
        if self.stage == stage {
            return;
        }
        info!("крупье {}: {:?} → {:?}", self.id, self.stage, stage);
        self.stage = stage;
        self.emit(CroupierEvent::StageChanged { stage });
    }

    fn emit(&self, event: CroupierEvent) {
        self.events.emit(EventKind::Croupier(event));
    }

    fn player_snapshots(&self) -> Vec<PlayerSnapshot> {
        self.game
            .as_ref()
            .map(|g| g.players().iter().map(|p| p.snapshot()).collect())
            .unwrap_or_default()
    }

    fn view(&self) -> CroupierViewDto {
        let current_match = self.game.as_ref().map(|game| {
            let table = game.table();
            let monitored = game
                .hand()
                .and_then(|h| h.round())
                .and_then(|r| r.monitored())
                .map(|seat| table.players[seat].id());

            MatchViewDto {
                wager: table.wager,
                dealer: table.dealer,
                hand_number: game.hand_number(),
                playing: game.is_playing(),
                street: game.hand().and_then(|h| h.street()),
                monitored,
                players: self.player_snapshots(),
                pots: table.pool.pots().to_vec(),
            }
        });

        CroupierViewDto {
            id: self.id,
            owner: self.owner.clone(),
            stage: self.stage,
            chips: self.chips,
            lobby: self.lobby.clone(),
            current_match,
        }
    }
}

impl fmt::Debug for Croupier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Croupier")
            .field("id", &self.id)
            .field("owner", &self.owner)
            .field("chips", &self.chips)
            .field("lobby", &self.lobby)
            .field("stage", &self.stage)
            .field("game", &self.game)
            .field("events", &self.events)
            .finish()
    }
}

//! Spatial occupancy.
//!
//! The `Board` owns every token in play and knows where each one is. It
//! keeps one authoritative `TokenId -> (cell, token)` map plus three layer
//! indices (players, threats, POIs) keyed by cell.
//!
//! ## Consistency
//!
//! All mutation goes through two private functions, `attach` and `detach`,
//! which update the authoritative map and the layer index together:
//!
//! - every layer entry points at a token whose recorded cell is that entry's
//!   cell, and every layered token has exactly that layer entry;
//! - a cell holds at most one token per layer. Tokens in different layers
//!   may share a cell (a player standing on a POI).
//!
//! ## Events
//!
//! Mutations queue `GameEvent`s in an outbox. The game drains it with
//! [`Board::take_events`] and publishes them.

use rustc_hash::FxHashMap;

use crate::core::{
    BoardSize, Cell, Layer, Neighbors, Poi, PoiFace, Threat, Token, TokenId, TokenKind,
};
use crate::events::{GameEvent, PoiEventKind, TokenChange};

use super::walls::WallTable;

#[derive(Clone, Debug, PartialEq, Eq)]
struct Placement {
    cell: Cell,
    token: Token,
}

/// The game board.
///
/// ```
/// use fire_rescue::board::Board;
/// use fire_rescue::core::{BoardSize, Cell, Threat, TokenKind};
///
/// let mut board = Board::new(BoardSize::new(10, 8));
/// let smoke = board.mint(TokenKind::Threat(Threat::Smoke));
/// assert!(board.add_threat_token(Cell::new(2, 2), smoke));
///
/// // One threat per cell.
/// let fire = board.mint(TokenKind::Threat(Threat::Fire));
/// assert!(!board.add_threat_token(Cell::new(2, 2), fire));
/// assert_eq!(board.threat_at(Cell::new(2, 2)), Some(Threat::Smoke));
/// ```
#[derive(Clone, Debug)]
pub struct Board {
    size: BoardSize,
    walls: WallTable,

    /// Token locations: token_id -> (cell, token)
    locations: FxHashMap<TokenId, Placement>,

    players: FxHashMap<Cell, TokenId>,
    threats: FxHashMap<Cell, TokenId>,
    pois: FxHashMap<Cell, TokenId>,

    next_token_id: u32,
    outbox: Vec<GameEvent>,
}

impl Board {
    /// Create an empty board with no walls.
    #[must_use]
    pub fn new(size: BoardSize) -> Self {
        Self {
            size,
            walls: WallTable::open(size),
            locations: FxHashMap::default(),
            players: FxHashMap::default(),
            threats: FxHashMap::default(),
            pois: FxHashMap::default(),
            next_token_id: 0,
            outbox: Vec::new(),
        }
    }

    #[must_use]
    pub fn size(&self) -> BoardSize {
        self.size
    }

    #[must_use]
    pub fn walls(&self) -> &WallTable {
        &self.walls
    }

    /// Install a wall table and place one wall marker token per cell.
    ///
    /// Markers from a previous table are removed first. Panics if the
    /// table does not match the board size.
    pub fn add_walls(&mut self, walls: WallTable) {
        assert_eq!(
            walls.size(),
            self.size,
            "Wall table size does not match the board"
        );

        let old_markers: Vec<TokenId> = self
            .locations
            .values()
            .filter(|p| matches!(p.token.kind, TokenKind::Wall { .. }))
            .map(|p| p.token.id)
            .collect();
        for id in old_markers {
            self.remove_token(id);
        }

        for cell in self.size.cells() {
            let blocked = walls.blocked_directions(cell);
            let marker = self.mint(TokenKind::Wall { blocked });
            self.add_token(cell, marker);
        }
        self.walls = walls;
    }

    /// Create a new token with a fresh id. The token is not on the board yet.
    pub fn mint(&mut self, kind: TokenKind) -> Token {
        let id = TokenId(self.next_token_id);
        self.next_token_id += 1;
        Token { id, kind }
    }

    // === Single mutation path ===

    fn layer_index(&self, layer: Layer) -> &FxHashMap<Cell, TokenId> {
        match layer {
            Layer::Player => &self.players,
            Layer::Threat => &self.threats,
            Layer::Poi => &self.pois,
        }
    }

    fn layer_index_mut(&mut self, layer: Layer) -> &mut FxHashMap<Cell, TokenId> {
        match layer {
            Layer::Player => &mut self.players,
            Layer::Threat => &mut self.threats,
            Layer::Poi => &mut self.pois,
        }
    }

    fn attach(&mut self, cell: Cell, token: Token, change: TokenChange) {
        self.size.assert_contains(cell);
        if self.locations.contains_key(&token.id) {
            panic!("Token {} is already on the board", token.id);
        }

        if let Some(layer) = token.layer() {
            let previous = self.layer_index_mut(layer).insert(cell, token.id);
            assert!(
                previous.is_none(),
                "Cell {} already holds a {:?} token",
                cell,
                layer
            );
        }

        self.outbox.push(GameEvent::TokenChanged {
            cell,
            token: token.clone(),
            change,
        });
        self.locations.insert(token.id, Placement { cell, token });
    }

    fn detach(&mut self, id: TokenId) -> Option<Placement> {
        let placement = self.locations.remove(&id)?;
        if let Some(layer) = placement.token.layer() {
            let removed = self.layer_index_mut(layer).remove(&placement.cell);
            debug_assert_eq!(removed, Some(id));
        }
        Some(placement)
    }

    // === Adding and removing ===

    /// Add a layerless token (a wall marker) without any occupancy check.
    ///
    /// Unlike a general unconditional adder, this refuses layered tokens:
    /// player, threat and POI tokens must go through their typed adders so
    /// the one-per-cell layer rule holds. Passing one here panics.
    pub fn add_token(&mut self, cell: Cell, token: Token) {
        if let Some(layer) = token.layer() {
            panic!("Token {} lives in the {:?} layer, use its typed adder", token.id, layer);
        }
        self.attach(cell, token, TokenChange::Add);
    }

    /// Add a player token. Fails if another player stands on `cell`.
    pub fn add_player_token(&mut self, cell: Cell, token: Token) -> bool {
        assert!(token.player().is_some(), "Token {} is not a player token", token.id);
        self.size.assert_contains(cell);
        if self.players.contains_key(&cell) {
            return false;
        }
        self.attach(cell, token, TokenChange::Add);
        true
    }

    /// Add smoke or fire. Fails if `cell` already holds a threat.
    pub fn add_threat_token(&mut self, cell: Cell, token: Token) -> bool {
        assert!(token.threat().is_some(), "Token {} is not a threat token", token.id);
        self.size.assert_contains(cell);
        if self.threats.contains_key(&cell) {
            return false;
        }
        self.attach(cell, token, TokenChange::Add);
        true
    }

    /// Add a POI. Fails if `cell` already holds a POI, or holds fire and
    /// `replace_fire` is false. With `replace_fire` the fire stays put.
    pub fn add_poi_token(&mut self, cell: Cell, token: Token, replace_fire: bool) -> bool {
        assert!(token.poi().is_some(), "Token {} is not a POI token", token.id);
        self.size.assert_contains(cell);
        if self.pois.contains_key(&cell) {
            return false;
        }
        if self.is_fire_at(cell) && !replace_fire {
            return false;
        }
        self.attach(cell, token, TokenChange::Add);
        true
    }

    /// Remove a token from the board and hand it back.
    ///
    /// Returns `None` if the token was not on the board.
    pub fn remove_token(&mut self, id: TokenId) -> Option<Token> {
        let Placement { cell, token } = self.detach(id)?;
        self.outbox.push(GameEvent::TokenChanged {
            cell,
            token: token.clone(),
            change: TokenChange::Remove,
        });
        Some(token)
    }

    /// Remove whatever threat sits on `cell`.
    pub fn remove_threat_at(&mut self, cell: Cell) -> Option<Token> {
        self.size.assert_contains(cell);
        let id = self.threats.get(&cell).copied()?;
        self.remove_token(id)
    }

    /// Replace the threat on `cell` (if any) with a fresh `threat` token.
    pub fn set_threat(&mut self, cell: Cell, threat: Threat) -> TokenId {
        self.remove_threat_at(cell);
        let token = self.mint(TokenKind::Threat(threat));
        let id = token.id;
        let added = self.add_threat_token(cell, token);
        debug_assert!(added);
        id
    }

    // === Moving ===

    /// Move a player token to `cell`.
    ///
    /// Fails if another player occupies `cell`. Panics if `cell` is off the
    /// board or `id` is not a player token on the board.
    pub fn move_player_token(&mut self, cell: Cell, id: TokenId) -> bool {
        self.size.assert_contains(cell);
        let from = self.expect_location(id);
        assert!(
            self.locations[&id].token.player().is_some(),
            "Token {} is not a player token",
            id
        );
        if from == cell {
            return true;
        }
        if self.players.contains_key(&cell) {
            return false;
        }
        if let Some(Placement { token, .. }) = self.detach(id) {
            self.attach(cell, token, TokenChange::Move);
        }
        true
    }

    /// Move a POI token to `cell`.
    ///
    /// Fails if `cell` already holds a POI or is on fire.
    pub fn move_poi_token(&mut self, id: TokenId, cell: Cell) -> bool {
        self.size.assert_contains(cell);
        self.expect_location(id);
        if self.pois.contains_key(&cell) || self.is_fire_at(cell) {
            return false;
        }
        if let Some(Placement { token, .. }) = self.detach(id) {
            self.attach(cell, token, TokenChange::Move);
        }
        true
    }

    // === Movement legality ===

    /// The in-bounds 4-neighbors of `cell`.
    #[must_use]
    pub fn adjacent_cells(&self, cell: Cell) -> Neighbors {
        self.size.assert_contains(cell);
        self.size.neighbors(cell)
    }

    /// Can a player token physically step from `from` to the adjacent `to`?
    ///
    /// True iff the wall edge is open in that direction and no player stands
    /// on `to`. Fire and AP are not considered. Panics if the cells are not
    /// adjacent.
    #[must_use]
    pub fn is_movable(&self, from: Cell, to: Cell) -> bool {
        self.size.assert_contains(from);
        self.size.assert_contains(to);
        let dir = from
            .direction_to(to)
            .unwrap_or_else(|| panic!("Cells {} and {} are not adjacent", from, to));
        self.walls.is_passable(from, dir) && !self.players.contains_key(&to)
    }

    /// Cells the token could step into from where it stands.
    #[must_use]
    pub fn possible_moves(&self, id: TokenId) -> Neighbors {
        let from = self.expect_location(id);
        self.adjacent_cells(from)
            .into_iter()
            .filter(|&to| self.is_movable(from, to))
            .collect()
    }

    // === Queries ===

    fn expect_location(&self, id: TokenId) -> Cell {
        self.location(id)
            .unwrap_or_else(|| panic!("Token {} is not on the board", id))
    }

    /// Where a token is, if it is on the board.
    #[must_use]
    pub fn location(&self, id: TokenId) -> Option<Cell> {
        self.locations.get(&id).map(|p| p.cell)
    }

    #[must_use]
    pub fn token(&self, id: TokenId) -> Option<&Token> {
        self.locations.get(&id).map(|p| &p.token)
    }

    #[must_use]
    pub fn contains(&self, id: TokenId) -> bool {
        self.locations.contains_key(&id)
    }

    #[must_use]
    pub fn token_count(&self) -> usize {
        self.locations.len()
    }

    /// Every token on the board with its cell, in no particular order.
    pub fn tokens(&self) -> impl Iterator<Item = (Cell, &Token)> {
        self.locations.values().map(|p| (p.cell, &p.token))
    }

    fn layer_token_at(&self, layer: Layer, cell: Cell) -> Option<&Token> {
        self.size.assert_contains(cell);
        let id = self.layer_index(layer).get(&cell)?;
        self.token(*id)
    }

    #[must_use]
    pub fn player_at(&self, cell: Cell) -> Option<&Token> {
        self.layer_token_at(Layer::Player, cell)
    }

    #[must_use]
    pub fn threat_token_at(&self, cell: Cell) -> Option<&Token> {
        self.layer_token_at(Layer::Threat, cell)
    }

    #[must_use]
    pub fn threat_at(&self, cell: Cell) -> Option<Threat> {
        self.threat_token_at(cell).and_then(Token::threat)
    }

    #[must_use]
    pub fn is_fire_at(&self, cell: Cell) -> bool {
        self.threat_at(cell) == Some(Threat::Fire)
    }

    #[must_use]
    pub fn poi_at(&self, cell: Cell) -> Option<&Token> {
        self.layer_token_at(Layer::Poi, cell)
    }

    /// Cells holding `threat`, sorted.
    #[must_use]
    pub fn cells_with(&self, threat: Threat) -> Vec<Cell> {
        let mut cells: Vec<Cell> = self
            .threats
            .iter()
            .filter(|(_, id)| self.token(**id).and_then(Token::threat) == Some(threat))
            .map(|(cell, _)| *cell)
            .collect();
        cells.sort();
        cells
    }

    /// All POIs on the board with their cells, sorted by cell.
    #[must_use]
    pub fn pois(&self) -> Vec<(Cell, &Token)> {
        let mut pois: Vec<(Cell, &Token)> = self
            .pois
            .iter()
            .filter_map(|(cell, id)| self.token(*id).map(|t| (*cell, t)))
            .collect();
        pois.sort_by_key(|(cell, _)| *cell);
        pois
    }

    /// The revealed victim on `cell`, if any.
    #[must_use]
    pub fn victim_at(&self, cell: Cell) -> Option<TokenId> {
        self.poi_at(cell)
            .filter(|t| t.poi().is_some_and(Poi::is_revealed_victim))
            .map(|t| t.id)
    }

    /// The revealed victim sharing a cell with the given player token.
    #[must_use]
    pub fn victim_at_player(&self, player_token: TokenId) -> Option<TokenId> {
        self.victim_at(self.expect_location(player_token))
    }

    // === Points of interest ===

    /// Turn a hidden POI face up in place.
    ///
    /// The hidden token leaves the board and a new revealed token takes its
    /// cell. Returns `None` if `id` is not a hidden POI on the board.
    pub fn flip_poi(&mut self, id: TokenId) -> Option<Token> {
        let poi = self.token(id)?.poi()?;
        if !poi.is_hidden() {
            return None;
        }
        let cell = self.location(id)?;
        self.remove_token(id);

        let revealed = self.mint(TokenKind::Poi(poi.flip()));
        let added = self.add_poi_token(cell, revealed.clone(), true);
        debug_assert!(added);
        log::debug!("Flipped POI at {}: {:?}", cell, poi.face());
        Some(revealed)
    }

    fn take_poi(&mut self, id: TokenId, kind: PoiEventKind) -> bool {
        if self.token(id).and_then(Token::poi).is_none() {
            return false;
        }
        let Some(token) = self.remove_token(id) else {
            return false;
        };
        self.outbox.push(GameEvent::Poi { token, kind });
        true
    }

    /// Take a POI off the board as rescued.
    pub fn rescue_poi(&mut self, id: TokenId) -> bool {
        self.take_poi(id, PoiEventKind::Rescued)
    }

    /// Take a POI off the board as killed.
    pub fn kill_poi(&mut self, id: TokenId) -> bool {
        self.take_poi(id, PoiEventKind::Killed)
    }

    /// Rescue every revealed victim standing on the edge of the board.
    pub fn check_rescued_victims(&mut self) -> Vec<TokenId> {
        let size = self.size;
        let on_edge: Vec<TokenId> = self
            .pois()
            .into_iter()
            .filter(|(cell, token)| {
                size.is_edge(*cell) && token.poi() == Some(Poi::Revealed(PoiFace::Victim))
            })
            .map(|(_, token)| token.id)
            .collect();

        for &id in &on_edge {
            log::debug!("Victim {} reached the edge", id);
            self.rescue_poi(id);
        }
        on_edge
    }

    // === Events ===

    pub(crate) fn queue_event(&mut self, event: GameEvent) {
        self.outbox.push(event);
    }

    /// Events queued since the last call to `take_events`.
    #[must_use]
    pub fn pending_events(&self) -> &[GameEvent] {
        &self.outbox
    }

    /// Drain the event outbox.
    pub fn take_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.outbox)
    }

    // === Invariants ===

    /// Check that the layer indices and the location map agree.
    #[must_use]
    pub fn is_consistent(&self) -> bool {
        let layers_point_home = [Layer::Player, Layer::Threat, Layer::Poi]
            .into_iter()
            .all(|layer| {
                self.layer_index(layer).iter().all(|(cell, id)| {
                    self.locations
                        .get(id)
                        .is_some_and(|p| p.cell == *cell && p.token.layer() == Some(layer))
                })
            });

        let tokens_indexed = self.locations.iter().all(|(id, p)| {
            self.size.contains(p.cell)
                && p.token.id == *id
                && match p.token.layer() {
                    Some(layer) => self.layer_index(layer).get(&p.cell) == Some(id),
                    None => true,
                }
        });

        layers_point_home && tokens_indexed
    }
}

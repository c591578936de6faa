use crate::{Fleet, Planet, PlanetId, Snapshot, Turns};

/// Concrete snapshot: planets indexed by id, fleets in wire order.
///
/// Distances are `ceil(euclidean)` between planet positions, the same rule the game server uses
/// for trip lengths.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GameState {
    planets: Vec<Planet>,
    fleets: Vec<Fleet>,
    overrides: Vec<(PlanetId, PlanetId, Turns)>,
}

impl GameState {
    /// Planets must be supplied with ids `0..n` in order.
    pub fn new(planets: Vec<Planet>, fleets: Vec<Fleet>) -> Self {
        for (i, planet) in planets.iter().enumerate() {
            assert_eq!(
                planet.id.index(),
                i,
                "planet ids must match their position in the snapshot"
            );
        }
        Self {
            planets,
            fleets,
            overrides: Vec::new(),
        }
    }

    /// Pin the distance between two planets, independent of their positions.
    ///
    /// Used by tests and tooling that lay out maps by trip length instead of coordinates. The
    /// override is stored symmetrically.
    pub fn with_distance(mut self, a: PlanetId, b: PlanetId, turns: Turns) -> Self {
        self.overrides.retain(|&(x, y, _)| !((x == a && y == b) || (x == b && y == a)));
        self.overrides.push((a, b, turns));
        self
    }

    pub fn planet_count(&self) -> usize {
        self.planets.len()
    }

    pub fn fleet_count(&self) -> usize {
        self.fleets.len()
    }

    fn euclidean(&self, a: PlanetId, b: PlanetId) -> Turns {
        let (Some(pa), Some(pb)) = (self.planets.get(a.index()), self.planets.get(b.index()))
        else {
            panic!("distance queried for unknown planet ({a}, {b})");
        };
        let dx = pa.x - pb.x;
        let dy = pa.y - pb.y;
        (dx * dx + dy * dy).sqrt().ceil() as Turns
    }
}

impl Snapshot for GameState {
    fn planets(&self) -> &[Planet] {
        &self.planets
    }

    fn fleets(&self) -> &[Fleet] {
        &self.fleets
    }

    fn planet(&self, id: PlanetId) -> Option<&Planet> {
        self.planets.get(id.index())
    }

    fn distance(&self, a: PlanetId, b: PlanetId) -> Turns {
        if a == b {
            return 0;
        }
        self.overrides
            .iter()
            .find(|&&(x, y, _)| (x == a && y == b) || (x == b && y == a))
            .map(|&(_, _, turns)| turns)
            .unwrap_or_else(|| self.euclidean(a, b))
    }
}

use crate::core::catalog::records::LevelRecord;
use std::fmt;

/// Stable external identifier of an atomic state.
///
/// Assigned at catalog load time as the state's position in the raw level
/// list and never changed afterwards, so that user-supplied state subsets and
/// the transition catalog can reference states durably across filtering and
/// reordering. Not to be confused with the volatile dense [`State::pos`]
/// index, which is rebuilt by the position indexer after every mutation of
/// the state list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StateId(pub usize);

impl fmt::Display for StateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Angular-momentum resolution of the tracked state set.
///
/// Selects which variant of the atomic-structure catalog is loaded: states
/// grouped by principal quantum number only, additionally resolved by orbital
/// angular momentum `l`, or fully resolved by total angular momentum `j`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Resolution {
    /// States grouped by principal quantum number `n` only.
    #[default]
    N,
    /// States additionally resolved by orbital angular momentum `l`.
    Nl,
    /// States additionally resolved by total angular momentum `j` (implies `l`).
    Nlj,
}

impl Resolution {
    /// Derives the resolution from the two user-facing resolve flags.
    ///
    /// Resolving by `j` implies resolving by `l`.
    pub fn from_flags(resolve_l: bool, resolve_j: bool) -> Self {
        if resolve_j {
            Resolution::Nlj
        } else if resolve_l {
            Resolution::Nl
        } else {
            Resolution::N
        }
    }

    /// Suffix used by the catalog file naming scheme for this variant.
    pub fn catalog_suffix(&self) -> &'static str {
        match self {
            Resolution::N => "n",
            Resolution::Nl => "nl",
            Resolution::Nlj => "nlj",
        }
    }
}

/// One tracked atomic level (or level group) of one ionization stage.
///
/// Identity and physical attributes come straight from the catalog; the
/// `ground`, `iz_energy` and `energy_from_gs` fields are derived from
/// relationships between states after the user filter has been applied, and
/// `pos` is assigned by the position indexer.
#[derive(Debug, Clone, PartialEq)]
pub struct State {
    /// Stable external identifier (equal to the raw catalog position).
    pub id: StateId,
    /// Ionization stage; 0 = neutral.
    pub z: u32,
    /// Principal quantum number, when the catalog provides one.
    pub n: Option<u32>,
    /// Orbital angular momentum quantum number (`l`-resolved catalogs).
    pub l: Option<u32>,
    /// Total angular momentum quantum number (`j`-resolved catalogs).
    pub j: Option<f64>,
    /// Electronic configuration label, when the catalog provides one.
    pub config: Option<String>,
    /// Absolute level energy in eV.
    pub energy: f64,
    /// Statistical weight (degeneracy) of the level.
    pub stat_weight: f64,
    /// True iff this is the minimum-energy state of its ionization stage.
    pub ground: bool,
    /// Energy gap to the ground state of stage `z + 1`, in eV.
    ///
    /// Zero for the fully-stripped top stage. Negative for states lying above
    /// their stage's ionization threshold, which are only reachable via
    /// autoionization.
    pub iz_energy: f64,
    /// Energy above the ground state of this state's own stage, in eV.
    pub energy_from_gs: f64,
    /// Dense zero-based index into the current evolved-state ordering.
    ///
    /// Rebuilt by the position indexer whenever the state list is mutated or
    /// reordered; never stable across mutations (unlike [`State::id`]).
    pub pos: usize,
}

impl State {
    /// Materializes a state from a raw catalog record.
    ///
    /// Derived fields start at their neutral defaults and are filled in by the
    /// catalog loader and position indexer.
    pub fn from_record(id: StateId, record: &LevelRecord) -> Self {
        Self {
            id,
            z: record.z,
            n: record.n,
            l: record.l,
            j: record.j,
            config: record.config.clone(),
            energy: record.energy,
            stat_weight: record.stat_weight,
            ground: false,
            iz_energy: 0.0,
            energy_from_gs: 0.0,
            pos: 0,
        }
    }
}

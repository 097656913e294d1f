//! Branch prediction subsystem: BTB and tournament direction predictor.

/// Branch Target Buffer.
pub mod btb;
/// Tournament (bimodal + gshare) direction predictor.
pub mod tournament;

pub use btb::Btb;
pub use tournament::TournamentPredictor;

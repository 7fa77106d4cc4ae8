//! Mass-window discriminant
//!
//! Signal events cluster around the Higgs mass, so the score is the negative
//! distance of `DER_mass_MMC` from it: larger is more signal-like and the
//! maximum is 0.

use crate::event::Event;
use crate::schema::MASS_MMC_INDEX;

/// Centre of the mass window in GeV
pub const MASS_REFERENCE: f64 = 125.0;

/// Discriminant for a single event, read from the designated mass feature
pub fn score(evt: &Event) -> f64 {
    -(evt.features()[MASS_MMC_INDEX] - MASS_REFERENCE).abs()
}

/// Attach a score to every event
pub fn score_all(events: &mut [Event]) {
    for evt in events.iter_mut() {
        evt.score = score(evt);
    }
}

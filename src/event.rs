//! Decoded collision event

use crate::schema::FEATURE_COUNT;

/// Truth label code for signal events
pub const SIGNAL_LABEL: &str = "s";

/// Truth label code for background events
pub const BACKGROUND_LABEL: &str = "b";

/// Evaluation subset an event belongs to, from its `KaggleSet` code
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Partition {
    /// `t`
    Training,
    /// `b`, the public leaderboard subset
    Public,
    /// `v`, the private leaderboard subset
    Private,
    /// `u`
    Unused,
    /// Row carried no metadata group
    Untagged,
    /// Any other code
    Other,
}

impl Partition {
    pub fn from_code(code: &str) -> Self {
        match code {
            "t" => Partition::Training,
            "b" => Partition::Public,
            "v" => Partition::Private,
            "u" => Partition::Unused,
            "" => Partition::Untagged,
            _ => Partition::Other,
        }
    }
}

/// One row of the dataset.
///
/// Field values equal to the `-999.0` sentinel are kept as ordinary floats.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Event {
    pub event_id: i64,

    pub der_mass_mmc: f64,
    pub der_mass_transverse_met_lep: f64,
    pub der_mass_vis: f64,
    pub der_pt_h: f64,
    pub der_deltaeta_jet_jet: f64,
    pub der_mass_jet_jet: f64,
    pub der_prodeta_jet_jet: f64,
    pub der_deltar_tau_lep: f64,
    pub der_pt_tot: f64,
    pub der_sum_pt: f64,
    pub der_pt_ratio_lep_tau: f64,
    pub der_met_phi_centrality: f64,
    pub der_lep_eta_centrality: f64,
    pub pri_tau_pt: f64,
    pub pri_tau_eta: f64,
    pub pri_tau_phi: f64,
    pub pri_lep_pt: f64,
    pub pri_lep_eta: f64,
    pub pri_lep_phi: f64,
    pub pri_met: f64,
    pub pri_met_phi: f64,
    pub pri_met_sumet: f64,
    pub pri_jet_num: i64,
    pub pri_jet_leading_pt: f64,
    pub pri_jet_leading_eta: f64,
    pub pri_jet_leading_phi: f64,
    pub pri_jet_subleading_pt: f64,
    pub pri_jet_subleading_eta: f64,
    pub pri_jet_subleading_phi: f64,
    pub pri_jet_all_pt: f64,

    /// Event weight, 0 when the row has no metadata group
    pub weight: f64,
    /// Truth label code, empty when absent
    pub label: String,
    /// Partition code, empty when absent
    pub kaggle_set: String,
    /// Weight normalised to the Kaggle subset
    pub kaggle_weight: f64,

    /// Discriminant, attached after decoding
    pub score: f64,
}

impl Event {
    pub fn is_signal(&self) -> bool {
        self.label == SIGNAL_LABEL
    }

    pub fn is_background(&self) -> bool {
        self.label == BACKGROUND_LABEL
    }

    pub fn partition(&self) -> Partition {
        Partition::from_code(&self.kaggle_set)
    }

    /// Feature vector in schema order, with the jet count widened to a float
    pub fn features(&self) -> [f64; FEATURE_COUNT] {
        [
            self.der_mass_mmc,
            self.der_mass_transverse_met_lep,
            self.der_mass_vis,
            self.der_pt_h,
            self.der_deltaeta_jet_jet,
            self.der_mass_jet_jet,
            self.der_prodeta_jet_jet,
            self.der_deltar_tau_lep,
            self.der_pt_tot,
            self.der_sum_pt,
            self.der_pt_ratio_lep_tau,
            self.der_met_phi_centrality,
            self.der_lep_eta_centrality,
            self.pri_tau_pt,
            self.pri_tau_eta,
            self.pri_tau_phi,
            self.pri_lep_pt,
            self.pri_lep_eta,
            self.pri_lep_phi,
            self.pri_met,
            self.pri_met_phi,
            self.pri_met_sumet,
            self.pri_jet_num as f64,
            self.pri_jet_leading_pt,
            self.pri_jet_leading_eta,
            self.pri_jet_leading_phi,
            self.pri_jet_subleading_pt,
            self.pri_jet_subleading_eta,
            self.pri_jet_subleading_phi,
            self.pri_jet_all_pt,
        ]
    }

    /// Mandatory columns rendered back to text in schema order
    pub fn to_row(&self) -> Vec<String> {
        let mut row = Vec::with_capacity(1 + FEATURE_COUNT);
        row.push(self.event_id.to_string());
        for (i, value) in self.features().iter().enumerate() {
            if i == crate::schema::JET_NUM_INDEX {
                row.push(self.pri_jet_num.to_string());
            } else {
                row.push(value.to_string());
            }
        }
        row
    }
}

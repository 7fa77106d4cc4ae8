//! Fixed column layout of the ATLAS Higgs challenge dataset
//!
//! The header of an input file must match [`SCHEMA`] position by position for
//! as many columns as it carries. The first [`MANDATORY_COLUMNS`] entries are
//! the event id and the feature vector; the trailing [`METADATA_COLUMNS`]
//! entries are only present in labelled files.

/// How a column is decoded
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Signed integer (`EventId`, `PRI_jet_num`)
    Int,
    /// 64-bit float
    Float,
    /// Short string code kept verbatim (`Label`, `KaggleSet`)
    Text,
}

/// A named column at a fixed position
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Field {
    pub name: &'static str,
    pub kind: FieldKind,
}

const fn int(name: &'static str) -> Field {
    Field {
        name,
        kind: FieldKind::Int,
    }
}

const fn float(name: &'static str) -> Field {
    Field {
        name,
        kind: FieldKind::Float,
    }
}

const fn text(name: &'static str) -> Field {
    Field {
        name,
        kind: FieldKind::Text,
    }
}

/// Number of `DER_*`/`PRI_*` feature columns
pub const FEATURE_COUNT: usize = 30;

/// Id column plus the feature vector
pub const MANDATORY_COLUMNS: usize = 1 + FEATURE_COUNT;

/// `Weight`, `Label`, `KaggleSet`, `KaggleWeight`
pub const METADATA_COLUMNS: usize = 4;

/// Extra columns beyond the mandatory portion needed to decode the metadata group
pub const METADATA_TRIGGER: usize = 3;

/// Position of `DER_mass_MMC`, the primary invariant-mass estimator, inside the feature vector
pub const MASS_MMC_INDEX: usize = 0;

/// Position of `PRI_jet_num` inside the feature vector
pub const JET_NUM_INDEX: usize = 22;

/// Column layout in file order
pub const SCHEMA: [Field; MANDATORY_COLUMNS + METADATA_COLUMNS] = [
    int("EventId"),
    float("DER_mass_MMC"),
    float("DER_mass_transverse_met_lep"),
    float("DER_mass_vis"),
    float("DER_pt_h"),
    float("DER_deltaeta_jet_jet"),
    float("DER_mass_jet_jet"),
    float("DER_prodeta_jet_jet"),
    float("DER_deltar_tau_lep"),
    float("DER_pt_tot"),
    float("DER_sum_pt"),
    float("DER_pt_ratio_lep_tau"),
    float("DER_met_phi_centrality"),
    float("DER_lep_eta_centrality"),
    float("PRI_tau_pt"),
    float("PRI_tau_eta"),
    float("PRI_tau_phi"),
    float("PRI_lep_pt"),
    float("PRI_lep_eta"),
    float("PRI_lep_phi"),
    float("PRI_met"),
    float("PRI_met_phi"),
    float("PRI_met_sumet"),
    int("PRI_jet_num"),
    float("PRI_jet_leading_pt"),
    float("PRI_jet_leading_eta"),
    float("PRI_jet_leading_phi"),
    float("PRI_jet_subleading_pt"),
    float("PRI_jet_subleading_eta"),
    float("PRI_jet_subleading_phi"),
    float("PRI_jet_all_pt"),
    float("Weight"),
    text("Label"),
    text("KaggleSet"),
    float("KaggleWeight"),
];

/// Column names in file order
pub fn names() -> impl Iterator<Item = &'static str> {
    SCHEMA.iter().map(|f| f.name)
}

/// Full header line, comma separated
pub fn header_line() -> String {
    names().collect::<Vec<_>>().join(",")
}

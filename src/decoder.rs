//! Schema-validated decoding of event CSV files
//!
//! [`Decoder`] wraps a [`csv::Reader`] and yields one [`Event`] per data row.
//! The header row is checked against [`crate::schema::SCHEMA`] before the
//! first event is produced, and end of input simply ends the sequence.
//!
//! # Example
//!
//! ```
//! use higgsml::decoder::Decoder;
//!
//! let header = higgsml::schema::header_line();
//! let row = "100000,138.47,51.655,97.827,27.98,0.91,124.711,2.666,3.064,41.928,\
//!            197.76,1.582,1.396,0.2,32.638,1.017,0.381,51.626,2.273,-2.414,\
//!            16.824,-0.277,258.733,2,67.435,2.15,0.444,46.062,1.24,-2.475,113.497";
//! let input = format!("{header}\n{row}\n");
//!
//! let events = Decoder::new(input.as_bytes()).decode_all().unwrap();
//! assert_eq!(events.len(), 1);
//! assert_eq!(events[0].event_id, 100000);
//! ```

use crate::error::{HiggsError, Result};
use crate::event::Event;
use crate::schema::{FieldKind, MANDATORY_COLUMNS, METADATA_TRIGGER, SCHEMA};
use std::io::Read;
use tracing::{debug, trace};

/// Streaming decoder over a comma separated event source
pub struct Decoder<R: Read> {
    reader: csv::Reader<R>,
    record: csv::StringRecord,
    header_checked: bool,
    /// First header mismatch, replayed on every later call
    mismatch: Option<(usize, &'static str, String)>,
    exhausted: bool,
}

impl<R: Read> Decoder<R> {
    /// Create a decoder reading from `source`
    pub fn new(source: R) -> Self {
        let reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_reader(source);
        Self {
            reader,
            record: csv::StringRecord::new(),
            header_checked: false,
            mismatch: None,
            exhausted: false,
        }
    }

    /// Read the header row and check it against the schema.
    ///
    /// Only the first `min(schema, row)` positions are compared, so a header
    /// without the metadata columns is valid. Calling this again after a
    /// successful check is a no-op; after a mismatch it returns the same
    /// [`HiggsError::SchemaMismatch`] without reading further.
    pub fn validate_header(&mut self) -> Result<()> {
        if let Some((position, expected, actual)) = &self.mismatch {
            return Err(HiggsError::SchemaMismatch {
                position: *position,
                expected: expected.to_string(),
                actual: actual.clone(),
            });
        }
        if self.header_checked {
            return Ok(());
        }
        if !self.reader.read_record(&mut self.record)? {
            self.header_checked = true;
            self.exhausted = true;
            return Ok(());
        }

        let pairs = SCHEMA.iter().zip(self.record.iter());
        for (position, (field, actual)) in pairs.enumerate() {
            if field.name != actual {
                self.exhausted = true;
                self.mismatch = Some((position, field.name, actual.to_string()));
                return Err(HiggsError::SchemaMismatch {
                    position,
                    expected: field.name.to_string(),
                    actual: actual.to_string(),
                });
            }
        }

        debug!(columns = self.record.len(), "header matches schema");
        self.header_checked = true;
        Ok(())
    }

    /// Decode the next data row, or `None` at end of input
    pub fn decode_next(&mut self) -> Result<Option<Event>> {
        self.validate_header()?;
        if self.exhausted || !self.reader.read_record(&mut self.record)? {
            self.exhausted = true;
            return Ok(None);
        }

        let row = self.record.position().map(|p| p.line()).unwrap_or(0);
        if self.record.len() < MANDATORY_COLUMNS {
            return Err(HiggsError::MissingColumns {
                row,
                expected: MANDATORY_COLUMNS,
                actual: self.record.len(),
            });
        }

        let mut cols = Columns {
            record: &self.record,
            row,
            index: 0,
        };
        let mut evt = Event {
            event_id: cols.int()?,
            der_mass_mmc: cols.float()?,
            der_mass_transverse_met_lep: cols.float()?,
            der_mass_vis: cols.float()?,
            der_pt_h: cols.float()?,
            der_deltaeta_jet_jet: cols.float()?,
            der_mass_jet_jet: cols.float()?,
            der_prodeta_jet_jet: cols.float()?,
            der_deltar_tau_lep: cols.float()?,
            der_pt_tot: cols.float()?,
            der_sum_pt: cols.float()?,
            der_pt_ratio_lep_tau: cols.float()?,
            der_met_phi_centrality: cols.float()?,
            der_lep_eta_centrality: cols.float()?,
            pri_tau_pt: cols.float()?,
            pri_tau_eta: cols.float()?,
            pri_tau_phi: cols.float()?,
            pri_lep_pt: cols.float()?,
            pri_lep_eta: cols.float()?,
            pri_lep_phi: cols.float()?,
            pri_met: cols.float()?,
            pri_met_phi: cols.float()?,
            pri_met_sumet: cols.float()?,
            pri_jet_num: cols.int()?,
            pri_jet_leading_pt: cols.float()?,
            pri_jet_leading_eta: cols.float()?,
            pri_jet_leading_phi: cols.float()?,
            pri_jet_subleading_pt: cols.float()?,
            pri_jet_subleading_eta: cols.float()?,
            pri_jet_subleading_phi: cols.float()?,
            pri_jet_all_pt: cols.float()?,
            ..Default::default()
        };

        if self.record.len() >= MANDATORY_COLUMNS + METADATA_TRIGGER {
            evt.weight = cols.float()?;
            evt.label = cols.text();
            evt.kaggle_set = cols.text();
            // KaggleWeight is optional in files that stop after KaggleSet
            if cols.remaining() > 0 {
                evt.kaggle_weight = cols.float()?;
            }
        }

        trace!(event_id = evt.event_id, row, "decoded event");
        Ok(Some(evt))
    }

    /// Decode every remaining row into memory
    pub fn decode_all(mut self) -> Result<Vec<Event>> {
        let mut events = Vec::with_capacity(1024);
        while let Some(evt) = self.decode_next()? {
            events.push(evt);
        }
        debug!(count = events.len(), "decoded all events");
        Ok(events)
    }
}

impl<R: Read> Iterator for Decoder<R> {
    type Item = Result<Event>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.exhausted {
            return None;
        }
        match self.decode_next() {
            Ok(evt) => evt.map(Ok),
            Err(e) => {
                // the stream cannot resume after a failed row
                self.exhausted = true;
                Some(Err(e))
            }
        }
    }
}

/// Positional cursor over one row, typed by the schema
struct Columns<'a> {
    record: &'a csv::StringRecord,
    row: u64,
    index: usize,
}

impl<'a> Columns<'a> {
    fn remaining(&self) -> usize {
        self.record.len().min(SCHEMA.len()).saturating_sub(self.index)
    }

    fn take(&mut self, kind: FieldKind) -> (&'static str, &'a str) {
        let field = &SCHEMA[self.index];
        debug_assert_eq!(field.kind, kind, "schema kind for {}", field.name);
        let value = self.record.get(self.index).unwrap_or_default();
        self.index += 1;
        (field.name, value)
    }

    fn int(&mut self) -> Result<i64> {
        let row = self.row;
        let (field, value) = self.take(FieldKind::Int);
        value.parse::<i64>().map_err(|e| HiggsError::Parse {
            row,
            field,
            value: value.to_string(),
            reason: e.to_string(),
        })
    }

    fn float(&mut self) -> Result<f64> {
        let row = self.row;
        let (field, value) = self.take(FieldKind::Float);
        value.parse::<f64>().map_err(|e| HiggsError::Parse {
            row,
            field,
            value: value.to_string(),
            reason: e.to_string(),
        })
    }

    fn text(&mut self) -> String {
        self.take(FieldKind::Text).1.to_string()
    }
}

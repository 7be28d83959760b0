//! Field extraction and validation for submitted forms.

use crate::{FieldMapping, StoreId, SubmissionEvent, ValidationError, VehicleNumber};

/// The two fields the relay forwards, both present and valid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MappedSubmission {
    /// Store resolved from the selection answer.
    pub store_id: StoreId,
    /// Trimmed vehicle number.
    pub vehicle_number: VehicleNumber,
}

impl FieldMapping {
    /// Maps a store selection answer to a store.
    ///
    /// Substring match, first hit wins: `"A"` or the A synonym is checked
    /// before `"B"` or the B synonym, so an ambiguous `"A/B 매장"` selects A.
    pub fn store_from_selection(&self, selection: &str) -> Option<StoreId> {
        if selection.contains('A') || selection.contains(self.store_a_synonym) {
            Some(StoreId::A)
        } else if selection.contains('B') || selection.contains(self.store_b_synonym) {
            Some(StoreId::B)
        } else {
            None
        }
    }

    /// Extracts and validates both fields from `event`.
    pub fn map(&self, event: &SubmissionEvent) -> Result<MappedSubmission, ValidationError> {
        let store_id = event
            .first_value(self.store_label)
            .and_then(|selection| self.store_from_selection(selection));
        let vehicle_number = event
            .first_value(self.vehicle_label)
            .and_then(VehicleNumber::parse);

        match (store_id, vehicle_number) {
            (Some(store_id), Some(vehicle_number)) => Ok(MappedSubmission {
                store_id,
                vehicle_number,
            }),
            (store_id, vehicle_number) => Err(ValidationError {
                store_id: store_id.map(|s| s.as_str().to_owned()).unwrap_or_default(),
                vehicle_number: vehicle_number.map(|v| v.to_string()).unwrap_or_default(),
            }),
        }
    }
}

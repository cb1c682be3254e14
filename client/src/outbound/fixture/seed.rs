//! Demo data served by the fixture API.

use std::collections::BTreeMap;

use serde::Deserialize;

use crate::domain::{DataRecord, Message, Patient, PatientId, User};

const DEMO_SEED: &str = include_str!("../../../fixtures/demo.json");

/// Initial contents of the fixture backend.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FixtureSeed {
    /// The single account known to the fixture.
    pub user: User,
    /// Password accepted for `user`.
    pub password: String,
    /// Every profile the account can see.
    pub patients: Vec<Patient>,
    /// Device records keyed by patient.
    #[serde(default)]
    pub device_data: BTreeMap<PatientId, Vec<DataRecord>>,
    /// Team notes and replies across all patients.
    #[serde(default)]
    pub messages: Vec<Message>,
}

impl FixtureSeed {
    /// The bundled demo data set.
    ///
    /// # Errors
    ///
    /// Returns an error when the bundled JSON does not decode.
    pub fn demo() -> Result<Self, serde_json::Error> {
        serde_json::from_str(DEMO_SEED)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn bundled_demo_seed_decodes() {
        let seed = FixtureSeed::demo().expect("demo seed decodes");
        let own = seed.user.patient_id().expect("demo user has a profile");

        assert!(seed.patients.iter().any(|patient| &patient.id == own));
        assert!(seed.device_data.contains_key(own));
        assert!(
            seed.messages
                .iter()
                .all(|message| seed.patients.iter().any(|p| p.id == message.group_id)),
            "every note belongs to a known patient"
        );
    }
}

//! Cancer stage tables.
//!
//! The vendor has no stage category of its own; stage groups are
//! translated into the "Metastasise" vocabulary. Each canonical stage
//! label maps to the set of vendor metastasis codes it implies. SNOMED
//! stage-group codes are first normalized to the canonical label.

use std::collections::HashMap;

// Vendor metastasis code sets per broad stage.
//
// Stage 1: cancer has not spread beyond the original location.
// Stage 2: lymph nodes near the tumor.
// Stage 3: tissue adjacent to primary tumor (locally advanced).
// Stage 4: distant sites — lymph nodes (1539), pleural effusion (1542),
//          liver (1544), lung (1546), skin (1560), abdomen (1528),
//          bone (1530), brain (1531/1532), spinal cord (1561/1562),
//          leptomeningeal (1543), other (1557).
const STAGE_1_METS: &[&str] = &["1534", "1541", "1554", "1553"];
const STAGE_2_METS: &[&str] = &["1548"];
const STAGE_3_METS: &[&str] = &["1565"];
const STAGE_4_METS: &[&str] = &[
    "1539", "1542", "1544", "1546", "1560", "1528", "1530", "1531", "1532", "1561", "1562",
    "1543", "1557",
];

const STAGE_1_LABELS: &[&str] = &["1", "1A", "1B", "1C", "1E", "1S", "A1", "B1"];
const STAGE_2_LABELS: &[&str] = &["2", "2A", "2B", "2C", "2E", "2S", "A2", "B2", "2A1", "2A2"];
const STAGE_3_LABELS: &[&str] = &["3", "3A", "3B", "3C", "3E", "3S", "3C1", "3C2"];
const STAGE_4_LABELS: &[&str] = &["4", "4A", "4B", "4C", "4E", "4S", "4A1", "4A2"];

#[derive(Debug)]
pub struct StageTable {
    stage_to_mets: HashMap<&'static str, &'static [&'static str]>,
    snomed_to_stage: HashMap<&'static str, &'static str>,
}

impl StageTable {
    pub fn new() -> Self {
        let mut stage_to_mets: HashMap<&'static str, &'static [&'static str]> = HashMap::new();
        for (labels, mets) in [
            (STAGE_1_LABELS, STAGE_1_METS),
            (STAGE_2_LABELS, STAGE_2_METS),
            (STAGE_3_LABELS, STAGE_3_METS),
            (STAGE_4_LABELS, STAGE_4_METS),
        ] {
            for label in labels {
                stage_to_mets.insert(label, mets);
            }
        }

        // SNOMED clinical stage-group findings → canonical stage label.
        let snomed_to_stage = [
            ("258215001", "1"),
            ("258219007", "1A"),
            ("258220001", "1B"),
            ("258224005", "2"),
            ("258228008", "2A"),
            ("258229000", "2B"),
            ("258232002", "3"),
            ("258236004", "3A"),
            ("258237008", "3B"),
            ("258240008", "4"),
        ]
        .into_iter()
        .collect();

        Self {
            stage_to_mets,
            snomed_to_stage,
        }
    }

    /// Vendor metastasis codes for a stage coding. Accepts either a
    /// canonical stage label ("4", "2B") or a SNOMED stage-group code,
    /// which is normalized first. `None` means the code is unknown and
    /// the caller should skip it.
    pub fn mets_for_code(&self, code: &str) -> Option<&'static [&'static str]> {
        if let Some(mets) = self.stage_to_mets.get(code) {
            return Some(mets);
        }
        self.snomed_to_stage
            .get(code)
            .and_then(|stage| self.stage_to_mets.get(stage))
            .copied()
    }
}

impl Default for StageTable {
    fn default() -> Self {
        Self::new()
    }
}

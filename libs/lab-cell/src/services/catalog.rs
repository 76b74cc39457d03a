//! Fixed test catalogs labs draw from when created without an explicit
//! test list.

use rand::seq::SliceRandom;
use rand::Rng;

use crate::models::LabTest;

struct CatalogEntry {
    code: &'static str,
    name: &'static str,
    price: i32,
    category: &'static str,
}

const PATHOLOGY_TESTS: [CatalogEntry; 15] = [
    CatalogEntry { code: "CBC", name: "Complete Blood Count (Blood Test)", price: 400, category: "Basic Health" },
    CatalogEntry { code: "FBS", name: "Sugar Test (Fasting)", price: 200, category: "Diabetes" },
    CatalogEntry { code: "PPBS", name: "Sugar Test (Post-Meal)", price: 200, category: "Diabetes" },
    CatalogEntry { code: "HBA1C", name: "3-Month Sugar Average (HbA1c)", price: 600, category: "Diabetes" },
    CatalogEntry { code: "LIPID", name: "Cholesterol & Heart Test", price: 800, category: "Heart Health" },
    CatalogEntry { code: "TSH", name: "Thyroid Test (TSH)", price: 350, category: "Thyroid" },
    CatalogEntry { code: "LFT", name: "Liver Health Test", price: 700, category: "Liver & Kidney" },
    CatalogEntry { code: "KFT", name: "Kidney Health Test", price: 800, category: "Liver & Kidney" },
    CatalogEntry { code: "CALCIUM", name: "Calcium Test", price: 250, category: "Vitamins" },
    CatalogEntry { code: "VITD", name: "Vitamin D Test", price: 1200, category: "Vitamins" },
    CatalogEntry { code: "VITB12", name: "Vitamin B12 Test", price: 800, category: "Vitamins" },
    CatalogEntry { code: "IRON", name: "Iron Deficiency Test", price: 550, category: "Iron Study" },
    CatalogEntry { code: "DENGUE", name: "Dengue Fever Test", price: 1000, category: "Fever Package" },
    CatalogEntry { code: "TYPHOID", name: "Typhoid Test", price: 400, category: "Fever Package" },
    CatalogEntry { code: "URINE", name: "Urine Infection Test", price: 300, category: "Infection" },
];

const RADIOLOGY_TESTS: [CatalogEntry; 5] = [
    CatalogEntry { code: "XRAY-CHEST", name: "X-Ray Chest PA View", price: 500, category: "X-Ray" },
    CatalogEntry { code: "ECG", name: "Heart Rate Graph (ECG)", price: 400, category: "Heart Health" },
    CatalogEntry { code: "USG-ABDO", name: "Ultrasound Abdomen (Stomach)", price: 1200, category: "Ultrasound" },
    CatalogEntry { code: "CT-BRAIN", name: "CT Scan Brain", price: 2500, category: "CT Scan" },
    CatalogEntry { code: "MRI-KNEE", name: "MRI Knee", price: 4500, category: "MRI" },
];

impl CatalogEntry {
    fn to_test(&self) -> LabTest {
        LabTest {
            code: self.code.to_string(),
            name: self.name.to_string(),
            price: self.price,
            category: self.category.to_string(),
        }
    }
}

/// Sample 3 to 5 tests suited to the lab's type. "scan"/"imaging" selects
/// radiology, "pathology"/"lab"/"diagnostic" selects pathology; a type
/// matching both gets both pools, anything else defaults to pathology.
pub fn default_tests_for(lab_type: Option<&str>) -> Vec<LabTest> {
    let lower = lab_type.map(str::to_lowercase).unwrap_or_default();

    let mut available: Vec<&CatalogEntry> = Vec::new();

    if lower.contains("scan") || lower.contains("imaging") {
        available.extend(RADIOLOGY_TESTS.iter());
    }
    if lower.contains("pathology") || lower.contains("lab") || lower.contains("diagnostic") {
        available.extend(PATHOLOGY_TESTS.iter());
    }
    if available.is_empty() {
        available.extend(PATHOLOGY_TESTS.iter());
    }

    let mut rng = rand::thread_rng();
    available.shuffle(&mut rng);

    let count = rng.gen_range(3..=5).min(available.len());
    available[..count].iter().map(|entry| entry.to_test()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn samples_between_three_and_five_tests() {
        for _ in 0..20 {
            let tests = default_tests_for(Some("Pathology"));
            assert!((3..=5).contains(&tests.len()), "sampled {}", tests.len());
        }
    }

    #[test]
    fn scan_labs_draw_only_from_radiology() {
        let radiology_codes = ["XRAY-CHEST", "ECG", "USG-ABDO", "CT-BRAIN", "MRI-KNEE"];

        for _ in 0..20 {
            let tests = default_tests_for(Some("Scan Center"));
            assert!(!tests.is_empty());
            assert!(tests
                .iter()
                .all(|t| radiology_codes.contains(&t.code.as_str())));
        }
    }

    #[test]
    fn unknown_type_defaults_to_pathology() {
        let pathology_codes: Vec<&str> = vec![
            "CBC", "FBS", "PPBS", "HBA1C", "LIPID", "TSH", "LFT", "KFT", "CALCIUM", "VITD",
            "VITB12", "IRON", "DENGUE", "TYPHOID", "URINE",
        ];

        let tests = default_tests_for(None);
        for test in &tests {
            assert!(pathology_codes.contains(&test.code.as_str()));
        }
    }

    #[test]
    fn sampled_tests_are_distinct() {
        for _ in 0..10 {
            let tests = default_tests_for(Some("Diagnostic Lab"));
            let mut codes: Vec<&str> = tests.iter().map(|t| t.code.as_str()).collect();
            codes.sort_unstable();
            codes.dedup();
            assert_eq!(codes.len(), tests.len());
        }
    }
}

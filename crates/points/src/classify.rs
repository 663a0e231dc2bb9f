use serde::{Deserialize, Serialize};

/// Length of the naming-convention code at the start of a point name
pub const CODE_LEN: usize = 3;

/// Codes of operator/field input points; the only class written to reports
pub const INPUT_CODES: &[&str] = &["aii", "dii"];

/// Structured inputs are inputs but are not reported
pub const STRUCTURED_INPUT_CODES: &[&str] = &["sii"];

/// Output, control, alarm, formula and service codes
pub const NON_INPUT_CODES: &[&str] = &[
    "aac", "aal", "aco", "afo", "aio", "dac", "dal", "dco", "dfo", "dio", "dov", "sac", "sco",
    "sfo", "sio", "trp", "usr",
];

/// Class of a hierarchy item name, decided by its leading code
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PointClass {
    Input,
    StructuredInput,
    NonInput,
    /// Structural nodes and anything without a known code
    Unclassified,
}

/// Leading naming code of `name`, if it has one
pub fn naming_code(name: &str) -> Option<&str> {
    name.get(..CODE_LEN)
}

pub fn classify(name: &str) -> PointClass {
    let Some(code) = naming_code(name) else {
        return PointClass::Unclassified;
    };

    if INPUT_CODES.contains(&code) {
        PointClass::Input
    } else if STRUCTURED_INPUT_CODES.contains(&code) {
        PointClass::StructuredInput
    } else if NON_INPUT_CODES.contains(&code) {
        PointClass::NonInput
    } else {
        PointClass::Unclassified
    }
}

pub fn is_input_point(name: &str) -> bool {
    classify(name) == PointClass::Input
}

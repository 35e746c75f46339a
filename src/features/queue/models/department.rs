use std::collections::BTreeMap;
use std::str::FromStr;

use crate::shared::validation::DEPARTMENT_CODE_REGEX;

/// Department code → display name, loaded from `QUEUE_DEPARTMENTS`
///
/// The textual form is `CODE=Name` entries separated by `;`,
/// e.g. `POL-OBG=Poli Kandungan;POL-ANA=Poli Anak`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DepartmentDirectory {
    names: BTreeMap<String, String>,
}

impl DepartmentDirectory {
    pub fn name_of(&self, code: &str) -> Option<&str> {
        self.names.get(code).map(String::as_str)
    }

    pub fn count(&self) -> usize {
        self.names.len()
    }
}

impl FromStr for DepartmentDirectory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut names = BTreeMap::new();

        for entry in s.split(';').map(str::trim).filter(|e| !e.is_empty()) {
            let (code, name) = entry
                .split_once('=')
                .ok_or_else(|| format!("Department entry '{}' must look like CODE=Name", entry))?;
            let (code, name) = (code.trim(), name.trim());

            if !DEPARTMENT_CODE_REGEX.is_match(code) {
                return Err(format!("Invalid department code '{}'", code));
            }
            if name.is_empty() {
                return Err(format!("Department '{}' has an empty name", code));
            }
            if names.insert(code.to_string(), name.to_string()).is_some() {
                return Err(format!("Department '{}' is listed twice", code));
            }
        }

        if names.is_empty() {
            return Err("At least one department must be configured".to_string());
        }

        Ok(Self { names })
    }
}

use crate::utils::error::Result;
use serde::{Deserialize, Serialize};

/// One employee row from the input file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeRecord {
    pub name: String,
    pub department: String,
    pub score: i64,
}

impl EmployeeRecord {
    pub fn new(name: impl Into<String>, department: impl Into<String>, score: i64) -> Self {
        Self {
            name: name.into(),
            department: department.into(),
            score,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregateStatistics {
    #[serde(rename = "total_employees")]
    pub total_count: usize,
    #[serde(rename = "average_score")]
    pub average: f64,
    #[serde(rename = "highest_score")]
    pub max: i64,
    #[serde(rename = "lowest_score")]
    pub min: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DepartmentAverage {
    pub department: String,
    pub average: f64,
}

/// Per-department mean scores, in the order departments first appear in the input.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DepartmentAverages {
    entries: Vec<DepartmentAverage>,
}

impl DepartmentAverages {
    pub fn new(entries: Vec<DepartmentAverage>) -> Self {
        Self { entries }
    }

    pub fn get(&self, department: &str) -> Option<f64> {
        self.entries
            .iter()
            .find(|entry| entry.department == department)
            .map(|entry| entry.average)
    }

    pub fn iter(&self) -> impl Iterator<Item = &DepartmentAverage> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Output of the analyze stage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Analysis {
    pub aggregate: AggregateStatistics,
    pub departments: DepartmentAverages,
}

impl Analysis {
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

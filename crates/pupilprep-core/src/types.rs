use std::fmt;

use polars::prelude::DataFrame;
use serde::Serialize;

use crate::error::PipelineError;

/// Three-character subject identifier, taken from the first three characters
/// of a tracking file's name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct SubjectId(String);

impl SubjectId {
    pub fn new(id: &str) -> Result<Self, String> {
        if id.chars().count() != 3 {
            return Err(format!(
                "subject id must be exactly 3 characters, but got '{}'",
                id
            ));
        }
        Ok(Self(id.to_string()))
    }

    pub fn from_file_name(file_name: &str) -> Result<Self, String> {
        let prefix: String = file_name.chars().take(3).collect();
        if prefix.chars().count() != 3 {
            return Err(format!(
                "file name '{}' is too short to carry a 3-character subject id",
                file_name
            ));
        }
        Self::new(&prefix)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SubjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Ordered collection of per-subject tracking tables. Insertion order is
/// preserved through every downstream stage, including aggregation.
#[derive(Debug, Default)]
pub struct Dataset {
    subjects: Vec<(SubjectId, DataFrame)>,
}

impl Dataset {
    pub fn new() -> Self {
        Self::default()
    }

    /// Duplicate ids fail fast rather than silently overwriting an earlier
    /// subject's table.
    pub fn insert(&mut self, id: SubjectId, table: DataFrame) -> Result<(), PipelineError> {
        if self.subjects.iter().any(|(existing, _)| *existing == id) {
            return Err(PipelineError::DuplicateSubject(id));
        }
        self.subjects.push((id, table));
        Ok(())
    }

    pub fn get(&self, id: &SubjectId) -> Option<&DataFrame> {
        self.subjects
            .iter()
            .find(|(existing, _)| existing == id)
            .map(|(_, table)| table)
    }

    pub fn iter(&self) -> impl Iterator<Item = &(SubjectId, DataFrame)> {
        self.subjects.iter()
    }

    pub fn into_subjects(self) -> Vec<(SubjectId, DataFrame)> {
        self.subjects
    }

    pub fn subject_ids(&self) -> Vec<SubjectId> {
        self.subjects.iter().map(|(id, _)| id.clone()).collect()
    }

    pub fn len(&self) -> usize {
        self.subjects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.subjects.is_empty()
    }
}

impl IntoIterator for Dataset {
    type Item = (SubjectId, DataFrame);
    type IntoIter = std::vec::IntoIter<Self::Item>;

    fn into_iter(self) -> Self::IntoIter {
        self.subjects.into_iter()
    }
}

use std::path::Path;
use crate::error::ClassifyError;
use crate::utils;

/// Class names, where index `i` names output position `i` of the model.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LabelSet {
    names: Vec<String>,
}

impl From<Vec<String>> for LabelSet {
    fn from(names: Vec<String>) -> Self {
        Self { names }
    }
}

impl LabelSet {
    pub fn new(names: &[&str]) -> Self {
        Self {
            names: names.iter().map(|x| x.to_string()).collect(),
        }
    }

    /// Reads a UTF-8 label file, one label per line. Blank lines are kept so
    /// indices stay aligned with the model output.
    pub fn from_file(path: &Path) -> Result<Self, ClassifyError> {
        let names = utils::file_to_vec(path)
            .map_err(|e| ClassifyError::resource(path, e))?;
        if names.is_empty() {
            return Err(ClassifyError::resource(path, "label file is empty"));
        }

        log::info!("Loaded {} labels from {}", names.len(), path.display());
        Ok(Self { names })
    }

    /// Generates placeholder names `# 0`, `# 1`, ...
    pub fn numbered(n: usize) -> Self {
        Self {
            names: (0..n).map(|x| format!("# {}", x)).collect(),
        }
    }

    pub fn get(&self, index: usize) -> Result<&str, ClassifyError> {
        self.names
            .get(index)
            .map(String::as_str)
            .ok_or(ClassifyError::LabelIndexOutOfRange { index, len: self.names.len() })
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }
}

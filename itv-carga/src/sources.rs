//! The source checkboxes and the "select all" box above them.

/// Checkbox state for the ingestion sources.
///
/// The "select all" box reads checked exactly when every source box is.
#[derive(Debug, Clone, PartialEq)]
pub struct SourceSelection {
    sources: Vec<(String, bool)>,
    all: bool
}

impl SourceSelection {
    pub fn new<I, S>(ids: I) -> Self where I: IntoIterator<Item = S>, S: Into<String> {
        Self {
            sources: ids.into_iter().map(|s| (s.into(), false)).collect(),
            all: false
        }
    }
    /// Checking or unchecking "select all" does the same to every source.
    pub fn set_all(&mut self, checked: bool) {
        self.all = checked;
        for (_, c) in self.sources.iter_mut() {
            *c = checked;
        }
    }
    /// Sets one source box. Returns `false` if there's no such source.
    pub fn set(&mut self, id: &str, checked: bool) -> bool {
        let found = match self.sources.iter_mut().find(|(s, _)| s == id) {
            Some((_, c)) => {
                *c = checked;
                true
            },
            None => false
        };
        self.all = self.sources.iter().all(|&(_, c)| c);
        found
    }
    pub fn all_checked(&self) -> bool {
        self.all
    }
    /// Checked source ids, in display order.
    pub fn selected(&self) -> Vec<&str> {
        self.sources.iter()
            .filter(|&&(_, c)| c)
            .map(|(s, _)| s.as_str())
            .collect()
    }
    pub fn sources(&self) -> impl Iterator<Item = (&str, bool)> + '_ {
        self.sources.iter().map(|(s, c)| (s.as_str(), *c))
    }
    /// Unchecks everything, "select all" included.
    pub fn reset(&mut self) {
        self.set_all(false);
    }
}

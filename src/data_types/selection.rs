
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// The raw state of one option group at the moment an action was triggered
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub enum Selection {
    /// Selected values for an exclusive-choice or multi-select group
    Values(Vec<String>),
    /// State of a boolean toggle
    Toggle(bool),
    /// Contents of a text box, possibly empty
    Text(String)
}

/// Point-in-time capture of everything the user entered, prior to any validation.
/// Built by the presentation layer, consumed by the resolver, then dropped.
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct SelectionSnapshot {
    /// Path to the input VCF as typed, empty if missing
    input_path: String,
    /// Path to the output file as typed, empty if missing
    output_path: String,
    /// Group name -> raw selection, in the order it was recorded
    selections: IndexMap<String, Selection>
}

impl SelectionSnapshot {
    /// Constructor
    /// # Arguments
    /// * `input_path` - the input file path, may be empty
    /// * `output_path` - the output file path, may be empty
    pub fn new(input_path: &str, output_path: &str) -> Self {
        Self {
            input_path: input_path.to_string(),
            output_path: output_path.to_string(),
            selections: Default::default()
        }
    }

    /// Records the selected values of a choice or multi-select group, replacing any earlier entry
    pub fn with_values<I, S>(mut self, group: &str, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>
    {
        let values = values.into_iter().map(|v| v.into()).collect();
        self.selections.insert(group.to_string(), Selection::Values(values));
        self
    }

    /// Records the state of a boolean toggle
    pub fn with_toggle(mut self, group: &str, enabled: bool) -> Self {
        self.selections.insert(group.to_string(), Selection::Toggle(enabled));
        self
    }

    /// Records the contents of a text field
    pub fn with_text(mut self, group: &str, text: &str) -> Self {
        self.selections.insert(group.to_string(), Selection::Text(text.to_string()));
        self
    }

    // getters
    pub fn input_path(&self) -> &str {
        &self.input_path
    }

    pub fn output_path(&self) -> &str {
        &self.output_path
    }

    pub fn selections(&self) -> &IndexMap<String, Selection> {
        &self.selections
    }

    pub fn get(&self, group: &str) -> Option<&Selection> {
        self.selections.get(group)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_order() {
        let snapshot = SelectionSnapshot::new("in.vcf", "")
            .with_toggle("header", true)
            .with_values("tags", ["AC", "AF"])
            .with_text("name", "out_header");

        assert_eq!(snapshot.input_path(), "in.vcf");
        assert_eq!(snapshot.output_path(), "");
        let keys: Vec<&String> = snapshot.selections().keys().collect();
        assert_eq!(keys, vec!["header", "tags", "name"]);
        assert_eq!(snapshot.get("tags"), Some(&Selection::Values(vec!["AC".to_string(), "AF".to_string()])));
    }

    #[test]
    fn test_replace_entry() {
        let snapshot = SelectionSnapshot::new("in.vcf", "out.txt")
            .with_toggle("header", true)
            .with_toggle("header", false);
        assert_eq!(snapshot.selections().len(), 1);
        assert_eq!(snapshot.get("header"), Some(&Selection::Toggle(false)));
    }
}

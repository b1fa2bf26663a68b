/*!
Generic resolution of a selection snapshot against an option model.

This pass knows nothing about what a group means; it enforces the model (paths, cardinality,
requirements, gates, allowed values) and produces a [`Resolution`] that the screens convert into a typed
[`ResolvedConfig`](crate::data_types::resolved_config::ResolvedConfig).
Resolution is a pure function of its inputs: no IO, no logging, no clock.

# Example usage
```rust
use vcfsimplify::data_types::option_model::{OptionGroup, OptionModel, Requirement};
use vcfsimplify::data_types::selection::SelectionSnapshot;
use vcfsimplify::data_types::value_enums::Action;
use vcfsimplify::resolver::{resolve, ValidationReason};

let model = OptionModel::new("demo", vec![
    OptionGroup::exclusive("type", vec!["a".into(), "b".into()]).with_requirement(Requirement::Always),
]).unwrap();

// two members marked at once, the first declared member wins
let snapshot = SelectionSnapshot::new("in.vcf", "out.txt").with_values("type", ["b", "a"]);
let resolution = resolve(&model, &snapshot, Action::Run).unwrap();
assert_eq!(resolution.choice("type"), Some("a"));

// nothing selected and no output, every problem is reported
let snapshot = SelectionSnapshot::new("in.vcf", "");
let failure = resolve(&model, &snapshot, Action::Run).unwrap_err();
assert_eq!(failure.reasons(), &[
    ValidationReason::MissingOutputPath,
    ValidationReason::MissingSelection { group: "type".to_string() },
]);
```
*/

use indexmap::{IndexMap, IndexSet};
use itertools::Itertools;
use std::path::{Path, PathBuf};

use crate::data_types::option_model::{OptionGroup, OptionKind, OptionModel};
use crate::data_types::selection::{Selection, SelectionSnapshot};
use crate::data_types::value_enums::Action;

/// A single reason a snapshot was rejected
#[derive(thiserror::Error, Clone, Debug, Eq, PartialEq)]
pub enum ValidationReason {
    #[error("input path is empty")]
    MissingInputPath,
    #[error("output path is empty")]
    MissingOutputPath,
    #[error("option group {group:?} requires a selection")]
    MissingSelection { group: String },
    #[error("option group {group:?} received the wrong kind of selection (expected {expected})")]
    KindMismatch { group: String, expected: OptionKind },
    #[error("{value:?} is not a valid choice for option group {group:?}")]
    UnknownValue { group: String, value: String },
    #[error("option group {group:?} is not part of the {screen} screen")]
    UnknownGroup { group: String, screen: String },
    #[error("the {screen} screen does not support the {action} action")]
    UnsupportedAction { screen: String, action: Action },
}

/// All of the reasons a snapshot was rejected, in a deterministic order
#[derive(thiserror::Error, Clone, Debug, Eq, PartialEq)]
#[error("{}", join_reasons(.reasons, "; "))]
pub struct ValidationFailed {
    reasons: Vec<ValidationReason>
}

fn join_reasons(reasons: &[ValidationReason], separator: &str) -> String {
    reasons.iter().map(|r| r.to_string()).join(separator)
}

impl ValidationFailed {
    pub fn new(reasons: Vec<ValidationReason>) -> Self {
        Self { reasons }
    }

    pub fn reasons(&self) -> &[ValidationReason] {
        &self.reasons
    }

    /// The first unmet requirement
    pub fn first(&self) -> Option<&ValidationReason> {
        self.reasons.first()
    }

    /// One reason per line, suitable for a report
    pub fn detail(&self) -> String {
        join_reasons(&self.reasons, "\n")
    }
}

/// Screen-agnostic result of a successful resolution
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Resolution {
    action: Action,
    input_path: PathBuf,
    output_path: Option<PathBuf>,
    /// Exclusive-choice group -> the single chosen value
    choices: IndexMap<String, String>,
    /// Multi-select group -> non-empty set of chosen values
    values: IndexMap<String, IndexSet<String>>,
    /// Every boolean toggle in the model
    toggles: IndexMap<String, bool>,
    /// Free-text group -> text, only for groups that are enabled
    auxiliary_text_fields: IndexMap<String, String>
}

impl Resolution {
    pub fn action(&self) -> Action {
        self.action
    }

    pub fn input_path(&self) -> &Path {
        &self.input_path
    }

    pub fn output_path(&self) -> Option<&Path> {
        self.output_path.as_deref()
    }

    pub fn choice(&self, group: &str) -> Option<&str> {
        self.choices.get(group).map(|s| s.as_str())
    }

    /// Chosen values for a multi-select group, None if nothing was chosen
    pub fn values(&self, group: &str) -> Option<&IndexSet<String>> {
        self.values.get(group)
    }

    /// State of a toggle; false if the group is unknown
    pub fn toggle(&self, group: &str) -> bool {
        self.toggles.get(group).copied().unwrap_or(false)
    }

    pub fn auxiliary_text_fields(&self) -> &IndexMap<String, String> {
        &self.auxiliary_text_fields
    }

    /// Returns true if the group ended up with anything selected, enabled, or entered
    pub fn has_selection(&self, group: &str) -> bool {
        self.choices.contains_key(group) ||
            self.values.contains_key(group) ||
            self.toggle(group) ||
            self.auxiliary_text_fields.contains_key(group)
    }
}

/// Resolves a snapshot against a model for the given action.
/// # Arguments
/// * `model` - the screen's option model
/// * `snapshot` - raw user selections
/// * `action` - the action being triggered; decides which requirements apply and whether an output path is needed
/// # Errors
/// * if any validation rule fails; every failure is listed in order: paths, model groups in declaration order, then unknown snapshot groups
pub fn resolve(model: &OptionModel, snapshot: &SelectionSnapshot, action: Action) -> Result<Resolution, ValidationFailed> {
    let mut reasons = vec![];

    let input_path = snapshot.input_path().trim();
    if input_path.is_empty() {
        reasons.push(ValidationReason::MissingInputPath);
    }

    // read-only actions never carry an output path, even if one was typed
    let output_path = if action.writes_output() {
        let output_path = snapshot.output_path().trim();
        if output_path.is_empty() {
            reasons.push(ValidationReason::MissingOutputPath);
            None
        } else {
            Some(PathBuf::from(output_path))
        }
    } else {
        None
    };

    let mut choices: IndexMap<String, String> = Default::default();
    let mut values: IndexMap<String, IndexSet<String>> = Default::default();
    let mut toggles: IndexMap<String, bool> = Default::default();
    let mut auxiliary_text_fields: IndexMap<String, String> = Default::default();

    for group in model.groups().iter() {
        let name = group.name();
        let required = group.requirement().applies_to(action);
        let selection = snapshot.get(name);

        let satisfied = match group.kind() {
            OptionKind::ExclusiveChoice |
            OptionKind::MultiSelect => {
                let raw: &[String] = match selection {
                    None => &[],
                    Some(Selection::Values(v)) => v,
                    Some(_) => {
                        reasons.push(kind_mismatch(group));
                        continue;
                    }
                };

                let picked = pick_values(group, raw, &mut reasons);
                let satisfied = !picked.is_empty();
                if group.kind() == OptionKind::ExclusiveChoice {
                    // picked is in declaration order, so the first entry is the first declared member
                    if let Some(first) = picked.into_iter().next() {
                        choices.insert(name.to_string(), first);
                    }
                } else if satisfied {
                    values.insert(name.to_string(), picked);
                }
                satisfied
            },
            OptionKind::BooleanToggle => {
                let enabled = match selection {
                    None => false,
                    Some(Selection::Toggle(enabled)) => *enabled,
                    Some(_) => {
                        reasons.push(kind_mismatch(group));
                        continue;
                    }
                };
                toggles.insert(name.to_string(), enabled);
                enabled
            },
            OptionKind::FreeText => {
                let text = match selection {
                    None => "",
                    Some(Selection::Text(text)) => text.as_str(),
                    Some(_) => {
                        reasons.push(kind_mismatch(group));
                        continue;
                    }
                };

                // a gated field is tied to its toggle alone so "enabled but empty" stays distinguishable from "disabled"
                let enabled = match group.gate() {
                    Some(gate) => matches!(snapshot.get(gate), Some(Selection::Toggle(true))),
                    None => !text.is_empty()
                };
                if enabled {
                    auxiliary_text_fields.insert(name.to_string(), text.to_string());
                }
                enabled && !text.trim().is_empty()
            }
        };

        if required && !satisfied {
            reasons.push(ValidationReason::MissingSelection { group: name.to_string() });
        }
    }

    for group in snapshot.selections().keys() {
        if model.group(group).is_none() {
            reasons.push(ValidationReason::UnknownGroup {
                group: group.clone(),
                screen: model.screen().to_string()
            });
        }
    }

    if !reasons.is_empty() {
        return Err(ValidationFailed::new(reasons));
    }

    Ok(Resolution {
        action,
        input_path: PathBuf::from(input_path),
        output_path,
        choices,
        values,
        toggles,
        auxiliary_text_fields
    })
}

fn kind_mismatch(group: &OptionGroup) -> ValidationReason {
    ValidationReason::KindMismatch {
        group: group.name().to_string(),
        expected: group.kind()
    }
}

/// Orders and filters raw values for a choice/multi-select group.
/// Declared members come first in declaration order, then custom values in the order they were given.
/// A selected catch-all replaces everything else.
fn pick_values(group: &OptionGroup, raw: &[String], reasons: &mut Vec<ValidationReason>) -> IndexSet<String> {
    let wanted: IndexSet<&str> = raw.iter()
        .map(|v| v.trim())
        .filter(|v| !v.is_empty())
        .collect();

    let mut picked: IndexSet<String> = group.members().iter()
        .filter(|m| wanted.contains(m.value()))
        .map(|m| m.value().to_string())
        .collect();

    for &value in wanted.iter().filter(|&&v| !group.is_member(v)) {
        if group.allow_custom() {
            picked.insert(value.to_string());
        } else {
            reasons.push(ValidationReason::UnknownValue {
                group: group.name().to_string(),
                value: value.to_string()
            });
        }
    }

    if let Some(catch_all) = group.catch_all() {
        if picked.contains(catch_all) {
            picked = IndexSet::from([catch_all.to_string()]);
        }
    }

    picked
}


use serde::Serialize;
use std::collections::HashSet;

use crate::data_types::value_enums::Action;

/// Errors from building a malformed option model; these are programming errors, not user errors
#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum OptionModelError {
    #[error("option group {group:?} is declared more than once")]
    DuplicateGroup { group: String },
    #[error("option group {group:?} is required but declares no members")]
    EmptyRequiredGroup { group: String },
    #[error("option group {group:?} is gated by {gate:?}, which is not a declared boolean toggle")]
    InvalidGate { group: String, gate: String },
    #[error("option group {group:?} is gated but only free-text groups may be gated")]
    GateOnNonText { group: String },
    #[error("option group {group:?} uses catch-all {value:?}, which is not a declared member")]
    UnknownCatchAll { group: String, value: String },
    #[error("option group {group:?} is a {kind} and cannot declare members")]
    MembersOnScalar { group: String, kind: OptionKind },
}

/// The cardinality of a group of options
#[derive(Clone, Copy, Debug, strum_macros::Display, Eq, Hash, PartialEq, Serialize)]
pub enum OptionKind {
    /// Radio buttons; at most one member is used
    #[strum(serialize = "exclusive choice")]
    ExclusiveChoice,
    /// Check boxes; zero or more members
    #[strum(serialize = "multi select")]
    MultiSelect,
    /// A single on/off switch
    #[strum(serialize = "boolean toggle")]
    BooleanToggle,
    /// A text box
    #[strum(serialize = "free text")]
    FreeText
}

impl OptionKind {
    /// Returns true if the kind selects from a list of members
    pub fn has_members(&self) -> bool {
        match self {
            OptionKind::ExclusiveChoice |
            OptionKind::MultiSelect => true,

            OptionKind::BooleanToggle |
            OptionKind::FreeText => false
        }
    }
}

/// When a group must carry a selection
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize)]
pub enum Requirement {
    #[default]
    Optional,
    /// Only required for actions that write output
    OnRun,
    Always
}

impl Requirement {
    /// Returns true if the group must carry a selection for the given action
    pub fn applies_to(&self, action: Action) -> bool {
        match self {
            Requirement::Optional => false,
            Requirement::OnRun => action.writes_output(),
            Requirement::Always => true
        }
    }
}

/// A single selectable entry in a group
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct OptionMember {
    /// What the user sees
    label: String,
    /// What gets forwarded to the solver
    value: String
}

impl OptionMember {
    pub fn new(label: &str, value: &str) -> Self {
        Self {
            label: label.to_string(),
            value: value.to_string()
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn value(&self) -> &str {
        &self.value
    }
}

impl From<&str> for OptionMember {
    fn from(value: &str) -> Self {
        Self::new(value, value)
    }
}

/// A named group of options with a cardinality and requirement
#[derive(Clone, Debug, Serialize)]
pub struct OptionGroup {
    name: String,
    kind: OptionKind,
    members: Vec<OptionMember>,
    requirement: Requirement,
    /// Name of the boolean toggle that enables this (free-text) group
    gate: Option<String>,
    /// If true, values outside of `members` are accepted
    allow_custom: bool,
    /// Member value that stands in for every other value in the group
    catch_all: Option<String>
}

impl OptionGroup {
    fn new(name: &str, kind: OptionKind, members: Vec<OptionMember>) -> Self {
        Self {
            name: name.to_string(),
            kind,
            members,
            requirement: Requirement::Optional,
            gate: None,
            allow_custom: false,
            catch_all: None
        }
    }

    /// Radio-style group, first selected member in declaration order wins
    pub fn exclusive(name: &str, members: Vec<OptionMember>) -> Self {
        Self::new(name, OptionKind::ExclusiveChoice, members)
    }

    /// Checkbox-style group
    pub fn multi(name: &str, members: Vec<OptionMember>) -> Self {
        Self::new(name, OptionKind::MultiSelect, members)
    }

    pub fn toggle(name: &str) -> Self {
        Self::new(name, OptionKind::BooleanToggle, vec![])
    }

    pub fn free_text(name: &str) -> Self {
        Self::new(name, OptionKind::FreeText, vec![])
    }

    pub fn with_requirement(mut self, requirement: Requirement) -> Self {
        self.requirement = requirement;
        self
    }

    pub fn gated_by(mut self, toggle: &str) -> Self {
        self.gate = Some(toggle.to_string());
        self
    }

    pub fn with_custom_values(mut self) -> Self {
        self.allow_custom = true;
        self
    }

    pub fn with_catch_all(mut self, value: &str) -> Self {
        self.catch_all = Some(value.to_string());
        self
    }

    // getters
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> OptionKind {
        self.kind
    }

    pub fn members(&self) -> &[OptionMember] {
        &self.members
    }

    pub fn requirement(&self) -> Requirement {
        self.requirement
    }

    pub fn gate(&self) -> Option<&str> {
        self.gate.as_deref()
    }

    pub fn allow_custom(&self) -> bool {
        self.allow_custom
    }

    pub fn catch_all(&self) -> Option<&str> {
        self.catch_all.as_deref()
    }

    /// Returns true if `value` matches one of the declared members
    pub fn is_member(&self, value: &str) -> bool {
        self.members.iter().any(|m| m.value() == value)
    }
}

/// The full set of option groups for a screen, in declaration order.
/// Once built, the model is immutable.
#[derive(Clone, Debug, Serialize)]
pub struct OptionModel {
    screen: String,
    groups: Vec<OptionGroup>
}

impl OptionModel {
    /// Constructor, which verifies the model is internally consistent
    /// # Arguments
    /// * `screen` - name of the screen, for messages
    /// * `groups` - all option groups in the order they are presented
    /// # Errors
    /// * if group names are duplicated
    /// * if a required group has no members to select from
    /// * if a gate does not point at a declared boolean toggle, or gates a non-text group
    /// * if a catch-all is not one of the group's members
    /// * if a toggle or free-text group declares members
    pub fn new(screen: &str, groups: Vec<OptionGroup>) -> Result<Self, OptionModelError> {
        let mut seen: HashSet<&str> = Default::default();
        for group in groups.iter() {
            if !seen.insert(group.name()) {
                return Err(OptionModelError::DuplicateGroup { group: group.name().to_string() });
            }

            if group.kind().has_members() {
                if group.requirement() != Requirement::Optional && group.members().is_empty() {
                    return Err(OptionModelError::EmptyRequiredGroup { group: group.name().to_string() });
                }
            } else if !group.members().is_empty() {
                return Err(OptionModelError::MembersOnScalar { group: group.name().to_string(), kind: group.kind() });
            }

            if let Some(catch_all) = group.catch_all() {
                if !group.is_member(catch_all) {
                    return Err(OptionModelError::UnknownCatchAll {
                        group: group.name().to_string(), value: catch_all.to_string()
                    });
                }
            }
        }

        // gates can point forwards or backwards, so check them after all names are known
        for group in groups.iter() {
            if let Some(gate) = group.gate() {
                if group.kind() != OptionKind::FreeText {
                    return Err(OptionModelError::GateOnNonText { group: group.name().to_string() });
                }
                let valid_gate = groups.iter()
                    .any(|g| g.name() == gate && g.kind() == OptionKind::BooleanToggle);
                if !valid_gate {
                    return Err(OptionModelError::InvalidGate {
                        group: group.name().to_string(), gate: gate.to_string()
                    });
                }
            }
        }

        Ok(Self {
            screen: screen.to_string(),
            groups
        })
    }

    pub fn screen(&self) -> &str {
        &self.screen
    }

    pub fn groups(&self) -> &[OptionGroup] {
        &self.groups
    }

    pub fn group(&self, name: &str) -> Option<&OptionGroup> {
        self.groups.iter().find(|g| g.name() == name)
    }
}

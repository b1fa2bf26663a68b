/*!
# Screens module
Each screen pairs an option model with the typed resolution for its commands.
*/

/// The simplify screen: VCF to haplotype strings or tables
pub mod simplify;
/// The view screen: inspect or export VCF metadata
pub mod view;

use indexmap::IndexSet;
use std::hash::Hash;
use std::str::FromStr;

use crate::data_types::option_model::OptionModel;
use crate::data_types::resolved_config::ResolvedConfig;
use crate::data_types::selection::SelectionSnapshot;
use crate::data_types::value_enums::Action;
use crate::resolver::{Resolution, ValidationFailed, ValidationReason};

/// A user-facing screen that turns selections into a solver configuration
pub trait Screen {
    /// The option model, built once when the screen is constructed
    fn model(&self) -> &OptionModel;

    /// Resolves a snapshot into a configuration for the given action.
    /// This is pure, repeated calls with the same snapshot give the same result.
    /// # Errors
    /// * if the snapshot fails validation, with every reason listed
    fn resolve(&self, snapshot: &SelectionSnapshot, action: Action) -> Result<ResolvedConfig, ValidationFailed>;
}

/// Parses a resolved exclusive choice into its typed value
fn parse_choice<T: FromStr>(resolution: &Resolution, group: &str) -> Result<Option<T>, ValidationReason> {
    resolution.choice(group)
        .map(|value| parse_value(group, value))
        .transpose()
}

/// Parses a resolved multi-select group into a typed set, keeping the resolved order
fn parse_set<T: FromStr + Hash + Eq>(resolution: &Resolution, group: &str) -> Result<IndexSet<T>, ValidationReason> {
    match resolution.values(group) {
        Some(values) => values.iter()
            .map(|value| parse_value(group, value))
            .collect(),
        None => Ok(Default::default())
    }
}

fn parse_value<T: FromStr>(group: &str, value: &str) -> Result<T, ValidationReason> {
    T::from_str(value).map_err(|_e| ValidationReason::UnknownValue {
        group: group.to_string(),
        value: value.to_string()
    })
}

/// Cloned values of a multi-select group, empty if nothing was selected
fn string_set(resolution: &Resolution, group: &str) -> IndexSet<String> {
    resolution.values(group).cloned().unwrap_or_default()
}

/// Names of the groups with a selection that the chosen command does not use
fn ignored_groups(resolution: &Resolution, unused: &[&str]) -> Vec<String> {
    unused.iter()
        .filter(|&&group| resolution.has_selection(group))
        .map(|group| group.to_string())
        .collect()
}

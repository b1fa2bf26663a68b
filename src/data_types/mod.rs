
/// The outcome of one dispatch and the report text shown to the user
pub mod dispatch_outcome;
/// Declarative description of the option groups on a screen
pub mod option_model;
/// Typed configuration handed to the solver after resolution
pub mod resolved_config;
/// Raw user selections captured from a screen
pub mod selection;
/// Small enumerations shared across screens and the solver
pub mod value_enums;

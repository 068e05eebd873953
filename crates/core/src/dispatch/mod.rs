//! Command dispatch against registered projects

pub mod custom_params;
pub mod dispatcher;

pub use custom_params::{CustomParameterFlow, FlowInput, FlowState, ParameterHistory};
pub use dispatcher::{DevAction, DispatchContext, Dispatcher, Outcome};

//! Ontology fact emitter
//!
//! Writes the triples describing a digital twin (platforms, sensors,
//! actuators, properties, procedures, optimal conditions and simulation
//! models) into an `oxrdf::Graph` owned by the caller.

pub mod emitter;
pub mod instance_model;
pub mod turtle;
pub mod vocab;

pub use emitter::{
    Actuator, FmuModel, Measure, ObservableProperty, OptimalCondition, OptimalConditionBounds,
    Platform, Procedure, PropertyNode, Restriction, Sensor,
};
pub use instance_model::{InstanceModel, InstanceModelOptions, emit_instance_model};
pub use turtle::write_turtle;

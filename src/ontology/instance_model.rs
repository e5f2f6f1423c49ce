//! The fixed digital twin instance model
//!
//! One platform hosting an electricity-price sensor and a heater, bound to
//! a simulation FMU, with an optimal condition on the observed property.

use oxrdf::{Graph, NamedNode};
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::emitter::{
    Actuator, FmuModel, Measure, ObservableProperty, OptimalCondition, OptimalConditionBounds,
    Platform, Procedure, Sensor,
};
use crate::Result;

/// Parameters of the instance model; everything else is fixed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InstanceModelOptions {
    /// Namespace the individuals are minted in
    pub base_iri: String,
    pub fidelity_seconds: i64,
    pub fmu_path: String,
    pub optimal_condition_bounds: OptimalConditionBounds,
    pub generate_combinations_only_from_optimal_conditions: bool,
    pub reached_in_maximum_seconds: i64,
}

/// Nodes identifying the emitted individuals
#[derive(Debug, Clone, PartialEq)]
pub struct InstanceModel {
    pub platform: NamedNode,
    pub fmu: NamedNode,
    pub property: NamedNode,
    pub measure: NamedNode,
    pub sensor: NamedNode,
    pub procedure: NamedNode,
    pub actuator: NamedNode,
    pub optimal_condition: NamedNode,
}

fn individual(base_iri: &str, local: &str) -> Result<NamedNode> {
    Ok(NamedNode::new(format!("{base_iri}{local}"))?)
}

/// Emit the complete instance model into `graph`
pub fn emit_instance_model(graph: &mut Graph, options: &InstanceModelOptions) -> Result<InstanceModel> {
    let base = options.base_iri.as_str();
    let before = graph.len();

    let fmu = FmuModel {
        node: individual(base, "NordPoolFmu")?,
        fidelity_seconds: options.fidelity_seconds,
        fmu_path: options.fmu_path.clone(),
    }
    .emit(graph);

    let property = ObservableProperty {
        node: individual(base, "ElectricityPrice")?,
        restriction: None,
    }
    .emit(graph);

    let measure = Measure {
        node: individual(base, "ElectricityPriceMeasure")?,
        restriction: property.restriction.clone(),
    }
    .emit(graph);

    let sensor = Sensor {
        node: individual(base, "ElectricityPriceSensor")?,
        observes: vec![property.node.clone()],
    }
    .emit(graph);

    let procedure = Procedure {
        node: individual(base, "ElectricityPriceProcedure")?,
        measure: measure.clone(),
        sensor: Some(sensor.clone()),
    }
    .emit(graph);

    let actuator = Actuator {
        node: individual(base, "Heater")?,
        enacts: Vec::new(),
    }
    .emit(graph);

    let optimal_condition = OptimalCondition {
        node: individual(base, "ElectricityPriceOptimalCondition")?,
        property: property.node.clone(),
        reached_in_maximum_seconds: options.reached_in_maximum_seconds,
        bounds: options.optimal_condition_bounds,
    }
    .emit(graph);

    let platform = Platform::new(individual(base, "Platform")?)
        .hosting(sensor.clone())
        .hosting(actuator.clone())
        .generate_combinations_only_from_optimal_conditions(
            options.generate_combinations_only_from_optimal_conditions,
        )
        .with_simulation_model(fmu.clone())
        .emit(graph);

    debug!(triples = graph.len() - before, "Emitted instance model under {}", base);

    Ok(InstanceModel {
        platform,
        fmu,
        property: property.node,
        measure,
        sensor,
        procedure,
        actuator,
        optimal_condition,
    })
}

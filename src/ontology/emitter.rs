//! Emitters for the individuals of a digital twin instance model
//!
//! Each entity writes a fixed set of triples into a caller-owned graph and
//! returns the node that identifies it. Nothing is read back from the graph.

use oxrdf::vocab::{rdf, rdfs, xsd};
use oxrdf::{
    BlankNode, Graph, Literal, NamedNode, NamedNodeRef, NamedOrBlankNodeRef, Term, TermRef, TripleRef,
};
use serde::{Deserialize, Serialize};

use super::vocab::{facet, owl, rdt, sosa, ssn};

fn add<'a>(
    graph: &mut Graph,
    subject: impl Into<NamedOrBlankNodeRef<'a>>,
    predicate: impl Into<NamedNodeRef<'a>>,
    object: impl Into<TermRef<'a>>,
) {
    graph.insert(TripleRef::new(subject, predicate, object));
}

fn integer(value: i64) -> Literal {
    Literal::new_typed_literal(value.to_string(), xsd::INTEGER)
}

/// Simulation model packaged as an FMU
#[derive(Debug, Clone, PartialEq)]
pub struct FmuModel {
    pub node: NamedNode,
    pub fidelity_seconds: i64,
    pub fmu_path: String,
}

impl FmuModel {
    pub fn emit(&self, graph: &mut Graph) -> NamedNode {
        add(graph, &self.node, rdf::TYPE, rdt::FMU_MODEL);
        add(
            graph,
            &self.node,
            rdt::HAS_SIMULATION_FIDELITY_SECONDS,
            &integer(self.fidelity_seconds),
        );
        add(
            graph,
            &self.node,
            rdt::HAS_URI,
            &Literal::new_typed_literal(self.fmu_path.as_str(), xsd::STRING),
        );
        self.node.clone()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Platform {
    pub node: NamedNode,
    pub hosts: Vec<NamedNode>,
    pub generate_combinations_only_from_optimal_conditions: Option<bool>,
    pub simulation_model: Option<NamedNode>,
}

impl Platform {
    #[must_use]
    pub fn new(node: NamedNode) -> Self {
        Self {
            node,
            hosts: Vec::new(),
            generate_combinations_only_from_optimal_conditions: None,
            simulation_model: None,
        }
    }

    #[must_use]
    pub fn hosting(mut self, hosted: NamedNode) -> Self {
        self.hosts.push(hosted);
        self
    }

    #[must_use]
    pub fn generate_combinations_only_from_optimal_conditions(mut self, value: bool) -> Self {
        self.generate_combinations_only_from_optimal_conditions = Some(value);
        self
    }

    #[must_use]
    pub fn with_simulation_model(mut self, fmu: NamedNode) -> Self {
        self.simulation_model = Some(fmu);
        self
    }

    pub fn emit(&self, graph: &mut Graph) -> NamedNode {
        add(graph, &self.node, rdf::TYPE, owl::NAMED_INDIVIDUAL);
        add(graph, &self.node, rdf::TYPE, sosa::PLATFORM);
        if let Some(value) = self.generate_combinations_only_from_optimal_conditions {
            add(
                graph,
                &self.node,
                rdt::GENERATE_COMBINATIONS_ONLY_FROM_OPTIMAL_CONDITIONS,
                &Literal::from(value),
            );
        }
        for hosted in &self.hosts {
            add(graph, &self.node, sosa::HOSTS, hosted);
        }
        if let Some(fmu) = &self.simulation_model {
            Self::add_fmu(graph, &self.node, fmu);
        }
        self.node.clone()
    }

    /// Bind a simulation model to an already emitted platform
    pub fn add_fmu(graph: &mut Graph, platform: &NamedNode, fmu: &NamedNode) {
        add(graph, platform, rdt::HAS_SIMULATION_MODEL, fmu);
    }
}

/// OWL restrictions typing property individuals
pub struct Restriction;

impl Restriction {
    /// Exactly one `rdt:hasValue` of type `xsd:double`
    pub fn single_double_value(graph: &mut Graph) -> BlankNode {
        let node = BlankNode::default();
        add(graph, &node, rdf::TYPE, owl::RESTRICTION);
        add(graph, &node, owl::ON_PROPERTY, rdt::HAS_VALUE);
        add(
            graph,
            &node,
            owl::QUALIFIED_CARDINALITY,
            &Literal::new_typed_literal("1", xsd::NON_NEGATIVE_INTEGER),
        );
        add(graph, &node, owl::ON_DATA_RANGE, xsd::DOUBLE);
        node
    }
}

/// An emitted property together with the restriction typing it
#[derive(Debug, Clone, PartialEq)]
pub struct PropertyNode {
    pub node: NamedNode,
    pub restriction: BlankNode,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ObservableProperty {
    pub node: NamedNode,
    /// Defaults to a fresh single-double restriction
    pub restriction: Option<BlankNode>,
}

impl ObservableProperty {
    pub fn emit(&self, graph: &mut Graph) -> PropertyNode {
        add(graph, &self.node, rdf::TYPE, sosa::OBSERVABLE_PROPERTY);
        add(graph, &self.node, rdf::TYPE, owl::NAMED_INDIVIDUAL);
        let restriction = match &self.restriction {
            Some(restriction) => restriction.clone(),
            None => Restriction::single_double_value(graph),
        };
        add(graph, &self.node, rdf::TYPE, &restriction);
        PropertyNode {
            node: self.node.clone(),
            restriction,
        }
    }
}

/// Output property produced by a procedure
#[derive(Debug, Clone, PartialEq)]
pub struct Measure {
    pub node: NamedNode,
    pub restriction: BlankNode,
}

impl Measure {
    pub fn emit(&self, graph: &mut Graph) -> NamedNode {
        add(graph, &self.node, rdf::TYPE, owl::NAMED_INDIVIDUAL);
        add(graph, &self.node, rdf::TYPE, ssn::OUTPUT);
        add(graph, &self.node, rdf::TYPE, ssn::PROPERTY);
        add(graph, &self.node, rdf::TYPE, &self.restriction);
        self.node.clone()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Sensor {
    pub node: NamedNode,
    pub observes: Vec<NamedNode>,
}

impl Sensor {
    pub fn emit(&self, graph: &mut Graph) -> NamedNode {
        add(graph, &self.node, rdf::TYPE, owl::NAMED_INDIVIDUAL);
        add(graph, &self.node, rdf::TYPE, sosa::SENSOR);
        for property in &self.observes {
            add(graph, &self.node, sosa::OBSERVES, property);
        }
        self.node.clone()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Actuator {
    pub node: NamedNode,
    /// Property changes the actuator brings about
    pub enacts: Vec<NamedNode>,
}

impl Actuator {
    pub fn emit(&self, graph: &mut Graph) -> NamedNode {
        add(graph, &self.node, rdf::TYPE, owl::NAMED_INDIVIDUAL);
        add(graph, &self.node, rdf::TYPE, sosa::ACTUATOR);
        for change in &self.enacts {
            add(graph, &self.node, rdt::ENACTS, change);
        }
        self.node.clone()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Procedure {
    pub node: NamedNode,
    pub measure: NamedNode,
    pub sensor: Option<NamedNode>,
}

impl Procedure {
    pub fn emit(&self, graph: &mut Graph) -> NamedNode {
        add(graph, &self.node, rdf::TYPE, owl::NAMED_INDIVIDUAL);
        add(graph, &self.node, rdf::TYPE, sosa::PROCEDURE);
        add(graph, &self.node, ssn::HAS_OUTPUT, &self.measure);
        if let Some(sensor) = &self.sensor {
            add(graph, &self.node, ssn::IMPLEMENTED_BY, sensor);
        }
        self.node.clone()
    }
}

/// Value range a property must stay within
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OptimalConditionBounds {
    pub min: f64,
    pub min_inclusive: bool,
    pub max: f64,
    pub max_inclusive: bool,
}

impl OptimalConditionBounds {
    fn facets(&self) -> [(NamedNodeRef<'static>, f64); 2] {
        let lower = if self.min_inclusive {
            facet::MIN_INCLUSIVE
        } else {
            facet::MIN_EXCLUSIVE
        };
        let upper = if self.max_inclusive {
            facet::MAX_INCLUSIVE
        } else {
            facet::MAX_EXCLUSIVE
        };
        [(lower, self.min), (upper, self.max)]
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct OptimalCondition {
    pub node: NamedNode,
    pub property: NamedNode,
    pub reached_in_maximum_seconds: i64,
    pub bounds: OptimalConditionBounds,
}

impl OptimalCondition {
    /// Emits the condition typed by a restriction on `rdt:hasValueConstraint`
    /// whose data range is `xsd:double` narrowed by the bound facets.
    pub fn emit(&self, graph: &mut Graph) -> NamedNode {
        add(graph, &self.node, rdf::TYPE, owl::NAMED_INDIVIDUAL);
        add(graph, &self.node, rdf::TYPE, rdt::OPTIMAL_CONDITION);
        add(graph, &self.node, ssn::FOR_PROPERTY, &self.property);
        add(
            graph,
            &self.node,
            rdt::REACHED_IN_MAXIMUM_SECONDS,
            &integer(self.reached_in_maximum_seconds),
        );

        let restriction = BlankNode::default();
        add(graph, &self.node, rdf::TYPE, &restriction);
        add(graph, &restriction, rdf::TYPE, owl::RESTRICTION);
        add(graph, &restriction, owl::ON_PROPERTY, rdt::HAS_VALUE_CONSTRAINT);

        let data_range = BlankNode::default();
        add(graph, &restriction, owl::ON_DATA_RANGE, &data_range);
        add(graph, &data_range, rdf::TYPE, rdfs::DATATYPE);
        add(graph, &data_range, owl::ON_DATATYPE, xsd::DOUBLE);

        let facets: Vec<BlankNode> = self
            .bounds
            .facets()
            .into_iter()
            .map(|(kind, value)| {
                let node = BlankNode::default();
                add(graph, &node, kind, &Literal::from(value));
                node
            })
            .collect();
        let list = emit_list(graph, &facets);
        add(graph, &data_range, owl::WITH_RESTRICTIONS, &list);

        self.node.clone()
    }
}

/// Writes an RDF collection and returns its head (`rdf:nil` when empty)
fn emit_list(graph: &mut Graph, items: &[BlankNode]) -> Term {
    let cells: Vec<BlankNode> = items.iter().map(|_| BlankNode::default()).collect();
    for (i, (cell, item)) in cells.iter().zip(items).enumerate() {
        add(graph, cell, rdf::FIRST, item);
        match cells.get(i + 1) {
            Some(next) => add(graph, cell, rdf::REST, next),
            None => add(graph, cell, rdf::REST, rdf::NIL),
        }
    }
    cells
        .into_iter()
        .next()
        .map_or_else(|| rdf::NIL.into_owned().into(), Term::from)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ontology::vocab::RDT_NS;

    #[test]
    fn test_empty_list_is_nil() {
        let mut graph = Graph::new();
        assert_eq!(emit_list(&mut graph, &[]), Term::from(rdf::NIL.into_owned()));
        assert!(graph.is_empty());
    }

    fn node(local: &str) -> NamedNode {
        RDT_NS.term(local).unwrap()
    }

    #[test]
    fn test_platform_emits_exact_triples() {
        let mut graph = Graph::new();
        let platform = node("platform");
        let actuator = node("actuatorA");

        let emitted = Platform::new(platform.clone())
            .hosting(actuator.clone())
            .generate_combinations_only_from_optimal_conditions(true)
            .emit(&mut graph);

        assert_eq!(emitted, platform);
        assert_eq!(graph.len(), 4);
        assert!(graph.contains(TripleRef::new(&platform, rdf::TYPE, owl::NAMED_INDIVIDUAL)));
        assert!(graph.contains(TripleRef::new(&platform, rdf::TYPE, sosa::PLATFORM)));
        assert!(graph.contains(TripleRef::new(
            &platform,
            rdt::GENERATE_COMBINATIONS_ONLY_FROM_OPTIMAL_CONDITIONS,
            &Literal::new_typed_literal("true", xsd::BOOLEAN),
        )));
        assert!(graph.contains(TripleRef::new(&platform, sosa::HOSTS, &actuator)));
    }

    #[test]
    fn test_platform_fmu_binding() {
        let mut graph = Graph::new();
        let platform = node("platform");
        let fmu = FmuModel {
            node: node("fmu"),
            fidelity_seconds: 900,
            fmu_path: "NordPool.fmu".to_string(),
        }
        .emit(&mut graph);
        assert_eq!(graph.len(), 3);
        assert!(graph.contains(TripleRef::new(
            &fmu,
            rdt::HAS_SIMULATION_FIDELITY_SECONDS,
            &Literal::new_typed_literal("900", xsd::INTEGER),
        )));
        assert!(graph.contains(TripleRef::new(
            &fmu,
            rdt::HAS_URI,
            &Literal::new_simple_literal("NordPool.fmu"),
        )));

        Platform::new(platform.clone()).emit(&mut graph);
        Platform::add_fmu(&mut graph, &platform, &fmu);
        assert_eq!(graph.len(), 6);
        assert!(graph.contains(TripleRef::new(&platform, rdt::HAS_SIMULATION_MODEL, &fmu)));
    }

    #[test]
    fn test_observable_property_default_restriction() {
        let mut graph = Graph::new();
        let property = ObservableProperty {
            node: node("ElectricityPrice"),
            restriction: None,
        }
        .emit(&mut graph);

        // three typing triples plus four restriction triples
        assert_eq!(graph.len(), 7);
        assert!(graph.contains(TripleRef::new(&property.node, rdf::TYPE, &property.restriction)));
        assert!(graph.contains(TripleRef::new(&property.restriction, owl::ON_DATA_RANGE, xsd::DOUBLE)));
        assert!(graph.contains(TripleRef::new(
            &property.restriction,
            owl::QUALIFIED_CARDINALITY,
            &Literal::new_typed_literal("1", xsd::NON_NEGATIVE_INTEGER),
        )));
    }

    #[test]
    fn test_shared_restriction_is_not_duplicated() {
        let mut graph = Graph::new();
        let restriction = Restriction::single_double_value(&mut graph);
        ObservableProperty {
            node: node("p"),
            restriction: Some(restriction.clone()),
        }
        .emit(&mut graph);
        Measure {
            node: node("m"),
            restriction,
        }
        .emit(&mut graph);
        assert_eq!(graph.len(), 4 + 3 + 4);
    }

    #[test]
    fn test_sensor_and_procedure() {
        let mut graph = Graph::new();
        let p1 = node("p1");
        let p2 = node("p2");
        let sensor = Sensor {
            node: node("sensor"),
            observes: vec![p1.clone(), p2.clone()],
        }
        .emit(&mut graph);
        assert!(graph.contains(TripleRef::new(&sensor, rdf::TYPE, sosa::SENSOR)));
        assert!(graph.contains(TripleRef::new(&sensor, sosa::OBSERVES, &p1)));
        assert!(graph.contains(TripleRef::new(&sensor, sosa::OBSERVES, &p2)));
        assert_eq!(graph.len(), 4);

        let measure = node("measure");
        Procedure {
            node: node("procedure"),
            measure: measure.clone(),
            sensor: None,
        }
        .emit(&mut graph);
        assert_eq!(graph.len(), 7);
        assert!(graph.contains(TripleRef::new(&node("procedure"), ssn::HAS_OUTPUT, &measure)));

        Procedure {
            node: node("procedure2"),
            measure,
            sensor: Some(sensor.clone()),
        }
        .emit(&mut graph);
        assert!(graph.contains(TripleRef::new(&node("procedure2"), ssn::IMPLEMENTED_BY, &sensor)));
    }

    #[test]
    fn test_actuator() {
        let mut graph = Graph::new();
        let change = node("TemperatureIncrease");
        let actuator = Actuator {
            node: node("Heater"),
            enacts: vec![change.clone()],
        }
        .emit(&mut graph);
        assert_eq!(graph.len(), 3);
        assert!(graph.contains(TripleRef::new(&actuator, rdf::TYPE, sosa::ACTUATOR)));
        assert!(graph.contains(TripleRef::new(&actuator, rdt::ENACTS, &change)));
    }

    #[test]
    fn test_optimal_condition_facets() {
        let mut graph = Graph::new();
        let property = node("ElectricityPrice");
        let condition = OptimalCondition {
            node: node("PriceCondition"),
            property: property.clone(),
            reached_in_maximum_seconds: 1800,
            bounds: OptimalConditionBounds {
                min: 10.0,
                min_inclusive: true,
                max: 40.5,
                max_inclusive: false,
            },
        }
        .emit(&mut graph);

        assert!(graph.contains(TripleRef::new(&condition, ssn::FOR_PROPERTY, &property)));
        assert!(graph.contains(TripleRef::new(
            &condition,
            rdt::REACHED_IN_MAXIMUM_SECONDS,
            &Literal::new_typed_literal("1800", xsd::INTEGER),
        )));

        let lower = Literal::from(10.0);
        let upper = Literal::from(40.5);
        let facets: Vec<_> = graph
            .iter()
            .filter(|t| t.predicate == facet::MIN_INCLUSIVE || t.predicate == facet::MAX_EXCLUSIVE)
            .map(|t| (t.predicate.into_owned(), t.object.into_owned()))
            .collect();
        assert_eq!(facets.len(), 2);
        assert!(facets.contains(&(facet::MIN_INCLUSIVE.into_owned(), lower.into())));
        assert!(facets.contains(&(facet::MAX_EXCLUSIVE.into_owned(), upper.into())));

        // 4 condition triples, 1 typing + 2 restriction, 1 + 3 data range,
        // 2 facets and 4 list cells
        assert_eq!(graph.len(), 4 + 3 + 4 + 2 + 4);
        assert_eq!(
            graph
                .iter()
                .filter(|t| t.predicate == rdf::REST && t.object == TermRef::from(rdf::NIL))
                .count(),
            1
        );
    }
}

//! Vocabulary terms used by the instance model
//!
//! `rdf`, `rdfs` and `xsd` come from `oxrdf::vocab`.

use oxrdf::{NamedNode, NamedNodeRef};

use crate::Result;

/// IRI prefix that mints terms by appending a local name
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Namespace(&'static str);

impl Namespace {
    #[must_use]
    pub const fn new(iri: &'static str) -> Self {
        Self(iri)
    }

    #[must_use]
    pub const fn iri(&self) -> &'static str {
        self.0
    }

    pub fn term(&self, local: &str) -> Result<NamedNode> {
        Ok(NamedNode::new(format!("{}{local}", self.0))?)
    }
}

pub const OWL_NS: Namespace = Namespace::new("http://www.w3.org/2002/07/owl#");
pub const SOSA_NS: Namespace = Namespace::new("http://www.w3.org/ns/sosa/");
pub const SSN_NS: Namespace = Namespace::new("http://www.w3.org/ns/ssn/");
pub const SAREF_NS: Namespace = Namespace::new("https://saref.etsi.org/core/");
pub const RDT_NS: Namespace =
    Namespace::new("http://www.semanticweb.org/ivans/ontologies/2025/ruleless-digital-twins/");

pub mod owl {
    use super::NamedNodeRef;

    pub const NAMED_INDIVIDUAL: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://www.w3.org/2002/07/owl#NamedIndividual");
    pub const RESTRICTION: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://www.w3.org/2002/07/owl#Restriction");
    pub const ON_PROPERTY: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://www.w3.org/2002/07/owl#onProperty");
    pub const QUALIFIED_CARDINALITY: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://www.w3.org/2002/07/owl#qualifiedCardinality");
    pub const ON_DATA_RANGE: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://www.w3.org/2002/07/owl#onDataRange");
    pub const ON_DATATYPE: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://www.w3.org/2002/07/owl#onDatatype");
    pub const WITH_RESTRICTIONS: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://www.w3.org/2002/07/owl#withRestrictions");
}

/// XML Schema constraining facets
pub mod facet {
    use super::NamedNodeRef;

    pub const MIN_INCLUSIVE: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://www.w3.org/2001/XMLSchema#minInclusive");
    pub const MIN_EXCLUSIVE: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://www.w3.org/2001/XMLSchema#minExclusive");
    pub const MAX_INCLUSIVE: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://www.w3.org/2001/XMLSchema#maxInclusive");
    pub const MAX_EXCLUSIVE: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://www.w3.org/2001/XMLSchema#maxExclusive");
}

pub mod sosa {
    use super::NamedNodeRef;

    pub const PLATFORM: NamedNodeRef<'_> = NamedNodeRef::new_unchecked("http://www.w3.org/ns/sosa/Platform");
    pub const SENSOR: NamedNodeRef<'_> = NamedNodeRef::new_unchecked("http://www.w3.org/ns/sosa/Sensor");
    pub const ACTUATOR: NamedNodeRef<'_> = NamedNodeRef::new_unchecked("http://www.w3.org/ns/sosa/Actuator");
    pub const PROCEDURE: NamedNodeRef<'_> = NamedNodeRef::new_unchecked("http://www.w3.org/ns/sosa/Procedure");
    pub const OBSERVABLE_PROPERTY: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://www.w3.org/ns/sosa/ObservableProperty");
    pub const HOSTS: NamedNodeRef<'_> = NamedNodeRef::new_unchecked("http://www.w3.org/ns/sosa/hosts");
    pub const OBSERVES: NamedNodeRef<'_> = NamedNodeRef::new_unchecked("http://www.w3.org/ns/sosa/observes");
}

pub mod ssn {
    use super::NamedNodeRef;

    pub const OUTPUT: NamedNodeRef<'_> = NamedNodeRef::new_unchecked("http://www.w3.org/ns/ssn/Output");
    pub const PROPERTY: NamedNodeRef<'_> = NamedNodeRef::new_unchecked("http://www.w3.org/ns/ssn/Property");
    pub const HAS_OUTPUT: NamedNodeRef<'_> = NamedNodeRef::new_unchecked("http://www.w3.org/ns/ssn/hasOutput");
    pub const IMPLEMENTED_BY: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://www.w3.org/ns/ssn/implementedBy");
    pub const FOR_PROPERTY: NamedNodeRef<'_> = NamedNodeRef::new_unchecked("http://www.w3.org/ns/ssn/forProperty");
}

/// Ruleless digital twin vocabulary
pub mod rdt {
    use super::NamedNodeRef;

    macro_rules! rdt_term {
        ($name:ident, $local:literal) => {
            pub const $name: NamedNodeRef<'_> = NamedNodeRef::new_unchecked(concat!(
                "http://www.semanticweb.org/ivans/ontologies/2025/ruleless-digital-twins/",
                $local
            ));
        };
    }

    rdt_term!(FMU_MODEL, "FmuModel");
    rdt_term!(OPTIMAL_CONDITION, "OptimalCondition");
    rdt_term!(HAS_SIMULATION_FIDELITY_SECONDS, "hasSimulationFidelitySeconds");
    rdt_term!(HAS_URI, "hasUri");
    rdt_term!(HAS_SIMULATION_MODEL, "hasSimulationModel");
    rdt_term!(HAS_VALUE, "hasValue");
    rdt_term!(HAS_VALUE_CONSTRAINT, "hasValueConstraint");
    rdt_term!(REACHED_IN_MAXIMUM_SECONDS, "reachedInMaximumSeconds");
    rdt_term!(ENACTS, "enacts");
    rdt_term!(
        GENERATE_COMBINATIONS_ONLY_FROM_OPTIMAL_CONDITIONS,
        "generateCombinationsOnlyFromOptimalConditions"
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constants_match_namespaces() {
        assert_eq!(rdt::FMU_MODEL.as_str(), format!("{}FmuModel", RDT_NS.iri()));
        assert_eq!(sosa::HOSTS.as_str(), format!("{}hosts", SOSA_NS.iri()));
        assert_eq!(ssn::HAS_OUTPUT.as_str(), format!("{}hasOutput", SSN_NS.iri()));
        assert_eq!(owl::RESTRICTION.as_str(), format!("{}Restriction", OWL_NS.iri()));
    }

    #[test]
    fn test_namespace_term() {
        let node = SAREF_NS.term("Temperature").unwrap();
        assert_eq!(node.as_str(), "https://saref.etsi.org/core/Temperature");
        assert!(SAREF_NS.term("has space").is_err());
    }
}

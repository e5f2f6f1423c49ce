use std::io::Write;

use oxrdf::Graph;
use oxttl::TurtleSerializer;

use super::vocab::{OWL_NS, RDT_NS, SAREF_NS, SOSA_NS, SSN_NS};
use crate::Result;

/// Serialize `graph` as Turtle with the model's usual prefixes
pub fn write_turtle<W: Write>(graph: &Graph, writer: W, base_iri: Option<&str>) -> Result<W> {
    let mut serializer = TurtleSerializer::new()
        .with_prefix("rdf", "http://www.w3.org/1999/02/22-rdf-syntax-ns#")?
        .with_prefix("rdfs", "http://www.w3.org/2000/01/rdf-schema#")?
        .with_prefix("xsd", "http://www.w3.org/2001/XMLSchema#")?
        .with_prefix("owl", OWL_NS.iri())?
        .with_prefix("sosa", SOSA_NS.iri())?
        .with_prefix("ssn", SSN_NS.iri())?
        .with_prefix("saref", SAREF_NS.iri())?
        .with_prefix("rdt", RDT_NS.iri())?;
    if let Some(base) = base_iri {
        serializer = serializer.with_prefix("inst", base)?;
    }

    let mut writer = serializer.for_writer(writer);
    for triple in graph {
        writer.serialize_triple(triple)?;
    }
    Ok(writer.finish()?)
}

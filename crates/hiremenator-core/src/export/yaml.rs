// ABOUTME: Exports the agent registry as a structured YAML document.
// ABOUTME: Uses serde_yaml for serialization; agents appear in registration order.

use serde::Serialize;

use crate::agent::AgentKind;
use crate::registry::AgentRegistry;

#[derive(Debug, Serialize)]
struct YamlField<'a> {
    name: &'a str,
    description: &'a str,
}

#[derive(Debug, Serialize)]
struct YamlSchema<'a> {
    name: &'a str,
    fields: Vec<YamlField<'a>>,
}

#[derive(Debug, Serialize)]
struct YamlAgent<'a> {
    name: &'a str,
    kind: AgentKind,
    model: &'a str,
    description: &'a str,
    output_key: &'a str,
    tools: Vec<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    output_schema: Option<YamlSchema<'a>>,
}

#[derive(Debug, Serialize)]
struct YamlCatalog<'a> {
    version: &'static str,
    agents: Vec<YamlAgent<'a>>,
}

/// Export every agent with its children, output key and schema.
///
/// Instructions are left out; they are long and belong in the agent detail view.
pub fn export_yaml(registry: &AgentRegistry) -> Result<String, serde_yaml::Error> {
    let agents = registry
        .iter()
        .map(|spec| YamlAgent {
            name: &spec.name,
            kind: spec.kind,
            model: &spec.model,
            description: &spec.description,
            output_key: &spec.output_key,
            tools: spec.tools.iter().map(|t| t.name()).collect(),
            output_schema: spec.output_schema.as_ref().map(|schema| YamlSchema {
                name: &schema.name,
                fields: schema
                    .fields
                    .iter()
                    .map(|f| YamlField {
                        name: &f.name,
                        description: &f.description,
                    })
                    .collect(),
            }),
        })
        .collect();

    serde_yaml::to_string(&YamlCatalog {
        version: "0.1",
        agents,
    })
}

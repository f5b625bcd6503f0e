// ABOUTME: AgentRegistry maps agent names to their immutable specs and exposes delegation edges.
// ABOUTME: Built once at startup, validated for dangling children and cycles, then shared read-only.

use std::collections::HashMap;

use thiserror::Error;

use crate::agent::{AgentSpec, DelegationEdge, ToolRef};

/// Errors raised while building or querying the registry.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    #[error("agent already registered: {0}")]
    DuplicateName(String),

    #[error("agent not found: {0}")]
    NotFound(String),

    #[error("agent {parent} lists unregistered child {child}")]
    UnknownChild { parent: String, child: String },

    #[error("delegation cycle: {}", .0.join(" -> "))]
    Cycle(Vec<String>),
}

/// Name-indexed collection of agent specs. Iteration follows registration order.
#[derive(Debug, Clone, Default)]
pub struct AgentRegistry {
    specs: Vec<AgentSpec>,
    index: HashMap<String, usize>,
}

impl AgentRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a spec. Fails without touching the registry if the name is taken.
    pub fn register(&mut self, spec: AgentSpec) -> Result<(), RegistryError> {
        if self.index.contains_key(&spec.name) {
            return Err(RegistryError::DuplicateName(spec.name));
        }
        tracing::debug!(agent = %spec.name, kind = %spec.kind, "registered agent");
        self.index.insert(spec.name.clone(), self.specs.len());
        self.specs.push(spec);
        Ok(())
    }

    /// Look up a spec by name.
    pub fn resolve(&self, name: &str) -> Result<&AgentSpec, RegistryError> {
        self.index
            .get(name)
            .map(|&i| &self.specs[i])
            .ok_or_else(|| RegistryError::NotFound(name.to_string()))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.specs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.specs.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &AgentSpec> {
        self.specs.iter()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.specs.iter().map(|s| s.name.as_str())
    }

    /// Every parent → child relationship, in registration then tool order.
    pub fn edges(&self) -> Vec<DelegationEdge> {
        self.specs
            .iter()
            .flat_map(|spec| {
                spec.tools.iter().map(|child| DelegationEdge {
                    parent: spec.name.clone(),
                    child: child.clone(),
                })
            })
            .collect()
    }

    /// Check that every agent child is registered and that no agent
    /// reaches itself through its children.
    pub fn validate(&self) -> Result<(), RegistryError> {
        for spec in &self.specs {
            for child in spec.child_agents() {
                if !self.contains(child) {
                    return Err(RegistryError::UnknownChild {
                        parent: spec.name.clone(),
                        child: child.to_string(),
                    });
                }
            }
        }

        let mut marks = vec![Mark::Unvisited; self.specs.len()];
        let mut path = Vec::new();
        for i in 0..self.specs.len() {
            self.visit(i, &mut marks, &mut path)?;
        }
        Ok(())
    }

    fn visit(&self, i: usize, marks: &mut [Mark], path: &mut Vec<usize>) -> Result<(), RegistryError> {
        match marks[i] {
            Mark::Done => return Ok(()),
            Mark::InProgress => {
                let start = path.iter().position(|&p| p == i).unwrap_or(0);
                let mut cycle: Vec<String> =
                    path[start..].iter().map(|&p| self.specs[p].name.clone()).collect();
                cycle.push(self.specs[i].name.clone());
                return Err(RegistryError::Cycle(cycle));
            }
            Mark::Unvisited => {}
        }

        marks[i] = Mark::InProgress;
        path.push(i);
        for tool in &self.specs[i].tools {
            if let ToolRef::Agent(child) = tool
                && let Some(&j) = self.index.get(child)
            {
                self.visit(j, marks, path)?;
            }
        }
        path.pop();
        marks[i] = Mark::Done;
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mark {
    Unvisited,
    InProgress,
    Done,
}

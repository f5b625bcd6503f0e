// ABOUTME: The delegation dispatcher: runs an agent against the backend and executes the children it calls.
// ABOUTME: Children run concurrently with bounded fan-out; results merge by output key in call order.

use std::sync::Arc;

use futures::future::BoxFuture;
use futures::{FutureExt, StreamExt};
use tokio_util::sync::CancellationToken;
use tracing::Instrument;

use hiremenator_core::agent::{AgentSpec, SEARCH_OUTPUT_KEY, SEARCH_TOOL_NAME, ToolRef};
use hiremenator_core::registry::{AgentRegistry, RegistryError};
use hiremenator_core::schema;
use hiremenator_core::search::render_results;

use crate::backend::{Backend, BackendError, Completion, GenerateRequest};
use crate::config::DispatchConfig;
use crate::context::{AgentReply, ChildCall, ChildResult, ContextEntry, DelegationContext, Turn};
use crate::error::AgentError;
use crate::search::SearchAdapter;

/// What one child call produced, ready to be merged into the parent's context.
struct ChildOutcome {
    name: String,
    output_key: String,
    entry: ContextEntry,
    /// Keys the child itself reported as incomplete.
    incomplete: Vec<String>,
}

/// Runs agents from an immutable registry against a pluggable backend.
pub struct Dispatcher {
    registry: Arc<AgentRegistry>,
    backend: Arc<dyn Backend>,
    search: SearchAdapter,
    config: DispatchConfig,
}

impl Dispatcher {
    /// Create a dispatcher. The registry is validated once here.
    pub fn new(
        registry: Arc<AgentRegistry>,
        backend: Arc<dyn Backend>,
        search: SearchAdapter,
        config: DispatchConfig,
    ) -> Result<Self, RegistryError> {
        registry.validate()?;
        tracing::info!(
            agents = registry.len(),
            backend = backend.provider_name(),
            search = search.provider_name(),
            "dispatcher ready"
        );
        Ok(Self {
            registry,
            backend,
            search,
            config,
        })
    }

    pub fn registry(&self) -> &Arc<AgentRegistry> {
        &self.registry
    }

    pub fn config(&self) -> &DispatchConfig {
        &self.config
    }

    /// Run `agent` on `message`, preceded by earlier conversation `history`.
    ///
    /// Cancelling `cancel` aborts every in-flight backend and search call
    /// below this request and yields `AgentError::Cancelled`.
    pub async fn run(
        &self,
        agent: &str,
        history: &[Turn],
        message: &str,
        cancel: &CancellationToken,
    ) -> Result<AgentReply, AgentError> {
        let mut turns = history.to_vec();
        turns.push(Turn::User(message.to_string()));
        self.run_agent(agent.to_string(), turns, cancel.clone()).await
    }

    fn run_agent(
        &self,
        name: String,
        mut history: Vec<Turn>,
        cancel: CancellationToken,
    ) -> BoxFuture<'_, Result<AgentReply, AgentError>> {
        let span = tracing::info_span!("agent", name = %name);
        async move {
            let spec = self
                .registry
                .resolve(&name)
                .map_err(|_| AgentError::NotFound(name.clone()))?;
            let instruction = self.instruction_for(spec);
            let mut context = DelegationContext::new();
            let mut child_incomplete = Vec::new();

            for step in 1..=self.config.max_turns {
                if cancel.is_cancelled() {
                    return Err(AgentError::Cancelled);
                }

                let request = GenerateRequest::for_agent(
                    spec,
                    &self.registry,
                    instruction.clone(),
                    history.clone(),
                    context.clone(),
                );

                match self.generate(spec, &request, &cancel).await? {
                    Completion::Text(text) => {
                        tracing::debug!(step, "agent answered");
                        return self.finish(spec, text, context, child_incomplete);
                    }
                    Completion::Calls(calls) => {
                        tracing::debug!(step, calls = calls.len(), "agent delegated");
                        let outcomes = self.run_children(spec, &calls, &cancel).await?;

                        let mut results = Vec::with_capacity(outcomes.len());
                        for outcome in outcomes {
                            results.push(ChildResult {
                                name: outcome.name,
                                output: outcome.entry.text.clone(),
                            });
                            context.absorb(outcome.output_key, outcome.entry);
                            child_incomplete.extend(outcome.incomplete);
                        }
                        history.push(Turn::Calls(calls));
                        history.push(Turn::Results(results));
                    }
                }
            }

            Err(AgentError::TurnLimit {
                agent: spec.name.clone(),
                turns: self.config.max_turns,
            })
        }
        .instrument(span)
        .boxed()
    }

    fn instruction_for(&self, spec: &AgentSpec) -> String {
        match (&spec.output_schema, self.config.validate_outputs) {
            (Some(schema), true) => format!("{}\n\n{}", spec.instruction, schema.prompt_hint()),
            _ => spec.instruction.clone(),
        }
    }

    /// One backend step with timeout, fixed-backoff retries and cancellation.
    async fn generate(
        &self,
        spec: &AgentSpec,
        request: &GenerateRequest,
        cancel: &CancellationToken,
    ) -> Result<Completion, AgentError> {
        let attempts = self.config.retries.saturating_add(1);
        let mut last_error = BackendError::Timeout;

        for attempt in 1..=attempts {
            if attempt > 1 {
                tokio::select! {
                    biased;
                    _ = cancel.cancelled() => return Err(AgentError::Cancelled),
                    _ = tokio::time::sleep(self.config.retry_backoff) => {}
                }
            }

            let call = tokio::time::timeout(self.config.call_timeout, self.backend.generate(request));
            let outcome = tokio::select! {
                biased;
                _ = cancel.cancelled() => return Err(AgentError::Cancelled),
                outcome = call => outcome,
            };

            let err = match outcome {
                Ok(Ok(completion)) => return Ok(completion),
                Ok(Err(err)) => err,
                Err(_) => BackendError::Timeout,
            };

            tracing::warn!(
                agent = %spec.name,
                attempt,
                attempts,
                error = %err,
                "backend call failed"
            );
            let retryable = err.is_retryable();
            last_error = err;
            if !retryable {
                break;
            }
        }

        Err(AgentError::BackendUnavailable {
            agent: spec.name.clone(),
            reason: last_error.to_string(),
        })
    }

    /// Run every requested child, at most `max_fanout` at a time.
    ///
    /// Outcomes come back in call order whatever order they finished in.
    /// Environmental failures become unavailable entries; anything else
    /// cancels the remaining siblings and propagates.
    async fn run_children(
        &self,
        parent: &AgentSpec,
        calls: &[ChildCall],
        cancel: &CancellationToken,
    ) -> Result<Vec<ChildOutcome>, AgentError> {
        let resolved: Vec<(&ChildCall, &ToolRef)> = calls
            .iter()
            .map(|call| {
                parent
                    .find_tool(&call.name)
                    .map(|tool| (call, tool))
                    .ok_or_else(|| AgentError::NotFound(call.name.clone()))
            })
            .collect::<Result<_, _>>()?;

        let scope = cancel.child_token();
        let children: Vec<_> = resolved
            .into_iter()
            .enumerate()
            .map(|(index, (call, tool))| {
                let token = scope.child_token();
                async move { (index, tool, self.run_child(call, tool, token).await) }
            })
            .collect();
        let mut pending = futures::stream::iter(children).buffer_unordered(self.config.max_fanout);

        let mut outcomes = Vec::with_capacity(calls.len());
        while let Some((index, tool, result)) = pending.next().await {
            match result {
                Ok(outcome) => outcomes.push((index, outcome)),
                Err(err) if err.is_degradable() => {
                    let output_key = self.output_key_for(tool);
                    tracing::warn!(
                        parent = %parent.name,
                        child = %tool,
                        output_key = %output_key,
                        error = %err,
                        "child failed, continuing without its data"
                    );
                    outcomes.push((
                        index,
                        ChildOutcome {
                            name: tool.name().to_string(),
                            entry: ContextEntry::unavailable(tool.name(), &err),
                            output_key,
                            incomplete: Vec::new(),
                        },
                    ));
                }
                Err(err) => {
                    scope.cancel();
                    return Err(err);
                }
            }
        }

        outcomes.sort_by_key(|(index, _)| *index);
        Ok(outcomes.into_iter().map(|(_, outcome)| outcome).collect())
    }

    async fn run_child(
        &self,
        call: &ChildCall,
        tool: &ToolRef,
        cancel: CancellationToken,
    ) -> Result<ChildOutcome, AgentError> {
        match tool {
            ToolRef::Search => {
                let results = tokio::select! {
                    biased;
                    _ = cancel.cancelled() => return Err(AgentError::Cancelled),
                    results = self.search.search(&call.input) => results?,
                };
                let text = render_results(call.input.trim(), &results);
                Ok(ChildOutcome {
                    name: SEARCH_TOOL_NAME.to_string(),
                    output_key: SEARCH_OUTPUT_KEY.to_string(),
                    entry: ContextEntry::search(SEARCH_TOOL_NAME, text, results),
                    incomplete: Vec::new(),
                })
            }
            ToolRef::Agent(child) => {
                let reply = self
                    .run_agent(child.clone(), vec![Turn::User(call.input.clone())], cancel)
                    .await?;
                let results = reply.context.all_results();
                Ok(ChildOutcome {
                    name: reply.agent,
                    output_key: reply.output_key,
                    entry: ContextEntry::search(child.clone(), reply.text, results),
                    incomplete: reply.incomplete,
                })
            }
        }
    }

    fn output_key_for(&self, tool: &ToolRef) -> String {
        match tool {
            ToolRef::Search => SEARCH_OUTPUT_KEY.to_string(),
            ToolRef::Agent(name) => self
                .registry
                .resolve(name)
                .map(|spec| spec.output_key.clone())
                .unwrap_or_else(|_| format!("{}data", name.replace('_', ""))),
        }
    }

    fn finish(
        &self,
        spec: &AgentSpec,
        text: String,
        context: DelegationContext,
        child_incomplete: Vec<String>,
    ) -> Result<AgentReply, AgentError> {
        let parsed = match (&spec.output_schema, self.config.validate_outputs) {
            (Some(output_schema), true) => Some(schema::validate(&text, output_schema)?),
            _ => None,
        };

        let mut incomplete = context.unavailable_keys();
        incomplete.extend(child_incomplete);
        incomplete.sort();
        incomplete.dedup();

        if !incomplete.is_empty() {
            tracing::info!(missing = ?incomplete, "answer built from partial data");
        }

        Ok(AgentReply {
            agent: spec.name.clone(),
            output_key: spec.output_key.clone(),
            text,
            context,
            incomplete,
            parsed,
        })
    }
}

// ABOUTME: Google Gemini API adapter implementing the Backend trait.
// ABOUTME: Translates GenerateRequest into generateContent calls with one function declaration per child.

use async_trait::async_trait;
use serde_json::{Value, json};

use crate::backend::{Backend, BackendError, Completion, GenerateRequest, ToolDescriptor};
use crate::config::ConfigError;
use crate::context::{ChildCall, Turn};
use crate::providers::context_block;

const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";
const MAX_TOKENS: u32 = 8192;

/// Google Gemini backend. Calls the generateContent API with function
/// declarations and maps functionCall parts back to child calls.
pub struct GeminiBackend {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
}

impl GeminiBackend {
    /// Create a new GeminiBackend reading configuration from environment variables.
    /// Required: `GEMINI_API_KEY`
    /// Optional: `GEMINI_BASE_URL` (defaults to https://generativelanguage.googleapis.com)
    pub fn from_env() -> Result<Self, ConfigError> {
        let api_key = std::env::var("GEMINI_API_KEY")
            .ok()
            .filter(|k| !k.is_empty())
            .ok_or(ConfigError::Missing("GEMINI_API_KEY"))?;

        let base_url =
            std::env::var("GEMINI_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());

        Ok(Self::new(api_key, base_url))
    }

    /// Create a new GeminiBackend with explicit configuration.
    pub fn new(api_key: String, base_url: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key,
            base_url,
        }
    }

    /// Build the JSON request body for the Gemini generateContent API.
    pub fn build_request_body(request: &GenerateRequest) -> Value {
        let mut system_prompt = request.instruction.clone();
        if let Some(block) = context_block(&request.context) {
            system_prompt.push_str("\n\n");
            system_prompt.push_str(&block);
        }

        let mut contents = Vec::new();
        for turn in &request.history {
            contents.push(match turn {
                Turn::User(text) => json!({"role": "user", "parts": [{"text": text}]}),
                Turn::Model(text) => json!({"role": "model", "parts": [{"text": text}]}),
                Turn::Calls(calls) => {
                    let parts: Vec<Value> = calls
                        .iter()
                        .map(|call| {
                            let param = parameter_for(&request.tools, &call.name);
                            json!({"functionCall": {"name": call.name, "args": {param: call.input}}})
                        })
                        .collect();
                    json!({"role": "model", "parts": parts})
                }
                Turn::Results(results) => {
                    let parts: Vec<Value> = results
                        .iter()
                        .map(|r| {
                            json!({"functionResponse": {"name": r.name, "response": {"output": r.output}}})
                        })
                        .collect();
                    json!({"role": "user", "parts": parts})
                }
            });
        }

        // Gemini requires at least one user turn
        if contents.is_empty() {
            contents.push(json!({"role": "user", "parts": [{"text": "Hello"}]}));
        }

        let mut body = json!({
            "system_instruction": {
                "parts": [{"text": system_prompt}]
            },
            "contents": coalesce_gemini_contents(contents),
            "generation_config": {
                "max_output_tokens": MAX_TOKENS
            }
        });

        if !request.tools.is_empty() {
            body["tools"] = json!([{"function_declarations": build_gemini_tools(&request.tools)}]);
        }

        body
    }

    /// Parse a Gemini generateContent response into a Completion.
    pub fn parse_response(response_body: &Value) -> Result<Completion, BackendError> {
        if let Some(reason) = response_body
            .get("promptFeedback")
            .and_then(|f| f.get("blockReason"))
            .and_then(|r| r.as_str())
        {
            return Err(BackendError::Rejected {
                status: 200,
                body: format!("prompt blocked: {}", reason),
            });
        }

        let candidate = response_body
            .get("candidates")
            .and_then(|c| c.as_array())
            .ok_or_else(|| {
                BackendError::InvalidResponse("missing candidates array in response".to_string())
            })?
            .first()
            .ok_or_else(|| BackendError::InvalidResponse("empty candidates array".to_string()))?;

        let parts = candidate
            .get("content")
            .and_then(|c| c.get("parts"))
            .and_then(|p| p.as_array())
            .ok_or_else(|| {
                BackendError::InvalidResponse("missing parts array in content".to_string())
            })?;

        let calls: Vec<ChildCall> = parts
            .iter()
            .filter_map(|part| part.get("functionCall"))
            .map(parse_gemini_function_call)
            .collect::<Result<_, _>>()?;
        if !calls.is_empty() {
            return Ok(Completion::Calls(calls));
        }

        let text: Vec<&str> = parts
            .iter()
            .filter_map(|part| part.get("text").and_then(|t| t.as_str()))
            .filter(|t| !t.is_empty())
            .collect();
        if !text.is_empty() {
            return Ok(Completion::Text(text.join("")));
        }

        let finish_reason = candidate
            .get("finishReason")
            .and_then(|f| f.as_str())
            .unwrap_or("unknown");
        Err(BackendError::InvalidResponse(format!(
            "no content in response (finish reason {})",
            finish_reason
        )))
    }
}

/// Name of the single string argument the tool takes.
fn parameter_for<'a>(tools: &'a [ToolDescriptor], name: &str) -> &'a str {
    tools
        .iter()
        .find(|t| t.name == name)
        .map(|t| t.parameter.as_str())
        .unwrap_or("request")
}

/// Convert tool descriptors to Gemini's function declaration format.
fn build_gemini_tools(tools: &[ToolDescriptor]) -> Vec<Value> {
    tools
        .iter()
        .map(|tool| {
            json!({
                "name": tool.name,
                "description": tool.description,
                "parameters": {
                    "type": "object",
                    "properties": {
                        tool.parameter.clone(): {"type": "string"}
                    },
                    "required": [tool.parameter]
                }
            })
        })
        .collect()
}

/// Parse a Gemini functionCall object into a ChildCall.
fn parse_gemini_function_call(function_call: &Value) -> Result<ChildCall, BackendError> {
    let name = function_call
        .get("name")
        .and_then(|n| n.as_str())
        .ok_or_else(|| BackendError::InvalidResponse("functionCall missing name".to_string()))?;

    let args = function_call.get("args").cloned().unwrap_or(json!({}));
    let input = ["request", "query"]
        .iter()
        .find_map(|key| args.get(*key).and_then(|v| v.as_str()))
        .map(String::from)
        .unwrap_or_else(|| args.to_string());

    Ok(ChildCall::new(name, input))
}

/// Merge consecutive contents with the same role (Gemini requires alternating roles).
fn coalesce_gemini_contents(contents: Vec<Value>) -> Vec<Value> {
    let mut result: Vec<Value> = Vec::new();

    for content in contents {
        let role = content.get("role").and_then(|r| r.as_str()).unwrap_or("user");
        let parts = content
            .get("parts")
            .and_then(|p| p.as_array())
            .cloned()
            .unwrap_or_default();

        if let Some(last) = result.last_mut()
            && last.get("role").and_then(|r| r.as_str()) == Some(role)
            && let Some(last_parts) = last.get_mut("parts").and_then(|p| p.as_array_mut())
        {
            last_parts.extend(parts);
            continue;
        }

        result.push(json!({"role": role, "parts": parts}));
    }

    result
}

#[async_trait]
impl Backend for GeminiBackend {
    async fn generate(&self, request: &GenerateRequest) -> Result<Completion, BackendError> {
        let body = Self::build_request_body(request);
        let url = format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url, request.model
        );

        let response = self
            .client
            .post(&url)
            .header("Content-Type", "application/json")
            .header("x-goog-api-key", &self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    BackendError::Timeout
                } else {
                    BackendError::Unreachable(format!("HTTP request failed: {}", e.without_url()))
                }
            })?;

        let status = response.status();

        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(BackendError::RateLimited);
        }

        if status.is_server_error() {
            return Err(BackendError::Unreachable(format!("server error: {}", status)));
        }

        if !status.is_success() {
            let error_body = response.text().await.unwrap_or_default();
            return Err(BackendError::Rejected {
                status: status.as_u16(),
                body: error_body,
            });
        }

        let response_body: Value = response.json().await.map_err(|e| {
            BackendError::InvalidResponse(format!("failed to parse JSON: {}", e.without_url()))
        })?;

        Self::parse_response(&response_body)
    }

    fn provider_name(&self) -> &str {
        "gemini"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::{ChildResult, ContextEntry, DelegationContext};

    fn tools() -> Vec<ToolDescriptor> {
        vec![
            ToolDescriptor {
                name: "google_search".into(),
                description: "Search the web".into(),
                parameter: "query".into(),
            },
            ToolDescriptor {
                name: "googlecv".into(),
                description: "CV research".into(),
                parameter: "request".into(),
            },
        ]
    }

    fn request(history: Vec<Turn>) -> GenerateRequest {
        GenerateRequest {
            agent: "cv_agent".into(),
            model: "gemini-2.0-flash-001".into(),
            instruction: "You are the CV Agent.".into(),
            history,
            tools: tools(),
            context: DelegationContext::new(),
        }
    }

    #[test]
    fn gemini_backend_creation() {
        let backend = GeminiBackend::new("test-key".into(), DEFAULT_BASE_URL.into());
        assert_eq!(backend.provider_name(), "gemini");
        assert_eq!(backend.api_key, "test-key");
        assert_eq!(backend.base_url, "https://generativelanguage.googleapis.com");
    }

    #[test]
    fn request_body_declares_children() {
        let body = GeminiBackend::build_request_body(&request(vec![Turn::User("Improve my CV".into())]));

        let sys_text = body["system_instruction"]["parts"][0]["text"].as_str().unwrap();
        assert_eq!(sys_text, "You are the CV Agent.");

        let contents = body["contents"].as_array().unwrap();
        assert_eq!(contents.len(), 1);
        assert_eq!(contents[0]["role"], "user");

        let declarations = body["tools"][0]["function_declarations"].as_array().unwrap();
        assert_eq!(declarations.len(), 2);
        assert_eq!(declarations[0]["name"], "google_search");
        assert_eq!(declarations[0]["parameters"]["required"][0], "query");
        assert_eq!(declarations[1]["parameters"]["properties"]["request"]["type"], "string");
        assert_eq!(body["generation_config"]["max_output_tokens"], 8192);
    }

    #[test]
    fn request_body_maps_calls_and_results() {
        let history = vec![
            Turn::User("Improve my CV".into()),
            Turn::Calls(vec![
                ChildCall::new("google_search", "cv tips"),
                ChildCall::new("googlecv", "enrich my projects"),
            ]),
            Turn::Results(vec![
                ChildResult {
                    name: "google_search".into(),
                    output: "1. tips".into(),
                },
                ChildResult {
                    name: "googlecv".into(),
                    output: "enriched".into(),
                },
            ]),
        ];
        let body = GeminiBackend::build_request_body(&request(history));
        let contents = body["contents"].as_array().unwrap();
        assert_eq!(contents.len(), 3);

        let calls = &contents[1];
        assert_eq!(calls["role"], "model");
        assert_eq!(calls["parts"][0]["functionCall"]["args"]["query"], "cv tips");
        assert_eq!(calls["parts"][1]["functionCall"]["args"]["request"], "enrich my projects");

        let results = &contents[2];
        assert_eq!(results["role"], "user");
        assert_eq!(results["parts"][1]["functionResponse"]["name"], "googlecv");
        assert_eq!(results["parts"][1]["functionResponse"]["response"]["output"], "enriched");
    }

    #[test]
    fn request_body_includes_context_block() {
        let mut req = request(vec![Turn::User("hi".into())]);
        req.context
            .insert("googlecvdata", ContextEntry::text("googlecv", "phrasing ideas"));
        let body = GeminiBackend::build_request_body(&req);
        let sys_text = body["system_instruction"]["parts"][0]["text"].as_str().unwrap();
        assert!(sys_text.contains("[Shared context]"));
        assert!(sys_text.contains("googlecvdata"));
    }

    #[test]
    fn leaf_agents_without_tools_omit_declarations() {
        let mut req = request(vec![Turn::User("hi".into())]);
        req.tools.clear();
        let body = GeminiBackend::build_request_body(&req);
        assert!(body.get("tools").is_none());
    }

    #[test]
    fn parses_function_calls() {
        let response = json!({
            "candidates": [{
                "content": {
                    "parts": [
                        {"functionCall": {"name": "google_search", "args": {"query": "resume verbs"}}},
                        {"functionCall": {"name": "googlecv", "args": {"request": "enrich"}}}
                    ],
                    "role": "model"
                },
                "finishReason": "STOP"
            }]
        });

        match GeminiBackend::parse_response(&response).unwrap() {
            Completion::Calls(calls) => {
                assert_eq!(
                    calls,
                    vec![
                        ChildCall::new("google_search", "resume verbs"),
                        ChildCall::new("googlecv", "enrich"),
                    ]
                );
            }
            other => panic!("expected Calls, got {:?}", other),
        }
    }

    #[test]
    fn parses_text_response() {
        let response = json!({
            "candidates": [{
                "content": {"parts": [{"text": "Here is "}, {"text": "your CV."}], "role": "model"},
                "finishReason": "STOP"
            }]
        });
        assert_eq!(
            GeminiBackend::parse_response(&response).unwrap(),
            Completion::Text("Here is your CV.".into())
        );
    }

    #[test]
    fn unexpected_args_are_passed_as_json() {
        let call = json!({"name": "googlecv", "args": {"topic": "cv"}});
        let parsed = parse_gemini_function_call(&call).unwrap();
        assert_eq!(parsed.input, r#"{"topic":"cv"}"#);
    }

    #[test]
    fn empty_parts_are_invalid() {
        let response = json!({
            "candidates": [{"content": {"parts": [], "role": "model"}, "finishReason": "MAX_TOKENS"}]
        });
        let err = GeminiBackend::parse_response(&response).unwrap_err();
        assert!(err.to_string().contains("MAX_TOKENS"));
    }

    #[test]
    fn blocked_prompt_is_rejected() {
        let response = json!({"promptFeedback": {"blockReason": "SAFETY"}});
        assert!(matches!(
            GeminiBackend::parse_response(&response),
            Err(BackendError::Rejected { .. })
        ));
    }

    #[test]
    fn coalesce_merges_consecutive_same_role() {
        let contents = vec![
            json!({"role": "user", "parts": [{"text": "First"}]}),
            json!({"role": "user", "parts": [{"text": "Second"}]}),
            json!({"role": "model", "parts": [{"text": "Reply"}]}),
            json!({"role": "user", "parts": [{"text": "Third"}]}),
        ];

        let result = coalesce_gemini_contents(contents);
        assert_eq!(result.len(), 3);
        assert_eq!(result[0]["parts"].as_array().unwrap().len(), 2);
        assert_eq!(result[0]["parts"][1]["text"], "Second");
    }

    #[tokio::test]
    async fn transport_errors_do_not_leak_the_api_key() {
        let backend = GeminiBackend::new(
            "GEMINI-SECRET-999".to_string(),
            "http://127.0.0.1:1".to_string(),
        );
        let err = backend
            .generate(&request(vec![Turn::User("hello".into())]))
            .await
            .unwrap_err();

        assert!(matches!(err, BackendError::Unreachable(_)), "{err:?}");
        assert!(!err.to_string().contains("GEMINI-SECRET-999"), "{err}");
        assert!(!format!("{err:?}").contains("GEMINI-SECRET-999"));
    }

    #[tokio::test]
    #[cfg(feature = "live-test")]
    async fn gemini_backend_basic() {
        let backend = GeminiBackend::from_env().expect("GEMINI_API_KEY must be set");
        let mut req = request(vec![Turn::User("Say hello in one word.".into())]);
        req.tools.clear();
        let result = backend.generate(&req).await;
        assert!(result.is_ok(), "live test failed: {:?}", result.err());
    }
}

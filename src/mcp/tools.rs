//! Tool Registry and Invocation Handling
//!
//! This module stores the server's callable tools and runs invocations
//! through the full argument/result contract:
//! - arguments are validated against the declared input schema before the
//!   handler ever runs
//! - the handler's structured payload is validated against the output
//!   schema when one is declared

use super::error::AppsError;
use super::models::{InvocationResult, ToolDescriptor};
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use futures_util::future::BoxFuture;
use serde_json::{json, Value};
use std::sync::Arc;

/// Async tool handler: arguments in, dual-channel result out
pub type ToolHandler =
    Arc<dyn Fn(Value) -> BoxFuture<'static, Result<InvocationResult, AppsError>> + Send + Sync>;

struct RegisteredTool {
    descriptor: ToolDescriptor,
    handler: ToolHandler,
}

/// Registry of callable tools, one per server instance.
/// DashMap allows concurrent access without external Mutexes.
#[derive(Default)]
pub struct ToolRegistry {
    tools: DashMap<String, RegisteredTool>,
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self {
            tools: DashMap::new(),
        }
    }

    /// Registers a tool descriptor with its handler.
    ///
    /// Fails with `AppsError::DuplicateTool` if the name is already taken;
    /// descriptors are immutable once registered.
    pub fn register(
        &self,
        descriptor: ToolDescriptor,
        handler: ToolHandler,
    ) -> Result<(), AppsError> {
        match self.tools.entry(descriptor.name.clone()) {
            Entry::Occupied(occupied) => Err(AppsError::DuplicateTool(occupied.key().clone())),
            Entry::Vacant(vacant) => {
                vacant.insert(RegisteredTool {
                    descriptor,
                    handler,
                });
                Ok(())
            }
        }
    }

    /// URI of the view resource a tool is linked to, if the tool exists and
    /// declares one.
    pub fn view_uri(&self, name: &str) -> Option<String> {
        self.tools
            .get(name)
            .and_then(|tool| tool.descriptor.view_uri.clone())
    }

    /// Returns all registered descriptors, ordered by name for stable listings.
    pub fn descriptors(&self) -> Vec<ToolDescriptor> {
        let mut descriptors: Vec<ToolDescriptor> = self
            .tools
            .iter()
            .map(|entry| entry.descriptor.clone())
            .collect();
        descriptors.sort_by(|a, b| a.name.cmp(&b.name));
        descriptors
    }

    /// Invokes a registered tool with the given arguments.
    ///
    /// A schema mismatch yields `AppsError::InvalidArguments` without the
    /// handler running. An absent `arguments` member is treated as the empty
    /// object, matching how hosts call zero-parameter tools.
    pub async fn invoke(
        &self,
        name: &str,
        arguments: Value,
    ) -> Result<InvocationResult, AppsError> {
        let (handler, input_schema, output_schema) = {
            let tool = self
                .tools
                .get(name)
                .ok_or_else(|| AppsError::UnknownTool(name.to_string()))?;
            (
                tool.handler.clone(),
                tool.descriptor.input_schema.clone(),
                tool.descriptor.output_schema.clone(),
            )
        };

        let args = if arguments.is_null() {
            json!({})
        } else {
            arguments
        };

        let errors = validation_errors(&input_schema, &args)?;
        if !errors.is_empty() {
            return Err(AppsError::InvalidArguments(errors.join("\n")));
        }

        let result = handler(args).await?;

        if let Some(schema) = &output_schema {
            let structured = result.structured().ok_or_else(|| {
                AppsError::ToolExecution(
                    "declared an output schema but returned no structured content".to_string(),
                )
            })?;
            let errors = validation_errors(schema, structured)?;
            if !errors.is_empty() {
                return Err(AppsError::ToolExecution(format!(
                    "structured content violates the output schema:\n{}",
                    errors.join("\n")
                )));
            }
        }

        Ok(result)
    }
}

/// Collects schema violations for an instance, one line per error.
fn validation_errors(schema: &Value, instance: &Value) -> Result<Vec<String>, AppsError> {
    let validator = jsonschema::validator_for(schema)
        .map_err(|e| AppsError::ToolExecution(format!("failed to compile schema: {}", e)))?;
    Ok(validator
        .iter_errors(instance)
        .map(|error| format!("- {}: {}", error.instance_path, error))
        .collect())
}

//! GraphQL client for integration testing.
//!
//! Executes GraphQL queries directly against the schema without HTTP overhead.

use directory_core::kernel::ServerDeps;
use directory_core::server::graphql::{create_schema, GraphQLContext, Schema};
use juniper::{InputValue, Variables};
use serde_json::Value;
use std::sync::Arc;

/// GraphQL client for executing queries and mutations in tests.
pub struct GraphQLClient {
    schema: Schema,
    context: GraphQLContext,
}

/// Result of a GraphQL execution.
#[derive(Debug)]
pub struct GraphQLResult {
    pub data: Option<Value>,
    pub errors: Vec<String>,
    /// `extensions.code` of each error, when present
    pub error_codes: Vec<String>,
    /// `extensions.field` of each error, when present
    pub error_fields: Vec<String>,
}

impl GraphQLResult {
    /// Returns true if the execution had no errors.
    pub fn is_ok(&self) -> bool {
        self.errors.is_empty()
    }

    /// Unwraps the data, panicking if there were errors.
    pub fn unwrap(self) -> Value {
        if !self.errors.is_empty() {
            panic!("GraphQL errors: {:?}", self.errors);
        }
        self.data.expect("No data returned")
    }

    /// Gets a value at the given dotted path.
    pub fn get(&self, path: &str) -> Value {
        let data = self.data.as_ref().expect("No data returned");
        let mut current = data;
        for key in path.split('.') {
            current = &current[key];
        }
        current.clone()
    }

    pub fn first_code(&self) -> Option<&str> {
        self.error_codes.first().map(String::as_str)
    }
}

impl GraphQLClient {
    pub fn new(deps: Arc<ServerDeps>, is_admin: bool) -> Self {
        Self {
            schema: create_schema(),
            context: GraphQLContext::new(deps, is_admin),
        }
    }

    /// Execute a GraphQL query/mutation.
    pub async fn execute(&self, query: &str) -> GraphQLResult {
        self.execute_with_vars(query, Variables::new()).await
    }

    /// Execute a GraphQL query/mutation with variables.
    pub async fn execute_with_vars(&self, query: &str, variables: Variables) -> GraphQLResult {
        let (result, errors) =
            juniper::execute(query, None, &self.schema, &variables, &self.context)
                .await
                .expect("GraphQL execution failed");

        let data = Some(serde_json::to_value(&result).expect("Failed to serialize GraphQL result"));

        let extension = |e: &juniper::ExecutionError<juniper::DefaultScalarValue>, key: &str| {
            e.error()
                .extensions()
                .as_object_value()
                .and_then(|o| o.get_field_value(key))
                .and_then(|v| v.as_string_value())
                .map(str::to_string)
        };

        GraphQLResult {
            data,
            errors: errors
                .iter()
                .map(|e| e.error().message().to_string())
                .collect(),
            error_codes: errors.iter().filter_map(|e| extension(e, "code")).collect(),
            error_fields: errors.iter().filter_map(|e| extension(e, "field")).collect(),
        }
    }

    /// Execute a query and expect success, returning the data.
    pub async fn query(&self, query: &str) -> Value {
        self.execute(query).await.unwrap()
    }
}

/// GraphQL variables from string pairs.
pub fn string_vars(pairs: &[(&str, &str)]) -> Variables {
    pairs
        .iter()
        .map(|(name, value)| (name.to_string(), InputValue::scalar(value.to_string())))
        .collect()
}

//! `autocomplete_complete` tool handler

use std::path::Path;
use std::sync::Arc;

use rmcp::ErrorData as McpError;
use rmcp::handler::server::wrapper::Parameters;
use rmcp::model::CallToolResult;
use validator::Validate;

use cortex_application::{CompletionInput, CompletionOrchestrator};
use cortex_domain::entities::Language;

use crate::args::AutocompleteCompleteArgs;
use crate::responses::ResponseFormatter;

/// Handler for the `autocomplete_complete` tool
pub struct AutocompleteCompleteHandler {
    completion: Arc<CompletionOrchestrator>,
}

impl AutocompleteCompleteHandler {
    /// Create a new `autocomplete_complete` handler
    pub fn new(completion: Arc<CompletionOrchestrator>) -> Self {
        Self { completion }
    }

    /// Handle the `autocomplete_complete` tool request
    pub async fn handle(&self, Parameters(args): Parameters<AutocompleteCompleteArgs>) -> Result<CallToolResult, McpError> {
        if let Err(e) = args.validate() {
            return Err(McpError::invalid_params(format!("Invalid arguments: {e}"), None));
        }

        let language = args
            .language
            .as_deref()
            .or_else(|| Path::new(&args.filepath).extension().and_then(|e| e.to_str()))
            .map(Language::from_extension)
            .unwrap_or(Language::PlainText);

        let input = CompletionInput {
            request_id: args.request_id,
            filepath: args.filepath,
            prefix: args.prefix,
            suffix: args.suffix,
            position: (args.line, args.character),
            language,
            recently_edited_ranges: args.recently_edited_ranges,
            recently_visited_ranges: args.recently_visited_ranges,
            diff_ranges: Vec::new(),
            ide_snippets: Vec::new(),
            clipboard: args.clipboard,
            manually_pass_prefix: args.manually_pass_prefix,
            selected_completion_info_present: args.selected_completion_info_present,
            reponame: args.reponame,
        };

        let completion = self.completion.provide(input).await;
        Ok(ResponseFormatter::format_completion(completion.as_ref()))
    }
}

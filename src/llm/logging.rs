// src/llm/logging.rs
// Shared LLM logging helpers

use tracing::info;

/// Log token usage for a model call
pub fn log_usage(request_id: &str, provider: &str, prompt_tokens: u32, completion_tokens: u32) {
    info!(
        request_id = %request_id,
        prompt_tokens,
        completion_tokens,
        total_tokens = prompt_tokens + completion_tokens,
        "{} usage stats", provider
    );
}

/// Log completion summary for a model call
pub fn log_completion(request_id: &str, provider: &str, duration_ms: u64, content_len: usize) {
    info!(
        request_id = %request_id,
        duration_ms,
        content_len,
        "{} generation complete", provider
    );
}

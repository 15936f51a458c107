//! Mapping between abstraction types and OpenAI-specific types

use crate::llm::core::types::{GenerateRequest, Message, MessageRole};

use super::types::{ChatCompletionRequest, ChatCompletionResponse, ChatMessage, ResponseFormat};

/// Convert our abstraction request to the chat-completions request format
pub fn to_openai_request(model: &str, request: GenerateRequest) -> ChatCompletionRequest {
    let mut messages = Vec::with_capacity(request.messages.len() + 1);
    if let Some(system) = request.system {
        messages.push(ChatMessage {
            role: "system".to_string(),
            content: system,
        });
    }
    messages.extend(request.messages.into_iter().map(to_openai_message));

    ChatCompletionRequest {
        model: model.to_string(),
        messages,
        max_tokens: Some(request.config.max_tokens),
        temperature: request.config.temperature,
        top_p: request.config.top_p,
        stop: request.config.stop_sequences,
        response_format: request
            .config
            .json_mode
            .then(ResponseFormat::json_object),
    }
}

fn to_openai_message(message: Message) -> ChatMessage {
    let role = match message.role {
        MessageRole::User => "user",
        MessageRole::Assistant => "assistant",
    };

    ChatMessage {
        role: role.to_string(),
        content: message.content,
    }
}

/// Pull the first choice's message text out of a chat-completions body.
///
/// A completion whose first choice carries no content yields its refusal text,
/// or an empty string. Bodies that are not a completion envelope are returned
/// unchanged so the caller can still inspect them.
pub fn extract_reply_text(body: &str) -> String {
    match serde_json::from_str::<ChatCompletionResponse>(body) {
        Ok(response) => response
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content.or(choice.message.refusal))
            .unwrap_or_default(),
        Err(_) => body.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::core::config::GenerationConfig;
    use serde_json::json;

    fn request(json_mode: bool) -> GenerateRequest {
        GenerateRequest {
            messages: vec![Message::user("Check my trip")],
            config: GenerationConfig::new(512)
                .with_temperature(0.2)
                .with_json_mode(json_mode),
            system: Some("You review itineraries.".to_string()),
        }
    }

    #[test]
    fn test_system_prompt_becomes_first_message() {
        let openai = to_openai_request("gpt-4o-mini", request(false));
        assert_eq!(openai.model, "gpt-4o-mini");
        assert_eq!(openai.messages.len(), 2);
        assert_eq!(openai.messages[0].role, "system");
        assert_eq!(openai.messages[0].content, "You review itineraries.");
        assert_eq!(openai.messages[1].role, "user");
        assert_eq!(openai.max_tokens, Some(512));
        assert_eq!(openai.temperature, Some(0.2));
        assert!(openai.response_format.is_none());
    }

    #[test]
    fn test_json_mode_sets_response_format() {
        let openai = to_openai_request("gpt-4o-mini", request(true));
        let value = serde_json::to_value(&openai).unwrap();
        assert_eq!(value["response_format"]["type"], "json_object");
        assert!(value.get("top_p").is_none());
        assert!(value.get("stop").is_none());
    }

    #[test]
    fn test_extract_reply_text() {
        let body = json!({
            "id": "chatcmpl-1",
            "choices": [{
                "index": 0,
                "message": { "role": "assistant", "content": "{\"is_valid\": true}" },
                "finish_reason": "stop"
            }]
        })
        .to_string();
        assert_eq!(extract_reply_text(&body), "{\"is_valid\": true}");
    }

    #[test]
    fn test_extract_reply_text_passthrough() {
        assert_eq!(extract_reply_text("plain text"), "plain text");

        let error_body = json!({ "error": { "message": "bad key" } }).to_string();
        assert_eq!(extract_reply_text(&error_body), error_body);
    }

    #[test]
    fn test_envelope_without_content() {
        let refusal = json!({
            "choices": [{
                "message": { "role": "assistant", "content": null, "refusal": "I can't help with that." }
            }]
        })
        .to_string();
        assert_eq!(extract_reply_text(&refusal), "I can't help with that.");

        let no_content = json!({ "choices": [{ "message": { "role": "assistant", "content": null } }] })
            .to_string();
        assert_eq!(extract_reply_text(&no_content), "");

        let no_choices = json!({ "choices": [] }).to_string();
        assert_eq!(extract_reply_text(&no_choices), "");
    }
}

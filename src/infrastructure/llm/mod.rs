mod gemini_client;
mod gemini_types;
mod mock_completion_client;

pub use gemini_client::{
    DEFAULT_BASE_URL, DEFAULT_MODEL, GeminiClient, GeminiTransport, HttpGeminiTransport,
    NO_RESPONSE_MESSAGE, build_generate_request, parse_generate_response,
};
pub use gemini_types::{
    Candidate, Content, GenerateContentRequest, GenerateContentResponse, GoogleSearch,
    GroundingAttribution, GroundingMetadata, Part, Tool, WebReference,
};
pub use mock_completion_client::MockCompletionClient;

//! Span attribute names for routed completions.
//!
//! Provider and model fields follow the OpenTelemetry GenAI semantic
//! conventions; routing-specific fields live under `switchyard.*`. Use them
//! as constant field names: `info_span!("route", { ROUTE_CLASS } = "text")`.

/// The name of the operation being performed (e.g., "chat").
pub const GEN_AI_OPERATION_NAME: &str = "gen_ai.operation.name";

/// Key of the provider that served the request (e.g., "groq").
pub const GEN_AI_PROVIDER_NAME: &str = "gen_ai.provider.name";

/// The model that produced the response.
pub const GEN_AI_RESPONSE_MODEL: &str = "gen_ai.response.model";

/// Request class being routed ("text" or "vision").
pub const ROUTE_CLASS: &str = "switchyard.route.class";

/// Terminal state of the sweep ("success", "exhausted", "cancelled").
pub const ROUTE_OUTCOME: &str = "switchyard.route.outcome";

/// Entry surface that started the route ("cli" or "http").
pub const ROUTE_SURFACE: &str = "switchyard.route.surface";

// --- Operation name values ---

/// Chat-style completion, used for both text and vision requests.
pub const OP_CHAT: &str = "chat";

// --- Outcome values ---

pub const OUTCOME_SUCCESS: &str = "success";
pub const OUTCOME_EXHAUSTED: &str = "exhausted";
pub const OUTCOME_CANCELLED: &str = "cancelled";

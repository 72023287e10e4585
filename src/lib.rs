// Formwork - Form validation strategies for Rust
//
// This library validates form data against rule schemas on the client, one
// field at a time with progressive activation, and on the server as a whole
// object.

// Re-export member crates
pub use formwork_log;
pub use formwork_rules;
pub use formwork_strategy;

// Re-export core functionality
pub use formwork_rules::{
    BuildOptions, ErrorBag, ErrorMap, Lang, MessageMap, RuleError, RuleMap, Validator,
    ValidatorEngine, message_map, rule_map,
};
pub use formwork_strategy::*;

// Prelude for common imports
pub mod prelude {
    pub use crate::{
        ErrorMap,
        Lang,
        MessageMap,
        RuleMap,
        Schema,
        SchemaHook,
        StrategyConfig,
        StrategyError,
        ValidationContext,
        ValidationFailure,
        ValidationPipe,
        ValidationStrategy,
        Validator,
        ValidatorEngine,
        activate_rule,
        create_inactive_schema,
        create_schema,
        message_map,
        rule_map,
        validate,
        validate_server,
    };
}

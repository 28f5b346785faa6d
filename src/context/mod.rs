// Context assembly for the instruction preamble
//
// Loads the restaurant dataset and wraps it with the persona, location,
// greeting rules, and follow-up action menu sent with every turn.

pub mod builder;
pub use builder::{
    build_preamble, ContextDocument, Preamble, ACTION_MENU_OPTIONS, ASSUMED_LOCATION,
    PERSONA_NAME,
};

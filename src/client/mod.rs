//! Typed client-side flows for the sign-up experience: the debounce
//! primitive, the username availability checker, the submission state
//! machine, and the session-aware navigation view. Network access and
//! session state are injected as capability traits so every flow can be
//! driven without a server.

pub mod availability;
pub mod debounce;
pub mod error;
pub mod http;
pub mod navbar;
pub mod signup_flow;

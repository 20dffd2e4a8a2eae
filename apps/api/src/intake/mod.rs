// Candidate intake: boundary validation and the public submission endpoint.
// Invalid submissions are rejected here and never reach the gateway.

pub mod handlers;
pub mod validation;

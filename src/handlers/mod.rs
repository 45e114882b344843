// Two-tier handler architecture:
// Public (no auth) → Protected (bearer token required)

pub mod protected; // /notes — token verified by the auth middleware
pub mod public; // /register, /login

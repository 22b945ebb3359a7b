pub mod jwks_gate;
pub mod permission_gate;

// Copyright 2025 Irreducible Inc.

/// Read boolean flag from the environment variable.
///
/// Unset or unrecognized values read as `false`.
pub fn boolean_env_flag_set(flag: &str) -> bool {
	match std::env::var(flag) {
		Ok(val) => parse_flag(&val),
		Err(_) => false,
	}
}

fn parse_flag(val: &str) -> bool {
	["1", "on", "ON", "true", "TRUE", "yes", "YES"].contains(&val)
}

pub const DEFAULT_AI_DELAY_MS: u64 = 550;
pub const MAX_AI_DELAY_MS: u64 = 10_000;

//! Board and token contract configuration

/// The token quotes balances as fixed-point integers scaled by 10^18
pub const TOKEN_SCALE: u128 = 1_000_000_000_000_000_000;

/// Board method: batched post of up to three good things
pub const METHOD_POST_MULTIPLE: &str = "postMultipleGoodThings";
/// Board method: like an entry by index (transfers one token)
pub const METHOD_LIKE: &str = "likeGoodThing";
/// Token method: grant the board a spending allowance
pub const METHOD_APPROVE: &str = "approve";

/// Contract addresses the client talks to
#[derive(Debug, Clone)]
pub struct BoardConfig {
    /// GratitudeBoard contract address
    pub board_address: String,
    /// Gratitude token contract address
    pub token_address: String,
}

impl BoardConfig {
    pub fn new(board_address: impl Into<String>, token_address: impl Into<String>) -> Self {
        Self {
            board_address: board_address.into(),
            token_address: token_address.into(),
        }
    }
}

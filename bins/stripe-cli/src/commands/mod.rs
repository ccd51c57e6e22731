//! CLI command implementations

pub mod charge;
pub mod customer;
pub mod refund;
pub mod token;

use clap::Args;
use stripe_api_client::endpoints::ListParams;
use stripe_api_client::models::Metadata;

/// Cursor pagination flags shared by list commands
#[derive(Debug, Args)]
pub struct PageArgs {
    /// Page size (1-100)
    #[arg(short, long)]
    pub limit: Option<u8>,

    /// Return objects after this identifier
    #[arg(long)]
    pub starting_after: Option<String>,

    /// Return objects before this identifier
    #[arg(long)]
    pub ending_before: Option<String>,
}

impl PageArgs {
    /// Convert to list parameters
    pub fn to_params(&self) -> ListParams {
        let mut params = ListParams::new();
        params.limit = self.limit;
        params.starting_after.clone_from(&self.starting_after);
        params.ending_before.clone_from(&self.ending_before);
        params
    }
}

/// Parse a `key=value` metadata flag
pub fn parse_key_val(s: &str) -> Result<(String, String), String> {
    let (key, value) = s
        .split_once('=')
        .ok_or_else(|| format!("expected key=value, got `{s}`"))?;
    Ok((key.to_string(), value.to_string()))
}

/// Collect metadata flags; `None` when none were given
pub fn metadata(pairs: Vec<(String, String)>) -> Option<Metadata> {
    (!pairs.is_empty()).then(|| pairs.into_iter().collect())
}

//! `dashbot sign` -- compute a webhook signature for manual testing.
//!
//! ```text
//! dashbot sign push.json
//! curl -H "X-GitHub-Event: push" -H "X-Hub-Signature-256: $(dashbot sign push.json)" \
//!      --data-binary @push.json http://localhost:5000/webhook
//! ```

use std::path::PathBuf;

use anyhow::Context;
use clap::Args;

use dashbot_infra::webhook::compute_signature;

#[derive(Args, Debug)]
pub struct SignArgs {
    /// Environment variable holding the webhook secret.
    #[arg(long, default_value = "GITHUB_WEBHOOK_SECRET")]
    pub secret_env: String,

    /// Payload file, signed byte-for-byte.
    pub file: PathBuf,
}

pub async fn run(args: SignArgs) -> anyhow::Result<()> {
    let secret = std::env::var(&args.secret_env)
        .ok()
        .filter(|s| !s.is_empty())
        .with_context(|| format!("{} is not set", args.secret_env))?;

    let body = tokio::fs::read(&args.file)
        .await
        .with_context(|| format!("failed to read {}", args.file.display()))?;

    println!("{}", compute_signature(&secret, &body));
    Ok(())
}

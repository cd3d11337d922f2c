//! # Credential Subcommands
//!
//! `keygen`, `issue` and `verify`. Issue and verify use the same seed the
//! API server reads, so tokens minted here are accepted there.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use clap::Args;
use serde_json::json;

use skyscope_core::Tier;
use skyscope_credential::{CredentialIssuer, CredentialVerifier, DEFAULT_TOKEN_TTL_SECS};
use skyscope_crypto::{hex, Ed25519KeyPair, Ed25519PublicKey};

use crate::SIGNING_KEY_ENV;

#[derive(Args, Debug)]
pub struct KeygenArgs {
    /// Print only the seed hex, for shell substitution.
    #[arg(long)]
    pub seed_only: bool,
}

#[derive(Args, Debug)]
pub struct IssueArgs {
    /// Tier to issue: free, pro or elite.
    #[arg(long)]
    pub tier: String,

    /// Credential lifetime in seconds.
    #[arg(long, default_value_t = DEFAULT_TOKEN_TTL_SECS)]
    pub ttl_secs: i64,
}

#[derive(Args, Debug)]
pub struct VerifyArgs {
    /// The credential, `{tier}:{expires_at}:{signature_hex}`.
    pub token: String,

    /// Verify against this public key instead of the configured seed.
    #[arg(long)]
    pub public_key: Option<String>,
}

/// A fresh seed and the public key it yields.
pub fn generate_key() -> (String, Ed25519PublicKey) {
    let seed = Ed25519KeyPair::generate_seed();
    let public_key = Ed25519KeyPair::from_seed(&seed).public_key();
    (hex::encode(&seed), public_key)
}

pub fn run_keygen(args: &KeygenArgs) -> Result<u8> {
    let (seed_hex, public_key) = generate_key();
    if args.seed_only {
        println!("{seed_hex}");
    } else {
        println!("OK: generated Ed25519 signing key");
        println!("  {SIGNING_KEY_ENV}={seed_hex}");
        println!("  Public key (hex): {public_key}");
    }
    Ok(0)
}

/// Issue a credential for `tier` signed with `seed_hex`.
///
/// The free tier yields `token: null`.
pub fn issue(
    seed_hex: &str,
    tier: &str,
    ttl_secs: i64,
    now: DateTime<Utc>,
) -> Result<serde_json::Value> {
    let tier: Tier = tier.trim().parse()?;
    let key = Ed25519KeyPair::from_seed_hex(seed_hex).context("invalid signing seed")?;
    let issuer = CredentialIssuer::new(key, ttl_secs).context("invalid --ttl-secs")?;
    let issued = issuer.issue(tier, now)?;
    Ok(match issued {
        Some(credential) => json!({
            "tier": credential.tier,
            "token": credential.token,
            "expiresAt": credential.expires_at,
        }),
        None => json!({ "tier": tier, "token": null, "expiresAt": null }),
    })
}

pub fn run_issue(args: &IssueArgs) -> Result<u8> {
    let seed_hex = signing_seed()?;
    let output = issue(&seed_hex, &args.tier, args.ttl_secs, Utc::now())?;
    if output["token"].is_null() {
        eprintln!("The free tier needs no credential; none issued.");
    }
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(0)
}

/// Verify `token` against `public_key`.
///
/// Returns the JSON report and whether the credential is valid.
pub fn verify(
    public_key: Ed25519PublicKey,
    token: &str,
    now: DateTime<Utc>,
) -> (serde_json::Value, bool) {
    let verifier = CredentialVerifier::new(public_key);
    match verifier.verify(token.trim(), now) {
        Ok(verified) => (
            json!({
                "valid": true,
                "tier": verified.tier,
                "expiresAt": verified.expires_at,
            }),
            true,
        ),
        Err(err) => (
            json!({
                "valid": false,
                "reason": err.code(),
                "message": err.to_string(),
            }),
            false,
        ),
    }
}

pub fn run_verify(args: &VerifyArgs) -> Result<u8> {
    let public_key = match &args.public_key {
        Some(hex) => Ed25519PublicKey::from_hex(hex.trim()).context("invalid --public-key")?,
        None => Ed25519KeyPair::from_seed_hex(&signing_seed()?)
            .context("invalid signing seed")?
            .public_key(),
    };
    let (report, valid) = verify(public_key, &args.token, Utc::now());
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(if valid { 0 } else { 2 })
}

fn signing_seed() -> Result<String> {
    std::env::var(SIGNING_KEY_ENV)
        .ok()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .with_context(|| format!("{SIGNING_KEY_ENV} is not set"))
}

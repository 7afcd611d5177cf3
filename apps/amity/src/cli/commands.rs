//! # CLI Command Implementations
//!
//! This module contains the actual implementations of CLI commands. Each
//! command opens the redb-backed store, wraps it in the `Network` façade,
//! and prints either human-readable or JSON output.

use super::{Cli, Commands};
use amity_core::{AmityError, Member, MemberId, Network, RedbStore};
use std::path::Path;

/// Open the store at the given path behind the engine façade.
fn open_network(path: &Path) -> Result<Network<RedbStore>, AmityError> {
    let store = RedbStore::open(path)?;
    Ok(Network::new(store))
}

/// Execute the parsed CLI invocation.
pub fn execute(cli: Cli) -> Result<(), AmityError> {
    let network = open_network(&cli.database)?;
    let json_mode = cli.json_mode;

    match cli.command {
        Commands::Add {
            id,
            name,
            interests,
        } => cmd_add(&network, id, &name, &interests, json_mode),
        Commands::Send { from, to } => {
            network.send_request(MemberId(from), MemberId(to))?;
            print_ack(json_mode, "request_sent", from, to);
            Ok(())
        }
        Commands::Accept { from, to } => {
            network.accept_request(MemberId(from), MemberId(to))?;
            print_ack(json_mode, "request_accepted", from, to);
            Ok(())
        }
        Commands::Reject { from, to } => {
            network.reject_request(MemberId(from), MemberId(to))?;
            print_ack(json_mode, "request_rejected", from, to);
            Ok(())
        }
        Commands::Unfriend { a, b } => {
            network.remove_friend(MemberId(a), MemberId(b))?;
            print_ack(json_mode, "unfriended", a, b);
            Ok(())
        }
        Commands::Block { blocker, blocked } => {
            network.block(MemberId(blocker), MemberId(blocked))?;
            print_ack(json_mode, "blocked", blocker, blocked);
            Ok(())
        }
        Commands::Unblock { blocker, blocked } => {
            network.unblock(MemberId(blocker), MemberId(blocked))?;
            print_ack(json_mode, "unblocked", blocker, blocked);
            Ok(())
        }
        Commands::Status { viewer, subject } => {
            cmd_status(&network, viewer, subject, json_mode)
        }
        Commands::Mutual { a, b } => cmd_mutual(&network, a, b, json_mode),
        Commands::Recommend { member, limit } => {
            cmd_recommend(&network, member, limit, json_mode)
        }
        Commands::Info => cmd_info(&network, &cli.database, json_mode),
        Commands::Compact => cmd_compact(network, &cli.database, json_mode),
    }
}

// =============================================================================
// COMMANDS
// =============================================================================

fn cmd_add(
    network: &Network<RedbStore>,
    id: u64,
    name: &str,
    interests: &str,
    json_mode: bool,
) -> Result<(), AmityError> {
    let tags = interests
        .split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty());
    let member = Member::with_interests(MemberId(id), name, tags);

    network.save_member(member)?;
    tracing::info!(member = id, "member registered");

    if json_mode {
        println!(
            "{}",
            serde_json::json!({ "result": "member_added", "id": id })
        );
    } else {
        println!("Registered member {id} ({name})");
    }
    Ok(())
}

fn cmd_status(
    network: &Network<RedbStore>,
    viewer: u64,
    subject: u64,
    json_mode: bool,
) -> Result<(), AmityError> {
    let status = network.status(MemberId(viewer), MemberId(subject))?;
    let outbound_block = network.is_blocked(MemberId(viewer), MemberId(subject))?;
    let inbound_block = network.is_blocked(MemberId(subject), MemberId(viewer))?;

    if json_mode {
        println!(
            "{}",
            serde_json::json!({
                "viewer": viewer,
                "subject": subject,
                "status": status.to_string(),
                "viewer_blocked_subject": outbound_block,
                "subject_blocked_viewer": inbound_block,
            })
        );
    } else {
        println!("Status {viewer} -> {subject}: {status}");
        if outbound_block {
            println!("  {viewer} has blocked {subject}");
        }
        if inbound_block {
            println!("  {subject} has blocked {viewer}");
        }
    }
    Ok(())
}

fn cmd_mutual(
    network: &Network<RedbStore>,
    a: u64,
    b: u64,
    json_mode: bool,
) -> Result<(), AmityError> {
    let count = network.mutual_count(MemberId(a), MemberId(b))?;

    if json_mode {
        println!(
            "{}",
            serde_json::json!({ "a": a, "b": b, "mutual_friends": count })
        );
    } else {
        println!("Members {a} and {b} have {count} mutual friend(s)");
    }
    Ok(())
}

fn cmd_recommend(
    network: &Network<RedbStore>,
    member: u64,
    limit: usize,
    json_mode: bool,
) -> Result<(), AmityError> {
    let ranked = network.recommend(MemberId(member), limit)?;

    if json_mode {
        let entries: Vec<serde_json::Value> = ranked
            .iter()
            .map(|r| serde_json::json!({ "member": r.member.0, "score": r.score }))
            .collect();
        println!(
            "{}",
            serde_json::json!({ "member": member, "recommendations": entries })
        );
        return Ok(());
    }

    if ranked.is_empty() {
        println!("No recommendations for member {member}");
        return Ok(());
    }
    println!("Recommendations for member {member}:");
    for (rank, r) in ranked.iter().enumerate() {
        let name = network
            .get_member(r.member)?
            .map_or_else(|| "<unknown>".to_string(), |m| m.name);
        println!("  {:>2}. {} ({}) score {}", rank + 1, r.member, name, r.score);
    }
    Ok(())
}

fn cmd_info(
    network: &Network<RedbStore>,
    database: &Path,
    json_mode: bool,
) -> Result<(), AmityError> {
    let count = network.member_count()?;

    if json_mode {
        println!(
            "{}",
            serde_json::json!({
                "database": database.to_string_lossy(),
                "members": count,
            })
        );
    } else {
        println!("Database: {}", database.display());
        println!("Members:  {count}");
    }
    Ok(())
}

fn cmd_compact(
    network: Network<RedbStore>,
    database: &Path,
    json_mode: bool,
) -> Result<(), AmityError> {
    // Compaction needs exclusive access to the backend.
    let mut store = network.into_inner();
    store.compact()?;
    tracing::info!(database = %database.display(), "database compacted");

    if json_mode {
        println!(
            "{}",
            serde_json::json!({
                "result": "compacted",
                "database": database.to_string_lossy(),
            })
        );
    } else {
        println!("Compacted {}", database.display());
    }
    Ok(())
}

// =============================================================================
// OUTPUT HELPERS
// =============================================================================

fn print_ack(json_mode: bool, action: &str, first: u64, second: u64) {
    if json_mode {
        println!(
            "{}",
            serde_json::json!({ "result": action, "first": first, "second": second })
        );
    } else {
        println!("OK: {action} ({first}, {second})");
    }
}

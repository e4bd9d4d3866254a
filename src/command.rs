//! # Command Builder
//!
//! Translates a [`ScanConfig`] plus target subnets into the flat argument
//! list the zmap binary expects. The flag spellings mirror zmap's CLI
//! contract exactly and are treated as a fixed external protocol. Emission
//! order is fixed, so the same request always produces a byte-identical
//! argument list.

use crate::config::ScanConfig;
use crate::error::{Result, ZmapError};

/// Build the zmap argument list for a scan invocation
///
/// The configuration is validated first; no argument list is produced for
/// a request that zmap would reject or misinterpret. Target subnets are
/// appended as positional arguments after all flags.
pub fn build_scan_args(config: &ScanConfig, subnets: &[String]) -> Result<Vec<String>> {
    config.validate()?;

    let csv_selected = config.output_module.as_deref() == Some("csv");
    let no_fields = config
        .output_fields
        .as_ref()
        .map_or(true, |fields| fields.is_empty());
    if csv_selected && no_fields {
        return Err(ZmapError::invalid_argument(
            "output module 'csv' requires output_fields",
        ));
    }

    let mut args = Vec::new();

    if let Some(port) = config.target_port {
        push_flag(&mut args, "--target-port", port);
    }
    if let Some(bandwidth) = &config.bandwidth {
        push_flag(&mut args, "--bandwidth", bandwidth);
    }
    if let Some(rate) = config.rate {
        push_flag(&mut args, "--rate", rate);
    }
    if let Some(cooldown) = config.cooldown_time {
        push_flag(&mut args, "--cooldown-time", cooldown);
    }
    if let Some(interface) = &config.interface {
        push_flag(&mut args, "--interface", interface);
    }
    if let Some(source_ip) = &config.source_ip {
        push_flag(&mut args, "--source-ip", source_ip);
    }
    if let Some(source_port) = &config.source_port {
        push_flag(&mut args, "--source-port", source_port);
    }
    if let Some(gateway_mac) = &config.gateway_mac {
        push_flag(&mut args, "--gateway-mac", gateway_mac);
    }
    if let Some(source_mac) = &config.source_mac {
        push_flag(&mut args, "--source-mac", source_mac);
    }
    if let Some(target_mac) = &config.target_mac {
        push_flag(&mut args, "--target-mac", target_mac);
    }
    if config.vpn {
        args.push("--vpn".to_string());
    }

    if let Some(max_targets) = &config.max_targets {
        push_flag(&mut args, "--max-targets", max_targets);
    }
    if let Some(max_runtime) = config.max_runtime {
        push_flag(&mut args, "--max-runtime", max_runtime);
    }
    if let Some(max_results) = config.max_results {
        push_flag(&mut args, "--max-results", max_results);
    }
    if let Some(probes) = config.probes {
        push_flag(&mut args, "--probes", probes);
    }
    if let Some(retries) = config.retries {
        push_flag(&mut args, "--retries", retries);
    }
    if config.dryrun {
        args.push("--dryrun".to_string());
    }
    if let Some(seed) = config.seed {
        push_flag(&mut args, "--seed", seed);
    }
    if let Some(shards) = config.shards {
        push_flag(&mut args, "--shards", shards);
    }
    if let Some(shard) = config.shard {
        push_flag(&mut args, "--shard", shard);
    }

    if let Some(probe_module) = &config.probe_module {
        push_flag(&mut args, "--probe-module", probe_module);
    }
    if let Some(output_module) = &config.output_module {
        push_flag(&mut args, "--output-module", output_module);
    }
    if let Some(fields) = &config.output_fields {
        if !fields.is_empty() {
            push_flag(&mut args, "--output-fields", fields.join(","));
        }
    }

    if let Some(output_file) = &config.output_file {
        push_flag(&mut args, "--output-file", output_file.display());
    }
    if let Some(blocklist) = &config.blocklist_file {
        push_flag(&mut args, "--blocklist-file", blocklist.display());
    }
    if let Some(allowlist) = &config.allowlist_file {
        push_flag(&mut args, "--allowlist-file", allowlist.display());
    }

    if let Some(threads) = config.sender_threads {
        push_flag(&mut args, "--sender-threads", threads);
    }
    if let Some(cores) = &config.cores {
        push_flag(&mut args, "--cores", cores);
    }
    if config.ignore_invalid_hosts {
        args.push("--ignore-invalid-hosts".to_string());
    }
    if let Some(failures) = config.max_sendto_failures {
        push_flag(&mut args, "--max-sendto-failures", failures);
    }
    if let Some(hitrate) = config.min_hitrate {
        push_flag(&mut args, "--min-hitrate", hitrate);
    }
    if let Some(verbosity) = config.verbosity {
        push_flag(&mut args, "--verbosity", verbosity);
    }

    if let Some(notes) = &config.notes {
        push_flag(&mut args, "--notes", notes);
    }
    if let Some(metadata) = &config.user_metadata {
        let encoded = serde_json::to_string(metadata).map_err(|e| {
            ZmapError::invalid_argument(format!("user_metadata is not valid JSON: {}", e))
        })?;
        push_flag(&mut args, "--user-metadata", encoded);
    }

    for subnet in subnets {
        args.push(subnet.clone());
    }

    Ok(args)
}

fn push_flag(args: &mut Vec<String>, flag: &str, value: impl ToString) {
    args.push(flag.to_string());
    args.push(value.to_string());
}

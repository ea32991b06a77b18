// IAP Settings - Command Line Tool
// Copyright (C) 2026 Christos A. Daggas
// SPDX-License-Identifier: MIT

//! # iap-settings
//!
//! Inspect and edit IAP settings in the persistent store.

use std::env;
use std::path::PathBuf;
use std::process::ExitCode;

use iap_settings::i18n::setup_i18n;
use iap_settings::{ConfigValue, FileStore, IapSettings, SettingsConfig, VERSION};

/// Human-readable application name.
const APP_NAME: &str = "iap-settings";

/// Print version information and exit.
fn print_version() {
    println!("{} {}", APP_NAME, VERSION);
    println!("Copyright (C) 2026 Christos A. Daggas");
    println!("License: MIT");
}

/// Print help information and exit.
fn print_help() {
    println!("Usage: {} [OPTIONS] COMMAND [ARGS]", APP_NAME);
    println!();
    println!("Inspect and edit Internet Access Point settings.");
    println!();
    println!("Commands:");
    println!("  list                    List all IAP IDs with their names");
    println!("  new-id                  Generate an unused IAP ID");
    println!("  name IAP                Show the display name of an IAP");
    println!("  type IAP                Show the connection type of an IAP");
    println!("  get IAP KEY             Show a single value");
    println!("  set IAP KEY VALUE       Store a single value");
    println!("  remove IAP              Remove an IAP");
    println!("  supported TYPE          Check whether a network type is supported");
    println!("  auto-connect            Show the auto-connect IAP");
    println!();
    println!("Options:");
    println!("  -h, --help              Show this help message and exit");
    println!("  -v, --version           Show version information and exit");
    println!("  -d, --debug             Enable debug logging");
    println!("  -c, --config FILE       Read settings from FILE");
    println!("  -s, --store FILE        Use FILE as the settings store");
    println!();
    println!("Environment variables:");
    println!("  RUST_LOG                Set log level (trace, debug, info, warn, error)");
}

fn init_logging(debug_mode: bool) {
    let log_level = if debug_mode {
        tracing::Level::DEBUG
    } else {
        tracing::Level::WARN
    };

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(log_level.into()),
        )
        .init();
}

fn usage_error(message: &str) -> ExitCode {
    eprintln!("{}", message);
    eprintln!("Try '--help' for more information.");
    ExitCode::FAILURE
}

fn main() -> ExitCode {
    let args: Vec<String> = env::args().skip(1).collect();
    let mut debug_mode = false;
    let mut config_file: Option<PathBuf> = None;
    let mut store_file: Option<PathBuf> = None;
    let mut command: Vec<String> = Vec::new();

    let mut iter = args.into_iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "-h" | "--help" => {
                print_help();
                return ExitCode::SUCCESS;
            }
            "-v" | "--version" => {
                print_version();
                return ExitCode::SUCCESS;
            }
            "-d" | "--debug" => debug_mode = true,
            "-c" | "--config" => match iter.next() {
                Some(path) => config_file = Some(PathBuf::from(path)),
                None => return usage_error("Option '--config' requires a file"),
            },
            "-s" | "--store" => match iter.next() {
                Some(path) => store_file = Some(PathBuf::from(path)),
                None => return usage_error("Option '--store' requires a file"),
            },
            _ => {
                if arg.starts_with('-') && command.is_empty() {
                    return usage_error(&format!("Unknown option: {}", arg));
                }
                command.push(arg);
            }
        }
    }

    init_logging(debug_mode);
    setup_i18n();

    let mut config = match config_file {
        Some(path) => match SettingsConfig::load_from_file(&path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("{}", e);
                return ExitCode::FAILURE;
            }
        },
        None => SettingsConfig::load_default().unwrap_or_default(),
    };
    if store_file.is_some() {
        config.store_file = store_file;
    }

    let store = match FileStore::open(config.store_path()) {
        Ok(store) => store,
        Err(e) => {
            eprintln!("{}", e);
            return ExitCode::FAILURE;
        }
    };
    tracing::debug!("Using store {:?}", store.path());

    let settings = IapSettings::new(store, config);
    run(&settings, &command)
}

fn run(settings: &IapSettings<FileStore>, command: &[String]) -> ExitCode {
    let args: Vec<&str> = command.iter().map(String::as_str).collect();

    match args.as_slice() {
        ["list"] => {
            for iap in settings.list_iaps() {
                println!("{}\t{}", iap, settings.name(&iap));
            }
            ExitCode::SUCCESS
        }
        ["new-id"] => match settings.create_iap_id() {
            Ok(id) => {
                println!("{}", id);
                ExitCode::SUCCESS
            }
            Err(e) => {
                eprintln!("{}", e);
                ExitCode::FAILURE
            }
        },
        ["name", iap] => {
            println!("{}", settings.name(iap));
            ExitCode::SUCCESS
        }
        ["type", iap] => {
            println!("{}", settings.iap_type(iap));
            ExitCode::SUCCESS
        }
        ["get", iap, key] => match settings.value(iap, key) {
            Some(value) => {
                println!("{}", value);
                ExitCode::SUCCESS
            }
            None => ExitCode::FAILURE,
        },
        ["set", iap, key, value] => {
            let result = settings
                .set_value(iap, key, ConfigValue::parse_literal(value))
                .and_then(|_| settings.store().flush());
            match result {
                Ok(()) => ExitCode::SUCCESS,
                Err(e) => {
                    eprintln!("{}", e);
                    ExitCode::FAILURE
                }
            }
        }
        ["remove", iap] => {
            if settings.remove_iap(iap) {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            }
        }
        ["supported", iap_type] => {
            let supported = settings.is_iaptype_supported(iap_type);
            println!("{}", if supported { "yes" } else { "no" });
            if supported {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            }
        }
        ["auto-connect"] => match settings.auto_connect() {
            Some(iap) => {
                println!("{}", iap);
                ExitCode::SUCCESS
            }
            None => ExitCode::FAILURE,
        },
        [] => usage_error("No command given"),
        _ => usage_error(&format!("Unknown command: {}", command.join(" "))),
    }
}

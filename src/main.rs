//! Solar sizer entry point — CLI wiring and scenario-driven report generation.

use std::path::Path;
use std::process;

use solar_sizer::config::ScenarioConfig;
use solar_sizer::io::export::{export_csv, export_json};
use solar_sizer::sizing::{SizingScope, run_sizing};

/// Parsed CLI arguments.
struct CliArgs {
    scenario_path: Option<String>,
    preset: Option<String>,
    scope: Option<String>,
    report_csv: Option<String>,
    report_json: Option<String>,
    #[cfg(feature = "api")]
    serve: bool,
    #[cfg(feature = "api")]
    port: u16,
}

fn print_help() {
    eprintln!("solar-sizer — Off-grid solar installation sizing engine");
    eprintln!();
    eprintln!("Usage: solar-sizer [OPTIONS]");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --scenario <path>      Load scenario from TOML config file");
    eprintln!("  --preset <name>        Use a built-in preset (homestead, clinic, irrigation)");
    eprintln!("  --scope <scope>        Sizing scope: pv, pv-battery, pv-battery-pump");
    eprintln!("  --report-csv <path>    Export the report audit table to CSV");
    eprintln!("  --report-json <path>   Export the full report to JSON");
    #[cfg(feature = "api")]
    {
        eprintln!("  --serve                Start REST API server after sizing");
        eprintln!("  --port <u16>           API server port (default: 3000)");
    }
    eprintln!("  --help                 Show this help message");
    eprintln!();
    eprintln!("If no --scenario or --preset is given, the homestead preset is used.");
}

fn parse_args() -> CliArgs {
    let args: Vec<String> = std::env::args().collect();
    let mut cli = CliArgs {
        scenario_path: None,
        preset: None,
        scope: None,
        report_csv: None,
        report_json: None,
        #[cfg(feature = "api")]
        serve: false,
        #[cfg(feature = "api")]
        port: 3000,
    };

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--help" | "-h" => {
                print_help();
                process::exit(0);
            }
            "--scenario" => {
                i += 1;
                if i >= args.len() {
                    eprintln!("error: --scenario requires a path argument");
                    process::exit(1);
                }
                cli.scenario_path = Some(args[i].clone());
            }
            "--preset" => {
                i += 1;
                if i >= args.len() {
                    eprintln!("error: --preset requires a name argument");
                    process::exit(1);
                }
                cli.preset = Some(args[i].clone());
            }
            "--scope" => {
                i += 1;
                if i >= args.len() {
                    eprintln!("error: --scope requires a scope argument");
                    process::exit(1);
                }
                cli.scope = Some(args[i].clone());
            }
            "--report-csv" => {
                i += 1;
                if i >= args.len() {
                    eprintln!("error: --report-csv requires a path argument");
                    process::exit(1);
                }
                cli.report_csv = Some(args[i].clone());
            }
            "--report-json" => {
                i += 1;
                if i >= args.len() {
                    eprintln!("error: --report-json requires a path argument");
                    process::exit(1);
                }
                cli.report_json = Some(args[i].clone());
            }
            #[cfg(feature = "api")]
            "--serve" => {
                cli.serve = true;
            }
            #[cfg(feature = "api")]
            "--port" => {
                i += 1;
                if i >= args.len() {
                    eprintln!("error: --port requires a u16 argument");
                    process::exit(1);
                }
                if let Ok(p) = args[i].parse::<u16>() {
                    cli.port = p;
                } else {
                    eprintln!("error: --port value \"{}\" is not a valid u16", args[i]);
                    process::exit(1);
                }
            }
            other => {
                eprintln!("error: unknown argument \"{other}\"");
                print_help();
                process::exit(1);
            }
        }
        i += 1;
    }

    cli
}

fn main() {
    let cli = parse_args();

    // Load config: --scenario takes priority, then --preset, then homestead
    let scenario = if let Some(ref path) = cli.scenario_path {
        match ScenarioConfig::from_toml_file(Path::new(path)) {
            Ok(cfg) => cfg,
            Err(e) => {
                eprintln!("{e}");
                process::exit(1);
            }
        }
    } else if let Some(ref name) = cli.preset {
        match ScenarioConfig::from_preset(name) {
            Ok(cfg) => cfg,
            Err(e) => {
                eprintln!("{e}");
                process::exit(1);
            }
        }
    } else {
        ScenarioConfig::homestead()
    };

    // Validate
    let errors = scenario.validate();
    if !errors.is_empty() {
        for e in &errors {
            eprintln!("{e}");
        }
        process::exit(1);
    }

    // Scope: explicit flag wins, otherwise pump scope when the scenario
    // carries a water load
    let scope = match cli.scope {
        Some(ref s) => match SizingScope::parse(s) {
            Some(scope) => scope,
            None => {
                eprintln!(
                    "error: --scope value \"{s}\" is not one of pv, pv-battery, pv-battery-pump"
                );
                process::exit(1);
            }
        },
        None if scenario.has_water_load() => SizingScope::PvBatteryPump,
        None => SizingScope::PvBattery,
    };

    let report = match run_sizing(scenario.to_input(), scenario.to_assumptions(), scope) {
        Ok(report) => report,
        Err(e) => {
            eprintln!("{e}");
            process::exit(1);
        }
    };

    // Print the report
    println!("{report}");

    // Export if requested
    if let Some(ref path) = cli.report_csv {
        if let Err(e) = export_csv(&report, Path::new(path)) {
            eprintln!("error: failed to write CSV: {e}");
            process::exit(1);
        }
        eprintln!("Report written to {path}");
    }
    if let Some(ref path) = cli.report_json {
        if let Err(e) = export_json(&report, Path::new(path)) {
            eprintln!("error: failed to write JSON: {e}");
            process::exit(1);
        }
        eprintln!("Report written to {path}");
    }

    // Start API server if requested
    #[cfg(feature = "api")]
    if cli.serve {
        use std::net::SocketAddr;
        use std::sync::Arc;

        let state = Arc::new(solar_sizer::api::AppState { report });
        let addr = SocketAddr::from(([0, 0, 0, 0], cli.port));
        let rt = tokio::runtime::Runtime::new().unwrap_or_else(|e| {
            eprintln!("error: failed to create tokio runtime: {e}");
            process::exit(1);
        });
        rt.block_on(solar_sizer::api::serve(state, addr));
    }
}

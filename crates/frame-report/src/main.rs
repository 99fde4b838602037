//! Print the material report and assembly layout of a frame.
//!
//! Usage: frame_report [WIDTH HEIGHT DEPTH] [--bottom X,X,..] [--top X,X,..] [--json]
//!
//! Without dimensions the stock 100 x 50 x 100 frame is reported.

use std::process::ExitCode;

use frame_engine::{build_frame, FrameConfig, FrameError, FrameParams};
use profile_kernel::MockKernel;
use profile_ops::KernelProfileProvider;

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("not a number: {arg}")]
    BadNumber { arg: String },

    #[error("expected WIDTH HEIGHT DEPTH, got {count} positional arguments")]
    Dimensions { count: usize },

    #[error("unknown option: {flag}")]
    UnknownFlag { flag: String },

    #[error("{flag} needs a comma-separated list of positions")]
    MissingList { flag: String },

    #[error(transparent)]
    Frame(#[from] FrameError),

    #[error("could not serialize assembly: {0}")]
    Json(#[from] serde_json::Error),
}

struct Args {
    params: FrameParams,
    json: bool,
}

fn parse_number(arg: &str) -> Result<f64, CliError> {
    arg.trim().parse().map_err(|_| CliError::BadNumber {
        arg: arg.to_string(),
    })
}

fn parse_list(flag: &str, value: Option<String>) -> Result<Vec<f64>, CliError> {
    let value = value.ok_or_else(|| CliError::MissingList {
        flag: flag.to_string(),
    })?;
    value
        .split(',')
        .filter(|s| !s.trim().is_empty())
        .map(parse_number)
        .collect()
}

fn parse_args(mut args: impl Iterator<Item = String>) -> Result<Args, CliError> {
    let mut params = FrameParams::default();
    let mut json = false;
    let mut dims = Vec::new();

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--bottom" => params.bottom_bridge_positions = parse_list(&arg, args.next())?,
            "--top" => params.top_bridge_positions = parse_list(&arg, args.next())?,
            "--json" => json = true,
            flag if flag.starts_with("--") => {
                return Err(CliError::UnknownFlag {
                    flag: flag.to_string(),
                })
            }
            value => dims.push(parse_number(value)?),
        }
    }

    match dims.as_slice() {
        [] => {}
        [w, h, d] => {
            params.width = *w;
            params.height = *h;
            params.depth = *d;
        }
        other => return Err(CliError::Dimensions { count: other.len() }),
    }
    Ok(Args { params, json })
}

fn run() -> Result<(), CliError> {
    let args = parse_args(std::env::args().skip(1))?;
    let config = FrameConfig::from_params(args.params).map_err(FrameError::from)?;

    let mut kernel = MockKernel::new();
    let mut provider = KernelProfileProvider::new(&mut kernel);
    let build = build_frame(&config, &mut provider)?;

    if args.json {
        println!("{}", build.tree.to_json()?);
        return Ok(());
    }

    println!(
        "Frame {} x {} x {} mm (usable width {} mm)\n",
        config.width(),
        config.height(),
        config.depth(),
        config.usable_width()
    );
    print!("{}", build.bom);
    println!("\nAssembly:");
    print!("{}", build.tree.show_topology());

    let b = build.tree.world_bounds();
    println!(
        "\nBounding box: ({:.1}, {:.1}, {:.1}) -> ({:.1}, {:.1}, {:.1})",
        b.min.x, b.min.y, b.min.z, b.max.x, b.max.y, b.max.z
    );
    Ok(())
}

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> impl Iterator<Item = String> {
        list.iter().map(|s| s.to_string()).collect::<Vec<_>>().into_iter()
    }

    #[test]
    fn defaults_without_arguments() {
        let parsed = parse_args(args(&[])).unwrap();
        assert_eq!(parsed.params, FrameParams::default());
        assert!(!parsed.json);
    }

    #[test]
    fn dimensions_and_bridge_lists() {
        let parsed =
            parse_args(args(&["400", "200", "300", "--bottom", "50,200", "--json"])).unwrap();
        assert_eq!(parsed.params.width, 400.0);
        assert_eq!(parsed.params.depth, 300.0);
        assert_eq!(parsed.params.bottom_bridge_positions, vec![50.0, 200.0]);
        assert!(parsed.params.top_bridge_positions.is_empty());
        assert!(parsed.json);
    }

    #[test]
    fn partial_dimensions_are_rejected() {
        assert!(matches!(
            parse_args(args(&["400", "200"])),
            Err(CliError::Dimensions { count: 2 })
        ));
        assert!(matches!(
            parse_args(args(&["--top"])),
            Err(CliError::MissingList { .. })
        ));
        assert!(matches!(
            parse_args(args(&["wide", "1", "2"])),
            Err(CliError::BadNumber { .. })
        ));
    }
}
